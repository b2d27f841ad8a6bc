use std::sync::Once;

use soccer_elo::{
    model::structures::fixture::{League, Match},
    utils::test_utils::{date, generate_match}
};

static INIT: Once = Once::new();

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Two short seasons between four clubs, the second one half played
pub fn two_seasons() -> Vec<League> {
    vec![
        League::new(
            "Série A",
            2016,
            vec![
                generate_match("Palmeiras", "Santos", 2, 0, 1),
                generate_match("Flamengo", "Grêmio", 1, 1, 2),
                generate_match("Santos", "Flamengo", 3, 1, 8),
                generate_match("Grêmio", "Palmeiras", 0, 1, 9),
                generate_match("Palmeiras", "Flamengo", 4, 0, 15),
                generate_match("Santos", "Grêmio", 2, 2, 16),
            ]
        ),
        League::new(
            "Série A",
            2017,
            vec![
                generate_match("Santos", "Palmeiras", 1, 0, 370),
                generate_match("Grêmio", "Flamengo", 3, 0, 371),
                Match::unplayed("Flamengo", "Santos", date(378)),
                Match::unplayed("Palmeiras", "Grêmio", date(379)),
                Match::unplayed("Flamengo", "Palmeiras", date(385)),
                Match::unplayed("Grêmio", "Santos", date(386)),
            ]
        ),
    ]
}
