use clap::Parser;
use soccer_elo::{
    args::Args,
    error::ProcessorError,
    model::{league_processor::LeagueProcessor, rating_tracker::RatingTracker, statistics::Statistics},
    persistence::{
        export::{export_csv, save_teams},
        loader::{load_leagues, load_teams}
    }
};
use tracing::{error, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(log_level: &str) {
    let indicatif_layer = IndicatifLayer::new();
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .try_init();
}

fn run(args: &Args) -> Result<(), ProcessorError> {
    let config = args.elo_config()?;
    let tracker = match &args.teams {
        Some(path) => load_teams(path)?,
        None => RatingTracker::new()
    };

    let mut processor = LeagueProcessor::with_teams(config, tracker);
    for path in &args.leagues {
        processor.add_leagues(load_leagues(path)?);
    }

    if args.seasons {
        processor.calculate_seasons();
    } else {
        processor.calculate_ratings();
    }

    for (position, team) in processor.teams_sorted(true).iter().enumerate() {
        info!("{:>3}. {:<30} {:>8.2}", position + 1, team.name(), team.last_rating());
    }

    if let Some(path) = &args.fixtures {
        let fixtures = load_leagues(path)?.into_iter().flat_map(|l| l.matches).collect();
        let simulator = processor.simulator(fixtures, args.simulation_options());
        let runs = simulator.simulate_many(args.runs, args.seed)?;
        let statistics = Statistics::from_runs(&runs);

        info!("{:<30} {:>9} {:>9} {:>9}", "Team", "Champion", "Top 4", "Bottom 4");
        for (team, probabilities) in statistics.distributions() {
            info!(
                "{:<30} {:>8.2}% {:>8.2}% {:>8.2}%",
                team, probabilities.champion, probabilities.top4, probabilities.bottom4
            );
        }
    }

    if let Some(path) = &args.save_teams {
        save_teams(path, processor.rating_tracker())?;
    }

    if let Some(dir) = &args.csv_dir {
        export_csv(dir, processor.rating_tracker())?;
    }

    Ok(())
}
