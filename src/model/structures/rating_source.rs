use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;
use strum_macros::{Display, EnumIter};

/// What produced a rating point
#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[repr(u8)]
pub enum RatingSource {
    Initial = 0,
    #[default]
    Match = 1,
    Regression = 2
}

impl TryFrom<i32> for RatingSource {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(RatingSource::Initial),
            1 => Ok(RatingSource::Match),
            2 => Ok(RatingSource::Regression),
            _ => Err(())
        }
    }
}
