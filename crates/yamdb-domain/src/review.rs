//! Review scores and title rating.

use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// A review score in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("score must be between {MIN_SCORE} and {MAX_SCORE}, got {0}")]
pub struct ScoreOutOfRange(pub i64);

impl Score {
    pub fn new(value: i64) -> Result<Self, ScoreOutOfRange> {
        if (MIN_SCORE as i64..=MAX_SCORE as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ScoreOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

/// Mean of the given scores, truncated toward zero. `None` when there are no scores.
pub fn rating<I>(scores: I) -> Option<u32>
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0u64, 0u64), |(sum, n), s| (sum + u64::from(s), n + 1));
    if count == 0 {
        None
    } else {
        Some((sum / count) as u32)
    }
}
