//! Newtype wrappers for domain identifiers.
//!
//! All persisted entities use integer primary keys so that bulk-imported rows
//! keep the ids they were exported with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! int_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }
    };
}

int_id!(
    /// Identifies a user account.
    UserId
);
int_id!(
    /// Identifies a title (a reviewable work).
    TitleId
);
int_id!(
    /// Identifies a review of a title.
    ReviewId
);
int_id!(
    /// Identifies a comment on a review.
    CommentId
);
