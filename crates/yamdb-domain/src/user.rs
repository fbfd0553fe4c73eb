//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Authorization tier of a user account.
///
/// Wire and storage format: lowercase string (`"user"`, `"moderator"`, `"admin"`).
/// Ordered by privilege so that `admin > moderator > user`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User = 0,
    Moderator = 1,
    Admin = 2,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }

    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }

    pub fn is_moderator(self) -> bool {
        self == Self::Moderator
    }

    fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// Username reserved for the self-service endpoint (`/users/me`).
pub const RESERVED_USERNAME: &str = "me";

pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PERSON_NAME_MAX_LEN: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    #[error("username `{0}` is reserved")]
    Reserved(String),
    #[error("username must not be empty")]
    Empty,
    #[error("username must be at most {USERNAME_MAX_LEN} characters")]
    TooLong,
    #[error("username may contain only letters, digits and @/./+/-/_")]
    InvalidCharacters,
}

/// Validate a username: 1-150 chars of letters, digits and `@.+-_`.
/// `me` is reserved in any letter case.
pub fn validate_username(username: &str) -> Result<(), UsernameError> {
    if username.to_lowercase() == RESERVED_USERNAME {
        return Err(UsernameError::Reserved(username.to_owned()));
    }
    if username.is_empty() {
        return Err(UsernameError::Empty);
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(UsernameError::TooLong);
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-');
    if !username.chars().all(allowed) {
        return Err(UsernameError::InvalidCharacters);
    }
    Ok(())
}

/// Shape check for an email address: `local@domain.tld`, at most 254 chars.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.chars().count() > EMAIL_MAX_LEN {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn validate_person_name(name: &str) -> bool {
    name.chars().count() <= PERSON_NAME_MAX_LEN
}
