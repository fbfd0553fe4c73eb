//! Catalog value types: categories, genres and title constraints.

use serde::{Deserialize, Serialize};

pub const NAME_MAX_LEN: usize = 256;
pub const SLUG_MAX_LEN: usize = 50;

/// Earliest release year a title may carry.
pub const MIN_TITLE_YEAR: i32 = -45500;

/// Name + slug pair shared by categories and genres.
///
/// The slug is the public identifier; the name is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugName {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogFieldError {
    #[error("must not be empty")]
    Empty,
    #[error("must be at most {0} characters")]
    TooLong(usize),
    #[error("may contain only latin letters, digits, `-` and `_`")]
    InvalidSlug,
    #[error("year must be between {min} and {max}")]
    YearOutOfRange { min: i32, max: i32 },
}

/// Slugs match `^[-a-zA-Z0-9_]+$` and are at most 50 characters.
pub fn validate_slug(slug: &str) -> Result<(), CatalogFieldError> {
    if slug.is_empty() {
        return Err(CatalogFieldError::Empty);
    }
    if slug.len() > SLUG_MAX_LEN {
        return Err(CatalogFieldError::TooLong(SLUG_MAX_LEN));
    }
    if !slug
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(CatalogFieldError::InvalidSlug);
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), CatalogFieldError> {
    if name.trim().is_empty() {
        return Err(CatalogFieldError::Empty);
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(CatalogFieldError::TooLong(NAME_MAX_LEN));
    }
    Ok(())
}

impl SlugName {
    /// Returns the offending field name alongside the error.
    pub fn validate(&self) -> Result<(), (&'static str, CatalogFieldError)> {
        validate_name(&self.name).map_err(|e| ("name", e))?;
        validate_slug(&self.slug).map_err(|e| ("slug", e))?;
        Ok(())
    }
}

/// A title's year must lie in `[MIN_TITLE_YEAR, current_year]`.
pub fn validate_year(year: i32, current_year: i32) -> Result<(), CatalogFieldError> {
    if (MIN_TITLE_YEAR..=current_year).contains(&year) {
        Ok(())
    } else {
        Err(CatalogFieldError::YearOutOfRange {
            min: MIN_TITLE_YEAR,
            max: current_year,
        })
    }
}
