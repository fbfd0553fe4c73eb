//! sea-orm entities for the YaMDb API database.

pub mod categories;
pub mod comments;
pub mod genre_titles;
pub mod genres;
pub mod outbox_events;
pub mod reviews;
pub mod titles;
pub mod users;
