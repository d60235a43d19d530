//! Request handlers, grouped by resource.
//!
//! `pages` renders HTML; the rest speak JSON under `/api/v1`.

pub mod media;
pub mod pages;
pub mod story;
pub mod ui;
