//! Server-rendered HTML fragments.
//!
//! Every function returns a `String`; handlers assemble them and wrap the
//! result with [`layout::page`]. All user text goes through `escape_html`.

pub mod layout;
pub mod stories;
pub mod upload_form;
pub mod viewer;
