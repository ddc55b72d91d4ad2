//! Browser services.
//!
//! # Services
//!
//! - [`reference`] - Fetch the reference table served next to the page
//! - [`spotify`] - Spotify Web API client over `fetch`
//! - [`download`] - Save a document through a temporary object URL

pub mod reference;
pub mod spotify;
pub mod download;

pub use reference::*;
pub use spotify::*;
pub use download::*;
