//! Flounder Index Library
//!
//! This library renders the gemini home page of a small gemtext hosting service: the most
//! recently updated files and a shuffled directory of users, read from the service's SQLite
//! store and laid out by a gemtext template.
//!

pub mod store;
pub mod page;
pub mod render;
pub mod gemini;
pub mod utils;
