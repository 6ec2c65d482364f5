//! Question and category providers.
//!
//! The session engine never fetches anything itself. Hosts hand it
//! question sets obtained through these traits.

pub mod opentdb;
pub mod traits;

pub use opentdb::{OpenTdbClient, DEFAULT_BASE_URL};
pub use traits::{CategoryProvider, QuestionProvider};
