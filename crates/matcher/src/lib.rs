//! `targetfind-matcher`: combinatorial target-matching engine.
//!
//! Pure engine crate: receives pre-loaded items, returns the items whose
//! sum, difference, product or quotient lands on each target.
//! No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod progress;
pub mod reconstruct;
pub mod strategy;
pub mod tolerance;

pub use config::{Operation, SearchConfig};
pub use engine::{run, search};
pub use error::SearchError;
pub use model::{Item, MatchResult, SearchOutput};
pub use progress::{CancelToken, NoProgress, ProgressSink};
pub use reconstruct::{reconstruct, resolve};
pub use tolerance::ToleranceRule;
