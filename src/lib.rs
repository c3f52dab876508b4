//! Splits a roster of students into fixed-size groups that avoid earlier
//! pairings and balance gender, study level and exchange status.

pub mod action;
pub mod anneal;
pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod render;
pub mod roster;
pub mod score;

pub use anneal::{optimize, optimize_from_entropy, Annealer, Outcome};
pub use config::{AnnealParams, Config, Weights};
pub use error::{ShuffleError, ShuffleResult};
pub use history::{build_forbidden_pairs, History};
pub use score::{score_group, score_partition};
