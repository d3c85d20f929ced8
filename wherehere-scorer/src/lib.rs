//! Radius, scoring and ranking for WhereHere recommendations.
//!
//! - [`RadiusCalculator`] turns a role and level into a search radius.
//! - [`ScoringEngine`] combines category fit, distance decay, mood/vibe
//!   match and cost fit into a weighted score, adds flat weather, time and
//!   hidden-gem bonuses plus a little exploration noise, and explains the
//!   result with its strongest factor.
//! - [`RankSelector`] keeps the best `k`.
//!
//! Configuration lives in [`ScoringConfig`]; its defaults reproduce the
//! production ranking.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod error;
mod factors;
mod radius;
mod rank;
mod reason;
mod weights;

pub use engine::{ScoringContext, ScoringEngine};
pub use error::ScoringError;
pub use factors::mood_keywords;
pub use radius::RadiusCalculator;
pub use rank::RankSelector;
pub use weights::{ScoreWeights, ScoringConfig};
