//! Recommendation pipeline for WhereHere.
//!
//! [`RoleRecommender`] implements the
//! [`Recommender`](wherehere_core::Recommender) trait. For each request it
//! derives a search radius from the role and level, asks a
//! [`CandidateSource`](wherehere_core::CandidateSource) for nearby places,
//! scores them with exploration noise from a
//! [`RandomSource`](wherehere_core::RandomSource), and keeps the best few.
//! An empty neighbourhood is reported as a typed result, never an error.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod recommender;

pub use recommender::{RecommenderConfig, RoleRecommender};
