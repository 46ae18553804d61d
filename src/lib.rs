//! Resume scorer library
//!
//! Deterministic heuristics that turn resume text, job descriptions and
//! interview transcripts into scores, category breakdowns and feedback.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod remote;
pub mod report;

pub use analysis::engine::ScoringEngine;
pub use config::Config;
pub use error::{Result, ScoringError};
pub use report::model::{AggregateReport, CategoryId, CategoryScore, ScoreStatus};
