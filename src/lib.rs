//! Decision Engine - Multi-criteria decision analysis
//!
//! This crate ranks options against weighted criteria with soft constraint
//! penalties, and explains the result with a rationale, a confidence estimate,
//! tipping-point sensitivity and Monte Carlo win probabilities.

pub mod application;
pub mod config;
pub mod domain;
