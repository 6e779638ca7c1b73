//! Services - business logic
//!
//! This module contains the core business logic services:
//! - `ranking` - Top-K nearest facility lookup by distance then cheapest price

pub mod ranking;

// Re-export commonly used types
pub use ranking::{cheapest_item, manhattan_distance, rank, RankError};
