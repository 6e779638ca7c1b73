//! Domain models - core value types
//!
//! This module contains the canonical data types used throughout the system:
//! - `Facility` - a central fill at a grid coordinate with a priced catalog
//! - `Price` - fixed-point money in cents
//! - `QueryPoint` - the coordinate a lookup is evaluated against
//! - `RankedResult` - one row of a ranked lookup

pub mod types;

// Re-export commonly used types at module level
pub use types::{
    Catalog, Facility, FacilityId, GridPoint, Price, PriceParseError, QueryPoint, RankedResult,
};
