//! Game collection data model, derived values, and statistics.
//!
//! This crate defines the collection model without any database
//! dependencies. Consumers can use these types directly for display,
//! aggregation, or passing to `gameloggr-db` for persistence.

pub mod collection;
pub mod error;
pub mod stats;
pub mod types;

pub use collection::{
    check_can_complete, check_capacity, check_install_fits, check_rating, HardwareUsage,
};
pub use error::ModelError;
pub use stats::{CollectionStats, PlatformValue, RankedGame, StatusCount, NO_PLATFORM};
pub use types::*;
