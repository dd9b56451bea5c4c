//! `quietspot` - ambient-noise reading store and quiet-spot API
//!
//! This library provides the core functionality for persisting geotagged
//! noise readings and ranking the quietest observed locations on a fixed
//! spatial grid.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod reading;
pub mod store;

pub use aggregate::{rank_quiet_spots, QuietSpot, DEFAULT_SPOT_LIMIT};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use reading::Reading;
pub use store::ReadingStore;
