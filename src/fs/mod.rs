//! Filesystem utilities for the V5 Brain.
//!
//! The only filesystem the robot touches is the SD card, and the only
//! thing written there is the run log: every phase transition and device
//! warning from a run, timestamped with program uptime.
//!
//! # Example
//!
//! ```ignore
//! use argos::fs::logger;
//! use log::{info, LevelFilter};
//!
//! logger::init(LevelFilter::Info).expect("Failed to initialize logger");
//! info!("Robot initialized successfully");
//! ```

/// File-based logging for the V5 Brain.
///
/// Provides a logger implementation that writes to both the console
/// and a file on the SD card.
pub mod logger;
