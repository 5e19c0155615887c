//! Filesystem utilities.
//!
//! The brain's SD card is the only place a run leaves a trace once the
//! controller is unplugged, so everything logged during a match is also
//! written to `log.txt` there.
//!
//! # Example
//!
//! ```ignore
//! use dennis::fs::logger;
//! use log::{LevelFilter, info};
//!
//! let _ = logger::init(LevelFilter::Info);
//! info!("Robot ready");
//! ```

/// Console and `log.txt` logger.
pub mod logger;
