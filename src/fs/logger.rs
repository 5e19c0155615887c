//! Match log.
//!
//! [`RobotLogger`] is the [`log`] backend for the firmware. A line goes to the
//! console for whoever has the brain tethered, and a copy goes to `log.txt`
//! on the SD card so a match can be read back after the robot comes off the
//! field. Without a card only the console copy is kept.
//!
//! Lines look like this, stamped with the time since the program started:
//!
//! ```text
//! INFO [1s 2ms] dennis::competition - Mode change: Disabled -> Autonomous
//! WARN [1m 4s 100ms] dennis::peripherals::v5 - ArmPot read error: Disconnected
//! ```
//!
//! Install it once, before the first log call:
//!
//! ```ignore
//! if let Err(e) = dennis::fs::logger::init(log::LevelFilter::Info) {
//!     println!("Logger init failed: {}", e);
//! }
//! ```

use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::{FormattedDuration, format_duration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Name of the match log on the SD card. Truncated at every boot.
const LOG_FILE: &str = "log.txt";

/// Console plus SD card logger.
pub struct RobotLogger {
    /// `None` when there is no card to write to.
    sd_card: Mutex<Option<BufWriter<File>>>,
}

impl RobotLogger {
    fn open() -> Self {
        let sd_card = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(LOG_FILE)
            .map(BufWriter::new)
            .ok();
        Self {
            sd_card: Mutex::new(sd_card),
        }
    }

    fn with_card(&self, write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>) {
        let Ok(mut card) = self.sd_card.lock() else {
            return;
        };
        if let Some(file) = card.as_mut() {
            // Write errors are dropped.
            let _ = write(file);
        }
    }
}

impl log::Log for RobotLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "{} [{}] {} - {}",
            record.level(),
            stamp(),
            record.target(),
            record.args()
        );
        println!("{line}");
        self.with_card(|file| writeln!(file, "{line}"));
    }

    fn flush(&self) { self.with_card(|file| file.flush()); }
}

static LOGGER: OnceLock<RobotLogger> = OnceLock::new();

/// Installs the logger and sets the maximum level.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(LOGGER.get_or_init(RobotLogger::open))?;
    log::set_max_level(level);
    Ok(())
}

/// Time since the user program started, to the millisecond.
fn stamp() -> FormattedDuration {
    let millis = uptime().as_millis() as u64;
    format_duration(Duration::from_millis(millis))
}

#[cfg(feature = "v5")]
fn uptime() -> Duration { vexide::time::user_uptime() }

#[cfg(not(feature = "v5"))]
fn uptime() -> Duration {
    static START: OnceLock<std::time::Instant> = OnceLock::new();
    START.get_or_init(std::time::Instant::now).elapsed()
}
