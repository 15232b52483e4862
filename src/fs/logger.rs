//! File-based logger implementation for the V5 Brain.
//!
//! Implements the [`log`] crate's facade, writing each record to the
//! console (terminal/debug output) and, when an SD card is present, to
//! `runlog.txt` in the card root. Having the run log on the card is the
//! only way to see what the phase controller decided during a match after
//! the fact.
//!
//! # Usage
//!
//! Initialize once at the start of the program:
//!
//! ```ignore
//! use argos::fs::logger;
//! use log::{info, LevelFilter};
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(LevelFilter::Info).expect("Logger init failed");
//!     info!("Program started");
//! }
//! ```
//!
//! # Log Output
//!
//! ```text
//! INFO  [24s 310ms] argos::auton::phase - phase change: LineFollow -> Capture { grasped: false }
//! WARN  [24s 320ms] argos::peripherals::sensors - Distance Sensor Error: Port disconnected
//! ```

use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::format_duration;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use vexide::time::user_uptime;

/// File the run log is written to, in the SD card root.
const LOG_FILE: &str = "runlog.txt";

/// A dual-output logger: console always, SD card when available.
pub struct RunLogger {
    /// Buffered writer for the card file. `None` when the file could not
    /// be opened (no SD card inserted).
    file: Option<Mutex<BufWriter<std::fs::File>>>,
}

impl RunLogger {
    fn new() -> Self {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(LOG_FILE)
            .ok()
            .map(|f| Mutex::new(BufWriter::new(f)));

        Self { file }
    }
}

impl log::Log for RunLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "{:<5} [{}] {} - {}\n",
            record.level(),
            uptime(),
            record.target(),
            record.args()
        );

        print!("{}", line);

        if let Some(ref file) = self.file {
            if let Ok(mut writer) = file.lock() {
                let _ = writer.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Some(ref file) = self.file {
            if let Ok(mut writer) = file.lock() {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<RunLogger> = OnceLock::new();

/// Initializes the logger.
///
/// Must be called once, before any logging macro runs. Messages below
/// `level` are dropped.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(RunLogger::new);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Formatted time since the user program started. On non-VexOS platforms
/// (tests) there is no uptime clock, so zero is shown instead.
fn uptime() -> humantime::FormattedDuration {
    if cfg!(target_os = "vexos") {
        format_duration(user_uptime())
    } else {
        format_duration(Duration::ZERO)
    }
}
