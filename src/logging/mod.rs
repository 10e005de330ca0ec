//! Verbosity-gated event reporting.
//!
//! `EventLog` is handed to the pipeline at construction and decides which
//! pipeline events reach `tracing`. The subscriber itself is installed once
//! by the binaries through [`init_tracing`].

use tracing_subscriber::EnvFilter;

/// Which classes of pipeline events are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Errors = 1,
    Info = 2,
    Detail = 3,
}

impl LogLevel {
    pub fn from_u8(level: u8) -> Self {
        match level {
            0 => Self::Off,
            1 => Self::Errors,
            2 => Self::Info,
            _ => Self::Detail,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventLog {
    level: LogLevel,
}

impl EventLog {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn errors_enabled(&self) -> bool {
        self.level >= LogLevel::Errors
    }

    pub fn info_enabled(&self) -> bool {
        self.level >= LogLevel::Info
    }

    pub fn detail_enabled(&self) -> bool {
        self.level >= LogLevel::Detail
    }

    pub fn detail(&self, message: &str) {
        if self.detail_enabled() {
            tracing::info!(detail = true, "{message}");
        }
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

/// Install the global `tracing` subscriber. `LOG_FORMAT=json` switches to
/// JSON lines; the filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
