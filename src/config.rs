//! Per-run configuration.
//!
//! [`Config`] is an immutable value handed to every top-level validation call.
//! A process-wide default exists for callers that have none of their own; it
//! can be installed once at startup and is read-only afterwards.

use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};

use crate::error::ConfigError;
use crate::log::{LogEntry, Logger};

/// A source of the current time for temporal constraints.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for deterministic validation and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// Configuration for one validation run.
///
/// - `fail_fast`: stop at the first violation instead of accumulating all of
///   them (default `false`)
/// - `clock`: time source for temporal constraints (default [`SystemClock`])
/// - `logger`: receives one [`LogEntry`] per atomic constraint evaluation
///
/// # Example
///
/// ```rust
/// use kova::{Config, LogRecorder};
///
/// let recorder = LogRecorder::new();
/// let config = Config::new()
///     .with_fail_fast(true)
///     .with_logger(recorder.logger());
///
/// assert!(config.is_fail_fast());
/// ```
#[derive(Clone)]
pub struct Config {
    fail_fast: bool,
    clock: Arc<dyn Clock>,
    logger: Option<Logger>,
}

impl Config {
    /// Creates the default configuration: accumulate mode, system clock, no logger.
    pub fn new() -> Self {
        Self {
            fail_fast: false,
            clock: Arc::new(SystemClock),
            logger: None,
        }
    }

    /// Sets fail-fast mode and returns self for chaining.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Sets the clock and returns self for chaining.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Sets the evaluation logger and returns self for chaining.
    pub fn with_logger<F>(mut self, logger: F) -> Self
    where
        F: Fn(&LogEntry) + Send + Sync + 'static,
    {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Returns true if validation stops at the first violation.
    pub fn is_fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Returns the configured clock.
    pub fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    /// Returns the configured logger, if any.
    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    /// Returns the process-wide default configuration.
    ///
    /// The first call freezes the default; later calls to
    /// [`Config::set_global`] fail.
    pub fn global() -> &'static Config {
        GLOBAL.get_or_init(Config::new)
    }

    /// Installs the process-wide default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyInitialized`] if a default was already
    /// installed or read.
    pub fn set_global(config: Config) -> Result<(), ConfigError> {
        GLOBAL
            .set(config)
            .map_err(|_| ConfigError::AlreadyInitialized)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("fail_fast", &self.fail_fast)
            .field("clock", &self.clock)
            .field("logger", &self.logger.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
