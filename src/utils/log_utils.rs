//! Logging utilities for the client and the command line

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Normal execution, no verbose flag
    Normal = 0,
    /// Info level, one verbose flag (-v)
    Info = 1,
    /// Debug level, two verbose flags (-v -v)
    Debug = 2,
}

/// Logger for client messages
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    /// Current verbosity level
    verbosity: u8,
}

impl Logger {
    /// Create a new logger with the specified verbosity
    #[must_use]
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    /// Log a message if the current verbosity level is at least the specified level
    pub fn log(&self, msg: &str, level: LogLevel) {
        log(msg, self.verbosity, level);
    }

    /// Log at normal level (always displayed)
    pub fn normal(&self, msg: &str) {
        self.log(msg, LogLevel::Normal);
    }

    /// Log at info level (verbose >= 1)
    pub fn info(&self, msg: &str) {
        self.log(msg, LogLevel::Info);
    }

    /// Log at debug level (verbose >= 2)
    pub fn debug(&self, msg: &str) {
        self.log(msg, LogLevel::Debug);
    }

    #[must_use]
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }
}

/// Log a message if the verbosity level is at least the specified level.
///
/// Lines go to stderr; stdout is reserved for command results.
///
/// # Arguments
///
/// * `msg` - The message to log
/// * `verbosity` - The current verbosity level (0 = normal, 1 = info, 2+ = debug)
/// * `level` - The minimum level required for this message to be logged
pub fn log(msg: &str, verbosity: u8, level: LogLevel) {
    if let Some(line) = format_line(msg, verbosity, level) {
        eprintln!("{}", line);
    }
}

fn format_line(msg: &str, verbosity: u8, level: LogLevel) -> Option<String> {
    if verbosity < level as u8 {
        return None;
    }
    Some(match level {
        LogLevel::Normal => msg.to_string(),
        LogLevel::Info => format!("info: {}", msg),
        LogLevel::Debug => format!("dbg: {}", msg),
    })
}
