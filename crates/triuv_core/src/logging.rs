pub use log::Level;

/// Status messages shown to the user.
///
/// Only use this for information that the user should see after running a
/// command. Every line is also forwarded to the `log` facade.
#[derive(Debug, Default, Clone)]
pub struct StatusLog {
    lines: Vec<LogLine>,
}
impl StatusLog {
    /// Constructs a new empty status log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs a line.
    pub fn log(&mut self, line: LogLine) {
        log::log!(target: "triuv", line.level, "{}", line.msg);
        self.lines.push(line);
    }
    fn log_with_level(&mut self, level: Level, msg: String) {
        self.log(LogLine { level, msg });
    }

    /// Logs a line with [`Level::Error`].
    pub fn error(&mut self, msg: impl ToString) {
        self.log_with_level(Level::Error, msg.to_string());
    }
    /// Logs a line with [`Level::Info`].
    pub fn info(&mut self, msg: impl ToString) {
        self.log_with_level(Level::Info, msg.to_string());
    }

    /// Returns all the log lines so far.
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }
    /// Returns the most recent log line.
    pub fn last(&self) -> Option<&LogLine> {
        self.lines.last()
    }
}

/// Status line emitted by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Severity. Commands only use [`Level::Info`] and [`Level::Error`].
    pub level: Level,
    /// Human-readable message.
    pub msg: String,
}
