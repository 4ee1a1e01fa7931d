//! Level routing: which severity channels are active and where they go

use super::log_level::{LogLevel, Severity};

/// Console stream a channel writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Where the lines of one severity channel end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Discard,
    Console(ConsoleStream),
    File,
    /// Console and file
    Tee(ConsoleStream),
}

impl Destination {
    pub fn console(&self) -> Option<ConsoleStream> {
        match self {
            Destination::Console(stream) | Destination::Tee(stream) => Some(*stream),
            Destination::Discard | Destination::File => None,
        }
    }

    pub fn writes_file(&self) -> bool {
        matches!(self, Destination::File | Destination::Tee(_))
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Destination::Discard)
    }
}

/// Severities that reach the console for a configured level.
pub fn console_severities(level: LogLevel) -> &'static [Severity] {
    use Severity::*;
    match level {
        LogLevel::Trace => &[Trace, Info, Warn, Error, Fatal],
        LogLevel::Info => &[Info, Warn, Error, Fatal],
        LogLevel::Warn => &[Warn, Error, Fatal],
        LogLevel::Error => &[Error, Fatal],
        LogLevel::OnlyFile => &[],
    }
}

fn console_stream(severity: Severity) -> ConsoleStream {
    match severity {
        Severity::Error | Severity::Fatal => ConsoleStream::Stderr,
        Severity::Trace | Severity::Info | Severity::Warn => ConsoleStream::Stdout,
    }
}

/// Destination of every severity channel, computed once per logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    level: LogLevel,
    routes: [Destination; 5],
}

impl RoutingTable {
    pub fn new(level: LogLevel, has_file: bool) -> Self {
        let mut routes = [Destination::Discard; 5];

        if level == LogLevel::OnlyFile {
            if has_file {
                routes = [Destination::File; 5];
            }
        } else {
            for &severity in console_severities(level) {
                let stream = console_stream(severity);
                routes[severity.index()] = if has_file {
                    Destination::Tee(stream)
                } else {
                    Destination::Console(stream)
                };
            }
        }

        Self { level, routes }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn route(&self, severity: Severity) -> Destination {
        self.routes[severity.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Severity, Destination)> + '_ {
        Severity::ALL.iter().map(move |&s| (s, self.route(s)))
    }
}
