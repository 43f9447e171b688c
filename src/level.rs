use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Message severity, ordered `Debug < Info < Warn < Error < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Critical,
}

impl Level {
    /// Every level, lowest severity first.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Critical,
    ];

    /// Upper-case tag written between brackets in each log line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Whether a logger configured at `self` accepts a call at `severity`.
    ///
    /// Critical calls always pass. Error calls pass unless the logger is
    /// configured at `Critical`. Everything else passes when
    /// `severity >= self`.
    pub fn accepts(self, severity: Level) -> bool {
        match severity {
            Level::Critical => true,
            Level::Error => self != Level::Critical,
            _ => severity >= self,
        }
    }

    /// Parse a configured level, falling back to `Info` on unknown input.
    ///
    /// The second value is `false` when the fallback was taken so the
    /// caller can report it.
    pub fn parse_or_default(s: &str) -> (Level, bool) {
        match s.parse() {
            Ok(level) => (level, true),
            Err(_) => (Level::Info, false),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == upper)
            .ok_or_else(|| Error::Config(format!("unknown log level: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn test_accepts_all_pairs() {
        use Level::*;

        // (configured, severity, accepted)
        let table = [
            (Debug, Debug, true),
            (Debug, Info, true),
            (Debug, Warn, true),
            (Debug, Error, true),
            (Debug, Critical, true),
            (Info, Debug, false),
            (Info, Info, true),
            (Info, Warn, true),
            (Info, Error, true),
            (Info, Critical, true),
            (Warn, Debug, false),
            (Warn, Info, false),
            (Warn, Warn, true),
            (Warn, Error, true),
            (Warn, Critical, true),
            (Error, Debug, false),
            (Error, Info, false),
            (Error, Warn, false),
            (Error, Error, true),
            (Error, Critical, true),
            (Critical, Debug, false),
            (Critical, Info, false),
            (Critical, Warn, false),
            (Critical, Error, false),
            (Critical, Critical, true),
        ];

        for (configured, severity, expected) in table {
            assert_eq!(
                configured.accepts(severity),
                expected,
                "configured {} severity {}",
                configured,
                severity
            );
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("Warn".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!(" CRITICAL ".parse::<Level>().unwrap(), Level::Critical);
        assert!("warning".parse::<Level>().is_err());
        assert!("".parse::<Level>().is_err());
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(Level::parse_or_default("error"), (Level::Error, true));
        assert_eq!(Level::parse_or_default("BOGUS"), (Level::Info, false));
    }

    #[test]
    fn test_display() {
        assert_eq!(Level::Critical.to_string(), "CRITICAL");
        assert_eq!(Level::default().to_string(), "INFO");
    }
}
