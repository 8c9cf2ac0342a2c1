use std::fmt::{Display, Write};

use crate::escape_sequence;

use super::log_level::LogLevel;

pub type TerminalEscapeCode = u8;

pub const RESET: TerminalEscapeCode = 0;
pub const BOLD: TerminalEscapeCode = 1;
pub const DIM: TerminalEscapeCode = 2;

pub const RED: TerminalEscapeCode = 31;
pub const GREEN: TerminalEscapeCode = 32;
pub const YELLOW: TerminalEscapeCode = 33;
pub const WHITE: TerminalEscapeCode = 37;

pub const fn bg_color(color: TerminalEscapeCode) -> TerminalEscapeCode {
    color + 10
}

/// A Select Graphic Rendition sequence, rendered as `ESC [ codes m`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalEscapeSequence(pub Vec<TerminalEscapeCode>);

impl TerminalEscapeSequence {
    pub fn for_level(level: &LogLevel) -> Self {
        match level {
            LogLevel::Debug => escape_sequence!(WHITE, DIM),
            LogLevel::Info => escape_sequence!(GREEN),
            LogLevel::Warn => escape_sequence!(YELLOW),
            LogLevel::Error => escape_sequence!(RED),
            LogLevel::Critical => escape_sequence!(bg_color(RED), WHITE, BOLD),
        }
    }

    /// Wraps `text` in this sequence and a trailing reset
    pub fn paint(&self, text: &str) -> String {
        format!("{self}{text}{}", escape_sequence!(RESET))
    }
}

impl Display for TerminalEscapeSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("\x1b[")?;
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(';')?;
            }
            write!(f, "{code}")?;
        }
        f.write_char('m')
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sequence_rendering() {
        let seq = TerminalEscapeSequence::for_level(&LogLevel::Critical);
        assert_eq!(seq.to_string(), "\x1b[41;37;1m");
        assert_eq!(escape_sequence!(RESET).to_string(), "\x1b[0m");
    }

    #[test]
    fn test_paint() {
        let painted = TerminalEscapeSequence::for_level(&LogLevel::Warn).paint("low memory");
        assert_eq!(painted, "\x1b[33mlow memory\x1b[0m");
    }
}
