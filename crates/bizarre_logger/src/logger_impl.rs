use std::{fs::OpenOptions, io::Write};

use anyhow::Result;

use crate::{log_errors::LogError, log_level::LogLevel, TerminalEscapeSequence};

pub const CORE_LOGGER_NAME: &str = "core";
pub const APP_LOGGER_NAME: &str = "app";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogTarget {
    Stdout,
    Stderr,
    File(String),
}

impl LogTarget {
    /// Errors go to stderr only, everything below goes to the other targets
    pub fn accepts(&self, level: &LogLevel) -> bool {
        match self {
            LogTarget::Stderr => level.is_error(),
            _ => !level.is_error(),
        }
    }
}

/// A message travelling from the logging macros to the logging thread
#[derive(Debug)]
pub struct LogMessage {
    pub logger_name: &'static str,
    pub level: LogLevel,
    pub msg: String,
    pub shutdown: bool,
}

#[derive(Debug)]
pub struct Logger {
    pub name: &'static str,
    pub min_level: LogLevel,
    pub label: &'static str,
    pub targets: Vec<LogTarget>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            name: "system",
            min_level: LogLevel::Debug,
            label: "System",
            targets: vec![LogTarget::Stdout, LogTarget::Stderr],
        }
    }
}

impl Logger {
    pub fn default_core() -> Self {
        Self {
            name: CORE_LOGGER_NAME,
            label: "Core",
            ..Default::default()
        }
    }

    pub fn default_app() -> Self {
        Self {
            name: APP_LOGGER_NAME,
            label: "App",
            ..Default::default()
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn log(&self, level: LogLevel, msg: String) {
        if level < self.min_level {
            return;
        }

        for target in self.targets.iter() {
            if let Err(e) = self.log_to_target(target, &level, &msg) {
                eprintln!("{e}");
            }
        }
    }

    pub fn format_line(&self, level: &LogLevel, msg: &str) -> String {
        format!(
            "{} {} [{}]: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            self.label,
            level,
            msg
        )
    }

    fn log_to_target(&self, target: &LogTarget, level: &LogLevel, msg: &str) -> Result<()> {
        if !target.accepts(level) {
            return Ok(());
        }

        let line = self.format_line(level, msg);
        match target {
            LogTarget::Stdout => {
                println!("{}", TerminalEscapeSequence::for_level(level).paint(&line));
                Ok(())
            }
            LogTarget::Stderr => {
                eprintln!("{}", TerminalEscapeSequence::for_level(level).paint(&line));
                Ok(())
            }
            LogTarget::File(path) => {
                let mut file = OpenOptions::new()
                    .append(true)
                    .create(true)
                    .open(path)
                    .map_err(|source| LogError::CouldNotOpenFile {
                        path: path.clone(),
                        source,
                    })?;

                writeln!(file, "{line}").map_err(|source| LogError::CouldNotPrintToFile {
                    path: path.clone(),
                    source,
                })?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_target_routing() {
        assert!(LogTarget::Stdout.accepts(&LogLevel::Info));
        assert!(!LogTarget::Stdout.accepts(&LogLevel::Error));
        assert!(LogTarget::Stderr.accepts(&LogLevel::Critical));
        assert!(!LogTarget::Stderr.accepts(&LogLevel::Warn));
        assert!(LogTarget::File("x.log".into()).accepts(&LogLevel::Debug));
    }

    #[test]
    fn test_file_target() -> Result<()> {
        let path = std::env::temp_dir().join(format!("bizarre_logger_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let logger = Logger {
            name: "file",
            min_level: LogLevel::Info,
            label: "Test",
            targets: vec![LogTarget::File(path.to_string_lossy().into_owned())],
        };

        logger.log(LogLevel::Debug, "filtered out".into());
        logger.log(LogLevel::Info, "kept".into());
        logger.log(LogLevel::Error, "stderr only".into());

        let contents = std::fs::read_to_string(&path)?;
        std::fs::remove_file(&path)?;

        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("Test [INFO]: kept"));
        Ok(())
    }
}
