use std::{
    collections::HashMap,
    sync::{
        mpsc::{channel, Sender},
        Mutex,
    },
    thread::JoinHandle,
};

use cfg_if::cfg_if;

use crate::{
    log_errors::LogError,
    logger_impl::{LogMessage, Logger, APP_LOGGER_NAME, CORE_LOGGER_NAME},
    LogLevel,
};

struct LoggerThread {
    sender: Sender<LogMessage>,
    handle: JoinHandle<()>,
}

static LOGGER_THREAD: Mutex<Option<LoggerThread>> = Mutex::new(None);

/// Spawns the logging thread. Loggers named `core` and `app` are created
/// with default settings if `loggers` does not provide them.
pub fn logging_thread_start(loggers: Option<Vec<Logger>>) -> Result<(), LogError> {
    let mut thread = LOGGER_THREAD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if thread.is_some() {
        return Err(LogError::AlreadyInitialized);
    }

    let mut logger_map = HashMap::new();
    for logger in loggers.unwrap_or_default() {
        debug_assert!(
            !logger_map.contains_key(logger.name()),
            "Logger with name \"{}\" already exists",
            logger.name()
        );
        logger_map.insert(logger.name(), logger);
    }

    logger_map
        .entry(CORE_LOGGER_NAME)
        .or_insert_with(Logger::default_core);
    logger_map
        .entry(APP_LOGGER_NAME)
        .or_insert_with(Logger::default_app);

    let (sender, receiver) = channel::<LogMessage>();

    let handle = std::thread::spawn(move || {
        while let Ok(msg) = receiver.recv() {
            match logger_map.get(msg.logger_name) {
                Some(logger) => logger.log(msg.level, msg.msg),
                None => eprintln!("Logger with name \"{}\" does not exist", msg.logger_name),
            }

            if msg.shutdown {
                break;
            }
        }
    });

    *thread = Some(LoggerThread { sender, handle });
    Ok(())
}

/// Flushes the pending messages and stops the logging thread
pub fn logging_thread_join() {
    let thread = LOGGER_THREAD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take();

    match thread {
        Some(LoggerThread { sender, handle }) => {
            let _ = sender.send(LogMessage {
                logger_name: CORE_LOGGER_NAME,
                level: LogLevel::Info,
                msg: "Shutting down the logger thread".into(),
                shutdown: true,
            });
            drop(sender);
            let _ = handle.join();
        }
        None => {
            cfg_if! {
                if #[cfg(debug_assertions)] {
                    eprintln!("logging_thread_join is called without a running logging thread");
                }
            }
        }
    }
}

pub fn is_logging_thread_running() -> bool {
    LOGGER_THREAD
        .lock()
        .map(|thread| thread.is_some())
        .unwrap_or(false)
}

/// Used by the logging macros
pub fn send_log(msg: LogMessage) {
    if let Ok(thread) = LOGGER_THREAD.lock() {
        if let Some(thread) = thread.as_ref() {
            let _ = thread.sender.send(msg);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_logging_thread_lifecycle() -> anyhow::Result<()> {
        // no thread yet, must not panic
        crate::core_info!("dropped {}", 1);

        logging_thread_start(None)?;
        assert!(is_logging_thread_running());
        assert!(matches!(
            logging_thread_start(None),
            Err(LogError::AlreadyInitialized)
        ));

        crate::core_debug!("core message {}", 42);
        crate::info!("app message");

        logging_thread_join();
        assert!(!is_logging_thread_running());

        logging_thread_start(Some(vec![Logger {
            name: "custom",
            ..Default::default()
        }]))?;
        crate::log_to_global!("custom", LogLevel::Warn, "custom logger");
        logging_thread_join();
        Ok(())
    }
}
