use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("the logging thread is already running")]
    AlreadyInitialized,
    #[error("could not open file '{path}': {source}")]
    CouldNotOpenFile {
        path: String,
        source: std::io::Error,
    },
    #[error("could not write to file '{path}': {source}")]
    CouldNotPrintToFile {
        path: String,
        source: std::io::Error,
    },
}
