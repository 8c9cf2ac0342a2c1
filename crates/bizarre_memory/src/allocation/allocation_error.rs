use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Not enough memory to allocate {requested} bytes, only {available} bytes available")]
    OutOfMemory { requested: usize, available: usize },
    #[error("Allocating {requested} elements would overflow the arena cursor at {cursor}")]
    CursorOverflow { cursor: usize, requested: usize },
    #[error("Allocation from an arena that has no reserved memory")]
    NotInitialized,
}
