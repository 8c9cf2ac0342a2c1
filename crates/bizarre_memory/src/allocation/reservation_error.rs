use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("Cannot reserve a zero-sized region")]
    ZeroCapacity,
    #[error("Failed to reserve {size} bytes from the operating system: {source}")]
    ReservationFailed {
        size: usize,
        source: std::io::Error,
    },
    /// Returned by `init` on an arena that already holds a region
    #[error("The arena is already initialized")]
    AlreadyInitialized,
    #[error("The reserved region is not aligned to {align} bytes")]
    Misaligned { align: usize },
}
