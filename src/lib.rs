pub use bizarre_logger as log;
pub use bizarre_memory as memory;
