pub mod allocation_error;
pub mod allocator;
pub mod arena_config;
pub mod region;
pub mod reservation_error;
pub mod typed_arena;
