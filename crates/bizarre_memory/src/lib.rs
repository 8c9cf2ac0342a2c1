pub mod allocation;
pub use allocation::{
    allocation_error::AllocationError,
    allocator::*,
    arena_config::{ArenaConfig, RecyclePolicy, DEFAULT_ARENA_SIZE},
    region::Region,
    reservation_error::ReservationError,
    typed_arena::{ArenaState, TypedArena},
};
