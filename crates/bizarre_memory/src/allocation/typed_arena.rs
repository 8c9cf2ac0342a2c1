use std::marker::PhantomData;

use anyhow::Result;
use bizarre_logger::{core_debug, core_error, core_warn};

use super::{
    allocation_error::AllocationError,
    allocator::{SliceAllocator, StableAllocator},
    arena_config::{ArenaConfig, RecyclePolicy},
    region::Region,
    reservation_error::ReservationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaState {
    /// No memory is reserved, only [`init`](TypedArena::init) is meaningful
    Uninitialized,
    Ready,
}

/// A fixed-capacity bump allocator for elements of a single type.
///
/// The arena reserves its whole capacity from the operating system on
/// [`init`](Self::init) and hands out contiguous runs of `T` by advancing a
/// cursor. There is no per-allocation bookkeeping and no way to give back a
/// single allocation: [`recycle`](Self::recycle) reclaims everything at once
/// and [`free`](Self::free) (or dropping the arena) returns the memory to the
/// operating system.
///
/// Allocations are raw pointers into the arena. They stay valid until the
/// next `recycle` or `free`, using them afterwards is a logic error the arena
/// does not detect. Elements are plain data (`T: Copy`) and are never dropped.
///
/// Is not thread safe.
pub struct TypedArena<T: Copy> {
    config: ArenaConfig,
    /// Elements handed out since the last recycle, NOT a byte offset
    cursor: usize,
    region: Option<Region>,
    _phantom: PhantomData<T>,
}

impl<T: Copy> StableAllocator for TypedArena<T> {}

impl<T: Copy> TypedArena<T> {
    /// Declares an arena of `capacity_bytes`. No memory is reserved until
    /// [`init`](Self::init) is called.
    pub fn new(capacity_bytes: usize) -> Self {
        Self::with_config(ArenaConfig::default().with_capacity_bytes(capacity_bytes))
    }

    pub fn with_config(config: ArenaConfig) -> Self {
        Self {
            config,
            cursor: 0,
            region: None,
            _phantom: PhantomData,
        }
    }

    /// Declares and initializes an arena in one step. The memory is released
    /// when the arena is dropped.
    pub fn reserve(config: ArenaConfig) -> Result<Self> {
        let mut arena = Self::with_config(config);
        arena.init()?;
        Ok(arena)
    }

    /// Reserves the backing memory. On failure the arena stays uninitialized.
    pub fn init(&mut self) -> Result<()> {
        if self.region.is_some() {
            anyhow::bail!(ReservationError::AlreadyInitialized);
        }

        let size = self.config.capacity_bytes;
        let region = Region::reserve(size).inspect_err(|e| {
            core_error!(
                "Failed to reserve an arena of {size} bytes for {}: {e}",
                std::any::type_name::<T>()
            )
        })?;

        // Only reachable for types aligned beyond the page size
        if !region.start().cast::<T>().is_aligned() {
            anyhow::bail!(ReservationError::Misaligned {
                align: std::mem::align_of::<T>()
            });
        }

        core_debug!(
            "Reserved an arena of {size} bytes ({} elements of {})",
            self.capacity(),
            std::any::type_name::<T>()
        );

        self.cursor = 0;
        self.region = Some(region);
        Ok(())
    }

    /// Allocates `nmemb` contiguous elements.
    ///
    /// Fails without touching the cursor if the run does not fit into the
    /// remaining capacity or if the cursor would overflow. The contents are
    /// zeroed unless the arena was recycled with [`RecyclePolicy::Keep`].
    pub fn alloc(&mut self, nmemb: usize) -> Result<*mut [T]> {
        let elem_size = std::mem::size_of::<T>();
        let capacity_bytes = self.config.capacity_bytes;
        let cursor = self.cursor;

        let Some(region) = self.region.as_mut() else {
            anyhow::bail!(AllocationError::NotInitialized);
        };

        let Some(new_cursor) = cursor.checked_add(nmemb) else {
            core_warn!("Rejected allocation of {nmemb} elements: cursor overflow at {cursor}");
            anyhow::bail!(AllocationError::CursorOverflow {
                cursor,
                requested: nmemb
            });
        };

        // cursor * elem_size <= capacity_bytes holds, so only the end can overflow
        let start = cursor * elem_size;
        let end = match new_cursor.checked_mul(elem_size) {
            Some(end) if end <= capacity_bytes => end,
            _ => {
                let requested = nmemb.saturating_mul(elem_size);
                let available = capacity_bytes - start;
                core_warn!(
                    "Rejected allocation of {requested} bytes, {available} bytes left in the arena"
                );
                anyhow::bail!(AllocationError::OutOfMemory {
                    requested,
                    available
                });
            }
        };
        debug_assert!(end - start == nmemb * elem_size);

        let ptr = unsafe { region.as_mut_ptr().add(start) }.cast::<T>();
        debug_assert!(ptr.is_aligned());

        self.cursor = new_cursor;
        Ok(std::ptr::slice_from_raw_parts_mut(ptr, nmemb))
    }

    /// Resets the cursor so the whole region can be allocated again. Every
    /// allocation made before this call must no longer be used.
    pub fn recycle(&mut self) {
        let Some(region) = self.region.as_mut() else {
            return;
        };

        // The cursor only grows between recycles, so everything past it is
        // still zeroed
        if self.config.recycle == RecyclePolicy::Zero {
            region.clear(self.cursor.saturating_mul(std::mem::size_of::<T>()));
        }

        core_debug!(
            "Recycled an arena of {} with {} elements in use",
            std::any::type_name::<T>(),
            self.cursor
        );
        self.cursor = 0;
    }

    /// Releases the backing memory. The arena can be initialized again.
    pub fn free(&mut self) {
        if let Some(region) = self.region.take() {
            core_debug!(
                "Releasing an arena of {} bytes for {}",
                region.len(),
                std::any::type_name::<T>()
            );
            drop(region);
        }
        self.cursor = 0;
    }

    pub fn state(&self) -> ArenaState {
        match self.region {
            Some(_) => ArenaState::Ready,
            None => ArenaState::Uninitialized,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.region.is_some()
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn capacity_bytes(&self) -> usize {
        self.config.capacity_bytes
    }

    /// Number of elements that fit into the arena
    pub fn capacity(&self) -> usize {
        match std::mem::size_of::<T>() {
            0 => usize::MAX,
            size => self.config.capacity_bytes / size,
        }
    }

    /// Number of elements allocated since the last recycle
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.cursor
    }

    /// Base address of the region, null while uninitialized
    pub fn as_ptr(&self) -> *const T {
        match &self.region {
            Some(region) => region.start().cast::<T>(),
            None => std::ptr::null(),
        }
    }
}

impl<T: Copy> SliceAllocator<T> for TypedArena<T> {
    fn alloc_slice(&mut self, len: usize) -> Result<*mut [T]> {
        self.alloc(len)
    }

    fn recycle(&mut self) {
        TypedArena::recycle(self)
    }
}

impl<T: Copy> std::fmt::Debug for TypedArena<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedArena")
            .field("type", &std::any::type_name::<T>())
            .field("state", &self.state())
            .field("cursor", &self.cursor)
            .field("capacity_bytes", &self.config.capacity_bytes)
            .finish()
    }
}

impl<T: Copy> Drop for TypedArena<T> {
    fn drop(&mut self) {
        self.free();
    }
}

impl<T: Copy> Default for TypedArena<T> {
    fn default() -> Self {
        Self::with_config(ArenaConfig::default())
    }
}
