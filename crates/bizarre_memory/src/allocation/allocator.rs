use anyhow::Result;

/// A contractual trait for allocators that won't move allocated objects in no
/// circumstances
pub trait StableAllocator {}

/// An allocator that hands out contiguous runs of a single element type and
/// reclaims them all at once.
pub trait SliceAllocator<T> {
    /// Allocates `len` contiguous elements. The memory is not initialized
    /// beyond what the allocator guarantees about fresh or recycled memory.
    fn alloc_slice(&mut self, len: usize) -> Result<*mut [T]>;

    /// Invalidates every allocation made so far
    fn recycle(&mut self);
}

/// Allocation with initialization, available for every [SliceAllocator]
pub trait Constructor<T: Copy>: SliceAllocator<T> {
    fn construct(&mut self, value: T) -> Result<*mut T> {
        let ptr = self.alloc_slice(1)?.cast::<T>();
        unsafe { ptr.write(value) };
        Ok(ptr)
    }

    fn construct_slice(&mut self, values: &[T]) -> Result<*mut [T]> {
        let ptr = self.alloc_slice(values.len())?;
        unsafe { std::ptr::copy_nonoverlapping(values.as_ptr(), ptr.cast::<T>(), values.len()) };
        Ok(ptr)
    }
}

impl<T: Copy, A: SliceAllocator<T>> Constructor<T> for A {}
