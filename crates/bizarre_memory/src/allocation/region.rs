use std::ptr::NonNull;

use anyhow::Result;
use memmap2::{MmapMut, MmapOptions};

use super::reservation_error::ReservationError;

/// A contiguous block of anonymous, process-private memory reserved from the
/// operating system. The memory is page aligned and zero-filled on
/// reservation. It is released when the region is dropped, a failure to
/// unmap is not reported.
pub struct Region {
    map: MmapMut,
    base: NonNull<u8>,
}

// The region owns its mapping exclusively, moving it across threads is fine
unsafe impl Send for Region {}

impl Region {
    pub fn reserve(size: usize) -> Result<Self> {
        if size == 0 {
            anyhow::bail!(ReservationError::ZeroCapacity);
        }

        let mut map = MmapOptions::new()
            .len(size)
            .map_anon()
            .map_err(|source| ReservationError::ReservationFailed { size, source })?;

        let base = NonNull::new(map.as_mut_ptr()).ok_or_else(|| {
            ReservationError::ReservationFailed {
                size,
                source: std::io::Error::other("mapping returned a null address"),
            }
        })?;

        Ok(Self { map, base })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn start(&self) -> *const u8 {
        self.base.as_ptr()
    }

    /// All pointers into the region are derived from this one. It never
    /// creates a reference to the whole mapping, so pointers handed out
    /// earlier stay valid.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.base.as_ptr()
    }

    /// Zero-fills the first `len` bytes, clamped to the region length
    pub fn clear(&mut self, len: usize) {
        let len = len.min(self.len());
        unsafe { std::ptr::write_bytes(self.base.as_ptr(), 0, len) };
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reserve_is_zeroed() -> Result<()> {
        let region = Region::reserve(4096)?;
        assert_eq!(region.len(), 4096);
        let bytes = unsafe { std::slice::from_raw_parts(region.start(), region.len()) };
        assert!(bytes.iter().all(|b| *b == 0));
        Ok(())
    }

    #[test]
    fn test_reserve_zero() {
        let err = Region::reserve(0).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ReservationError>(),
            Some(ReservationError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_reserve_too_large() {
        let err = Region::reserve(usize::MAX).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ReservationError>(),
            Some(ReservationError::ReservationFailed { size: usize::MAX, .. })
        ));
    }

    #[test]
    fn test_clear_prefix() -> Result<()> {
        let mut region = Region::reserve(64)?;
        unsafe { std::ptr::write_bytes(region.as_mut_ptr(), 0xAB, 64) };

        region.clear(16);

        let bytes = unsafe { std::slice::from_raw_parts(region.start(), 64) };
        assert!(bytes[..16].iter().all(|b| *b == 0));
        assert!(bytes[16..].iter().all(|b| *b == 0xAB));

        region.clear(usize::MAX);
        let bytes = unsafe { std::slice::from_raw_parts(region.start(), 64) };
        assert!(bytes.iter().all(|b| *b == 0));
        Ok(())
    }

    #[test]
    fn test_page_aligned() -> Result<()> {
        let region = Region::reserve(100)?;
        assert!(region.start().cast::<u128>().is_aligned());
        Ok(())
    }
}
