/// Size of an arena declared without an explicit capacity (2MiB)
pub const DEFAULT_ARENA_SIZE: usize = 2 * 1024 * 1024;

/// What [`TypedArena::recycle`](crate::TypedArena::recycle) does with the
/// memory handed out since the previous recycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecyclePolicy {
    /// Zero-fill the used part of the region, old data never resurfaces
    #[default]
    Zero,
    /// Only reset the cursor, new allocations may observe stale contents
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    pub capacity_bytes: usize,
    pub recycle: RecyclePolicy,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            capacity_bytes: DEFAULT_ARENA_SIZE,
            recycle: RecyclePolicy::default(),
        }
    }
}

impl ArenaConfig {
    /// Capacity for exactly `count` elements of `T`
    pub fn for_elements<T>(count: usize) -> Self {
        Self {
            capacity_bytes: count.saturating_mul(std::mem::size_of::<T>()),
            ..Default::default()
        }
    }

    pub fn with_capacity_bytes(self, capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            ..self
        }
    }

    pub fn with_recycle(self, recycle: RecyclePolicy) -> Self {
        Self { recycle, ..self }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_for_elements() {
        let config = ArenaConfig::for_elements::<u64>(4);
        assert_eq!(config.capacity_bytes, 32);
        assert_eq!(config.recycle, RecyclePolicy::Zero);

        let config = ArenaConfig::for_elements::<u64>(usize::MAX);
        assert_eq!(config.capacity_bytes, usize::MAX);
    }

    #[test]
    fn test_builder() {
        let config = ArenaConfig::default()
            .with_capacity_bytes(128)
            .with_recycle(RecyclePolicy::Keep);
        assert_eq!(
            config,
            ArenaConfig {
                capacity_bytes: 128,
                recycle: RecyclePolicy::Keep
            }
        );
    }
}
