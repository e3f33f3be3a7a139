//! Table sizing configuration.

/// Lane length used when a configured value is left at zero.
pub const DEFAULT_CAPACITY: u32 = 1024;

/// Configuration for a [`TransitionTable`](crate::TransitionTable).
///
/// Zero in either field means "use [`DEFAULT_CAPACITY`]".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Initial number of states every lane can hold.
    pub initial_capacity: u32,
    /// Number of states added to every lane on each growth event.
    pub growth_increment: u32,
}

impl TableConfig {
    pub fn new(initial_capacity: u32, growth_increment: u32) -> Self {
        Self {
            initial_capacity,
            growth_increment,
        }
    }

    /// Effective initial capacity after defaulting.
    #[inline]
    pub fn capacity(&self) -> u32 {
        or_default(self.initial_capacity)
    }

    /// Effective growth increment after defaulting.
    #[inline]
    pub fn increment(&self) -> u32 {
        or_default(self.growth_increment)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            growth_increment: DEFAULT_CAPACITY,
        }
    }
}

#[inline]
fn or_default(v: u32) -> u32 {
    if v == 0 {
        DEFAULT_CAPACITY
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_means_default() {
        let c = TableConfig::new(0, 0);
        assert_eq!(c.capacity(), DEFAULT_CAPACITY);
        assert_eq!(c.increment(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_explicit_values_kept() {
        let c = TableConfig::new(16, 8);
        assert_eq!(c.capacity(), 16);
        assert_eq!(c.increment(), 8);
    }
}
