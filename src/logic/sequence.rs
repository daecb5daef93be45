use crate::model::Id;

/// Monotonic ID allocator scoped to one migration run.
///
/// Produces `<prefix>_1`, `<prefix>_2`, ... and never hands out the same value
/// twice. Each pipeline owns its allocators, so separate runs cannot collide.
#[derive(Debug, Clone)]
pub struct SequenceAllocator {
    prefix: String,
    next: u64,
    issued: u64,
}

impl SequenceAllocator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: first,
            issued: 0,
        }
    }

    pub fn next_id(&mut self) -> Id {
        let id = format!("{}_{}", self.prefix, self.next);
        self.next += 1;
        self.issued += 1;
        id
    }

    /// Number of IDs handed out so far
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut slices = SequenceAllocator::new("slice");
        assert_eq!(slices.next_id(), "slice_1");
        assert_eq!(slices.next_id(), "slice_2");
        assert_eq!(slices.issued(), 2);

        let mut formulas = SequenceAllocator::new("formula");
        assert_eq!(formulas.next_id(), "formula_1");
        assert_eq!(slices.next_id(), "slice_3");
    }

    #[test]
    fn test_allocator_custom_start() {
        let mut ids = SequenceAllocator::starting_at("slice", 100);
        assert_eq!(ids.next_id(), "slice_100");
        assert_eq!(ids.issued(), 1);
        assert_eq!(ids.prefix(), "slice");
    }
}
