use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier of a body within an ensemble.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<BodyId>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(NonZeroU32);

impl BodyId {
    /// Create an id from a 0-based body index by storing index+1.
    ///
    /// Returns `None` for `u32::MAX`, the one index that has no successor.
    pub fn from_index(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyId({})", self.index())
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = BodyId::from_index(i).unwrap();
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn max_index_has_no_id() {
        assert!(BodyId::from_index(u32::MAX).is_none());
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<BodyId>(),
            core::mem::size_of::<Option<BodyId>>()
        );
    }
}
