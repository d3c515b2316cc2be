//! Hardcoded block hash pins at selected heights.

use std::collections::HashMap;

use crate::hash::BlockHash;

/// A sparse height-to-hash table guarding against chain forgery.
///
/// At a pinned height exactly the recorded hash passes; every unpinned
/// height passes by definition. An empty table (most networks) therefore
/// vetoes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkpoints {
    map: HashMap<u32, BlockHash>,
}

impl Checkpoints {
    pub fn new() -> Self {
        Checkpoints { map: HashMap::new() }
    }

    /// Build a table from (height, display-hex hash) pairs.
    ///
    /// Returns `None` if any hash fails to parse; the tables compiled into
    /// this crate are validated by tests, so construction of the shipped
    /// networks never fails.
    pub fn from_table(entries: &[(u32, &str)]) -> Option<Self> {
        let mut map = HashMap::with_capacity(entries.len());
        for (height, hex) in entries {
            map.insert(*height, BlockHash::from_display_hex(hex)?);
        }
        Some(Checkpoints { map })
    }

    /// Whether `hash` is acceptable at `height`.
    pub fn passes(&self, height: u32, hash: &BlockHash) -> bool {
        match self.map.get(&height) {
            Some(pinned) => pinned == hash,
            None => true,
        }
    }

    /// Whether `height` carries a pin at all.
    pub fn contains(&self, height: u32) -> bool {
        self.map.contains_key(&height)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PINNED: &str = "00000000000271a2dc26e7667f8419f2e15416dc6955e5a6c6cdf3f2574dd08e";
    const OTHER: &str = "00000000000af0aed4792b1acee3d966af36cf5def14935db8de83d6f9306f2f";

    fn table() -> Checkpoints {
        Checkpoints::from_table(&[(91722, PINNED)]).unwrap()
    }

    #[test]
    fn test_pinned_height_requires_exact_hash() {
        let cp = table();
        assert!(cp.contains(91722));
        assert!(cp.passes(91722, &BlockHash::from_display_hex(PINNED).unwrap()));
        assert!(!cp.passes(91722, &BlockHash::from_display_hex(OTHER).unwrap()));
    }

    #[test]
    fn test_unpinned_height_passes_anything() {
        let cp = table();
        assert!(!cp.contains(91723));
        assert!(cp.passes(91723, &BlockHash::from_display_hex(OTHER).unwrap()));
        assert!(cp.passes(0, &BlockHash::ZERO));
    }

    #[test]
    fn test_empty_table_vetoes_nothing() {
        let cp = Checkpoints::new();
        assert!(cp.is_empty());
        assert!(cp.passes(91722, &BlockHash::ZERO));
    }

    #[test]
    fn test_bad_hex_is_rejected() {
        assert!(Checkpoints::from_table(&[(1, "nothex")]).is_none());
    }
}
