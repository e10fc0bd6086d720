//! Rhythm layer identifiers and compact layer sets.

use serde::{Deserialize, Serialize};

/// One of the four rhythm layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayerId {
    A,
    B,
    C,
    D,
}

impl LayerId {
    /// All layers in index order.
    pub const ALL: [LayerId; 4] = [LayerId::A, LayerId::B, LayerId::C, LayerId::D];

    /// Layer index in [0, 4).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Layer for an index in [0, 4).
    pub fn from_index(i: usize) -> Option<LayerId> {
        Self::ALL.get(i).copied()
    }
}

/// Set of layers, stored as a 4-bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSet(u8);

impl LayerSet {
    /// Empty set.
    pub const EMPTY: LayerSet = LayerSet(0);

    /// Build a set from a slice of layers.
    pub fn from_layers(layers: &[LayerId]) -> Self {
        let mut set = Self::EMPTY;
        for &l in layers {
            set.insert(l);
        }
        set
    }

    /// Build from a raw 4-bit mask (high bits ignored).
    pub fn from_bits(mask: u8) -> Self {
        LayerSet(mask & 0x0f)
    }

    /// Raw 4-bit mask.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, layer: LayerId) -> bool {
        self.0 & (1 << layer.index()) != 0
    }

    #[inline]
    pub fn insert(&mut self, layer: LayerId) {
        self.0 |= 1 << layer.index();
    }

    #[inline]
    pub fn remove(&mut self, layer: LayerId) {
        self.0 &= !(1 << layer.index());
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of layers in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the layers in the set, in index order.
    pub fn iter(self) -> impl Iterator<Item = LayerId> {
        LayerId::ALL.into_iter().filter(move |l| self.contains(*l))
    }
}
