use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Set of picked cell indices, order irrelevant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    indices: BTreeSet<CellIndex>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `index`, returns whether it is selected afterwards.
    pub fn toggle(&mut self, index: CellIndex) -> bool {
        if self.indices.remove(&index) {
            false
        } else {
            self.indices.insert(index);
            true
        }
    }

    /// Same as [`Selection::toggle`] but leaves `self` untouched.
    pub fn toggled(&self, index: CellIndex) -> Self {
        let mut next = self.clone();
        next.toggle(index);
        next
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.indices.iter().copied()
    }
}

impl FromIterator<CellIndex> for Selection {
    fn from_iter<T: IntoIterator<Item = CellIndex>>(iter: T) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[CellIndex; N]> for Selection {
    fn from(indices: [CellIndex; N]) -> Self {
        indices.into_iter().collect()
    }
}
