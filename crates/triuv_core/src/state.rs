use serde::{Deserialize, Serialize};

use crate::{CoordinatePair, Mapping, MappingIndex, SLOT_COUNT};

/// Default slot values, forming an equilateral triangle.
pub const DEFAULT_SLOTS: [CoordinatePair; SLOT_COUNT] = [
    CoordinatePair::new(0.0, 0.0),
    CoordinatePair::new(0.5, 0.866),
    CoordinatePair::new(1.0, 0.0),
];

/// Stored texture coordinates and the mapping to use for the next apply.
///
/// One of these lives for the whole editing session. It is only changed by
/// capturing (slots), applying (index), or direct user edits.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct MappingState {
    /// Slots 1, 2, 3.
    pub slots: [CoordinatePair; SLOT_COUNT],
    /// Mapping used by the next apply.
    pub index: MappingIndex,
}

impl Default for MappingState {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS,
            index: MappingIndex::FIRST,
        }
    }
}

impl MappingState {
    /// Constructs a state with the given slots and the first mapping.
    pub fn with_slots(slots: [CoordinatePair; SLOT_COUNT]) -> Self {
        Self {
            slots,
            index: MappingIndex::FIRST,
        }
    }

    /// Returns the value of a slot (0-based), or `None` if `slot` is out of
    /// range.
    pub fn slot(&self, slot: usize) -> Option<CoordinatePair> {
        self.slots.get(slot).copied()
    }

    /// Overwrites a slot (0-based). Returns `false` if `slot` is out of range.
    pub fn set_slot(&mut self, slot: usize, value: CoordinatePair) -> bool {
        match self.slots.get_mut(slot) {
            Some(s) => {
                *s = value;
                true
            }
            None => false,
        }
    }

    /// Sets the mapping number, clamping it to `1..=6`.
    pub fn set_index(&mut self, index: i64) {
        self.index = MappingIndex::clamped(index);
    }

    /// Returns the mapping used by the next apply.
    pub fn mapping(&self) -> Mapping {
        self.index.mapping()
    }

    /// Returns the values to write to corners A, B, C with the current mapping.
    pub fn corner_values(&self) -> [CoordinatePair; SLOT_COUNT] {
        self.mapping().slots().map(|slot| self.slots[slot])
    }

    /// Restores the default slots and mapping.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_state() {
        let state = MappingState::default();
        assert_eq!(state.index.get(), 1);
        assert_eq!(state.slots[0], CoordinatePair::new(0.0, 0.0));
        assert_eq!(state.slots[1], CoordinatePair::new(0.5, 0.866));
        assert_eq!(state.slots[2], CoordinatePair::new(1.0, 0.0));
    }

    #[test]
    fn test_set_slot_and_index() {
        let mut state = MappingState::default();
        assert!(state.set_slot(2, CoordinatePair::new(-1.0, 2.5)));
        assert!(!state.set_slot(3, CoordinatePair::ZERO));
        assert_eq!(state.slot(2), Some(CoordinatePair::new(-1.0, 2.5)));
        assert_eq!(state.slot(3), None);

        state.set_index(12);
        assert_eq!(state.index.get(), 6);
        state.set_index(0);
        assert_eq!(state.index.get(), 1);

        state.reset();
        assert_eq!(state, MappingState::default());
    }

    #[test]
    fn test_corner_values() {
        let p = CoordinatePair::new(0.1, 0.2);
        let q = CoordinatePair::new(0.3, 0.4);
        let r = CoordinatePair::new(0.5, 0.6);
        let mut state = MappingState::with_slots([p, q, r]);
        assert_eq!(state.corner_values(), [p, q, r]);
        state.set_index(2);
        assert_eq!(state.corner_values(), [r, p, q]);
        state.set_index(6);
        assert_eq!(state.corner_values(), [q, p, r]);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let state: MappingState = serde_json::from_str(r#"{"index": 4}"#).unwrap();
        assert_eq!(state.index.get(), 4);
        assert_eq!(state.slots, DEFAULT_SLOTS);
    }
}
