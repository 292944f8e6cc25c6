//! Corner mappings: which stored slot is written to which triangle corner.
//!
//! Corners are named A, B, C (in the face's own corner order) and slots are
//! numbered 1, 2, 3. Internally both are 0-based.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, FromRepr, IntoEnumIterator};

/// Number of texture-coordinate slots, which is also the number of corners of
/// a triangle.
pub const SLOT_COUNT: usize = 3;

/// Names of the triangle corners, in corner order.
pub const CORNER_NAMES: [char; SLOT_COUNT] = ['A', 'B', 'C'];

/// Parity of a mapping.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Parity {
    /// Even number of swaps. The written triangle keeps its winding.
    #[default]
    Even = 0,
    /// Odd number of swaps. The written triangle is mirrored.
    Odd = 1,
}

/// One of the six bijections from slots to corners.
///
/// The discriminant is the user-facing mapping number.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Display,
    EnumIter,
    EnumCount,
    FromRepr,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
)]
#[repr(u8)]
#[serde(rename_all = "snake_case")]
pub enum Mapping {
    /// 1A, 2B, 3C
    #[default]
    #[strum(serialize = "Identity")]
    Identity = 1,
    /// 1C, 2A, 3B
    #[strum(serialize = "Shift forward")]
    ShiftForward = 2,
    /// 1B, 2C, 3A
    #[strum(serialize = "Shift backward")]
    ShiftBackward = 3,
    /// 1C, 2B, 3A
    #[strum(serialize = "Swap A/C")]
    SwapAc = 4,
    /// 1A, 2C, 3B
    #[strum(serialize = "Swap B/C")]
    SwapBc = 5,
    /// 1B, 2A, 3C
    #[strum(serialize = "Swap A/B")]
    SwapAb = 6,
}

impl Mapping {
    /// Returns the slot feeding each corner, indexed by corner.
    pub const fn slots(self) -> [usize; SLOT_COUNT] {
        match self {
            Mapping::Identity => [0, 1, 2],
            Mapping::ShiftForward => [2, 0, 1],
            Mapping::ShiftBackward => [1, 2, 0],
            Mapping::SwapAc => [2, 1, 0],
            Mapping::SwapBc => [0, 2, 1],
            Mapping::SwapAb => [1, 0, 2],
        }
    }

    /// Returns the corner that receives each slot, indexed by slot.
    pub fn corners(self) -> [usize; SLOT_COUNT] {
        let mut ret = [0; SLOT_COUNT];
        for (corner, slot) in self.slots().into_iter().enumerate() {
            ret[slot] = corner;
        }
        ret
    }

    /// Returns the user-facing mapping number (1 to 6).
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns the parity of the mapping.
    pub fn parity(self) -> Parity {
        match self {
            Mapping::Identity | Mapping::ShiftForward | Mapping::ShiftBackward => Parity::Even,
            Mapping::SwapAc | Mapping::SwapBc | Mapping::SwapAb => Parity::Odd,
        }
    }

    /// Returns whether applying this mapping reverses the winding of the stored
    /// triangle.
    pub fn is_mirrored(self) -> bool {
        self.parity() == Parity::Odd
    }

    /// Returns a compact description such as `1C, 2A, 3B`.
    pub fn describe(self) -> String {
        let corners = self.corners();
        (0..SLOT_COUNT)
            .map(|slot| format!("{}{}", slot + 1, CORNER_NAMES[corners[slot]]))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns an iterator over all mappings in numerical order.
    pub fn all() -> impl Iterator<Item = Mapping> {
        Mapping::iter()
    }
}

/// Returns the slot feeding each corner for the mapping with number `index`.
///
/// Out-of-range numbers are clamped to `1..=6`.
pub fn permutation_for(index: i64) -> [usize; SLOT_COUNT] {
    MappingIndex::clamped(index).mapping().slots()
}

/// Current mapping number, always in `1..=6`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(from = "i64", into = "u8")]
pub struct MappingIndex(u8);

impl Default for MappingIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl MappingIndex {
    /// Lowest mapping number.
    pub const FIRST: Self = Self(1);
    /// Highest mapping number.
    pub const LAST: Self = Self(Mapping::COUNT as u8);

    /// Returns the mapping number if it is in range, or `None` otherwise.
    pub fn new(index: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0)
            .contains(&index)
            .then_some(Self(index))
    }

    /// Returns the mapping number, clamping it into range.
    pub fn clamped(index: i64) -> Self {
        // The clamped value always fits in `u8`.
        Self(index.clamp(Self::FIRST.0.into(), Self::LAST.0.into()) as u8)
    }

    /// Returns the mapping number.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the next mapping number, wrapping from 6 back to 1.
    #[must_use]
    pub fn next(self) -> Self {
        if self.0 >= Self::LAST.0 {
            Self::FIRST
        } else {
            Self(self.0 + 1)
        }
    }

    /// Advances to the next mapping number and returns the previous one.
    pub fn advance(&mut self) -> Self {
        let old = *self;
        *self = old.next();
        old
    }

    /// Returns the mapping with this number.
    pub fn mapping(self) -> Mapping {
        Mapping::from_repr(self.0).unwrap_or_default()
    }
}

impl From<i64> for MappingIndex {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}
impl From<MappingIndex> for u8 {
    fn from(value: MappingIndex) -> Self {
        value.0
    }
}
impl From<Mapping> for MappingIndex {
    fn from(value: Mapping) -> Self {
        Self(value.number())
    }
}

impl fmt::Display for MappingIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_permutation_table() {
        assert_eq!(permutation_for(1), [0, 1, 2]);
        assert_eq!(permutation_for(2), [2, 0, 1]);
        assert_eq!(permutation_for(3), [1, 2, 0]);
        assert_eq!(permutation_for(4), [2, 1, 0]);
        assert_eq!(permutation_for(5), [0, 2, 1]);
        assert_eq!(permutation_for(6), [1, 0, 2]);
    }

    #[test]
    fn test_every_mapping_is_a_distinct_bijection() {
        let all_slots = Mapping::all().map(Mapping::slots).collect_vec();
        assert_eq!(all_slots.len(), 6);
        assert!(all_slots.iter().all_unique());

        let mut expected = (0..SLOT_COUNT).permutations(SLOT_COUNT).collect_vec();
        let mut actual = all_slots.iter().map(|s| s.to_vec()).collect_vec();
        expected.sort();
        actual.sort();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_permutation_for_clamps() {
        assert_eq!(permutation_for(0), permutation_for(1));
        assert_eq!(permutation_for(-40), permutation_for(1));
        assert_eq!(permutation_for(7), permutation_for(6));
        assert_eq!(permutation_for(i64::MAX), permutation_for(6));
    }

    #[test]
    fn test_corners_inverts_slots() {
        for mapping in Mapping::all() {
            let slots = mapping.slots();
            let corners = mapping.corners();
            for corner in 0..SLOT_COUNT {
                assert_eq!(corners[slots[corner]], corner);
            }
        }
    }

    #[test]
    fn test_describe_matches_slot_to_corner_names() {
        assert_eq!(Mapping::Identity.describe(), "1A, 2B, 3C");
        assert_eq!(Mapping::ShiftForward.describe(), "1C, 2A, 3B");
        assert_eq!(Mapping::ShiftBackward.describe(), "1B, 2C, 3A");
        assert_eq!(Mapping::SwapAc.describe(), "1C, 2B, 3A");
        assert_eq!(Mapping::SwapBc.describe(), "1A, 2C, 3B");
        assert_eq!(Mapping::SwapAb.describe(), "1B, 2A, 3C");
    }

    #[test]
    fn test_parity() {
        let mirrored = Mapping::all().filter(|m| m.is_mirrored()).collect_vec();
        assert_eq!(
            mirrored,
            [Mapping::SwapAc, Mapping::SwapBc, Mapping::SwapAb],
        );
        assert_eq!(Mapping::Identity.parity(), Parity::Even);
        assert_eq!(Mapping::SwapAb.parity(), Parity::Odd);
    }

    #[test]
    fn test_advance_wraps() {
        for k in 1..=5 {
            let i = MappingIndex::new(k).unwrap();
            assert_eq!(i.next().get(), k + 1);
        }
        assert_eq!(MappingIndex::LAST.next(), MappingIndex::FIRST);

        let mut i = MappingIndex::LAST;
        assert_eq!(i.advance(), MappingIndex::LAST);
        assert_eq!(i, MappingIndex::FIRST);
    }

    #[test]
    fn test_strict_constructor() {
        assert_eq!(MappingIndex::new(0), None);
        assert_eq!(MappingIndex::new(7), None);
        assert_eq!(MappingIndex::new(6), Some(MappingIndex::LAST));
    }

    #[test]
    fn test_deserialize_clamps() {
        let i: MappingIndex = serde_json::from_str("9").unwrap();
        assert_eq!(i, MappingIndex::LAST);
        let i: MappingIndex = serde_json::from_str("-3").unwrap();
        assert_eq!(i, MappingIndex::FIRST);
        assert_eq!(serde_json::to_string(&MappingIndex::LAST).unwrap(), "6");
    }

    proptest! {
        #[test]
        fn proptest_advance_has_order_six(k in 1..=6_u8) {
            let start = MappingIndex::new(k).unwrap();
            let mut i = start;
            for step in 1..=6 {
                i = i.next();
                prop_assert!((1..=6).contains(&i.get()));
                if step < 6 {
                    prop_assert_ne!(i, start);
                }
            }
            prop_assert_eq!(i, start);
        }

        #[test]
        fn proptest_clamped_is_in_range(n in any::<i64>()) {
            let i = MappingIndex::clamped(n);
            prop_assert!((1..=6).contains(&i.get()));
            if (1..=6).contains(&n) {
                prop_assert_eq!(i64::from(i.get()), n);
            }
        }
    }
}
