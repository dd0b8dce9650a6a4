use std::iter::FusedIterator;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bitset::bitset_traits;
use crate::InvalidCoordinate;

/// A cell of the 3x3 grid, identified by row and column.
///
/// Both components are always in `0..=2`; the only way to build a `Coord`
/// from arbitrary numbers is [`Coord::new()`], which checks this.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    pub const CENTER: Coord = Coord { row: 1, col: 1 };

    /// The corners in row-major order.
    pub const CORNERS: [Coord; 4] = [
        Coord { row: 0, col: 0 },
        Coord { row: 0, col: 2 },
        Coord { row: 2, col: 0 },
        Coord { row: 2, col: 2 },
    ];

    /// The edge midpoints in row-major order.
    pub const SIDES: [Coord; 4] = [
        Coord { row: 0, col: 1 },
        Coord { row: 1, col: 0 },
        Coord { row: 1, col: 2 },
        Coord { row: 2, col: 1 },
    ];

    pub fn new(row: usize, col: usize) -> Result<Self, InvalidCoordinate> {
        if row > 2 || col > 2 {
            return Err(InvalidCoordinate::OutOfRange { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Converts a human-facing cell number, 1 to 9 in row-major order.
    pub fn from_cell_number(number: usize) -> Result<Self, InvalidCoordinate> {
        if !(1..=9).contains(&number) {
            return Err(InvalidCoordinate::CellNumber { number });
        }
        Ok(Self::from_index((number - 1) as u8))
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// The inverse of [`Self::from_cell_number()`].
    pub fn cell_number(self) -> usize {
        self.index() as usize + 1
    }

    pub fn is_corner(self) -> bool {
        self.row != 1 && self.col != 1
    }

    pub fn is_side(self) -> bool {
        (self.row == 1) != (self.col == 1)
    }

    /// The point-symmetric partner of a corner, e.g. `(0, 2)` for `(2, 0)`.
    ///
    /// Returns `None` for the center and the sides.
    pub fn opposite_corner(self) -> Option<Coord> {
        self.is_corner().then(|| Coord {
            row: 2 - self.row,
            col: 2 - self.col,
        })
    }

    /// Iterates over all nine cells in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..9).map(Coord::from_index)
    }

    pub(crate) fn index(self) -> u8 {
        self.row * 3 + self.col
    }

    pub(crate) fn from_index(idx: u8) -> Self {
        debug_assert!(idx < 9);
        Self {
            row: idx / 3,
            col: idx % 3,
        }
    }
}

impl TryFrom<(usize, usize)> for Coord {
    type Error = InvalidCoordinate;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Coord::new(row, col)
    }
}

impl From<Coord> for (usize, usize) {
    fn from(coord: Coord) -> (usize, usize) {
        (coord.row(), coord.col())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A compact set of [`Coord`]s.
///
/// Allows intersection/union/xor with other such sets via bitwise ops.
/// Iteration yields coordinates in row-major order.
///
/// ```
/// use tictactoe::{Coord, CoordSet};
/// let mut set = CoordSet::new();
/// // This is an immutable data type, so functions like `insert` return a new `CoordSet`.
/// set = set.insert(Coord::CENTER);
/// set = set.insert(Coord::CENTER);  // Inserting a second time has no effect
/// set = set.insert(Coord::new(0, 0).unwrap());
/// assert_eq!(Vec::from_iter(set), vec![Coord::new(0, 0).unwrap(), Coord::CENTER]);
/// ```
///
/// # Note on immutability
///
/// This is an immutable type, so its "mutating" methods return a
/// new value instead of really mutating in-place.
/// It is also [`Copy`], so a value is not consumed by methods with `self` receiver.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordSet {
    // Only the low 9 bits are used.
    bits: u16,
}

const VALID_BITS: u16 = 0b1_1111_1111;

bitset_traits!(CoordSet, VALID_BITS);

/// Equal to `CoordSet::from_iter(Coord::CORNERS)`.
pub const CORNERS_SET: CoordSet = CoordSet {
    bits: 0b1_0100_0101,
};

/// Equal to `CoordSet::from_iter(Coord::SIDES)`.
pub const SIDES_SET: CoordSet = CoordSet {
    bits: 0b0_1010_1010,
};

/// All nine cells.
pub const FULL_SET: CoordSet = CoordSet { bits: VALID_BITS };

impl CoordSet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn contains(self, coord: Coord) -> bool {
        (self.bits & (1u16 << coord.index())) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, coord: Coord) -> Self {
        Self {
            bits: self.bits | (1u16 << coord.index()),
        }
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn remove(self, coord: Coord) -> Self {
        Self {
            bits: self.bits & !(1u16 << coord.index()),
        }
    }

    /// Picks a member uniformly at random, or `None` if the set is empty.
    pub fn choose<R: Rng + ?Sized>(self, rng: &mut R) -> Option<Coord> {
        let members: Vec<Coord> = self.into_iter().collect();
        members.choose(rng).copied()
    }
}

impl std::fmt::Debug for CoordSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.into_iter()).finish()
    }
}

impl FromIterator<Coord> for CoordSet {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        let mut bits = 0;
        for coord in iter {
            bits |= 1u16 << coord.index();
        }
        Self { bits }
    }
}

impl IntoIterator for CoordSet {
    type Item = Coord;

    type IntoIter = CoordSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CoordSetIter { bits: self.bits }
    }
}

/// Iterator for a [`CoordSet`] that returns coordinates in row-major order.
#[derive(Clone, Copy, Debug)]
pub struct CoordSetIter {
    bits: u16,
}

impl Iterator for CoordSetIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // The number of trailing zeros is the cell index
            let idx = self.bits.trailing_zeros() as u8;
            // Clear the flag corresponding to this cell
            self.bits ^= 1u16 << idx;

            Some(Coord::from_index(idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for CoordSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for CoordSetIter {}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn set_constants() {
        assert_eq!(CoordSet::from_iter(Coord::CORNERS), CORNERS_SET);
        assert_eq!(CoordSet::from_iter(Coord::SIDES), SIDES_SET);
        assert_eq!(CoordSet::from_iter(Coord::all()), FULL_SET);
        assert_eq!(
            CORNERS_SET | SIDES_SET | CoordSet::new().insert(Coord::CENTER),
            FULL_SET
        );
        assert_eq!(!FULL_SET, CoordSet::new());
    }

    #[test]
    fn set_operators_stay_on_the_board() {
        let center = CoordSet::new().insert(Coord::CENTER);
        assert_eq!(!CORNERS_SET, SIDES_SET | center);
        assert_eq!((!CORNERS_SET).len(), 5);
        assert_eq!(CORNERS_SET & SIDES_SET, CoordSet::new());
        assert_eq!(FULL_SET & center, center);
        assert!((!CoordSet::new()).into_iter().all(|c| FULL_SET.contains(c)));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert_eq!(
            Coord::new(3, 0),
            Err(InvalidCoordinate::OutOfRange { row: 3, col: 0 })
        );
        assert_eq!(
            Coord::new(1, 7),
            Err(InvalidCoordinate::OutOfRange { row: 1, col: 7 })
        );
        assert_eq!(
            Coord::from_cell_number(0),
            Err(InvalidCoordinate::CellNumber { number: 0 })
        );
        assert_eq!(
            Coord::from_cell_number(10),
            Err(InvalidCoordinate::CellNumber { number: 10 })
        );
    }

    #[test]
    fn cell_numbers_are_row_major() {
        assert_eq!(Coord::from_cell_number(1), Coord::new(0, 0));
        assert_eq!(Coord::from_cell_number(6), Coord::new(1, 2));
        assert_eq!(Coord::from_cell_number(7), Coord::new(2, 0));
        for coord in Coord::all() {
            assert_eq!(Coord::from_cell_number(coord.cell_number()), Ok(coord));
        }
    }

    #[test]
    fn opposite_corners() {
        let pairs = [((0, 0), (2, 2)), ((0, 2), (2, 0))];
        for ((r1, c1), (r2, c2)) in pairs {
            let a = Coord::new(r1, c1).unwrap();
            let b = Coord::new(r2, c2).unwrap();
            assert_eq!(a.opposite_corner(), Some(b));
            assert_eq!(b.opposite_corner(), Some(a));
        }
        assert_eq!(Coord::CENTER.opposite_corner(), None);
        for side in Coord::SIDES {
            assert_eq!(side.opposite_corner(), None);
        }
    }

    #[test]
    fn coord_deserialization_validates() {
        let coord: Coord = serde_json::from_str("[2, 1]").unwrap();
        assert_eq!(coord, Coord::new(2, 1).unwrap());
        assert!(serde_json::from_str::<Coord>("[3, 1]").is_err());
    }

    #[test]
    fn choose_is_reproducible_and_picks_members() {
        let set = CORNERS_SET;
        let picks: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..20).map(|_| set.choose(&mut rng).unwrap()).collect()
        };
        let again: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..20).map(|_| set.choose(&mut rng).unwrap()).collect()
        };
        assert_eq!(picks, again);
        assert!(picks.iter().all(|&c| set.contains(c)));
        assert_eq!(CoordSet::new().choose(&mut StdRng::seed_from_u64(7)), None);
    }

    quickcheck! {
        fn insert_then_contains(row: usize, col: usize) -> bool {
            let coord = Coord::new(row % 3, col % 3).unwrap();
            let set = CoordSet::new().insert(coord);
            set.contains(coord) && set.len() == 1 && !set.remove(coord).contains(coord)
        }
    }
}
