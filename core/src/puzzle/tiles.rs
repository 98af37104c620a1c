use core::fmt;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of tiles per row and column.
pub const PUZZLE_SIDE: Coord = 4;

/// Number of slots on the board, including the empty one.
pub const TILE_COUNT: usize = (PUZZLE_SIDE as usize) * (PUZZLE_SIDE as usize);

/// Value used for the empty slot.
pub const EMPTY: u8 = 0;

/// Slot contents in row-major order, always a permutation of `0..16`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; TILE_COUNT]", into = "[u8; TILE_COUNT]")]
pub struct Tiles([u8; TILE_COUNT]);

impl Tiles {
    /// The solved arrangement `[1, 2, ..., 15, 0]`.
    pub const SOLVED: Self = {
        let mut tiles = [EMPTY; TILE_COUNT];
        let mut i = 0;
        while i < TILE_COUNT - 1 {
            tiles[i] = (i + 1) as u8;
            i += 1;
        }
        Self(tiles)
    };

    pub fn new(tiles: [u8; TILE_COUNT]) -> Result<Self> {
        let mut seen = [false; TILE_COUNT];
        for &value in &tiles {
            let slot = seen
                .get_mut(usize::from(value))
                .ok_or(GameError::InvalidTiles)?;
            if *slot {
                return Err(GameError::InvalidTiles);
            }
            *slot = true;
        }
        Ok(Self(tiles))
    }

    pub(crate) const fn new_unchecked(tiles: [u8; TILE_COUNT]) -> Self {
        Self(tiles)
    }

    pub const fn as_array(&self) -> &[u8; TILE_COUNT] {
        &self.0
    }

    pub fn empty_index(&self) -> usize {
        self.0
            .iter()
            .position(|&value| value == EMPTY)
            .unwrap_or_else(|| unreachable!("tiles always hold the empty slot"))
    }

    /// Out-of-order pairs among the numbered tiles, the blank is ignored.
    pub fn inversions(&self) -> u32 {
        let mut inversions = 0;
        for (i, &a) in self.0.iter().enumerate() {
            if a == EMPTY {
                continue;
            }
            inversions += self.0[i + 1..]
                .iter()
                .filter(|&&b| b != EMPTY && a > b)
                .count() as u32;
        }
        inversions
    }

    /// 1-indexed row of the blank counted from the bottom edge.
    pub fn empty_row_from_bottom(&self) -> u32 {
        let (row, _) = index_to_coords(self.empty_index());
        u32::from(PUZZLE_SIDE - row)
    }

    /// Even-width parity rule: every legal move keeps the parity of
    /// `inversions + empty_row_from_bottom`, and the solved board sits at 1.
    pub fn is_solvable(&self) -> bool {
        (self.inversions() + self.empty_row_from_bottom()) % 2 == 1
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }
}

impl Default for Tiles {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl Index<usize> for Tiles {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl TryFrom<[u8; TILE_COUNT]> for Tiles {
    type Error = GameError;

    fn try_from(tiles: [u8; TILE_COUNT]) -> Result<Self> {
        Self::new(tiles)
    }
}

impl From<Tiles> for [u8; TILE_COUNT] {
    fn from(tiles: Tiles) -> Self {
        tiles.0
    }
}

impl fmt::Display for Tiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.chunks(PUZZLE_SIDE.into()).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if value == EMPTY {
                    write!(f, "  ")?;
                } else {
                    write!(f, "{value:>2}")?;
                }
            }
        }
        Ok(())
    }
}

/// Maps a row-major slot index to `(row, col)`.
pub const fn index_to_coords(index: usize) -> Coord2 {
    let side = PUZZLE_SIDE as usize;
    ((index / side) as Coord, (index % side) as Coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(values: [u8; TILE_COUNT]) -> Tiles {
        Tiles::new(values).unwrap()
    }

    #[test]
    fn solved_constant_is_identity_with_trailing_blank() {
        assert_eq!(
            Tiles::SOLVED.as_array(),
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0]
        );
        assert!(Tiles::SOLVED.is_solved());
        assert!(Tiles::SOLVED.is_solvable());
    }

    #[test]
    fn rejects_duplicates_and_out_of_range_values() {
        let mut values = *Tiles::SOLVED.as_array();
        values[0] = 2;
        assert_eq!(Tiles::new(values), Err(GameError::InvalidTiles));

        values[0] = 16;
        assert_eq!(Tiles::new(values), Err(GameError::InvalidTiles));
    }

    #[test]
    fn one_move_from_solved_is_solvable() {
        let board = tiles([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0, 13, 14, 15, 12]);

        assert_eq!(board.inversions(), 3);
        assert_eq!(board.empty_row_from_bottom(), 2);
        assert!(board.is_solvable());
        assert!(!board.is_solved());
    }

    #[test]
    fn swapped_fourteen_fifteen_is_unsolvable() {
        let board = tiles([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 14, 0]);

        assert_eq!(board.inversions(), 1);
        assert_eq!(board.empty_row_from_bottom(), 1);
        assert!(!board.is_solvable());
    }

    #[test]
    fn swapping_two_numbered_tiles_flips_solvability() {
        let board = tiles([12, 1, 10, 2, 7, 11, 4, 14, 5, 0, 9, 15, 8, 13, 6, 3]);
        let mut flipped = board;
        flipped.swap(0, 1);

        assert_ne!(board.is_solvable(), flipped.is_solvable());
    }

    #[test]
    fn is_solved_only_for_exact_sequence() {
        let blank_first = tiles([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);

        assert!(!blank_first.is_solved());
        assert_eq!(blank_first.inversions(), 0);
        assert_eq!(blank_first.empty_row_from_bottom(), 4);
        assert!(!blank_first.is_solvable());
    }

    #[test]
    fn display_renders_blank_as_spaces() {
        let rendered = Tiles::SOLVED.to_string();

        assert_eq!(rendered.lines().count(), 4);
        assert_eq!(rendered.lines().last(), Some("13 14 15   "));
    }
}
