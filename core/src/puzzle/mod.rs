//! 4×4 sliding-tile puzzle.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use generator::*;
pub use tiles::*;

mod generator;
mod tiles;

/// Outcome of clicking a tile
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Not orthogonally adjacent to the blank
    Rejected,
    /// Tile slid into the blank
    Moved,
    /// Tile slid into the blank and completed the puzzle
    Solved { moves: u32 },
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::Rejected => false,
            Self::Moved => true,
            Self::Solved { .. } => true,
        }
    }

    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved { .. })
    }
}

/// Player-visible state of a puzzle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    pub tiles: Tiles,
    pub moves: u32,
    pub solved: bool,
}

/// One puzzle from shuffle to solve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidingPuzzle {
    tiles: Tiles,
    moves: u32,
}

impl SlidingPuzzle {
    /// Starts a game from a solvable shuffle derived from `seed`.
    pub fn new(seed: u64) -> Self {
        log::debug!("new puzzle, seed: {}", seed);
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::from_tiles(generate_solvable_board(&mut rng))
    }

    /// Starts a game from a random seed.
    pub fn random() -> Self {
        Self::new(rand::random())
    }

    /// Starts a game from a fixed arrangement, which may be unsolvable or already solved.
    pub fn from_tiles(tiles: Tiles) -> Self {
        Self { tiles, moves: 0 }
    }

    pub fn tiles(&self) -> &Tiles {
        &self.tiles
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.is_solved()
    }

    pub fn empty_index(&self) -> usize {
        self.tiles.empty_index()
    }

    /// Whether the tile at `index` sits orthogonally next to the blank.
    pub fn can_move(&self, index: usize) -> bool {
        index < TILE_COUNT
            && manhattan(index_to_coords(index), index_to_coords(self.empty_index())) == 1
    }

    /// Slides the tile at `index` into the blank when they are orthogonal neighbors.
    pub fn click(&mut self, index: usize) -> Result<MoveOutcome> {
        if index >= TILE_COUNT {
            return Err(GameError::InvalidTileIndex);
        }

        if !self.can_move(index) {
            log::trace!("rejected move at {}", index);
            return Ok(MoveOutcome::Rejected);
        }

        let empty_index = self.empty_index();
        self.tiles.swap(index, empty_index);
        self.moves += 1;
        log::trace!("moved tile {} from {} to {}", self.tiles[empty_index], index, empty_index);

        if self.is_solved() {
            log::debug!("puzzle solved in {} moves", self.moves);
            Ok(MoveOutcome::Solved { moves: self.moves })
        } else {
            Ok(MoveOutcome::Moved)
        }
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            tiles: self.tiles,
            moves: self.moves,
            solved: self.is_solved(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle(values: [u8; TILE_COUNT]) -> SlidingPuzzle {
        SlidingPuzzle::from_tiles(Tiles::new(values).unwrap())
    }

    #[test]
    fn new_game_starts_unsolved_with_zero_moves() {
        let game = SlidingPuzzle::new(1234);

        assert_eq!(game.moves(), 0);
        assert!(!game.is_solved());
        assert!(game.tiles().is_solvable());
    }

    #[test]
    fn adjacent_click_swaps_tile_and_blank() {
        let mut game = puzzle([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 0, 11, 13, 14, 15, 12]);

        let outcome = game.click(11).unwrap();

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(game.tiles()[10], 11);
        assert_eq!(game.tiles()[11], 0);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn vertical_neighbor_is_legal() {
        let mut game = puzzle([1, 2, 3, 4, 5, 0, 7, 8, 9, 6, 10, 11, 13, 14, 15, 12]);

        assert_eq!(game.click(1).unwrap(), MoveOutcome::Moved);
        assert_eq!(game.empty_index(), 1);
        assert_eq!(game.tiles()[5], 2);
    }

    #[test]
    fn diagonal_distant_and_blank_clicks_are_rejected() {
        let mut game = puzzle([1, 2, 3, 4, 5, 0, 7, 8, 9, 6, 10, 11, 13, 14, 15, 12]);
        let before = game.clone();

        for index in [0, 2, 8, 10, 5, 7, 15] {
            assert_eq!(game.click(index).unwrap(), MoveOutcome::Rejected);
        }

        assert_eq!(game, before);
    }

    #[test]
    fn row_wrap_is_not_adjacency() {
        // index 3 ends row 0 and index 4 starts row 1
        let mut game = puzzle([1, 2, 3, 0, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);

        assert!(!game.can_move(4));
        assert_eq!(game.click(4).unwrap(), MoveOutcome::Rejected);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut game = SlidingPuzzle::new(5);

        assert_eq!(game.click(16), Err(GameError::InvalidTileIndex));
    }

    #[test]
    fn final_move_reports_solved_with_move_count() {
        let mut game = puzzle([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0, 13, 14, 15, 12]);

        let outcome = game.click(15).unwrap();

        assert_eq!(outcome, MoveOutcome::Solved { moves: 1 });
        assert!(game.is_solved());
        assert!(game.snapshot().solved);
    }

    #[test]
    fn solved_game_still_accepts_adjacent_clicks() {
        let mut game = puzzle([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0, 13, 14, 15, 12]);
        game.click(15).unwrap();

        assert_eq!(game.click(14).unwrap(), MoveOutcome::Moved);
        assert_eq!(game.moves(), 2);
        assert!(!game.is_solved());
    }

    #[test]
    fn solved_board_moves_like_any_other() {
        let mut game = SlidingPuzzle::from_tiles(Tiles::SOLVED);

        assert_eq!(game.click(14).unwrap(), MoveOutcome::Moved);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.click(0).unwrap(), MoveOutcome::Rejected);
        assert_eq!(game.click(15).unwrap(), MoveOutcome::Solved { moves: 2 });
    }

    #[test]
    fn legal_moves_preserve_solvability() {
        let mut game = SlidingPuzzle::new(99);

        for index in [0, 3, 12, 15, 5, 6, 9, 10, 1, 14, 4, 11] {
            game.click(index).unwrap();
            let values = *game.tiles().as_array();
            assert!(Tiles::new(values).is_ok());
            assert!(game.tiles().is_solvable());
        }
    }

    #[test]
    fn snapshot_serializes_tiles_as_plain_array() {
        let game = SlidingPuzzle::from_tiles(Tiles::SOLVED);

        let json = serde_json::to_string(&game.snapshot()).unwrap();

        assert_eq!(
            json,
            r#"{"tiles":[1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,0],"moves":0,"solved":true}"#
        );
    }

    #[test]
    fn snapshot_rejects_invalid_tiles_on_deserialize() {
        let json = r#"{"tiles":[1,1,3,4,5,6,7,8,9,10,11,12,13,14,15,0],"moves":0,"solved":false}"#;

        assert!(serde_json::from_str::<PuzzleSnapshot>(json).is_err());
    }
}
