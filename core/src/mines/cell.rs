use serde::{Deserialize, Serialize};

use crate::*;

/// Player-controlled state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Open,
    Flagged,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    mine: bool,
    neighbor_mines: u8,
    state: CellState,
}

impl Cell {
    pub(crate) const fn new((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            mine: false,
            neighbor_mines: 0,
            state: CellState::Hidden,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.state, CellState::Open)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Mines among the 8 neighbors, only meaningful for safe cells once mines are placed.
    pub const fn neighbor_mines(&self) -> u8 {
        self.neighbor_mines
    }

    pub(crate) fn arm(&mut self, mine: bool, neighbor_mines: u8) {
        self.mine = mine;
        self.neighbor_mines = if mine { 0 } else { neighbor_mines };
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

/// What the presentation layer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Open(u8),
    Flagged,
    /// Mine shown after the game was lost
    Mine,
    /// The mine that was opened
    Exploded,
}

impl CellView {
    /// Single character used by text front-ends.
    pub const fn glyph(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Open(0) => ' ',
            Self::Open(count) => (b'0' + count) as char,
            Self::Flagged => 'F',
            Self::Mine => '*',
            Self::Exploded => 'X',
        }
    }
}

/// A cell whose view changed because of an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coords: Coord2,
    pub view: CellView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_a_mine_clears_its_count() {
        let mut cell = Cell::new((2, 3));
        cell.arm(true, 4);

        assert!(cell.is_mine());
        assert_eq!(cell.neighbor_mines(), 0);
        assert_eq!(cell.coords(), (2, 3));
    }

    #[test]
    fn glyphs() {
        assert_eq!(CellView::Open(0).glyph(), ' ');
        assert_eq!(CellView::Open(8).glyph(), '8');
        assert_eq!(CellView::Hidden.glyph(), '#');
        assert_eq!(CellView::Exploded.glyph(), 'X');
    }
}
