//! 9×9 minesweeper with mines placed on the first open.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use cell::*;
pub use generator::*;
pub use layout::*;

mod cell;
mod generator;
mod layout;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// The only board this game offers: 9×9 with 10 mines.
    pub const BEGINNER: Self = Self::new_unchecked((9, 9), 10);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Valid transitions:
/// - Fresh -> Active
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No cell opened yet, mines not placed
    #[default]
    Fresh,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Outcome of opening a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Cells touched by a left click and what the click resulted in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenReport {
    pub outcome: RevealOutcome,
    pub changes: Vec<CellChange>,
}

impl OpenReport {
    const fn no_change() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            changes: Vec::new(),
        }
    }

    pub const fn lost(&self) -> bool {
        matches!(self.outcome, RevealOutcome::Exploded)
    }

    pub const fn won(&self) -> bool {
        matches!(self.outcome, RevealOutcome::Won)
    }
}

/// Result of a right click.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagReport {
    pub change: Option<CellChange>,
    pub mines_left: isize,
}

impl FlagReport {
    pub const fn has_update(&self) -> bool {
        self.change.is_some()
    }
}

/// Everything a front-end needs to draw the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinesweeperSnapshot {
    pub cells: Array2<CellView>,
    pub mines_left: isize,
    pub cells_opened: CellCount,
    pub state: GameState,
    pub elapsed_secs: u32,
}

#[derive(Clone, Debug, PartialEq)]
enum MinePlacement {
    Random { seed: u64 },
    Fixed(MineLayout),
}

/// Represents a game from start to finish
#[derive(Clone, Debug)]
pub struct Minesweeper {
    config: GameConfig,
    placement: MinePlacement,
    grid: Array2<Cell>,
    mines_left: isize,
    cells_opened: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
    timer: GameTimer,
}

impl Minesweeper {
    /// New beginner game, mines are drawn from `seed` once the first cell is opened.
    pub fn new(seed: u64) -> Self {
        log::debug!("new minesweeper, seed: {}", seed);
        Self::with_placement(GameConfig::BEGINNER, MinePlacement::Random { seed })
    }

    pub fn random() -> Self {
        Self::new(rand::random())
    }

    /// New beginner-sized game with mines at exactly `mine_coords`, used verbatim on the first open.
    ///
    /// Meant for tests and scripted play: the first-open cell is not excluded,
    /// so opening a listed mine first loses immediately.
    pub fn with_mines(mine_coords: &[Coord2]) -> Result<Self> {
        let layout = MineLayout::from_mine_coords(GameConfig::BEGINNER.size, mine_coords)?;
        let config = GameConfig::new_unchecked(layout.size(), layout.mine_count());
        Ok(Self::with_placement(config, MinePlacement::Fixed(layout)))
    }

    fn with_placement(config: GameConfig, placement: MinePlacement) -> Self {
        let grid = Array2::from_shape_fn(config.size.to_nd_index(), |(row, col)| {
            Cell::new((row as Coord, col as Coord))
        });
        Self {
            config,
            placement,
            grid,
            mines_left: config.mines as isize,
            cells_opened: 0,
            state: GameState::Fresh,
            triggered_mine: None,
            timer: GameTimer::new(),
        }
    }

    /// Discards the board and starts over, cancelling the running timer.
    pub fn restart(&mut self, seed: u64) {
        self.timer.reset();
        *self = Self::new(seed);
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Mine total minus flags placed, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        self.mines_left
    }

    pub fn cells_opened(&self) -> CellCount {
        self.cells_opened
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.grid[coords.to_nd_index()])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter()
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(self.view_of(coords))
    }

    fn view_of(&self, coords: Coord2) -> CellView {
        let cell = &self.grid[coords.to_nd_index()];

        if matches!(self.state, GameState::Lost) && cell.is_mine() {
            return if self.triggered_mine == Some(coords) {
                CellView::Exploded
            } else {
                CellView::Mine
            };
        }

        match cell.state() {
            CellState::Hidden => CellView::Hidden,
            CellState::Open => CellView::Open(cell.neighbor_mines()),
            CellState::Flagged => CellView::Flagged,
        }
    }

    pub fn snapshot(&self) -> MinesweeperSnapshot {
        let cells = Array2::from_shape_fn(self.size().to_nd_index(), |(row, col)| {
            self.view_of((row as Coord, col as Coord))
        });
        MinesweeperSnapshot {
            cells,
            mines_left: self.mines_left,
            cells_opened: self.cells_opened,
            state: self.state,
            elapsed_secs: self.elapsed_secs(),
        }
    }

    /// Opens a cell, placing the mines first if this is the opening move.
    pub fn left_click(&mut self, coords: Coord2) -> Result<OpenReport> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(OpenReport::no_change());
        }

        if self.state.is_fresh() {
            self.place_mines(coords);
            self.timer.start();
            self.state = GameState::Active;
        }

        let cell = self.grid[coords.to_nd_index()];
        if !matches!(cell.state(), CellState::Hidden) {
            return Ok(OpenReport::no_change());
        }

        if cell.is_mine() {
            return Ok(self.detonate(coords));
        }

        let changes = self.open_cell(coords);
        let outcome = if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Opened
        };
        Ok(OpenReport { outcome, changes })
    }

    /// Toggles a flag on a hidden cell, only once the board exists.
    pub fn right_click(&mut self, coords: Coord2) -> Result<FlagReport> {
        let coords = self.validate_coords(coords)?;

        let unchanged = FlagReport {
            change: None,
            mines_left: self.mines_left,
        };
        if self.state.is_finished() || self.state.is_fresh() {
            return Ok(unchanged);
        }

        let cell = &mut self.grid[coords.to_nd_index()];
        let view = match cell.state() {
            CellState::Open => return Ok(unchanged),
            CellState::Hidden => {
                cell.set_state(CellState::Flagged);
                self.mines_left -= 1;
                CellView::Flagged
            }
            CellState::Flagged => {
                cell.set_state(CellState::Hidden);
                self.mines_left += 1;
                CellView::Hidden
            }
        };
        log::trace!("flag toggled at {:?}, mines left: {}", coords, self.mines_left);

        Ok(FlagReport {
            change: Some(CellChange { coords, view }),
            mines_left: self.mines_left,
        })
    }

    fn place_mines(&mut self, exclude: Coord2) {
        let layout = match &self.placement {
            MinePlacement::Random { seed } => {
                RandomMinefieldGenerator::new(*seed, exclude).generate(self.config)
            }
            MinePlacement::Fixed(layout) => layout.clone(),
        };
        debug_assert_eq!(layout.mine_count(), self.config.mines);
        log::debug!(
            "placed {} mines, first open at {:?}",
            layout.mine_count(),
            exclude
        );

        for cell in self.grid.iter_mut() {
            let coords = cell.coords();
            cell.arm(
                layout.contains_mine(coords),
                layout.adjacent_mine_count(coords),
            );
        }
    }

    /// Opens `coords` and, through zero cells, the whole connected region and its numbered border.
    fn open_cell(&mut self, coords: Coord2) -> Vec<CellChange> {
        let mut changes = Vec::new();
        let mut to_visit = vec![coords];

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.grid[visit_coords.to_nd_index()];
            // reached again through another zero cell
            if cell.is_mine() || !matches!(cell.state(), CellState::Hidden) {
                continue;
            }

            cell.set_state(CellState::Open);
            let count = cell.neighbor_mines();
            self.cells_opened += 1;
            changes.push(CellChange {
                coords: visit_coords,
                view: CellView::Open(count),
            });
            log::trace!("opened cell at {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                to_visit.extend(self.grid.iter_neighbors(visit_coords).filter(|&pos| {
                    let neighbor = &self.grid[pos.to_nd_index()];
                    !neighbor.is_mine() && matches!(neighbor.state(), CellState::Hidden)
                }));
            }
        }

        changes
    }

    fn detonate(&mut self, coords: Coord2) -> OpenReport {
        self.triggered_mine = Some(coords);
        self.end_game(false);

        let changes = self
            .grid
            .iter()
            .filter(|cell| cell.is_mine())
            .map(|cell| CellChange {
                coords: cell.coords(),
                view: self.view_of(cell.coords()),
            })
            .collect();

        OpenReport {
            outcome: RevealOutcome::Exploded,
            changes,
        }
    }

    fn check_win(&mut self) -> bool {
        if self.cells_opened == self.config.safe_cells() && !self.state.is_finished() {
            self.end_game(true);
            true
        } else {
            false
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        self.timer.stop();
        log::debug!(
            "game {} after opening {} cells",
            if won { "won" } else { "lost" },
            self.cells_opened
        );
    }
}
