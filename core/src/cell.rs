use serde::{Deserialize, Serialize};

use crate::Outcome;

/// Player-visible status of a cell.
///
/// Valid transitions:
/// - Hidden -> Flagged
/// - Flagged -> Hidden
/// - Hidden -> Revealed
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// Which picture a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    /// Unopened button
    Hidden,
    Flag,
    /// Opened safe cell with its neighbor mine count, blank when zero
    Number(u8),
    Mine,
    /// The mine that ended the game
    Detonated,
    /// Flag on a cell without a mine, only shown after a loss
    WrongFlag,
    /// Flag on a mine, only shown after a loss
    FlaggedMine,
}

impl Glyph {
    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Number(0))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_mine: bool,
    neighbor_mines: Option<u8>,
    status: CellStatus,
}

impl Cell {
    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn status(&self) -> CellStatus {
        self.status
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.status, CellStatus::Hidden)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.status, CellStatus::Flagged)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.status, CellStatus::Revealed)
    }

    /// Number of mines among the neighbors of this cell.
    ///
    /// # Panics
    ///
    /// If called before the board finished counting neighbors.
    pub fn neighbor_mines(&self) -> u8 {
        self.neighbor_mines
            .expect("neighbor mines are counted during board setup")
    }

    pub(crate) fn plant_mine(&mut self) {
        assert!(!self.has_mine, "mine planted twice on the same cell");
        self.has_mine = true;
    }

    pub(crate) fn set_neighbor_mines(&mut self, count: u8) {
        assert!(
            self.neighbor_mines.is_none(),
            "neighbor mines counted twice on the same cell"
        );
        assert!(count <= 8, "a cell has at most 8 neighbors");
        self.neighbor_mines = Some(count);
    }

    pub(crate) fn reveal(&mut self) {
        assert!(self.is_hidden(), "only hidden cells can be revealed");
        self.status = CellStatus::Revealed;
    }

    /// Flips between hidden and flagged, revealed cells are left alone.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.status = match self.status {
            CellStatus::Hidden => CellStatus::Flagged,
            CellStatus::Flagged => CellStatus::Hidden,
            CellStatus::Revealed => return false,
        };
        true
    }

    /// What to draw for this cell given the state of the whole game.
    pub fn glyph(&self, outcome: Outcome) -> Glyph {
        use CellStatus::*;

        match (outcome, self.status, self.has_mine) {
            (Outcome::Lost, Hidden, true) => Glyph::Mine,
            (Outcome::Lost, Flagged, true) => Glyph::FlaggedMine,
            (Outcome::Lost, Flagged, false) => Glyph::WrongFlag,
            // only the mine that ended the game is ever revealed
            (Outcome::Lost, Revealed, true) => Glyph::Detonated,
            (_, Hidden, _) => Glyph::Hidden,
            (_, Flagged, _) => Glyph::Flag,
            (_, Revealed, true) => Glyph::Mine,
            (_, Revealed, false) => Glyph::Number(self.neighbor_mines()),
        }
    }
}
