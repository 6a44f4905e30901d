use alloc::collections::VecDeque;
use ndarray::Array2;

use crate::*;

/// A game from start to finish: the minefield, what the player has uncovered, and the outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    size: Coord2,
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flag_count: CellCount,
    outcome: Outcome,
    detonated: Option<Coord2>,
}

impl Board {
    /// Builds a board with mines at exactly the given coordinates.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mines = CellCount::try_from(mine_coords.len()).map_err(|_| GameError::TooManyMines)?;
        let config = GameConfig::new(size.0, size.1, mines)?;

        let mut cells: Array2<Cell> = Array2::default(config.size().to_nd_index());
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            let cell = &mut cells[coords.to_nd_index()];
            if cell.has_mine() {
                return Err(GameError::DuplicateMine);
            }
            cell.plant_mine();
        }

        Ok(Self::from_planted(size, cells, mines))
    }

    /// Finishes setup once every mine is planted by counting the mines around each cell.
    pub(crate) fn from_planted(size: Coord2, mut cells: Array2<Cell>, mine_count: CellCount) -> Self {
        debug_assert_eq!(cells.dim(), (usize::from(size.1), usize::from(size.0)));

        for y in 0..size.1 {
            for x in 0..size.0 {
                let coords = (x, y);
                let count = NeighborIter::new(coords, size)
                    .filter(|&pos| cells[pos.to_nd_index()].has_mine())
                    .count();
                cells[coords.to_nd_index()].set_neighbor_mines(count as u8);
            }
        }

        Self {
            size,
            cells,
            mine_count,
            revealed_count: 0,
            flag_count: 0,
            outcome: Outcome::default(),
            detonated: None,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet, negative when the player placed more flags than there are mines
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count as isize)
    }

    /// The mine whose reveal lost the game.
    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn tile_at(&self, coords: Coord2) -> &Cell {
        self.check_coords(coords);
        &self.cells[coords.to_nd_index()]
    }

    pub fn glyph_at(&self, coords: Coord2) -> Glyph {
        self.tile_at(coords).glyph(self.outcome)
    }

    /// All cells with their coordinates, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((y, x), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    /// Flag or unflag a hidden cell.
    ///
    /// Revealed cells and finished games are left alone.
    ///
    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn toggle_flag_at(&mut self, coords: Coord2) -> FlagOutcome {
        self.check_coords(coords);
        if self.outcome.is_finished() {
            log::debug!("Ignoring flag at {:?}, game already ended", coords);
            return FlagOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.toggle_flag() {
            return FlagOutcome::NoChange;
        }
        if cell.is_flagged() {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        log::debug!("Flag at {:?} now {:?}", coords, cell.status());
        FlagOutcome::Changed
    }

    /// Reveal a hidden cell, opening the surrounding region when it has no neighboring mines.
    ///
    /// Flagged and revealed cells, and any cell after the game ended, are left alone.
    ///
    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn reveal_at(&mut self, coords: Coord2) -> RevealOutcome {
        self.check_coords(coords);
        if self.outcome.is_finished() {
            log::debug!("Ignoring reveal at {:?}, game already ended", coords);
            return RevealOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_hidden() {
            return RevealOutcome::NoChange;
        }
        cell.reveal();

        if cell.has_mine() {
            self.detonated = Some(coords);
            self.end_game(Outcome::Lost);
            return RevealOutcome::HitMine;
        }

        let count = cell.neighbor_mines();
        log::debug!("Reveal cell at {:?}, mine count: {}", coords, count);
        let mut opened = 1;
        if count == 0 {
            opened += self.cascade_from(coords);
        }
        self.revealed_count += opened;

        if self.revealed_count == self.safe_cell_count() {
            self.end_game(Outcome::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed(opened)
        }
    }

    /// Opens every hidden cell reachable from `origin` through cells without neighboring mines.
    ///
    /// A cell is queued right after it turns from hidden to revealed, so each one is processed at most once.
    fn cascade_from(&mut self, origin: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = VecDeque::from([origin]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in NeighborIter::new(visit_coords, self.size) {
                let cell = &mut self.cells[pos.to_nd_index()];
                // flags protect from the cascade as well
                if !cell.is_hidden() {
                    continue;
                }
                debug_assert!(!cell.has_mine(), "cascade reached a mine at {pos:?}");

                cell.reveal();
                opened += 1;
                let count = cell.neighbor_mines();
                log::trace!("Cascade opened cell at {:?}, mine count: {}", pos, count);

                if count == 0 {
                    to_visit.push_back(pos);
                }
            }
        }

        opened
    }

    fn end_game(&mut self, outcome: Outcome) {
        if self.outcome.is_finished() {
            return;
        }
        self.outcome = outcome;
        log::debug!(
            "Game ended: {:?}, revealed {}/{}, flags {}",
            outcome,
            self.revealed_count,
            self.safe_cell_count(),
            self.flag_count
        );
    }

    fn check_coords(&self, coords: Coord2) {
        assert!(
            in_bounds(coords, self.size),
            "{:?} is outside the {:?} board",
            coords,
            self.size
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn status_grid(board: &Board) -> Vec<CellStatus> {
        board.cells().map(|(_, cell)| cell.status()).collect()
    }

    fn brute_force_count(board: &Board, (x, y): Coord2) -> u8 {
        let mut count = 0;
        for dy in -1i16..=1 {
            for dx in -1i16..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (i16::from(x) + dx, i16::from(y) + dy);
                if nx < 0 || ny < 0 || nx >= i16::from(board.width()) || ny >= i16::from(board.height()) {
                    continue;
                }
                if board.tile_at((nx as Coord, ny as Coord)).has_mine() {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn explicit_layout_validation() {
        assert_eq!(
            Board::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            Board::from_mine_coords((3, 3), &[(1, 1), (1, 1)]),
            Err(GameError::DuplicateMine)
        );
        assert_eq!(
            Board::from_mine_coords((1, 1), &[(0, 0)]),
            Err(GameError::TooManyMines)
        );
        assert_eq!(Board::from_mine_coords((0, 4), &[]), Err(GameError::EmptyBoard));
    }

    #[test]
    fn neighbor_counts_match_brute_force() {
        for seed in 0..50 {
            let config = GameConfig::new(13, 7, 25).unwrap();
            let board = RandomMinefieldGenerator::new(seed).generate(config);
            for (coords, cell) in board.cells() {
                assert_eq!(cell.neighbor_mines(), brute_force_count(&board, coords));
            }
        }
    }

    #[test]
    fn cells_are_row_major() {
        let board = board((3, 2), &[(2, 0)]);
        let coords: Vec<_> = board.cells().map(|(coords, _)| coords).collect();
        assert_eq!(coords, [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        let mine_index = board.cells().position(|(_, cell)| cell.has_mine());
        assert_eq!(mine_index, Some(linear_index((2, 0), board.size())));
    }

    #[test]
    fn reveal_next_to_mine_does_not_cascade() {
        // mines at linear indices 0 and 4
        let mut board = board((3, 3), &[(0, 0), (1, 1)]);

        assert_eq!(board.tile_at((2, 2)).neighbor_mines(), 1);
        assert_eq!(board.reveal_at((2, 2)), RevealOutcome::Revealed(1));
        assert_eq!(board.revealed_count(), 1);

        // with a mine in the middle every cell of a 3x3 board touches a mine
        assert_eq!(board.tile_at((2, 0)).neighbor_mines(), 1);
        assert_eq!(board.reveal_at((2, 0)), RevealOutcome::Revealed(1));
        assert_eq!(board.revealed_count(), 2);
        assert_eq!(board.outcome(), Outcome::InProgress);
    }

    #[test]
    fn reveal_zero_cascades_to_boundary() {
        let mut board = board((5, 5), &[(0, 0), (1, 1)]);

        assert_eq!(board.reveal_at((4, 4)), RevealOutcome::Revealed(21));
        assert_eq!(board.outcome(), Outcome::InProgress);

        // boundary cells are opened but only reached through zero cells
        for coords in [(2, 0), (2, 1), (2, 2), (1, 2), (0, 2)] {
            assert!(board.tile_at(coords).is_revealed(), "{coords:?}");
        }
        for coords in [(1, 0), (0, 1), (0, 0), (1, 1)] {
            assert!(board.tile_at(coords).is_hidden(), "{coords:?}");
        }

        assert_eq!(board.reveal_at((1, 0)), RevealOutcome::Revealed(1));
        assert_eq!(board.reveal_at((0, 1)), RevealOutcome::Won);
        assert_eq!(board.outcome(), Outcome::Won);
    }

    #[test]
    fn cascade_closure_on_random_boards() {
        let config = GameConfig::new(16, 16, 30).unwrap();
        for seed in 0..30 {
            let mut board = RandomMinefieldGenerator::new(seed).generate(config);
            let Some(start) = board
                .cells()
                .find(|(_, cell)| !cell.has_mine() && cell.neighbor_mines() == 0)
                .map(|(coords, _)| coords)
            else {
                continue;
            };

            board.reveal_at(start);

            for (coords, cell) in board.cells() {
                assert!(!(cell.is_revealed() && cell.has_mine()));
                if cell.is_revealed() && cell.neighbor_mines() == 0 {
                    for pos in board.iter_neighbors(coords) {
                        assert!(board.tile_at(pos).is_revealed(), "{pos:?} next to zero {coords:?}");
                    }
                }
                // nothing opens unless it touches an opened zero cell
                if cell.is_revealed() && coords != start {
                    assert!(board.iter_neighbors(coords).any(|pos| {
                        let neighbor = board.tile_at(pos);
                        neighbor.is_revealed() && neighbor.neighbor_mines() == 0
                    }));
                }
            }
            let revealed = board.cells().filter(|(_, cell)| cell.is_revealed()).count();
            assert_eq!(usize::from(board.revealed_count()), revealed);
        }
    }

    #[test]
    fn revealing_mine_loses_without_cascade() {
        let config = GameConfig::new(5, 5, 5).unwrap();
        let mut board = RandomMinefieldGenerator::new(7).generate(config);
        let mine = board
            .cells()
            .find(|(_, cell)| cell.has_mine())
            .map(|(coords, _)| coords)
            .unwrap();

        assert_eq!(board.reveal_at(mine), RevealOutcome::HitMine);
        assert_eq!(board.outcome(), Outcome::Lost);
        assert_eq!(board.detonated(), Some(mine));
        assert_eq!(board.revealed_count(), 0);
        assert_eq!(board.glyph_at(mine), Glyph::Detonated);

        let revealed: Vec<_> = board
            .cells()
            .filter(|(_, cell)| cell.is_revealed())
            .map(|(coords, _)| coords)
            .collect();
        assert_eq!(revealed, [mine]);
    }

    #[test]
    fn mine_free_board_wins_on_first_reveal() {
        for (width, height) in [(1, 1), (4, 4), (9, 3)] {
            let config = GameConfig::new(width, height, 0).unwrap();
            let mut board = RandomMinefieldGenerator::new(3).generate(config);

            assert_eq!(board.reveal_at((width - 1, 0)), RevealOutcome::Won);
            assert_eq!(board.revealed_count(), config.total_cells());
            assert_eq!(board.outcome(), Outcome::Won);
        }
    }

    #[test]
    fn flagged_cell_is_not_revealed() {
        let mut board = board((5, 5), &[(0, 0), (1, 1)]);

        assert_eq!(board.toggle_flag_at((4, 4)), FlagOutcome::Changed);
        assert_eq!(board.reveal_at((4, 4)), RevealOutcome::NoChange);
        assert!(board.tile_at((4, 4)).is_flagged());

        // the cascade goes around the flag
        assert_eq!(board.reveal_at((3, 3)), RevealOutcome::Revealed(20));
        assert!(board.tile_at((4, 4)).is_flagged());

        assert_eq!(board.toggle_flag_at((4, 4)), FlagOutcome::Changed);
        assert!(board.tile_at((4, 4)).is_hidden());
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn flag_on_revealed_cell_is_ignored() {
        let mut board = board((3, 1), &[(0, 0)]);

        board.reveal_at((1, 0));
        assert_eq!(board.toggle_flag_at((1, 0)), FlagOutcome::NoChange);
        assert!(board.tile_at((1, 0)).is_revealed());
        assert_eq!(board.reveal_at((1, 0)), RevealOutcome::NoChange);
    }

    #[test]
    fn flags_are_not_capped() {
        let mut board = board((3, 3), &[(0, 0)]);
        for coords in [(1, 1), (2, 2), (0, 2)] {
            board.toggle_flag_at(coords);
        }
        assert_eq!(board.flag_count(), 3);
        assert_eq!(board.mines_left(), -2);
    }

    #[test]
    fn win_ignores_flags_on_mines() {
        let mut board = board((2, 2), &[(0, 0), (1, 1)]);

        board.toggle_flag_at((0, 0));
        assert_eq!(board.reveal_at((1, 0)), RevealOutcome::Revealed(1));
        assert_eq!(board.reveal_at((0, 1)), RevealOutcome::Won);
        assert!(board.tile_at((1, 1)).is_hidden());
        assert_eq!(board.glyph_at((0, 0)), Glyph::Flag);
        assert_eq!(board.glyph_at((1, 1)), Glyph::Hidden);
    }

    #[test]
    fn finished_game_ignores_commands() {
        let config = GameConfig::new(6, 6, 6).unwrap();
        for seed in 0..10 {
            let mut lost = RandomMinefieldGenerator::new(seed).generate(config);
            let mine = lost.cells().find(|(_, cell)| cell.has_mine()).unwrap().0;
            lost.reveal_at(mine);

            let mut won = RandomMinefieldGenerator::new(seed).generate(config);
            let safe: Vec<_> = won
                .cells()
                .filter(|(_, cell)| !cell.has_mine())
                .map(|(coords, _)| coords)
                .collect();
            for coords in safe {
                won.reveal_at(coords);
            }
            assert_eq!(won.outcome(), Outcome::Won);

            for board in [&mut lost, &mut won] {
                let outcome = board.outcome();
                let before = status_grid(board);
                for y in 0..6 {
                    for x in 0..6 {
                        assert_eq!(board.toggle_flag_at((x, y)), FlagOutcome::NoChange);
                        assert_eq!(board.reveal_at((x, y)), RevealOutcome::NoChange);
                    }
                }
                assert_eq!(status_grid(board), before);
                assert_eq!(board.outcome(), outcome);
            }
        }
    }

    #[test]
    #[should_panic(expected = "outside the")]
    fn out_of_bounds_reveal_panics() {
        let mut board = board((3, 3), &[]);
        board.reveal_at((3, 1));
    }

    #[test]
    #[should_panic(expected = "outside the")]
    fn out_of_bounds_tile_panics() {
        let board = board((3, 3), &[]);
        board.tile_at((0, 3));
    }
}
