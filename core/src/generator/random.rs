use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random placement by rejection sampling: draw a column and a row, redraw when the cell already has a mine.
///
/// Same seed and config always give the same minefield. The expected number of draws grows quickly as the mine count
/// approaches the number of cells, which stays acceptable for the densities people actually play.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Board {
        if let Err(err) = config.validate() {
            panic!("cannot generate minefield for {config:?}: {err}");
        }

        let mut cells: Array2<Cell> = Array2::default(config.size().to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;
        let mut draws: u64 = 0;

        while mines_placed < config.mines {
            let coords = (
                rng.random_range(0..config.width),
                rng.random_range(0..config.height),
            );
            draws += 1;

            let cell = &mut cells[coords.to_nd_index()];
            if cell.has_mine() {
                continue;
            }
            cell.plant_mine();
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} in {} draws, seed: {}",
            mines_placed,
            config.width,
            config.height,
            draws,
            self.seed
        );
        Board::from_planted(config.size(), cells, config.mines)
    }
}
