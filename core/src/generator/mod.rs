use crate::*;
pub use random::*;

mod random;

/// Decides where the mines go and builds a ready-to-play board.
pub trait MinefieldGenerator {
    /// # Panics
    ///
    /// If `config` does not pass [`GameConfig::validate`].
    fn generate(self, config: GameConfig) -> Board;
}
