use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Decides where mines go once the first cell to open is known.
pub trait MineGenerator: core::fmt::Debug + Send {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> MineLayout;

    /// Rejects configurations this generator cannot produce layouts for.
    fn validate_config(&self, _config: GameConfig) -> Result<()> {
        Ok(())
    }
}
