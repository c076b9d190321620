use super::*;

/// Generation strategy that ignores the starting cell and always hands out the same layout.
///
/// Useful for replaying a recorded game or for setting up a known board.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    layout: MineLayout,
}

impl FixedMineGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::new)
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> MineLayout {
        if self.layout.mine_count() != config.mines() {
            log::error!(
                "Fixed layout has {} mines but the game expects {}, using the layout as is",
                self.layout.mine_count(),
                config.mines()
            );
        }
        if self.layout.contains_mine(start) {
            log::debug!("Fixed layout places a mine under the first reveal at {:?}", start);
        }
        self.layout.clone()
    }

    fn validate_config(&self, config: GameConfig) -> Result<()> {
        if self.layout.size() != config.size() {
            return Err(GameError::InvalidBoardShape);
        }
        if self.layout.mine_count() != config.mines() {
            return Err(GameError::MineCountMismatch {
                layout: self.layout.mine_count(),
                config: config.mines(),
            });
        }
        Ok(())
    }
}
