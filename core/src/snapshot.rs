use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// How far the player is towards uncovering every safe cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub revealed_safe: CellCount,
    pub total_safe: CellCount,
}

impl Progress {
    pub const fn new(revealed_safe: CellCount, total_safe: CellCount) -> Self {
        Self {
            revealed_safe,
            total_safe,
        }
    }

    pub const fn remaining(&self) -> CellCount {
        self.total_safe.saturating_sub(self.revealed_safe)
    }

    pub fn fraction(&self) -> f64 {
        if self.total_safe == 0 {
            0.0
        } else {
            f64::from(self.revealed_safe) / f64::from(self.total_safe)
        }
    }

    /// Rounded to the nearest whole percent.
    pub fn percent(&self) -> u8 {
        (self.fraction() * 100.0).round().clamp(0.0, 100.0) as u8
    }

    pub const fn is_complete(&self) -> bool {
        self.total_safe > 0 && self.revealed_safe >= self.total_safe
    }
}

/// Verdict on how quickly a game was won, relative to its mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedRating {
    /// Under two seconds per mine
    LightningFast,
    /// Under four seconds per mine
    Great,
    /// Under eight seconds per mine
    WellDone,
    Completed,
}

impl SpeedRating {
    pub fn rate(elapsed_secs: u32, mines: CellCount) -> Self {
        let elapsed = u64::from(elapsed_secs);
        let mines = u64::from(mines);
        if elapsed < mines * 2 {
            Self::LightningFast
        } else if elapsed < mines * 4 {
            Self::Great
        } else if elapsed < mines * 8 {
            Self::WellDone
        } else {
            Self::Completed
        }
    }
}

/// Owned copy of everything a front end needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: EngineState,
    pub config: GameConfig,
    pub difficulty: Option<Difficulty>,
    pub cells: Array2<CellView>,
    pub mines: Vec<Coord2>,
    pub flagged: Vec<Coord2>,
    pub revealed: Vec<Coord2>,
    pub triggered_mine: Option<Coord2>,
    pub remaining_mines: isize,
    pub elapsed_secs: u32,
    pub progress: Progress,
}

impl GameSnapshot {
    pub fn from_engine(engine: &PlayEngine) -> Self {
        let cells = Array2::from_shape_fn(engine.board().dim(), |(row, col)| {
            engine.view_at((row as Coord, col as Coord))
        });

        Self {
            state: engine.state(),
            config: engine.config(),
            difficulty: engine.difficulty(),
            cells,
            mines: engine.mines().iter().copied().collect(),
            flagged: engine.flagged().iter().copied().collect(),
            revealed: engine.revealed().iter().copied().collect(),
            triggered_mine: engine.triggered_mine(),
            remaining_mines: engine.remaining_mines(),
            elapsed_secs: engine.elapsed_secs(),
            progress: engine.progress(),
        }
    }

    /// Mine counter as shown to the player, never below zero.
    pub fn display_remaining_mines(&self) -> usize {
        usize::try_from(self.remaining_mines).unwrap_or(0)
    }

    pub fn cell_view(&self, (row, col): Coord2) -> Option<CellView> {
        self.cells.get([usize::from(row), usize::from(col)]).copied()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_math() {
        let progress = Progress::new(20, 71);
        assert_eq!(progress.remaining(), 51);
        assert_eq!(progress.percent(), 28);
        assert!(!progress.is_complete());

        assert_eq!(Progress::new(0, 0).fraction(), 0.0);
        assert!(!Progress::new(0, 0).is_complete());
        assert!(Progress::new(71, 71).is_complete());
        assert_eq!(Progress::new(71, 71).percent(), 100);
    }

    #[test]
    fn speed_rating_thresholds() {
        assert_eq!(SpeedRating::rate(19, 10), SpeedRating::LightningFast);
        assert_eq!(SpeedRating::rate(20, 10), SpeedRating::Great);
        assert_eq!(SpeedRating::rate(39, 10), SpeedRating::Great);
        assert_eq!(SpeedRating::rate(40, 10), SpeedRating::WellDone);
        assert_eq!(SpeedRating::rate(79, 10), SpeedRating::WellDone);
        assert_eq!(SpeedRating::rate(80, 10), SpeedRating::Completed);
    }

    #[test]
    fn snapshot_mirrors_engine() {
        let generator = FixedMineGenerator::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
        let config = GameConfig::new(3, 3, 1).unwrap();
        let mut engine = PlayEngine::with_parts(config, generator, ManualClock::new()).unwrap();
        engine.toggle_flag((0, 0)).unwrap();
        engine.toggle_flag((0, 1)).unwrap();

        let snapshot = engine.snapshot();

        assert_eq!(snapshot.state, EngineState::Ready);
        assert_eq!(snapshot.cells.dim(), (3, 3));
        assert_eq!(snapshot.cell_view((0, 1)), Some(CellView::Flagged));
        assert_eq!(snapshot.cell_view((2, 2)), Some(CellView::Hidden));
        assert_eq!(snapshot.cell_view((3, 0)), None);
        assert_eq!(snapshot.remaining_mines, -1);
        assert_eq!(snapshot.display_remaining_mines(), 0);
        assert_eq!(snapshot.flagged, vec![(0, 0), (0, 1)]);
        assert!(snapshot.mines.is_empty());
    }

    #[test]
    fn snapshot_encodes_to_json() {
        let engine = PlayEngine::new(GameConfig::BEGINNER);

        let json = engine.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["state"], "Ready");
        assert_eq!(value["difficulty"], "beginner");
        assert_eq!(value["config"]["mines"], 10);
        assert_eq!(value["elapsed_secs"], 0);
    }
}
