use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Ready -> Playing
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Ready, only through a new game
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Board laid out but no mines placed yet
    #[default]
    Ready,
    Playing,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Indicates the game has ended and no moves are accepted anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Represents a game from the empty board to a win or loss.
///
/// Mines are only placed on the first reveal, so the opening move is always safe.
#[derive(Debug)]
pub struct PlayEngine {
    config: GameConfig,
    difficulty: Option<Difficulty>,
    board: Array2<Cell>,
    mines: BTreeSet<Coord2>,
    flagged: BTreeSet<Coord2>,
    revealed: BTreeSet<Coord2>,
    state: EngineState,
    triggered_mine: Option<Coord2>,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    generator: Box<dyn MineGenerator>,
    /// Stands in for `generator` during a game it cannot serve.
    fallback: Option<RandomMineGenerator>,
    clock: Box<dyn Clock>,
}

impl PlayEngine {
    /// Random mines and the wall clock.
    pub fn new(config: GameConfig) -> Self {
        Self::build(config, Box::new(RandomMineGenerator::default()), Box::new(SystemClock))
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(difficulty.config())
    }

    pub fn with_parts(
        config: GameConfig,
        generator: impl MineGenerator + 'static,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        generator.validate_config(config)?;
        Ok(Self::build(config, Box::new(generator), Box::new(clock)))
    }

    fn build(config: GameConfig, generator: Box<dyn MineGenerator>, clock: Box<dyn Clock>) -> Self {
        let mut engine = Self {
            config,
            difficulty: None,
            board: Array2::default(config.size().to_nd_index()),
            mines: BTreeSet::new(),
            flagged: BTreeSet::new(),
            revealed: BTreeSet::new(),
            state: EngineState::Ready,
            triggered_mine: None,
            started_at: None,
            ended_at: None,
            generator,
            fallback: None,
            clock,
        };
        engine.new_game(config);
        engine
    }

    /// Throws away the current game and lays out an empty board for `config`.
    pub fn new_game(&mut self, config: GameConfig) {
        self.fallback = match self.generator.validate_config(config) {
            Ok(()) => None,
            Err(err) => {
                log::warn!("Generator cannot serve {:?} ({}), using random mines", config, err);
                Some(RandomMineGenerator::default())
            }
        };

        self.config = config;
        self.difficulty = Difficulty::from_config(config);
        self.board = Array2::default(config.size().to_nd_index());
        self.mines.clear();
        self.flagged.clear();
        self.revealed.clear();
        self.state = EngineState::Ready;
        self.triggered_mine = None;
        self.started_at = None;
        self.ended_at = None;
        log::debug!(
            "New game {}x{} with {} mines",
            config.rows(),
            config.cols(),
            config.mines()
        );
    }

    /// New game with the same configuration.
    pub fn restart(&mut self) {
        self.new_game(self.config);
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.new_game(difficulty.config());
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Preset matching the active configuration, if it is one.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    /// Empty until the first reveal.
    pub fn mines(&self) -> &BTreeSet<Coord2> {
        &self.mines
    }

    pub fn flagged(&self) -> &BTreeSet<Coord2> {
        &self.flagged
    }

    pub fn revealed(&self) -> &BTreeSet<Coord2> {
        &self.revealed
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(self.view_at(coords))
    }

    pub(crate) fn view_at(&self, coords: Coord2) -> CellView {
        let cell = self.board[coords.to_nd_index()];
        if self.revealed.contains(&coords) {
            match (cell.is_mine, self.triggered_mine == Some(coords)) {
                (true, true) => CellView::Exploded,
                (true, false) => CellView::Mine,
                (false, _) => CellView::Revealed(cell.neighbor_count),
            }
        } else if self.flagged.contains(&coords) {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }

    /// Mines in play: the configured count until they are placed, then the placed count.
    pub fn mine_count(&self) -> usize {
        if self.state.is_ready() {
            usize::from(self.config.mines())
        } else {
            self.mines.len()
        }
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn remaining_mines(&self) -> isize {
        (self.mine_count() as isize) - (self.flagged.len() as isize)
    }

    /// Whole seconds since the first reveal, frozen once the game ends, 0 if it hasn't started
    pub fn elapsed_secs(&self) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let until = self.ended_at.unwrap_or_else(|| self.clock.now());
        let secs = until.saturating_duration_since(started_at).as_secs();
        u32::try_from(secs).unwrap_or(u32::MAX)
    }

    pub fn progress(&self) -> Progress {
        let revealed_safe = self
            .revealed
            .iter()
            .filter(|coords| !self.board[coords.to_nd_index()].is_mine)
            .count();
        Progress::new(
            CellCount::try_from(revealed_safe).unwrap_or(CellCount::MAX),
            CellCount::try_from(self.safe_cell_count()).unwrap_or(CellCount::MAX),
        )
    }

    /// How quick the win was, `None` unless the game is won.
    pub fn speed_rating(&self) -> Option<SpeedRating> {
        matches!(self.state, EngineState::Won)
            .then(|| {
                let mines = CellCount::try_from(self.mine_count()).unwrap_or(CellCount::MAX);
                SpeedRating::rate(self.elapsed_secs(), mines)
            })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_engine(self)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() || self.revealed.contains(&coords) {
            return Ok(MarkOutcome::NoChange);
        }

        if self.flagged.remove(&coords) {
            log::trace!("Unflagged {:?}", coords);
        } else {
            self.flagged.insert(coords);
            log::trace!("Flagged {:?}", coords);
        }
        Ok(MarkOutcome::Changed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished()
            || self.flagged.contains(&coords)
            || self.revealed.contains(&coords)
        {
            return Ok(RevealOutcome::NoChange);
        }

        if self.state.is_ready() {
            self.place_mines(coords);
            self.mark_started();
        }

        if self.board[coords.to_nd_index()].is_mine {
            self.triggered_mine = Some(coords);
            self.revealed.extend(self.mines.iter().copied());
            self.mark_ended(false);
            return Ok(RevealOutcome::HitMine);
        }

        self.flood_fill(coords);

        if self.revealed.len() == self.safe_cell_count() {
            self.mark_ended(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Opens `seed` and, through zero cells, everything connected to it.
    ///
    /// Flagged cells reached this way are opened too and lose their flag.
    fn flood_fill(&mut self, seed: Coord2) {
        let size = self.config.size();
        let mut to_visit = vec![seed];

        while let Some(coords) = to_visit.pop() {
            let cell = self.board[coords.to_nd_index()];
            if cell.is_mine || !self.revealed.insert(coords) {
                log::trace!("Skipping cell at {:?}", coords);
                continue;
            }

            if self.flagged.remove(&coords) {
                log::trace!("Flood opened flagged cell at {:?}", coords);
            }
            log::trace!(
                "Opened cell at {:?}, mine count: {}",
                coords,
                cell.neighbor_count
            );

            if cell.neighbor_count == 0 {
                to_visit.extend(NeighborIter::new(coords, size));
            }
        }
    }

    fn place_mines(&mut self, start: Coord2) {
        let mut layout = match self.fallback.as_mut() {
            Some(fallback) => fallback.generate(self.config, start),
            None => self.generator.generate(self.config, start),
        };
        if layout.size() != self.config.size() {
            log::error!(
                "Generator produced a {:?} board for a {:?} game, using random mines instead",
                layout.size(),
                self.config.size()
            );
            layout = RandomMineGenerator::default().generate(self.config, start);
        }

        self.board = layout.to_board();
        self.mines = layout.mine_coords();
    }

    /// Moves from ready to playing, recording the start time
    fn mark_started(&mut self) {
        if self.state.is_ready() {
            let now = self.clock.now();
            log::debug!("Started at {:?}", now);
            self.started_at = Some(now);
            self.state = EngineState::Playing;
        }
    }

    fn mark_ended(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        let now = self.clock.now();
        self.ended_at = Some(now);
        log::debug!("Ended at {:?}, {:?}", now, self.state);
    }

    /// What a win, and progress towards it, is measured against.
    fn safe_cell_count(&self) -> usize {
        usize::from(self.config.total_cells()).saturating_sub(self.mine_count())
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.config.contains(coords) {
            Ok(coords)
        } else {
            log::debug!("Rejected out of bounds coordinates {:?}", coords);
            Err(GameError::InvalidCoords)
        }
    }
}

impl Default for PlayEngine {
    fn default() -> Self {
        Self::with_difficulty(Difficulty::default())
    }
}
