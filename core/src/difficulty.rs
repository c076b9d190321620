use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// The three fixed presets offered to players.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::BEGINNER,
            Self::Intermediate => GameConfig::INTERMEDIATE,
            Self::Expert => GameConfig::EXPERT,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }

    /// Preset whose configuration equals `config`, if any.
    pub fn from_config(config: GameConfig) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.config() == config)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_classic_boards() {
        assert_eq!(Difficulty::Beginner.config(), GameConfig::new(9, 9, 10).unwrap());
        assert_eq!(Difficulty::Intermediate.config(), GameConfig::new(16, 16, 40).unwrap());
        assert_eq!(Difficulty::Expert.config(), GameConfig::new(16, 30, 99).unwrap());
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("expert".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert_eq!(" Intermediate ".parse::<Difficulty>().unwrap(), Difficulty::Intermediate);
        assert!(matches!(
            "nightmare".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty(name)) if name == "nightmare"
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>().unwrap(), difficulty);
        }
    }

    #[test]
    fn recognizes_preset_configs() {
        assert_eq!(Difficulty::from_config(GameConfig::EXPERT), Some(Difficulty::Expert));
        assert_eq!(Difficulty::from_config(GameConfig::new(5, 5, 3).unwrap()), None);
    }

    #[test]
    fn serializes_as_lowercase_name() {
        assert_eq!(serde_json::to_string(&Difficulty::Beginner).unwrap(), "\"beginner\"");
    }
}
