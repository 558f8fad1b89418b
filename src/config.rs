//! Engine configuration
//!
//! Every tunable number of the engine lives in [`EngineConfig`], built once at startup
//! (defaults or a TOML file) and handed to [`crate::AIEngine`]. Missing keys fall back to
//! the defaults, unknown keys are rejected.
//!
//! ```
//! use gomoku::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     engine_color = "white"
//!
//!     [depth]
//!     shallow = 2
//!     deep = 4
//! "#).unwrap();
//! assert_eq!(config.depth.shallow, 2);
//! assert_eq!(config.depth.empty_threshold, 10);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Stone, BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::eval::PatternWeights;

/// Configuration loading / validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Search depth selection.
///
/// With more than `empty_threshold` empty cells the engine searches `shallow` plies,
/// otherwise `deep` plies. `fixed` overrides both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DepthPolicy {
    pub shallow: i32,
    pub deep: i32,
    pub empty_threshold: usize,
    pub fixed: Option<i32>,
}

impl DepthPolicy {
    pub const SHALLOW_DEPTH: i32 = 4;
    pub const DEEP_DEPTH: i32 = 6;
    /// Empty-cell count above which the shallow depth is used
    pub const EMPTY_CELL_THRESHOLD: usize = 10;

    /// Always search exactly `depth` plies
    pub fn fixed(depth: i32) -> Self {
        Self {
            fixed: Some(depth),
            ..Self::default()
        }
    }

    /// Plies to search on `board`
    pub fn depth_for(&self, board: &Board) -> i32 {
        if let Some(depth) = self.fixed {
            return depth;
        }
        if board.empty_count() > self.empty_threshold {
            self.shallow
        } else {
            self.deep
        }
    }
}

impl Default for DepthPolicy {
    fn default() -> Self {
        Self {
            shallow: Self::SHALLOW_DEPTH,
            deep: Self::DEEP_DEPTH,
            empty_threshold: Self::EMPTY_CELL_THRESHOLD,
            fixed: None,
        }
    }
}

/// Evaluation weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Multiplier `k` of the positional table
    pub positional_scale: f64,
    /// Multiplier `λ` applied to the opponent's total; above 1 biases toward blocking
    pub opponent_factor: f64,
    /// Share of the opponent's gain at a cell counted when ordering moves
    pub defense_factor: f64,
    pub weights: PatternWeights,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            positional_scale: 10.0,
            opponent_factor: 1.1,
            defense_factor: 0.9,
            weights: PatternWeights::DEFAULT,
        }
    }
}

/// Candidate generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderingConfig {
    /// Chebyshev radius around existing stones; 1 keeps only the eight neighbours
    pub radius: u8,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self { radius: 2 }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Side the engine plays and maximizes
    pub engine_color: Stone,
    pub board_size: usize,
    /// Optional wall-clock budget per move. Without it depth is the only bound.
    pub time_limit_ms: Option<u64>,
    pub depth: DepthPolicy,
    pub eval: EvalConfig,
    pub ordering: OrderingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_color: Stone::White,
            board_size: BOARD_SIZE,
            time_limit_ms: None,
            depth: DepthPolicy::default(),
            eval: EvalConfig::default(),
            ordering: OrderingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.engine_color == Stone::Empty {
            return invalid("engine_color must be \"black\" or \"white\"".into());
        }
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return invalid(format!(
                "board_size {} is not between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}",
                self.board_size
            ));
        }
        let depth = &self.depth;
        if depth.shallow < 0 || depth.deep < 0 || depth.fixed.is_some_and(|d| d < 0) {
            return invalid("search depths must not be negative".into());
        }
        if !self.eval.weights.is_descending() {
            return invalid(format!(
                "pattern weights must be positive and strictly descending: {:?}",
                self.eval.weights.ranked()
            ));
        }
        let eval = &self.eval;
        for (name, value) in [
            ("positional_scale", eval.positional_scale),
            ("opponent_factor", eval.opponent_factor),
            ("defense_factor", eval.defense_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be a finite non-negative number, got {value}"));
            }
        }
        if eval.opponent_factor == 0.0 {
            return invalid("opponent_factor must be positive".into());
        }
        if self.ordering.radius == 0 {
            return invalid("ordering radius must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return invalid("time_limit_ms must be positive when set".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine_color, Stone::White);
        assert_eq!(config.depth.shallow, 4);
        assert_eq!(config.depth.deep, 6);
        assert_eq!(config.depth.empty_threshold, 10);
        assert_eq!(config.eval.positional_scale, 10.0);
        assert_eq!(config.eval.opponent_factor, 1.1);
        assert_eq!(config.ordering.radius, 2);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            engine_color = "black"
            time_limit_ms = 250

            [eval]
            opponent_factor = 1.3

            [eval.weights]
            blocked_two = 20.0
            "#,
        )
        .unwrap();
        assert_eq!(config.engine_color, Stone::Black);
        assert_eq!(config.time_limit_ms, Some(250));
        assert_eq!(config.eval.opponent_factor, 1.3);
        assert_eq!(config.eval.weights.blocked_two, 20.0);
        assert_eq!(config.eval.weights.open_two, 200.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = EngineConfig::from_toml_str("depht = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for doc in [
            "engine_color = \"empty\"",
            "board_size = 4",
            "board_size = 19",
            "[ordering]\nradius = 0",
            "[depth]\nshallow = -1",
            "[eval]\nopponent_factor = 0.0",
            "[eval.weights]\nopen_two = 9000.0",
            "time_limit_ms = 0",
        ] {
            let err = EngineConfig::from_toml_str(doc).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{doc}: {err}");
        }
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = EngineConfig::default();
        config.depth.fixed = Some(3);
        config.time_limit_ms = Some(500);
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load("/nonexistent/gomoku.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_adaptive_depth_threshold() {
        let policy = DepthPolicy::default();
        let mut board = Board::with_size(5);
        // 25 empty cells
        assert_eq!(policy.depth_for(&board), 4);

        for i in 0..15u8 {
            board.place_stone(Pos::new(i / 5, i % 5), Stone::Black);
        }
        // exactly 10 empty: not above the threshold
        assert_eq!(policy.depth_for(&board), 6);

        assert_eq!(DepthPolicy::fixed(2).depth_for(&board), 2);
    }
}
