//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so a host can ship a
//! JSON file instead of recompiling. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

/// Play-field and paddle geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    pub width: f32,
    pub height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle's bottom edge and the field bottom
    pub paddle_bottom_gap: f32,
    /// Pixels per tick while a direction is held
    pub paddle_speed: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 450.0,
            paddle_width: 90.0,
            paddle_height: 12.0,
            paddle_bottom_gap: 20.0,
            paddle_speed: 7.0,
        }
    }
}

/// Ball defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    pub radius: f32,
    /// Pixels per tick
    pub speed: f32,
    pub max_balls: usize,
    pub trail_length: usize,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            radius: 8.0,
            speed: 4.0,
            max_balls: 5,
            trail_length: 15,
        }
    }
}

/// Brick grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub columns: usize,
    pub base_rows: usize,
    pub max_rows: usize,
    pub padding: f32,
    pub offset_top: f32,
    pub offset_left: f32,
    pub brick_height: f32,
    /// Depth above which bricks may roll an extra point of health
    pub tough_depth: u32,
    pub tough_chance: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 8,
            base_rows: 5,
            max_rows: 8,
            padding: 5.0,
            offset_top: 40.0,
            offset_left: 30.0,
            brick_height: 20.0,
            tough_depth: 5,
            tough_chance: 0.2,
        }
    }
}

impl GridLayout {
    /// Rows generated for a depth, capped at `max_rows`
    pub fn rows_for_depth(&self, depth: u32) -> usize {
        (self.base_rows + (depth / 2) as usize).min(self.max_rows)
    }

    /// Column width that fills `field_width` between the margins
    pub fn brick_width(&self, field_width: f32) -> f32 {
        let columns = self.columns.max(1) as f32;
        (field_width - 2.0 * self.offset_left - (columns - 1.0) * self.padding) / columns
    }
}

/// Power-up drop and duration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    pub drop_chance: f64,
    pub fall_speed: f32,
    pub size: f32,
    pub widen_factor: f32,
    pub widen_duration_ms: u64,
    pub contract_duration_ms: u64,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            drop_chance: 0.2,
            fall_speed: 2.0,
            size: 20.0,
            widen_factor: 1.5,
            widen_duration_ms: 10_000,
            contract_duration_ms: 5_000,
        }
    }
}

/// Complete tuning set for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field: FieldTuning,
    pub ball: BallTuning,
    pub grid: GridLayout,
    pub powerups: PowerUpTuning,
    pub particles_per_brick: usize,
    pub particle_life_ticks: u32,
    pub starting_lives: u32,
    /// Clearing this depth wins the game. `None` plays forever.
    pub final_depth: Option<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field: FieldTuning::default(),
            ball: BallTuning::default(),
            grid: GridLayout::default(),
            powerups: PowerUpTuning::default(),
            particles_per_brick: 10,
            particle_life_ticks: 60,
            starting_lives: 3,
            final_depth: None,
        }
    }
}

impl Tuning {
    /// Parse a tuning set from JSON. Probabilities outside `[0, 1]` are
    /// rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.check_probabilities()?;
        Ok(tuning)
    }

    fn check_probabilities(&self) -> Result<(), serde_json::Error> {
        let chances = [
            ("powerups.drop_chance", self.powerups.drop_chance),
            ("grid.tough_chance", self.grid.tough_chance),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(<serde_json::Error as serde::de::Error>::custom(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a tuning file, falling back to defaults when it is missing or broken
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 5, "ball": { "speed": 6.0 } }"#)
            .unwrap();
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.ball.speed, 6.0);
        assert_eq!(tuning.ball.radius, 8.0);
        assert_eq!(tuning.grid, GridLayout::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_out_of_range_chance_is_an_error() {
        let err = Tuning::from_json(r#"{ "powerups": { "drop_chance": 1.5 } }"#).unwrap_err();
        assert!(err.to_string().contains("drop_chance"));
        assert!(Tuning::from_json(r#"{ "grid": { "tough_chance": -0.1 } }"#).is_err());
        assert!(Tuning::from_json(r#"{ "powerups": { "drop_chance": 1.0 } }"#).is_ok());
    }

    #[test]
    fn test_out_of_range_file_falls_back() {
        let path = std::env::temp_dir().join(format!(
            "crypto-breakout-tuning-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "starting_lives": 9, "powerups": { "drop_chance": 1.5 } }"#)
            .unwrap();
        let tuning = Tuning::load_or_default(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_rows_for_depth_caps() {
        let layout = GridLayout::default();
        assert_eq!(layout.rows_for_depth(1), 5);
        assert_eq!(layout.rows_for_depth(2), 6);
        assert_eq!(layout.rows_for_depth(6), 8);
        assert_eq!(layout.rows_for_depth(40), 8);
    }

    #[test]
    fn test_brick_width_fills_field() {
        let layout = GridLayout::default();
        // (600 - 60 - 35) / 8
        assert!((layout.brick_width(600.0) - 63.125).abs() < 1e-4);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default(std::path::Path::new("/nonexistent/tuning.json"));
        assert_eq!(tuning, Tuning::default());
    }
}
