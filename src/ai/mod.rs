// AI opponents: trajectory prediction and the predictive controller

mod controller;
mod prediction;

pub use controller::AiController;
pub use prediction::{predict_ball_impact, ImpactPrediction};

use serde::{Deserialize, Serialize};

/// AI difficulty, selects how far the AI may aim off the predicted impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Half-width of the uniform noise added to each prediction
    pub fn error_margin(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.12,
            Difficulty::Medium => 0.08,
            Difficulty::Hard => 0.055,
        }
    }

    /// Get display name for difficulty
    pub fn display_name(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Next difficulty in menu order, wrapping around
    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}
