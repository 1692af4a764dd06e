// Predictive AI controller with difficulty-scaled aiming error

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};
use tracing::trace;

use super::prediction::predict_ball_impact;
use super::Difficulty;
use crate::controls::seek;
use crate::game::state::sign;
use crate::game::{Direction, GameSnapshot, Player};

const COURT_CENTER: f32 = 0.5;

/// AI paddle controller
///
/// While the ball approaches, the controller predicts the impact point once,
/// adds noise scaled by difficulty and commits to that target for the rest of
/// the approach. When the ball travels away it drifts back to center and
/// re-arms prediction for the next approach.
#[derive(Debug, Clone)]
pub struct AiController {
    player: Player,
    difficulty: Difficulty,
    error_margin: f32,
    target: f32,
    target_acquired: bool,
    rng: ChaCha8Rng,
}

impl AiController {
    pub fn new(player: Player, difficulty: Difficulty) -> Self {
        Self::with_rng(player, difficulty, ChaCha8Rng::from_entropy())
    }

    pub fn with_seed(player: Player, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(player, difficulty, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(player: Player, difficulty: Difficulty, rng: ChaCha8Rng) -> Self {
        Self {
            player,
            difficulty,
            error_margin: difficulty.error_margin(),
            target: COURT_CENTER,
            target_acquired: false,
            rng,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn target_acquired(&self) -> bool {
        self.target_acquired
    }

    pub fn get_direction(&mut self, snapshot: &GameSnapshot) -> Direction {
        let paddle = snapshot.paddle(self.player);
        let ball = &snapshot.ball;
        let receiving = sign(paddle.pos.x - ball.pos.x) == sign(ball.velocity.x);

        if receiving && ball.pos.y != COURT_CENTER && !self.target_acquired {
            // A failed prediction leaves the target alone and retries next frame
            if let Some(impact) = predict_ball_impact(self.player, snapshot) {
                let noise = Uniform::new_inclusive(-self.error_margin, self.error_margin);
                self.target = impact.y + noise.sample(&mut self.rng);
                self.target_acquired = true;
                trace!(
                    "{} AI predicts {:.3}, aiming at {:.3}",
                    self.player.label(),
                    impact.y,
                    self.target
                );
            }
        } else if !receiving {
            self.target = COURT_CENTER;
            self.target_acquired = false;
        }

        seek(paddle.pos.y, self.target, paddle.size.y / 4.0)
    }
}
