// Trajectory prediction for the AI controller

use crate::game::state::sign;
use crate::game::{GameSnapshot, Player};

/// Where the ball is expected to cross a paddle's x-position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactPrediction {
    /// Predicted y-position at impact
    pub y: f32,
    /// Sign of the ball's y-velocity at impact
    pub direction_y: f32,
}

/// Predict the ball's y-position when it reaches `player`'s paddle
///
/// Wall bounces are folded in closed form: the vertical travel is split into
/// whole court heights and a remainder. Two whole traversals leave position
/// and direction unchanged, so only the remainder and the parity of the whole
/// part matter. Bounces are treated as happening at the wall itself rather
/// than at the ball's half-height, which keeps the AI slightly imperfect.
///
/// Returns None if the ball has no horizontal speed (it will never arrive) or
/// the inputs produce a non-finite result.
pub fn predict_ball_impact(player: Player, snapshot: &GameSnapshot) -> Option<ImpactPrediction> {
    let paddle = snapshot.paddle(player);
    let ball = &snapshot.ball;
    let x_speed = ball.velocity.x;
    let mut y_speed = ball.velocity.y;
    let ball_y = ball.pos.y;

    if x_speed == 0.0 {
        return None;
    }

    let x_dist = (ball.pos.x - paddle.pos.x).abs();
    let y_dist = (y_speed * x_dist / x_speed).abs();
    if !y_dist.is_finite() {
        return None;
    }

    let y_int = y_dist.floor();
    let y_frac = y_dist - y_int;

    // Distance to the wall the ball is heading for
    let wall_dist = if sign(y_speed) < 0.0 {
        ball_y
    } else {
        1.0 - ball_y
    };

    let mut t = if y_frac < wall_dist {
        ball_y + sign(y_speed) * y_frac
    } else {
        let reflected = if sign(y_speed) < 0.0 {
            y_frac - wall_dist
        } else {
            1.0 - (y_frac - wall_dist)
        };
        y_speed *= -1.0;
        reflected
    };

    // An odd number of whole traversals flips the direction
    if y_int > 0.0 && y_int % 2.0 == 1.0 {
        y_speed = -y_speed;
    }
    if y_int == 1.0 {
        t = 1.0 - t;
    }

    if !t.is_finite() {
        return None;
    }

    Some(ImpactPrediction {
        y: t,
        direction_y: sign(y_speed),
    })
}
