use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::state::{
    Ball, ControlState, GameSnapshot, Paddle, Player, Score, BALL_START, FRAMES_PER_SECOND,
    PAUSE_FRAMES, WIN_SCORE,
};

/// What happens when a pause runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    /// Re-serve the ball, then pause again before play
    Serve,
    /// Let the ball move
    Play,
}

/// Ball lifecycle between goals: goal -> Paused(Serve) -> serve -> Paused(Play) -> Playing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Playing,
    Paused { frames_left: f32, then: Resume },
}

/// Physics events reported by a single `advance` call
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicsEvents {
    pub paddle_collision: bool,
    pub wall_collision: bool,
    pub goal_scored: Option<Player>,
    pub served: bool,
    pub winner: Option<Player>,
}

impl PhysicsEvents {
    pub fn any(&self) -> bool {
        self.paddle_collision
            || self.wall_collision
            || self.goal_scored.is_some()
            || self.served
            || self.winner.is_some()
    }
}

/// The simulation engine. A new `Game` is the only way to reset a match.
#[derive(Debug, Clone)]
pub struct Game {
    ball: Ball,
    paddles: [Paddle; 2],
    winner: Option<Player>,
    phase: Phase,
    rng: ChaCha8Rng,
}

impl Game {
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Reproducible game: the same seed gives the same serves
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: ChaCha8Rng) -> Self {
        let mut ball = Ball::new(BALL_START);
        ball.random_direction(&mut rng);
        debug!(
            "New game, ball direction ({:.3}, {:.3})",
            ball.rect.velocity.x, ball.rect.velocity.y
        );

        Self {
            ball,
            paddles: [Paddle::for_player(Player::P1), Paddle::for_player(Player::P2)],
            winner: None,
            phase: Phase::Playing,
            rng,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[player.index()]
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    pub fn score(&self) -> Score {
        Score {
            p1: self.paddles[0].score,
            p2: self.paddles[1].score,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            ball: (&self.ball.rect).into(),
            p1: (&self.paddles[0].rect).into(),
            p2: (&self.paddles[1].rect).into(),
            winner: self.winner,
            score: self.score(),
        }
    }

    /// Apply this tick's intents. Call before `advance`.
    pub fn update_paddle_directions(&mut self, control_state: &ControlState) {
        for player in Player::ALL {
            self.paddles[player.index()].rect.velocity.y = control_state.get(player).velocity();
        }
    }

    /// Advance the simulation by `elapsed_frames` frame-equivalents (60 = one second)
    pub fn advance(&mut self, elapsed_frames: f32) -> PhysicsEvents {
        let mut events = PhysicsEvents::default();
        if self.winner.is_some() {
            return events;
        }

        let frames = if elapsed_frames.is_finite() {
            elapsed_frames.max(0.0)
        } else {
            0.0
        };
        // A zero tick must not bounce, serve or resume anything
        if frames == 0.0 {
            return events;
        }
        let s = frames / FRAMES_PER_SECOND;

        // Paddles keep moving through the post-goal pause
        for paddle in &mut self.paddles {
            paddle.rect.move_by(s);
        }

        match self.phase {
            Phase::Paused { frames_left, then } if frames_left > 0.0 => {
                self.phase = Phase::Paused {
                    frames_left: (frames_left - frames).max(0.0),
                    then,
                };
                return events;
            }
            Phase::Paused {
                then: Resume::Serve,
                ..
            } => {
                // The ball does not move on the tick it is served
                self.ball.serve(&mut self.rng);
                self.phase = Phase::Paused {
                    frames_left: PAUSE_FRAMES,
                    then: Resume::Play,
                };
                events.served = true;
                debug!(
                    "Ball served ({:.3}, {:.3})",
                    self.ball.rect.velocity.x, self.ball.rect.velocity.y
                );
                return events;
            }
            Phase::Paused {
                then: Resume::Play,
                ..
            } => {
                self.phase = Phase::Playing;
            }
            Phase::Playing => {}
        }

        events.wall_collision = self.ball.move_by(s);

        // P1 is checked first; only one paddle can be hit per tick
        let hit = Player::ALL
            .into_iter()
            .find(|p| self.ball.rect.is_colliding(&self.paddles[p.index()].rect));

        match hit {
            Some(player) => {
                self.ball.paddle_bounce(&self.paddles[player.index()].rect);
                events.paddle_collision = true;
            }
            None => self.check_for_goals(&mut events),
        }

        events
    }

    fn check_for_goals(&mut self, events: &mut PhysicsEvents) {
        let ball_offset_x = self.ball.rect.offset.x;
        let p1 = &self.paddles[0].rect;
        let p2 = &self.paddles[1].rect;
        let p1_goal = p1.pos.x - 2.0 * ball_offset_x - p1.offset.x;
        let p2_goal = p2.pos.x + 2.0 * ball_offset_x + p2.offset.x;

        if self.ball.rect.pos.x < p1_goal {
            self.score_goal(Player::P2, events);
        }
        if self.ball.rect.pos.x > p2_goal {
            self.score_goal(Player::P1, events);
        }
    }

    fn score_goal(&mut self, scorer: Player, events: &mut PhysicsEvents) {
        self.ball.stop();
        self.phase = Phase::Paused {
            frames_left: PAUSE_FRAMES,
            then: Resume::Serve,
        };

        let paddle = &mut self.paddles[scorer.index()];
        paddle.score += 1;
        events.goal_scored = Some(scorer);
        debug!("Goal for {}, score {:?}", scorer.label(), self.score());

        if self.paddles[scorer.index()].score == WIN_SCORE {
            self.winner = Some(scorer);
            events.winner = Some(scorer);
            info!("{} wins {:?}", scorer.label(), self.score());
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::geometry::Vec2;
    use crate::game::state::{Direction, P1_START, P2_START};

    fn idle() -> ControlState {
        ControlState::default()
    }

    /// Put the ball just past the P1 goal line so the next tick scores for P2
    fn force_goal_for_p2(game: &mut Game) -> PhysicsEvents {
        game.ball.rect.pos = Vec2::new(0.0, 0.2);
        game.ball.rect.velocity = Vec2::new(-0.2, 0.0);
        game.advance(1.0)
    }

    fn run_pause(game: &mut Game) {
        for _ in 0..60 {
            let events = game.advance(1.0);
            assert!(!events.served);
        }
    }

    #[test]
    fn test_fresh_game_one_second_without_input() {
        let mut game = Game::with_seed(1);
        let start_velocity = game.ball().rect.velocity;
        assert!((start_velocity.x.abs() - Ball::START_SPEED).abs() < 1e-6);

        for _ in 0..60 {
            game.update_paddle_directions(&idle());
            let events = game.advance(1.0);
            assert!(events.goal_scored.is_none());
        }

        let ball = &game.ball().rect;
        let expected_x = 0.5 + start_velocity.x;
        assert!((ball.pos.x - expected_x).abs() < 1e-3);
        assert_eq!(game.paddle(Player::P1).rect.pos, P1_START);
        assert_eq!(game.paddle(Player::P2).rect.pos, P2_START);
        assert_eq!(game.score(), Score::default());
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_paddles_follow_directions_and_stay_on_court() {
        let mut game = Game::with_seed(2);
        game.update_paddle_directions(&ControlState::new(Direction::Up, Direction::Down));
        game.advance(6.0);
        assert!((game.paddle(Player::P1).rect.pos.y - 0.4).abs() < 1e-5);
        assert!((game.paddle(Player::P2).rect.pos.y - 0.6).abs() < 1e-5);

        for _ in 0..200 {
            game.advance(1.0);
            for player in Player::ALL {
                let r = &game.paddle(player).rect;
                assert!(r.pos.y >= r.y_min && r.pos.y <= r.y_max);
            }
            let b = &game.ball().rect;
            assert!(b.pos.y >= b.y_min && b.pos.y <= b.y_max);
        }
    }

    #[test]
    fn test_goal_pause_serve_pause_rhythm() {
        let mut game = Game::with_seed(3);
        let events = force_goal_for_p2(&mut game);
        assert_eq!(events.goal_scored, Some(Player::P2));
        assert_eq!(game.score(), Score { p1: 0, p2: 1 });
        assert_eq!(game.ball().rect.velocity, Vec2::ZERO);

        // Frozen for the whole pause
        let frozen_at = game.ball().rect.pos;
        for _ in 0..60 {
            game.advance(1.0);
            assert_eq!(game.ball().rect.velocity, Vec2::ZERO);
            assert_eq!(game.ball().rect.pos, frozen_at);
        }

        // Single resume tick re-serves without moving the ball
        let events = game.advance(1.0);
        assert!(events.served);
        assert_eq!(game.ball().rect.pos, BALL_START);
        assert!(game.ball().rect.velocity.x != 0.0);

        // Second pause keeps the served ball at center
        run_pause(&mut game);
        assert_eq!(game.ball().rect.pos, BALL_START);

        // Play resumes
        game.advance(1.0);
        assert!(game.ball().rect.pos != BALL_START);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn test_paddles_move_during_pause() {
        let mut game = Game::with_seed(4);
        force_goal_for_p2(&mut game);
        game.update_paddle_directions(&ControlState::new(Direction::Down, Direction::None));
        let before = game.paddle(Player::P1).rect.pos.y;
        game.advance(3.0);
        assert!(game.paddle(Player::P1).rect.pos.y > before);
        assert!(game.is_paused());
    }

    #[test]
    fn test_paddle_hit_bounces_ball() {
        let mut game = Game::with_seed(5);
        game.ball.rect.pos = Vec2::new(0.062, 0.5);
        game.ball.rect.velocity = Vec2::new(-0.2, 0.0);
        let events = game.advance(1.0);
        assert!(events.paddle_collision);
        assert!(game.ball().rect.velocity.x > 0.2);
        assert!(events.goal_scored.is_none());
    }

    #[test]
    fn test_winner_is_terminal() {
        let mut game = Game::with_seed(6);
        for n in 1..=WIN_SCORE {
            let events = force_goal_for_p2(&mut game);
            assert_eq!(game.score().p2, n);
            if n < WIN_SCORE {
                assert!(events.winner.is_none());
                assert!(game.score().total() < 2 * WIN_SCORE as u16);
                game.phase = Phase::Playing;
            } else {
                assert_eq!(events.winner, Some(Player::P2));
            }
        }
        assert_eq!(game.winner(), Some(Player::P2));

        let before = game.snapshot();
        game.update_paddle_directions(&ControlState::new(Direction::Down, Direction::Up));
        for frames in [0.0, 1.0, 30.0, 1000.0] {
            let events = game.advance(frames);
            assert!(!events.any());
        }
        assert_eq!(game.snapshot().ball, before.ball);
        assert_eq!(game.snapshot().p1.pos, before.p1.pos);
        assert_eq!(game.snapshot().p2.pos, before.p2.pos);
        assert_eq!(game.score(), before.score);
    }

    #[test]
    fn test_zero_and_invalid_elapsed_are_noops() {
        let mut game = Game::with_seed(8);
        game.update_paddle_directions(&ControlState::new(Direction::Down, Direction::Up));
        let before = game.snapshot();
        game.advance(0.0);
        game.advance(-5.0);
        game.advance(f32::NAN);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_zero_tick_leaves_ball_on_wall_alone() {
        let mut game = Game::with_seed(10);
        game.ball.rect.pos.y = game.ball.rect.y_min;
        game.ball.rect.velocity = Vec2::new(0.2, 0.3);
        let before = game.snapshot();

        let events = game.advance(0.0);
        assert!(!events.any());
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.ball().rect.velocity, Vec2::new(0.2, 0.3));
    }

    #[test]
    fn test_zero_tick_does_not_serve() {
        let mut game = Game::with_seed(11);
        force_goal_for_p2(&mut game);
        run_pause(&mut game);
        let frozen_at = game.ball().rect.pos;

        let events = game.advance(0.0);
        assert!(!events.served);
        assert_eq!(game.ball().rect.pos, frozen_at);
        assert_eq!(
            game.phase(),
            Phase::Paused {
                frames_left: 0.0,
                then: Resume::Serve
            }
        );

        assert!(game.advance(1.0).served);
        assert_eq!(game.ball().rect.pos, BALL_START);
    }

    #[test]
    fn test_same_seed_same_match() {
        let mut a = Game::with_seed(42);
        let mut b = Game::with_seed(42);
        for _ in 0..600 {
            a.advance(1.0);
            b.advance(1.0);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_scores_never_decrease() {
        let mut game = Game::with_seed(9);
        let mut last = game.score();
        for _ in 0..20_000 {
            game.advance(2.0);
            let score = game.score();
            assert!(score.p1 >= last.p1 && score.p2 >= last.p2);
            if game.winner().is_none() {
                assert!(score.total() <= 2 * WIN_SCORE as u16 - 1);
            } else {
                assert!(score.p1 == WIN_SCORE || score.p2 == WIN_SCORE);
                assert!(score.p1 != score.p2);
            }
            last = score;
        }
    }
}
