use rand::Rng;

use crate::game::state::{Ball, GameState, Paddle, COURT_HEIGHT, COURT_WIDTH, WINNING_SCORE};

/// One simulated tick at the 60Hz reference rate corresponds to dt == 1.0.
pub const REFERENCE_TICK_MS: f64 = 16.67;

/// Discrete outcomes of one simulation step, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    WallHit { x: f64, y: f64 },
    PaddleHit { player: u8, x: f64, y: f64 },
    Scored { player: u8, score: u32 },
    GameOver { winner: u8 },
}

/// Advances the match by one tick. `dt` scales ball motion so that variable
/// scheduling delay does not change apparent game speed.
///
/// Order is fixed: integrate, walls, paddle 1, paddle 2, scoring, win check.
pub fn step<R: Rng>(state: &mut GameState, dt: f64, rng: &mut R) -> Vec<TickEvent> {
    let mut events = Vec::new();

    state.ball.x += state.ball.dx * dt;
    state.ball.y += state.ball.dy * dt;

    // Top/bottom walls reflect by the leading edge. No positional
    // correction: any overlap self-corrects next tick via the flipped dy.
    if state.ball.y <= state.ball.radius || state.ball.y >= COURT_HEIGHT - state.ball.radius {
        state.ball.dy = -state.ball.dy;
        events.push(TickEvent::WallHit {
            x: state.ball.x,
            y: state.ball.y,
        });
    }

    // Each paddle only reflects a ball moving toward it, so an overlap that
    // persists across ticks cannot reflect twice.
    if paddle_overlap(&state.ball, &state.paddle1) && state.ball.dx < 0.0 {
        state.ball.dx = -state.ball.dx;
        state.ball.dy += rng.random_range(-1.0..1.0);
        events.push(TickEvent::PaddleHit {
            player: 1,
            x: state.ball.x,
            y: state.ball.y,
        });
    }

    if paddle_overlap(&state.ball, &state.paddle2) && state.ball.dx > 0.0 {
        state.ball.dx = -state.ball.dx;
        state.ball.dy += rng.random_range(-1.0..1.0);
        events.push(TickEvent::PaddleHit {
            player: 2,
            x: state.ball.x,
            y: state.ball.y,
        });
    }

    if state.ball.x < 0.0 {
        state.paddle2.score += 1;
        events.push(TickEvent::Scored {
            player: 2,
            score: state.paddle2.score,
        });
        state.reset_ball(rng);
    } else if state.ball.x > COURT_WIDTH {
        state.paddle1.score += 1;
        events.push(TickEvent::Scored {
            player: 1,
            score: state.paddle1.score,
        });
        state.reset_ball(rng);
    }

    if state.paddle1.score >= WINNING_SCORE {
        state.winner = Some(1);
        state.game_running = false;
        events.push(TickEvent::GameOver { winner: 1 });
    } else if state.paddle2.score >= WINNING_SCORE {
        state.winner = Some(2);
        state.game_running = false;
        events.push(TickEvent::GameOver { winner: 2 });
    }

    events
}

/// AABB overlap between the ball (as a square of side 2*radius) and a paddle.
fn paddle_overlap(ball: &Ball, paddle: &Paddle) -> bool {
    ball.x - ball.radius <= paddle.x + paddle.width
        && ball.x + ball.radius >= paddle.x
        && ball.y - ball.radius <= paddle.y + paddle.height
        && ball.y + ball.radius >= paddle.y
}
