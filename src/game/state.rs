use rand::Rng;
use serde::Serialize;

// Court geometry is shared implicitly with clients; both sides must agree.
pub const COURT_WIDTH: f64 = 800.0;
pub const COURT_HEIGHT: f64 = 400.0;
pub const PADDLE_WIDTH: f64 = 10.0;
pub const PADDLE_HEIGHT: f64 = 100.0;
pub const BALL_RADIUS: f64 = 8.0;
pub const WINNING_SCORE: u32 = 5;

pub const PADDLE1_X: f64 = 20.0;
pub const PADDLE2_X: f64 = 770.0;
pub const SERVE_SPEED: f64 = 5.0;

#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Paddle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub score: u32,
}

impl Paddle {
    fn new(x: f64) -> Self {
        Self {
            x,
            y: 150.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            score: 0,
        }
    }
}

/// Authoritative match state; clients only mirror it for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub ball: Ball,
    pub paddle1: Paddle,
    pub paddle2: Paddle,
    pub game_running: bool,
    pub winner: Option<u8>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            ball: Ball {
                x: COURT_WIDTH / 2.0,
                y: COURT_HEIGHT / 2.0,
                dx: 5.0,
                dy: 3.0,
                radius: BALL_RADIUS,
            },
            paddle1: Paddle::new(PADDLE1_X),
            paddle2: Paddle::new(PADDLE2_X),
            game_running: false,
            winner: None,
        }
    }

    /// Recenters the ball and serves it with a random sign on dx and a
    /// uniform vertical component in [-3, 3).
    pub fn reset_ball<R: Rng>(&mut self, rng: &mut R) {
        self.ball.x = COURT_WIDTH / 2.0;
        self.ball.y = COURT_HEIGHT / 2.0;
        self.ball.dx = if rng.random_bool(0.5) {
            SERVE_SPEED
        } else {
            -SERVE_SPEED
        };
        self.ball.dy = rng.random_range(-3.0..3.0);
    }
}
