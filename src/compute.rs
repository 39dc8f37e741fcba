//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the tuning it runs under and, where needed, an RNG
//! handle) and returns a brand-new `GameState`.  Side effects are limited
//! to the injected RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{GameState, Intent, Obstacle, Phase, ScorePopup};

// ── Constructors ─────────────────────────────────────────────────────────────

/// The state shown before the first game: actor parked mid-field, nothing moving.
pub fn init_state(config: &GameConfig) -> GameState {
    GameState {
        phase: Phase::Idle,
        actor_y: config.playfield_height / 2.0,
        velocity_y: 0.0,
        score: 0.0,
        high_score: 0,
        obstacles: Vec::new(),
        score_popups: Vec::new(),
        frame: 0,
    }
}

// ── Intent-driven state transitions (pure) ──────────────────────────────────

/// Begin a fresh session.  Only the high score survives the reset.
/// Ignored while a game is already running.
pub fn start_game(state: &GameState, config: &GameConfig) -> GameState {
    if state.phase == Phase::Playing {
        return state.clone();
    }
    GameState {
        phase: Phase::Playing,
        high_score: state.high_score,
        ..init_state(config)
    }
}

/// Overwrite the vertical velocity with the jump impulse.  No-op unless Playing.
pub fn jump(state: &GameState, config: &GameConfig) -> GameState {
    if state.phase != Phase::Playing {
        return state.clone();
    }
    GameState {
        velocity_y: config.jump_impulse,
        ..state.clone()
    }
}

pub fn apply_intent(state: &GameState, intent: Intent, config: &GameConfig) -> GameState {
    match intent {
        Intent::Start => start_game(state, config),
        Intent::Jump => jump(state, config),
    }
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Whether the actor's square `[actor_y, actor_y + actor_size]` lies entirely
/// inside the obstacle's gap.
pub fn within_gap(actor_y: f64, obstacle: &Obstacle, config: &GameConfig) -> bool {
    actor_y >= obstacle.gap_top
        && actor_y + config.actor_size <= obstacle.gap_top + config.gap_height
}

/// Whether the obstacle's columns touch the actor's fixed column.  Edges count.
pub fn overlaps_actor_column(obstacle: &Obstacle, config: &GameConfig) -> bool {
    !(config.actor_x + config.actor_size < obstacle.x
        || config.actor_x > obstacle.x + config.obstacle_width)
}

/// True when the actor is inside the obstacle's columns but not safely in its gap.
pub fn collides(actor_y: f64, obstacle: &Obstacle, config: &GameConfig) -> bool {
    overlaps_actor_column(obstacle, config) && !within_gap(actor_y, obstacle, config)
}

/// A new obstacle at the right edge with a uniformly drawn gap.
pub fn spawn_obstacle(config: &GameConfig, rng: &mut impl Rng) -> Obstacle {
    Obstacle {
        x: config.playfield_width,
        gap_top: rng.gen_range(config.gap_top_range()),
        passed: false,
    }
}

/// Fold a finished game's score into the high score.
fn settle_high_score(high_score: u32, score: f64) -> u32 {
    high_score.max(score.max(0.0).floor() as u32)
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Outside `Phase::Playing` the state is returned unchanged.  A tick that
/// ends the game still finishes its obstacle and score bookkeeping, but the
/// high score is settled from the score as it stood when the game ended.
pub fn tick(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    if state.phase != Phase::Playing {
        return state.clone();
    }

    let mut phase = Phase::Playing;
    let mut score = state.score;
    let mut high_score = state.high_score;

    // ── 1. Integrate vertical motion ─────────────────────────────────────────
    let velocity_y = state.velocity_y + config.gravity;
    let mut actor_y = state.actor_y + velocity_y;

    // ── 2. Bounds ────────────────────────────────────────────────────────────
    let max_y = config.max_actor_y();
    if actor_y < 0.0 || actor_y > max_y {
        actor_y = actor_y.clamp(0.0, max_y);
        phase = Phase::GameOver;
        high_score = settle_high_score(high_score, score);
    }

    // ── 3. Fade popups ───────────────────────────────────────────────────────
    let mut score_popups: Vec<ScorePopup> = state
        .score_popups
        .iter()
        .map(|p| ScorePopup {
            x: p.x,
            y: p.y - config.popup_rise,
            opacity: p.opacity - config.popup_fade,
        })
        .filter(|p| p.opacity > 0.0)
        .collect();

    // ── 4. Spawn on interval ─────────────────────────────────────────────────
    let frame = state.frame + 1;
    let mut obstacles = state.obstacles.clone();
    if frame % config.spawn_interval == 0 {
        obstacles.push(spawn_obstacle(config, rng));
    }

    // ── 5–6. Scroll, then award obstacles cleared inside the gap ─────────────
    for obstacle in &mut obstacles {
        obstacle.x -= config.obstacle_speed;
        if !obstacle.passed
            && obstacle.x < config.actor_x
            && within_gap(actor_y, obstacle, config)
        {
            obstacle.passed = true;
            score += config.pass_bonus;
            if config.pass_bonus > 0.0 {
                score_popups.push(ScorePopup {
                    x: config.actor_x + config.actor_size,
                    y: actor_y,
                    opacity: 1.0,
                });
            }
        }
    }

    // ── 7. Collision ─────────────────────────────────────────────────────────
    if obstacles.iter().any(|o| collides(actor_y, o, config)) {
        phase = Phase::GameOver;
        high_score = settle_high_score(high_score, score);
    }

    // ── 8. Retire obstacles that have scrolled off ───────────────────────────
    obstacles.retain(|o| o.x >= -config.obstacle_width);

    // ── 9. Time-based score ──────────────────────────────────────────────────
    score += config.score_per_tick;

    GameState {
        phase,
        actor_y,
        velocity_y,
        score,
        high_score,
        obstacles,
        score_popups,
        frame,
    }
}

/// Apply queued intents in arrival order, then advance one tick.
pub fn advance(
    state: &GameState,
    intents: &[Intent],
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    let edited = intents
        .iter()
        .fold(state.clone(), |s, &intent| apply_intent(&s, intent, config));
    tick(&edited, config, rng)
}
