//! All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    GameOver,
}

/// A normalized user input consumed by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Start,
    Jump,
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// A top/bottom wall pair with a passable gap between them.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    /// Left edge, in playfield units. Decreases every tick.
    pub x: f64,
    /// Top of the gap; fixed at spawn.
    pub gap_top: f64,
    /// Set once the actor clears the obstacle's leading edge inside the gap.
    pub passed: bool,
}

/// Floating "+2" marker left behind when an obstacle is passed.
#[derive(Clone, Debug, PartialEq)]
pub struct ScorePopup {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub phase: Phase,
    pub actor_y: f64,
    pub velocity_y: f64,
    pub score: f64,
    /// Highest floored score reached this process lifetime.
    pub high_score: u32,
    /// Spawn order, which is also left-to-right screen order.
    pub obstacles: Vec<Obstacle>,
    pub score_popups: Vec<ScorePopup>,
    /// Ticks since the current Playing session started.
    pub frame: u64,
}

impl GameState {
    /// Score as shown to the player.
    pub fn display_score(&self) -> u32 {
        self.score.max(0.0).floor() as u32
    }
}
