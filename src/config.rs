//! Physics and playfield tuning.
//!
//! Every distance is in playfield units, y growing downward; every rate is
//! per tick.

use std::ops::Range;

use thiserror::Error;

/// Frame rates the terminal host accepts.
pub const FPS_RANGE: std::ops::RangeInclusive<u32> = 1..=240;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("actor size {actor} does not fit through a gap of {gap}")]
    ActorLargerThanGap { actor: f64, gap: f64 },
    #[error("gap of {gap} with margins of {margin} does not fit a playfield {height} high")]
    GapDoesNotFit { gap: f64, margin: f64, height: f64 },
    #[error("actor column {x} lies outside a playfield {width} wide")]
    ActorOffField { x: f64, width: f64 },
    #[error("spawn interval must be at least one tick")]
    ZeroSpawnInterval,
    #[error("frame rate {0} is outside 1..=240")]
    FrameRate(u32),
}

/// Named tuning sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Wide gap, floaty jump.
    Standard,
    /// The first tuning: narrow unmargined gaps, heavy gravity, a strong
    /// jump, denser obstacles and a point per tick instead of pass bonuses.
    Classic,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub playfield_width: f64,
    pub playfield_height: f64,
    /// Side of the actor's square hitbox.
    pub actor_size: f64,
    /// Fixed horizontal position of the actor's left edge.
    pub actor_x: f64,
    pub obstacle_width: f64,
    pub gap_height: f64,
    /// Minimum distance between a gap and the top or bottom edge.
    pub gap_margin: f64,
    pub gravity: f64,
    /// Velocity set (not added) by a jump. Negative is upward.
    pub jump_impulse: f64,
    pub obstacle_speed: f64,
    pub spawn_interval: u64,
    pub score_per_tick: f64,
    pub pass_bonus: f64,
    pub popup_rise: f64,
    pub popup_fade: f64,
}

impl GameConfig {
    pub fn standard() -> Self {
        GameConfig {
            playfield_width: 300.0,
            playfield_height: 300.0,
            actor_size: 30.0,
            actor_x: 50.0,
            obstacle_width: 50.0,
            gap_height: 140.0,
            gap_margin: 50.0,
            gravity: 0.3,
            jump_impulse: -4.5,
            obstacle_speed: 2.0,
            spawn_interval: 150,
            score_per_tick: 0.05,
            pass_bonus: 2.0,
            popup_rise: 1.0,
            popup_fade: 0.02,
        }
    }

    pub fn classic() -> Self {
        GameConfig {
            gap_height: 100.0,
            gap_margin: 0.0,
            gravity: 0.6,
            jump_impulse: -10.0,
            spawn_interval: 100,
            score_per_tick: 1.0,
            pass_bonus: 0.0,
            ..Self::standard()
        }
    }

    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Standard => Self::standard(),
            Preset::Classic => Self::classic(),
        }
    }

    /// Lowest legal `actor_y` (largest value, since y grows downward).
    pub fn max_actor_y(&self) -> f64 {
        self.playfield_height - self.actor_size
    }

    /// Half-open range a freshly spawned gap's top is drawn from.
    pub fn gap_top_range(&self) -> Range<f64> {
        self.gap_margin..self.playfield_height - self.gap_height - self.gap_margin
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.named_values() {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }
        let positive = [
            ("playfield width", self.playfield_width),
            ("playfield height", self.playfield_height),
            ("actor size", self.actor_size),
            ("obstacle width", self.obstacle_width),
            ("gap height", self.gap_height),
            ("obstacle speed", self.obstacle_speed),
            ("gravity", self.gravity),
            ("popup fade", self.popup_fade),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        let non_negative = [
            ("gap margin", self.gap_margin),
            ("score per tick", self.score_per_tick),
            ("pass bonus", self.pass_bonus),
            ("popup rise", self.popup_rise),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.actor_size > self.gap_height {
            return Err(ConfigError::ActorLargerThanGap {
                actor: self.actor_size,
                gap: self.gap_height,
            });
        }
        let range = self.gap_top_range();
        if range.start >= range.end {
            return Err(ConfigError::GapDoesNotFit {
                gap: self.gap_height,
                margin: self.gap_margin,
                height: self.playfield_height,
            });
        }
        if self.actor_x < 0.0 || self.actor_x + self.actor_size > self.playfield_width {
            return Err(ConfigError::ActorOffField {
                x: self.actor_x,
                width: self.playfield_width,
            });
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        Ok(())
    }

    fn named_values(&self) -> [(&'static str, f64); 14] {
        [
            ("playfield width", self.playfield_width),
            ("playfield height", self.playfield_height),
            ("actor size", self.actor_size),
            ("actor x", self.actor_x),
            ("obstacle width", self.obstacle_width),
            ("gap height", self.gap_height),
            ("gap margin", self.gap_margin),
            ("gravity", self.gravity),
            ("jump impulse", self.jump_impulse),
            ("obstacle speed", self.obstacle_speed),
            ("score per tick", self.score_per_tick),
            ("pass bonus", self.pass_bonus),
            ("popup rise", self.popup_rise),
            ("popup fade", self.popup_fade),
        ]
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn validate_fps(fps: u32) -> Result<u32, ConfigError> {
    if FPS_RANGE.contains(&fps) {
        Ok(fps)
    } else {
        Err(ConfigError::FrameRate(fps))
    }
}
