//! Hoppers: a one-button obstacle-dodging reflex game.
//!
//! `compute` holds the pure per-tick rules over the data in `entities`;
//! `session` drives them from a `scheduler` and routed `input`.

pub mod compute;
pub mod config;
pub mod entities;
pub mod host;
pub mod input;
pub mod scheduler;
pub mod session;
