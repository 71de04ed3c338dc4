//! Domain model for journal, alarm and music features.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Journal entries are owned by the store; callers hold transient copies.
//! - Alarm settings and playback state are runtime-only.

pub mod alarm;
pub mod journal;
pub mod music;
