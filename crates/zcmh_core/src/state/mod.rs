//! Observable state containers driving the presentation layer.
//!
//! Screens subscribe to controller state and render the latest value;
//! controllers publish after every intent.

pub mod observable;

pub use observable::{Observable, SubscriptionId};
