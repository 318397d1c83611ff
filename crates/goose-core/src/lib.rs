//! Client-side derivations for the goose-tap game.
//!
//! Nothing in this crate performs I/O. Every function takes the current
//! instant explicitly so the same derivation can be driven by a live
//! [`ClockTicker`] or by a fixed instant in tests.
//!
//! # Modules
//!
//! - [`format`] -- `MM:SS` countdowns and `DD.MM.YYYY, HH:MM:SS` timestamps
//! - [`phase`] -- [`RoundPhase`], computed from wall-clock time and round bounds
//! - [`view`] -- Round screen and round list derivations, winner selection
//! - [`ticker`] -- One-second clock that drives re-derivation

pub mod format;
pub mod phase;
pub mod ticker;
pub mod view;

pub use format::{format_duration, format_timestamp, format_timestamp_in};
pub use phase::RoundPhase;
pub use ticker::{ClockTicker, DEFAULT_TICK};
pub use view::{RoundRow, RoundScreen, winner};
