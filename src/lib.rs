//! Replay Judge
//!
//! Server-side anti-cheat validation for a 60-second arena survival
//! minigame. The client submits its full input log alongside the score it
//! claims; this crate re-runs the match deterministically from that log and
//! accepts the score only when the server's own tally agrees.
//!
//! The interesting pieces:
//!
//! - [`game::driver`] replays a gameplay log tick by tick through the
//!   kinematics, spawner, and combat systems
//! - [`anticheat`] wraps the replay in structural checks, an attempt
//!   freshness gate, and tolerance-based score judgment
//! - [`collab`] defines the storage seams for attempt grants and accepted
//!   runs

pub mod anticheat;
pub mod collab;
pub mod config;
pub mod game;
pub mod protocol;
pub mod util;
