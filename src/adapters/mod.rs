//! Adapter implementations of the port traits.
//!
//! - `live`: real providers, disk and system clock.
//! - `recording`: wrappers that capture port traffic into cassettes.
//! - `replaying`: cassette-backed stand-ins for deterministic tests.

pub mod live;
pub mod recording;
pub mod replaying;
