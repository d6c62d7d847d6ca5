//! A Space-Invaders-style arcade game for DEC-compatible terminals.
//!
//! The simulation is a fixed-timestep state machine: every subsystem reads
//! and writes one shared occupancy surface (`screen`), which doubles as the
//! collision index and the minimal-escape-sequence renderer.  All timing is
//! derived from a frame counter threaded through the per-frame calls, so the
//! whole game can run headlessly against an in-memory writer.

pub mod aliens;
pub mod capabilities;
pub mod engine;
pub mod game;
pub mod missiles;
pub mod options;
pub mod screen;
pub mod shields;
pub mod status;
pub mod turret;
pub mod ufo;
