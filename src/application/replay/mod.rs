//! Historical reconstruction: rebuild per-second snapshots from a recorded
//! delta stream, then fill the seconds nothing happened in.

pub mod engine;
pub mod gap_fill;

pub use engine::{reconstruct, ReconstructionEngine, PRE_START_WINDOW_SECONDS};
pub use gap_fill::{GapFill, GapFillExt};
