//! Decision providers for non-player agents.

pub mod ai;
