//! Sand garden library
//!
//! Height field, brushes, rake kinematics and shading for an interactive
//! raked-gravel garden. Re-exports modules for use by binaries and tools.

pub mod brush;
pub mod export;
pub mod garden;
pub mod heightfield;
pub mod palette;
pub mod params;
pub mod rake;
pub mod region;
pub mod render;
pub mod viewer;
