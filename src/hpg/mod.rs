//! Hydraulic Performance Graph data structures.
//!
//! A Hydraulic Performance Graph (HPG) is a precomputed family of
//! flow-indexed backwater curves for one conduit reach. The network
//! simulator interpolates in the table at every timestep instead of
//! repeating the iterative gradually-varied-flow solve.
//!
//! - [`FlowCurve`]: one backwater profile at a fixed flow
//! - [`Hpg`]: the ordered, flow-indexed collection with its query surface

mod curve;
mod table;

pub use curve::{FlowCurve, ProfilePoint};
pub use table::Hpg;
