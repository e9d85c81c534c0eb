//! Resampling of irregular probability samples into renderer-facing values.
//!
//! Two paths: [`ScatterSampler`] passes the irregular points straight through as
//! a point cloud; [`VolumeResampler`] interpolates them onto a regular voxel
//! grid via k-nearest-neighbor inverse-distance weights. The volume topology
//! (k-d tree, neighbor indices, weights) is built once per grid resolution and
//! is immutable afterwards, so it can be shared across threads without
//! synchronization; each frame only gathers new values through it.

mod scatter;
mod volume;

pub use scatter::ScatterSampler;
pub use volume::VolumeResampler;
