//! # Workflows Module
//!
//! High-level orchestration tying the core numerics to the engine stream:
//! build a precomputed frame pipeline for an atom, then run it through the
//! producer/buffer/scheduler stack against a render sink.
//!
//! ## Architecture
//!
//! - **Pipeline** ([`pipeline`]) - Per-atom precomputation: bound probability
//!   function plus scatter and volume frame sources
//! - **Animation** ([`animate`]) - The render-facing entry point: a frame
//!   function, a validated configuration, and a [`animate::RenderSink`]

pub mod animate;
pub mod pipeline;

pub use animate::{start_animation, AnimationHandle, RenderSink};
pub use pipeline::{build_pipeline, Pipeline, PipelineError, ScatterSource, VolumeSource};
