//! # Engine Module
//!
//! This module implements the real-time frame stream of the library: a producer
//! thread computes frames ahead of time, a bounded sliding-window buffer absorbs
//! the rate mismatch, and a paced scheduler delivers frames to the render
//! callback at a target rate.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Validated animation parameters (rate, speed,
//!   masking cutoff, buffer capacity)
//! - **Bounded Buffer** ([`buffer`]) - Thread-safe fixed-capacity FIFO with
//!   sliding-window eviction; the only shared mutable state in the pipeline
//! - **Worker** ([`worker`]) - Background producer pacing itself to buffer
//!   occupancy (backpressure), skipping failed frames without halting
//! - **Scheduler** ([`scheduler`]) - Timer-driven consumer with frame pacing,
//!   interaction-aware suspension, and an instantaneous rate readout
//! - **Events** ([`events`]) - Framework-free stream notifications
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod buffer;
pub mod config;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod worker;
