//! # Orbcloud Core Library
//!
//! A real-time computation core for animating the electron probability cloud of a
//! hydrogen-like atom: a superposition of quantum eigenstates is evaluated over a
//! spatial grid, time-evolved frame by frame, and streamed to a renderer at a target
//! rate with backpressure and interaction-aware suspension.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`StateSpec`,
//!   `Atom`), pure mathematical routines (special functions, spherical grids), the
//!   per-frame value types (`Scatter`, `Volume`), and the irregular-to-regular
//!   resampling machinery.
//!
//! - **[`engine`]: The Real-Time Core.** This stateful layer carries the frame
//!   stream: a bounded sliding-window `FrameBuffer`, a producer `Worker` thread
//!   that paces itself to buffer occupancy, and a consumer `Scheduler` that pops
//!   frames at a target interval and drives the render callback.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It binds an `Atom` to a grid to produce scatter/volume frame sources
//!   and wires producer, buffer, and scheduler into a running animation. It
//!   provides a simple and powerful entry point for end-users of the library.

pub mod core;
pub mod engine;
pub mod workflows;
