use crate::engine::buffer::FrameBuffer;
use crate::engine::config::AnimationConfig;
use crate::engine::error::EngineError;
use crate::engine::events::EventReporter;
use crate::engine::scheduler::{Scheduler, SchedulerControl};
use crate::engine::worker::Worker;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Where delivered frames go. `draw` receives the first frame so a renderer
/// can set up axes or allocate buffers; every later frame arrives via
/// `update`.
pub trait RenderSink<T>: Send {
    fn draw(&mut self, frame: &T, index: u64);
    fn update(&mut self, frame: &T, index: u64);
}

/// A running animation: producer thread, bounded buffer, and paced consumer.
/// Dropping the handle tears the whole stream down and joins both threads.
pub struct AnimationHandle<T> {
    buffer: Arc<FrameBuffer<T>>,
    control: Arc<SchedulerControl>,
    worker: Worker<T>,
    // Field order matters: the scheduler must drop (and join) before the
    // buffer it reads from is torn down.
    _scheduler: Scheduler,
}

impl<T: Send + 'static> AnimationHandle<T> {
    /// Suspend frame delivery, indefinitely when `duration` is `None`.
    /// Production continues until the buffer fills, so resuming is instant.
    ///
    /// Interactive front ends call this from input handlers, e.g. a short
    /// suspension (tens of milliseconds) while dragging or scrolling and an
    /// indefinite one while minimized. Repeated calls only ever extend the
    /// suspension deadline.
    pub fn block(&self, duration: Option<Duration>) {
        self.control.block(duration);
    }

    pub fn unblock(&self) {
        self.control.unblock();
    }

    /// Stop both threads cooperatively. Idempotent.
    pub fn abort(&self) {
        self.control.abort();
        self.buffer.abort();
        self.worker.stop();
    }

    pub fn is_aborted(&self) -> bool {
        self.control.is_aborted()
    }

    /// Measured delivery rate in frames per second.
    pub fn frame_rate(&self) -> f64 {
        self.control.frame_rate()
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Errors from frames the producer skipped. Never blocks.
    pub fn take_errors(&self) -> Vec<EngineError> {
        self.worker.take_errors()
    }
}

impl<T> Drop for AnimationHandle<T> {
    fn drop(&mut self) {
        self.control.abort();
        self.buffer.abort();
    }
}

/// Wire a frame function to a render sink through the full engine stack.
///
/// The frame function is called with a monotone index on the producer thread;
/// map it to simulated time with [`AnimationConfig::simulated_time`]. The sink
/// runs on the scheduler thread at the configured rate.
#[instrument(skip_all, fields(fps = config.fps, capacity = config.buffer_capacity))]
pub fn start_animation<T, F, S>(
    frame_fn: F,
    config: AnimationConfig,
    mut sink: S,
    reporter: EventReporter,
) -> Result<AnimationHandle<T>, EngineError>
where
    T: Send + 'static,
    F: Fn(u64) -> Result<T, EngineError> + Send + 'static,
    S: RenderSink<T> + 'static,
{
    config.validate()?;
    info!("starting animation stream");

    let buffer = Arc::new(FrameBuffer::with_reporter(
        config.buffer_capacity,
        reporter.clone(),
    )?);
    let worker = Worker::spawn(Arc::clone(&buffer), frame_fn)?;

    let mut first = true;
    let scheduler = Scheduler::spawn(
        Arc::clone(&buffer),
        move |frame: T, index| {
            if first {
                sink.draw(&frame, index);
                first = false;
            } else {
                sink.update(&frame, index);
            }
        },
        config.frame_interval(),
        reporter,
    )?;
    let control = scheduler.control();

    Ok(AnimationHandle {
        buffer,
        control,
        worker,
        _scheduler: scheduler,
    })
}
