use super::buffer::FrameBuffer;
use super::error::EngineError;
use super::events::{EventReporter, StreamEvent};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::debug;

/// The timer thread oversamples the target interval by this factor so the
/// strict elapsed-time gate in [`TickLoop::tick`] converges on the target rate
/// instead of aliasing against it.
const OVERSAMPLING: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    None,
    Until(Instant),
    Forever,
}

/// Shared control surface for a running scheduler: suspension, abort, and the
/// measured delivery rate. Cheap to clone behind an `Arc` and safe to call
/// from any thread, which is what interactive front ends need.
#[derive(Debug)]
pub struct SchedulerControl {
    blocked: Mutex<Block>,
    aborted: AtomicBool,
    rate_bits: AtomicU64,
}

impl SchedulerControl {
    fn new() -> Self {
        Self {
            blocked: Mutex::new(Block::None),
            aborted: AtomicBool::new(false),
            rate_bits: AtomicU64::new(0.0f64.to_bits()),
        }
    }

    /// Suspend frame delivery, indefinitely when `duration` is `None`.
    /// Repeated calls only ever extend the suspension; a shorter deadline
    /// never shortens a longer one already in place.
    pub fn block(&self, duration: Option<Duration>) {
        let mut blocked = self.blocked.lock().unwrap_or_else(PoisonError::into_inner);
        *blocked = match (*blocked, duration) {
            (Block::Forever, _) | (_, None) => Block::Forever,
            (Block::None, Some(d)) => Block::Until(Instant::now() + d),
            (Block::Until(existing), Some(d)) => Block::Until(existing.max(Instant::now() + d)),
        };
    }

    /// Lift any suspension, timed or indefinite.
    pub fn unblock(&self) {
        *self.blocked.lock().unwrap_or_else(PoisonError::into_inner) = Block::None;
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    fn is_blocked(&self, now: Instant) -> bool {
        let mut blocked = self.blocked.lock().unwrap_or_else(PoisonError::into_inner);
        match *blocked {
            Block::None => false,
            Block::Forever => true,
            Block::Until(deadline) => {
                if now < deadline {
                    true
                } else {
                    *blocked = Block::None;
                    false
                }
            }
        }
    }

    /// Instantaneous delivery rate in frames per second, measured from the
    /// spacing of the last two delivered frames. Zero before the second frame.
    pub fn frame_rate(&self) -> f64 {
        f64::from_bits(self.rate_bits.load(Ordering::Relaxed))
    }

    fn record_rate(&self, rate: f64) {
        self.rate_bits.store(rate.to_bits(), Ordering::Relaxed);
    }
}

/// The pure pacing logic of the consumer side, separated from the timer thread
/// that drives it so the gating rules can be tested with synthetic clocks.
///
/// Each call to [`tick`](Self::tick) observes `now` and delivers at most one
/// frame: suspension and abort are checked first, then the elapsed-time gate
/// (`now - last_delivery >= interval`), then a non-blocking pop. An empty
/// buffer simply skips the tick; the wall-clock schedule is not disturbed.
pub struct TickLoop<T, F> {
    buffer: Arc<FrameBuffer<T>>,
    control: Arc<SchedulerControl>,
    callback: F,
    interval: Duration,
    last_delivery: Option<Instant>,
    index: u64,
    reporter: EventReporter,
}

impl<T, F> TickLoop<T, F>
where
    F: FnMut(T, u64),
{
    pub fn new(
        buffer: Arc<FrameBuffer<T>>,
        control: Arc<SchedulerControl>,
        callback: F,
        interval: Duration,
        reporter: EventReporter,
    ) -> Self {
        Self {
            buffer,
            control,
            callback,
            interval,
            last_delivery: None,
            index: 0,
            reporter,
        }
    }

    /// Returns `true` when a frame was delivered on this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.control.is_aborted() || self.control.is_blocked(now) {
            return false;
        }
        if let Some(last) = self.last_delivery {
            if now.duration_since(last) < self.interval {
                return false;
            }
        }
        let Some(frame) = self.buffer.pop() else {
            return false;
        };

        (self.callback)(frame, self.index);
        if let Some(last) = self.last_delivery {
            let elapsed = now.duration_since(last).as_secs_f64();
            if elapsed > 0.0 {
                self.control.record_rate(1.0 / elapsed);
            }
        }
        self.last_delivery = Some(now);
        self.reporter.report(StreamEvent::Step { index: self.index });
        self.index += 1;
        true
    }

    pub fn frames_delivered(&self) -> u64 {
        self.index
    }
}

/// Timer-driven consumer. Owns a thread that ticks the [`TickLoop`] at a
/// fraction of the target interval until aborted.
pub struct Scheduler {
    control: Arc<SchedulerControl>,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn spawn<T, F>(
        buffer: Arc<FrameBuffer<T>>,
        callback: F,
        interval: Duration,
        reporter: EventReporter,
    ) -> Result<Self, EngineError>
    where
        T: Send + 'static,
        F: FnMut(T, u64) + Send + 'static,
    {
        if interval.is_zero() {
            return Err(EngineError::InvalidRate { fps: f64::INFINITY });
        }
        let control = Arc::new(SchedulerControl::new());
        let mut ticks = TickLoop::new(buffer, Arc::clone(&control), callback, interval, reporter);
        let period = interval / OVERSAMPLING;

        let thread_control = Arc::clone(&control);
        let handle = std::thread::Builder::new()
            .name("orbcloud-scheduler".into())
            .spawn(move || {
                while !thread_control.is_aborted() {
                    ticks.tick(Instant::now());
                    std::thread::sleep(period);
                }
                debug!(frames = ticks.frames_delivered(), "scheduler thread exiting");
            })?;

        Ok(Self {
            control,
            handle: Some(handle),
        })
    }

    pub fn control(&self) -> Arc<SchedulerControl> {
        Arc::clone(&self.control)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.control.abort();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
