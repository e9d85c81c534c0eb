use super::buffer::FrameBuffer;
use super::error::EngineError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// How long a full-buffer wait sleeps before re-checking the stop flag.
const BACKPRESSURE_POLL: Duration = Duration::from_millis(50);

/// Background frame producer.
///
/// The worker owns a dedicated thread that calls the frame function with a
/// monotonically increasing index and pushes each result into the shared
/// buffer. When the buffer is full the thread parks on the buffer's condvar
/// instead of spinning, so production is paced by consumption. A frame that
/// fails to compute is reported on the error channel and skipped; the stream
/// continues with the next index.
pub struct Worker<T> {
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
    errors: Receiver<EngineError>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Send + 'static> Worker<T> {
    pub fn spawn<F>(buffer: Arc<FrameBuffer<T>>, frame_fn: F) -> Result<Self, EngineError>
    where
        F: Fn(u64) -> Result<T, EngineError> + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let (error_tx, errors) = channel();

        let thread_stop = Arc::clone(&stop);
        let handle = std::thread::Builder::new()
            .name("orbcloud-worker".into())
            .spawn(move || produce(buffer, frame_fn, thread_stop, error_tx))?;

        Ok(Self {
            handle: Some(handle),
            stop,
            errors,
            _marker: std::marker::PhantomData,
        })
    }

    /// Ask the producer thread to exit after its current frame.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Drain errors reported by skipped frames. Never blocks.
    pub fn take_errors(&self) -> Vec<EngineError> {
        self.errors.try_iter().collect()
    }
}

fn produce<T, F>(
    buffer: Arc<FrameBuffer<T>>,
    frame_fn: F,
    stop: Arc<AtomicBool>,
    error_tx: Sender<EngineError>,
) where
    F: Fn(u64) -> Result<T, EngineError>,
{
    let mut index: u64 = 0;
    loop {
        if stop.load(Ordering::SeqCst) || buffer.is_aborted() {
            break;
        }
        if !buffer.wait_while_full(BACKPRESSURE_POLL) {
            continue;
        }
        if stop.load(Ordering::SeqCst) || buffer.is_aborted() {
            break;
        }

        match frame_fn(index) {
            Ok(frame) => {
                if !buffer.push(frame) {
                    break;
                }
            }
            Err(err) => {
                warn!(index, error = %err, "skipping frame that failed to compute");
                // The receiver being gone just means nobody is listening.
                let _ = error_tx.send(err);
            }
        }
        index += 1;
    }
    debug!(frames = index, "producer thread exiting");
}

impl<T> Drop for Worker<T> {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
