use super::error::EngineError;
use super::events::{EventReporter, StreamEvent};
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Thread-safe fixed-capacity FIFO of computed frames.
///
/// `push` on a full buffer evicts the oldest entry, so the capacity acts as a
/// sliding window over the most recent frames rather than a hard stop. This is
/// the only shared mutable state between the producer and consumer sides;
/// every operation takes the lock once and never holds it across user code.
#[derive(Debug)]
pub struct FrameBuffer<T> {
    state: Mutex<BufferState<T>>,
    slot_freed: Condvar,
    capacity: usize,
    reporter: EventReporter,
}

#[derive(Debug)]
struct BufferState<T> {
    queue: VecDeque<T>,
    aborted: bool,
}

impl<T> FrameBuffer<T> {
    pub fn new(capacity: usize) -> Result<Self, EngineError> {
        Self::with_reporter(capacity, EventReporter::new())
    }

    pub fn with_reporter(capacity: usize, reporter: EventReporter) -> Result<Self, EngineError> {
        if capacity == 0 {
            return Err(EngineError::InvalidCapacity);
        }
        Ok(Self {
            state: Mutex::new(BufferState {
                queue: VecDeque::with_capacity(capacity),
                aborted: false,
            }),
            slot_freed: Condvar::new(),
            capacity,
            reporter,
        })
    }

    fn lock(&self) -> MutexGuard<'_, BufferState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lock().queue.len() >= self.capacity
    }

    pub fn is_aborted(&self) -> bool {
        self.lock().aborted
    }

    /// Append a frame, evicting the oldest entry when full. Returns `false`
    /// (and discards the value) if the buffer was aborted, so a producer can
    /// notice an abort that raced with an in-flight computation.
    pub fn push(&self, value: T) -> bool {
        {
            let mut state = self.lock();
            if state.aborted {
                return false;
            }
            if state.queue.len() >= self.capacity {
                state.queue.pop_front();
            }
            state.queue.push_back(value);
        }
        self.reporter.report(StreamEvent::FramePushed);
        true
    }

    /// Remove and return the oldest frame. An empty buffer is a defined
    /// outcome, not an error; this never blocks.
    pub fn pop(&self) -> Option<T> {
        let value = self.lock().queue.pop_front();
        if value.is_some() {
            self.slot_freed.notify_all();
            self.reporter.report(StreamEvent::FramePopped);
        }
        value
    }

    /// Discard every queued frame.
    pub fn clear(&self) {
        self.lock().queue.clear();
        self.slot_freed.notify_all();
        self.reporter.report(StreamEvent::BufferCleared);
    }

    /// Permanently wake all waiters and reject future pushes. Queued frames
    /// remain poppable so the consumer can drain.
    pub fn abort(&self) {
        self.lock().aborted = true;
        self.slot_freed.notify_all();
    }

    /// Producer-side backpressure: block while the buffer is full, up to
    /// `timeout`. Returns `true` once a slot is free or the buffer is aborted,
    /// `false` on timeout (callers re-check their own stop conditions and
    /// wait again).
    pub fn wait_while_full(&self, timeout: Duration) -> bool {
        let mut state = self.lock();
        while state.queue.len() >= self.capacity && !state.aborted {
            let (guard, result) = self
                .slot_freed
                .wait_timeout(state, timeout)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
            if result.timed_out() {
                return state.queue.len() < self.capacity || state.aborted;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn rejects_zero_capacity() {
        assert!(matches!(
            FrameBuffer::<u32>::new(0),
            Err(EngineError::InvalidCapacity)
        ));
    }

    #[test]
    fn pop_on_empty_returns_none_without_blocking() {
        let buffer = FrameBuffer::<u32>::new(3).unwrap();
        assert_eq!(buffer.pop(), None);
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn preserves_fifo_order() {
        let buffer = FrameBuffer::new(4).unwrap();
        for i in 0..4 {
            assert!(buffer.push(i));
        }
        assert_eq!(buffer.pop(), Some(0));
        assert_eq!(buffer.pop(), Some(1));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn overfilling_keeps_the_latest_capacity_frames() {
        let buffer = FrameBuffer::new(3).unwrap();
        for i in 0..10 {
            buffer.push(i);
            assert!(buffer.len() <= buffer.capacity());
        }
        assert_eq!(buffer.pop(), Some(7));
        assert_eq!(buffer.pop(), Some(8));
        assert_eq!(buffer.pop(), Some(9));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn clear_discards_everything() {
        let buffer = FrameBuffer::new(3).unwrap();
        buffer.push(1);
        buffer.push(2);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn push_after_abort_is_rejected_but_drain_still_works() {
        let buffer = FrameBuffer::new(3).unwrap();
        buffer.push(1);
        buffer.abort();
        assert!(!buffer.push(2));
        assert_eq!(buffer.pop(), Some(1));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn wait_while_full_returns_immediately_when_space_exists() {
        let buffer = FrameBuffer::<u32>::new(2).unwrap();
        buffer.push(1);
        assert!(buffer.wait_while_full(Duration::from_millis(1)));
    }

    #[test]
    fn wait_while_full_wakes_on_pop() {
        let buffer = Arc::new(FrameBuffer::new(1).unwrap());
        buffer.push(0);

        let waiter = Arc::clone(&buffer);
        let handle = std::thread::spawn(move || waiter.wait_while_full(Duration::from_secs(5)));

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(buffer.pop(), Some(0));
        assert!(handle.join().unwrap());
    }

    #[test]
    fn wait_while_full_wakes_on_abort() {
        let buffer = Arc::new(FrameBuffer::new(1).unwrap());
        buffer.push(0);

        let waiter = Arc::clone(&buffer);
        let handle = std::thread::spawn(move || waiter.wait_while_full(Duration::from_secs(5)));

        std::thread::sleep(Duration::from_millis(30));
        buffer.abort();
        assert!(handle.join().unwrap());
    }

    #[test]
    fn events_are_reported_for_push_pop_clear() {
        let pushes = Arc::new(AtomicUsize::new(0));
        let pops = Arc::new(AtomicUsize::new(0));
        let clears = Arc::new(AtomicUsize::new(0));
        let (p, o, c) = (Arc::clone(&pushes), Arc::clone(&pops), Arc::clone(&clears));

        let reporter = EventReporter::with_callback(move |ev| {
            match ev {
                StreamEvent::FramePushed => p.fetch_add(1, Ordering::SeqCst),
                StreamEvent::FramePopped => o.fetch_add(1, Ordering::SeqCst),
                StreamEvent::BufferCleared => c.fetch_add(1, Ordering::SeqCst),
                StreamEvent::Step { .. } => 0,
            };
        });

        let buffer = FrameBuffer::with_reporter(4, reporter).unwrap();
        buffer.push(1);
        buffer.push(2);
        buffer.pop();
        buffer.clear();

        assert_eq!(pushes.load(Ordering::SeqCst), 2);
        assert_eq!(pops.load(Ordering::SeqCst), 1);
        assert_eq!(clears.load(Ordering::SeqCst), 1);
    }
}
