use std::sync::Arc;

/// Notifications emitted by the frame stream. Replaces GUI signal/slot wiring
/// with a plain callback: observers register one function and match on the
/// event they care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent {
    FramePushed,
    FramePopped,
    BufferCleared,
    /// A paced consumer tick delivered a frame to the render callback.
    Step {
        index: u64,
    },
}

/// Shared, cloneable event fan-out. A reporter without a callback is a no-op,
/// so instrumentation costs nothing when nobody listens.
#[derive(Clone, Default)]
pub struct EventReporter {
    callback: Option<Arc<dyn Fn(StreamEvent) + Send + Sync>>,
}

impl EventReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: impl Fn(StreamEvent) + Send + Sync + 'static) -> Self {
        Self {
            callback: Some(Arc::new(callback)),
        }
    }

    #[inline]
    pub fn report(&self, event: StreamEvent) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

impl std::fmt::Debug for EventReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventReporter")
            .field("registered", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_noop() {
        EventReporter::new().report(StreamEvent::FramePushed);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = EventReporter::with_callback(move |ev| sink.lock().unwrap().push(ev));

        reporter.report(StreamEvent::FramePushed);
        reporter.report(StreamEvent::Step { index: 3 });

        assert_eq!(
            *seen.lock().unwrap(),
            vec![StreamEvent::FramePushed, StreamEvent::Step { index: 3 }]
        );
    }
}
