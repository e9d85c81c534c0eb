use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use orbcloud::workflows::RenderSink;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Terminal render sink: a progress bar standing in for a graphics canvas.
/// Delivered frames tick the bar; the shared counter lets the main thread
/// decide when the requested number of frames has been shown.
pub struct ProgressSink {
    pb: ProgressBar,
    delivered: Arc<AtomicU64>,
}

impl ProgressSink {
    pub fn new(total_frames: u64) -> (Self, Arc<AtomicU64>) {
        let pb = ProgressBar::new(total_frames).with_style(Self::bar_style());
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());

        let delivered = Arc::new(AtomicU64::new(0));
        let sink = Self {
            pb,
            delivered: Arc::clone(&delivered),
        };
        (sink, delivered)
    }

    fn deliver(&self, index: u64) {
        self.pb.set_position(index + 1);
        if self.pb.length().is_some_and(|len| index + 1 >= len) {
            self.pb.finish();
        }
        self.delivered.store(index + 1, Ordering::SeqCst);
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
                },
            )
            .progress_chars("##-")
    }
}

impl<T: Send> RenderSink<T> for ProgressSink {
    fn draw(&mut self, _frame: &T, index: u64) {
        self.pb.set_message("streaming frames");
        self.deliver(index);
    }

    fn update(&mut self, _frame: &T, index: u64) {
        self.deliver(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_delivered_frames() {
        let (mut sink, delivered) = ProgressSink::new(10);
        RenderSink::<u64>::draw(&mut sink, &0, 0);
        RenderSink::<u64>::update(&mut sink, &1, 1);
        RenderSink::<u64>::update(&mut sink, &2, 2);
        assert_eq!(delivered.load(Ordering::SeqCst), 3);
        assert_eq!(sink.pb.position(), 3);
    }
}
