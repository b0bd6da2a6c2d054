use burn::train::renderer::{MetricState, MetricsRenderer, TrainingProgress};
use derive_new::new;

/// Reports training progress through the `log` facade instead of a TUI
#[derive(new)]
pub struct Simple {}

impl Simple {
    fn log_state(split: &str, state: MetricState) {
        if let MetricState::Numeric(entry, _) = state {
            log::trace!("[{split}] {}: {}", entry.name, entry.formatted);
        }
    }

    fn log_progress(split: &str, item: TrainingProgress) {
        if item.progress.items_processed >= item.progress.items_total {
            log::info!("[{split}] epoch {}/{} complete", item.epoch, item.epoch_total);
        } else {
            log::debug!(
                "[{split}] epoch {}/{} - item {}/{}",
                item.epoch,
                item.epoch_total,
                item.progress.items_processed,
                item.progress.items_total
            );
        }
    }
}

impl MetricsRenderer for Simple {
    fn update_train(&mut self, state: MetricState) {
        Self::log_state("train", state);
    }

    fn update_valid(&mut self, state: MetricState) {
        Self::log_state("valid", state);
    }

    fn render_train(&mut self, item: TrainingProgress) {
        Self::log_progress("train", item);
    }

    fn render_valid(&mut self, item: TrainingProgress) {
        Self::log_progress("valid", item);
    }
}
