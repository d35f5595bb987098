//! Sample-to-point conversion paced by wall-clock time.

use std::time::Duration;

use egui::Pos2;

use crate::data::history::PointHistory;
use crate::data::interpret::{interpret, Interpretation};
use crate::data::sampler::{sample, AxisSource, SampleBuffer};

/// Per-tick conversion parameters, read from the configuration each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSettings {
    pub x_source: AxisSource,
    pub y_source: AxisSource,
    pub interpretation: Interpretation,
    pub x_amplification: f32,
    pub y_amplification: f32,
    pub max_points: usize,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            x_source: AxisSource::DEFAULT_X,
            y_source: AxisSource::DEFAULT_Y,
            interpretation: Interpretation::default(),
            x_amplification: 1000.0,
            y_amplification: 1000.0,
            max_points: 1000,
        }
    }
}

/// Owns the point history and the read cursor into the current window.
///
/// Each [`advance`](Self::advance) converts the samples that became due since
/// the previous call. The cursor is scoped to one recording window and must
/// be reset with [`reset_cursor`](Self::reset_cursor) when the window
/// rotates; the history survives rotations and is only bounded by
/// `max_points`.
#[derive(Debug, Default)]
pub struct TracePipeline {
    history: PointHistory,
    last_processed_sample: usize,
}

impl TracePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame index that corresponds to `elapsed` at `sample_rate`.
    pub fn target_sample(sample_rate: u32, elapsed: Duration) -> usize {
        (sample_rate as f64 * elapsed.as_secs_f64()).floor() as usize
    }

    /// Convert every due sample of `buffer` into a point and evict overflow.
    ///
    /// `elapsed` is the time since the current recording window started and
    /// `center` the surface-space origin of the trace. Returns the number of
    /// samples consumed.
    pub fn advance(
        &mut self,
        buffer: &SampleBuffer,
        elapsed: Duration,
        center: Pos2,
        settings: &TraceSettings,
    ) -> usize {
        let target = Self::target_sample(buffer.sample_rate(), elapsed);
        let upper = buffer.frame_count().min(target);
        let start = self.last_processed_sample;

        // Points older than the newest `max_points` would be evicted below anyway.
        let first = start.max(upper.saturating_sub(settings.max_points));
        for index in first..upper {
            let s = (
                sample(settings.x_source, buffer, index),
                sample(settings.y_source, buffer, index),
            );
            let (rx, ry) = interpret(settings.interpretation, s);
            // Screen y grows downward.
            self.history.push_newest(Pos2::new(
                center.x + settings.x_amplification * rx as f32,
                center.y - settings.y_amplification * ry as f32,
            ));
        }

        self.last_processed_sample = start.max(upper);
        self.history.evict_to(settings.max_points);
        upper.saturating_sub(start)
    }

    pub fn reset_cursor(&mut self) {
        self.last_processed_sample = 0;
    }

    pub fn last_processed_sample(&self) -> usize {
        self.last_processed_sample
    }

    pub fn history(&self) -> &PointHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
