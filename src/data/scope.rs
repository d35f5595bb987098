use std::time::{Duration, Instant};

use egui::{Pos2, Vec2};

use crate::capture::CaptureDevice;
use crate::data::cycle::{CaptureCycle, CycleState};
use crate::data::history::PointHistory;
use crate::data::pipeline::{TracePipeline, TraceSettings};
use crate::error::Result;

/// The signal side of the oscilloscope: a capture cycle feeding a trace pipeline.
///
/// Driven once per rendered frame through [`tick`](Self::tick), which first
/// converts the samples that are due and then rotates the recording window
/// when it has run past the configured interval.
pub struct Oscilloscope {
    cycle: CaptureCycle,
    pipeline: TracePipeline,
    pub settings: TraceSettings,
}

impl Oscilloscope {
    pub fn new(device: Box<dyn CaptureDevice>, interval: Duration, settings: TraceSettings) -> Self {
        Self {
            cycle: CaptureCycle::new(device, interval),
            pipeline: TracePipeline::new(),
            settings,
        }
    }

    /// Begin the first recording window. A failure here is fatal for the caller.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        self.cycle.start(&mut self.pipeline, now)
    }

    /// Convert the samples due at `now` for a surface of `surface_size` pixels.
    pub fn advance(&mut self, now: Instant, surface_size: Vec2) -> usize {
        let elapsed = self.cycle.elapsed(now);
        let center = Pos2::ZERO + surface_size * 0.5;
        self.pipeline
            .advance(self.cycle.committed(), elapsed, center, &self.settings)
    }

    /// Rotate the recording window if it is due. Returns whether it rotated.
    pub fn maybe_rotate(&mut self, now: Instant) -> Result<bool> {
        if !self.cycle.is_due(now) {
            return Ok(false);
        }
        self.cycle.restart(&mut self.pipeline, now)?;
        Ok(true)
    }

    /// One frame of work: [`advance`](Self::advance) then [`maybe_rotate`](Self::maybe_rotate).
    pub fn tick(&mut self, now: Instant, surface_size: Vec2) -> Result<usize> {
        let consumed = self.advance(now, surface_size);
        self.maybe_rotate(now)?;
        Ok(consumed)
    }

    /// Force a window rotation at `now`, regardless of the interval.
    pub fn restart(&mut self, now: Instant) -> Result<()> {
        self.cycle.restart(&mut self.pipeline, now)
    }

    pub fn replace_device(&mut self, device: Box<dyn CaptureDevice>, now: Instant) -> Result<()> {
        self.cycle.replace_device(device, &mut self.pipeline, now)
    }

    pub fn set_recording_interval(&mut self, interval: Duration) {
        if interval != self.cycle.interval() {
            self.cycle.set_interval(interval);
        }
    }

    pub fn stop(&mut self) {
        self.cycle.stop();
    }

    pub fn clear(&mut self) {
        self.pipeline.clear_history();
    }

    pub fn history(&self) -> &PointHistory {
        self.pipeline.history()
    }

    pub fn cursor(&self) -> usize {
        self.pipeline.last_processed_sample()
    }

    pub fn state(&self) -> CycleState {
        self.cycle.state()
    }

    pub fn window_start(&self) -> Option<Instant> {
        self.cycle.window_start()
    }

    pub fn device(&self) -> &dyn CaptureDevice {
        self.cycle.device()
    }
}
