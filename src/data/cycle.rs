//! Recording-window lifecycle of a capture device.

use std::time::{Duration, Instant};

use crate::capture::CaptureDevice;
use crate::data::pipeline::TracePipeline;
use crate::data::sampler::SampleBuffer;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Recording,
    Stopped,
}

/// Drives a [`CaptureDevice`] through fixed-length recording windows.
///
/// Every transition that begins a new window also resets the pipeline's
/// cursor, so the cursor always indexes the snapshot of the current window.
pub struct CaptureCycle {
    device: Box<dyn CaptureDevice>,
    state: CycleState,
    window_start: Option<Instant>,
    interval: Duration,
}

impl CaptureCycle {
    pub fn new(mut device: Box<dyn CaptureDevice>, interval: Duration) -> Self {
        device.set_processing_interval(interval);
        Self {
            device,
            state: CycleState::Idle,
            window_start: None,
            interval,
        }
    }

    /// Start recording and open the first window at `now`.
    pub fn start(&mut self, pipeline: &mut TracePipeline, now: Instant) -> Result<()> {
        self.device.start()?;
        self.begin_window(pipeline, now);
        Ok(())
    }

    /// Commit the running window and open the next one, or start the device
    /// if it is not recording.
    pub fn restart(&mut self, pipeline: &mut TracePipeline, now: Instant) -> Result<()> {
        if self.device.is_recording() {
            self.device.commit();
            self.begin_window(pipeline, now);
            log::trace!(
                "window committed: {} frames",
                self.device.committed().frame_count()
            );
            Ok(())
        } else {
            self.start(pipeline, now)
        }
    }

    fn begin_window(&mut self, pipeline: &mut TracePipeline, now: Instant) {
        self.state = CycleState::Recording;
        self.window_start = Some(now);
        pipeline.reset_cursor();
    }

    /// Time since the current window began (zero before the first start).
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.window_start
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default()
    }

    /// Whether the current window has run past the recording interval.
    pub fn is_due(&self, now: Instant) -> bool {
        self.state == CycleState::Recording && self.elapsed(now) > self.interval
    }

    /// Swap in `device`, starting it at `now`. On failure the current device
    /// keeps running and the error is returned.
    pub fn replace_device(
        &mut self,
        mut device: Box<dyn CaptureDevice>,
        pipeline: &mut TracePipeline,
        now: Instant,
    ) -> Result<()> {
        device.set_processing_interval(self.interval);
        device.start()?;
        let mut old = std::mem::replace(&mut self.device, device);
        old.stop();
        log::debug!("capture device '{}' replaced by '{}'", old.name(), self.device.name());
        self.begin_window(pipeline, now);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.device.stop();
        self.state = CycleState::Stopped;
        self.window_start = None;
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        self.device.set_processing_interval(interval);
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn window_start(&self) -> Option<Instant> {
        self.window_start
    }

    pub fn committed(&self) -> &SampleBuffer {
        self.device.committed()
    }

    pub fn device(&self) -> &dyn CaptureDevice {
        self.device.as_ref()
    }
}
