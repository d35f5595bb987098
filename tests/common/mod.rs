#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use audioscope::{CaptureDevice, SampleBuffer, SampleData, SampleFormat, ScopeError};

/// Capture device that commits pre-recorded windows in order.
pub struct ScriptedDevice {
    pub name: String,
    pub rate: u32,
    pub windows: VecDeque<SampleBuffer>,
    pub committed: SampleBuffer,
    pub recording: bool,
    pub fail_start: bool,
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl ScriptedDevice {
    pub fn new(rate: u32, windows: Vec<SampleBuffer>) -> Self {
        Self {
            name: "scripted".to_string(),
            rate,
            windows: windows.into(),
            committed: SampleBuffer::empty(SampleFormat::I16, 2, rate),
            recording: false,
            fail_start: false,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn failing(rate: u32) -> Self {
        let mut dev = Self::new(rate, Vec::new());
        dev.fail_start = true;
        dev
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(format!("{}:{call}", self.name));
    }
}

impl CaptureDevice for ScriptedDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample_rate(&self) -> u32 {
        self.rate
    }

    fn channels(&self) -> u16 {
        2
    }

    fn is_recording(&self) -> bool {
        self.recording
    }

    fn start(&mut self) -> Result<(), ScopeError> {
        self.record("start");
        if self.fail_start {
            return Err(ScopeError::NoInputDevice);
        }
        self.recording = true;
        Ok(())
    }

    fn commit(&mut self) {
        self.record("commit");
        self.committed = self
            .windows
            .pop_front()
            .unwrap_or_else(|| SampleBuffer::empty(SampleFormat::I16, 2, self.rate));
    }

    fn committed(&self) -> &SampleBuffer {
        &self.committed
    }

    fn set_processing_interval(&mut self, _interval: Duration) {}

    fn stop(&mut self) {
        self.record("stop");
        self.recording = false;
    }
}

/// Stereo i16 window whose left channel counts up from `first` in steps of 1,
/// so every frame carries a distinct, increasing x value.
pub fn counting_window(first: i16, frames: usize, rate: u32) -> SampleBuffer {
    let mut raw = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        raw.push(first + i as i16);
        raw.push(0);
    }
    SampleBuffer::new(SampleData::I16(raw), 2, rate)
}

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}
