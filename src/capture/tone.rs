use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use super::{pending_frame_cap, CaptureDevice};
use crate::data::sampler::{SampleBuffer, SampleData, SampleFormat};
use crate::error::Result;

const AMPLITUDE: f64 = 0.8;

/// Synthetic stereo source: a sine on each channel, generated against the
/// wall clock so it behaves like a live input. Frequencies with a small
/// integer ratio draw Lissajous figures in XY mode.
pub struct ToneCapture {
    name: String,
    sample_rate: u32,
    freqs: [f64; 2],
    phase: [f64; 2],
    /// Fractional frame carried between commits so the rate does not drift.
    carry: f64,
    last_commit: Option<Instant>,
    interval: Duration,
    committed: SampleBuffer,
}

impl ToneCapture {
    pub fn new(sample_rate: u32, left_hz: f64, right_hz: f64) -> Self {
        Self {
            name: format!("Tone {left_hz} Hz / {right_hz} Hz"),
            sample_rate: sample_rate.max(1),
            freqs: [left_hz, right_hz],
            phase: [0.0, 0.0],
            carry: 0.0,
            last_commit: None,
            interval: Duration::from_millis(50),
            committed: SampleBuffer::empty(SampleFormat::I16, 2, sample_rate.max(1)),
        }
    }

    /// Commit the frames that elapsed between the previous commit and `now`.
    pub fn commit_at(&mut self, now: Instant) {
        let Some(last) = self.last_commit else {
            return;
        };
        let exact = self.sample_rate as f64 * now.saturating_duration_since(last).as_secs_f64()
            + self.carry;
        let frames = exact.floor() as usize;
        self.carry = exact - frames as f64;
        self.last_commit = Some(now);

        // Frames older than the pending cap would be dropped anyway: advance
        // the phase past them without synthesizing.
        let kept = frames.min(pending_frame_cap(self.sample_rate, self.interval));
        let skipped = frames - kept;
        for ch in 0..2 {
            self.phase[ch] = (self.phase[ch]
                + self.freqs[ch] * skipped as f64 / self.sample_rate as f64)
                .fract();
        }

        let mut raw = Vec::with_capacity(kept * 2);
        for _ in 0..kept {
            for ch in 0..2 {
                let v = AMPLITUDE * (TAU * self.phase[ch]).sin();
                raw.push((v * i16::MAX as f64).round() as i16);
                self.phase[ch] = (self.phase[ch] + self.freqs[ch] / self.sample_rate as f64).fract();
            }
        }
        let data = SampleData::I16(raw);
        self.committed = SampleBuffer::new(data, 2, self.sample_rate);
    }

    /// Begin generating from `now` instead of the current wall clock.
    pub fn start_at(&mut self, now: Instant) {
        self.last_commit = Some(now);
        self.carry = 0.0;
    }
}

impl CaptureDevice for ToneCapture {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> u16 {
        2
    }

    fn is_recording(&self) -> bool {
        self.last_commit.is_some()
    }

    fn start(&mut self) -> Result<()> {
        self.start_at(Instant::now());
        log::info!("started synthetic source '{}'", self.name);
        Ok(())
    }

    fn commit(&mut self) {
        self.commit_at(Instant::now());
    }

    fn committed(&self) -> &SampleBuffer {
        &self.committed
    }

    fn set_processing_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    fn stop(&mut self) {
        self.last_commit = None;
    }
}
