//! Capture device collaborators.
//!
//! A [`CaptureDevice`] records audio into a private buffer and, on
//! [`commit`](CaptureDevice::commit), publishes what it gathered as a
//! read-only [`SampleBuffer`] snapshot while it keeps recording into a fresh
//! one. The render loop only ever reads the committed snapshot.
//!
//! | Device | Source |
//! | ------ | ------ |
//! | [`CpalCapture`] | live input through `cpal` (feature `cpal`) |
//! | [`ToneCapture`] | synthetic stereo sine pair, no hardware needed |

#[cfg(feature = "cpal")]
mod cpal_device;
mod tone;

use std::time::Duration;

#[cfg(feature = "cpal")]
pub use cpal_device::CpalCapture;
pub use tone::ToneCapture;

use crate::data::sampler::{SampleBuffer, SampleData, SampleFormat};
use crate::error::Result;

/// A recording source that hands over finished windows as immutable snapshots.
pub trait CaptureDevice {
    /// Human-readable device name.
    fn name(&self) -> &str;
    fn sample_rate(&self) -> u32;
    fn channels(&self) -> u16;
    fn is_recording(&self) -> bool;
    /// Begin recording. Failing to open the underlying stream is an error.
    fn start(&mut self) -> Result<()>;
    /// Publish everything recorded since the last commit and continue
    /// recording into a new buffer.
    fn commit(&mut self);
    /// The most recently committed snapshot (empty before the first commit).
    fn committed(&self) -> &SampleBuffer;
    /// Expected time between commits; devices size their pending storage from it.
    fn set_processing_interval(&mut self, interval: Duration);
    fn stop(&mut self);
}

/// Description of an available input device.
#[derive(Debug, Clone)]
pub struct CaptureDeviceInfo {
    pub name: String,
    pub is_default: bool,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Enumerate the input devices of the default host.
pub fn list_input_devices() -> Result<Vec<CaptureDeviceInfo>> {
    #[cfg(feature = "cpal")]
    {
        cpal_device::list_input_devices()
    }
    #[cfg(not(feature = "cpal"))]
    {
        Err(crate::error::ScopeError::CaptureUnavailable)
    }
}

/// Open a live input device by name, or the host default when `name` is `None`.
pub fn open_input(name: Option<&str>) -> Result<Box<dyn CaptureDevice>> {
    #[cfg(feature = "cpal")]
    {
        Ok(Box::new(CpalCapture::open(name)?))
    }
    #[cfg(not(feature = "cpal"))]
    {
        let _ = name;
        Err(crate::error::ScopeError::CaptureUnavailable)
    }
}

/// Pending frames kept between commits: two processing intervals, so a
/// stalled render loop drops the oldest audio instead of growing forever.
pub(crate) fn pending_frame_cap(sample_rate: u32, interval: Duration) -> usize {
    ((sample_rate as f64 * interval.as_secs_f64() * 2.0).ceil() as usize).max(1)
}

/// Trim `data` (interleaved, `channels` wide) to its newest `max_frames` frames.
#[cfg_attr(not(feature = "cpal"), allow(dead_code))]
pub(crate) fn retain_newest_frames(data: &mut SampleData, channels: u16, max_frames: usize) {
    let channels = channels.max(1) as usize;
    let frames = data.len() / channels;
    if frames > max_frames {
        data.discard_front((frames - max_frames) * channels);
    }
}

/// Frames recorded since the last commit, bounded on every push.
///
/// A capture backend appends to it from its driver thread and the render
/// loop takes it on commit. A render loop that stops committing leaves at
/// most `max_frames` frames behind.
#[derive(Debug)]
#[cfg_attr(not(feature = "cpal"), allow(dead_code))]
pub(crate) struct PendingFrames {
    data: SampleData,
    channels: u16,
    max_frames: usize,
}

#[cfg_attr(not(feature = "cpal"), allow(dead_code))]
impl PendingFrames {
    pub(crate) fn new(format: SampleFormat, channels: u16, max_frames: usize) -> Self {
        Self {
            data: SampleData::empty(format),
            channels,
            max_frames,
        }
    }

    /// Append a chunk and drop the oldest frames past the bound.
    /// Chunks in a different format than the storage are ignored.
    pub(crate) fn push(&mut self, chunk: SampleData) {
        if self.data.append(chunk) {
            retain_newest_frames(&mut self.data, self.channels, self.max_frames);
        }
    }

    pub(crate) fn set_max_frames(&mut self, max_frames: usize) {
        self.max_frames = max_frames;
        retain_newest_frames(&mut self.data, self.channels, max_frames);
    }

    /// Hand over everything pending and start over empty.
    pub(crate) fn take(&mut self) -> SampleData {
        let empty = SampleData::empty(self.data.format());
        std::mem::replace(&mut self.data, empty)
    }

    pub(crate) fn clear(&mut self) {
        self.take();
    }

    pub(crate) fn frame_count(&self) -> usize {
        self.data.len() / self.channels.max(1) as usize
    }
}
