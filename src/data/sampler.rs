//! Committed sample snapshots and the per-axis signal sampler.
//!
//! A [`SampleBuffer`] is what a capture device hands over on commit: an
//! immutable block of interleaved frames kept in the device's native
//! [`SampleFormat`]. [`sample`] turns one frame of it into a scalar in
//! `[-1, 1]` for a given [`AxisSource`].

use serde::{Deserialize, Serialize};

/// Where an axis takes its value from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AxisSource {
    /// Linear ramp across the recording window.
    Time,
    #[value(alias = "left")]
    LeftChannel,
    #[value(alias = "right")]
    RightChannel,
}

impl AxisSource {
    pub const ALL: &'static [AxisSource] = &[
        AxisSource::LeftChannel,
        AxisSource::RightChannel,
        AxisSource::Time,
    ];

    pub const DEFAULT_X: AxisSource = AxisSource::LeftChannel;
    pub const DEFAULT_Y: AxisSource = AxisSource::RightChannel;

    pub fn label(&self) -> &'static str {
        match self {
            AxisSource::Time => "Time",
            AxisSource::LeftChannel => "Left channel",
            AxisSource::RightChannel => "Right channel",
        }
    }
}

/// Storage format of raw samples inside a [`SampleBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    U8,
    I16,
    F32,
}

impl SampleFormat {
    pub fn label(&self) -> &'static str {
        match self {
            SampleFormat::U8 => "u8",
            SampleFormat::I16 => "i16",
            SampleFormat::F32 => "f32",
        }
    }
}

/// Interleaved raw samples in one of the supported formats.
#[derive(Clone, Debug, PartialEq)]
pub enum SampleData {
    U8(Vec<u8>),
    I16(Vec<i16>),
    F32(Vec<f32>),
}

impl SampleData {
    pub fn empty(format: SampleFormat) -> Self {
        match format {
            SampleFormat::U8 => SampleData::U8(Vec::new()),
            SampleFormat::I16 => SampleData::I16(Vec::new()),
            SampleFormat::F32 => SampleData::F32(Vec::new()),
        }
    }

    pub fn format(&self) -> SampleFormat {
        match self {
            SampleData::U8(_) => SampleFormat::U8,
            SampleData::I16(_) => SampleFormat::I16,
            SampleData::F32(_) => SampleFormat::F32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SampleData::U8(v) => v.len(),
            SampleData::I16(v) => v.len(),
            SampleData::F32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append `other` if it has the same format. Returns `false` (and leaves
    /// `self` untouched) on a format mismatch.
    pub fn append(&mut self, other: SampleData) -> bool {
        match (self, other) {
            (SampleData::U8(a), SampleData::U8(b)) => a.extend(b),
            (SampleData::I16(a), SampleData::I16(b)) => a.extend(b),
            (SampleData::F32(a), SampleData::F32(b)) => a.extend(b),
            _ => return false,
        }
        true
    }

    /// Drop the oldest `n` raw samples.
    pub fn discard_front(&mut self, n: usize) {
        match self {
            SampleData::U8(v) => drop(v.drain(..n.min(v.len()))),
            SampleData::I16(v) => drop(v.drain(..n.min(v.len()))),
            SampleData::F32(v) => drop(v.drain(..n.min(v.len()))),
        }
    }

    /// Format-defined normalization of the raw sample at `i` into `[0, 1]`.
    fn normalized_at(&self, i: usize) -> f64 {
        match self {
            SampleData::U8(v) => v[i] as f64 / u8::MAX as f64,
            SampleData::I16(v) => (v[i] as f64 - i16::MIN as f64) / u16::MAX as f64,
            SampleData::F32(v) => {
                let s = v[i] as f64;
                if s.is_finite() {
                    ((s + 1.0) * 0.5).clamp(0.0, 1.0)
                } else {
                    0.5
                }
            }
        }
    }
}

/// Read-only snapshot of one committed recording window.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer {
    data: SampleData,
    channels: u16,
    sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(data: SampleData, channels: u16, sample_rate: u32) -> Self {
        Self {
            data,
            channels: channels.max(1),
            sample_rate,
        }
    }

    pub fn empty(format: SampleFormat, channels: u16, sample_rate: u32) -> Self {
        Self::new(SampleData::empty(format), channels, sample_rate)
    }

    pub fn format(&self) -> SampleFormat {
        self.data.format()
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of complete frames (the committed sample count).
    pub fn frame_count(&self) -> usize {
        self.data.len() / self.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Normalized `[0, 1]` value of `channel` at `frame`. Channels beyond the
    /// buffer's channel count read the last channel, so a mono buffer feeds
    /// both left and right.
    pub fn normalized(&self, frame: usize, channel: u16) -> f64 {
        let channel = channel.min(self.channels - 1) as usize;
        self.data
            .normalized_at(frame * self.channels as usize + channel)
    }
}

/// Map frame `index` of `buffer` through `source` to a scalar in `[-1, 1]`.
///
/// `index` must be below `buffer.frame_count()`; the pipeline clamps its
/// iteration range so this is never violated.
pub fn sample(source: AxisSource, buffer: &SampleBuffer, index: usize) -> f64 {
    let unit = match source {
        AxisSource::LeftChannel => buffer.normalized(index, 0),
        AxisSource::RightChannel => buffer.normalized(index, 1),
        AxisSource::Time => index as f64 / buffer.frame_count() as f64,
    };
    // [0, 1] -> [-1, 1]
    2.0 * unit - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i16_extremes_map_to_unit_range() {
        let buf = SampleBuffer::new(SampleData::I16(vec![i16::MIN, i16::MAX]), 2, 48_000);
        assert_eq!(sample(AxisSource::LeftChannel, &buf, 0), -1.0);
        assert_eq!(sample(AxisSource::RightChannel, &buf, 0), 1.0);
    }

    #[test]
    fn u8_extremes_map_to_unit_range() {
        let buf = SampleBuffer::new(SampleData::U8(vec![0, 255]), 2, 8_000);
        assert_eq!(sample(AxisSource::LeftChannel, &buf, 0), -1.0);
        assert_eq!(sample(AxisSource::RightChannel, &buf, 0), 1.0);
    }

    #[test]
    fn f32_out_of_range_and_nan_stay_bounded() {
        let buf = SampleBuffer::new(SampleData::F32(vec![3.0, f32::NAN]), 2, 44_100);
        assert_eq!(sample(AxisSource::LeftChannel, &buf, 0), 1.0);
        assert_eq!(sample(AxisSource::RightChannel, &buf, 0), 0.0);
    }

    #[test]
    fn mono_right_channel_reads_left() {
        let buf = SampleBuffer::new(SampleData::I16(vec![i16::MAX, i16::MIN]), 1, 8_000);
        assert_eq!(buf.frame_count(), 2);
        assert_eq!(sample(AxisSource::RightChannel, &buf, 0), 1.0);
        assert_eq!(sample(AxisSource::RightChannel, &buf, 1), -1.0);
    }

    #[test]
    fn time_ramps_across_window() {
        let buf = SampleBuffer::new(SampleData::U8(vec![0; 8]), 2, 1_000);
        assert_eq!(sample(AxisSource::Time, &buf, 0), -1.0);
        assert_eq!(sample(AxisSource::Time, &buf, 2), 0.0);
        assert_eq!(sample(AxisSource::Time, &buf, 3), 0.5);
    }

    #[test]
    fn append_rejects_mismatched_format() {
        let mut data = SampleData::I16(vec![1, 2]);
        assert!(!data.append(SampleData::U8(vec![3])));
        assert!(data.append(SampleData::I16(vec![3])));
        assert_eq!(data, SampleData::I16(vec![1, 2, 3]));
        data.discard_front(2);
        assert_eq!(data, SampleData::I16(vec![3]));
    }
}
