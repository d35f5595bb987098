//! Live audio input through `cpal`.
//!
//! The driver callback appends every chunk to a [`PendingFrames`] buffer
//! shared with the UI thread, which takes it on
//! [`commit`](CaptureDevice::commit). The buffer is trimmed on every push,
//! so a window that stops rendering does not pile up audio.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::{pending_frame_cap, CaptureDevice, CaptureDeviceInfo, PendingFrames};
use crate::data::sampler::{SampleBuffer, SampleData, SampleFormat};
use crate::error::{Result, ScopeError};

pub struct CpalCapture {
    device: cpal::Device,
    name: String,
    config: cpal::StreamConfig,
    native_format: cpal::SampleFormat,
    stream: Option<cpal::Stream>,
    pending: Arc<Mutex<PendingFrames>>,
    committed: SampleBuffer,
}

impl CpalCapture {
    /// Open the input device called `name`, or the host default.
    pub fn open(name: Option<&str>) -> Result<Self> {
        let host = cpal::default_host();
        let device = match name {
            Some(wanted) => host
                .input_devices()
                .map_err(|e| ScopeError::Devices(e.to_string()))?
                .find(|d| d.name().map(|n| n == wanted).unwrap_or(false))
                .ok_or_else(|| ScopeError::DeviceNotFound(wanted.to_string()))?,
            None => host
                .default_input_device()
                .ok_or(ScopeError::NoInputDevice)?,
        };
        let name = device.name().unwrap_or_else(|_| "Unknown Device".to_string());

        let supported = device
            .default_input_config()
            .map_err(|e| ScopeError::DeviceConfig(e.to_string()))?;
        let native_format = supported.sample_format();
        let format = match native_format {
            cpal::SampleFormat::U8 => SampleFormat::U8,
            cpal::SampleFormat::I16 => SampleFormat::I16,
            _ => SampleFormat::F32,
        };
        let config: cpal::StreamConfig = supported.into();

        log::info!(
            "opened input '{}': {} Hz, {} ch, {:?}",
            name,
            config.sample_rate.0,
            config.channels,
            native_format
        );

        let pending = PendingFrames::new(
            format,
            config.channels,
            pending_frame_cap(config.sample_rate.0, Duration::from_millis(50)),
        );

        Ok(Self {
            committed: SampleBuffer::empty(format, config.channels, config.sample_rate.0),
            device,
            name,
            config,
            native_format,
            stream: None,
            pending: Arc::new(Mutex::new(pending)),
        })
    }

    fn pending(&self) -> MutexGuard<'_, PendingFrames> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn build_stream<T, F>(&self, wrap: F) -> Result<cpal::Stream>
    where
        T: cpal::SizedSample + Send + 'static,
        F: Fn(&[T]) -> SampleData + Send + 'static,
    {
        let name = self.name.clone();
        let pending = Arc::clone(&self.pending);
        self.device
            .build_input_stream(
                &self.config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut pending) = pending.lock() {
                        pending.push(wrap(data));
                    }
                },
                move |err| {
                    log::error!("input stream error on '{}': {}", name, err);
                },
                None,
            )
            .map_err(|e| ScopeError::StreamBuild(e.to_string()))
    }
}

fn to_f32<T>(data: &[T]) -> SampleData
where
    T: cpal::Sample,
    f32: cpal::FromSample<T>,
{
    SampleData::F32(
        data.iter()
            .map(|&s| <f32 as cpal::Sample>::from_sample(s))
            .collect(),
    )
}

impl CaptureDevice for CpalCapture {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    fn channels(&self) -> u16 {
        self.config.channels
    }

    fn is_recording(&self) -> bool {
        self.stream.is_some()
    }

    fn start(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }
        self.pending().clear();
        let stream = match self.native_format {
            cpal::SampleFormat::U8 => {
                self.build_stream(|d: &[u8]| SampleData::U8(d.to_vec()))?
            }
            cpal::SampleFormat::I16 => {
                self.build_stream(|d: &[i16]| SampleData::I16(d.to_vec()))?
            }
            cpal::SampleFormat::F32 => {
                self.build_stream(|d: &[f32]| SampleData::F32(d.to_vec()))?
            }
            cpal::SampleFormat::I8 => self.build_stream(to_f32::<i8>)?,
            cpal::SampleFormat::I32 => self.build_stream(to_f32::<i32>)?,
            cpal::SampleFormat::I64 => self.build_stream(to_f32::<i64>)?,
            cpal::SampleFormat::U16 => self.build_stream(to_f32::<u16>)?,
            cpal::SampleFormat::U32 => self.build_stream(to_f32::<u32>)?,
            cpal::SampleFormat::U64 => self.build_stream(to_f32::<u64>)?,
            cpal::SampleFormat::F64 => self.build_stream(to_f32::<f64>)?,
            other => {
                return Err(ScopeError::DeviceConfig(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        };
        stream
            .play()
            .map_err(|e| ScopeError::StreamPlay(e.to_string()))?;

        self.stream = Some(stream);
        log::info!("recording from '{}'", self.name);
        Ok(())
    }

    fn commit(&mut self) {
        if self.stream.is_none() {
            return;
        }
        let data = self.pending().take();
        self.committed = SampleBuffer::new(data, self.config.channels, self.config.sample_rate.0);
    }

    fn committed(&self) -> &SampleBuffer {
        &self.committed
    }

    fn set_processing_interval(&mut self, interval: Duration) {
        let cap = pending_frame_cap(self.config.sample_rate.0, interval);
        self.pending().set_max_frames(cap);
    }

    fn stop(&mut self) {
        if self.stream.take().is_some() {
            log::debug!("stopped input '{}'", self.name);
        }
        self.pending().clear();
    }
}

pub(super) fn list_input_devices() -> Result<Vec<CaptureDeviceInfo>> {
    let host = cpal::default_host();
    let default_name = host.default_input_device().and_then(|d| d.name().ok());
    let devices = host
        .input_devices()
        .map_err(|e| ScopeError::Devices(e.to_string()))?;

    let mut infos = Vec::new();
    for device in devices {
        let name = device.name().unwrap_or_else(|_| "Unknown Device".to_string());
        let Ok(config) = device.default_input_config() else {
            log::debug!("skipping '{}': no default input config", name);
            continue;
        };
        infos.push(CaptureDeviceInfo {
            is_default: default_name.as_deref() == Some(name.as_str()),
            sample_rate: config.sample_rate().0,
            channels: config.channels(),
            name,
        });
    }
    Ok(infos)
}
