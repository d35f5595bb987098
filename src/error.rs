//! Error type shared by the capture, configuration and application layers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the oscilloscope library.
///
/// Device open/start failures are fatal at startup; everything that can go
/// wrong while the render loop is running is logged and skipped instead.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("no default audio input device is available")]
    NoInputDevice,
    #[error("audio input device '{0}' not found")]
    DeviceNotFound(String),
    #[error("failed to query input configuration: {0}")]
    DeviceConfig(String),
    #[error("failed to enumerate audio devices: {0}")]
    Devices(String),
    #[error("failed to build input stream: {0}")]
    StreamBuild(String),
    #[error("failed to start input stream: {0}")]
    StreamPlay(String),
    #[error("window error: {0}")]
    Window(String),
    #[error("live capture is not compiled in (enable the `cpal` feature)")]
    CaptureUnavailable,
    #[error("failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = ScopeError> = std::result::Result<T, E>;
