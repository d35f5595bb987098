//! Audioscope crate root: re-exports and module wiring.
//!
//! A realtime audio oscilloscope built on egui/eframe. Live input is cut into
//! fixed-length recording windows; each committed window is replayed against
//! the wall clock and turned into a bounded, newest-first trace of 2D points.
//!
//! - `data`: sampling, coordinate interpretation, point history, the trace
//!   pipeline and the capture-window lifecycle
//! - `capture`: capture device trait plus `cpal` and synthetic implementations
//! - `render`: painting the trace with alpha falloff
//! - `config`: user-tunable values and their ranges
//! - `panels`: the options sidebar
//! - `app`: the eframe application and its entry point

pub mod app;
pub mod capture;
pub mod config;
pub mod data;
pub mod error;
pub mod panels;
pub mod render;

// Public re-exports for a compact external API
pub use app::{run_scope, ScopeApp};
pub use capture::{list_input_devices, open_input, CaptureDevice, CaptureDeviceInfo, ToneCapture};
pub use config::ScopeConfig;
pub use data::cycle::{CaptureCycle, CycleState};
pub use data::history::PointHistory;
pub use data::interpret::{interpret, Interpretation};
pub use data::pipeline::{TracePipeline, TraceSettings};
pub use data::sampler::{sample, AxisSource, SampleBuffer, SampleData, SampleFormat};
pub use data::scope::Oscilloscope;
pub use error::ScopeError;
pub use render::{point_alpha, segment_quad, TraceStyle, VisualizationMode};
