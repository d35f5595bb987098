//! Configuration for the oscilloscope window and its signal pipeline.

use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::data::interpret::Interpretation;
use crate::data::pipeline::TraceSettings;
use crate::data::sampler::AxisSource;
use crate::error::{Result, ScopeError};
use crate::render::{TraceStyle, VisualizationMode};

// ─────────────────────────────────────────────────────────────────────────────
// Slider ranges
// ─────────────────────────────────────────────────────────────────────────────

pub const RECORDING_INTERVAL_MS: RangeInclusive<u32> = 10..=300;
pub const MAX_POINTS: RangeInclusive<usize> = 1..=10_000;
pub const THICKNESS: RangeInclusive<f32> = 0.5..=10.0;
pub const GLOW_RADIUS: RangeInclusive<u32> = 0..=20;
pub const AMPLIFICATION: RangeInclusive<f32> = 0.0..=10_000.0;

// ─────────────────────────────────────────────────────────────────────────────
// ScopeConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Every user-tunable value of the oscilloscope.
///
/// The settings panel edits it in place each frame; the pipeline and the
/// renderer read plain values out of it. Values outside the slider ranges
/// are brought back by [`clamped`](Self::clamped) when loaded from the CLI or
/// a file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    // ── Capture ──────────────────────────────────────────────────────────────
    /// Length of one recording window in milliseconds.
    pub recording_interval_ms: u32,
    /// Input device name; `None` selects the host default.
    pub device: Option<String>,

    // ── Signal ───────────────────────────────────────────────────────────────
    pub x_source: AxisSource,
    pub y_source: AxisSource,
    pub interpretation: Interpretation,
    pub x_amplification: f32,
    pub y_amplification: f32,
    /// Editing one amplification slider moves the other as well.
    pub sync_amplification: bool,

    // ── Trace look ───────────────────────────────────────────────────────────
    pub max_points: usize,
    pub mode: VisualizationMode,
    pub thickness: f32,
    pub glow_radius: u32,
    pub color: Color32,
    pub background: Color32,

    // ── Window ───────────────────────────────────────────────────────────────
    pub title: String,
    pub vsync: bool,
    /// Width of the options sidebar in points.
    pub interface_width: f32,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            recording_interval_ms: 50,
            device: None,

            x_source: AxisSource::DEFAULT_X,
            y_source: AxisSource::DEFAULT_Y,
            interpretation: Interpretation::Cartesian,
            x_amplification: 1000.0,
            y_amplification: 1000.0,
            sync_amplification: true,

            max_points: 1000,
            mode: VisualizationMode::Points,
            thickness: 4.0,
            glow_radius: 6,
            color: Color32::from_rgb(177, 224, 255),
            background: Color32::from_rgb(0, 4, 5),

            title: "Oscilloscope".to_string(),
            vsync: true,
            interface_width: 500.0,
        }
    }
}

fn clamp_range<T: PartialOrd + Copy>(v: T, r: &RangeInclusive<T>) -> T {
    if v < *r.start() {
        *r.start()
    } else if v > *r.end() {
        *r.end()
    } else {
        v
    }
}

impl ScopeConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScopeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: ScopeConfig =
            serde_json::from_str(&text).map_err(|source| ScopeError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(cfg.clamped())
    }

    /// Bring every ranged value into its slider range.
    pub fn clamped(mut self) -> Self {
        self.recording_interval_ms = clamp_range(self.recording_interval_ms, &RECORDING_INTERVAL_MS);
        self.max_points = clamp_range(self.max_points, &MAX_POINTS);
        self.thickness = clamp_range(self.thickness, &THICKNESS);
        self.glow_radius = clamp_range(self.glow_radius, &GLOW_RADIUS);
        self.x_amplification = clamp_range(self.x_amplification, &AMPLIFICATION);
        self.y_amplification = clamp_range(self.y_amplification, &AMPLIFICATION);
        // NaN survives the comparisons above.
        if self.x_amplification.is_nan() {
            self.x_amplification = 0.0;
        }
        if self.y_amplification.is_nan() {
            self.y_amplification = 0.0;
        }
        if self.thickness.is_nan() {
            self.thickness = *THICKNESS.start();
        }
        self
    }

    pub fn recording_interval(&self) -> Duration {
        Duration::from_millis(self.recording_interval_ms as u64)
    }

    pub fn trace_settings(&self) -> TraceSettings {
        TraceSettings {
            x_source: self.x_source,
            y_source: self.y_source,
            interpretation: self.interpretation,
            x_amplification: self.x_amplification,
            y_amplification: self.y_amplification,
            max_points: self.max_points,
        }
    }

    pub fn trace_style(&self) -> TraceStyle {
        TraceStyle {
            mode: self.mode,
            thickness: self.thickness,
            glow_radius: self.glow_radius as f32,
            color: self.color,
        }
    }

    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.title.clone())
                .with_inner_size([1000.0 + self.interface_width, 1000.0])
                .with_min_inner_size([self.interface_width + 100.0, 200.0]),
            vsync: self.vsync,
            ..Default::default()
        }
    }
}
