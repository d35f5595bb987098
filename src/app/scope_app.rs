//! Standalone oscilloscope window.
//!
//! [`ScopeApp`] implements [`eframe::App`]: each frame it draws the options
//! sidebar, applies what changed, ticks the [`Oscilloscope`] for the current
//! surface size and paints the trace into the central panel.

use std::time::Instant;

use eframe::egui;

use crate::capture::open_input;
use crate::config::ScopeConfig;
use crate::data::scope::Oscilloscope;
use crate::panels::{ScopeStatus, SettingsPanel, SettingsResponse};
use crate::render::paint_trace;

pub struct ScopeApp {
    pub scope: Oscilloscope,
    pub config: ScopeConfig,
    settings_panel: SettingsPanel,
    last_frame: Option<Instant>,
    fps: f32,
}

impl ScopeApp {
    /// Wrap an already started oscilloscope.
    pub fn new(scope: Oscilloscope, config: ScopeConfig) -> Self {
        Self {
            scope,
            config,
            settings_panel: SettingsPanel::new(),
            last_frame: None,
            fps: 0.0,
        }
    }

    fn status(&self) -> ScopeStatus {
        let device = self.scope.device();
        let committed = device.committed();
        ScopeStatus {
            device_name: device.name().to_string(),
            sample_rate: device.sample_rate(),
            channels: device.channels(),
            format: committed.format(),
            committed_frames: committed.frame_count(),
            cursor: self.scope.cursor(),
            points: self.scope.history().len(),
            fps: self.fps,
        }
    }

    fn apply(&mut self, resp: SettingsResponse, now: Instant) {
        if resp.interval_changed {
            self.scope
                .set_recording_interval(self.config.recording_interval());
        }
        if resp.clear_requested {
            self.scope.clear();
        }
        if let Some(name) = resp.device_selected {
            let switched = open_input(Some(&name))
                .and_then(|device| self.scope.replace_device(device, now));
            match switched {
                Ok(()) => {
                    log::info!("switched capture device to '{name}'");
                    self.config.device = Some(name);
                    self.settings_panel.device_error = None;
                }
                Err(e) => {
                    log::error!("could not switch to '{name}': {e}");
                    self.settings_panel.device_error = Some(e.to_string());
                }
            }
        }
        self.scope.settings = self.config.trace_settings();
    }

    fn update_fps(&mut self, now: Instant) {
        if let Some(prev) = self.last_frame {
            let dt = now.saturating_duration_since(prev).as_secs_f32();
            if dt > 0.0 {
                self.fps = 1.0 / dt;
            }
        }
        self.last_frame = Some(now);
    }
}

impl eframe::App for ScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.update_fps(now);

        let status = self.status();
        let panel = egui::SidePanel::left("options")
            .resizable(true)
            .default_width(self.config.interface_width)
            .show(ctx, |ui| {
                self.settings_panel.ui(ui, &mut self.config, &status)
            });
        self.config.interface_width = panel.response.rect.width();
        self.apply(panel.inner, now);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.config.background))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;

                if let Err(e) = self.scope.tick(now, rect.size()) {
                    log::warn!("capture window rotation failed: {e}");
                }
                paint_trace(
                    &painter,
                    rect.min.to_vec2(),
                    self.scope.history(),
                    &self.config.trace_style(),
                );
            });

        // Continuously repaint so the trace keeps up with the audio.
        ctx.request_repaint();
    }
}

impl Drop for ScopeApp {
    fn drop(&mut self) {
        self.scope.stop();
    }
}
