//! Options sidebar: capture, visualization, signal source and interpretation.

use eframe::egui;
use egui::Ui;
use egui_phosphor::regular::{ARROWS_CLOCKWISE, BROOM};

use crate::capture::{list_input_devices, CaptureDeviceInfo};
use crate::config::{self, ScopeConfig};
use crate::data::interpret::Interpretation;
use crate::data::sampler::{AxisSource, SampleFormat};
use crate::render::VisualizationMode;

/// Read-only values shown in the sidebar.
#[derive(Debug, Clone)]
pub struct ScopeStatus {
    pub device_name: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub format: SampleFormat,
    pub committed_frames: usize,
    pub cursor: usize,
    pub points: usize,
    pub fps: f32,
}

/// What the caller has to act on after the sidebar was drawn.
#[derive(Debug, Default)]
pub struct SettingsResponse {
    /// The recording interval slider moved.
    pub interval_changed: bool,
    /// A different input device was picked.
    pub device_selected: Option<String>,
    pub clear_requested: bool,
}

#[derive(Default)]
pub struct SettingsPanel {
    devices: Vec<CaptureDeviceInfo>,
    devices_loaded: bool,
    /// Last device error, shown until the next successful switch.
    pub device_error: Option<String>,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel with a fixed device list instead of querying the host.
    pub fn with_devices(devices: Vec<CaptureDeviceInfo>) -> Self {
        Self {
            devices,
            devices_loaded: true,
            device_error: None,
        }
    }

    fn refresh_devices(&mut self) {
        self.devices_loaded = true;
        match list_input_devices() {
            Ok(devices) => self.devices = devices,
            Err(e) => {
                log::warn!("could not list input devices: {e}");
                self.devices.clear();
            }
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, cfg: &mut ScopeConfig, status: &ScopeStatus) -> SettingsResponse {
        let mut resp = SettingsResponse::default();
        if !self.devices_loaded {
            self.refresh_devices();
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            section(ui, "Capture settings");
            self.device_combo(ui, status, &mut resp);
            if let Some(err) = &self.device_error {
                ui.colored_label(ui.visuals().error_fg_color, err);
            }
            resp.interval_changed = ui
                .add(
                    egui::Slider::new(&mut cfg.recording_interval_ms, config::RECORDING_INTERVAL_MS)
                        .text("Recording time")
                        .suffix(" ms"),
                )
                .changed();
            ui.label(format!(
                "{} Hz · {} ch · {} · {} frames/window",
                status.sample_rate,
                status.channels,
                status.format.label(),
                status.committed_frames,
            ));

            section(ui, "Visualization");
            enum_combo(
                ui,
                "Visualization mode",
                &mut cfg.mode,
                VisualizationMode::ALL,
                VisualizationMode::label,
            );
            ui.add(egui::Slider::new(&mut cfg.thickness, config::THICKNESS).text("Thickness"));
            ui.add(egui::Slider::new(&mut cfg.max_points, config::MAX_POINTS).text("Points limit"));
            ui.add(egui::Slider::new(&mut cfg.glow_radius, config::GLOW_RADIUS).text("Glow radius"));
            color_edit(ui, "Color", &mut cfg.color);
            color_edit(ui, "Background color", &mut cfg.background);
            // Fixed when the window is created.
            let mut vsync = cfg.vsync;
            ui.add_enabled(false, egui::Checkbox::new(&mut vsync, "Vertical synchronization"))
                .on_disabled_hover_text("Set at startup with --no-vsync or the config file");
            ui.horizontal(|ui| {
                ui.label(format!("FPS: {:.0}", status.fps));
                ui.separator();
                ui.label(format!("Points: {}", status.points));
                ui.separator();
                if ui
                    .button(format!("{BROOM} Clear"))
                    .on_hover_text("Drop the current trace")
                    .clicked()
                {
                    resp.clear_requested = true;
                }
            });

            section(ui, "Signal source");
            enum_combo(ui, "X signal source", &mut cfg.x_source, AxisSource::ALL, AxisSource::label);
            enum_combo(ui, "Y signal source", &mut cfg.y_source, AxisSource::ALL, AxisSource::label);

            section(ui, "Signal interpretation");
            enum_combo(
                ui,
                "Signal interpretation",
                &mut cfg.interpretation,
                Interpretation::ALL,
                Interpretation::label,
            );
            ui.checkbox(&mut cfg.sync_amplification, "Synchronize amplification");
            if ui
                .add(
                    egui::Slider::new(&mut cfg.x_amplification, config::AMPLIFICATION)
                        .text("X signal amplification"),
                )
                .changed()
                && cfg.sync_amplification
            {
                cfg.y_amplification = cfg.x_amplification;
            }
            if ui
                .add(
                    egui::Slider::new(&mut cfg.y_amplification, config::AMPLIFICATION)
                        .text("Y signal amplification"),
                )
                .changed()
                && cfg.sync_amplification
            {
                cfg.x_amplification = cfg.y_amplification;
            }

            section(ui, "Debugging");
            ui.label(format!(
                "Cursor: {} / {}",
                status.cursor, status.committed_frames
            ));
        });

        resp
    }

    fn device_combo(&mut self, ui: &mut Ui, status: &ScopeStatus, resp: &mut SettingsResponse) {
        let mut refresh = false;
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Capture device")
                .selected_text(status.device_name.as_str())
                .show_ui(ui, |ui| {
                    for dev in &self.devices {
                        let selected = dev.name == status.device_name;
                        let label = if dev.is_default {
                            format!("{} (default)", dev.name)
                        } else {
                            dev.name.clone()
                        };
                        if ui.selectable_label(selected, label).clicked() && !selected {
                            resp.device_selected = Some(dev.name.clone());
                        }
                    }
                });
            if ui
                .button(ARROWS_CLOCKWISE)
                .on_hover_text("Refresh device list")
                .clicked()
            {
                refresh = true;
            }
        });
        if refresh {
            self.refresh_devices();
        }
    }
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(6.0);
    ui.strong(title);
    ui.separator();
}

fn enum_combo<T: Copy + PartialEq>(
    ui: &mut Ui,
    label: &str,
    value: &mut T,
    items: &[T],
    name: fn(&T) -> &'static str,
) {
    egui::ComboBox::from_label(label)
        .selected_text(name(value))
        .show_ui(ui, |ui| {
            for item in items {
                ui.selectable_value(value, *item, name(item));
            }
        });
}

fn color_edit(ui: &mut Ui, label: &str, color: &mut egui::Color32) {
    ui.horizontal(|ui| {
        let mut rgb = [color.r(), color.g(), color.b()];
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            *color = egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
        }
        ui.label(label);
    });
}
