//! Top-level entry point for running the oscilloscope as a native window.

use std::time::Instant;

use eframe::egui;

use crate::capture::CaptureDevice;
use crate::config::ScopeConfig;
use crate::data::scope::Oscilloscope;
use crate::error::{Result, ScopeError};

use super::ScopeApp;

/// Start `device` and open the oscilloscope window.
///
/// The device is started before any window exists, so a capture device that
/// cannot be opened is reported to the caller without a flash of UI. The
/// call blocks until the window is closed.
pub fn run_scope(device: Box<dyn CaptureDevice>, config: ScopeConfig) -> Result<()> {
    let config = config.clamped();
    let mut scope = Oscilloscope::new(device, config.recording_interval(), config.trace_settings());
    scope.start(Instant::now())?;
    log::info!(
        "oscilloscope running on '{}' ({} Hz)",
        scope.device().name(),
        scope.device().sample_rate()
    );

    let title = config.title.clone();
    let options = config.native_options();
    let app = ScopeApp::new(scope, config);

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| ScopeError::Window(e.to_string()))
}
