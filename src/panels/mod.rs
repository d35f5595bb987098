pub mod settings_ui;

pub use settings_ui::{ScopeStatus, SettingsPanel, SettingsResponse};
