//! Application wiring for the oscilloscope window.
//!
//! | Sub-module      | Responsibility |
//! | --------------- | -------------- |
//! | [`scope_app`]   | [`ScopeApp`] (eframe) per-frame update, sidebar handling and painting |
//! | [`run`]         | [`run_scope()`] entry point: start capture, open the window |

mod run;
mod scope_app;

pub use run::run_scope;
pub use scope_app::ScopeApp;
