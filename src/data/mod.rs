//! Signal-side data model: sampling, interpretation, history and the
//! recording-window lifecycle.

pub mod cycle;
pub mod history;
pub mod interpret;
pub mod pipeline;
pub mod sampler;
pub mod scope;
