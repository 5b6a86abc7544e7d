//! Session configuration
//!
//! [`SurfingConfiguration`] ties compiled paths to listeners or collection
//! modes and carries the [`SurfingOptions`] a session runs with. It is
//! assembled through [`SurfingConfigBuilder`].

mod binding;
mod builder;
mod options;

pub use binding::{Binding, BindingId, CaptureMode, JsonPathListener};
pub use builder::{SurfingConfigBuilder, SurfingConfiguration};
pub use options::{ConfigResult, SurfingOptions};
