//! Offline GL ES shader compiler: compile a vertex/fragment pair with the
//! driver's own compiler, report diagnostics and the reflected interface, and
//! save the driver's program binary.

pub mod binary_artifact;
pub mod context;
pub mod driver;
pub mod entry_points;
pub mod error;
pub mod gl_type;
pub mod pipeline;
pub mod program_unit;
pub mod report;
pub mod shader_unit;
pub mod source;

#[cfg(test)]
mod fake_driver;

pub use error::{Error, Result};
