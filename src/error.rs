//! Error kinds of the compile pipeline
//!
//! Compile and link failures are not errors: they are reported as status on
//! [`crate::shader_unit::ShaderUnit`] and [`crate::program_unit::ProgramUnit`].
//! Everything here is either fatal or an output failure, and the binary decides
//! how to exit.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{reason}")]
    Context {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Couldn't open file \"{}\"", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Shader source \"{}\" is not valid UTF-8", path.display())]
    SourceEncoding { path: PathBuf },

    #[error("Driver refused to create {0}")]
    Driver(String),

    #[error("Failed to create file \"{}\"", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl Error {
    pub fn context(reason: impl Into<String>) -> Self {
        Error::Context {
            reason: reason.into(),
            source: None,
        }
    }

    pub fn context_with<E>(reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Context {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Fatal errors abort before any later stage runs.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::WriteOutput { .. })
    }
}
