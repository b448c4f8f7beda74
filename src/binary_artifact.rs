//! program binary extraction
//!
//! The payload is in the driver's own format. The format tag travels with it
//! in memory but is not written out: the output file holds the payload bytes
//! only, so whoever loads it must know the target driver.

use std::path::Path;

use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::program_unit::ProgramUnit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryArtifact {
    pub format: u32,
    pub payload: Vec<u8>,
}

impl BinaryArtifact {
    /// Writes the payload verbatim, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.payload).map_err(|source| Error::WriteOutput {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "wrote {} bytes (format 0x{:04x}) to {}",
            self.payload.len(),
            self.format,
            path.display()
        );
        Ok(())
    }
}

/// Asks the driver for the program binary whether or not the link succeeded.
pub fn extract_binary<D: Driver>(driver: &D, program: &ProgramUnit<D::Program>) -> BinaryArtifact {
    if !program.link_status {
        log::warn!("extracting binary of a program that failed to link");
    }
    let length = driver
        .program_parameter(program.program, glow::PROGRAM_BINARY_LENGTH)
        .max(0) as usize;
    let (format, mut payload) = driver.program_binary(program.program, length);
    payload.truncate(length);
    log::debug!("program binary: length={length} format=0x{format:04x}");
    BinaryArtifact { format, payload }
}
