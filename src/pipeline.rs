//! compile → link → reflect → extract, reported as it goes

use std::io::Write;
use std::path::Path;

use crate::binary_artifact::extract_binary;
use crate::driver::Driver;
use crate::error::Result;
use crate::program_unit::link;
use crate::report;
use crate::shader_unit::{compile, Stage};

pub struct Sources {
    pub vertex: String,
    pub fragment: String,
}

impl Sources {
    pub fn load(vertex: &Path, fragment: &Path) -> Result<Self> {
        Ok(Sources {
            vertex: crate::source::load(vertex)?,
            fragment: crate::source::load(fragment)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub vertex_compiled: bool,
    pub fragment_compiled: bool,
    pub linked: bool,
    pub binary_format: u32,
    pub binary_len: usize,
}

/// Runs every stage regardless of earlier compile or link failures.
///
/// Returns an error only for driver object refusal, a failed report write, or
/// an output file that can't be written; in the last case the report has
/// already been emitted.
pub fn run<D: Driver, W: Write>(
    driver: &D,
    sources: Sources,
    output: &Path,
    out: &mut W,
) -> Result<Outcome> {
    let vertex = compile(driver, Stage::Vertex, sources.vertex)?;
    report::write_shader(out, &vertex)?;
    let fragment = compile(driver, Stage::Fragment, sources.fragment)?;
    report::write_shader(out, &fragment)?;

    let program = link(driver, &vertex, &fragment)?;
    report::write_program(out, &program)?;
    out.flush()?;

    let artifact = extract_binary(driver, &program);
    artifact.write_to(output)?;

    Ok(Outcome {
        vertex_compiled: vertex.compile_status,
        fragment_compiled: fragment.compile_status,
        linked: program.link_status,
        binary_format: artifact.format,
        binary_len: artifact.payload.len(),
    })
}
