//! compile one shader stage and keep what the driver said about it

use crate::driver::Driver;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub fn gl_enum(self) -> u32 {
        match self {
            Stage::Vertex => glow::VERTEX_SHADER,
            Stage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        }
    }
}

/// A shader object after its one compilation.
///
/// `compile_status == false` is not an error: the unit can still be handed to
/// [`crate::program_unit::link`], which will then report the link failure.
#[derive(Debug)]
pub struct ShaderUnit<S> {
    pub stage: Stage,
    pub source: String,
    pub compile_status: bool,
    pub info_log: String,
    pub(crate) shader: S,
}

impl<S: Copy> ShaderUnit<S> {
    pub fn handle(&self) -> S {
        self.shader
    }
}

/// Submits `source` to the driver compiler.
///
/// Only a driver refusing to create the shader object is an error.
pub fn compile<D: Driver>(driver: &D, stage: Stage, source: String) -> Result<ShaderUnit<D::Shader>> {
    if source.trim().is_empty() {
        log::warn!("{} shader source is empty", stage.name());
    }
    let shader = driver.create_shader(stage)?;
    driver.compile_shader(shader, &source);
    let compile_status = driver.shader_compile_status(shader);
    let info_log = driver.shader_info_log(shader);
    log::debug!(
        "{} shader compiled: status={} log_len={}",
        stage.name(),
        compile_status,
        info_log.len()
    );
    Ok(ShaderUnit {
        stage,
        source,
        compile_status,
        info_log,
        shader,
    })
}
