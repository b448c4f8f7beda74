//! The GL ES compiler/linker calls the pipeline is built on
//!
//! Every method mirrors one driver query so the order in which the pipeline
//! asks for things is visible at this boundary. [`crate::context::GlesContext`]
//! implements it over `glow`.

use crate::error::Result;
use crate::shader_unit::Stage;

/// One entry of `glGetActiveAttrib` / `glGetActiveUniform`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveVariable {
    pub name: String,
    pub size: i32,
    pub gl_type: u32,
}

pub trait Driver {
    type Shader: Copy;
    type Program: Copy;

    fn create_shader(&self, stage: Stage) -> Result<Self::Shader>;

    /// submits the source and triggers compilation
    fn compile_shader(&self, shader: Self::Shader, source: &str);

    fn shader_compile_status(&self, shader: Self::Shader) -> bool;

    /// empty when the driver reports a zero log length
    fn shader_info_log(&self, shader: Self::Shader) -> String;

    fn create_program(&self) -> Result<Self::Program>;

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);

    fn link_program(&self, program: Self::Program);

    fn program_link_status(&self, program: Self::Program) -> bool;

    /// `glGetProgramiv`
    fn program_parameter(&self, program: Self::Program, parameter: u32) -> i32;

    fn program_info_log(&self, program: Self::Program) -> String;

    /// `max_name_len` counts the terminator, as the GL buffer size does.
    fn active_attribute(
        &self,
        program: Self::Program,
        index: u32,
        max_name_len: usize,
    ) -> Option<ActiveVariable>;

    fn active_uniform(
        &self,
        program: Self::Program,
        index: u32,
        max_name_len: usize,
    ) -> Option<ActiveVariable>;

    /// Fetches the payload and its format tag in one call into a buffer of
    /// `length` bytes.
    fn program_binary(&self, program: Self::Program, length: usize) -> (u32, Vec<u8>);
}

/// Which active variable list of a program is being reflected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    Attributes,
    Uniforms,
}

impl Interface {
    pub fn count_param(self) -> u32 {
        match self {
            Interface::Attributes => glow::ACTIVE_ATTRIBUTES,
            Interface::Uniforms => glow::ACTIVE_UNIFORMS,
        }
    }

    pub fn max_length_param(self) -> u32 {
        match self {
            Interface::Attributes => glow::ACTIVE_ATTRIBUTE_MAX_LENGTH,
            Interface::Uniforms => glow::ACTIVE_UNIFORM_MAX_LENGTH,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Interface::Attributes => "attribute",
            Interface::Uniforms => "uniform",
        }
    }
}

/// used when a driver reports a max name length of 0 for a non-empty list
const FALLBACK_NAME_LEN: usize = 256;

/// GL name buffer size, terminator included.
pub(crate) fn name_buffer_len(max_name_len: usize) -> usize {
    if max_name_len == 0 {
        FALLBACK_NAME_LEN
    } else {
        max_name_len
    }
}

/// Drivers may hand logs back with the terminator still attached.
pub(crate) fn trim_log(mut log: String) -> String {
    while log.ends_with('\0') {
        log.pop();
    }
    log
}
