//! link a vertex/fragment pair and reflect the program interface

use crate::driver::{ActiveVariable, Driver, Interface};
use crate::error::Result;
use crate::gl_type::GlType;
use crate::shader_unit::ShaderUnit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    pub name: String,
    /// at least 1
    pub array_size: u32,
    pub gl_type: GlType,
}

impl From<ActiveVariable> for VariableInfo {
    fn from(var: ActiveVariable) -> Self {
        VariableInfo {
            name: var.name,
            array_size: var.size.max(1) as u32,
            gl_type: GlType::from_gl(var.gl_type),
        }
    }
}

/// Result of one link attempt.
///
/// The reflected lists are in driver enumeration order and may be empty,
/// notably after a failed link.
#[derive(Debug)]
pub struct ProgramUnit<P> {
    pub link_status: bool,
    pub info_log: String,
    pub active_attributes: Vec<VariableInfo>,
    pub active_uniforms: Vec<VariableInfo>,
    pub(crate) program: P,
}

impl<P: Copy> ProgramUnit<P> {
    pub fn handle(&self) -> P {
        self.program
    }
}

/// Attaches both units to a new program, links it, and reflects it.
///
/// Units that failed to compile are linked anyway; the driver's verdict is
/// reported like any other link failure.
pub fn link<D: Driver>(
    driver: &D,
    vertex: &ShaderUnit<D::Shader>,
    fragment: &ShaderUnit<D::Shader>,
) -> Result<ProgramUnit<D::Program>> {
    let program = driver.create_program()?;
    driver.attach_shader(program, vertex.shader);
    driver.attach_shader(program, fragment.shader);
    driver.link_program(program);

    let link_status = driver.program_link_status(program);
    let info_log = if driver.program_parameter(program, glow::INFO_LOG_LENGTH) > 0 {
        driver.program_info_log(program)
    } else {
        String::new()
    };
    if !vertex.compile_status || !fragment.compile_status {
        log::debug!("linked with a shader that failed to compile: status={link_status}");
    }

    let active_attributes = reflect(driver, program, Interface::Attributes);
    let active_uniforms = reflect(driver, program, Interface::Uniforms);

    Ok(ProgramUnit {
        link_status,
        info_log,
        active_attributes,
        active_uniforms,
        program,
    })
}

fn reflect<D: Driver>(driver: &D, program: D::Program, interface: Interface) -> Vec<VariableInfo> {
    let count = driver.program_parameter(program, interface.count_param());
    if count <= 0 {
        return Vec::new();
    }
    // queried once, used as the name buffer size for every index
    let max_name_len = driver
        .program_parameter(program, interface.max_length_param())
        .max(0) as usize;

    let mut vars = Vec::with_capacity(count as usize);
    for index in 0..count as u32 {
        let var = match interface {
            Interface::Attributes => driver.active_attribute(program, index, max_name_len),
            Interface::Uniforms => driver.active_uniform(program, index, max_name_len),
        };
        match var {
            Some(var) => vars.push(VariableInfo::from(var)),
            None => log::warn!("driver rejected active {} #{index}", interface.name()),
        }
    }
    vars
}
