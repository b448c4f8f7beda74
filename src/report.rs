//! human readable compile/link report

use std::io::Write;

use crate::program_unit::{ProgramUnit, VariableInfo};
use crate::shader_unit::ShaderUnit;

pub fn write_shader<S, W: Write>(out: &mut W, unit: &ShaderUnit<S>) -> std::io::Result<()> {
    if unit.compile_status {
        write!(out, "Compile successfull.\nLog:\n")?;
    } else {
        write!(out, "Compile failed\nLog:\n")?;
    }
    if !unit.info_log.is_empty() {
        writeln!(out, "{}", unit.info_log)?;
    }
    Ok(())
}

pub fn write_program<P, W: Write>(out: &mut W, unit: &ProgramUnit<P>) -> std::io::Result<()> {
    if unit.link_status {
        write!(out, "Link successfull\nLog:\n")?;
    } else {
        write!(out, "Link failed\nLog:\n")?;
    }
    if !unit.info_log.is_empty() {
        writeln!(out, "{}", unit.info_log)?;
    }
    write_variables(out, "attributes", &unit.active_attributes)?;
    write_variables(out, "uniforms", &unit.active_uniforms)
}

fn write_variables<W: Write>(out: &mut W, kind: &str, vars: &[VariableInfo]) -> std::io::Result<()> {
    if vars.is_empty() {
        return writeln!(out, "No active {kind}");
    }
    writeln!(out, "Active {kind}:")?;
    for var in vars {
        writeln!(out, " * {}: {} x {}", var.name, var.array_size, var.gl_type)?;
    }
    Ok(())
}
