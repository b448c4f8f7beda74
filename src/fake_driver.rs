//! scripted driver for tests, records every call it receives

use std::cell::RefCell;

use crate::driver::{name_buffer_len, ActiveVariable, Driver};
use crate::error::{Error, Result};
use crate::shader_unit::Stage;

#[derive(Default)]
pub struct FakeDriver {
    pub vertex: (bool, String),
    pub fragment: (bool, String),
    pub link: (bool, String),
    pub attributes: Vec<ActiveVariable>,
    pub uniforms: Vec<ActiveVariable>,
    /// index the driver refuses to describe
    pub rejected_index: Option<u32>,
    pub binary: (u32, Vec<u8>),
    pub refuse_objects: bool,
    pub calls: RefCell<Vec<String>>,
    pub(crate) shaders: RefCell<Vec<Stage>>,
}

/// Cuts `name` the way a GL name buffer for `max_name_len` would.
fn clip_name(mut name: String, max_name_len: usize) -> String {
    let mut end = name_buffer_len(max_name_len) - 1;
    if end >= name.len() {
        return name;
    }
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name.truncate(end);
    name
}

pub fn variable(name: &str, size: i32, gl_type: u32) -> ActiveVariable {
    ActiveVariable {
        name: name.to_string(),
        size,
        gl_type,
    }
}

impl FakeDriver {
    /// a pair that compiles and links, with one attribute and one uniform
    pub fn basic() -> Self {
        FakeDriver {
            vertex: (true, String::new()),
            fragment: (true, String::new()),
            link: (true, String::new()),
            attributes: vec![variable("position", 1, glow::FLOAT_VEC4)],
            uniforms: vec![variable("color", 1, glow::FLOAT_VEC4)],
            binary: (0x8af0, vec![0xde, 0xad, 0xbe, 0xef]),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn max_name_len(vars: &[ActiveVariable]) -> i32 {
        vars.iter()
            .map(|v| v.name.len() as i32 + 1)
            .max()
            .unwrap_or(0)
    }

    fn describe(
        &self,
        vars: &[ActiveVariable],
        index: u32,
        max_name_len: usize,
    ) -> Option<ActiveVariable> {
        if self.rejected_index == Some(index) {
            return None;
        }
        let var = vars.get(index as usize)?.clone();
        Some(ActiveVariable {
            name: clip_name(var.name, max_name_len),
            ..var
        })
    }
}

impl Driver for FakeDriver {
    type Shader = usize;
    type Program = u32;

    fn create_shader(&self, stage: Stage) -> Result<usize> {
        self.record(format!("create_shader {stage:?}"));
        if self.refuse_objects {
            return Err(Error::Driver("shader object".to_string()));
        }
        let mut shaders = self.shaders.borrow_mut();
        shaders.push(stage);
        Ok(shaders.len() - 1)
    }

    fn compile_shader(&self, shader: usize, source: &str) {
        self.record(format!("compile_shader {shader} {}", source.len()));
    }

    fn shader_compile_status(&self, shader: usize) -> bool {
        self.record(format!("shader_compile_status {shader}"));
        match self.shaders.borrow()[shader] {
            Stage::Vertex => self.vertex.0,
            Stage::Fragment => self.fragment.0,
        }
    }

    fn shader_info_log(&self, shader: usize) -> String {
        self.record(format!("shader_info_log {shader}"));
        match self.shaders.borrow()[shader] {
            Stage::Vertex => self.vertex.1.clone(),
            Stage::Fragment => self.fragment.1.clone(),
        }
    }

    fn create_program(&self) -> Result<u32> {
        self.record("create_program");
        if self.refuse_objects {
            return Err(Error::Driver("program object".to_string()));
        }
        Ok(1)
    }

    fn attach_shader(&self, _program: u32, shader: usize) {
        self.record(format!("attach_shader {shader}"));
    }

    fn link_program(&self, _program: u32) {
        self.record("link_program");
    }

    fn program_link_status(&self, _program: u32) -> bool {
        self.record("program_link_status");
        self.link.0
    }

    fn program_parameter(&self, _program: u32, parameter: u32) -> i32 {
        let (name, value) = match parameter {
            glow::INFO_LOG_LENGTH => (
                "INFO_LOG_LENGTH",
                if self.link.1.is_empty() {
                    0
                } else {
                    self.link.1.len() as i32 + 1
                },
            ),
            glow::ACTIVE_ATTRIBUTES => ("ACTIVE_ATTRIBUTES", self.attributes.len() as i32),
            glow::ACTIVE_ATTRIBUTE_MAX_LENGTH => (
                "ACTIVE_ATTRIBUTE_MAX_LENGTH",
                Self::max_name_len(&self.attributes),
            ),
            glow::ACTIVE_UNIFORMS => ("ACTIVE_UNIFORMS", self.uniforms.len() as i32),
            glow::ACTIVE_UNIFORM_MAX_LENGTH => (
                "ACTIVE_UNIFORM_MAX_LENGTH",
                Self::max_name_len(&self.uniforms),
            ),
            glow::PROGRAM_BINARY_LENGTH => ("PROGRAM_BINARY_LENGTH", self.binary.1.len() as i32),
            _ => ("?", 0),
        };
        self.record(format!("program_parameter {name}"));
        value
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.record("program_info_log");
        self.link.1.clone()
    }

    fn active_attribute(&self, _program: u32, index: u32, max_name_len: usize) -> Option<ActiveVariable> {
        self.record(format!("active_attribute {index}"));
        self.describe(&self.attributes, index, max_name_len)
    }

    fn active_uniform(&self, _program: u32, index: u32, max_name_len: usize) -> Option<ActiveVariable> {
        self.record(format!("active_uniform {index}"));
        self.describe(&self.uniforms, index, max_name_len)
    }

    fn program_binary(&self, _program: u32, length: usize) -> (u32, Vec<u8>) {
        self.record(format!("program_binary {length}"));
        let mut payload = self.binary.1.clone();
        payload.resize(length, 0);
        (self.binary.0, payload)
    }
}

mod tests {
    use super::*;

    #[test]
    fn test_clip_name() {
        assert_eq!(clip_name("position".to_string(), 9), "position");
        assert_eq!(clip_name("position".to_string(), 4), "pos");
        assert_eq!(clip_name("color".to_string(), 0), "color");
        assert_eq!(clip_name("color".to_string(), 64), "color");
        assert_eq!(clip_name("x".repeat(300), 0).len(), 255);
    }
}
