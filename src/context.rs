//! Headless GL ES context.
//!
//! The EGL device platform is preferred: the chosen device is opened directly
//! with no window system. Drivers without device enumeration get the default
//! native display instead. Either way the context is made current without a
//! surface, and the handle owns the `glow` function table, so every
//! [`Driver`] call on it runs against a current context.

use glow::HasContext as _;
use glutin::api::egl::config::Config;
use glutin::api::egl::context::PossiblyCurrentContext;
use glutin::api::egl::device::Device;
use glutin::api::egl::display::Display;
use glutin::config::{Api, ColorBufferType, ConfigSurfaceTypes, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::prelude::*;
use raw_window_handle::{RawDisplayHandle, XlibDisplayHandle};

use crate::driver::{trim_log, ActiveVariable, Driver, Interface};
use crate::entry_points::EntryPoints;
use crate::error::{Error, Result};
use crate::shader_unit::Stage;

#[derive(Debug, Clone)]
pub struct ContextOptions {
    /// index into the EGL device list
    pub device: usize,
    /// 2 or 3; 3 falls back to 2 when refused
    pub gles_major: u8,
}

impl Default for ContextOptions {
    fn default() -> Self {
        ContextOptions {
            device: 0,
            gles_major: 3,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum DisplaySource {
    Device(usize),
    Default,
}

/// No enumerated devices means the device platform is unusable.
fn display_source(device_count: usize, requested: usize) -> Result<DisplaySource> {
    if device_count == 0 {
        Ok(DisplaySource::Default)
    } else if requested < device_count {
        Ok(DisplaySource::Device(requested))
    } else {
        Err(Error::context(format!(
            "No EGL device #{requested} ({device_count} found)"
        )))
    }
}

fn open_display(requested: usize) -> Result<Display> {
    let devices: Vec<Device> = match Device::query_devices() {
        Ok(devices) => devices.collect(),
        Err(err) => {
            log::warn!("EGL device enumeration unavailable: {err}");
            Vec::new()
        }
    };
    match display_source(devices.len(), requested)? {
        DisplaySource::Device(index) => {
            log::info!("using EGL device #{index}: {:?}", devices[index]);
            // SAFETY: the device comes straight from the enumeration above
            unsafe { Display::with_device(&devices[index], None) }
                .map_err(|e| Error::context_with("Failed to create EGL display", e))
        }
        DisplaySource::Default => {
            log::info!("no EGL device found, using the default display");
            let handle = RawDisplayHandle::Xlib(XlibDisplayHandle::new(None, 0));
            // SAFETY: a missing native display selects EGL_DEFAULT_DISPLAY
            unsafe { Display::new(handle) }
                .map_err(|e| Error::context_with("Failed to create EGL display", e))
        }
    }
}

pub struct GlesContext {
    gl: glow::Context,
    entry_points: EntryPoints,
    context: PossiblyCurrentContext,
    display: Display,
}

impl GlesContext {
    pub fn create(options: &ContextOptions) -> Result<Self> {
        let display = open_display(options.device)?;

        let majors: &[u8] = if options.gles_major >= 3 { &[3, 2] } else { &[2] };
        let mut last_err = None;
        for &major in majors {
            match make_current(&display, major) {
                Ok(context) => return Self::load(display, context, major),
                Err(err) => {
                    log::warn!("GL ES {major}.0 context unavailable: {err}");
                    last_err = Some(err);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| Error::context("Failed to create EGL context")))
    }

    fn load(display: Display, context: PossiblyCurrentContext, major: u8) -> Result<Self> {
        // SAFETY: the context was made current on this thread just before
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };
        let entry_points =
            unsafe { EntryPoints::load(|name| display.get_proc_address(name), major) }?;
        unsafe {
            log::info!("GL_VENDOR: {}", gl.get_parameter_string(glow::VENDOR));
            log::info!("GL_RENDERER: {}", gl.get_parameter_string(glow::RENDERER));
            log::info!("GL_VERSION: {}", gl.get_parameter_string(glow::VERSION));
            let has_binaries =
                major >= 3 || gl.supported_extensions().contains("GL_OES_get_program_binary");
            if !has_binaries || gl.get_parameter_i32(glow::NUM_PROGRAM_BINARY_FORMATS) == 0 {
                log::warn!("driver reports no program binary formats");
            }
        }
        Ok(GlesContext {
            gl,
            entry_points,
            context,
            display,
        })
    }

    /// Releases the context, then terminates the display.
    pub fn destroy(self) -> Result<()> {
        let GlesContext {
            gl,
            entry_points,
            context,
            display,
        } = self;
        drop(entry_points);
        drop(gl);
        context
            .make_not_current()
            .map_err(|e| Error::context_with("Failed to release EGL context", e))?;
        drop(display);
        Ok(())
    }
}

fn choose_config(display: &Display, major: u8) -> Result<Config> {
    let api = if major >= 3 { Api::GLES3 } else { Api::GLES2 };
    for surface_type in [ConfigSurfaceTypes::empty(), ConfigSurfaceTypes::PBUFFER] {
        let template = ConfigTemplateBuilder::new()
            .with_api(api)
            .with_buffer_type(ColorBufferType::Rgb {
                r_size: 8,
                g_size: 8,
                b_size: 8,
            })
            .with_surface_type(surface_type)
            .build();
        // SAFETY: the template holds no raw handles
        let mut configs = unsafe { display.find_configs(template) }
            .map_err(|e| Error::context_with("Failed to select EGL configuration", e))?;
        if let Some(config) = configs.next() {
            return Ok(config);
        }
    }
    Err(Error::context("Failed to select EGL configuration"))
}

fn make_current(display: &Display, major: u8) -> Result<PossiblyCurrentContext> {
    let config = choose_config(display, major)?;
    let attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(Some(Version::new(major, 0))))
        .build(None);
    // SAFETY: config belongs to display, no window handle is passed
    let context = unsafe { display.create_context(&config, &attributes) }
        .map_err(|e| Error::context_with("Failed to create EGL context", e))?;
    context
        .make_current_surfaceless()
        .map_err(|e| Error::context_with("Failed to make context active", e))
}

// SAFETY (all blocks below): `self.context` stays current on this thread until
// `destroy` consumes the handle, and the handle is not `Send`.
impl Driver for GlesContext {
    type Shader = glow::Shader;
    type Program = glow::Program;

    fn create_shader(&self, stage: Stage) -> Result<glow::Shader> {
        unsafe { self.gl.create_shader(stage.gl_enum()) }
            .map_err(|e| Error::Driver(format!("{} shader object: {e}", stage.name())))
    }

    fn compile_shader(&self, shader: glow::Shader, source: &str) {
        unsafe {
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
        }
    }

    fn shader_compile_status(&self, shader: glow::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        // glow reads INFO_LOG_LENGTH first and skips the read when it is 0
        trim_log(unsafe { self.gl.get_shader_info_log(shader) })
    }

    fn create_program(&self) -> Result<glow::Program> {
        unsafe { self.gl.create_program() }
            .map_err(|e| Error::Driver(format!("program object: {e}")))
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&self, program: glow::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: glow::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_parameter(&self, program: glow::Program, parameter: u32) -> i32 {
        unsafe { self.gl.get_program_parameter_i32(program, parameter) }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        trim_log(unsafe { self.gl.get_program_info_log(program) })
    }

    fn active_attribute(
        &self,
        program: glow::Program,
        index: u32,
        max_name_len: usize,
    ) -> Option<ActiveVariable> {
        unsafe {
            self.entry_points
                .active_variable(Interface::Attributes, program.0.get(), index, max_name_len)
        }
    }

    fn active_uniform(
        &self,
        program: glow::Program,
        index: u32,
        max_name_len: usize,
    ) -> Option<ActiveVariable> {
        unsafe {
            self.entry_points
                .active_variable(Interface::Uniforms, program.0.get(), index, max_name_len)
        }
    }

    fn program_binary(&self, program: glow::Program, length: usize) -> (u32, Vec<u8>) {
        unsafe { self.entry_points.program_binary(program.0.get(), length) }
    }
}
