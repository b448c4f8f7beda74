//! GL entry points called directly instead of through `glow`.
//!
//! Active variable queries take the name buffer size the caller already
//! queried, and program binaries are fetched through the OES entry point on
//! ES 2.0 drivers. Both check `glGetError` themselves after clearing whatever
//! earlier calls left pending.

use std::ffi::{c_char, c_void, CStr};

use crate::driver::{name_buffer_len, ActiveVariable, Interface};
use crate::error::{Error, Result};

type GetErrorFn = unsafe extern "system" fn() -> u32;
type GetActiveFn =
    unsafe extern "system" fn(u32, u32, i32, *mut i32, *mut i32, *mut u32, *mut c_char);
type GetProgramBinaryFn = unsafe extern "system" fn(u32, i32, *mut i32, *mut u32, *mut c_void);

// a lost context keeps reporting an error forever
const MAX_PENDING_ERRORS: usize = 32;

pub struct EntryPoints {
    get_error: GetErrorFn,
    get_active_attrib: GetActiveFn,
    get_active_uniform: GetActiveFn,
    get_program_binary: Option<GetProgramBinaryFn>,
}

fn binary_entry_names(gles_major: u8) -> &'static [&'static CStr] {
    if gles_major >= 3 {
        &[c"glGetProgramBinary", c"glGetProgramBinaryOES"]
    } else {
        // some EGLs hand out stubs for core names the context lacks
        &[c"glGetProgramBinaryOES"]
    }
}

impl EntryPoints {
    /// # Safety
    /// `loader` must return GL entry points (or null) for the context that is
    /// current on this thread.
    pub unsafe fn load<F>(mut loader: F, gles_major: u8) -> Result<Self>
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        let mut required = |name: &CStr| {
            let ptr = loader(name);
            if ptr.is_null() {
                Err(Error::context(format!(
                    "Failed to load {}",
                    name.to_string_lossy()
                )))
            } else {
                Ok(ptr)
            }
        };
        let get_error = required(c"glGetError")?;
        let get_active_attrib = required(c"glGetActiveAttrib")?;
        let get_active_uniform = required(c"glGetActiveUniform")?;

        let get_program_binary = binary_entry_names(gles_major).iter().find_map(|&name| {
            let ptr = loader(name);
            if ptr.is_null() {
                None
            } else {
                log::debug!("program binaries through {}", name.to_string_lossy());
                Some(unsafe { std::mem::transmute::<*const c_void, GetProgramBinaryFn>(ptr) })
            }
        });
        if get_program_binary.is_none() {
            log::warn!("driver exposes no program binary entry point");
        }

        unsafe {
            Ok(EntryPoints {
                get_error: std::mem::transmute::<*const c_void, GetErrorFn>(get_error),
                get_active_attrib: std::mem::transmute::<*const c_void, GetActiveFn>(
                    get_active_attrib,
                ),
                get_active_uniform: std::mem::transmute::<*const c_void, GetActiveFn>(
                    get_active_uniform,
                ),
                get_program_binary,
            })
        }
    }

    pub fn has_program_binary(&self) -> bool {
        self.get_program_binary.is_some()
    }

    unsafe fn clear_errors(&self) {
        for _ in 0..MAX_PENDING_ERRORS {
            let err = unsafe { (self.get_error)() };
            if err == glow::NO_ERROR {
                return;
            }
            log::debug!("discarding pending GL error 0x{err:04x}");
        }
    }

    unsafe fn last_error(&self) -> u32 {
        unsafe { (self.get_error)() }
    }

    /// `None` when the driver flags the query, e.g. an index out of range.
    ///
    /// # Safety
    /// The context these entry points came from must be current.
    pub unsafe fn active_variable(
        &self,
        interface: Interface,
        program: u32,
        index: u32,
        max_name_len: usize,
    ) -> Option<ActiveVariable> {
        let query = match interface {
            Interface::Attributes => self.get_active_attrib,
            Interface::Uniforms => self.get_active_uniform,
        };
        let buf_size = name_buffer_len(max_name_len);
        let mut name = vec![0u8; buf_size];
        let mut length = 0;
        let mut size = 0;
        let mut gl_type = 0;
        unsafe {
            self.clear_errors();
            query(
                program,
                index,
                buf_size as i32,
                &mut length,
                &mut size,
                &mut gl_type,
                name.as_mut_ptr().cast(),
            );
            let err = self.last_error();
            if err != glow::NO_ERROR {
                log::debug!("active variable #{index}: GL error 0x{err:04x}");
                return None;
            }
        }
        name.truncate(length.clamp(0, buf_size as i32 - 1) as usize);
        Some(ActiveVariable {
            name: String::from_utf8_lossy(&name).into_owned(),
            size,
            gl_type,
        })
    }

    /// Fills a buffer of exactly `length` bytes in one call. A driver error
    /// or a missing entry point yields an empty payload, never filler bytes.
    ///
    /// # Safety
    /// The context these entry points came from must be current.
    pub unsafe fn program_binary(&self, program: u32, length: usize) -> (u32, Vec<u8>) {
        let Some(get_program_binary) = self.get_program_binary else {
            log::warn!("no program binary entry point, writing an empty payload");
            return (0, Vec::new());
        };
        let mut payload = vec![0u8; length];
        let mut written = 0;
        let mut format = 0;
        unsafe {
            self.clear_errors();
            get_program_binary(
                program,
                length as i32,
                &mut written,
                &mut format,
                payload.as_mut_ptr().cast(),
            );
            let err = self.last_error();
            if err != glow::NO_ERROR {
                log::warn!("program binary query failed: GL error 0x{err:04x}");
                return (0, Vec::new());
            }
        }
        payload.truncate(written.clamp(0, length as i32) as usize);
        (format, payload)
    }
}
