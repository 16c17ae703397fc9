//! The raw-call seam between the render-target bookkeeping and the driver.
//!
//! Every native entry point this crate issues goes through [`GlApi`]. The
//! production implementation is [`NativeGl`], a thin wrapper around the
//! function table generated at build time; tests substitute a recording
//! fake so the attachment and binding state machines can be exercised
//! without a live driver.

use std::os::raw::c_void;

use crate::gl;
use crate::gl::types::{GLbitfield, GLenum, GLint, GLsizei, GLuint};

/// The set of native OpenGL calls used by this crate.
///
/// Implementations are not required to be thread-safe: a `GlApi` instance is
/// owned by exactly one [`Context`](crate::Context) and is only used while
/// that context is current, matching the one-context-one-thread model of the
/// rest of the crate.
pub trait GlApi {
    /// `glGenFramebuffers` for a single name.
    fn gen_framebuffer(&self) -> GLuint;
    /// `glDeleteFramebuffers` for a single name.
    fn delete_framebuffer(&self, framebuffer: GLuint);
    /// `glBindFramebuffer`.
    fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint);
    /// `glFramebufferTexture2D`.
    fn framebuffer_texture_2d(
        &self,
        target: GLenum,
        attachment: GLenum,
        textarget: GLenum,
        texture: GLuint,
        level: GLint,
    );
    /// `glFramebufferTexture`.
    fn framebuffer_texture(&self, target: GLenum, attachment: GLenum, texture: GLuint, level: GLint);
    /// `glDrawBuffers`.
    fn draw_buffers(&self, buffers: &[GLenum]);
    /// `glDrawBuffer`.
    fn draw_buffer(&self, buffer: GLenum);
    /// `glReadBuffer`.
    fn read_buffer(&self, buffer: GLenum);
    /// `glCheckFramebufferStatus`.
    fn check_framebuffer_status(&self, target: GLenum) -> GLenum;
    /// `glBlitFramebuffer`.
    #[allow(clippy::too_many_arguments)]
    fn blit_framebuffer(
        &self,
        src_x0: GLint,
        src_y0: GLint,
        src_x1: GLint,
        src_y1: GLint,
        dst_x0: GLint,
        dst_y0: GLint,
        dst_x1: GLint,
        dst_y1: GLint,
        mask: GLbitfield,
        filter: GLenum,
    );

    /// `glGetIntegerv` for a single value.
    fn get_integerv(&self, pname: GLenum) -> GLint;

    /// `glClear`.
    fn clear(&self, mask: GLbitfield);
    /// `glClearColor`.
    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);
    /// `glClearDepth`.
    fn clear_depth(&self, value: f32);
    /// `glClearStencil`.
    fn clear_stencil(&self, value: GLint);
    /// `glViewport`.
    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);

    /// `glEnable`.
    fn enable(&self, capability: GLenum);
    /// `glDisable`.
    fn disable(&self, capability: GLenum);
    /// `glDepthFunc`.
    fn depth_func(&self, func: GLenum);
    /// `glDepthMask`.
    fn depth_mask(&self, flag: bool);

    /// `glActiveTexture`.
    fn active_texture(&self, unit: GLenum);
    /// `glBindTexture`.
    fn bind_texture(&self, target: GLenum, texture: GLuint);

    /// `glGenBuffers` for a single name.
    fn gen_buffer(&self) -> GLuint;
    /// `glDeleteBuffers` for a single name.
    fn delete_buffer(&self, buffer: GLuint);
    /// `glBindBuffer`.
    fn bind_buffer(&self, target: GLenum, buffer: GLuint);
    /// `glBufferData` with a null data pointer, allocating `size` bytes.
    fn buffer_data_size(&self, target: GLenum, size: isize, usage: GLenum);
    /// `glGetTexImage`. With a pixel pack buffer bound, `pixels` is an
    /// offset into that buffer.
    fn get_tex_image(&self, target: GLenum, level: GLint, format: GLenum, ty: GLenum, pixels: *mut c_void);
    /// `glTexSubImage2D`. With a pixel unpack buffer bound, `pixels` is an
    /// offset into that buffer.
    #[allow(clippy::too_many_arguments)]
    fn tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        ty: GLenum,
        pixels: *const c_void,
    );
}

/// [`GlApi`] implementation backed by the generated bindings.
pub struct NativeGl {
    gl: gl::Gl,
}

impl NativeGl {
    /// Loads the function table through the given symbol loader, usually a
    /// [`Backend`](crate::Backend)'s `get_proc_address`.
    ///
    /// The matching context must be current on the calling thread.
    pub fn load_with<F>(loader: F) -> NativeGl
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        NativeGl {
            gl: gl::Gl::load_with(loader),
        }
    }
}

impl GlApi for NativeGl {
    fn gen_framebuffer(&self) -> GLuint {
        let mut id = 0;
        unsafe { self.gl.GenFramebuffers(1, &mut id) };
        id
    }

    fn delete_framebuffer(&self, framebuffer: GLuint) {
        unsafe { self.gl.DeleteFramebuffers(1, &framebuffer) };
    }

    fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint) {
        unsafe { self.gl.BindFramebuffer(target, framebuffer) };
    }

    fn framebuffer_texture_2d(
        &self,
        target: GLenum,
        attachment: GLenum,
        textarget: GLenum,
        texture: GLuint,
        level: GLint,
    ) {
        unsafe {
            self.gl
                .FramebufferTexture2D(target, attachment, textarget, texture, level)
        };
    }

    fn framebuffer_texture(&self, target: GLenum, attachment: GLenum, texture: GLuint, level: GLint) {
        unsafe { self.gl.FramebufferTexture(target, attachment, texture, level) };
    }

    fn draw_buffers(&self, buffers: &[GLenum]) {
        unsafe { self.gl.DrawBuffers(buffers.len() as GLsizei, buffers.as_ptr()) };
    }

    fn draw_buffer(&self, buffer: GLenum) {
        unsafe { self.gl.DrawBuffer(buffer) };
    }

    fn read_buffer(&self, buffer: GLenum) {
        unsafe { self.gl.ReadBuffer(buffer) };
    }

    fn check_framebuffer_status(&self, target: GLenum) -> GLenum {
        unsafe { self.gl.CheckFramebufferStatus(target) }
    }

    fn blit_framebuffer(
        &self,
        src_x0: GLint,
        src_y0: GLint,
        src_x1: GLint,
        src_y1: GLint,
        dst_x0: GLint,
        dst_y0: GLint,
        dst_x1: GLint,
        dst_y1: GLint,
        mask: GLbitfield,
        filter: GLenum,
    ) {
        unsafe {
            self.gl.BlitFramebuffer(
                src_x0, src_y0, src_x1, src_y1, dst_x0, dst_y0, dst_x1, dst_y1, mask, filter,
            )
        };
    }

    fn get_integerv(&self, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { self.gl.GetIntegerv(pname, &mut value) };
        value
    }

    fn clear(&self, mask: GLbitfield) {
        unsafe { self.gl.Clear(mask) };
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { self.gl.ClearColor(red, green, blue, alpha) };
    }

    fn clear_depth(&self, value: f32) {
        unsafe { self.gl.ClearDepth(value as f64) };
    }

    fn clear_stencil(&self, value: GLint) {
        unsafe { self.gl.ClearStencil(value) };
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        unsafe { self.gl.Viewport(x, y, width, height) };
    }

    fn enable(&self, capability: GLenum) {
        unsafe { self.gl.Enable(capability) };
    }

    fn disable(&self, capability: GLenum) {
        unsafe { self.gl.Disable(capability) };
    }

    fn depth_func(&self, func: GLenum) {
        unsafe { self.gl.DepthFunc(func) };
    }

    fn depth_mask(&self, flag: bool) {
        unsafe { self.gl.DepthMask(if flag { gl::TRUE } else { gl::FALSE }) };
    }

    fn active_texture(&self, unit: GLenum) {
        unsafe { self.gl.ActiveTexture(unit) };
    }

    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        unsafe { self.gl.BindTexture(target, texture) };
    }

    fn gen_buffer(&self) -> GLuint {
        let mut id = 0;
        unsafe { self.gl.GenBuffers(1, &mut id) };
        id
    }

    fn delete_buffer(&self, buffer: GLuint) {
        unsafe { self.gl.DeleteBuffers(1, &buffer) };
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        unsafe { self.gl.BindBuffer(target, buffer) };
    }

    fn buffer_data_size(&self, target: GLenum, size: isize, usage: GLenum) {
        unsafe { self.gl.BufferData(target, size, std::ptr::null(), usage) };
    }

    fn get_tex_image(&self, target: GLenum, level: GLint, format: GLenum, ty: GLenum, pixels: *mut c_void) {
        unsafe { self.gl.GetTexImage(target, level, format, ty, pixels) };
    }

    fn tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        ty: GLenum,
        pixels: *const c_void,
    ) {
        unsafe {
            self.gl
                .TexSubImage2D(target, level, x, y, width, height, format, ty, pixels)
        };
    }
}
