/*!
Test supports module.

Provides a recording fake of the driver seam so the attachment and binding
state machines can be exercised without a live OpenGL context.
*/

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::os::raw::c_void;
use std::rc::Rc;

use glrt::context::GlApi;
use glrt::gl;
use glrt::gl::types::{GLbitfield, GLenum, GLint, GLsizei, GLuint};
use glrt::image::{ImageSource, LayerGl, LayerSource};
use glrt::texture::{Texture2D, TextureFormat};
use glrt::{CommandContext, Context};

/// Limits the fake driver reports.
pub const MAX_COLOR_ATTACHMENTS: GLint = 8;
pub const MAX_DRAW_BUFFERS: GLint = 8;
pub const MAX_TEXTURE_UNITS: GLint = 32;

/// One recorded native call, keeping the arguments the tests assert on.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    BindFramebuffer { target: GLenum, framebuffer: GLuint },
    DeleteFramebuffer(GLuint),
    FramebufferTexture2D { attachment: GLenum, texture: GLuint },
    FramebufferTexture { attachment: GLenum, texture: GLuint },
    DrawBuffers(Vec<GLenum>),
    DrawBuffer(GLenum),
    ReadBuffer(GLenum),
    CheckFramebufferStatus,
    Blit { mask: GLbitfield, filter: GLenum },
    Clear { mask: GLbitfield },
    ClearColor(f32, f32, f32, f32),
    ClearDepth(f32),
    ClearStencil(GLint),
    Viewport(GLint, GLint, GLsizei, GLsizei),
    Enable(GLenum),
    Disable(GLenum),
    DepthFunc(GLenum),
    DepthMask(bool),
    ActiveTexture(GLenum),
    BindTexture(GLuint),
    GenBuffer(GLuint),
    DeleteBuffer(GLuint),
    BindBuffer { target: GLenum, buffer: GLuint },
    BufferData { target: GLenum, size: isize },
    GetTexImage { format: GLenum, ty: GLenum },
    TexSubImage2D { width: GLsizei, height: GLsizei, format: GLenum },
}

struct FakeState {
    calls: Vec<Call>,
    next_framebuffer: GLuint,
    next_buffer: GLuint,
    status: GLenum,
}

/// Handle kept by the test to inspect and steer the fake after the
/// [`Context`] has taken ownership of the [`FakeGl`].
#[derive(Clone)]
pub struct FakeHandle {
    state: Rc<RefCell<FakeState>>,
}

impl FakeHandle {
    /// All calls recorded so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Drops the recorded calls, usually after setup.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// The status the next `glCheckFramebufferStatus` reports.
    pub fn set_status(&self, status: GLenum) {
        self.state.borrow_mut().status = status;
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: FnMut(&&Call) -> bool,
    {
        self.state.borrow().calls.iter().filter(predicate).count()
    }
}

/// Recording [`GlApi`] implementation.
pub struct FakeGl {
    state: Rc<RefCell<FakeState>>,
}

impl FakeGl {
    pub fn new() -> (FakeGl, FakeHandle) {
        let state = Rc::new(RefCell::new(FakeState {
            calls: Vec::new(),
            next_framebuffer: 1,
            next_buffer: 1,
            status: gl::FRAMEBUFFER_COMPLETE,
        }));
        let handle = FakeHandle {
            state: state.clone(),
        };
        (FakeGl { state }, handle)
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GlApi for FakeGl {
    fn gen_framebuffer(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let id = state.next_framebuffer;
        state.next_framebuffer += 1;
        id
    }

    fn delete_framebuffer(&self, framebuffer: GLuint) {
        self.record(Call::DeleteFramebuffer(framebuffer));
    }

    fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint) {
        self.record(Call::BindFramebuffer {
            target,
            framebuffer,
        });
    }

    fn framebuffer_texture_2d(
        &self,
        _target: GLenum,
        attachment: GLenum,
        _textarget: GLenum,
        texture: GLuint,
        _level: GLint,
    ) {
        self.record(Call::FramebufferTexture2D {
            attachment,
            texture,
        });
    }

    fn framebuffer_texture(&self, _target: GLenum, attachment: GLenum, texture: GLuint, _level: GLint) {
        self.record(Call::FramebufferTexture {
            attachment,
            texture,
        });
    }

    fn draw_buffers(&self, buffers: &[GLenum]) {
        self.record(Call::DrawBuffers(buffers.to_vec()));
    }

    fn draw_buffer(&self, buffer: GLenum) {
        self.record(Call::DrawBuffer(buffer));
    }

    fn read_buffer(&self, buffer: GLenum) {
        self.record(Call::ReadBuffer(buffer));
    }

    fn check_framebuffer_status(&self, _target: GLenum) -> GLenum {
        self.record(Call::CheckFramebufferStatus);
        self.state.borrow().status
    }

    fn blit_framebuffer(
        &self,
        _src_x0: GLint,
        _src_y0: GLint,
        _src_x1: GLint,
        _src_y1: GLint,
        _dst_x0: GLint,
        _dst_y0: GLint,
        _dst_x1: GLint,
        _dst_y1: GLint,
        mask: GLbitfield,
        filter: GLenum,
    ) {
        self.record(Call::Blit { mask, filter });
    }

    fn get_integerv(&self, pname: GLenum) -> GLint {
        match pname {
            gl::MAX_COLOR_ATTACHMENTS => MAX_COLOR_ATTACHMENTS,
            gl::MAX_DRAW_BUFFERS => MAX_DRAW_BUFFERS,
            gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS => MAX_TEXTURE_UNITS,
            _ => 0,
        }
    }

    fn clear(&self, mask: GLbitfield) {
        self.record(Call::Clear { mask });
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor(red, green, blue, alpha));
    }

    fn clear_depth(&self, value: f32) {
        self.record(Call::ClearDepth(value));
    }

    fn clear_stencil(&self, value: GLint) {
        self.record(Call::ClearStencil(value));
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn enable(&self, capability: GLenum) {
        self.record(Call::Enable(capability));
    }

    fn disable(&self, capability: GLenum) {
        self.record(Call::Disable(capability));
    }

    fn depth_func(&self, func: GLenum) {
        self.record(Call::DepthFunc(func));
    }

    fn depth_mask(&self, flag: bool) {
        self.record(Call::DepthMask(flag));
    }

    fn active_texture(&self, unit: GLenum) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, _target: GLenum, texture: GLuint) {
        self.record(Call::BindTexture(texture));
    }

    fn gen_buffer(&self) -> GLuint {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_buffer;
            state.next_buffer += 1;
            id
        };
        self.record(Call::GenBuffer(id));
        id
    }

    fn delete_buffer(&self, buffer: GLuint) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        self.record(Call::BindBuffer { target, buffer });
    }

    fn buffer_data_size(&self, target: GLenum, size: isize, _usage: GLenum) {
        self.record(Call::BufferData { target, size });
    }

    fn get_tex_image(&self, _target: GLenum, _level: GLint, format: GLenum, ty: GLenum, _pixels: *mut c_void) {
        self.record(Call::GetTexImage { format, ty });
    }

    fn tex_sub_image_2d(
        &self,
        _target: GLenum,
        _level: GLint,
        _x: GLint,
        _y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        _ty: GLenum,
        _pixels: *const c_void,
    ) {
        self.record(Call::TexSubImage2D {
            width,
            height,
            format,
        });
    }
}

/// Builds a context on a fresh fake driver.
pub fn build_context() -> (Context, FakeHandle) {
    let (fake, handle) = FakeGl::new();
    let context = Context::new(Box::new(fake), "test context").unwrap();
    (context, handle)
}

/// Texture handle with an arbitrary native name, for attachment tests.
pub fn make_texture(
    ctxt: &CommandContext<'_>,
    id: GLuint,
    dimensions: (u32, u32),
    format: TextureFormat,
) -> Texture2D {
    Texture2D::from_raw(ctxt, id, dimensions, format)
}

/// Layer owner that hands out a fixed representation and counts accesses.
pub struct FakeLayer {
    repr: Rc<LayerGl>,
    pub format: TextureFormat,
    pub dimensions: (u32, u32),
    pub readonly_requests: Cell<usize>,
    pub editable_requests: usize,
}

impl FakeLayer {
    pub fn new(
        ctxt: &CommandContext<'_>,
        texture_id: GLuint,
        dimensions: (u32, u32),
        format: TextureFormat,
    ) -> FakeLayer {
        FakeLayer {
            repr: Rc::new(LayerGl::new(Texture2D::from_raw(
                ctxt, texture_id, dimensions, format,
            ))),
            format,
            dimensions,
            readonly_requests: Cell::new(0),
            editable_requests: 0,
        }
    }

    /// Swaps the representation for one backed by a different texture.
    pub fn replace(&mut self, ctxt: &CommandContext<'_>, texture_id: GLuint) {
        self.repr = Rc::new(LayerGl::new(Texture2D::from_raw(
            ctxt,
            texture_id,
            self.dimensions,
            self.format,
        )));
    }
}

impl LayerSource for FakeLayer {
    fn representation(&self) -> Rc<LayerGl> {
        self.readonly_requests.set(self.readonly_requests.get() + 1);
        self.repr.clone()
    }

    fn editable_representation(&mut self) -> Rc<LayerGl> {
        self.editable_requests += 1;
        self.repr.clone()
    }

    fn set_format(&mut self, format: TextureFormat) {
        self.format = format;
    }

    fn set_dimensions(&mut self, dimensions: (u32, u32)) {
        self.dimensions = dimensions;
    }
}

/// Image owner made of [`FakeLayer`]s.
#[derive(Default)]
pub struct FakeImage {
    pub colors: Vec<FakeLayer>,
    pub depth: Option<FakeLayer>,
    pub picking: Option<FakeLayer>,
}

impl ImageSource for FakeImage {
    fn color_layer_count(&self) -> usize {
        self.colors.len()
    }

    fn color_layer_mut(&mut self, index: usize) -> &mut dyn LayerSource {
        &mut self.colors[index]
    }

    fn depth_layer_mut(&mut self) -> Option<&mut dyn LayerSource> {
        self.depth.as_mut().map(|layer| layer as &mut dyn LayerSource)
    }

    fn picking_layer_mut(&mut self) -> Option<&mut dyn LayerSource> {
        self.picking
            .as_mut()
            .map(|layer| layer as &mut dyn LayerSource)
    }
}
