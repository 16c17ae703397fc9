use smallvec::{smallvec, SmallVec};

use crate::gl;
use crate::gl::types::{GLenum, GLint, GLuint};

/// Represents the current OpenGL state tracked by this crate.
///
/// Binding points and clear values are process-global in OpenGL. To avoid
/// redundant driver calls, each context keeps a mirror of the values it has
/// set so far; operations consult the mirror and only issue the native call
/// when the value actually changes. The mirror must therefore be updated on
/// every state-changing call this crate makes.
pub struct GlState {
    /// The framebuffer bound to `GL_DRAW_FRAMEBUFFER`.
    pub draw_framebuffer: GLuint,
    /// The framebuffer bound to `GL_READ_FRAMEBUFFER`.
    pub read_framebuffer: GLuint,

    /// The latest value passed to `glClearColor`.
    pub clear_color: (f32, f32, f32, f32),
    /// The latest value passed to `glClearDepth`.
    pub clear_depth: f32,
    /// The latest value passed to `glClearStencil`.
    pub clear_stencil: GLint,

    /// Whether `GL_DEPTH_TEST` is enabled.
    pub enabled_depth_test: bool,
    /// The latest value passed to `glDepthFunc`.
    pub depth_func: GLenum,
    /// The latest value passed to `glDepthMask`.
    pub depth_mask: bool,

    /// The latest value passed to `glViewport`, or `None` if unknown.
    ///
    /// A fresh context starts with a viewport sized to its default surface,
    /// which this crate never queried, hence the `Option`.
    pub viewport: Option<(GLint, GLint, GLint, GLint)>,

    /// The latest value passed to `glActiveTexture`.
    pub active_texture: GLenum,
    /// The texture bound to `GL_TEXTURE_2D` on each texture unit.
    pub texture_units: SmallVec<[TextureUnitState; 32]>,

    /// The buffer bound to `GL_PIXEL_PACK_BUFFER`.
    pub pixel_pack_buffer_binding: GLuint,
    /// The buffer bound to `GL_PIXEL_UNPACK_BUFFER`.
    pub pixel_unpack_buffer_binding: GLuint,
}

/// Mirror of the state of a single texture unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureUnitState {
    /// The texture bound to `GL_TEXTURE_2D` on this unit.
    pub texture: GLuint,
}

impl Default for GlState {
    /// The state of a freshly created OpenGL context.
    fn default() -> GlState {
        GlState {
            draw_framebuffer: 0,
            read_framebuffer: 0,
            clear_color: (0.0, 0.0, 0.0, 0.0),
            clear_depth: 1.0,
            clear_stencil: 0,
            enabled_depth_test: false,
            depth_func: gl::LESS,
            depth_mask: true,
            viewport: None,
            active_texture: gl::TEXTURE0,
            texture_units: smallvec![TextureUnitState::default()],
            pixel_pack_buffer_binding: 0,
            pixel_unpack_buffer_binding: 0,
        }
    }
}

impl GlState {
    /// Mirror entry for the given texture unit, growing the list as needed.
    pub fn texture_unit_mut(&mut self, unit: u32) -> &mut TextureUnitState {
        let unit = unit as usize;
        if self.texture_units.len() <= unit {
            self.texture_units
                .resize(unit + 1, TextureUnitState::default());
        }
        &mut self.texture_units[unit]
    }
}
