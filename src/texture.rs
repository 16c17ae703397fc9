//! Minimal 2D texture handle used as framebuffer attachment storage.
//!
//! Texture creation, sampling parameters and data upload are out of scope
//! here; a [`Texture2D`] only carries the name, dimensions and format that
//! the attachment and copy machinery needs.

use crate::context::{check_context, CommandContext, ContextId};
use crate::gl;
use crate::gl::types::{GLenum, GLuint};
use crate::GlObject;

/// Pixel formats this crate knows how to attach and copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit normalized RGBA.
    Rgba8,
    /// 16-bit float RGBA.
    Rgba16f,
    /// 32-bit float RGBA.
    Rgba32f,
    /// Single-channel 32-bit unsigned integer, used for picking layers.
    R32Ui,
    /// 24-bit depth.
    Depth24,
    /// 32-bit float depth.
    Depth32f,
    /// 24-bit depth packed with 8-bit stencil.
    Depth24Stencil8,
    /// 32-bit float depth with 8-bit stencil.
    Depth32fStencil8,
}

impl TextureFormat {
    /// True for depth and combined depth/stencil formats.
    pub fn is_depth(self) -> bool {
        matches!(
            self,
            TextureFormat::Depth24
                | TextureFormat::Depth32f
                | TextureFormat::Depth24Stencil8
                | TextureFormat::Depth32fStencil8
        )
    }

    /// True if the format carries a stencil channel.
    pub fn has_stencil(self) -> bool {
        matches!(
            self,
            TextureFormat::Depth24Stencil8 | TextureFormat::Depth32fStencil8
        )
    }

    /// Size of one pixel in client memory, in bytes, when transferred with
    /// [`gl_format`](TextureFormat::gl_format) and
    /// [`gl_type`](TextureFormat::gl_type).
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgba8 => 4,
            TextureFormat::Rgba16f => 8,
            TextureFormat::Rgba32f => 16,
            TextureFormat::R32Ui => 4,
            TextureFormat::Depth24 => 4,
            TextureFormat::Depth32f => 4,
            TextureFormat::Depth24Stencil8 => 4,
            TextureFormat::Depth32fStencil8 => 8,
        }
    }

    /// The pixel transfer format for `glGetTexImage`/`glTexSubImage2D`.
    pub fn gl_format(self) -> GLenum {
        match self {
            TextureFormat::Rgba8 | TextureFormat::Rgba16f | TextureFormat::Rgba32f => gl::RGBA,
            TextureFormat::R32Ui => gl::RED_INTEGER,
            TextureFormat::Depth24 | TextureFormat::Depth32f => gl::DEPTH_COMPONENT,
            TextureFormat::Depth24Stencil8 | TextureFormat::Depth32fStencil8 => gl::DEPTH_STENCIL,
        }
    }

    /// The pixel transfer type matching [`gl_format`](TextureFormat::gl_format).
    pub fn gl_type(self) -> GLenum {
        match self {
            TextureFormat::Rgba8 => gl::UNSIGNED_BYTE,
            TextureFormat::Rgba16f => gl::HALF_FLOAT,
            TextureFormat::Rgba32f => gl::FLOAT,
            TextureFormat::R32Ui => gl::UNSIGNED_INT,
            TextureFormat::Depth24 => gl::UNSIGNED_INT,
            TextureFormat::Depth32f => gl::FLOAT,
            TextureFormat::Depth24Stencil8 => gl::UNSIGNED_INT_24_8,
            TextureFormat::Depth32fStencil8 => gl::FLOAT_32_UNSIGNED_INT_24_8_REV,
        }
    }
}

/// A 2D texture name with the metadata attachment code needs.
#[derive(Debug)]
pub struct Texture2D {
    id: GLuint,
    dimensions: (u32, u32),
    format: TextureFormat,
    creation_context: ContextId,
}

impl Texture2D {
    /// Wraps an existing texture name.
    ///
    /// `id` must name a `GL_TEXTURE_2D` object of the given dimensions and
    /// format, allocated in the context behind `ctxt`. Ownership is not
    /// taken: dropping the wrapper does not delete the texture.
    pub fn from_raw(
        ctxt: &CommandContext<'_>,
        id: GLuint,
        dimensions: (u32, u32),
        format: TextureFormat,
    ) -> Texture2D {
        Texture2D {
            id,
            dimensions,
            format,
            creation_context: ctxt.context_id,
        }
    }

    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// The pixel format.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Binds the texture to `GL_TEXTURE_2D` on the given unit.
    ///
    /// Redundant binds are skipped through the context's state mirror.
    pub fn bind_to_unit(&self, ctxt: &mut CommandContext<'_>, unit: u32) {
        check_context(ctxt, self.creation_context);
        bind_to_unit(ctxt, unit, self.id);
    }

    /// Unbinds whatever texture is bound to `GL_TEXTURE_2D` on the unit.
    pub fn unbind_unit(ctxt: &mut CommandContext<'_>, unit: u32) {
        bind_to_unit(ctxt, unit, 0);
    }
}

fn bind_to_unit(ctxt: &mut CommandContext<'_>, unit: u32, texture: GLuint) {
    debug_assert!(
        (unit as i64) < ctxt.capabilities.max_combined_texture_image_units as i64,
        "texture unit {} exceeds GL_MAX_COMBINED_TEXTURE_IMAGE_UNITS ({})",
        unit,
        ctxt.capabilities.max_combined_texture_image_units
    );
    let unit_enum = gl::TEXTURE0 + unit;
    if ctxt.state.active_texture != unit_enum {
        ctxt.gl.active_texture(unit_enum);
        ctxt.state.active_texture = unit_enum;
    }
    let mirror = ctxt.state.texture_unit_mut(unit);
    if mirror.texture != texture {
        ctxt.gl.bind_texture(gl::TEXTURE_2D, texture);
        mirror.texture = texture;
    }
}

impl GlObject for Texture2D {
    type Id = GLuint;

    fn get_id(&self) -> GLuint {
        self.id
    }
}
