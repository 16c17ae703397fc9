use crate::context::GlApi;
use crate::gl;
use crate::gl::types::GLint;

/// Implementation-defined limits queried once at context creation.
#[derive(Debug, Clone)]
pub struct Capabilities {
    /// Number of color attachment slots per framebuffer
    /// (`GL_MAX_COLOR_ATTACHMENTS`).
    pub max_color_attachments: GLint,

    /// Maximum number of simultaneous draw buffers
    /// (`GL_MAX_DRAW_BUFFERS`).
    pub max_draw_buffers: GLint,

    /// Total number of texture units usable across all shader stages
    /// (`GL_MAX_COMBINED_TEXTURE_IMAGE_UNITS`).
    pub max_combined_texture_image_units: GLint,
}

/// Queries the limits of the current context.
///
/// The context matching `gl` must be current on the calling thread.
pub fn get_capabilities(gl: &dyn GlApi) -> Capabilities {
    Capabilities {
        max_color_attachments: gl.get_integerv(gl::MAX_COLOR_ATTACHMENTS),
        max_draw_buffers: gl.get_integerv(gl::MAX_DRAW_BUFFERS),
        max_combined_texture_image_units: gl.get_integerv(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS),
    }
}
