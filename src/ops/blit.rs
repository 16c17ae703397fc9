use crate::context::CommandContext;
use crate::gl;
use crate::gl::types::{GLbitfield, GLenum, GLint};
use crate::Rect;

/// Copies a rectangle from the read framebuffer to the draw framebuffer.
///
/// The caller is responsible for the `GL_READ_FRAMEBUFFER` and
/// `GL_DRAW_FRAMEBUFFER` bindings, typically through
/// [`set_read_blit`](crate::FrameBufferObject::set_read_blit) and
/// [`set_draw_blit`](crate::FrameBufferObject::set_draw_blit), and for the
/// read buffer selection when the source has several color attachments.
///
/// `mask` is a combination of `gl::COLOR_BUFFER_BIT`, `gl::DEPTH_BUFFER_BIT`
/// and `gl::STENCIL_BUFFER_BIT`. Depth and stencil blits require
/// `filter == gl::NEAREST`.
pub fn blit(
    ctxt: &mut CommandContext<'_>,
    source_rect: &Rect,
    target_rect: &Rect,
    mask: GLbitfield,
    filter: GLenum,
) {
    debug_assert!(
        filter == gl::NEAREST || mask & (gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT) == 0,
        "depth/stencil blits require GL_NEAREST filtering"
    );

    ctxt.gl.blit_framebuffer(
        source_rect.left as GLint,
        source_rect.bottom as GLint,
        (source_rect.left + source_rect.width) as GLint,
        (source_rect.bottom + source_rect.height) as GLint,
        target_rect.left as GLint,
        target_rect.bottom as GLint,
        (target_rect.left + target_rect.width) as GLint,
        (target_rect.bottom + target_rect.height) as GLint,
        mask,
        filter,
    );
}
