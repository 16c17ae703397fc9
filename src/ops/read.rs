//! Texture-to-texture copies through a pixel buffer.
//!
//! Framebuffer blits cannot service every layer of a composite render
//! target: integer picking layers cannot be blitted together with
//! fixed-point color, and a blit only covers one depth attachment per call.
//! For those layers the data is packed from the source texture into a
//! staging buffer object and unpacked into the target texture, all on the
//! device, without a round trip to client memory.

use std::ptr;

use crate::context::CommandContext;
use crate::gl;
use crate::gl::types::{GLint, GLsizei, GLuint};
use crate::texture::Texture2D;

/// Copies the full contents of `source` into `target` through a pixel
/// buffer.
///
/// Both textures must have the same dimensions. The formats may differ as
/// long as they transfer with the same base format (depth to depth, color to
/// color); the source's transfer format and type are used for both the pack
/// and the unpack, letting the driver convert on unpack.
pub fn copy_texture_via_pixel_buffer(
    ctxt: &mut CommandContext<'_>,
    source: &Texture2D,
    target: &Texture2D,
) {
    debug_assert_eq!(
        source.dimensions(),
        target.dimensions(),
        "pixel-buffer copies require equal dimensions"
    );

    let (width, height) = source.dimensions();
    let size = width as isize * height as isize * source.format().bytes_per_pixel() as isize;
    let format = source.format().gl_format();
    let ty = source.format().gl_type();

    let pbo = ctxt.gl.gen_buffer();

    // pack: source texture into the buffer
    bind_pack_buffer(ctxt, pbo);
    ctxt.gl
        .buffer_data_size(gl::PIXEL_PACK_BUFFER, size, gl::STREAM_COPY);
    source.bind_to_unit(ctxt, 0);
    ctxt.gl
        .get_tex_image(gl::TEXTURE_2D, 0, format, ty, ptr::null_mut());
    bind_pack_buffer(ctxt, 0);

    // unpack: buffer into the target texture
    bind_unpack_buffer(ctxt, pbo);
    target.bind_to_unit(ctxt, 0);
    ctxt.gl.tex_sub_image_2d(
        gl::TEXTURE_2D,
        0,
        0 as GLint,
        0 as GLint,
        width as GLsizei,
        height as GLsizei,
        format,
        ty,
        ptr::null(),
    );
    bind_unpack_buffer(ctxt, 0);

    ctxt.gl.delete_buffer(pbo);
}

fn bind_pack_buffer(ctxt: &mut CommandContext<'_>, buffer: GLuint) {
    if ctxt.state.pixel_pack_buffer_binding != buffer {
        ctxt.gl.bind_buffer(gl::PIXEL_PACK_BUFFER, buffer);
        ctxt.state.pixel_pack_buffer_binding = buffer;
    }
}

fn bind_unpack_buffer(ctxt: &mut CommandContext<'_>, buffer: GLuint) {
    if ctxt.state.pixel_unpack_buffer_binding != buffer {
        ctxt.gl.bind_buffer(gl::PIXEL_UNPACK_BUFFER, buffer);
        ctxt.state.pixel_unpack_buffer_binding = buffer;
    }
}
