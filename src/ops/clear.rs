use crate::context::CommandContext;
use crate::gl;
use crate::gl::types::GLint;

/// Clears the buffers of the currently bound draw framebuffer.
///
/// Each `Some` selects the corresponding buffer for clearing and gives the
/// value to clear to. Clear values are cached in the context's state mirror,
/// so repeated clears with the same values only cost the `glClear` call.
/// Passing `None` for everything is a no-op.
pub fn clear(
    ctxt: &mut CommandContext<'_>,
    color: Option<(f32, f32, f32, f32)>,
    depth: Option<f32>,
    stencil: Option<GLint>,
) {
    let mut mask = 0;

    if let Some(color) = color {
        if ctxt.state.clear_color != color {
            ctxt.gl.clear_color(color.0, color.1, color.2, color.3);
            ctxt.state.clear_color = color;
        }
        mask |= gl::COLOR_BUFFER_BIT;
    }

    if let Some(depth) = depth {
        if ctxt.state.clear_depth != depth {
            ctxt.gl.clear_depth(depth);
            ctxt.state.clear_depth = depth;
        }
        // clearing depth is ignored while the depth mask is off
        if !ctxt.state.depth_mask {
            ctxt.gl.depth_mask(true);
            ctxt.state.depth_mask = true;
        }
        mask |= gl::DEPTH_BUFFER_BIT;
    }

    if let Some(stencil) = stencil {
        if ctxt.state.clear_stencil != stencil {
            ctxt.gl.clear_stencil(stencil);
            ctxt.state.clear_stencil = stencil;
        }
        mask |= gl::STENCIL_BUFFER_BIT;
    }

    if mask != 0 {
        ctxt.gl.clear(mask);
    }
}
