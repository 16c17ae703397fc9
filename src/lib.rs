/*!
Framebuffer and render-target management for OpenGL-based visualization
pipelines.

OpenGL framebuffer objects are stateful and order-sensitive, and the API does
almost nothing to keep their attachment table consistent for you: a texture
can silently occupy two attachment points, draw buffers can reference empty
slots, and binding points are process-global so nested render-to-texture
passes trample each other's state. This crate wraps the native object in a
[`FrameBufferObject`] that tracks which texture occupies each color slot,
maintains the draw-buffer order independently of slot indices, saves and
restores the previously bound target on activation, and checks that every
risky operation happens on the rendering context that created the object.

On top of that sits [`image::ImageGl`], a composite render target bundling
N color layers, a depth layer and an optional picking (object-id) layer,
each backed by its own texture. It keeps the framebuffer's attachments
consistent whenever the referenced layer set changes and implements the
copy/resize/blit protocol used to move such composites between targets:
hardware blit on the fast path, a pixel-buffer copy for the layers blit
cannot cover.

All operations take an explicit [`context::CommandContext`] handle; there is
no global "current context" lookup. The raw GL entry points the crate issues
are gathered behind the [`context::GlApi`] trait, with
[`context::NativeGl`] (backed by bindings generated at build time) as the
production implementation.

Error handling is two-tier: capacity and slot-range misuse is returned as
[`FramebufferError`] and propagates to the caller; wrong-context use and
attaching to an inactive framebuffer are programmer errors, checked only in
debug builds. Framebuffer incompleteness is a non-fatal diagnostic reported
through the `log` facade.
*/

use std::fmt;

/// Raw OpenGL bindings, generated at build time.
///
/// Exposed because the attachment-point parameters of
/// [`FrameBufferObject::attach_texture`] and [`FrameBufferObject::detach`]
/// are plain GL enumerants (`gl::DEPTH_ATTACHMENT`, `gl::COLOR_ATTACHMENT0`
/// and friends).
#[allow(non_upper_case_globals, non_camel_case_types, non_snake_case)]
#[allow(unused_imports, missing_docs, clippy::all)]
pub mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

pub mod context;
pub mod fbo;
pub mod image;
pub mod ops;
pub mod texture;

pub use crate::context::{Backend, CommandContext, Context, ContextCreationError, ContextId};
pub use crate::fbo::{FrameBufferObject, FramebufferError, FramebufferStatus};
pub use crate::image::{ImageGl, ImageSource, LayerSource, ResampleBinding, ResampleShader};
pub use crate::texture::{Texture2D, TextureFormat};

/// Trait for types wrapping a native OpenGL object.
pub trait GlObject {
    /// The type of the object's identifier.
    type Id;

    /// Returns the id of the object.
    fn get_id(&self) -> Self::Id;
}

/// Area of a surface in pixels.
///
/// In OpenGL, the bottom-left hand corner of the surface is at `(0, 0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    /// Number of pixels between the left border of the surface and the left
    /// border of the rectangle.
    pub left: u32,
    /// Number of pixels between the bottom border of the surface and the
    /// bottom border of the rectangle.
    pub bottom: u32,
    /// Width of the area in pixels.
    pub width: u32,
    /// Height of the area in pixels.
    pub height: u32,
}

impl Rect {
    /// The rectangle covering a whole surface of the given dimensions.
    pub fn spanning(dimensions: (u32, u32)) -> Rect {
        Rect {
            left: 0,
            bottom: 0,
            width: dimensions.0,
            height: dimensions.1,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.left, self.bottom
        )
    }
}
