//! Composite render targets: N color layers, depth and picking, one FBO.
//!
//! An [`ImageGl`] is the GPU side of a multi-layer image. It owns a
//! [`FrameBufferObject`] and keeps its attachments pointing at the textures
//! backing the image's layers: color layers occupy the low color slots in
//! order, the picking layer sits in the highest slot (last in draw-buffer
//! order), and the depth layer goes to the depth or combined depth/stencil
//! attachment depending on its format.
//!
//! The layer textures are owned by whoever implements [`ImageSource`];
//! `ImageGl` re-synchronizes its attachments through
//! [`update`](ImageGl::update) whenever those representations may have been
//! swapped out.

use std::cmp;
use std::rc::Rc;

use crate::context::CommandContext;
use crate::fbo::{FrameBufferObject, FramebufferError};
use crate::gl;
use crate::gl::types::{GLenum, GLint};
use crate::ops;
use crate::texture::Texture2D;
use crate::Rect;

pub use self::layer::{ImageSource, LayerGl, LayerSource};

mod layer;

/// Texture units and scaling a [`ResampleShader`] invocation works with.
#[derive(Debug, Clone, Copy)]
pub struct ResampleBinding {
    /// Unit holding the source's primary color texture.
    pub color_unit: u32,
    /// Unit holding the source's depth texture, if one was bound.
    pub depth_unit: u32,
    /// Unit holding the source's picking texture, if one was bound.
    pub picking_unit: u32,
    /// Aspect-preserving scale to apply to the sampled coordinates.
    pub scale: (f32, f32),
}

/// A shader program that resamples bound source layers over the currently
/// active framebuffer.
///
/// Shader compilation and uniform plumbing live outside this crate; the
/// implementation is expected to render a full-viewport quad writing color,
/// depth and picking outputs from the units named in the binding.
pub trait ResampleShader {
    /// Draws the resampling quad.
    fn draw_quad(&self, ctxt: &mut CommandContext<'_>, binding: &ResampleBinding);
}

/// Aspect-preserving scale for resampling `source` dimensions onto `target`.
///
/// The wider of the two aspect ratios is letterboxed on the other axis.
/// Degenerate (zero-sized) inputs scale by 1.
pub fn resize_scale(source: (u32, u32), target: (u32, u32)) -> (f32, f32) {
    if source.0 == 0 || source.1 == 0 || target.0 == 0 || target.1 == 0 {
        return (1.0, 1.0);
    }
    let src = source.0 as f32 / source.1 as f32;
    let dst = target.0 as f32 / target.1 as f32;
    if src > dst {
        (1.0, dst / src)
    } else {
        (src / dst, 1.0)
    }
}

/// GPU representation of a multi-layer image.
pub struct ImageGl {
    fbo: FrameBufferObject,
    color_layers: Vec<Rc<LayerGl>>,
    depth_layer: Option<Rc<LayerGl>>,
    picking_layer: Option<Rc<LayerGl>>,
    /// Attachment point the picking layer currently occupies, 0 when absent.
    picking_attachment: GLenum,
    valid: bool,
}

impl ImageGl {
    /// Creates an image representation with an empty framebuffer.
    pub fn new(ctxt: &mut CommandContext<'_>) -> ImageGl {
        ImageGl {
            fbo: FrameBufferObject::new(ctxt),
            color_layers: Vec::new(),
            depth_layer: None,
            picking_layer: None,
            picking_attachment: 0,
            valid: false,
        }
    }

    /// Rebuilds the framebuffer's attachments from the current layer set.
    ///
    /// Color layers are attached to the first free slots in order, the depth
    /// layer to the depth or combined depth/stencil point, and the picking
    /// layer to the last slot so it never collides with color layers.
    /// With `clear_attachments` the freshly attached buffers are cleared.
    /// Completeness is checked and logged before the previous binding is
    /// restored.
    pub fn reattach_all_layers(
        &mut self,
        ctxt: &mut CommandContext<'_>,
        clear_attachments: bool,
    ) -> Result<(), FramebufferError> {
        self.fbo.activate(ctxt);
        self.fbo.detach_all(ctxt);
        self.picking_attachment = 0;

        let result = self.perform_attach(ctxt);
        if result.is_ok() {
            self.fbo.define_draw_buffers(ctxt);
            if clear_attachments {
                let color = self.fbo.has_color_attachment().then_some((0.0, 0.0, 0.0, 0.0));
                let depth = self.fbo.has_depth_attachment().then_some(1.0);
                let stencil = self.fbo.has_stencil_attachment().then_some(0 as GLint);
                ops::clear(ctxt, color, depth, stencil);
            }
            self.fbo.check_status(ctxt);
        }

        self.fbo.deactivate(ctxt);
        result
    }

    fn perform_attach(&mut self, ctxt: &mut CommandContext<'_>) -> Result<(), FramebufferError> {
        for layer in &self.color_layers {
            self.fbo.attach_color_texture(ctxt, layer.texture())?;
        }

        if let Some(ref depth) = self.depth_layer {
            let attachment = if depth.format().has_stencil() {
                gl::DEPTH_STENCIL_ATTACHMENT
            } else {
                gl::DEPTH_ATTACHMENT
            };
            self.fbo.attach_texture(ctxt, depth.texture(), attachment)?;
        }

        if let Some(ref picking) = self.picking_layer {
            self.picking_attachment =
                self.fbo
                    .attach_color_texture_at(ctxt, picking.texture(), 0, true, None)?;
        }
        Ok(())
    }

    /// Synchronizes this representation with the owner's current layers.
    ///
    /// Fetches each layer's representation (the editable one when `editable`
    /// is set), reattaches the framebuffer when the set of textures changed
    /// or the representation was not valid, and marks it valid. The picking
    /// layer inherits the primary color layer's format and dimensions before
    /// its representation is materialized.
    pub fn update(
        &mut self,
        owner: &mut dyn ImageSource,
        ctxt: &mut CommandContext<'_>,
        editable: bool,
    ) -> Result<(), FramebufferError> {
        let mut colors = Vec::with_capacity(owner.color_layer_count());
        for index in 0..owner.color_layer_count() {
            let layer = owner.color_layer_mut(index);
            let repr = if editable {
                layer.editable_representation()
            } else {
                layer.representation()
            };
            // keep the owner's metadata in sync with what is actually on
            // the device
            layer.set_format(repr.format());
            layer.set_dimensions(repr.dimensions());
            colors.push(repr);
        }

        let depth = owner.depth_layer_mut().map(|layer| {
            if editable {
                layer.editable_representation()
            } else {
                layer.representation()
            }
        });

        let primary_meta = colors
            .first()
            .map(|layer| (layer.format(), layer.dimensions()));
        let picking = owner.picking_layer_mut().map(|layer| {
            if let Some((format, dimensions)) = primary_meta {
                layer.set_format(format);
                layer.set_dimensions(dimensions);
            }
            if editable {
                layer.editable_representation()
            } else {
                layer.representation()
            }
        });

        let changed = !same_layers(&self.color_layers, &colors)
            || !same_layer(&self.depth_layer, &depth)
            || !same_layer(&self.picking_layer, &picking);

        let needs_reattach = changed || !self.valid || self.color_layers.is_empty();

        self.color_layers = colors;
        self.depth_layer = depth;
        self.picking_layer = picking;

        if needs_reattach {
            self.reattach_all_layers(ctxt, true)?;
        }
        self.valid = true;
        Ok(())
    }

    /// Activates the framebuffer and sizes the viewport to the image.
    pub fn activate_buffer(&mut self, ctxt: &mut CommandContext<'_>) {
        self.fbo.activate(ctxt);
        let (width, height) = self.dimensions();
        let viewport = (0, 0, width as GLint, height as GLint);
        if ctxt.state.viewport != Some(viewport) {
            ctxt.gl.viewport(0, 0, viewport.2, viewport.3);
            ctxt.state.viewport = Some(viewport);
        }
    }

    /// Restores the framebuffer binding saved by
    /// [`activate_buffer`](ImageGl::activate_buffer).
    pub fn deactivate_buffer(&self, ctxt: &mut CommandContext<'_>) {
        self.fbo.deactivate(ctxt);
    }

    /// The dimensions of the primary color layer, falling back to the depth
    /// layer, or `(0, 0)` for an empty image.
    pub fn dimensions(&self) -> (u32, u32) {
        self.color_layers
            .first()
            .map(|layer| layer.dimensions())
            .or_else(|| self.depth_layer.as_ref().map(|layer| layer.dimensions()))
            .unwrap_or((0, 0))
    }

    /// Whether the attachments match the layer set seen by the last
    /// [`update`](ImageGl::update).
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Forces the next [`update`](ImageGl::update) to reattach.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Number of color layers.
    pub fn color_layer_count(&self) -> usize {
        self.color_layers.len()
    }

    /// The `index`-th color layer.
    pub fn color_layer(&self, index: usize) -> Option<&Rc<LayerGl>> {
        self.color_layers.get(index)
    }

    /// The depth layer, if present.
    pub fn depth_layer(&self) -> Option<&Rc<LayerGl>> {
        self.depth_layer.as_ref()
    }

    /// The picking layer, if present.
    pub fn picking_layer(&self) -> Option<&Rc<LayerGl>> {
        self.picking_layer.as_ref()
    }

    /// The attachment point the picking layer occupies, 0 when absent.
    pub fn picking_attachment(&self) -> GLenum {
        self.picking_attachment
    }

    /// The underlying framebuffer object.
    pub fn fbo(&self) -> &FrameBufferObject {
        &self.fbo
    }

    /// Resamples this image's layers into `target` through a shader pass.
    ///
    /// Source layers are bound to fixed texture units (color 0, depth 1,
    /// picking 2), the target framebuffer is activated with its viewport,
    /// and the quad is drawn with the depth test forced to pass and depth
    /// writes enabled so the target's depth layer is always rewritten. The
    /// prior depth state and framebuffer binding are restored afterwards.
    pub fn copy_and_resize_into(
        &self,
        ctxt: &mut CommandContext<'_>,
        target: &mut ImageGl,
        shader: &dyn ResampleShader,
    ) {
        let binding = ResampleBinding {
            color_unit: 0,
            depth_unit: 1,
            picking_unit: 2,
            scale: resize_scale(self.dimensions(), target.dimensions()),
        };

        if let Some(color) = self.color_layers.first() {
            color.texture().bind_to_unit(ctxt, binding.color_unit);
        }
        if let Some(ref depth) = self.depth_layer {
            depth.texture().bind_to_unit(ctxt, binding.depth_unit);
        }
        if let Some(ref picking) = self.picking_layer {
            picking.texture().bind_to_unit(ctxt, binding.picking_unit);
        }

        target.activate_buffer(ctxt);

        let prev_test = ctxt.state.enabled_depth_test;
        let prev_func = ctxt.state.depth_func;
        let prev_mask = ctxt.state.depth_mask;

        set_depth_test(ctxt, true);
        set_depth_func(ctxt, gl::ALWAYS);
        set_depth_mask(ctxt, true);

        // letterboxed borders stay at the clear values
        ops::clear(
            ctxt,
            Some((0.0, 0.0, 0.0, 0.0)),
            target.depth_layer.as_ref().map(|_| 1.0),
            None,
        );
        shader.draw_quad(ctxt, &binding);

        set_depth_test(ctxt, prev_test);
        set_depth_func(ctxt, prev_func);
        set_depth_mask(ctxt, prev_mask);

        target.deactivate_buffer(ctxt);

        Texture2D::unbind_unit(ctxt, binding.color_unit);
        Texture2D::unbind_unit(ctxt, binding.depth_unit);
        Texture2D::unbind_unit(ctxt, binding.picking_unit);
    }

    /// Copies `source`'s layers into this image, preferring hardware blits.
    ///
    /// The primary color layer goes through one framebuffer blit, with the
    /// depth and stencil bits added whenever both framebuffers carry the
    /// respective attachment. Additional attachments, the picking slot
    /// included, are matched by draw-buffer position and blitted one by one
    /// (position, not slot identity, decides the pairing; when the two
    /// orders disagree in shape this can pair a color slot with a picking
    /// slot). Whatever the blit could not cover falls back to a
    /// pixel-buffer copy: the depth layer when the source carries stencil
    /// data the mask did not move, the picking layer when the positional
    /// loop did not land on both picking slots. Fallback copies require
    /// equal dimensions; mismatches are logged and skipped.
    pub fn update_from(&mut self, ctxt: &mut CommandContext<'_>, source: &ImageGl) {
        let src_rect = Rect::spanning(source.dimensions());
        let dst_rect = Rect::spanning(self.dimensions());

        source.fbo.set_read_blit(ctxt, true);
        self.fbo.set_draw_blit(ctxt, true);

        let mut mask = 0;
        if source.fbo.has_color_attachment() && self.fbo.has_color_attachment() {
            mask |= gl::COLOR_BUFFER_BIT;
        }
        let depth_blitted =
            source.fbo.has_depth_attachment() && self.fbo.has_depth_attachment();
        if depth_blitted {
            mask |= gl::DEPTH_BUFFER_BIT;
        }
        let stencil_blitted =
            source.fbo.has_stencil_attachment() && self.fbo.has_stencil_attachment();
        if stencil_blitted {
            mask |= gl::STENCIL_BUFFER_BIT;
        }

        if mask != 0 {
            ops::blit(ctxt, &src_rect, &dst_rect, mask, gl::NEAREST);
        }

        // additional attachments pair up by draw-buffer position
        let shared = cmp::min(
            source.fbo.draw_buffer_order().len(),
            self.fbo.draw_buffer_order().len(),
        );
        let mut picking_blitted = false;
        for index in 1..shared {
            let src_attachment = source.fbo.draw_buffer_order()[index];
            let dst_attachment = self.fbo.draw_buffer_order()[index];
            ctxt.gl.read_buffer(src_attachment);
            ctxt.gl.draw_buffer(dst_attachment);
            ops::blit(ctxt, &src_rect, &dst_rect, gl::COLOR_BUFFER_BIT, gl::NEAREST);
            if source.picking_attachment != 0
                && src_attachment == source.picking_attachment
                && dst_attachment == self.picking_attachment
            {
                picking_blitted = true;
            }
        }

        // the per-attachment loop changed the buffer selections
        if shared > 1 {
            if let Some(&first) = source.fbo.draw_buffer_order().first() {
                ctxt.gl.read_buffer(first);
            }
            self.fbo.define_draw_buffers(ctxt);
        }

        self.fbo.set_draw_blit(ctxt, false);
        source.fbo.set_read_blit(ctxt, false);

        // what blit could not cover goes through the pixel-buffer path
        let depth_fallback = match (source.depth_layer.as_ref(), self.depth_layer.as_ref()) {
            (Some(src), Some(dst)) => {
                let src_has_stencil = src.format().has_stencil();
                if !depth_blitted || (src_has_stencil && !stencil_blitted) {
                    Some((src.clone(), dst.clone()))
                } else {
                    None
                }
            }
            _ => None,
        };
        if let Some((src, dst)) = depth_fallback {
            if src.dimensions() == dst.dimensions() {
                ops::read::copy_texture_via_pixel_buffer(ctxt, src.texture(), dst.texture());
            } else {
                log::warn!(
                    "depth layer copy skipped: dimensions differ ({:?} vs {:?})",
                    src.dimensions(),
                    dst.dimensions()
                );
            }
        }

        if !picking_blitted {
            if let (Some(src), Some(dst)) =
                (source.picking_layer.clone(), self.picking_layer.clone())
            {
                if src.dimensions() == dst.dimensions() {
                    ops::read::copy_texture_via_pixel_buffer(ctxt, src.texture(), dst.texture());
                } else {
                    log::warn!(
                        "picking layer copy skipped: dimensions differ ({:?} vs {:?})",
                        src.dimensions(),
                        dst.dimensions()
                    );
                }
            }
        }
    }

    /// Deletes the underlying framebuffer. The layer textures are owned by
    /// the image's source and are not touched.
    pub fn destroy(self, ctxt: &mut CommandContext<'_>) {
        let ImageGl { fbo, .. } = self;
        fbo.destroy(ctxt);
    }
}

fn same_layers(a: &[Rc<LayerGl>], b: &[Rc<LayerGl>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Rc::ptr_eq(x, y))
}

fn same_layer(a: &Option<Rc<LayerGl>>, b: &Option<Rc<LayerGl>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

fn set_depth_test(ctxt: &mut CommandContext<'_>, enabled: bool) {
    if ctxt.state.enabled_depth_test != enabled {
        if enabled {
            ctxt.gl.enable(gl::DEPTH_TEST);
        } else {
            ctxt.gl.disable(gl::DEPTH_TEST);
        }
        ctxt.state.enabled_depth_test = enabled;
    }
}

fn set_depth_func(ctxt: &mut CommandContext<'_>, func: GLenum) {
    if ctxt.state.depth_func != func {
        ctxt.gl.depth_func(func);
        ctxt.state.depth_func = func;
    }
}

fn set_depth_mask(ctxt: &mut CommandContext<'_>, mask: bool) {
    if ctxt.state.depth_mask != mask {
        ctxt.gl.depth_mask(mask);
        ctxt.state.depth_mask = mask;
    }
}
