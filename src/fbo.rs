//! Framebuffer objects with tracked attachment tables.
//!
//! A [`FrameBufferObject`] mirrors the native object's attachment state: one
//! entry per color slot, a depth and a stencil attachment, and a draw-buffer
//! list whose order is independent of the slot indices. All attach and
//! detach operations keep the mirror and the native object in sync, so
//! queries like [`attachment_location`](FrameBufferObject::attachment_location)
//! never have to ask the driver.
//!
//! Binding follows a save/restore protocol: [`activate`](FrameBufferObject::activate)
//! remembers whatever was bound before it, and
//! [`deactivate`](FrameBufferObject::deactivate) puts that binding back. The
//! saved binding is a single value, not a stack; interleaving activations of
//! several framebuffers restores the binding saved by the most recent
//! `activate` of the one being deactivated.

use std::cell::Cell;
use std::error::Error;
use std::fmt;

use smallvec::{smallvec, SmallVec};

use crate::context::{check_context, CommandContext, ContextId};
use crate::gl;
use crate::gl::types::{GLenum, GLuint};
use crate::texture::Texture2D;
use crate::GlObject;

/// Error returned by attachment-table operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferError {
    /// Every color slot is occupied.
    ResourceExhausted {
        /// The number of color slots of this framebuffer.
        max: usize,
    },
    /// A slot index outside the framebuffer's capacity was requested.
    InvalidSlot {
        /// The requested slot.
        slot: usize,
        /// The number of color slots of this framebuffer.
        max: usize,
    },
}

impl fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FramebufferError::ResourceExhausted { max } => {
                write!(f, "all {} color attachment slots are in use", max)
            }
            FramebufferError::InvalidSlot { slot, max } => {
                write!(
                    f,
                    "color attachment slot {} is out of range (0..{})",
                    slot, max
                )
            }
        }
    }
}

impl Error for FramebufferError {}

/// Result of `glCheckFramebufferStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    /// The framebuffer is complete and can be rendered to.
    Complete,
    /// The default framebuffer is bound but does not exist.
    Undefined,
    /// An attachment is incomplete (zero size, bad format, ...).
    IncompleteAttachment,
    /// The framebuffer has no attachment at all.
    IncompleteMissingAttachment,
    /// A draw buffer references an empty attachment point.
    IncompleteDrawBuffer,
    /// The read buffer references an empty attachment point.
    IncompleteReadBuffer,
    /// The attachment combination is not supported by the implementation.
    Unsupported,
    /// Attachments disagree on sample counts.
    IncompleteMultisample,
    /// Attachments disagree on being layered.
    IncompleteLayerTargets,
    /// A status value this crate does not know.
    Unknown(GLenum),
}

impl From<GLenum> for FramebufferStatus {
    fn from(status: GLenum) -> FramebufferStatus {
        match status {
            gl::FRAMEBUFFER_COMPLETE => FramebufferStatus::Complete,
            gl::FRAMEBUFFER_UNDEFINED => FramebufferStatus::Undefined,
            gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => FramebufferStatus::IncompleteAttachment,
            gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => {
                FramebufferStatus::IncompleteMissingAttachment
            }
            gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => FramebufferStatus::IncompleteDrawBuffer,
            gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => FramebufferStatus::IncompleteReadBuffer,
            gl::FRAMEBUFFER_UNSUPPORTED => FramebufferStatus::Unsupported,
            gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => FramebufferStatus::IncompleteMultisample,
            gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => FramebufferStatus::IncompleteLayerTargets,
            other => FramebufferStatus::Unknown(other),
        }
    }
}

impl FramebufferStatus {
    /// True for [`FramebufferStatus::Complete`].
    pub fn is_complete(self) -> bool {
        self == FramebufferStatus::Complete
    }
}

impl fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FramebufferStatus::Complete => f.write_str("GL_FRAMEBUFFER_COMPLETE"),
            FramebufferStatus::Undefined => f.write_str("GL_FRAMEBUFFER_UNDEFINED"),
            FramebufferStatus::IncompleteAttachment => {
                f.write_str("GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT")
            }
            FramebufferStatus::IncompleteMissingAttachment => {
                f.write_str("GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT")
            }
            FramebufferStatus::IncompleteDrawBuffer => {
                f.write_str("GL_FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER")
            }
            FramebufferStatus::IncompleteReadBuffer => {
                f.write_str("GL_FRAMEBUFFER_INCOMPLETE_READ_BUFFER")
            }
            FramebufferStatus::Unsupported => f.write_str("GL_FRAMEBUFFER_UNSUPPORTED"),
            FramebufferStatus::IncompleteMultisample => {
                f.write_str("GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE")
            }
            FramebufferStatus::IncompleteLayerTargets => {
                f.write_str("GL_FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS")
            }
            FramebufferStatus::Unknown(value) => write!(f, "unknown status 0x{:04x}", value),
        }
    }
}

/// A framebuffer object and the mirror of its attachment table.
///
/// Attachment points on the public API are plain GL enumerants:
/// `gl::COLOR_ATTACHMENT0 + n` for color slot `n`, `gl::DEPTH_ATTACHMENT`,
/// `gl::STENCIL_ATTACHMENT` and `gl::DEPTH_STENCIL_ATTACHMENT`.
pub struct FrameBufferObject {
    id: GLuint,
    /// Texture id per color slot, 0 meaning empty. Length is the context's
    /// `GL_MAX_COLOR_ATTACHMENTS`.
    color_slots: SmallVec<[GLuint; 16]>,
    /// Color attachment enums in draw-buffer order.
    draw_buffers: SmallVec<[GLenum; 16]>,
    depth_id: GLuint,
    stencil_id: GLuint,
    /// Binding saved by the latest `activate`.
    prev_fbo: GLuint,
    /// Binding saved by the latest `set_read_blit(true)`. A `Cell` so that
    /// blit sources can stay shared.
    prev_read_fbo: Cell<GLuint>,
    /// Binding saved by the latest `set_draw_blit(true)`.
    prev_draw_fbo: GLuint,
    creation_context: ContextId,
}

impl FrameBufferObject {
    /// Creates an empty framebuffer object on the given context.
    pub fn new(ctxt: &mut CommandContext<'_>) -> FrameBufferObject {
        let id = ctxt.gl.gen_framebuffer();
        let max = ctxt.capabilities.max_color_attachments as usize;
        FrameBufferObject {
            id,
            color_slots: smallvec![0; max],
            draw_buffers: SmallVec::new(),
            depth_id: 0,
            stencil_id: 0,
            prev_fbo: 0,
            prev_read_fbo: Cell::new(0),
            prev_draw_fbo: 0,
            creation_context: ctxt.context_id,
        }
    }

    /// The native framebuffer name.
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Number of color slots of this framebuffer.
    pub fn max_color_attachments(&self) -> usize {
        self.color_slots.len()
    }

    /// Binds the framebuffer to `GL_FRAMEBUFFER`, remembering the previous
    /// binding. Activating an already active framebuffer is a no-op and
    /// leaves the saved binding untouched.
    pub fn activate(&mut self, ctxt: &mut CommandContext<'_>) {
        check_context(ctxt, self.creation_context);
        let current = ctxt.state.draw_framebuffer;
        if current != self.id {
            self.prev_fbo = current;
            ctxt.gl.bind_framebuffer(gl::FRAMEBUFFER, self.id);
            ctxt.state.draw_framebuffer = self.id;
            ctxt.state.read_framebuffer = self.id;
        }
    }

    /// Restores the binding saved by the latest [`activate`](Self::activate).
    /// Does nothing when the framebuffer is not the one currently bound.
    pub fn deactivate(&self, ctxt: &mut CommandContext<'_>) {
        check_context(ctxt, self.creation_context);
        if ctxt.state.draw_framebuffer == self.id && self.prev_fbo != self.id {
            ctxt.gl.bind_framebuffer(gl::FRAMEBUFFER, self.prev_fbo);
            ctxt.state.draw_framebuffer = self.prev_fbo;
            ctxt.state.read_framebuffer = self.prev_fbo;
        }
    }

    /// True if this framebuffer is the one currently bound for drawing.
    pub fn is_active(&self, ctxt: &CommandContext<'_>) -> bool {
        ctxt.state.draw_framebuffer == self.id
    }

    /// Binds the default framebuffer (0) to `GL_FRAMEBUFFER`.
    pub fn unbind_all(ctxt: &mut CommandContext<'_>) {
        if ctxt.state.draw_framebuffer != 0 || ctxt.state.read_framebuffer != 0 {
            ctxt.gl.bind_framebuffer(gl::FRAMEBUFFER, 0);
            ctxt.state.draw_framebuffer = 0;
            ctxt.state.read_framebuffer = 0;
        }
    }

    /// Attaches `texture` to the first free color slot.
    ///
    /// The slot is appended to the draw-buffer order. Returns the attachment
    /// point used, or [`FramebufferError::ResourceExhausted`] when the table
    /// is full. The framebuffer must be active.
    pub fn attach_color_texture(
        &mut self,
        ctxt: &mut CommandContext<'_>,
        texture: &Texture2D,
    ) -> Result<GLenum, FramebufferError> {
        check_context(ctxt, self.creation_context);
        debug_assert!(self.is_active(ctxt), "attaching to an inactive framebuffer");

        let slot = self
            .color_slots
            .iter()
            .position(|&id| id == 0)
            .ok_or(FramebufferError::ResourceExhausted {
                max: self.color_slots.len(),
            })?;

        let attachment = gl::COLOR_ATTACHMENT0 + slot as GLenum;
        self.color_slots[slot] = texture.get_id();
        self.draw_buffers.push(attachment);
        ctxt.gl.framebuffer_texture_2d(
            gl::FRAMEBUFFER,
            attachment,
            gl::TEXTURE_2D,
            texture.get_id(),
            0,
        );
        Ok(attachment)
    }

    /// Attaches `texture` to an explicit color slot.
    ///
    /// With `from_rear` the slot counts down from the last one, so slot 0
    /// means the highest-numbered slot. `forced_position`, when given, is
    /// the position the attachment takes in the draw-buffer order instead of
    /// being appended; on an already occupied slot it moves the existing
    /// entry. The framebuffer must be active.
    pub fn attach_color_texture_at(
        &mut self,
        ctxt: &mut CommandContext<'_>,
        texture: &Texture2D,
        slot: usize,
        from_rear: bool,
        forced_position: Option<usize>,
    ) -> Result<GLenum, FramebufferError> {
        check_context(ctxt, self.creation_context);
        debug_assert!(self.is_active(ctxt), "attaching to an inactive framebuffer");

        let max = self.color_slots.len();
        if self.draw_buffers.len() == max {
            return Err(FramebufferError::ResourceExhausted { max });
        }

        let resolved = if from_rear {
            max.checked_sub(slot + 1)
                .ok_or(FramebufferError::InvalidSlot { slot, max })?
        } else {
            slot
        };
        if resolved >= max {
            return Err(FramebufferError::InvalidSlot { slot, max });
        }

        let attachment = gl::COLOR_ATTACHMENT0 + resolved as GLenum;
        if self.color_slots[resolved] == 0 {
            match forced_position {
                Some(pos) if pos <= self.draw_buffers.len() => {
                    self.draw_buffers.insert(pos, attachment)
                }
                _ => self.draw_buffers.push(attachment),
            }
        } else if let Some(pos) = forced_position {
            // Slot already in use: the existing draw-buffer entry moves to
            // the requested position, the texture id below is updated.
            if let Some(current) = self.draw_buffers.iter().position(|&b| b == attachment) {
                if current != pos && pos < self.draw_buffers.len() {
                    self.draw_buffers.remove(current);
                    self.draw_buffers.insert(pos, attachment);
                }
            }
        }
        self.color_slots[resolved] = texture.get_id();

        ctxt.gl.framebuffer_texture_2d(
            gl::FRAMEBUFFER,
            attachment,
            gl::TEXTURE_2D,
            texture.get_id(),
            0,
        );
        Ok(attachment)
    }

    /// Attaches `texture` to an explicit attachment point.
    ///
    /// Depth, stencil and combined depth/stencil points update the
    /// respective attachment; color points go through the slot table as in
    /// [`attach_color_texture_at`](Self::attach_color_texture_at) without
    /// reordering. The framebuffer must be active.
    pub fn attach_texture(
        &mut self,
        ctxt: &mut CommandContext<'_>,
        texture: &Texture2D,
        attachment: GLenum,
    ) -> Result<GLenum, FramebufferError> {
        check_context(ctxt, self.creation_context);
        debug_assert!(self.is_active(ctxt), "attaching to an inactive framebuffer");

        match attachment {
            gl::DEPTH_ATTACHMENT => {
                self.depth_id = texture.get_id();
            }
            gl::STENCIL_ATTACHMENT => {
                self.stencil_id = texture.get_id();
            }
            gl::DEPTH_STENCIL_ATTACHMENT => {
                self.depth_id = texture.get_id();
                self.stencil_id = texture.get_id();
            }
            color => {
                let slot = color
                    .checked_sub(gl::COLOR_ATTACHMENT0)
                    .map(|s| s as usize)
                    .filter(|&s| s < self.color_slots.len())
                    .ok_or(FramebufferError::InvalidSlot {
                        slot: color.wrapping_sub(gl::COLOR_ATTACHMENT0) as usize,
                        max: self.color_slots.len(),
                    })?;
                return self.attach_color_texture_at(ctxt, texture, slot, false, None);
            }
        }

        ctxt.gl
            .framebuffer_texture(gl::FRAMEBUFFER, attachment, texture.get_id(), 0);
        Ok(attachment)
    }

    /// Detaches whatever is attached at the given attachment point.
    ///
    /// Detaching an empty color slot only logs a warning. The framebuffer
    /// must be active.
    pub fn detach(
        &mut self,
        ctxt: &mut CommandContext<'_>,
        attachment: GLenum,
    ) -> Result<(), FramebufferError> {
        check_context(ctxt, self.creation_context);
        debug_assert!(self.is_active(ctxt), "detaching from an inactive framebuffer");

        match attachment {
            gl::DEPTH_ATTACHMENT => {
                self.depth_id = 0;
            }
            gl::STENCIL_ATTACHMENT => {
                self.stencil_id = 0;
            }
            gl::DEPTH_STENCIL_ATTACHMENT => {
                self.depth_id = 0;
                self.stencil_id = 0;
            }
            color => {
                let slot = color
                    .checked_sub(gl::COLOR_ATTACHMENT0)
                    .map(|s| s as usize)
                    .filter(|&s| s < self.color_slots.len())
                    .ok_or(FramebufferError::InvalidSlot {
                        slot: color.wrapping_sub(gl::COLOR_ATTACHMENT0) as usize,
                        max: self.color_slots.len(),
                    })?;
                if self.color_slots[slot] == 0 {
                    log::warn!(
                        "detach of empty color slot {} on framebuffer {}",
                        slot,
                        self.id
                    );
                    return Ok(());
                }
                self.color_slots[slot] = 0;
                if let Some(pos) = self.draw_buffers.iter().position(|&b| b == color) {
                    self.draw_buffers.remove(pos);
                }
            }
        }

        ctxt.gl
            .framebuffer_texture(gl::FRAMEBUFFER, attachment, 0, 0);
        Ok(())
    }

    /// Detaches every attachment, emptying the slot table and the
    /// draw-buffer order. Native detach calls are only issued for points
    /// that were actually occupied. The framebuffer must be active.
    pub fn detach_all(&mut self, ctxt: &mut CommandContext<'_>) {
        check_context(ctxt, self.creation_context);
        debug_assert!(self.is_active(ctxt), "detaching from an inactive framebuffer");

        for slot in 0..self.color_slots.len() {
            if self.color_slots[slot] != 0 {
                self.color_slots[slot] = 0;
                let attachment = gl::COLOR_ATTACHMENT0 + slot as GLenum;
                ctxt.gl
                    .framebuffer_texture(gl::FRAMEBUFFER, attachment, 0, 0);
            }
        }
        self.draw_buffers.clear();

        if self.depth_id != 0 && self.depth_id == self.stencil_id {
            ctxt.gl
                .framebuffer_texture(gl::FRAMEBUFFER, gl::DEPTH_STENCIL_ATTACHMENT, 0, 0);
        } else {
            if self.depth_id != 0 {
                ctxt.gl
                    .framebuffer_texture(gl::FRAMEBUFFER, gl::DEPTH_ATTACHMENT, 0, 0);
            }
            if self.stencil_id != 0 {
                ctxt.gl
                    .framebuffer_texture(gl::FRAMEBUFFER, gl::STENCIL_ATTACHMENT, 0, 0);
            }
        }
        self.depth_id = 0;
        self.stencil_id = 0;
    }

    /// The position of an attachment in the draw-buffer order.
    ///
    /// Depth, stencil and combined points always report 0. Color points
    /// report their index in the current order, or `None` when the slot is
    /// not part of it.
    pub fn attachment_location(&self, attachment: GLenum) -> Option<usize> {
        match attachment {
            gl::DEPTH_ATTACHMENT | gl::STENCIL_ATTACHMENT | gl::DEPTH_STENCIL_ATTACHMENT => {
                Some(0)
            }
            color => self.draw_buffers.iter().position(|&b| b == color),
        }
    }

    /// Publishes the current draw-buffer order with `glDrawBuffers`.
    /// A framebuffer without color attachments is left untouched.
    pub fn define_draw_buffers(&self, ctxt: &mut CommandContext<'_>) {
        check_context(ctxt, self.creation_context);
        if self.draw_buffers.is_empty() {
            return;
        }
        debug_assert!(
            self.draw_buffers.len() <= ctxt.capabilities.max_draw_buffers as usize,
            "{} draw buffers exceed GL_MAX_DRAW_BUFFERS ({})",
            self.draw_buffers.len(),
            ctxt.capabilities.max_draw_buffers
        );
        ctxt.gl.draw_buffers(&self.draw_buffers);
    }

    /// Queries the completeness of the framebuffer.
    ///
    /// An incomplete status is additionally reported as a warning through
    /// the `log` facade. The framebuffer must be active.
    pub fn check_status(&self, ctxt: &mut CommandContext<'_>) -> FramebufferStatus {
        check_context(ctxt, self.creation_context);
        let status = FramebufferStatus::from(ctxt.gl.check_framebuffer_status(gl::FRAMEBUFFER));
        if !status.is_complete() {
            log::warn!("framebuffer {} is incomplete: {}", self.id, status);
        }
        status
    }

    /// Binds or unbinds the framebuffer as the read target of a blit.
    ///
    /// `set_read_blit(true)` saves the current `GL_READ_FRAMEBUFFER` binding;
    /// `set_read_blit(false)` restores that saved binding.
    pub fn set_read_blit(&self, ctxt: &mut CommandContext<'_>, set: bool) {
        check_context(ctxt, self.creation_context);
        if set {
            self.prev_read_fbo.set(ctxt.state.read_framebuffer);
            bind_read(ctxt, self.id);
        } else {
            bind_read(ctxt, self.prev_read_fbo.get());
        }
    }

    /// Binds or unbinds the framebuffer as the draw target of a blit.
    ///
    /// `set_draw_blit(true)` saves the current `GL_DRAW_FRAMEBUFFER` binding;
    /// `set_draw_blit(false)` restores that saved binding.
    pub fn set_draw_blit(&mut self, ctxt: &mut CommandContext<'_>, set: bool) {
        check_context(ctxt, self.creation_context);
        if set {
            self.prev_draw_fbo = ctxt.state.draw_framebuffer;
            bind_draw(ctxt, self.id);
        } else {
            bind_draw(ctxt, self.prev_draw_fbo);
        }
    }

    /// True if at least one color slot is occupied.
    pub fn has_color_attachment(&self) -> bool {
        !self.draw_buffers.is_empty()
    }

    /// True if a depth attachment is present.
    pub fn has_depth_attachment(&self) -> bool {
        self.depth_id != 0
    }

    /// True if a stencil attachment is present.
    pub fn has_stencil_attachment(&self) -> bool {
        self.stencil_id != 0
    }

    /// The color attachment enums in draw-buffer order.
    pub fn draw_buffer_order(&self) -> &[GLenum] {
        &self.draw_buffers
    }

    /// The texture occupying the given color slot, if any.
    pub fn color_texture_in_slot(&self, slot: usize) -> Option<GLuint> {
        match self.color_slots.get(slot) {
            Some(&id) if id != 0 => Some(id),
            _ => None,
        }
    }

    /// One-line description of the slot table and draw-buffer order, for
    /// diagnostics.
    pub fn describe_draw_buffers(&self) -> String {
        let order: Vec<String> = self
            .draw_buffers
            .iter()
            .map(|&b| format!("color{}", b - gl::COLOR_ATTACHMENT0))
            .collect();
        let slots: Vec<String> = self
            .color_slots
            .iter()
            .enumerate()
            .filter(|&(_, &id)| id != 0)
            .map(|(slot, &id)| format!("{}=tex{}", slot, id))
            .collect();
        format!("order [{}], slots [{}]", order.join(", "), slots.join(", "))
    }

    /// Deletes the native object. The framebuffer is deactivated first if it
    /// is currently bound.
    pub fn destroy(mut self, ctxt: &mut CommandContext<'_>) {
        check_context(ctxt, self.creation_context);
        self.deactivate(ctxt);
        // deactivate is a no-op when prev_fbo == id; fall back to default
        if ctxt.state.draw_framebuffer == self.id {
            ctxt.gl.bind_framebuffer(gl::FRAMEBUFFER, 0);
            ctxt.state.draw_framebuffer = 0;
            ctxt.state.read_framebuffer = 0;
        }
        ctxt.gl.delete_framebuffer(self.id);
        self.id = 0;
    }
}

fn bind_read(ctxt: &mut CommandContext<'_>, id: GLuint) {
    if ctxt.state.read_framebuffer != id {
        ctxt.gl.bind_framebuffer(gl::READ_FRAMEBUFFER, id);
        ctxt.state.read_framebuffer = id;
    }
}

fn bind_draw(ctxt: &mut CommandContext<'_>, id: GLuint) {
    if ctxt.state.draw_framebuffer != id {
        ctxt.gl.bind_framebuffer(gl::DRAW_FRAMEBUFFER, id);
        ctxt.state.draw_framebuffer = id;
    }
}

impl fmt::Debug for FrameBufferObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FrameBufferObject {{ id: {}, {}, depth: {}, stencil: {} }}",
            self.id,
            self.describe_draw_buffers(),
            self.depth_id,
            self.stencil_id
        )
    }
}

impl GlObject for FrameBufferObject {
    type Id = GLuint;

    fn get_id(&self) -> GLuint {
        self.id
    }
}

impl Drop for FrameBufferObject {
    fn drop(&mut self) {
        if self.id != 0 {
            log::warn!(
                "framebuffer object {} dropped without destroy(); the native object leaks",
                self.id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            FramebufferStatus::from(gl::FRAMEBUFFER_COMPLETE),
            FramebufferStatus::Complete
        );
        assert_eq!(
            FramebufferStatus::from(gl::FRAMEBUFFER_UNSUPPORTED),
            FramebufferStatus::Unsupported
        );
        assert_eq!(
            FramebufferStatus::from(0x1234),
            FramebufferStatus::Unknown(0x1234)
        );
        assert!(FramebufferStatus::Complete.is_complete());
        assert!(!FramebufferStatus::IncompleteDrawBuffer.is_complete());
    }

    #[test]
    fn status_display_uses_gl_names() {
        assert_eq!(
            FramebufferStatus::IncompleteMissingAttachment.to_string(),
            "GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT"
        );
    }

    #[test]
    fn error_display() {
        let err = FramebufferError::ResourceExhausted { max: 8 };
        assert_eq!(err.to_string(), "all 8 color attachment slots are in use");
        let err = FramebufferError::InvalidSlot { slot: 9, max: 8 };
        assert_eq!(
            err.to_string(),
            "color attachment slot 9 is out of range (0..8)"
        );
    }
}
