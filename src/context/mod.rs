//! Rendering context handles and the state tracked per context.
//!
//! A [`Context`] owns the loaded function table, a mirror of the GL state
//! this crate has set, and the limits queried at creation. Operations never
//! look up a global "current context": they receive a [`CommandContext`],
//! obtained through [`Context::exec`], which proves the caller holds the
//! context and grants access to its state mirror.

use std::cell::RefCell;
use std::error::Error;
use std::fmt;
use std::num::NonZeroU64;
use std::os::raw::c_void;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use fnv::FnvHashMap;
use lazy_static::lazy_static;

pub use self::api::{GlApi, NativeGl};
pub use self::capabilities::Capabilities;
pub use self::state::{GlState, TextureUnitState};

mod api;
mod capabilities;
mod state;

use crate::gl::types::GLint;

/// Identifier of a rendering context, unique within the process.
///
/// Objects remember the id of the context they were created in so that
/// cross-context misuse can be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(NonZeroU64);

impl ContextId {
    fn next() -> ContextId {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        ContextId(NonZeroU64::new(id).unwrap())
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

lazy_static! {
    /// Human-readable names for live contexts, used in diagnostics.
    static ref CONTEXT_NAMES: Mutex<FnvHashMap<ContextId, String>> =
        Mutex::new(FnvHashMap::default());
}

/// The diagnostic name a context was registered with, if any.
pub fn context_name(id: ContextId) -> String {
    CONTEXT_NAMES
        .lock()
        .unwrap()
        .get(&id)
        .cloned()
        .unwrap_or_else(|| format!("<unnamed context {}>", id))
}

/// Trait implemented by types providing an OpenGL context.
///
/// # Safety
///
/// Implementors must guarantee that `get_proc_address` returns pointers valid
/// for as long as the backend is alive, and that `is_current` accurately
/// reports whether the context is current on the calling thread.
pub unsafe trait Backend {
    /// Returns the address of the named OpenGL function.
    fn get_proc_address(&self, symbol: &str) -> *const c_void;

    /// Returns true if the context is current on the calling thread.
    fn is_current(&self) -> bool;

    /// Makes the context current on the calling thread.
    ///
    /// # Safety
    ///
    /// The context must not be current on another thread.
    unsafe fn make_current(&self);
}

/// Error that can happen while creating a [`Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextCreationError {
    /// The context reports no usable color attachment slots; it cannot host
    /// framebuffer objects.
    UnsupportedFramebuffers {
        /// The value of `GL_MAX_COLOR_ATTACHMENTS` the driver reported.
        max_color_attachments: GLint,
    },
}

impl fmt::Display for ContextCreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ContextCreationError::UnsupportedFramebuffers {
                max_color_attachments,
            } => write!(
                f,
                "the context does not support framebuffer objects \
                 (GL_MAX_COLOR_ATTACHMENTS = {})",
                max_color_attachments
            ),
        }
    }
}

impl Error for ContextCreationError {}

/// A rendering context and the state tracked for it.
pub struct Context {
    gl: Box<dyn GlApi>,
    state: RefCell<GlState>,
    capabilities: Capabilities,
    id: ContextId,
    backend: Option<Box<dyn Backend>>,
}

impl Context {
    /// Builds a context around an already-loaded function table.
    ///
    /// `name` is used in diagnostics only. The native context must be
    /// current on the calling thread, both now (limits are queried here)
    /// and whenever [`exec`](Context::exec) is called later.
    pub fn new(gl: Box<dyn GlApi>, name: &str) -> Result<Context, ContextCreationError> {
        let capabilities = capabilities::get_capabilities(&*gl);
        if capabilities.max_color_attachments < 1 {
            return Err(ContextCreationError::UnsupportedFramebuffers {
                max_color_attachments: capabilities.max_color_attachments,
            });
        }

        let id = ContextId::next();
        CONTEXT_NAMES.lock().unwrap().insert(id, name.to_owned());

        Ok(Context {
            gl,
            state: RefCell::new(GlState::default()),
            capabilities,
            id,
            backend: None,
        })
    }

    /// Builds a context from a [`Backend`], loading the function table
    /// through it.
    ///
    /// # Safety
    ///
    /// The backend's native context must be current on the calling thread
    /// and must outlive every object created against the returned `Context`.
    pub unsafe fn from_backend(
        backend: Box<dyn Backend>,
        name: &str,
    ) -> Result<Context, ContextCreationError> {
        let gl = NativeGl::load_with(|symbol| backend.get_proc_address(symbol));
        let mut ctxt = Context::new(Box::new(gl), name)?;
        ctxt.backend = Some(backend);
        Ok(ctxt)
    }

    /// The identifier of this context.
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// The limits queried at creation.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Runs `f` with a [`CommandContext`] for this context.
    ///
    /// The native context must be current on the calling thread. When the
    /// context was built through [`from_backend`](Context::from_backend)
    /// this is asserted in debug builds.
    pub fn exec<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut CommandContext<'_>) -> R,
    {
        if let Some(ref backend) = self.backend {
            debug_assert!(
                backend.is_current(),
                "context {} is not current on this thread",
                context_name(self.id)
            );
        }

        let mut state = self.state.borrow_mut();
        let mut ctxt = CommandContext {
            gl: &*self.gl,
            state: &mut *state,
            capabilities: &self.capabilities,
            context_id: self.id,
        };
        f(&mut ctxt)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        CONTEXT_NAMES.lock().unwrap().remove(&self.id);
    }
}

/// Proof that the caller currently holds a context, plus access to
/// everything needed to issue calls against it.
pub struct CommandContext<'a> {
    /// The loaded function table.
    pub gl: &'a dyn GlApi,
    /// Mirror of the GL state this crate has set on the context.
    pub state: &'a mut GlState,
    /// Limits queried at context creation.
    pub capabilities: &'a Capabilities,
    /// Identifier of the context.
    pub context_id: ContextId,
}

/// Panics in debug builds if `ctxt` is not the context an object was
/// created in.
///
/// Cross-context use of framebuffer objects is undefined: FBO names are not
/// shared between contexts, so the same id refers to different objects. The
/// panic message names both contexts and carries a backtrace to locate the
/// offending call site.
pub(crate) fn check_context(ctxt: &CommandContext<'_>, created_in: ContextId) {
    if cfg!(debug_assertions) && ctxt.context_id != created_in {
        panic!(
            "object created in context {} used with context {}\n{:?}",
            context_name(created_in),
            context_name(ctxt.context_id),
            backtrace::Backtrace::new()
        );
    }
}
