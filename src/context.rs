//! Lazily created 2D drawing context
//!
//! Text measurement and hit testing need a 2D context even when nothing is
//! being drawn. [`ContextCache`] creates one on first use through a
//! [`SurfaceFactory`], hands the same handle to every later caller and drops
//! it on [`ContextCache::teardown`].
//!
//! The cache is owned by whoever owns the rendering environment; there is no
//! process-wide instance. It performs no locking and is `!Sync`.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use log::debug;

use crate::error::{Error, Result};

/// Shared handle to a 2D context
pub type ContextHandle = Rc<RefCell<Context2d>>;

/// Drawing state carried by a 2D context
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub font: String,
    pub fill_style: String,
    pub stroke_style: String,
    pub line_width: f64,
    pub global_alpha: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            font: "10px sans-serif".to_string(),
            fill_style: "#000000".to_string(),
            stroke_style: "#000000".to_string(),
            line_width: 1.0,
            global_alpha: 1.0,
        }
    }
}

/// A 2D drawing context: surface size plus a save/restore stack of draw state
#[derive(Debug, Clone, PartialEq)]
pub struct Context2d {
    width: u32,
    height: u32,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl Context2d {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: DrawState::default(),
            saved: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    /// Push a copy of the current draw state
    pub fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    /// Pop the last saved draw state. Does nothing if none is saved.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }
}

/// Source of drawing surfaces
pub trait SurfaceFactory {
    /// Create a surface and return its 2D context
    fn create_context(&self) -> Result<Context2d>;
}

/// An offscreen surface of fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffscreenSurface {
    pub width: u32,
    pub height: u32,
}

impl Default for OffscreenSurface {
    fn default() -> Self {
        // Default size of a freshly created canvas element
        Self {
            width: 300,
            height: 150,
        }
    }
}

impl SurfaceFactory for OffscreenSurface {
    fn create_context(&self) -> Result<Context2d> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Surface {
                message: format!("Cannot create a {}x{} surface", self.width, self.height),
            });
        }
        Ok(Context2d::new(self.width, self.height))
    }
}

/// Owns the lazily created 2D context
pub struct ContextCache<F: SurfaceFactory = OffscreenSurface> {
    factory: F,
    context: OnceCell<ContextHandle>,
}

impl ContextCache<OffscreenSurface> {
    /// A cache backed by a default-sized offscreen surface
    pub fn offscreen() -> Self {
        Self::new(OffscreenSurface::default())
    }
}

impl Default for ContextCache<OffscreenSurface> {
    fn default() -> Self {
        Self::offscreen()
    }
}

impl<F: SurfaceFactory> ContextCache<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            context: OnceCell::new(),
        }
    }

    /// Return the context, creating it on first call.
    ///
    /// Every call after a successful first one returns the identical handle
    /// until [`teardown`](Self::teardown). A failed creation leaves the cache
    /// empty so a later call can retry.
    pub fn get_context(&self) -> Result<ContextHandle> {
        if let Some(handle) = self.context.get() {
            return Ok(handle.clone());
        }

        let context = self.factory.create_context()?;
        debug!(
            "Created {}x{} drawing context",
            context.width(),
            context.height()
        );
        let handle = self
            .context
            .get_or_init(|| Rc::new(RefCell::new(context)))
            .clone();
        Ok(handle)
    }

    /// True once a context has been created and not torn down
    pub fn is_initialized(&self) -> bool {
        self.context.get().is_some()
    }

    /// Drop the cached context. The next `get_context` creates a new one.
    pub fn teardown(&mut self) {
        if self.context.take().is_some() {
            debug!("Released drawing context");
        }
    }
}
