//! Root lifecycle: mount a virtual tree onto a surface, re-render it, tear it
//! down.
//!
//! A [`Root`] owns the [`Host`] (and so the scene) plus at most one
//! [`HostContext`]. The context exists exactly while the root is mounted.
//!
//! ```text
//!   Unmounted ──mount──▶ Mounting ──ok──▶ Mounted ──unmount──▶ Unmounting ──▶ Unmounted
//!                           │
//!                           └──err──▶ Unmounted
//! ```

use std::fmt;

use tracing::{debug, warn};

use crate::config::HostOptions;
use crate::dom::tree::Scene;
use crate::error::{HostError, Result};
use crate::host::Host;
use crate::vnode::VirtualNode;

// ---------------------------------------------------------------------------
// Seams
// ---------------------------------------------------------------------------

/// The rendering engine a root draws into.
pub trait Surface {
    /// Ask for a frame reflecting the current scene.
    fn request_render(&mut self, scene: &Scene);

    /// Release the surface. Called once, on unmount.
    fn destroy(&mut self);
}

/// The external reconciliation algorithm.
///
/// `update_container` diffs `tree` against whatever it committed last and
/// drives `host`'s hooks to make the scene match.
pub trait Reconciler {
    fn update_container(&mut self, host: &mut Host, tree: &[VirtualNode]) -> Result<()>;

    /// Forget all retained state. Called when a mount fails and after unmount.
    fn reset(&mut self) {}
}

// ---------------------------------------------------------------------------
// RootState / HostContext
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootState {
    Unmounted,
    Mounting,
    Mounted,
    Unmounting,
}

impl fmt::Display for RootState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RootState::Unmounted => "unmounted",
            RootState::Mounting => "mounting",
            RootState::Mounted => "mounted",
            RootState::Unmounting => "unmounting",
        })
    }
}

/// What a mounted root holds on to.
#[derive(Debug)]
pub struct HostContext<S> {
    pub surface: S,
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// The single mount point of an application.
pub struct Root<R, S> {
    host: Host,
    reconciler: R,
    context: Option<HostContext<S>>,
    state: RootState,
}

impl<R: Reconciler, S: Surface> Root<R, S> {
    pub fn new(reconciler: R) -> Self {
        Self::with_options(reconciler, HostOptions::default())
    }

    pub fn with_options(reconciler: R, options: HostOptions) -> Self {
        Self {
            host: Host::with_options(options),
            reconciler,
            context: None,
            state: RootState::Unmounted,
        }
    }

    pub fn state(&self) -> RootState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.state == RootState::Mounted
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn scene(&self) -> &Scene {
        self.host.scene()
    }

    /// Mutable scene access, e.g. to feed key input into an input instance.
    pub fn scene_mut(&mut self) -> &mut Scene {
        self.host.scene_mut()
    }

    /// The surface while mounted.
    pub fn surface(&self) -> Option<&S> {
        self.context.as_ref().map(|ctx| &ctx.surface)
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.context.as_mut().map(|ctx| &mut ctx.surface)
    }

    pub fn reconciler(&self) -> &R {
        &self.reconciler
    }

    /// Mount `tree` onto `surface`.
    ///
    /// Fails with [`HostError::AlreadyMounted`] unless the root is unmounted.
    /// If the initial commit fails, everything it created is torn down and the
    /// root is unmounted again before the error is returned.
    pub fn mount(&mut self, tree: &[VirtualNode], surface: S) -> Result<()> {
        if self.state != RootState::Unmounted {
            return Err(HostError::AlreadyMounted);
        }
        self.transition(RootState::Mounting);
        self.context = Some(HostContext { surface });

        self.host.scene_mut().begin_commit();
        if let Err(err) = self.reconciler.update_container(&mut self.host, tree) {
            warn!(error = %err, "initial commit failed; rolling back mount");
            self.reconciler.reset();
            self.host.reset();
            self.context = None;
            self.transition(RootState::Unmounted);
            return Err(err);
        }

        self.request_render();
        self.transition(RootState::Mounted);
        Ok(())
    }

    /// Re-render with a new tree. Only valid while mounted.
    pub fn update(&mut self, tree: &[VirtualNode]) -> Result<()> {
        if self.state != RootState::Mounted {
            return Err(HostError::NotMounted);
        }
        self.host.scene_mut().begin_commit();
        self.reconciler.update_container(&mut self.host, tree)?;
        self.request_render();
        Ok(())
    }

    /// Ask the surface for a frame without committing anything.
    pub fn render(&mut self) {
        if let Some(ctx) = self.context.as_mut() {
            ctx.surface.request_render(self.host.scene());
        }
    }

    /// Tear everything down and release the surface.
    ///
    /// Returns the surface that was in use, or `None` if nothing was mounted.
    /// Leftovers the reconciler failed to remove are destroyed anyway.
    pub fn unmount(&mut self) -> Result<Option<S>> {
        if self.state != RootState::Mounted {
            debug!(state = %self.state, "unmount ignored");
            return Ok(None);
        }
        self.transition(RootState::Unmounting);

        self.host.scene_mut().begin_commit();
        let committed = self.reconciler.update_container(&mut self.host, &[]);
        if let Err(err) = &committed {
            warn!(error = %err, "empty commit failed during unmount");
        }
        let leftover = self.host.reset();
        if leftover > 0 {
            warn!(leftover, "destroyed instances left behind by the reconciler");
        }
        self.reconciler.reset();

        let mut surface = self.context.take().map(|ctx| ctx.surface);
        if let Some(surface) = surface.as_mut() {
            surface.destroy();
        }
        self.transition(RootState::Unmounted);
        committed.map(|()| surface)
    }

    fn request_render(&mut self) {
        if self.host.options().render_on_commit {
            self.render();
        }
    }

    fn transition(&mut self, next: RootState) {
        debug!(from = %self.state, to = %next, "root state");
        self.state = next;
    }
}

impl<R, S> fmt::Debug for Root<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("state", &self.state)
            .field("instances", &self.host.scene().len())
            .field("has_context", &self.context.is_some())
            .finish()
    }
}
