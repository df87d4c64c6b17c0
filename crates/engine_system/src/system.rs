//! The [`System`] trait and closure adapter.

use crate::context::SystemContext;

/// A processing routine run once per frame against the entities matching its
/// signature.
///
/// Systems own no entities or components. They read and write through the
/// [`SystemContext`] while they run.
pub trait System: Send + 'static {
    /// Called once when the system is registered.
    fn initialize(&mut self) {}

    /// Called once per frame with the whole batch of matching entities.
    fn run(&mut self, ctx: &mut SystemContext<'_>);

    /// Called once when the owning manager shuts down.
    fn shutdown(&mut self) {}
}

/// Adapts a closure into a [`System`] with no lifecycle hooks.
pub struct FnSystem<F>(pub F);

impl<F> System for FnSystem<F>
where
    F: FnMut(&mut SystemContext<'_>) + Send + 'static,
{
    fn run(&mut self, ctx: &mut SystemContext<'_>) {
        (self.0)(ctx);
    }
}

impl<F> std::fmt::Debug for FnSystem<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnSystem")
    }
}
