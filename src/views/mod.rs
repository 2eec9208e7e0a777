//! Page views.
//!
//! Views are opaque renderable units. The dispatcher only needs a stable
//! name for logging and a way to render into the output node.

pub mod pages;

pub use pages::Page;

use crate::routing::{Location, Params};

/// What a view gets to see when it is mounted.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub params: &'a Params,
    pub location: &'a Location,
}

/// A renderable page.
pub trait View {
    /// Stable identifier, used in logs and metrics.
    fn name(&self) -> &str;

    /// Render the page's markup for the output node.
    fn render(&self, ctx: &ViewContext<'_>) -> String;
}

impl<V: View + ?Sized> View for Box<V> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn render(&self, ctx: &ViewContext<'_>) -> String {
        (**self).render(ctx)
    }
}
