use crate::context::node::{ContextKind, RenderingContext};
use crate::context::visibility::VisibilityWindow;
use crate::foundation::error::IrResult;
use crate::rendering::content::RenderingContent;

/// A drawable paired with the full context chain that positions and styles it.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    /// What is drawn.
    pub content: RenderingContent,
    /// How it is placed and styled, outermost first.
    pub context: RenderingContext,
}

impl Rendering {
    /// Pair `content` with `context`.
    pub fn new(content: RenderingContent, context: RenderingContext) -> Self {
        Self { content, context }
    }

    /// Same content under a different context.
    pub fn with_context(&self, context: RenderingContext) -> Self {
        Self {
            content: self.content.clone(),
            context,
        }
    }

    /// Wrap the current context inside `outer`.
    pub fn wrapped_in(&self, outer: RenderingContext) -> Self {
        self.with_context(outer + self.context.clone())
    }

    /// Move every time node out of the context and into the animated values it governs,
    /// including the content's own tracks.
    pub fn unify_timebase(&self) -> IrResult<Rendering> {
        let (context, mapping) = self.context.unify_timebase()?;
        Ok(Self {
            content: self.content.remap_time(mapping),
            context,
        })
    }

    /// Conjunction of all visibility nodes. Assumes a uniform timebase.
    pub fn visibility(&self) -> VisibilityWindow {
        let windows: Vec<VisibilityWindow> = self
            .context
            .children()
            .iter()
            .filter_map(|c| match c {
                RenderingContext::Visibility(w) => Some(w.clone()),
                _ => None,
            })
            .collect();
        VisibilityWindow::combine_and(&windows)
    }

    /// Whether the rendering is never drawn.
    pub fn is_never_visible(&self) -> bool {
        self.visibility().is_never_visible()
    }

    /// Whether the context has a top-level node of `kind`.
    pub fn has_context(&self, kind: ContextKind) -> bool {
        self.context.contains(kind)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rendering/pair.rs"]
mod tests;
