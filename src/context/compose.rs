use crate::context::node::{ContextKind, RenderingContext};
use std::ops::Add;

impl RenderingContext {
    /// Concatenate contexts into one flat run.
    ///
    /// Nested composites are inlined and `Null` is dropped, so the result never holds a composite
    /// inside a composite. Empty input yields `Null`; a single surviving node is returned bare.
    pub fn compose<I>(items: I) -> RenderingContext
    where
        I: IntoIterator<Item = RenderingContext>,
    {
        let mut flat = Vec::new();
        for item in items {
            flatten_into(item, &mut flat);
        }
        Self::from_flat(flat)
    }

    /// Wrap nodes that are already flat. Callers inside this crate use it after rewriting
    /// `children()`.
    pub(crate) fn from_flat(mut flat: Vec<RenderingContext>) -> RenderingContext {
        match flat.len() {
            0 => RenderingContext::Null,
            1 => flat.pop().unwrap_or_default(),
            _ => RenderingContext::Composite(flat.into()),
        }
    }

    /// Remove every `kind` node for which `keep` is false. Other nodes pass through unchanged and
    /// relative order is preserved.
    pub fn filter(
        &self,
        kind: ContextKind,
        keep: impl Fn(&RenderingContext) -> bool,
    ) -> RenderingContext {
        Self::compose(
            self.children()
                .iter()
                .filter(|c| !c.is(kind) || keep(c))
                .cloned(),
        )
    }

    /// Remove every node of `kind`.
    pub fn without(&self, kind: ContextKind) -> RenderingContext {
        self.filter(kind, |_| false)
    }

    /// Split into `(only kind, everything else)`, each keeping its internal order.
    pub fn partition(&self, kind: ContextKind) -> (RenderingContext, RenderingContext) {
        let (matching, rest): (Vec<_>, Vec<_>) =
            self.children().iter().cloned().partition(|c| c.is(kind));
        (Self::compose(matching), Self::compose(rest))
    }

    /// Hoist all `kind` nodes to the front as one block.
    pub fn move_to_start(&self, kind: ContextKind) -> RenderingContext {
        let (matching, rest) = self.partition(kind);
        matching + rest
    }

    /// Sink all `kind` nodes to the back as one block.
    pub fn move_to_end(&self, kind: ContextKind) -> RenderingContext {
        let (matching, rest) = self.partition(kind);
        rest + matching
    }

    /// Whether any top-level node is of `kind`.
    pub fn contains(&self, kind: ContextKind) -> bool {
        self.children().iter().any(|c| c.is(kind))
    }

    /// Number of top-level nodes of `kind`.
    pub fn count(&self, kind: ContextKind) -> usize {
        self.children().iter().filter(|c| c.is(kind)).count()
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.children().len()
    }

    /// Whether this is `Null`.
    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }
}

fn flatten_into(item: RenderingContext, out: &mut Vec<RenderingContext>) {
    match item {
        RenderingContext::Null => {}
        RenderingContext::Composite(items) => {
            for child in items.iter() {
                flatten_into(child.clone(), out);
            }
        }
        other => out.push(other),
    }
}

impl Add for RenderingContext {
    type Output = RenderingContext;

    fn add(self, rhs: RenderingContext) -> RenderingContext {
        RenderingContext::compose([self, rhs])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/compose.rs"]
mod tests;
