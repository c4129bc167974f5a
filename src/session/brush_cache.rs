use crate::context::brush::Brush;
use crate::context::value::ContextValue;
use crate::foundation::core::Color;
use std::collections::HashMap;
use std::sync::Arc;

/// Shares one `Arc<Brush>` per distinct static color within a translation run.
#[derive(Debug, Default)]
pub(crate) struct BrushCache {
    solids: HashMap<u64, Vec<(Color, Arc<Brush>)>>,
}

impl BrushCache {
    pub(crate) fn solid(&mut self, color: Color) -> Arc<Brush> {
        let bucket = self.solids.entry(color.fingerprint()).or_default();
        if let Some((_, brush)) = bucket.iter().find(|(c, _)| *c == color) {
            return brush.clone();
        }
        let brush = Arc::new(Brush::Solid(ContextValue::Static(color)));
        bucket.push((color, brush.clone()));
        brush
    }

    /// Cached for static colors, fresh for animated ones.
    pub(crate) fn brush_for(&mut self, color: ContextValue<Color>) -> Arc<Brush> {
        match color {
            ContextValue::Static(c) => self.solid(c),
            animated => Arc::new(Brush::Solid(animated)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.solids.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/brush_cache.rs"]
mod tests;
