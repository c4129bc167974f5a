use crate::animation::time::TimeMapping;
use crate::context::node::{ContextKind, RenderingContext};
use crate::foundation::error::IrResult;

impl RenderingContext {
    /// Absorb every `TimeOffset`/`TimeStretch` into the nodes that follow it.
    ///
    /// Returns the rewritten context, which has no time nodes left, and the mapping accumulated
    /// over the whole run. Content animated in the innermost timeline is remapped with that
    /// mapping.
    pub fn unify_timebase(&self) -> IrResult<(RenderingContext, TimeMapping)> {
        let mut mapping = TimeMapping::IDENTITY;
        let mut out = Vec::with_capacity(self.len());
        for node in self.children() {
            match node {
                RenderingContext::TimeOffset(offset) => mapping = mapping.then_offset(*offset)?,
                RenderingContext::TimeStretch(stretch) => {
                    mapping = mapping.then_stretch(*stretch)?
                }
                other => out.push(other.with_time_mapping(mapping)),
            }
        }
        Ok((RenderingContext::compose(out), mapping))
    }

    /// No time nodes remain.
    pub fn is_timebase_uniform(&self) -> bool {
        !self.contains(ContextKind::TimeOffset) && !self.contains(ContextKind::TimeStretch)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/timebase.rs"]
mod tests;
