//! Fixed-point context optimizer.
pub(crate) mod passes;

use crate::context::node::{ContextKind, RenderingContext};
use crate::foundation::error::{IrError, IrResult};

/// Options for [`optimize`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OptimizeOpts {
    /// Upper bound on full rewrite rounds before giving up with an internal error.
    pub max_iterations: usize,
}

impl Default for OptimizeOpts {
    fn default() -> Self {
        Self { max_iterations: 64 }
    }
}

type Pass = fn(&RenderingContext) -> IrResult<RenderingContext>;

/// Rewrite passes, in the order applied within one round. Anchor replacement must precede the
/// transform fusions since it introduces positions.
const PASSES: &[(&str, Pass)] = &[
    ("anchors", passes::replace_anchors),
    ("blend_modes", passes::dedupe_blend_modes),
    ("opacities", passes::fuse_opacities),
    ("positions", passes::fuse_positions),
    ("rotations", passes::fuse_rotations),
    ("scales", passes::fuse_scales),
    ("sizes", passes::tighten_sizes),
    ("gradient_positions", passes::fuse_gradient_positions),
    ("visibilities", passes::fuse_visibilities),
];

/// Rewrite `context` into an equivalent, minimal run.
///
/// Metadata is hoisted to the front and kept out of the rewrite loop. The loop repeats every pass
/// until one full round changes nothing. The context must already have a uniform timebase.
#[tracing::instrument(skip(context, opts), fields(nodes = context.len()))]
pub fn optimize(context: &RenderingContext, opts: &OptimizeOpts) -> IrResult<RenderingContext> {
    if !context.is_timebase_uniform() {
        return Err(IrError::internal(
            "optimize requires a uniform timebase; unify time offsets first",
        ));
    }
    if opts.max_iterations == 0 {
        return Err(IrError::validation("max_iterations must be >= 1"));
    }

    let (metadata, mut current) = context.partition(ContextKind::Metadata);

    let mut rounds = 0;
    loop {
        if rounds == opts.max_iterations {
            return Err(IrError::internal(format!(
                "context optimizer did not reach a fixed point after {rounds} rounds"
            )));
        }
        rounds += 1;

        let mut next = current.clone();
        for (name, pass) in PASSES {
            let rewritten = pass(&next)?;
            if rewritten != next {
                tracing::trace!(pass = *name, before = next.len(), after = rewritten.len(), "rewrite");
            }
            next = rewritten;
        }

        if next == current {
            break;
        }
        current = next;
    }

    let out = metadata + current;
    tracing::debug!(rounds, before = context.len(), after = out.len(), "optimized context");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/optimize/optimize.rs"]
mod tests;
