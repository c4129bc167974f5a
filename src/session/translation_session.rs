use crate::detreeify::detreeify;
use crate::foundation::error::{IrError, IrResult};
use crate::grouping::groups::{RenderingGroup, group_by_visibility};
use crate::model::composition::Composition;
use crate::optimize::{OptimizeOpts, optimize};
use crate::rendering::pair::Rendering;
use crate::session::brush_cache::BrushCache;
use crate::session::issues::{IssueCode, IssueLog, TranslationIssue};
use rayon::prelude::*;

/// Options controlling one translation run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TranslateOpts {
    /// Cap on optimizer rounds per context; exceeding it is an internal error.
    pub max_optimizer_iterations: usize,
    /// Turn the first reported issue into an error instead of degrading.
    pub strict: bool,
    /// Cluster renderings into orthogonal Z-layers. When off, each rendering is its own group.
    pub group_by_visibility: bool,
    /// Drop renderings that are never visible after optimization.
    pub drop_invisible: bool,
    /// Worker threads for [`translate_many`]. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for TranslateOpts {
    fn default() -> Self {
        Self {
            max_optimizer_iterations: OptimizeOpts::default().max_iterations,
            strict: false,
            group_by_visibility: true,
            drop_invisible: true,
            threads: None,
        }
    }
}

impl TranslateOpts {
    /// Reject a zero iteration cap or a zero thread count.
    pub fn validate(&self) -> IrResult<()> {
        if self.max_optimizer_iterations == 0 {
            return Err(IrError::validation(
                "'max_optimizer_iterations' must be >= 1",
            ));
        }
        if self.threads == Some(0) {
            return Err(IrError::validation("'threads' must be >= 1 when set"));
        }
        Ok(())
    }
}

/// Result of translating one composition.
#[derive(Debug, Clone)]
pub struct Translation {
    /// Z-layers, bottom first.
    pub groups: Vec<RenderingGroup>,
    /// Degradations, in the order first reported.
    pub issues: Vec<TranslationIssue>,
    /// Composition width.
    pub width: f64,
    /// Composition height.
    pub height: f64,
    /// Composition start frame.
    pub in_point: f64,
    /// Composition end frame.
    pub out_point: f64,
    /// Composition frames per second.
    pub frame_rate: f64,
}

impl Translation {
    /// All renderings in draw order.
    pub fn renderings(&self) -> impl Iterator<Item = &Rendering> {
        self.groups.iter().flat_map(|g| g.renderings.iter())
    }
}

/// Per-run state: collected issues and the brush cache.
///
/// A session translates exactly one composition and is consumed by [`TranslationSession::translate`],
/// so nothing leaks between runs.
#[derive(Debug)]
pub struct TranslationSession {
    opts: TranslateOpts,
    issues: IssueLog,
    brushes: BrushCache,
}

impl TranslationSession {
    /// Validate `opts` and start an empty session.
    pub fn new(opts: TranslateOpts) -> IrResult<Self> {
        opts.validate()?;
        Ok(Self {
            opts,
            issues: IssueLog::default(),
            brushes: BrushCache::default(),
        })
    }

    /// Options this session runs with.
    pub fn opts(&self) -> &TranslateOpts {
        &self.opts
    }

    /// Issues reported so far.
    pub fn issues(&self) -> &[TranslationIssue] {
        self.issues.issues()
    }

    /// Record a degraded-translation issue. In strict mode this fails instead.
    pub fn report(&mut self, code: IssueCode, description: impl Into<String>) -> IrResult<()> {
        let issue = TranslationIssue {
            code,
            description: description.into(),
        };
        if self.issues.push(issue.clone()) {
            tracing::warn!(code = code.code(), description = %issue.description, "translation issue");
        }
        if self.opts.strict {
            return Err(IrError::Issue {
                code: code.code(),
                description: issue.description,
            });
        }
        Ok(())
    }

    pub(crate) fn brushes(&mut self) -> &mut BrushCache {
        &mut self.brushes
    }

    /// Detreeify, unify timebases, optimize each context, and group by visibility.
    #[tracing::instrument(skip(self, comp), fields(name = %comp.name, layers = comp.layers.len()))]
    pub fn translate(mut self, comp: &Composition) -> IrResult<Translation> {
        comp.validate()?;
        let detreeified = detreeify(comp, &mut self)?;

        let optimize_opts = OptimizeOpts {
            max_iterations: self.opts.max_optimizer_iterations,
        };
        let mut renderings = Vec::with_capacity(detreeified.len());
        for rendering in detreeified {
            let unified = rendering.unify_timebase()?;
            let context = optimize(&unified.context, &optimize_opts)?;
            let optimized = unified.with_context(context);
            if self.opts.drop_invisible && optimized.is_never_visible() {
                continue;
            }
            renderings.push(optimized);
        }
        tracing::debug!(
            brushes = self.brushes.len(),
            renderings = renderings.len(),
            "optimized renderings"
        );

        let groups = if self.opts.group_by_visibility {
            group_by_visibility(renderings)
        } else {
            renderings
                .into_iter()
                .map(|r| RenderingGroup {
                    renderings: vec![r],
                })
                .collect()
        };

        Ok(Translation {
            groups,
            issues: self.issues.into_vec(),
            width: comp.width,
            height: comp.height,
            in_point: comp.in_point,
            out_point: comp.out_point,
            frame_rate: comp.frame_rate,
        })
    }
}

/// Translate one composition with a fresh session.
pub fn translate(comp: &Composition, opts: &TranslateOpts) -> IrResult<Translation> {
    TranslationSession::new(opts.clone())?.translate(comp)
}

/// Translate independent compositions in parallel, one session each. Output order matches input.
pub fn translate_many(comps: &[Composition], opts: &TranslateOpts) -> IrResult<Vec<Translation>> {
    opts.validate()?;
    let pool = build_thread_pool(opts.threads)?;
    pool.install(|| comps.par_iter().map(|c| translate(c, opts)).collect())
}

fn build_thread_pool(threads: Option<usize>) -> IrResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        IrError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/translation_session.rs"]
mod tests;
