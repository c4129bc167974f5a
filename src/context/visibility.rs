use crate::animation::time::TimeMapping;
use crate::foundation::error::{IrError, IrResult};
use smallvec::SmallVec;

/// Frame times at which visibility toggles, starting invisible.
///
/// Times are strictly increasing. Index parity gives the state: after an odd number of changes the
/// content is visible. An odd-length list stays visible forever after its last change. The empty
/// list is never visible; `[-inf]` is always visible.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisibilityWindow {
    state_changes: SmallVec<[f64; 4]>,
}

impl VisibilityWindow {
    /// Validate a list of strictly increasing, non-NaN change times.
    pub fn new(state_changes: impl IntoIterator<Item = f64>) -> IrResult<Self> {
        let state_changes: SmallVec<[f64; 4]> = state_changes.into_iter().collect();
        if state_changes.iter().any(|t| t.is_nan()) {
            return Err(IrError::validation("visibility state change is NaN"));
        }
        if state_changes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(IrError::validation(
                "visibility state changes must be strictly increasing",
            ));
        }
        Ok(Self { state_changes })
    }

    /// Never visible.
    pub fn never() -> Self {
        Self::default()
    }

    /// Visible at every frame.
    pub fn always() -> Self {
        Self {
            state_changes: SmallVec::from_slice(&[f64::NEG_INFINITY]),
        }
    }

    /// Visible on `[in_point, out_point)`; never visible when the range is empty.
    pub fn between(in_point: f64, out_point: f64) -> Self {
        if in_point < out_point {
            Self {
                state_changes: SmallVec::from_slice(&[in_point, out_point]),
            }
        } else {
            Self::never()
        }
    }

    /// Change times in increasing order.
    pub fn state_changes(&self) -> &[f64] {
        &self.state_changes
    }

    /// Earliest change, if any.
    pub fn first_change(&self) -> Option<f64> {
        self.state_changes.first().copied()
    }

    /// Whether the content is drawn at `frame`.
    pub fn is_visible_at(&self, frame: f64) -> bool {
        self.state_changes.partition_point(|&c| c <= frame) % 2 == 1
    }

    /// Whether the content is never drawn.
    pub fn is_never_visible(&self) -> bool {
        self.state_changes.is_empty()
    }

    /// Whether the content is drawn at every frame.
    pub fn is_always_visible(&self) -> bool {
        self.state_changes.len() == 1 && self.state_changes[0] == f64::NEG_INFINITY
    }

    /// Express the window in the parent timeline of `mapping`. Stretch is positive, so order holds.
    pub fn remap_time(&self, mapping: TimeMapping) -> Self {
        if mapping.is_identity() {
            return self.clone();
        }
        Self {
            state_changes: self
                .state_changes
                .iter()
                .map(|&t| {
                    if t.is_infinite() {
                        t
                    } else {
                        mapping.apply(t)
                    }
                })
                .collect(),
        }
    }

    /// Visible only where every window is visible. No windows means always visible.
    pub fn combine_and(windows: &[VisibilityWindow]) -> Self {
        if windows.is_empty() {
            return Self::always();
        }
        Self::combine_with_threshold(windows, windows.len())
    }

    /// Visible where at least one window is visible.
    pub fn combine_or(windows: &[VisibilityWindow]) -> Self {
        Self::combine_with_threshold(windows, 1)
    }

    /// Counting sweep: emit a change whenever the number of visible windows crosses `threshold`.
    fn combine_with_threshold(windows: &[VisibilityWindow], threshold: usize) -> Self {
        let mut events: Vec<(f64, i32)> = windows
            .iter()
            .flat_map(|w| {
                w.state_changes
                    .iter()
                    .enumerate()
                    .map(|(i, &t)| (t, if i % 2 == 0 { 1 } else { -1 }))
            })
            .collect();
        events.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut out = SmallVec::new();
        let mut count: i64 = 0;
        let threshold = threshold as i64;
        let mut i = 0;
        while i < events.len() {
            let t = events[i].0;
            let before = count >= threshold;
            while i < events.len() && events[i].0 == t {
                count += i64::from(events[i].1);
                i += 1;
            }
            if before != (count >= threshold) {
                out.push(t);
            }
        }
        Self { state_changes: out }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/visibility.rs"]
mod tests;
