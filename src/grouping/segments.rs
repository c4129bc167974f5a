use crate::context::visibility::VisibilityWindow;

/// Half-open interval `[offset, offset + duration)`; an open-ended segment has infinite duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSegment {
    start: f64,
    end: f64,
}

impl TimeSegment {
    /// Segment starting at `offset`; an infinite `duration` never ends.
    pub fn new(offset: f64, duration: f64) -> Self {
        let end = if duration.is_infinite() {
            f64::INFINITY
        } else {
            offset + duration
        };
        Self { start: offset, end }
    }

    pub(crate) fn from_bounds(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Start frame.
    pub fn offset(&self) -> f64 {
        self.start
    }

    /// Length in frames.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// First frame after the segment.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Whether `frame` falls inside.
    pub fn contains(&self, frame: f64) -> bool {
        self.start <= frame && frame < self.end
    }

    /// Whether the two segments share a frame.
    pub fn overlaps(&self, other: &TimeSegment) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Maximal intervals over which the set of visible windows does not change.
///
/// Boundaries are every state-change time of every window. Intervals where nothing is visible are
/// skipped; a final open-ended segment is produced if something stays visible forever.
pub fn visibility_segments<'a, I>(windows: I) -> Vec<TimeSegment>
where
    I: IntoIterator<Item = &'a VisibilityWindow>,
{
    let windows: Vec<&VisibilityWindow> = windows.into_iter().collect();
    let mut times: Vec<f64> = windows
        .iter()
        .flat_map(|w| w.state_changes().iter().copied())
        .collect();
    times.sort_by(f64::total_cmp);
    times.dedup();

    let any_visible = |t: f64| windows.iter().any(|w| w.is_visible_at(t));

    let mut out = Vec::new();
    for pair in times.windows(2) {
        if any_visible(pair[0]) {
            out.push(TimeSegment::from_bounds(pair[0], pair[1]));
        }
    }
    if let Some(&last) = times.last()
        && any_visible(last)
    {
        out.push(TimeSegment::from_bounds(last, f64::INFINITY));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/grouping/segments.rs"]
mod tests;
