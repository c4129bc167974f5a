use crate::context::visibility::VisibilityWindow;
use crate::grouping::segments::{TimeSegment, visibility_segments};
use crate::rendering::pair::Rendering;
use std::collections::{BTreeMap, BTreeSet};

/// Grouping-stage view of one rendering. Indices refer to positions in the owning
/// [`VisibilityGraph`], which are paint order (bottom first).
#[derive(Debug, Clone)]
pub struct RenderingWithVisibility {
    /// The rendering itself.
    pub rendering: Rendering,
    /// When it is drawn, in composition frames.
    pub visibility: VisibilityWindow,
    /// Renderings that must be drawn after (on top of) this one.
    pub above: BTreeSet<usize>,
    /// Renderings that must be drawn before (beneath) this one.
    pub below: BTreeSet<usize>,
    /// Renderings with no ordering constraint and compatible content.
    pub orthogonal: BTreeSet<usize>,
}

/// A Z-layer whose members may be drawn in any order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderingGroup {
    /// Members, in their original paint order.
    pub renderings: Vec<Rendering>,
}

/// Draw-order and orthogonality relations between renderings, built from their visibility.
#[derive(Debug, Clone)]
pub struct VisibilityGraph {
    nodes: Vec<RenderingWithVisibility>,
    segments: Vec<TimeSegment>,
}

impl VisibilityGraph {
    /// Derive segments, draw-order constraints and orthogonality for renderings in paint order.
    pub fn build(renderings: Vec<Rendering>) -> Self {
        let mut nodes: Vec<RenderingWithVisibility> = renderings
            .into_iter()
            .map(|rendering| RenderingWithVisibility {
                visibility: rendering.visibility(),
                rendering,
                above: BTreeSet::new(),
                below: BTreeSet::new(),
                orthogonal: BTreeSet::new(),
            })
            .collect();

        let segments = visibility_segments(nodes.iter().map(|n| &n.visibility));

        for segment in &segments {
            let present: Vec<usize> = (0..nodes.len())
                .filter(|&i| nodes[i].visibility.is_visible_at(segment.offset()))
                .collect();
            for pair in present.windows(2) {
                let (lower, upper) = (pair[0], pair[1]);
                nodes[lower].above.insert(upper);
                nodes[upper].below.insert(lower);
            }
        }

        let mut graph = Self { nodes, segments };
        graph.derive_orthogonality();
        graph
    }

    fn derive_orthogonality(&mut self) {
        let n = self.nodes.len();
        for i in 0..n {
            let ordered: BTreeSet<usize> = self
                .reachable(i, |node| &node.above)
                .union(&self.reachable(i, |node| &node.below))
                .copied()
                .collect();
            let orthogonal: BTreeSet<usize> = (0..n)
                .filter(|&j| j != i && !ordered.contains(&j) && self.compatible(i, j))
                .collect();
            self.nodes[i].orthogonal = orthogonal;
        }
    }

    /// Transitive closure of one direction of the order relation, excluding `start`.
    fn reachable(
        &self,
        start: usize,
        edges: impl Fn(&RenderingWithVisibility) -> &BTreeSet<usize>,
    ) -> BTreeSet<usize> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            for &j in edges(&self.nodes[i]) {
                if seen.insert(j) {
                    stack.push(j);
                }
            }
        }
        seen.remove(&start);
        seen
    }

    /// Only path content with matching segment counts may share a layer; everything else is
    /// treated as never orthogonal.
    fn compatible(&self, a: usize, b: usize) -> bool {
        match (
            self.nodes[a].rendering.content.path_segment_count(),
            self.nodes[b].rendering.content.path_segment_count(),
        ) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Renderings in paint order, bottom first.
    pub fn nodes(&self) -> &[RenderingWithVisibility] {
        &self.nodes
    }

    /// Time segments the visibility windows cut the timeline into.
    pub fn segments(&self) -> &[TimeSegment] {
        &self.segments
    }

    /// Whether a draw-order constraint, direct or transitive, links `a` and `b`.
    pub fn is_ordered(&self, a: usize, b: usize) -> bool {
        self.reachable(a, |n| &n.above).contains(&b) || self.reachable(b, |n| &n.above).contains(&a)
    }

    /// Greedy bottom-up clustering into Z-layers of indices.
    ///
    /// Each round takes the renderings with nothing unresolved beneath them, picks the one with
    /// the most orthogonal peers as the seed, and adds every other ready rendering orthogonal to
    /// the seed.
    pub fn layer_indices(&self) -> Vec<Vec<usize>> {
        let mut working: BTreeSet<usize> = (0..self.nodes.len()).collect();
        let mut remaining_below: BTreeMap<usize, BTreeSet<usize>> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (i, n.below.clone()))
            .collect();
        let mut orthogonal: BTreeMap<usize, BTreeSet<usize>> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (i, n.orthogonal.clone()))
            .collect();

        let mut layers = Vec::new();
        while !working.is_empty() {
            let ready: Vec<usize> = working
                .iter()
                .copied()
                .filter(|i| remaining_below.get(i).is_none_or(BTreeSet::is_empty))
                .collect();

            let Some(seed) = ready
                .iter()
                .copied()
                .rev()
                .max_by_key(|i| orthogonal.get(i).map_or(0, BTreeSet::len))
            else {
                // Unreachable for a paint-ordered relation; flush what is left as one layer.
                layers.push(working.iter().copied().collect());
                break;
            };

            let seed_orthogonal = orthogonal.get(&seed).cloned().unwrap_or_default();
            let layer: Vec<usize> = ready
                .iter()
                .copied()
                .filter(|&i| i == seed || seed_orthogonal.contains(&i))
                .collect();

            for i in &layer {
                working.remove(i);
                remaining_below.remove(i);
                orthogonal.remove(i);
            }
            for set in remaining_below.values_mut().chain(orthogonal.values_mut()) {
                for i in &layer {
                    set.remove(i);
                }
            }
            layers.push(layer);
        }
        layers
    }

    /// Z-layers, bottom first.
    pub fn into_groups(self) -> Vec<RenderingGroup> {
        let layers = self.layer_indices();
        let mut slots: Vec<Option<Rendering>> =
            self.nodes.into_iter().map(|n| Some(n.rendering)).collect();
        layers
            .into_iter()
            .map(|layer| RenderingGroup {
                renderings: layer.into_iter().filter_map(|i| slots[i].take()).collect(),
            })
            .collect()
    }
}

/// Partition renderings (paint order, bottom first) into Z-ordered, internally orthogonal groups.
#[tracing::instrument(skip(renderings), fields(renderings = renderings.len()))]
pub fn group_by_visibility(renderings: Vec<Rendering>) -> Vec<RenderingGroup> {
    let graph = VisibilityGraph::build(renderings);
    tracing::debug!(segments = graph.segments().len(), "visibility segments");
    graph.into_groups()
}

#[cfg(test)]
#[path = "../../tests/unit/grouping/groups.rs"]
mod tests;
