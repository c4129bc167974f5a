use crate::context::node::{ContextKind, RenderingContext};

impl RenderingContext {
    /// Whether `self` must keep its position relative to `other`.
    ///
    /// The relation is not symmetric on its own; use [`RenderingContext::is_order_dependent_with`]
    /// to decide whether two nodes commute.
    pub fn depends_on(&self, other: &RenderingContext) -> bool {
        use RenderingContext as C;

        if let C::Composite(items) = other {
            return items.iter().any(|c| self.depends_on(c));
        }

        match self {
            C::Composite(items) => items.iter().any(|c| c.depends_on(other)),
            C::Null => false,
            C::Metadata(_) | C::Effect(_) | C::Unsupported(_) | C::TimeOffset(_) | C::TimeStretch(_) => {
                !other.is_null()
            }
            C::Position(_) => {
                matches!(
                    other,
                    C::Anchor(_) | C::CenterPoint(_) | C::Rotation(_) | C::Scale(_)
                ) || is_frame_sensitive(other)
            }
            C::Rotation(_) => {
                matches!(
                    other,
                    C::Position(_) | C::Scale(_) | C::Anchor(_) | C::CenterPoint(_)
                ) || is_frame_sensitive(other)
            }
            // Stroke width follows the scale factor.
            C::Scale(_) => {
                matches!(
                    other,
                    C::Position(_) | C::Rotation(_) | C::Anchor(_) | C::CenterPoint(_) | C::Stroke(_)
                ) || is_frame_sensitive(other)
            }
            C::Anchor(_) => {
                matches!(
                    other,
                    C::Position(_) | C::Rotation(_) | C::Scale(_) | C::CenterPoint(_)
                ) || is_frame_sensitive(other)
            }
            C::CenterPoint(_) => matches!(other, C::Anchor(_)),
            C::Opacity(_) => matches!(other, C::Fill(_) | C::Stroke(_)),
            C::Size(_) => matches!(other, C::Rotation(_) | C::Scale(_)),
            C::Visibility(_) => matches!(other, C::TimeOffset(_) | C::TimeStretch(_)),
            C::Fill(_) | C::Stroke(_) if self.is_gradient_paint() => {
                matches!(other, C::Position(_) | C::Rotation(_) | C::Scale(_))
            }
            C::Fill(_)
            | C::Stroke(_)
            | C::Clip(_)
            | C::BlendMode(_)
            | C::Mask(_)
            | C::MatteType(_)
            | C::DrawingDirection(_) => false,
        }
    }

    /// Two nodes may swap places only when neither depends on the other.
    pub fn is_order_dependent_with(&self, other: &RenderingContext) -> bool {
        self.depends_on(other) || other.depends_on(self)
    }

    /// Pull each `kind` node up to sit right after the previous `kind` node, as long as every node
    /// it would jump over commutes with it. Order among `kind` nodes is unchanged.
    pub fn group_up(&self, kind: ContextKind) -> RenderingContext {
        let mut nodes = self.children().to_vec();
        let mut i = 0;
        while i < nodes.len() {
            if nodes[i].is(kind)
                && let Some(prev) = nodes[..i].iter().rposition(|n| n.is(kind))
                && prev + 1 < i
                && nodes[prev + 1..i]
                    .iter()
                    .all(|n| !n.is_order_dependent_with(&nodes[i]))
            {
                let node = nodes.remove(i);
                nodes.insert(prev + 1, node);
            }
            i += 1;
        }
        RenderingContext::from_flat(nodes)
    }
}

/// Nodes whose meaning depends on the current coordinate frame.
fn is_frame_sensitive(node: &RenderingContext) -> bool {
    matches!(
        node,
        RenderingContext::Clip(_)
            | RenderingContext::Size(_)
            | RenderingContext::Mask(_)
            | RenderingContext::MatteType(_)
    ) || node.is_gradient_paint()
}

#[cfg(test)]
#[path = "../../tests/unit/context/order.rs"]
mod tests;
