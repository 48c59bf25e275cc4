//! Recursive hierarchy construction.

use tracing::trace;

use super::types::{Cover, Hierarchy, Node, NodeId, NodeKind};
use crate::biarc::{fit_biarc, Shape};
use crate::curve::{check_power, CubicBezier, InputError};

impl Hierarchy {
    /// Build the arc hierarchy of `curve`.
    ///
    /// The curve is bisected `power + 1` times. Every internal node gets one
    /// biarc whose two halves cover that node's halves: at the last internal
    /// level they become the leaves, above it they are kept as the children's
    /// `cover`. Rejects `power > MAX_POWER`.
    pub fn build(curve: &CubicBezier, power: u32) -> Result<Self, InputError> {
        check_power(power)?;
        let mut nodes = Vec::with_capacity((1usize << (power + 2)) - 1);
        let root = build_node(&mut nodes, *curve, power, 0, None);
        let h = Hierarchy { nodes, root, power };
        trace!(
            power,
            nodes = h.nodes.len(),
            root_area = h.node(root).aabb.area(),
            "built hierarchy"
        );
        Ok(h)
    }
}

fn push(nodes: &mut Vec<Node>, node: Node) -> NodeId {
    nodes.push(node);
    NodeId(nodes.len() - 1)
}

fn push_leaf(nodes: &mut Vec<Node>, segment: CubicBezier, fitted: Shape, depth: u32) -> NodeId {
    let Cover { shape, error, bound } = Cover::new(fitted, &segment);
    push(
        nodes,
        Node {
            segment,
            aabb: bound,
            depth,
            kind: NodeKind::Leaf { shape, error },
        },
    )
}

fn build_node(
    nodes: &mut Vec<Node>,
    segment: CubicBezier,
    remaining: u32,
    depth: u32,
    cover: Option<Cover>,
) -> NodeId {
    let (left_seg, right_seg) = segment.bisect();
    let fit = fit_biarc(&segment);
    let (left, right) = if remaining == 0 {
        (
            push_leaf(nodes, left_seg, fit.first, depth + 1),
            push_leaf(nodes, right_seg, fit.second, depth + 1),
        )
    } else {
        let left_cover = Cover::new(fit.first, &left_seg);
        let right_cover = Cover::new(fit.second, &right_seg);
        (
            build_node(nodes, left_seg, remaining - 1, depth + 1, Some(left_cover)),
            build_node(nodes, right_seg, remaining - 1, depth + 1, Some(right_cover)),
        )
    };
    let aabb = nodes[left.0].aabb.combine(&nodes[right.0].aabb);
    push(
        nodes,
        Node {
            segment,
            aabb,
            depth,
            kind: NodeKind::Internal { left, right, cover },
        },
    )
}
