//! Boxes, arena nodes and query results.

use nalgebra::Vector2;

use crate::biarc::{choose_leaf_shape, Shape};
use crate::curve::CubicBezier;

/// Axis-aligned box with `min <= max` component-wise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Aabb {
    #[inline]
    pub fn from_point(p: Vector2<f64>) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box containing all `points`; `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Vector2<f64>>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let mut bb = Self::from_point(it.next()?);
        for p in it {
            bb.include(p);
        }
        Some(bb)
    }

    #[inline]
    pub fn include(&mut self, p: Vector2<f64>) {
        self.min = self.min.inf(&p);
        self.max = self.max.sup(&p);
    }

    /// Smallest box containing both.
    #[inline]
    pub fn combine(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Grow by `r` on every side.
    #[inline]
    pub fn inflate(&self, r: f64) -> Aabb {
        let d = Vector2::new(r, r);
        Aabb {
            min: self.min - d,
            max: self.max + d,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Box "volume" in the plane.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Lower bound on the distance between anything inside the two boxes:
    /// per-axis gaps combined Euclidean, 0 when they overlap.
    pub fn distance(&self, other: &Aabb) -> f64 {
        let dx = (other.min.x - self.max.x).max(self.min.x - other.max.x).max(0.0);
        let dy = (other.min.y - self.max.y).max(self.min.y - other.max.y).max(0.0);
        dx.hypot(dy)
    }
}

/// Index of a node in a `Hierarchy` arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Arc or chord standing in for a node's segment, within `error`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cover {
    pub shape: Shape,
    pub error: f64,
    /// `shape.aabb()` inflated by `error`.
    pub bound: Aabb,
}

impl Cover {
    /// Cover of `segment` by one half of its parent's biarc.
    pub fn new(fitted: Shape, segment: &CubicBezier) -> Self {
        let (shape, error) = choose_leaf_shape(fitted, segment);
        Self {
            shape,
            error,
            bound: shape.aabb().inflate(error),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    /// `cover` is what this node would carry as a leaf; `None` at the root.
    Internal {
        left: NodeId,
        right: NodeId,
        cover: Option<Cover>,
    },
    /// `error` is the certified deviation used to inflate the leaf box.
    Leaf { shape: Shape, error: f64 },
}

/// One node of the hierarchy; owns the curve piece it covers.
#[derive(Clone, Debug)]
pub struct Node {
    pub segment: CubicBezier,
    pub aabb: Aabb,
    /// Distance from the root (root = 0).
    pub depth: u32,
    pub kind: NodeKind,
}

impl Node {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    #[inline]
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            NodeKind::Internal { left, right, .. } => Some((left, right)),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Shape and error of this node's segment; for a leaf its own shape.
    pub fn cover(&self) -> Option<Cover> {
        match self.kind {
            NodeKind::Internal { cover, .. } => cover,
            NodeKind::Leaf { shape, error } => Some(Cover {
                shape,
                error,
                bound: self.aabb,
            }),
        }
    }

    /// Box the searches prune with. It depends only on the segment and its
    /// parent, never on how deep the tree goes below this node: the cover's
    /// box, or the control polygon's box at the root.
    pub fn search_box(&self) -> Aabb {
        match self.cover() {
            Some(c) => c.bound,
            None => {
                let p = &self.segment.p;
                let mut bb = Aabb::from_point(p[0]);
                for q in &p[1..] {
                    bb.include(*q);
                }
                bb
            }
        }
    }
}

/// Immutable arc-approximation tree of one curve, stored as an arena.
#[derive(Clone, Debug)]
pub struct Hierarchy {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) power: u32,
}

impl Hierarchy {
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The curve the hierarchy was built from.
    #[inline]
    pub fn curve(&self) -> &CubicBezier {
        &self.node(self.root).segment
    }

    #[inline]
    pub fn power(&self) -> u32 {
        self.power
    }

    /// Leaves in arena order (which is parameter order).
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_leaf())
            .map(|(i, n)| (NodeId(i), n))
    }

    #[inline]
    pub fn leaf_count(&self) -> usize {
        1usize << (self.power + 1)
    }

    /// Depth of the leaves below the root.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.power + 1
    }
}

/// Bracketed answer of a distance query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceEstimate {
    /// Midpoint of `[lower, upper]`.
    pub value: f64,
    /// Half the gap: `|true - value| <= error` when the bracket holds.
    pub error: f64,
    pub lower: f64,
    pub upper: f64,
    /// Point pair realizing the reported bound (curve 1, curve 2).
    pub witness: (Vector2<f64>, Vector2<f64>),
    /// Queue pops performed.
    pub pops: usize,
    /// False when an iteration cap stopped the search.
    pub converged: bool,
}

impl DistanceEstimate {
    pub fn from_bounds(
        lower: f64,
        upper: f64,
        witness: (Vector2<f64>, Vector2<f64>),
        pops: usize,
        converged: bool,
    ) -> Self {
        Self {
            value: 0.5 * (upper + lower),
            error: 0.5 * (upper - lower),
            lower,
            upper,
            witness,
            pops,
            converged,
        }
    }
}
