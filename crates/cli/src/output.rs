//! JSON views of query results and hierarchies.

use biarc::api::{DistanceEstimate, Hierarchy, NodeKind, Shape};
use biarc::Vec2;
use serde::Serialize;

fn xy(v: Vec2<f64>) -> [f64; 2] {
    [v.x, v.y]
}

#[derive(Debug, Serialize)]
pub struct EstimateJson {
    pub query: &'static str,
    pub power: u32,
    pub value: f64,
    pub error: f64,
    pub lower: f64,
    pub upper: f64,
    pub witness: [[f64; 2]; 2],
    pub pops: usize,
    pub converged: bool,
}

impl EstimateJson {
    pub fn new(query: &'static str, power: u32, est: &DistanceEstimate) -> Self {
        Self {
            query,
            power,
            value: est.value,
            error: est.error,
            lower: est.lower,
            upper: est.upper,
            witness: [xy(est.witness.0), xy(est.witness.1)],
            pops: est.pops,
            converged: est.converged,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeJson {
    Arc {
        center: [f64; 2],
        radius: f64,
        begin: f64,
        end: f64,
    },
    Line {
        start: [f64; 2],
        end: [f64; 2],
    },
}

impl From<&Shape> for ShapeJson {
    fn from(s: &Shape) -> Self {
        match s {
            Shape::Arc(a) => ShapeJson::Arc {
                center: xy(a.center),
                radius: a.radius,
                begin: a.begin,
                end: a.end,
            },
            Shape::Line(l) => ShapeJson::Line {
                start: xy(l.start),
                end: xy(l.end),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NodeJson {
    pub id: usize,
    pub depth: u32,
    /// `[min_x, min_y, max_x, max_y]`
    pub aabb: [f64; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<[usize; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TreeJson {
    pub power: u32,
    pub root: usize,
    pub leaves: usize,
    pub nodes: Vec<NodeJson>,
}

impl From<&Hierarchy> for TreeJson {
    fn from(h: &Hierarchy) -> Self {
        let nodes = h
            .nodes()
            .iter()
            .enumerate()
            .map(|(id, n)| {
                let (children, shape, error) = match &n.kind {
                    NodeKind::Internal { left, right, .. } => (Some([left.0, right.0]), None, None),
                    NodeKind::Leaf { shape, error } => {
                        (None, Some(ShapeJson::from(shape)), Some(*error))
                    }
                };
                NodeJson {
                    id,
                    depth: n.depth,
                    aabb: [n.aabb.min.x, n.aabb.min.y, n.aabb.max.x, n.aabb.max.y],
                    children,
                    shape,
                    error,
                }
            })
            .collect();
        Self {
            power: h.power(),
            root: h.root().0,
            leaves: h.leaf_count(),
            nodes,
        }
    }
}
