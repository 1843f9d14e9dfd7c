//! Layout options and output types.
//!
//! Everything here is plain data, `Clone`-friendly and serializable so a layout can be handed
//! straight to a rendering client as JSON.

use indexmap::IndexMap;
use kindred_core::{MemberId, RelationshipId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl FromStr for RankDir {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Self::TB),
            "BT" => Ok(Self::BT),
            "LR" => Ok(Self::LR),
            "RL" => Ok(Self::RL),
            _ => Err(()),
        }
    }
}

/// How a member reachable through several parents picks its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationPolicy {
    /// Breadth-first from the roots; the first parent to reach a member decides its row.
    #[default]
    FirstWins,
    /// One row below the deepest parent (topological order, cycles broken by input order).
    Deepest,
}

impl FromStr for GenerationPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-wins" | "first_wins" | "bfs" => Ok(Self::FirstWins),
            "deepest" | "longest-path" => Ok(Self::Deepest),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between neighbours in the same generation.
    pub node_sep: f64,
    /// Gap between consecutive generations.
    pub generation_sep: f64,
    pub rank_dir: RankDir,
    pub policy: GenerationPolicy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 120.0,
            node_sep: 40.0,
            generation_sep: 40.0,
            rank_dir: RankDir::TB,
            policy: GenerationPolicy::FirstWins,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    /// Center of the node.
    pub x: f64,
    pub y: f64,
    pub generation: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Hierarchy,
    Partnership,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeCurve {
    Smoothstep,
    Straight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescriptor {
    pub id: RelationshipId,
    pub source: MemberId,
    pub target: MemberId,
    pub kind: EdgeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub curve: EdgeCurve,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(rename = "minX")]
    pub min_x: f64,
    #[serde(rename = "minY")]
    pub min_y: f64,
    #[serde(rename = "maxX")]
    pub max_x: f64,
    #[serde(rename = "maxY")]
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Inputs the layout tolerated rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDiagnostics {
    /// Relationships with an endpoint outside the member set. They get no edge descriptor.
    pub dangling: Vec<RelationshipId>,
    /// Parent-child edges from a member to itself, ignored for generations.
    #[serde(rename = "selfLoops")]
    pub self_loops: Vec<RelationshipId>,
    /// Parent-child edges repeating an earlier parent/child pair.
    #[serde(rename = "duplicateEdges")]
    pub duplicate_edges: Vec<RelationshipId>,
    /// Member ids that appeared more than once; only the first occurrence is laid out.
    #[serde(rename = "duplicateMembers")]
    pub duplicate_members: Vec<MemberId>,
}

impl LayoutDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
            && self.self_loops.is_empty()
            && self.duplicate_edges.is_empty()
            && self.duplicate_members.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// In member input order.
    pub nodes: IndexMap<MemberId, NodePosition>,
    pub edges: Vec<EdgeDescriptor>,
    pub bounds: Bounds,
    /// Number of generation rows.
    pub generations: usize,
    pub diagnostics: LayoutDiagnostics,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<&NodePosition> {
        self.nodes.get(id)
    }

    pub fn generation_of(&self, id: &str) -> Option<usize> {
        self.nodes.get(id).map(|n| n.generation)
    }

    /// Members of one generation, in input order.
    pub fn row(&self, generation: usize) -> Vec<&MemberId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.generation == generation)
            .map(|(id, _)| id)
            .collect()
    }
}
