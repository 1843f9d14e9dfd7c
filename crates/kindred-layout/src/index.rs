//! Parent/child adjacency over a member snapshot.
//!
//! Members are addressed by their position in the (deduplicated) input list. Only
//! `PARENT_CHILD` edges between two known, distinct members make it into the hierarchy;
//! everything else is either ignored (spouses) or recorded as a diagnostic.
//!
//! Adjacency is stored in compressed form: `child_offsets[ix]..child_offsets[ix + 1]` slices
//! `child_edges` for the children of `ix`, and likewise for parents.

use crate::model::LayoutDiagnostics;
use kindred_core::{Member, MemberId, Relationship};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, Default)]
pub struct RelationshipIndex {
    nodes: Vec<MemberId>,
    node_index: FxHashMap<MemberId, usize>,
    child_offsets: Vec<usize>,
    child_edges: Vec<usize>,
    parent_offsets: Vec<usize>,
    parent_edges: Vec<usize>,
    diagnostics: LayoutDiagnostics,
}

impl RelationshipIndex {
    pub fn build(members: &[Member], relationships: &[Relationship]) -> Self {
        let mut nodes: Vec<MemberId> = Vec::with_capacity(members.len());
        let mut node_index: FxHashMap<MemberId, usize> = FxHashMap::default();
        let mut diagnostics = LayoutDiagnostics::default();

        for m in members {
            if node_index.contains_key(&m.id) {
                diagnostics.duplicate_members.push(m.id.clone());
                continue;
            }
            node_index.insert(m.id.clone(), nodes.len());
            nodes.push(m.id.clone());
        }

        let mut pairs: Vec<(usize, usize)> = Vec::new();
        let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
        for r in relationships {
            let (Some(&v), Some(&w)) = (node_index.get(&r.source), node_index.get(&r.target))
            else {
                diagnostics.dangling.push(r.id.clone());
                continue;
            };
            if !r.kind.is_hierarchical() {
                continue;
            }
            if r.is_self_loop() {
                diagnostics.self_loops.push(r.id.clone());
                continue;
            }
            if !seen.insert((v, w)) {
                diagnostics.duplicate_edges.push(r.id.clone());
                continue;
            }
            pairs.push((v, w));
        }

        let n = nodes.len();
        let (child_offsets, child_edges) = compress(n, pairs.iter().copied());
        let (parent_offsets, parent_edges) = compress(n, pairs.iter().map(|&(v, w)| (w, v)));

        Self {
            nodes,
            node_index,
            child_offsets,
            child_edges,
            parent_offsets,
            parent_edges,
            diagnostics,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.child_edges.len()
    }

    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn nodes(&self) -> &[MemberId] {
        &self.nodes
    }

    /// Children of `ix` in relationship order.
    pub fn children(&self, ix: usize) -> &[usize] {
        &self.child_edges[self.child_offsets[ix]..self.child_offsets[ix + 1]]
    }

    /// Parents of `ix` in relationship order.
    pub fn parents(&self, ix: usize) -> &[usize] {
        &self.parent_edges[self.parent_offsets[ix]..self.parent_offsets[ix + 1]]
    }

    /// Members with no recorded parent, in input order.
    pub fn sources(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&ix| self.parents(ix).is_empty())
            .collect()
    }

    pub fn diagnostics(&self) -> &LayoutDiagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> LayoutDiagnostics {
        self.diagnostics
    }
}

/// Buckets `(from, to)` pairs by `from`, keeping pair order stable within each bucket.
fn compress(n: usize, pairs: impl Iterator<Item = (usize, usize)> + Clone) -> (Vec<usize>, Vec<usize>) {
    let mut offsets: Vec<usize> = vec![0; n + 1];
    for (from, _) in pairs.clone() {
        offsets[from + 1] += 1;
    }
    for ix in 0..n {
        offsets[ix + 1] += offsets[ix];
    }
    let mut cursor = offsets.clone();
    let mut edges: Vec<usize> = vec![0; offsets[n]];
    for (from, to) in pairs {
        edges[cursor[from]] = to;
        cursor[from] += 1;
    }
    (offsets, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(ids: &[&str]) -> Vec<Member> {
        ids.iter().map(|id| Member::new(*id, "First", "Last")).collect()
    }

    #[test]
    fn compress_keeps_bucket_order() {
        let (offsets, edges) = compress(3, [(2, 0), (0, 1), (2, 1), (0, 2)].into_iter());
        assert_eq!(offsets, vec![0, 2, 2, 4]);
        assert_eq!(edges, vec![1, 2, 0, 1]);
    }

    #[test]
    fn index_ignores_spouse_edges() {
        let idx = RelationshipIndex::build(
            &members(&["a", "b"]),
            &[Relationship::spouse("r1", "a", "b")],
        );
        assert_eq!(idx.edge_count(), 0);
        assert_eq!(idx.sources(), vec![0, 1]);
        assert!(idx.diagnostics().is_clean());
    }

    #[test]
    fn index_records_what_it_drops() {
        let idx = RelationshipIndex::build(
            &members(&["a", "b", "a"]),
            &[
                Relationship::parent_child("r1", "a", "b"),
                Relationship::parent_child("r2", "a", "b"),
                Relationship::parent_child("r3", "b", "b"),
                Relationship::parent_child("r4", "a", "ghost"),
            ],
        );
        assert_eq!(idx.node_count(), 2);
        assert_eq!(idx.children(0), &[1]);
        assert_eq!(idx.parents(1), &[0]);
        assert!(idx.parents(0).is_empty());

        let d = idx.diagnostics();
        assert_eq!(d.duplicate_members, vec![MemberId::from("a")]);
        assert_eq!(d.duplicate_edges.len(), 1);
        assert_eq!(d.duplicate_edges[0].as_str(), "r2");
        assert_eq!(d.self_loops[0].as_str(), "r3");
        assert_eq!(d.dangling[0].as_str(), "r4");
    }
}
