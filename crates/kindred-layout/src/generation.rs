//! Generation (row) assignment.
//!
//! Both policies return one generation per indexed member, are deterministic for a fixed input
//! order, and enqueue every member at most once, so arbitrary input (cycles, several roots,
//! disconnected components) always terminates. `first_wins` is `O(members + edges)`; each cycle
//! `deepest` breaks adds one climb over the still unreleased members, with parent scans shared
//! across climbs.

use crate::index::RelationshipIndex;
use crate::model::GenerationPolicy;
use std::collections::VecDeque;

pub fn assign(index: &RelationshipIndex, policy: GenerationPolicy) -> Vec<usize> {
    match policy {
        GenerationPolicy::FirstWins => first_wins(index),
        GenerationPolicy::Deepest => deepest(index),
    }
}

/// Breadth-first from every parentless member.
///
/// When nobody is parentless (the hierarchy is one big cycle) the first member becomes the sole
/// root. A member keeps the generation of whichever parent reached it first; members the
/// traversal never reaches sit in generation 0.
pub fn first_wins(index: &RelationshipIndex) -> Vec<usize> {
    let n = index.node_count();
    if n == 0 {
        return Vec::new();
    }

    let mut roots = index.sources();
    if roots.is_empty() {
        roots.push(0);
    }

    let mut generation: Vec<Option<usize>> = vec![None; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);
    for root in roots {
        generation[root] = Some(0);
        queue.push_back(root);
    }

    while let Some(v) = queue.pop_front() {
        let next = generation[v].unwrap_or(0) + 1;
        for &w in index.children(v) {
            if generation[w].is_none() {
                generation[w] = Some(next);
                queue.push_back(w);
            }
        }
    }

    generation.into_iter().map(|g| g.unwrap_or(0)).collect()
}

/// Longest path from the roots: one row below the deepest parent.
///
/// Members are released in topological order (Kahn). When only cycles remain, the walk starts at
/// the first unreleased member in input order and climbs through unreleased parents until it
/// comes back to a member it already passed. That member sits on a cycle; it is forced out with
/// whatever depth its released parents imply, which breaks the cycle there and never places a
/// cycle's descendant above it.
pub fn deepest(index: &RelationshipIndex) -> Vec<usize> {
    let n = index.node_count();
    let mut generation: Vec<usize> = vec![0; n];
    let mut pending: Vec<usize> = (0..n).map(|ix| index.parents(ix).len()).collect();
    let mut queued: Vec<bool> = vec![false; n];
    let mut released: Vec<bool> = vec![false; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    // Per-member cursor into its parent list; released parents are skipped for good.
    let mut scan: Vec<usize> = vec![0; n];
    // Walk number that last passed each member (0 = never).
    let mut walked: Vec<usize> = vec![0; n];
    let mut walk = 0usize;

    for ix in index.sources() {
        queued[ix] = true;
        queue.push_back(ix);
    }

    let mut cursor = 0usize;
    loop {
        while let Some(v) = queue.pop_front() {
            released[v] = true;
            let next = generation[v] + 1;
            for &w in index.children(v) {
                if released[w] {
                    continue;
                }
                generation[w] = generation[w].max(next);
                pending[w] = pending[w].saturating_sub(1);
                if pending[w] == 0 && !queued[w] {
                    queued[w] = true;
                    queue.push_back(w);
                }
            }
        }

        while cursor < n && queued[cursor] {
            cursor += 1;
        }
        if cursor == n {
            break;
        }
        walk += 1;
        let forced = cycle_member(index, cursor, &released, &mut scan, &mut walked, walk);
        queued[forced] = true;
        queue.push_back(forced);
    }

    generation
}

/// Climbs from `start` through unreleased parents and returns the first member seen twice.
///
/// Once the queue is drained every unreleased member still waits on an unreleased parent, so the
/// climb always closes a loop.
fn cycle_member(
    index: &RelationshipIndex,
    start: usize,
    released: &[bool],
    scan: &mut [usize],
    walked: &mut [usize],
    walk: usize,
) -> usize {
    let mut v = start;
    loop {
        if walked[v] == walk {
            return v;
        }
        walked[v] = walk;
        let parents = index.parents(v);
        while scan[v] < parents.len() && released[parents[scan[v]]] {
            scan[v] += 1;
        }
        match parents.get(scan[v]) {
            Some(&p) => v = p,
            None => return v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_core::{Member, Relationship};

    fn index(ids: &[&str], edges: &[(&str, &str)]) -> RelationshipIndex {
        let members: Vec<Member> = ids.iter().map(|id| Member::new(*id, "F", "L")).collect();
        let rels: Vec<Relationship> = edges
            .iter()
            .enumerate()
            .map(|(i, (p, c))| Relationship::parent_child(format!("r{i}"), *p, *c))
            .collect();
        RelationshipIndex::build(&members, &rels)
    }

    #[test]
    fn first_wins_keeps_the_earliest_depth_for_multi_parent_members() {
        // a -> b -> d, and c -> d with c a root: d is reached from c first (depth 1).
        let idx = index(&["a", "c", "b", "d"], &[("a", "b"), ("b", "d"), ("c", "d")]);
        assert_eq!(first_wins(&idx), vec![0, 0, 1, 1]);
    }

    #[test]
    fn deepest_places_multi_parent_members_below_the_deepest_parent() {
        let idx = index(&["a", "c", "b", "d"], &[("a", "b"), ("b", "d"), ("c", "d")]);
        assert_eq!(deepest(&idx), vec![0, 0, 1, 2]);
    }

    #[test]
    fn first_wins_falls_back_to_the_first_member_when_everyone_has_a_parent() {
        let idx = index(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(first_wins(&idx), vec![0, 1, 2]);
    }

    #[test]
    fn first_wins_leaves_unreachable_cycles_in_generation_zero() {
        let idx = index(&["r", "k", "x", "y"], &[("r", "k"), ("x", "y"), ("y", "x")]);
        assert_eq!(first_wins(&idx), vec![0, 1, 0, 0]);
    }

    #[test]
    fn deepest_breaks_unreachable_cycles_on_the_cycle() {
        let idx = index(&["r", "k", "x", "y"], &[("r", "k"), ("x", "y"), ("y", "x")]);
        assert_eq!(deepest(&idx), vec![0, 1, 0, 1]);
    }

    #[test]
    fn deepest_handles_a_cycle_feeding_a_descendant() {
        // x <-> y, y -> z: forcing x releases y, which releases z.
        let idx = index(&["x", "y", "z"], &[("x", "y"), ("y", "x"), ("y", "z")]);
        assert_eq!(deepest(&idx), vec![0, 1, 2]);
    }

    #[test]
    fn deepest_never_lifts_a_cycle_descendant_above_its_parent() {
        // z is listed first but only hangs off the x <-> y cycle.
        let idx = index(&["z", "x", "y"], &[("x", "y"), ("y", "x"), ("y", "z")]);
        let generation = deepest(&idx);
        assert_eq!(generation, vec![1, 1, 0]);
        assert!(generation[0] > generation[2], "z must sit below its parent y");
    }

    #[test]
    fn deepest_climbs_through_a_chain_before_breaking_the_cycle() {
        // d <- c <- b, and b sits on the a <-> b cycle.
        let idx = index(
            &["d", "c", "a", "b"],
            &[("a", "b"), ("b", "a"), ("b", "c"), ("c", "d")],
        );
        assert_eq!(deepest(&idx), vec![2, 1, 1, 0]);
    }

    #[test]
    fn empty_index_yields_no_generations() {
        let idx = index(&[], &[]);
        assert!(first_wins(&idx).is_empty());
        assert!(deepest(&idx).is_empty());
    }
}
