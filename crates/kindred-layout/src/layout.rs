use crate::coordinate_system;
use crate::edges;
use crate::generation;
use crate::index::RelationshipIndex;
use crate::model::{Bounds, Layout, LayoutOptions, NodePosition};
use crate::position::{self, Placement, RowMetrics};
use indexmap::IndexMap;
use kindred_core::{Member, MemberId, Relationship, TreeSnapshot};

/// Lays out a snapshot: generation rows, centered positions and edge descriptors.
///
/// This is a pure function of its inputs. Malformed topology (cycles, several parents, dangling
/// endpoints, self-loops, repeated edges or members) never fails; see
/// [`crate::LayoutDiagnostics`] for what was tolerated.
pub fn compute_layout(
    members: &[Member],
    relationships: &[Relationship],
    options: &LayoutOptions,
) -> Layout {
    let index = RelationshipIndex::build(members, relationships);
    let generations = generation::assign(&index, options.policy);

    let metrics = coordinate_system::adjust(options.rank_dir, RowMetrics::from(options));
    let mut placements = position::position(&generations, metrics);
    coordinate_system::undo(options.rank_dir, &mut placements);

    let edges = edges::classify(relationships, &index);
    let bounds = bounds(&placements, options);
    let rows = generations.iter().max().map(|g| g + 1).unwrap_or(0);

    let mut nodes: IndexMap<MemberId, NodePosition> = IndexMap::with_capacity(index.node_count());
    for (ix, id) in index.nodes().iter().enumerate() {
        nodes.insert(
            id.clone(),
            NodePosition {
                x: placements[ix].x,
                y: placements[ix].y,
                generation: generations[ix],
            },
        );
    }

    let diagnostics = index.into_diagnostics();
    tracing::debug!(
        members = nodes.len(),
        edges = edges.len(),
        generations = rows,
        dangling = diagnostics.dangling.len(),
        self_loops = diagnostics.self_loops.len(),
        "computed family tree layout"
    );

    Layout {
        nodes,
        edges,
        bounds,
        generations: rows,
        diagnostics,
    }
}

pub fn compute_layout_snapshot(snapshot: &TreeSnapshot, options: &LayoutOptions) -> Layout {
    compute_layout(&snapshot.members, &snapshot.relationships, options)
}

/// Extent of all node boxes in the final coordinate frame.
fn bounds(placements: &[Placement], options: &LayoutOptions) -> Bounds {
    if placements.is_empty() {
        return Bounds::default();
    }
    let half_w = options.node_width.max(0.0) / 2.0;
    let half_h = options.node_height.max(0.0) / 2.0;

    let mut b = Bounds {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };
    for p in placements {
        b.min_x = b.min_x.min(p.x - half_w);
        b.min_y = b.min_y.min(p.y - half_h);
        b.max_x = b.max_x.max(p.x + half_w);
        b.max_y = b.max_y.max(p.y + half_h);
    }
    b
}
