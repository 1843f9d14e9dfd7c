//! Relationship type to visual treatment.
//!
//! `RelationshipKind` is a closed enum validated at ingestion, so the mapping is total and there
//! is no fallback treatment. Relationships whose endpoints are not in the snapshot are left out;
//! the index lists them in its diagnostics.

use crate::index::RelationshipIndex;
use crate::model::{EdgeCurve, EdgeDescriptor, EdgeKind};
use kindred_core::{Relationship, RelationshipKind};

pub fn kind_of(kind: RelationshipKind) -> EdgeKind {
    match kind {
        RelationshipKind::ParentChild => EdgeKind::Hierarchy,
        RelationshipKind::Spouse => EdgeKind::Partnership,
    }
}

pub fn describe(r: &Relationship) -> EdgeDescriptor {
    let kind = kind_of(r.kind);
    let (label, curve) = match kind {
        EdgeKind::Hierarchy => (None, EdgeCurve::Smoothstep),
        EdgeKind::Partnership => (Some("spouse".to_string()), EdgeCurve::Straight),
    };
    EdgeDescriptor {
        id: r.id.clone(),
        source: r.source.clone(),
        target: r.target.clone(),
        kind,
        label,
        curve,
    }
}

pub fn classify(relationships: &[Relationship], index: &RelationshipIndex) -> Vec<EdgeDescriptor> {
    relationships
        .iter()
        .filter(|r| {
            index.node_ix(r.source.as_str()).is_some() && index.node_ix(r.target.as_str()).is_some()
        })
        .map(describe)
        .collect()
}
