//! Row positioning.
//!
//! Positions are computed top-to-bottom with each generation on its own band; other rank
//! directions are handled afterwards by [`crate::coordinate_system`]. Within a band members keep
//! their input order and the row is centered on `x = 0`.

use crate::model::LayoutOptions;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
}

/// Node box size and separations in the top-to-bottom frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    pub node_width: f64,
    pub node_height: f64,
    pub node_sep: f64,
    pub generation_sep: f64,
}

impl From<&LayoutOptions> for RowMetrics {
    fn from(opts: &LayoutOptions) -> Self {
        Self {
            node_width: opts.node_width.max(0.0),
            node_height: opts.node_height.max(0.0),
            node_sep: opts.node_sep.max(0.0),
            generation_sep: opts.generation_sep.max(0.0),
        }
    }
}

/// Groups member indices by generation, preserving input order inside each row.
pub fn rows(generations: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (ix, &generation) in generations.iter().enumerate() {
        rows.entry(generation).or_default().push(ix);
    }
    rows
}

pub fn position(generations: &[usize], metrics: RowMetrics) -> Vec<Placement> {
    let mut out: Vec<Placement> = vec![Placement { x: 0.0, y: 0.0 }; generations.len()];
    let band = metrics.node_height + metrics.generation_sep;
    let pitch = metrics.node_width + metrics.node_sep;

    for (generation, ids) in rows(generations) {
        let count = ids.len() as f64;
        let total_width = count * metrics.node_width + (count - 1.0).max(0.0) * metrics.node_sep;
        let start = -total_width / 2.0;
        let y = generation as f64 * band;
        for (slot, ix) in ids.into_iter().enumerate() {
            out[ix] = Placement {
                x: start + slot as f64 * pitch + metrics.node_width / 2.0,
                y,
            };
        }
    }
    out
}
