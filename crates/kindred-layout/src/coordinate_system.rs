//! Rank direction support.
//!
//! Row positioning always works top-to-bottom. For left-to-right / right-to-left layouts we swap
//! the node box before positioning and swap the axes back afterwards; bottom-to-top and
//! right-to-left mirror the generation axis.

use crate::model::RankDir;
use crate::position::{Placement, RowMetrics};

pub fn adjust(rank_dir: RankDir, metrics: RowMetrics) -> RowMetrics {
    match rank_dir {
        RankDir::LR | RankDir::RL => RowMetrics {
            node_width: metrics.node_height,
            node_height: metrics.node_width,
            ..metrics
        },
        RankDir::TB | RankDir::BT => metrics,
    }
}

pub fn undo(rank_dir: RankDir, placements: &mut [Placement]) {
    match rank_dir {
        RankDir::BT | RankDir::RL => reverse_y(placements),
        RankDir::TB | RankDir::LR => {}
    }

    match rank_dir {
        RankDir::LR | RankDir::RL => swap_xy(placements),
        RankDir::TB | RankDir::BT => {}
    }
}

fn reverse_y(placements: &mut [Placement]) {
    for p in placements {
        // Keep generation 0 at exactly 0 rather than -0.
        p.y = if p.y == 0.0 { 0.0 } else { -p.y };
    }
}

fn swap_xy(placements: &mut [Placement]) {
    for p in placements {
        (p.x, p.y) = (p.y, p.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> RowMetrics {
        RowMetrics {
            node_width: 100.0,
            node_height: 40.0,
            node_sep: 10.0,
            generation_sep: 20.0,
        }
    }

    #[test]
    fn adjust_swaps_the_node_box_for_horizontal_layouts() {
        let m = adjust(RankDir::LR, metrics());
        assert_eq!((m.node_width, m.node_height), (40.0, 100.0));
        assert_eq!((m.node_sep, m.generation_sep), (10.0, 20.0));
        assert_eq!(adjust(RankDir::BT, metrics()), metrics());
    }

    #[test]
    fn undo_maps_generations_onto_the_requested_axis() {
        let base = [Placement { x: -5.0, y: 60.0 }];

        let mut bt = base;
        undo(RankDir::BT, &mut bt);
        assert_eq!(bt[0], Placement { x: -5.0, y: -60.0 });

        let mut lr = base;
        undo(RankDir::LR, &mut lr);
        assert_eq!(lr[0], Placement { x: 60.0, y: -5.0 });

        let mut rl = base;
        undo(RankDir::RL, &mut rl);
        assert_eq!(rl[0], Placement { x: -60.0, y: -5.0 });
    }
}
