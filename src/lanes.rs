use crate::item::ScheduledItem;
use chrono::NaiveDateTime;
use petgraph::graph::{NodeIndex, UnGraph};

/// Partition of a set of items into display lanes. `lanes` holds indices into
/// the input slice; no two items in one lane overlap in time. Items without a
/// placed time range are listed in `unplaced` and take no lane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneAssignment {
    pub lanes: Vec<Vec<usize>>,
    pub unplaced: Vec<usize>,
}

impl LaneAssignment {
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }
}

/// Strict half-open interval overlap.
fn overlaps(a: (NaiveDateTime, NaiveDateTime), b: (NaiveDateTime, NaiveDateTime)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

/// Assign non-overlapping display lanes.
///
/// Builds the interval-overlap graph and colors it greedily in input order:
/// each item takes the first lane free of conflicts, opening a new lane when
/// none accepts it. Greedy coloring is not guaranteed lane-minimal for every
/// ordering; that is accepted for display purposes. Callers needing a minimal
/// packing should run a proper interval-graph coloring instead.
pub fn assign_lanes(items: &[ScheduledItem]) -> LaneAssignment {
    let mut timed: Vec<(usize, (NaiveDateTime, NaiveDateTime))> = Vec::new();
    let mut unplaced = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match item.interval() {
            Some(interval) => timed.push((index, interval)),
            None => unplaced.push(index),
        }
    }

    let mut graph: UnGraph<usize, ()> = UnGraph::new_undirected();
    for (index, _) in &timed {
        graph.add_node(*index);
    }
    for i in 0..timed.len() {
        for j in (i + 1)..timed.len() {
            if overlaps(timed[i].1, timed[j].1) {
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), ());
            }
        }
    }

    let mut lane_of = vec![usize::MAX; timed.len()];
    let mut lane_count = 0_usize;
    for i in 0..timed.len() {
        let mut taken = vec![false; lane_count];
        for neighbor in graph.neighbors(NodeIndex::new(i)) {
            let lane = lane_of[neighbor.index()];
            if lane != usize::MAX {
                taken[lane] = true;
            }
        }
        let lane = (0..lane_count)
            .find(|&lane| !taken[lane])
            .unwrap_or(lane_count);
        if lane == lane_count {
            lane_count += 1;
        }
        lane_of[i] = lane;
    }

    let mut lanes = vec![Vec::new(); lane_count];
    for (i, (index, _)) in timed.iter().enumerate() {
        lanes[lane_of[i]].push(*index);
    }

    LaneAssignment { lanes, unplaced }
}
