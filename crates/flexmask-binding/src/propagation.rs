//! Multi-source breadth-first influence propagation.
//!
//! Every keypoint floods the edge graph from its anchor, one hop per
//! round, all keypoints advancing in lockstep. A vertex records the first
//! three keypoints that reach it together with the hop count, so entries
//! are naturally ordered by distance.
//!
//! Each edge is traversed at most once per keypoint, tracked by a
//! keypoint × edge bitset that lives outside the graph and is cleared
//! after every run.

use flexmask_mesh::EdgeGraph;
use flexmask_types::constants::MAX_INFLUENCES;
use flexmask_types::{EdgeId, KeypointId, VertexId};
use serde::{Deserialize, Serialize};

use crate::keypoint::Keypoint;

/// One keypoint reaching a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Influence {
    pub keypoint: KeypointId,
    /// Shortest path length in edges to the keypoint's anchor class.
    pub distance: u32,
}

impl Influence {
    const EMPTY: Self = Self {
        keypoint: KeypointId(0),
        distance: 0,
    };
}

/// Up to [`MAX_INFLUENCES`] influences, in order of arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexInfluence {
    slots: [Influence; MAX_INFLUENCES],
    len: usize,
}

impl Default for VertexInfluence {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexInfluence {
    pub const fn new() -> Self {
        Self {
            slots: [Influence::EMPTY; MAX_INFLUENCES],
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == MAX_INFLUENCES
    }

    #[inline]
    pub fn as_slice(&self) -> &[Influence] {
        &self.slots[..self.len]
    }

    pub fn contains(&self, keypoint: KeypointId) -> bool {
        self.as_slice().iter().any(|i| i.keypoint == keypoint)
    }

    /// Returns the recorded distance to `keypoint`, if it reached this vertex.
    pub fn distance_to(&self, keypoint: KeypointId) -> Option<u32> {
        self.as_slice()
            .iter()
            .find(|i| i.keypoint == keypoint)
            .map(|i| i.distance)
    }

    /// Appends an influence. Returns false when full or already present.
    pub fn push(&mut self, influence: Influence) -> bool {
        if self.is_full() || self.contains(influence.keypoint) {
            return false;
        }
        self.slots[self.len] = influence;
        self.len += 1;
        true
    }
}

/// Per-keypoint "edge already browsed" bitset.
#[derive(Debug, Clone, Default)]
struct BrowseMarks {
    edge_count: usize,
    bits: Vec<u64>,
}

impl BrowseMarks {
    fn prepare(&mut self, keypoint_count: usize, edge_count: usize) {
        self.edge_count = edge_count;
        let words = (keypoint_count * edge_count).div_ceil(64);
        self.bits.clear();
        self.bits.resize(words, 0);
    }

    /// Marks `edge` as browsed for `keypoint`; false if it already was.
    #[inline]
    fn mark(&mut self, keypoint: usize, edge: EdgeId) -> bool {
        let bit = keypoint * self.edge_count + edge.index();
        let (word, mask) = (bit / 64, 1u64 << (bit % 64));
        let fresh = self.bits[word] & mask == 0;
        self.bits[word] |= mask;
        fresh
    }

    fn reset(&mut self) {
        self.bits.fill(0);
    }

    fn is_clear(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }
}

/// Runs influence propagation over one edge graph.
///
/// The propagator can be reused for several keypoint sets on the same mesh.
pub struct InfluencePropagator<'g> {
    graph: &'g EdgeGraph,
    marks: BrowseMarks,
}

impl<'g> InfluencePropagator<'g> {
    pub fn new(graph: &'g EdgeGraph) -> Self {
        Self {
            graph,
            marks: BrowseMarks::default(),
        }
    }

    /// Returns true when no edge is marked as browsed.
    pub fn is_reset(&self) -> bool {
        self.marks.is_clear()
    }

    /// Computes the influences of `keypoints` on every vertex.
    pub fn run(&mut self, keypoints: &[Keypoint]) -> Vec<VertexInfluence> {
        let graph = self.graph;
        let mut influences = vec![VertexInfluence::new(); graph.vertex_count()];
        self.marks.prepare(keypoints.len(), graph.edge_count());

        // Seed: the whole anchor class sits at distance 0.
        let mut frontiers: Vec<Vec<VertexId>> = keypoints
            .iter()
            .enumerate()
            .map(|(k, keypoint)| {
                let seed = Influence {
                    keypoint: KeypointId(k as u32),
                    distance: 0,
                };
                for &eq in graph.equivalents(keypoint.anchor) {
                    influences[eq.index()].push(seed);
                }
                vec![keypoint.anchor]
            })
            .collect();

        let mut distance = 1u32;
        loop {
            let mut grown = 0;

            for (k, frontier) in frontiers.iter_mut().enumerate() {
                let id = KeypointId(k as u32);
                let mut next: Vec<VertexId> = Vec::new();

                for &v in frontier.iter() {
                    for edge in graph.edges_around(v) {
                        if !self.marks.mark(k, edge) {
                            continue;
                        }
                        let neighbor = graph.far_end(edge, v);
                        let current = &influences[neighbor.index()];
                        if current.is_full() || current.contains(id) {
                            continue;
                        }

                        let influence = Influence {
                            keypoint: id,
                            distance,
                        };
                        for &eq in graph.equivalents(neighbor) {
                            influences[eq.index()].push(influence);
                        }
                        next.push(neighbor);
                    }
                }

                grown += next.len();
                *frontier = next;
            }

            if grown == 0 {
                break;
            }
            distance += 1;
        }

        self.marks.reset();

        tracing::debug!(
            keypoints = keypoints.len(),
            rounds = distance,
            unbound = influences.iter().filter(|i| i.is_empty()).count(),
            "influences propagated"
        );

        influences
    }
}

/// One-shot propagation of `keypoints` over `graph`.
pub fn propagate(graph: &EdgeGraph, keypoints: &[Keypoint]) -> Vec<VertexInfluence> {
    InfluencePropagator::new(graph).run(keypoints)
}
