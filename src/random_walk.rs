//! Restart-biased random walk generation.

use crate::graph::{GraphStore, NodeLabel};
use crate::Result;
use rand::prelude::*;

/// An ordered sequence of node labels produced by one walk.
pub type Walk<L> = Vec<L>;

/// Sample one restart-biased random walk starting at `start`.
///
/// At each step, with probability `restart` the walk teleports back to its
/// origin (`start`, not a global restart point); otherwise it moves to a
/// neighbor of the current node chosen uniformly at random. A degree-0 node
/// terminates the walk immediately, so `length` is an upper bound on the
/// number of nodes, not a guarantee.
///
/// The caller supplies the random source; two calls with the same graph,
/// arguments, and source state produce identical walks. One `f64` is drawn
/// per step regardless of `restart`, so `restart = 0.0` and `restart = 1.0`
/// consume the source at the same rate as any other value.
pub fn random_walk<L: NodeLabel, R: Rng>(
    graph: &GraphStore<L>,
    start: &L,
    length: usize,
    restart: f64,
    rng: &mut R,
) -> Result<Walk<L>> {
    graph.neighbors(start)?;

    let mut walk = Vec::with_capacity(length);
    if length == 0 {
        return Ok(walk);
    }
    walk.push(start.clone());

    while walk.len() < length {
        let current = &walk[walk.len() - 1];
        let nbrs = graph.neighbors(current)?;
        if nbrs.is_empty() {
            break;
        }
        let next = if rng.random::<f64>() >= restart {
            nbrs.choose(rng).unwrap().clone()
        } else {
            start.clone()
        };
        walk.push(next);
    }
    Ok(walk)
}
