//! Adjacency-list graph store.
//!
//! `GraphStore` keeps a sorted map from node label to neighbor list, so node
//! enumeration order is deterministic by construction. Structural mutation is
//! limited to construction time: once walks start, the store is treated as an
//! immutable snapshot.

use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

/// Anything usable as a node identifier: hashable, totally ordered, printable.
///
/// Concretely this covers integers and strings; the `Display` bound is what
/// lets walks be handed to a word-vector trainer as string tokens.
pub trait NodeLabel: Ord + Hash + Clone + fmt::Debug + fmt::Display {}

impl<T: Ord + Hash + Clone + fmt::Debug + fmt::Display> NodeLabel for T {}

/// Adjacency-list graph over labels of type `L`.
///
/// Invariants after [`GraphStore::normalize`]:
/// - every neighbor list is sorted and deduplicated, with no self-loops
/// - every label mentioned as a neighbor is also a declared node
/// - if normalized with `undirected = true`, adjacency is symmetric
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStore<L: NodeLabel> {
    adj: BTreeMap<L, Vec<L>>,
}

impl<L: NodeLabel> GraphStore<L> {
    pub fn new() -> Self {
        Self { adj: BTreeMap::new() }
    }

    /// Build a normalized graph from an edge iterator.
    ///
    /// Both endpoints of every edge are implicitly declared as nodes.
    pub fn from_edges<I>(edges: I, undirected: bool) -> Self
    where
        I: IntoIterator<Item = (L, L)>,
    {
        let mut g = Self::new();
        for (a, b) in edges {
            g.insert_edge(a, b);
        }
        g.normalize(undirected);
        g
    }

    /// Declare a node, with no neighbors, if it is not already present.
    pub fn insert_node(&mut self, node: L) {
        self.adj.entry(node).or_default();
    }

    /// Append a directed edge `a -> b`, implicitly declaring both endpoints.
    ///
    /// The neighbor list is left unnormalized; call [`GraphStore::normalize`]
    /// once construction is complete.
    pub fn insert_edge(&mut self, a: L, b: L) {
        self.adj.entry(b.clone()).or_default();
        self.adj.entry(a).or_default().push(b);
    }

    /// Node labels in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &L> {
        self.adj.keys()
    }

    /// Sorted node labels as an owned vector (the per-pass permutation seed).
    pub fn node_vec(&self) -> Vec<L> {
        self.adj.keys().cloned().collect()
    }

    pub fn contains(&self, node: &L) -> bool {
        self.adj.contains_key(node)
    }

    /// Neighbor list of `node`, or [`Error::UnknownNode`] if absent.
    pub fn neighbors(&self, node: &L) -> Result<&[L]> {
        self.adj
            .get(node)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownNode(node.to_string()))
    }

    pub fn degree(&self, node: &L) -> Result<usize> {
        self.neighbors(node).map(<[L]>::len)
    }

    pub fn has_edge(&self, a: &L, b: &L) -> bool {
        self.adj.get(a).is_some_and(|nbrs| nbrs.contains(b))
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.adj.len()
    }

    /// Number of directed edges (an undirected edge counts twice).
    pub fn size(&self) -> usize {
        self.adj.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Normalize the adjacency state in place. Idempotent.
    ///
    /// Declares every mentioned neighbor as a node, adds the reverse of each
    /// edge when `undirected`, then sorts and dedups every neighbor list and
    /// drops self-loops.
    pub fn normalize(&mut self, undirected: bool) {
        let mut missing: Vec<L> = Vec::new();
        for nbrs in self.adj.values() {
            for n in nbrs {
                if !self.adj.contains_key(n) {
                    missing.push(n.clone());
                }
            }
        }
        for n in missing {
            self.adj.entry(n).or_default();
        }

        if undirected {
            let mut reverse: Vec<(L, L)> = Vec::new();
            for (u, nbrs) in &self.adj {
                for v in nbrs {
                    reverse.push((v.clone(), u.clone()));
                }
            }
            for (v, u) in reverse {
                // unconditional push; the dedup below removes duplicates
                self.adj.entry(v).or_default().push(u);
            }
        }

        for (u, nbrs) in self.adj.iter_mut() {
            nbrs.sort_unstable();
            nbrs.dedup();
            nbrs.retain(|v| v != u);
        }
    }

    /// Check that every neighbor label is a declared node.
    ///
    /// Holds for any graph that went through [`GraphStore::normalize`]; walk
    /// streaming relies on it to make iteration infallible.
    pub fn validate(&self) -> Result<()> {
        for nbrs in self.adj.values() {
            for n in nbrs {
                if !self.adj.contains_key(n) {
                    return Err(Error::UnknownNode(n.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Induced subgraph on `keep`: the listed nodes (those present in `self`)
    /// and every edge whose endpoints are both kept.
    pub fn subgraph(&self, keep: &[L]) -> GraphStore<L> {
        let mut sub = GraphStore::new();
        for node in keep {
            if let Some(nbrs) = self.adj.get(node) {
                let kept: Vec<L> = nbrs.iter().filter(|n| keep.contains(n)).cloned().collect();
                sub.adj.insert(node.clone(), kept);
            }
        }
        sub
    }
}
