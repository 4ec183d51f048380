//! `embedwalk`: random-walk corpus generation for node-embedding training.
//!
//! The pipeline is: load a graph ([`loaders`]) into a normalized adjacency
//! store ([`GraphStore`]), generate restart-biased random walks over it
//! ([`random_walk()`], [`build_corpus`], [`build_corpus_parallel`]), and feed
//! the walk sequences to an external word-vector trainer, optionally through
//! the one-pass [`StreamingVocabulary`] accumulator when the corpus is too
//! large to materialize twice.
//!
//! Public invariants (must not drift):
//! - **Normalized adjacency**: after [`GraphStore::normalize`], every
//!   neighbor list is sorted, deduplicated, and self-loop free; undirected
//!   graphs are symmetric.
//! - **Determinism**: walks and corpora are pure functions of the graph, the
//!   configuration, and the supplied random source's state. No global RNG is
//!   ever touched.
//! - **No silent recovery**: dead-end truncation is the only documented
//!   short-walk outcome; every other anomaly surfaces as an [`Error`].
//!
//! Swappable (allowed to change without breaking the contract):
//! - worker scheduling in the parallel build (so long as per-worker seeds and
//!   the merge-by-worker-index order are preserved)
//! - internal adjacency data structures (so long as invariants hold)

pub mod corpus;
pub mod graph;
pub mod loaders;
pub mod random_walk;
pub mod vocab;

#[cfg(feature = "parallel")]
pub use corpus::build_corpus_parallel;
pub use corpus::{build_corpus, Corpus, CorpusConfig, WalkStream};
pub use graph::{GraphStore, NodeLabel};
#[cfg(feature = "petgraph")]
pub use loaders::from_petgraph;
pub use loaders::{
    from_csr, load_adjacencylist, load_adjacencylist_file, load_edgelist, load_edgelist_file,
    CsrAdjacency,
};
pub use random_walk::{random_walk, Walk};
pub use vocab::{walk_tokens, StreamingVocabulary, Vocabulary};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed line in a line-based graph input. Fatal to the load.
    #[error("line {line}: malformed graph input: {content:?}")]
    Parse { line: usize, content: String },
    /// A node label was referenced but never declared in the graph.
    #[error("unknown node: {0}")]
    UnknownNode(String),
    /// A parallel corpus worker failed; the whole build is aborted.
    #[error("worker {worker} failed: {source}")]
    Worker {
        worker: usize,
        #[source]
        source: Box<Error>,
    },
    /// A walk or corpus was requested over a graph with zero nodes.
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
