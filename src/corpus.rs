//! Corpus construction: many walks, sequential or parallel.
//!
//! A corpus is built in *passes*: each pass shuffles the node set with the
//! corpus RNG and produces one walk per node in that order. The permutation
//! controls which node starts which walk; walk content comes from the same
//! RNG stream. The parallel build partitions whole passes across workers so
//! each worker runs the identical per-pass loop, which is what makes the
//! sequential and parallel paths equivalent modulo worker interleaving.

use crate::graph::{GraphStore, NodeLabel};
use crate::random_walk::{random_walk, Walk};
use crate::{Error, Result};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// The full collection of walks for one training run.
pub type Corpus<L> = Vec<Walk<L>>;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorpusConfig {
    /// Number of passes; each pass yields one walk per node.
    pub passes: usize,
    /// Maximum walk length (in nodes).
    pub length: usize,
    /// Per-step probability of teleporting back to the walk's origin.
    pub restart: f64,
    /// Base seed for deterministic RNG (parallel workers derive from it).
    pub seed: u64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self { passes: 10, length: 40, restart: 0.0, seed: 42 }
    }
}

/// One worker's share of the passes: whole passes, run with a private RNG.
fn run_passes<L: NodeLabel, R: Rng>(
    graph: &GraphStore<L>,
    passes: usize,
    length: usize,
    restart: f64,
    rng: &mut R,
) -> Result<Corpus<L>> {
    let mut order = graph.node_vec();
    let mut walks = Vec::with_capacity(passes * order.len());
    for _ in 0..passes {
        order.shuffle(rng);
        for node in &order {
            walks.push(random_walk(graph, node, length, restart, rng)?);
        }
    }
    Ok(walks)
}

/// Build a corpus sequentially: `config.passes × graph.order()` walks.
///
/// The caller owns the random source, so reproducibility is solely a function
/// of its initial state.
pub fn build_corpus<L: NodeLabel, R: Rng>(
    graph: &GraphStore<L>,
    config: &CorpusConfig,
    rng: &mut R,
) -> Result<Corpus<L>> {
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }
    tracing::debug!(
        nodes = graph.order(),
        passes = config.passes,
        length = config.length,
        "building corpus sequentially"
    );
    run_passes(graph, config.passes, config.length, config.restart, rng)
}

/// Build a corpus across `workers` independent workers.
///
/// The passes are split into contiguous chunks, largest remainder to the
/// earliest workers; worker `i` seeds its own `ChaCha8Rng` with
/// `config.seed + i` and runs the same per-pass loop as [`build_corpus`].
/// Sub-corpora are concatenated by worker index, so output is deterministic
/// regardless of scheduling. Any worker error aborts the whole build as
/// [`Error::Worker`]; no partial corpus is returned.
///
/// With `workers = 1` the result is byte-identical to [`build_corpus`] driven
/// by `ChaCha8Rng::seed_from_u64(config.seed)`.
#[cfg(feature = "parallel")]
pub fn build_corpus_parallel<L>(
    graph: &GraphStore<L>,
    config: &CorpusConfig,
    workers: usize,
) -> Result<Corpus<L>>
where
    L: NodeLabel + Send + Sync,
{
    use rayon::prelude::*;

    if workers == 0 {
        return Err(Error::InvalidParameter("workers must be >= 1".into()));
    }
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }

    let shares = split_passes(config.passes, workers);
    tracing::debug!(
        nodes = graph.order(),
        passes = config.passes,
        workers,
        "building corpus in parallel"
    );

    let chunks: Vec<Corpus<L>> = shares
        .par_iter()
        .enumerate()
        .map(|(i, &share)| {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(i as u64));
            run_passes(graph, share, config.length, config.restart, &mut rng)
                .map_err(|e| Error::Worker { worker: i, source: Box::new(e) })
        })
        .collect::<Result<_>>()?;

    let mut corpus = Vec::with_capacity(config.passes * graph.order());
    for chunk in chunks {
        corpus.extend(chunk);
    }
    Ok(corpus)
}

/// Split `passes` into `workers` contiguous chunks, largest remainder first.
#[cfg(feature = "parallel")]
fn split_passes(passes: usize, workers: usize) -> Vec<usize> {
    let base = passes / workers;
    let rem = passes % workers;
    (0..workers).map(|i| base + usize::from(i < rem)).collect()
}

/// Restartable, lazily-evaluated walk sequence.
///
/// Yields exactly the walks [`build_corpus`] would produce for this graph and
/// config with `ChaCha8Rng::seed_from_u64(config.seed)`, one at a time, so a
/// corpus larger than memory can be consumed in one pass (and re-streamed for
/// the trainer by constructing — or cloning — the stream again).
///
/// Construction validates the graph, so iteration itself cannot fail.
#[derive(Debug, Clone)]
pub struct WalkStream<'g, L: NodeLabel> {
    graph: &'g GraphStore<L>,
    config: CorpusConfig,
    rng: ChaCha8Rng,
    order: Vec<L>,
    pass: usize,
    pos: usize,
}

impl<'g, L: NodeLabel> WalkStream<'g, L> {
    pub fn new(graph: &'g GraphStore<L>, config: &CorpusConfig) -> Result<Self> {
        if graph.is_empty() {
            return Err(Error::EmptyGraph);
        }
        graph.validate()?;
        Ok(Self {
            graph,
            config: *config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            order: graph.node_vec(),
            pass: 0,
            pos: 0,
        })
    }

    /// Walks remaining in the stream.
    fn remaining(&self) -> usize {
        let per_pass = self.order.len();
        (self.config.passes - self.pass) * per_pass - self.pos
    }
}

impl<L: NodeLabel> Iterator for WalkStream<'_, L> {
    type Item = Walk<L>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pass >= self.config.passes {
            return None;
        }
        if self.pos == 0 {
            self.order.shuffle(&mut self.rng);
        }
        let start = self.order[self.pos].clone();
        let walk = random_walk(
            self.graph,
            &start,
            self.config.length,
            self.config.restart,
            &mut self.rng,
        )
        .expect("graph validated at stream construction");

        self.pos += 1;
        if self.pos == self.order.len() {
            self.pos = 0;
            self.pass += 1;
        }
        Some(walk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<L: NodeLabel> ExactSizeIterator for WalkStream<'_, L> {}
