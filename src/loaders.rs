//! Format-specific graph constructors.
//!
//! Every loader implicitly declares nodes on first mention (as either edge
//! endpoint) and hands back a normalized [`GraphStore`]; `undirected` selects
//! whether normalization adds the symmetric closure. Line-based formats skip
//! blank lines and `#` comments, and any unparseable line aborts the load
//! with [`Error::Parse`] naming the offending line.

use crate::graph::{GraphStore, NodeLabel};
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

fn parse_token<L>(token: &str, line_no: usize, line: &str) -> Result<L>
where
    L: NodeLabel + FromStr,
{
    token.parse().map_err(|_| Error::Parse {
        line: line_no,
        content: line.to_string(),
    })
}

/// Load whitespace-separated edge pairs, one `"<node> <node>"` per line.
pub fn load_edgelist<L, R>(reader: R, undirected: bool) -> Result<GraphStore<L>>
where
    L: NodeLabel + FromStr,
    R: BufRead,
{
    let mut graph = GraphStore::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(Error::Parse { line: line_no, content: line.clone() });
        }
        let a: L = parse_token(tokens[0], line_no, &line)?;
        let b: L = parse_token(tokens[1], line_no, &line)?;
        graph.insert_edge(a, b);
    }
    graph.normalize(undirected);
    tracing::debug!(nodes = graph.order(), edges = graph.size(), "loaded edge list");
    Ok(graph)
}

/// Load whitespace-separated adjacency rows, `"<node> <neighbor> ..."` per
/// line. A lone token declares an isolated node.
pub fn load_adjacencylist<L, R>(reader: R, undirected: bool) -> Result<GraphStore<L>>
where
    L: NodeLabel + FromStr,
    R: BufRead,
{
    let mut graph = GraphStore::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let node: L = match tokens.next() {
            Some(t) => parse_token(t, line_no, &line)?,
            None => continue,
        };
        graph.insert_node(node.clone());
        for t in tokens {
            let neighbor: L = parse_token(t, line_no, &line)?;
            graph.insert_edge(node.clone(), neighbor);
        }
    }
    graph.normalize(undirected);
    tracing::debug!(nodes = graph.order(), edges = graph.size(), "loaded adjacency list");
    Ok(graph)
}

pub fn load_edgelist_file<L, P>(path: P, undirected: bool) -> Result<GraphStore<L>>
where
    L: NodeLabel + FromStr,
    P: AsRef<Path>,
{
    load_edgelist(BufReader::new(File::open(path)?), undirected)
}

pub fn load_adjacencylist_file<L, P>(path: P, undirected: bool) -> Result<GraphStore<L>>
where
    L: NodeLabel + FromStr,
    P: AsRef<Path>,
{
    load_adjacencylist(BufReader::new(File::open(path)?), undirected)
}

/// Borrowed CSR-style sparse adjacency: row `i`'s neighbors are
/// `indices[indptr[i]..indptr[i + 1]]`. Node labels are the row/column
/// indices `0..indptr.len() - 1`.
#[derive(Debug, Clone, Copy)]
pub struct CsrAdjacency<'a> {
    pub indptr: &'a [usize],
    pub indices: &'a [usize],
}

/// Build a graph from a CSR sparse adjacency structure.
///
/// Fails with [`Error::InvalidParameter`] if `indptr` is empty or not
/// monotonic, does not span `indices`, or any column index is out of range.
pub fn from_csr(matrix: &CsrAdjacency<'_>, undirected: bool) -> Result<GraphStore<usize>> {
    let CsrAdjacency { indptr, indices } = *matrix;
    if indptr.is_empty() {
        return Err(Error::InvalidParameter("csr indptr must be non-empty".into()));
    }
    if indptr.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::InvalidParameter("csr indptr must be non-decreasing".into()));
    }
    let n = indptr.len() - 1;
    if indptr[0] != 0 || indptr[n] != indices.len() {
        return Err(Error::InvalidParameter(
            "csr indptr must span the indices array".into(),
        ));
    }

    let mut graph = GraphStore::new();
    for row in 0..n {
        graph.insert_node(row);
        for &col in &indices[indptr[row]..indptr[row + 1]] {
            if col >= n {
                return Err(Error::InvalidParameter(format!(
                    "csr column index {col} out of range for {n} nodes"
                )));
            }
            graph.insert_edge(row, col);
        }
    }
    graph.normalize(undirected);
    Ok(graph)
}

/// Import an externally-constructed petgraph graph by edge iteration.
///
/// Node labels are the petgraph node indices (`NodeIndex::index()`); isolated
/// petgraph nodes are preserved.
#[cfg(feature = "petgraph")]
pub fn from_petgraph<N, E, Ty, Ix>(
    source: &petgraph::Graph<N, E, Ty, Ix>,
    undirected: bool,
) -> GraphStore<usize>
where
    Ty: petgraph::EdgeType,
    Ix: petgraph::graph::IndexType,
{
    use petgraph::visit::EdgeRef;

    let mut graph = GraphStore::new();
    for node in source.node_indices() {
        graph.insert_node(node.index());
    }
    for edge in source.edge_references() {
        graph.insert_edge(edge.source().index(), edge.target().index());
    }
    graph.normalize(undirected);
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn edgelist_roundtrip() {
        let input = "# comment\n1 2\n2 3\n3 1\n\n";
        let g: GraphStore<u32> = load_edgelist(Cursor::new(input), true).unwrap();
        assert_eq!(g.order(), 3);
        assert!(g.has_edge(&1, &2));
        assert!(g.has_edge(&2, &1));
    }

    #[test]
    fn edgelist_directed_keeps_orientation() {
        let g: GraphStore<u32> = load_edgelist(Cursor::new("1 2\n"), false).unwrap();
        assert!(g.has_edge(&1, &2));
        assert!(!g.has_edge(&2, &1));
        assert_eq!(g.degree(&2).unwrap(), 0);
    }

    #[test]
    fn edgelist_rejects_wrong_token_count() {
        let err = load_edgelist::<u32, _>(Cursor::new("1 2\n3 4 5\n"), true).unwrap_err();
        match err {
            Error::Parse { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "3 4 5");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn edgelist_rejects_non_numeric_for_numeric_labels() {
        let err = load_edgelist::<u32, _>(Cursor::new("1 x\n"), true).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn edgelist_accepts_string_labels() {
        let g: GraphStore<String> = load_edgelist(Cursor::new("ada lovelace\n"), true).unwrap();
        assert!(g.has_edge(&"ada".to_string(), &"lovelace".to_string()));
    }

    #[test]
    fn adjacencylist_roundtrip_with_isolated_node() {
        let input = "1 2 3\n2 1\n3 1\n5\n";
        let g: GraphStore<u32> = load_adjacencylist(Cursor::new(input), true).unwrap();
        assert_eq!(g.order(), 4);
        assert_eq!(g.degree(&1).unwrap(), 2);
        assert_eq!(g.degree(&5).unwrap(), 0);
    }

    #[test]
    fn adjacencylist_rejects_bad_neighbor_token() {
        let err = load_adjacencylist::<u32, _>(Cursor::new("1 2\n2 oops\n"), true).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn csr_roundtrip() {
        // 0 -- 1, 1 -- 2 (already symmetric)
        let indptr = [0usize, 1, 3, 4];
        let indices = [1usize, 0, 2, 1];
        let g = from_csr(&CsrAdjacency { indptr: &indptr, indices: &indices }, true).unwrap();
        assert_eq!(g.order(), 3);
        assert_eq!(g.neighbors(&1).unwrap(), &[0, 2]);
    }

    #[test]
    fn csr_validation() {
        let bad_span = CsrAdjacency { indptr: &[0, 2], indices: &[1] };
        assert!(matches!(from_csr(&bad_span, true), Err(Error::InvalidParameter(_))));

        let bad_order = CsrAdjacency { indptr: &[0, 2, 1], indices: &[1, 0] };
        assert!(matches!(from_csr(&bad_order, true), Err(Error::InvalidParameter(_))));

        let bad_col = CsrAdjacency { indptr: &[0, 1], indices: &[7] };
        assert!(matches!(from_csr(&bad_col, true), Err(Error::InvalidParameter(_))));

        let empty = CsrAdjacency { indptr: &[], indices: &[] };
        assert!(matches!(from_csr(&empty, true), Err(Error::InvalidParameter(_))));
    }

    #[cfg(feature = "petgraph")]
    #[test]
    fn petgraph_import_preserves_isolated_nodes() {
        let mut pg = petgraph::Graph::<(), ()>::new();
        let a = pg.add_node(());
        let b = pg.add_node(());
        let _lonely = pg.add_node(());
        pg.add_edge(a, b, ());

        let g = from_petgraph(&pg, true);
        assert_eq!(g.order(), 3);
        assert!(g.has_edge(&0, &1));
        assert!(g.has_edge(&1, &0));
        assert_eq!(g.degree(&2).unwrap(), 0);
    }
}
