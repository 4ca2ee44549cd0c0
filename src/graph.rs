use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use rand::Rng;

use crate::config::READ_BUFFER_SIZE;
use crate::set_ops;

/// An adjacency-list graph keyed by opaque, ordered vertex tokens.
///
/// Neighbor lists are kept sorted, duplicate-free and without self-loops.
/// Adjacency is taken as presented: a list built from adjacency lines is not
/// symmetrized, only `from_edges` inserts both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<V = String> {
    adj_map: BTreeMap<V, Vec<V>>, // Vertex -> sorted neighbors.
    vertices: Vec<V>, // Declared vertices, sorted.
    e_size: usize // Number of adjacency entries.
}

impl<V: Ord + Clone> Default for Graph<V> {
    fn default() -> Self {
        Graph::new()
    }
}

impl<V: Ord + Clone> Graph<V> {
    pub fn new() -> Graph<V> {
        // Create a new empty graph.
        Graph {
            adj_map: BTreeMap::new(),
            vertices: Vec::new(),
            e_size: 0
        }
    }

    /// Declare a vertex without adding any neighbor.
    pub fn insert_vertex(&mut self, vertex: V) {
        if let Err(pos) = self.vertices.binary_search(&vertex) {
            self.vertices.insert(pos, vertex.clone());
        }
        self.adj_map.entry(vertex).or_default();
    }

    /// Declare a vertex and merge `neighbors` into its adjacency list.
    pub fn insert_adjacency(&mut self, vertex: V, neighbors: impl IntoIterator<Item = V>) {
        let incoming = set_ops::normalize(
            neighbors.into_iter().filter(|n| *n != vertex).collect::<Vec<_>>()
        );
        self.insert_vertex(vertex.clone());
        let entry = self.adj_map.entry(vertex).or_default();
        let before = entry.len();
        *entry = set_ops::union(entry, &incoming);
        self.e_size += entry.len() - before;
    }

    /// Build a graph from (vertex, neighbors) pairs.
    pub fn from_adjacency(entries: impl IntoIterator<Item = (V, Vec<V>)>) -> Graph<V> {
        let mut graph = Graph::new();
        for (vertex, neighbors) in entries {
            graph.insert_adjacency(vertex, neighbors);
        }
        graph
    }

    /// Build an undirected graph from an edge list.
    pub fn from_edges(edges: impl IntoIterator<Item = (V, V)>) -> Graph<V> {
        let mut graph = Graph::new();
        for (u, v) in edges {
            graph.insert_adjacency(u.clone(), std::iter::once(v.clone()));
            graph.insert_adjacency(v, std::iter::once(u));
        }
        graph
    }

    /// Sorted neighbors of a vertex, empty when the vertex is unknown.
    pub fn neighbors(&self, vertex: &V) -> &[V] {
        self.adj_map.get(vertex).map(|n| n.as_slice()).unwrap_or(&[])
    }

    /// All declared vertices, sorted.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn has_edge(&self, src: &V, dst: &V) -> bool {
        self.neighbors(src).binary_search(dst).is_ok()
    }

    /// Check that every pair of `set` is adjacent (in both directions).
    pub fn is_clique(&self, set: &[V]) -> bool {
        set.iter().enumerate().all(|(i, u)| {
            set[i + 1..].iter().all(|v| self.has_edge(u, v) && self.has_edge(v, u))
        })
    }

    pub fn v_size(&self) -> usize {
        self.vertices.len()
    }

    pub fn e_size(&self) -> usize {
        self.e_size
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl Graph<String> {
    /// Parse the adjacency-list text format.
    /// Each line is `vertex neighbor1 neighbor2 ...`, blank lines and `#` comments are skipped.
    pub fn from_adjacency_reader<R: BufRead>(reader: R) -> Result<Graph<String>> {
        let mut graph = Graph::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("failed to read line {}", line_no + 1))?;
            let mut tokens = line.split_whitespace();
            let vertex = match tokens.next() {
                None => continue,
                Some(token) if token.starts_with('#') => continue,
                Some(token) => token.to_string()
            };
            if graph.adj_map.contains_key(&vertex) {
                warn!("Vertex {} declared again on line {}, merging neighbors", vertex, line_no + 1);
            }
            graph.insert_adjacency(vertex, tokens.map(str::to_string));
        }
        debug!("Loaded graph, vertex count: {}, edge count: {}", graph.v_size(), graph.e_size());
        Ok(graph)
    }

    /// Load a graph from an adjacency-list file.
    pub fn from_adjacency_file(file_path: impl AsRef<Path>) -> Result<Graph<String>> {
        let file_path = file_path.as_ref();
        let graph_file = File::open(file_path)
            .with_context(|| format!("failed to open graph file {}", file_path.display()))?;
        let graph_reader = BufReader::with_capacity(READ_BUFFER_SIZE, graph_file);
        Graph::from_adjacency_reader(graph_reader)
            .with_context(|| format!("failed to parse graph file {}", file_path.display()))
    }
}

impl Graph<u32> {
    /// Generate an Erdős–Rényi G(n, p) graph on vertices `0..n`.
    pub fn random_gnp<R: Rng>(n: u32, p: f64, rng: &mut R) -> Graph<u32> {
        let mut graph = Graph::new();
        for u in 0..n {
            graph.insert_vertex(u);
        }
        for u in 0..n {
            for v in (u + 1)..n {
                if rng.gen_bool(p) {
                    graph.insert_adjacency(u, std::iter::once(v));
                    graph.insert_adjacency(v, std::iter::once(u));
                }
            }
        }
        graph
    }
}
