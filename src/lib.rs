//! k-clique community detection with the Clique Percolation Method.
//!
//! The run has two phases: every maximal clique of the graph is enumerated
//! (Bron–Kerbosch, no pivoting), then cliques sharing at least `k - 1`
//! vertices are merged into communities labeled by integer colors.
//!
//! ```
//! use clique_percolation::{k_clique_communities, Graph};
//!
//! let graph = Graph::from_edges(vec![
//!     ("A", "B"), ("A", "C"), ("B", "C"), ("B", "D"), ("C", "D"), ("D", "E"),
//! ]);
//! let communities = k_clique_communities(&graph, 3);
//! assert_eq!(communities[&1], vec!["A", "B", "C", "D"]);
//! ```

pub mod clique;
pub mod config;
pub mod graph;
pub mod logger;
pub mod output;
pub mod percolation;
pub mod set_ops;
pub mod types;

pub use clique::{find_max_cliques, CliqueEnumerator, EnumerationStats};
pub use config::RunConfig;
pub use graph::Graph;
pub use output::{write_communities, OutputFormat, Report};
pub use percolation::{k_clique_communities, MergePolicy, Percolation};
pub use types::{Clique, Color, Communities, UNCOLORED};
