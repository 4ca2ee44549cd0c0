// Bron, C.; Kerbosch, J. (1973). "Algorithm 457: finding all cliques of an undirected graph".
// Communications of the ACM. 16 (9): 575–577.
use log::{debug, trace};

use crate::graph::Graph;
use crate::set_ops;
use crate::types::Clique;

/// Counters collected during one enumeration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationStats {
    pub calls: u64, // Number of recursive calls.
    pub max_depth: usize, // Deepest committed clique size.
    pub cliques: usize // Number of maximal cliques emitted.
}

/// Exhaustive Bron–Kerbosch search without pivoting.
///
/// Candidates are always expanded in ascending order, so two runs over the
/// same graph emit the same cliques in the same order.
pub struct CliqueEnumerator<'g, V> {
    graph: &'g Graph<V>,
    cliques: Vec<Clique<V>>,
    stats: EnumerationStats
}

impl<'g, V: Ord + Clone> CliqueEnumerator<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        CliqueEnumerator {
            graph,
            cliques: Vec::new(),
            stats: EnumerationStats::default()
        }
    }

    /// Run the search and return every maximal clique, uncolored, in discovery order.
    pub fn run(mut self) -> (Vec<Clique<V>>, EnumerationStats) {
        if !self.graph.is_empty() {
            let candidates = self.graph.vertices().to_vec();
            self.expand(&[], candidates, Vec::new());
        }
        self.stats.cliques = self.cliques.len();
        debug!(
            "Clique enumeration done, calls: {}, max depth: {}, maximal cliques: {}",
            self.stats.calls, self.stats.max_depth, self.stats.cliques
        );
        (self.cliques, self.stats)
    }

    // `clique` is R, `candidates` is P and `excluded` is X.
    fn expand(&mut self, clique: &[V], mut candidates: Vec<V>, mut excluded: Vec<V>) {
        self.stats.calls += 1;
        self.stats.max_depth = self.stats.max_depth.max(clique.len());

        if candidates.is_empty() && excluded.is_empty() {
            debug_assert!(set_ops::is_sorted_set(clique));
            trace!("Maximal clique of size {} found", clique.len());
            self.cliques.push(Clique::new(clique.to_vec()));
            return;
        }

        while let Some(v) = candidates.first().cloned() {
            let neighbors = self.graph.neighbors(&v);

            // R' is a fresh vector, sibling branches never share storage.
            let mut next_clique = Vec::with_capacity(clique.len() + 1);
            next_clique.extend_from_slice(clique);
            next_clique.push(v.clone());
            let next_candidates = set_ops::intersect(&candidates, neighbors);
            let next_excluded = set_ops::intersect(&excluded, neighbors);

            self.expand(&next_clique, next_candidates, next_excluded);

            // Move v from P to X.
            let single = [v];
            excluded = set_ops::union(&excluded, &single);
            candidates = set_ops::difference(&candidates, &single);
        }
    }
}

/// Find all maximal cliques of a graph.
pub fn find_max_cliques<V: Ord + Clone>(graph: &Graph<V>) -> Vec<Clique<V>> {
    CliqueEnumerator::new(graph).run().0
}

#[cfg(test)]
pub(crate) mod test_clique {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::clique::{find_max_cliques, CliqueEnumerator};
    use crate::graph::Graph;
    use crate::types::UNCOLORED;

    /// Graph with maximal cliques {A,B,C}, {B,C,D} and {D,E}.
    pub(crate) fn example_graph() -> Graph<String> {
        let edges = [("A", "B"), ("A", "C"), ("B", "C"), ("B", "D"), ("C", "D"), ("D", "E")];
        Graph::from_edges(edges.iter().map(|(u, v)| (u.to_string(), v.to_string())))
    }

    // Exhaustive subset check, only for small graphs.
    fn brute_force_maximal_cliques(graph: &Graph<u32>) -> BTreeSet<Vec<u32>> {
        let vertices = graph.vertices().to_vec();
        let n = vertices.len();
        let mut cliques = Vec::new();
        for mask in 1u32..(1u32 << n) {
            let subset: Vec<u32> = (0..n)
                .filter(|idx| mask & (1u32 << *idx) != 0)
                .map(|idx| vertices[idx])
                .collect();
            if graph.is_clique(&subset) {
                cliques.push((mask, subset));
            }
        }
        cliques.iter()
            .filter(|(mask, _)| {
                !cliques.iter().any(|(other, _)| other != mask && other & mask == *mask)
            })
            .map(|(_, subset)| subset.clone())
            .collect()
    }

    fn is_maximal(graph: &Graph<u32>, clique: &[u32]) -> bool {
        graph.vertices().iter()
            .filter(|v| !clique.contains(*v))
            .all(|v| !clique.iter().all(|u| graph.has_edge(u, v)))
    }

    #[test]
    fn test_example_graph() {
        let graph = example_graph();
        let cliques = find_max_cliques(&graph);
        let found: Vec<Vec<&str>> = cliques.iter()
            .map(|c| c.vertices().iter().map(|v| v.as_str()).collect())
            .collect();
        assert_eq!(found, vec![vec!["A", "B", "C"], vec!["B", "C", "D"], vec!["D", "E"]]);
        assert!(cliques.iter().all(|c| c.color() == UNCOLORED));
    }

    #[test]
    fn test_empty_graph() {
        let graph: Graph<u32> = Graph::new();
        let (cliques, stats) = CliqueEnumerator::new(&graph).run();
        assert!(cliques.is_empty());
        assert_eq!(stats.calls, 0);
    }

    #[test]
    fn test_isolated_vertices() {
        let mut graph = Graph::from_edges(vec![(1u32, 2u32)]);
        graph.insert_vertex(0);
        graph.insert_vertex(5);
        let found: Vec<Vec<u32>> = find_max_cliques(&graph).into_iter()
            .map(|c| c.into_vertices())
            .collect();
        assert_eq!(found, vec![vec![0], vec![1, 2], vec![5]]);
    }

    #[test]
    fn test_complete_graph() {
        let mut edges = Vec::new();
        for u in 0u32..6 {
            for v in (u + 1)..6 {
                edges.push((u, v));
            }
        }
        let graph = Graph::from_edges(edges);
        let (cliques, stats) = CliqueEnumerator::new(&graph).run();
        assert_eq!(cliques.len(), 1);
        assert_eq!(cliques[0].vertices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(stats.max_depth, 6);
        assert_eq!(stats.cliques, 1);
    }

    #[test]
    fn test_branches_do_not_alias() {
        // A star plus a triangle: many sibling branches grow from the same prefix.
        let graph = Graph::from_edges(vec![
            (0u32, 1u32), (0, 2), (0, 3), (0, 4), (3, 4), (1, 5), (2, 5)
        ]);
        let found: BTreeSet<Vec<u32>> = find_max_cliques(&graph).into_iter()
            .map(|c| c.into_vertices())
            .collect();
        let expected: BTreeSet<Vec<u32>> = vec![
            vec![0, 1], vec![0, 2], vec![0, 3, 4], vec![1, 5], vec![2, 5]
        ].into_iter().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_against_brute_force() {
        let mut rng = StdRng::seed_from_u64(20161020);
        for round in 0..60 {
            let n = 1 + (round % 10) as u32;
            let p = [0.2, 0.5, 0.8][round % 3];
            let graph = Graph::random_gnp(n, p, &mut rng);
            let cliques = find_max_cliques(&graph);

            let mut seen = BTreeSet::new();
            for clique in &cliques {
                assert!(graph.is_clique(clique.vertices()), "not a clique: {:?}", clique);
                assert!(is_maximal(&graph, clique.vertices()), "not maximal: {:?}", clique);
                assert!(seen.insert(clique.vertices().to_vec()), "duplicate: {:?}", clique);
            }
            assert_eq!(seen, brute_force_maximal_cliques(&graph), "round {}", round);
        }
    }

    #[test]
    fn test_deterministic_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = Graph::random_gnp(14, 0.45, &mut rng);
        let first = find_max_cliques(&graph);
        let second = find_max_cliques(&graph);
        assert_eq!(first, second);
    }

    #[test]
    fn test_asymmetric_adjacency() {
        // A lists B but B does not list A; the search only follows the current vertex's list.
        let graph = Graph::from_adjacency(vec![("A", vec!["B", "C"]), ("B", vec!["C"]), ("C", vec![])]);
        let found: Vec<Vec<&str>> = find_max_cliques(&graph).into_iter()
            .map(|c| c.into_vertices())
            .collect();
        // X loses A when descending through C, whose list is empty, so subsets resurface.
        assert_eq!(found, vec![vec!["A", "B", "C"], vec!["A", "C"], vec!["B", "C"], vec!["C"]]);
    }
}
