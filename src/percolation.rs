use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use clap::ValueEnum;
use log::debug;
use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};

use crate::clique::CliqueEnumerator;
use crate::graph::Graph;
use crate::set_ops;
use crate::types::{Clique, Color, Communities, UNCOLORED};

/// How overlapping cliques are grouped into communities.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Pairwise color relabeling where the larger color survives.
    /// Colors are not propagated to cliques already carrying the smaller one.
    #[default]
    LaterWins,
    /// Exact percolation components through a disjoint-set forest.
    DisjointSet
}

impl Display for MergePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::LaterWins => write!(f, "later-wins"),
            MergePolicy::DisjointSet => write!(f, "disjoint-set")
        }
    }
}

/// State of one clique percolation run.
///
/// The enumeration phase fills the clique list once, the merge phase only
/// relabels colors and grows communities. Merging again resets the colors
/// first, so one context can be merged under several `k`.
#[derive(Debug, Clone)]
pub struct Percolation<V> {
    cliques: Vec<Clique<V>>, // All maximal cliques, in discovery order.
    communities: BTreeMap<Color, Vec<V>>, // Color -> community vertex set.
    colors: Color // Last allocated color.
}

impl<V: Ord + Clone> Percolation<V> {
    pub fn new(cliques: Vec<Clique<V>>) -> Self {
        Percolation {
            cliques,
            communities: BTreeMap::new(),
            colors: UNCOLORED
        }
    }

    /// Run the enumeration phase over a graph.
    pub fn from_graph(graph: &Graph<V>) -> Self {
        let (cliques, _) = CliqueEnumerator::new(graph).run();
        Percolation::new(cliques)
    }

    pub fn cliques(&self) -> &[Clique<V>] {
        &self.cliques
    }

    pub fn into_cliques(self) -> Vec<Clique<V>> {
        self.cliques
    }

    /// Number of colors allocated by the last merge.
    pub fn color_count(&self) -> Color {
        self.colors
    }

    /// Color of the clique at `index`, `None` when it joined no community.
    pub fn community_of(&self, index: usize) -> Option<Color> {
        self.cliques.get(index)
            .map(|clique| clique.color())
            .filter(|color| *color != UNCOLORED)
    }

    /// Communities for colors `1..=color_count` still carried by some clique.
    pub fn communities(&self) -> Communities<V> {
        (1..=self.colors)
            .filter(|color| self.cliques.iter().any(|c| c.color() == *color))
            .filter_map(|color| {
                self.communities.get(&color).map(|vertices| (color, vertices.clone()))
            })
            .collect()
    }

    /// Merge with the default later-wins policy.
    pub fn merge(&mut self, k: usize) -> Communities<V> {
        self.merge_with(k, MergePolicy::LaterWins)
    }

    /// Group cliques sharing at least `k - 1` vertices.
    /// `k` below 2 makes every pair of cliques adjacent.
    pub fn merge_with(&mut self, k: usize, policy: MergePolicy) -> Communities<V> {
        self.reset();
        match policy {
            MergePolicy::LaterWins => self.merge_later_wins(k),
            MergePolicy::DisjointSet => self.merge_disjoint_set(k)
        }
        debug!(
            "Merged {} cliques with k = {} ({}), colors allocated: {}",
            self.cliques.len(), k, policy, self.colors
        );
        self.communities()
    }

    fn reset(&mut self) {
        for clique in self.cliques.iter_mut() {
            clique.set_color(UNCOLORED);
        }
        self.communities.clear();
        self.colors = UNCOLORED;
    }

    // Two cliques percolate when `shared + 1 >= k`.
    fn is_adjacent(&self, i: usize, j: usize, k: usize) -> bool {
        let shared = set_ops::intersect_count(
            self.cliques[i].vertices(), self.cliques[j].vertices()
        );
        shared + 1 >= k
    }

    fn merge_later_wins(&mut self, k: usize) {
        for i in 0..self.cliques.len() {
            for j in (i + 1)..self.cliques.len() {
                if !self.is_adjacent(i, j, k) {
                    continue;
                }
                let (color_i, color_j) = (self.cliques[i].color(), self.cliques[j].color());
                let (first, second) = (self.cliques[i].vertices(), self.cliques[j].vertices());
                let (target, merged) = if color_i == UNCOLORED && color_j == UNCOLORED {
                    // Both unassigned, open a new community.
                    self.colors += 1;
                    (self.colors, set_ops::union(first, second))
                } else {
                    let target = color_i.max(color_j);
                    let merged = match self.communities.get(&target) {
                        Some(existing) => set_ops::union_all(&[existing.as_slice(), first, second]),
                        None => set_ops::union(first, second)
                    };
                    (target, merged)
                };
                self.cliques[i].set_color(target);
                self.cliques[j].set_color(target);
                self.communities.insert(target, merged);
            }
        }
    }

    fn merge_disjoint_set(&mut self, k: usize) {
        let n = self.cliques.len();
        let mut forest = UnionFind::<usize>::new(n);
        let mut linked = vec![false; n];
        for i in 0..n {
            for j in (i + 1)..n {
                if self.is_adjacent(i, j, k) {
                    forest.union(i, j);
                    linked[i] = true;
                    linked[j] = true;
                }
            }
        }

        // Colors follow the first clique of each component.
        let labels = forest.into_labeling();
        let mut root_color = BTreeMap::<usize, Color>::new();
        for idx in 0..n {
            if !linked[idx] {
                continue;
            }
            let color = *root_color.entry(labels[idx]).or_insert_with(|| {
                self.colors += 1;
                self.colors
            });
            self.cliques[idx].set_color(color);
            let merged = match self.communities.get(&color) {
                Some(existing) => set_ops::union(existing, self.cliques[idx].vertices()),
                None => self.cliques[idx].vertices().to_vec()
            };
            self.communities.insert(color, merged);
        }
    }
}

/// Enumerate the maximal cliques of `graph` and merge them with the later-wins policy.
pub fn k_clique_communities<V: Ord + Clone>(graph: &Graph<V>, k: usize) -> Communities<V> {
    Percolation::from_graph(graph).merge(k)
}
