// Set algebra over sorted, duplicate-free vertex vectors.
// Every function here expects its operands in ascending order without
// duplicates, and returns a vector with the same property.
use std::cmp::Ordering;

use itertools::Itertools;

/// Sort a vertex list and drop repeated entries.
pub fn normalize<V: Ord>(mut vertices: Vec<V>) -> Vec<V> {
    vertices.sort();
    vertices.dedup();
    vertices
}

/// Check whether a slice is strictly ascending.
pub fn is_sorted_set<V: Ord>(vertices: &[V]) -> bool {
    vertices.windows(2).all(|pair| pair[0] < pair[1])
}

/// Vertices contained in both `a` and `b`.
pub fn intersect<V: Ord + Clone>(a: &[V], b: &[V]) -> Vec<V> {
    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                result.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    result
}

/// Size of `a ∩ b`, without materializing the intersection.
pub fn intersect_count<V: Ord>(a: &[V], b: &[V]) -> usize {
    let mut count = 0usize;
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Vertices contained in `a` or `b`.
pub fn union<V: Ord + Clone>(a: &[V], b: &[V]) -> Vec<V> {
    let mut result = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                result.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                result.push(b[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                result.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    result.extend_from_slice(&a[i..]);
    result.extend_from_slice(&b[j..]);
    result
}

/// Union of any number of sets, through a k-way merge.
pub fn union_all<V: Ord + Clone>(sets: &[&[V]]) -> Vec<V> {
    sets.iter()
        .map(|set| set.iter())
        .kmerge()
        .dedup()
        .cloned()
        .collect()
}

/// Vertices contained in `a` but not in `b`.
pub fn difference<V: Ord + Clone>(a: &[V], b: &[V]) -> Vec<V> {
    let mut result = Vec::with_capacity(a.len());
    let mut j = 0usize;
    for vertex in a {
        while j < b.len() && b[j] < *vertex {
            j += 1;
        }
        if j < b.len() && b[j] == *vertex {
            continue;
        }
        result.push(vertex.clone());
    }
    result
}
