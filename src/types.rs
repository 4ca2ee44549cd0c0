use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Community label attached to a clique.
pub type Color = u32;

/// The color of a clique not (yet) assigned to any community.
pub const UNCOLORED: Color = 0;

/// Communities keyed by their color, each holding a sorted vertex set.
pub type Communities<V> = BTreeMap<Color, Vec<V>>;

// A maximal clique with its community color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Clique<V> {
    vertices: Vec<V>, // Sorted member vertices.
    color: Color // Community color, 0 means unassigned.
}

impl<V> Clique<V> {
    /// Create an uncolored clique, the vertices are moved.
    pub fn new(vertices: Vec<V>) -> Self {
        Clique {
            vertices,
            color: UNCOLORED
        }
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_colored(&self) -> bool {
        self.color != UNCOLORED
    }

    // Only the merger relabels cliques.
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }
}

/// Display helper rendering a vertex list as `[a b c]`.
pub struct VertexList<'a, V>(pub &'a [V]);

impl<V: Display> Display for VertexList<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, vertex) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", vertex)?;
        }
        write!(f, "]")
    }
}

impl<V: Display> Display for Clique<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} (color: {})", VertexList(&self.vertices), self.color)
    }
}

#[cfg(test)]
mod test_types {
    use crate::types::{Clique, VertexList, UNCOLORED};

    #[test]
    fn test_new_clique_uncolored() {
        let clique = Clique::new(vec!["A", "B", "C"]);
        assert_eq!(clique.color(), UNCOLORED);
        assert!(!clique.is_colored());
        assert_eq!(clique.len(), 3);
        assert_eq!(clique.vertices(), &["A", "B", "C"]);
    }

    #[test]
    fn test_display() {
        let mut clique = Clique::new(vec![1u32, 2, 7]);
        assert_eq!(format!("{}", clique), "[1 2 7] (color: 0)");
        clique.set_color(3);
        assert!(clique.is_colored());
        assert_eq!(format!("{}", clique), "[1 2 7] (color: 3)");
        assert_eq!(format!("{}", VertexList::<u32>(&[])), "[]");
    }
}
