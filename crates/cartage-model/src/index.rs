// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use cartage_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for origin (supply row) indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct OriginIndexTag;

impl TypedIndexTag for OriginIndexTag {
    const NAME: &'static str = "OriginIndex";
}

/// A typed index for origins.
pub type OriginIndex = TypedIndex<OriginIndexTag>;

/// A tag type for destination (demand column) indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DestinationIndexTag;

impl TypedIndexTag for DestinationIndexTag {
    const NAME: &'static str = "DestinationIndex";
}

/// A typed index for destinations.
pub type DestinationIndex = TypedIndex<DestinationIndexTag>;

/// One coordinate of the transportation tableau: an (origin, destination)
/// pair addressing a single cost/allocation cell.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Cell {
    /// The supply row of the cell.
    pub origin: OriginIndex,
    /// The demand column of the cell.
    pub destination: DestinationIndex,
}

impl Cell {
    /// Creates a new `Cell`.
    #[inline(always)]
    pub const fn new(origin: OriginIndex, destination: DestinationIndex) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Creates a `Cell` from raw zero-based coordinates.
    #[inline(always)]
    pub const fn at(origin: usize, destination: usize) -> Self {
        Self::new(OriginIndex::new(origin), DestinationIndex::new(destination))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.origin.get(), self.destination.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_construction_and_display() {
        let c = Cell::at(1, 2);
        assert_eq!(c.origin.get(), 1);
        assert_eq!(c.destination.get(), 2);
        assert_eq!(format!("{}", c), "(1, 2)");
    }

    #[test]
    fn test_cell_ordering_is_row_major() {
        let a = Cell::at(0, 5);
        let b = Cell::at(1, 0);
        assert!(a < b);
        assert!(Cell::at(1, 0) < Cell::at(1, 1));
    }

    #[test]
    fn test_index_display_names() {
        assert_eq!(format!("{}", OriginIndex::new(3)), "OriginIndex(3)");
        assert_eq!(
            format!("{}", DestinationIndex::new(4)),
            "DestinationIndex(4)"
        );
    }
}
