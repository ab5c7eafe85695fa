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

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Phantom-typed wrappers around `usize` to prevent mixing indices from
//! different domains (e.g., origins vs. destinations). `TypedIndex<T>`
//! carries a tag type `T: TypedIndexTag` that encodes intent at the type
//! level while compiling down to a transparent `usize`.
//!
//! A transportation tableau juggles two index spaces at once, and both are
//! plain matrix coordinates underneath. Raw `usize` invites accidental
//! swaps between row and column positions; the tag makes such a swap a
//! compile error.
//!
//! ## Usage
//!
//! ```rust
//! use cartage_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct RouteTag;
//! impl TypedIndexTag for RouteTag { const NAME: &'static str = "RouteIndex"; }
//!
//! type RouteIndex = TypedIndex<RouteTag>;
//! let r = RouteIndex::new(3);
//! assert_eq!(r.get(), 3);
//! assert_eq!(format!("{}", r), "RouteIndex(3)");
//! ```

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    /// Human-readable name used by `Display` and `Debug`.
    const NAME: &'static str;
}

/// A strongly typed index associated with a specific tag type `T`.
///
/// Wraps a `usize` and uses a phantom type parameter to keep index spaces
/// apart at compile time with zero runtime overhead.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` with the given `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(index: TypedIndex<T>) -> Self {
        index.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct TestTag;

    impl TypedIndexTag for TestTag {
        const NAME: &'static str = "TestIndex";
    }

    type TestIndex = TypedIndex<TestTag>;

    #[test]
    fn test_new_and_get() {
        let i = TestIndex::new(7);
        assert_eq!(i.get(), 7);
    }

    #[test]
    fn test_display_uses_tag_name() {
        let i = TestIndex::new(2);
        assert_eq!(format!("{}", i), "TestIndex(2)");
        assert_eq!(format!("{:?}", i), "TestIndex(2)");
    }

    #[test]
    fn test_conversions_and_ordering() {
        let a: TestIndex = 1.into();
        let b = TestIndex::new(4);
        assert!(a < b);
        assert_eq!(usize::from(b), 4);
    }
}
