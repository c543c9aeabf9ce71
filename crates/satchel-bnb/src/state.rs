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

//! Search state of the depth-first branch-and-bound.
//!
//! `SearchState` is a single buffer of levels, one per position in the
//! density order, that is sized once per solve and reused for every node.
//! Level `d` holds the quantity currently committed for the `d`-th object in
//! density order together with the volume and value of the prefix above it,
//! so the volume of a candidate is one multiply-add away.
//!
//! Invariants (debug-checked):
//! - `num_active_levels <= num_objects`
//! - A freshly pushed level holds the quantity `-1`, so the first increment
//!   yields `0`.

use satchel_core::num::SolverNumeric;

/// Whether a level of the search fixes the last object of the density order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The last object in density order; its candidates are complete solutions.
    Leaf,
    /// Any other level; candidates are bounded through the relaxation.
    Interior,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Leaf => write!(f, "Leaf"),
            NodeKind::Interior => write!(f, "Interior"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SearchLevel<T> {
    quantity: T,
    base_volume: T,
    base_value: T,
}

impl<T> SearchLevel<T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn empty() -> Self {
        Self {
            quantity: T::MINUS_ONE,
            base_volume: T::zero(),
            base_value: T::zero(),
        }
    }
}

/// The committed quantities of the current search path, addressed by depth.
#[derive(Clone, Debug)]
pub struct SearchState<T> {
    levels: Vec<SearchLevel<T>>,
    num_active_levels: usize,
}

impl<T> Default for SearchState<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchState<T>
where
    T: SolverNumeric,
{
    /// Creates an empty state for a model without objects.
    #[inline]
    pub fn new() -> Self {
        Self {
            levels: Vec::new(),
            num_active_levels: 0,
        }
    }

    /// Creates a state with one level per object.
    #[inline]
    pub fn preallocated(num_objects: usize) -> Self {
        Self {
            levels: vec![SearchLevel::empty(); num_objects],
            num_active_levels: 0,
        }
    }

    /// Resizes the buffer to `num_objects` levels and deactivates all of them.
    ///
    /// Keeps the allocation when shrinking or when the size is unchanged.
    #[inline]
    pub fn reset(&mut self, num_objects: usize) {
        self.levels.clear();
        self.levels.resize(num_objects, SearchLevel::empty());
        self.num_active_levels = 0;
    }

    /// Returns the number of levels, which is the number of objects.
    #[inline]
    pub fn num_objects(&self) -> usize {
        self.levels.len()
    }

    /// Returns the number of levels on the current path.
    #[inline]
    pub fn num_active_levels(&self) -> usize {
        self.num_active_levels
    }

    /// Returns `true` once the search has backtracked above the root.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.num_active_levels == 0
    }

    /// Returns the depth of the deepest active level.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if no level is active.
    #[inline]
    pub fn depth(&self) -> usize {
        debug_assert!(
            self.num_active_levels > 0,
            "called `SearchState::depth` on an exhausted search state"
        );

        self.num_active_levels - 1
    }

    /// Returns whether the deepest active level is a leaf.
    #[inline]
    pub fn node_kind(&self) -> NodeKind {
        if self.num_active_levels == self.levels.len() {
            NodeKind::Leaf
        } else {
            NodeKind::Interior
        }
    }

    /// Activates the next level with quantity `-1` below a prefix of the
    /// given volume and value.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if every level is already active.
    #[inline]
    pub fn push(&mut self, base_volume: T, base_value: T) {
        debug_assert!(
            self.num_active_levels < self.levels.len(),
            "called `SearchState::push` with all {} levels active",
            self.levels.len()
        );

        self.levels[self.num_active_levels] = SearchLevel {
            quantity: T::MINUS_ONE,
            base_volume,
            base_value,
        };
        self.num_active_levels += 1;
    }

    /// Deactivates the deepest level.
    #[inline]
    pub fn pop(&mut self) {
        debug_assert!(
            self.num_active_levels > 0,
            "called `SearchState::pop` on an exhausted search state"
        );

        self.num_active_levels -= 1;
    }

    /// Increments the quantity of the deepest level and returns it.
    #[inline]
    pub fn increment_quantity(&mut self) -> T {
        let depth = self.depth();
        let level = &mut self.levels[depth];
        level.quantity = level.quantity + T::one();
        level.quantity
    }

    /// Returns the quantity of the deepest level.
    #[inline]
    pub fn current_quantity(&self) -> T {
        self.levels[self.depth()].quantity
    }

    /// Returns the quantity committed at `depth`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `depth` is not active.
    #[inline]
    pub fn quantity_at(&self, depth: usize) -> T {
        debug_assert!(
            depth < self.num_active_levels,
            "called `SearchState::quantity_at` with depth out of bounds: the len is {} but the depth is {}",
            self.num_active_levels,
            depth
        );

        self.levels[depth].quantity
    }

    /// Returns the volume of the prefix above the deepest level.
    #[inline]
    pub fn base_volume(&self) -> T {
        self.levels[self.depth()].base_volume
    }

    /// Returns the value of the prefix above the deepest level.
    #[inline]
    pub fn base_value(&self) -> T {
        self.levels[self.depth()].base_value
    }

    /// Returns the volume of the path including `quantity` units of the
    /// deepest level's object of the given `volume`.
    #[inline]
    pub fn volume_with(&self, volume: T, quantity: T) -> T {
        self.base_volume()
            .saturating_add_val(volume.saturating_mul_val(quantity))
    }

    /// Returns the value of the path including `quantity` units of the
    /// deepest level's object of the given `value`.
    #[inline]
    pub fn value_with(&self, value: T, quantity: T) -> T {
        self.base_value()
            .saturating_add_val(value.saturating_mul_val(quantity))
    }

    /// Returns an iterator over the committed quantities, root first.
    #[inline]
    pub fn quantities(&self) -> impl Iterator<Item = T> + '_ {
        self.levels[..self.num_active_levels]
            .iter()
            .map(|level| level.quantity)
    }
}

impl<T> std::fmt::Display for SearchState<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(levels: {}/{}, quantities: [",
            self.num_active_levels,
            self.levels.len()
        )?;
        for (depth, quantity) in self.quantities().enumerate() {
            if depth > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", quantity)?;
        }
        write!(f, "])")
    }
}
