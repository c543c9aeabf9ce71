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

use crate::{index::ObjectIndex, model::Model};
use satchel_core::num::SolverNumeric;

/// A solution of the unbounded knapsack problem.
///
/// `quantities[i]` is the number of copies of object `i` taken, indexed by the
/// original object index (never by density rank).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Solution<T> {
    /// The total value `Σ values[i] * quantities[i]`.
    objective_value: T,

    /// How many copies of each object are packed.
    quantities: Vec<T>,
}

impl<T> Solution<T>
where
    T: SolverNumeric,
{
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// Panics if any quantity is negative.
    pub fn new(objective_value: T, quantities: Vec<T>) -> Self {
        assert!(
            quantities.iter().all(|q| *q >= T::zero()),
            "called `Solution::new` with a negative quantity: {:?}",
            quantities
        );

        Self {
            objective_value,
            quantities,
        }
    }

    /// Overwrites this solution in place with `objective_value` and a copy of
    /// `quantities`.
    ///
    /// # Panics
    ///
    /// Panics if the number of quantities differs from `num_objects()`.
    /// In debug builds, also panics if any quantity is negative.
    #[inline]
    pub fn update(&mut self, objective_value: T, quantities: &[T]) {
        assert_eq!(
            quantities.len(),
            self.quantities.len(),
            "called `Solution::update` with a different number of objects: the len is {} but the update has {}",
            self.quantities.len(),
            quantities.len()
        );
        debug_assert!(
            quantities.iter().all(|q| *q >= T::zero()),
            "called `Solution::update` with a negative quantity: {:?}",
            quantities
        );

        self.objective_value = objective_value;
        self.quantities.copy_from_slice(quantities);
    }

    /// Returns the quantity packed of a specific object.
    ///
    /// # Panics
    ///
    /// Panics if `object_index` is out of bounds.
    #[inline]
    pub fn quantity_of(&self, object_index: ObjectIndex) -> T {
        let index = object_index.get();
        debug_assert!(
            index < self.num_objects(),
            "called `Solution::quantity_of` with object index out of bounds: the len is {} but the index is {}",
            self.num_objects(),
            index
        );

        self.quantities[index]
    }

    /// Returns the number of objects covered by this solution.
    #[inline]
    pub fn num_objects(&self) -> usize {
        self.quantities.len()
    }

    /// Returns the total objective value of this solution.
    #[inline]
    pub fn objective_value(&self) -> T {
        self.objective_value
    }

    /// Returns a slice of the packed quantities of all objects.
    #[inline]
    pub fn quantities(&self) -> &[T] {
        &self.quantities
    }

    /// Returns the volume this solution occupies in `model`,
    /// or `None` on overflow.
    #[inline]
    pub fn total_volume(&self, model: &Model<T>) -> Option<T> {
        model.volume_of(&self.quantities)
    }

    /// Consumes the solution and returns its quantity vector.
    #[inline]
    pub fn into_quantities(self) -> Vec<T> {
        self.quantities
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Objective Value: {}", self.objective_value)?;
        writeln!(f)?;

        if self.num_objects() == 0 {
            writeln!(f, "   (No objects)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10}", "Object", "Quantity")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (i, quantity) in self.quantities.iter().enumerate() {
            writeln!(f, "   {:<10} | {:<10}", i, quantity)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oi(i: usize) -> ObjectIndex {
        ObjectIndex::new(i)
    }

    #[test]
    fn test_new_and_basic_accessors() {
        let sol = Solution::new(51i64, vec![1, 3, 0, 0]);

        assert_eq!(sol.objective_value(), 51);
        assert_eq!(sol.num_objects(), 4);
        assert_eq!(sol.quantities(), &[1, 3, 0, 0]);
        assert_eq!(sol.quantity_of(oi(0)), 1);
        assert_eq!(sol.quantity_of(oi(1)), 3);
        assert_eq!(sol.quantity_of(oi(3)), 0);
    }

    #[test]
    fn test_update_overwrites_in_place() {
        let mut sol = Solution::new(50i64, vec![2, 1, 0, 0]);
        let buffer = sol.quantities().as_ptr();

        sol.update(51, &[1, 3, 0, 0]);
        assert_eq!(sol.objective_value(), 51);
        assert_eq!(sol.quantities(), &[1, 3, 0, 0]);
        assert_eq!(sol.quantities().as_ptr(), buffer);
    }

    #[test]
    #[should_panic(expected = "called `Solution::update` with a different number of objects")]
    fn test_update_panics_on_length_mismatch() {
        let mut sol = Solution::new(0i64, vec![0, 0]);
        sol.update(1, &[1]);
    }

    #[test]
    #[should_panic(expected = "called `Solution::new` with a negative quantity")]
    fn test_new_panics_on_negative_quantity() {
        let _ = Solution::new(0i64, vec![1, -1]);
    }

    #[test]
    fn test_total_volume() {
        let model = Model::new(14i64, vec![15, 12, 2, 8], vec![5, 3, 2, 4]).unwrap();
        let sol = Solution::new(51i64, vec![1, 3, 0, 0]);
        assert_eq!(sol.total_volume(&model), Some(14));
    }

    #[test]
    fn test_clone_eq_and_debug() {
        let sol = Solution::new(30i64, vec![3]);
        let sol2 = sol.clone();
        assert_eq!(sol, sol2);

        let dbg = format!("{:?}", sol);
        assert!(dbg.contains("Solution"));
        assert!(dbg.contains("objective_value"));
        assert!(dbg.contains("quantities"));
        assert_eq!(sol2.into_quantities(), vec![3]);
    }

    #[test]
    fn test_display_formatting_example() {
        let sol = Solution::new(36i64, vec![6, 0]);

        let displayed = format!("{}", sol);

        let mut expected = String::new();
        expected.push_str("Solution Summary\n");
        expected.push_str("   Objective Value: 36\n");
        expected.push('\n');
        expected.push_str("   Object     | Quantity  \n");
        expected.push_str("   -----------+-----------\n");
        expected.push_str("   0          | 6         \n");
        expected.push_str("   1          | 0         \n");

        assert_eq!(displayed, expected);
    }
}
