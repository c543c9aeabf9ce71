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

//! Continuous relaxation of the knapsack constraint
//!
//! The search prunes with the optimum of the linear program
//!
//! ```text
//! maximize   Σ v_i x_i
//! subject to Σ w_i x_i <= C,  x_i >= 0 (continuous)
//! ```
//!
//! where some prefix of the variables may be pinned to integer quantities.
//! With a single constraint the optimum is known in closed form: spend the
//! capacity left over by the pinned variables on the free variable with the
//! highest value per unit of volume. `DantzigRelaxation` maintains the pinned
//! contribution incrementally, so every `fix`/`unfix` costs one scan of the
//! density order and no allocation.
//!
//! Protocol
//! - `fix` and `unfix` form a stack: the variable passed to `unfix` must be the
//!   most recently fixed one that is still fixed. Fixing the top variable again
//!   replaces its quantity in place, which is how the search widens a level.
//! - `objective` and `variable_values` describe the last solve and are only
//!   valid until the next `fix`/`unfix`.
//! - Pinning more volume than the capacity yields an objective of negative
//!   infinity; the search checks the volume before fixing, so it never does.
//! - `objective` is an `f64` and loses precision once objective magnitudes
//!   pass 2^53. `objective_exceeds` and `integral_objective` answer the two
//!   questions the search prunes on in exact integer arithmetic instead.

use crate::heuristics::compute_density_order;
use fixedbitset::FixedBitSet;
use satchel_core::num::{to_f64, SolverNumeric};
use satchel_model::{index::ObjectIndex, model::Model};

/// The integrality tolerance used by the search when reading relaxation results.
pub const INTEGRALITY_TOLERANCE: f64 = 1e-10;

/// A bounding oracle over the continuous relaxation of a knapsack model.
///
/// Implementations are stateful and must be driven in LIFO order, mirroring
/// the depth-first search that owns them.
pub trait LinearRelaxation<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the relaxation.
    fn name(&self) -> &str;

    /// Pins `object_index` to exactly `quantity`, re-solves and returns the
    /// new optimal objective.
    fn fix(&mut self, object_index: ObjectIndex, quantity: T) -> f64;

    /// Releases the most recently fixed variable `object_index`, re-solves
    /// and returns the new optimal objective.
    fn unfix(&mut self, object_index: ObjectIndex) -> f64;

    /// Returns `true` if every variable of the last solve has a fractional
    /// part below `tolerance`.
    fn is_integral(&self, tolerance: f64) -> bool;

    /// Returns the optimal objective of the last solve.
    fn objective(&self) -> f64;

    /// Returns the optimal variable values of the last solve, indexed by
    /// original object index.
    fn variable_values(&self) -> &[f64];

    /// Returns `true` if the optimal objective of the last solve is strictly
    /// greater than `bound`.
    #[inline]
    fn objective_exceeds(&self, bound: T) -> bool {
        self.objective() > to_f64(bound)
    }

    /// Returns the optimal objective of the last solve if it is an integer
    /// that fits into `T`.
    #[inline]
    fn integral_objective(&self) -> Option<T> {
        let objective = self.objective();
        if objective.is_finite() && objective.fract() == 0.0 {
            T::from_f64(objective)
        } else {
            None
        }
    }

    /// Returns the number of currently fixed variables.
    fn num_fixed(&self) -> usize;

    /// Returns `true` if `object_index` is currently fixed.
    fn is_fixed(&self, object_index: ObjectIndex) -> bool;
}

impl<'a, T> std::fmt::Debug for dyn LinearRelaxation<T> + 'a
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LinearRelaxation({})", self.name())
    }
}

impl<'a, T> std::fmt::Display for dyn LinearRelaxation<T> + 'a
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LinearRelaxation({})", self.name())
    }
}

/// A variable pinned by `fix`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FixedVariable<T> {
    object_index: ObjectIndex,
    quantity: T,
}

/// Closed-form solver of the single-constraint linear relaxation.
///
/// The free variable that absorbs the residual capacity is the first unfixed
/// object in density order (ties resolved towards the lower object index), so
/// results are deterministic.
#[derive(Clone)]
pub struct DantzigRelaxation<T> {
    capacity: T,
    values: Vec<T>,
    volumes: Vec<T>,
    density_order: Vec<ObjectIndex>,
    fixed: FixedBitSet,
    fixed_stack: Vec<FixedVariable<T>>,
    fixed_value: T,
    fixed_volume: T,
    fill: Option<ObjectIndex>,
    objective: f64,
    variable_values: Vec<f64>,
}

impl<T> DantzigRelaxation<T>
where
    T: SolverNumeric,
{
    /// Creates the relaxation of `model` with no variable fixed and solves it.
    pub fn new(model: &Model<T>) -> Self {
        Self::with_density_order(model, compute_density_order(model))
    }

    /// Creates the relaxation of `model` using a precomputed density order.
    ///
    /// # Panics
    ///
    /// Panics if `density_order` is not a permutation of the object indices.
    pub fn with_density_order(model: &Model<T>, density_order: Vec<ObjectIndex>) -> Self {
        let num_objects = model.num_objects();
        assert_eq!(
            density_order.len(),
            num_objects,
            "called `DantzigRelaxation::with_density_order` with an order of length {} for {} objects",
            density_order.len(),
            num_objects
        );
        let mut seen = FixedBitSet::with_capacity(num_objects);
        for object_index in &density_order {
            assert!(
                object_index.get() < num_objects && !seen.put(object_index.get()),
                "called `DantzigRelaxation::with_density_order` with an order that is not a permutation: {:?}",
                density_order
            );
        }

        let mut relaxation = Self {
            capacity: model.capacity(),
            values: model.values().to_vec(),
            volumes: model.volumes().to_vec(),
            density_order,
            fixed: FixedBitSet::with_capacity(num_objects),
            fixed_stack: Vec::with_capacity(num_objects),
            fixed_value: T::zero(),
            fixed_volume: T::zero(),
            fill: None,
            objective: 0.0,
            variable_values: vec![0.0; num_objects],
        };
        relaxation.solve();
        relaxation
    }

    /// Returns the number of variables of the relaxation.
    #[inline]
    pub fn num_objects(&self) -> usize {
        self.values.len()
    }

    /// Returns the density order the relaxation fills the residual capacity in.
    #[inline]
    pub fn density_order(&self) -> &[ObjectIndex] {
        &self.density_order
    }

    /// Returns the summed value of all fixed variables.
    #[inline]
    pub fn fixed_value(&self) -> T {
        self.fixed_value
    }

    /// Returns the summed volume of all fixed variables.
    #[inline]
    pub fn fixed_volume(&self) -> T {
        self.fixed_volume
    }

    /// Releases every fixed variable and re-solves.
    pub fn reset(&mut self) {
        self.fixed.clear();
        self.fixed_stack.clear();
        self.fixed_value = T::zero();
        self.fixed_volume = T::zero();
        self.solve();
    }

    #[inline(always)]
    fn contribution(&self, object_index: ObjectIndex, quantity: T) -> (T, T) {
        let index = object_index.get();
        (
            self.values[index].saturating_mul_val(quantity),
            self.volumes[index].saturating_mul_val(quantity),
        )
    }

    /// Capacity left over by the fixed variables; negative if they overfill.
    #[inline(always)]
    fn residual(&self) -> T {
        self.capacity.saturating_sub_val(self.fixed_volume)
    }

    /// Decides `fixed_value + residual * value / volume > bound` as
    /// `residual * value > (bound - fixed_value) * volume` in `i128`.
    /// Returns `None` if a product overflows.
    fn exceeds_exactly(&self, bound: T) -> Option<bool> {
        let residual = self.residual().to_i128()?;
        if residual < 0 {
            return Some(false);
        }

        let slack = bound.to_i128()?.checked_sub(self.fixed_value.to_i128()?)?;
        match self.fill {
            Some(object_index) => {
                let index = object_index.get();
                let gain = residual.checked_mul(self.values[index].to_i128()?)?;
                let threshold = slack.checked_mul(self.volumes[index].to_i128()?)?;
                Some(gain > threshold)
            }
            None => Some(slack < 0),
        }
    }

    fn solve(&mut self) {
        self.variable_values.fill(0.0);
        for fixed in &self.fixed_stack {
            self.variable_values[fixed.object_index.get()] = to_f64(fixed.quantity);
        }

        let residual = self.residual();
        if residual < T::zero() {
            self.fill = None;
            self.objective = f64::NEG_INFINITY;
            return;
        }

        self.fill = self
            .density_order
            .iter()
            .copied()
            .find(|object_index| !self.fixed.contains(object_index.get()));

        self.objective = match self.fill {
            Some(object_index) => {
                let index = object_index.get();
                let volume = to_f64(self.volumes[index]);
                let residual = to_f64(residual);
                self.variable_values[index] = residual / volume;
                // One rounding step, so residuals that divide evenly stay exact.
                to_f64(self.fixed_value) + residual * to_f64(self.values[index]) / volume
            }
            None => to_f64(self.fixed_value),
        };
    }
}

impl<T> LinearRelaxation<T> for DantzigRelaxation<T>
where
    T: SolverNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "DantzigRelaxation"
    }

    fn fix(&mut self, object_index: ObjectIndex, quantity: T) -> f64 {
        let index = object_index.get();
        debug_assert!(
            index < self.num_objects(),
            "called `DantzigRelaxation::fix` with object index out of bounds: the len is {} but the index is {}",
            self.num_objects(),
            index
        );
        debug_assert!(
            quantity >= T::zero(),
            "called `DantzigRelaxation::fix` with a negative quantity {} for object {}",
            quantity,
            index
        );

        let (value, volume) = self.contribution(object_index, quantity);
        let refix = matches!(self.fixed_stack.last(), Some(top) if top.object_index == object_index);
        if refix {
            if let Some(top) = self.fixed_stack.last_mut() {
                let old_value = self.values[index].saturating_mul_val(top.quantity);
                let old_volume = self.volumes[index].saturating_mul_val(top.quantity);
                top.quantity = quantity;
                self.fixed_value = self
                    .fixed_value
                    .saturating_sub_val(old_value)
                    .saturating_add_val(value);
                self.fixed_volume = self
                    .fixed_volume
                    .saturating_sub_val(old_volume)
                    .saturating_add_val(volume);
            }
        } else {
            debug_assert!(
                !self.fixed.contains(index),
                "called `DantzigRelaxation::fix` on object {} which is fixed but not the most recently fixed variable",
                index
            );
            self.fixed.insert(index);
            self.fixed_stack.push(FixedVariable {
                object_index,
                quantity,
            });
            self.fixed_value = self.fixed_value.saturating_add_val(value);
            self.fixed_volume = self.fixed_volume.saturating_add_val(volume);
        }

        self.solve();
        self.objective
    }

    fn unfix(&mut self, object_index: ObjectIndex) -> f64 {
        debug_assert!(
            matches!(self.fixed_stack.last(), Some(top) if top.object_index == object_index),
            "called `DantzigRelaxation::unfix` with {} but the most recently fixed variable is {:?}",
            object_index,
            self.fixed_stack.last().map(|top| top.object_index)
        );

        if let Some(top) = self.fixed_stack.pop() {
            let (value, volume) = self.contribution(top.object_index, top.quantity);
            self.fixed.set(top.object_index.get(), false);
            self.fixed_value = self.fixed_value.saturating_sub_val(value);
            self.fixed_volume = self.fixed_volume.saturating_sub_val(volume);
        }

        self.solve();
        self.objective
    }

    fn is_integral(&self, tolerance: f64) -> bool {
        self.variable_values
            .iter()
            .all(|x| x - x.floor() < tolerance)
    }

    #[inline]
    fn objective(&self) -> f64 {
        self.objective
    }

    #[inline]
    fn variable_values(&self) -> &[f64] {
        &self.variable_values
    }

    fn objective_exceeds(&self, bound: T) -> bool {
        self.exceeds_exactly(bound)
            .unwrap_or_else(|| self.objective > to_f64(bound))
    }

    fn integral_objective(&self) -> Option<T> {
        let residual = self.residual();
        if residual < T::zero() {
            return None;
        }

        match self.fill {
            Some(object_index) => {
                let index = object_index.get();
                let volume = self.volumes[index];
                if residual % volume != T::zero() {
                    return None;
                }
                (residual / volume)
                    .checked_mul_val(self.values[index])?
                    .checked_add_val(self.fixed_value)
            }
            None => Some(self.fixed_value),
        }
    }

    #[inline]
    fn num_fixed(&self) -> usize {
        self.fixed_stack.len()
    }

    #[inline]
    fn is_fixed(&self, object_index: ObjectIndex) -> bool {
        self.fixed.contains(object_index.get())
    }
}

impl<T> std::fmt::Debug for DantzigRelaxation<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DantzigRelaxation")
            .field("capacity", &self.capacity)
            .field("fixed", &self.fixed_stack)
            .field("fixed_value", &self.fixed_value)
            .field("fixed_volume", &self.fixed_volume)
            .field("objective", &self.objective)
            .field("variable_values", &self.variable_values)
            .finish()
    }
}

impl<T> std::fmt::Display for DantzigRelaxation<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DantzigRelaxation(num_fixed: {}, objective: {:.4})",
            self.fixed_stack.len(),
            self.objective
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn oi(i: usize) -> ObjectIndex {
        ObjectIndex::new(i)
    }

    fn example() -> Model<i64> {
        Model::new(14, vec![15, 12, 2, 8], vec![5, 3, 2, 4]).unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {} to be close to {}", a, b);
    }

    #[test]
    fn test_root_relaxation_fills_with_best_density() {
        let relaxation = DantzigRelaxation::new(&example());
        assert_eq!(relaxation.density_order(), &[oi(1), oi(0), oi(3), oi(2)]);
        assert_close(relaxation.objective(), 56.0);
        assert_close(relaxation.variable_values()[1], 14.0 / 3.0);
        assert_eq!(relaxation.variable_values()[0], 0.0);
        assert!(!relaxation.is_integral(INTEGRALITY_TOLERANCE));
        assert_eq!(relaxation.num_fixed(), 0);
    }

    #[test]
    fn test_fix_moves_residual_to_next_free_object() {
        let mut relaxation = DantzigRelaxation::new(&example());

        let objective = relaxation.fix(oi(1), 4);
        assert_close(objective, 54.0);
        assert!(relaxation.is_fixed(oi(1)));
        assert_eq!(relaxation.fixed_value(), 48);
        assert_eq!(relaxation.fixed_volume(), 12);
        assert_close(relaxation.variable_values()[1], 4.0);
        assert_close(relaxation.variable_values()[0], 0.4);
        assert!(!relaxation.is_integral(INTEGRALITY_TOLERANCE));
    }

    #[test]
    fn test_integral_relaxation_is_exact() {
        let mut relaxation = DantzigRelaxation::new(&example());

        // 3 * 12 + 5 / 5 * 15 = 51 with x0 = 1.
        let objective = relaxation.fix(oi(1), 3);
        assert_eq!(objective, 51.0);
        assert!(relaxation.is_integral(INTEGRALITY_TOLERANCE));
        assert_eq!(relaxation.variable_values(), &[1.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_refix_top_replaces_quantity_in_place() {
        let mut relaxation = DantzigRelaxation::new(&example());
        relaxation.fix(oi(1), 0);
        relaxation.fix(oi(1), 2);
        assert_eq!(relaxation.num_fixed(), 1);
        assert_eq!(relaxation.fixed_value(), 24);
        assert_eq!(relaxation.fixed_volume(), 6);
        // 24 + 8 * 3
        assert_close(relaxation.objective(), 48.0);
    }

    #[test]
    fn test_unfix_restores_previous_solve() {
        let mut relaxation = DantzigRelaxation::new(&example());
        let root = relaxation.objective();
        let root_values = relaxation.variable_values().to_vec();

        let after_first = relaxation.fix(oi(1), 4);
        relaxation.fix(oi(0), 0);
        assert_eq!(relaxation.num_fixed(), 2);
        // Residual 2 goes to object 3 (density 2).
        assert_close(relaxation.objective(), 52.0);

        assert_close(relaxation.unfix(oi(0)), after_first);
        assert!(!relaxation.is_fixed(oi(0)));
        assert_close(relaxation.unfix(oi(1)), root);
        assert_eq!(relaxation.variable_values(), root_values.as_slice());
        assert_eq!(relaxation.num_fixed(), 0);
        assert_eq!(relaxation.fixed_value(), 0);
    }

    #[test]
    fn test_all_fixed_objective_is_fixed_value() {
        let model = Model::new(10i64, vec![6, 10], vec![2, 3]).unwrap();
        let mut relaxation = DantzigRelaxation::new(&model);
        relaxation.fix(oi(1), 2);
        relaxation.fix(oi(0), 1);
        assert_eq!(relaxation.objective(), 26.0);
        assert!(relaxation.is_integral(INTEGRALITY_TOLERANCE));
    }

    #[test]
    fn test_overfull_fixing_is_infeasible() {
        let model = Model::new(5i64, vec![7], vec![5]).unwrap();
        let mut relaxation = DantzigRelaxation::new(&model);
        assert_eq!(relaxation.fix(oi(0), 2), f64::NEG_INFINITY);
        assert_eq!(relaxation.unfix(oi(0)), 7.0);
    }

    #[test]
    fn test_exact_objective_queries() {
        let mut relaxation = DantzigRelaxation::new(&example());
        assert!(relaxation.objective_exceeds(55));
        assert!(!relaxation.objective_exceeds(56));
        assert_eq!(relaxation.integral_objective(), None);

        relaxation.fix(oi(1), 3);
        assert_eq!(relaxation.integral_objective(), Some(51));
        assert!(relaxation.objective_exceeds(50));
        assert!(!relaxation.objective_exceeds(51));

        relaxation.fix(oi(1), 5);
        assert!(!relaxation.objective_exceeds(0));
        assert_eq!(relaxation.integral_objective(), None);
    }

    #[test]
    fn test_exact_objective_queries_beyond_f64_precision() {
        // 2^53 + 1 has no f64 image; it rounds down to 2^53.
        let two_53 = 1i64 << 53;
        let model = Model::new(1i64, vec![two_53 + 1], vec![1]).unwrap();
        let relaxation = DantzigRelaxation::new(&model);
        assert_eq!(relaxation.objective(), to_f64(two_53));

        assert!(relaxation.objective_exceeds(two_53));
        assert!(!relaxation.objective_exceeds(two_53 + 1));
        assert_eq!(relaxation.integral_objective(), Some(two_53 + 1));
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut relaxation = DantzigRelaxation::new(&example());
        relaxation.fix(oi(1), 1);
        relaxation.fix(oi(0), 1);
        relaxation.reset();
        assert_eq!(relaxation.num_fixed(), 0);
        assert_close(relaxation.objective(), 56.0);
    }

    #[test]
    #[should_panic(expected = "called `DantzigRelaxation::with_density_order` with an order that is not a permutation")]
    fn test_rejects_non_permutation_order() {
        let model = Model::new(5i64, vec![1, 2], vec![1, 1]).unwrap();
        let _ = DantzigRelaxation::with_density_order(&model, vec![oi(0), oi(0)]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "called `DantzigRelaxation::unfix`")]
    fn test_unfix_out_of_order_panics_in_debug() {
        let mut relaxation = DantzigRelaxation::new(&example());
        relaxation.fix(oi(1), 1);
        relaxation.fix(oi(0), 1);
        relaxation.unfix(oi(1));
    }

    fn best_completion(model: &Model<i64>, prefix: &[(usize, i64)]) -> Option<i64> {
        fn go(
            model: &Model<i64>,
            free: &[usize],
            remaining: i64,
            acc: i64,
        ) -> i64 {
            match free.split_first() {
                None => acc,
                Some((&i, rest)) => {
                    let volume = model.volumes()[i];
                    let value = model.values()[i];
                    (0..=remaining / volume)
                        .map(|q| go(model, rest, remaining - q * volume, acc + q * value))
                        .max()
                        .unwrap_or(acc)
                }
            }
        }

        let used: i64 = prefix.iter().map(|&(i, q)| model.volumes()[i] * q).sum();
        if used > model.capacity() {
            return None;
        }
        let value: i64 = prefix.iter().map(|&(i, q)| model.values()[i] * q).sum();
        let free: Vec<usize> = (0..model.num_objects())
            .filter(|i| prefix.iter().all(|&(j, _)| j != *i))
            .collect();
        Some(go(model, &free, model.capacity() - used, value))
    }

    #[test]
    fn test_relaxation_bounds_every_integer_completion() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let n = rng.gen_range(1..=4);
            let values: Vec<i64> = (0..n).map(|_| rng.gen_range(1..=20)).collect();
            let volumes: Vec<i64> = (0..n).map(|_| rng.gen_range(1..=8)).collect();
            let capacity = rng.gen_range(0..=20);
            let model = Model::new(capacity, values, volumes).unwrap();

            let mut relaxation = DantzigRelaxation::new(&model);
            let order = relaxation.density_order().to_vec();
            let mut prefix = Vec::new();
            for &object_index in order.iter().take(n - 1) {
                let cap = capacity / model.volumes()[object_index.get()];
                let quantity = rng.gen_range(0..=cap);
                prefix.push((object_index.get(), quantity));
                let objective = relaxation.fix(object_index, quantity);
                match best_completion(&model, &prefix) {
                    Some(best) => assert!(
                        objective + 1e-9 >= best as f64,
                        "relaxation {} below integer optimum {} for {:?}",
                        objective,
                        best,
                        model
                    ),
                    None => break,
                }
            }
        }
    }
}
