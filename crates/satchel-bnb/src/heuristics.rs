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

//! # Density Heuristics
//!
//! Everything the search derives from the model before the first branch:
//!
//! - `compute_densities`: value per unit of volume, one per object.
//! - `compute_density_order`: object indices by non-increasing density. Ties
//!   keep ascending object index, so the order is a pure function of the model.
//! - `compute_max_quantities`: `floor(capacity / volume)` per object, the
//!   widest quantity range a level of the search can take.
//! - `compute_greedy`: fill the knapsack in density order, taking as many
//!   copies of each object as still fit. The result is feasible and seeds the
//!   incumbent, but rounding can leave it strictly below the optimum.
//! - `compute_global_relaxation_value`: the relaxation objective with nothing
//!   fixed, an upper bound on every integer solution.
//!
//! When the greedy value reaches the global relaxation value the greedy
//! solution is optimal and no branching is needed.

use crate::relaxation::{DantzigRelaxation, LinearRelaxation};
use satchel_core::num::{cmp_ratios, SolverNumeric};
use satchel_model::{index::ObjectIndex, model::Model, solution::Solution};

/// Returns `values[i] / volumes[i]` for every object.
pub fn compute_densities<T>(model: &Model<T>) -> Vec<f64>
where
    T: SolverNumeric,
{
    (0..model.num_objects())
        .map(|i| model.object_density(ObjectIndex::new(i)))
        .collect()
}

/// Returns the object indices sorted by non-increasing density.
///
/// Objects with equal density appear in ascending index order. Densities are
/// compared as exact fractions, so the order does not depend on `f64` rounding.
///
/// # Examples
///
/// ```rust
/// # use satchel_bnb::heuristics::compute_density_order;
/// # use satchel_model::{index::ObjectIndex, model::Model};
///
/// let model = Model::new(14i64, vec![15, 12, 2, 8], vec![5, 3, 2, 4]).unwrap();
/// let order: Vec<usize> = compute_density_order(&model).iter().map(|i| i.get()).collect();
/// assert_eq!(order, vec![1, 0, 3, 2]);
/// ```
pub fn compute_density_order<T>(model: &Model<T>) -> Vec<ObjectIndex>
where
    T: SolverNumeric,
{
    let values = model.values();
    let volumes = model.volumes();
    let mut order: Vec<ObjectIndex> = (0..model.num_objects()).map(ObjectIndex::new).collect();
    // `sort_by` is stable.
    order.sort_by(|a, b| {
        let (a, b) = (a.get(), b.get());
        cmp_ratios(values[b], volumes[b], values[a], volumes[a])
    });
    order
}

/// Returns `floor(capacity / volumes[i])` for every object.
pub fn compute_max_quantities<T>(model: &Model<T>) -> Vec<T>
where
    T: SolverNumeric,
{
    let capacity = model.capacity();
    model.volumes().iter().map(|&w| capacity / w).collect()
}

/// The greedy fill of the knapsack in density order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GreedyResult<T> {
    bound: T,
    quantities: Vec<T>,
}

impl<T> GreedyResult<T>
where
    T: SolverNumeric,
{
    /// Returns the objective value of the greedy fill, a lower bound on the optimum.
    #[inline]
    pub fn bound(&self) -> T {
        self.bound
    }

    /// Returns the greedy quantities, indexed by original object index.
    #[inline]
    pub fn quantities(&self) -> &[T] {
        &self.quantities
    }

    /// Returns the greedy fill as a `Solution`.
    #[inline]
    pub fn to_solution(&self) -> Solution<T> {
        Solution::new(self.bound, self.quantities.clone())
    }
}

/// Fills the knapsack greedily along `density_order`.
///
/// # Panics
///
/// Panics if `density_order` refers to an object outside of `model`.
pub fn compute_greedy<T>(model: &Model<T>, density_order: &[ObjectIndex]) -> GreedyResult<T>
where
    T: SolverNumeric,
{
    let mut quantities = vec![T::zero(); model.num_objects()];
    let mut remaining = model.capacity();
    let mut bound = T::zero();

    for &object_index in density_order {
        let volume = model.object_volume(object_index);
        let quantity = remaining / volume;
        remaining = remaining - volume * quantity;
        bound = bound
            .saturating_add_val(model.object_value(object_index).saturating_mul_val(quantity));
        quantities[object_index.get()] = quantity;
    }

    debug_assert!(
        model.is_feasible(&quantities),
        "greedy fill exceeds the capacity: {:?}",
        quantities
    );

    GreedyResult { bound, quantities }
}

/// Returns the objective of `relaxation`, which must have no variable fixed.
#[inline]
pub fn compute_global_relaxation_value<T, R>(relaxation: &R) -> f64
where
    T: SolverNumeric,
    R: LinearRelaxation<T> + ?Sized,
{
    debug_assert_eq!(
        relaxation.num_fixed(),
        0,
        "called `compute_global_relaxation_value` with {} fixed variables",
        relaxation.num_fixed()
    );

    relaxation.objective()
}

/// All quantities derived from a model before the search starts.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundHeuristics<T> {
    densities: Vec<f64>,
    density_order: Vec<ObjectIndex>,
    max_quantities: Vec<T>,
    greedy: GreedyResult<T>,
    global_relaxation_value: f64,
    greedy_optimal: bool,
}

impl<T> BoundHeuristics<T>
where
    T: SolverNumeric,
{
    /// Computes every heuristic of `model`, solving the relaxation from scratch.
    pub fn new(model: &Model<T>) -> Self {
        let relaxation = DantzigRelaxation::new(model);
        Self::with_relaxation(model, &relaxation)
    }

    /// Computes every heuristic of `model`, reusing the density order and the
    /// root objective of an unfixed `relaxation`.
    pub fn with_relaxation(model: &Model<T>, relaxation: &DantzigRelaxation<T>) -> Self {
        let density_order = relaxation.density_order().to_vec();
        let greedy = compute_greedy(model, &density_order);

        Self {
            densities: compute_densities(model),
            max_quantities: compute_max_quantities(model),
            global_relaxation_value: compute_global_relaxation_value::<T, _>(relaxation),
            greedy_optimal: !relaxation.objective_exceeds(greedy.bound()),
            density_order,
            greedy,
        }
    }

    /// Returns the density of every object.
    #[inline]
    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    /// Returns the object indices by non-increasing density.
    #[inline]
    pub fn density_order(&self) -> &[ObjectIndex] {
        &self.density_order
    }

    /// Returns the per-object quantity caps.
    #[inline]
    pub fn max_quantities(&self) -> &[T] {
        &self.max_quantities
    }

    /// Returns the quantity cap of a single object.
    #[inline]
    pub fn max_quantity(&self, object_index: ObjectIndex) -> T {
        let index = object_index.get();
        debug_assert!(
            index < self.max_quantities.len(),
            "called `BoundHeuristics::max_quantity` with object index out of bounds: the len is {} but the index is {}",
            self.max_quantities.len(),
            index
        );

        self.max_quantities[index]
    }

    /// Returns the greedy fill.
    #[inline]
    pub fn greedy(&self) -> &GreedyResult<T> {
        &self.greedy
    }

    /// Returns the relaxation objective with no variable fixed.
    #[inline]
    pub fn global_relaxation_value(&self) -> f64 {
        self.global_relaxation_value
    }

    /// Returns `true` if the greedy fill already reaches the relaxation bound,
    /// which proves it optimal. Decided in exact arithmetic.
    #[inline]
    pub fn proves_greedy_optimal(&self) -> bool {
        self.greedy_optimal
    }
}

impl<T> std::fmt::Display for BoundHeuristics<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Bound Heuristics")?;
        writeln!(f, "   Greedy Bound:      {}", self.greedy.bound)?;
        writeln!(f, "   Relaxation Bound:  {:.4}", self.global_relaxation_value)?;
        writeln!(
            f,
            "   Greedy Optimal:    {}",
            if self.proves_greedy_optimal() { "yes" } else { "no" }
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "   {:<6} | {:<10} | {:<12} | {:<10} | {:<10}",
            "Rank", "Object", "Density", "Max Qty", "Greedy Qty"
        )?;
        writeln!(
            f,
            "   {:-<6}-+-{:-<10}-+-{:-<12}-+-{:-<10}-+-{:-<10}",
            "", "", "", "", ""
        )?;
        for (rank, object_index) in self.density_order.iter().enumerate() {
            let index = object_index.get();
            writeln!(
                f,
                "   {:<6} | {:<10} | {:<12.4} | {:<10} | {:<10}",
                rank,
                index,
                self.densities[index],
                self.max_quantities[index],
                self.greedy.quantities[index]
            )?;
        }
        Ok(())
    }
}
