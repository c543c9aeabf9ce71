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

//! Satchel-BnB: exact branch-and-bound for the unbounded knapsack
//!
//! Solves `max Σ v_i x_i` subject to `Σ w_i x_i <= C` over non-negative
//! integer quantities `x_i`, for any `satchel_model::model::Model<T>`.
//!
//! Core flow
//! - Build or load a `Model<T>` (see `satchel_model`).
//! - Call `solve` for the optimal `Solution`, or run `bnb::BnbSolver`
//!   directly for statistics, options and monitors.
//! - Call `describe` for a dump of the derived heuristics.
//!
//! Design highlights
//! - The relaxation is the closed-form optimum of the single-constraint LP,
//!   driven incrementally in LIFO order alongside the depth-first search.
//! - The search state is one buffer of levels reused for every node.
//! - Deterministic: density ties resolve by object index, so repeated solves
//!   of one model return the same solution.
//!
//! Module map
//! - `bnb`: the solver engine and search session.
//! - `heuristics`: densities, density order, quantity caps, greedy bound.
//! - `relaxation`: the `LinearRelaxation` seam and `DantzigRelaxation`.
//! - `state`: the reusable level buffer and `NodeKind`.
//! - `monitor`: tree-search monitors (trace, log, composite, no-op).
//! - `options`: `SolverOptions`.
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters/timing.

pub mod bnb;
pub mod heuristics;
pub mod monitor;
pub mod options;
pub mod relaxation;
pub mod result;
pub mod state;
pub mod stats;

use crate::{bnb::BnbSolver, heuristics::BoundHeuristics};
use satchel_core::num::SolverNumeric;
use satchel_model::{model::Model, solution::Solution};

/// Solves `model` to optimality with default options.
///
/// # Examples
///
/// ```rust
/// # use satchel_model::model::Model;
///
/// let model = Model::new(14i64, vec![15, 12, 2, 8], vec![5, 3, 2, 4]).unwrap();
/// let solution = satchel_bnb::solve(&model);
/// assert_eq!(solution.objective_value(), 51);
/// assert_eq!(solution.quantities(), &[1, 3, 0, 0]);
/// ```
pub fn solve<T>(model: &Model<T>) -> Solution<T>
where
    T: SolverNumeric,
{
    BnbSolver::new().solve(model).into_solution()
}

/// Returns a human-readable dump of `model` and the heuristics derived from it.
pub fn describe<T>(model: &Model<T>) -> String
where
    T: SolverNumeric,
{
    let heuristics = BoundHeuristics::new(model);
    let mut text = String::new();
    text.push_str(&format!("{}\n", model));
    text.push_str(&format!("   Values:  {:?}\n", model.values()));
    text.push_str(&format!("   Volumes: {:?}\n\n", model.volumes()));
    text.push_str(&heuristics.to_string());
    text
}
