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

use satchel_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use std::time::Duration;

/// Counters collected during a single branch-and-bound run.
#[derive(Debug, Clone, PartialEq)]
pub struct BnbSolverStatistics<T> {
    /// Total loop iterations, one per candidate quantity tried.
    pub nodes_explored: u64,
    /// Levels left after their quantity range was exhausted.
    pub backtracks: u64,
    /// The deepest level reached in the tree (root is `0`).
    pub max_depth: u64,
    /// Candidates rejected because the quantity cap or the capacity was exceeded.
    pub prunings_infeasible: u64,
    /// Candidates whose evaluation could not beat the incumbent.
    pub prunings_bound: u64,
    /// Calls into the relaxation, excluding the root solve.
    pub relaxations_solved: u64,
    /// Improvements of the incumbent found by the search.
    pub solutions_found: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
    /// The greedy value the search started from.
    pub initial_lower_bound: T,
    /// The relaxation objective at the root.
    pub root_upper_bound: f64,
}

impl<T> Default for BnbSolverStatistics<T>
where
    T: num_traits::Zero,
{
    fn default() -> Self {
        Self {
            nodes_explored: 0,
            backtracks: 0,
            max_depth: 0,
            prunings_infeasible: 0,
            prunings_bound: 0,
            relaxations_solved: 0,
            solutions_found: 0,
            time_total: Duration::ZERO,
            initial_lower_bound: T::zero(),
            root_upper_bound: 0.0,
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add_val(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add_val(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add_val(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add_val(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add_val(1);
    }

    #[inline]
    pub fn on_relaxation_solved(&mut self) {
        self.relaxations_solved = self.relaxations_solved.saturating_add_val(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_bounds(&mut self, initial_lower_bound: T, root_upper_bound: f64) {
        self.initial_lower_bound = initial_lower_bound;
        self.root_upper_bound = root_upper_bound;
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Satchel-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:            {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Relaxations solved:    {}", self.relaxations_solved)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Initial lower bound:   {}", self.initial_lower_bound)?;
        writeln!(f, "  Root upper bound:      {:.4}", self.root_upper_bound)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = BnbSolverStatistics::<i64>::default();
        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_backtrack();
        stats.on_pruning_bound();
        stats.on_pruning_infeasible();
        stats.on_relaxation_solved();
        stats.on_solution_found();
        stats.on_depth_update(3);
        stats.on_depth_update(1);
        stats.set_bounds(50, 56.0);

        assert_eq!(stats.nodes_explored, 2);
        assert_eq!(stats.backtracks, 1);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.prunings_infeasible, 1);
        assert_eq!(stats.relaxations_solved, 1);
        assert_eq!(stats.solutions_found, 1);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.initial_lower_bound, 50);
        assert_eq!(stats.root_upper_bound, 56.0);
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let mut stats = BnbSolverStatistics::<i64> {
            nodes_explored: u64::MAX,
            ..Default::default()
        };
        stats.on_node_explored();
        assert_eq!(stats.nodes_explored, u64::MAX);
    }

    #[test]
    fn test_display_contains_counters() {
        let mut stats = BnbSolverStatistics::<i64>::default();
        stats.set_bounds(50, 56.0);
        let text = format!("{}", stats);
        assert!(text.starts_with("Satchel-BnB Solver Statistics:\n"));
        assert!(text.contains("  Initial lower bound:   50\n"));
        assert!(text.contains("  Root upper bound:      56.0000\n"));
    }
}
