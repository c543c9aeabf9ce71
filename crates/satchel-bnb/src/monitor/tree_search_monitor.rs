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

use crate::{
    bnb::BranchEvaluation, heuristics::BoundHeuristics, state::SearchState,
    stats::BnbSolverStatistics,
};
use satchel_core::num::SolverNumeric;
use satchel_model::{index::ObjectIndex, model::Model, solution::Solution};

/// Why a candidate quantity was not explored further.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PruneReason {
    /// The quantity exceeds the object's cap or the path no longer fits.
    /// The level is exhausted and the search backtracks.
    Infeasible,
    /// The evaluation does not beat the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

pub trait TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before the greedy-optimality check.
    fn on_enter_search(
        &mut self,
        model: &Model<T>,
        heuristics: &BoundHeuristics<T>,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>);
    /// Called at each iteration of the search loop, before widening.
    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when a feasible candidate has been evaluated, either exactly at
    /// a leaf or through the relaxation.
    fn on_evaluate(
        &mut self,
        state: &SearchState<T>,
        object_index: ObjectIndex,
        evaluation: BranchEvaluation<T>,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called when a candidate is pruned.
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called after descending into a new level.
    fn on_descend(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>);
    /// Called after backtracking to the parent level.
    fn on_backtrack(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when the incumbent improves.
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>);
}

impl<'a, T> std::fmt::Debug for dyn TreeSearchMonitor<T> + 'a
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<'a, T> std::fmt::Display for dyn TreeSearchMonitor<T> + 'a
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
