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

//! Node-by-node trace of the search
//!
//! `TraceTreeSearchMonitor` writes every event of the search to the `log`
//! facade: lifecycle and incumbent changes at `debug`, individual nodes at
//! `trace`. `BnbSolver` attaches it when `SolverOptions::verbose` is set, so
//! the output only appears when a logger is installed at a matching level.

use crate::{
    bnb::BranchEvaluation,
    heuristics::BoundHeuristics,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use log::{debug, trace};
use satchel_core::num::SolverNumeric;
use satchel_model::{index::ObjectIndex, model::Model, solution::Solution};

/// Logs every step, evaluation, prune, descend and backtrack.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TraceTreeSearchMonitor<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TraceTreeSearchMonitor<T> {
    /// Creates a new `TraceTreeSearchMonitor`.
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> TreeSearchMonitor<T> for TraceTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "TraceTreeSearchMonitor"
    }

    fn on_enter_search(
        &mut self,
        model: &Model<T>,
        heuristics: &BoundHeuristics<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) {
        debug!("Entering search on {}", model);
        debug!(
            "Density order: {:?}",
            heuristics
                .density_order()
                .iter()
                .map(|i| i.get())
                .collect::<Vec<_>>()
        );
        debug!(
            "Greedy bound: {}, relaxation bound: {:.4}",
            heuristics.greedy().bound(),
            heuristics.global_relaxation_value()
        );
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        debug!(
            "Search finished after {} nodes and {} backtracks",
            statistics.nodes_explored, statistics.backtracks
        );
    }

    fn on_step(&mut self, state: &SearchState<T>, _statistics: &BnbSolverStatistics<T>) {
        trace!("depth = {}", state.depth());
    }

    fn on_evaluate(
        &mut self,
        state: &SearchState<T>,
        object_index: ObjectIndex,
        evaluation: BranchEvaluation<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) {
        trace!(
            "x{} = {} ({}): {}",
            object_index.get(),
            state.current_quantity(),
            state.node_kind(),
            evaluation
        );
    }

    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        _statistics: &BnbSolverStatistics<T>,
    ) {
        trace!("prune at depth {}: {}", state.depth(), reason);
    }

    fn on_descend(&mut self, state: &SearchState<T>, _statistics: &BnbSolverStatistics<T>) {
        trace!("descend to {}", state);
    }

    fn on_backtrack(&mut self, state: &SearchState<T>, _statistics: &BnbSolverStatistics<T>) {
        if state.is_exhausted() {
            trace!("backtrack past the root");
        } else {
            trace!("backtrack to {}", state);
        }
    }

    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {
        debug!(
            "New incumbent with objective {} after {} nodes: {:?}",
            solution.objective_value(),
            statistics.nodes_explored,
            solution.quantities()
        );
    }
}
