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

//! Periodic progress reporting
//!
//! `LogTreeSearchMonitor` emits a progress line through `log::info!` at most
//! once per `log_interval`. The clock is only consulted on steps where
//! `nodes_explored & clock_check_mask == 0`, which keeps the per-node cost to
//! a mask test.

use crate::{
    bnb::BranchEvaluation,
    heuristics::BoundHeuristics,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use log::info;
use satchel_core::num::SolverNumeric;
use satchel_model::{index::ObjectIndex, model::Model, solution::Solution};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_objective: Option<T>,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_objective: None,
        }
    }

    /// Returns the best objective reported to this monitor so far.
    #[inline]
    pub fn best_objective(&self) -> Option<T> {
        self.best_objective
    }

    #[inline(always)]
    fn log_header(&self) {
        info!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<10} | {:<14}",
            "Elapsed", "Nodes", "Depth", "Best Solution", "Backtracks", "Pruned (Bound)"
        );
    }

    #[inline(always)]
    fn log_line(&mut self, state: &SearchState<T>, stats: &BnbSolverStatistics<T>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_obj_str = match &self.best_objective {
            Some(objective) => format!("{}", objective),
            None => "-".to_string(),
        };
        let elapsed_field = format!("{:.1}s", elapsed);

        info!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<10} | {:<14}",
            elapsed_field,
            stats.nodes_explored,
            state.num_active_levels(),
            best_obj_str,
            stats.backtracks,
            stats.prunings_bound
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(
        &mut self,
        model: &Model<T>,
        heuristics: &BoundHeuristics<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_objective = Some(heuristics.greedy().bound());
        info!(
            "Solving {} (greedy: {}, relaxation: {:.4})",
            model,
            heuristics.greedy().bound(),
            heuristics.global_relaxation_value()
        );
        self.log_header();
    }

    fn on_exit_search(&mut self, stats: &BnbSolverStatistics<T>) {
        info!(
            "Search finished in {:.2?} after {} nodes",
            stats.time_total, stats.nodes_explored
        );
    }

    fn on_step(&mut self, state: &SearchState<T>, stats: &BnbSolverStatistics<T>) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, stats);
        }
    }

    fn on_evaluate(
        &mut self,
        _state: &SearchState<T>,
        _object_index: ObjectIndex,
        _evaluation: BranchEvaluation<T>,
        _stats: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _stats: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_descend(&mut self, _state: &SearchState<T>, _stats: &BnbSolverStatistics<T>) {}

    fn on_backtrack(&mut self, _state: &SearchState<T>, _stats: &BnbSolverStatistics<T>) {}

    fn on_solution_found(&mut self, solution: &Solution<T>, _stats: &BnbSolverStatistics<T>) {
        self.best_objective = Some(solution.objective_value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_name() {
        let monitor = LogTreeSearchMonitor::<i64>::default();
        assert_eq!(monitor.name(), "LogTreeSearchMonitor");
        assert_eq!(
            format!("{}", monitor),
            "LogTreeSearchMonitor(log_interval: 1s, clock_check_mask: 4095)"
        );
    }

    #[test]
    fn test_tracks_best_objective() {
        let mut monitor = LogTreeSearchMonitor::<i64>::new(Duration::ZERO, 0);
        let model = Model::new(14, vec![15, 12, 2, 8], vec![5, 3, 2, 4]).unwrap();
        let heuristics = BoundHeuristics::new(&model);
        let stats = BnbSolverStatistics::default();

        monitor.on_enter_search(&model, &heuristics, &stats);
        assert_eq!(monitor.best_objective(), Some(50));

        let mut state = SearchState::preallocated(4);
        state.push(0, 0);
        monitor.on_step(&state, &stats);

        monitor.on_solution_found(&Solution::new(51, vec![1, 3, 0, 0]), &stats);
        assert_eq!(monitor.best_objective(), Some(51));
    }
}
