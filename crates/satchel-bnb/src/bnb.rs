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

//! Branch-and-bound solver for the unbounded knapsack problem.
//!
//! The search walks the objects in density order. Level `d` of the tree
//! commits a quantity for the `d`-th object, widening it one unit at a time
//! from `0` up to the object's cap. Every feasible candidate is evaluated:
//!
//! - at the last level (a leaf) exactly, as the value of the complete path;
//! - elsewhere by fixing the candidate in the relaxation. An integral
//!   relaxation optimum is a feasible integer solution and is evaluated
//!   exactly as well; a fractional one only bounds its subtree.
//!
//! An exact evaluation above the incumbent replaces it, a fractional one
//! above the incumbent descends one level, anything else is pruned. A level
//! whose quantity exceeds its cap or no longer fits backtracks, releasing the
//! relaxation variable it fixed.
//!
//! The search starts from the greedy fill. When the greedy value already
//! reaches the root relaxation it is returned without branching.
//!
//! `BnbSolver` keeps the level buffer between solves; the relaxation is built
//! per solve and driven in strict LIFO order alongside the level buffer, so a
//! solve allocates `O(num_objects)` up front and nothing per node.

use crate::{
    heuristics::BoundHeuristics,
    monitor::{
        composite::CompositeTreeSearchMonitor,
        no_op::NoOperationMonitor,
        trace::TraceTreeSearchMonitor,
        tree_search_monitor::{PruneReason, TreeSearchMonitor},
    },
    options::SolverOptions,
    relaxation::{DantzigRelaxation, LinearRelaxation, INTEGRALITY_TOLERANCE},
    result::{BnbSolverOutcome, TerminationReason},
    state::{NodeKind, SearchState},
    stats::BnbSolverStatistics,
};
use satchel_core::num::{to_f64, SolverNumeric};
use satchel_model::{index::ObjectIndex, model::Model, solution::Solution};

/// The evaluation of one candidate quantity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BranchEvaluation<T> {
    /// The exact objective of a feasible integer solution: a complete path at
    /// a leaf, or an integral relaxation optimum at an interior level.
    Integral(T),
    /// A fractional relaxation optimum, an upper bound on the subtree.
    Fractional(f64),
}

impl<T> BranchEvaluation<T>
where
    T: SolverNumeric,
{
    /// Classifies a relaxation objective.
    ///
    /// An integral objective that does not fit into `T` is kept fractional,
    /// which only costs a descent.
    #[inline]
    pub fn from_relaxation(objective: f64, is_integral: bool) -> Self {
        if is_integral {
            if let Some(value) = T::from_f64(objective.round()) {
                return BranchEvaluation::Integral(value);
            }
        }
        BranchEvaluation::Fractional(objective)
    }

    /// Returns `true` if the evaluation is exact.
    #[inline]
    pub fn is_integral(&self) -> bool {
        matches!(self, BranchEvaluation::Integral(_))
    }

    /// Returns `true` if the evaluation can improve on an incumbent of value `bound`.
    ///
    /// Fractional objectives are compared as `f64`, which is exact while
    /// objective magnitudes stay below 2^53.
    #[inline]
    pub fn beats(&self, bound: T) -> bool {
        match *self {
            BranchEvaluation::Integral(value) => value > bound,
            BranchEvaluation::Fractional(objective) => objective > to_f64(bound),
        }
    }
}

impl<T> std::fmt::Display for BranchEvaluation<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchEvaluation::Integral(value) => write!(f, "Integral({})", value),
            BranchEvaluation::Fractional(objective) => write!(f, "Fractional({:.4})", objective),
        }
    }
}

/// An exact depth-first branch-and-bound solver for the unbounded knapsack.
#[derive(Clone, Debug)]
pub struct BnbSolver<T>
where
    T: SolverNumeric,
{
    state: SearchState<T>,
    options: SolverOptions,
}

impl<T> Default for BnbSolver<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: SolverNumeric,
{
    /// Creates a solver with default options.
    #[inline]
    pub fn new() -> Self {
        Self::with_options(SolverOptions::default())
    }

    /// Creates a solver with the given options.
    #[inline]
    pub fn with_options(options: SolverOptions) -> Self {
        Self {
            state: SearchState::new(),
            options,
        }
    }

    /// Creates a solver whose level buffer is already sized for `num_objects`.
    ///
    /// The buffer is resized on every solve anyway; this only moves the
    /// allocation to construction time.
    #[inline]
    pub fn preallocated(num_objects: usize) -> Self {
        Self {
            state: SearchState::preallocated(num_objects),
            options: SolverOptions::default(),
        }
    }

    /// Returns the options of this solver.
    #[inline]
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Switches the node-by-node trace on or off.
    #[inline]
    pub fn set_verbose(&mut self, verbose: bool) {
        self.options.verbose = verbose;
    }

    /// Solves `model` to optimality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use satchel_bnb::bnb::BnbSolver;
    /// # use satchel_model::model::Model;
    ///
    /// let model = Model::new(14i64, vec![15, 12, 2, 8], vec![5, 3, 2, 4]).unwrap();
    /// let outcome = BnbSolver::new().solve(&model);
    /// assert_eq!(outcome.solution().objective_value(), 51);
    /// assert_eq!(outcome.solution().quantities(), &[1, 3, 0, 0]);
    /// ```
    #[inline]
    pub fn solve(&mut self, model: &Model<T>) -> BnbSolverOutcome<T> {
        self.solve_with_monitor(model, NoOperationMonitor::new())
    }

    /// Solves `model` to optimality, reporting to `monitor`.
    ///
    /// In verbose mode a `TraceTreeSearchMonitor` receives every event after
    /// `monitor`.
    pub fn solve_with_monitor<S>(&mut self, model: &Model<T>, monitor: S) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T>,
    {
        if self.options.verbose {
            let mut composite = CompositeTreeSearchMonitor::with_capacity(2);
            composite.add_monitor(monitor);
            composite.add_monitor(TraceTreeSearchMonitor::new());
            self.solve_internal(model, composite)
        } else {
            self.solve_internal(model, monitor)
        }
    }

    fn solve_internal<S>(&mut self, model: &Model<T>, mut monitor: S) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T>,
    {
        let start_time = std::time::Instant::now();
        let relaxation = DantzigRelaxation::new(model);
        let heuristics = BoundHeuristics::with_relaxation(model, &relaxation);
        self.state.reset(model.num_objects());

        let session = BnbSolverSearchSession::new(
            &mut self.state,
            model,
            &heuristics,
            relaxation,
            &mut monitor,
            start_time,
        );
        session.run()
    }
}

/// A search session for the branch-and-bound solver.
/// This struct encapsulates the state and logic
/// of a single search run.
struct BnbSolverSearchSession<'a, T, R, S>
where
    T: SolverNumeric,
{
    state: &'a mut SearchState<T>,
    model: &'a Model<T>,
    heuristics: &'a BoundHeuristics<T>,
    relaxation: R,
    monitor: &'a mut S,
    incumbent: Solution<T>,
    candidate: Vec<T>,
    stats: BnbSolverStatistics<T>,
    start_time: std::time::Instant,
}

impl<'a, T, R, S> std::fmt::Debug for BnbSolverSearchSession<'a, T, R, S>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("model", &self.model)
            .field("state", &self.state)
            .field("incumbent", &self.incumbent)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, R, S> BnbSolverSearchSession<'a, T, R, S>
where
    T: SolverNumeric,
    R: LinearRelaxation<T>,
    S: TreeSearchMonitor<T>,
{
    #[inline]
    fn new(
        state: &'a mut SearchState<T>,
        model: &'a Model<T>,
        heuristics: &'a BoundHeuristics<T>,
        relaxation: R,
        monitor: &'a mut S,
        start_time: std::time::Instant,
    ) -> Self {
        debug_assert_eq!(
            relaxation.num_fixed(),
            0,
            "called `BnbSolverSearchSession::new` with a relaxation that has fixed variables"
        );

        let mut stats = BnbSolverStatistics::default();
        stats.set_bounds(
            heuristics.greedy().bound(),
            heuristics.global_relaxation_value(),
        );

        Self {
            state,
            model,
            heuristics,
            relaxation,
            monitor,
            incumbent: heuristics.greedy().to_solution(),
            candidate: vec![T::zero(); model.num_objects()],
            stats,
            start_time,
        }
    }

    fn run(mut self) -> BnbSolverOutcome<T> {
        self.monitor
            .on_enter_search(self.model, self.heuristics, &self.stats);

        if self.heuristics.proves_greedy_optimal() {
            return self.finish(TerminationReason::GreedyOptimal);
        }

        self.state.push(T::zero(), T::zero());
        while !self.state.is_exhausted() {
            self.stats.on_node_explored();
            self.monitor.on_step(self.state, &self.stats);
            self.step();
        }

        debug_assert_eq!(
            self.relaxation.num_fixed(),
            0,
            "search finished with variables still fixed in the relaxation"
        );

        self.finish(TerminationReason::SearchExhausted)
    }

    /// Widens the deepest level by one unit and handles the candidate.
    #[inline]
    fn step(&mut self) {
        let depth = self.state.depth();
        let object_index = self.heuristics.density_order()[depth];
        let quantity = self.state.increment_quantity();

        if !self.fits(object_index, quantity) {
            self.backtrack(object_index);
            return;
        }

        let evaluation = self.evaluate(object_index, quantity);
        self.monitor
            .on_evaluate(self.state, object_index, evaluation, &self.stats);

        if !self.improves(evaluation) {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(self.state, PruneReason::BoundDominated, &self.stats);
            return;
        }

        match evaluation {
            BranchEvaluation::Integral(value) => self.accept(value),
            BranchEvaluation::Fractional(_) => self.descend(object_index, quantity),
        }
    }

    /// Returns `true` if `quantity` units of `object_index` stay within the
    /// object's cap and the capacity on top of the current prefix.
    #[inline(always)]
    fn fits(&self, object_index: ObjectIndex, quantity: T) -> bool {
        quantity <= self.heuristics.max_quantity(object_index)
            && self
                .state
                .volume_with(self.model.object_volume(object_index), quantity)
                <= self.model.capacity()
    }

    /// Returns `true` if `evaluation` beats the incumbent. Fractional bounds
    /// are compared by the relaxation in exact arithmetic.
    #[inline(always)]
    fn improves(&self, evaluation: BranchEvaluation<T>) -> bool {
        let best = self.incumbent.objective_value();
        match evaluation {
            BranchEvaluation::Integral(value) => value > best,
            BranchEvaluation::Fractional(_) => self.relaxation.objective_exceeds(best),
        }
    }

    #[inline(always)]
    fn evaluate(&mut self, object_index: ObjectIndex, quantity: T) -> BranchEvaluation<T> {
        match self.state.node_kind() {
            NodeKind::Leaf => BranchEvaluation::Integral(
                self.state
                    .value_with(self.model.object_value(object_index), quantity),
            ),
            NodeKind::Interior => {
                let objective = self.relaxation.fix(object_index, quantity);
                self.stats.on_relaxation_solved();
                if self.relaxation.is_integral(INTEGRALITY_TOLERANCE) {
                    if let Some(value) = self.relaxation.integral_objective() {
                        return BranchEvaluation::Integral(value);
                    }
                }
                BranchEvaluation::Fractional(objective)
            }
        }
    }

    /// Overwrites the incumbent with the solution behind an exact evaluation.
    /// The level keeps widening afterwards.
    fn accept(&mut self, value: T) {
        match self.state.node_kind() {
            NodeKind::Leaf => {
                let order = self.heuristics.density_order();
                for (depth, quantity) in self.state.quantities().enumerate() {
                    self.candidate[order[depth].get()] = quantity;
                }
            }
            NodeKind::Interior => {
                for (quantity, x) in self
                    .candidate
                    .iter_mut()
                    .zip(self.relaxation.variable_values())
                {
                    // Integral relaxation values are bounded by the object caps.
                    *quantity = T::from_f64(x.round()).expect(
                        "called `BnbSolverSearchSession::accept` with a relaxation value outside the objective type",
                    );
                }
            }
        }

        debug_assert!(
            self.model.is_feasible(&self.candidate),
            "accepted an infeasible solution: {:?}",
            self.candidate
        );
        debug_assert_eq!(
            self.model.objective_of(&self.candidate),
            Some(value),
            "accepted solution {:?} does not have the evaluated objective {}",
            self.candidate,
            value
        );

        self.incumbent.update(value, &self.candidate);
        self.stats.on_solution_found();
        self.monitor
            .on_solution_found(&self.incumbent, &self.stats);
    }

    fn descend(&mut self, object_index: ObjectIndex, quantity: T) {
        let base_volume = self
            .state
            .volume_with(self.model.object_volume(object_index), quantity);
        let base_value = self
            .state
            .value_with(self.model.object_value(object_index), quantity);
        self.state.push(base_volume, base_value);
        self.stats.on_depth_update(self.state.depth() as u64);
        self.monitor.on_descend(self.state, &self.stats);
    }

    /// Leaves the exhausted deepest level.
    fn backtrack(&mut self, object_index: ObjectIndex) {
        self.stats.on_pruning_infeasible();
        self.monitor
            .on_prune(self.state, PruneReason::Infeasible, &self.stats);

        // Leaves never fix; interior levels always did before running out.
        if self.relaxation.is_fixed(object_index) {
            self.relaxation.unfix(object_index);
            self.stats.on_relaxation_solved();
        }

        self.state.pop();
        self.stats.on_backtrack();
        self.monitor.on_backtrack(self.state, &self.stats);
    }

    fn finish(mut self, reason: TerminationReason) -> BnbSolverOutcome<T> {
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        match reason {
            TerminationReason::GreedyOptimal => {
                BnbSolverOutcome::greedy_optimal(self.incumbent, self.stats)
            }
            TerminationReason::SearchExhausted => {
                BnbSolverOutcome::search_exhausted(self.incumbent, self.stats)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::{cell::RefCell, rc::Rc};

    fn model(capacity: i64, values: Vec<i64>, volumes: Vec<i64>) -> Model<i64> {
        Model::new(capacity, values, volumes).unwrap()
    }

    /// Enumerates every feasible quantity vector and returns the best value.
    fn brute_force(model: &Model<i64>) -> i64 {
        fn go(model: &Model<i64>, index: usize, remaining: i64, acc: i64) -> i64 {
            if index == model.num_objects() {
                return acc;
            }
            let volume = model.volumes()[index];
            let value = model.values()[index];
            let mut best = acc;
            let mut quantity = 0;
            while quantity * volume <= remaining {
                best = best.max(go(
                    model,
                    index + 1,
                    remaining - quantity * volume,
                    acc + quantity * value,
                ));
                quantity += 1;
            }
            best
        }
        go(model, 0, model.capacity(), 0)
    }

    fn assert_optimal(model: &Model<i64>, outcome: &BnbSolverOutcome<i64>) {
        let solution = outcome.solution();
        assert!(
            model.is_feasible(solution.quantities()),
            "infeasible solution {:?} for {:?}",
            solution.quantities(),
            model
        );
        assert_eq!(
            model.objective_of(solution.quantities()),
            Some(solution.objective_value()),
            "objective does not match quantities for {:?}",
            model
        );
        assert_eq!(
            solution.objective_value(),
            brute_force(model),
            "not optimal for {:?}",
            model
        );
    }

    #[test]
    fn test_search_corrects_suboptimal_greedy() {
        let model = model(14, vec![15, 12, 2, 8], vec![5, 3, 2, 4]);
        let outcome = BnbSolver::new().solve(&model);

        assert_eq!(outcome.statistics().initial_lower_bound, 50);
        assert_eq!(outcome.statistics().root_upper_bound, 56.0);
        assert_eq!(outcome.solution().objective_value(), 51);
        assert_eq!(outcome.solution().quantities(), &[1, 3, 0, 0]);
        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::SearchExhausted
        );
        assert!(outcome.statistics().solutions_found >= 1);
        assert!(outcome.statistics().nodes_explored > 0);
        assert_optimal(&model, &outcome);
    }

    #[test]
    fn test_single_object() {
        let model = model(10, vec![10], vec![3]);
        let outcome = BnbSolver::new().solve(&model);
        assert_eq!(outcome.solution().objective_value(), 30);
        assert_eq!(outcome.solution().quantities(), &[3]);
        // The relaxation (33.3) does not prove the greedy fill, so the single
        // leaf level is enumerated.
        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::SearchExhausted
        );
        assert_eq!(outcome.statistics().relaxations_solved, 0);
        assert_eq!(outcome.statistics().solutions_found, 0);
    }

    #[test]
    fn test_zero_slack_single_object() {
        let model = model(5, vec![7], vec![5]);
        let outcome = BnbSolver::new().solve(&model);
        assert_eq!(outcome.solution().objective_value(), 7);
        assert_eq!(outcome.solution().quantities(), &[1]);
        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::GreedyOptimal
        );
    }

    #[test]
    fn test_tight_multi_object_matches_brute_force() {
        let model = model(12, vec![6, 10], vec![2, 3]);
        let outcome = BnbSolver::new().solve(&model);
        assert_eq!(brute_force(&model), 40);
        assert_eq!(outcome.solution().objective_value(), 40);
        assert_eq!(outcome.solution().quantities(), &[0, 4]);
        assert_optimal(&model, &outcome);
    }

    #[test]
    fn test_early_exit_returns_greedy_without_branching() {
        let model = model(12, vec![6, 10], vec![2, 3]);
        let heuristics = BoundHeuristics::new(&model);
        assert!(heuristics.proves_greedy_optimal());

        let outcome = BnbSolver::new().solve(&model);
        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::GreedyOptimal
        );
        assert_eq!(outcome.solution(), &heuristics.greedy().to_solution());
        assert_eq!(outcome.statistics().nodes_explored, 0);
        assert_eq!(outcome.statistics().relaxations_solved, 0);
    }

    #[test]
    fn test_densities_closer_than_f64_resolution() {
        // Densities 2^53 + 1/2 and 2^53 + 1 are the same f64; only object 1 is
        // worth filling with.
        let two_53 = 1i64 << 53;
        let model = model(2, vec![2 * two_53 + 1, two_53 + 1], vec![2, 1]);
        let outcome = BnbSolver::new().solve(&model);

        assert_eq!(outcome.solution().objective_value(), 2 * two_53 + 2);
        assert_eq!(outcome.solution().quantities(), &[0, 2]);
        assert_optimal(&model, &outcome);
    }

    #[test]
    fn test_large_values_match_brute_force() {
        let scale = 1i64 << 50;
        let values = [15, 12, 2, 8].iter().map(|c| c * scale + 1).collect();
        let model = model(14, values, vec![5, 3, 2, 4]);
        let outcome = BnbSolver::new().solve(&model);

        assert_eq!(outcome.solution().objective_value(), 51 * scale + 4);
        assert_eq!(outcome.solution().quantities(), &[1, 3, 0, 0]);
        assert_optimal(&model, &outcome);
    }

    #[test]
    fn test_zero_capacity() {
        let model = model(0, vec![5, 3], vec![2, 1]);
        let outcome = BnbSolver::new().solve(&model);
        assert_eq!(outcome.solution().objective_value(), 0);
        assert_eq!(outcome.solution().quantities(), &[0, 0]);
    }

    #[test]
    fn test_equal_densities_accept_integral_relaxation() {
        // Both objects have density 2; greedy takes 3 x obj0 for 12 and wastes 1.
        let model = model(7, vec![4, 6], vec![2, 3]);
        let outcome = BnbSolver::new().solve(&model);
        assert_eq!(outcome.statistics().initial_lower_bound, 12);
        assert_eq!(outcome.solution().objective_value(), 14);
        assert_eq!(outcome.solution().quantities(), &[2, 1]);
        assert_eq!(outcome.statistics().solutions_found, 1);
    }

    #[test]
    fn test_solve_is_deterministic_and_solver_is_reusable() {
        let first = model(14, vec![15, 12, 2, 8], vec![5, 3, 2, 4]);
        let second = model(10, vec![10], vec![3]);

        let mut solver = BnbSolver::preallocated(4);
        let a = solver.solve(&first);
        let b = solver.solve(&second);
        let c = solver.solve(&first);

        assert_eq!(a.solution(), c.solution());
        assert_eq!(
            a.statistics().nodes_explored,
            c.statistics().nodes_explored
        );
        assert_eq!(b.solution().quantities(), &[3]);
        assert_eq!(
            BnbSolver::new().solve(&first).solution(),
            a.solution()
        );
    }

    #[test]
    fn test_verbose_does_not_change_the_result() {
        let model = model(14, vec![15, 12, 2, 8], vec![5, 3, 2, 4]);
        let quiet = BnbSolver::new().solve(&model);

        let mut solver = BnbSolver::with_options(SolverOptions::new().with_verbose(true));
        assert!(solver.options().verbose);
        let verbose = solver.solve(&model);
        assert_eq!(quiet.solution(), verbose.solution());

        solver.set_verbose(false);
        assert!(!solver.options().verbose);
    }

    #[test]
    fn test_generic_over_integer_width() {
        let model = Model::new(14i32, vec![15, 12, 2, 8], vec![5, 3, 2, 4]).unwrap();
        let outcome = BnbSolver::new().solve(&model);
        assert_eq!(outcome.solution().objective_value(), 51i32);
        assert_eq!(outcome.solution().quantities(), &[1, 3, 0, 0]);
    }

    #[test]
    fn test_random_instances_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut solver = BnbSolver::new();
        for _ in 0..300 {
            let n = rng.gen_range(1..=5);
            let values: Vec<i64> = (0..n).map(|_| rng.gen_range(1..=25)).collect();
            let volumes: Vec<i64> = (0..n).map(|_| rng.gen_range(1..=9)).collect();
            let capacity = rng.gen_range(0..=20);
            let model = model(capacity, values, volumes);

            let outcome = solver.solve(&model);
            assert_optimal(&model, &outcome);
            assert!(outcome.solution().objective_value() >= outcome.statistics().initial_lower_bound);
            assert!(
                outcome.solution().objective_value() as f64
                    <= outcome.statistics().root_upper_bound + 1e-9
            );
        }
    }

    #[derive(Default)]
    struct Recording {
        enters: usize,
        exits: usize,
        descends: usize,
        backtracks: usize,
        solutions: Vec<i64>,
        evaluations: Vec<BranchEvaluation<i64>>,
    }

    struct RecordingMonitor(Rc<RefCell<Recording>>);

    impl TreeSearchMonitor<i64> for RecordingMonitor {
        fn name(&self) -> &str {
            "RecordingMonitor"
        }
        fn on_enter_search(
            &mut self,
            _model: &Model<i64>,
            _heuristics: &BoundHeuristics<i64>,
            _statistics: &BnbSolverStatistics<i64>,
        ) {
            self.0.borrow_mut().enters += 1;
        }
        fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<i64>) {
            self.0.borrow_mut().exits += 1;
        }
        fn on_step(&mut self, _state: &SearchState<i64>, _statistics: &BnbSolverStatistics<i64>) {}
        fn on_evaluate(
            &mut self,
            _state: &SearchState<i64>,
            _object_index: ObjectIndex,
            evaluation: BranchEvaluation<i64>,
            _statistics: &BnbSolverStatistics<i64>,
        ) {
            self.0.borrow_mut().evaluations.push(evaluation);
        }
        fn on_prune(
            &mut self,
            _state: &SearchState<i64>,
            _reason: PruneReason,
            _statistics: &BnbSolverStatistics<i64>,
        ) {
        }
        fn on_descend(
            &mut self,
            _state: &SearchState<i64>,
            _statistics: &BnbSolverStatistics<i64>,
        ) {
            self.0.borrow_mut().descends += 1;
        }
        fn on_backtrack(
            &mut self,
            _state: &SearchState<i64>,
            _statistics: &BnbSolverStatistics<i64>,
        ) {
            self.0.borrow_mut().backtracks += 1;
        }
        fn on_solution_found(
            &mut self,
            solution: &Solution<i64>,
            _statistics: &BnbSolverStatistics<i64>,
        ) {
            self.0.borrow_mut().solutions.push(solution.objective_value());
        }
    }

    #[test]
    fn test_monitor_sees_consistent_events() {
        let model = model(14, vec![15, 12, 2, 8], vec![5, 3, 2, 4]);
        let recording = Rc::new(RefCell::new(Recording::default()));
        let outcome =
            BnbSolver::new().solve_with_monitor(&model, RecordingMonitor(Rc::clone(&recording)));

        let recording = recording.borrow();
        let stats = outcome.statistics();
        assert_eq!(recording.enters, 1);
        assert_eq!(recording.exits, 1);
        assert_eq!(recording.solutions, vec![51]);
        assert_eq!(recording.backtracks as u64, stats.backtracks);
        // Every descent is matched by a backtrack, plus the root level.
        assert_eq!(recording.backtracks, recording.descends + 1);
        assert_eq!(
            recording.evaluations.len() as u64,
            stats.nodes_explored - stats.prunings_infeasible
        );
        // The first root candidate fixes object 1 at zero: 14 * 15 / 5 = 42.
        assert_eq!(recording.evaluations[0], BranchEvaluation::Fractional(42.0));
        assert!(recording
            .evaluations
            .contains(&BranchEvaluation::Integral(51)));
    }

    #[test]
    fn test_branch_evaluation_classification() {
        assert_eq!(
            BranchEvaluation::<i64>::from_relaxation(51.0, true),
            BranchEvaluation::Integral(51)
        );
        assert_eq!(
            BranchEvaluation::<i64>::from_relaxation(54.0, false),
            BranchEvaluation::Fractional(54.0)
        );
        assert_eq!(
            BranchEvaluation::<i8>::from_relaxation(1000.0, true),
            BranchEvaluation::Fractional(1000.0)
        );

        assert!(BranchEvaluation::Integral(51i64).beats(50));
        assert!(!BranchEvaluation::Integral(50i64).beats(50));
        assert!(BranchEvaluation::<i64>::Fractional(50.5).beats(50));
        assert!(!BranchEvaluation::<i64>::Fractional(50.0).beats(50));
        assert!(BranchEvaluation::Integral(1i64).is_integral());
        assert_eq!(
            format!("{}", BranchEvaluation::<i64>::Fractional(54.0)),
            "Fractional(54.0000)"
        );
    }
}
