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

use crate::stats::BnbSolverStatistics;
use satchel_model::solution::Solution;

/// Why the solver stopped. Either way the returned solution is optimal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The greedy fill reached the root relaxation bound; no branching happened.
    GreedyOptimal,
    /// The search tree was explored completely.
    SearchExhausted,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::GreedyOptimal => write!(f, "GreedyOptimal"),
            TerminationReason::SearchExhausted => write!(f, "SearchExhausted"),
        }
    }
}

/// The result of a branch-and-bound run.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    solution: Solution<T>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics<T>,
}

impl<T> BnbSolverOutcome<T> {
    #[inline]
    pub fn greedy_optimal(solution: Solution<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            solution,
            termination_reason: TerminationReason::GreedyOptimal,
            statistics,
        }
    }

    #[inline]
    pub fn search_exhausted(solution: Solution<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            solution,
            termination_reason: TerminationReason::SearchExhausted,
            statistics,
        }
    }

    /// Returns the optimal solution.
    #[inline]
    pub fn solution(&self) -> &Solution<T> {
        &self.solution
    }

    /// Consumes the outcome and returns the optimal solution.
    #[inline]
    pub fn into_solution(self) -> Solution<T> {
        self.solution
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> TerminationReason {
        self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics<T> {
        &self.statistics
    }
}

impl<T> std::fmt::Display for BnbSolverOutcome<T>
where
    T: satchel_core::num::SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbSolverOutcome(objective: {}, termination: {}, nodes: {})",
            self.solution.objective_value(),
            self.termination_reason,
            self.statistics.nodes_explored
        )
    }
}
