use bit_set::BitSet;
use itertools::Itertools;
use std::ops::ControlFlow;

use crate::diagnostics::{Diagnostics, Event};
use crate::problem::Problem;
use crate::prune;
use crate::Pick;

/// Best combination found so far that leaves some people uncovered.
///
/// Combinations are ranked by `uncovered + items`. A combination scoring the
/// same as the record is kept alongside it only if it uses no more items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearCover<P, I> {
    pub uncovered: usize,
    pub items: usize,
    /// Tied combinations, each padded with fallback gifts for whoever it misses.
    pub candidates: Vec<Vec<Pick<P, I>>>,
}

impl<P: Clone, I: Clone> NearCover<P, I> {
    /// Fallback gifts for everybody in `universe`, no items.
    fn baseline(problem: &Problem<P, I>, universe: &BitSet) -> Self {
        NearCover {
            uncovered: universe.len(),
            items: 0,
            candidates: vec![fallbacks_for(problem, universe.iter())],
        }
    }

    fn score(&self) -> usize {
        self.uncovered + self.items
    }

    fn offer(&mut self, problem: &Problem<P, I>, combo: &[usize], missed: &BitSet) {
        let uncovered = missed.len();
        let size = combo.len();
        let score = uncovered + size;
        if score < self.score() {
            self.uncovered = uncovered;
            self.items = size;
            self.candidates = vec![padded(problem, combo, missed)];
        } else if score == self.score() && size <= self.items {
            self.candidates.push(padded(problem, combo, missed));
        }
    }
}

fn fallbacks_for<P: Clone, I>(problem: &Problem<P, I>, people: impl Iterator<Item = usize>) -> Vec<Pick<P, I>> {
    people.map(|ix| Pick::Fallback(problem.person(ix).clone())).collect()
}

fn picks<P, I: Clone>(problem: &Problem<P, I>, combo: &[usize]) -> Vec<Pick<P, I>> {
    combo.iter().map(|&ix| Pick::Item(problem.item(ix).clone())).collect()
}

fn padded<P: Clone, I: Clone>(problem: &Problem<P, I>, combo: &[usize], missed: &BitSet) -> Vec<Pick<P, I>> {
    let mut picks = picks(problem, combo);
    picks.extend(fallbacks_for(problem, missed.iter()));
    picks
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Covers were found, or there was nothing to search.
    Complete,
    /// The cancellation hook stopped the search before trying `size` items.
    Cancelled { size: usize },
}

#[derive(Debug, Clone)]
pub struct Solution<P, I> {
    /// Exact covers of the smallest size tried, fallback gifts included.
    pub covers: Vec<Vec<Pick<P, I>>>,
    /// Number of items (fallback gifts excluded) in each of `covers`.
    pub size: Option<usize>,
    pub near_cover: NearCover<P, I>,
    /// Gifts for people none of the searched items satisfy.
    pub fallbacks: Vec<Pick<P, I>>,
    pub status: Status,
}

impl<P: Clone, I: Clone> Solution<P, I> {
    /// The exact covers, or the best near covers when the search ended
    /// without one. Every returned tuple satisfies every person.
    pub fn into_covers(self) -> Vec<Vec<Pick<P, I>>> {
        if !self.covers.is_empty() {
            return self.covers;
        }
        let fallbacks = self.fallbacks;
        self.near_cover
            .candidates
            .into_iter()
            .map(|mut picks| {
                picks.extend(fallbacks.iter().cloned());
                picks
            })
            .collect()
    }
}

type Unbounded = fn(usize) -> ControlFlow<()>;

/// Brute force search for the smallest combinations of items that satisfy
/// everyone.
///
/// Items loved by a single person and items dominated by another item are
/// pruned first; the remaining items are then tried in combinations of
/// increasing size until some size yields exact covers.
pub struct Solver<'a, P, I, D = (), C = Unbounded> {
    problem: &'a Problem<P, I>,
    diagnostics: D,
    cancel: C,
}

impl<'a, P, I> Solver<'a, P, I> {
    pub fn new(problem: &'a Problem<P, I>) -> Self {
        Solver {
            problem,
            diagnostics: (),
            cancel: |_| ControlFlow::Continue(()),
        }
    }
}

impl<'a, P, I, D, C> Solver<'a, P, I, D, C> {
    pub fn with_diagnostics<E>(self, diagnostics: E) -> Solver<'a, P, I, E, C>
    where
        E: Diagnostics<P, I>,
    {
        Solver {
            problem: self.problem,
            diagnostics,
            cancel: self.cancel,
        }
    }

    /// Consult `cancel` with the next combination size before trying it;
    /// `Break` ends the search there.
    pub fn with_cancel<F>(self, cancel: F) -> Solver<'a, P, I, D, F>
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        Solver {
            problem: self.problem,
            diagnostics: self.diagnostics,
            cancel,
        }
    }
}

impl<'a, P, I, D, C> Solver<'a, P, I, D, C>
where
    P: Clone,
    I: Clone,
    D: Diagnostics<P, I>,
    C: FnMut(usize) -> ControlFlow<()>,
{
    pub fn solve(mut self) -> Solution<P, I> {
        let problem = self.problem;
        let diagnostics = &mut self.diagnostics;

        let prune::Singletons {
            remaining,
            fallbacks,
            universe,
        } = prune::singletons(problem, diagnostics);
        let survivors = prune::dominated(problem, &remaining, diagnostics);

        let mut near_cover = NearCover::baseline(problem, &universe);
        let mut covers = Vec::new();
        let mut size = None;
        let mut status = Status::Complete;

        for n in 1..=survivors.len() {
            if (self.cancel)(n).is_break() {
                diagnostics.record(Event::Cancelled { size: n });
                status = Status::Cancelled { size: n };
                break;
            }
            diagnostics.record(Event::Searching {
                size: n,
                items: survivors.len(),
            });

            let mut covered = BitSet::with_capacity(problem.people().len());
            let mut missed = BitSet::with_capacity(problem.people().len());
            for combo in survivors.iter().copied().combinations(n) {
                covered.clear();
                for &ix in &combo {
                    covered.union_with(problem.lovers(ix));
                }
                missed.clone_from(&universe);
                missed.difference_with(&covered);

                if missed.is_empty() {
                    covers.push(combo);
                } else {
                    near_cover.offer(problem, &combo, &missed);
                }
            }

            if !covers.is_empty() {
                size = Some(n);
                break;
            }
            if near_cover.items < n {
                diagnostics.record(Event::NoImprovement { size: n });
            } else {
                diagnostics.record(Event::NearCover {
                    uncovered: near_cover.uncovered,
                    items: near_cover.items,
                    candidates: near_cover.candidates.clone(),
                });
            }
        }

        let fallbacks = fallbacks_for(problem, fallbacks.into_iter());
        let covers: Vec<_> = covers
            .iter()
            .map(|combo| {
                let mut picks = picks(problem, combo);
                picks.extend(fallbacks.iter().cloned());
                picks
            })
            .collect();
        if let Some(size) = size {
            diagnostics.record(Event::Found {
                size,
                covers: covers.clone(),
            });
        }

        Solution {
            covers,
            size,
            near_cover,
            fallbacks,
            status,
        }
    }
}
