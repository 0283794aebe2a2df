use bit_set::BitSet;

use crate::diagnostics::{Diagnostics, Event, PruneReason};
use crate::problem::Problem;

pub(crate) struct Singletons {
    /// Items loved by more than one person, in item order.
    pub(crate) remaining: Vec<usize>,
    /// People that no remaining item satisfies, in person order.
    pub(crate) fallbacks: Vec<usize>,
    /// Everyone a remaining item satisfies.
    pub(crate) universe: BitSet,
}

/// Drops every item loved by a single person. People left without any other
/// favorite get a fallback gift and leave the search universe.
pub(crate) fn singletons<P, I, D>(problem: &Problem<P, I>, diagnostics: &mut D) -> Singletons
where
    P: Clone,
    I: Clone,
    D: Diagnostics<P, I>,
{
    let mut remaining = Vec::new();
    let mut universe = BitSet::with_capacity(problem.people().len());

    for ix in 0..problem.items().len() {
        let lovers = problem.lovers(ix);
        let mut owners = lovers.iter();
        if let (Some(owner), None) = (owners.next(), owners.next()) {
            diagnostics.record(Event::Pruned {
                item: problem.item(ix).clone(),
                reason: PruneReason::Singleton(problem.person(owner).clone()),
            });
        } else {
            universe.union_with(lovers);
            remaining.push(ix);
        }
    }

    let fallbacks: Vec<usize> = (0..problem.people().len())
        .filter(|ix| !universe.contains(*ix))
        .collect();
    for &ix in &fallbacks {
        diagnostics.record(Event::Fallback {
            person: problem.person(ix).clone(),
        });
    }

    Singletons {
        remaining,
        fallbacks,
        universe,
    }
}

/// Drops every item whose lovers all love some other item too.
///
/// Dominance is decided against the unmodified `candidates` and everything
/// dominated is removed at once. Of two items with the same lovers the
/// earlier one survives, so the survivors never contain each other.
pub(crate) fn dominated<P, I, D>(
    problem: &Problem<P, I>,
    candidates: &[usize],
    diagnostics: &mut D,
) -> Vec<usize>
where
    I: Clone,
    D: Diagnostics<P, I>,
{
    let lovers = |pos: usize| problem.lovers(candidates[pos]);
    let dominates = |by: usize, pos: usize| {
        by != pos
            && lovers(pos).is_subset(lovers(by))
            && (by < pos || !lovers(by).is_subset(lovers(pos)))
    };

    let is_dominated: Vec<bool> = (0..candidates.len())
        .map(|pos| (0..candidates.len()).any(|by| dominates(by, pos)))
        .collect();

    let mut survivors = Vec::with_capacity(candidates.len());
    for (pos, &ix) in candidates.iter().enumerate() {
        if !is_dominated[pos] {
            survivors.push(ix);
            continue;
        }
        // a survivor above `pos` exists as dominance is a strict partial order
        let by = (0..candidates.len())
            .find(|&by| !is_dominated[by] && lovers(pos).is_subset(lovers(by)));
        debug_assert!(by.is_some());
        if let Some(by) = by {
            diagnostics.record(Event::Pruned {
                item: problem.item(ix).clone(),
                reason: PruneReason::Dominated(problem.item(candidates[by]).clone()),
            });
        }
    }
    survivors
}

#[cfg(test)]
mod test {
    use super::{dominated, singletons};
    use crate::diagnostics::{Event, PruneReason};
    use crate::favorites;
    use crate::problem::Problem;

    type Events = Vec<Event<&'static str, &'static str>>;

    #[test]
    fn singleton_items_are_pruned() {
        let problem = Problem::new(favorites! {
            "a" => ["x", "solo"],
            "b" => ["x", "y"],
            "c" => ["y"],
            "d" => ["only", "mine"],
        })
        .unwrap();
        let mut events = Events::new();
        let found = singletons(&problem, &mut events);

        // x, y
        assert_eq!(found.remaining, vec![0, 2]);
        assert_eq!(found.fallbacks, vec![3]);
        assert_eq!(found.universe.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(
            events,
            vec![
                Event::Pruned {
                    item: "solo",
                    reason: PruneReason::Singleton("a"),
                },
                Event::Pruned {
                    item: "only",
                    reason: PruneReason::Singleton("d"),
                },
                Event::Pruned {
                    item: "mine",
                    reason: PruneReason::Singleton("d"),
                },
                Event::Fallback { person: "d" },
            ]
        );
    }

    #[test]
    fn person_without_favorites_needs_fallback() {
        let problem = Problem::new(vec![("a", vec!["x"]), ("b", vec!["x"]), ("c", vec![])]).unwrap();
        let found = singletons(&problem, &mut ());
        assert_eq!(found.remaining, vec![0]);
        assert_eq!(found.fallbacks, vec![2]);
    }

    #[test]
    fn subsets_are_dominated() {
        let problem = Problem::new(favorites! {
            "a" => ["small", "big", "other"],
            "b" => ["small", "big"],
            "c" => ["big", "other"],
            "d" => ["other", "tiny"],
            "e" => ["tiny"],
        })
        .unwrap();
        let mut events = Events::new();
        // small {a, b}, big {a, b, c}, other {a, c, d}, tiny {d, e}
        let survivors = dominated(&problem, &[0, 1, 2, 3], &mut events);

        assert_eq!(survivors, vec![1, 2, 3]);
        assert_eq!(
            events,
            vec![Event::Pruned {
                item: "small",
                reason: PruneReason::Dominated("big"),
            }]
        );
    }

    #[test]
    fn equal_items_keep_the_first() {
        let problem = Problem::new(favorites! {
            "a" => ["p", "q", "r"],
            "b" => ["p", "q", "r"],
            "c" => ["r"],
        })
        .unwrap();
        let mut events = Events::new();
        let survivors = dominated(&problem, &[0, 1, 2], &mut events);

        // p and q are both inside r, and q also ties with p
        assert_eq!(survivors, vec![2]);
        assert_eq!(
            events,
            vec![
                Event::Pruned {
                    item: "p",
                    reason: PruneReason::Dominated("r"),
                },
                Event::Pruned {
                    item: "q",
                    reason: PruneReason::Dominated("r"),
                },
            ]
        );

        let problem = Problem::new(favorites! {
            "a" => ["p", "q"],
            "b" => ["p", "q"],
        })
        .unwrap();
        assert_eq!(dominated(&problem, &[0, 1], &mut ()), vec![0]);
    }

    #[test]
    fn pruning_twice_changes_nothing() {
        let problem = Problem::new(favorites! {
            "a" => ["w", "x", "y"],
            "b" => ["w", "x"],
            "c" => ["x", "y", "z"],
            "d" => ["z"],
            "e" => ["z", "w"],
        })
        .unwrap();
        let all: Vec<usize> = (0..problem.items().len()).collect();
        let once = dominated(&problem, &all, &mut ());
        let mut events = Events::new();
        let twice = dominated(&problem, &once, &mut events);

        assert_eq!(once, twice);
        assert!(events.is_empty());
        for &a in &once {
            for &b in once.iter().filter(|&&b| b != a) {
                assert!(!problem.lovers(a).is_subset(problem.lovers(b)));
            }
        }
    }
}
