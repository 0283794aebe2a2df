use itertools::Itertools;
use std::fmt::{self, Display};

use crate::Pick;

/// Why an item was taken out of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneReason<P, I> {
    /// Only this person loves the item.
    Singleton(P),
    /// Everyone who loves the item also loves this one.
    Dominated(I),
}

/// Progress narrated by a [`Solver`](crate::Solver) while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<P, I> {
    Pruned {
        item: I,
        reason: PruneReason<P, I>,
    },
    Fallback {
        person: P,
    },
    Searching {
        size: usize,
        items: usize,
    },
    NoImprovement {
        size: usize,
    },
    NearCover {
        uncovered: usize,
        items: usize,
        candidates: Vec<Vec<Pick<P, I>>>,
    },
    Found {
        size: usize,
        covers: Vec<Vec<Pick<P, I>>>,
    },
    Cancelled {
        size: usize,
    },
}

/// A sink for solver events.
pub trait Diagnostics<P, I> {
    fn record(&mut self, event: Event<P, I>);
}

impl<P, I> Diagnostics<P, I> for () {
    fn record(&mut self, _event: Event<P, I>) {}
}

impl<P, I> Diagnostics<P, I> for Vec<Event<P, I>> {
    fn record(&mut self, event: Event<P, I>) {
        self.push(event);
    }
}

impl<P, I, D> Diagnostics<P, I> for &mut D
where
    D: Diagnostics<P, I> + ?Sized,
{
    fn record(&mut self, event: Event<P, I>) {
        (**self).record(event);
    }
}

/// Forwards every event to `tracing`.
///
/// Pruning decisions are logged at debug level, search progress and results
/// at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tracing;

impl<P, I> Diagnostics<P, I> for Tracing
where
    P: Display,
    I: Display,
{
    fn record(&mut self, event: Event<P, I>) {
        match event {
            Event::Pruned {
                item,
                reason: PruneReason::Singleton(person),
            } => tracing::debug!(%item, %person, "pruning item only one person loves"),
            Event::Pruned {
                item,
                reason: PruneReason::Dominated(by),
            } => tracing::debug!(%item, dominated_by = %by, "pruning dominated item"),
            Event::Fallback { person } => {
                let gift = Pick::<P, I>::Fallback(person);
                tracing::info!(%gift, "person only has singleton favorites")
            }
            Event::Searching { size, items } => {
                tracing::info!("trying combinations of {size} items out of {items}")
            }
            Event::NoImprovement { size } => {
                tracing::info!("no more efficient combinations found at {size} items")
            }
            Event::NearCover {
                uncovered,
                items,
                candidates,
            } => tracing::info!(
                candidates = %Listing(&candidates),
                "for combinations of {items} items, the most efficient ones covered all but {uncovered} people"
            ),
            Event::Found { size, covers } => tracing::info!(
                count = covers.len(),
                covers = %Listing(&covers),
                "found covers using {size} items"
            ),
            Event::Cancelled { size } => {
                tracing::warn!("search cancelled before combinations of {size} items")
            }
        }
    }
}

struct Listing<'a, P, I>(&'a [Vec<Pick<P, I>>]);

impl<P: Display, I: Display> Display for Listing<'_, P, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tuples = self
            .0
            .iter()
            .map(|picks| format!("({})", picks.iter().join(", ")));
        write!(f, "[{}]", tuples.format(", "))
    }
}
