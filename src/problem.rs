use bit_set::BitSet;
use rustc_hash::FxHashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::{Identifier, InvalidInput};
use crate::Pick;

/// A validated favorites table together with its reverse relation.
///
/// People are indexed in input order and items in order of first appearance,
/// which fixes the order every later stage iterates in.
#[derive(Debug, Clone)]
pub struct Problem<P, I> {
    people: Vec<P>,
    person_ix: FxHashMap<P, usize>,
    items: Vec<I>,
    item_ix: FxHashMap<I, usize>,
    // who loves each item, indexed like `items`
    lovers: Vec<BitSet>,
}

impl<P, I> Problem<P, I>
where
    P: Clone + Eq + Hash + Display + Identifier,
    I: Clone + Eq + Hash + Identifier,
{
    pub fn new<S>(favorites: impl IntoIterator<Item = (P, S)>) -> Result<Self, InvalidInput>
    where
        S: IntoIterator<Item = I>,
    {
        let mut problem = Problem {
            people: Vec::new(),
            person_ix: FxHashMap::default(),
            items: Vec::new(),
            item_ix: FxHashMap::default(),
            lovers: Vec::new(),
        };

        for (person, loved) in favorites {
            problem.add_person(person, loved)?;
        }

        if problem.people.is_empty() {
            return Err(InvalidInput::Empty);
        }
        Ok(problem)
    }

    fn add_person(&mut self, person: P, loved: impl IntoIterator<Item = I>) -> Result<(), InvalidInput> {
        if person.is_blank() {
            return Err(InvalidInput::EmptyPerson);
        }
        if self.person_ix.contains_key(&person) {
            return Err(InvalidInput::DuplicatePerson(person.to_string()));
        }
        let row_ix = self.people.len();

        for item in loved {
            if item.is_blank() {
                return Err(InvalidInput::EmptyItem {
                    person: person.to_string(),
                });
            }
            let items = &mut self.items;
            let lovers = &mut self.lovers;
            let col_ix = *self.item_ix.entry(item).or_insert_with_key(|item| {
                items.push(item.clone());
                lovers.push(BitSet::new());
                items.len() - 1
            });
            lovers[col_ix].insert(row_ix);
        }

        self.person_ix.insert(person.clone(), row_ix);
        self.people.push(person);
        Ok(())
    }

    /// Whether `picks` satisfies every person of the table, either through a
    /// loved item or through a fallback gift of their own.
    pub fn is_cover(&self, picks: &[Pick<P, I>]) -> bool {
        let mut covered = BitSet::with_capacity(self.people.len());
        for pick in picks {
            match pick {
                Pick::Item(item) => match self.item_ix.get(item) {
                    Some(&ix) => covered.union_with(&self.lovers[ix]),
                    None => return false,
                },
                Pick::Fallback(person) => match self.person_ix.get(person) {
                    Some(&ix) => {
                        covered.insert(ix);
                    }
                    None => return false,
                },
            }
        }
        covered.len() == self.people.len()
    }
}

impl<P, I> Problem<P, I> {
    pub fn people(&self) -> &[P] {
        &self.people
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Indices of the people who love the item at `item_ix`.
    pub fn lovers(&self, item_ix: usize) -> &BitSet {
        &self.lovers[item_ix]
    }

    pub(crate) fn person(&self, ix: usize) -> &P {
        &self.people[ix]
    }

    pub(crate) fn item(&self, ix: usize) -> &I {
        &self.items[ix]
    }
}
