use std::fmt::{self, Display};
use std::hash::Hash;

pub mod diagnostics;
pub mod error;
mod macros;
mod problem;
mod prune;
mod solver;

pub use diagnostics::{Diagnostics, Event, PruneReason, Tracing};
pub use error::{Identifier, InvalidInput};
pub use problem::Problem;
pub use solver::{NearCover, Solution, Solver, Status};

/// One gift in a cover: either a loved item or a fallback gift meant for a
/// single person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pick<P, I> {
    Item(I),
    Fallback(P),
}

impl<P: Display, I: Display> Display for Pick<P, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pick::Item(item) => item.fmt(f),
            Pick::Fallback(person) => write!(f, "<{person} gift>"),
        }
    }
}

/// Finds the smallest combinations of items that satisfy every person in
/// `favorites`.
///
/// People whose favorites nobody else shares are given a [`Pick::Fallback`],
/// which is appended to every returned cover.
pub fn find_cover<P, I, S>(
    favorites: impl IntoIterator<Item = (P, S)>,
) -> Result<Vec<Vec<Pick<P, I>>>, InvalidInput>
where
    P: Clone + Eq + Hash + Display + Identifier,
    I: Clone + Eq + Hash + Identifier,
    S: IntoIterator<Item = I>,
{
    let problem = Problem::new(favorites)?;
    Ok(Solver::new(&problem).solve().into_covers())
}

#[cfg(test)]
mod test {
    use super::{find_cover, Pick, Problem};
    use crate::favorites;
    use rstest::rstest;

    #[test]
    fn test1() {
        let covers = find_cover(favorites! {
            'a' => ['x'],
            'b' => ['x', 'y'],
            'c' => ['y'],
        });
        assert_eq!(covers, Ok(vec![vec![Pick::Item('x'), Pick::Item('y')]]));
    }

    #[test]
    fn test2() {
        let covers = find_cover(favorites! {
            'a' => ['x'],
            'b' => ['x'],
        });
        assert_eq!(covers, Ok(vec![vec![Pick::Item('x')]]));
    }

    #[test]
    fn test3() {
        let covers = find_cover(favorites! {
            0 => [10, 11],
            1 => [10],
            2 => [12],
            3 => [12, 13],
            4 => [13, 11],
        });
        assert_eq!(
            covers,
            Ok(vec![
                vec![Pick::Item(10), Pick::Item(11), Pick::Item(12)],
                vec![Pick::Item(10), Pick::Item(12), Pick::Item(13)],
            ])
        );
    }

    #[rstest]
    #[case(Pick::Item("pink cake"), "pink cake")]
    #[case(Pick::Fallback("wizard"), "<wizard gift>")]
    fn picks_display(#[case] pick: Pick<&str, &str>, #[case] expected: &str) {
        assert_eq!(pick.to_string(), expected);
    }

    #[test]
    fn lonely_people_get_exactly_one_fallback() {
        let favorites = favorites! {
            "a" => ["x", "solo"],
            "b" => ["x", "y"],
            "c" => ["y"],
            "d" => ["only", "mine"],
        };
        let problem = Problem::new(favorites.clone()).unwrap();
        let covers = find_cover(favorites).unwrap();

        assert!(!covers.is_empty());
        for cover in &covers {
            assert!(problem.is_cover(cover));
            let for_d = cover.iter().filter(|pick| **pick == Pick::Fallback("d")).count();
            assert_eq!(for_d, 1);
            assert!(!cover.contains(&Pick::Item("only")));
            assert!(!cover.contains(&Pick::Item("mine")));
        }
    }
}
