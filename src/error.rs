use thiserror::Error;

/// Rejection of a favorites table before any search is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("favorites table has no people")]
    Empty,

    #[error("person '{0}' appears more than once")]
    DuplicatePerson(String),

    #[error("person identifier is blank")]
    EmptyPerson,

    #[error("person '{person}' lists a blank item")]
    EmptyItem { person: String },
}

/// Identifiers that can be checked for blankness during validation.
///
/// Only string-like keys can be blank; everything else is accepted as is.
pub trait Identifier {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Identifier for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Identifier for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl<T: Identifier + ?Sized> Identifier for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

macro_rules! never_blank {
    ($($ty:ty),*) => {
        $(impl Identifier for $ty {})*
    };
}

never_blank! { char, u8, u16, u32, u64, usize, i32, i64 }
