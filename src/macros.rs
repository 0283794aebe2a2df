/// Builds a favorites table, one `person => [items]` entry per person, in the
/// order written.
///
/// ```
/// let covers = gift_cover::find_cover(gift_cover::favorites! {
///     "abigail" => ["amethyst", "pumpkin"],
///     "krobus" => ["pumpkin", "void egg"],
///     "sebastian" => ["void egg"],
/// })
/// .unwrap();
/// assert_eq!(covers.len(), 1);
/// ```
#[macro_export]
macro_rules! favorites {
    ($($person:expr => [$($item:expr),* $(,)?],)+) => { $crate::favorites!($($person => [$($item),*]),+) };
    ($($person:expr => [$($item:expr),* $(,)?]),*) => {
        ::std::vec![$(
            ($person, ::std::vec![$($item),*])
        ),*]
    };
}
