pub(crate) trait OptionExtension<T> {
    fn unreachable(self) -> T;
}

impl<T> OptionExtension<T> for Option<T> {
    /// Acts similarly to [`Option::unwrap`] but with [`unreachable!`] in the none branch, to mark
    /// slots that are only vacated for the duration of a single call (like an accumulator being
    /// moved through a by-value fold).
    ///
    /// No panics section is used on purpose: calling this states that None is impossible.
    #[track_caller]
    fn unreachable(self) -> T {
        match self {
            Some(val) => val,
            None => unreachable!("vacated slot observed outside of the call that vacated it"),
        }
    }
}
