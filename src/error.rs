use derive_more::{Display, Error, IsVariant};

/// The result type returned by every fallible operation of this crate.
pub type Result<T, E = ListError> = std::result::Result<T, E>;

/// Every way an [`IndexedList`](crate::IndexedList) or a
/// [`Cursor`](crate::Cursor) operation can fail.
///
/// Errors are returned at the point of the offending call and the list is left
/// untouched. Nothing is retried internally.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum ListError {
    /// The operation requires at least one element.
    #[display("operation requires a non-empty list")]
    Empty,
    /// The index is outside the window accepted by the operation.
    #[display("index {index} out of range for list with {len} elements")]
    OutOfRange { index: usize, len: usize },
    /// No element equal to the requested value is in the list.
    #[display("no matching element in the list")]
    NotFound,
    /// `remove` or `set` was called on a cursor without an immediately
    /// preceding `next` or `previous`.
    #[display("cursor has no element to modify: call `next` or `previous` first")]
    NoPriorStep,
    /// `next` was called on a cursor positioned after the last element.
    #[display("cursor is at the end of the list")]
    EndOfSequence,
    /// `previous` was called on a cursor positioned before the first element.
    #[display("cursor is at the start of the list")]
    StartOfSequence,
    /// The list was structurally modified through another path since the
    /// cursor last synchronised with it, or the cursor belongs to another list.
    #[display("list was modified outside of this cursor")]
    ConcurrentChange,
}

impl ListError {
    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        ListError::OutOfRange { index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::ListError;

    #[test]
    fn error_display() {
        assert_eq!(
            ListError::out_of_range(4, 3).to_string(),
            "index 4 out of range for list with 3 elements"
        );
        assert_eq!(ListError::Empty.to_string(), "operation requires a non-empty list");
        assert_eq!(
            ListError::ConcurrentChange.to_string(),
            "list was modified outside of this cursor"
        );
    }

    #[test]
    fn error_variants() {
        assert!(ListError::NoPriorStep.is_no_prior_step());
        assert!(ListError::out_of_range(0, 0).is_out_of_range());
        assert!(!ListError::EndOfSequence.is_start_of_sequence());
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&ListError::NotFound);
    }
}
