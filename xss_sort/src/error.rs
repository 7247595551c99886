use thiserror::Error;

use crate::api::ElementType;

/// Precondition violations reported by the checked entry points on
/// [`crate::ArrayMut`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("fromIndex({from}) > toIndex({to})")]
    InvertedRange { from: usize, to: usize },

    #[error("Array index out of range: {index} (length {len})")]
    OutOfBounds { index: usize, len: usize },

    #[error("pivot index {index} outside range [{from}, {to})")]
    PivotOutOfRange { index: usize, from: usize, to: usize },

    #[error("pivot at {pivot_index1} is greater than pivot at {pivot_index2}")]
    UnorderedPivots {
        pivot_index1: usize,
        pivot_index2: usize,
    },

    #[error("unsupported element type tag {0}")]
    UnsupportedElementType(u8),

    #[error("element type {expected:?} does not match a {actual:?} array")]
    ElementTypeMismatch {
        expected: ElementType,
        actual: ElementType,
    },
}

pub type Result<T> = std::result::Result<T, SortError>;
