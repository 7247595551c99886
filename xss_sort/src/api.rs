//! Entry points.
//!
//! The generic functions panic on bad indices, like slice indexing does. The
//! [`ArrayMut`] methods check the same preconditions and report them as
//! [`SortError`] instead.

use std::sync::Once;

use crate::error::{Result, SortError};
use crate::platform::{simd_level, SimdSort};

static BACKEND_LOGGED: Once = Once::new();

#[inline]
fn log_backend() {
    BACKEND_LOGGED.call_once(|| log::debug!("xss-sort bound to the {:?} backend", simd_level()));
}

/// Element type of a sortable array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// `i32`
    Int,
    /// `i64`
    Long,
    /// `f32`
    Float,
    /// `f64`
    Double,
}

impl ElementType {
    /// Basic-type code the runtime uses for this element type.
    pub const fn tag(self) -> u8 {
        match self {
            ElementType::Float => 6,
            ElementType::Double => 7,
            ElementType::Int => 10,
            ElementType::Long => 11,
        }
    }
}

impl TryFrom<u8> for ElementType {
    type Error = SortError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            6 => Ok(ElementType::Float),
            7 => Ok(ElementType::Double),
            10 => Ok(ElementType::Int),
            11 => Ok(ElementType::Long),
            _ => Err(SortError::UnsupportedElementType(tag)),
        }
    }
}

/// Sorts `data` ascending in place.
///
/// Not stable. Floats end up in IEEE total order (`-0.0` before `0.0`) with
/// every NaN moved to the end of the slice; NaN payloads are kept.
pub fn sort<T: SimdSort>(data: &mut [T]) {
    log_backend();
    T::simd_sort(data)
}

/// Sorts `array[from_index..to_index]` ascending in place.
///
/// # Panics
///
/// If `from_index > to_index` or `to_index > array.len()`.
pub fn sort_range<T: SimdSort>(array: &mut [T], from_index: usize, to_index: usize) {
    sort(&mut array[from_index..to_index])
}

/// One partition pass over `array[from_index..to_index]`, without recursing.
///
/// With distinct pivot indices the values `p1 = array[pivot_index1]` and
/// `p2 = array[pivot_index2]` must satisfy `p1 <= p2`. The returned
/// `[lower, upper]` are absolute indices with `array[lower] == p1`,
/// `array[upper] == p2`, everything before `lower` below `p1`, everything
/// between the two in `[p1, p2]` and everything after `upper` above `p2`.
///
/// With `pivot_index1 == pivot_index2` the range is split around the single
/// pivot `p` into `[from, lower) < p`, `[lower, upper) == p` and
/// `[upper, to) > p`.
///
/// An empty range returns `[from_index, from_index]`. Float ranges must not
/// contain NaN; this is only checked in debug builds.
///
/// # Panics
///
/// If the range is invalid for `array`, or a pivot index of a non-empty
/// range lies outside it.
pub fn partition<T: SimdSort>(
    array: &mut [T],
    from_index: usize,
    to_index: usize,
    pivot_index1: usize,
    pivot_index2: usize,
) -> [usize; 2] {
    log_backend();
    let range = &mut array[from_index..to_index];
    if range.is_empty() {
        return [from_index, from_index];
    }
    for index in [pivot_index1, pivot_index2] {
        assert!(
            (from_index..to_index).contains(&index),
            "pivot index {} outside range [{}, {})",
            index,
            from_index,
            to_index
        );
    }
    let [lower, upper] = T::simd_partition(range, pivot_index1 - from_index, pivot_index2 - from_index);
    [from_index + lower, from_index + upper]
}

fn check_range(len: usize, from: usize, to: usize) -> Result<()> {
    if from > to {
        return Err(SortError::InvertedRange { from, to });
    }
    if to > len {
        return Err(SortError::OutOfBounds { index: to, len });
    }
    Ok(())
}

fn check_pivot(index: usize, from: usize, to: usize) -> Result<()> {
    if (from..to).contains(&index) {
        Ok(())
    } else {
        Err(SortError::PivotOutOfRange { index, from, to })
    }
}

/// A mutable array of any supported element type.
#[derive(Debug)]
pub enum ArrayMut<'a> {
    Int(&'a mut [i32]),
    Long(&'a mut [i64]),
    Float(&'a mut [f32]),
    Double(&'a mut [f64]),
}

macro_rules! with_array {
    ($array: expr, $data: ident => $body: expr) => {
        match $array {
            ArrayMut::Int($data) => $body,
            ArrayMut::Long($data) => $body,
            ArrayMut::Float($data) => $body,
            ArrayMut::Double($data) => $body,
        }
    };
}

impl<'a> ArrayMut<'a> {
    pub fn element_type(&self) -> ElementType {
        match self {
            ArrayMut::Int(_) => ElementType::Int,
            ArrayMut::Long(_) => ElementType::Long,
            ArrayMut::Float(_) => ElementType::Float,
            ArrayMut::Double(_) => ElementType::Double,
        }
    }

    pub fn len(&self) -> usize {
        with_array!(self, data => data.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checked [`sort_range`].
    pub fn sort(&mut self, from_index: usize, to_index: usize) -> Result<()> {
        check_range(self.len(), from_index, to_index)?;
        with_array!(self, data => sort_range(&mut **data, from_index, to_index));
        Ok(())
    }

    /// Checked [`partition`]; the boundaries are written to
    /// `out_pivot_indices`.
    ///
    /// Range, pivot indices and pivot order (`p1 <= p2`) are checked. A NaN
    /// inside a float range is not: it is only caught by a debug assertion,
    /// and release builds return meaningless zones for it.
    pub fn partition(
        &mut self,
        from_index: usize,
        to_index: usize,
        out_pivot_indices: &mut [usize; 2],
        pivot_index1: usize,
        pivot_index2: usize,
    ) -> Result<()> {
        check_range(self.len(), from_index, to_index)?;
        if from_index < to_index {
            check_pivot(pivot_index1, from_index, to_index)?;
            check_pivot(pivot_index2, from_index, to_index)?;
            let ordered = with_array!(self, data => data[pivot_index1] <= data[pivot_index2]);
            if pivot_index1 != pivot_index2 && !ordered {
                return Err(SortError::UnorderedPivots {
                    pivot_index1,
                    pivot_index2,
                });
            }
        }
        *out_pivot_indices = with_array!(
            self,
            data => partition(&mut **data, from_index, to_index, pivot_index1, pivot_index2)
        );
        Ok(())
    }
}

impl<'a> From<&'a mut [i32]> for ArrayMut<'a> {
    fn from(data: &'a mut [i32]) -> Self {
        ArrayMut::Int(data)
    }
}

impl<'a> From<&'a mut [i64]> for ArrayMut<'a> {
    fn from(data: &'a mut [i64]) -> Self {
        ArrayMut::Long(data)
    }
}

impl<'a> From<&'a mut [f32]> for ArrayMut<'a> {
    fn from(data: &'a mut [f32]) -> Self {
        ArrayMut::Float(data)
    }
}

impl<'a> From<&'a mut [f64]> for ArrayMut<'a> {
    fn from(data: &'a mut [f64]) -> Self {
        ArrayMut::Double(data)
    }
}

/// Sorts `array[from_index..to_index]`, checking that `element_type` names
/// the array's element type.
pub fn sort_array(
    mut array: ArrayMut<'_>,
    element_type: ElementType,
    from_index: usize,
    to_index: usize,
) -> Result<()> {
    check_element_type(&array, element_type)?;
    array.sort(from_index, to_index)
}

/// Partitions `array[from_index..to_index]` into `out_pivot_indices`,
/// checking that `element_type` names the array's element type.
pub fn partition_array(
    mut array: ArrayMut<'_>,
    element_type: ElementType,
    from_index: usize,
    to_index: usize,
    out_pivot_indices: &mut [usize; 2],
    pivot_index1: usize,
    pivot_index2: usize,
) -> Result<()> {
    check_element_type(&array, element_type)?;
    array.partition(from_index, to_index, out_pivot_indices, pivot_index1, pivot_index2)
}

fn check_element_type(array: &ArrayMut<'_>, expected: ElementType) -> Result<()> {
    let actual = array.element_type();
    if actual == expected {
        Ok(())
    } else {
        Err(SortError::ElementTypeMismatch { expected, actual })
    }
}
