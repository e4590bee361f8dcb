//! The `from`/`size` windowing contract shared by every listing endpoint.

use serde::Deserialize;
use thiserror::Error;
use utoipa::IntoParams;

/// Raw paging query parameters as they arrive on the wire.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// Index of the first element to show, starting at 0
    pub from: Option<i32>,
    /// Number of elements per page
    pub size: Option<i32>,
}

/// A resolved result window: skip `offset` rows, take `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Invalid paging format: 'from' (the index of the first element, starting at 0) \
     and 'size' (the number of elements to show) must be positive numbers"
)]
pub struct PageParamsError;

impl PageParams {
    pub fn new(from: Option<i32>, size: Option<i32>) -> Self {
        Self { from, size }
    }

    /// Resolve the paging contract.
    ///
    /// - either parameter absent: no paging, full result set
    /// - `from == 0 && size == 0`, or either negative, or `size == 0`:
    ///   [`PageParamsError`]
    /// - otherwise: the window starts at page `from / size` of length `size`,
    ///   i.e. `offset = (from / size) * size` (floor division, NOT a plain
    ///   offset: `from = 5, size = 3` lands on offset 3)
    ///
    /// The floor-division behavior is a compatibility contract with existing
    /// clients and must not be "fixed" into offset pagination.
    pub fn window(&self) -> Result<Option<PageWindow>, PageParamsError> {
        let (from, size) = match (self.from, self.size) {
            (Some(from), Some(size)) => (from, size),
            _ => return Ok(None),
        };
        if from < 0 || size <= 0 {
            return Err(PageParamsError);
        }
        let page = from / size;
        Ok(Some(PageWindow {
            offset: (page * size) as usize,
            limit: size as usize,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_params_mean_unpaged() {
        assert_eq!(PageParams::new(None, None).window(), Ok(None));
        assert_eq!(PageParams::new(Some(3), None).window(), Ok(None));
        assert_eq!(PageParams::new(None, Some(5)).window(), Ok(None));
    }

    #[test]
    fn zero_zero_is_rejected() {
        assert_eq!(PageParams::new(Some(0), Some(0)).window(), Err(PageParamsError));
    }

    #[test]
    fn negatives_are_rejected() {
        assert_eq!(PageParams::new(Some(-1), Some(5)).window(), Err(PageParamsError));
        assert_eq!(PageParams::new(Some(3), Some(-1)).window(), Err(PageParamsError));
    }

    #[test]
    fn zero_size_with_positive_from_is_rejected() {
        assert_eq!(PageParams::new(Some(5), Some(0)).window(), Err(PageParamsError));
    }

    #[test]
    fn floor_division_windowing() {
        // from=0 size=10: first page
        assert_eq!(
            PageParams::new(Some(0), Some(10)).window(),
            Ok(Some(PageWindow { offset: 0, limit: 10 }))
        );
        // from=5 size=3: page 1 of length 3 -> offset 3, not 5
        assert_eq!(
            PageParams::new(Some(5), Some(3)).window(),
            Ok(Some(PageWindow { offset: 3, limit: 3 }))
        );
        // from=9 size=3: page 3 -> offset 9
        assert_eq!(
            PageParams::new(Some(9), Some(3)).window(),
            Ok(Some(PageWindow { offset: 9, limit: 3 }))
        );
        // from smaller than size: page 0
        assert_eq!(
            PageParams::new(Some(2), Some(10)).window(),
            Ok(Some(PageWindow { offset: 0, limit: 10 }))
        );
    }
}
