//! Validated page addressing.

use serde::{Deserialize, Serialize};

/// Errors raised while validating a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The page index was negative.
    #[error("page index must not be negative (got {index})")]
    NegativeIndex {
        /// Rejected page index.
        index: i64,
    },
    /// The page size was zero or negative.
    #[error("page size must be at least 1 (got {size})")]
    SizeTooSmall {
        /// Rejected page size.
        size: i64,
    },
    /// The page size exceeded the configured ceiling.
    #[error("page size must be at most {max} (got {size})")]
    SizeTooLarge {
        /// Rejected page size.
        size: i64,
        /// Largest accepted page size.
        max: u32,
    },
}

/// Zero-based page index plus page size.
///
/// ## Invariants
/// - `size` is between 1 and the ceiling supplied at construction.
/// - `index * size` fits in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    index: u32,
    size: u32,
}

impl PageRequest {
    /// Validate raw query values against a maximum page size.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when the index is negative or the size is
    /// outside `1..=max_size`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PageRequestError};
    ///
    /// assert!(PageRequest::try_new(0, 100, 1000).is_ok());
    /// assert_eq!(
    ///     PageRequest::try_new(0, 0, 1000),
    ///     Err(PageRequestError::SizeTooSmall { size: 0 })
    /// );
    /// ```
    pub fn try_new(index: i64, size: i64, max_size: u32) -> Result<Self, PageRequestError> {
        if index < 0 {
            return Err(PageRequestError::NegativeIndex { index });
        }
        if size < 1 {
            return Err(PageRequestError::SizeTooSmall { size });
        }
        let bounded_size = u32::try_from(size)
            .ok()
            .filter(|candidate| *candidate <= max_size)
            .ok_or(PageRequestError::SizeTooLarge {
                size,
                max: max_size,
            })?;
        // Indexes beyond u32 can never address a stored row; clamp so offsets
        // stay representable and the page simply comes back empty.
        let bounded_index = u32::try_from(index).unwrap_or(u32::MAX);
        Ok(Self {
            index: bounded_index,
            size: bounded_size,
        })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Number of items per page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.index as u64 * self.size as u64
    }
}
