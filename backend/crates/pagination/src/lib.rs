//! Page request and page envelope primitives shared by backend endpoints.
//!
//! Listing endpoints address pages by a zero-based index and a page size.
//! [`PageRequest`] validates both values once at the edge, and [`Page`]
//! carries one page of items together with the total item count so adapters
//! can report `totalPages` and `totalRecords` without recomputing offsets.
//!
//! # Examples
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::try_new(1, 2, 100).expect("valid request");
//! assert_eq!(request.offset(), 2);
//!
//! let page = Page::new(vec!["c", "d"], 5, request);
//! assert_eq!(page.total_pages(), 3);
//! ```

mod page;
mod request;

pub use page::Page;
pub use request::{PageRequest, PageRequestError};
