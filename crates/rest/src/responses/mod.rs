//! Response formatting.
//!
//! - [`envelope`] - `{message, data}` and paged `{message, next_pagination, data}` bodies

pub mod envelope;

pub use envelope::{DataResponse, Empty, PageResponse, UuidData, data, empty, page};
