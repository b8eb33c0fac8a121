//! Hard filters, ordering and pagination.
//!
//! Filters are a pure predicate over catalog items. They run before scoring
//! (so rejected items never influence normalization) and the pipeline never
//! re-admits an item that fails them.

pub mod pagination;
pub mod predicate;
pub mod sort;

pub use pagination::{MAX_PAGE_LIMIT, paginate, paginate_with_max};
pub use predicate::{SearchFilters, apply};
pub use sort::{SortBy, sort_candidates};
