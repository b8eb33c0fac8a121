//! Offset/limit windowing over a ranked list.

/// Hard cap on the page size a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Return the `[offset, offset + limit)` window of `ranked` and the total
/// length before pagination. `limit` is clamped to [`MAX_PAGE_LIMIT`].
pub fn paginate<T>(ranked: &[T], offset: u32, limit: u32) -> (&[T], u32) {
    paginate_with_max(ranked, offset, limit, MAX_PAGE_LIMIT)
}

/// Like [`paginate`] with a caller-supplied page size cap.
pub fn paginate_with_max<T>(ranked: &[T], offset: u32, limit: u32, max_limit: u32) -> (&[T], u32) {
    let total = u32::try_from(ranked.len()).unwrap_or(u32::MAX);
    let limit = limit.min(max_limit) as usize;
    let start = (offset as usize).min(ranked.len());
    let end = start.saturating_add(limit).min(ranked.len());
    (&ranked[start..end], total)
}
