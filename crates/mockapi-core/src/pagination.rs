// ABOUTME: Offset pagination (page/limit) for catalog listings and cursor pagination for membership lists.
// ABOUTME: Also provides the lenient integer parsing used for query parameters.

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 8;
pub const DEFAULT_CURSOR_SIZE: usize = 20;

/// Parse the leading decimal digits of `raw` (after optional whitespace and `+`).
/// Returns None for empty, non-numeric, or zero values so callers fall back to defaults.
pub fn parse_lenient(raw: Option<&str>) -> Option<usize> {
    let trimmed = raw?.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<usize>().ok().filter(|n| *n > 0)
}

/// One page of an offset-paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetPage<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

/// Slice `items` to page `page` of size `limit`. Both must be at least 1.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> OffsetPage<T> {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(limit);
    let offset = (page - 1).saturating_mul(limit);
    let items: Vec<T> = items.into_iter().skip(offset).take(limit).collect();

    OffsetPage {
        items,
        total,
        page,
        limit,
        total_pages,
        has_more: page < total_pages,
    }
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

/// Cursor pagination keyed by `key`. The page starts right after the row whose key
/// equals `cursor` (or at the beginning when the cursor is absent or unknown).
///
/// `next_cursor` is the key of the last row returned here, which is what a client
/// passes back to continue. It is None once the page reaches the end of the list.
pub fn cursor_page<T: Clone>(
    rows: &[T],
    cursor: Option<&str>,
    size: usize,
    key: impl Fn(&T) -> &str,
) -> CursorPage<T> {
    let size = size.max(1);
    let start = cursor
        .filter(|c| !c.is_empty())
        .and_then(|c| rows.iter().position(|row| key(row) == c))
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let end = start.saturating_add(size).min(rows.len());
    let items = rows[start.min(rows.len())..end].to_vec();
    let next_cursor = (end < rows.len()).then(|| key(&rows[end - 1]).to_string());

    CursorPage { items, next_cursor }
}
