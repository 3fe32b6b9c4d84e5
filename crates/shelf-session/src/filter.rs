//! Search filtering over book lists.
//!
//! A pure projection: no store access, no caching, no mutation. The session
//! recomputes it whenever the query or the authoritative list changes.

use std::borrow::Cow;

use shelf_types::Book;

/// Filter a book list by case-insensitive substring match on the title.
///
/// An empty or whitespace-only query returns the input list itself
/// (borrowed identity, not a copy). The result is always a stable
/// subsequence of the input: order-preserving, no duplicates introduced.
pub fn filter_books<'a>(query: &str, books: &'a [Book]) -> Cow<'a, [Book]> {
    if query.trim().is_empty() {
        return Cow::Borrowed(books);
    }
    let needle = query.to_lowercase();
    Cow::Owned(
        books
            .iter()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}
