//! Cursor-based pagination
//!
//! Both DynamoDB scans and Cognito user listings hand back one page at a
//! time plus an opaque cursor. [`fetch_all_pages`] drains such a source into
//! a single ordered vector.

use std::future::Future;

/// One page of results and the cursor for the next page, if any
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T, C> {
    pub items: Vec<T>,
    pub next_cursor: Option<C>,
}

impl<T, C> Page<T, C> {
    /// A page with a follow-up cursor
    pub fn new(items: Vec<T>, next_cursor: Option<C>) -> Self {
        Self { items, next_cursor }
    }

    /// A final page
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }
}

/// Fetch every page and concatenate the items in page order
///
/// `fetch_page` is called with `None` first, then with each returned cursor,
/// until a page comes back without one. Empty pages that still carry a
/// cursor do not stop the loop. The first error is returned as is; nothing
/// is retried here.
///
/// # Examples
///
/// ```
/// use crowsnest_export::core::pagination::{fetch_all_pages, Page};
///
/// # #[tokio::main]
/// # async fn main() {
/// let all = fetch_all_pages(|cursor: Option<u32>| async move {
///     Ok::<_, String>(match cursor {
///         None => Page::new(vec![1, 2], Some(1)),
///         Some(1) => Page::new(vec![], Some(2)),
///         Some(_) => Page::last(vec![3]),
///     })
/// })
/// .await
/// .unwrap();
/// assert_eq!(all, vec![1, 2, 3]);
/// # }
/// ```
pub async fn fetch_all_pages<T, C, E, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<C>) -> Fut,
    Fut: Future<Output = Result<Page<T, C>, E>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(cursor.take()).await?;
        pages += 1;
        items.extend(page.items);

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::debug!(pages, items = items.len(), "Pagination complete");

    Ok(items)
}
