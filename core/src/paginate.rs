//! Cursor-following fetch loop.
//!
//! Drains a paged endpoint into one accumulator. The page size is whatever the
//! endpoint returns; the loop only looks at the continuation cursor.

use std::collections::HashSet;
use std::future::Future;

use crate::error::FetchError;
use crate::types::CompletedTasks;

/// One page as seen by [`paginate`]. `next_cursor == None` means no more pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: T,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: T) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    pub fn more(items: T, next_cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(next_cursor.into()),
        }
    }
}

/// Accumulator a page drain appends into, in page order.
pub trait PageItems: Default {
    fn append_page(&mut self, page: Self);
}

impl<T> PageItems for Vec<T> {
    fn append_page(&mut self, mut page: Self) {
        self.append(&mut page);
    }
}

impl PageItems for CompletedTasks {
    fn append_page(&mut self, page: Self) {
        self.merge(page);
    }
}

/// Call `fetch_page` with `None`, then with each returned cursor, until a page
/// comes back without one. The first error is returned as is; nothing collected
/// so far is kept.
pub async fn paginate<T, F, Fut>(mut fetch_page: F) -> Result<T, FetchError>
where
    T: PageItems,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, FetchError>>,
{
    let mut acc = T::default();
    let mut requested: HashSet<String> = HashSet::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(cursor.take()).await?;
        pages += 1;
        acc.append_page(page.items);

        match page.next_cursor.filter(|c| !c.is_empty()) {
            Some(next) => {
                if !requested.insert(next.clone()) {
                    return Err(FetchError::RepeatedCursor(next));
                }
                cursor = Some(next);
            }
            None => break,
        }
    }

    tracing::trace!(target: "taskexport.paginate", stage = "paginate.done", pages = pages);
    Ok(acc)
}
