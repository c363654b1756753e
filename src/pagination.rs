use serde::{Deserialize, Serialize};

/// One bounded slice of an ordered collection, plus enough metadata to
/// render pager controls.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// `?page=` query parameter for the listing endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

impl PageQuery {
    pub fn number(&self) -> usize {
        self.page.unwrap_or(1)
    }
}

/// Slices `items` into the requested fixed-size page. Out-of-range page
/// numbers clamp into `[1, total_pages]`; an empty collection still yields
/// one (empty) page rather than an error.
pub fn paginate<T>(items: Vec<T>, page_size: usize, page_number: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = usize::max(1, total_items.div_ceil(page_size));
    let number = page_number.clamp(1, total_pages);

    let items: Vec<T> = items
        .into_iter()
        .skip((number - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        number,
        total_pages,
        total_items,
        has_next: number < total_pages,
        has_previous: number > 1,
    }
}
