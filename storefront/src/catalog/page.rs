use serde::Serialize;

/// Products shown per catalog page
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// One page of a listing. Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Cut `page` out of `items`. Out-of-range pages come back empty.
    pub fn paginate(items: Vec<T>, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(page_size);

        let items = match page.checked_sub(1) {
            Some(index) if index < total_pages => items
                .into_iter()
                .skip(index * page_size)
                .take(page_size)
                .collect(),
            _ => Vec::new(),
        };

        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.page <= self.total_pages
    }
}
