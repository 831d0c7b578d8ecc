use std::cmp::Ordering;

use catalog_logging::catalog_debug;

use crate::error::{Field, ValidationError};
use crate::{Product, ProductFields, ProductId};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Title,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Page bookkeeping for the current derived view. `start_item`/`end_item`
/// are the 1-based inclusive display range, both 0 when the view is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub start_item: usize,
    pub end_item: usize,
}

/// The authoritative product list plus the search/sort/page inputs of its
/// derived view.
///
/// The derived view is stored as indices into the snapshot and rebuilt from
/// scratch by every mutator; it is never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPipeline {
    snapshot: Vec<Product>,
    search_term: String,
    sort: Option<SortState>,
    page_size: usize,
    current_page: usize,
    derived: Vec<usize>,
}

impl Default for ListPipeline {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ListPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero page size falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            snapshot: Vec::new(),
            search_term: String::new(),
            sort: None,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            current_page: 1,
            derived: Vec::new(),
        }
    }

    /// Replace the snapshot wholesale and reset search, sort and page.
    pub fn load(&mut self, products: Vec<Product>) {
        self.snapshot = products;
        self.search_term.clear();
        self.sort = None;
        self.current_page = 1;
        self.recompute();
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.trim().to_lowercase();
        self.current_page = 1;
        self.recompute();
    }

    /// Same key flips direction; a new key starts ascending. Keeps the page.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = Some(match self.sort {
            Some(current) if current.key == key => SortState {
                key,
                direction: current.direction.flipped(),
            },
            _ => SortState {
                key,
                direction: SortDirection::Ascending,
            },
        });
        self.recompute();
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::new(
                Field::PageSize,
                "must be a positive integer",
            ));
        }
        self.page_size = page_size;
        self.current_page = 1;
        Ok(())
    }

    /// Rejects pages outside `1..=total_pages` and leaves state untouched.
    pub fn go_to_page(&mut self, page: usize) -> Result<(), ValidationError> {
        let total_pages = self.total_pages();
        if page < 1 || page > total_pages {
            return Err(ValidationError::new(
                Field::Page,
                format!("page {page} is outside 1..={total_pages}"),
            ));
        }
        self.current_page = page;
        Ok(())
    }

    /// Integrate a server-confirmed create: prepend and return to page 1.
    pub fn create_local(&mut self, product: Product) {
        self.snapshot.insert(0, product);
        self.current_page = 1;
        self.recompute();
    }

    /// Integrate a server-confirmed update by merging `fields` over the
    /// record with `id`. Returns `false` when no such record is known.
    pub fn update_local(&mut self, id: ProductId, fields: ProductFields) -> bool {
        let Some(existing) = self.snapshot.iter_mut().find(|product| product.id == id) else {
            return false;
        };
        existing.merge(fields);
        self.recompute();
        true
    }

    pub fn current_page_items(&self) -> Vec<&Product> {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.derived.len());
        self.derived
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|&index| &self.snapshot[index])
            .collect()
    }

    pub fn derived_view(&self) -> Vec<&Product> {
        self.derived
            .iter()
            .map(|&index| &self.snapshot[index])
            .collect()
    }

    pub fn page_info(&self) -> PageInfo {
        let total_items = self.derived.len();
        let (start_item, end_item) = if total_items == 0 {
            (0, 0)
        } else {
            (
                (self.current_page - 1) * self.page_size + 1,
                (self.current_page * self.page_size).min(total_items),
            )
        };
        PageInfo {
            current_page: self.current_page,
            total_pages: self.total_pages(),
            items_per_page: self.page_size,
            total_items,
            start_item,
            end_item,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.derived.len().div_ceil(self.page_size)
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.snapshot.iter().find(|product| product.id == id)
    }

    pub fn snapshot(&self) -> &[Product] {
        &self.snapshot
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    fn recompute(&mut self) {
        self.derived = derive_view(&self.snapshot, &self.search_term, self.sort);
        let last_page = self.total_pages().max(1);
        self.current_page = self.current_page.clamp(1, last_page);
        catalog_debug!(
            "recomputed view: {} of {} products, term={:?}, sort={:?}",
            self.derived.len(),
            self.snapshot.len(),
            self.search_term,
            self.sort
        );
    }
}

/// `sort(filter(snapshot, term), sort)` as indices into `snapshot`.
fn derive_view(snapshot: &[Product], term: &str, sort: Option<SortState>) -> Vec<usize> {
    let mut indices: Vec<usize> = snapshot
        .iter()
        .enumerate()
        .filter(|(_, product)| term.is_empty() || product.title.to_lowercase().contains(term))
        .map(|(index, _)| index)
        .collect();

    if let Some(SortState { key, direction }) = sort {
        // `sort_by` is stable, so ties keep snapshot order.
        indices.sort_by(|&a, &b| {
            let ordering = compare_by(&snapshot[a], &snapshot[b], key);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    indices
}

fn compare_by(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Price => a.price.total_cmp(&b.price),
    }
}
