use crate::normalize::{description_preview, escape_for_display, primary_image, resolve_image_url};
use crate::{PageInfo, Product, ProductId, SortState};

/// Width of the numeric page-button window.
pub const PAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
}

/// A transient message for the user, one per outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub rows: Vec<ProductRowView>,
    pub page: PageInfo,
    pub page_buttons: PageButtons,
    pub search_term: String,
    pub sort: Option<SortState>,
    pub loading: bool,
    pub requests_in_flight: usize,
    pub detail: Option<ProductDetailView>,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

/// One table row. Text fields are already escaped for markup.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRowView {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub thumbnail_url: String,
    pub description_preview: String,
}

impl ProductRowView {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: escape_for_display(Some(&product.title)),
            price: product.price,
            category: escape_for_display(Some(product.category_name().unwrap_or("N/A"))),
            thumbnail_url: primary_image(product),
            description_preview: escape_for_display(Some(&description_preview(
                &product.description,
            ))),
        }
    }
}

/// Values for the detail/edit form. Form inputs take raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image_urls: Vec<String>,
}

impl ProductDetailView {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            description: product.description.clone(),
            category: product.category_name().unwrap_or("N/A").to_string(),
            image_urls: product
                .images
                .iter()
                .map(|raw| resolve_image_url(raw))
                .collect(),
        }
    }
}

/// Numeric page buttons: a window of up to [`PAGE_WINDOW`] pages around the
/// current one, with shortcuts to the first and last page when those fall
/// outside the window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageButtons {
    pub has_previous: bool,
    pub first: Option<usize>,
    pub leading_gap: bool,
    pub pages: Vec<usize>,
    pub trailing_gap: bool,
    pub last: Option<usize>,
    pub has_next: bool,
}

pub fn page_buttons(current_page: usize, total_pages: usize) -> PageButtons {
    if total_pages == 0 {
        return PageButtons::default();
    }
    let half = PAGE_WINDOW / 2;
    let mut start = current_page.saturating_sub(half).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    if end - start < PAGE_WINDOW - 1 {
        start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
    }

    PageButtons {
        has_previous: current_page > 1,
        first: (start > 1).then_some(1),
        leading_gap: start > 2,
        pages: (start..=end).collect(),
        trailing_gap: end + 1 < total_pages,
        last: (end < total_pages).then_some(total_pages),
        has_next: current_page < total_pages,
    }
}
