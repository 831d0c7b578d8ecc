use crate::view_model::{page_buttons, AppViewModel, Notice, ProductDetailView, ProductRowView};
use crate::{ListPipeline, ProductId, ValidationError};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pipeline: ListPipeline,
    pending_loads: usize,
    pending_writes: usize,
    selected: Option<ProductId>,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pipeline: ListPipeline::with_page_size(page_size),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let page = self.pipeline.page_info();
        AppViewModel {
            rows: self
                .pipeline
                .current_page_items()
                .into_iter()
                .map(ProductRowView::from_product)
                .collect(),
            page,
            page_buttons: page_buttons(page.current_page, page.total_pages),
            search_term: self.pipeline.search_term().to_string(),
            sort: self.pipeline.sort(),
            loading: self.pending_loads > 0,
            requests_in_flight: self.pending_loads + self.pending_writes,
            detail: self
                .selected
                .and_then(|id| self.pipeline.find(id))
                .map(ProductDetailView::from_product),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub fn pipeline(&self) -> &ListPipeline {
        &self.pipeline
    }

    /// Number of engine requests not yet answered.
    pub fn requests_in_flight(&self) -> usize {
        self.pending_loads + self.pending_writes
    }

    /// Returns whether anything changed since the last call, and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn pipeline_mut(&mut self) -> &mut ListPipeline {
        self.dirty = true;
        &mut self.pipeline
    }

    /// Out-of-range pages are rejected without marking the state dirty.
    pub(crate) fn go_to_page(&mut self, page: usize) -> Result<(), ValidationError> {
        self.pipeline.go_to_page(page)?;
        self.dirty = true;
        Ok(())
    }

    pub(crate) fn begin_load(&mut self) {
        self.pending_loads += 1;
        self.dirty = true;
    }

    pub(crate) fn finish_load(&mut self) {
        self.pending_loads = self.pending_loads.saturating_sub(1);
        self.dirty = true;
    }

    pub(crate) fn begin_write(&mut self) {
        self.pending_writes += 1;
        self.dirty = true;
    }

    pub(crate) fn finish_write(&mut self) {
        self.pending_writes = self.pending_writes.saturating_sub(1);
        self.dirty = true;
    }

    pub(crate) fn selected(&self) -> Option<ProductId> {
        self.selected
    }

    pub(crate) fn select(&mut self, id: Option<ProductId>) {
        self.selected = id;
        self.dirty = true;
    }

    /// Drops the last notice; marks dirty only when one was showing.
    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.dirty = true;
    }
}
