use crate::{
    CatalogError, CreateForm, EditForm, Product, ProductFields, ProductId, SortKey,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Startup, or the user asked to reload the whole catalog.
    LoadRequested,
    /// Engine completion for a catalog read.
    CatalogLoaded(Result<Vec<Product>, CatalogError>),
    /// User edited the search box.
    SearchChanged(String),
    /// User clicked a sortable column header.
    SortToggled(SortKey),
    /// User picked a new page size.
    PageSizeChanged(usize),
    /// User clicked a page button.
    PageRequested(usize),
    /// User clicked Export; `date` is today's ISO calendar date.
    ExportRequested { date: String },
    /// Driver finished writing an export: the written path, or why it failed.
    ExportFinished(Result<String, String>),
    /// User opened the detail view of a row.
    DetailRequested(ProductId),
    /// User dismissed the detail view.
    DetailClosed,
    /// User submitted the create form.
    CreateSubmitted(CreateForm),
    /// Engine completion for a create.
    ProductCreated(Result<Product, CatalogError>),
    /// User saved the edit form of a product.
    EditSubmitted { id: ProductId, form: EditForm },
    /// Engine completion for an update.
    ProductUpdated {
        id: ProductId,
        result: Result<ProductFields, CatalogError>,
    },
    /// Render tick to coalesce redraws.
    Tick,
    NoOp,
}
