//! Catalog core: product model, list pipeline, and the pure state machine
//! that drives the dashboard.
mod effect;
mod error;
mod export;
mod msg;
mod normalize;
mod pipeline;
mod product;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use error::{CatalogError, Field, ValidationError};
pub use export::{csv_filename, to_csv};
pub use msg::Msg;
pub use normalize::{
    description_preview, escape_for_display, primary_image, resolve_image_url,
    DESCRIPTION_PREVIEW_CHARS, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_THUMBNAIL,
};
pub use pipeline::{
    ListPipeline, PageInfo, SortDirection, SortKey, SortState, DEFAULT_PAGE_SIZE,
};
pub use product::{
    Category, Product, ProductDraft, ProductFields, ProductId, ProductPatch, DEFAULT_DESCRIPTION,
};
pub use state::AppState;
pub use update::update;
pub use validate::{
    validate_create, validate_edit, CreateForm, EditForm, FALLBACK_CATEGORY_ID, FALLBACK_IMAGE,
};
pub use view_model::{
    page_buttons, AppViewModel, Notice, PageButtons, ProductDetailView, ProductRowView, Severity,
    PAGE_WINDOW,
};
