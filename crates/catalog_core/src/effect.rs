use crate::{ProductDraft, ProductId, ProductPatch};

/// Side effects requested by [`crate::update`]; executed by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchCatalog,
    CreateProduct(ProductDraft),
    UpdateProduct { id: ProductId, patch: ProductPatch },
    WriteExport { filename: String, contents: String },
}
