use crate::error::{Field, ValidationError};
use crate::{Product, ProductDraft, ProductPatch, DEFAULT_DESCRIPTION};

pub const MIN_TITLE_CHARS: usize = 3;
pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const MIN_PRICE: f64 = 1.0;

/// Category sent on edit when the existing record has none.
pub const FALLBACK_CATEGORY_ID: u64 = 1;

/// Images sent on edit when the existing record has none.
pub const FALLBACK_IMAGE: &str = "https://placehold.co/600x400";

/// Raw text of the create form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateForm {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category_id: String,
    /// One URL per line.
    pub images: String,
}

/// Raw text of the edit form. Category and images are not editable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditForm {
    pub title: String,
    pub price: String,
    pub description: String,
}

pub fn validate_create(form: &CreateForm) -> Result<ProductDraft, ValidationError> {
    let title = validate_title(&form.title)?;
    let price = validate_price(&form.price)?;

    let description = form.description.trim();
    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::new(
            Field::Description,
            format!("must be at least {MIN_DESCRIPTION_CHARS} characters"),
        ));
    }

    let category_id = match form.category_id.trim().parse::<u64>() {
        Ok(id) if id > 0 => id,
        _ => {
            return Err(ValidationError::new(
                Field::Category,
                "a category must be selected",
            ))
        }
    };

    let images: Vec<String> = form
        .images
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    if images.is_empty() {
        return Err(ValidationError::new(
            Field::Images,
            "at least one image URL is required",
        ));
    }

    Ok(ProductDraft {
        title,
        price,
        description: description.to_string(),
        category_id,
        images,
    })
}

/// Build the full replacement body for an edit. Category and images come
/// from `existing` so the service does not clear them.
pub fn validate_edit(
    form: &EditForm,
    existing: Option<&Product>,
) -> Result<ProductPatch, ValidationError> {
    let title = validate_title(&form.title)?;
    let price = validate_price(&form.price)?.round();

    let description = match form.description.trim() {
        "" => DEFAULT_DESCRIPTION.to_string(),
        text => text.to_string(),
    };

    let category_id = existing
        .and_then(|product| product.category.as_ref())
        .map(|category| category.id)
        .unwrap_or(FALLBACK_CATEGORY_ID);

    let images = match existing {
        Some(product) if !product.images.is_empty() => product.images.clone(),
        _ => vec![FALLBACK_IMAGE.to_string()],
    };

    Ok(ProductPatch {
        title,
        price,
        description,
        category_id,
        images,
    })
}

fn validate_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.chars().count() < MIN_TITLE_CHARS {
        return Err(ValidationError::new(
            Field::Title,
            format!("must be at least {MIN_TITLE_CHARS} characters"),
        ));
    }
    Ok(title.to_string())
}

fn validate_price(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= MIN_PRICE => Ok(price),
        _ => Err(ValidationError::new(
            Field::Price,
            format!("must be a number of at least {MIN_PRICE}"),
        )),
    }
}
