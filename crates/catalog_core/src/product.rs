use serde::{Deserialize, Deserializer, Serialize};

pub type ProductId = u64;

/// Description shown and sent when a record carries none.
pub const DEFAULT_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// A catalog record as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default = "default_description", deserialize_with = "description_or_default")]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

impl Product {
    /// Name of the category, or `None` when it is missing or blank.
    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|category| category.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Overlays every field present in `fields`; absent fields keep their
    /// current value.
    pub fn merge(&mut self, fields: ProductFields) {
        let ProductFields {
            id,
            title,
            price,
            description,
            category,
            images,
        } = fields;
        if let Some(id) = id {
            self.id = id;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(category) = category {
            self.category = Some(category);
        }
        if let Some(images) = images {
            self.images = images;
        }
    }
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

/// The service sends `null` for a missing description.
fn description_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_description))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A possibly partial product record, as returned by an update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductFields {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

/// Outbound body for `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: u64,
    pub images: Vec<String>,
}

/// Outbound body for `PUT /products/{id}`. A full replacement of the mutable
/// fields, so category and images are always sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: u64,
    pub images: Vec<String>,
}
