use crate::Product;

const CSV_HEADER: &str = "id,title,price,category";

/// Serialize `rows` as CSV with columns `id,title,price,category`.
///
/// The header is always present. Title and category are quoted with inner
/// quotes doubled; a missing category is written as `N/A`. Every line ends
/// with `\n`.
pub fn to_csv(rows: &[&Product]) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + rows.len() * 48);
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for product in rows {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            product.id,
            quote(&product.title),
            product.price,
            quote(product.category_name().unwrap_or("N/A")),
        ));
    }
    csv
}

/// `products_page{page}_{date}.csv`, where `date` is an ISO calendar date.
pub fn csv_filename(page: usize, date: &str) -> String {
    format!("products_page{page}_{date}.csv")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
