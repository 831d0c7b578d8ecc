use catalog_core::{
    AppViewModel, Notice, PageButtons, ProductDetailView, ProductRowView, Severity, SortDirection,
    SortKey,
};

const TITLE_WIDTH: usize = 32;
const CATEGORY_WIDTH: usize = 14;

/// Render the whole view as plain-text lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(notice) = &view.notice {
        lines.push(format_notice(notice));
    }
    if view.loading {
        lines.push("Loading catalog...".to_string());
    } else if view.requests_in_flight > 0 {
        lines.push(format!("{} request(s) in flight...", view.requests_in_flight));
    }

    lines.push(format!(
        "Search: {} | Sort: {}",
        if view.search_term.is_empty() {
            "(none)".to_string()
        } else {
            format!("{:?}", view.search_term)
        },
        sort_label(view)
    ));

    lines.push(format!(
        "{:>6}  {:<title$}  {:>12}  {:<category$}  {}",
        "ID",
        "TITLE",
        "PRICE",
        "CATEGORY",
        "IMAGE",
        title = TITLE_WIDTH,
        category = CATEGORY_WIDTH
    ));
    if view.rows.is_empty() {
        lines.push("No products found.".to_string());
    }
    lines.extend(view.rows.iter().map(format_row));

    lines.push(format!(
        "Showing {}-{} of {} products | {}",
        view.page.start_item,
        view.page.end_item,
        view.page.total_items,
        format_page_buttons(&view.page_buttons, view.page.current_page)
    ));

    if let Some(detail) = &view.detail {
        lines.extend(format_detail(detail));
    }
    lines
}

fn format_notice(notice: &Notice) -> String {
    let tag = match notice.severity {
        Severity::Success => "OK",
        Severity::Error => "ERROR",
        Severity::Warning => "WARN",
    };
    format!("[{tag}] {}: {}", notice.title, notice.message)
}

fn sort_label(view: &AppViewModel) -> String {
    let Some(sort) = view.sort else {
        return "(none)".to_string();
    };
    let key = match sort.key {
        SortKey::Id => "id",
        SortKey::Title => "title",
        SortKey::Price => "price",
    };
    let direction = match sort.direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    format!("{key} {direction}")
}

fn format_row(row: &ProductRowView) -> String {
    format!(
        "{:>6}  {:<title$}  {:>12}  {:<category$}  {}",
        format!("#{}", row.id),
        fit(&row.title, TITLE_WIDTH),
        format!("${}", format_price(row.price)),
        fit(&row.category, CATEGORY_WIDTH),
        row.thumbnail_url,
        title = TITLE_WIDTH,
        category = CATEGORY_WIDTH
    )
}

fn format_page_buttons(buttons: &PageButtons, current_page: usize) -> String {
    let mut parts = Vec::new();
    if buttons.has_previous {
        parts.push("<".to_string());
    }
    if let Some(first) = buttons.first {
        parts.push(first.to_string());
    }
    if buttons.leading_gap {
        parts.push("...".to_string());
    }
    for &page in &buttons.pages {
        if page == current_page {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if buttons.trailing_gap {
        parts.push("...".to_string());
    }
    if let Some(last) = buttons.last {
        parts.push(last.to_string());
    }
    if buttons.has_next {
        parts.push(">".to_string());
    }
    parts.join(" ")
}

fn format_detail(detail: &ProductDetailView) -> Vec<String> {
    let mut lines = vec![
        format!("--- Product #{} ---", detail.id),
        format!("Title:       {}", detail.title),
        format!("Price:       ${}", format_price(detail.price)),
        format!("Category:    {}", detail.category),
        format!("Description: {}", detail.description),
    ];
    if detail.image_urls.is_empty() {
        lines.push("Images:      (none)".to_string());
    }
    for (index, url) in detail.image_urls.iter().enumerate() {
        lines.push(format!("Image {}:     {}", index + 1, url));
    }
    lines
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Price with thousands separators, e.g. `1,234.5`.
fn format_price(price: f64) -> String {
    let text = price.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let grouped = format_with_commas(integer);
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

fn format_with_commas(digits: &str) -> String {
    let mut out = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
