use catalog_logging::{catalog_debug, catalog_info, catalog_warn};

use crate::export::{csv_filename, to_csv};
use crate::validate::{validate_create, validate_edit};
use crate::view_model::{Notice, Severity};
use crate::{AppState, CatalogError, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Failed requests leave the product list exactly as it was; only a notice
/// is recorded. A notice lasts until the next message other than `Tick` or
/// `NoOp`.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if !matches!(msg, Msg::Tick | Msg::NoOp) {
        state.clear_notice();
    }
    let effects = match msg {
        Msg::LoadRequested => {
            state.begin_load();
            vec![Effect::FetchCatalog]
        }
        Msg::CatalogLoaded(result) => {
            state.finish_load();
            match result {
                Ok(products) => {
                    let count = products.len();
                    state.pipeline_mut().load(products);
                    catalog_info!("catalog loaded with {count} products");
                    let notice = if count == 0 {
                        Notice::new(
                            Severity::Warning,
                            "Catalog is empty",
                            "The service returned no products. Try creating one!",
                        )
                    } else {
                        Notice::new(
                            Severity::Success,
                            "Catalog loaded",
                            format!("Loaded {count} products."),
                        )
                    };
                    state.set_notice(notice);
                }
                Err(err) => {
                    catalog_warn!("catalog load failed: {err}");
                    state.set_notice(failure_notice("Could not load the catalog", &err));
                }
            }
            Vec::new()
        }
        Msg::SearchChanged(term) => {
            state.pipeline_mut().set_search_term(&term);
            Vec::new()
        }
        Msg::SortToggled(key) => {
            state.pipeline_mut().toggle_sort(key);
            Vec::new()
        }
        Msg::PageSizeChanged(page_size) => {
            if let Err(err) = state.pipeline_mut().set_page_size(page_size) {
                state.set_notice(failure_notice("Invalid page size", &err.into()));
            }
            Vec::new()
        }
        Msg::PageRequested(page) => {
            if let Err(err) = state.go_to_page(page) {
                catalog_debug!("ignored page request: {err}");
            }
            Vec::new()
        }
        Msg::ExportRequested { date } => {
            let pipeline = state.pipeline();
            let rows = pipeline.current_page_items();
            let export = (!rows.is_empty()).then(|| {
                catalog_info!("exporting {} products", rows.len());
                Effect::WriteExport {
                    filename: csv_filename(pipeline.current_page(), &date),
                    contents: to_csv(&rows),
                }
            });
            match export {
                Some(effect) => vec![effect],
                None => {
                    state.set_notice(Notice::new(
                        Severity::Warning,
                        "Nothing to export",
                        "There are no products on this page.",
                    ));
                    Vec::new()
                }
            }
        }
        Msg::ExportFinished(result) => {
            let notice = match result {
                Ok(path) => Notice::new(
                    Severity::Success,
                    "Export complete",
                    format!("Saved {path}."),
                ),
                Err(message) => Notice::new(Severity::Error, "Export failed", message),
            };
            state.set_notice(notice);
            Vec::new()
        }
        Msg::DetailRequested(id) => {
            if state.pipeline().find(id).is_some() {
                state.select(Some(id));
            } else {
                state.set_notice(Notice::new(
                    Severity::Error,
                    "Product not found",
                    format!("No product with id {id}."),
                ));
            }
            Vec::new()
        }
        Msg::DetailClosed => {
            if state.selected().is_some() {
                state.select(None);
            }
            Vec::new()
        }
        Msg::CreateSubmitted(form) => match validate_create(&form) {
            Ok(draft) => {
                state.begin_write();
                vec![Effect::CreateProduct(draft)]
            }
            Err(err) => {
                state.set_notice(failure_notice("Invalid product", &err.into()));
                Vec::new()
            }
        },
        Msg::ProductCreated(result) => {
            state.finish_write();
            match result {
                Ok(product) => {
                    let message = format!("\"{}\" was created.", product.title);
                    state.pipeline_mut().create_local(product);
                    state.set_notice(Notice::new(Severity::Success, "Product created", message));
                }
                Err(err) => {
                    catalog_warn!("create failed: {err}");
                    state.set_notice(failure_notice("Could not create the product", &err));
                }
            }
            Vec::new()
        }
        Msg::EditSubmitted { id, form } => {
            match validate_edit(&form, state.pipeline().find(id)) {
                Ok(patch) => {
                    state.begin_write();
                    vec![Effect::UpdateProduct { id, patch }]
                }
                Err(err) => {
                    state.set_notice(failure_notice("Invalid product", &err.into()));
                    Vec::new()
                }
            }
        }
        Msg::ProductUpdated { id, result } => {
            state.finish_write();
            match result {
                Ok(fields) => {
                    if state.selected() == Some(id) {
                        state.select(None);
                    }
                    let notice = if state.pipeline_mut().update_local(id, fields) {
                        let title = state
                            .pipeline()
                            .find(id)
                            .map(|product| product.title.clone())
                            .unwrap_or_default();
                        Notice::new(
                            Severity::Success,
                            "Product updated",
                            format!("\"{title}\" was updated."),
                        )
                    } else {
                        catalog_warn!("update confirmed for unknown product {id}");
                        Notice::new(
                            Severity::Warning,
                            "Product not in list",
                            format!("Product {id} was updated but is not in the loaded catalog."),
                        )
                    };
                    state.set_notice(notice);
                }
                Err(err) => {
                    catalog_warn!("update of {id} failed: {err}");
                    state.set_notice(failure_notice("Could not update the product", &err));
                }
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn failure_notice(title: &str, err: &CatalogError) -> Notice {
    let message = match err {
        CatalogError::Transport { .. } => {
            "Network unreachable or request blocked. Check the connection and retry.".to_string()
        }
        CatalogError::Service {
            message: Some(message),
            ..
        } => message.clone(),
        other => other.to_string(),
    };
    Notice::new(Severity::Error, title, message)
}
