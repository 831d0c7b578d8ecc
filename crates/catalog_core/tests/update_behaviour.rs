use std::sync::Once;

use catalog_core::{
    update, AppState, CatalogError, Category, CreateForm, EditForm, Effect, Msg, Product,
    ProductFields, Severity, SortKey,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

fn product(id: u64, title: &str, price: f64) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: "Plenty of description".to_string(),
        category: Some(Category {
            id: 2,
            name: "Misc".to_string(),
        }),
        images: vec![format!("['https://img.example.com/{id}.png']")],
    }
}

fn loaded(count: u64) -> AppState {
    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let products = (1..=count)
        .map(|id| product(id, &format!("Item {id}"), id as f64 * 2.0))
        .collect();
    let (mut state, _) = update(state, Msg::CatalogLoaded(Ok(products)));
    state.consume_dirty();
    state
}

#[test]
fn load_requested_emits_fetch_and_marks_loading() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::LoadRequested);

    assert_eq!(effects, vec![Effect::FetchCatalog]);
    assert!(state.view().loading);
    assert_eq!(state.requests_in_flight(), 1);
    assert!(state.consume_dirty());
}

#[test]
fn catalog_loaded_fills_first_page() {
    init_logging();
    let state = loaded(12);
    let view = state.view();

    assert!(!view.loading);
    assert_eq!(view.rows.len(), 10);
    assert_eq!(view.page.total_items, 12);
    assert_eq!(view.page.total_pages, 2);
    assert_eq!(view.rows[0].thumbnail_url, "https://img.example.com/1.png");
    assert_eq!(view.rows[0].category, "Misc");
    assert_eq!(view.page_buttons.pages, vec![1, 2]);
    assert_eq!(view.notice.unwrap().severity, Severity::Success);
}

#[test]
fn empty_catalog_is_a_warning() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::CatalogLoaded(Ok(Vec::new())));

    let view = state.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.notice.unwrap().severity, Severity::Warning);
}

#[test]
fn failed_load_keeps_previous_catalog() {
    init_logging();
    let state = loaded(3);
    let (state, _) = update(state, Msg::SearchChanged("item 2".to_string()));
    let before = state.pipeline().clone();

    let (state, _) = update(state, Msg::LoadRequested);
    let (state, effects) = update(
        state,
        Msg::CatalogLoaded(Err(CatalogError::Service {
            status: 503,
            message: None,
        })),
    );

    assert!(effects.is_empty());
    assert_eq!(state.pipeline(), &before);
    let view = state.view();
    assert!(!view.loading);
    let notice = view.notice.unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.contains("503"));
}

#[test]
fn overlapping_loads_last_completion_wins() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let (state, _) = update(state, Msg::LoadRequested);
    assert_eq!(state.requests_in_flight(), 2);

    let (state, _) = update(state, Msg::CatalogLoaded(Ok(vec![product(1, "First", 1.0)])));
    assert!(state.view().loading);
    let (state, _) = update(state, Msg::CatalogLoaded(Ok(vec![product(2, "Second", 1.0)])));

    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].id, 2);
}

#[test]
fn search_sort_and_paging_flow_through_view() {
    init_logging();
    let state = loaded(25);

    let (state, _) = update(state, Msg::SortToggled(SortKey::Price));
    let (state, _) = update(state, Msg::SortToggled(SortKey::Price));
    assert_eq!(state.view().rows[0].id, 25);

    let (state, _) = update(state, Msg::PageRequested(3));
    let view = state.view();
    assert_eq!(view.page.current_page, 3);
    assert_eq!(
        view.rows.iter().map(|row| row.id).collect::<Vec<_>>(),
        vec![5, 4, 3, 2, 1]
    );

    let (state, _) = update(state, Msg::SearchChanged("ITEM 1".to_string()));
    let view = state.view();
    assert_eq!(view.search_term, "item 1");
    assert_eq!(view.page.current_page, 1);
    assert_eq!(view.page.total_items, 11);
}

#[test]
fn out_of_range_page_is_ignored_without_redraw() {
    init_logging();
    let (mut state, _) = update(loaded(5), Msg::SearchChanged(String::new()));
    assert!(state.consume_dirty());
    assert!(state.view().notice.is_none());

    let (mut state, effects) = update(state, Msg::PageRequested(2));

    assert!(effects.is_empty());
    assert_eq!(state.view().page.current_page, 1);
    assert!(!state.consume_dirty());
}

#[test]
fn zero_page_size_reports_error() {
    init_logging();
    let state = loaded(5);

    let (state, _) = update(state, Msg::PageSizeChanged(0));

    let view = state.view();
    assert_eq!(view.page.items_per_page, 10);
    assert_eq!(view.notice.unwrap().severity, Severity::Error);
}

#[test]
fn export_emits_csv_of_current_page() {
    init_logging();
    let state = loaded(12);
    let (state, _) = update(state, Msg::PageRequested(2));

    let (_state, effects) = update(
        state,
        Msg::ExportRequested {
            date: "2024-06-30".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::WriteExport {
            filename: "products_page2_2024-06-30.csv".to_string(),
            contents: "id,title,price,category\n11,\"Item 11\",22,\"Misc\"\n12,\"Item 12\",24,\"Misc\"\n"
                .to_string(),
        }]
    );
}

#[test]
fn export_of_empty_page_warns_instead() {
    init_logging();
    let state = loaded(3);
    let (state, _) = update(state, Msg::SearchChanged("nothing matches".to_string()));

    let (state, effects) = update(
        state,
        Msg::ExportRequested {
            date: "2024-06-30".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().notice.unwrap().title, "Nothing to export");
}

#[test]
fn invalid_create_form_never_reaches_the_service() {
    init_logging();
    let state = loaded(2);
    let form = CreateForm {
        title: "Ok title".to_string(),
        price: "10".to_string(),
        description: "short".to_string(),
        category_id: "1".to_string(),
        images: "https://img.example.com/x.png".to_string(),
    };

    let (state, effects) = update(state, Msg::CreateSubmitted(form));

    assert!(effects.is_empty());
    assert_eq!(state.requests_in_flight(), 0);
    let notice = state.view().notice.unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.contains("description"));
}

#[test]
fn create_round_trip_prepends_product() {
    init_logging();
    let state = loaded(12);
    let (state, _) = update(state, Msg::PageRequested(2));
    let form = CreateForm {
        title: "Brand New".to_string(),
        price: "15.5".to_string(),
        description: "A brand new product".to_string(),
        category_id: "2".to_string(),
        images: "https://img.example.com/new.png".to_string(),
    };

    let (state, effects) = update(state, Msg::CreateSubmitted(form));
    let Some(Effect::CreateProduct(draft)) = effects.first() else {
        panic!("expected create effect, got {effects:?}");
    };
    assert_eq!(draft.price, 15.5);
    assert_eq!(state.requests_in_flight(), 1);

    let (state, _) = update(
        state,
        Msg::ProductCreated(Ok(product(100, "Brand New", 15.5))),
    );

    let view = state.view();
    assert_eq!(state.requests_in_flight(), 0);
    assert_eq!(view.page.current_page, 1);
    assert_eq!(view.rows[0].id, 100);
    assert_eq!(view.page.total_items, 13);
}

#[test]
fn failed_create_keeps_catalog() {
    init_logging();
    let state = loaded(2);
    let before = state.pipeline().clone();

    let (state, _) = update(
        state,
        Msg::ProductCreated(Err(CatalogError::transport("connection refused"))),
    );

    assert_eq!(state.pipeline(), &before);
    assert_eq!(state.view().notice.unwrap().severity, Severity::Error);
}

#[test]
fn edit_round_trip_merges_response() {
    init_logging();
    let state = loaded(3);
    let (state, _) = update(state, Msg::DetailRequested(2));
    assert_eq!(state.view().detail.unwrap().image_urls, vec!["https://img.example.com/2.png"]);

    let form = EditForm {
        title: "Renamed".to_string(),
        price: "9.4".to_string(),
        description: String::new(),
    };
    let (state, effects) = update(state, Msg::EditSubmitted { id: 2, form });
    let Some(Effect::UpdateProduct { id, patch }) = effects.first() else {
        panic!("expected update effect, got {effects:?}");
    };
    assert_eq!(*id, 2);
    assert_eq!(patch.price, 9.0);
    assert_eq!(patch.category_id, 2);
    assert_eq!(patch.images, vec!["['https://img.example.com/2.png']".to_string()]);

    let (state, _) = update(
        state,
        Msg::ProductUpdated {
            id: 2,
            result: Ok(ProductFields {
                title: Some("Renamed".to_string()),
                price: Some(9.0),
                ..ProductFields::default()
            }),
        },
    );

    let view = state.view();
    assert!(view.detail.is_none());
    let row = view.rows.iter().find(|row| row.id == 2).unwrap();
    assert_eq!(row.title, "Renamed");
    assert_eq!(row.price, 9.0);
    assert_eq!(row.category, "Misc");
    assert_eq!(view.notice.unwrap().message, "\"Renamed\" was updated.");
}

#[test]
fn rejected_update_surfaces_service_message() {
    init_logging();
    let state = loaded(1);

    let (state, _) = update(
        state,
        Msg::ProductUpdated {
            id: 1,
            result: Err(CatalogError::Service {
                status: 400,
                message: Some("price must be a positive number".to_string()),
            }),
        },
    );

    assert_eq!(state.pipeline().find(1).unwrap().title, "Item 1");
    assert_eq!(
        state.view().notice.unwrap().message,
        "price must be a positive number"
    );
}

#[test]
fn unknown_detail_reports_error() {
    init_logging();
    let state = loaded(1);

    let (state, _) = update(state, Msg::DetailRequested(42));

    let view = state.view();
    assert!(view.detail.is_none());
    assert_eq!(view.notice.unwrap().title, "Product not found");
}

#[test]
fn detail_closed_clears_selection() {
    init_logging();
    let state = loaded(1);
    let (state, _) = update(state, Msg::DetailRequested(1));
    assert!(state.view().detail.is_some());

    let (state, _) = update(state, Msg::DetailClosed);

    assert!(state.view().detail.is_none());
}

#[test]
fn notice_is_dropped_by_the_next_message() {
    init_logging();
    let state = loaded(2);
    assert_eq!(state.view().notice.unwrap().title, "Catalog loaded");

    let (state, _) = update(state, Msg::SearchChanged("item 2".to_string()));
    assert!(state.view().notice.is_none());

    let (state, _) = update(state, Msg::SortToggled(SortKey::Id));
    assert!(state.view().notice.is_none());
}

#[test]
fn tick_keeps_the_current_notice() {
    init_logging();
    let (mut state, _) = update(loaded(2), Msg::DetailRequested(9));
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::Tick);

    assert_eq!(state.view().notice.unwrap().title, "Product not found");
    assert!(!state.consume_dirty());
}

#[test]
fn update_for_unknown_product_warns() {
    init_logging();
    let state = loaded(2);
    let before = state.pipeline().clone();

    let (state, _) = update(
        state,
        Msg::ProductUpdated {
            id: 77,
            result: Ok(ProductFields {
                title: Some("Ghost".to_string()),
                ..ProductFields::default()
            }),
        },
    );

    assert_eq!(state.pipeline(), &before);
    let notice = state.view().notice.unwrap();
    assert_eq!(notice.severity, Severity::Warning);
    assert!(notice.message.contains("77"));
}
