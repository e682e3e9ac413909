//! Product screen contract tests against a mocked catalogue API.

use pretty_assertions::assert_eq;
use serde_json::json;
use tickshop_core::api::ProductApi;
use tickshop_core::products::{CreateOutcome, ProductForm, ProductsController, ProductsState};
use tickshop_core::util::FALLBACK_ERROR_MESSAGE;
use tickshop_core::{ApiError, Product, ProductId};
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller(server: &MockServer) -> ProductsController {
    ProductsController::new(ProductApi::new(server.uri()).unwrap())
}

fn gadget() -> Product {
    Product {
        id: ProductId(42),
        name: "Gadget".to_string(),
        description: None,
    }
}

fn state_with_form(name: &str, description: &str) -> ProductsState {
    ProductsState {
        form: ProductForm {
            name: name.to_string(),
            description: description.to_string(),
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn fetch_renders_products_from_list_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products/"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Widget", "description": "A widget"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut state = ProductsState::default();
    controller(&server).fetch_products(&mut state).await;

    assert_eq!(state.products.len(), 1);
    assert_eq!(state.products[0].id, ProductId(1));
    assert_eq!(state.products[0].name, "Widget");
    assert_eq!(state.products[0].description.as_deref(), Some("A widget"));
    assert_eq!(state.error, None);
    assert!(!state.loading_list);
}

#[tokio::test]
async fn fetch_failure_keeps_previous_list_and_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&server)
        .await;

    let mut state = ProductsState {
        products: vec![gadget()],
        ..Default::default()
    };
    controller(&server).fetch_products(&mut state).await;

    assert_eq!(state.products, vec![gadget()]);
    let message = state.error.expect("error should be set");
    assert!(message.contains("500"), "{message}");
    assert!(message.contains("server error"), "{message}");
    assert!(!state.loading_list);
}

#[tokio::test]
async fn http_error_body_is_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("e".repeat(2_000)))
        .mount(&server)
        .await;

    let api = ProductApi::new(server.uri()).unwrap();
    match api.list_products().await.unwrap_err() {
        ApiError::Http { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body.chars().count(), 300);
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_array_list_response_becomes_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let mut state = ProductsState {
        products: vec![gadget()],
        ..Default::default()
    };
    controller(&server).fetch_products(&mut state).await;

    assert!(state.products.is_empty());
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn base_url_path_prefix_is_respected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = ProductApi::new(format!("{}/api/", server.uri())).unwrap();
    assert!(api.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn network_failure_surfaces_message_and_clears_loading() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let controller = ProductsController::new(ProductApi::new(uri).unwrap());
    let mut state = ProductsState::default();
    controller.fetch_products(&mut state).await;

    let message = state.error.expect("error should be set");
    assert!(!message.is_empty());
    assert_ne!(message, FALLBACK_ERROR_MESSAGE);
    assert!(!state.loading_list);
}

#[tokio::test]
async fn blank_name_issues_no_requests() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut state = state_with_form("   \t", "ignored");
    let outcome = controller(&server).create_product(&mut state).await;

    assert_eq!(outcome, CreateOutcome::Rejected);
    assert!(state.prompt.is_some());
    assert!(!state.creating);
    assert_eq!(state.form.description, "ignored");
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn successful_create_clears_form_and_refreshes_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/products/"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Gadget", "description": null})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 42, "name": "Gadget"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 42, "name": "Gadget"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut state = state_with_form("  Gadget  ", "   ");
    let outcome = controller(&server).create_product(&mut state).await;

    assert_eq!(outcome, CreateOutcome::Created);
    assert_eq!(state.form, ProductForm::default());
    assert_eq!(state.products, vec![gadget()]);
    assert!(!state.creating);
    assert!(!state.loading_list);
}

#[tokio::test]
async fn create_sends_trimmed_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({"name": "Widget", "description": "A widget"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut state = state_with_form("Widget", "  A widget ");
    let outcome = controller(&server).create_product(&mut state).await;
    assert_eq!(outcome, CreateOutcome::Created);
}

#[tokio::test]
async fn failed_create_keeps_form_and_skips_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("name already exists"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut state = state_with_form("Widget", "desc");
    let outcome = controller(&server).create_product(&mut state).await;

    assert_eq!(outcome, CreateOutcome::Failed);
    assert_eq!(state.form.name, "Widget");
    let message = state.error.expect("error should be set");
    assert!(message.contains("400"), "{message}");
    assert!(message.contains("name already exists"), "{message}");
    assert!(!state.creating);
}

#[tokio::test]
async fn create_while_another_is_in_flight_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut state = state_with_form("Widget", "");
    let draft = state.begin_create().unwrap().expect("first create starts");

    // A second tap arrives before the first request has gone out.
    let outcome = controller(&server).create_product(&mut state).await;
    assert_eq!(outcome, CreateOutcome::Busy);
    assert_eq!(draft.name, "Widget");
    assert!(state.creating);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn refresh_while_loading_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut state = ProductsState::default();
    assert!(state.begin_fetch());
    controller(&server).fetch_products(&mut state).await;

    assert!(state.loading_list);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn draft_accepted_up_front_is_posted_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({"name": "Gadget", "description": null})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 42, "name": "Gadget"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 42, "name": "Gadget"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut state = state_with_form("Gadget", "");
    let draft = state.begin_create().unwrap().expect("create starts");
    assert!(state.begin_create().unwrap().is_none());

    let outcome = controller(&server).submit_product(&draft, &mut state).await;
    assert_eq!(outcome, CreateOutcome::Created);
    assert_eq!(state.products, vec![gadget()]);
    assert!(!state.creating);
}
