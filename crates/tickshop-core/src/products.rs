//! Product list/create screen state and operations.
//!
//! [`ProductsState`] is the screen's state with its transitions;
//! [`ProductsController`] runs the fetch/create operations against any
//! [`ProductsStore`], so the same flow drives the app's reactive state and
//! plain values in tests.

use chrono::{DateTime, Utc};

use crate::api::ProductApi;
use crate::models::{NewProduct, Product};
use crate::util::display_error;
use crate::{ApiError, Error};

/// Transient input of the create form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
}

/// Everything the product screen renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductsState {
    /// Most recent successful fetch, in server order.
    pub products: Vec<Product>,
    pub form: ProductForm,
    /// Message of the last failed operation.
    pub error: Option<String>,
    pub loading_list: bool,
    pub creating: bool,
    /// Blocking validation prompt awaiting dismissal.
    pub prompt: Option<String>,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl ProductsState {
    /// Enter the loading state. Returns `false` while a fetch is in flight.
    pub fn begin_fetch(&mut self) -> bool {
        if self.loading_list {
            return false;
        }
        self.error = None;
        self.loading_list = true;
        true
    }

    /// Apply a fetch result. Failures keep the previous list.
    pub fn finish_fetch(&mut self, result: Result<Vec<Product>, ApiError>) {
        match result {
            Ok(products) => {
                self.products = products;
                self.last_refreshed_at = Some(Utc::now());
            }
            Err(error) => {
                tracing::error!("Failed to load products: {}", error);
                self.error = Some(display_error(&error));
            }
        }
        self.loading_list = false;
    }

    /// Validate the form and enter the creating state.
    ///
    /// Returns `Ok(None)` while a create is already in flight. A blank name
    /// raises the validation prompt and leaves everything else untouched.
    pub fn begin_create(&mut self) -> Result<Option<NewProduct>, Error> {
        if self.creating {
            return Ok(None);
        }
        match NewProduct::from_form(&self.form.name, &self.form.description) {
            Ok(draft) => {
                self.error = None;
                self.creating = true;
                Ok(Some(draft))
            }
            Err(error) => {
                self.prompt = Some("Please enter a product name.".to_string());
                Err(error)
            }
        }
    }

    /// Apply a create result. Returns `true` when the list should be refreshed.
    pub fn finish_create(&mut self, result: Result<Option<Product>, ApiError>) -> bool {
        match result {
            Ok(created) => {
                if let Some(product) = created {
                    tracing::info!(id = %product.id, "Product created");
                }
                self.form = ProductForm::default();
                true
            }
            Err(error) => {
                tracing::error!("Failed to create product: {}", error);
                self.error = Some(display_error(&error));
                false
            }
        }
    }

    pub fn end_create(&mut self) {
        self.creating = false;
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompt = None;
    }
}

/// Where the screen state lives.
pub trait ProductsStore {
    fn update<R>(&mut self, f: impl FnOnce(&mut ProductsState) -> R) -> R;
}

impl ProductsStore for ProductsState {
    fn update<R>(&mut self, f: impl FnOnce(&mut ProductsState) -> R) -> R {
        f(self)
    }
}

/// Outcome of a create attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Name failed validation; no request was sent.
    Rejected,
    /// Another create is still in flight; no request was sent.
    Busy,
    /// The server rejected the request or it never arrived.
    Failed,
    /// Created; the list has been re-fetched.
    Created,
}

/// Runs the screen's network operations.
#[derive(Debug, Clone)]
pub struct ProductsController {
    api: ProductApi,
}

impl ProductsController {
    pub const fn new(api: ProductApi) -> Self {
        Self { api }
    }

    /// Fetch the list unless a fetch is already in flight.
    pub async fn fetch_products<S: ProductsStore>(&self, store: &mut S) {
        if store.update(ProductsState::begin_fetch) {
            self.complete_fetch(store).await;
        }
    }

    /// Request the list for a fetch already entered with
    /// [`ProductsState::begin_fetch`].
    pub async fn complete_fetch<S: ProductsStore>(&self, store: &mut S) {
        let result = self.api.list_products().await;
        store.update(|state| state.finish_fetch(result));
    }

    pub async fn create_product<S: ProductsStore>(&self, store: &mut S) -> CreateOutcome {
        match store.update(ProductsState::begin_create) {
            Ok(Some(draft)) => self.submit_product(&draft, store).await,
            Ok(None) => CreateOutcome::Busy,
            Err(_) => CreateOutcome::Rejected,
        }
    }

    /// Post a draft accepted by [`ProductsState::begin_create`], then refresh
    /// the list on success.
    pub async fn submit_product<S: ProductsStore>(
        &self,
        draft: &NewProduct,
        store: &mut S,
    ) -> CreateOutcome {
        let result = self.api.create_product(draft).await;
        let outcome = if store.update(|state| state.finish_create(result)) {
            // Refresh even when another fetch is running; it may predate the
            // new product.
            store.update(|state| {
                state.loading_list = false;
                state.begin_fetch();
            });
            self.complete_fetch(store).await;
            CreateOutcome::Created
        } else {
            CreateOutcome::Failed
        };

        store.update(ProductsState::end_create);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductId;
    use pretty_assertions::assert_eq;

    fn widget() -> Product {
        Product {
            id: ProductId(1),
            name: "Widget".to_string(),
            description: Some("A widget".to_string()),
        }
    }

    #[test]
    fn begin_fetch_clears_error_and_sets_loading() {
        let mut state = ProductsState {
            error: Some("old".to_string()),
            ..Default::default()
        };
        state.begin_fetch();
        assert_eq!(state.error, None);
        assert!(state.loading_list);
    }

    #[test]
    fn begin_fetch_refuses_while_loading() {
        let mut state = ProductsState::default();
        assert!(state.begin_fetch());
        state.error = Some("from the first fetch".to_string());

        assert!(!state.begin_fetch());
        assert!(state.loading_list);
        assert_eq!(state.error.as_deref(), Some("from the first fetch"));
    }

    #[test]
    fn failed_fetch_keeps_previous_products() {
        let mut state = ProductsState {
            products: vec![widget()],
            ..Default::default()
        };
        state.begin_fetch();
        state.finish_fetch(Err(ApiError::Http {
            status: 500,
            body: "server error".to_string(),
        }));

        assert_eq!(state.products, vec![widget()]);
        assert_eq!(state.error.as_deref(), Some("HTTP 500: server error"));
        assert!(!state.loading_list);
        assert_eq!(state.last_refreshed_at, None);
    }

    #[test]
    fn successful_fetch_replaces_products() {
        let mut state = ProductsState::default();
        state.begin_fetch();
        state.finish_fetch(Ok(vec![widget()]));

        assert_eq!(state.products, vec![widget()]);
        assert!(state.last_refreshed_at.is_some());
        assert!(!state.loading_list);
    }

    #[test]
    fn blank_name_raises_prompt_without_entering_creating() {
        let mut state = ProductsState {
            form: ProductForm {
                name: "   ".to_string(),
                description: "desc".to_string(),
            },
            error: Some("previous".to_string()),
            ..Default::default()
        };

        assert!(state.begin_create().is_err());
        assert!(state.prompt.is_some());
        assert!(!state.creating);
        assert_eq!(state.error.as_deref(), Some("previous"));

        state.dismiss_prompt();
        assert_eq!(state.prompt, None);
    }

    #[test]
    fn successful_create_clears_form() {
        let mut state = ProductsState {
            form: ProductForm {
                name: " Widget ".to_string(),
                description: " A widget ".to_string(),
            },
            ..Default::default()
        };

        let draft = state.begin_create().unwrap().unwrap();
        assert_eq!(draft.name, "Widget");
        assert!(state.creating);

        assert!(state.finish_create(Ok(None)));
        assert_eq!(state.form, ProductForm::default());

        state.end_create();
        assert!(!state.creating);
    }

    #[test]
    fn second_create_is_refused_while_first_is_in_flight() {
        let mut state = ProductsState {
            form: ProductForm {
                name: "Widget".to_string(),
                description: String::new(),
            },
            ..Default::default()
        };

        assert!(state.begin_create().unwrap().is_some());
        assert_eq!(state.begin_create().unwrap(), None);
        assert_eq!(state.prompt, None);

        state.end_create();
        assert!(state.begin_create().unwrap().is_some());
    }

    #[test]
    fn failed_create_keeps_form_and_reports_error() {
        let mut state = ProductsState {
            form: ProductForm {
                name: "Widget".to_string(),
                description: String::new(),
            },
            ..Default::default()
        };
        state.begin_create().unwrap().unwrap();

        let refresh = state.finish_create(Err(ApiError::Http {
            status: 422,
            body: "name taken".to_string(),
        }));
        assert!(!refresh);
        assert_eq!(state.form.name, "Widget");
        assert_eq!(state.error.as_deref(), Some("HTTP 422: name taken"));
    }
}
