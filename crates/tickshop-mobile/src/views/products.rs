use dioxus::prelude::*;
use dioxus_primitives::label::Label;
use dioxus_primitives::scroll_area::{ScrollArea, ScrollDirection, ScrollType};
use tickshop_core::products::{ProductsController, ProductsState, ProductsStore};
use tickshop_core::util::display_error;
use tickshop_core::Product;

use crate::bootstrap_config::{load_bootstrap_config, product_api};
use crate::ui::{ButtonVariant, UiButton, UiInput, UiTextarea};

/// Screen state held in a signal so every transition re-renders.
#[derive(Clone, Copy)]
struct SignalStore(Signal<ProductsState>);

impl ProductsStore for SignalStore {
    fn update<R>(&mut self, f: impl FnOnce(&mut ProductsState) -> R) -> R {
        let mut state = self.0.write();
        f(&mut *state)
    }
}

#[component]
pub fn ProductsSection() -> Element {
    let controller = use_hook(|| {
        product_api(&load_bootstrap_config())
            .map(ProductsController::new)
            .map_err(|error| display_error(&error))
    });
    let mut state = use_signal(ProductsState::default);

    let mount_controller = controller.clone();
    use_hook(move || {
        if let Ok(controller) = mount_controller {
            spawn(async move {
                controller.fetch_products(&mut SignalStore(state)).await;
            });
        }
    });

    // Flags flip inside the handler so a second tap is refused before the
    // spawned task first runs.
    let refresh_controller = controller.clone();
    let on_refresh = move |_| {
        let Ok(controller) = refresh_controller.clone() else {
            return;
        };
        if !state.write().begin_fetch() {
            return;
        }
        spawn(async move {
            controller.complete_fetch(&mut SignalStore(state)).await;
        });
    };

    let create_controller = controller.clone();
    let on_create = move |_| {
        let Ok(controller) = create_controller.clone() else {
            return;
        };
        let Ok(Some(draft)) = state.write().begin_create() else {
            return;
        };
        spawn(async move {
            controller
                .submit_product(&draft, &mut SignalStore(state))
                .await;
        });
    };

    let current = state.read().clone();
    let config_error = controller.as_ref().err().cloned();
    let unavailable = config_error.is_some();
    let refreshed_label = current.last_refreshed_at.map(|timestamp| {
        timestamp
            .with_timezone(&chrono::Local)
            .format("Updated %H:%M:%S")
            .to_string()
    });
    let product_count = current.products.len();
    let name_value = current.form.name.clone();
    let description_value = current.form.description.clone();

    rsx! {
        section {
            class: "card",
            div {
                class: "card-header",
                h2 { class: "card-title", "Products ({product_count})" }
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Outline,
                    busy: current.loading_list,
                    disabled: unavailable,
                    onclick: on_refresh,
                    if current.loading_list { "Loading..." } else { "Refresh" }
                }
            }
            if let Some(label) = refreshed_label {
                p { class: "card-caption", "{label}" }
            }

            if let Some(message) = config_error.or(current.error.clone()) {
                p { class: "error-panel", role: "alert", "{message}" }
            }

            ScrollArea {
                direction: ScrollDirection::Vertical,
                scroll_type: ScrollType::Auto,
                tabindex: "0",
                class: "product-list",

                if current.products.is_empty() {
                    div {
                        class: "empty-state",
                        if current.loading_list { "Loading products..." } else { "No products yet." }
                    }
                } else {
                    for product in current.products.clone() {
                        {
                            let product_key = product.id.to_string();
                            rsx! {
                                ProductRow { key: "{product_key}", product }
                            }
                        }
                    }
                }
            }
        }

        section {
            class: "card",
            h2 { class: "card-title", "New product" }
            div {
                class: "form-field",
                Label {
                    html_for: "product-name",
                    class: "form-label",
                    "Name"
                }
                UiInput {
                    id: "product-name",
                    r#type: "text",
                    placeholder: "Product name",
                    value: "{name_value}",
                    oninput: move |event: FormEvent| state.write().form.name = event.value(),
                }
            }
            div {
                class: "form-field",
                Label {
                    html_for: "product-description",
                    class: "form-label",
                    "Description (optional)"
                }
                UiTextarea {
                    id: "product-description",
                    rows: "3",
                    placeholder: "What is it?",
                    value: "{description_value}",
                    oninput: move |event: FormEvent| state.write().form.description = event.value(),
                }
            }
            UiButton {
                type: "button",
                variant: ButtonVariant::Primary,
                busy: current.creating,
                disabled: unavailable,
                onclick: on_create,
                if current.creating { "Creating..." } else { "Create" }
            }
        }

        if let Some(prompt) = current.prompt.clone() {
            div {
                class: "modal-backdrop",
                div {
                    class: "modal",
                    role: "alertdialog",
                    h3 { class: "card-title", "Missing name" }
                    p { class: "card-caption", "{prompt}" }
                    UiButton {
                        type: "button",
                        variant: ButtonVariant::Primary,
                        onclick: move |_| state.write().dismiss_prompt(),
                        "OK"
                    }
                }
            }
        }
    }
}

#[component]
fn ProductRow(product: Product) -> Element {
    let name = product.name.clone();
    let id_label = format!("#{}", product.id);
    let description = product.description_text().map(ToString::to_string);

    rsx! {
        div {
            class: "product-item",
            p { class: "product-name", "{name}" }
            p { class: "product-meta", "{id_label}" }
            if let Some(description) = description {
                p { class: "product-description", "{description}" }
            }
        }
    }
}
