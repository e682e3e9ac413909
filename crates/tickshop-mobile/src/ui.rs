//! Shared mobile UI primitives and the app style sheet.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use dioxus::prelude::*;

/// Style sheet for the whole app shell.
pub const MOBILE_UI_STYLES: &str = r"
.app-shell {
    min-height: 100vh;
    display: flex;
    flex-direction: column;
    background: #f6f8fb;
    color: #111827;
    font-family: system-ui, sans-serif;
}

.app-header {
    padding: 14px 16px;
    background: #ffffff;
}

.app-title {
    margin: 0;
    font-size: 22px;
}

.app-content {
    flex: 1;
    padding: 12px 16px 24px 16px;
    display: flex;
    flex-direction: column;
    gap: 16px;
}

.card {
    background: #ffffff;
    border: 1px solid #e5e7eb;
    border-radius: 12px;
    padding: 16px;
    display: flex;
    flex-direction: column;
    gap: 10px;
}

.card-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 8px;
}

.card-title {
    margin: 0;
    font-size: 16px;
    font-weight: 700;
}

.card-caption {
    margin: 0;
    font-size: 12px;
    color: #6b7280;
}

.row {
    display: flex;
    gap: 8px;
}

.countdown-value {
    margin: 0;
    font-size: 48px;
    font-weight: 700;
    text-align: center;
    font-variant-numeric: tabular-nums;
}

.form-field {
    display: flex;
    flex-direction: column;
    gap: 6px;
}

.form-label {
    margin: 0;
    font-size: 12px;
    color: #6b7280;
}

.error-panel {
    margin: 0;
    padding: 10px 12px;
    border: 1px solid #fecaca;
    border-radius: 10px;
    background: #fef2f2;
    color: #991b1b;
    font-size: 13px;
    word-break: break-word;
}

.product-list {
    max-height: 320px;
}

.product-item {
    padding: 10px 0;
    border-bottom: 1px solid #f3f4f6;
}

.product-name {
    margin: 0;
    font-size: 15px;
    font-weight: 600;
}

.product-meta {
    margin: 2px 0 0 0;
    font-size: 12px;
    color: #9ca3af;
}

.product-description {
    margin: 4px 0 0 0;
    font-size: 13px;
    color: #4b5563;
}

.empty-state {
    padding: 20px;
    text-align: center;
    color: #6b7280;
    font-size: 13px;
}

.modal-backdrop {
    position: fixed;
    inset: 0;
    background: rgba(17, 24, 39, 0.45);
    display: flex;
    align-items: center;
    justify-content: center;
    padding: 24px;
    z-index: 1000;
}

.modal {
    width: 100%;
    max-width: 320px;
    background: #ffffff;
    border-radius: 12px;
    padding: 16px;
    display: flex;
    flex-direction: column;
    gap: 12px;
}

.ui-button {
    border-radius: 10px;
    padding: 10px 12px;
    font-size: 13px;
    font-weight: 600;
    border: 1px solid transparent;
    transition: background-color 120ms ease, color 120ms ease, border-color 120ms ease;
}

.ui-button:disabled {
    opacity: 0.55;
}

.ui-button--block {
    flex: 1;
}

.ui-button--primary {
    background: #2563eb;
    color: #ffffff;
    border-color: #2563eb;
}

.ui-button--outline {
    background: #ffffff;
    color: #374151;
    border-color: #d1d5db;
}

.ui-input,
.ui-textarea {
    width: 100%;
    box-sizing: border-box;
    border: 1px solid #d1d5db;
    border-radius: 10px;
    padding: 10px 12px;
    font-size: 13px;
    background: #ffffff;
    color: #111827;
}

.ui-textarea {
    resize: none;
}
";

/// Button variant mapping.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
}

impl ButtonVariant {
    const fn class(self) -> &'static str {
        match self {
            Self::Primary => "ui-button--primary",
            Self::Outline => "ui-button--outline",
        }
    }
}

/// Button that disables itself while its action is in flight.
#[component]
pub fn UiButton(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] block: bool,
    #[props(default)] disabled: bool,
    #[props(default)] busy: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = button)]
    attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let mut class_name = format!("ui-button {}", variant.class());
    if block {
        class_name.push_str(" ui-button--block");
    }

    rsx! {
        button {
            class: "{class_name}",
            disabled: disabled || busy,
            onclick: move |event| {
                if let Some(handler) = &onclick {
                    handler.call(event);
                }
            },
            ..attributes,
            {children}
        }
    }
}

#[component]
pub fn UiInput(
    oninput: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = input)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        input {
            class: "ui-input",
            oninput: move |event| _ = oninput.map(|handler| handler(event)),
            ..attributes,
        }
    }
}

#[component]
pub fn UiTextarea(
    oninput: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = textarea)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        textarea {
            class: "ui-textarea",
            oninput: move |event| _ = oninput.map(|handler| handler(event)),
            ..attributes,
        }
    }
}
