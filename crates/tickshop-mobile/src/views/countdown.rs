use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use tickshop_core::countdown::{format_remaining, Countdown, CountdownTimer};
use tickshop_core::notify::NotificationCenter;

use crate::ui::{ButtonVariant, UiButton};

#[component]
pub fn CountdownSection() -> Element {
    let notifications = use_hook(try_consume_context::<Arc<NotificationCenter>>);
    let timer = use_hook(|| {
        Rc::new(CountdownTimer::new(
            Countdown::default(),
            notifications.clone(),
        ))
    });
    let mut snapshot = use_signal(|| timer.snapshot());

    let updates_timer = Rc::clone(&timer);
    use_future(move || {
        let mut updates = updates_timer.subscribe();
        async move {
            while updates.changed().await.is_ok() {
                let next = *updates.borrow_and_update();
                snapshot.set(next);
            }
        }
    });

    let teardown_timer = Rc::clone(&timer);
    use_drop(move || teardown_timer.reset());

    let start_timer = Rc::clone(&timer);
    let reset_timer = Rc::clone(&timer);
    let current = snapshot();
    let remaining = format_remaining(current.seconds_left);
    let status = current.status_label();
    let notifications_enabled = notifications
        .as_ref()
        .is_some_and(|center| center.permission().is_granted());

    rsx! {
        section {
            class: "card",
            div {
                class: "card-header",
                h2 { class: "card-title", "Countdown" }
                p { class: "card-caption", "{status}" }
            }
            p { class: "countdown-value", "{remaining}" }
            div {
                class: "row",
                UiButton {
                    type: "button",
                    block: true,
                    variant: ButtonVariant::Primary,
                    disabled: current.running,
                    onclick: move |_| start_timer.start(),
                    "Start"
                }
                UiButton {
                    type: "button",
                    block: true,
                    variant: ButtonVariant::Outline,
                    onclick: move |_| reset_timer.reset(),
                    "Reset"
                }
            }
            if !notifications_enabled {
                p {
                    class: "card-caption",
                    "Notifications are off; the countdown will finish silently."
                }
            }
        }
    }
}
