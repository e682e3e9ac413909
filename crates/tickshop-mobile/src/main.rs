//! Tickshop Mobile Application
//!
//! Android shell entrypoint for the Dioxus mobile app.

#[cfg(target_os = "android")]
mod app;
#[cfg(any(target_os = "android", test))]
mod bootstrap_config;
#[cfg(target_os = "android")]
mod ui;
#[cfg(target_os = "android")]
mod views;

#[cfg(target_os = "android")]
fn main() {
    use std::sync::Arc;

    use tickshop_core::notify::{default_backend, NotificationCenter};

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tickshop=info".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Tickshop mobile shell...");

    let notifications = Arc::new(NotificationCenter::bootstrap(default_backend()));

    dioxus::LaunchBuilder::mobile()
        .with_context(notifications)
        .launch(app::App);
}

#[cfg(not(target_os = "android"))]
fn main() {
    println!(
        "tickshop-mobile is intended for Android targets. Try: cargo build -p tickshop-mobile --target aarch64-linux-android"
    );
}
