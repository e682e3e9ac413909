//! tickshop-core - Core library for Tickshop
//!
//! This crate contains the models, product API client, countdown timer and
//! notification plumbing used by the Tickshop app shell.

pub mod api;
pub mod config;
pub mod countdown;
pub mod error;
pub mod models;
pub mod notify;
pub mod products;
pub mod util;

pub use error::{ApiError, Error, NotifyError, Result};
pub use models::{NewProduct, Product, ProductId};
