//! Data models for Tickshop

mod product;

pub use product::{NewProduct, Product, ProductId};
