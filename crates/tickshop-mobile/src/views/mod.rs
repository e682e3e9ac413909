//! Screen sections composed by the app shell.

mod countdown;
mod products;

pub use countdown::CountdownSection;
pub use products::ProductsSection;
