//! One adapter per catalog site.

mod hausdorf;
mod miele_unique;
mod mieles;
mod tehnikapremium;

pub use hausdorf::Hausdorf;
pub use miele_unique::MieleUnique;
pub use mieles::Mieles;
pub use tehnikapremium::Tehnikapremium;
