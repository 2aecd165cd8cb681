//! Host table data model: what the widget asks the host for, what rows look
//! like when they arrive, and how a row becomes a map feature.

pub mod columns;
pub mod feature;
pub mod mapping;
pub mod record;

#[cfg(test)]
mod testing;

pub use columns::*;
pub use feature::*;
pub use mapping::*;
pub use record::*;
