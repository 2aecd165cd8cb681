//! Map-side widget state: markers keyed by row, the selection they mirror, the
//! recenter control, and the session tying them to a table load.

pub mod control;
pub mod registry;
pub mod selection;
pub mod session;
pub mod style;
pub mod surface;

#[cfg(test)]
mod testing;

pub use control::RecenterControl;
pub use registry::MarkerRegistry;
pub use selection::SelectionSync;
pub use session::*;
pub use style::*;
pub use surface::*;
