//! Dashboard aggregation: concurrent loading of the four sources into one shared view.

mod loader;
mod state;
mod store;

pub use loader::{DashboardLoader, LoadReport};
pub use state::{LoadStatus, ViewState};
pub use store::DashboardStore;
