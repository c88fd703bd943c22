//! Terminal dashboard screen
//!
//! Split into screen state, update logic, rendering and components

pub mod components;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

pub use renderer::render_dashboard;
pub use state::DashboardState;
