//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod footer;
pub mod goal;
pub mod header;
pub mod logs;
pub mod recent;
pub mod today;
