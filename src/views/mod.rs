//! Page Views
//!
//! Leptos components for the two employee pages, rendered from the
//! signals of their containers.

pub mod bills;
pub mod layout;
pub mod new_bill;

pub use bills::BillsView;
pub use layout::NavIcon;
pub use new_bill::NewBillView;
