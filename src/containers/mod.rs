//! Page Containers
//!
//! Behavior behind the employee pages: data loading, file checks,
//! form submission and navigation requests.

mod bills;
mod new_bill;

pub use bills::Bills;
pub use new_bill::{BillForm, NewBill};
