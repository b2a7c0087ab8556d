//! Store Client
//!
//! Abstraction over the remote bills API, injected into containers.

mod fixtures;
mod mock;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Bill, CreatedFile, FileUpload};

pub use fixtures::fixture_bills;
pub use mock::MockStore;

/// Store failures; the display string is shown to the user verbatim
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Erreur {0}")]
    Http(u16),
    #[error("{0}")]
    Network(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Bills endpoints of the remote store
///
/// Futures are not `Send`: everything runs on the browser event loop.
#[async_trait(?Send)]
pub trait BillStore {
    /// Bills of the signed-in user
    async fn list(&self) -> StoreResult<Vec<Bill>>;

    /// Upload a receipt file
    async fn create(&self, upload: &FileUpload) -> StoreResult<CreatedFile>;

    /// Write bill data for the document identified by `selector`
    async fn update(&self, selector: &str, bill: &Bill) -> StoreResult<Bill>;
}
