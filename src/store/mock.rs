//! In-Memory Store
//!
//! Fixture-backed `BillStore` with per-endpoint failure injection.
//! Records uploads and updates so callers can inspect what was sent.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::{fixture_bills, BillStore, StoreError, StoreResult};
use crate::models::{Bill, CreatedFile, FileUpload};

const UPLOADED_FILE_URL: &str = "https://localhost:3456/images/test.jpg";
const UPLOADED_FILE_KEY: &str = "1234";

#[derive(Debug, Default)]
pub struct MockStore {
    bills: RefCell<Vec<Bill>>,
    list_error: RefCell<Option<StoreError>>,
    create_error: RefCell<Option<StoreError>>,
    update_error: RefCell<Option<StoreError>>,
    list_calls: Cell<usize>,
    uploads: RefCell<Vec<FileUpload>>,
    updates: RefCell<Vec<(String, Bill)>>,
}

impl MockStore {
    /// Store seeded with the fixture bills
    pub fn new() -> Self {
        Self::with_bills(fixture_bills())
    }

    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills: RefCell::new(bills),
            ..Default::default()
        }
    }

    pub fn fail_list(&self, error: StoreError) {
        *self.list_error.borrow_mut() = Some(error);
    }

    pub fn fail_create(&self, error: StoreError) {
        *self.create_error.borrow_mut() = Some(error);
    }

    pub fn fail_update(&self, error: StoreError) {
        *self.update_error.borrow_mut() = Some(error);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn uploads(&self) -> Vec<FileUpload> {
        self.uploads.borrow().clone()
    }

    pub fn updates(&self) -> Vec<(String, Bill)> {
        self.updates.borrow().clone()
    }
}

#[async_trait(?Send)]
impl BillStore for MockStore {
    async fn list(&self) -> StoreResult<Vec<Bill>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if let Some(error) = self.list_error.borrow().clone() {
            return Err(error);
        }
        Ok(self.bills.borrow().clone())
    }

    async fn create(&self, upload: &FileUpload) -> StoreResult<CreatedFile> {
        if let Some(error) = self.create_error.borrow().clone() {
            return Err(error);
        }
        self.uploads.borrow_mut().push(upload.clone());
        Ok(CreatedFile {
            file_url: UPLOADED_FILE_URL.to_string(),
            key: UPLOADED_FILE_KEY.to_string(),
        })
    }

    async fn update(&self, selector: &str, bill: &Bill) -> StoreResult<Bill> {
        if let Some(error) = self.update_error.borrow().clone() {
            return Err(error);
        }
        self.updates.borrow_mut().push((selector.to_string(), bill.clone()));

        let mut saved = bill.clone();
        saved.id = selector.to_string();
        let mut bills = self.bills.borrow_mut();
        match bills.iter_mut().find(|b| b.id == saved.id) {
            Some(existing) => *existing = saved.clone(),
            None => bills.push(saved.clone()),
        }
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SelectedFile;

    #[tokio::test]
    async fn test_list_returns_fixtures() {
        let store = MockStore::new();
        let bills = store.list().await.expect("list failed");
        assert_eq!(bills.len(), 4);
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MockStore::new();
        store.fail_list(StoreError::Http(404));
        let err = store.list().await.unwrap_err();
        assert_eq!(err.to_string(), "Erreur 404");
    }

    #[tokio::test]
    async fn test_create_then_update() {
        let store = MockStore::with_bills(Vec::new());
        let upload = FileUpload {
            file: SelectedFile::new("image.png", "image/png", vec![1, 2, 3]),
            email: "a@a".to_string(),
        };
        let created = store.create(&upload).await.unwrap();
        assert_eq!(created.key, "1234");
        assert_eq!(store.uploads().len(), 1);

        let mut bill = fixture_bills().remove(0);
        bill.id = String::new();
        let saved = store.update(&created.key, &bill).await.unwrap();
        assert_eq!(saved.id, "1234");
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert_eq!(store.updates()[0].0, "1234");
    }
}
