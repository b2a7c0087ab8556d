//! NewBill Container
//!
//! Receipt validation and upload, then bill assembly and submission.
//! Upload and submission are independent best-effort steps: a receipt
//! uploaded for a bill whose submission fails is left in the store.

use std::rc::Rc;

use chrono::NaiveDate;
use leptos::prelude::*;
use thiserror::Error;

use crate::models::{Bill, BillStatus, FileState, FileUpload, SelectedFile, SubmitState, UploadedFile};
use crate::router::{Navigate, Route};
use crate::session::SessionContext;
use crate::store::{BillStore, StoreError};

/// Receipt extensions accepted for upload
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// VAT percentage used when the field is empty or unreadable
const DEFAULT_PCT: u32 = 20;

/// Extension check on the text after the last dot, case-insensitive
pub fn has_allowed_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Raw values of the new-bill form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillForm {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

impl BillForm {
    /// Pending bill from the form, receipt metadata and session email
    pub fn into_bill(self, email: String, receipt: Option<&UploadedFile>) -> Result<Bill, FormError> {
        let date = self.date.trim();
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(FormError::InvalidDate(self.date));
        }
        let amount = match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => amount,
            _ => return Err(FormError::InvalidAmount(self.amount)),
        };
        let pct = self.pct.trim().parse().unwrap_or(DEFAULT_PCT);

        Ok(Bill {
            id: receipt.map(|r| r.key.clone()).unwrap_or_default(),
            email,
            expense_type: self.expense_type,
            name: self.name,
            amount,
            date: date.to_string(),
            vat: self.vat,
            pct,
            commentary: self.commentary,
            file_url: receipt.map(|r| r.file_url.clone()).unwrap_or_default(),
            file_name: receipt.map(|r| r.file_name.clone()).unwrap_or_default(),
            status: BillStatus::Pending,
            comment_admin: String::new(),
        })
    }
}

/// Result of one submit event
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Stored remotely, navigated to the bills list
    Posted(Bill),
    /// No store configured; navigated without posting
    Skipped(Bill),
    Invalid(FormError),
    Failed(StoreError),
}

pub struct NewBill {
    store: Option<Rc<dyn BillStore>>,
    session: SessionContext,
    navigate: Navigate,
    file: ArcRwSignal<FileState>,
    submit: ArcRwSignal<SubmitState>,
}

impl NewBill {
    pub fn new(store: Option<Rc<dyn BillStore>>, session: SessionContext, navigate: Navigate) -> Self {
        Self {
            store,
            session,
            navigate,
            file: ArcRwSignal::new(FileState::Empty),
            submit: ArcRwSignal::new(SubmitState::Editing),
        }
    }

    /// Receipt track, read by the file error indicator
    pub fn file(&self) -> ArcReadSignal<FileState> {
        self.file.read_only()
    }

    pub fn submission(&self) -> ArcReadSignal<SubmitState> {
        self.submit.read_only()
    }

    pub fn file_state(&self) -> FileState {
        self.file.get_untracked()
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit.get_untracked()
    }

    fn set_file(&self, state: FileState) {
        self.file.set(state);
    }

    /// Validate the picked receipt and upload it when accepted
    pub async fn handle_change_file(&self, file: SelectedFile) -> FileState {
        let file_name = file.name.clone();
        if !has_allowed_extension(&file_name) {
            log::warn!("[NEW_BILL] Refused receipt {}", file_name);
            self.set_file(FileState::Rejected { file_name });
            return self.file_state();
        }
        self.set_file(FileState::Selected { file_name: file_name.clone() });

        let Some(store) = self.store.clone() else {
            return self.file_state();
        };
        let upload = FileUpload {
            file,
            email: self.session.email(),
        };
        match store.create(&upload).await {
            Ok(created) => {
                log::debug!("[NEW_BILL] Uploaded {} as {}", file_name, created.key);
                self.set_file(FileState::Uploaded(UploadedFile {
                    file_url: created.file_url,
                    key: created.key,
                    file_name,
                }));
            }
            Err(e) => log::error!("[NEW_BILL] Upload of {} failed: {}", file_name, e),
        }
        self.file_state()
    }

    /// Build the bill from the form and post it
    pub async fn handle_submit(&self, form: BillForm) -> SubmitOutcome {
        self.submit.set(SubmitState::Submitting);
        let receipt = self.file.with_untracked(|file| file.uploaded().cloned());

        let bill = match form.into_bill(self.session.email(), receipt.as_ref()) {
            Ok(bill) => bill,
            Err(e) => {
                log::warn!("[NEW_BILL] {}", e);
                self.submit.set(SubmitState::Editing);
                return SubmitOutcome::Invalid(e);
            }
        };

        let Some(store) = self.store.clone() else {
            log::debug!("[NEW_BILL] No store, bill not posted");
            self.finish();
            return SubmitOutcome::Skipped(bill);
        };

        let selector = receipt.map(|r| r.key).unwrap_or_default();
        match store.update(&selector, &bill).await {
            Ok(saved) => {
                self.finish();
                SubmitOutcome::Posted(saved)
            }
            Err(e) => {
                log::error!("[NEW_BILL] Posting bill failed: {}", e);
                self.submit.set(SubmitState::Editing);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn finish(&self) {
        self.submit.set(SubmitState::Submitted);
        self.set_file(FileState::Empty);
        (self.navigate)(Route::Bills);
    }
}
