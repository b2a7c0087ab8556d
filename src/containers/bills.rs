//! Bills Container
//!
//! Loads the bill list and handles the receipt and new-bill actions.
//! Page and receipt state live in signals read by the bills view.

use std::rc::Rc;

use leptos::prelude::*;

use crate::format::{format_date, format_status};
use crate::models::{sort_by_date_desc, BillRow, BillsPage, ReceiptPreview};
use crate::router::{Navigate, Route};
use crate::store::{BillStore, StoreResult};

/// Share of the modal width given to the receipt image
const RECEIPT_WIDTH_RATIO: f64 = 0.5;

pub struct Bills {
    store: Option<Rc<dyn BillStore>>,
    navigate: Navigate,
    page: ArcRwSignal<BillsPage>,
    preview: ArcRwSignal<Option<ReceiptPreview>>,
}

impl Bills {
    pub fn new(store: Option<Rc<dyn BillStore>>, navigate: Navigate) -> Self {
        Self {
            store,
            navigate,
            page: ArcRwSignal::new(BillsPage::Loading),
            preview: ArcRwSignal::new(None),
        }
    }

    /// Bills of the session user, most recent first, with display labels
    ///
    /// A bill with an unreadable date is returned untouched instead of
    /// failing the list. Store errors are returned as they come.
    pub async fn get_bills(&self) -> StoreResult<Vec<BillRow>> {
        let Some(store) = self.store.clone() else {
            return Ok(Vec::new());
        };

        let mut bills = store.list().await?;
        sort_by_date_desc(&mut bills, |b| b);

        let rows: Vec<BillRow> = bills
            .into_iter()
            .map(|bill| match format_date(&bill.date) {
                Ok(date_label) => BillRow {
                    status_label: format_status(bill.status).to_string(),
                    date_label,
                    bill,
                },
                Err(e) => {
                    log::warn!("[BILLS] {} for bill {}", e, bill.id);
                    BillRow::raw(bill)
                }
            })
            .collect();

        log::debug!("[BILLS] Loaded {} bills", rows.len());
        Ok(rows)
    }

    pub fn page(&self) -> ArcReadSignal<BillsPage> {
        self.page.read_only()
    }

    pub fn page_state(&self) -> BillsPage {
        self.page.get_untracked()
    }

    pub(crate) fn show(&self, page: BillsPage) {
        self.page.set(page);
    }

    /// Open the receipt modal on `bill_url`
    pub fn handle_click_icon_eye(&self, bill_url: &str, modal_width: u32) -> ReceiptPreview {
        let preview = ReceiptPreview {
            url: bill_url.to_string(),
            img_width: (f64::from(modal_width) * RECEIPT_WIDTH_RATIO).floor() as u32,
        };
        self.preview.set(Some(preview.clone()));
        preview
    }

    pub fn close_receipt(&self) {
        self.preview.set(None);
    }

    /// Receipt shown in the modal, if any
    pub fn preview(&self) -> ArcReadSignal<Option<ReceiptPreview>> {
        self.preview.read_only()
    }

    pub fn handle_click_new_bill(&self) {
        (self.navigate)(Route::NewBill);
    }
}
