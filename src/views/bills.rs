//! Bills Page
//!
//! Table of the employee's bills with the receipt modal.

use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;

use super::layout::{ErrorPane, Layout, LoadingPane};
use crate::containers::Bills;
use crate::models::{sort_by_date_desc, BillRow, BillsPage, ReceiptPreview};
use crate::router::Route;

const TABLE_HEADERS: [&str; 6] = ["Type", "Nom", "Date", "Montant", "Statut", "Actions"];

/// Rows in display order, latest first
pub fn ordered_rows(rows: &[BillRow]) -> Vec<BillRow> {
    let mut ordered = rows.to_vec();
    sort_by_date_desc(&mut ordered, |row| &row.bill);
    ordered
}

pub fn amount_label(amount: f64) -> String {
    format!("{} €", amount)
}

fn modal_class(open: bool) -> &'static str {
    if open {
        "modal fade show"
    } else {
        "modal fade"
    }
}

fn modal_style(open: bool) -> &'static str {
    if open {
        "display: block;"
    } else {
        "display: none;"
    }
}

#[component]
pub fn BillsView(bills: Rc<Bills>, modal_width: u32) -> impl IntoView {
    let page = ReadSignal::from(bills.page());
    let preview = ReadSignal::from(bills.preview());
    let bills = StoredValue::new_local(bills);
    let modal_ref = NodeRef::<html::Div>::new();

    let open_receipt = Callback::new(move |url: String| {
        // Hidden modals measure 0, fall back to the configured width
        let width = modal_ref
            .get_untracked()
            .map(|modal| modal.client_width())
            .filter(|width| *width > 0)
            .map(|width| width as u32)
            .unwrap_or(modal_width);
        bills.with_value(|b| {
            b.handle_click_icon_eye(&url, width);
        });
    });
    let close_receipt = Callback::new(move |_: ()| bills.with_value(|b| b.close_receipt()));
    let new_bill = move |_| bills.with_value(|b| b.handle_click_new_bill());

    view! {
        <Layout active=Route::Bills.nav_icon()>
            {move || match page.get() {
                BillsPage::Loading => view! { <LoadingPane /> }.into_any(),
                BillsPage::Failed(message) => view! { <ErrorPane message=message /> }.into_any(),
                BillsPage::Loaded(rows) => view! {
                    <div class="content">
                        <div class="content-header">
                            <div class="content-title">"Mes notes de frais"</div>
                            <button type="button" data-testid="btn-new-bill" class="btn btn-primary" on:click=new_bill>
                                "Nouvelle note de frais"
                            </button>
                        </div>
                        <div id="data-table">
                            <table id="example" class="table table-striped" style="width:100%">
                                <thead>
                                    <tr>
                                        {TABLE_HEADERS.into_iter().map(|label| view! { <th>{label}</th> }).collect_view()}
                                    </tr>
                                </thead>
                                <tbody data-testid="tbody">
                                    {ordered_rows(&rows)
                                        .into_iter()
                                        .map(|row| view! { <BillRowView row=row on_open=open_receipt /> })
                                        .collect_view()}
                                </tbody>
                            </table>
                        </div>
                    </div>
                }.into_any(),
            }}
            <ReceiptModal preview=preview modal_ref=modal_ref on_close=close_receipt />
        </Layout>
    }
}

#[component]
fn BillRowView(row: BillRow, on_open: Callback<String>) -> impl IntoView {
    let BillRow { bill, date_label, status_label } = row;
    let url = bill.file_url.clone();

    view! {
        <tr data-testid="bill-row">
            <td>{bill.expense_type}</td>
            <td>{bill.name}</td>
            <td data-testid="bill-date">{date_label}</td>
            <td>{amount_label(bill.amount)}</td>
            <td>{status_label}</td>
            <td>
                <div class="icon-actions">
                    <div
                        id="eye"
                        data-testid="icon-eye"
                        data-bill-url=bill.file_url
                        on:click=move |_| on_open.run(url.clone())
                    >
                        <span class="icon icon-eye"></span>
                    </div>
                </div>
            </td>
        </tr>
    }
}

/// `#modaleFile`, open and showing the receipt while `preview` is set
#[component]
pub fn ReceiptModal(
    preview: ReadSignal<Option<ReceiptPreview>>,
    modal_ref: NodeRef<html::Div>,
    on_close: Callback<()>,
) -> impl IntoView {
    let open = move || preview.with(Option::is_some);

    view! {
        <div
            id="modaleFile"
            data-testid="modaleFile"
            node_ref=modal_ref
            class=move || modal_class(open())
            style=move || modal_style(open())
            tabindex="-1"
            role="dialog"
        >
            <div class="modal-dialog modal-dialog-centered modal-lg" role="document">
                <div class="modal-content">
                    <div class="modal-header">
                        <h5 class="modal-title">"Justificatif"</h5>
                        <button
                            type="button"
                            class="close"
                            data-testid="modal-close"
                            aria-label="Close"
                            on:click=move |_| on_close.run(())
                        >
                            "×"
                        </button>
                    </div>
                    <div class="modal-body">
                        {move || preview.get().map(|receipt| view! {
                            <div class="bill-proof-container" style="text-align: center;">
                                <img width=receipt.img_width.to_string() src=receipt.url alt="Bill" />
                            </div>
                        })}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixture_bills;

    fn raw_rows() -> Vec<BillRow> {
        fixture_bills().into_iter().map(BillRow::raw).collect()
    }

    #[test]
    fn test_bills_ordered_latest_first() {
        let dates: Vec<String> = ordered_rows(&raw_rows())
            .into_iter()
            .map(|row| row.date_label)
            .collect();
        assert_eq!(dates.len(), 4);

        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_order_ignores_input_order() {
        let mut reversed = raw_rows();
        reversed.reverse();
        assert_eq!(ordered_rows(&reversed), ordered_rows(&raw_rows()));
    }

    #[test]
    fn test_modal_visibility() {
        assert_eq!(modal_class(false), "modal fade");
        assert_eq!(modal_style(false), "display: none;");
        assert!(modal_class(true).split(' ').any(|c| c == "show"));
        assert_eq!(modal_style(true), "display: block;");
    }

    #[test]
    fn test_amount_label() {
        assert_eq!(amount_label(400.0), "400 €");
        assert_eq!(amount_label(12.5), "12.5 €");
    }
}
