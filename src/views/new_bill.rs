//! New Bill Page
//!
//! Expense submission form with receipt picker.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::layout::Layout;
use crate::containers::{BillForm, NewBill};
use crate::models::{FileState, SelectedFile, SubmitState};
use crate::router::Route;

/// Expense type options
pub const EXPENSE_TYPES: &[&str] = &[
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// Message under the file input when the extension is refused
pub const FILE_ERROR_MESSAGE: &str = "Seuls les fichiers .jpg, .jpeg et .png sont acceptés";

/// Form before any input: first expense type selected, everything else empty
pub fn blank_form() -> BillForm {
    BillForm {
        expense_type: EXPENSE_TYPES[0].to_string(),
        ..BillForm::default()
    }
}

pub fn file_error_class(file: &FileState) -> &'static str {
    if file.shows_error() {
        "errorMessageFile displayed"
    } else {
        "errorMessageFile"
    }
}

async fn read_file(file: &web_sys::File) -> Result<SelectedFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile::new(file.name(), file.type_(), bytes))
}

/// Input handler writing the control's value into one form field
fn bind<E: JsCast + 'static>(
    form: RwSignal<BillForm>,
    field: fn(&mut BillForm) -> &mut String,
) -> impl Fn(E) + Copy + 'static {
    move |ev: E| {
        let value = event_target_value(&ev);
        form.update(|f| *field(f) = value);
    }
}

#[component]
pub fn NewBillView(new_bill: Rc<NewBill>) -> impl IntoView {
    let file = ReadSignal::from(new_bill.file());
    let submission = ReadSignal::from(new_bill.submission());
    let new_bill = StoredValue::new_local(new_bill);
    let form = RwSignal::new(blank_form());

    let on_file = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(picked) = input.files().and_then(|files| files.get(0)) else { return };
        let new_bill = new_bill.get_value();

        spawn_local(async move {
            match read_file(&picked).await {
                Ok(selected) => {
                    new_bill.handle_change_file(selected).await;
                }
                Err(e) => log::error!("[NEW_BILL] Could not read selected file: {:?}", e),
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let values = form.get_untracked();
        let new_bill = new_bill.get_value();

        spawn_local(async move {
            let outcome = new_bill.handle_submit(values).await;
            log::debug!("[NEW_BILL] Submit finished: {:?}", outcome);
        });
    };

    view! {
        <Layout active=Route::NewBill.nav_icon()>
            <div class="content">
                <div class="content-header">
                    <div class="content-title">"Envoyer une note de frais"</div>
                </div>
                <div class="form-newbill-container content-inner">
                    <form data-testid="form-new-bill" on:submit=on_submit>
                        <div class="row">
                            <div class="col-md-6">
                                <div class="col-half">
                                    <label class="bold-label">"Type de dépense"</label>
                                    <select
                                        required
                                        class="form-control blue-border"
                                        data-testid="expense-type"
                                        on:change=bind(form, |f| &mut f.expense_type)
                                    >
                                        {EXPENSE_TYPES.iter().map(|label| view! { <option>{*label}</option> }).collect_view()}
                                    </select>
                                </div>
                                <div class="col-half">
                                    <label class="bold-label">"Nom de la dépense"</label>
                                    <input
                                        type="text"
                                        class="form-control blue-border"
                                        data-testid="expense-name"
                                        placeholder="Vol Paris Londres"
                                        on:input=bind(form, |f| &mut f.name)
                                    />
                                </div>
                                <div class="col-half">
                                    <label class="bold-label">"Date"</label>
                                    <input
                                        required
                                        type="date"
                                        class="form-control blue-border"
                                        data-testid="datepicker"
                                        on:input=bind(form, |f| &mut f.date)
                                    />
                                </div>
                                <div class="col-half">
                                    <label class="bold-label">"Montant TTC"</label>
                                    <input
                                        required
                                        type="number"
                                        class="form-control blue-border"
                                        data-testid="amount"
                                        placeholder="348"
                                        on:input=bind(form, |f| &mut f.amount)
                                    />
                                </div>
                                <div class="col-half">
                                    <label class="bold-label">"TVA"</label>
                                    <div class="input-group">
                                        <input
                                            type="number"
                                            class="form-control blue-border"
                                            data-testid="vat"
                                            placeholder="70"
                                            on:input=bind(form, |f| &mut f.vat)
                                        />
                                        <input
                                            required
                                            type="number"
                                            class="form-control blue-border"
                                            data-testid="pct"
                                            placeholder="20"
                                            on:input=bind(form, |f| &mut f.pct)
                                        />
                                    </div>
                                </div>
                            </div>
                            <div class="col-md-6">
                                <div class="col-half">
                                    <label class="bold-label">"Commentaire"</label>
                                    <textarea
                                        class="form-control blue-border"
                                        data-testid="commentary"
                                        rows="3"
                                        on:input=bind(form, |f| &mut f.commentary)
                                    ></textarea>
                                </div>
                                <div class="col-half">
                                    <label class="bold-label">"Justificatif"</label>
                                    <div>
                                        <input
                                            required
                                            type="file"
                                            class="form-control blue-border"
                                            data-testid="file"
                                            accept=".jpg,.jpeg,.png"
                                            on:change=on_file
                                        />
                                        <div class=move || file.with(file_error_class) data-testid="file-error">
                                            {FILE_ERROR_MESSAGE}
                                        </div>
                                    </div>
                                </div>
                            </div>
                        </div>
                        <div class="row">
                            <div class="col-md-6">
                                <button
                                    type="submit"
                                    id="btn-send-bill"
                                    class="btn btn-primary"
                                    prop:disabled=move || submission.get() == SubmitState::Submitting
                                >
                                    "Envoyer"
                                </button>
                            </div>
                        </div>
                    </form>
                </div>
            </div>
        </Layout>
    }
}
