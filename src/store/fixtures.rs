//! Fixture Bills
//!
//! Seed data for the in-memory store.

use crate::models::{Bill, BillStatus};

fn bill(
    id: &str,
    expense_type: &str,
    name: &str,
    amount: f64,
    date: &str,
    vat: &str,
    status: BillStatus,
    commentary: &str,
    comment_admin: &str,
    file_name: &str,
) -> Bill {
    Bill {
        id: id.to_string(),
        email: "a@a".to_string(),
        expense_type: expense_type.to_string(),
        name: name.to_string(),
        amount,
        date: date.to_string(),
        vat: vat.to_string(),
        pct: 20,
        commentary: commentary.to_string(),
        file_url: format!("https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2F{}?alt=media", file_name),
        file_name: file_name.to_string(),
        status,
        comment_admin: comment_admin.to_string(),
    }
}

/// Four bills of `a@a`, deliberately not in date order
pub fn fixture_bills() -> Vec<Bill> {
    vec![
        bill(
            "47qAXb6fIm2zOKkLzMro",
            "Hôtel et logement",
            "encore",
            400.0,
            "2004-04-04",
            "80",
            BillStatus::Pending,
            "séminaire billed",
            "ok",
            "preview-facture-free-201801-pdf-1.jpg",
        ),
        bill(
            "BeKy5Mo4jkmdfPGYpTxZ",
            "Transports",
            "test1",
            100.0,
            "2001-01-01",
            "",
            BillStatus::Refused,
            "plop",
            "en fait non",
            "1592770761.jpeg",
        ),
        bill(
            "UIUZtnPQvnbFnB0ozvJh",
            "Services en ligne",
            "test3",
            300.0,
            "2003-03-03",
            "60",
            BillStatus::Accepted,
            "",
            "bon bah d'accord",
            "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
        ),
        bill(
            "qcCK3SzECmaZAGRrHjaC",
            "Restaurants et bars",
            "test2",
            200.0,
            "2002-02-02",
            "40",
            BillStatus::Refused,
            "test2",
            "pas la bonne facture",
            "preview-facture-free-201801-pdf-1.jpg",
        ),
    ]
}
