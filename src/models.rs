//! Frontend Models
//!
//! Bills as stored remotely, the session user, and the transient
//! view/upload state of the two employee pages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Approval status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }
}

/// Expense record (matches the remote store document)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    /// ISO calendar date, `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub vat: String,
    pub pct: u32,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_name: String,
    pub status: BillStatus,
    #[serde(default)]
    pub comment_admin: String,
}

impl Bill {
    /// Parsed date, `None` when the stored value is not a calendar date
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Sort bills most recent first; undated bills go last, input order kept on ties
pub fn sort_by_date_desc<T, F>(items: &mut [T], bill: F)
where
    F: Fn(&T) -> &Bill,
{
    items.sort_by(|a, b| bill(b).parsed_date().cmp(&bill(a).parsed_date()));
}

/// A bill ready for display in the list
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub bill: Bill,
    pub date_label: String,
    pub status_label: String,
}

impl BillRow {
    /// Row showing the stored values untouched
    pub fn raw(bill: Bill) -> Self {
        Self {
            date_label: bill.date.clone(),
            status_label: bill.status.as_str().to_string(),
            bill,
        }
    }
}

/// State the bills page is rendered from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BillsPage {
    #[default]
    Loading,
    /// Store failure message, displayed verbatim
    Failed(String),
    Loaded(Vec<BillRow>),
}

/// Receipt shown in the `#modaleFile` modal
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptPreview {
    pub url: String,
    pub img_width: u32,
}

/// Role of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// User persisted in local storage under the `user` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SessionUser {
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            user_type: UserType::Employee,
            email: Some(email.into()),
        }
    }

    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }
}

/// File picked in the new-bill form
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Multipart payload sent to the store's file endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file: SelectedFile,
    pub email: String,
}

/// Response of the store's file endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFile {
    pub file_url: String,
    pub key: String,
}

/// Receipt stored remotely, kept until the form is submitted
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_url: String,
    pub key: String,
    pub file_name: String,
}

/// Receipt track of the new-bill form
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FileState {
    #[default]
    Empty,
    /// Accepted extension, not (yet) uploaded
    Selected { file_name: String },
    /// Extension outside the allow-list
    Rejected { file_name: String },
    Uploaded(UploadedFile),
}

impl FileState {
    pub fn shows_error(&self) -> bool {
        matches!(self, FileState::Rejected { .. })
    }

    pub fn uploaded(&self) -> Option<&UploadedFile> {
        match self {
            FileState::Uploaded(file) => Some(file),
            _ => None,
        }
    }
}

/// Submission track of the new-bill form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bill(id: &str, date: &str) -> Bill {
        Bill {
            id: id.to_string(),
            email: "a@a".to_string(),
            expense_type: "Transports".to_string(),
            name: format!("bill {}", id),
            amount: 100.0,
            date: date.to_string(),
            vat: "20".to_string(),
            pct: 20,
            commentary: String::new(),
            file_url: String::new(),
            file_name: String::new(),
            status: BillStatus::Pending,
            comment_admin: String::new(),
        }
    }

    #[test]
    fn test_bill_json_field_names() {
        let json = r#"{
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": "80",
            "fileUrl": "https://test.storage.tld/a.jpg",
            "status": "accepted",
            "type": "Hôtel et logement",
            "commentary": "séminaire billed",
            "name": "encore",
            "fileName": "a.jpg",
            "date": "2004-04-04",
            "amount": 400,
            "commentAdmin": "ok",
            "email": "a@a",
            "pct": 20
        }"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.expense_type, "Hôtel et logement");
        assert_eq!(bill.status, BillStatus::Accepted);
        assert_eq!(bill.amount, 400.0);
        assert_eq!(bill.comment_admin, "ok");

        let back = serde_json::to_value(&bill).unwrap();
        assert_eq!(back["fileUrl"], "https://test.storage.tld/a.jpg");
        assert_eq!(back["type"], "Hôtel et logement");
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut bills = vec![
            make_bill("1", "2001-01-01"),
            make_bill("2", "not a date"),
            make_bill("3", "2004-04-04"),
            make_bill("4", "2002-02-02"),
        ];
        sort_by_date_desc(&mut bills, |b| b);
        let ids: Vec<&str> = bills.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "4", "1", "2"]);
    }

    #[test]
    fn test_session_user_without_email() {
        let user: SessionUser = serde_json::from_str(r#"{"type":"Employee"}"#).unwrap();
        assert!(user.is_employee());
        assert_eq!(user.email, None);

        let admin: SessionUser = serde_json::from_str(r#"{"type":"Admin","email":"b@b"}"#).unwrap();
        assert!(!admin.is_employee());
    }

    #[test]
    fn test_file_state_error_flag() {
        assert!(!FileState::Empty.shows_error());
        assert!(FileState::Rejected { file_name: "a.pdf".into() }.shows_error());
        assert!(!FileState::Selected { file_name: "a.png".into() }.shows_error());
    }
}
