//! Wire and display record types
//!
//! The endpoint takes a fixed-shape JSON body and answers with an array
//! of marks records. Response fields are not guaranteed to be present,
//! and numeric-looking fields (contact, catch, marks) have been observed
//! as both strings and numbers, so the raw record is deliberately
//! tolerant and the display row substitutes a sentinel for anything
//! missing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel shown for any field absent from a response record
pub const NOT_AVAILABLE: &str = "N/A";

/// JSON POST body for one lookup
#[derive(Debug, Clone, Serialize)]
pub struct MarksRequest {
    /// Fixed checked-type constant
    #[serde(rename = "Checked_Type")]
    pub checked_type: String,
    /// Fixed evaluation session constant
    #[serde(rename = "Eval_Session")]
    pub eval_session: String,
    /// Barcode being looked up
    #[serde(rename = "Bar_Code")]
    pub bar_code: String,
}

/// One record as it arrives from the endpoint, before field defaulting
#[derive(Debug, Clone, Deserialize)]
pub struct RawMarksRecord {
    #[serde(rename = "Bar_Code", default)]
    pub bar_code: Value,
    #[serde(rename = "Center_Name", default)]
    pub center_name: Value,
    #[serde(rename = "Name", default)]
    pub name: Value,
    #[serde(rename = "Contact_No", default)]
    pub contact_no: Value,
    #[serde(rename = "Catch_No", default)]
    pub catch_no: Value,
    #[serde(rename = "Paper_Name", default)]
    pub paper_name: Value,
    #[serde(rename = "Eval_Session", default)]
    pub eval_session: Value,
    #[serde(rename = "Checked_Type", default)]
    pub checked_type: Value,
    #[serde(rename = "Checked", default)]
    pub checked: Value,
    #[serde(rename = "Total_Marks", default)]
    pub total_marks: Value,
    #[serde(rename = "Obt_Marks", default)]
    pub obt_marks: Value,
}

/// A fully extracted marks row, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct MarksRow {
    /// Barcode echoed by the endpoint
    pub bar_code: String,
    /// Examination center name
    pub center_name: String,
    /// Name of the copy holder
    pub name: String,
    /// Contact number
    pub contact_no: String,
    /// Catch number
    pub catch_no: String,
    /// Paper name
    pub paper_name: String,
    /// Evaluation session
    pub eval_session: String,
    /// Checked-type
    pub checked_type: String,
    /// Whether the copy has been checked
    pub checked: bool,
    /// Total marks for the paper
    pub total_marks: String,
    /// Marks obtained
    pub obt_marks: String,
}

impl MarksRequest {
    /// Build the payload for one barcode
    pub fn new(checked_type: &str, eval_session: &str, bar_code: &str) -> Self {
        Self {
            checked_type: checked_type.to_string(),
            eval_session: eval_session.to_string(),
            bar_code: bar_code.to_string(),
        }
    }
}

impl From<RawMarksRecord> for MarksRow {
    fn from(raw: RawMarksRecord) -> Self {
        Self {
            bar_code: field_or_sentinel(&raw.bar_code),
            center_name: field_or_sentinel(&raw.center_name),
            name: field_or_sentinel(&raw.name),
            contact_no: field_or_sentinel(&raw.contact_no),
            catch_no: field_or_sentinel(&raw.catch_no),
            paper_name: field_or_sentinel(&raw.paper_name),
            eval_session: field_or_sentinel(&raw.eval_session),
            checked_type: field_or_sentinel(&raw.checked_type),
            // Anything other than an explicit true counts as unchecked
            checked: raw.checked.as_bool().unwrap_or(false),
            total_marks: field_or_sentinel(&raw.total_marks),
            obt_marks: field_or_sentinel(&raw.obt_marks),
        }
    }
}

/// Render one response field as display text, defaulting to the sentinel
fn field_or_sentinel(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
