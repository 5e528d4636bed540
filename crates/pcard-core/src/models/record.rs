//! Purchase-card transaction records extracted from report pages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Serialized form of a page-level value that was not found on the page.
pub const UNKNOWN: &str = "unknown";

/// A single purchase-card transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Vendor name with surrounding whitespace and line breaks removed.
    pub vendor: String,

    /// Transaction date exactly as printed (`MM/DD/YYYY`).
    pub date: String,

    /// Dollar amount exactly as printed, including the leading `$`.
    pub amount: String,

    /// Page number from the page header.
    pub page: PageNumber,

    /// Agency owning the page.
    pub agency: Agency,
}

impl TransactionRecord {
    /// Returns the field value as written in CSV output.
    pub fn field(&self, field: RecordField) -> String {
        match field {
            RecordField::Vendor => self.vendor.clone(),
            RecordField::Date => self.date.clone(),
            RecordField::Amount => self.amount.clone(),
            RecordField::Page => self.page.to_string(),
            RecordField::Agency => self.agency.to_string(),
        }
    }
}

/// Names of the record fields, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Vendor,
    Date,
    Amount,
    Page,
    Agency,
}

impl RecordField {
    /// All fields in the order they are written out.
    pub const ALL: [RecordField; 5] = [
        RecordField::Vendor,
        RecordField::Date,
        RecordField::Amount,
        RecordField::Page,
        RecordField::Agency,
    ];

    /// Column name used in JSON and CSV output.
    pub fn name(&self) -> &'static str {
        match self {
            RecordField::Vendor => "vendor",
            RecordField::Date => "date",
            RecordField::Amount => "amount",
            RecordField::Page => "page",
            RecordField::Agency => "agency",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Page number read from the `Page N of M` header.
///
/// Serialized as a bare integer, or the string `"unknown"` when the header
/// was not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "PageRepr", into = "PageRepr")]
pub enum PageNumber {
    Known(u32),
    #[default]
    Unknown,
}

impl PageNumber {
    pub fn is_known(&self) -> bool {
        matches!(self, PageNumber::Known(_))
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNumber::Known(n) => write!(f, "{}", n),
            PageNumber::Unknown => f.write_str(UNKNOWN),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PageRepr {
    Number(u32),
    Sentinel(String),
}

impl TryFrom<PageRepr> for PageNumber {
    type Error = String;

    fn try_from(repr: PageRepr) -> Result<Self, Self::Error> {
        match repr {
            PageRepr::Number(n) => Ok(PageNumber::Known(n)),
            PageRepr::Sentinel(s) if s == UNKNOWN => Ok(PageNumber::Unknown),
            PageRepr::Sentinel(s) => s
                .parse()
                .map(PageNumber::Known)
                .map_err(|_| format!("invalid page number: {:?}", s)),
        }
    }
}

impl From<PageNumber> for PageRepr {
    fn from(page: PageNumber) -> Self {
        match page {
            PageNumber::Known(n) => PageRepr::Number(n),
            PageNumber::Unknown => PageRepr::Sentinel(UNKNOWN.to_string()),
        }
    }
}

/// Agency (issuing entity) named in the page header.
///
/// Serialized as a plain string; `"unknown"` stands for the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Agency {
    Known(String),
    #[default]
    Unknown,
}

impl Agency {
    pub fn is_known(&self) -> bool {
        matches!(self, Agency::Known(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Agency::Known(name) => name,
            Agency::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Agency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// The wire format cannot tell an agency literally named "unknown" from the
// sentinel; both read back as `Unknown`.
impl From<String> for Agency {
    fn from(s: String) -> Self {
        if s == UNKNOWN {
            Agency::Unknown
        } else {
            Agency::Known(s)
        }
    }
}

impl From<Agency> for String {
    fn from(agency: Agency) -> Self {
        match agency {
            Agency::Known(name) => name,
            Agency::Unknown => UNKNOWN.to_string(),
        }
    }
}
