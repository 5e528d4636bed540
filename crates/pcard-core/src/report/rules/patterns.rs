//! Common regex patterns for charge card usage report pages.

use lazy_static::lazy_static;
use regex::Regex;

/// Date shape shared by every pattern below: 1-2 digit month, then fixed width.
const DATE: &str = r"[0-9]{1,2}/[0-9]{2}/[0-9]{4}";

/// Dollar amount: `$`, digit groups each with an optional `.`/`,`
/// separator, then a mandatory `.` and up to two digits.
const AMOUNT: &str = r"\$(?:[0-9]+[.,]?)+\.[0-9]?[0-9]?";

/// Dollar sign and digits with no decimal part, e.g. `$100`.
const DANGLING_AMOUNT: &str = r"\$[0-9.,]+";

lazy_static! {
    pub static ref DATE_PATTERN: Regex = Regex::new(DATE).unwrap();

    pub static ref AMOUNT_PATTERN: Regex = Regex::new(AMOUNT).unwrap();

    // Vendor text runs straight into the date, so the date is consumed as
    // the terminator and only the leading run is captured.
    pub static ref VENDOR_AFTER_CARDHOLDER: Regex = Regex::new(
        &format!(r"(?s)Cardholder(.*?){}", DATE)
    ).unwrap();

    pub static ref VENDOR_BEFORE_DATE: Regex = Regex::new(
        &format!(r"(?s)(.*?){}", DATE)
    ).unwrap();

    // Page header ("Page 3 of 41")
    pub static ref PAGE_HEADER: Regex = Regex::new(
        r"Page [0-9].* of [0-9]*"
    ).unwrap();

    // Agency sits between the page header and the "Vendor Name" column label
    pub static ref AGENCY_LINE: Regex = Regex::new(
        r"Page [0-9].* of [0-9]*(.*)\s*.*Vendor Name"
    ).unwrap();

    // One transaction: vendor-name characters, then date, then amount. An
    // entry whose amount lacks the decimal part still ends here, so its
    // digits cannot leak into the next entry's vendor run.
    pub static ref CANDIDATE_ENTRY: Regex = Regex::new(
        &format!(r"[a-zA-Z0-9_ &#.\-/\s,]*{}(?:{}|{})", DATE, AMOUNT, DANGLING_AMOUNT)
    ).unwrap();
}

/// Literal label that restarts a cardholder block in the report layout.
pub const CARDHOLDER_MARKER: &str = "Cardholder";
