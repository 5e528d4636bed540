//! Page-level header fields: page number and agency.

use tracing::trace;

use crate::models::record::{Agency, PageNumber};

use super::patterns::{AGENCY_LINE, PAGE_HEADER};

/// Page number from the first `Page N ... of M` header.
///
/// The number is the first whitespace-delimited token after `Page`; a
/// token that is not an integer counts as a missing header.
pub fn extract_page_number(text: &str) -> PageNumber {
    let Some(header) = PAGE_HEADER.find(text) else {
        trace!("No page header found");
        return PageNumber::Unknown;
    };

    match header.as_str().split_whitespace().nth(1).map(str::parse::<u32>) {
        Some(Ok(number)) => PageNumber::Known(number),
        _ => {
            trace!("Unparseable page header: {:?}", header.as_str());
            PageNumber::Unknown
        }
    }
}

/// Agency named between the page header and the `Vendor Name` label.
pub fn extract_agency(text: &str) -> Agency {
    let agency = AGENCY_LINE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty());

    match agency {
        Some(name) => Agency::Known(name.to_string()),
        None => {
            trace!("No agency line found");
            Agency::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "Page 3 of 41 DEPARTMENT OF REVENUE\nCardholder Vendor Name Date Amount\n";

    #[test]
    fn test_page_number() {
        assert_eq!(extract_page_number(HEADER), PageNumber::Known(3));
    }

    #[test]
    fn test_page_number_missing() {
        assert_eq!(extract_page_number("ACME01/02/2022$1.00"), PageNumber::Unknown);
    }

    #[test]
    fn test_page_number_not_integer() {
        assert_eq!(extract_page_number("Page 3rd of 41"), PageNumber::Unknown);
    }

    #[test]
    fn test_agency() {
        assert_eq!(
            extract_agency(HEADER),
            Agency::Known("DEPARTMENT OF REVENUE".to_string())
        );
    }

    #[test]
    fn test_agency_on_header_line() {
        assert_eq!(
            extract_agency("Page 1 of 2 CLEMSON UNIVERSITY Vendor Name"),
            Agency::Known("CLEMSON UNIVERSITY".to_string())
        );
    }

    #[test]
    fn test_agency_missing() {
        assert_eq!(extract_agency("Page 1 of 2 CLEMSON UNIVERSITY"), Agency::Unknown);
        assert_eq!(extract_agency("Vendor Name"), Agency::Unknown);
    }

    #[test]
    fn test_agency_blank() {
        assert_eq!(extract_agency("Page 1 of 2\nVendor Name"), Agency::Unknown);
    }
}
