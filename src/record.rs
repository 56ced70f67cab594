use std::fmt;
use trust_dns_proto::rr::{RData, RecordType};

/// The record types a lookup can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    A,
    Mx,
    Ptr,
    Txt,
}

impl From<RecordKind> for RecordType {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::A => RecordType::A,
            RecordKind::Mx => RecordType::MX,
            RecordKind::Ptr => RecordType::PTR,
            RecordKind::Txt => RecordType::TXT,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&RecordType::from(*self), f)
    }
}

/// A report category. Every enabled category becomes one worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Dmarc,
    Spf,
    Mx,
    A,
    Ptr,
}

impl Category {
    /// All categories, in the order they are checked for each host.
    pub const ALL: [Category; 5] = [
        Category::Dmarc,
        Category::Spf,
        Category::Mx,
        Category::A,
        Category::Ptr,
    ];

    pub fn sheet_name(self) -> &'static str {
        match self {
            Category::Dmarc => "DMARC Data",
            Category::Spf => "SPF Data",
            Category::Mx => "MX Data",
            Category::A => "A Data",
            Category::Ptr => "PTR Data",
        }
    }

    /// Prefix of the value columns in the header row, e.g. `MX_DATA` for `MX_DATA_0`.
    pub fn header_prefix(self) -> String {
        self.sheet_name().to_uppercase().replace(' ', "_")
    }

    pub fn kind(self) -> RecordKind {
        match self {
            Category::Dmarc | Category::Spf => RecordKind::Txt,
            Category::Mx => RecordKind::Mx,
            Category::A => RecordKind::A,
            Category::Ptr => RecordKind::Ptr,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// The outcome of a single query. A successful query may carry no values at all when a filter
/// dropped every record; that is distinct from a failure, which always carries its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Records(Vec<String>),
    Failed(String),
}

impl LookupOutcome {
    /// The cells this outcome contributes to a report row.
    pub fn values(&self) -> &[String] {
        match self {
            LookupOutcome::Records(records) => records,
            LookupOutcome::Failed(reason) => std::slice::from_ref(reason),
        }
    }

    pub fn width(&self) -> usize {
        self.values().len()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LookupOutcome::Failed(_))
    }
}

fn trim_root(text: &str) -> String {
    text.trim_end_matches('.').to_string()
}

/// Renders one answer record as the text that goes into the report.
pub(crate) fn record_text(rdata: &RData) -> String {
    match rdata {
        // character-strings are joined without a delimiter
        RData::TXT(txt) => txt
            .iter()
            .map(|chunk| String::from_utf8_lossy(chunk))
            .collect(),
        // preference is dropped
        RData::MX(mx) => trim_root(&mx.exchange().to_utf8()),
        RData::A(_) | RData::AAAA(_) | RData::CNAME(_) | RData::PTR(_) => {
            trim_root(&rdata.to_string())
        }
        other => trim_root(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use trust_dns_proto::rr::rdata::{MX, PTR, TXT};
    use trust_dns_proto::rr::Name;

    #[test]
    fn txt_segments_are_concatenated() {
        let txt = RData::TXT(TXT::new(vec![
            "v=spf1 include:_spf.example.com ".to_string(),
            "~all".to_string(),
        ]));
        assert_eq!(record_text(&txt), "v=spf1 include:_spf.example.com ~all");
    }

    #[test]
    fn mx_keeps_only_the_exchange() {
        let mx = RData::MX(MX::new(10, Name::from_ascii("mail.example.com.").unwrap()));
        assert_eq!(record_text(&mx), "mail.example.com");
    }

    #[test]
    fn address_and_pointer_text() {
        let a = RData::A(Ipv4Addr::new(93, 184, 216, 34).into());
        assert_eq!(record_text(&a), "93.184.216.34");

        let ptr = RData::PTR(PTR(Name::from_ascii("dns.google.").unwrap()));
        assert_eq!(record_text(&ptr), "dns.google");
    }

    #[test]
    fn failed_outcome_has_one_value() {
        let failed = LookupOutcome::Failed("no record found".to_string());
        assert_eq!(failed.width(), 1);
        assert!(failed.is_failed());
        assert_eq!(failed.values(), ["no record found".to_string()]);

        let empty = LookupOutcome::Records(vec![]);
        assert_eq!(empty.width(), 0);
        assert!(!empty.is_failed());
    }

    #[test]
    fn category_names() {
        assert_eq!(Category::Dmarc.header_prefix(), "DMARC_DATA");
        assert_eq!(Category::Ptr.sheet_name(), "PTR Data");
        assert_eq!(Category::Spf.kind(), RecordKind::Txt);
        assert_eq!(RecordType::from(Category::Mx.kind()), RecordType::MX);
    }
}
