//! Filename-based notice lookup.
//!
//! The classifier is a lookup table of registered [`NoticeTemplate`]s checked
//! in registration order; the first template whose token appears in the
//! filename (case-insensitive) wins. Adding a notice type means registering a
//! template, the control flow never changes.

use crate::notice::{NoticeRecord, NoticeTemplate};
use crate::notices::all_notices;

/// Ordered token → record lookup table.
pub struct Classifier {
    notices: Vec<Box<dyn NoticeTemplate>>,
}

impl Classifier {
    /// Create an empty classifier. Nothing will match until templates are added.
    pub fn new() -> Self {
        Self {
            notices: Vec::new(),
        }
    }

    /// Create a classifier with every built-in notice type.
    pub fn auto() -> Self {
        let mut classifier = Self::new();
        for notice in all_notices() {
            classifier.add(notice);
        }
        classifier
    }

    /// Register a template. Later registrations are checked after earlier ones.
    pub fn add(&mut self, notice: Box<dyn NoticeTemplate>) {
        self.notices.push(notice);
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Registered templates in match order.
    pub fn notices(&self) -> impl Iterator<Item = &dyn NoticeTemplate> {
        self.notices.iter().map(|n| n.as_ref())
    }

    /// Registered notice names in match order.
    pub fn names(&self) -> Vec<&'static str> {
        self.notices.iter().map(|n| n.name()).collect()
    }

    /// Look up the record for `filename`. First match wins.
    pub fn classify(&self, filename: &str) -> Option<&'static NoticeRecord> {
        self.notices
            .iter()
            .find(|n| n.matches(filename))
            .map(|n| n.record())
    }

    /// User-facing message for a filename that matched nothing.
    pub fn miss_message(&self) -> String {
        format!(
            "Could not identify notice type ({}) from filename.",
            join_or(&self.names())
        )
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::auto()
    }
}

/// `["A"]` → `A`, `["A", "B"]` → `A or B`, `["A", "B", "C"]` → `A, B or C`.
fn join_or(names: &[&str]) -> String {
    match names {
        [] => String::from("none registered"),
        [only] => (*only).to_string(),
        [rest @ .., last] => format!("{} or {last}", rest.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{NoticeInfo, NoticeKind};
    use crate::notices::cp23;

    #[test]
    fn test_cp23_match() {
        let c = Classifier::auto();
        let record = c.classify("CP23_notice_2024.pdf").unwrap();
        assert_eq!(record.kind, NoticeKind::Cp23);
    }

    #[test]
    fn test_case_insensitive() {
        let c = Classifier::auto();
        assert_eq!(c.classify("scan-Cp23.PDF").unwrap().kind, NoticeKind::Cp23);
        assert_eq!(c.classify("my_cP503C.pdf").unwrap().kind, NoticeKind::Cp503c);
    }

    #[test]
    fn test_cp503_without_suffix() {
        let c = Classifier::auto();
        assert_eq!(
            c.classify("irs-cp503-reminder.pdf").unwrap().kind,
            NoticeKind::Cp503c
        );
    }

    #[test]
    fn test_no_match() {
        let c = Classifier::auto();
        assert!(c.classify("random_document.pdf").is_none());
        assert!(c.classify("cp2.pdf").is_none());
        assert!(c.classify("").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let c = Classifier::auto();
        // Both tokens present: CP23 is registered first.
        assert_eq!(
            c.classify("cp503c_and_cp23.pdf").unwrap().kind,
            NoticeKind::Cp23
        );
    }

    #[test]
    fn test_empty_classifier_matches_nothing() {
        let c = Classifier::new();
        assert!(c.is_empty());
        assert!(c.classify("cp23.pdf").is_none());
    }

    #[test]
    fn test_miss_message() {
        assert_eq!(
            Classifier::auto().miss_message(),
            "Could not identify notice type (CP23 or CP503C) from filename."
        );
    }

    #[test]
    fn test_join_or() {
        assert_eq!(join_or(&["A"]), "A");
        assert_eq!(join_or(&["A", "B"]), "A or B");
        assert_eq!(join_or(&["A", "B", "C"]), "A, B or C");
    }

    struct AliasNotice;

    static ALIAS_INFO: NoticeInfo = NoticeInfo {
        name: "CP23-ALIAS",
        description: "test alias",
        tokens: &["estimated-payments"],
    };

    impl NoticeTemplate for AliasNotice {
        fn info(&self) -> &NoticeInfo {
            &ALIAS_INFO
        }

        fn record(&self) -> &'static NoticeRecord {
            &cp23::RECORD
        }
    }

    #[test]
    fn test_pluggable_template() {
        let mut c = Classifier::auto();
        assert!(c.classify("estimated-payments.pdf").is_none());
        c.add(Box::new(AliasNotice));
        assert_eq!(c.len(), 3);
        assert_eq!(
            c.classify("Estimated-Payments.pdf").unwrap().kind,
            NoticeKind::Cp23
        );
        assert_eq!(
            c.miss_message(),
            "Could not identify notice type (CP23, CP503C or CP23-ALIAS) from filename."
        );
    }
}
