//! Notice record schema and the template trait every notice type implements.
//!
//! Every notice type implements the [`NoticeTemplate`] trait, which provides
//! metadata via [`NoticeInfo`] (name, filename tokens) and the literal
//! [`NoticeRecord`] shown on the summary screen. Records are `'static` data:
//! the only way to obtain one is through a registered template.

use serde::Serialize;

// ---------------------------------------------------------------------------
// NoticeKind
// ---------------------------------------------------------------------------

/// The notice types this build knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoticeKind {
    /// Estimated tax payment discrepancy, balance due.
    Cp23,
    /// Second reminder of an unpaid balance.
    Cp503c,
}

impl NoticeKind {
    /// IRS notice code as printed on the letter.
    pub fn code(self) -> &'static str {
        match self {
            Self::Cp23 => "CP23",
            Self::Cp503c => "CP503C",
        }
    }
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Record schema
// ---------------------------------------------------------------------------

/// Taxpayer block printed at the top of the notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxpayer {
    pub name: &'static str,
    pub address: &'static [&'static str],
    /// Masked SSN, e.g. `XXX-XX-1234`.
    pub ssn_mask: &'static str,
}

/// "What this notice means" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub overview: &'static str,
    pub key_points: &'static [&'static str],
}

/// One explanation in the "why did I get this" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhyItem {
    pub title: &'static str,
    pub body: &'static str,
    /// The UI offers an expandable walkthrough for this item.
    pub interactive: bool,
}

/// One row of the amount breakdown. Amounts are signed cents; credits are negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub label: &'static str,
    pub amount_cents: i64,
    pub is_total: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub items: &'static [LineItem],
    pub notes: &'static [&'static str],
}

impl Breakdown {
    /// The row flagged as the total, if any.
    pub fn total(&self) -> Option<&LineItem> {
        self.items.iter().find(|item| item.is_total)
    }
}

/// A remediation step with its sub-points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixStep {
    pub title: &'static str,
    pub points: &'static [&'static str],
}

/// A way to pay the balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOption {
    pub channel: &'static str,
    pub detail: &'static str,
    /// Web address or phone number, when the channel has one.
    pub contact: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpBlock {
    pub heading: &'static str,
    pub phone: &'static str,
    pub hours: &'static str,
    pub resources: &'static [&'static str],
}

/// The two copyable letter templates. Placeholders such as `[Your Name]`
/// are intentionally left for the taxpayer to fill in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Templates {
    pub taxpayer_email: &'static str,
    pub irs_response: &'static str,
}

/// Which template to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    TaxpayerEmail,
    IrsResponse,
}

impl TemplateKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::TaxpayerEmail => "taxpayer email",
            Self::IrsResponse => "IRS response letter",
        }
    }
}

/// The full analysis result displayed for an identified notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeRecord {
    pub kind: NoticeKind,
    pub tax_year: u16,
    pub notice_date: &'static str,
    pub taxpayer: Taxpayer,
    pub amount_due_cents: u64,
    pub due_date: &'static str,
    pub summary: Summary,
    pub why: &'static [WhyItem],
    pub breakdown: Breakdown,
    pub fix: &'static [FixStep],
    pub payment_options: &'static [PaymentOption],
    pub help: HelpBlock,
    pub templates: Templates,
}

impl NoticeRecord {
    /// Amount due formatted as US dollars, e.g. `$328.45`.
    pub fn amount_due(&self) -> String {
        format_usd(self.amount_due_cents as i64)
    }

    pub fn template(&self, kind: TemplateKind) -> &'static str {
        match kind {
            TemplateKind::TaxpayerEmail => self.templates.taxpayer_email,
            TemplateKind::IrsResponse => self.templates.irs_response,
        }
    }
}

/// Format signed cents as dollars with thousands separators: `-$1,247.83`.
pub fn format_usd(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", abs % 100)
}

// ---------------------------------------------------------------------------
// Template trait
// ---------------------------------------------------------------------------

/// Metadata about a notice type.
#[derive(Debug, Clone)]
pub struct NoticeInfo {
    /// Notice code, e.g. `"CP23"`.
    pub name: &'static str,
    /// One-line human-readable description.
    pub description: &'static str,
    /// Lowercase filename substrings that identify this notice.
    pub tokens: &'static [&'static str],
}

/// Trait that every notice type must implement.
pub trait NoticeTemplate: Send + Sync {
    /// Notice metadata.
    fn info(&self) -> &NoticeInfo;

    /// The literal record shown when this notice is identified.
    fn record(&self) -> &'static NoticeRecord;

    /// Convenience: name from info.
    fn name(&self) -> &'static str {
        self.info().name
    }

    /// True when `filename` contains one of this notice's tokens, ignoring case.
    fn matches(&self, filename: &str) -> bool {
        let lower = filename.to_lowercase();
        self.info().tokens.iter().any(|token| lower.contains(token))
    }
}
