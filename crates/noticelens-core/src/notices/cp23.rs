//! CP23: we changed your estimated tax payments and you have an amount due.

use crate::notice::{
    Breakdown, FixStep, HelpBlock, LineItem, NoticeInfo, NoticeKind, NoticeRecord,
    NoticeTemplate, PaymentOption, Summary, Taxpayer, Templates, WhyItem,
};

static INFO: NoticeInfo = NoticeInfo {
    name: "CP23",
    description: "Estimated tax payments differ from IRS records; balance due",
    tokens: &["cp23"],
};

pub struct Cp23Notice;

impl NoticeTemplate for Cp23Notice {
    fn info(&self) -> &NoticeInfo {
        &INFO
    }

    fn record(&self) -> &'static NoticeRecord {
        &RECORD
    }
}

pub static RECORD: NoticeRecord = NoticeRecord {
    kind: NoticeKind::Cp23,
    tax_year: 2023,
    notice_date: "February 12, 2024",
    taxpayer: Taxpayer {
        name: "JOHN A. TAXPAYER",
        address: &["1234 MAIN STREET", "ANYTOWN, CA 90210-1234"],
        ssn_mask: "XXX-XX-1234",
    },
    amount_due_cents: 32845,
    due_date: "March 15, 2024",
    summary: Summary {
        overview: "The IRS changed your 2023 return because the estimated tax payments \
                   you claimed don't match the payments on your account. After the \
                   change, you owe $328.45.",
        key_points: &[
            "You claimed $4,500.00 in estimated payments; the IRS found $4,200.00.",
            "The $300.00 difference became unpaid tax, plus penalty and interest.",
            "Pay $328.45 by March 15, 2024 to stop additional interest.",
            "If you have proof of the missing payment, you can dispute the change.",
        ],
    },
    why: &[
        WhyItem {
            title: "A payment didn't post to your account",
            body: "One of your quarterly estimated payments was not applied to tax \
                   year 2023. This often happens when a payment is made under the \
                   wrong SSN, the wrong tax year, or was returned by the bank.",
            interactive: true,
        },
        WhyItem {
            title: "Your return was adjusted to match IRS records",
            body: "The IRS only credits payments it can find. The claimed amount on \
                   your return was reduced to the amount on record.",
            interactive: false,
        },
        WhyItem {
            title: "Penalty and interest were added",
            body: "Because the tax was not fully paid on time, an estimated tax \
                   penalty and interest were charged on the unpaid portion.",
            interactive: false,
        },
    ],
    breakdown: Breakdown {
        items: &[
            LineItem {
                label: "Unpaid tax (payments claimed but not found)",
                amount_cents: 30000,
                is_total: false,
            },
            LineItem {
                label: "Estimated tax penalty",
                amount_cents: 2134,
                is_total: false,
            },
            LineItem {
                label: "Interest charged through notice date",
                amount_cents: 711,
                is_total: false,
            },
            LineItem {
                label: "Amount due by March 15, 2024",
                amount_cents: 32845,
                is_total: true,
            },
        ],
        notes: &[
            "Interest continues to accrue until the balance is paid in full.",
            "Paying by the due date keeps penalty and interest at the amounts shown.",
        ],
    },
    fix: &[
        FixStep {
            title: "Check your payment records",
            points: &[
                "Compare your bank statements with the four 2023 quarterly payments.",
                "Look up your payment history in your IRS online account.",
            ],
        },
        FixStep {
            title: "If you agree, pay the balance",
            points: &[
                "Pay $328.45 by March 15, 2024.",
                "Keep the confirmation number with your tax records.",
            ],
        },
        FixStep {
            title: "If you disagree, respond with proof",
            points: &[
                "Call the number on your notice or mail the response letter below.",
                "Include a copy of the cancelled check or bank confirmation.",
                "Send it within 60 days of the notice date.",
            ],
        },
    ],
    payment_options: &[
        PaymentOption {
            channel: "IRS Direct Pay",
            detail: "Free transfer from your checking or savings account",
            contact: Some("irs.gov/directpay"),
        },
        PaymentOption {
            channel: "Debit or credit card",
            detail: "Processing fees apply",
            contact: Some("irs.gov/payments"),
        },
        PaymentOption {
            channel: "EFTPS",
            detail: "Electronic Federal Tax Payment System, enrollment required",
            contact: Some("eftps.gov"),
        },
        PaymentOption {
            channel: "Check or money order",
            detail: "Payable to \"United States Treasury\"; write your SSN, tax year and CP23 on it",
            contact: None,
        },
    ],
    help: HelpBlock {
        heading: "Need help with your CP23?",
        phone: "1-800-829-0922",
        hours: "Monday through Friday, 7 a.m. to 7 p.m. local time",
        resources: &[
            "irs.gov/cp23",
            "Taxpayer Advocate Service: 1-877-777-4778",
        ],
    },
    templates: Templates {
        taxpayer_email: "Subject: Questions about my CP23 notice\n\
\n\
Hello,\n\
\n\
I received a CP23 notice dated [Notice Date] for tax year 2023 stating that my \
estimated tax payments were changed and that I owe $328.45. I believe one of my \
quarterly payments was not applied to my account.\n\
\n\
Could you help me confirm which payment is missing and how to have it applied?\n\
\n\
Name: [Your Name]\n\
SSN (last 4): [Last 4 of SSN]\n\
Phone: [Your Phone Number]\n\
\n\
Thank you,\n\
[Your Name]",
        irs_response: "[Your Name]\n\
[Your Address]\n\
[City, State ZIP]\n\
\n\
Internal Revenue Service\n\
[Address shown on your notice]\n\
\n\
Re: CP23 notice dated [Notice Date], tax year 2023\n\
SSN: XXX-XX-[Last 4 of SSN]\n\
\n\
To whom it may concern:\n\
\n\
I am responding to the CP23 notice referenced above. I disagree with the change \
to my estimated tax payments. I made a payment of [Payment Amount] on \
[Payment Date] that does not appear to have been credited to my 2023 account.\n\
\n\
Enclosed is a copy of [proof of payment, e.g. cancelled check or bank statement]. \
Please apply this payment to tax year 2023 and remove the associated penalty and \
interest.\n\
\n\
Sincerely,\n\
[Your Signature]\n\
[Your Name]",
    },
};
