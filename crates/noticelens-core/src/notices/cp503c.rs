//! CP503C: second reminder that a balance is still unpaid.

use crate::notice::{
    Breakdown, FixStep, HelpBlock, LineItem, NoticeInfo, NoticeKind, NoticeRecord,
    NoticeTemplate, PaymentOption, Summary, Taxpayer, Templates, WhyItem,
};

static INFO: NoticeInfo = NoticeInfo {
    name: "CP503C",
    description: "Second reminder of an unpaid balance",
    tokens: &["cp503", "cp503c"],
};

pub struct Cp503cNotice;

impl NoticeTemplate for Cp503cNotice {
    fn info(&self) -> &NoticeInfo {
        &INFO
    }

    fn record(&self) -> &'static NoticeRecord {
        &RECORD
    }
}

pub static RECORD: NoticeRecord = NoticeRecord {
    kind: NoticeKind::Cp503c,
    tax_year: 2022,
    notice_date: "April 1, 2024",
    taxpayer: Taxpayer {
        name: "JANE M. SAMPLE",
        address: &["5678 OAK AVENUE APT 2B", "SPRINGFIELD, IL 62704-5678"],
        ssn_mask: "XXX-XX-5678",
    },
    amount_due_cents: 124783,
    due_date: "April 22, 2024",
    summary: Summary {
        overview: "This is a second reminder that you still have an unpaid balance of \
                   $1,247.83 for tax year 2022. The IRS has not received payment since \
                   the first notice.",
        key_points: &[
            "Your 2022 balance is still unpaid after the first reminder (CP501).",
            "Penalty and interest keep growing every month the balance is open.",
            "Pay $1,247.83 by April 22, 2024, or set up a payment plan.",
            "If you already paid, contact the IRS so the payment can be traced.",
        ],
    },
    why: &[
        WhyItem {
            title: "You have a balance from a prior notice",
            body: "A balance was assessed on your 2022 account and the earlier reminder \
                   went unanswered. CP503C is the next step in the collection sequence.",
            interactive: false,
        },
        WhyItem {
            title: "The balance has grown since the first notice",
            body: "A failure-to-pay penalty of 0.5% per month and daily interest are \
                   added until the balance is paid in full.",
            interactive: true,
        },
        WhyItem {
            title: "The next notice is more serious",
            body: "If the balance stays unpaid, the IRS may send a CP504 intent-to-levy \
                   notice, which can lead to seizure of refunds or wages.",
            interactive: false,
        },
    ],
    breakdown: Breakdown {
        items: &[
            LineItem {
                label: "Unpaid tax for 2022",
                amount_cents: 110250,
                is_total: false,
            },
            LineItem {
                label: "Failure-to-pay penalty",
                amount_cents: 8820,
                is_total: false,
            },
            LineItem {
                label: "Interest charged through notice date",
                amount_cents: 5713,
                is_total: false,
            },
            LineItem {
                label: "Amount due by April 22, 2024",
                amount_cents: 124783,
                is_total: true,
            },
        ],
        notes: &[
            "The failure-to-pay penalty is capped at 25% of the unpaid tax.",
            "Interest is compounded daily at the federal short-term rate plus 3%.",
        ],
    },
    fix: &[
        FixStep {
            title: "Confirm the balance",
            points: &[
                "Review your 2022 account transcript in your IRS online account.",
                "Check for payments that may have been applied to a different year.",
            ],
        },
        FixStep {
            title: "Pay in full if you can",
            points: &[
                "Pay $1,247.83 by April 22, 2024.",
                "Paying in full stops further penalty and interest.",
            ],
        },
        FixStep {
            title: "Set up a payment plan if you can't",
            points: &[
                "Apply for a short-term plan (up to 180 days) or a monthly installment agreement.",
                "Online applications are approved immediately for balances under $50,000.",
            ],
        },
        FixStep {
            title: "Dispute if the balance is wrong",
            points: &[
                "Call the number on your notice before the due date.",
                "Mail the response letter below with your supporting documents.",
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
            channel: "Online payment agreement",
            detail: "Short-term or monthly installment plan",
            contact: Some("irs.gov/opa"),
        },
        PaymentOption {
            channel: "Debit or credit card",
            detail: "Processing fees apply",
            contact: Some("irs.gov/payments"),
        },
        PaymentOption {
            channel: "Check or money order",
            detail: "Payable to \"United States Treasury\"; write your SSN, tax year and CP503C on it",
            contact: None,
        },
    ],
    help: HelpBlock {
        heading: "Need help with your CP503C?",
        phone: "1-800-829-8374",
        hours: "Monday through Friday, 8 a.m. to 8 p.m. local time",
        resources: &[
            "irs.gov/cp503",
            "Taxpayer Advocate Service: 1-877-777-4778",
            "Low Income Taxpayer Clinics: irs.gov/litc",
        ],
    },
    templates: Templates {
        taxpayer_email: "Subject: Questions about my CP503C reminder\n\
\n\
Hello,\n\
\n\
I received a CP503C notice dated [Notice Date] for tax year 2022 showing a \
balance of $1,247.83. I would like to understand how this balance was calculated \
and what payment options are available to me.\n\
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
Re: CP503C notice dated [Notice Date], tax year 2022\n\
SSN: XXX-XX-[Last 4 of SSN]\n\
\n\
To whom it may concern:\n\
\n\
I am writing in response to the CP503C notice referenced above. [Choose one: \
I believe this balance was paid on [Payment Date] / I am unable to pay the full \
balance and request an installment agreement of [Monthly Amount] per month.]\n\
\n\
Enclosed are [supporting documents]. Please contact me at [Your Phone Number] \
if you need additional information.\n\
\n\
Sincerely,\n\
[Your Signature]\n\
[Your Name]",
    },
};
