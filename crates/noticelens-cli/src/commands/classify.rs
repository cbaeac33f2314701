use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use noticelens_core::upload::mime_from_name;
use noticelens_core::{
    AnalysisOutcome, ClientConfig, Controller, Error, NoticeRecord, UploadedFile, User,
    format_usd, run_analysis,
};

pub fn run(path: &Path, json: bool, no_delay: bool) {
    super::init_logging("warn");

    let file = upload_for(path);
    let mut config = ClientConfig::default();
    if no_delay {
        config.analysis_delay = Duration::ZERO;
    }
    let mut controller = Controller::signed_in(config, User::default());

    if !json && !no_delay {
        eprintln!("Analyzing {}...", file.name);
    }

    let rt = super::runtime();
    let outcome = match rt.block_on(run_analysis(&mut controller, file)) {
        Ok(outcome) => outcome,
        Err(Error::NotPdf { .. }) => super::fail(noticelens_core::controller::NOT_PDF_MESSAGE),
        Err(e) => super::fail(e),
    };

    let AnalysisOutcome::Identified { .. } = outcome else {
        super::fail(controller.classifier().miss_message());
    };
    let Some(record) = controller.state().active_notice else {
        super::fail("analysis finished without a notice");
    };

    if json {
        match serde_json::to_string_pretty(record) {
            Ok(s) => println!("{s}"),
            Err(e) => super::fail(e),
        }
    } else {
        print!("{}", render_record(record));
    }
}

/// A file handle for `path`. Paths that do not exist still classify by name.
fn upload_for(path: &Path) -> UploadedFile {
    UploadedFile::from_path(path).unwrap_or_else(|_| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_from_name(&name);
        UploadedFile::new(name, mime)
    })
}

/// Plain-text breakdown of a notice.
pub fn render_record(record: &NoticeRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} notice, tax year {}", record.kind, record.tax_year);
    let _ = writeln!(out, "Notice date: {}", record.notice_date);
    let _ = writeln!(out, "Taxpayer:    {}", record.taxpayer.name);
    let _ = writeln!(out, "Amount due:  {}", record.amount_due());
    let _ = writeln!(out, "Pay by:      {}", record.due_date);

    let _ = writeln!(out, "\nWhat this means");
    let _ = writeln!(out, "  {}", record.summary.overview);
    for point in record.summary.key_points {
        let _ = writeln!(out, "  • {point}");
    }

    let _ = writeln!(out, "\nWhy you got it");
    for item in record.why {
        let _ = writeln!(out, "  {}: {}", item.title, item.body);
    }

    let _ = writeln!(out, "\nBreakdown");
    for item in record.breakdown.items {
        let marker = if item.is_total { "=" } else { " " };
        let _ = writeln!(
            out,
            " {marker}{:<40} {:>12}",
            item.label,
            format_usd(item.amount_cents)
        );
    }

    let _ = writeln!(out, "\nWhat to do");
    for (i, step) in record.fix.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step.title);
        for point in step.points {
            let _ = writeln!(out, "     - {point}");
        }
    }

    let _ = writeln!(out, "\nPayment options");
    for option in record.payment_options {
        match option.contact {
            Some(contact) => {
                let _ = writeln!(out, "  {}: {} ({contact})", option.channel, option.detail);
            }
            None => {
                let _ = writeln!(out, "  {}: {}", option.channel, option.detail);
            }
        }
    }

    let _ = writeln!(out, "\n{}", record.help.heading);
    let _ = writeln!(out, "  {} ({})", record.help.phone, record.help.hours);
    out
}
