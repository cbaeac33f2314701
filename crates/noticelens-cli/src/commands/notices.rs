use noticelens_core::Classifier;

pub fn run() {
    let classifier = Classifier::auto();

    println!("📄 NoticeLens v{}", noticelens_core::VERSION);
    println!();
    println!(
        "{:<8} {:<18} {:>12}  Description",
        "Notice", "Filename tokens", "Amount due"
    );
    println!("{}", "-".repeat(72));

    for notice in classifier.notices() {
        let info = notice.info();
        println!(
            "{:<8} {:<18} {:>12}  {}",
            info.name,
            info.tokens.join(", "),
            notice.record().amount_due(),
            info.description
        );
    }

    println!();
    println!(
        "{} notice types. Filenames are matched case-insensitively, first match wins.",
        classifier.len()
    );
}
