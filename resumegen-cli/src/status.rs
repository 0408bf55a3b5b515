//! Status lines: `ok: ...` on stdout, `error: ...` on stderr.

use clap::ValueEnum;
use resumegen_appcore::{AppService, ExportReport};
use resumegen_core::theme::Theme;
use resumegen_engine::session::{STAGE_DONE, UploadOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

pub fn ok(msg: impl AsRef<str>) {
    println!("ok: {}", msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("error: {}", msg.as_ref());
}

pub fn failed(err: &anyhow::Error) {
    log::debug!("{err:?}");
    error(format!("{err:#}"));
}

/// Stage hook: shows progress on stderr while a request or render is running.
pub async fn progress(stage: &'static str) {
    if stage != STAGE_DONE {
        eprintln!("{stage}...");
    }
}

pub fn upload(outcome: &UploadOutcome) {
    match outcome {
        UploadOutcome::Skipped => ok("no resume file selected; form unchanged"),
        UploadOutcome::Applied { fields } => {
            ok(format!("form replaced with {fields} parsed fields"))
        }
    }
}

pub fn exported(report: &ExportReport) {
    if report.stale {
        eprintln!("warning: the form changed after this resume was generated; the PDF shows the previous result");
    }
    if !report.unsupported.is_empty() {
        let chars: String = report.unsupported.iter().collect();
        eprintln!("warning: the PDF fonts cannot draw these characters, so they were left out: {chars}");
    }
    ok(format!(
        "saved {} ({} bytes)",
        report.path.display(),
        report.bytes
    ));
}

pub fn theme(app: &mut AppService, action: ThemeAction) {
    let theme = match action {
        ThemeAction::Show => {
            ok(format!("theme {}", app.theme().label()));
            return;
        }
        ThemeAction::Toggle => app.toggle_theme(),
        ThemeAction::Dark => app.set_theme(Theme::Dark),
        ThemeAction::Light => app.set_theme(Theme::Light),
    };
    ok(format!("theme {}", theme.label()));
}
