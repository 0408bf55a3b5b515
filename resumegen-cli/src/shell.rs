use std::path::PathBuf;

use resumegen_appcore::AppService;
use resumegen_core::fields::find_field;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::display::{format_fields, format_form, unescape};
use crate::status::{self, ThemeAction};

pub const HELP: &str = "\
commands:
  fields                    list known form fields
  show                      print the current form
  set <field> <value...>    set one field (use \\n for line breaks)
  unset <field>             clear one field
  load <file.json>          replace the whole form with a JSON object
  upload [file]             parse a resume into the form (no file: nothing happens)
  generate                  generate a resume from the form
  preview                   print the generated resume
  export [path]             save the generated resume as PDF
  theme [toggle|dark|light] show or change the theme
  reset                     clear the form and the generated resume
  help                      this text
  quit                      leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Fields,
    Show,
    Set { field: String, value: String },
    Unset { field: String },
    Load(PathBuf),
    Upload(Option<PathBuf>),
    Generate,
    Preview,
    Export(Option<PathBuf>),
    Theme(ThemeAction),
    Reset,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };
    let path = |s: &str| (!s.is_empty()).then(|| PathBuf::from(s));

    let parsed = match cmd {
        "" => ShellCommand::Empty,
        "fields" => ShellCommand::Fields,
        "show" => ShellCommand::Show,
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim_start()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("usage: set <field> <value...>".into());
            }
            ShellCommand::Set {
                field: field.to_string(),
                value: unescape(value),
            }
        }
        "unset" if !rest.is_empty() => ShellCommand::Unset {
            field: rest.to_string(),
        },
        "unset" => return Err("usage: unset <field>".into()),
        "load" => ShellCommand::Load(path(rest).ok_or("usage: load <file.json>")?),
        "upload" => ShellCommand::Upload(path(rest)),
        "generate" => ShellCommand::Generate,
        "preview" => ShellCommand::Preview,
        "export" => ShellCommand::Export(path(rest)),
        "theme" => ShellCommand::Theme(match rest {
            "" | "show" => ThemeAction::Show,
            "toggle" => ThemeAction::Toggle,
            "dark" => ThemeAction::Dark,
            "light" => ThemeAction::Light,
            other => return Err(format!("unknown theme option: {other}")),
        }),
        "reset" => ShellCommand::Reset,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(parsed)
}

/// Line-oriented session over stdin. Failures are reported and the loop goes on.
pub async fn run_shell(app: &mut AppService) -> anyhow::Result<()> {
    println!(
        "resumegen shell | service {} | theme {} | `help` for commands",
        app.config().base_url,
        app.theme().label()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                status::error(msg);
                continue;
            }
        };
        if cmd == ShellCommand::Quit {
            break;
        }
        if let Err(e) = execute(app, cmd).await {
            status::failed(&e);
        }
    }
    Ok(())
}

async fn execute(app: &mut AppService, cmd: ShellCommand) -> anyhow::Result<()> {
    match cmd {
        ShellCommand::Empty | ShellCommand::Quit => {}
        ShellCommand::Fields => print!("{}", format_fields()),
        ShellCommand::Show => print!("{}", format_form(app.form())),
        ShellCommand::Set { field, value } => {
            if find_field(&field).is_none() {
                log::warn!("`{field}` is not a known form field; keeping it anyway");
            }
            app.set_field(&field, &value);
            status::ok(format!("{field} set"));
        }
        ShellCommand::Unset { field } => {
            app.set_field(&field, "");
            status::ok(format!("{field} cleared"));
        }
        ShellCommand::Load(path) => {
            let n = app.load_form(&path)?;
            status::ok(format!("form replaced with {n} fields from {}", path.display()));
        }
        ShellCommand::Upload(path) => {
            let outcome = app.upload_resume(path.as_deref(), status::progress).await?;
            status::upload(&outcome);
        }
        ShellCommand::Generate => {
            app.generate(status::progress).await?;
            status::ok("resume generated");
            if let Some(text) = app.preview_text() {
                print!("{text}");
            }
        }
        ShellCommand::Preview => match app.preview_text() {
            Some(text) => {
                if app.engine().is_result_stale() {
                    log::warn!("the form changed since this resume was generated");
                }
                print!("{text}");
            }
            None => status::error("nothing generated yet"),
        },
        ShellCommand::Export(dest) => {
            let report = app.export_pdf(dest.as_deref(), status::progress).await?;
            status::exported(&report);
        }
        ShellCommand::Theme(action) => status::theme(app, action),
        ShellCommand::Reset => {
            app.reset();
            status::ok("form and generated resume cleared");
        }
        ShellCommand::Help => println!("{HELP}"),
    }
    Ok(())
}
