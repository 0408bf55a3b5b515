use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use resumegen_appcore::AppService;
use resumegen_core::fields::find_field;
use resumegen_runtime::defaults::resolve_config_dir;

mod display;
mod shell;
mod status;

use status::ThemeAction;

#[derive(Parser, Debug)]
#[clap(
    name = "resumegen",
    version,
    about = "Fill in a resume form, generate a polished resume and export it as PDF"
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, global = true, help = "Directory holding config.json and preferences.json")]
    config_dir: Option<PathBuf>,

    #[clap(
        long,
        global = true,
        env = "RESUMEGEN_BASE_URL",
        help = "Resume service base URL for this run"
    )]
    base_url: Option<String>,

    #[clap(long, short, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a resume in one go and print it
    Generate {
        #[clap(long, help = "JSON object file replacing the whole form")]
        form: Option<PathBuf>,

        #[clap(long = "set", value_name = "FIELD=VALUE", help = "Set one field; repeatable")]
        set: Vec<String>,

        #[clap(long, help = "Resume (PDF/DOC/DOCX) to parse into the form first")]
        resume: Option<PathBuf>,

        #[clap(long, help = "Save the generated resume as PDF (file, or directory ending in /)")]
        export: Option<PathBuf>,
    },
    /// Interactive session
    Shell,
    /// Show or change the color theme
    Theme {
        #[clap(value_enum)]
        action: Option<ThemeAction>,
    },
    /// List known form fields
    Fields,
    /// Show or change stored configuration
    Config {
        #[clap(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Store the resume service base URL
    SetBaseUrl { url: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level.as_str()),
    )
    .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            status::failed(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Fields = cli.command {
        print!("{}", display::format_fields());
        return Ok(());
    }

    let config_dir = resolve_config_dir(cli.config_dir.as_deref());
    log::debug!("config dir {}", config_dir.display());
    let mut app = AppService::open(&config_dir, cli.base_url)?;

    match cli.command {
        Commands::Generate {
            form,
            set,
            resume,
            export,
        } => generate(&mut app, form, set, resume, export).await,
        Commands::Shell => shell::run_shell(&mut app).await,
        Commands::Theme { action } => {
            status::theme(&mut app, action.unwrap_or(ThemeAction::Show));
            Ok(())
        }
        Commands::Config { action } => {
            match action {
                ConfigCommands::Show => {
                    let json =
                        serde_json::to_string_pretty(app.config()).context("encode config")?;
                    println!("{json}");
                    println!("# stored at {}", app.config_path().display());
                }
                ConfigCommands::SetBaseUrl { url } => {
                    let stored = app.save_base_url(&url)?;
                    status::ok(format!("base URL set to {}", stored.base_url));
                }
            }
            Ok(())
        }
        Commands::Fields => Ok(()),
    }
}

async fn generate(
    app: &mut AppService,
    form: Option<PathBuf>,
    set: Vec<String>,
    resume: Option<PathBuf>,
    export: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Check every assignment before any request is made.
    let assignments = set
        .iter()
        .map(|s| parse_assignment(s))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if let Some(path) = form {
        let n = app.load_form(&path)?;
        status::ok(format!("loaded {n} fields from {}", path.display()));
    }

    if resume.is_some() {
        let outcome = app.upload_resume(resume.as_deref(), status::progress).await?;
        status::upload(&outcome);
    }

    // Explicit values win over parsed ones.
    for (field, value) in &assignments {
        app.set_field(field, value);
    }

    app.generate(status::progress).await?;
    status::ok("resume generated");
    if let Some(text) = app.preview_text() {
        print!("{text}");
    }

    if let Some(dest) = export {
        let report = app.export_pdf(Some(&dest), status::progress).await?;
        status::exported(&report);
    }
    Ok(())
}

fn parse_assignment(raw: &str) -> anyhow::Result<(String, String)> {
    let (field, value) = raw
        .split_once('=')
        .with_context(|| format!("expected FIELD=VALUE, got {raw:?}"))?;
    let field = field.trim();
    if field.is_empty() {
        anyhow::bail!("missing field name in {raw:?}");
    }
    if find_field(field).is_none() {
        log::warn!("`{field}` is not a known form field; sending it anyway");
    }
    Ok((field.to_string(), display::unescape(value)))
}
