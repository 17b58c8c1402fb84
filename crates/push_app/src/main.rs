//! `baidu_push`: stands in for the host CMS and fires the publish hook once.
mod logging;
mod settings;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use push_core::SETTINGS_FIELDS;
use push_engine::{ContentKind, OutcomeLog, PublishHook, PublishedPost, ReqwestSubmitter};
use push_logging::push_debug;

use crate::logging::LogDestination;
use crate::settings::{
    load_settings, mask_token, save_settings, PushSettings, SettingsFile,
    DEFAULT_SETTINGS_FILENAME,
};

#[derive(Debug, Parser)]
#[command(
    name = "baidu_push",
    version,
    about = "Submit a freshly published URL to the Baidu link-submission API"
)]
struct Cli {
    /// Settings file (RON).
    #[arg(long, short, global = true, default_value = DEFAULT_SETTINGS_FILENAME)]
    config: PathBuf,

    /// Also append diagnostics to this file.
    #[arg(long, global = true)]
    diagnostics: Option<PathBuf>,

    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the publish hook for one permalink.
    Publish {
        permalink: String,
        #[arg(long, value_enum, default_value_t = KindArg::Post)]
        kind: KindArg,
        /// Content to pass through the hook; echoed to stdout unchanged.
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// Describe the settings and show the current values.
    Settings,
    /// Write a settings template.
    InitConfig {
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Post,
    Page,
}

impl From<KindArg> for ContentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Post => ContentKind::Post,
            KindArg::Page => ContentKind::Page,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match cli.diagnostics.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    logging::initialize(destination, level);

    match cli.command {
        Command::Publish {
            permalink,
            kind,
            content,
        } => publish(&cli.config, permalink, kind.into(), content),
        Command::Settings => show_settings(&cli.config),
        Command::InitConfig { force } => init_config(&cli.config, force),
    }
}

fn publish(
    config: &Path,
    permalink: String,
    kind: ContentKind,
    content: Option<PathBuf>,
) -> anyhow::Result<()> {
    let settings = load_settings(config)?;
    let body = match content {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("reading content {path:?}"))?
        }
        None => String::new(),
    };

    let hook = PublishHook::new(
        SettingsFile::new(config),
        ReqwestSubmitter::new(settings.submit_settings()),
        OutcomeLog::new(&settings.log_path),
    );
    push_debug!("Outcome log at {:?}", hook.outcome_log().path());

    let post = PublishedPost::new(permalink, kind);
    let body = hook.on_publish_blocking(body, &post);

    let mut stdout = io::stdout().lock();
    stdout.write_all(body.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn show_settings(config: &Path) -> anyhow::Result<()> {
    let settings = load_settings(config)?;
    println!("Settings file: {}", config.display());
    for field in SETTINGS_FIELDS {
        let value = match field.name {
            "site" => settings.site.clone(),
            "token" => mask_token(&settings.token),
            _ => String::new(),
        };
        println!("  {} ({}): {:?}", field.label, field.name, value);
        println!("      {}", field.help);
    }
    println!("  Outcome log: {}", settings.log_path.display());
    println!("  Endpoint: {}", settings.endpoint);
    println!("  Timeout: {}s", settings.timeout_secs);
    println!(
        "  Certificate validation: {}",
        if settings.accept_invalid_certs {
            "disabled"
        } else {
            "enabled"
        }
    );
    Ok(())
}

fn init_config(config: &Path, force: bool) -> anyhow::Result<()> {
    if config.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", config.display());
    }
    save_settings(config, &PushSettings::default())?;
    println!("Wrote {}", config.display());
    Ok(())
}
