mod cmd;
mod flags;
mod help;
mod input;
mod output;

use anyhow::Context;
use clap::Parser;
use cmd::badge::Sizing;
use cmd::Session;
use dotutils_core::config::{Config, WarnLevel};
use dotutils_core::console::Console;
use dotutils_core::paths;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dotutils",
    about = "Personal dotfiles utilities: SVG badges and color conversion",
    version,
    disable_help_flag = true,
    override_usage = help::USAGE
)]
struct Cli {
    /// Config file (default: ~/.config/dotutils/config.yaml)
    #[arg(long, env = "DOTUTILS_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,

    /// Print help for the given groups (every group when none is given)
    #[arg(long, short = 'h', num_args = 0.., value_name = "GROUP")]
    help: Option<Vec<String>>,

    #[arg(long, num_args = 0.., value_name = "VALUE")]
    generate_badge: Option<Vec<String>>,

    #[arg(long, num_args = 0.., value_name = "VALUE")]
    generate_pypi_badge: Option<Vec<String>>,

    #[arg(long, num_args = 0.., value_name = "VALUE")]
    generate_updated_badge: Option<Vec<String>>,

    #[arg(long, num_args = 0.., value_name = "VALUE", allow_negative_numbers = true)]
    scale: Option<Vec<String>>,

    #[arg(long, num_args = 0.., value_name = "VALUE", allow_negative_numbers = true)]
    font_size: Option<Vec<String>>,

    #[arg(long, num_args = 0.., value_name = "VALUE", allow_negative_numbers = true)]
    text_align: Option<Vec<String>>,

    #[arg(long, num_args = 0.., value_name = "VALUE")]
    convert_color: Option<Vec<String>>,
}

impl Cli {
    fn has_action(&self) -> bool {
        [
            &self.generate_badge,
            &self.generate_pypi_badge,
            &self.generate_updated_badge,
            &self.scale,
            &self.font_size,
            &self.text_align,
            &self.convert_color,
        ]
        .iter()
        .any(|v| v.is_some())
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = match &cli.config {
        Some(p) => p.clone(),
        None => paths::default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;

    let console = Console::stdio(config.console.colors && !cli.no_color, config.console.stderr);
    for warning in config.validate() {
        let message = format!("config: {}", warning.message);
        match warning.level {
            WarnLevel::Error => console.error(message),
            WarnLevel::Warning => console.warning(message),
        }
    }

    let validators = flags::validators();
    let has_action = cli.has_action();
    if cli.help.is_some() || !has_action {
        let groups = cli.help.as_deref().unwrap_or_default();
        help::run(&console, &validators, groups);
    }
    if !has_action {
        return Ok(());
    }

    let network = config.network().context("failed to build http client")?;
    let session = Session::new(
        &console,
        &config,
        &validators,
        &network,
        Box::new(input::Stdin::lock()),
    )?;

    let sizing = Sizing::resolve(&session, cli.scale, cli.font_size, cli.text_align)?;

    if let Some(values) = cli.generate_badge {
        cmd::badge::generate(&session, values, &sizing)?;
    }
    if let Some(values) = cli.generate_pypi_badge {
        cmd::badge::generate_pypi(&session, values, &sizing)?;
    }
    if let Some(values) = cli.generate_updated_badge {
        cmd::badge::generate_updated(&session, values, &sizing)?;
    }
    if let Some(values) = cli.convert_color {
        cmd::color::run(&session, values, cli.json)?;
    }
    Ok(())
}
