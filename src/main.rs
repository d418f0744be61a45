use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use css_playground::config::PlaygroundConfig;
use css_playground::pipeline;
use css_playground::playground::Page;
use css_playground::theme::{Appearance, ColorScheme};

#[derive(Parser, Debug)]
#[command(name = "css-playground", version, about = "Interactive CSS flexbox and positioning playgrounds")]
struct Cli {
    /// Page to open first
    #[arg(value_enum, default_value_t = PageArg::Flex)]
    page: PageArg,

    /// TOML file with defaults, challenges and theme overrides
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Color scheme to start with instead of the detected one
    #[arg(long, value_enum)]
    scheme: Option<SchemeArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PageArg {
    Flex,
    Position,
}

impl From<PageArg> for Page {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::Flex => Page::Flex,
            PageArg::Position => Page::Position,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemeArg {
    Light,
    Dark,
}

impl From<SchemeArg> for ColorScheme {
    fn from(scheme: SchemeArg) -> Self {
        match scheme {
            SchemeArg::Light => ColorScheme::Light,
            SchemeArg::Dark => ColorScheme::Dark,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlaygroundConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => PlaygroundConfig::default(),
    };

    let appearance = match cli.scheme.map(ColorScheme::from).or(config.display.color_scheme) {
        Some(scheme) => Appearance::new(scheme),
        None => Appearance::detect(),
    };
    info!("starting with the {} scheme", appearance.scheme().as_str());

    pipeline::run(&config, cli.page.into(), appearance).context("playground terminal session failed")?;
    Ok(())
}
