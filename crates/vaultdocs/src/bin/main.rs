//! vaultdocs CLI

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tera::Context;
use vaultdocs::prelude::*;
use vaultdocs::FILTER_NAMES;

/// Build hooks for Obsidian vault documentation sites
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Vault and site root (defaults to the working directory)
    #[arg(short, long, env = "VAULTDOCS_ROOT", global = true)]
    root: Option<PathBuf>,

    /// Hook configuration file (defaults to <root>/vaultdocs.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, action = clap::ArgAction::SetTrue, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the vault graph page and remove the staging directory
    Graph,
    /// Render a template file with the vault filters registered
    Render {
        /// Template file
        template: PathBuf,
        /// JSON object used as the template context
        #[arg(long)]
        context: Option<PathBuf>,
        /// Run the pre-build hooks first
        #[arg(long, action = clap::ArgAction::SetTrue)]
        pre_build: bool,
    },
    /// List the registered template filters
    Filters,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read working directory")?,
    };

    match args.command {
        Command::Graph => {
            let config = load_config(args.config.as_deref(), &root)?;
            let report = GraphBuilder::new(&config)
                .build_graph()
                .context("Graph build failed")?;
            if report.written {
                println!(
                    "{} ({} notes, {} links)",
                    report.output_path.display(),
                    report.nodes,
                    report.edges
                );
            } else {
                println!("graph not written to {}", report.output_path.display());
            }
        }
        Command::Render {
            template,
            context,
            pre_build,
        } => {
            let config = load_config(args.config.as_deref(), &root)?;
            let site = SiteConfig::new(&root);
            let files = Files::collect(&site.docs_dir)?;
            let mut lifecycle =
                BuildLifecycle::new(site, files).with_hook(ObsidianHooks::new(config));

            if pre_build {
                lifecycle.pre_build().context("Pre-build hooks failed")?;
            }

            let context = match context {
                Some(path) => load_context(&path)?,
                None => Context::new(),
            };
            let page = lifecycle
                .render_file(&template, &context)
                .with_context(|| format!("Failed to render {}", template.display()))?;
            println!("{}", page);
        }
        Command::Filters => {
            for name in FILTER_NAMES {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>, root: &std::path::Path) -> Result<HooksConfig> {
    HooksConfig::load(path, root).context("Failed to load hook configuration")
}

fn load_context(path: &std::path::Path) -> Result<Context> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    Context::from_value(value).context("Template context must be a JSON object")
}
