//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// siteswap: publish builder bundles to a served directory
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: siteswap.toml)
    #[arg(short = 'C', long, global = true, default_value = "siteswap.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Published directory (overrides `publish.dir`)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the admin API and the public site server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port for the builder UI and publish API
        #[arg(short, long)]
        admin_port: Option<u16>,

        /// Port for the published site
        #[arg(short, long)]
        public_port: Option<u16>,

        /// Builder application directory served on the admin port
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        builder_dir: Option<PathBuf>,
    },

    /// Publish a bundle file once and exit
    #[command(visible_alias = "p")]
    Publish {
        /// JSON bundle: `{"files": [{"name", "content"}], "version"}`
        #[arg(value_hint = clap::ValueHint::FilePath)]
        bundle: PathBuf,

        /// Version label for the cache tag (overrides the bundle's)
        #[arg(long = "label")]
        label: Option<String>,
    },

    /// Empty the published directory and exit
    #[command(visible_alias = "u")]
    Unpublish,
}
