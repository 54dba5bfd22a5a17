use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "provattr",
    bin_name = "provattr",
    version = get_version(),
    disable_help_subcommand = true,
    about = "Inspect and edit typed directory attributes",
    long_about = None,
    after_help = "Multi-valued edits go after `--`:\n  provattr set mail1 -- +SmtpHostname mx2 -SmtpHostname mx1"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store directory (overrides config and PROVATTR_STORE_DIR)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub store: Option<PathBuf>,

    /// Config file (default: provattr.toml in the OS config dir)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Entry kind: server, config, cos, domain, account
    #[arg(short, long, global = true, value_name = "KIND", help_heading = "Options")]
    pub kind: Option<String>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show attribute values (defaults applied)
    #[command(display_order = 1)]
    Get {
        /// Entry name (e.g. mail1.example.com)
        entry: String,

        /// Attributes to show; all catalog attributes when omitted
        attrs: Vec<String>,

        /// Show stored values only, without defaults
        #[arg(long)]
        raw: bool,
    },

    /// Set attributes in a single commit
    #[command(display_order = 2)]
    Set {
        /// Print the change set instead of committing it
        #[arg(long)]
        dry_run: bool,

        /// Entry name
        entry: String,

        /// ATTR VALUE pairs; +ATTR adds and -ATTR removes a value of a multi-valued attribute
        #[arg(
            required = true,
            num_args = 2..,
            value_names = ["ATTR", "VALUE"],
            allow_hyphen_values = true
        )]
        pairs: Vec<String>,
    },

    /// Clear attributes in a single commit
    #[command(display_order = 3)]
    Unset {
        /// Entry name
        entry: String,

        /// Attributes to clear
        #[arg(required = true)]
        attrs: Vec<String>,
    },

    /// Describe catalog attributes
    #[command(display_order = 4)]
    Describe {
        /// Attribute to describe; the whole catalog when omitted
        attr: Option<String>,
    },

    /// List entries of the selected kind
    #[command(display_order = 5)]
    Entries,
}
