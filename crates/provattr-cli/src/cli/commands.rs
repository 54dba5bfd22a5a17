//! # Dispatch
//!
//! `run` parses arguments, installs the tracing subscriber, resolves the
//! config into a [`Context`] and routes each subcommand to its handler.
//! Handlers return `anyhow::Result`; library errors pass through with their
//! own messages and `main` turns them into exit code 1.

use super::print;
use super::setup::{Cli, Commands};
use anyhow::{bail, Context as _, Result};
use clap::Parser;
use provattr::attributes::catalog;
use provattr::changes::ModOp;
use provattr::config::{default_config_path, ProvattrConfig};
use provattr::{
    AttributeDescriptor, AttributeStore, AttributeView, ChangeSet, EntryKind, EntryRef, FileStore,
    ProvError,
};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Resolved settings shared by every handler.
pub struct Context {
    pub store: FileStore,
    pub kind: EntryKind,
    pub json: bool,
}

impl Context {
    fn view(&self, name: &str) -> AttributeView<'_, FileStore> {
        AttributeView::new(&self.store, EntryRef::new(self.kind, name))
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = create_context(&cli)?;
    debug!(store = %ctx.store.root().display(), kind = %ctx.kind, "context ready");

    match cli.command {
        Commands::Get { entry, attrs, raw } => handle_get(&ctx, &entry, &attrs, raw),
        Commands::Set {
            entry,
            pairs,
            dry_run,
        } => handle_set(&ctx, &entry, &pairs, dry_run),
        Commands::Unset { entry, attrs } => handle_unset(&ctx, &entry, &attrs),
        Commands::Describe { attr } => handle_describe(&ctx, attr.as_deref()),
        Commands::Entries => handle_entries(&ctx),
    }
}

/// Logs go to stderr. `PROVATTR_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("PROVATTR_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn create_context(cli: &Cli) -> Result<Context> {
    let config_path = cli.config.clone().or_else(default_config_path);
    let config = ProvattrConfig::load_from(config_path.as_deref())?;

    let kind = match &cli.kind {
        Some(kind) => kind.parse::<EntryKind>().map_err(anyhow::Error::msg)?,
        None => config.kind()?,
    };
    let store_dir: PathBuf = match &cli.store {
        Some(dir) => dir.clone(),
        None => config.store_dir()?,
    };

    Ok(Context {
        store: FileStore::new(store_dir),
        kind,
        json: cli.json,
    })
}

/// Resolve a user-supplied attribute name against the catalog.
fn resolve_attr(name: &str) -> Result<&'static AttributeDescriptor> {
    catalog::lookup(name).ok_or_else(|| ProvError::UnknownAttribute(name.to_string()).into())
}

fn resolve_attrs(names: &[String]) -> Result<Vec<&'static AttributeDescriptor>> {
    if names.is_empty() {
        return Ok(catalog::SERVER_ATTRIBUTES.to_vec());
    }
    names.iter().map(|name| resolve_attr(name)).collect()
}

fn handle_get(ctx: &Context, entry: &str, names: &[String], raw: bool) -> Result<()> {
    let view = ctx.view(entry);

    if raw {
        let stored = if names.is_empty() {
            ctx.store.attributes(view.entry())?
        } else {
            let mut stored = provattr::changes::AttrMap::new();
            for desc in resolve_attrs(names)? {
                if let Some(values) = view.stored(desc.name) {
                    stored.insert(desc.name.to_string(), values);
                }
            }
            stored
        };
        return print::stored(&stored, ctx.json);
    }

    let rows = resolve_attrs(names)?
        .into_iter()
        .map(|desc| print::ResolvedRow {
            name: desc.name,
            is_set: view.stored(desc.name).is_some(),
            value: view.resolve(desc),
        })
        .collect::<Vec<_>>();
    print::resolved(&rows, ctx.json)
}

/// Stage every pair into one change set. Values are checked against the
/// attribute's kind before anything is committed.
fn stage_pairs(view: &AttributeView<'_, FileStore>, pairs: &[String]) -> Result<ChangeSet> {
    if pairs.len() % 2 != 0 {
        bail!(
            "expected ATTR VALUE pairs, got {} arguments (missing value for {})",
            pairs.len(),
            pairs[pairs.len() - 1]
        );
    }

    let mut changes = ChangeSet::new();
    for pair in pairs.chunks(2) {
        let (op, name) = ModOp::split(&pair[0]);
        let desc = resolve_attr(name)?;
        if op != ModOp::Replace && !desc.multi {
            return Err(ProvError::InvalidValue {
                name: desc.name.to_string(),
                value: pair[1].clone(),
                reason: format!("{}{} only applies to multi-valued attributes", op.prefix(), name),
            }
            .into());
        }
        let value = desc.normalize(&pair[1])?;
        changes = match op {
            ModOp::Replace => view.set_in(desc.name, value, Some(changes)),
            ModOp::Add => view.add_multi_in(desc.name, value, Some(changes)),
            ModOp::Remove => view.remove_multi_in(desc.name, value, Some(changes)),
        };
    }
    Ok(changes)
}

fn handle_set(ctx: &Context, entry: &str, pairs: &[String], dry_run: bool) -> Result<()> {
    let view = ctx.view(entry);
    let changes = stage_pairs(&view, pairs)?;

    if dry_run {
        return print::change_set(&changes, ctx.json);
    }
    view.commit(&changes)
        .with_context(|| format!("could not update {}", view.entry()))?;
    info!(entry = %view.entry(), modifications = changes.len(), "entry updated");
    print::success(&format!(
        "Updated {} ({} change{})",
        view.entry(),
        changes.len(),
        if changes.len() == 1 { "" } else { "s" }
    ));
    Ok(())
}

fn handle_unset(ctx: &Context, entry: &str, names: &[String]) -> Result<()> {
    let view = ctx.view(entry);
    let mut changes = ChangeSet::new();
    for desc in resolve_attrs(names)? {
        changes = view.unset_in(desc.name, Some(changes));
    }
    view.commit(&changes)
        .with_context(|| format!("could not update {}", view.entry()))?;
    print::success(&format!("Cleared {} on {}", names.join(", "), view.entry()));
    Ok(())
}

fn handle_describe(ctx: &Context, name: Option<&str>) -> Result<()> {
    let descs = match name {
        Some(name) => vec![resolve_attr(name)?],
        None => catalog::SERVER_ATTRIBUTES.to_vec(),
    };
    print::descriptors(&descs, ctx.json)
}

fn handle_entries(ctx: &Context) -> Result<()> {
    let entries = ctx.store.entries(ctx.kind)?;
    print::entries(&entries, ctx.json)
}
