#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use dirindex::cli::Args;
use dirindex::config::{default_config_path, Settings};
use dirindex::event_loop::{self, LoopExit};
use dirindex::store::{build_ignore_set, FsStore};
use dirindex::sync::Synchronizer;
use dirindex::watcher;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("dirindex: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    init_tracing(&args);

    let path = args
        .path
        .canonicalize()
        .with_context(|| format!("{}: failed to resolve path", args.path.display()))?;

    anyhow::ensure!(path.is_dir(), "{}: Not a directory", path.display());

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| default_config_path(&path));
    let settings = Settings::load(&config_path)
        .context("failed to load settings")?
        .with_overrides(args.prefix.as_deref(), &args.include);
    settings.validate().context("invalid settings")?;

    if args.save_config {
        settings
            .save(&config_path)
            .context("failed to save settings")?;
        info!(path = %config_path.display(), "settings saved");
    }

    let store = FsStore::new(&path, build_ignore_set(&args.ignore));
    let mut sync = Synchronizer::new(store, settings);

    info!(
        root = %path.display(),
        prefix = %sync.settings().index_prefix,
        debounce_ms = args.debounce_ms,
        "dirindex starting"
    );

    if !args.no_initial_sync {
        sync.sync_all().context("initial synchronization failed")?;
    }
    if args.once {
        return Ok(());
    }

    // Start filesystem watcher
    let (_debouncer, fs_rx) = watcher::start_watcher(&path, args.debounce_ms)
        .map_err(anyhow::Error::msg)
        .context("failed to start watcher")?;

    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
    })
    .context("failed to install Ctrl-C handler")?;

    match event_loop::run(&mut sync, fs_rx, shutdown_rx) {
        LoopExit::Shutdown => Ok(()),
        LoopExit::RootDeleted => anyhow::bail!("{}: directory was deleted", path.display()),
        LoopExit::Disconnected => anyhow::bail!("watcher stopped unexpectedly"),
    }
}
