use std::fs::File;
use std::path::Path;

use anyhow::Context;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `verbose` lowers the default filter to debug; otherwise only warnings and
/// errors are shown, since the terminal belongs to the game. `RUST_LOG` still
/// overrides either. With `log_file` the output goes to that file.
pub fn init(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // Only fails when a logger is already installed, e.g. across tests.
    let _ = builder.try_init();
    Ok(())
}
