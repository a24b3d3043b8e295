//! Log setup. The terminal is owned by the UI, so records go to
//! ~/.jellyrun/jellyrun.log instead of stderr.

use super::persistence::data_path;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io::{self, Write};

pub const LOG_FILE: &str = "jellyrun.log";

/// Environment variable holding the filter, e.g. `JELLYRUN_LOG=debug`.
pub const LOG_ENV: &str = "JELLYRUN_LOG";

/// Install the global logger. Safe to call more than once.
pub fn init_logging() {
    let target = match data_path(LOG_FILE)
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path))
    {
        Ok(file) => Target::Pipe(Box::new(file)),
        Err(_) => Target::Pipe(Box::new(io::sink())),
    };

    let _ = Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(target)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}
