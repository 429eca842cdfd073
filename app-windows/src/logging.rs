//! Log output setup.

use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

const LOG_FILE: &str = "notedb.log";

/// Installs the global logger. Filter defaults to `info` and follows `RUST_LOG`.
///
/// Release builds have no console, so output is appended to `notedb.log` in the data
/// directory instead of stderr.
pub fn init(data_dir: &Path) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    if cfg!(not(debug_assertions)) {
        let opened = std::fs::create_dir_all(data_dir).and_then(|()| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(data_dir.join(LOG_FILE))
        });
        if let Ok(file) = opened {
            builder.target(Target::Pipe(Box::new(file)));
        }
    }

    builder.init();
}
