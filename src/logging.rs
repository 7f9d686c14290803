//! Logger setup.
//!
//! All diagnostics go through the `log` macros and are written to stdout as
//! bare message lines, one per record.

use std::io::Write;

use log::LevelFilter;

/// Install the global logger.
///
/// `RUST_LOG` takes precedence when set. Otherwise this crate logs at `info`
/// (or `debug` when `verbose`) and every other crate is silenced. Calling
/// this more than once is harmless.
pub fn init(verbose: bool) {
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        builder.filter(None, LevelFilter::Off);
        builder.filter(Some(env!("CARGO_CRATE_NAME")), level);
    }

    builder.target(env_logger::Target::Stdout);
    builder.format(|buf, record| writeln!(buf, "{}", record.args()));

    let _ = builder.try_init();
}
