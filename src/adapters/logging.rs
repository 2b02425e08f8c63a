//! Log output for the host binary.
//!
//! Installs a `fern` dispatcher as the global `log` backend. Lines look like
//! `[2026-10-16T09:12:03+02:00][INFO ][hpcolor::app::service] HP-Color attached ...`.

use std::path::Path;

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

/// Route log records at `level` and above to stderr and, if given, `file`.
pub fn init(level: LevelFilter, file: Option<&Path>) -> Result<(), fern::InitError> {
    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                msg
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(path) = file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
