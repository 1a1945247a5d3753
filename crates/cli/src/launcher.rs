//! Process boundary of the `clip` binary.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clip_core::config;
use clip_core::context::Context;
use clip_core::error::Result;
use clip_core::lifecycle::{self, Lifecycle};
use log::{debug, error, info};

use crate::catalog::ScriptCatalog;
use crate::libraries;

/// Converts raw process arguments to strings. Invalid UTF-8 is replaced
/// with `U+FFFD` so a bad argument reaches the script as an odd value.
pub fn collect_args<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = OsString>,
{
    raw.into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

/// Loads settings from `settings_path`, selects a script and runs it.
///
/// # Errors
///
/// Settings that cannot be read, a missing default script, or any
/// configuration error raised by the script itself.
pub fn launch(settings_path: &str, args: Vec<String>) -> Result<ExitCode> {
    debug!("Settings path: `{settings_path}`");
    let settings = config::load_settings(settings_path)?;

    let selection = ScriptCatalog::builtin().select(&settings, args)?;
    info!("Running script `{}`", selection.name);

    let context = Context::new(settings, libraries::loader());
    let mut lifecycle = Lifecycle::with_context(selection.script, context, selection.args);
    lifecycle::run(&mut lifecycle)
}

/// Turns the result of [`launch`] into an exit status, writing any error
/// message to `out`.
pub fn report(result: Result<ExitCode>, out: &mut impl Write) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            error!("Launch failed: {e:?}");
            if let Err(write_err) = writeln!(out, "{e}") {
                debug!("Unable to report error: {write_err}");
            }
            ExitCode::FAILURE
        }
    }
}
