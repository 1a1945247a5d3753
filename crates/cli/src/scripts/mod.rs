//! Scripts shipped with the launcher.
//!
//! Each script keeps the lines it printed so callers can inspect them.

pub mod default_options;
pub mod main_menu;
pub mod options;

/// Prints `line` and keeps a copy in `output`.
pub(crate) fn emit(output: &mut Vec<String>, line: impl Into<String>) {
    let line = line.into();
    println!("{line}");
    output.push(line);
}
