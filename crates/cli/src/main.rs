use std::env;
use std::io;
use std::process::ExitCode;

use clip_cli::launcher;
use clip_core::config;

fn main() -> ExitCode {
    env_logger::init();

    let settings_path = config::get_settings_path(&None);
    let args = launcher::collect_args(env::args_os());
    launcher::report(launcher::launch(&settings_path, args), &mut io::stderr())
}
