// SPDX-License-Identifier: MPL-2.0
use toastline::app::{self, paths, Flags};
use toastline::notifications::Position;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
toastline - transient notification demo

USAGE:
  toastline [OPTIONS]

OPTIONS:
  --config-dir <DIR>     Directory holding settings.toml
  --position <POSITION>  Default position (top-left, top-center, top-right,
                         bottom-left, bottom-center, bottom-right)
  -h, --help             Print this help
";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("toastline=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    init_tracing();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return;
    }

    let config_dir: Option<String> = match args.opt_value_from_str("--config-dir") {
        Ok(dir) => dir,
        Err(err) => exit_with(&err.to_string()),
    };
    let position: Option<Position> = match args.opt_value_from_str("--position") {
        Ok(position) => position,
        Err(err) => exit_with(&err.to_string()),
    };
    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unknown arguments");
    }

    paths::init_cli_overrides(config_dir);

    // Notification tasks run here; iced owns the main thread.
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("toastline-timers")
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => exit_with(&format!("failed to start runtime: {err}")),
    };

    let flags = Flags {
        runtime: runtime.handle().clone(),
        position,
    };

    if let Err(err) = app::run(flags) {
        exit_with(&err.to_string());
    }
}

fn exit_with(message: &str) -> ! {
    eprintln!("toastline: {message}");
    std::process::exit(1)
}
