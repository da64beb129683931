use clap::Parser;
use log::{debug, warn};
use snafu::ErrorCompat;

mod args;
mod wrapped;

fn main() {
    let args = args::Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    debug!("args: {:?}", args);

    let res = wrapped::config_reader::resolve_settings(&args)
        .and_then(|settings| wrapped::run_wrapped(&settings));

    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
