use clap::Parser;
use zenith_scan::config;
use zenith_scan::logging::{self, codes};
use zenith_scan_cli::{run, Cli};

fn main() {
    let cli = Cli::parse();
    let runtime = cli.runtime_config();
    let level = runtime.logging.min_log_level.to_events_log_level();

    env_logger::Builder::new()
        .filter_level(level.to_facade_level().to_level_filter())
        .parse_env("ZENITH_LOG")
        .init();

    let initialized =
        config::init_runtime_config(runtime).and_then(|_| logging::init_global_logging());
    if let Err(error) = initialized {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &error);
        std::process::exit(2);
    }

    let mut stdout = std::io::stdout().lock();
    match run(&cli, &mut stdout) {
        Ok(summary) => {
            log::info!("{} of {} inputs failed", summary.failed, summary.total);
            std::process::exit(summary.exit_code());
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(2);
        }
    }
}
