use gdext_config::Settings;
use gdext_logger as logger;
use gdext_upgrade::{
    cli::Cli,
    run_upgrade,
    runner::SystemRunner,
    summary::{print_banner, print_summary},
    Toolchain,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logger::verbosity_to_filter(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse_lenient(std::env::args_os());

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level(), cli.global.quiet) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing(cli.global.verbosity_level());

    // Ctrl-C is a cancellation, not a failure
    if let Err(e) = ctrlc::set_handler(|| {
        logger::spinner_stop();
        eprintln!("\nCancelled.");
        std::process::exit(0);
    }) {
        logger::warn(&format!("Failed to install Ctrl-C handler: {}", e));
    }

    if let Some(path) = Settings::path() {
        logger::info(&format!("Settings file: {}", path.display()));
    }
    let settings = Settings::load().unwrap_or_else(|e| {
        logger::warn(&format!("Failed to load settings, using defaults: {}", e));
        Settings::default()
    });

    let cwd = std::env::current_dir().unwrap_or_else(|e| {
        logger::warn(&format!("Could not read the current directory: {}", e));
        PathBuf::from(".")
    });
    let exe = std::env::current_exe().ok();

    let options = cli.into_options(exe.as_deref(), &cwd);
    let toolchain = Toolchain::from_settings(&settings);
    logger::debug(&format!("Toolchain: {:?}", toolchain));

    print_banner(&options);

    match run_upgrade(&options, &toolchain, &SystemRunner) {
        Ok(report) => print_summary(&report),
        Err(e) => {
            logger::error(&e.to_string());
            if logger::get_verbosity() > 0 {
                logger::show_log_path();
            }
            std::process::exit(e.exit_code());
        }
    }
}
