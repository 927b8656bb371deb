//! lintscope CLI binary entry point.
//! Resolves configuration, runs the selected step, and prints results.

use clap::Parser;
use lintscope::cli::{Cli, Commands};
use lintscope::config::{self, EnvInputs};
use lintscope::{logging, output, paths, report};
use tracing::{debug, error, warn};

fn main() {
    let cli = Cli::parse();
    if let Commands::Version = cli.cmd {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let (eff, notes) = config::resolve_effective(&cli.overrides(), &EnvInputs::from_process());
    logging::init(eff.debug);
    for note in &notes {
        warn!("{}", note);
    }
    match eff.config_path.as_ref() {
        Some(p) => debug!("Using config {}", p.display()),
        None => debug!("No lintscope config found; using defaults"),
    }

    let result = match cli.cmd {
        Commands::Filter { .. } => paths::run_filter(&eff.filter_settings())
            .map(|res| output::print_filter(&res, &eff.output)),
        Commands::Report { .. } => {
            let res = report::build_report(&eff.report_settings());
            output::print_annotations(&res, &eff.output);
            report::write_report(&res).map(|()| output::print_report(&res, &eff.output))
        }
        Commands::Version => Ok(()),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
