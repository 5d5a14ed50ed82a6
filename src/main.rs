use clap::Parser;

use unreal_ci::cli::{self, Args};
use unreal_ci::{logging, ui};

fn main() {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    if let Err(e) = cli::run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
