// SPDX-License-Identifier: MPL-2.0

use std::env;
use std::time::Instant;

use fda::cli::CliArgs;
use fda::io::{ensure_input, load_image, save_image};
use fda::{FdaResult, FourierDomainAdaptation};
use log::info;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> FdaResult<()> {
    let args = CliArgs::parse(env::args().skip(1))?;
    let params = args.resolve_params()?;

    // Both inputs must exist before anything is decoded.
    ensure_input(&args.source)?;
    ensure_input(&args.target)?;
    let source = load_image(&args.source)?;
    let target = load_image(&args.target)?;

    let now = Instant::now();
    let adapted = FourierDomainAdaptation::new(params).adapt(&source, &target)?;
    info!(
        "Domain adaptation performed in {:.3} seconds",
        now.elapsed().as_secs_f64()
    );

    save_image(&adapted, &args.output)?;
    info!("Adapted image written to {}", args.output.display());
    Ok(())
}
