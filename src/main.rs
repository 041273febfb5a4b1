use anyhow::Result;
use clap::Parser;
use tracing::error;

use notegrid::{analyze_vault, init_ignore_patterns, report, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if args.init {
        let written = init_ignore_patterns(&args.vault)?;
        println!("Created {} with default patterns", written.display());
        return Ok(());
    }

    utils::validate_args(&args)?;

    match analyze_vault(&args).and_then(|result| report::render(&result, &args)) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!(action = "fail", component = "main", error = %format!("{:#}", e), "Analysis failed");
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
