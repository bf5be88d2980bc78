//! yaml2jmxtrans - Generate jmxtrans configuration from YAML
//!
//! Reads one YAML input document and writes `<setname>.json` for every host
//! set it describes.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{error, info};

use yaml2jmxtrans::cli::Cli;
use yaml2jmxtrans::generator::Generator;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{}", e.kind());
            println!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
    };

    yaml2jmxtrans::init_logging(&cli.log_level.to_string())?;

    // Error messages already carry their causes, so only the outer one is logged
    if let Err(e) = run(&cli) {
        error!(error = %e, "Generation failed");
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        input = %cli.input.display(),
        "Starting yaml2jmxtrans"
    );

    let generator = Generator::load(&cli.input)?;

    if cli.validate {
        generator.generate_all()?;
        println!(
            "Configuration is valid: {} host sets, {} queries",
            generator.registry().len(),
            generator.catalog().len()
        );
        return Ok(());
    }

    if cli.dry_run {
        for (name, config) in generator.generate_all()? {
            println!("==> {}.json <==", name);
            println!("{}", config.to_json()?);
        }
        return Ok(());
    }

    let written = generator.write_all(&cli.output_dir)?;
    info!(
        files = written.len(),
        output_dir = %cli.output_dir.display(),
        "Generation complete"
    );

    Ok(())
}
