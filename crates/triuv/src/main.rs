//! Assigns three stored UV coordinates to the corners of a selected triangle,
//! rotating through all six corner mappings.

mod cli;
mod panel;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();
    color_eyre::install()?;

    let prefs = triuv_prefs::Preferences::load();
    cli::exec(args.subcommand, &prefs)
}
