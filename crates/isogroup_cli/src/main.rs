//! Command-line interface for inspecting 3D point-symmetry groups.

mod cli;
mod settings;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    // Initialize logging.
    env_logger::builder().init();
    color_eyre::install()?;

    let args = cli::Args::parse();
    let settings = settings::Settings::load(args.settings_file.as_deref())?;
    isomath::approx_cmp::set_default_precision(settings.precision);
    cli::exec(args.subcommand, &settings)
}
