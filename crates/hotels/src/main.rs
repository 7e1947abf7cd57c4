//! `hotels`: render the hotel listing through each of the three pipelines.
//!
//! ```bash
//! hotels                       # all pipelines, sample catalog, built-in templates
//! hotels --templates ./site    # same, templates read from ./site
//! hotels substitute            # marker substitution only
//! hotels minijinja --template page.html
//! hotels tera --dir ./site --name listing.html
//! hotels --catalog hotels.yaml tera
//! RUST_LOG=debug hotels        # log template resolution to stderr
//! ```

use std::io;

use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    cli::execute(cli, &mut stdout.lock())
}
