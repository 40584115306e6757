mod args;
mod global;
mod handlers;
pub mod report;

use clap::Parser;
use lanekit::{ColorMode, Settings};
use std::process::ExitCode;

use args::Commands;
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "lanekit")]
#[command(version)]
#[command(about = "Lane-parallel base64 decoding and IPv4 parsing", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

pub fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = Settings::load_with_overrides(cli.global.config.as_deref())?;
    let color_mode = if cli.global.no_color {
        ColorMode::Never
    } else {
        settings.output.color
    };
    let color = report::should_use_color(color_mode);
    log::debug!("backend {}, color {color}", lanekit::active_backend());

    match cli.command {
        Commands::Decode(args) => handlers::decode::handle(args, &cli.global, &settings, color),
        Commands::Ipv4(args) => handlers::ipv4::handle(args, &settings, color),
        Commands::Info => handlers::info::handle(&cli.global, &settings),
    }
}
