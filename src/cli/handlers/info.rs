use crate::cli::global::GlobalArgs;
use lanekit::Settings;
use lanekit::lanes::{self, Backend};
use std::process::ExitCode;

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn handle(
    global: &GlobalArgs,
    settings: &Settings,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let backend = lanes::active_backend();
    println!("backend: {backend}");
    println!("  ssse3: {}", yes_no(lanes::has_ssse3()));
    println!("  neon:  {}", yes_no(lanes::has_neon()));
    if backend == Backend::Portable && !global.quiet && cfg!(feature = "simd") {
        eprintln!("Note: no accelerated swizzle on this CPU, using the portable path");
    }

    println!();
    println!("settings files:");
    let mut paths = Settings::search_paths();
    paths.extend(global.config.clone());
    for path in paths {
        let state = if path.exists() { "found" } else { "missing" };
        println!("  {} ({state})", path.display());
    }

    println!();
    println!("effective settings:");
    print!("{}", toml::to_string(settings)?);

    Ok(ExitCode::SUCCESS)
}
