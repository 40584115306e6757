mod cli;

use std::process::ExitCode;

use lanekit::ColorMode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("LANEKIT_LOG", "warn"))
        .format_timestamp(None)
        .init();

    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            let color = cli::report::should_use_color(ColorMode::Auto);
            eprintln!("{}", cli::report::render_error(&*e, color));
            ExitCode::FAILURE
        }
    }
}
