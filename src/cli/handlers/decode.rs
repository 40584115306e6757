use crate::cli::{args::DecodeArgs, global::GlobalArgs, report};
use lanekit::{DecodeError, DecodeFormat, Settings};
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

pub fn handle(
    args: DecodeArgs,
    global: &GlobalArgs,
    settings: &Settings,
    color: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let input = if let Some(file_path) = &args.file {
        // Check file size if max_size is set
        if global.max_size > 0 {
            let file_size = fs::metadata(file_path)?.len() as usize;
            if file_size > global.max_size {
                if !global.force {
                    return Err(format!(
                        "File size ({} bytes) exceeds limit ({} bytes). Use --force to process anyway.",
                        file_size, global.max_size
                    )
                    .into());
                }
                if !global.quiet {
                    eprintln!(
                        "Warning: Processing large file ({} bytes, limit: {} bytes)",
                        file_size, global.max_size
                    );
                }
            }
        }
        fs::read(file_path)?
    } else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        // Check stdin size after reading
        if global.max_size > 0 && buffer.len() > global.max_size {
            if !global.force {
                return Err(format!(
                    "Input size ({} bytes) exceeds maximum ({} bytes). Use --force to process anyway.",
                    buffer.len(),
                    global.max_size
                )
                .into());
            }
            if !global.quiet {
                eprintln!(
                    "Warning: Processing large input ({} bytes, limit: {} bytes)",
                    buffer.len(),
                    global.max_size
                );
            }
        }
        buffer
    };

    let strip = settings.decode.ignore_whitespace && !args.strict;
    let stripped: Vec<u8>;
    let ascii = if strip {
        stripped = input
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        &stripped
    } else {
        &input
    };
    log::debug!("decoding {} bytes of base64", ascii.len());

    let decoded = match lanekit::try_decode(ascii) {
        Ok(decoded) => decoded,
        Err(e) => {
            let e = if strip { locate_in_input(e, &input) } else { e };
            eprintln!("{}", report::render_decode_error(&e, color));
            return Ok(ExitCode::FAILURE);
        }
    };

    let format = if args.hex {
        DecodeFormat::Hex
    } else {
        settings.decode.format
    };
    let output = match format {
        DecodeFormat::Raw => decoded,
        DecodeFormat::Hex => {
            let mut text = hex::encode(&decoded);
            text.push('\n');
            text.into_bytes()
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output)?;
            if !global.quiet {
                eprintln!("Wrote {} bytes to {}", output.len(), path.display());
            }
        }
        None => io::stdout().write_all(&output)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Maps an error position in the whitespace-stripped buffer back to `input`.
fn locate_in_input(err: DecodeError, input: &[u8]) -> DecodeError {
    match err {
        DecodeError::InvalidCharacter { byte, position } => DecodeError::InvalidCharacter {
            byte,
            position: input
                .iter()
                .enumerate()
                .filter(|(_, b)| !b.is_ascii_whitespace())
                .nth(position)
                .map_or(position, |(i, _)| i),
        },
        other => other,
    }
}
