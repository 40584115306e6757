use crate::cli::{args::Ipv4Args, report};
use lanekit::{ParseError, Settings};
use serde::Serialize;
use std::process::ExitCode;

/// One line of `--json` output.
#[derive(Serialize)]
struct Outcome<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    octets: Option<[u8; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    at: Option<&'a str>,
}

impl<'a> Outcome<'a> {
    fn new(input: &'a str, result: &'a Result<[u8; 4], ParseError>) -> Self {
        match result {
            Ok(octets) => Outcome {
                input,
                octets: Some(*octets),
                error: None,
                field: None,
                at: None,
            },
            Err(e) => Outcome {
                input,
                octets: None,
                error: Some(e.kind().to_string()),
                field: e.kind().field(),
                at: e.fragment(),
            },
        }
    }
}

pub fn handle(
    args: Ipv4Args,
    settings: &Settings,
    color: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let results: Vec<_> = args
        .addresses
        .iter()
        .map(|addr| lanekit::parse(addr))
        .collect();
    let failures = results.iter().filter(|r| r.is_err()).count();
    log::debug!("parsed {} addresses, {failures} failed", results.len());

    if args.json || settings.output.json {
        let outcomes: Vec<_> = args
            .addresses
            .iter()
            .zip(&results)
            .map(|(addr, result)| Outcome::new(addr, result))
            .collect();
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for result in &results {
            match result {
                Ok(octets) => println!("{}", std::net::Ipv4Addr::from(*octets)),
                Err(e) => eprintln!("{}", report::render_parse_error(e, color)),
            }
        }
    }

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
