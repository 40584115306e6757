use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode unpadded standard base64
    Decode(DecodeArgs),

    /// Parse dotted-decimal IPv4 addresses
    Ipv4(Ipv4Args),

    /// Show the lane backend and effective settings
    Info,
}

/// Arguments for decoding data
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Write decoded bytes as hex
    #[arg(long)]
    pub hex: bool,

    /// Decode the input exactly as given, whitespace included
    #[arg(long)]
    pub strict: bool,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for parsing addresses
#[derive(Args, Debug)]
pub struct Ipv4Args {
    /// Addresses to parse
    #[arg(required = true, value_name = "ADDR")]
    pub addresses: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}
