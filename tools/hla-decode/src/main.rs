// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! hla-decode - Decode HLA-encoded payloads
//!
//! # Usage
//!
//! ```bash
//! # Standard type, payload as hex
//! hla-decode --type HLAASCIIstring "00 00 00 02 68 69"
//!
//! # Own data types, payload from a file, JSON output
//! hla-decode --schema types.toml --type Reading --input reading.bin --format json
//!
//! # Show every known data type
//! hla-decode list-types --schema types.toml
//! ```

mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hla_omt::{AlignmentPolicy, DecodeConfig, Decoder, SchemaDocument, TypeRegistry};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Decode HLA-encoded payloads
#[derive(Parser, Debug)]
#[command(name = "hla-decode")]
#[command(about = "Decode HLA-encoded payloads against an OMT data type schema")]
#[command(version)]
struct Args {
    /// Name of the data type to decode
    #[arg(short = 't', long = "type")]
    data_type: Option<String>,

    /// TOML schema with additional data types
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Decoder configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable alignment padding
    #[arg(long)]
    packed: bool,

    /// Byte offset to start decoding at
    #[arg(long, default_value = "0")]
    offset: usize,

    /// Output format: pretty, json
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Read the payload from a file instead of the command line
    #[arg(short, long, conflicts_with = "hex")]
    input: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Payload as hex digits (whitespace, ':' and 0x prefixes allowed)
    hex: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every registered data type
    ListTypes {
        /// TOML schema with additional data types
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum OutputFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "p" => Ok(OutputFormat::Pretty),
            "json" | "j" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(Commands::ListTypes { schema }) = &args.command {
        let registry = load_registry(schema.as_deref().or(args.schema.as_deref()))?;
        list_types(&registry);
        return Ok(());
    }

    let registry = load_registry(args.schema.as_deref())?;
    let config = load_config(&args)?;
    let payload = load_payload(&args)?;

    let Some(type_name) = args.data_type.as_deref() else {
        bail!("--type is required (see `hla-decode list-types`)");
    };
    let id = registry
        .get_data_type(type_name)
        .with_context(|| format!("unknown data type '{}'", type_name))?;
    let mut element = registry
        .create_data_element(id)
        .with_context(|| format!("cannot instantiate data type '{}'", type_name))?;

    tracing::debug!(
        data_type = type_name,
        bytes = payload.len(),
        offset = args.offset,
        "decoding payload"
    );
    let end = Decoder::new(&registry)
        .with_config(config)
        .decode(&mut element, &payload, args.offset)
        .with_context(|| format!("decoding '{}' failed", type_name))?;

    match args.format {
        OutputFormat::Pretty => {
            print!("{}", render::pretty(&registry, &element, type_name));
            println!("-- decoded {} of {} bytes, end offset {}", end - args.offset, payload.len(), end);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "type": type_name,
                "value": render::json(&registry, &element),
                "start": args.offset,
                "end": end,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    if end < payload.len() {
        tracing::info!(trailing = payload.len() - end, "payload has trailing bytes");
    }
    Ok(())
}

fn load_registry(schema: Option<&Path>) -> Result<TypeRegistry> {
    let mut registry = TypeRegistry::with_standard_types();
    if let Some(path) = schema {
        let document = SchemaDocument::from_file(path)
            .with_context(|| format!("failed to load schema {}", path.display()))?;
        let created = document
            .merge_into(&mut registry)
            .with_context(|| format!("failed to merge schema {}", path.display()))?;
        tracing::info!(created, path = %path.display(), "loaded data types");
    }
    Ok(registry)
}

fn load_config(args: &Args) -> Result<DecodeConfig> {
    let mut config = match &args.config {
        Some(path) => DecodeConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DecodeConfig::default(),
    };
    if args.packed {
        config.alignment = AlignmentPolicy::Packed;
    }
    Ok(config)
}

fn load_payload(args: &Args) -> Result<Vec<u8>> {
    match (&args.input, &args.hex) {
        (Some(path), _) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        (None, Some(hex)) => parse_hex(hex),
        (None, None) => bail!("no payload: pass hex digits or --input <FILE>"),
    }
}

/// Parse hex digits, ignoring whitespace, ':' / ',' separators and `0x` prefixes.
fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .split(|c: char| c.is_whitespace() || c == ':' || c == ',')
        .map(|token| token.trim_start_matches("0x").trim_start_matches("0X"))
        .flat_map(str::bytes)
        .collect();
    if digits.len() % 2 != 0 {
        bail!("odd number of hex digits");
    }
    digits
        .chunks(2)
        .map(|pair| -> Result<u8> {
            let high = hex_value(pair[0])?;
            let low = hex_value(pair[1])?;
            Ok((high << 4) | low)
        })
        .collect()
}

fn hex_value(digit: u8) -> Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => bail!("invalid hex digit '{}'", digit as char),
    }
}

fn list_types(registry: &TypeRegistry) {
    println!("{:>5}  {:<14} {:<32} {:>5}", "INDEX", "KIND", "NAME", "ALIGN");
    for ty in registry.iter() {
        let index = ty
            .index_in_list()
            .map_or_else(|| "-".to_string(), |i| i.to_string());
        println!(
            "{:>5}  {:<14} {:<32} {:>5}",
            index,
            ty.kind(),
            ty.name(),
            registry.alignment(ty.id())
        );
    }
}
