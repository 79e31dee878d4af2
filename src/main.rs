use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::PathBuf;
use tzdump::{decode, parse_with, DecodeOptions, Renderer, TypeIndexBound};

mod logging;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Line-oriented dump, written while decoding
    Text,
    /// Pretty-printed JSON of the whole file
    Json,
}

#[derive(Parser)]
#[command(name = "tzdump", version, about = "Dump the contents of a TZif time zone file")]
struct Cli {
    /// TZif file to read; stdin when omitted or `-`
    input: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,
    /// Accept a transition type equal to typecnt (one past the last record)
    #[arg(long)]
    inclusive_type_bound: bool,
    /// Decode only the 32-bit block, even for v2+ files
    #[arg(long)]
    v1_only: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::StderrTracer::register()?;
    let cli = Cli::parse();

    let data = read_input(&cli.input)?;
    let opts = DecodeOptions {
        type_index_bound: if cli.inclusive_type_bound {
            TypeIndexBound::Inclusive
        } else {
            TypeIndexBound::Strict
        },
        narrow_only: cli.v1_only,
    };

    match cli.format {
        Format::Text => {
            let mut renderer = Renderer::new(io::stdout().lock());
            let result = decode(&data, &opts, &mut renderer);
            // Flush what was rendered before reporting a decode error.
            renderer.finish()?;
            result?;
        }
        Format::Json => {
            let file = parse_with(&data, &opts)?;
            println!("{}", tzdump::render::to_json(&file)?);
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn read_input(path: &Option<PathBuf>) -> io::Result<Vec<u8>> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read(p),
        _ => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
