use std::fs::File;
use std::io::{self, BufWriter, Read, Write, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jsonry::{FieldNames, Options, Registry, WriterVariant};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    Compact,
    Pretty,
    Fast,
}

impl From<VariantArg> for WriterVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Compact => WriterVariant::Compact,
            VariantArg::Pretty => WriterVariant::Pretty,
            VariantArg::Fast => WriterVariant::Fast,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "jsonry-cli",
    about = "Re-emit a JSON document through the jsonry writers",
    version
)]
struct Args {
    /// Writer variant used for output
    #[arg(long, value_enum, default_value_t = VariantArg::Compact)]
    variant: VariantArg,

    /// Indentation width for the pretty variant
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Leave object keys unquoted when they are valid identifiers
    #[arg(long, default_value_t = false)]
    bare_names: bool,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut buf = String::new();
    match &args.input {
        Some(path) => {
            let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            f.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }
    let value: serde_json::Value = serde_json::from_str(&buf).context("input is not valid JSON")?;
    log::debug!("parsed {} bytes of input", buf.len());

    let options = Options {
        variant: args.variant.into(),
        indent: args.indent,
        field_names: if args.bare_names {
            FieldNames::Bare
        } else {
            FieldNames::Quoted
        },
        ..Options::default()
    };
    let registry = Registry::with_options(options);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    registry.to_writer(&mut out, &value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
