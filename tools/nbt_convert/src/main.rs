use std::fs;
use std::io::{self, Write};

use anyhow::Context;
use args::{ConvertArgs, Format};
use clap::Parser;
use nbt_codec::{from_compressed_reader, from_snbt_str, to_compressed_writer, to_snbt_string};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod args;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = ConvertArgs::parse();

    let input = fs::read(&args.input)
        .with_context(|| format!("failed to read `{}`", args.input.display()))?;

    let from = args.from.unwrap_or_else(|| Format::sniff(&input));
    let to = args.to.unwrap_or_else(|| from.other());

    debug!(?from, ?to, "converting {} bytes", input.len());

    let root = match from {
        Format::Nbt => {
            let (root, compression) =
                from_compressed_reader(input.as_slice()).context("failed to decode binary NBT")?;
            info!(?compression, "read binary NBT");
            root
        }
        Format::Snbt => {
            let text = std::str::from_utf8(&input).context("SNBT input is not valid UTF-8")?;
            from_snbt_str(text).context("failed to parse SNBT")?
        }
    };

    let output = match to {
        Format::Snbt => {
            let mut s = to_snbt_string(&root);
            s.push('\n');
            s.into_bytes()
        }
        Format::Nbt => {
            let mut buf = vec![];
            to_compressed_writer(&root, &mut buf, args.compression.into())
                .context("failed to encode binary NBT")?;
            buf
        }
    };

    match &args.output {
        Some(path) => fs::write(path, &output)
            .with_context(|| format!("failed to write `{}`", path.display()))?,
        None => io::stdout().lock().write_all(&output)?,
    }

    info!(bytes = output.len(), "wrote {to:?}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use nbt_codec::{Compound, NamedTag};

    use super::*;

    #[test]
    fn sniff_input_format() {
        assert_eq!(Format::sniff(b"{a: 1}"), Format::Snbt);
        assert_eq!(Format::sniff(b"\n{a: 1}"), Format::Snbt);
        assert_eq!(Format::sniff(&[0x0a, 0, 0, 0]), Format::Nbt);
        assert_eq!(Format::sniff(&[0x1f, 0x8b]), Format::Nbt);
        assert_eq!(Format::sniff(&[0x78, 0x9c]), Format::Nbt);
        assert_eq!(Format::sniff(&[0xff]), Format::Nbt);
    }

    #[test]
    fn sniff_snbt_starting_like_a_header() {
        let text = to_snbt_string(&NamedTag::new("xp", Compound::new()));
        assert_eq!(text, "xp:{}");

        assert_eq!(Format::sniff(text.as_bytes()), Format::Snbt);
        assert_eq!(Format::sniff(b"x"), Format::Snbt);
        assert_eq!(Format::sniff(b"\x1f"), Format::Snbt);
    }

    #[test]
    fn args_parse() {
        let args = ConvertArgs::parse_from(["nbt_convert", "level.dat", "--to", "snbt"]);

        assert_eq!(args.to, Some(Format::Snbt));
        assert_eq!(args.from, None);
        assert_eq!(args.compression, args::CompressionArg::Gzip);
        assert!(args.output.is_none());
    }
}
