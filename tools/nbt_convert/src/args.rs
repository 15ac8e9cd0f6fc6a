use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use nbt_codec::Compression;

#[derive(Parser)]
#[command(author, version, about)]
pub(crate) struct ConvertArgs {
    /// File to convert.
    pub input: PathBuf,

    /// Where to write the result. Defaults to standard output.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Format of the input. Guessed from its contents if omitted.
    #[arg(long = "from")]
    pub from: Option<Format>,

    /// Format of the output. Defaults to the format the input is not in.
    #[arg(long = "to")]
    pub to: Option<Format>,

    /// Compression applied to binary output.
    #[arg(default_value = "gzip")]
    #[arg(short = 'c', long = "compression")]
    pub compression: CompressionArg,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub(crate) enum Format {
    /// Binary NBT, optionally gzip or zlib compressed.
    Nbt,
    /// Stringified NBT.
    Snbt,
}

impl Format {
    /// Binary NBT either starts with a gzip or zlib header or contains zero
    /// bytes, which SNBT text does not.
    pub(crate) fn sniff(input: &[u8]) -> Self {
        let compressed = Compression::from_header(input).is_some();

        if compressed || input.contains(&0) || std::str::from_utf8(input).is_err() {
            Format::Nbt
        } else {
            Format::Snbt
        }
    }

    pub(crate) fn other(self) -> Self {
        match self {
            Format::Nbt => Format::Snbt,
            Format::Snbt => Format::Nbt,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub(crate) enum CompressionArg {
    None,
    Gzip,
    Zlib,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => Compression::None,
            CompressionArg::Gzip => Compression::Gzip,
            CompressionArg::Zlib => Compression::Zlib,
        }
    }
}
