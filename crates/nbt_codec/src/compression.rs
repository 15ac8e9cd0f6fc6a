//! Gzip and zlib framing around binary NBT.
//!
//! Files such as `level.dat` are gzip compressed, region file chunks are
//! usually zlib compressed, and network payloads are not compressed at all.
//! The framing is recognized from the first byte of the data.

use std::io::{BufRead, BufReader, Read, Write};

use flate2::bufread::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use tracing::debug;

use crate::binary::{from_binary, to_binary, CountingWriter};
use crate::{NamedTag, Result};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    #[default]
    Gzip,
    Zlib,
}

impl Compression {
    /// Guesses the framing from the first byte of the data. `0x1f` starts a
    /// gzip header, `0x78` a zlib header. Anything else is taken to be
    /// uncompressed NBT, which starts with a kind id.
    pub fn detect(first_byte: u8) -> Self {
        match first_byte {
            0x1f => Compression::Gzip,
            0x78 => Compression::Zlib,
            _ => Compression::None,
        }
    }

    /// Recognizes a complete envelope header: the two byte gzip magic, or a
    /// zlib header using deflate with a valid check value. Returns `None` if
    /// `header` starts with neither.
    pub fn from_header(header: &[u8]) -> Option<Self> {
        match *header {
            [0x1f, 0x8b, ..] => Some(Compression::Gzip),
            [cmf, flg, ..] if cmf & 0x0f == 8 && u16::from_be_bytes([cmf, flg]) % 31 == 0 => {
                Some(Compression::Zlib)
            }
            _ => None,
        }
    }
}

/// Decodes binary NBT that may be gzip or zlib compressed, returning the root
/// along with the detected [`Compression`].
pub fn from_compressed_reader<R: Read>(reader: R) -> Result<(NamedTag, Compression)> {
    let mut reader = BufReader::new(reader);

    let compression = reader
        .fill_buf()?
        .first()
        .map_or(Compression::None, |&b| Compression::detect(b));

    debug!(?compression, "detected NBT envelope");

    let root = match compression {
        Compression::Gzip => from_binary(GzDecoder::new(reader))?,
        Compression::Zlib => from_binary(ZlibDecoder::new(reader))?,
        Compression::None => from_binary(reader)?,
    };

    Ok((root, compression))
}

/// Encodes `tag` as binary NBT, compressed with `compression`. Returns the
/// number of bytes written to `writer`.
pub fn to_compressed_writer<W: Write>(
    tag: &NamedTag,
    writer: W,
    compression: Compression,
) -> Result<usize> {
    let mut out = CountingWriter::new(writer);

    match compression {
        Compression::Gzip => {
            let mut z = GzEncoder::new(&mut out, flate2::Compression::default());
            to_binary(tag, &mut z)?;
            z.finish()?;
        }
        Compression::Zlib => {
            let mut z = ZlibEncoder::new(&mut out, flate2::Compression::default());
            to_binary(tag, &mut z)?;
            z.finish()?;
        }
        Compression::None => {
            to_binary(tag, &mut out)?;
        }
    }

    out.flush()?;

    Ok(out.written)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{compound, Error, List};

    fn level() -> NamedTag {
        NamedTag::new(
            "Data",
            compound! {
                "LevelName" => "world",
                "SpawnY" => 64,
                "ServerBrands" => List::String(vec!["vanilla".to_owned()]),
            },
        )
    }

    #[test]
    fn round_trip_each_compression() {
        for (compression, first) in [
            (Compression::None, 0x0a),
            (Compression::Gzip, 0x1f),
            (Compression::Zlib, 0x78),
        ] {
            let root = level();
            let mut buf = vec![];

            let written = to_compressed_writer(&root, &mut buf, compression).unwrap();

            assert_eq!(written, buf.len());
            assert_eq!(buf[0], first);
            assert_eq!(Compression::detect(buf[0]), compression);

            let (decoded, detected) = from_compressed_reader(buf.as_slice()).unwrap();

            assert_eq!(detected, compression);
            assert_eq!(decoded, root);
        }
    }

    #[test]
    fn header_needs_full_magic() {
        let mut gzip = vec![];
        to_compressed_writer(&level(), &mut gzip, Compression::Gzip).unwrap();
        let mut zlib = vec![];
        to_compressed_writer(&level(), &mut zlib, Compression::Zlib).unwrap();

        assert_eq!(Compression::from_header(&gzip), Some(Compression::Gzip));
        assert_eq!(Compression::from_header(&zlib), Some(Compression::Zlib));

        assert_eq!(Compression::from_header(b"xp:{}"), None);
        assert_eq!(Compression::from_header(b"x"), None);
        assert_eq!(Compression::from_header(&[0x1f]), None);
        assert_eq!(Compression::from_header(&[0x0a, 0, 0]), None);
    }

    #[test]
    fn uncompressed_size_matches_binary() {
        let root = level();
        let mut buf = vec![];

        let written = to_compressed_writer(&root, &mut buf, Compression::None).unwrap();
        assert_eq!(written, root.written_size());
    }

    #[test]
    fn empty_input() {
        assert!(matches!(
            from_compressed_reader(std::io::empty()),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn truncated_gzip() {
        let mut buf = vec![];
        to_compressed_writer(&level(), &mut buf, Compression::Gzip).unwrap();
        buf.truncate(buf.len() / 2);

        assert!(from_compressed_reader(buf.as_slice()).is_err());
    }
}
