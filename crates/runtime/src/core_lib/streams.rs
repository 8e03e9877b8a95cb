//! The `streams` core library module

use crate::{
    error::{
        capability_error, construction_error, map_io_err, missing_argument, unexpected_nature,
    },
    prelude::*,
};
use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};
use std::io::{self, Read, Write};

/// The package name that the module's functions are registered under
pub const PACKAGE: &str = "streams";

const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Registers the module's functions with the given registry
pub fn register(registry: &mut Registry) {
    registry.register(
        PACKAGE,
        FunctionDescriptor::new(
            "lines",
            FunctionSignature::new(&[("stream", Nature::Stream)], &["stream"], Nature::List)
                .with_pipe_argument("stream"),
            false,
            lines,
        ),
    );

    registry.register(
        PACKAGE,
        FunctionDescriptor::new(
            "write",
            FunctionSignature::new(
                &[("data", Nature::Stream), ("to", Nature::Stream)],
                &["data", "to"],
                Nature::Bool,
            )
            .with_pipe_argument("data"),
            true,
            write,
        ),
    );

    registry.register(
        PACKAGE,
        FunctionDescriptor::new(
            "string_stream",
            FunctionSignature::new(&[("v", Nature::String)], &["v"], Nature::Stream)
                .with_pipe_argument("v"),
            false,
            string_stream,
        ),
    );

    registry.register(
        PACKAGE,
        FunctionDescriptor::new(
            "zip",
            FunctionSignature::new(&[("s", Nature::Stream)], &["s"], Nature::Stream)
                .with_pipe_argument("s"),
            false,
            zip,
        ),
    );

    registry.register(
        PACKAGE,
        FunctionDescriptor::new(
            "unzip",
            FunctionSignature::new(&[("s", Nature::Stream)], &["s"], Nature::Stream)
                .with_pipe_argument("s"),
            false,
            unzip,
        ),
    );
}

/// `lines` - splits a stream into an ordered list of its lines
///
/// The whole source is consumed before the result is produced; an I/O error
/// mid-scan aborts the call without a partial result.
fn lines(args: &Arguments) -> Result<Value> {
    let stream = expect_stream(args, "stream")?;

    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes)?;

    let mut result = ValueVec::new();
    for line in split_lines(&bytes) {
        result.push(String::from_utf8_lossy(line).as_ref().into());
    }
    Ok(Value::List(result.into()))
}

// Splits on '\n', also stripping a preceding '\r'. A final unterminated segment
// is kept, while a terminal terminator produces no extra empty segment.
fn split_lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut segments = bytes.split(|byte| *byte == b'\n');
    if bytes.is_empty() || bytes.ends_with(b"\n") {
        segments.next_back();
    }
    segments.map(|segment| segment.strip_suffix(b"\r").unwrap_or(segment))
}

/// `write` - copies the `data` stream's bytes into the `to` stream
///
/// Both capabilities are checked before any bytes move. If the copy is
/// interrupted by an I/O error then the destination keeps the partial prefix
/// that was written before the failure; handling that partial state is the
/// caller's responsibility.
fn write(args: &Arguments) -> Result<Value> {
    let data = expect_stream(args, "data")?;
    let to = expect_stream(args, "to")?;

    if !data.is_readable() {
        return capability_error(Capability::Read);
    }
    if !to.is_writable() {
        return capability_error(Capability::Write);
    }

    let mut buffer = [0; COPY_BUFFER_SIZE];
    loop {
        match data.read(&mut buffer)? {
            0 => break,
            count => to.write_all(&buffer[..count])?,
        }
    }

    Ok(true.into())
}

/// `string_stream` - makes a read-only stream from a string's bytes
///
/// The stream owns a copy of the bytes, independent of the original string.
fn string_stream(args: &Arguments) -> Result<Value> {
    let v = expect_str(args, "v")?;
    Ok(Stream::new(MemorySource::new(v.as_bytes())).into())
}

/// `zip` - wraps a write-capable stream with zlib compression
///
/// Bytes written to the wrapper are compressed and forwarded to the original
/// sink. Compressed output is only complete once the wrapper has been
/// finished; unflushed data is lost otherwise.
fn zip(args: &Arguments) -> Result<Value> {
    let s = expect_stream(args, "s")?;
    if !s.is_writable() {
        return capability_error(Capability::Write);
    }
    Ok(Stream::new(ZlibSink::new(s.clone())).into())
}

/// `unzip` - wraps a read-capable stream with zlib decompression
///
/// Construction probes the source's zlib header; a failed construction leaves
/// up to two header bytes consumed from the source.
fn unzip(args: &Arguments) -> Result<Value> {
    let s = expect_stream(args, "s")?;
    if !s.is_readable() {
        return capability_error(Capability::Read);
    }
    Ok(Stream::new(ZlibSource::new(s.clone())?).into())
}

// The signature checker has already validated natures by the time an
// implementation runs; these keep the implementations honest if they're called
// directly.
fn expect_stream<'a>(args: &'a Arguments, name: &'static str) -> Result<&'a Stream> {
    match args.get(name) {
        Some(Value::Stream(stream)) => Ok(stream),
        Some(other) => unexpected_nature(name, Nature::Stream, other.nature()),
        None => missing_argument(name),
    }
}

fn expect_str<'a>(args: &'a Arguments, name: &'static str) -> Result<&'a str> {
    match args.get(name) {
        Some(Value::Str(s)) => Ok(s.as_ref()),
        Some(other) => unexpected_nature(name, Nature::String, other.nature()),
        None => missing_argument(name),
    }
}

// io::Read/io::Write adapters that let the flate2 codecs drive a stream value.
// Runtime errors are tunnelled through io::Error and unwrapped by map_io_err.
struct StreamReader(Stream);

impl Read for StreamReader {
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        self.0.read(buffer).map_err(io::Error::other)
    }
}

struct StreamWriter(Stream);

impl Write for StreamWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.write(bytes).map_err(io::Error::other)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush().map_err(io::Error::other)
    }
}

struct ZlibSink {
    encoder: RCell<Option<ZlibEncoder<StreamWriter>>>,
    id: ValueString,
}

impl ZlibSink {
    fn new(inner: Stream) -> Self {
        let id = format!("zip({})", inner.id()).into();
        Self {
            encoder: RCell::new(Some(ZlibEncoder::new(
                StreamWriter(inner),
                Compression::default(),
            ))),
            id,
        }
    }
}

impl StreamRead for ZlibSink {}

impl StreamWrite for ZlibSink {
    fn write(&self, bytes: &[u8]) -> Result<usize> {
        match self.encoder.borrow_mut().as_mut() {
            Some(encoder) => encoder.write(bytes).map_err(map_io_err),
            None => Err(Error::Io(io::Error::other(
                "the stream has already been finished",
            ))),
        }
    }

    fn flush(&self) -> Result<()> {
        match self.encoder.borrow_mut().as_mut() {
            Some(encoder) => encoder.flush().map_err(map_io_err),
            None => Ok(()),
        }
    }

    fn finish(&self) -> Result<()> {
        match self.encoder.borrow_mut().take() {
            Some(encoder) => encoder.finish().map(|_| ()).map_err(map_io_err),
            None => Ok(()),
        }
    }
}

impl StreamBacking for ZlibSink {
    fn id(&self) -> ValueString {
        self.id.clone()
    }

    fn capability(&self) -> Capability {
        Capability::Write
    }
}

struct ZlibSource {
    decoder: RCell<ZlibDecoder<io::Chain<io::Cursor<[u8; 2]>, StreamReader>>>,
    id: ValueString,
}

impl ZlibSource {
    // The zlib header is validated eagerly so that wrapping an invalid payload
    // fails at construction rather than on first read.
    fn new(inner: Stream) -> Result<Self> {
        let mut header = [0; 2];
        let mut header_bytes = 0;
        while header_bytes < header.len() {
            match inner.read(&mut header[header_bytes..])? {
                0 => return construction_error("missing zlib header"),
                count => header_bytes += count,
            }
        }

        let method = header[0] & 0x0f;
        let window = header[0] >> 4;
        if method != 8 || window > 7 || u16::from_be_bytes(header) % 31 != 0 {
            return construction_error("invalid zlib header");
        }
        if header[1] & 0x20 != 0 {
            return construction_error("preset dictionaries aren't supported");
        }

        let id = format!("unzip({})", inner.id()).into();
        let reader = io::Cursor::new(header).chain(StreamReader(inner));
        Ok(Self {
            decoder: RCell::new(ZlibDecoder::new(reader)),
            id,
        })
    }
}

impl StreamRead for ZlibSource {
    fn read(&self, buffer: &mut [u8]) -> Result<usize> {
        self.decoder.borrow_mut().read(buffer).map_err(map_io_err)
    }
}

impl StreamWrite for ZlibSource {}

impl StreamBacking for ZlibSource {
    fn id(&self) -> ValueString {
        self.id.clone()
    }

    fn capability(&self) -> Capability {
        Capability::Read
    }
}
