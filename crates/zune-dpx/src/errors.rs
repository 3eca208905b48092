/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use zune_core::bytestream::ZByteIoError;

/// Possible errors that may occur during decoding
///
/// Variants carry the values that caused them rather than formatted
/// messages, so callers can build their own diagnostics.
pub enum DpxDecodeErrors {
    /// The first four bytes are not `SDPX`
    ///
    /// The argument holds the bytes actually found. Little endian
    /// files (`XPDS`) end up here too.
    BadMagic([u8; 4]),
    /// The stream ended inside a header field
    TruncatedHeader {
        /// Name of the field being read
        field:    &'static str,
        /// Byte offset of the field from the start of the file
        offset:   u64,
        /// Bytes the field needs
        expected: usize,
        /// Bytes actually read
        found:    usize
    },
    /// The stream could not be positioned at a header field or at
    /// the start of pixel data
    SeekError { offset: u64, error: ZByteIoError },
    /// Width or height is zero
    ZeroDimensions { width: u32, height: u32 },
    /// Width or height exceeds the configured limits
    DimensionsTooLarge {
        width:      u32,
        height:     u32,
        max_width:  usize,
        max_height: usize
    },
    /// The row or image size cannot be represented in a `usize`
    DimensionOverflow { width: u32, height: u32 },
    /// Strict mode only, the data offset field points inside the
    /// header region the decoder parses
    InvalidDataOffset { offset: u32, minimum: u64 },
    /// Strict mode only, the first image element is not 16 bit
    /// unencoded RGBA
    UnsupportedElement {
        field:    &'static str,
        expected: u32,
        found:    u32
    },
    /// Pixel data ended before all rows were read
    PrematureEof {
        /// Zero based index of the row that was cut short
        row:      usize,
        /// Bytes in a full row
        expected: usize,
        /// Bytes the stream had for that row
        found:    usize
    },
    /// Allocating the scanline or output buffer failed,
    /// the argument is the requested size in bytes
    OutOfMemory(usize),
    /// The underlying reader failed
    IoError(ZByteIoError)
}

impl Debug for DpxDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            DpxDecodeErrors::BadMagic(found) => {
                writeln!(
                    f,
                    "Wrong magic bytes, expected `SDPX` as image start but found {found:?}"
                )
            }
            DpxDecodeErrors::TruncatedHeader {
                field,
                offset,
                expected,
                found
            } => {
                writeln!(
                    f,
                    "Truncated header reading {field} at offset {offset}, expected {expected} bytes but found {found}"
                )
            }
            DpxDecodeErrors::SeekError { offset, error } => {
                writeln!(f, "Could not seek to offset {offset}: {error:?}")
            }
            DpxDecodeErrors::ZeroDimensions { width, height } => {
                writeln!(f, "Zero image dimensions: width {width} x height {height}")
            }
            DpxDecodeErrors::DimensionsTooLarge {
                width,
                height,
                max_width,
                max_height
            } => {
                writeln!(
                    f,
                    "Image dimensions too large: width {width} x height {height}, limits are {max_width} x {max_height}"
                )
            }
            DpxDecodeErrors::DimensionOverflow { width, height } => {
                writeln!(
                    f,
                    "Image dimensions width {width} x height {height} overflow buffer size calculations"
                )
            }
            DpxDecodeErrors::InvalidDataOffset { offset, minimum } => {
                writeln!(
                    f,
                    "Offset to image data {offset} lies inside the header, expected at least {minimum}"
                )
            }
            DpxDecodeErrors::UnsupportedElement {
                field,
                expected,
                found
            } => {
                writeln!(
                    f,
                    "Unsupported image element {field} {found}, only {expected} is supported"
                )
            }
            DpxDecodeErrors::PrematureEof {
                row,
                expected,
                found
            } => {
                writeln!(
                    f,
                    "Premature end of pixel data at row {row}, expected {expected} bytes but found {found}"
                )
            }
            DpxDecodeErrors::OutOfMemory(size) => {
                writeln!(f, "Could not allocate {size} bytes")
            }
            DpxDecodeErrors::IoError(err) => {
                writeln!(f, "I/O error {:?}", err)
            }
        }
    }
}

impl Display for DpxDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DpxDecodeErrors {}

impl From<ZByteIoError> for DpxDecodeErrors {
    fn from(value: ZByteIoError) -> Self {
        DpxDecodeErrors::IoError(value)
    }
}
