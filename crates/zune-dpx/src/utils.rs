/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use zune_core::bytestream::{ZByteIoError, ZByteReaderTrait, ZReader, ZSeekFrom};

use crate::errors::DpxDecodeErrors;

/// Read until `buf` is full or the stream runs dry, returning
/// how many bytes were read.
///
/// A short count means end of data, errors from the reader are passed through
/// untouched so that they are not confused with truncation. Interrupted
/// reads are retried.
pub(crate) fn read_full<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, buf: &mut [u8]
) -> Result<usize, ZByteIoError> {
    let mut filled = 0;

    while filled < buf.len() {
        let read = match stream.read_bytes(&mut buf[filled..]) {
            Ok(read) => read,
            #[cfg(feature = "std")]
            Err(ZByteIoError::StdIoError(e)) if e.kind() == std::io::ErrorKind::Interrupted => {
                continue;
            }
            Err(e) => return Err(e)
        };
        if read == 0 {
            break;
        }
        filled += read;
    }
    Ok(filled)
}

/// Read a fixed size header field located at `offset`
///
/// The stream is expected to already be at `offset`, it is only used
/// for error reporting.
pub(crate) fn read_field<T: ZByteReaderTrait, const N: usize>(
    stream: &mut ZReader<T>, field: &'static str, offset: u64
) -> Result<[u8; N], DpxDecodeErrors> {
    let mut bytes = [0; N];
    let found = read_full(stream, &mut bytes)?;

    if found != N {
        return Err(DpxDecodeErrors::TruncatedHeader {
            field,
            offset,
            expected: N,
            found
        });
    }
    Ok(bytes)
}

pub(crate) fn read_u32_be_field<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, field: &'static str, offset: u64
) -> Result<u32, DpxDecodeErrors> {
    read_field::<T, 4>(stream, field, offset).map(u32::from_be_bytes)
}

pub(crate) fn read_u16_be_field<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, field: &'static str, offset: u64
) -> Result<u16, DpxDecodeErrors> {
    read_field::<T, 2>(stream, field, offset).map(u16::from_be_bytes)
}

pub(crate) fn seek_to<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, offset: u64
) -> Result<(), DpxDecodeErrors> {
    stream
        .seek(ZSeekFrom::Start(offset))
        .map_err(|error| DpxDecodeErrors::SeekError { offset, error })?;
    Ok(())
}

/// Allocate an empty vector with room for exactly `len` elements, reporting
/// allocation failure instead of aborting.
pub(crate) fn try_alloc<V>(len: usize) -> Result<Vec<V>, DpxDecodeErrors> {
    let mut buffer = Vec::new();

    buffer
        .try_reserve_exact(len)
        .map_err(|_| DpxDecodeErrors::OutOfMemory(len.saturating_mul(core::mem::size_of::<V>())))?;

    Ok(buffer)
}

/// Allocate a zeroed vector of `len` elements
pub(crate) fn try_alloc_zeroed<V: Copy + Default>(len: usize) -> Result<Vec<V>, DpxDecodeErrors> {
    let mut buffer = try_alloc(len)?;
    buffer.resize(len, V::default());

    Ok(buffer)
}
