/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Helpers to build DPX files in memory
#![allow(dead_code)]

use std::io::{self, Cursor, Read, Seek, SeekFrom};

/// Bytes up to and including the height field
pub const DIMENSIONS_END: usize = 780;

/// Build a DPX file with pixels placed right after the height field and
/// the data offset field left as zero.
pub fn minimal_dpx(width: u32, height: u32, samples: &[u16]) -> Vec<u8> {
    let mut data = header(width, height, 0);
    push_samples(&mut data, samples);
    data
}

/// Build a DPX file whose pixels start at `data_offset`, the gap between the
/// header fields and pixel data is filled with `filler`
pub fn dpx_with_offset(
    width: u32, height: u32, data_offset: u32, filler: u8, samples: &[u16]
) -> Vec<u8> {
    let mut data = header(width, height, data_offset);
    data.resize(data_offset as usize, filler);
    push_samples(&mut data, samples);
    data
}

pub fn header(width: u32, height: u32, data_offset: u32) -> Vec<u8> {
    let mut data = vec![0_u8; DIMENSIONS_END];

    data[0..4].copy_from_slice(b"SDPX");
    data[4..8].copy_from_slice(&data_offset.to_be_bytes());
    data[772..776].copy_from_slice(&width.to_be_bytes());
    data[776..780].copy_from_slice(&height.to_be_bytes());
    data
}

/// Append native samples to `data` as big endian
pub fn push_samples(data: &mut Vec<u8>, samples: &[u16]) {
    for sample in samples {
        data.extend_from_slice(&sample.to_be_bytes());
    }
}

/// Deterministic pseudo random samples for a `width x height` RGBA image
pub fn sample_pattern(width: usize, height: usize, seed: u32) -> Vec<u16> {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);

    (0..width * height * 4)
        .map(|_| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 16) as u16
        })
        .collect()
}

/// A reader that hands out at most `chunk` bytes per read call
pub struct Trickle {
    inner: Cursor<Vec<u8>>,
    chunk: usize
}

impl Trickle {
    pub fn new(data: Vec<u8>, chunk: usize) -> Trickle {
        Trickle {
            inner: Cursor::new(data),
            chunk
        }
    }
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(self.chunk);
        self.inner.read(&mut buf[..len])
    }
}

impl Seek for Trickle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// A reader whose seeks always fail
pub struct Unseekable {
    inner: Cursor<Vec<u8>>
}

impl Unseekable {
    pub fn new(data: Vec<u8>) -> Unseekable {
        Unseekable {
            inner: Cursor::new(data)
        }
    }
}

impl Read for Unseekable {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for Unseekable {
    fn seek(&mut self, _: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "stream does not support seeking"
        ))
    }
}

/// A reader that fails with an I/O error once `limit` bytes were handed out
pub struct FailAfter {
    inner:     Cursor<Vec<u8>>,
    remaining: usize
}

impl FailAfter {
    pub fn new(data: Vec<u8>, limit: usize) -> FailAfter {
        FailAfter {
            inner:     Cursor::new(data),
            remaining: limit
        }
    }
}

impl Read for FailAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "device went away"));
        }
        let len = buf.len().min(self.remaining);
        let read = self.inner.read(&mut buf[..len])?;
        self.remaining -= read;
        Ok(read)
    }
}

impl Seek for FailAfter {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let position = self.inner.seek(pos)?;
        Ok(position)
    }
}

/// A reader where every other read call is interrupted before any data is
/// transferred
pub struct Interrupting {
    inner:       Cursor<Vec<u8>>,
    interrupted: bool
}

impl Interrupting {
    pub fn new(data: Vec<u8>) -> Interrupting {
        Interrupting {
            inner:       Cursor::new(data),
            interrupted: false
        }
    }
}

impl Read for Interrupting {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupted = !self.interrupted;

        if self.interrupted {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
        }
        self.inner.read(buf)
    }
}

impl Seek for Interrupting {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}
