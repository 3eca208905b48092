/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A Digital Picture Exchange (DPX) decoder
//!
//! DPX is the still-image format of film scanning and grading pipelines. Files start with
//! a large fixed-layout generic header followed by uncompressed pixel rows.
//!
//! This crate decodes the big-endian (`SDPX`) flavour of 16 bit RGBA images, the pixel data
//! layout is
//! ```text
//! ╔════════╤═════════════════════════════════════════════════════════╗
//! ║ Offset │ Description                                             ║
//! ╠════════╪═════════════════════════════════════════════════════════╣
//! ║ 0      │ "SDPX" magic value                                      ║
//! ╟────────┼─────────────────────────────────────────────────────────╢
//! ║ 4      │ 32-Bit BE unsigned integer (offset to image data)       ║
//! ╟────────┼─────────────────────────────────────────────────────────╢
//! ║ 772    │ 32-Bit BE unsigned integer (pixels per line)            ║
//! ╟────────┼─────────────────────────────────────────────────────────╢
//! ║ 776    │ 32-Bit BE unsigned integer (lines per image element)    ║
//! ╟────────┼─────────────────────────────────────────────────────────╢
//! ║ data   │ 4x16-Bit BE unsigned integers [RGBA] / pixel, row-major ║
//! ╚════════╧═════════════════════════════════════════════════════════╝
//!```
//!
//! If the data offset field is zero or undefined, pixel rows are assumed to start
//! right after the height field, at byte 780.
//!
//! # Features
//! - `std`: Decode from anything implementing `BufRead + Seek`, e.g. a `BufReader<File>`.
//! - `log`: Emit `trace` and `warn` records through the `log` crate.
//!
//! Without `std` the crate is `no_std` with `alloc` and decodes from
//! [`ZCursor`](zune_core::bytestream::ZCursor).
//!
//! # Example
//! ```no_run
//! use std::io::BufReader;
//! use zune_dpx::DpxDecoder;
//!
//! let mut file = BufReader::new(std::fs::File::open("frame.dpx").unwrap());
//! // the decoder borrows the handle, we still own it afterwards
//! let raster = DpxDecoder::new(&mut file).decode().unwrap();
//!
//! assert_eq!(raster.pixels().len(), raster.width() * raster.height() * 4);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![macro_use]
extern crate alloc;
extern crate core;

pub use constants::{DPX_FALLBACK_DATA_OFFSET, DPX_MAX_DIMENSION};
pub use decoder::*;
pub use errors::DpxDecodeErrors;
pub use header::{read_header, ImageGeometry};
pub use raster::Raster;
pub use zune_core;

mod constants;
mod decoder;
mod errors;
mod header;
mod raster;
mod utils;
