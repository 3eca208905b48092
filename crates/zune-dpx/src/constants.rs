/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Offsets and magic values of the DPX generic and image headers

use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

/// Big endian file magic, the little endian `XPDS` variant is not supported
pub(crate) const DPX_MAGIC: [u8; 4] = *b"SDPX";

pub(crate) const DPX_COLORSPACE: ColorSpace = ColorSpace::RGBA;
pub(crate) const DPX_BIT_DEPTH: BitDepth = BitDepth::Sixteen;

/// Samples stored per pixel, R,G,B,A
pub(crate) const DPX_COMPONENTS: usize = 4;
/// Bytes used by a single sample
pub(crate) const DPX_SAMPLE_SIZE: usize = 2;

/// Default ceiling for width and height
pub const DPX_MAX_DIMENSION: usize = 65535;

/// Where pixel data is assumed to start when the header's
/// data offset field is missing, right after the height field.
pub const DPX_FALLBACK_DATA_OFFSET: u64 = 780;

/// Value used by DPX writers to mark a 32 bit field as undefined
pub(crate) const DPX_UNDEFINED_U32: u32 = u32::MAX;

// generic header
pub(crate) const OFFSET_DATA_OFFSET: u64 = 4;

// image header
pub(crate) const OFFSET_NUM_ELEMENTS: u64 = 770;
pub(crate) const OFFSET_WIDTH: u64 = 772;
pub(crate) const OFFSET_HEIGHT: u64 = 776;

// first image element, descriptor through encoding
pub(crate) const OFFSET_IMAGE_ELEMENT: u64 = 800;
pub(crate) const IMAGE_ELEMENT_END: u64 = 808;

/// Image element descriptor for interleaved R,G,B,A
pub(crate) const DESCRIPTOR_RGBA: u32 = 51;
