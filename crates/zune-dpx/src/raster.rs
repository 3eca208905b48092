/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

use crate::constants::{DPX_BIT_DEPTH, DPX_COLORSPACE, DPX_COMPONENTS};

/// A fully decoded DPX image
///
/// Pixels are stored row-major as interleaved R,G,B,A 16 bit samples in
/// native endian, non-linear (as stored in the file, no transfer
/// function is applied).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width:  usize,
    height: usize,
    pixels: Vec<u16>
}

impl Raster {
    pub(crate) fn new(width: usize, height: usize, pixels: Vec<u16>) -> Raster {
        debug_assert_eq!(pixels.len(), width * height * DPX_COMPONENTS);
        Raster {
            width,
            height,
            pixels
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Width and height as a tuple
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Always [`ColorSpace::RGBA`]
    pub const fn colorspace(&self) -> ColorSpace {
        DPX_COLORSPACE
    }

    /// Always [`BitDepth::Sixteen`]
    pub const fn depth(&self) -> BitDepth {
        DPX_BIT_DEPTH
    }

    /// All samples, `width*height*4` long
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Consume the raster returning the samples
    pub fn into_pixels(self) -> Vec<u16> {
        self.pixels
    }

    /// Samples of row `y` or `None` if `y` is out of bounds
    pub fn row(&self, y: usize) -> Option<&[u16]> {
        let stride = self.width * DPX_COMPONENTS;
        self.pixels.chunks_exact(stride).nth(y)
    }

    /// The `[R,G,B,A]` pixel at `(x,y)` or `None` if out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u16; 4]> {
        if x >= self.width {
            return None;
        }
        let start = x * DPX_COMPONENTS;
        let row = self.row(y)?;

        let mut pixel = [0; 4];
        pixel.copy_from_slice(&row[start..start + DPX_COMPONENTS]);
        Some(pixel)
    }
}
