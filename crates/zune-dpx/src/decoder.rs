/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bit_depth::BitDepth;
use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::colorspace::ColorSpace;
use zune_core::log::trace;
use zune_core::options::DecoderOptions;

use crate::constants::{
    DPX_BIT_DEPTH, DPX_COLORSPACE, DPX_COMPONENTS, DPX_MAX_DIMENSION, DPX_SAMPLE_SIZE
};
use crate::errors::DpxDecodeErrors;
use crate::header::{read_header, ImageGeometry};
use crate::raster::Raster;
use crate::utils::{read_full, seek_to, try_alloc, try_alloc_zeroed};

/// A DPX decoder
///
/// The decoder is initialized by calling `new`
/// and either of [`decode_headers`] to read image geometry
/// or [`decode`] to return a decoded [`Raster`]
///
/// The decoder reads from the source it is given but never closes it, pass
/// `&mut reader` to keep using a handle after decoding, or call [`into_inner`].
///
/// [`decode_headers`]:DpxDecoder::decode_headers
/// [`decode`]:DpxDecoder::decode
/// [`into_inner`]:DpxDecoder::into_inner
pub struct DpxDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:   ZReader<T>,
    options:  DecoderOptions,
    geometry: Option<ImageGeometry>
}

impl<T> DpxDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new decoder with default options
    ///
    /// Width and height are limited to [`DPX_MAX_DIMENSION`] and the
    /// header is parsed leniently.
    ///
    /// # Arguments
    /// - `data`: The DPX source, positioned at the start of the file
    ///
    /// # Example
    /// ```no_run
    /// use zune_core::bytestream::ZCursor;
    /// let mut decoder = zune_dpx::DpxDecoder::new(ZCursor::new(b""));
    /// ```
    pub fn new(data: T) -> DpxDecoder<T> {
        let options = DecoderOptions::default()
            .set_max_width(DPX_MAX_DIMENSION)
            .set_max_height(DPX_MAX_DIMENSION)
            .set_strict_mode(false);

        DpxDecoder::new_with_options(data, options)
    }

    /// Create a new decoder that obeys the given options
    ///
    /// The decoder respects `max_width`, `max_height` and `strict_mode`,
    /// in strict mode the image element is checked and a missing data
    /// offset is an error.
    ///
    /// # Example
    /// ```
    /// use zune_core::bytestream::ZCursor;
    /// use zune_core::options::DecoderOptions;
    /// use zune_dpx::DpxDecoder;
    /// // only decode images less than 1024 in both width and height
    /// let options = DecoderOptions::default()
    ///     .set_max_width(1024)
    ///     .set_max_height(1024);
    ///
    /// let decoder = DpxDecoder::new_with_options(ZCursor::new(b""), options);
    /// ```
    pub fn new_with_options(data: T, options: DecoderOptions) -> DpxDecoder<T> {
        DpxDecoder {
            stream: ZReader::new(data),
            options,
            geometry: None
        }
    }

    /// Decode the header storing image geometry in the decoder
    ///
    /// Calling this more than once is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), DpxDecodeErrors> {
        self.read_geometry()?;
        Ok(())
    }

    fn read_geometry(&mut self) -> Result<ImageGeometry, DpxDecodeErrors> {
        if let Some(geometry) = self.geometry {
            return Ok(geometry);
        }
        let geometry = read_header(&mut self.stream, &self.options)?;
        self.geometry = Some(geometry);

        Ok(geometry)
    }

    /// Geometry parsed from the header or `None` if headers
    /// haven't been decoded
    pub const fn geometry(&self) -> Option<ImageGeometry> {
        self.geometry
    }

    /// Get image dimensions as a tuple of width and height
    /// or `None` if the headers haven't been decoded.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.geometry.map(|g| (g.width() as usize, g.height() as usize))
    }

    /// Returns the image colorspace
    ///
    /// This is always RGBA
    pub const fn colorspace(&self) -> ColorSpace {
        DPX_COLORSPACE
    }

    /// Returns the image bit depth
    ///
    /// This is always 16
    pub const fn depth(&self) -> BitDepth {
        DPX_BIT_DEPTH
    }

    /// Number of u16 samples a decoded image holds or `None`
    /// if headers haven't been decoded
    pub fn output_buffer_size(&self) -> Option<usize> {
        self.geometry.map(|g| g.sample_count())
    }

    /// Return the options this decoder uses
    pub const fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decode the whole image
    ///
    /// Headers are decoded first if that hasn't happened yet.
    ///
    /// # Returns
    /// - `Ok(Raster)`: The fully decoded image
    /// - `Err(DpxDecodeErrors)`: The error that stopped decoding, no
    ///   partially decoded image is returned
    pub fn decode(&mut self) -> Result<Raster, DpxDecodeErrors> {
        let geometry = self.read_geometry()?;

        decode_raster(&mut self.stream, &geometry)
    }

    /// Destroy the decoder returning the source it was reading from
    pub fn into_inner(self) -> T {
        self.stream.consume()
    }
}

/// Decode the pixel rows described by `geometry`
///
/// The stream is positioned at [`ImageGeometry::data_offset`] and read sequentially,
/// one scanline at a time. A single scanline buffer is reused for all rows.
///
/// Memory for the whole raster is reserved up front but only filled as rows
/// arrive, so a header promising more data than the stream holds fails at
/// the first missing row without touching the rest of the reservation.
///
/// # Errors
/// - [`SeekError`](DpxDecodeErrors::SeekError) if the data offset can't be reached
/// - [`PrematureEof`](DpxDecodeErrors::PrematureEof) if the stream ends before the last row
/// - [`OutOfMemory`](DpxDecodeErrors::OutOfMemory) if buffers can't be allocated
/// - [`IoError`](DpxDecodeErrors::IoError) for any failure of the reader itself
pub fn decode_raster<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, geometry: &ImageGeometry
) -> Result<Raster, DpxDecodeErrors> {
    let row_size = geometry.row_size();
    let row_samples = row_size / DPX_SAMPLE_SIZE;

    let mut pixels = try_alloc::<u16>(geometry.sample_count())?;
    let mut scanline = try_alloc_zeroed::<u8>(row_size)?;
    let mut out_scanline = try_alloc_zeroed::<u16>(row_samples)?;

    seek_to(stream, geometry.data_offset())?;

    trace!("Decoding {} rows of {} bytes", geometry.height(), row_size);

    for row in 0..geometry.height() as usize {
        let found = read_full(stream, &mut scanline)?;

        if found != row_size {
            return Err(DpxDecodeErrors::PrematureEof {
                row,
                expected: row_size,
                found
            });
        }
        convert_scanline(&scanline, &mut out_scanline);
        pixels.extend_from_slice(&out_scanline);
    }

    Ok(Raster::new(
        geometry.width() as usize,
        geometry.height() as usize,
        pixels
    ))
}

/// Convert big endian samples into native endian samples
fn convert_scanline(in_scanline: &[u8], out_scanline: &mut [u16]) {
    debug_assert_eq!(in_scanline.len(), out_scanline.len() * DPX_SAMPLE_SIZE);
    debug_assert_eq!(out_scanline.len() % DPX_COMPONENTS, 0);

    for (sample, out) in in_scanline.chunks_exact(2).zip(out_scanline.iter_mut()) {
        *out = u16::from_be_bytes([sample[0], sample[1]]);
    }
}

#[cfg(test)]
mod tests {
    use super::convert_scanline;

    #[test]
    fn scanline_is_byte_swapped() {
        let input = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0xFF, 0xFF];
        let mut output = [0_u16; 4];

        convert_scanline(&input, &mut output);

        assert_eq!(output, [256, 512, 768, 65535]);
    }
}
