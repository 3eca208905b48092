/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! DPX header parsing
//!
//! Only the fields needed to find and size the pixel data are read,
//! the film, television and user headers are skipped over.

use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::log::{trace, warn};
use zune_core::options::DecoderOptions;

use crate::constants::{
    DESCRIPTOR_RGBA, DPX_COMPONENTS, DPX_FALLBACK_DATA_OFFSET, DPX_MAGIC, DPX_SAMPLE_SIZE,
    DPX_UNDEFINED_U32, IMAGE_ELEMENT_END, OFFSET_DATA_OFFSET, OFFSET_HEIGHT, OFFSET_IMAGE_ELEMENT,
    OFFSET_NUM_ELEMENTS, OFFSET_WIDTH
};
use crate::errors::DpxDecodeErrors;
use crate::utils::{read_field, read_u16_be_field, read_u32_be_field, seek_to};

/// Image dimensions and pixel data location parsed from a DPX header
///
/// Construction validates the dimensions against the decoder limits and
/// pre-computes buffer sizes, so a geometry value can always be
/// allocated for without further overflow checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageGeometry {
    width:        u32,
    height:       u32,
    data_offset:  u64,
    row_size:     usize,
    sample_count: usize
}

impl ImageGeometry {
    /// Validate dimensions and create a new geometry
    ///
    /// # Errors
    /// - [`ZeroDimensions`](DpxDecodeErrors::ZeroDimensions): width or height is zero
    /// - [`DimensionsTooLarge`](DpxDecodeErrors::DimensionsTooLarge): a dimension is above
    ///   the limits in `options`
    /// - [`DimensionOverflow`](DpxDecodeErrors::DimensionOverflow): the row size or the whole
    ///   image size in bytes does not fit a `usize`
    pub fn new(
        width: u32, height: u32, data_offset: u64, options: &DecoderOptions
    ) -> Result<ImageGeometry, DpxDecodeErrors> {
        if width == 0 || height == 0 {
            return Err(DpxDecodeErrors::ZeroDimensions { width, height });
        }
        let overflow = || DpxDecodeErrors::DimensionOverflow { width, height };

        let w = usize::try_from(width).map_err(|_| overflow())?;
        let h = usize::try_from(height).map_err(|_| overflow())?;

        if w > options.max_width() || h > options.max_height() {
            return Err(DpxDecodeErrors::DimensionsTooLarge {
                width,
                height,
                max_width: options.max_width(),
                max_height: options.max_height()
            });
        }

        let row_size = w
            .checked_mul(DPX_COMPONENTS)
            .and_then(|x| x.checked_mul(DPX_SAMPLE_SIZE))
            .ok_or_else(overflow)?;

        let sample_count = w
            .checked_mul(h)
            .and_then(|x| x.checked_mul(DPX_COMPONENTS))
            .ok_or_else(overflow)?;

        // the output is u16, make sure its size in bytes is representable too
        sample_count
            .checked_mul(DPX_SAMPLE_SIZE)
            .ok_or_else(overflow)?;

        Ok(ImageGeometry {
            width,
            height,
            data_offset,
            row_size,
            sample_count
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Absolute position of the first pixel row in the stream
    pub const fn data_offset(&self) -> u64 {
        self.data_offset
    }

    /// Bytes occupied by a single scanline in the file
    pub const fn row_size(&self) -> usize {
        self.row_size
    }

    /// Number of u16 samples in the decoded image, `width*height*4`
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }
}

/// Read and validate a DPX header
///
/// The stream must be positioned at the start of the file. On success it is
/// left somewhere inside the header, use [`ImageGeometry::data_offset`] to
/// find the pixels.
///
/// When magic bytes do not match, nothing beyond the first four bytes
/// is consumed.
///
/// # Example
/// ```
/// use zune_dpx::zune_core::bytestream::{ZCursor, ZReader};
/// use zune_dpx::zune_core::options::DecoderOptions;
/// use zune_dpx::{read_header, DpxDecodeErrors};
///
/// let mut stream = ZReader::new(ZCursor::new(b"XPDS"));
/// let result = read_header(&mut stream, &DecoderOptions::default());
///
/// assert!(matches!(result, Err(DpxDecodeErrors::BadMagic(_))));
/// ```
pub fn read_header<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, options: &DecoderOptions
) -> Result<ImageGeometry, DpxDecodeErrors> {
    let magic = read_field::<T, 4>(stream, "magic", 0)?;

    if magic != DPX_MAGIC {
        return Err(DpxDecodeErrors::BadMagic(magic));
    }
    let raw_offset = read_u32_be_field(stream, "offset to image data", OFFSET_DATA_OFFSET)?;

    if options.strict_mode() {
        seek_to(stream, OFFSET_NUM_ELEMENTS)?;
        let elements =
            read_u16_be_field(stream, "number of image elements", OFFSET_NUM_ELEMENTS)?;

        if elements != 1 {
            return Err(DpxDecodeErrors::UnsupportedElement {
                field:    "number of image elements",
                expected: 1,
                found:    u32::from(elements)
            });
        }
    } else {
        seek_to(stream, OFFSET_WIDTH)?;
    }

    let width = read_u32_be_field(stream, "pixels per line", OFFSET_WIDTH)?;
    let height = read_u32_be_field(stream, "lines per element", OFFSET_HEIGHT)?;

    trace!("Image width: {}", width);
    trace!("Image height: {}", height);

    let data_offset = resolve_data_offset(raw_offset, options)?;
    let geometry = ImageGeometry::new(width, height, data_offset, options)?;

    if options.strict_mode() {
        check_image_element(stream)?;
    }

    trace!("Offset to image data: {}", data_offset);

    Ok(geometry)
}

/// Turn the raw offset-to-image-data field into an absolute stream position
fn resolve_data_offset(raw_offset: u32, options: &DecoderOptions) -> Result<u64, DpxDecodeErrors> {
    let offset = u64::from(raw_offset);

    if options.strict_mode() {
        if raw_offset == DPX_UNDEFINED_U32 || offset < IMAGE_ELEMENT_END {
            return Err(DpxDecodeErrors::InvalidDataOffset {
                offset:  raw_offset,
                minimum: IMAGE_ELEMENT_END
            });
        }
        return Ok(offset);
    }

    if raw_offset == 0 || raw_offset == DPX_UNDEFINED_U32 {
        trace!("No offset to image data, assuming pixels follow the image dimensions");
        return Ok(DPX_FALLBACK_DATA_OFFSET);
    }
    if offset < DPX_FALLBACK_DATA_OFFSET {
        warn!(
            "Offset to image data {} points inside the header, using {} instead",
            raw_offset,
            DPX_FALLBACK_DATA_OFFSET
        );
        return Ok(DPX_FALLBACK_DATA_OFFSET);
    }
    Ok(offset)
}

/// Confirm the first image element holds data laid out the way
/// the decoder reads it.
fn check_image_element<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>
) -> Result<(), DpxDecodeErrors> {
    seek_to(stream, OFFSET_IMAGE_ELEMENT)?;

    let element = read_field::<T, 8>(stream, "image element", OFFSET_IMAGE_ELEMENT)?;

    let descriptor = u32::from(element[0]);
    let bit_size = u32::from(element[3]);
    let packing = u32::from(u16::from_be_bytes([element[4], element[5]]));
    let encoding = u32::from(u16::from_be_bytes([element[6], element[7]]));

    if descriptor != DESCRIPTOR_RGBA {
        return Err(DpxDecodeErrors::UnsupportedElement {
            field:    "descriptor",
            expected: DESCRIPTOR_RGBA,
            found:    descriptor
        });
    }
    if bit_size != 16 {
        return Err(DpxDecodeErrors::UnsupportedElement {
            field:    "bit size",
            expected: 16,
            found:    bit_size
        });
    }
    // packed and filled are the same thing for 16 bit samples
    if packing > 1 {
        return Err(DpxDecodeErrors::UnsupportedElement {
            field:    "packing",
            expected: 0,
            found:    packing
        });
    }
    if encoding != 0 {
        return Err(DpxDecodeErrors::UnsupportedElement {
            field:    "encoding",
            expected: 0,
            found:    encoding
        });
    }
    Ok(())
}
