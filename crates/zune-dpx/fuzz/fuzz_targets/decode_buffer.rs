#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use zune_dpx::zune_core::bytestream::ZCursor;
    use zune_dpx::zune_core::options::DecoderOptions;
    use zune_dpx::DpxDecoder;

    // the raster is reserved before pixels are read, stay below libfuzzer's malloc limit
    let options = DecoderOptions::default()
        .set_max_width(1 << 12)
        .set_max_height(1 << 12)
        .set_strict_mode(data.len() % 2 == 0);

    let mut decoder = DpxDecoder::new_with_options(ZCursor::new(data), options);
    let _ = decoder.decode();
});
