//! End-to-end scan round trip (spec.md §8, "Scan round trip"): render a
//! symbol with `qr_generate`, rasterize it with a quiet zone, feed the
//! pixels to a standards-compliant QR decoder, and assert the decoded
//! bytes match the original byte segment.

use image::{GrayImage, Luma};
use panicqr_core::tables::Version;

const MODULE_PX: u32 = 4;
const QUIET_ZONE_MODULES: u32 = 4;

fn render_with_quiet_zone(bitmap: &[u8], width: u8) -> GrayImage {
    let stride = usize::from((width + 7) / 8);
    let w = u32::from(width);
    let side_px = (w + QUIET_ZONE_MODULES * 2) * MODULE_PX;
    let mut image = GrayImage::new(side_px, side_px);
    for pixel in image.pixels_mut() {
        *pixel = Luma([255]);
    }
    for y in 0..w {
        for x in 0..w {
            let off = (y as usize) * stride + (x as usize) / 8;
            let dark = bitmap[off] & (1 << (7 - (x % 8))) != 0;
            if !dark {
                continue;
            }
            let px0 = (x + QUIET_ZONE_MODULES) * MODULE_PX;
            let py0 = (y + QUIET_ZONE_MODULES) * MODULE_PX;
            for dy in 0..MODULE_PX {
                for dx in 0..MODULE_PX {
                    image.put_pixel(px0 + dx, py0 + dy, Luma([0]));
                }
            }
        }
    }
    image
}

fn decode(image: GrayImage) -> Vec<u8> {
    let mut prepared = rqrr::PreparedImage::prepare(image);
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR symbol in frame");
    let (_meta, content) = grids[0].decode().expect("decode should succeed");
    content.into_bytes()
}

#[test]
fn minimum_symbol_scans_back_to_the_original_bytes() {
    let mut data = [0u8; 64];
    data[..6].copy_from_slice(b"HELLO\n");
    let mut tmp = [0u8; 64];
    let width = panicqr_core::qr_generate(None, &mut data, 6, 1, &mut tmp).unwrap();
    assert_eq!(width, 21);

    let image = render_with_quiet_zone(&data, width);
    let decoded = decode(image);
    assert_eq!(decoded, b"HELLO\n");
}

#[test]
fn version_sweep_round_trips_every_version() {
    for v in Version::MIN..=Version::MAX {
        let version = Version::new(v).unwrap();
        let cap = panicqr_core::qr_max_data_size(v, 0);
        let width_px = usize::from(version.width());
        let stride = (width_px + 7) / 8;
        let mut data = vec![0u8; stride * width_px];
        let payload = vec![0x41u8; cap];
        data[..cap].copy_from_slice(&payload);
        let mut tmp = vec![0u8; version.buffer_len()];

        let width = panicqr_core::qr_generate(None, &mut data, cap, v, &mut tmp).unwrap();
        assert_eq!(width, v * 4 + 17);

        let image = render_with_quiet_zone(&data, width);
        let decoded = decode(image);
        assert_eq!(decoded, payload, "version {v} round trip mismatch");
    }
}

#[test]
fn url_plus_numeric_segment_decodes_with_the_url_prefix_intact() {
    // spec.md §6: with a url, segments are [byte(url), numeric(data)]; a
    // standards-compliant reader recovers the url's bytes verbatim from
    // the byte segment, followed by the numeric segment's decimal digits.
    let url = b"https://example.com/k?d=";
    let payload = [0xABu8; 16];
    let version = 8u8;
    let v = Version::new(version).unwrap();
    let width_px = usize::from(v.width());
    let stride = (width_px + 7) / 8;
    let mut data = vec![0u8; stride * width_px];
    data[..payload.len()].copy_from_slice(&payload);
    let mut tmp = vec![0u8; v.buffer_len()];

    let width =
        panicqr_core::qr_generate(Some(url), &mut data, payload.len(), version, &mut tmp).unwrap();
    assert_eq!(width, version * 4 + 17);

    let image = render_with_quiet_zone(&data, width);
    let decoded = decode(image);
    assert!(decoded.starts_with(url), "expected url prefix in decoded content");
    // Everything after the url is the numeric segment's decimal digits.
    let digits = &decoded[url.len()..];
    assert!(digits.iter().all(|b| b.is_ascii_digit()));
}

#[test]
fn empty_input_decodes_to_empty_string() {
    let version = Version::new(5).unwrap();
    let width_px = usize::from(version.width());
    let stride = (width_px + 7) / 8;
    let mut data = vec![0u8; stride * width_px];
    let mut tmp = vec![0u8; version.buffer_len()];

    let width = panicqr_core::qr_generate(None, &mut data, 0, 5, &mut tmp).unwrap();
    assert_eq!(width, 37);

    let image = render_with_quiet_zone(&data, width);
    let decoded = decode(image);
    assert!(decoded.is_empty());
}
