//! Integration coverage for `PanicCapture`'s driver loop (spec.md §4.5):
//! multi-symbol captures over a log too large for a single symbol, and
//! agreement between the blitted framebuffer and the core's own bitmap.

use std::time::Duration;

use panicqr_core::tables::Version;
use panicqr_host::collaborators::{InMemoryFrameBuffer, SliceLogSource};
use panicqr_host::driver::Pacer;
use panicqr_host::{HostConfig, PanicCapture};

struct InstantPacer;
impl Pacer for InstantPacer {
    fn pace(&mut self, _delay: Duration) {}
}

#[test]
fn a_log_larger_than_one_symbol_emits_several_symbols() {
    let version = Version::new(1).unwrap();
    let config = HostConfig {
        version,
        ..HostConfig::default()
    };
    // V1-L holds 17 data bytes; well-compressible repetition still needs
    // several symbols to carry 4000 bytes of log.
    let log: Vec<u8> = (0..4000u32).map(|i| b"0123456789"[(i % 10) as usize]).collect();
    let width = u32::from(version.width());
    let fb = InMemoryFrameBuffer::new(width * config.module_size, width * config.module_size);
    let source = SliceLogSource::new(&log);
    let mut capture = PanicCapture::new(source, fb, InstantPacer, config);

    let symbols = capture.capture().unwrap();
    assert!(symbols > 1, "expected more than one symbol, got {symbols}");
}

#[test]
fn blitted_finder_corner_matches_a_dark_module() {
    let version = Version::new(5).unwrap();
    let config = HostConfig {
        version,
        module_size: 1,
        ..HostConfig::default()
    };
    let width = u32::from(version.width());
    let fb = InMemoryFrameBuffer::new(width, width);
    let source = SliceLogSource::new(b"panic: oops\n");
    let mut capture = PanicCapture::new(source, fb, InstantPacer, config);
    capture.capture().unwrap();

    // The top-left finder pattern's outer ring starts dark at (0,0)
    // regardless of payload, per the fixed QR Model 2 layout.
    let fb = capture.into_framebuffer();
    assert!(fb.is_dark(0, 0));
    assert!(fb.is_dark(6, 6));
}

#[test]
fn capture_is_deterministic_across_runs() {
    let version = Version::new(3).unwrap();
    let log = b"deterministic payload for driver replay\n".repeat(4);
    let width = u32::from(version.width());

    let run = |log: &[u8]| {
        let config = HostConfig {
            version,
            ..HostConfig::default()
        };
        let fb = InMemoryFrameBuffer::new(width * config.module_size, width * config.module_size);
        let source = SliceLogSource::new(log);
        let mut capture = PanicCapture::new(source, fb, InstantPacer, config);
        capture.capture().unwrap()
    };

    assert_eq!(run(&log), run(&log));
}

#[test]
fn rejects_invalid_compression_level_before_touching_the_framebuffer() {
    let config = HostConfig {
        compression_level: 22,
        ..HostConfig::default()
    };
    let width = u32::from(config.version.width());
    let fb = InMemoryFrameBuffer::new(width * config.module_size, width * config.module_size);
    let source = SliceLogSource::new(b"unreachable payload");
    let mut capture = PanicCapture::new(source, fb, InstantPacer, config);
    assert!(capture.capture().is_err());
}
