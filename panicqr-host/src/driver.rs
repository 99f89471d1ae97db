//! The fitter driver loop of spec.md §4.5: drains a log source, fits
//! and renders successive QR symbols, blits them to a framebuffer, and
//! paces itself between frames.

use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use panicqr_core::fitter::{fit_payload, FitError};
use panicqr_core::tables::Version;

use crate::collaborators::{FrameBuffer, LogSource};
use crate::compress::ZstdCompressor;
use crate::config::HostConfig;
use crate::error::HostError;

/// How the driver waits between frames. Spec.md §5 notes this
/// scheduling choice belongs to the collaborator, not the core: a panic
/// notifier cannot trust OS-level sleep primitives, so it busy-waits,
/// while anything else can yield the scheduler.
pub trait Pacer {
    fn pace(&mut self, delay: Duration);
}

/// Spins on a monotonic clock; safe to use when other processors are
/// assumed quiescent, as in the panic-notifier context spec.md §5
/// describes.
pub struct BusyWaitPacer;

impl Pacer for BusyWaitPacer {
    fn pace(&mut self, delay: Duration) {
        let start = Instant::now();
        while start.elapsed() < delay {
            std::hint::spin_loop();
        }
    }
}

/// Yields the scheduler; only valid outside a panic context.
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pace(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// If a prefix fails to fit entirely, advance past this many bytes and
/// retry (spec.md §4.5, "Driver loop"). Bounds the loop so a single
/// pathological byte run can't stall it.
const SKIP_ON_FAILURE: usize = 1024;

/// Owns the collaborators spec.md §1 and §6 name as out of scope for the
/// core (log source, compressor, framebuffer) plus the pacing strategy,
/// and drives them through the capture loop described in spec.md §4.5.
pub struct PanicCapture<L, F, P> {
    log_source: L,
    framebuffer: F,
    pacer: P,
    config: HostConfig,
}

impl<L: LogSource, F: FrameBuffer, P: Pacer> PanicCapture<L, F, P> {
    pub fn new(log_source: L, framebuffer: F, pacer: P, config: HostConfig) -> Self {
        PanicCapture {
            log_source,
            framebuffer,
            pacer,
            config,
        }
    }

    /// Drains the log source and renders it as a sequence of QR
    /// symbols, one `fill_rect` call per dark module per symbol.
    /// Returns the number of symbols emitted.
    pub fn capture(&mut self) -> Result<usize, HostError> {
        self.config.validate()?;

        let mut log = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = self.log_source.next_chunk(&mut chunk);
            if n == 0 {
                break;
            }
            log.extend_from_slice(&chunk[..n]);
        }
        info!(
            "capture start: log buffer length={} target version={}",
            log.len(),
            self.config.version.value()
        );

        let version = self.config.version;
        let mut compressor = ZstdCompressor::new(self.config.compression_level);
        let mut tmp = vec![0u8; version.buffer_len()];
        let mut bitmap = vec![0u8; bitmap_len(version)];
        let mut frame = vec![0u8; version.data_capacity()];

        let mut pos = 0usize;
        let mut symbols = 0usize;
        while pos < log.len() {
            match fit_payload(&mut compressor, &log[pos..], version, &mut frame) {
                Ok(result) => {
                    debug!(
                        "symbol {symbols}: consumed={} frame_bytes={}",
                        result.consumed, result.frame_len
                    );
                    bitmap.fill(0);
                    // frame_len bytes of payload live at the start of
                    // `frame`; copy them into `bitmap` before encoding,
                    // since `qr_generate` treats its `data` argument as
                    // the input-then-output buffer (spec.md §9).
                    bitmap[..result.frame_len].copy_from_slice(&frame[..result.frame_len]);
                    let width = panicqr_core::qr_generate(
                        None,
                        &mut bitmap,
                        result.frame_len,
                        version.value(),
                        &mut tmp,
                    )
                    .map_err(HostError::from)?;
                    self.blit(&bitmap, width);
                    self.pacer.pace(self.config.inter_frame_delay);
                    info!(
                        "emitted symbol {symbols}: {} bytes consumed, frame {} bytes",
                        result.consumed, result.frame_len
                    );
                    pos += result.consumed;
                    symbols += 1;
                }
                Err(FitError::NothingFits) => {
                    let skip = SKIP_ON_FAILURE.min(log.len() - pos);
                    warn!("no prefix fit at pos={pos}, skipping {skip} bytes");
                    pos += skip;
                }
                Err(e) => {
                    error!("fitter failed at pos={pos}: {e}");
                    return Err(HostError::from(e));
                }
            }
        }

        info!("capture complete: {symbols} symbols emitted");
        Ok(symbols)
    }

    /// Consumes the capture and hands back its framebuffer, for callers
    /// that want to inspect or persist what was drawn.
    pub fn into_framebuffer(self) -> F {
        self.framebuffer
    }

    fn blit(&mut self, bitmap: &[u8], width: u8) {
        let stride = usize::from((width + 7) / 8);
        let (origin_x, origin_y) = self.config.position;
        let module_size = self.config.module_size;
        for y in 0..u32::from(width) {
            for x in 0..u32::from(width) {
                let off = (y as usize) * stride + (x as usize) / 8;
                let dark = bitmap[off] & (1 << (7 - (x % 8))) != 0;
                self.framebuffer.fill_rect(
                    origin_x + x * module_size,
                    origin_y + y * module_size,
                    module_size,
                    module_size,
                    dark,
                );
            }
        }
    }
}

fn bitmap_len(version: Version) -> usize {
    let width = version.width();
    let stride = usize::from((width + 7) / 8);
    stride * usize::from(width)
}
