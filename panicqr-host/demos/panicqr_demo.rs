//! Renders a log file as a sequence of panic QR codes, one numbered PNG
//! per symbol, so the output can be inspected or scanned by hand.

use clap::Parser;
use log::{debug, info, warn};
use panicqr_core::fitter::{fit_payload, FitError};
use panicqr_core::tables::Version;
use panicqr_host::collaborators::{FrameBuffer, PngFrameBuffer};
use panicqr_host::config::Cli;
use panicqr_host::{HostError, ZstdCompressor};

const SKIP_ON_FAILURE: usize = 1024;

fn main() -> Result<(), HostError> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.to_host_config()?;

    let log = std::fs::read(&cli.log_path)?;
    info!(
        "capture start: log buffer length={} target version={}",
        log.len(),
        config.version.value()
    );

    std::fs::create_dir_all(&cli.out_dir)?;

    let version = config.version;
    let mut compressor = ZstdCompressor::new(config.compression_level);
    let mut tmp = vec![0u8; version.buffer_len()];
    let mut frame = vec![0u8; version.data_capacity()];
    let width_px = u32::from(version.width()) * config.module_size;

    let mut pos = 0usize;
    let mut symbols = 0usize;
    while pos < log.len() {
        match fit_payload(&mut compressor, &log[pos..], version, &mut frame) {
            Ok(result) => {
                debug!("symbol {symbols}: consumed={} frame_bytes={}", result.consumed, result.frame_len);

                let mut bitmap = vec![0u8; bitmap_len(version)];
                bitmap[..result.frame_len].copy_from_slice(&frame[..result.frame_len]);
                let width = panicqr_core::qr_generate(
                    None,
                    &mut bitmap,
                    result.frame_len,
                    version.value(),
                    &mut tmp,
                )?;

                let mut fb = PngFrameBuffer::new(width_px, width_px, config.module_size);
                blit(&mut fb, &bitmap, width, config.module_size);
                let out_path = cli.out_dir.join(format!("panicqr-{symbols:04}.png"));
                fb.save(&out_path)?;
                info!("wrote {} ({} bytes consumed)", out_path.display(), result.consumed);

                pos += result.consumed;
                symbols += 1;
            }
            Err(FitError::NothingFits) => {
                let skip = SKIP_ON_FAILURE.min(log.len() - pos);
                warn!("no prefix fit at pos={pos}, skipping {skip} bytes");
                pos += skip;
            }
            Err(e) => return Err(HostError::from(e)),
        }
    }

    info!("capture complete: {symbols} symbols emitted");
    Ok(())
}

fn bitmap_len(version: Version) -> usize {
    let width = version.width();
    let stride = usize::from((width + 7) / 8);
    stride * usize::from(width)
}

fn blit(fb: &mut PngFrameBuffer, bitmap: &[u8], width: u8, module_size: u32) {
    let stride = usize::from((width + 7) / 8);
    for y in 0..u32::from(width) {
        for x in 0..u32::from(width) {
            let off = (y as usize) * stride + (x as usize) / 8;
            let dark = bitmap[off] & (1 << (7 - (x % 8))) != 0;
            fb.fill_rect(x * module_size, y * module_size, module_size, module_size, dark);
        }
    }
}
