//! The configuration surface spec.md §6 names but places out of the
//! core ("not part of the core; listed for completeness... No core
//! entry reads these directly"): target QR version, compression level,
//! inter-frame delay, and on-screen placement.

use std::time::Duration;

use clap::Parser;
use panicqr_core::tables::Version;

use crate::error::HostError;

/// ZSTD levels above this are refused unless `--allow-high-compression`
/// is passed, per spec.md §9's scratch-sizing note: higher levels need a
/// compression context sized specifically for them, and this host keeps
/// a single default-sized context.
pub const DEFAULT_MAX_COMPRESSION_LEVEL: i32 = 3;

#[derive(Debug, Clone)]
pub struct HostConfig {
    pub version: Version,
    pub compression_level: i32,
    pub inter_frame_delay: Duration,
    pub position: (u32, u32),
    pub module_size: u32,
    pub allow_high_compression: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            version: Version::new(20).expect("20 is a valid QR version"),
            compression_level: DEFAULT_MAX_COMPRESSION_LEVEL,
            inter_frame_delay: Duration::from_millis(32),
            position: (0, 0),
            module_size: 4,
            allow_high_compression: false,
        }
    }
}

impl HostConfig {
    /// Rejects a compression level the host cannot safely size a
    /// compression context for (spec.md §9).
    pub fn validate(&self) -> Result<(), HostError> {
        if self.compression_level > DEFAULT_MAX_COMPRESSION_LEVEL && !self.allow_high_compression {
            return Err(HostError::UnsupportedCompressionLevel(self.compression_level));
        }
        Ok(())
    }
}

/// CLI overrides for the demo binary.
#[derive(Debug, Parser)]
#[command(name = "panicqr-demo", about = "Render a log file as a sequence of panic QR codes")]
pub struct Cli {
    /// Path to the log file to capture.
    pub log_path: std::path::PathBuf,

    /// Directory to write numbered PNG frames into.
    #[arg(short, long, default_value = "panicqr-out")]
    pub out_dir: std::path::PathBuf,

    /// Target QR version (1..=40).
    #[arg(short, long, default_value_t = 20)]
    pub version: u8,

    /// ZSTD compression level.
    #[arg(short = 'c', long, default_value_t = DEFAULT_MAX_COMPRESSION_LEVEL)]
    pub compression_level: i32,

    /// Allow compression levels above the default-sized scratch ceiling.
    #[arg(long, default_value_t = false)]
    pub allow_high_compression: bool,

    /// Pixels per QR module in the rendered PNG.
    #[arg(short, long, default_value_t = 4)]
    pub module_size: u32,

    /// Inter-frame delay in milliseconds.
    #[arg(short, long, default_value_t = 32)]
    pub delay_ms: u64,
}

impl Cli {
    pub fn to_host_config(&self) -> Result<HostConfig, HostError> {
        let version = Version::new(self.version).ok_or(HostError::Encode(
            panicqr_core::error::EncodeError::InvalidVersion,
        ))?;
        let config = HostConfig {
            version,
            compression_level: self.compression_level,
            inter_frame_delay: Duration::from_millis(self.delay_ms),
            position: (0, 0),
            module_size: self.module_size,
            allow_high_compression: self.allow_high_compression,
        };
        config.validate()?;
        Ok(config)
    }
}
