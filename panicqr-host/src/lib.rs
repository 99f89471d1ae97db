//! The driver, collaborators, and ambient stack around
//! [`panicqr_core`]: a production ZSTD compressor, a framebuffer
//! blitter, a kernel-log source, configuration, logging, and error
//! handling. Nothing in this crate runs inside the panic-notifier hot
//! path's no-allocation contract; it exists to exercise and drive the
//! `no_std` core from ordinary `std` code.

pub mod collaborators;
pub mod compress;
pub mod config;
pub mod driver;
pub mod error;

pub use collaborators::{FrameBuffer, InMemoryFrameBuffer, LogSource, PngFrameBuffer, SliceLogSource};
pub use compress::{CompressError, ZstdCompressor};
pub use config::HostConfig;
pub use driver::{BusyWaitPacer, PanicCapture, Pacer, SleepPacer};
pub use error::HostError;
