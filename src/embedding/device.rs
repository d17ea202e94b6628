use candle_core::Device;
use tracing::debug;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::{info, warn};

/// Picks the first accelerator enabled at compile time, falling back to CPU.
pub fn select_device() -> Device {
    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            info!("Embedding on CUDA device 0");
            return device;
        }
        Err(e) => warn!(error = %e, "CUDA device unavailable"),
    }

    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            info!("Embedding on Metal device 0");
            return device;
        }
        Err(e) => warn!(error = %e, "Metal device unavailable"),
    }

    debug!("Embedding on CPU");
    Device::Cpu
}
