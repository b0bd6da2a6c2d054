//! Compile-time backend selection. NdArray (CPU) by default, LibTorch with the `tch` feature.

#[cfg(not(feature = "tch"))]
mod selected {
    use burn::backend::{ndarray::NdArrayDevice, NdArray};

    /// The inference backend
    pub type Inference = NdArray;

    /// The device used by default
    pub fn device() -> NdArrayDevice {
        NdArrayDevice::Cpu
    }
}

#[cfg(feature = "tch")]
mod selected {
    use burn::backend::{libtorch::LibTorchDevice, LibTorch};

    /// The inference backend
    pub type Inference = LibTorch;

    /// The device used by default
    pub fn device() -> LibTorchDevice {
        LibTorchDevice::Cpu
    }
}

pub use selected::{device, Inference};

/// The training backend
pub type Training = burn::backend::Autodiff<Inference>;
