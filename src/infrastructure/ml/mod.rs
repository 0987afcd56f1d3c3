use candle_core::Device;

use crate::domain::ComputeDevice;

/// CUDA when a GPU is usable, otherwise CPU.
pub fn detect_device() -> ComputeDevice {
    if candle_core::utils::cuda_is_available() {
        ComputeDevice::Cuda(0)
    } else {
        ComputeDevice::Cpu
    }
}

pub fn candle_device(device: ComputeDevice) -> candle_core::Result<Device> {
    match device {
        ComputeDevice::Cpu => Ok(Device::Cpu),
        ComputeDevice::Cuda(ordinal) => Device::new_cuda(ordinal),
    }
}
