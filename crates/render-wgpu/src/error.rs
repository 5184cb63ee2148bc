use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// No adapter on this machine; callers may treat this as "skip".
    #[error("no compatible gpu adapter available")]
    AdapterUnavailable,
    #[error("failed to acquire gpu device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),
    #[error("readback channel closed before the buffer was mapped")]
    ReadbackChannel,
}
