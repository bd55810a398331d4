use core::fmt;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// register block holds fewer than `SENSOR_BLOCK_WORDS` words
    InvalidSensorBlock {
        words: usize,
    },
    /// PID axis index outside roll / pitch / yaw
    InvalidAxis(u8),
    /// controller parameter out of range, e.g. a non-positive tick interval
    InvalidConfig {
        field: &'static str,
    },
    /// telemetry payload longer than the frame payload region
    PayloadTooLarge {
        len: usize,
        capacity: usize,
    },
    /// output buffer can't hold the serialized frame
    BufferTooSmall {
        needed: usize,
        available: usize,
    },
    /// wire frame shorter than header + checksum
    TruncatedFrame { len: usize },
    ChecksumMismatch {
        expected: u8,
        actual: u8,
    },
    SummaryPacking,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSensorBlock { words } => {
                write!(f, "invalid sensor block: {} words available", words)
            }
            Self::InvalidAxis(axis) => write!(f, "invalid PID axis {}", axis),
            Self::InvalidConfig { field } => write!(f, "invalid controller config: {}", field),
            Self::PayloadTooLarge { len, capacity } => write!(
                f,
                "telemetry payload of {} bytes exceeds capacity of {} bytes",
                len, capacity
            ),
            Self::BufferTooSmall { needed, available } => write!(
                f,
                "buffer too small: need {} bytes, have {}",
                needed, available
            ),
            Self::TruncatedFrame { len } => write!(f, "truncated telemetry frame ({} bytes)", len),
            Self::ChecksumMismatch { expected, actual } => write!(
                f,
                "telemetry checksum mismatch: expected {:02x}, got {:02x}",
                expected, actual
            ),
            Self::SummaryPacking => write!(f, "failed to pack telemetry summary"),
        }
    }
}

impl core::error::Error for ControlError {}
