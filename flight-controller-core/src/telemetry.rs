use heapless::Vec;
use packed_struct::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{error::ControlError, mixer::MotorCommand, sensor::SensorSample};

pub const TELEMETRY_HEADER_LEN: usize = 4;
pub const TELEMETRY_PAYLOAD_CAPACITY: usize = 64;
/// header + full payload + checksum
pub const TELEMETRY_FRAME_MAX_LEN: usize = TELEMETRY_HEADER_LEN + TELEMETRY_PAYLOAD_CAPACITY + 1;

/// Tag used for frames carrying a [`TelemetrySummary`].
pub const SUMMARY_HEADER: [u8; TELEMETRY_HEADER_LEN] = *b"FCSM";

/// Wire layout: header, payload, checksum. No padding, no length field.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryFrame {
    header: [u8; TELEMETRY_HEADER_LEN],
    payload: Vec<u8, TELEMETRY_PAYLOAD_CAPACITY>,
    checksum: u8,
}

/// XOR over every header and payload byte.
pub fn xor_checksum(header: &[u8], payload: &[u8]) -> u8 {
    header
        .iter()
        .chain(payload.iter())
        .fold(0u8, |checksum, byte| checksum ^ byte)
}

/// Builds a frame around `payload`. Payloads longer than
/// [`TELEMETRY_PAYLOAD_CAPACITY`] are rejected without copying anything.
pub fn encode(
    header: [u8; TELEMETRY_HEADER_LEN],
    payload: &[u8],
) -> Result<TelemetryFrame, ControlError> {
    let too_large = ControlError::PayloadTooLarge {
        len: payload.len(),
        capacity: TELEMETRY_PAYLOAD_CAPACITY,
    };
    if payload.len() > TELEMETRY_PAYLOAD_CAPACITY {
        return Err(too_large);
    }

    Ok(TelemetryFrame {
        header,
        payload: Vec::from_slice(payload).map_err(|_| too_large)?,
        checksum: xor_checksum(&header, payload),
    })
}

pub fn encode_summary(
    header: [u8; TELEMETRY_HEADER_LEN],
    summary: &TelemetrySummary,
) -> Result<TelemetryFrame, ControlError> {
    encode(header, &summary.to_bytes()?)
}

impl TelemetryFrame {
    pub fn header(&self) -> &[u8; TELEMETRY_HEADER_LEN] {
        &self.header
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// serialized size on the wire
    pub fn len(&self) -> usize {
        TELEMETRY_HEADER_LEN + self.payload.len() + 1
    }

    /// returns the number of bytes written
    pub fn write_to(&self, buf: &mut [u8]) -> Result<usize, ControlError> {
        let len = self.len();
        if buf.len() < len {
            return Err(ControlError::BufferTooSmall {
                needed: len,
                available: buf.len(),
            });
        }

        let payload_end = TELEMETRY_HEADER_LEN + self.payload.len();
        buf[..TELEMETRY_HEADER_LEN].copy_from_slice(&self.header);
        buf[TELEMETRY_HEADER_LEN..payload_end].copy_from_slice(&self.payload);
        buf[payload_end] = self.checksum;

        Ok(len)
    }

    pub fn to_bytes(&self) -> Vec<u8, TELEMETRY_FRAME_MAX_LEN> {
        self.header
            .iter()
            .chain(self.payload.iter())
            .chain(core::iter::once(&self.checksum))
            .copied()
            .collect()
    }

    /// Parses a complete wire frame; the payload is everything between the
    /// header and the trailing checksum byte.
    pub fn decode(bytes: &[u8]) -> Result<Self, ControlError> {
        if bytes.len() < TELEMETRY_HEADER_LEN + 1 {
            return Err(ControlError::TruncatedFrame { len: bytes.len() });
        }

        let (body, checksum) = bytes.split_at(bytes.len() - 1);
        let (header, payload) = body.split_at(TELEMETRY_HEADER_LEN);
        let header = [header[0], header[1], header[2], header[3]];

        let frame = encode(header, payload)?;
        if frame.checksum != checksum[0] {
            return Err(ControlError::ChecksumMismatch {
                expected: frame.checksum,
                actual: checksum[0],
            });
        }
        Ok(frame)
    }
}

/// One tick worth of state, packed big endian into 24 bytes.
#[derive(PackedStruct, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[packed_struct(bit_numbering = "msb0", endian = "msb", size_bytes = "24")]
pub struct TelemetrySummary {
    pub timestamp_us: u32,

    /// f32 bits, m
    altitude: u32,
    /// f32 bits, m/s
    vertical_speed: u32,
    /// f32 bits, V
    battery_voltage: u32,

    pub motor_0: u16,
    pub motor_1: u16,
    pub motor_2: u16,
    pub motor_3: u16,
}

impl TelemetrySummary {
    pub const SIZE: usize = 24;

    pub fn new(sample: &SensorSample, vertical_speed: f32, motors: &MotorCommand) -> Self {
        let [motor_0, motor_1, motor_2, motor_3] = *motors.speeds();
        Self {
            timestamp_us: sample.timestamp_us(),
            altitude: sample.altitude().to_bits(),
            vertical_speed: vertical_speed.to_bits(),
            battery_voltage: sample.battery_voltage().to_bits(),
            motor_0,
            motor_1,
            motor_2,
            motor_3,
        }
    }

    pub fn altitude(&self) -> f32 {
        f32::from_bits(self.altitude)
    }

    pub fn vertical_speed(&self) -> f32 {
        f32::from_bits(self.vertical_speed)
    }

    pub fn battery_voltage(&self) -> f32 {
        f32::from_bits(self.battery_voltage)
    }

    pub fn motors(&self) -> [u16; 4] {
        [self.motor_0, self.motor_1, self.motor_2, self.motor_3]
    }

    pub fn to_bytes(&self) -> Result<[u8; Self::SIZE], ControlError> {
        self.pack().map_err(|_| ControlError::SummaryPacking)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ControlError> {
        Self::unpack_from_slice(bytes).map_err(|_| ControlError::SummaryPacking)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TelemetrySummary {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "TelemetrySummary {{ t: {}us, altitude: {}, vertical_speed: {}, battery: {}, motors: {} }}",
            self.timestamp_us,
            self.altitude(),
            self.vertical_speed(),
            self.battery_voltage(),
            self.motors(),
        )
    }
}
