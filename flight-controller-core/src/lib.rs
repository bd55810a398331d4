// only use std when feature = "std" is enabled or during testing
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod fmt;

mod altitude;
mod controller;
mod error;
mod mixer;
mod pid;
mod sensor;
mod telemetry;

pub use altitude::{ALTITUDE_HISTORY_CAPACITY, AltitudeHistory, VerticalSpeedEstimator};
pub use controller::{ControllerConfig, FlightController, LoopState, TickOutput};
pub use error::ControlError;
pub use mixer::{MOTOR_COUNT, MotorCommand, MotorMixer};
pub use pid::{Axis, PidGainTable, PidGains};
pub use sensor::{SENSOR_BLOCK_BYTES, SENSOR_BLOCK_WORDS, SensorSample};
pub use telemetry::{
    SUMMARY_HEADER, TELEMETRY_FRAME_MAX_LEN, TELEMETRY_HEADER_LEN, TELEMETRY_PAYLOAD_CAPACITY,
    TelemetryFrame, TelemetrySummary, encode, encode_summary, xor_checksum,
};

#[cfg(test)]
mod tests;
