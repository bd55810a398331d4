#[cfg(feature = "log")]
use log::LevelFilter;

use crate::{SENSOR_BLOCK_WORDS, SensorSample};
use nalgebra::Vector3;


pub fn init_logger() {
    #[cfg(feature = "log")]
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .filter(Some("flight_controller_core"), LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// register block for a vehicle at rest apart from the given values
pub fn registers(acc_z: f32, altitude: f32, timestamp_us: u32) -> [u32; SENSOR_BLOCK_WORDS] {
    SensorSample::new(
        Vector3::new(0.0, 0.0, acc_z),
        Vector3::zeros(),
        altitude,
        12.6,
        timestamp_us,
    )
    .to_registers()
}
