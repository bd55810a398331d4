use nalgebra::Vector3;

use crate::error::ControlError;

/// ax, ay, az, gx, gy, gz, altitude, battery, timestamp
pub const SENSOR_BLOCK_WORDS: usize = 9;
pub const SENSOR_BLOCK_BYTES: usize = SENSOR_BLOCK_WORDS * 4;

const WORD_ALTITUDE: usize = 6;
const WORD_BATTERY: usize = 7;
const WORD_TIMESTAMP: usize = 8;

/// One reading of the sensor register block, copied out of hardware memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSample {
    acceleration: Vector3<f32>,
    angular_rate: Vector3<f32>,
    altitude: f32,
    battery_voltage: f32,
    timestamp_us: u32,
}

impl SensorSample {
    pub fn new(
        acceleration: Vector3<f32>,
        angular_rate: Vector3<f32>,
        altitude: f32,
        battery_voltage: f32,
        timestamp_us: u32,
    ) -> Self {
        Self {
            acceleration,
            angular_rate,
            altitude,
            battery_voltage,
            timestamp_us,
        }
    }

    /// Decodes a register block. Words 0-7 hold f32 bit patterns, word 8 the
    /// timestamp in microseconds. Extra trailing words are ignored.
    pub fn from_registers(block: &[u32]) -> Result<Self, ControlError> {
        if block.len() < SENSOR_BLOCK_WORDS {
            return Err(ControlError::InvalidSensorBlock { words: block.len() });
        }

        let f = |i: usize| f32::from_bits(block[i]);
        Ok(Self {
            acceleration: Vector3::new(f(0), f(1), f(2)),
            angular_rate: Vector3::new(f(3), f(4), f(5)),
            altitude: f(WORD_ALTITUDE),
            battery_voltage: f(WORD_BATTERY),
            timestamp_us: block[WORD_TIMESTAMP],
        })
    }

    /// Same layout as [`Self::from_registers`], little endian words.
    pub fn from_register_bytes(bytes: &[u8]) -> Result<Self, ControlError> {
        if bytes.len() < SENSOR_BLOCK_BYTES {
            return Err(ControlError::InvalidSensorBlock {
                words: bytes.len() / 4,
            });
        }

        let mut block = [0u32; SENSOR_BLOCK_WORDS];
        for (word, chunk) in block.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self::from_registers(&block)
    }

    pub fn to_registers(&self) -> [u32; SENSOR_BLOCK_WORDS] {
        [
            self.acceleration.x.to_bits(),
            self.acceleration.y.to_bits(),
            self.acceleration.z.to_bits(),
            self.angular_rate.x.to_bits(),
            self.angular_rate.y.to_bits(),
            self.angular_rate.z.to_bits(),
            self.altitude.to_bits(),
            self.battery_voltage.to_bits(),
            self.timestamp_us,
        ]
    }

    /// m/s^2
    pub fn acceleration(&self) -> Vector3<f32> {
        self.acceleration
    }

    pub fn angular_rate(&self) -> Vector3<f32> {
        self.angular_rate
    }

    /// m
    pub fn altitude(&self) -> f32 {
        self.altitude
    }

    /// V
    pub fn battery_voltage(&self) -> f32 {
        self.battery_voltage
    }

    pub fn timestamp_us(&self) -> u32 {
        self.timestamp_us
    }

    pub fn timestamp_s(&self) -> f64 {
        self.timestamp_us as f64 / 1_000_000.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "SensorSample {{ acc: [{}, {}, {}], gyro: [{}, {}, {}], altitude: {}, battery: {}, t: {}us }}",
            self.acceleration.x,
            self.acceleration.y,
            self.acceleration.z,
            self.angular_rate.x,
            self.angular_rate.y,
            self.angular_rate.z,
            self.altitude,
            self.battery_voltage,
            self.timestamp_us,
        )
    }
}
