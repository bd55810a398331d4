use serde::{Deserialize, Serialize};

use crate::error::ControlError;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Axis {
    Roll = 0,
    Pitch = 1,
    Yaw = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Roll, Axis::Pitch, Axis::Yaw];
}

impl TryFrom<u8> for Axis {
    type Error = ControlError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Axis::Roll),
            1 => Ok(Axis::Pitch),
            2 => Ok(Axis::Yaw),
            _ => Err(ControlError::InvalidAxis(value)),
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    pub proportional: f32,
    pub integral: f32,
    pub derivative: f32,
}

impl PidGains {
    pub const fn new(proportional: f32, integral: f32, derivative: f32) -> Self {
        Self {
            proportional,
            integral,
            derivative,
        }
    }
}

/// Read-only gains indexed by [`Axis`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PidGainTable {
    gains: [PidGains; 3],
}

impl PidGainTable {
    pub const DEFAULT_GAINS: [PidGains; 3] = [
        PidGains::new(1.2, 0.01, 0.5),
        PidGains::new(1.0, 0.02, 0.4),
        PidGains::new(0.8, 0.005, 0.3),
    ];

    /// `gains` in roll, pitch, yaw order
    pub const fn new(gains: [PidGains; 3]) -> Self {
        Self { gains }
    }

    pub fn gains(&self, axis: Axis) -> PidGains {
        self.gains[axis as usize]
    }

    /// Lookup by raw axis index (0 roll, 1 pitch, 2 yaw).
    pub fn gains_for(&self, axis: u8) -> Result<PidGains, ControlError> {
        Ok(self.gains(Axis::try_from(axis)?))
    }
}

impl Default for PidGainTable {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GAINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_values() {
        let table = PidGainTable::default();

        assert_eq!(table.gains_for(0), Ok(PidGains::new(1.2, 0.01, 0.5)));
        assert_eq!(table.gains_for(1), Ok(PidGains::new(1.0, 0.02, 0.4)));
        assert_eq!(table.gains_for(2), Ok(PidGains::new(0.8, 0.005, 0.3)));
    }

    #[test]
    fn lookup_is_idempotent() {
        let table = PidGainTable::default();
        for axis in Axis::ALL {
            let first = table.gains_for(axis as u8).unwrap();
            let second = table.gains_for(axis as u8).unwrap();
            assert_eq!(first, second);
            assert_eq!(first, table.gains(axis));
        }
    }

    #[test]
    fn unknown_axis_is_rejected() {
        let table = PidGainTable::default();
        for axis in 3..=u8::MAX {
            assert_eq!(table.gains_for(axis), Err(ControlError::InvalidAxis(axis)));
        }
    }

    #[test]
    fn custom_table() {
        let gains = PidGains::new(2.0, 0.0, 1.0);
        let table = PidGainTable::new([gains; 3]);
        assert_eq!(table.gains(Axis::Pitch), gains);
    }
}
