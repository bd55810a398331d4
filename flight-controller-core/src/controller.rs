use serde::{Deserialize, Serialize};

use crate::{
    altitude::VerticalSpeedEstimator,
    error::ControlError,
    mixer::{MOTOR_COUNT, MotorCommand, MotorMixer},
    pid::{Axis, PidGainTable},
    sensor::SensorSample,
    telemetry::{SUMMARY_HEADER, TelemetryFrame, TelemetrySummary, encode_summary},
};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// control period in seconds
    pub dt_s: f32,
    /// 0 roll, 1 pitch, 2 yaw
    pub control_axis: u8,
    pub hover_speed: u16,
    pub min_speed: u16,
    pub max_speed: u16,
    pub damping: f32,
    pub gains: PidGainTable,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            dt_s: 0.01,
            control_axis: Axis::Yaw as u8,
            hover_speed: 1000,
            min_speed: 0,
            max_speed: 2000,
            damping: MotorMixer::DEFAULT_DAMPING,
            gains: PidGainTable::default(),
        }
    }
}

impl ControllerConfig {
    /// Rejects parameters that would turn the estimate or the motor
    /// commands into NaN.
    pub fn validate(&self) -> Result<(), ControlError> {
        if !self.dt_s.is_finite() || self.dt_s <= 0.0 {
            return Err(ControlError::InvalidConfig { field: "dt_s" });
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(ControlError::InvalidConfig { field: "damping" });
        }
        Ok(())
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// no tick has completed yet
    Idle,
    Running,
}

#[derive(Debug, Clone)]
pub struct TickOutput {
    pub sample: SensorSample,
    /// m/s
    pub vertical_speed: f32,
    pub correction: f32,
    pub motors: MotorCommand,
}

impl TickOutput {
    pub fn summary(&self) -> TelemetrySummary {
        TelemetrySummary::new(&self.sample, self.vertical_speed, &self.motors)
    }

    pub fn telemetry_frame(&self) -> Result<TelemetryFrame, ControlError> {
        encode_summary(SUMMARY_HEADER, &self.summary())
    }
}

/// Runs one control iteration per [`FlightController::tick`].
///
/// `tick` takes `&mut self`, callers driving it from an interrupt have to
/// make sure a tick never preempts another one.
pub struct FlightController {
    config: ControllerConfig,
    axis: Axis,
    estimator: VerticalSpeedEstimator,
    mixer: MotorMixer,
    state: LoopState,
    tick_count: u64,
}

impl FlightController {
    pub fn new(config: ControllerConfig) -> Result<Self, ControlError> {
        let axis = Axis::try_from(config.control_axis)?;
        config.validate()?;

        Ok(Self {
            axis,
            estimator: VerticalSpeedEstimator::new(config.dt_s),
            mixer: MotorMixer::new(config.min_speed, config.max_speed, config.damping),
            state: LoopState::Idle,
            tick_count: 0,
            config,
        })
    }

    /// Decodes `registers`, updates the vertical speed estimate and mixes the
    /// correction into motor commands. A rejected register block leaves the
    /// controller untouched.
    pub fn tick(&mut self, registers: &[u32]) -> Result<TickOutput, ControlError> {
        let sample = SensorSample::from_registers(registers).inspect_err(|_| {
            log_warn!("rejected sensor block of {} words", registers.len());
        })?;

        let vertical_speed = self.estimator.observe(sample.altitude());
        let gains = self.config.gains.gains(self.axis);

        // P and D only, the integral gain is not part of this control law
        let correction =
            gains.proportional * sample.acceleration().z + gains.derivative * vertical_speed;

        let motors = self.mixer.mix(&self.hover_baseline(), correction);

        if self.state == LoopState::Idle {
            log_info!("control loop running, axis {}", self.axis as u8);
            self.state = LoopState::Running;
        }
        self.tick_count += 1;

        log_trace!(
            "motors: {} {} {} {}  vspeed={}",
            motors[0],
            motors[1],
            motors[2],
            motors[3],
            vertical_speed,
        );

        Ok(TickOutput {
            sample,
            vertical_speed,
            correction,
            motors,
        })
    }

    fn hover_baseline(&self) -> [u16; MOTOR_COUNT] {
        [self.config.hover_speed; MOTOR_COUNT]
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn estimator(&self) -> &VerticalSpeedEstimator {
        &self.estimator
    }

    pub fn gain_table(&self) -> &PidGainTable {
        &self.config.gains
    }
}
