use libm::roundf;

pub const MOTOR_COUNT: usize = 4;

/// Per-motor speed commands, always inside the mixer's safe range.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorCommand<const N: usize = MOTOR_COUNT>([u16; N]);

impl<const N: usize> MotorCommand<N> {
    pub fn speeds(&self) -> &[u16; N] {
        &self.0
    }

    pub fn into_inner(self) -> [u16; N] {
        self.0
    }
}

impl<const N: usize> core::ops::Index<usize> for MotorCommand<N> {
    type Output = u16;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[derive(Debug, Clone)]
pub struct MotorMixer {
    min_speed: u16,
    max_speed: u16,
    damping: f32,
}

impl MotorMixer {
    pub const DEFAULT_DAMPING: f32 = 0.95;

    pub fn new(min_speed: u16, max_speed: u16, damping: f32) -> Self {
        Self {
            min_speed,
            max_speed,
            damping,
        }
    }

    /// Sign with which the correction is applied to motor `i`: motor 0 speeds
    /// up, motor 2 slows down, the rest only get damped.
    pub fn correction_sign(i: usize) -> i8 {
        match i {
            0 => 1,
            2 => -1,
            _ => 0,
        }
    }

    /// Applies `correction` to `base_speeds`, damps every motor, then clamps
    /// into `[min_speed, max_speed]`. `base_speeds` is left untouched.
    ///
    /// `base_speeds` must be the uncorrected baseline (e.g. hover speed on
    /// every motor), the differential correction is only applied here.
    /// A NaN or infinite correction is treated as 0.
    pub fn mix<const N: usize>(
        &self,
        base_speeds: &[u16; N],
        correction: f32,
    ) -> MotorCommand<N> {
        let correction = if correction.is_finite() {
            roundf(correction)
        } else {
            log_debug!("non-finite correction {}, holding baseline", correction);
            0.0
        };
        let mut out = [0u16; N];

        for (i, (speed, base)) in out.iter_mut().zip(base_speeds.iter()).enumerate() {
            let corrected = match Self::correction_sign(i) {
                0 => *base as f32,
                sign => *base as f32 + sign as f32 * correction,
            };
            let adjusted = roundf(corrected * self.damping);
            *speed = self.clamp(i, adjusted);
        }

        MotorCommand(out)
    }

    pub fn min_speed(&self) -> u16 {
        self.min_speed
    }

    pub fn max_speed(&self) -> u16 {
        self.max_speed
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    fn clamp(&self, motor: usize, speed: f32) -> u16 {
        if speed.is_nan() {
            log_debug!(
                "motor {} speed is NaN, holding at {}",
                motor,
                self.min_speed
            );
            return self.min_speed;
        }

        let min = self.min_speed as f32;
        let max = (self.max_speed as f32).max(min);
        if speed < min || speed > max {
            log_debug!(
                "motor {} speed {} clamped into [{}, {}]",
                motor,
                speed,
                min,
                max
            );
        }
        speed.max(min).min(max) as u16
    }
}

impl Default for MotorMixer {
    fn default() -> Self {
        Self::new(0, 2000, Self::DEFAULT_DAMPING)
    }
}
