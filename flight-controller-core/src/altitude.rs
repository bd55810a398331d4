pub const ALTITUDE_HISTORY_CAPACITY: usize = 256;

/// Fixed size ring of altitude samples (m).
///
/// `write_count` keeps counting past `N`; the slot for the next write is
/// always `write_count % N`, so old samples get overwritten instead of the
/// index running off the end of the buffer.
#[derive(Debug, Clone)]
pub struct AltitudeHistory<const N: usize = ALTITUDE_HISTORY_CAPACITY> {
    slots: [f32; N],
    write_count: u64,
}

impl<const N: usize> AltitudeHistory<N> {
    const NON_ZERO_CAPACITY: () = assert!(N > 0, "altitude history needs at least one slot");

    pub const fn new() -> Self {
        let () = Self::NON_ZERO_CAPACITY;
        Self {
            slots: [0.0; N],
            write_count: 0,
        }
    }

    pub fn push(&mut self, altitude: f32) {
        let i = self.slot(self.write_count);
        self.slots[i] = altitude;
        self.write_count += 1;
    }

    /// number of live slots, never more than `N`
    pub fn len(&self) -> usize {
        if self.write_count < N as u64 {
            self.write_count as usize
        } else {
            N
        }
    }

    pub fn is_empty(&self) -> bool {
        self.write_count == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// total number of samples ever pushed
    pub fn write_count(&self) -> u64 {
        self.write_count
    }

    pub fn latest(&self) -> Option<f32> {
        self.nth_latest(0)
    }

    /// logical predecessor of [`Self::latest`], also across the wrap
    pub fn previous(&self) -> Option<f32> {
        self.nth_latest(1)
    }

    /// `n` = 0 is the newest sample. None for slots that were never written
    /// or already overwritten.
    pub fn nth_latest(&self, n: usize) -> Option<f32> {
        if n >= self.len() {
            return None;
        }
        Some(self.slots[self.slot(self.write_count - 1 - n as u64)])
    }

    /// live samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let first = self.write_count - self.len() as u64;
        (first..self.write_count).map(move |count| self.slots[self.slot(count)])
    }

    fn slot(&self, count: u64) -> usize {
        (count % N as u64) as usize
    }
}

impl<const N: usize> Default for AltitudeHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Finite difference vertical speed over the two newest altitude samples.
#[derive(Debug, Clone)]
pub struct VerticalSpeedEstimator<const N: usize = ALTITUDE_HISTORY_CAPACITY> {
    history: AltitudeHistory<N>,
    dt: f32,
}

impl<const N: usize> VerticalSpeedEstimator<N> {
    /// `dt`: tick interval in seconds
    pub fn new(dt: f32) -> Self {
        Self {
            history: AltitudeHistory::new(),
            dt,
        }
    }

    /// Records `altitude` and returns the vertical speed in m/s, 0.0 until
    /// two samples have been observed.
    pub fn observe(&mut self, altitude: f32) -> f32 {
        self.history.push(altitude);

        match (self.history.latest(), self.history.previous()) {
            (Some(latest), Some(previous)) => (latest - previous) / self.dt,
            _ => 0.0,
        }
    }

    pub fn history(&self) -> &AltitudeHistory<N> {
        &self.history
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_observation_is_zero() {
        let mut estimator = VerticalSpeedEstimator::<ALTITUDE_HISTORY_CAPACITY>::new(0.01);
        assert_eq!(estimator.observe(152.0), 0.0);
    }

    #[test]
    fn second_observation_is_exact_difference() {
        let mut estimator = VerticalSpeedEstimator::<ALTITUDE_HISTORY_CAPACITY>::new(0.01);
        estimator.observe(100.0);
        let v = estimator.observe(100.5);

        assert_eq!(v, (100.5f32 - 100.0f32) / 0.01f32);
        assert_relative_eq!(v, 50.0, max_relative = 1e-5);
    }

    #[test]
    fn history_never_exceeds_capacity() {
        let mut history = AltitudeHistory::<8>::new();
        assert!(history.is_empty());

        for i in 0..1000 {
            history.push(i as f32);
            assert!(history.len() <= history.capacity());
        }
        assert_eq!(history.len(), 8);
        assert_eq!(history.write_count(), 1000);
    }

    #[test]
    fn unwritten_slots_are_never_read() {
        let mut history = AltitudeHistory::<4>::new();
        assert_eq!(history.latest(), None);
        assert_eq!(history.previous(), None);

        history.push(3.0);
        assert_eq!(history.latest(), Some(3.0));
        assert_eq!(history.previous(), None);
        assert_eq!(history.nth_latest(3), None);
    }

    #[test]
    fn single_slot_history() {
        let mut history = AltitudeHistory::<1>::new();
        history.push(1.0);
        assert_eq!(history.latest(), Some(1.0));
        assert_eq!(history.previous(), None);

        history.push(2.0);
        assert_eq!(history.latest(), Some(2.0));
        assert_eq!(history.previous(), None);
        assert_eq!(history.len(), 1);
        assert_eq!(history.write_count(), 2);
    }

    #[test]
    fn previous_is_logical_predecessor_across_wrap() {
        let mut history = AltitudeHistory::<4>::new();
        for i in 0..4 {
            history.push(i as f32);
        }
        // slot 0 gets overwritten, its predecessor lives in slot 3
        history.push(10.0);

        assert_eq!(history.latest(), Some(10.0));
        assert_eq!(history.previous(), Some(3.0));
        assert_eq!(history.nth_latest(3), Some(1.0));
        assert_eq!(history.nth_latest(4), None);
    }

    #[test]
    fn iterates_oldest_first_after_wrap() {
        let mut history = AltitudeHistory::<3>::new();
        for i in 1..=5 {
            history.push(i as f32);
        }

        let mut values = [0.0f32; 3];
        for (slot, v) in values.iter_mut().zip(history.iter()) {
            *slot = v;
        }
        assert_eq!(values, [3.0, 4.0, 5.0]);
        assert_eq!(history.iter().count(), 3);
    }

    #[test]
    fn estimate_only_depends_on_last_two_after_wrap() {
        let mut estimator = VerticalSpeedEstimator::<ALTITUDE_HISTORY_CAPACITY>::new(0.01);
        for i in 0..(ALTITUDE_HISTORY_CAPACITY * 3 + 7) {
            estimator.observe((i % 17) as f32 * 1000.0);
        }

        estimator.observe(20.0);
        let v = estimator.observe(20.25);
        assert_relative_eq!(v, 25.0, max_relative = 1e-4);
        assert_eq!(estimator.history().len(), estimator.history().capacity());
    }

    #[test]
    fn wrap_boundary_uses_adjacent_samples() {
        let mut estimator = VerticalSpeedEstimator::<ALTITUDE_HISTORY_CAPACITY>::new(0.5);
        for _ in 0..ALTITUDE_HISTORY_CAPACITY - 1 {
            estimator.observe(1.0);
        }
        // last slot of the buffer
        assert_eq!(estimator.observe(2.0), 2.0);
        // wraps to slot 0
        assert_eq!(estimator.observe(4.0), 4.0);
        assert_eq!(
            estimator.history().write_count(),
            ALTITUDE_HISTORY_CAPACITY as u64 + 1
        );
    }
}
