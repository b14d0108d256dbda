use riftwalk_core::wrap01;

/// Duty factor of the alternating gait: stance is `phase < STANCE_END`.
pub const STANCE_END: f32 = 0.5;

/// Where one foot is within its gait cycle on a given frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClockSample {
    /// Whole cycles since the run's start frame.
    pub cycle_index: i64,
    /// Normalized phase in `[0, 1)`, offset applied.
    pub phase: f32,
    /// Cycles of this foot's own clock: `cycle_index` plus the whole cycles the
    /// phase offset carried over. Constant across one stance and the swing after it.
    pub foot_cycle: i64,
}

impl ClockSample {
    #[inline] pub fn is_stance(&self) -> bool { self.phase < STANCE_END }
    /// Progress through swing in `[0, 1)`; 0 during stance.
    #[inline] pub fn swing_t(&self) -> f32 {
        if self.is_stance() { 0.0 } else { (self.phase - STANCE_END) / (1.0 - STANCE_END) }
    }
}

/// Frame-driven gait clock. Pure: the same frame always yields the same sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GaitClock {
    pub start_frame: i32,
    pub cycle_length: u32,
}

impl GaitClock {
    pub fn new(start_frame: i32, cycle_length: u32) -> Self {
        Self { start_frame, cycle_length: cycle_length.max(1) }
    }

    pub fn sample(&self, frame: i32, phase_offset: f32) -> ClockSample {
        let rel = frame as i64 - self.start_frame as i64;
        let len = self.cycle_length as i64;
        let cycle_index = rel.div_euclid(len);
        let local = rel.rem_euclid(len);

        let u = local as f32 / len as f32 + phase_offset;
        let carried = u.floor();
        let phase = wrap01(u);
        // wrap01 folds a rounding-up to 1.0 into 0.0; the carry has to follow it
        let carried = if phase == 0.0 && u - carried >= 0.5 { carried + 1.0 } else { carried };
        ClockSample { cycle_index, phase, foot_cycle: cycle_index + carried as i64 }
    }
}

/// `(cycle_index, phase)` for `frame`, counted from `start_frame`.
#[inline]
pub fn phase(frame: i32, start_frame: i32, cycle_length: u32, phase_offset: f32) -> (i64, f32) {
    let s = GaitClock::new(start_frame, cycle_length).sample(frame, phase_offset);
    (s.cycle_index, s.phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cycle_and_phase() {
        let c = GaitClock::new(1, 20);
        let s = c.sample(1, 0.0);
        assert_eq!((s.cycle_index, s.phase), (0, 0.0));
        let s = c.sample(16, 0.0);
        assert_eq!(s.cycle_index, 0);
        assert_relative_eq!(s.phase, 0.75);
        let s = c.sample(21, 0.0);
        assert_eq!((s.cycle_index, s.phase, s.foot_cycle), (1, 0.0, 1));
        assert_eq!(phase(41, 1, 20, 0.0), (2, 0.0));
    }

    #[test]
    fn half_offset_is_complementary() {
        let c = GaitClock::new(0, 20);
        for frame in 0..80 {
            let l = c.sample(frame, 0.0);
            let r = c.sample(frame, 0.5);
            assert_ne!(l.is_stance(), r.is_stance(), "frame {frame}");
        }
        // left mid-stance while right is at swing midpoint
        let l = c.sample(5, 0.0);
        let r = c.sample(5, 0.5);
        assert_relative_eq!(l.phase, 0.25);
        assert_relative_eq!(r.swing_t(), 0.5);
    }

    #[test]
    fn foot_cycle_is_constant_over_stance_then_swing() {
        let c = GaitClock::new(0, 20);
        // offset 0.5: stance occupies the back half of a root cycle, swing the front half of the next
        let stance = c.sample(12, 0.5);
        let swing = c.sample(22, 0.5);
        assert!(stance.is_stance() && !swing.is_stance());
        assert_eq!(stance.cycle_index + 1, swing.cycle_index);
        assert_eq!(stance.foot_cycle, swing.foot_cycle);

        // offset 0.25: the stance window straddles a root-cycle boundary but keeps one foot cycle
        let a = c.sample(17, 0.25);
        let b = c.sample(21, 0.25);
        assert!(a.is_stance() && b.is_stance());
        assert_ne!(a.cycle_index, b.cycle_index);
        assert_eq!(a.foot_cycle, b.foot_cycle);
    }

    #[test]
    fn before_start_counts_negative_cycles() {
        let s = GaitClock::new(10, 4).sample(9, 0.0);
        assert_eq!(s.cycle_index, -1);
        assert_relative_eq!(s.phase, 0.75);
    }
}
