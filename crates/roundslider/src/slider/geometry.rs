use super::{FULL_SWEEP, MAX_SEGMENTS, TOP_OFFSET};
use crate::options::SliderOptions;
use crate::target::Point;

/// Maps values in `[min, max]` onto the ring and snaps them to `step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// A value on the step grid together with its ring angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapped {
    pub value: f64,
    pub angle: f64,
}

impl ValueScale {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn from_options(options: &SliderOptions) -> Self {
        Self::new(options.min, options.max, options.step)
    }

    fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Degrees clockwise from the top, in `[0, 360)`.
    pub fn value_to_angle(&self, value: f64) -> f64 {
        (value - self.min) / self.range() * FULL_SWEEP
    }

    pub fn angle_to_value(&self, angle: f64) -> f64 {
        angle / 360.0 * self.range() + self.min
    }

    pub fn clamp(&self, value: f64) -> f64 {
        self.min.max(value.min(self.max))
    }

    /// Rounds `raw` to the nearest `min + k * step`, falling back to the bound when the last
    /// segment is shorter than a step. Ties go to the lower grid point.
    pub fn snap(&self, raw: f64) -> Snapped {
        let raw = self.clamp(raw);
        let remainder = (raw - self.min) % self.step;
        let low = raw - remainder;

        let value = if raw >= low {
            let high = self.clamp(low + self.step);
            Self::closer(raw, low, high)
        } else {
            let below = self.clamp(low - self.step);
            Self::closer(raw, low, below)
        };

        let value = self.clamp(value.round());
        Snapped {
            value,
            angle: self.value_to_angle(value),
        }
    }

    fn closer(raw: f64, preferred: f64, other: f64) -> f64 {
        if (raw - preferred).abs() <= (other - raw).abs() {
            preferred
        } else {
            other
        }
    }

    /// Intervals the step grid cuts the range into, before any limit applies.
    pub fn step_intervals(&self) -> f64 {
        // absorb float noise such as 1.0 / 0.1 == 10.000000000000002
        (self.range() / self.step - 1e-9).ceil().max(1.0)
    }

    /// Number of tick intervals on the ring; a trailing partial interval counts as one.
    /// Never more than [`MAX_SEGMENTS`].
    pub fn segment_count(&self) -> usize {
        self.step_intervals().min(MAX_SEGMENTS as f64) as usize
    }

    /// Rotation of the `index`-th tick line, in degrees from the positive x axis.
    pub fn tick_angle(&self, index: usize) -> f64 {
        index as f64 * self.step / self.range() * 360.0 - TOP_OFFSET
    }
}

/// Angle of a pointer offset `(dx, dy)` from the ring center, measured clockwise from the
/// top. Lands in `[0, 360)`.
pub fn pointer_to_angle(dx: f64, dy: f64) -> f64 {
    let mut angle = dy.atan2(dx).to_degrees();
    if angle < 0.0 && dx < 0.0 {
        angle += 360.0;
    }
    angle + TOP_OFFSET
}

pub fn polar_to_cartesian(center: Point, path_radius: f64, angle: f64) -> Point {
    let rad = (angle - TOP_OFFSET).to_radians();
    Point::new(
        center.x + path_radius * rad.cos(),
        center.y + path_radius * rad.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> ValueScale {
        ValueScale::new(100.0, 200.0, 10.0)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_value_to_angle_bounds() {
        let s = scale();
        assert_eq!(s.value_to_angle(100.0), 0.0);
        assert!(approx(s.value_to_angle(150.0), 179.99995));
        let top = s.value_to_angle(200.0);
        assert!(top < 360.0);
        assert!(approx(top, FULL_SWEEP));
    }

    #[test]
    fn test_value_to_angle_is_monotonic_and_in_range() {
        let s = scale();
        let mut last = -1.0;
        for i in 0..=1000 {
            let value = 100.0 + i as f64 * 0.1;
            let angle = s.value_to_angle(value);
            assert!((0.0..360.0).contains(&angle), "{value} -> {angle}");
            assert!(angle >= last);
            last = angle;
        }
    }

    #[test]
    fn test_angle_round_trip_within_half_step() {
        let s = scale();
        for i in 0..=100 {
            let value = 100.0 + i as f64;
            let back = s.angle_to_value(s.value_to_angle(value));
            assert!((back - value).abs() <= s.step / 2.0);
        }
    }

    #[test]
    fn test_angle_to_value_example() {
        assert_eq!(scale().angle_to_value(180.0), 150.0);
        assert_eq!(scale().snap(150.0).value, 150.0);
    }

    #[test]
    fn test_snap_rounds_to_nearest_step() {
        let s = scale();
        assert_eq!(s.snap(143.0).value, 140.0);
        assert_eq!(s.snap(147.0).value, 150.0);
        assert_eq!(s.snap(159.99998).value, 160.0);
        assert_eq!(s.snap(100.0).value, 100.0);
        assert_eq!(s.snap(200.0).value, 200.0);
    }

    #[test]
    fn test_snap_tie_favors_lower_candidate() {
        assert_eq!(scale().snap(145.0).value, 140.0);
        assert_eq!(scale().snap(195.0).value, 190.0);
    }

    #[test]
    fn test_snap_clamps_out_of_range_input() {
        let s = scale();
        assert_eq!(s.snap(40.0).value, 100.0);
        assert_eq!(s.snap(95.0).value, 100.0);
        assert_eq!(s.snap(250.0).value, 200.0);
        assert_eq!(s.snap(f64::NAN).value, 200.0);
    }

    #[test]
    fn test_snap_partial_last_segment_clamps_to_max() {
        let s = ValueScale::new(0.0, 25.0, 10.0);
        assert_eq!(s.snap(24.0).value, 25.0);
        assert_eq!(s.snap(21.0).value, 20.0);
        assert_eq!(s.snap(25.0).value, 25.0);
        assert_eq!(s.segment_count(), 3);
    }

    #[test]
    fn test_snap_is_idempotent_and_on_grid() {
        for s in [scale(), ValueScale::new(0.0, 25.0, 10.0), ValueScale::new(-50.0, 50.0, 5.0)] {
            for i in 0..=400 {
                let raw = s.min - 10.0 + i as f64 * (s.max - s.min + 20.0) / 400.0;
                let once = s.snap(raw);
                let twice = s.snap(once.value);
                assert_eq!(once, twice);
                assert!(once.value >= s.min && once.value <= s.max);

                let k = (once.value - s.min) / s.step;
                assert!(approx(k, k.round()) || once.value == s.max, "{raw} -> {}", once.value);
            }
        }
    }

    #[test]
    fn test_snapped_angle_matches_value() {
        let snapped = scale().snap(163.0);
        assert_eq!(snapped.value, 160.0);
        assert_eq!(snapped.angle, scale().value_to_angle(160.0));
    }

    #[test]
    fn test_pointer_to_angle_quadrants() {
        let r = 100.0;
        assert!(approx(pointer_to_angle(0.0, -r), 0.0));
        assert!(approx(pointer_to_angle(r, 0.0), 90.0));
        assert!(approx(pointer_to_angle(0.0, r), 180.0));
        assert!(approx(pointer_to_angle(-r, 0.0), 270.0));
        assert!(approx(pointer_to_angle(-r, -r), 315.0));
        assert!(approx(pointer_to_angle(r, -r), 45.0));
    }

    #[test]
    fn test_pointer_straight_up_is_min() {
        let s = scale();
        let angle = pointer_to_angle(0.0, -125.0);
        assert_eq!(s.snap(s.angle_to_value(angle)).value, s.min);
    }

    #[test]
    fn test_pointer_to_angle_stays_in_range() {
        for i in 0..360 {
            let rad = (i as f64 + 0.5).to_radians();
            let angle = pointer_to_angle(rad.cos(), rad.sin());
            assert!((0.0..360.0).contains(&angle), "{i} -> {angle}");
        }
    }

    #[test]
    fn test_polar_to_cartesian() {
        let center = Point::new(125.0, 125.0);
        let top = polar_to_cartesian(center, 117.5, 0.0);
        assert!(approx(top.x, 125.0) && approx(top.y, 7.5));
        let right = polar_to_cartesian(center, 117.5, 90.0);
        assert!(approx(right.x, 242.5) && approx(right.y, 125.0));
        let bottom = polar_to_cartesian(center, 117.5, 180.0);
        assert!(approx(bottom.x, 125.0) && approx(bottom.y, 242.5));
    }

    #[test]
    fn test_segments_and_ticks() {
        let s = scale();
        assert_eq!(s.segment_count(), 10);
        assert_eq!(s.tick_angle(0), -90.0);
        assert!(approx(s.tick_angle(1), -54.0));
        assert!(approx(s.tick_angle(5), 90.0));
        assert_eq!(ValueScale::new(0.0, 1.0, 0.1).segment_count(), 10);
    }

    #[test]
    fn test_segment_count_is_bounded() {
        let fine = ValueScale::new(0.0, 1e9, 1e-9);
        assert!(fine.step_intervals() > 1e17);
        assert_eq!(fine.segment_count(), MAX_SEGMENTS);
        assert_eq!(ValueScale::new(0.0, 3600.0, 1.0).segment_count(), 3600);
    }
}
