//! Projection of element currents into the magnetic field envelope.

use std::f32::consts::PI;

use crate::line::DelayLine;
use crate::Error;

/// Describes the composition of a `RadialProjector`.
pub struct RadialProjectorDescriptor {
    /// The number of angular samples on the ring around each element.
    pub points_around: usize,
    /// The radial displacement corresponding to unit current magnitude.
    pub r_max: f32,
}

/// Maps element currents onto rings of sample points around the antenna's
/// longitudinal axis.
pub struct RadialProjector {
    points_around: usize,
    r_max: f32,
}

impl RadialProjector {
    /// Creates a new `RadialProjector` instance.
    #[inline]
    pub fn new(desc: RadialProjectorDescriptor) -> Result<Self, Error> {
        if desc.points_around == 0 {
            return Err(Error::BadParameter {
                name: "points_around".to_string(),
                value: 0.0,
            });
        }
        if !desc.r_max.is_finite() || desc.r_max <= 0.0 {
            return Err(Error::BadParameter {
                name: "r_max".to_string(),
                value: desc.r_max as f64,
            });
        }

        Ok(Self {
            points_around: desc.points_around,
            r_max: desc.r_max,
        })
    }

    /// Calculates the sample point for one element and one angular step.
    ///
    /// The point sits on a ring in the plane perpendicular to the antenna at
    /// height `element`, displaced from the axis by `r_max` times the
    /// element's net current.  The sign rides along: a negative current
    /// lands the point diametrically opposite a positive current of equal
    /// magnitude, encoding the current's direction.  `element` must be
    /// within the line; the `points_around` angular steps cover one full
    /// turn without repeating the starting point.
    #[inline]
    pub fn project(&self, line: &DelayLine, element: usize, step: usize) -> glam::Vec3 {
        let current = line.element(element).current();
        let theta = 2.0*PI * (step as f32) / (self.points_around as f32);

        glam::Vec3::new(
            self.r_max * current * f32::cos(theta),
            element as f32,
            self.r_max * current * f32::sin(theta),
        )
    }

    /// Fills `cloud` with the sample points for every element and angular
    /// step of `line`.  The cloud's slot count must match.
    pub fn project_line(&self, line: &DelayLine, cloud: &mut PointCloud) {
        for element in 0..line.length() {
            for step in 0..self.points_around {
                cloud.points[element*self.points_around + step] =
                    self.project(line, element, step);
            }
        }
    }

    /// The number of angular samples on each ring.
    #[inline]
    pub fn points_around(&self) -> usize {
        self.points_around
    }

    /// The radial displacement corresponding to unit current magnitude.
    #[inline]
    pub fn r_max(&self) -> f32 {
        self.r_max
    }
}

/// The envelope output for one tick: a sample point per
/// (element, angular step) slot.
///
/// The slot count is fixed at creation and the buffer is refilled in place,
/// so a presentation layer can bind its renderables to slots once.
pub struct PointCloud {
    points: Vec<glam::Vec3>,
    points_around: usize,
}

impl PointCloud {
    /// Creates a cloud of `length * points_around` zeroed slots.
    #[inline]
    pub fn new(length: usize, points_around: usize) -> Self {
        Self {
            points: vec![glam::Vec3::ZERO; length * points_around],
            points_around,
        }
    }

    /// The sample point for `element` at angular `step`.
    #[inline]
    pub fn point(&self, element: usize, step: usize) -> glam::Vec3 {
        self.points[element*self.points_around + step]
    }

    /// All points in element-major order.
    #[inline]
    pub fn as_slice(&self) -> &[glam::Vec3] {
        &self.points
    }

    /// The number of elements covered.
    #[inline]
    pub fn length(&self) -> usize {
        self.points.len() / self.points_around
    }

    /// The number of angular samples on each ring.
    #[inline]
    pub fn points_around(&self) -> usize {
        self.points_around
    }
}

#[cfg(test)]
mod tests {
    use super::{PointCloud, RadialProjector, RadialProjectorDescriptor};
    use crate::line::{DelayLine, DelayLineDescriptor, Element};
    use crate::Error;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn make_projector(points_around: usize, r_max: f32) -> RadialProjector {
        RadialProjector::new(RadialProjectorDescriptor {
            points_around,
            r_max,
        })
        .unwrap()
    }

    /// A line whose base element carries a known current, without ever
    /// advancing the clock.
    fn seeded_line(currents: &[f32]) -> DelayLine {
        DelayLine::new(DelayLineDescriptor {
            wavelength: 400,
            length: currents.len(),
            init_elements: Some(
                currents
                    .iter()
                    .map(|&forward| Element {
                        forward,
                        backward: 0.0,
                    })
                    .collect(),
            ),
        })
        .unwrap()
    }

    #[test]
    fn quarter_turns_land_on_the_axes() {
        let line = seeded_line(&[0.75]);
        let projector = make_projector(4, 2.0);

        // radius r_max * current = 1.5, stepped a quarter turn at a time
        let expected = [
            glam::Vec3::new(1.5, 0.0, 0.0),
            glam::Vec3::new(0.0, 0.0, 1.5),
            glam::Vec3::new(-1.5, 0.0, 0.0),
            glam::Vec3::new(0.0, 0.0, -1.5),
        ];
        for (step, &point) in expected.iter().enumerate() {
            assert!(
                projector.project(&line, 0, step).abs_diff_eq(point, 1e-6),
                "step {} landed at {:?}",
                step,
                projector.project(&line, 0, step),
            );
        }
    }

    #[test]
    fn negative_current_lands_diametrically_opposite() {
        let positive = seeded_line(&[0.75]);
        let negative = seeded_line(&[-0.75]);
        let projector = make_projector(8, 2.0);

        for step in 0..8 {
            let p = projector.project(&positive, 0, step);
            let n = projector.project(&negative, 0, step);

            assert_abs_diff_eq!(n.x, -p.x, epsilon = 1e-6);
            assert_abs_diff_eq!(n.z, -p.z, epsilon = 1e-6);
            assert_eq!(n.y, p.y);
        }
    }

    #[test]
    fn height_is_the_raw_element_index() {
        let line = seeded_line(&[0.1, 0.2, 0.3, 0.4, 0.5]);
        let projector = make_projector(6, 10.0);

        for element in 0..5 {
            assert_eq!(projector.project(&line, element, 0).y, element as f32);
        }
    }

    #[test]
    fn ring_covers_one_turn_without_repeating() {
        let line = seeded_line(&[1.0]);
        let projector = make_projector(8, 1.0);

        // all in-range steps are distinct points
        for step in 1..8 {
            let first = projector.project(&line, 0, 0);
            let other = projector.project(&line, 0, step);
            assert!(
                !first.abs_diff_eq(other, 1e-3),
                "step {} duplicated step 0",
                step,
            );
        }

        // a hypothetical step at points_around would wrap onto step 0, so
        // the sampled angles span [0, 2pi) exactly
        let wrapped = projector.project(&line, 0, 8);
        assert!(projector.project(&line, 0, 0).abs_diff_eq(wrapped, 1e-5));
    }

    #[test]
    fn projection_is_idempotent_between_ticks() {
        let mut line = seeded_line(&[0.3, -0.8]);
        let projector = make_projector(5, 3.0);

        line.advance();
        let first = projector.project(&line, 1, 3);
        let second = projector.project(&line, 1, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn first_unit_sample_projects_to_r_max_on_x() {
        // drive a fresh line two ticks: sin(0) then sin(pi/2) = 1, with no
        // backward current anywhere yet
        let mut line = DelayLine::new(DelayLineDescriptor {
            wavelength: 4,
            length: 3,
            init_elements: None,
        })
        .unwrap();
        line.advance();
        line.advance();

        let projector = make_projector(100, 100.0);

        let base = projector.project(&line, 0, 0);
        assert_relative_eq!(base.x, 100.0, epsilon = 1e-4);
        assert_eq!(base.y, 0.0);
        assert_abs_diff_eq!(base.z, 0.0, epsilon = 1e-4);

        // the sample has not propagated past the base yet
        let above = projector.project(&line, 1, 0);
        assert_abs_diff_eq!(above.x, 0.0, epsilon = 1e-6);
        assert_eq!(above.y, 1.0);
    }

    #[test]
    fn cloud_slots_are_element_major() {
        let line = seeded_line(&[0.5, -0.5, 1.0]);
        let projector = make_projector(4, 2.0);
        let mut cloud = PointCloud::new(line.length(), projector.points_around());

        projector.project_line(&line, &mut cloud);

        assert_eq!(cloud.length(), 3);
        assert_eq!(cloud.points_around(), 4);
        assert_eq!(cloud.as_slice().len(), 12);
        for element in 0..3 {
            for step in 0..4 {
                let expected = projector.project(&line, element, step);
                assert_eq!(cloud.point(element, step), expected);
                assert_eq!(cloud.as_slice()[element*4 + step], expected);
            }
        }
    }

    #[test]
    fn rejects_zero_points_around() {
        let result = RadialProjector::new(RadialProjectorDescriptor {
            points_around: 0,
            r_max: 100.0,
        });

        assert!(matches!(
            result,
            Err(Error::BadParameter { ref name, .. }) if name == "points_around"
        ));
    }

    #[test]
    fn rejects_non_positive_or_non_finite_r_max() {
        for r_max in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = RadialProjector::new(RadialProjectorDescriptor {
                points_around: 100,
                r_max,
            });

            assert!(
                matches!(
                    result,
                    Err(Error::BadParameter { ref name, .. }) if name == "r_max"
                ),
                "r_max {} was accepted",
                r_max,
            );
        }
    }
}
