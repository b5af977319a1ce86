//! Bounded line segment with midpoint/half-extent parametrization
//!
//! A segment spans `origin - extent * direction` to
//! `origin + extent * direction`. Closest-distance queries use Eberly's
//! region-based analysis: the constrained minimization is split into
//! discrete geometric regions (interior, edges, corners), each with its own
//! closed-form solution.

use crate::consts;
use crate::ray::Ray;
use crate::vector::Vec3;

/// Bounded segment: origin, direction, and a non-negative half-extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct LineSegment {
    pub origin: Vec3,
    pub direction: Vec3,
    extent: f32,
}

impl LineSegment {
    /// Create a segment. A negative extent is canonicalized to the
    /// equivalent positive-extent segment with flipped direction, so
    /// `extent()` is always non-negative.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3, extent: f32) -> Self {
        if extent < 0.0 {
            Self {
                origin,
                direction: -direction,
                extent: -extent,
            }
        } else {
            Self {
                origin,
                direction,
                extent,
            }
        }
    }

    /// Segment between two end points; the stored direction is unit length.
    pub fn from_end_points(start: Vec3, end: Vec3) -> Self {
        let half = (end - start) * 0.5;
        Self {
            origin: start + half,
            direction: half.normalize(),
            extent: half.length(),
        }
    }

    #[inline]
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Set the half-extent, canonicalizing a negative value by flipping the
    /// direction.
    pub fn set_extent(&mut self, extent: f32) {
        if extent < 0.0 {
            self.direction = -self.direction;
            self.extent = -extent;
        } else {
            self.extent = extent;
        }
    }

    /// `origin + extent * direction`
    #[inline]
    pub fn positive_end(&self) -> Vec3 {
        self.origin + self.direction * self.extent
    }

    /// `origin - extent * direction`
    #[inline]
    pub fn negative_end(&self) -> Vec3 {
        self.origin - self.direction * self.extent
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.distance_squared_to_point(point).sqrt()
    }

    pub fn distance_to_segment(&self, other: &Self) -> f32 {
        self.distance_squared_to_segment(other).sqrt()
    }

    pub fn distance_to_ray(&self, ray: &Ray) -> f32 {
        self.distance_squared_to_ray(ray).sqrt()
    }

    /// Squared distance from a point to the segment: project onto the
    /// direction, clamp the parameter to `[-extent, extent]`.
    pub fn distance_squared_to_point(&self, point: Vec3) -> f32 {
        let diff = point - self.origin;
        let segment_parameter = self.direction.dot(diff);

        let closest = if -self.extent < segment_parameter {
            if segment_parameter < self.extent {
                self.origin + self.direction * segment_parameter
            } else {
                self.positive_end()
            }
        } else {
            self.negative_end()
        };

        (closest - point).length_squared()
    }

    /// Squared distance between two bounded segments.
    ///
    /// Non-parallel segments classify into one of nine regions (interior,
    /// four edges, four corners) by where the unconstrained minimum falls
    /// relative to each extent, clamping and re-solving per region. Parallel
    /// segments use the symmetric averaged-projection form, clamped by the
    /// combined extents. Symmetric in its arguments; the result is passed
    /// through `abs` to absorb tiny negative values from cancellation.
    pub fn distance_squared_to_segment(&self, test: &Self) -> f32 {
        let diff = self.origin - test.origin;
        let negative_direction_dot = -self.direction.dot(test.direction);
        let diff_this_dot = diff.dot(self.direction);
        let diff_test_dot = -diff.dot(test.direction);
        let length_of_diff = diff.length_squared();
        let determinant = (1.0 - negative_direction_dot * negative_direction_dot).abs();

        let square_distance = if determinant >= consts::FLT_EPSILON {
            // segments are not parallel
            let s0 = negative_direction_dot * diff_test_dot - diff_this_dot;
            let s1 = negative_direction_dot * diff_this_dot - diff_test_dot;
            let extent_determinant0 = self.extent * determinant;
            let extent_determinant1 = test.extent * determinant;

            let solve_fixed_s1 = |s1: f32| {
                solve_one_fixed(
                    s1,
                    negative_direction_dot,
                    diff_this_dot,
                    diff_test_dot,
                    self.extent,
                    length_of_diff,
                )
            };
            let solve_fixed_s0 = |s0: f32| {
                solve_one_fixed(
                    s0,
                    negative_direction_dot,
                    diff_test_dot,
                    diff_this_dot,
                    test.extent,
                    length_of_diff,
                )
            };

            if s0 >= -extent_determinant0 {
                if s0 <= extent_determinant0 {
                    if s1 >= -extent_determinant1 {
                        if s1 <= extent_determinant1 {
                            // region 0 (interior): minimum between the
                            // two interior points of the carrying lines
                            let inverse_determinant = 1.0 / determinant;
                            let s0 = s0 * inverse_determinant;
                            let s1 = s1 * inverse_determinant;
                            s0 * (s0 + negative_direction_dot * s1 + 2.0 * diff_this_dot)
                                + s1 * (negative_direction_dot * s0 + s1 + 2.0 * diff_test_dot)
                                + length_of_diff
                        } else {
                            // region 3 (side)
                            solve_fixed_s1(test.extent)
                        }
                    } else {
                        // region 7 (side)
                        solve_fixed_s1(-test.extent)
                    }
                } else if s1 >= -extent_determinant1 {
                    if s1 <= extent_determinant1 {
                        // region 1 (side)
                        solve_fixed_s0(self.extent)
                    } else {
                        // region 2 (corner)
                        let s1 = test.extent;
                        let temp_s0 = -(negative_direction_dot * s1 + diff_this_dot);
                        if temp_s0 < -self.extent {
                            fixed_pair(-self.extent, temp_s0, s1, diff_test_dot, length_of_diff)
                        } else if temp_s0 <= self.extent {
                            -temp_s0 * temp_s0
                                + s1 * (s1 + 2.0 * diff_test_dot)
                                + length_of_diff
                        } else {
                            solve_fixed_s0(self.extent)
                        }
                    }
                } else {
                    // region 8 (corner)
                    let s1 = -test.extent;
                    let temp_s0 = -(negative_direction_dot * s1 + diff_this_dot);
                    if temp_s0 < -self.extent {
                        fixed_pair(-self.extent, temp_s0, s1, diff_test_dot, length_of_diff)
                    } else if temp_s0 <= self.extent {
                        -temp_s0 * temp_s0 + s1 * (s1 + 2.0 * diff_test_dot) + length_of_diff
                    } else {
                        solve_fixed_s0(self.extent)
                    }
                }
            } else if s1 >= -extent_determinant1 {
                if s1 <= extent_determinant1 {
                    // region 5 (side)
                    solve_fixed_s0(-self.extent)
                } else {
                    // region 4 (corner)
                    let s1 = test.extent;
                    let temp_s0 = -(negative_direction_dot * s1 + diff_this_dot);
                    if temp_s0 > self.extent {
                        fixed_pair(self.extent, temp_s0, s1, diff_test_dot, length_of_diff)
                    } else if temp_s0 >= -self.extent {
                        -temp_s0 * temp_s0 + s1 * (s1 + 2.0 * diff_test_dot) + length_of_diff
                    } else {
                        solve_fixed_s0(-self.extent)
                    }
                }
            } else {
                // region 6 (corner)
                let s1 = -test.extent;
                let temp_s0 = -(negative_direction_dot * s1 + diff_this_dot);
                if temp_s0 > self.extent {
                    fixed_pair(self.extent, temp_s0, s1, diff_test_dot, length_of_diff)
                } else if temp_s0 >= -self.extent {
                    -temp_s0 * temp_s0 + s1 * (s1 + 2.0 * diff_test_dot) + length_of_diff
                } else {
                    solve_fixed_s0(-self.extent)
                }
            }
        } else {
            // The segments are parallel. The averaged b0 term keeps the
            // function symmetric: dist(seg0, seg1) == dist(seg1, seg0).
            let extent_sum = self.extent + test.extent;
            let sign = if negative_direction_dot > 0.0 { -1.0 } else { 1.0 };
            let average_b0 = 0.5 * (diff_this_dot - sign * diff_test_dot);
            let lambda = (-average_b0).clamp(-extent_sum, extent_sum);
            lambda * (lambda + 2.0 * average_b0) + length_of_diff
        };

        square_distance.abs()
    }

    /// Squared distance between this segment and a ray.
    ///
    /// The analogous, asymmetric region analysis: the ray parameter has no
    /// negative side, so only five non-parallel regions exist.
    pub fn distance_squared_to_ray(&self, ray: &Ray) -> f32 {
        let diff = ray.origin - self.origin;
        let a01 = -ray.direction.dot(self.direction);
        let b0 = diff.dot(ray.direction);
        let b1 = -diff.dot(self.direction);
        let c = diff.length_squared();
        let det = (1.0 - a01 * a01).abs();

        let square_distance = if det >= consts::FLT_EPSILON {
            // ray and segment are not parallel
            let s0 = a01 * b1 - b0;
            let s1 = a01 * b0 - b1;
            let ext_det = self.extent * det;

            if s0 >= 0.0 {
                if s1 >= -ext_det {
                    if s1 <= ext_det {
                        // region 0: interior points of ray and segment
                        let inv_det = 1.0 / det;
                        let s0 = s0 * inv_det;
                        let s1 = s1 * inv_det;
                        s0 * (s0 + a01 * s1 + 2.0 * b0)
                            + s1 * (a01 * s0 + s1 + 2.0 * b1)
                            + c
                    } else {
                        // region 1
                        ray_side(self.extent, a01, b0, b1, c)
                    }
                } else {
                    // region 5
                    ray_side(-self.extent, a01, b0, b1, c)
                }
            } else if s1 <= -ext_det {
                // region 4
                let s0 = -(-a01 * self.extent + b0);
                if s0 > 0.0 {
                    let s1 = -self.extent;
                    -s0 * s0 + s1 * (s1 + 2.0 * b1) + c
                } else {
                    clamped_origin(self.extent, b1, c)
                }
            } else if s1 <= ext_det {
                // region 3
                clamped_origin(self.extent, b1, c)
            } else {
                // region 2
                let s0 = -(a01 * self.extent + b0);
                if s0 > 0.0 {
                    let s1 = self.extent;
                    -s0 * s0 + s1 * (s1 + 2.0 * b1) + c
                } else {
                    clamped_origin(self.extent, b1, c)
                }
            }
        } else {
            // ray and segment are parallel; pick the segment end facing
            // against or along the ray direction
            let s1 = if a01 > 0.0 { -self.extent } else { self.extent };
            let s0 = -(a01 * s1 + b0);
            if s0 > 0.0 {
                -s0 * s0 + s1 * (s1 + 2.0 * b1) + c
            } else {
                s1 * (s1 + 2.0 * b1) + c
            }
        };

        square_distance.abs()
    }
}

/// One segment parameter pinned to `fixed`; solve for the other, clamping
/// to `[-extent, extent]`. `b_fixed`/`b_free` are the diff-dot terms of the
/// pinned and free segments respectively.
fn solve_one_fixed(
    fixed: f32,
    negative_direction_dot: f32,
    b_free: f32,
    b_fixed: f32,
    extent: f32,
    length_of_diff: f32,
) -> f32 {
    let temp = -(negative_direction_dot * fixed + b_free);
    if temp < -extent {
        fixed_pair(-extent, temp, fixed, b_fixed, length_of_diff)
    } else if temp <= extent {
        -temp * temp + fixed * (fixed + 2.0 * b_fixed) + length_of_diff
    } else {
        fixed_pair(extent, temp, fixed, b_fixed, length_of_diff)
    }
}

/// Both parameters pinned: `s` clamped after the unconstrained solve
/// `temp`, the other segment held at `other`.
#[inline]
fn fixed_pair(s: f32, temp: f32, other: f32, b_other: f32, length_of_diff: f32) -> f32 {
    s * (s - 2.0 * temp) + other * (other + 2.0 * b_other) + length_of_diff
}

/// Ray regions 1/5: segment parameter pinned at `s1`, ray parameter
/// clamped at its origin when the solve goes negative.
#[inline]
fn ray_side(s1: f32, a01: f32, b0: f32, b1: f32, c: f32) -> f32 {
    let s0 = -(a01 * s1 + b0);
    if s0 > 0.0 {
        -s0 * s0 + s1 * (s1 + 2.0 * b1) + c
    } else {
        s1 * (s1 + 2.0 * b1) + c
    }
}

/// Ray regions 2/3/4 fallback: ray parameter at the origin, segment
/// parameter `-b1` clamped to the extent.
#[inline]
fn clamped_origin(extent: f32, b1: f32, c: f32) -> f32 {
    let s1 = (-b1).clamp(-extent, extent);
    s1 * (s1 + 2.0 * b1) + c
}
