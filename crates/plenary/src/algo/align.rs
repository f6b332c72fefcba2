//! Rotation/mirroring of consecutive period layouts.
//!
//! PCA axes are only defined up to sign and order, so two periods with nearly identical votes
//! can come out rotated or reflected against each other. Each period is turned to minimize the
//! size-weighted squared displacement ("energy") of the parties it shares with the previous,
//! already aligned, period. The transform is rigid: rotation about the plot origin plus an
//! optional reflection of the x axis, never a scale or translation.

use nalgebra as na;

use crate::error::{Error, Result};
use crate::model::{PeriodLayout, Point};

/// `|denominator|` below this takes the quarter-turn branch.
pub const DEGENERATE_EPSILON: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Negate x before rotating.
    pub mirror: bool,
    /// Counter-clockwise rotation, degrees.
    pub degrees: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        mirror: false,
        degrees: 0.0,
    };

    pub fn matrix(self) -> na::Matrix2<f64> {
        let (s, c) = self.degrees.to_radians().sin_cos();
        let rotation = na::Matrix2::new(c, -s, s, c);
        if self.mirror {
            rotation * na::Matrix2::new(-1.0, 0.0, 0.0, 1.0)
        } else {
            rotation
        }
    }

    pub fn apply(self, p: Point) -> Point {
        let v = self.matrix() * na::Vector2::new(p.x, p.y);
        Point::new(v.x, v.y)
    }
}

/// Parties active in both periods.
pub fn shared_parties(fixed: &PeriodLayout, mine: &PeriodLayout) -> Vec<usize> {
    (0..fixed.len().min(mine.len()))
        .filter(|&i| fixed.is_active(i) && mine.is_active(i))
        .collect()
}

/// Weighted squared displacement between `fixed` and `mine` once `t` is applied to `mine`.
/// Weights are the party sizes of `mine`.
pub fn energy(fixed: &PeriodLayout, mine: &PeriodLayout, shared: &[usize], t: Transform) -> f64 {
    let m = t.matrix();
    shared
        .iter()
        .map(|&i| {
            let p = mine.positions[i];
            let v = m * na::Vector2::new(p.x, p.y);
            let moved = Point::new(v.x, v.y);
            mine.sizes[i] as f64 * fixed.positions[i].distance_squared(moved)
        })
        .sum()
}

/// The two stationary angles (degrees) of the unmirrored energy.
///
/// The energy of a rotation by `theta` is `C - 2 (den cos(theta) + num sin(theta))`, so its
/// minimum sits at `atan(num / den)` or half a turn from it.
pub fn candidate_angles(fixed: &PeriodLayout, mine: &PeriodLayout, shared: &[usize]) -> (f64, f64) {
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for &i in shared {
        let (r_mine, a_mine) = mine.positions[i].polar();
        let (r_fixed, a_fixed) = fixed.positions[i].polar();
        let w = mine.sizes[i] as f64 * r_mine * r_fixed;
        let delta = a_fixed - a_mine;
        numerator += w * delta.sin();
        denominator += w * delta.cos();
    }

    if denominator.abs() < DEGENERATE_EPSILON {
        return (90.0, 270.0);
    }
    let theta = (numerator / denominator).atan().to_degrees();
    (theta, theta + 180.0)
}

fn check_shape(reference: &PeriodLayout, layout: &PeriodLayout) -> Result<()> {
    for found in [layout.positions.len(), layout.sizes.len(), reference.sizes.len()] {
        if found != reference.len() {
            return Err(Error::LayoutMismatch {
                period: layout.label.clone(),
                expected: reference.len(),
                found,
            });
        }
    }
    Ok(())
}

/// The minimum-energy transform of `mine` against `fixed`.
pub fn best_transform(fixed: &PeriodLayout, mine: &PeriodLayout) -> Result<Transform> {
    check_shape(fixed, mine)?;

    let shared = shared_parties(fixed, mine);
    if shared.is_empty() {
        return Err(Error::NoSharedParties {
            period: mine.label.clone(),
            previous: fixed.label.clone(),
        });
    }

    let (theta1, theta2) = candidate_angles(fixed, mine, &shared);
    let candidates = [
        Transform {
            mirror: false,
            degrees: theta1,
        },
        Transform {
            mirror: false,
            degrees: theta2,
        },
        Transform {
            mirror: true,
            degrees: theta1,
        },
        Transform {
            mirror: true,
            degrees: theta2,
        },
    ];

    let mut best = candidates[0];
    let mut best_energy = energy(fixed, mine, &shared, best);
    for &t in &candidates[1..] {
        let e = energy(fixed, mine, &shared, t);
        if e < best_energy {
            best = t;
            best_energy = e;
        }
    }

    tracing::debug!(
        period = %mine.label,
        previous = %fixed.label,
        shared = shared.len(),
        degrees = best.degrees,
        mirror = best.mirror,
        energy = best_energy,
        "aligned period"
    );
    Ok(best)
}

/// A copy of `mine` turned onto `fixed`. Every party moves, shared or not.
pub fn align(fixed: &PeriodLayout, mine: &PeriodLayout) -> Result<PeriodLayout> {
    let t = best_transform(fixed, mine)?;
    Ok(PeriodLayout {
        label: mine.label.clone(),
        positions: mine.positions.iter().map(|&p| t.apply(p)).collect(),
        sizes: mine.sizes.clone(),
    })
}

/// Aligns every layout against its already aligned predecessor. The first one is the reference
/// and is returned unchanged.
pub fn align_sequence(layouts: Vec<PeriodLayout>) -> Result<Vec<PeriodLayout>> {
    let mut out: Vec<PeriodLayout> = Vec::with_capacity(layouts.len());
    for layout in layouts {
        let next = match out.last() {
            None => layout,
            Some(previous) => align(previous, &layout)?,
        };
        out.push(next);
    }
    Ok(out)
}
