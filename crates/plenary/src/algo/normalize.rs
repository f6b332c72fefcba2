use nalgebra::DMatrix;

use crate::model::Point;

/// Maps a unit PCA score onto the `[0, 100]` plot range. Scores beyond `±1` are not clamped.
pub const DISPLAY_SCALE: f64 = 50.0;
pub const DISPLAY_OFFSET: f64 = 50.0;

fn to_display(score: f64) -> f64 {
    score * DISPLAY_SCALE + DISPLAY_OFFSET
}

/// Display coordinates from the first two components of every party.
///
/// With a single roll call there is only one component and the second axis sits at the
/// midpoint. With no roll call at all every party is placed at the `(0, 0)` sentinel.
pub fn display_coordinates(scores: &DMatrix<f64>, roll_calls: usize) -> Vec<Point> {
    let n = scores.nrows();
    match roll_calls {
        0 => vec![Point::new(0.0, 0.0); n],
        1 => (0..n)
            .map(|i| Point::new(to_display(scores[(i, 0)]), to_display(0.0)))
            .collect(),
        _ => (0..n)
            .map(|i| Point::new(to_display(scores[(i, 0)]), to_display(scores[(i, 1)])))
            .collect(),
    }
}
