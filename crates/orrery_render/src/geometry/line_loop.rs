//! Line loops and the sky triangle

use std::f32::consts::TAU;

use crate::pipeline::LineVertex;

/// One oversized triangle that covers the whole viewport in clip space
pub const FULLSCREEN_TRIANGLE: [[f32; 2]; 3] = [[-1.0, -1.0], [3.0, -1.0], [-1.0, 3.0]];

/// Unit circle in the XZ plane as a line strip
///
/// Point `i` sits at `(sin a, 0, cos a)` with `a = i / segments * 360deg`,
/// the same parameterisation orbits use. The last vertex repeats the first
/// to close the loop.
pub fn unit_circle(segments: u32) -> Vec<LineVertex> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = (i % segments) as f32 * TAU / segments as f32;
            let (s, c) = angle.sin_cos();
            LineVertex {
                position: [s, 0.0, c],
            }
        })
        .collect()
}
