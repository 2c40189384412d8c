//! Smoothed freehand path construction.

use crate::util::{Point, fmt_num};

/// One drawing command of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic Bézier curve with a single control point
    QuadTo { control: Point, to: Point },
}

/// A freehand stroke rendered as chained quadratic curves.
///
/// For recorded points P0..Pn the path moves to P0, then for every interior
/// point Pi emits a curve controlled by Pi ending at the midpoint of Pi and
/// Pi+1, and finishes with a curve controlled by Pn-1 ending exactly at Pn.
/// Consecutive curves therefore share tangents at the midpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothPath {
    pub commands: Vec<PathCommand>,
}

impl SmoothPath {
    /// Builds the smoothed path through `points`.
    ///
    /// One point yields a stationary path (a lone move), two points a
    /// straight segment.
    pub fn through(points: &[Point]) -> Self {
        let mut commands = Vec::with_capacity(points.len());

        match points {
            [] => {}
            [only] => commands.push(PathCommand::MoveTo(*only)),
            [first, second] => {
                commands.push(PathCommand::MoveTo(*first));
                commands.push(PathCommand::LineTo(*second));
            }
            [first, .., second_last, last] => {
                commands.push(PathCommand::MoveTo(*first));
                for pair in points[1..].windows(2) {
                    commands.push(PathCommand::QuadTo {
                        control: pair[0],
                        to: pair[0].midpoint(pair[1]),
                    });
                }
                // Tail curve lands exactly on the final recorded point.
                commands.push(PathCommand::QuadTo {
                    control: *second_last,
                    to: *last,
                });
            }
        }

        Self { commands }
    }

    /// Serialises to SVG path data, e.g. `M 0 0 Q 10 0, 10 5`.
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for command in &self.commands {
            if !data.is_empty() {
                data.push(' ');
            }
            match command {
                PathCommand::MoveTo(p) => {
                    data.push_str(&format!("M {} {}", fmt_num(p.x), fmt_num(p.y)));
                }
                PathCommand::LineTo(p) => {
                    data.push_str(&format!("L {} {}", fmt_num(p.x), fmt_num(p.y)));
                }
                PathCommand::QuadTo { control, to } => {
                    data.push_str(&format!(
                        "Q {} {}, {} {}",
                        fmt_num(control.x),
                        fmt_num(control.y),
                        fmt_num(to.x),
                        fmt_num(to.y)
                    ));
                }
            }
        }
        data
    }
}
