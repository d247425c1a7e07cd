//! Point generation for rasterized shapes
//!
//! These functions only produce pixel coordinates; callers decide how to
//! paint them (label a marker disk, blend an outline, ...). Coordinates may
//! fall outside any particular image and must be clipped by the caller.

use crate::geometry::Point;

/// Generate the pixels of a line segment using Bresenham's algorithm.
///
/// Both end points are included. The number of points is
/// `max(|dx|, |dy|) + 1`.
pub fn generate_line_points(p1: Point, p2: Point) -> Vec<Point> {
    if p1 == p2 {
        return vec![p1];
    }

    let dx = (p2.x - p1.x).abs();
    let dy = (p2.y - p1.y).abs();
    let sx = if p2.x > p1.x { 1 } else { -1 };
    let sy = if p2.y > p1.y { 1 } else { -1 };

    let npts = dx.max(dy) + 1;
    let mut points = Vec::with_capacity(npts as usize);
    let (mut x, mut y) = (p1.x, p1.y);

    if dx >= dy {
        let mut err = dx / 2;
        for _ in 0..npts {
            points.push(Point::new(x, y));
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        }
    } else {
        let mut err = dy / 2;
        for _ in 0..npts {
            points.push(Point::new(x, y));
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }

    points
}

/// Generate the pixels of a polyline through `vertices`.
///
/// With `close`, the last vertex is joined back to the first. Shared
/// vertices between consecutive segments appear once.
pub fn generate_polyline_points(vertices: &[Point], close: bool) -> Vec<Point> {
    match vertices.len() {
        0 => return Vec::new(),
        1 => return vec![vertices[0]],
        _ => {}
    }

    let mut points = Vec::new();
    let mut push_segment = |a: Point, b: Point| {
        let seg = generate_line_points(a, b);
        // Skip the start point when it repeats the previous segment's end
        let skip = usize::from(points.last() == Some(&a));
        points.extend_from_slice(&seg[skip..]);
    };

    for pair in vertices.windows(2) {
        push_segment(pair[0], pair[1]);
    }
    if close {
        push_segment(vertices[vertices.len() - 1], vertices[0]);
    }

    points
}

/// Generate the pixels of a filled disk centered at `center`.
///
/// A pixel belongs to the disk when its squared distance to the center is
/// at most `(radius + 0.5)^2`. Radius 0 yields the center alone; radius 1
/// yields the 3x3 square.
pub fn generate_filled_circle_points(center: Point, radius: u32) -> Vec<Point> {
    if radius == 0 {
        return vec![center];
    }

    let r = radius as i32;
    let diameter = (2 * radius + 1) as usize;
    let threshold = (radius as f32 + 0.5).powi(2);
    let mut points = Vec::with_capacity(diameter * diameter);

    for dy in -r..=r {
        for dx in -r..=r {
            if (dx * dx + dy * dy) as f32 <= threshold {
                points.push(center.offset(dx, dy));
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_single_point() {
        let p = Point::new(3, 4);
        assert_eq!(generate_line_points(p, p), vec![p]);
    }

    #[test]
    fn test_line_horizontal_and_diagonal() {
        let pts = generate_line_points(Point::new(0, 0), Point::new(3, 0));
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[3], Point::new(3, 0));

        let pts = generate_line_points(Point::new(2, 2), Point::new(0, 0));
        assert_eq!(
            pts,
            vec![Point::new(2, 2), Point::new(1, 1), Point::new(0, 0)]
        );
    }

    #[test]
    fn test_line_steep_endpoints() {
        let pts = generate_line_points(Point::new(0, 0), Point::new(2, 7));
        assert_eq!(pts.len(), 8);
        assert_eq!(pts[0], Point::new(0, 0));
        assert_eq!(pts[7], Point::new(2, 7));
    }

    #[test]
    fn test_closed_polyline_square() {
        let square = [
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(2, 2),
            Point::new(0, 2),
        ];
        let pts = generate_polyline_points(&square, true);
        // 8 boundary pixels of a 3x3 square; the closing segment ends on
        // the first vertex again
        assert_eq!(pts.len(), 9);
        assert_eq!(pts.first(), pts.last());
    }

    #[test]
    fn test_filled_circle_sizes() {
        let c = Point::new(10, 10);
        assert_eq!(generate_filled_circle_points(c, 0), vec![c]);
        // (1 + 0.5)^2 = 2.25 admits the diagonal neighbors
        assert_eq!(generate_filled_circle_points(c, 1).len(), 9);
        // (2.5)^2 = 6.25 admits |d|^2 <= 5, i.e. 5x5 minus four corners
        assert_eq!(generate_filled_circle_points(c, 2).len(), 21);
    }
}
