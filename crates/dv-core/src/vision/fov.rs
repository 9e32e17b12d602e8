//! Symmetric shadowcasting
//!
//! Each of the four quadrants is scanned row by row outward from the origin.
//! Slopes are kept as exact fractions so that the symmetry test never
//! depends on floating point rounding.

use hashbrown::HashSet;

use crate::dungeon::{Level, Position};

/// Set of coordinates currently in view
pub type FovSet = HashSet<Position>;

/// Rational slope `num / den`, `den > 0`
#[derive(Debug, Clone, Copy)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }
}

#[derive(Debug, Clone, Copy)]
enum Cardinal {
    North,
    East,
    South,
    West,
}

/// Maps (row depth, column) in quadrant space to map coordinates
#[derive(Debug, Clone, Copy)]
struct Quadrant {
    cardinal: Cardinal,
    origin: Position,
}

impl Quadrant {
    fn transform(&self, depth: i32, col: i32) -> Position {
        let o = self.origin;
        match self.cardinal {
            Cardinal::North => Position::new(o.x + col, o.y - depth),
            Cardinal::South => Position::new(o.x + col, o.y + depth),
            Cardinal::East => Position::new(o.x + depth, o.y + col),
            Cardinal::West => Position::new(o.x - depth, o.y + col),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    start: Slope,
    end: Slope,
}

impl Row {
    /// First column: `depth * start` rounded half up
    fn min_col(&self) -> i32 {
        (2 * self.depth * self.start.num + self.start.den).div_euclid(2 * self.start.den)
    }

    /// Last column: `depth * end` rounded half down
    fn max_col(&self) -> i32 {
        let n = 2 * self.depth * self.end.num - self.end.den;
        -(-n).div_euclid(2 * self.end.den)
    }

    fn next(&self) -> Row {
        Row {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// Whether the centre of the tile lies inside the row's sector
    fn is_symmetric(&self, col: i32) -> bool {
        col * self.start.den >= self.depth * self.start.num
            && col * self.end.den <= self.depth * self.end.num
    }
}

/// Slope of the left edge of a tile
fn tile_slope(depth: i32, col: i32) -> Slope {
    Slope::new(2 * col - 1, 2 * depth)
}

/// Compute the tiles visible from `origin` within Euclidean `radius`
///
/// Off-map coordinates count as opaque and are never reported. Opaque
/// tiles bounding the lit area are included.
pub fn compute_visible(origin: Position, radius: i32, level: &Level) -> FovSet {
    let mut visible = FovSet::new();
    if !origin.in_bounds() || radius < 0 {
        return visible;
    }
    visible.insert(origin);
    let radius_sq = radius * radius;

    for cardinal in [Cardinal::North, Cardinal::East, Cardinal::South, Cardinal::West] {
        let quadrant = Quadrant { cardinal, origin };
        let mut rows = vec![Row {
            depth: 1,
            start: Slope::new(-1, 1),
            end: Slope::new(1, 1),
        }];

        while let Some(mut row) = rows.pop() {
            if row.depth > radius {
                continue;
            }
            let mut prev_opaque: Option<bool> = None;
            for col in row.min_col()..=row.max_col() {
                let pos = quadrant.transform(row.depth, col);
                let opaque = level.is_opaque(pos);

                if (opaque || row.is_symmetric(col))
                    && pos.in_bounds()
                    && origin.distance_sq(pos) <= radius_sq
                {
                    visible.insert(pos);
                }
                match prev_opaque {
                    Some(true) if !opaque => row.start = tile_slope(row.depth, col),
                    Some(false) if opaque => {
                        let mut next = row.next();
                        next.end = tile_slope(row.depth, col);
                        rows.push(next);
                    }
                    _ => {}
                }
                prev_opaque = Some(opaque);
            }
            if prev_opaque == Some(false) {
                rows.push(row.next());
            }
        }
    }
    visible
}
