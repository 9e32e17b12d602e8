//! Rectangular rooms

use serde::{Deserialize, Serialize};

use super::Position;
use crate::rng::GameRng;

/// A room: rectangle of floor surrounded by a one-tile wall ring
///
/// `x`, `y`, `width` and `height` describe the floor interior; the wall ring
/// lies just outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    /// Create a new room
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether the rooms, each grown by `buffer` tiles, intersect
    pub fn overlaps(&self, other: &Room, buffer: i32) -> bool {
        let x1 = self.x - buffer;
        let y1 = self.y - buffer;
        let x2 = self.x + self.width + buffer;
        let y2 = self.y + self.height + buffer;

        let ox1 = other.x - buffer;
        let oy1 = other.y - buffer;
        let ox2 = other.x + other.width + buffer;
        let oy2 = other.y + other.height + buffer;

        !(x2 <= ox1 || x1 >= ox2 || y2 <= oy1 || y1 >= oy2)
    }

    /// Get center point of room
    pub const fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is on the room's floor
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }

    /// Check if a point is on the wall ring
    pub fn on_wall(&self, pos: Position) -> bool {
        let inside_ring = pos.x >= self.x - 1
            && pos.x <= self.x + self.width
            && pos.y >= self.y - 1
            && pos.y <= self.y + self.height;
        inside_ring && !self.contains(pos)
    }

    /// Check if a point is one of the four ring corners
    pub fn is_corner(&self, pos: Position) -> bool {
        (pos.x == self.x - 1 || pos.x == self.x + self.width)
            && (pos.y == self.y - 1 || pos.y == self.y + self.height)
    }

    /// Get a random floor point in the room
    pub fn random_point(&self, rng: &mut GameRng) -> Position {
        let x = self.x + rng.rn2(self.width as u32) as i32;
        let y = self.y + rng.rn2(self.height as u32) as i32;
        Position::new(x, y)
    }

    /// Get room area (floor tiles)
    pub const fn area(&self) -> i32 {
        self.width * self.height
    }

    /// All floor positions, row by row
    pub fn floor(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Position::new(x, y)))
    }

    /// Wall ring positions excluding the corners
    pub fn wall_ring(&self) -> impl Iterator<Item = Position> + '_ {
        let top = self.y - 1;
        let bottom = self.y + self.height;
        let left = self.x - 1;
        let right = self.x + self.width;
        let horizontal = (self.x..right).flat_map(move |x| [Position::new(x, top), Position::new(x, bottom)]);
        let vertical = (self.y..bottom).flat_map(move |y| [Position::new(left, y), Position::new(right, y)]);
        horizontal.chain(vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_overlap() {
        let r1 = Room::new(5, 5, 5, 5);
        let r2 = Room::new(8, 8, 5, 5);
        let r3 = Room::new(20, 20, 5, 5);

        assert!(r1.overlaps(&r2, 0));
        assert!(!r1.overlaps(&r3, 0));
    }

    #[test]
    fn test_buffer_keeps_walls_apart() {
        let r1 = Room::new(5, 5, 4, 4);
        // Interior ends at x=8, wall at x=9; second wall at x=10 would touch
        let touching = Room::new(11, 5, 4, 4);
        let spaced = Room::new(13, 5, 4, 4);
        assert!(r1.overlaps(&touching, 2));
        assert!(!r1.overlaps(&spaced, 2));
    }

    #[test]
    fn test_room_center_and_contains() {
        let room = Room::new(10, 5, 6, 4);
        assert_eq!(room.center(), Position::new(13, 7));
        assert!(room.contains(Position::new(10, 5)));
        assert!(room.contains(Position::new(15, 8)));
        assert!(!room.contains(Position::new(16, 8)));
    }

    #[test]
    fn test_wall_ring() {
        let room = Room::new(3, 3, 4, 2);
        let ring: Vec<_> = room.wall_ring().collect();
        assert_eq!(ring.len(), 2 * 4 + 2 * 2);
        assert!(ring.iter().all(|p| room.on_wall(*p) && !room.is_corner(*p)));
        assert!(room.is_corner(Position::new(2, 2)));
        assert!(room.is_corner(Position::new(7, 5)));
    }

    #[test]
    fn test_random_point_in_room() {
        let mut rng = GameRng::new(42);
        let room = Room::new(10, 5, 6, 4);
        for _ in 0..100 {
            assert!(room.contains(room.random_point(&mut rng)));
        }
        assert_eq!(room.floor().count() as i32, room.area());
    }
}
