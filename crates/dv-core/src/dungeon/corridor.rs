//! Corridor carving, door placement and connectivity repair
//!
//! Corridors are L-shaped: one straight leg along each axis, meeting at a
//! corner chosen by the caller.

use log::debug;

use super::{DoorState, Level, Position, Room, Terrain};
use crate::rng::GameRng;
use crate::{COLNO, MAX_CONNECT_PASSES, ROWNO};

/// Carve a single tile, leaving non-wall terrain alone
fn dig(level: &mut Level, pos: Position) {
    // Keep the outer ring solid
    if pos.x < 1 || pos.y < 1 || pos.x >= COLNO as i32 - 1 || pos.y >= ROWNO as i32 - 1 {
        return;
    }
    if level.terrain(pos).is_wall() {
        level.set_terrain(pos, Terrain::Floor);
    }
}

/// Carve a horizontal run at row `y`
pub fn dig_horizontal(level: &mut Level, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        dig(level, Position::new(x, y));
    }
}

/// Carve a vertical run at column `x`
pub fn dig_vertical(level: &mut Level, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        dig(level, Position::new(x, y));
    }
}

/// Carve an L-shaped corridor between two points
pub fn dig_l_corridor(level: &mut Level, from: Position, to: Position, horizontal_first: bool) {
    if horizontal_first {
        dig_horizontal(level, from.x, to.x, from.y);
        dig_vertical(level, from.y, to.y, to.x);
    } else {
        dig_vertical(level, from.y, to.y, from.x);
        dig_horizontal(level, from.x, to.x, to.y);
    }
}

/// Join room centres in sequence, then add a few loops
pub fn join_rooms(level: &mut Level, rooms: &[Room], rng: &mut GameRng) {
    for pair in rooms.windows(2) {
        let horizontal_first = rng.one_in(2);
        dig_l_corridor(level, pair[0].center(), pair[1].center(), horizontal_first);
    }

    if rooms.len() < 3 {
        return;
    }
    let extra = rng.rn2(rooms.len() as u32 / 4 + 1) + 1;
    for _ in 0..extra {
        let a = rng.rn2(rooms.len() as u32) as usize;
        let b = rng.rn2(rooms.len() as u32) as usize;
        if a.abs_diff(b) < 2 {
            continue;
        }
        let horizontal_first = rng.one_in(2);
        dig_l_corridor(level, rooms[a].center(), rooms[b].center(), horizontal_first);
    }
}

/// Turn single-tile breaches in room walls into doors
///
/// A breach is a carved, non-corner ring cell whose two neighbours along the
/// wall are still wall and which opens onto a passage outside the room.
/// Secret doors appear from depth 3.
pub fn place_doors(level: &mut Level, rooms: &[Room], rng: &mut GameRng) {
    let mut doors = Vec::new();
    for room in rooms {
        for pos in room.wall_ring() {
            if level.terrain(pos) != Terrain::Floor {
                continue;
            }
            let on_horizontal = pos.y == room.y - 1 || pos.y == room.y + room.height;
            let (along, outward) = if on_horizontal {
                let dy = if pos.y < room.y { -1 } else { 1 };
                ([pos.offset(-1, 0), pos.offset(1, 0)], pos.offset(0, dy))
            } else {
                let dx = if pos.x < room.x { -1 } else { 1 };
                ([pos.offset(0, -1), pos.offset(0, 1)], pos.offset(dx, 0))
            };
            let single = along.iter().all(|p| level.terrain(*p).is_wall());
            if single && level.terrain(outward).is_passage() {
                doors.push(pos);
            }
        }
    }

    for pos in doors {
        let state = if level.depth >= 3 && rng.one_in(8) {
            DoorState::Secret
        } else if rng.one_in(2) {
            DoorState::Open
        } else {
            DoorState::Closed
        };
        level.set_terrain(pos, Terrain::Door(state));
    }
}

/// Dig connectors from stranded passages to the reachable region
///
/// Each pass picks the first stranded tile in scan order and digs toward
/// the nearest reachable tile. Returns whether the level ended up connected.
pub fn connect_components(level: &mut Level, start: Position, rng: &mut GameRng) -> bool {
    for pass in 0..MAX_CONNECT_PASSES {
        let reached = level.flood_fill(start);
        let Some(stranded) = level
            .positions()
            .find(|p| level.terrain(*p).is_passage() && !reached.contains(p))
        else {
            return true;
        };
        let Some(target) = reached
            .iter()
            .copied()
            .min_by_key(|p| (p.manhattan(stranded), *p))
        else {
            return false;
        };
        debug!("connect pass {pass}: joining {stranded} to {target}");
        dig_l_corridor(level, stranded, target, rng.one_in(2));
    }
    level.unreachable_from(start).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carve(level: &mut Level, room: &Room) {
        for pos in room.floor() {
            level.set_terrain(pos, Terrain::Floor);
        }
    }

    #[test]
    fn test_l_corridor_links_endpoints() {
        let mut level = Level::new(1, 0);
        let a = Position::new(5, 5);
        let b = Position::new(20, 15);
        dig_l_corridor(&mut level, a, b, true);
        assert_eq!(level.terrain(Position::new(20, 5)), Terrain::Floor, "corner");
        assert!(level.flood_fill(a).contains(&b));

        let mut level = Level::new(1, 0);
        dig_l_corridor(&mut level, a, b, false);
        assert_eq!(level.terrain(Position::new(5, 15)), Terrain::Floor, "corner");
    }

    #[test]
    fn test_dig_keeps_border() {
        let mut level = Level::new(1, 0);
        dig_horizontal(&mut level, 0, COLNO as i32 - 1, 3);
        assert!(level.terrain(Position::new(0, 3)).is_wall());
        assert!(level.terrain(Position::new(COLNO as i32 - 1, 3)).is_wall());
        assert_eq!(level.terrain(Position::new(1, 3)), Terrain::Floor);
    }

    #[test]
    fn test_dig_preserves_doors() {
        let mut level = Level::new(1, 0);
        let door = Position::new(6, 6);
        level.set_terrain(door, Terrain::Door(DoorState::Closed));
        dig_horizontal(&mut level, 2, 10, 6);
        assert_eq!(level.terrain(door), Terrain::Door(DoorState::Closed));
    }

    #[test]
    fn test_place_doors_on_breach() {
        let mut level = Level::new(1, 0);
        let left = Room::new(3, 3, 4, 4);
        let right = Room::new(12, 3, 4, 4);
        carve(&mut level, &left);
        carve(&mut level, &right);
        let mut rng = GameRng::new(1);
        dig_l_corridor(&mut level, left.center(), right.center(), true);
        place_doors(&mut level, &[left, right], &mut rng);

        let door_left = Position::new(7, left.center().y);
        let door_right = Position::new(11, left.center().y);
        assert!(level.terrain(door_left).is_door(), "{:?}", level.terrain(door_left));
        assert!(level.terrain(door_right).is_door());
        // Depth 1 never hides doors
        assert_ne!(level.terrain(door_left), Terrain::Door(DoorState::Secret));
    }

    #[test]
    fn test_connect_components_repairs_islands() {
        let mut level = Level::new(1, 0);
        let rooms = [
            Room::new(3, 3, 4, 4),
            Room::new(30, 10, 5, 5),
            Room::new(60, 30, 6, 4),
        ];
        for room in &rooms {
            carve(&mut level, room);
        }
        let mut rng = GameRng::new(9);
        assert!(connect_components(&mut level, rooms[0].center(), &mut rng));
        for room in &rooms {
            assert!(level.flood_fill(rooms[0].center()).contains(&room.center()));
        }
    }
}
