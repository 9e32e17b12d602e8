//! Grid pathfinding
//!
//! Breadth-first search over walkable terrain with king moves. Diagonal
//! steps are allowed even between two wall corners.

use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::dungeon::{Level, Position};

/// Shortest walkable route from `from` to `to`
///
/// The returned path excludes `from` and ends at `to`. Neighbours are
/// expanded in a fixed order, so equal-length routes resolve the same way
/// every time.
pub fn find_path(level: &Level, from: Position, to: Position) -> Option<Vec<Position>> {
    if from == to {
        return Some(Vec::new());
    }
    if !level.is_walkable(to) {
        return None;
    }

    let mut parents: HashMap<Position, Position> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    parents.insert(from, from);

    while let Some(pos) = queue.pop_front() {
        if pos == to {
            break;
        }
        for next in pos.neighbours8() {
            if !level.is_walkable(next) || parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, pos);
            queue.push_back(next);
        }
    }

    if !parents.contains_key(&to) {
        return None;
    }
    let mut path = vec![to];
    let mut cursor = to;
    while let Some(&prev) = parents.get(&cursor) {
        if prev == from {
            break;
        }
        path.push(prev);
        cursor = prev;
    }
    path.reverse();
    Some(path)
}
