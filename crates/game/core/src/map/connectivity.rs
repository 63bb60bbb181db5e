//! Breadth-first reachability over walkable tiles.

use std::collections::VecDeque;

use crate::state::Position;

use super::TileGrid;

const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Returns true when `to` can be reached from `from` through orthogonal steps
/// over Floor/Portal tiles.
pub fn is_reachable(grid: &TileGrid, from: Position, to: Position) -> bool {
    if !grid.is_walkable(from) || !grid.is_walkable(to) {
        return false;
    }
    if from == to {
        return true;
    }

    let width = grid.width() as usize;
    let mut visited = vec![false; width * grid.height() as usize];
    let mut queue = VecDeque::new();
    visited[from.y as usize * width + from.x as usize] = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS {
            let next = current.offset(dx, dy);
            if !grid.is_walkable(next) {
                continue;
            }
            let idx = next.y as usize * width + next.x as usize;
            if visited[idx] {
                continue;
            }
            if next == to {
                return true;
            }
            visited[idx] = true;
            queue.push_back(next);
        }
    }
    false
}

/// Number of walkable tiles reachable from `from`, including itself.
pub fn reachable_count(grid: &TileGrid, from: Position) -> usize {
    if !grid.is_walkable(from) {
        return 0;
    }
    let width = grid.width() as usize;
    let mut visited = vec![false; width * grid.height() as usize];
    let mut queue = VecDeque::from([from]);
    visited[from.y as usize * width + from.x as usize] = true;
    let mut count = 1;

    while let Some(current) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS {
            let next = current.offset(dx, dy);
            if !grid.is_walkable(next) {
                continue;
            }
            let idx = next.y as usize * width + next.x as usize;
            if !visited[idx] {
                visited[idx] = true;
                count += 1;
                queue.push_back(next);
            }
        }
    }
    count
}
