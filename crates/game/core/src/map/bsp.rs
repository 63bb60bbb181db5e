//! Binary space partitioning stored as a flat arena.
//!
//! Nodes reference their children by index into [`BspTree::nodes`]; the root
//! is always index 0. The tree only lives for the duration of one generation
//! pass.

use crate::config::GameConfig;
use crate::rng::GameRng;

use super::Rect;

#[derive(Clone, Debug)]
pub struct BspNode {
    pub bounds: Rect,
    pub room: Option<Rect>,
    pub children: Option<(usize, usize)>,
}

impl BspNode {
    fn leaf(bounds: Rect) -> Self {
        Self {
            bounds,
            room: None,
            children: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SplitAxis {
    /// Cut with a vertical line: left and right halves.
    Vertical,
    /// Cut with a horizontal line: top and bottom halves.
    Horizontal,
}

#[derive(Clone, Debug)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    /// Partitions `bounds` up to [`GameConfig::BSP_MAX_DEPTH`] levels deep.
    pub fn build(bounds: Rect, rng: &mut GameRng) -> Self {
        let mut tree = Self {
            nodes: vec![BspNode::leaf(bounds)],
        };
        tree.split(0, 0, rng);
        tree
    }

    pub fn nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    fn split(&mut self, index: usize, depth: u32, rng: &mut GameRng) {
        if depth >= GameConfig::BSP_MAX_DEPTH {
            return;
        }
        let bounds = self.nodes[index].bounds;
        let Some((first, second)) = Self::partition(bounds, rng) else {
            return;
        };

        let first_idx = self.nodes.len();
        self.nodes.push(BspNode::leaf(first));
        let second_idx = self.nodes.len();
        self.nodes.push(BspNode::leaf(second));
        self.nodes[index].children = Some((first_idx, second_idx));

        self.split(first_idx, depth + 1, rng);
        self.split(second_idx, depth + 1, rng);
    }

    fn partition(bounds: Rect, rng: &mut GameRng) -> Option<(Rect, Rect)> {
        let width = bounds.width();
        let height = bounds.height();

        // Longer side wins once it exceeds the other by 25%.
        let axis = if width * 4 > height * 5 {
            SplitAxis::Vertical
        } else if height * 4 > width * 5 {
            SplitAxis::Horizontal
        } else if rng.coin() {
            SplitAxis::Vertical
        } else {
            SplitAxis::Horizontal
        };

        let (length, minimum) = match axis {
            SplitAxis::Vertical => (width, GameConfig::BSP_MIN_LEAF_WIDTH),
            SplitAxis::Horizontal => (height, GameConfig::BSP_MIN_LEAF_HEIGHT),
        };
        let third = length / 3;
        let cut = third + rng.range(0, third.max(1) - 1);
        if cut < minimum || length - cut < minimum {
            return None;
        }

        Some(match axis {
            SplitAxis::Vertical => (
                Rect::new(bounds.x1, bounds.y1, bounds.x1 + cut - 1, bounds.y2),
                Rect::new(bounds.x1 + cut, bounds.y1, bounds.x2, bounds.y2),
            ),
            SplitAxis::Horizontal => (
                Rect::new(bounds.x1, bounds.y1, bounds.x2, bounds.y1 + cut - 1),
                Rect::new(bounds.x1, bounds.y1 + cut, bounds.x2, bounds.y2),
            ),
        })
    }

    /// Gives every leaf a room with at least one tile of padding.
    pub fn place_rooms(&mut self, rng: &mut GameRng) {
        for node in self.nodes.iter_mut().filter(|node| node.is_leaf()) {
            let inner = Rect::new(
                node.bounds.x1 + 1,
                node.bounds.y1 + 1,
                node.bounds.x2 - 1,
                node.bounds.y2 - 1,
            );
            if inner.width() < GameConfig::MIN_ROOM_SIZE || inner.height() < GameConfig::MIN_ROOM_SIZE {
                continue;
            }
            let width = rng.range(GameConfig::MIN_ROOM_SIZE, inner.width());
            let height = rng.range(GameConfig::MIN_ROOM_SIZE, inner.height());
            let x1 = rng.range(inner.x1, inner.x2 - width + 1);
            let y1 = rng.range(inner.y1, inner.y2 - height + 1);
            node.room = Some(Rect::new(x1, y1, x1 + width - 1, y1 + height - 1));
        }
    }

    /// Rooms of the subtree rooted at `index`, in depth-first order.
    pub fn rooms_under(&self, index: usize) -> Vec<Rect> {
        let mut rooms = Vec::new();
        let mut stack = vec![index];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if let Some(room) = node.room {
                rooms.push(room);
            }
            if let Some((first, second)) = node.children {
                stack.push(second);
                stack.push(first);
            }
        }
        rooms
    }

    /// All rooms in left-to-right leaf order.
    pub fn rooms(&self) -> Vec<Rect> {
        self.rooms_under(0)
    }

    /// `(first child, second child)` for every internal node, root first.
    pub fn internal_nodes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.iter().filter_map(|node| node.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Rect {
        Rect::new(
            1,
            1,
            GameConfig::MAP_WIDTH as i32 - 2,
            GameConfig::MAP_HEIGHT as i32 - 2,
        )
    }

    #[test]
    fn leaves_respect_minimum_size_and_tile_the_root() {
        for seed in 0..50 {
            let mut rng = GameRng::seed(seed);
            let tree = BspTree::build(root(), &mut rng);
            let mut area = 0;
            for node in tree.nodes().iter().filter(|node| node.is_leaf()) {
                assert!(node.bounds.width() >= GameConfig::BSP_MIN_LEAF_WIDTH);
                assert!(node.bounds.height() >= GameConfig::BSP_MIN_LEAF_HEIGHT);
                area += node.bounds.width() * node.bounds.height();
            }
            assert_eq!(area, root().width() * root().height());
        }
    }

    #[test]
    fn depth_is_bounded() {
        let mut rng = GameRng::seed(8);
        let tree = BspTree::build(root(), &mut rng);
        // A full tree of depth 4 has 31 nodes.
        assert!(tree.nodes().len() <= 31);
        assert!(tree.nodes().len() >= 3);
    }

    #[test]
    fn rooms_are_padded_inside_their_leaf() {
        let mut rng = GameRng::seed(21);
        let mut tree = BspTree::build(root(), &mut rng);
        tree.place_rooms(&mut rng);
        for node in tree.nodes() {
            if let Some(room) = node.room {
                assert!(room.x1 > node.bounds.x1 && room.x2 < node.bounds.x2);
                assert!(room.y1 > node.bounds.y1 && room.y2 < node.bounds.y2);
            }
        }
        assert!(tree.rooms().len() >= 2);
    }
}
