//! Read-only snapshot of what a renderer needs to draw one frame.
//!
//! The view is rebuilt from the session after every intent. Renderers never
//! touch [`GameSession`] directly, so they cannot mutate simulation state.

use game_core::{
    Actor, ActorRef, Appearance, BuffKind, EntityId, ItemKind, Position, TileKind,
};

use crate::config::MessageConfig;
use crate::simulation::GameSession;

/// Which modal screen, if any, sits on top of the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    Inventory,
    Help,
    GameOver,
}

/// What a render-list entry stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderKind {
    Item(ItemKind),
    Actor(ActorRef),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderEntity {
    pub position: Position,
    pub appearance: Appearance,
    pub kind: RenderKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryLine {
    pub slot: usize,
    pub name: String,
    pub quantity: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuffLine {
    pub kind: BuffKind,
    pub magnitude: i32,
    pub remaining: u32,
}

/// Player stats shown beside the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    pub depth: u32,
    pub biome: &'static str,
    pub turn: u64,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub kills: u32,
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub buffs: Vec<BuffLine>,
    pub companions: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameView {
    pub width: u32,
    pub height: u32,
    /// Row-major, stairs already rendered as [`TileKind::StairsDown`].
    pub tiles: Vec<TileKind>,
    /// Draw order: items, monsters, summons, then the player on top.
    pub entities: Vec<RenderEntity>,
    pub messages: Vec<String>,
    pub inventory: Vec<InventoryLine>,
    pub hud: Hud,
    pub overlay: Overlay,
}

impl GameView {
    pub fn capture(session: &GameSession, overlay: Overlay) -> Self {
        let level = &session.level;
        let width = level.grid.width();
        let height = level.grid.height();

        let tiles = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .map(|position| level.tile_at(position))
            .collect();

        let items = level.items.iter().map(|floor| RenderEntity {
            position: floor.position,
            appearance: floor.item.appearance(),
            kind: RenderKind::Item(floor.item.kind),
        });
        let monsters = level
            .monsters
            .iter()
            .filter(|monster| monster.is_alive())
            .map(|monster| RenderEntity {
                position: monster.position,
                appearance: monster.appearance(),
                kind: RenderKind::Actor(ActorRef::Monster(monster.id)),
            });
        let summons = session
            .summons
            .iter()
            .filter(|summon| summon.is_alive())
            .map(|summon| RenderEntity {
                position: summon.position,
                appearance: summon.appearance(),
                kind: RenderKind::Actor(ActorRef::Summon(summon.id)),
            });
        let player = std::iter::once(RenderEntity {
            position: session.player.position,
            appearance: session.player.appearance(),
            kind: RenderKind::Actor(ActorRef::Player),
        });
        let entities = items.chain(monsters).chain(summons).chain(player).collect();

        let messages = session
            .messages
            .recent(MessageConfig::VISIBLE)
            .map(str::to_owned)
            .collect();

        let inventory = session
            .player
            .inventory()
            .iter()
            .enumerate()
            .map(|(slot, item)| InventoryLine {
                slot,
                name: item.name(),
                quantity: item.quantity,
            })
            .collect();

        let player = &session.player;
        let hud = Hud {
            depth: session.depth,
            biome: level.biome.name(),
            turn: session.turn,
            hp: player.hp(),
            max_hp: player.max_hp(),
            attack: player.attack(),
            defense: player.defense(),
            kills: player.counters.kills,
            weapon: player.weapon().map(|item| item.name()),
            armor: player.armor().map(|item| item.name()),
            buffs: player
                .buffs()
                .iter()
                .map(|buff| BuffLine {
                    kind: buff.kind,
                    magnitude: buff.magnitude,
                    remaining: buff.remaining,
                })
                .collect(),
            companions: session.summons.iter().filter(|s| s.is_alive()).count(),
        };

        let overlay = if session.is_game_over() {
            Overlay::GameOver
        } else {
            overlay
        };

        Self {
            width,
            height,
            tiles,
            entities,
            messages,
            inventory,
            hud,
            overlay,
        }
    }

    pub fn tile(&self, position: Position) -> Option<TileKind> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        let (x, y) = (position.x as u32, position.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get((y * self.width + x) as usize).copied()
    }

    /// Topmost entity drawn at `position`.
    pub fn entity_at(&self, position: Position) -> Option<&RenderEntity> {
        self.entities.iter().rev().find(|e| e.position == position)
    }

    pub fn summon_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().filter_map(|entity| match entity.kind {
            RenderKind::Actor(ActorRef::Summon(id)) => Some(id),
            _ => None,
        })
    }

    /// Plain-text frame: the map followed by the HUD line and messages.
    pub fn render_ascii(&self) -> String {
        let mut glyphs: Vec<char> = self.tiles.iter().map(|tile| tile.glyph()).collect();
        for entity in &self.entities {
            if let Some(cell) = self.cell_index(entity.position) {
                glyphs[cell] = entity.appearance.glyph;
            }
        }

        let mut out = String::with_capacity(glyphs.len() + self.height as usize + 128);
        for row in glyphs.chunks(self.width.max(1) as usize) {
            out.extend(row);
            out.push('\n');
        }

        let hud = &self.hud;
        out.push_str(&format!(
            "Depth {} ({}) | HP {}/{} | ATK {} DEF {} | Kills {} | Turn {}\n",
            hud.depth, hud.biome, hud.hp, hud.max_hp, hud.attack, hud.defense, hud.kills, hud.turn
        ));
        for message in &self.messages {
            out.push_str(message);
            out.push('\n');
        }
        out
    }

    fn cell_index(&self, position: Position) -> Option<usize> {
        self.tile(position)
            .map(|_| (position.y as u32 * self.width + position.x as u32) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SessionConfig;

    fn session() -> GameSession {
        GameSession::new(77, &SessionConfig::default())
    }

    #[test]
    fn view_mirrors_session() {
        let session = session();
        let view = GameView::capture(&session, Overlay::None);

        assert_eq!(view.tiles.len(), (view.width * view.height) as usize);
        assert_eq!(view.tile(session.level.stairs), Some(TileKind::StairsDown));
        assert_eq!(view.hud.depth, 1);
        assert_eq!(view.hud.hp, 30);
        assert_eq!(view.summon_ids().count(), session.summons.len());

        let top = view.entity_at(session.player.position).unwrap();
        assert_eq!(top.kind, RenderKind::Actor(ActorRef::Player));
        assert_eq!(top.appearance.glyph, '@');
    }

    #[test]
    fn only_last_three_messages_are_visible() {
        let mut session = session();
        for i in 0..6 {
            session.messages.push(format!("event {i}"));
        }
        let view = GameView::capture(&session, Overlay::None);
        assert_eq!(view.messages, ["event 3", "event 4", "event 5"]);
    }

    #[test]
    fn ascii_frame_has_one_line_per_row() {
        let session = session();
        let view = GameView::capture(&session, Overlay::Help);
        let frame = view.render_ascii();
        let lines: Vec<&str> = frame.lines().collect();
        assert!(lines.len() > view.height as usize);
        assert!(lines[..view.height as usize].iter().all(|l| l.chars().count() == view.width as usize));
        assert!(frame.contains('@'));
        assert_eq!(view.overlay, Overlay::Help);
    }

    #[test]
    fn dead_player_forces_game_over_overlay() {
        let mut session = session();
        session.phase = crate::simulation::TurnPhase::GameOver;
        let view = GameView::capture(&session, Overlay::Inventory);
        assert_eq!(view.overlay, Overlay::GameOver);
    }
}
