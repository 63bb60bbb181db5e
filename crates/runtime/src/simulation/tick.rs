//! One atomic simulation tick.
//!
//! [`TurnEngine::tick`] walks the session through every [`TurnPhase`] in a
//! fixed order: the player acts, then each living summon, then each living
//! monster, then buffs decay and the turn counter advances. Rejected player
//! actions (bumping a wall, using an empty slot) end the tick immediately
//! without advancing anything so the driver can re-prompt.

use game_core::{
    Actor, ActorRef, EntityId, GameError, ItemKind, ItemUseError, ItemUseOutcome, Position,
    can_enter, resolve_combat,
};

use crate::providers::ai::{
    AiContext, Archetype, Candidate, Decision, decide, smart_move_toward, wander,
};

use super::intent::PlayerIntent;
use super::phase::TurnPhase;
use super::session::GameSession;
use super::transition::find_free_near;

/// A summoned companion appears within this ring of the player.
const SUMMON_RADIUS: u32 = 2;

/// What a tick did, for the driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The turn counter moved forward.
    pub advanced: bool,
    /// The new turn count is a multiple of the autosave interval.
    pub autosave_due: bool,
    pub game_over: bool,
    pub descended: bool,
}

enum PlayerResolution {
    Rejected,
    Acted,
    Descended,
}

/// Drives one session through its turn phases.
pub struct TurnEngine<'a> {
    session: &'a mut GameSession,
}

impl<'a> TurnEngine<'a> {
    pub fn new(session: &'a mut GameSession) -> Self {
        Self { session }
    }

    /// Resolves `intent` and, if it was accepted, every agent's response.
    ///
    /// Non-simulation intents (inventory, help, reset, quit) are ignored here;
    /// the driver handles them.
    pub fn tick(&mut self, intent: PlayerIntent) -> TickReport {
        if self.session.is_game_over() {
            return TickReport {
                game_over: true,
                ..TickReport::default()
            };
        }
        if !intent.is_simulation_action() {
            return TickReport::default();
        }

        self.enter(TurnPhase::ResolvingPlayerAction);
        let resolution = match intent {
            PlayerIntent::Move { dx, dy } => self.player_move(dx, dy),
            PlayerIntent::UseItem(index) => self.player_use_item(index),
            _ => PlayerResolution::Rejected,
        };

        let descended = match resolution {
            PlayerResolution::Rejected => {
                self.enter(TurnPhase::AwaitingPlayerInput);
                return TickReport::default();
            }
            PlayerResolution::Descended => true,
            PlayerResolution::Acted => {
                self.enter(TurnPhase::ResolvingSummonActions);
                self.run_summons();

                self.enter(TurnPhase::ResolvingMonsterActions);
                if self.run_monsters() {
                    self.enter(TurnPhase::GameOver);
                    tracing::info!(
                        turn = self.session.turn,
                        depth = self.session.depth,
                        kills = self.session.player.counters.kills,
                        "player died"
                    );
                    return TickReport {
                        game_over: true,
                        ..TickReport::default()
                    };
                }
                false
            }
        };

        self.enter(TurnPhase::ResolvingBuffDecay);
        self.decay_buffs();

        self.session.turn += 1;
        let interval = self.session.config.autosave_interval.max(1);
        self.enter(TurnPhase::AwaitingPlayerInput);

        TickReport {
            advanced: true,
            autosave_due: self.session.turn % interval == 0,
            game_over: false,
            descended,
        }
    }

    fn enter(&mut self, next: TurnPhase) {
        match self.session.phase.transition(next) {
            Ok(phase) => self.session.phase = phase,
            Err(err) => {
                tracing::error!(%err, "turn engine forced a phase change");
                self.session.phase = next;
            }
        }
    }

    // ===== player phase =====

    fn player_move(&mut self, dx: i32, dy: i32) -> PlayerResolution {
        let (dx, dy) = (dx.signum(), dy.signum());
        if dx == 0 && dy == 0 {
            return PlayerResolution::Rejected;
        }
        let session = &mut *self.session;
        let from = session.player.position;
        let to = from.offset(dx, dy);

        if let Some(id) = session.level.monster_at(to).map(|monster| monster.id) {
            self.player_attack(id);
            return PlayerResolution::Acted;
        }

        if let Some(index) = session
            .summons
            .iter()
            .position(|summon| summon.is_alive() && summon.position == to)
        {
            session.summons[index].position = from;
            session.player.position = to;
            return self.tile_triggers();
        }

        if !can_enter(&session.level.grid, &session.occupancy(), to) {
            return PlayerResolution::Rejected;
        }
        session.player.position = to;
        self.tile_triggers()
    }

    fn player_attack(&mut self, id: EntityId) {
        let session = &mut *self.session;
        let Some(monster) = session.level.monster_mut(id) else {
            return;
        };
        let outcome = resolve_combat(&session.player, monster);
        let name = monster.name.clone();

        tracing::debug!(monster = %id, damage = outcome.damage, "player attacked");
        session
            .messages
            .push(format!("You hit the {name} for {} damage.", outcome.damage));

        if outcome.defender_died {
            session.level.remove_monster(id);
            session.player.record_kill();
            session.messages.push(format!("You defeated the {name}!"));
        }
    }

    /// Pickup, stairs, and portals on the tile the player just entered.
    fn tile_triggers(&mut self) -> PlayerResolution {
        let session = &mut *self.session;
        let position = session.player.position;

        if let Some(index) = session.level.item_index_at(position) {
            let item = session.level.items[index].item.clone();
            let name = item.name();
            match session.player.pick_up(item) {
                Ok(()) => {
                    session.level.items.remove(index);
                    session.messages.push(format!("You pick up the {name}."));
                }
                Err(err) => {
                    tracing::debug!(%err, at = %position, "pickup rejected");
                    session
                        .messages
                        .push(format!("Your inventory is full; the {name} stays here."));
                }
            }
        }

        if session.level.is_stairs(position) {
            session.descend();
            return PlayerResolution::Descended;
        }

        if let Some(exit) = session.level.portal_exit(position) {
            if can_enter(&session.level.grid, &session.occupancy(), exit) {
                session.player.position = exit;
                session.messages.push("You step through the portal.".to_string());
                tracing::debug!(from = %position, to = %exit, "portal teleport");
                session.gather_summons(false);
            } else {
                session
                    .messages
                    .push("The portal flickers; something blocks the other side.".to_string());
            }
        }

        PlayerResolution::Acted
    }

    fn player_use_item(&mut self, index: usize) -> PlayerResolution {
        let session = &mut *self.session;
        let Some(kind) = session.player.inventory().get(index).map(|item| item.kind) else {
            session
                .messages
                .push(format!("There is nothing in slot {}.", index + 1));
            return PlayerResolution::Rejected;
        };

        // The scroll is consumed on use, so the spot must be known up front.
        let summon_spot = if kind == ItemKind::SummonScroll {
            let spot = find_free_near(
                &session.level.grid,
                &session.occupancy(),
                session.player.position,
                SUMMON_RADIUS,
            );
            if spot.is_none() {
                self.report_item_error(ItemUseError::NoSpaceToSummon);
                return PlayerResolution::Rejected;
            }
            spot
        } else {
            None
        };

        match session.player.use_item(index) {
            Ok(outcome) => {
                self.apply_item_outcome(outcome, summon_spot);
                PlayerResolution::Acted
            }
            Err(err) => {
                self.report_item_error(err);
                PlayerResolution::Rejected
            }
        }
    }

    fn apply_item_outcome(&mut self, outcome: ItemUseOutcome, summon_spot: Option<Position>) {
        let session = &mut *self.session;
        let message = match outcome {
            ItemUseOutcome::Healed { item, amount } => {
                format!("You drink the {} and recover {amount} hp.", item.name())
            }
            ItemUseOutcome::Buffed {
                item,
                kind,
                magnitude,
            } => format!("You drink the {}: {kind} +{magnitude}.", item.name()),
            ItemUseOutcome::Equipped { item, replaced, .. } => match replaced {
                Some(old) => format!("You equip the {} and stow the {}.", item.name(), old.name()),
                None => format!("You equip the {}.", item.name()),
            },
            ItemUseOutcome::Summoned { level, .. } => match summon_spot {
                Some(spot) => {
                    let id = session.spawn_summon(level, spot);
                    tracing::debug!(summon = %id, level, at = %spot, "companion summoned");
                    format!("A Companion Lv.{level} answers your call.")
                }
                None => {
                    tracing::warn!(level, "summon scroll used without a free tile");
                    "The scroll crumbles to dust.".to_string()
                }
            },
        };
        session.messages.push(message);
    }

    fn report_item_error(&mut self, err: ItemUseError) {
        tracing::debug!(%err, severity = ?err.severity(), "item use rejected");
        let message = match err {
            ItemUseError::InvalidSlot { index } => format!("There is nothing in slot {}.", index + 1),
            ItemUseError::AlreadyAtFullHealth => "You are already at full health.".to_string(),
            ItemUseError::NoSpaceToSummon => "There is no room to summon a companion.".to_string(),
            ItemUseError::InventoryFull => {
                "Your inventory is too full to swap equipment.".to_string()
            }
        };
        self.session.messages.push(message);
    }

    // ===== agent phases =====

    fn run_summons(&mut self) {
        let ids: Vec<EntityId> = self
            .session
            .summons
            .iter()
            .filter(|summon| summon.is_alive())
            .map(|summon| summon.id)
            .collect();
        for id in ids {
            self.summon_turn(id);
        }
    }

    fn summon_turn(&mut self, id: EntityId) {
        let session = &mut *self.session;
        let Some(position) = session
            .summons
            .iter()
            .find(|summon| summon.id == id && summon.is_alive())
            .map(|summon| summon.position)
        else {
            return;
        };

        let candidates: Vec<Candidate> = session
            .level
            .monsters
            .iter()
            .filter(|monster| monster.is_alive())
            .map(|monster| Candidate {
                target: ActorRef::Monster(monster.id),
                position: monster.position,
                hp: monster.hp,
                max_hp: monster.max_hp,
                attack: monster.attack,
            })
            .collect();

        let mut occupancy = session.occupancy();
        let decision = {
            let ctx = AiContext {
                grid: &session.level.grid,
                occupancy: &occupancy,
                sight_radius: session.config.sight_radius,
            };
            decide(
                Archetype::Companion,
                position,
                &candidates,
                Some(session.player.position),
                &ctx,
                &mut session.rng,
            )
        };
        tracing::debug!(summon = %id, ?decision, "summon decided");

        match decision {
            Decision::Attack(ActorRef::Monster(target)) => {
                let (Some(summon), Some(monster)) = (
                    session.summons.iter().find(|summon| summon.id == id),
                    session.level.monsters.iter_mut().find(|m| m.id == target),
                ) else {
                    return;
                };
                let outcome = resolve_combat(summon, monster);
                if outcome.defender_died {
                    let message = format!("{} defeated the {}.", summon.name, monster.name);
                    session.level.remove_monster(target);
                    session.messages.push(message);
                }
            }
            Decision::MoveToward(goal) => {
                if let Some(summon) = session.summons.iter_mut().find(|summon| summon.id == id) {
                    smart_move_toward(
                        summon,
                        Archetype::Companion,
                        goal,
                        &session.level.grid,
                        &mut occupancy,
                    );
                }
            }
            Decision::Wander => {
                if let Some(summon) = session.summons.iter_mut().find(|summon| summon.id == id) {
                    wander(
                        summon,
                        Archetype::Companion,
                        &session.level.grid,
                        &mut occupancy,
                        &mut session.rng,
                    );
                }
            }
            Decision::Attack(_) | Decision::Hold => {}
        }
    }

    /// Returns true when a monster killed the player.
    fn run_monsters(&mut self) -> bool {
        let ids: Vec<EntityId> = self
            .session
            .level
            .monsters
            .iter()
            .filter(|monster| monster.is_alive())
            .map(|monster| monster.id)
            .collect();
        ids.into_iter().any(|id| self.monster_turn(id))
    }

    fn monster_turn(&mut self, id: EntityId) -> bool {
        let session = &mut *self.session;
        let Some((position, kind)) = session
            .level
            .monsters
            .iter()
            .find(|monster| monster.id == id && monster.is_alive())
            .map(|monster| (monster.position, monster.kind))
        else {
            return false;
        };
        let archetype = Archetype::Monster(kind);

        let player = &session.player;
        let candidates: Vec<Candidate> = std::iter::once(Candidate {
            target: ActorRef::Player,
            position: player.position,
            hp: player.hp(),
            max_hp: player.max_hp(),
            attack: player.attack(),
        })
        .chain(
            session
                .summons
                .iter()
                .filter(|summon| summon.is_alive())
                .map(|summon| Candidate {
                    target: ActorRef::Summon(summon.id),
                    position: summon.position,
                    hp: summon.hp,
                    max_hp: summon.max_hp,
                    attack: summon.attack,
                }),
        )
        .collect();

        let mut occupancy = session.occupancy();
        let decision = {
            let ctx = AiContext {
                grid: &session.level.grid,
                occupancy: &occupancy,
                sight_radius: session.config.sight_radius,
            };
            decide(archetype, position, &candidates, None, &ctx, &mut session.rng)
        };
        tracing::debug!(monster = %id, ?decision, "monster decided");

        let Some(monster) = session.level.monsters.iter_mut().find(|m| m.id == id) else {
            return false;
        };

        match decision {
            Decision::Attack(ActorRef::Player) => {
                let outcome = resolve_combat(&*monster, &mut session.player);
                session.messages.push(format!(
                    "The {} hits you for {} damage.",
                    monster.name, outcome.damage
                ));
                if outcome.defender_died {
                    session
                        .messages
                        .push(format!("You were slain by the {}.", monster.name));
                    return true;
                }
            }
            Decision::Attack(ActorRef::Summon(target)) => {
                let Some(summon) = session.summons.iter_mut().find(|s| s.id == target) else {
                    return false;
                };
                let outcome = resolve_combat(&*monster, summon);
                if outcome.defender_died {
                    let message = format!("{} was slain by the {}.", summon.name, monster.name);
                    session.summons.retain(|summon| summon.id != target);
                    session.messages.push(message);
                }
            }
            Decision::MoveToward(goal) => {
                smart_move_toward(monster, archetype, goal, &session.level.grid, &mut occupancy);
            }
            Decision::Wander => {
                wander(
                    monster,
                    archetype,
                    &session.level.grid,
                    &mut occupancy,
                    &mut session.rng,
                );
            }
            Decision::Attack(ActorRef::Monster(_)) | Decision::Hold => {}
        }
        false
    }

    // ===== upkeep =====

    fn decay_buffs(&mut self) {
        let expired = self.session.player.decay_buffs();
        for kind in expired {
            self.session
                .messages
                .push(format!("Your {kind} boost wears off."));
        }
    }
}
