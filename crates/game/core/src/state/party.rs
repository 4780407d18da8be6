use std::collections::BTreeSet;
use std::fmt;

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::GameConfig;
use crate::events::{EventSink, GameEvent};
use crate::math::{Facing, Vec2};

/// Stable identifier for a companion character ("bear", "hawk", ...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanionId(String);

impl CompanionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompanionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

bitflags! {
    /// Abilities a companion contributes to the party.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CompanionAbilities: u8 {
        /// Help move heavy objects.
        const HELP_LIFT = 1 << 0;
        /// See farther ahead.
        const SCOUT = 1 << 1;
        /// Dig up buried items.
        const DIG = 1 << 2;
        /// Cross water.
        const SWIM = 1 << 3;
        /// Reach high places.
        const CLIMB = 1 << 4;
        /// Understand ancient text.
        const TRANSLATE = 1 << 5;
        /// Restore health or energy.
        const HEAL = 1 << 6;
        /// Illuminate dark areas.
        const LIGHT = 1 << 7;
    }
}

/// A companion character.
#[derive(Clone, Debug)]
pub struct Companion {
    pub id: CompanionId,
    pub name: String,
    pub position: Vec2,
    pub following: bool,
    /// Unit vector of the companion's own last movement; follow offsets are
    /// measured along this, not along the leader's facing.
    pub last_move_dir: Vec2,
    pub facing: Facing,
    pub move_speed: f32,
    pub abilities: CompanionAbilities,
}

impl Companion {
    pub fn new(id: impl Into<CompanionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: Vec2::ZERO,
            following: false,
            last_move_dir: Vec2::DOWN,
            facing: Facing::Down,
            move_speed: GameConfig::DEFAULT_FOLLOW_SPEED,
            abilities: CompanionAbilities::empty(),
        }
    }

    pub fn with_abilities(mut self, abilities: CompanionAbilities) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }
}

/// The companion party.
///
/// `active` is the ordered follow list: a member's index determines its
/// stagger offset behind the leader. `recruited` records every id that has
/// ever joined, independent of current membership, so recruitment
/// notifications fire exactly once per companion.
#[derive(Debug, Default)]
pub struct PartyState {
    roster: Vec<Companion>,
    active: ArrayVec<CompanionId, { GameConfig::MAX_PARTY }>,
    recruited: BTreeSet<CompanionId>,
}

impl PartyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a companion to the active party.
    ///
    /// Idempotent: returns `false` without side effects when the id is
    /// already following or the party is full. Emits `CompanionRecruited`
    /// only on the first-ever add of this id.
    pub fn add_companion(&mut self, companion: Companion, events: &mut EventSink) -> bool {
        let id = companion.id.clone();
        if self.active.contains(&id) {
            return false;
        }
        if self.active.is_full() {
            return false;
        }

        match self.roster.iter_mut().find(|member| member.id == id) {
            Some(member) => member.following = true,
            None => {
                let mut member = companion;
                member.following = true;
                self.roster.push(member);
            }
        }

        self.active.push(id.clone());

        if self.recruited.insert(id.clone()) {
            events.push(GameEvent::CompanionRecruited { id: id.clone() });
        }
        events.push(GameEvent::CompanionJoined { id });
        true
    }

    /// Removes a companion from the active party. Idempotent: returns
    /// `false` when the id is not currently following.
    pub fn remove_companion(&mut self, id: &CompanionId, events: &mut EventSink) -> bool {
        let Some(index) = self.active.iter().position(|member| member == id) else {
            return false;
        };

        self.active.remove(index);
        if let Some(member) = self.roster.iter_mut().find(|member| &member.id == id) {
            member.following = false;
        }
        events.push(GameEvent::CompanionLeft { id: id.clone() });
        true
    }

    /// Dismisses the whole party, always removing index 0 until empty so
    /// every remaining member's stagger offset shifts down by one per step.
    pub fn dismiss_all(&mut self, events: &mut EventSink) {
        while !self.active.is_empty() {
            let id = self.active[0].clone();
            self.remove_companion(&id, events);
        }
    }

    pub fn has_companion(&self, id: &CompanionId) -> bool {
        self.active.contains(id)
    }

    pub fn has_ever_recruited(&self, id: &CompanionId) -> bool {
        self.recruited.contains(id)
    }

    /// The companion with the given id, if currently in the party.
    pub fn companion(&self, id: &CompanionId) -> Option<&Companion> {
        if !self.active.contains(id) {
            return None;
        }
        self.roster.iter().find(|member| &member.id == id)
    }

    pub(crate) fn companion_mut(&mut self, id: &CompanionId) -> Option<&mut Companion> {
        if !self.active.contains(id) {
            return None;
        }
        self.roster.iter_mut().find(|member| &member.id == id)
    }

    /// Ordered ids of the active party (index = stagger position).
    pub fn active_ids(&self) -> &[CompanionId] {
        &self.active
    }

    /// Active companions in follow order.
    pub fn active_companions(&self) -> impl Iterator<Item = &Companion> {
        self.active
            .iter()
            .filter_map(|id| self.roster.iter().find(move |member| &member.id == id))
    }

    pub fn companion_count(&self) -> usize {
        self.active.len()
    }

    /// Whether any active companion has all of the given abilities.
    pub fn has_ability(&self, abilities: CompanionAbilities) -> bool {
        self.active_companions()
            .any(|member| member.abilities.contains(abilities))
    }
}
