//! Player input
//!
//! The platform layer reports which keys are held; [`KeyBindings`] maps them
//! to logical [`Action`]s and [`InputTracker`] derives the edge-triggered
//! "just pressed" set once per tick. The simulation only ever sees the
//! resulting [`InputSnapshot`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical actions understood by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Shoot,
    Pause,
    Start,
    Restart,
    Quit,
    Fullscreen,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Shoot,
        Action::Pause,
        Action::Start,
        Action::Restart,
        Action::Quit,
        Action::Fullscreen,
    ];

    #[inline]
    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of actions packed into a bitfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionSet {
    bits: u16,
}

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet { bits: 0 };

    pub fn of(actions: &[Action]) -> Self {
        actions.iter().fold(Self::EMPTY, |set, &a| set.with(a))
    }

    #[inline]
    pub const fn contains(self, action: Action) -> bool {
        self.bits & action.bit() != 0
    }

    #[inline]
    pub const fn with(self, action: Action) -> Self {
        Self {
            bits: self.bits | action.bit(),
        }
    }

    #[inline]
    pub fn insert(&mut self, action: Action) {
        self.bits |= action.bit();
    }

    #[inline]
    pub fn remove(&mut self, action: Action) {
        self.bits &= !action.bit();
    }

    #[inline]
    pub const fn union(self, other: ActionSet) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Actions in `self` that are not in `other`
    #[inline]
    pub const fn difference(self, other: ActionSet) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |&a| self.contains(a))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, a| set.with(a))
    }
}

/// Input for one tick: held actions plus the ones that went down this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub held: ActionSet,
    pub just_pressed: ActionSet,
}

impl InputSnapshot {
    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    #[inline]
    pub fn is_just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(action)
    }

    /// Movement direction with components in -1..=1 (y grows downward)
    pub fn move_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_held(Action::Left) {
            dir.x -= 1.0;
        }
        if self.is_held(Action::Right) {
            dir.x += 1.0;
        }
        if self.is_held(Action::Up) {
            dir.y -= 1.0;
        }
        if self.is_held(Action::Down) {
            dir.y += 1.0;
        }
        dir
    }
}

/// Derives edge-triggered input from successive held sets
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: ActionSet,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call exactly once per tick with the currently held actions
    pub fn advance(&mut self, held: ActionSet) -> InputSnapshot {
        let just_pressed = held.difference(self.previous);
        self.previous = held;
        InputSnapshot { held, just_pressed }
    }
}

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    KeypadEnter,
    P,
    R,
    Escape,
    F11,
}

/// Key to action table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    bindings: Vec<(Key, ActionSet)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        Self {
            bindings: vec![
                (Key::ArrowUp, ActionSet::of(&[Up])),
                (Key::ArrowDown, ActionSet::of(&[Down])),
                (Key::ArrowLeft, ActionSet::of(&[Left])),
                (Key::ArrowRight, ActionSet::of(&[Right])),
                // Space shoots in play, starts from the menu and restarts after game over
                (Key::Space, ActionSet::of(&[Shoot, Start, Restart])),
                (Key::Enter, ActionSet::of(&[Start])),
                (Key::KeypadEnter, ActionSet::of(&[Start])),
                (Key::P, ActionSet::of(&[Pause])),
                (Key::R, ActionSet::of(&[Restart])),
                (Key::Escape, ActionSet::of(&[Quit])),
                (Key::F11, ActionSet::of(&[Fullscreen])),
            ],
        }
    }
}

impl KeyBindings {
    pub fn actions_for(&self, key: Key) -> ActionSet {
        self.bindings
            .iter()
            .filter(|(k, _)| *k == key)
            .fold(ActionSet::EMPTY, |set, (_, actions)| set.union(*actions))
    }

    /// Map all held keys to the union of their actions
    pub fn resolve<'a>(&self, held_keys: impl IntoIterator<Item = &'a Key>) -> ActionSet {
        held_keys
            .into_iter()
            .fold(ActionSet::EMPTY, |set, &key| set.union(self.actions_for(key)))
    }
}
