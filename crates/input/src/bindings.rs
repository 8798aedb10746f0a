use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    Q,
    E,
    ShiftLeft,
    ShiftRight,
    CtrlLeft,
    CtrlRight,
    Space,
}

/// Key to action table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    map: BTreeMap<Key, Action>,
}

impl Bindings {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Arrows rotate about X/Y, WASD translate on the ground plane,
    /// shift/ctrl move up/down, space drops, Q/E turn the view.
    pub fn standard() -> Self {
        let mut b = Self::empty();
        b.bind(Key::ArrowUp, Action::rotate(Vec3::new(-1.0, 0.0, 0.0)));
        b.bind(Key::ArrowDown, Action::rotate(Vec3::new(1.0, 0.0, 0.0)));
        b.bind(Key::ArrowLeft, Action::rotate(Vec3::new(0.0, -1.0, 0.0)));
        b.bind(Key::ArrowRight, Action::rotate(Vec3::new(0.0, 1.0, 0.0)));
        b.bind(Key::W, Action::translate(Vec3::new(0.0, 0.0, -1.0)));
        b.bind(Key::S, Action::translate(Vec3::new(0.0, 0.0, 1.0)));
        b.bind(Key::A, Action::translate(Vec3::new(-1.0, 0.0, 0.0)));
        b.bind(Key::D, Action::translate(Vec3::new(1.0, 0.0, 0.0)));
        for key in [Key::ShiftLeft, Key::ShiftRight] {
            b.bind(key, Action::translate(Vec3::new(0.0, 1.0, 0.0)));
        }
        for key in [Key::CtrlLeft, Key::CtrlRight] {
            b.bind(key, Action::translate(Vec3::new(0.0, -1.0, 0.0)));
        }
        b.bind(Key::Space, Action::Drop);
        b.bind(Key::Q, Action::RotateView(-1));
        b.bind(Key::E, Action::RotateView(1));
        b
    }

    /// Bind `key`, replacing any previous action.
    pub fn bind(&mut self, key: Key, action: Action) {
        self.map.insert(key, action);
    }

    pub fn unbind(&mut self, key: Key) -> Option<Action> {
        self.map.remove(&key)
    }

    pub fn action(&self, key: Key) -> Action {
        self.map.get(&key).copied().unwrap_or(Action::Noop)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table() {
        let b = Bindings::standard();
        assert_eq!(b.len(), 15);
        assert_eq!(b.action(Key::Space), Action::Drop);
        assert_eq!(
            b.action(Key::ArrowUp),
            Action::rotate(Vec3::new(-1.0, 0.0, 0.0))
        );
        assert_eq!(b.action(Key::A), Action::translate(Vec3::NEG_X));
        assert_eq!(b.action(Key::ShiftLeft), b.action(Key::ShiftRight));
        assert_eq!(b.action(Key::CtrlRight), Action::translate(Vec3::NEG_Y));
    }

    #[test]
    fn unbound_key_is_noop() {
        let mut b = Bindings::standard();
        assert!(b.unbind(Key::Q).is_some());
        assert_eq!(b.action(Key::Q), Action::Noop);
        assert_eq!(Bindings::empty().action(Key::Space), Action::Noop);
    }

    #[test]
    fn rebinding_replaces() {
        let mut b = Bindings::standard();
        b.bind(Key::Space, Action::Noop);
        assert_eq!(b.action(Key::Space), Action::Noop);
    }
}
