//! # Interactors
//!
//! The four fixed manipulation sources: two hand proxies and two
//! remote/pointer cursors, one of each per side.

use serde::{Serialize, Deserialize};
use std::fmt;

/// Which side of the user an interactor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Physical hand proxy or ray-cast cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractorKind {
    Hand,
    Remote,
}

/// One of the four interactors.
///
/// The discriminant doubles as the slot index in every per-interactor array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractorId {
    LeftHand = 0,
    RightHand = 1,
    LeftRemote = 2,
    RightRemote = 3,
}

impl InteractorId {
    /// All interactors, hands first. This is also the evaluation order.
    pub const ALL: [InteractorId; 4] = [
        InteractorId::LeftHand,
        InteractorId::RightHand,
        InteractorId::LeftRemote,
        InteractorId::RightRemote,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn side(self) -> Side {
        match self {
            InteractorId::LeftHand | InteractorId::LeftRemote => Side::Left,
            InteractorId::RightHand | InteractorId::RightRemote => Side::Right,
        }
    }

    pub fn kind(self) -> InteractorKind {
        match self {
            InteractorId::LeftHand | InteractorId::RightHand => InteractorKind::Hand,
            InteractorId::LeftRemote | InteractorId::RightRemote => InteractorKind::Remote,
        }
    }

    pub fn hand(side: Side) -> Self {
        match side {
            Side::Left => InteractorId::LeftHand,
            Side::Right => InteractorId::RightHand,
        }
    }

    pub fn remote(side: Side) -> Self {
        match side {
            Side::Left => InteractorId::LeftRemote,
            Side::Right => InteractorId::RightRemote,
        }
    }

    /// The other interactor on the same side (hand <-> remote).
    pub fn counterpart(self) -> Self {
        match self.kind() {
            InteractorKind::Hand => Self::remote(self.side()),
            InteractorKind::Remote => Self::hand(self.side()),
        }
    }
}

impl fmt::Display for InteractorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InteractorId::LeftHand => "leftHand",
            InteractorId::RightHand => "rightHand",
            InteractorId::LeftRemote => "leftRemote",
            InteractorId::RightRemote => "rightRemote",
        };
        f.write_str(name)
    }
}
