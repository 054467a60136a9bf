// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Types used in a Poker hand.
use std::{fmt, ops};

pub use agmp_cards::{Card, Deck, Rank, Suit};

#[cfg(feature = "eval")]
pub use agmp_eval::{HandRank, HandValue, compare_hands};

/// Chips amount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(u32);

impl Chips {
    /// The zero chips.
    pub const ZERO: Chips = Chips(0);

    /// Creates chips with the given value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The integer amount.
    pub fn amount(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Chips {
    fn from(val: u32) -> Self {
        Chips(val)
    }
}

impl From<Chips> for u32 {
    fn from(val: Chips) -> Self {
        val.0
    }
}

impl ops::Add for Chips {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl ops::AddAssign for Chips {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl ops::Sub<Chips> for Chips {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl ops::SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl ops::Mul<u32> for Chips {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0;
        if amount >= 1_000_000 {
            write!(
                f,
                "{},{:03},{:03}",
                amount / 1_000_000,
                amount % 1_000_000 / 1_000,
                amount % 1000
            )
        } else if amount >= 1_000 {
            write!(f, "{},{:03}", amount / 1000, amount % 1000)
        } else {
            write!(f, "{}", amount)
        }
    }
}

/// The winner of a hand.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Winner {
    /// The hand is still in progress.
    #[default]
    NotSet,
    /// The dealer won the hand or the player folded.
    Dealer,
    /// The player won the hand.
    Player,
    /// Player and dealer have the same hand value.
    Draw,
}

impl Winner {
    /// The wire code for this winner.
    pub fn code(&self) -> u8 {
        match self {
            Winner::NotSet => 0,
            Winner::Dealer => 1,
            Winner::Player => 2,
            Winner::Draw => 3,
        }
    }

    /// Parses a winner wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Winner::NotSet),
            1 => Some(Winner::Dealer),
            2 => Some(Winner::Player),
            3 => Some(Winner::Draw),
            _ => None,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Winner::NotSet => "Not Set",
            Winner::Dealer => "Dealer",
            Winner::Player => "Player",
            Winner::Draw => "Draw",
        };

        f.write_str(s)
    }
}

/// The cards visible on the table, unrevealed cards are `None`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TableCards {
    /// The player hole cards.
    pub player: [Option<Card>; 2],
    /// The dealer hole cards.
    pub dealer: [Option<Card>; 2],
    /// Flop, turn and river cards.
    pub board: [Option<Card>; 5],
}

impl TableCards {
    /// Number of cards slots on the table.
    pub const COUNT: usize = 9;

    /// Returns an iterator over all the slots in wire order: player, dealer,
    /// then board cards.
    pub fn slots(&self) -> impl Iterator<Item = Option<Card>> + '_ {
        self.player
            .iter()
            .chain(&self.dealer)
            .chain(&self.board)
            .copied()
    }

    /// Creates table cards from slots in wire order.
    pub fn from_slots(slots: [Option<Card>; Self::COUNT]) -> Self {
        Self {
            player: [slots[0], slots[1]],
            dealer: [slots[2], slots[3]],
            board: [slots[4], slots[5], slots[6], slots[7], slots[8]],
        }
    }

    /// Checks if no card has been revealed.
    pub fn is_empty(&self) -> bool {
        self.slots().all(|c| c.is_none())
    }
}
