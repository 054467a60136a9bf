// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! AGMP Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. The evaluator finds the
//! category of the best 5 cards combination and the kickers that break ties
//! inside a category.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use agmp_eval::*;
//! // 2C, 2D, 2H, 2S, 3C, .., 4D
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[0..5]);
//! let v2 = HandValue::eval(&cards[5..]);
//! assert_eq!(v1.rank(), HandRank::FourOfAKind);
//! assert_eq!(v2.rank(), HandRank::FullHouse);
//! assert!(v1 > v2);
//! ```
//!
//! Two 7 cards Texas Hold'em hands are compared with [compare_hands].
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandRank, HandValue, compare_hands};

// Reexport cards types.
pub use agmp_cards::{Card, Deck, Rank, Suit};
