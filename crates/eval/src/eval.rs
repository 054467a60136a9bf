// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator builds three bitmasks from a hand, one bit per rank: the
//! ranks in the hand, the ranks of each suit, plus a count for each rank. The
//! best category is found by checking the categories from the highest to the
//! lowest, the first one that matches gives the category and its kickers.
use std::{cmp::Ordering, fmt};

use agmp_cards::{Card, Rank};

/// A poker hand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl HandRank {
    /// The category label.
    pub fn label(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The value of the best 5 cards hand.
///
/// Values are ordered first by category and then by kickers from the highest
/// to the lowest, two values are equal only if they have the same category and
/// the same kickers ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue {
    rank: HandRank,
    kickers: [u8; 5],
    len: u8,
}

/// Mask for a 5 high straight (A, 2, 3, 4, 5).
const WHEEL: u16 = (1 << Rank::Ace as u16) | 0xF;

impl HandValue {
    /// Evaluates a 5, 6, or 7 cards hand.
    ///
    /// Panics if the number of cards is not between 5 and 7.
    pub fn eval(cards: &[Card]) -> Self {
        assert!((5..=7).contains(&cards.len()), "5 <= cards <= 7");

        let mut counts = [0u8; 13];
        let mut suits = [0u16; 4];
        let mut ranks = 0u16;

        for card in cards {
            let rank = card.rank() as usize;
            counts[rank] += 1;
            ranks |= 1 << rank;
            suits[card.suit() as usize] |= 1 << rank;
        }

        let flush = suits.into_iter().find(|s| s.count_ones() >= 5);
        if let Some(top) = flush.and_then(straight_top) {
            return Self::new(HandRank::StraightFlush, &[top]);
        }

        // Ranks with their counts, sorted by count and then by rank.
        let mut groups = (0..13u8)
            .filter(|&r| counts[r as usize] > 0)
            .map(|r| (counts[r as usize], r))
            .collect::<Vec<_>>();
        groups.sort_unstable_by(|a, b| b.cmp(a));

        let (count, top) = groups[0];
        let second = groups.get(1).map(|g| g.0).unwrap_or_default();

        if count == 4 {
            let kickers = high_ranks(&[top], ranks & !(1 << top), 1);
            return Self::new(HandRank::FourOfAKind, &kickers);
        }

        if count == 3 && second >= 2 {
            return Self::new(HandRank::FullHouse, &[top, groups[1].1]);
        }

        if let Some(flush) = flush {
            return Self::new(HandRank::Flush, &high_ranks(&[], flush, 5));
        }

        if let Some(top) = straight_top(ranks) {
            return Self::new(HandRank::Straight, &[top]);
        }

        match (count, second) {
            (3, _) => {
                let kickers = high_ranks(&[top], ranks & !(1 << top), 2);
                Self::new(HandRank::ThreeOfAKind, &kickers)
            }
            (2, 2) => {
                let low = groups[1].1;
                let kickers = high_ranks(&[top, low], ranks & !(1 << top) & !(1 << low), 1);
                Self::new(HandRank::TwoPair, &kickers)
            }
            (2, _) => {
                let kickers = high_ranks(&[top], ranks & !(1 << top), 3);
                Self::new(HandRank::OnePair, &kickers)
            }
            _ => Self::new(HandRank::HighCard, &high_ranks(&[], ranks, 5)),
        }
    }

    fn new(rank: HandRank, kickers: &[u8]) -> Self {
        let mut value = Self {
            rank,
            kickers: [0; 5],
            len: kickers.len() as u8,
        };

        value.kickers[..kickers.len()].copy_from_slice(kickers);
        value
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The ranks that break ties inside the category, from the most to the
    /// least significant.
    pub fn kickers(&self) -> impl Iterator<Item = Rank> + '_ {
        self.kickers[..self.len as usize]
            .iter()
            .map(|&r| Rank::from_index(r))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.rank)?;
        for (idx, rank) in self.kickers().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{rank}")?;
        }
        f.write_str(")")
    }
}

/// Compares the best hands that can be made with two 7 cards hands.
///
/// Returns [Ordering::Greater] if the first hand wins, [Ordering::Less] if the
/// second hand wins, and [Ordering::Equal] for a tie.
pub fn compare_hands(a: &[Card; 7], b: &[Card; 7]) -> Ordering {
    HandValue::eval(a).cmp(&HandValue::eval(b))
}

/// Returns the top rank of the highest straight in a ranks mask.
fn straight_top(mask: u16) -> Option<u8> {
    (4..13u8)
        .rev()
        .find(|top| {
            let straight = 0x1F << (top - 4);
            mask & straight == straight
        })
        .or_else(|| (mask & WHEEL == WHEEL).then_some(Rank::Five as u8))
}

/// Appends up to `n` highest ranks in a ranks mask to the `lead` ranks.
fn high_ranks(lead: &[u8], mask: u16, n: usize) -> Vec<u8> {
    let mut ranks = lead.to_vec();
    ranks.extend((0..13u8).rev().filter(|r| mask & (1 << r) != 0).take(n));
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use agmp_cards::{Deck, Suit};
    use proptest::prelude::*;

    /// Parses a space separated list of cards like "AH KD 2C".
    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace()
            .map(|c| {
                let mut chars = c.chars();
                let rank = match chars.next().unwrap() {
                    'A' => Rank::Ace,
                    'K' => Rank::King,
                    'Q' => Rank::Queen,
                    'J' => Rank::Jack,
                    'T' => Rank::Ten,
                    d => Rank::from_index(d.to_digit(10).unwrap() as u8 - 2),
                };
                let suit = match chars.next().unwrap() {
                    'C' => Suit::Clubs,
                    'D' => Suit::Diamonds,
                    'H' => Suit::Hearts,
                    _ => Suit::Spades,
                };
                Card::new(rank, suit)
            })
            .collect()
    }

    fn hand7(s: &str) -> [Card; 7] {
        cards(s).try_into().unwrap()
    }

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&cards(s))
    }

    #[test]
    fn categories() {
        let hands = [
            ("AH JD 9C 6S 3H 2D 4C", HandRank::HighCard),
            ("AH AD 9C 6S 3H 2D TC", HandRank::OnePair),
            ("AH AD 9C 9S 3H 2D TC", HandRank::TwoPair),
            ("AH AD AC 9S 3H 2D TC", HandRank::ThreeOfAKind),
            ("AH 2D 3C 4S 5H 9D TC", HandRank::Straight),
            ("AH 2H 9H 4H 5H 9D TC", HandRank::Flush),
            ("AH AD AC 9S 9H 2D TC", HandRank::FullHouse),
            ("AH AD AC AS 9H 2D TC", HandRank::FourOfAKind),
            ("AH KH QH JH TH 2D TC", HandRank::StraightFlush),
        ];

        for (hand, rank) in hands {
            assert_eq!(eval(hand).rank(), rank, "{hand}");
        }

        // Categories are ordered.
        for pair in hands.windows(2) {
            assert!(eval(pair[0].0) < eval(pair[1].0));
        }
    }

    #[test]
    fn kickers() {
        let v = eval("AH AD KC QS 3H 2D 9C");
        assert_eq!(
            v.kickers().collect::<Vec<_>>(),
            vec![Rank::Ace, Rank::King, Rank::Queen, Rank::Nine]
        );
        assert_eq!(v.to_string(), "One Pair (A K Q 9)");

        // Same pair, higher kicker wins.
        assert!(eval("AH AD KC QS 3H 2D 9C") > eval("AC AS KD QH 3C 2H 8C"));

        // Only the best 5 cards count, the 7th card doesn't break ties.
        assert_eq!(eval("AH AD KC QS JH 3D 2C"), eval("AC AS KD QH JC 4H 3C"));
    }

    #[test]
    fn two_pair_tie() {
        let a = hand7("AH AD KC KS 9H 3D 2C");
        let b = hand7("AC AS KD KH 9C 4H 2D");
        assert_eq!(compare_hands(&a, &b), Ordering::Equal);

        // Three pairs uses the third pair rank as kicker.
        let v = eval("AH AD KC KS QH QD 2C");
        assert_eq!(v.rank(), HandRank::TwoPair);
        assert_eq!(
            v.kickers().collect::<Vec<_>>(),
            vec![Rank::Ace, Rank::King, Rank::Queen]
        );
    }

    #[test]
    fn straights() {
        // The wheel is the lowest straight.
        let wheel = eval("AH 2D 3C 4S 5H 9D JC");
        let six = eval("6H 2D 3C 4S 5H 9D JC");
        assert_eq!(wheel.rank(), HandRank::Straight);
        assert_eq!(wheel.kickers().next(), Some(Rank::Five));
        assert!(six > wheel);

        // Highest straight in a 7 card hand.
        let v = eval("4H 5D 6C 7S 8H 9D TC");
        assert_eq!(v.kickers().next(), Some(Rank::Ten));

        // Straight flush beats a flush with a higher card.
        let sf = eval("5H 6H 7H 8H 9H AD AC");
        assert_eq!(sf.rank(), HandRank::StraightFlush);
        assert!(sf > eval("AH KH 7H 8H 9H 2D 2C"));

        // Wheel straight flush.
        let v = eval("AS 2S 3S 4S 5S KD KC");
        assert_eq!(v.rank(), HandRank::StraightFlush);
        assert_eq!(v.kickers().next(), Some(Rank::Five));
    }

    #[test]
    fn full_house_from_two_trips() {
        let v = eval("KH KD KC 9S 9H 9D 2C");
        assert_eq!(v.rank(), HandRank::FullHouse);
        assert_eq!(
            v.kickers().collect::<Vec<_>>(),
            vec![Rank::King, Rank::Nine]
        );

        // Trips with two pairs pick the highest pair.
        let v = eval("5H 5D 5C 9S 9H QD QC");
        assert_eq!(
            v.kickers().collect::<Vec<_>>(),
            vec![Rank::Five, Rank::Queen]
        );
    }

    #[test]
    fn flush_kickers() {
        let v = eval("AH 2H 9H 4H 5H 7H TC");
        assert_eq!(v.rank(), HandRank::Flush);
        assert_eq!(
            v.kickers().collect::<Vec<_>>(),
            vec![Rank::Ace, Rank::Nine, Rank::Seven, Rank::Five, Rank::Four]
        );
    }

    #[test]
    fn quads_kicker() {
        let v = eval("9H 9D 9C 9S AH KD QC");
        assert_eq!(
            v.kickers().collect::<Vec<_>>(),
            vec![Rank::Nine, Rank::Ace]
        );
    }

    #[test]
    #[should_panic]
    fn too_few_cards() {
        HandValue::eval(&cards("AH KD"));
    }

    fn two_hands() -> impl Strategy<Value = ([Card; 7], [Card; 7])> {
        // Deal from a full deck so that the two hands share the board like in
        // a Texas Hold'em hand.
        Just(Deck::default().into_iter().collect::<Vec<_>>())
            .prop_shuffle()
            .prop_map(|deck| {
                let a = [deck[0], deck[1], deck[4], deck[5], deck[6], deck[7], deck[8]];
                let b = [deck[2], deck[3], deck[4], deck[5], deck[6], deck[7], deck[8]];
                (a, b)
            })
    }

    proptest! {
        #[test]
        fn compare_is_symmetric((a, b) in two_hands()) {
            prop_assert_eq!(compare_hands(&a, &b), compare_hands(&b, &a).reverse());
            prop_assert_eq!(compare_hands(&a, &a), Ordering::Equal);
        }

        #[test]
        fn equal_only_on_same_category_and_kickers((a, b) in two_hands()) {
            let (va, vb) = (HandValue::eval(&a), HandValue::eval(&b));
            if compare_hands(&a, &b) == Ordering::Equal {
                prop_assert_eq!(va.rank(), vb.rank());
                prop_assert!(va.kickers().eq(vb.kickers()));
            }
        }

        #[test]
        fn order_does_not_matter((a, _) in two_hands()) {
            let mut rev = a;
            rev.reverse();
            prop_assert_eq!(HandValue::eval(&a), HandValue::eval(&rev));
        }
    }
}
