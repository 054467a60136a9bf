// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Texas Hold'em game engine for a single session.
//!
//! The engine plays one player against the dealer, each hand goes through the
//! ante, hole, flop, turn and river betting rounds, the player can fold after
//! the hole cards are dealt. The engine never touches the connection, it maps
//! a request to an optional response.
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use std::cmp::Ordering;

use agmp_core::{
    message::{PlayRequest, PlayResponse, RequestCode, ResponseCode},
    poker::{Card, Chips, Deck, TableCards, Winner, compare_hands},
};

/// The hand play state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Waiting for a new hand.
    NotSet,
    /// Hand started, waiting for the ante.
    Init,
    /// Hole cards dealt, waiting for the flop bet or a fold.
    GetHole,
    /// Flop dealt, waiting for the turn bet or a fold.
    GetFlop,
    /// Turn dealt, waiting for the river bet or a fold.
    GetTurn,
}

/// Game engine state.
#[derive(Debug)]
pub struct Game {
    state: PlayState,
    deck: Deck,
    player: [Card; 2],
    dealer: [Card; 2],
    board: [Card; 5],
    min_ante: Chips,
    ante: Chips,
    pot: Chips,
    bet: Chips,
    bank: Chips,
    rng: StdRng,
}

impl Game {
    /// Creates a new game with the given minimum ante and player bank.
    pub fn new(min_ante: Chips, bank: Chips) -> Self {
        Self::with_rng(min_ante, bank, StdRng::from_os_rng())
    }

    /// Creates a new game with a given random generator.
    pub fn with_rng(min_ante: Chips, bank: Chips, mut rng: StdRng) -> Self {
        let mut deck = Deck::new_and_shuffled(&mut rng);
        let player = deck.deal_array();
        let dealer = deck.deal_array();
        let board = deck.deal_array();

        Self {
            state: PlayState::NotSet,
            deck,
            player,
            dealer,
            board,
            min_ante,
            ante: min_ante,
            pot: Chips::ZERO,
            bet: Chips::ZERO,
            bank,
            rng,
        }
    }

    /// The current play state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// The player bank.
    pub fn bank(&self) -> Chips {
        self.bank
    }

    /// The hand pot.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The hand ante.
    pub fn ante(&self) -> Chips {
        self.ante
    }

    /// Starts a new hand with a new deck, the bank is not changed.
    pub fn reset(&mut self) {
        self.deck = Deck::new_and_shuffled(&mut self.rng);
        self.player = self.deck.deal_array();
        self.dealer = self.deck.deal_array();
        self.board = self.deck.deal_array();
        self.ante = self.min_ante;
        self.pot = Chips::ZERO;
        self.bet = Chips::ZERO;
        self.state = PlayState::NotSet;
    }

    /// Handles a play request.
    ///
    /// Returns `None` if the request is not valid in the current state, the
    /// state is not changed in this case.
    pub fn handle(&mut self, req: PlayRequest) -> Option<PlayResponse> {
        let bet = req.bet;

        let res = match (self.state, req.code) {
            (PlayState::NotSet, RequestCode::Init) => {
                self.state = PlayState::Init;
                self.response(ResponseCode::InitAck, Winner::NotSet)
            }
            (PlayState::Init, RequestCode::GetHole) => {
                if bet >= self.ante && bet.amount() <= self.bank.amount() / 3 {
                    self.ante = bet;
                    self.bet = bet;
                    self.bank -= bet;
                    self.state = PlayState::GetHole;
                    self.response(ResponseCode::HoleAck, Winner::NotSet)
                } else {
                    self.response(ResponseCode::InvalidAnteBet, Winner::NotSet)
                }
            }
            (PlayState::GetHole, RequestCode::GetFlop) => {
                if bet == self.ante * 2 && bet <= self.bank {
                    self.place_bet(bet);
                    self.state = PlayState::GetFlop;
                    self.response(ResponseCode::FlopAck, Winner::NotSet)
                } else {
                    self.response(ResponseCode::InvalidHoleBet, Winner::NotSet)
                }
            }
            (PlayState::GetFlop, RequestCode::GetTurn) => {
                if self.is_check_or_bet(bet) {
                    self.place_bet(bet);
                    self.state = PlayState::GetTurn;
                    self.response(ResponseCode::TurnAck, Winner::NotSet)
                } else {
                    self.response(ResponseCode::InvalidFlopBet, Winner::NotSet)
                }
            }
            (PlayState::GetTurn, RequestCode::GetRiver) => {
                if self.is_check_or_bet(bet) {
                    self.place_bet(bet);
                    let res = self.showdown();
                    self.reset();
                    res
                } else {
                    self.response(ResponseCode::InvalidTurnBet, Winner::NotSet)
                }
            }
            (PlayState::GetHole | PlayState::GetFlop | PlayState::GetTurn, RequestCode::Fold) => {
                info!("Player folds, bank {}", self.bank);
                self.reset();
                self.response(ResponseCode::FoldAck, Winner::Dealer)
            }
            (state, code) => {
                debug!("Ignoring {code:?} in state {state:?}");
                return None;
            }
        };

        debug!(
            "{:?} bet {bet} -> {:?} state {:?} pot {} bank {}",
            req.code, res.code, self.state, self.pot, self.bank
        );

        Some(res)
    }

    fn is_check_or_bet(&self, bet: Chips) -> bool {
        (bet == Chips::ZERO || bet == self.ante) && bet <= self.bank
    }

    fn place_bet(&mut self, bet: Chips) {
        self.pot += bet;
        self.bank -= bet;
        self.bet = bet;
    }

    /// Settles the hand and returns the river response.
    fn showdown(&mut self) -> PlayResponse {
        let player_hand = self.hand(&self.player);
        let dealer_hand = self.hand(&self.dealer);

        let winner = match compare_hands(&player_hand, &dealer_hand) {
            Ordering::Greater => {
                self.bank += self.pot * 2 + self.ante;
                Winner::Player
            }
            Ordering::Equal => {
                self.bank += self.pot + self.ante;
                Winner::Draw
            }
            Ordering::Less => Winner::Dealer,
        };

        info!("Hand winner {winner} pot {} bank {}", self.pot, self.bank);

        PlayResponse {
            code: ResponseCode::RiverAck,
            ante: self.ante,
            cards: TableCards {
                player: self.player.map(Some),
                dealer: self.dealer.map(Some),
                board: self.board.map(Some),
            },
            winner,
            pot: self.pot,
            bet: self.bet,
            bank: self.bank,
        }
    }

    fn hand(&self, hole: &[Card; 2]) -> [Card; 7] {
        let b = &self.board;
        [hole[0], hole[1], b[0], b[1], b[2], b[3], b[4]]
    }

    /// Creates a response with the cards visible in the current state.
    fn response(&self, code: ResponseCode, winner: Winner) -> PlayResponse {
        let mut cards = TableCards::default();

        let board = match self.state {
            PlayState::NotSet | PlayState::Init => None,
            PlayState::GetHole => Some(0),
            PlayState::GetFlop => Some(3),
            PlayState::GetTurn => Some(4),
        };

        if let Some(n) = board {
            cards.player = self.player.map(Some);
            for (slot, card) in cards.board.iter_mut().zip(&self.board[..n]) {
                *slot = Some(*card);
            }
        }

        PlayResponse {
            code,
            ante: self.ante,
            cards,
            winner,
            pot: self.pot,
            bet: self.bet,
            bank: self.bank,
        }
    }
}
