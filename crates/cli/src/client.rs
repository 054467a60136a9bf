// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Client protocol driver.
//!
//! The driver negotiates the protocol version, selects a game, and plays
//! hands by reacting to the server responses. Gameplay transitions are driven
//! by a single table that maps the current phase and the server response to
//! the next decision the user has to make.
use anyhow::{Result, bail};
use log::{debug, info, warn};
use std::ops::RangeInclusive;
use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::broadcast,
};

use agmp_core::{
    connection::EncryptedConnection,
    message::{
        GameType, Message, Play, PlayRequest, PlayResponse, RequestCode, ResponseCode,
        SetGameStatus, VersionKind,
    },
    poker::{Card, Chips, Winner},
};

/// Client protocol state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    /// Ready to send the client version.
    Listening,
    /// Waiting for the server version response.
    Authenticate,
    /// Waiting for the games list.
    GameList,
    /// Waiting for the game selection response.
    GameSet,
    /// Playing a hand.
    GamePlay(GamePhase),
    /// The session is over.
    Closed,
}

/// The last play request sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Sent a new hand request.
    Init,
    /// Sent the ante.
    Hole,
    /// Sent the flop bet.
    Flop,
    /// Sent the turn bet.
    Turn,
    /// Sent the river bet.
    River,
    /// Folded.
    Fold,
}

/// The next decision after a play response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    /// Pay the ante or go back to the games list.
    Ante,
    /// Bet two antes or fold.
    Hole,
    /// Bet the ante, check, or fold, then send the given request.
    Bet(RequestCode),
    /// Play another hand or go back to the games list.
    Replay,
}

const INVALID_ANTE: &str = "Invalid ante, bet at least the ante and at most a third of the bank.";
const INVALID_HOLE: &str = "Invalid bet, the flop bet must be twice the ante.";
const INVALID_BET: &str = "Invalid bet, bet the ante or check.";

/// Gameplay transitions: (phase, response) -> (error text, next decision).
#[rustfmt::skip]
const TRANSITIONS: &[(GamePhase, ResponseCode, Option<&str>, Decision)] = &[
    (GamePhase::Init, ResponseCode::InitAck, None, Decision::Ante),
    (GamePhase::Hole, ResponseCode::InvalidAnteBet, Some(INVALID_ANTE), Decision::Ante),
    (GamePhase::Hole, ResponseCode::HoleAck, None, Decision::Hole),
    (GamePhase::Flop, ResponseCode::InvalidHoleBet, Some(INVALID_HOLE), Decision::Hole),
    (GamePhase::Flop, ResponseCode::FlopAck, None, Decision::Bet(RequestCode::GetTurn)),
    (GamePhase::Turn, ResponseCode::InvalidFlopBet, Some(INVALID_BET), Decision::Bet(RequestCode::GetTurn)),
    (GamePhase::Turn, ResponseCode::TurnAck, None, Decision::Bet(RequestCode::GetRiver)),
    (GamePhase::River, ResponseCode::InvalidTurnBet, Some(INVALID_BET), Decision::Bet(RequestCode::GetRiver)),
    (GamePhase::River, ResponseCode::RiverAck, None, Decision::Replay),
    (GamePhase::Fold, ResponseCode::FoldAck, None, Decision::Replay),
];

/// Source of the user decisions.
#[allow(async_fn_in_trait)]
pub trait Decisions {
    /// Shows a line of text to the user.
    fn show(&mut self, text: &str) -> Result<()>;

    /// Shows the table after a play response.
    fn show_table(&mut self, res: &PlayResponse) -> Result<()> {
        for line in table_lines(res) {
            self.show(&line)?;
        }

        Ok(())
    }

    /// Asks the user to pick a number in the given range.
    async fn select(&mut self, prompt: &str, range: RangeInclusive<u32>) -> Result<u32>;
}

/// Formats the table for a play response.
pub fn table_lines(res: &PlayResponse) -> Vec<String> {
    fn cards(cards: &[Option<Card>]) -> String {
        cards
            .iter()
            .map(|c| c.map(|c| c.to_string()).unwrap_or_else(|| "--".to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    let mut lines = vec![
        format!("Player: {}", cards(&res.cards.player)),
        format!("Dealer: {}", cards(&res.cards.dealer)),
        format!("Board:  {}", cards(&res.cards.board)),
        format!(
            "Ante: {}  Pot: {}  Bet: {}  Bank: {}",
            res.ante, res.pot, res.bet, res.bank
        ),
    ];

    if res.winner != Winner::NotSet {
        lines.push(format!("Winner: {}", res.winner));
    }

    lines
}

/// The client protocol driver.
#[derive(Debug)]
pub struct Client {
    version: u8,
    minor: u16,
    state: ProtocolState,
    bank: Chips,
}

impl Client {
    /// Creates a client that speaks the given protocol version.
    pub fn new(version: u8, minor: u16) -> Self {
        Self {
            version,
            minor,
            state: ProtocolState::Listening,
            bank: Chips::ZERO,
        }
    }

    /// The protocol state.
    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// The last bank reported by the server.
    pub fn bank(&self) -> Chips {
        self.bank
    }

    /// Runs the protocol until the session is closed or a shutdown signal.
    pub async fn run<S, D>(
        &mut self,
        conn: &mut EncryptedConnection<S>,
        decisions: &mut D,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
        D: Decisions,
    {
        let res = loop {
            if self.state == ProtocolState::Listening {
                let hello = self.hello();
                if let Err(e) = conn.send(&hello).await {
                    break Err(e.into());
                }
            }

            if self.state == ProtocolState::Closed {
                break Ok(());
            }

            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Closing connection...");
                    self.state = ProtocolState::Closed;
                    let _ = conn.send(&Message::CloseConnection { version: self.version }).await;
                    break Ok(());
                }
                res = self.step(conn, decisions) => {
                    if res.is_err() {
                        break res;
                    }
                }
            }
        };

        conn.close().await;
        res
    }

    /// Waits for a server message and sends the reply if any.
    async fn step<S, D>(
        &mut self,
        conn: &mut EncryptedConnection<S>,
        decisions: &mut D,
    ) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
        D: Decisions,
    {
        match conn.recv().await {
            Some(Ok(msg)) => {
                if let Some(reply) = self.handle_message(msg, decisions).await? {
                    conn.send(&reply).await?;
                }
                Ok(())
            }
            Some(Err(e)) if !e.is_fatal() => {
                warn!("Ignoring message: {e}");
                Ok(())
            }
            Some(Err(e)) => Err(e.into()),
            None => {
                self.state = ProtocolState::Closed;
                bail!("Connection closed by server");
            }
        }
    }

    /// Returns the version message and moves to the authenticate state.
    pub fn hello(&mut self) -> Message {
        self.state = ProtocolState::Authenticate;
        Message::Version {
            version: self.version,
            kind: VersionKind::ClientVersion,
            minor: self.minor,
            bank: Chips::ZERO,
        }
    }

    /// Handles a server message, returns the message to send back if any.
    pub async fn handle_message<D: Decisions>(
        &mut self,
        msg: Message,
        decisions: &mut D,
    ) -> Result<Option<Message>> {
        // Upgrade and requirement replies carry the server version.
        let negotiating = self.state == ProtocolState::Authenticate
            && matches!(
                msg,
                Message::Version {
                    kind: VersionKind::Upgrade | VersionKind::Requirement,
                    ..
                }
            );

        if !negotiating && msg.version() != self.version {
            warn!(
                "Ignoring message with version {} expected {}",
                msg.version(),
                self.version
            );
            return Ok(None);
        }

        let reply = match (self.state, msg) {
            (ProtocolState::Authenticate, Message::Version { kind, minor, bank, .. }) => {
                match kind {
                    VersionKind::Ack => {
                        info!("Connected with server version {}.{minor}", self.version);
                        self.bank = bank;
                        self.state = ProtocolState::GameList;
                        Some(self.game_list())
                    }
                    VersionKind::Upgrade => {
                        decisions.show("The server requires a different protocol version.")?;
                        self.state = ProtocolState::Closed;
                        None
                    }
                    VersionKind::Requirement => {
                        self.state = ProtocolState::Listening;
                        Some(self.hello())
                    }
                    VersionKind::ClientVersion => None,
                }
            }
            (ProtocolState::GameList, Message::GetGameList { games, .. }) => {
                self.select_game(&games, decisions).await?
            }
            (ProtocolState::GameSet, Message::SetGame { status, game, .. }) => match status {
                SetGameStatus::Ack => {
                    decisions.show(&format!("Playing {game}, bank {}", self.bank))?;
                    self.state = ProtocolState::GamePlay(GamePhase::Init);
                    Some(self.play(RequestCode::Init, Chips::ZERO))
                }
                SetGameStatus::Invalid => {
                    decisions.show(&format!("{game} is not available."))?;
                    self.state = ProtocolState::GameList;
                    Some(self.game_list())
                }
                SetGameStatus::Request => None,
            },
            (
                ProtocolState::GamePlay(phase),
                Message::PlayGame {
                    play: Play::Response(res),
                    ..
                },
            ) => self.handle_play(phase, res, decisions).await?,
            (state, msg) => {
                debug!("Ignoring {msg:?} in state {state:?}");
                None
            }
        };

        Ok(reply)
    }

    async fn select_game<D: Decisions>(
        &mut self,
        games: &[GameType],
        decisions: &mut D,
    ) -> Result<Option<Message>> {
        if games.is_empty() {
            decisions.show("No games available.")?;
            self.state = ProtocolState::Closed;
            return Ok(Some(self.close()));
        }

        for (n, game) in games.iter().enumerate() {
            decisions.show(&format!("{}. {game}", n + 1))?;
        }

        let close = games.len() as u32 + 1;
        decisions.show(&format!("{close}. Close connection"))?;

        let choice = decisions.select("Select:", 1..=close).await?;
        if choice == close {
            self.state = ProtocolState::Closed;
            return Ok(Some(self.close()));
        }

        let game = games[choice as usize - 1];
        if game != GameType::TEXAS_HOLDEM {
            decisions.show(&format!("{game} is not supported by this client."))?;
            return Ok(Some(self.game_list()));
        }

        self.state = ProtocolState::GameSet;
        Ok(Some(Message::SetGame {
            version: self.version,
            game,
            status: SetGameStatus::Request,
        }))
    }

    async fn handle_play<D: Decisions>(
        &mut self,
        phase: GamePhase,
        res: PlayResponse,
        decisions: &mut D,
    ) -> Result<Option<Message>> {
        let Some(&(_, _, error, decision)) = TRANSITIONS
            .iter()
            .find(|(p, code, _, _)| *p == phase && *code == res.code)
        else {
            debug!("Ignoring {:?} in phase {phase:?}", res.code);
            return Ok(None);
        };

        self.bank = res.bank;

        match error {
            Some(error) => decisions.show(error)?,
            None => decisions.show_table(&res)?,
        }

        let reply = match decision {
            Decision::Ante => self.ante(&res, decisions).await?,
            Decision::Hole => self.hole(&res, decisions).await?,
            Decision::Bet(next) => self.bet(next, &res, decisions).await?,
            Decision::Replay => self.replay(decisions).await?,
        };

        Ok(Some(reply))
    }

    async fn ante<D: Decisions>(
        &mut self,
        res: &PlayResponse,
        decisions: &mut D,
    ) -> Result<Message> {
        if res.bank < res.ante {
            decisions.show("Not enough chips to pay the ante.")?;
            return Ok(self.back_to_list());
        }

        decisions.show("1. Play")?;
        decisions.show("2. Games list")?;
        if decisions.select("Select:", 1..=2).await? != 1 {
            return Ok(self.back_to_list());
        }

        let prompt = format!("Ante ({} - {}):", res.ante, res.bank);
        let ante = decisions
            .select(&prompt, res.ante.amount()..=res.bank.amount())
            .await?;

        self.state = ProtocolState::GamePlay(GamePhase::Hole);
        Ok(self.play(RequestCode::GetHole, Chips::new(ante)))
    }

    async fn hole<D: Decisions>(
        &mut self,
        res: &PlayResponse,
        decisions: &mut D,
    ) -> Result<Message> {
        let bet = res.ante * 2;

        decisions.show(&format!("1. Continue (bet {bet})"))?;
        decisions.show("2. Fold")?;
        if decisions.select("Select:", 1..=2).await? != 1 {
            self.state = ProtocolState::GamePlay(GamePhase::Fold);
            return Ok(self.play(RequestCode::Fold, res.ante));
        }

        if bet > res.bank {
            decisions.show("Not enough chips to continue.")?;
            return Ok(self.back_to_list());
        }

        self.state = ProtocolState::GamePlay(GamePhase::Flop);
        Ok(self.play(RequestCode::GetFlop, bet))
    }

    async fn bet<D: Decisions>(
        &mut self,
        next: RequestCode,
        res: &PlayResponse,
        decisions: &mut D,
    ) -> Result<Message> {
        decisions.show(&format!("1. Bet {}", res.ante))?;
        decisions.show("2. Check")?;
        decisions.show("3. Fold")?;

        let bet = match decisions.select("Select:", 1..=3).await? {
            1 if res.ante > res.bank => {
                decisions.show("Not enough chips to bet, checking.")?;
                Chips::ZERO
            }
            1 => res.ante,
            2 => Chips::ZERO,
            _ => {
                self.state = ProtocolState::GamePlay(GamePhase::Fold);
                return Ok(self.play(RequestCode::Fold, res.ante));
            }
        };

        let phase = if next == RequestCode::GetTurn {
            GamePhase::Turn
        } else {
            GamePhase::River
        };

        self.state = ProtocolState::GamePlay(phase);
        Ok(self.play(next, bet))
    }

    async fn replay<D: Decisions>(&mut self, decisions: &mut D) -> Result<Message> {
        decisions.show("1. Play again")?;
        decisions.show("2. Games list")?;
        if decisions.select("Select:", 1..=2).await? != 1 {
            return Ok(self.back_to_list());
        }

        self.state = ProtocolState::GamePlay(GamePhase::Init);
        Ok(self.play(RequestCode::Init, Chips::ZERO))
    }

    fn back_to_list(&mut self) -> Message {
        self.state = ProtocolState::GameList;
        self.game_list()
    }

    fn game_list(&self) -> Message {
        Message::GetGameList {
            version: self.version,
            games: vec![],
        }
    }

    fn close(&self) -> Message {
        Message::CloseConnection {
            version: self.version,
        }
    }

    fn play(&self, code: RequestCode, bet: Chips) -> Message {
        Message::PlayGame {
            version: self.version,
            game: GameType::TEXAS_HOLDEM,
            play: Play::Request(PlayRequest::new(code, bet)),
        }
    }
}
