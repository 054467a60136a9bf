// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Protocol state for a client session.
use log::{debug, warn};

use agmp_core::{
    message::{GameType, Message, Play, SetGameStatus, VersionKind},
    poker::Chips,
};

use crate::game::Game;

/// Games offered by this server.
pub const GAMES: [GameType; 1] = [GameType::TEXAS_HOLDEM];

/// Session protocol phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the client version.
    AwaitVersion,
    /// Version negotiated, waiting for a game selection.
    Negotiated,
    /// A game has been selected.
    GameSelected(GameType),
}

/// What the connection handler should do after a message.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// Send a reply to the client.
    Send(Message),
    /// Close the session.
    Close,
    /// Nothing to do.
    Ignore,
}

/// The protocol state for a client session.
#[derive(Debug)]
pub struct Session {
    version: u8,
    minor: u16,
    phase: Phase,
    game: Game,
}

impl Session {
    /// Creates a session that speaks the given protocol version.
    pub fn new(version: u8, minor: u16, game: Game) -> Self {
        Self {
            version,
            minor,
            phase: Phase::AwaitVersion,
            game,
        }
    }

    /// The session phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The session game engine.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handles a client message.
    pub fn handle_message(&mut self, msg: Message) -> SessionAction {
        if let Message::CloseConnection { .. } = msg {
            return SessionAction::Close;
        }

        if self.phase == Phase::AwaitVersion {
            return self.negotiate(msg);
        }

        if msg.version() != self.version {
            warn!(
                "Dropping message with version {} expected {}",
                msg.version(),
                self.version
            );
            return SessionAction::Ignore;
        }

        match msg {
            Message::GetGameList { .. } => SessionAction::Send(Message::GetGameList {
                version: self.version,
                games: GAMES.to_vec(),
            }),
            Message::SetGame {
                game,
                status: SetGameStatus::Request,
                ..
            } => {
                let status = if GAMES.contains(&game) {
                    self.game.reset();
                    self.phase = Phase::GameSelected(game);
                    SetGameStatus::Ack
                } else {
                    warn!("Unsupported game {}", game.code());
                    SetGameStatus::Invalid
                };

                SessionAction::Send(Message::SetGame {
                    version: self.version,
                    game,
                    status,
                })
            }
            Message::PlayGame {
                game,
                play: Play::Request(req),
                ..
            } if self.phase == Phase::GameSelected(game) => match self.game.handle(req) {
                Some(res) => SessionAction::Send(Message::PlayGame {
                    version: self.version,
                    game,
                    play: Play::Response(res),
                }),
                None => SessionAction::Ignore,
            },
            msg => {
                debug!("Ignoring message {msg:?} in phase {:?}", self.phase);
                SessionAction::Ignore
            }
        }
    }

    fn negotiate(&mut self, msg: Message) -> SessionAction {
        let kind = match msg {
            Message::Version {
                version,
                kind: VersionKind::ClientVersion,
                ..
            } => {
                if version == self.version {
                    self.phase = Phase::Negotiated;
                    VersionKind::Ack
                } else {
                    warn!("Client version {version} server version {}", self.version);
                    VersionKind::Upgrade
                }
            }
            msg => {
                debug!("Version required, got {msg:?}");
                VersionKind::Requirement
            }
        };

        let bank = if kind == VersionKind::Ack {
            self.game.bank()
        } else {
            Chips::ZERO
        };

        SessionAction::Send(Message::Version {
            version: self.version,
            kind,
            minor: self.minor,
            bank,
        })
    }
}
