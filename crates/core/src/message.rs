// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Type definitions for messages between the client and server.
//!
//! Messages are encoded with a fixed big-endian layout, every payload starts
//! with the protocol version and a type indicator:
//!
//! ```text
//!   VERSION  [ver][1][kind][minor u16][bank u32]
//!   GAME     [ver][2][1 GET_GAME][count][game type * count]
//!            [ver][2][2 SET_GAME][game type][status]
//!            [ver][2][3 PLAY_GAME][game type][request code][bet u32]
//!            [ver][2][3 PLAY_GAME][game type][response code][ante u32]
//!                 [9 cards][winner][pot u32][bet u32][bank u32]
//!   CLOSE    [ver][3][1]
//! ```
//!
//! On the channel a payload is preceded by a one byte length.
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;
use thiserror::Error;

use crate::poker::{Card, Chips, TableCards, Winner};

/// Maximum payload size.
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;

/// Unset card sentinel.
const NO_CARD: u8 = 0xFF;

const TYPE_VERSION: u8 = 1;
const TYPE_GAME: u8 = 2;
const TYPE_CLOSE: u8 = 3;

const GAME_GET: u8 = 1;
const GAME_SET: u8 = 2;
const GAME_PLAY: u8 = 3;

const CLOSE_INDICATOR: u8 = 1;

/// Errors returned when decoding a payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload ended before the message was complete.
    #[error("truncated payload")]
    Truncated,
    /// The payload has bytes after the end of the message.
    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),
    /// Unknown message type.
    #[error("unknown message type {0}")]
    UnknownType(u8),
    /// Unknown game indicator.
    #[error("unknown game indicator {0}")]
    UnknownGameIndicator(u8),
    /// Unknown version kind, set game status, or play sub-code.
    #[error("unknown sub-code {0:#04x}")]
    UnknownSubcode(u8),
    /// A card byte that is not a card or the unset sentinel.
    #[error("invalid card byte {0:#04x}")]
    InvalidCard(u8),
    /// Unknown winner code.
    #[error("invalid winner {0}")]
    InvalidWinner(u8),
}

/// Errors returned when encoding a message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The encoded payload doesn't fit a frame.
    #[error("payload of {0} bytes exceeds {MAX_PAYLOAD_LEN} bytes")]
    TooLarge(usize),
}

/// A game type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameType(u8);

impl GameType {
    /// Texas Hold'em.
    pub const TEXAS_HOLDEM: GameType = GameType(1);

    /// Creates a game type from its code.
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// The game type code.
    pub fn code(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GameType::TEXAS_HOLDEM => f.write_str("Texas Hold'em"),
            GameType(code) => write!(f, "Unknown game {code}"),
        }
    }
}

/// Version message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionKind {
    /// The client announces its version.
    ClientVersion,
    /// The server accepts the client version.
    Ack,
    /// The client must upgrade to the server version.
    Upgrade,
    /// The server requires version negotiation first.
    Requirement,
}

/// Game selection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetGameStatus {
    /// Client selection request.
    Request,
    /// The server accepted the selection.
    Ack,
    /// The selected game is not supported.
    Invalid,
}

/// A gameplay request sub-code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestCode {
    /// Start a new hand.
    Init,
    /// Pay the ante and get the hole cards.
    GetHole,
    /// Bet two antes and get the flop.
    GetFlop,
    /// Bet or check and get the turn.
    GetTurn,
    /// Bet or check and get the river.
    GetRiver,
    /// Fold the hand.
    Fold,
}

/// A gameplay response sub-code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    /// Hand started.
    InitAck,
    /// Hole cards dealt.
    HoleAck,
    /// Flop dealt.
    FlopAck,
    /// Turn dealt.
    TurnAck,
    /// River dealt and hand settled.
    RiverAck,
    /// Hand folded.
    FoldAck,
    /// The ante bet was rejected.
    InvalidAnteBet,
    /// The hole bet was rejected.
    InvalidHoleBet,
    /// The flop bet was rejected.
    InvalidFlopBet,
    /// The turn bet was rejected.
    InvalidTurnBet,
}

/// A gameplay request from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayRequest {
    /// The request sub-code.
    pub code: RequestCode,
    /// The bet for this request.
    pub bet: Chips,
}

impl PlayRequest {
    /// Creates a new request.
    pub fn new(code: RequestCode, bet: Chips) -> Self {
        Self { code, bet }
    }
}

/// A gameplay response from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayResponse {
    /// The response sub-code.
    pub code: ResponseCode,
    /// The hand ante.
    pub ante: Chips,
    /// The cards the client can see.
    pub cards: TableCards,
    /// The hand winner.
    pub winner: Winner,
    /// The pot.
    pub pot: Chips,
    /// The last accepted bet.
    pub bet: Chips,
    /// The player bank.
    pub bank: Chips,
}

/// A gameplay message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Play {
    /// A client request.
    Request(PlayRequest),
    /// A server response.
    Response(PlayResponse),
}

/// Message exchanged by a client and a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Version negotiation.
    Version {
        /// Protocol version.
        version: u8,
        /// The message kind.
        kind: VersionKind,
        /// Minor version.
        minor: u16,
        /// The player bank, set by the server on ack.
        bank: Chips,
    },
    /// Games list request or response.
    GetGameList {
        /// Protocol version.
        version: u8,
        /// The offered games, empty for a request.
        games: Vec<GameType>,
    },
    /// Game selection.
    SetGame {
        /// Protocol version.
        version: u8,
        /// The selected game.
        game: GameType,
        /// The selection status.
        status: SetGameStatus,
    },
    /// Gameplay request or response.
    PlayGame {
        /// Protocol version.
        version: u8,
        /// The game being played.
        game: GameType,
        /// The request or response.
        play: Play,
    },
    /// Close the session.
    CloseConnection {
        /// Protocol version.
        version: u8,
    },
}

impl Message {
    /// The protocol version carried by this message.
    pub fn version(&self) -> u8 {
        match self {
            Message::Version { version, .. }
            | Message::GetGameList { version, .. }
            | Message::SetGame { version, .. }
            | Message::PlayGame { version, .. }
            | Message::CloseConnection { version } => *version,
        }
    }

    /// Encodes this message payload.
    pub fn encode(&self) -> Result<Bytes, EncodeError> {
        let mut buf = BytesMut::with_capacity(32);
        self.encode_into(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Encodes this message as a length prefixed frame.
    pub fn encode_frame(&self) -> Result<Bytes, EncodeError> {
        let mut buf = BytesMut::with_capacity(32);
        buf.put_u8(0);
        self.encode_into(&mut buf)?;
        buf[0] = (buf.len() - 1) as u8;
        Ok(buf.freeze())
    }

    fn encode_into(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
        let start = buf.len();
        buf.put_u8(self.version());

        match self {
            Message::Version {
                kind, minor, bank, ..
            } => {
                buf.put_u8(TYPE_VERSION);
                buf.put_u8(version_kind_code(*kind));
                buf.put_u16(*minor);
                buf.put_u32(bank.amount());
            }
            Message::GetGameList { games, .. } => {
                if games.len() > u8::MAX as usize {
                    return Err(EncodeError::TooLarge(4 + games.len()));
                }

                buf.put_u8(TYPE_GAME);
                buf.put_u8(GAME_GET);
                buf.put_u8(games.len() as u8);
                for game in games {
                    buf.put_u8(game.code());
                }
            }
            Message::SetGame { game, status, .. } => {
                buf.put_u8(TYPE_GAME);
                buf.put_u8(GAME_SET);
                buf.put_u8(game.code());
                buf.put_u8(match status {
                    SetGameStatus::Request => 0,
                    SetGameStatus::Ack => 1,
                    SetGameStatus::Invalid => 2,
                });
            }
            Message::PlayGame { game, play, .. } => {
                buf.put_u8(TYPE_GAME);
                buf.put_u8(GAME_PLAY);
                buf.put_u8(game.code());
                match play {
                    Play::Request(req) => {
                        buf.put_u8(request_code(req.code));
                        buf.put_u32(req.bet.amount());
                    }
                    Play::Response(res) => {
                        buf.put_u8(response_code(res.code));
                        buf.put_u32(res.ante.amount());
                        for card in res.cards.slots() {
                            buf.put_u8(card.map(|c| c.index()).unwrap_or(NO_CARD));
                        }
                        buf.put_u8(res.winner.code());
                        buf.put_u32(res.pot.amount());
                        buf.put_u32(res.bet.amount());
                        buf.put_u32(res.bank.amount());
                    }
                }
            }
            Message::CloseConnection { .. } => {
                buf.put_u8(TYPE_CLOSE);
                buf.put_u8(CLOSE_INDICATOR);
            }
        }

        let len = buf.len() - start;
        if len > MAX_PAYLOAD_LEN {
            return Err(EncodeError::TooLarge(len));
        }

        Ok(())
    }

    /// Decodes a message payload.
    pub fn decode(mut buf: &[u8]) -> Result<Message, DecodeError> {
        let buf = &mut buf;
        let version = get_u8(buf)?;

        let msg = match get_u8(buf)? {
            TYPE_VERSION => {
                let kind = get_u8(buf)?;
                let kind = version_kind_from_code(kind).ok_or(DecodeError::UnknownSubcode(kind))?;
                Message::Version {
                    version,
                    kind,
                    minor: get_u16(buf)?,
                    bank: get_chips(buf)?,
                }
            }
            TYPE_GAME => match get_u8(buf)? {
                GAME_GET => {
                    let count = get_u8(buf)? as usize;
                    let mut games = Vec::with_capacity(count);
                    for _ in 0..count {
                        games.push(GameType(get_u8(buf)?));
                    }
                    Message::GetGameList { version, games }
                }
                GAME_SET => {
                    let game = GameType(get_u8(buf)?);
                    let status = match get_u8(buf)? {
                        0 => SetGameStatus::Request,
                        1 => SetGameStatus::Ack,
                        2 => SetGameStatus::Invalid,
                        code => return Err(DecodeError::UnknownSubcode(code)),
                    };
                    Message::SetGame {
                        version,
                        game,
                        status,
                    }
                }
                GAME_PLAY => {
                    let game = GameType(get_u8(buf)?);
                    let play = decode_play(buf)?;
                    Message::PlayGame {
                        version,
                        game,
                        play,
                    }
                }
                indicator => return Err(DecodeError::UnknownGameIndicator(indicator)),
            },
            TYPE_CLOSE => match get_u8(buf)? {
                CLOSE_INDICATOR => Message::CloseConnection { version },
                code => return Err(DecodeError::UnknownSubcode(code)),
            },
            ty => return Err(DecodeError::UnknownType(ty)),
        };

        if buf.has_remaining() {
            return Err(DecodeError::TrailingBytes(buf.remaining()));
        }

        Ok(msg)
    }

    /// Decodes a length prefixed frame.
    pub fn decode_frame(frame: &[u8]) -> Result<Message, DecodeError> {
        let (&len, payload) = frame.split_first().ok_or(DecodeError::Truncated)?;
        let len = len as usize;
        if payload.len() < len {
            return Err(DecodeError::Truncated);
        } else if payload.len() > len {
            return Err(DecodeError::TrailingBytes(payload.len() - len));
        }

        Self::decode(payload)
    }
}

fn decode_play(buf: &mut &[u8]) -> Result<Play, DecodeError> {
    let code = get_u8(buf)?;

    if let Some(code) = request_from_code(code) {
        return Ok(Play::Request(PlayRequest {
            code,
            bet: get_chips(buf)?,
        }));
    }

    let code = response_from_code(code).ok_or(DecodeError::UnknownSubcode(code))?;
    let ante = get_chips(buf)?;

    let mut slots = [None; TableCards::COUNT];
    for slot in slots.iter_mut() {
        *slot = match get_u8(buf)? {
            NO_CARD => None,
            b => Some(Card::from_index(b).ok_or(DecodeError::InvalidCard(b))?),
        };
    }

    let winner = get_u8(buf)?;
    let winner = Winner::from_code(winner).ok_or(DecodeError::InvalidWinner(winner))?;

    Ok(Play::Response(PlayResponse {
        code,
        ante,
        cards: TableCards::from_slots(slots),
        winner,
        pot: get_chips(buf)?,
        bet: get_chips(buf)?,
        bank: get_chips(buf)?,
    }))
}

fn get_u8(buf: &mut &[u8]) -> Result<u8, DecodeError> {
    if buf.remaining() < 1 {
        return Err(DecodeError::Truncated);
    }
    Ok(buf.get_u8())
}

fn get_u16(buf: &mut &[u8]) -> Result<u16, DecodeError> {
    if buf.remaining() < 2 {
        return Err(DecodeError::Truncated);
    }
    Ok(buf.get_u16())
}

fn get_chips(buf: &mut &[u8]) -> Result<Chips, DecodeError> {
    if buf.remaining() < 4 {
        return Err(DecodeError::Truncated);
    }
    Ok(Chips::new(buf.get_u32()))
}

fn version_kind_code(kind: VersionKind) -> u8 {
    match kind {
        VersionKind::ClientVersion => 1,
        VersionKind::Ack => 2,
        VersionKind::Upgrade => 3,
        VersionKind::Requirement => 4,
    }
}

fn version_kind_from_code(code: u8) -> Option<VersionKind> {
    match code {
        1 => Some(VersionKind::ClientVersion),
        2 => Some(VersionKind::Ack),
        3 => Some(VersionKind::Upgrade),
        4 => Some(VersionKind::Requirement),
        _ => None,
    }
}

fn request_code(code: RequestCode) -> u8 {
    match code {
        RequestCode::Init => 1,
        RequestCode::GetHole => 2,
        RequestCode::GetFlop => 3,
        RequestCode::GetTurn => 4,
        RequestCode::GetRiver => 5,
        RequestCode::Fold => 6,
    }
}

fn request_from_code(code: u8) -> Option<RequestCode> {
    match code {
        1 => Some(RequestCode::Init),
        2 => Some(RequestCode::GetHole),
        3 => Some(RequestCode::GetFlop),
        4 => Some(RequestCode::GetTurn),
        5 => Some(RequestCode::GetRiver),
        6 => Some(RequestCode::Fold),
        _ => None,
    }
}

fn response_code(code: ResponseCode) -> u8 {
    match code {
        ResponseCode::InitAck => 0x81,
        ResponseCode::HoleAck => 0x82,
        ResponseCode::FlopAck => 0x83,
        ResponseCode::TurnAck => 0x84,
        ResponseCode::RiverAck => 0x85,
        ResponseCode::FoldAck => 0x86,
        ResponseCode::InvalidAnteBet => 0x87,
        ResponseCode::InvalidHoleBet => 0x88,
        ResponseCode::InvalidFlopBet => 0x89,
        ResponseCode::InvalidTurnBet => 0x8A,
    }
}

fn response_from_code(code: u8) -> Option<ResponseCode> {
    match code {
        0x81 => Some(ResponseCode::InitAck),
        0x82 => Some(ResponseCode::HoleAck),
        0x83 => Some(ResponseCode::FlopAck),
        0x84 => Some(ResponseCode::TurnAck),
        0x85 => Some(ResponseCode::RiverAck),
        0x86 => Some(ResponseCode::FoldAck),
        0x87 => Some(ResponseCode::InvalidAnteBet),
        0x88 => Some(ResponseCode::InvalidHoleBet),
        0x89 => Some(ResponseCode::InvalidFlopBet),
        0x8A => Some(ResponseCode::InvalidTurnBet),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn version_layout() {
        let msg = Message::Version {
            version: 1,
            kind: VersionKind::Ack,
            minor: 0x0102,
            bank: Chips::new(1000),
        };

        let bytes = msg.encode().unwrap();
        assert_eq!(&bytes[..], &[1, 1, 2, 1, 2, 0, 0, 0x03, 0xE8]);
        assert_eq!(Message::decode(&bytes).unwrap(), msg);

        let frame = msg.encode_frame().unwrap();
        assert_eq!(frame[0] as usize, bytes.len());
        assert_eq!(&frame[1..], &bytes[..]);
        assert_eq!(Message::decode_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn play_layout() {
        let msg = Message::PlayGame {
            version: 1,
            game: GameType::TEXAS_HOLDEM,
            play: Play::Request(PlayRequest::new(RequestCode::GetHole, Chips::new(10))),
        };
        let bytes = msg.encode().unwrap();
        assert_eq!(&bytes[..], &[1, 2, 3, 1, 2, 0, 0, 0, 10]);

        let mut cards = TableCards::default();
        cards.player = [Card::from_index(0), Card::from_index(51)];
        let msg = Message::PlayGame {
            version: 1,
            game: GameType::TEXAS_HOLDEM,
            play: Play::Response(PlayResponse {
                code: ResponseCode::HoleAck,
                ante: Chips::new(10),
                cards,
                winner: Winner::NotSet,
                pot: Chips::ZERO,
                bet: Chips::new(10),
                bank: Chips::new(990),
            }),
        };

        let bytes = msg.encode().unwrap();
        assert_eq!(bytes.len(), 31);
        assert_eq!(bytes[4], 0x82);
        assert_eq!(&bytes[9..18], &[0, 51, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(Message::decode(&bytes).unwrap(), msg);
    }

    #[test]
    fn close_and_game_list_layout() {
        let msg = Message::CloseConnection { version: 1 };
        assert_eq!(&msg.encode().unwrap()[..], &[1, 3, 1]);

        let msg = Message::GetGameList {
            version: 1,
            games: vec![],
        };
        assert_eq!(&msg.encode().unwrap()[..], &[1, 2, 1, 0]);

        let msg = Message::GetGameList {
            version: 1,
            games: vec![GameType::TEXAS_HOLDEM],
        };
        assert_eq!(&msg.encode().unwrap()[..], &[1, 2, 1, 1, 1]);
    }

    #[test]
    fn decode_errors() {
        assert_eq!(Message::decode(&[]), Err(DecodeError::Truncated));
        assert_eq!(Message::decode(&[1]), Err(DecodeError::Truncated));
        assert_eq!(Message::decode(&[1, 9]), Err(DecodeError::UnknownType(9)));
        assert_eq!(
            Message::decode(&[1, 2, 7]),
            Err(DecodeError::UnknownGameIndicator(7))
        );
        assert_eq!(
            Message::decode(&[1, 2, 3, 1, 0x20, 0, 0, 0, 0]),
            Err(DecodeError::UnknownSubcode(0x20))
        );
        assert_eq!(
            Message::decode(&[1, 2, 2, 1, 3]),
            Err(DecodeError::UnknownSubcode(3))
        );
        assert_eq!(
            Message::decode(&[1, 1, 5, 0, 0, 0, 0, 0, 0]),
            Err(DecodeError::UnknownSubcode(5))
        );
        assert_eq!(
            Message::decode(&[1, 3, 1, 0]),
            Err(DecodeError::TrailingBytes(1))
        );
        assert_eq!(
            Message::decode(&[1, 2, 1, 3, 1]),
            Err(DecodeError::Truncated)
        );

        // Response with an invalid card byte.
        let mut bytes = [0u8; 31];
        bytes[..5].copy_from_slice(&[1, 2, 3, 1, 0x81]);
        bytes[9..18].fill(0xFF);
        bytes[12] = 52;
        assert_eq!(Message::decode(&bytes), Err(DecodeError::InvalidCard(52)));

        bytes[12] = 0xFF;
        bytes[18] = 4;
        assert_eq!(Message::decode(&bytes), Err(DecodeError::InvalidWinner(4)));

        bytes[18] = 0;
        assert!(Message::decode(&bytes).is_ok());
    }

    #[test]
    fn decode_frame_errors() {
        assert_eq!(Message::decode_frame(&[]), Err(DecodeError::Truncated));
        assert_eq!(Message::decode_frame(&[3, 1, 3]), Err(DecodeError::Truncated));
        assert_eq!(
            Message::decode_frame(&[2, 1, 3, 1]),
            Err(DecodeError::TrailingBytes(1))
        );
        assert_eq!(
            Message::decode_frame(&[3, 1, 3, 1]).unwrap(),
            Message::CloseConnection { version: 1 }
        );
    }

    #[test]
    fn payload_too_large() {
        let msg = Message::GetGameList {
            version: 1,
            games: vec![GameType::TEXAS_HOLDEM; 252],
        };
        assert_eq!(msg.encode(), Err(EncodeError::TooLarge(256)));

        let msg = Message::GetGameList {
            version: 1,
            games: vec![GameType::TEXAS_HOLDEM; 251],
        };
        assert_eq!(msg.encode().unwrap().len(), MAX_PAYLOAD_LEN);
    }

    fn chips() -> impl Strategy<Value = Chips> {
        any::<u32>().prop_map(Chips::new)
    }

    fn card() -> impl Strategy<Value = Option<Card>> {
        prop::option::of((0u8..52).prop_map(|i| Card::from_index(i).unwrap()))
    }

    fn request_code() -> impl Strategy<Value = RequestCode> {
        prop::sample::select(vec![
            RequestCode::Init,
            RequestCode::GetHole,
            RequestCode::GetFlop,
            RequestCode::GetTurn,
            RequestCode::GetRiver,
            RequestCode::Fold,
        ])
    }

    fn response_code() -> impl Strategy<Value = ResponseCode> {
        prop::sample::select(vec![
            ResponseCode::InitAck,
            ResponseCode::HoleAck,
            ResponseCode::FlopAck,
            ResponseCode::TurnAck,
            ResponseCode::RiverAck,
            ResponseCode::FoldAck,
            ResponseCode::InvalidAnteBet,
            ResponseCode::InvalidHoleBet,
            ResponseCode::InvalidFlopBet,
            ResponseCode::InvalidTurnBet,
        ])
    }

    fn play() -> impl Strategy<Value = Play> {
        let request = (request_code(), chips())
            .prop_map(|(code, bet)| Play::Request(PlayRequest { code, bet }));

        let winner = (0u8..4).prop_map(|w| Winner::from_code(w).unwrap());
        let response = (
            response_code(),
            chips(),
            prop::array::uniform9(card()),
            winner,
            (chips(), chips(), chips()),
        )
            .prop_map(|(code, ante, slots, winner, (pot, bet, bank))| {
                Play::Response(PlayResponse {
                    code,
                    ante,
                    cards: TableCards::from_slots(slots),
                    winner,
                    pot,
                    bet,
                    bank,
                })
            });

        prop_oneof![request, response]
    }

    fn message() -> impl Strategy<Value = Message> {
        let kind = prop::sample::select(vec![
            VersionKind::ClientVersion,
            VersionKind::Ack,
            VersionKind::Upgrade,
            VersionKind::Requirement,
        ]);
        let status = prop::sample::select(vec![
            SetGameStatus::Request,
            SetGameStatus::Ack,
            SetGameStatus::Invalid,
        ]);
        let game = any::<u8>().prop_map(GameType::new);

        prop_oneof![
            (any::<u8>(), kind, any::<u16>(), chips()).prop_map(|(version, kind, minor, bank)| {
                Message::Version {
                    version,
                    kind,
                    minor,
                    bank,
                }
            }),
            (any::<u8>(), prop::collection::vec(game.clone(), 0..16))
                .prop_map(|(version, games)| Message::GetGameList { version, games }),
            (any::<u8>(), game.clone(), status).prop_map(|(version, game, status)| {
                Message::SetGame {
                    version,
                    game,
                    status,
                }
            }),
            (any::<u8>(), game, play()).prop_map(|(version, game, play)| Message::PlayGame {
                version,
                game,
                play,
            }),
            any::<u8>().prop_map(|version| Message::CloseConnection { version }),
        ]
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(msg in message()) {
            let bytes = msg.encode().unwrap();
            prop_assert!(bytes.len() <= MAX_PAYLOAD_LEN);
            prop_assert_eq!(Message::decode(&bytes).unwrap(), msg.clone());

            let frame = msg.encode_frame().unwrap();
            prop_assert_eq!(Message::decode_frame(&frame).unwrap(), msg);
        }

        #[test]
        fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            let _ = Message::decode(&bytes);
        }
    }
}
