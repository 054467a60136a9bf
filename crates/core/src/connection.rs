// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Noise protocol encrypted connection types.
//!
//! Each message frame travels as a single Noise transport message preceded by
//! its two bytes big-endian length.
use snow::{TransportState, params::NoiseParams};
use std::{io, sync::LazyLock};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::message::{DecodeError, EncodeError, MAX_PAYLOAD_LEN, Message};

static NOISE_PARAMS: LazyLock<NoiseParams> =
    LazyLock::new(|| "Noise_NN_25519_ChaChaPoly_BLAKE2s".parse().unwrap());

/// Noise message buffer length.
const MAX_NOISE_LEN: usize = 1024;

/// Largest Noise message for a frame: length byte, payload, and AEAD tag.
const MAX_FRAME_NOISE_LEN: usize = 1 + MAX_PAYLOAD_LEN + 16;

/// Connection errors.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The underlying stream failed.
    #[error("connection i/o error: {0}")]
    Io(#[from] io::Error),
    /// Handshake or decryption failure.
    #[error("noise error: {0}")]
    Noise(#[from] snow::Error),
    /// The peer sent a message that doesn't decode.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// The message doesn't fit a frame.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
    /// The peer sent a Noise message larger than any valid frame.
    #[error("noise message of {0} bytes too large")]
    TooLarge(usize),
}

impl ConnectionError {
    /// Checks if the connection cannot be used after this error.
    ///
    /// Decode and encode errors affect a single message, the connection can
    /// still be used.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConnectionError::Decode(_) | ConnectionError::Encode(_))
    }
}

/// A noise protocol encrypted connection for [Message].
pub struct EncryptedConnection<S> {
    stream: S,
    transport: TransportState,
}

impl<S> EncryptedConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Runs the responder handshake on a stream accepted by a server.
    pub async fn accept(mut stream: S) -> Result<Self, ConnectionError> {
        let mut noise = snow::Builder::new(NOISE_PARAMS.clone()).build_responder()?;
        let mut buf = [0u8; MAX_NOISE_LEN];

        // <- e
        let payload = read_noise(&mut stream).await?;
        noise.read_message(&payload, &mut buf)?;

        // -> e, ee
        let len = noise.write_message(&[], &mut buf)?;
        write_noise(&mut stream, &buf[..len]).await?;

        let transport = noise.into_transport_mode()?;
        Ok(Self { stream, transport })
    }

    /// Runs the initiator handshake on a stream connected to a server.
    pub async fn connect(mut stream: S) -> Result<Self, ConnectionError> {
        let mut noise = snow::Builder::new(NOISE_PARAMS.clone()).build_initiator()?;
        let mut buf = [0u8; MAX_NOISE_LEN];

        // -> e
        let len = noise.write_message(&[], &mut buf)?;
        write_noise(&mut stream, &buf[..len]).await?;

        // <- e, ee
        let payload = read_noise(&mut stream).await?;
        noise.read_message(&payload, &mut buf)?;

        let transport = noise.into_transport_mode()?;
        Ok(Self { stream, transport })
    }

    /// Sends a [Message].
    pub async fn send(&mut self, msg: &Message) -> Result<(), ConnectionError> {
        let frame = msg.encode_frame()?;
        self.send_frame(&frame).await
    }

    async fn send_frame(&mut self, frame: &[u8]) -> Result<(), ConnectionError> {
        let mut buf = [0u8; MAX_NOISE_LEN];
        let len = self.transport.write_message(frame, &mut buf)?;
        write_noise(&mut self.stream, &buf[..len]).await?;
        Ok(())
    }

    /// Waits for a [Message], returns `None` if the peer closed the stream.
    pub async fn recv(&mut self) -> Option<Result<Message, ConnectionError>> {
        let payload = match read_noise(&mut self.stream).await {
            Ok(payload) => payload,
            Err(ConnectionError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(e) => return Some(Err(e)),
        };

        let mut buf = [0u8; MAX_NOISE_LEN];
        let res = self
            .transport
            .read_message(&payload, &mut buf)
            .map_err(ConnectionError::from)
            .and_then(|len| Message::decode_frame(&buf[..len]).map_err(ConnectionError::from));

        Some(res)
    }

    /// Closes this connection.
    pub async fn close(&mut self) {
        let _ = self.stream.shutdown().await;
    }
}

async fn read_noise<S: AsyncRead + Unpin>(stream: &mut S) -> Result<Vec<u8>, ConnectionError> {
    let len = stream.read_u16().await? as usize;
    if len > MAX_FRAME_NOISE_LEN {
        return Err(ConnectionError::TooLarge(len));
    }

    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload).await?;
    Ok(payload)
}

async fn write_noise<S: AsyncWrite + Unpin>(
    stream: &mut S,
    buf: &[u8],
) -> Result<(), ConnectionError> {
    stream.write_u16(buf.len() as u16).await?;
    stream.write_all(buf).await?;
    stream.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        message::{GameType, Play, PlayRequest, RequestCode, VersionKind},
        poker::Chips,
    };
    use tokio::{
        io::duplex,
        net::{TcpListener, TcpStream},
    };

    async fn pair() -> (
        EncryptedConnection<tokio::io::DuplexStream>,
        EncryptedConnection<tokio::io::DuplexStream>,
    ) {
        let (c, s) = duplex(4096);
        let server = tokio::spawn(EncryptedConnection::accept(s));
        let client = EncryptedConnection::connect(c).await.unwrap();
        let server = server.await.unwrap().unwrap();
        (client, server)
    }

    fn version() -> Message {
        Message::Version {
            version: 1,
            kind: VersionKind::ClientVersion,
            minor: 0,
            bank: Chips::ZERO,
        }
    }

    #[tokio::test]
    async fn send_and_recv() {
        let (mut client, mut server) = pair().await;

        client.send(&version()).await.unwrap();
        let msg = Message::PlayGame {
            version: 1,
            game: GameType::TEXAS_HOLDEM,
            play: Play::Request(PlayRequest::new(RequestCode::GetHole, Chips::new(10))),
        };
        client.send(&msg).await.unwrap();

        assert_eq!(server.recv().await.unwrap().unwrap(), version());
        assert_eq!(server.recv().await.unwrap().unwrap(), msg);

        let reply = Message::CloseConnection { version: 1 };
        server.send(&reply).await.unwrap();
        assert_eq!(client.recv().await.unwrap().unwrap(), reply);
    }

    #[tokio::test]
    async fn clean_close() {
        let (mut client, mut server) = pair().await;
        client.close().await;
        drop(client);
        assert!(server.recv().await.is_none());
    }

    #[tokio::test]
    async fn decode_error_is_not_fatal() {
        let (mut client, mut server) = pair().await;

        // A frame with an unknown message type.
        client.send_frame(&[2, 1, 9]).await.unwrap();
        client.send(&version()).await.unwrap();

        let err = server.recv().await.unwrap().unwrap_err();
        assert!(matches!(err, ConnectionError::Decode(DecodeError::UnknownType(9))));
        assert!(!err.is_fatal());

        assert_eq!(server.recv().await.unwrap().unwrap(), version());
    }

    #[tokio::test]
    async fn corrupted_message_is_fatal() {
        let (c, s) = duplex(4096);
        let server = tokio::spawn(async move {
            let mut server = EncryptedConnection::accept(s).await.unwrap();
            server.recv().await.unwrap().unwrap_err()
        });

        let mut client = EncryptedConnection::connect(c).await.unwrap();
        // Write garbage bypassing the encryption.
        write_noise(&mut client.stream, &[0xAB; 40]).await.unwrap();

        let err = server.await.unwrap();
        assert!(matches!(err, ConnectionError::Noise(_)));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn oversized_message_is_rejected() {
        let (mut c, s) = duplex(4096);
        let server = tokio::spawn(async move {
            let mut s = s;
            read_noise(&mut s).await.unwrap_err()
        });

        c.write_u16(u16::MAX).await.unwrap();
        let err = server.await.unwrap();
        assert!(matches!(err, ConnectionError::TooLarge(_)));
    }

    #[tokio::test]
    async fn encrypted_tcp_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut con = EncryptedConnection::accept(stream).await.unwrap();
            let msg = con.recv().await.unwrap().unwrap();
            con.send(&msg).await.unwrap();
        });

        let stream = TcpStream::connect(addr).await.unwrap();
        let mut con = EncryptedConnection::connect(stream).await.unwrap();
        con.send(&version()).await.unwrap();
        assert_eq!(con.recv().await.unwrap().unwrap(), version());

        server.await.unwrap();
    }
}
