// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! AGMP server entry point.
use ahash::AHashMap;
use anyhow::{Result, anyhow};
use log::{error, info, warn};
use parking_lot::Mutex;
use std::{
    future::Future,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{self, AtomicU64},
    },
    time::Instant,
};
use tokio::{
    net::{TcpListener, TcpStream},
    signal,
    sync::{broadcast, mpsc},
    time::{self, Duration},
};

use agmp_core::{connection::EncryptedConnection, poker::Chips};

use crate::{
    game::Game,
    session::{Session, SessionAction},
};

/// Server config.
#[derive(Debug, Clone)]
pub struct Config {
    /// The server listening address.
    pub address: String,
    /// The server listening port.
    pub port: u16,
    /// The minimum ante for a hand.
    pub min_ante: Chips,
    /// The initial bank for a new session.
    pub bank: Chips,
    /// The protocol version.
    pub version: u8,
    /// The protocol minor version.
    pub minor: u16,
    /// Optional read deadline for a session.
    pub read_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 9871,
            min_ante: Chips::new(10),
            bank: Chips::new(1000),
            version: 1,
            minor: 0,
            read_timeout: None,
        }
    }
}

/// A unique session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Create a new unique session id.
    pub fn new_id() -> SessionId {
        static LAST_ID: AtomicU64 = AtomicU64::new(1);
        SessionId(LAST_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

/// A live session details.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// The client address.
    pub addr: SocketAddr,
    /// When the session started.
    pub started: Instant,
}

/// The live sessions on this server.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<AHashMap<SessionId, SessionInfo>>>,
}

impl SessionRegistry {
    /// Adds a session.
    pub fn insert(&self, id: SessionId, info: SessionInfo) {
        self.sessions.lock().insert(id, info);
    }

    /// Removes a session, returns its info if the session was live.
    pub fn remove(&self, id: SessionId) -> Option<SessionInfo> {
        self.sessions.lock().remove(&id)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Checks if there are no live sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Calls `f` for each live session.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(SessionId, &SessionInfo),
    {
        for (id, info) in self.sessions.lock().iter() {
            f(*id, info);
        }
    }
}

/// Events sent by a session task to the server.
#[derive(Debug)]
enum SessionEvent {
    /// The session has terminated.
    Terminated(SessionId),
}

/// The server that handles client connections.
struct Server {
    /// The server config shared by all sessions.
    config: Arc<Config>,
    /// The live sessions.
    registry: SessionRegistry,
    /// The server listener.
    listener: TcpListener,
    /// Sessions events sender cloned by each session.
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    /// Sessions events receiver.
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    /// Shutdown notification channel.
    shutdown_broadcast_tx: broadcast::Sender<()>,
    /// Shutdown sender cloned by each session.
    shutdown_complete_tx: mpsc::Sender<()>,
}

/// Client session handler.
struct Handler {
    /// This session id.
    id: SessionId,
    /// The protocol state.
    session: Session,
    /// Read deadline.
    read_timeout: Option<Duration>,
    /// Channel for listening shutdown notification.
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    /// Sender that drops when this session is done.
    _shutdown_complete_tx: mpsc::Sender<()>,
}

/// Server entry point, runs until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.address, config.port);
    info!("Starting server listening on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow!("Tcp listener bind error: {e}"))?;

    serve(listener, config, SessionRegistry::default(), signal::ctrl_c()).await
}

/// Serves connections from a listener until the shutdown future completes.
pub async fn serve<F>(
    listener: TcpListener,
    config: Config,
    registry: SessionRegistry,
    shutdown: F,
) -> Result<()>
where
    F: Future,
{
    let (shutdown_broadcast_tx, _) = broadcast::channel(1);
    let (shutdown_complete_tx, mut shutdown_complete_rx) = mpsc::channel(1);
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let mut server = Server {
        config: Arc::new(config),
        registry,
        listener,
        events_tx,
        events_rx,
        shutdown_broadcast_tx,
        shutdown_complete_tx,
    };

    tokio::select! {
        res = server.run() => {
            res.map_err(|e| anyhow!("Tcp listener accept error: {e}"))?;
        }
        _ = shutdown => {
            info!("Received shutdown signal...");
        }
    }

    let Server {
        registry,
        mut events_rx,
        shutdown_broadcast_tx,
        shutdown_complete_tx,
        ..
    } = server;

    registry.for_each(|id, info| info!("Closing session {} from {}", id.0, info.addr));

    // Notify all sessions to start shutdown then wait for all sessions to
    // terminate and drop their shutdown channel.
    drop(shutdown_broadcast_tx);
    drop(shutdown_complete_tx);
    let _ = shutdown_complete_rx.recv().await;

    // Sessions send their events before dropping the shutdown channel.
    while let Ok(event) = events_rx.try_recv() {
        handle_event(&registry, event);
    }

    Ok(())
}

fn handle_event(registry: &SessionRegistry, event: SessionEvent) {
    match event {
        SessionEvent::Terminated(id) => {
            if let Some(info) = registry.remove(id) {
                info!(
                    "Session {} from {} ended after {:.1}s, {} live sessions",
                    id.0,
                    info.addr,
                    info.started.elapsed().as_secs_f64(),
                    registry.len()
                );
            }
        }
    }
}

impl Server {
    /// Runs the server.
    async fn run(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                res = self.listener.accept() => {
                    let (socket, addr) = res?;
                    self.spawn_session(socket, addr);
                }
                Some(event) = self.events_rx.recv() => {
                    handle_event(&self.registry, event);
                }
            }
        }
    }

    fn spawn_session(&self, socket: TcpStream, addr: SocketAddr) {
        let id = SessionId::new_id();
        info!("Accepted connection {} from {addr}", id.0);

        self.registry.insert(
            id,
            SessionInfo {
                addr,
                started: Instant::now(),
            },
        );

        let game = Game::new(self.config.min_ante, self.config.bank);
        let mut handler = Handler {
            id,
            session: Session::new(self.config.version, self.config.minor, game),
            read_timeout: self.config.read_timeout,
            shutdown_broadcast_rx: self.shutdown_broadcast_tx.subscribe(),
            _shutdown_complete_tx: self.shutdown_complete_tx.clone(),
        };

        let events_tx = self.events_tx.clone();

        // Spawn a task to handle session messages.
        tokio::spawn(async move {
            if let Err(err) = handler.run(socket).await {
                error!("Session {} from {addr} {err}", id.0);
            }

            let _ = events_tx.send(SessionEvent::Terminated(id));
            drop(handler);
        });
    }
}

impl Handler {
    /// Handle session messages.
    async fn run(&mut self, socket: TcpStream) -> Result<()> {
        let mut conn = tokio::select! {
            _ = self.shutdown_broadcast_rx.recv() => {
                return Ok(());
            }
            res = with_timeout(self.read_timeout, EncryptedConnection::accept(socket)) => {
                res.map_err(|_| anyhow!("handshake timeout"))??
            }
        };

        let res = loop {
            tokio::select! {
                _ = self.shutdown_broadcast_rx.recv() => {
                    break Ok(());
                }
                res = with_timeout(self.read_timeout, conn.recv()) => match res {
                    Ok(Some(Ok(msg))) => match self.session.handle_message(msg) {
                        SessionAction::Send(reply) => {
                            if let Err(err) = conn.send(&reply).await {
                                break Err(err.into());
                            }
                        }
                        SessionAction::Close => {
                            info!("Session {} closed by client", self.id.0);
                            break Ok(());
                        }
                        SessionAction::Ignore => {}
                    },
                    Ok(Some(Err(err))) if !err.is_fatal() => {
                        warn!("Session {} dropped message: {err}", self.id.0);
                    }
                    Ok(Some(Err(err))) => break Err(err.into()),
                    Ok(None) => break Ok(()),
                    Err(_) => break Err(anyhow!("read timeout")),
                },
            }
        };

        conn.close().await;

        res
    }
}

/// Awaits a future with an optional deadline.
async fn with_timeout<F: Future>(
    timeout: Option<Duration>,
    fut: F,
) -> Result<F::Output, time::error::Elapsed> {
    match timeout {
        Some(timeout) => time::timeout(timeout, fut).await,
        None => Ok(fut.await),
    }
}
