//! Connection establishment, symbol negotiation and per-turn move exchange.

use std::boxed::Box;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::string::String;

use log::{debug, info, warn};
use tokio::net::{TcpListener, UdpSocket};

use crate::{
    common::{Move, Symbol},
    config::{NetConfig, DEFAULT_BIND},
    protocol::{Message, Role, SessionError, SessionState},
    transport::{tcp::TcpTransport, Transport},
    turn::TurnCoordinator,
};

/// Any routable address works for picking the outbound interface.
const ROUTE_LOOKUP_ADDR: (Ipv4Addr, u16) = (Ipv4Addr::new(192, 0, 2, 1), 9);

/// One side of a networked game.
///
/// Turn order is always X then O. The host picks its symbol and the joiner
/// plays the complement.
///
/// A peer started with a name announces it right after the symbol
/// assignment and never waits for a reply. Names are picked up while
/// waiting for the opponent's first move.
pub struct Session {
    role: Role,
    state: SessionState,
    local: Symbol,
    turns: TurnCoordinator,
    opponent_name: Option<String>,
    peer_moved: bool,
    transport: Box<dyn Transport>,
}

/// Check that `host` is a literal IPv4/IPv6 address before trying to connect.
pub fn parse_address(host: &str, port: u16) -> Result<SocketAddr, SessionError> {
    let ip: IpAddr = host
        .trim()
        .parse()
        .map_err(|_| SessionError::InvalidAddress(host.trim().into()))?;
    Ok(SocketAddr::new(ip, port))
}

/// Address a joiner should dial: `bound` with a wildcard IP replaced by
/// `outbound`, or loopback if the outbound interface is unknown.
pub fn advertised_addr(bound: SocketAddr, outbound: Option<IpAddr>) -> SocketAddr {
    if !bound.ip().is_unspecified() {
        return bound;
    }
    let ip = outbound
        .filter(|ip| !ip.is_unspecified())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
    SocketAddr::new(ip, bound.port())
}

/// IP of the interface used for outbound traffic. Connecting a UDP socket
/// sends nothing; it only picks a route.
pub async fn outbound_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind(SocketAddr::new(DEFAULT_BIND, 0)).await.ok()?;
    socket.connect(ROUTE_LOOKUP_ADDR).await.ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

impl Session {
    /// Bind the host's listening socket on every interface.
    pub async fn listen(config: &NetConfig) -> Result<TcpListener, SessionError> {
        let listener = TcpListener::bind(SocketAddr::new(DEFAULT_BIND, config.port)).await?;
        info!("listening on {}", listener.local_addr()?);
        Ok(listener)
    }

    /// Where joiners can reach `listener`, for showing to the host.
    pub async fn advertised_addr(listener: &TcpListener) -> Result<SocketAddr, SessionError> {
        Ok(advertised_addr(listener.local_addr()?, outbound_ip().await))
    }

    /// Accept exactly one joiner and negotiate as host playing `local`.
    pub async fn accept(
        listener: &TcpListener,
        local: Symbol,
        config: &NetConfig,
    ) -> Result<Self, SessionError> {
        let (stream, addr) = listener.accept().await?;
        info!("joiner connected from {}", addr);
        let transport = Box::new(TcpTransport::new(stream));
        Self::negotiate_host(transport, local, config.player_name.clone()).await
    }

    /// Connect to a host at `host:config.port` and negotiate as joiner.
    pub async fn join(host: &str, config: &NetConfig) -> Result<Self, SessionError> {
        let addr = parse_address(host, config.port)?;
        info!("connecting to {} (timeout {:?})", addr, config.connect_timeout);
        let transport = TcpTransport::connect(addr, config.connect_timeout).await?;
        Self::negotiate_join(Box::new(transport), config.player_name.clone()).await
    }

    /// Host side of negotiation over an already-connected transport.
    pub async fn negotiate_host(
        transport: Box<dyn Transport>,
        local: Symbol,
        name: Option<String>,
    ) -> Result<Self, SessionError> {
        let mut session = Self::connected(Role::Host, local, transport);
        session.transport.send(Message::Assign(local.opponent())).await?;
        debug!("assigned {} to joiner", local.opponent());
        session.announce(name).await?;
        session.start_playing();
        Ok(session)
    }

    /// Joiner side of negotiation: block until the host assigns our symbol.
    pub async fn negotiate_join(
        mut transport: Box<dyn Transport>,
        name: Option<String>,
    ) -> Result<Self, SessionError> {
        let local = match transport.recv().await? {
            Message::Assign(symbol) => symbol,
            other => {
                return Err(SessionError::UnexpectedMessage {
                    state: SessionState::Negotiating,
                    expected: "symbol assignment",
                    got: other.kind(),
                })
            }
        };
        debug!("host assigned us {}", local);
        let mut session = Self::connected(Role::Joiner, local, transport);
        session.announce(name).await?;
        session.start_playing();
        Ok(session)
    }

    fn connected(role: Role, local: Symbol, transport: Box<dyn Transport>) -> Self {
        Self {
            role,
            state: SessionState::Negotiating,
            local,
            turns: TurnCoordinator::new(Symbol::X).with_local(local),
            opponent_name: None,
            peer_moved: false,
            transport,
        }
    }

    async fn announce(&mut self, name: Option<String>) -> Result<(), SessionError> {
        if let Some(name) = name {
            debug!("announcing ourselves as {:?}", name);
            self.transport.send(Message::Name(name)).await?;
        }
        Ok(())
    }

    fn start_playing(&mut self) {
        self.state = SessionState::Playing;
        info!("{} playing {}", self.role, self.local);
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn local(&self) -> Symbol {
        self.local
    }

    pub fn remote(&self) -> Symbol {
        self.local.opponent()
    }

    pub fn opponent_name(&self) -> Option<&str> {
        self.opponent_name.as_deref()
    }

    /// Turn sequence as this peer sees it.
    pub fn turns(&self) -> TurnCoordinator {
        self.turns
    }

    fn ensure_playing(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Playing {
            Ok(())
        } else {
            Err(SessionError::SessionFinished)
        }
    }

    /// Send our move to the peer. Only valid on our own turn.
    pub async fn send_move(&mut self, mv: Move) -> Result<(), SessionError> {
        self.ensure_playing()?;
        if !self.turns.is_local_turn() {
            return Err(SessionError::OutOfTurn(self.local));
        }
        if let Err(e) = self.transport.send(Message::Move(mv)).await {
            return Err(self.fail(e));
        }
        self.turns.advance();
        Ok(())
    }

    /// Wait for the opponent's move. There is no timeout here.
    ///
    /// A name the peer announced is recorded on the way, but only before its
    /// first move.
    pub async fn recv_move(&mut self) -> Result<Move, SessionError> {
        self.ensure_playing()?;
        if self.turns.is_local_turn() {
            return Err(SessionError::OutOfTurn(self.remote()));
        }
        let mv = loop {
            match self.transport.recv().await {
                Ok(Message::Move(mv)) => break mv,
                Ok(Message::Name(name)) if !self.peer_moved => {
                    info!("opponent is {}", name);
                    self.opponent_name = Some(name);
                }
                Ok(other) => {
                    return Err(self.fail(SessionError::UnexpectedMessage {
                        state: self.state,
                        expected: "move",
                        got: other.kind(),
                    }))
                }
                Err(e) => return Err(self.fail(e)),
            }
        };
        self.peer_moved = true;
        self.turns.advance();
        Ok(mv)
    }

    fn fail(&mut self, e: SessionError) -> SessionError {
        warn!("{} session failed: {}", self.role, e);
        self.state = SessionState::Finished;
        e
    }

    /// Finish and shut down our side of the connection.
    pub async fn close(&mut self) {
        self.state = SessionState::Finished;
        if let Err(e) = self.transport.shutdown().await {
            debug!("ignoring error while closing session: {}", e);
        }
    }
}
