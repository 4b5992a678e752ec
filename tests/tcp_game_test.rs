#![cfg(feature = "std")]

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use rand::{rngs::SmallRng, SeedableRng};
use tictactoe::{
    session::{advertised_addr, parse_address},
    AiPlayer, Game, GameResult, Move, NetConfig, NullView, Player, RemotePlayer, Session, SessionError, SessionState, Symbol, TcpTransport, Transport,
};

fn seat(session: Session, seed: u64) -> Game {
    let local = session.local();
    let turns = session.turns();
    let me: Box<dyn Player> = Box::new(AiPlayer::new(SmallRng::seed_from_u64(seed)));
    let them: Box<dyn Player> = Box::new(RemotePlayer::new(session));
    match local {
        Symbol::X => Game::new(turns, me, them),
        Symbol::O => Game::new(turns, them, me),
    }
}

/// Bind an ephemeral port on loopback and return the listener with a config pointing at it.
async fn loopback() -> anyhow::Result<(tokio::net::TcpListener, NetConfig)> {
    let listener = Session::listen(&NetConfig::default().with_port(0)).await?;
    let port = listener.local_addr()?.port();
    Ok((listener, NetConfig::default().with_port(port)))
}

#[tokio::test(flavor = "multi_thread")]
async fn cpu_vs_cpu_over_tcp() -> anyhow::Result<()> {
    let (listener, config) = loopback().await?;
    let host_config = config.clone();

    let host = tokio::spawn(async move {
        let session = Session::accept(&listener, Symbol::O, &host_config).await.unwrap();
        let mut game = seat(session, 1);
        let outcome = game.play(&mut NullView).await;
        (outcome.result(), *game.board())
    });
    let joiner = tokio::spawn(async move {
        let session = Session::join("127.0.0.1", &config).await.unwrap();
        assert_eq!(session.local(), Symbol::X);
        let mut game = seat(session, 2);
        let outcome = game.play(&mut NullView).await;
        (outcome.result(), *game.board())
    });

    let ((host_result, host_board), (join_result, join_board)) = tokio::try_join!(host, joiner)?;
    assert_eq!(host_result, join_result);
    assert_eq!(host_board, join_board);
    assert!(host_result.is_some_and(GameResult::is_terminal));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn names_cross_a_real_socket() -> anyhow::Result<()> {
    let (listener, config) = loopback().await?;
    let host_config = config.clone().with_name(Some("host".into()));
    let join_config = config.with_name(Some("guest".into()));

    let (mut host, mut joiner) = tokio::try_join!(
        Session::accept(&listener, Symbol::X, &host_config),
        Session::join("127.0.0.1", &join_config),
    )?;
    host.send_move(Move::new(0, 0)?).await?;
    joiner.recv_move().await?;
    joiner.send_move(Move::new(1, 1)?).await?;
    host.recv_move().await?;
    assert_eq!(host.opponent_name(), Some("guest"));
    assert_eq!(joiner.opponent_name(), Some("host"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn host_only_name_over_tcp_keeps_playing() -> anyhow::Result<()> {
    let (listener, config) = loopback().await?;
    let host_config = config.clone().with_name(Some("host".into()));
    let (mut host, mut joiner) = tokio::try_join!(
        Session::accept(&listener, Symbol::X, &host_config),
        Session::join("127.0.0.1", &config),
    )?;
    host.send_move(Move::new(2, 2)?).await?;
    let got = tokio::time::timeout(Duration::from_secs(2), joiner.recv_move()).await??;
    assert_eq!(got, Move::new(2, 2)?);
    assert_eq!(joiner.opponent_name(), Some("host"));
    assert_eq!(host.opponent_name(), None);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn advertised_address_is_dialable() -> anyhow::Result<()> {
    let (listener, config) = loopback().await?;
    let addr = Session::advertised_addr(&listener).await?;
    assert_eq!(addr.port(), config.port);
    assert!(!addr.ip().is_unspecified());
    let accept = tokio::spawn(async move { listener.accept().await.map(|_| ()) });
    TcpTransport::connect(addr, Duration::from_secs(2)).await?;
    accept.await??;
    Ok(())
}

#[test]
fn wildcard_bind_is_advertised_by_interface() {
    let addr = |s: &str| -> SocketAddr { s.parse().unwrap() };
    let lan: Option<IpAddr> = "192.168.1.20".parse().ok();
    let bound = addr("0.0.0.0:4000");
    assert_eq!(advertised_addr(bound, lan), addr("192.168.1.20:4000"));
    assert_eq!(advertised_addr(bound, None), addr("127.0.0.1:4000"));
    let fixed = addr("10.0.0.5:4000");
    assert_eq!(advertised_addr(fixed, lan), fixed);
}

#[tokio::test(flavor = "multi_thread")]
async fn peer_closing_socket_is_a_disconnect() -> anyhow::Result<()> {
    let (listener, config) = loopback().await?;
    let host_config = config.clone();
    let (mut host, mut joiner) = tokio::try_join!(
        Session::accept(&listener, Symbol::O, &host_config),
        Session::join("127.0.0.1", &config),
    )?;
    joiner.close().await;
    let err = host.recv_move().await.unwrap_err();
    assert!(matches!(err, SessionError::PeerDisconnected), "got {:?}", err);
    assert_eq!(host.state(), SessionState::Finished);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn raw_bytes_split_across_writes() -> anyhow::Result<()> {
    let (listener, config) = loopback().await?;
    let addr = parse_address("127.0.0.1", config.port)?;
    let writer = tokio::spawn(async move {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        let (mut stream, _) = listener.accept().await.unwrap();
        for chunk in [&b"X["[..], b"2,", b"1]"] {
            stream.write_all(chunk).await.unwrap();
            stream.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let mut reply = [0u8; 5];
        stream.read_exact(&mut reply).await.unwrap();
        assert_eq!(&reply, b"[0,0]");
    });
    let transport = TcpTransport::connect(addr, Duration::from_secs(5)).await?;
    let mut joiner = Session::negotiate_join(Box::new(transport), None).await?;
    assert_eq!(joiner.local(), Symbol::X);
    joiner.send_move(Move::new(0, 0)?).await?;
    assert_eq!(joiner.recv_move().await?, Move::new(2, 1)?);
    writer.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_address_is_recoverable() {
    let err = Session::join("not-an-ip", &NetConfig::default()).await.err().unwrap();
    assert!(matches!(err, SessionError::InvalidAddress(ref s) if s == "not-an-ip"));
    assert!(err.is_recoverable());
    assert!(parse_address("localhost", 1).is_err());
    assert!(parse_address(" 10.0.0.1 ", 1).is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_host_times_out_or_fails_recoverably() {
    let config = NetConfig {
        connect_timeout: Duration::from_millis(200),
        ..NetConfig::default()
    };
    // TEST-NET-1 is never routed; depending on the network this either hangs or is refused.
    let err = Session::join("192.0.2.1", &config).await.err().unwrap();
    assert!(err.is_recoverable(), "got {:?}", err);
}

#[tokio::test(flavor = "multi_thread")]
async fn shutdown_twice_is_harmless() -> anyhow::Result<()> {
    let (listener, config) = loopback().await?;
    let addr = parse_address("127.0.0.1", config.port)?;
    let accept = tokio::spawn(async move { listener.accept().await.map(|_| ()) });
    let mut transport = TcpTransport::connect(addr, Duration::from_secs(5)).await?;
    accept.await??;
    transport.shutdown().await?;
    transport.shutdown().await?;
    Ok(())
}
