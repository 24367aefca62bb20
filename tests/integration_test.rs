//! Integration tests for dynamic-prefix-pool
//!
//! These tests run validation, derivation and the load-pool exchange against
//! an in-process daemon listening on a temporary Unix socket.

use dynamic_prefix_pool::{
    config::Args,
    models::PoolConfiguration,
    prepare_pool,
    processing::{ValidationError, ValidationPolicy},
    register_pool, run,
    vici::{Message, Packet, ViciError},
};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixListener;
use tokio::task::JoinHandle;

fn pool_config(prefix_address: &str, sla_size: u8, sla_id: u16) -> PoolConfiguration {
    PoolConfiguration {
        pool_name: "roadwarrior".to_string(),
        prefix_address: prefix_address.to_string(),
        prefix_size: Some(48),
        pool_size: 120,
        sla_size: Some(sla_size),
        sla_id,
    }
}

/// Accept one connection, answer the first request with `reply` and hand the
/// request back to the test.
fn fake_daemon(socket: &Path, reply: Packet) -> JoinHandle<Packet> {
    let listener = UnixListener::bind(socket).expect("Failed to bind test socket");
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept failed");
        let len = stream.read_u32().await.expect("read length") as usize;
        let mut body = vec![0u8; len];
        stream.read_exact(&mut body).await.expect("read body");
        let request = Packet::decode(&body).expect("decode request");

        let event = Packet::Event {
            name: "log".to_string(),
            message: Message::new().key_value("msg", "loading pool"),
        };
        stream
            .write_all(&event.encode().unwrap())
            .await
            .expect("write event");
        stream
            .write_all(&reply.encode().unwrap())
            .await
            .expect("write reply");
        request
    })
}

fn socket_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("charon.vici")
}

#[test]
fn test_prepare_pool_examples() {
    let (_, address) = prepare_pool(
        &pool_config("2001:0db8:0000:1234::", 8, 0x5),
        ValidationPolicy::default(),
    )
    .expect("valid configuration");
    assert_eq!(address.as_str(), "2001:0db8:0000:1205::/120");

    let mut config = pool_config("2001:0db8:0000:1234::", 0, 0);
    config.pool_size = 97;
    let (_, address) = prepare_pool(&config, ValidationPolicy::default()).unwrap();
    assert_eq!(address.as_str(), "2001:0db8:0000:1234::/97");
}

#[test]
fn test_prepare_pool_rejections() {
    let err = prepare_pool(
        &pool_config("2001:0db8:0000:1234:", 8, 0x5),
        ValidationPolicy::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ValidationError::MalformedAddress { .. }));

    let mut config = pool_config("2001:0db8:0000:1234::", 10, 0);
    config.prefix_size = Some(60);
    assert_eq!(
        prepare_pool(&config, ValidationPolicy::default()).unwrap_err(),
        ValidationError::SlaSizeExceedsAvailableBits {
            sla_size: 10,
            available: 4
        }
    );
}

#[tokio::test]
async fn test_register_pool_success() {
    let dir = tempfile::tempdir().unwrap();
    let socket = socket_path(&dir);
    let daemon = fake_daemon(
        &socket,
        Packet::Response(Message::new().key_value("success", "yes")),
    );

    let (validated, address) = prepare_pool(
        &pool_config("2001:0db8:0000:ff00::", 8, 0x42),
        ValidationPolicy::default(),
    )
    .unwrap();
    let value = register_pool(&socket, validated.pool_name(), &address)
        .await
        .expect("pool should load");
    assert_eq!(value, "yes");

    let request = daemon.await.unwrap();
    let expected = Packet::request(
        "load-pool",
        Message::new().section(
            "roadwarrior",
            Message::new().key_value("addrs", "2001:0db8:0000:ff42::/120"),
        ),
    );
    assert_eq!(request, expected);
}

#[tokio::test]
async fn test_register_pool_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let socket = socket_path(&dir);
    let daemon = fake_daemon(
        &socket,
        Packet::Response(
            Message::new()
                .key_value("success", "no")
                .key_value("errmsg", "pool 'roadwarrior' already exists"),
        ),
    );

    let (_, address) = prepare_pool(
        &pool_config("2001:0db8:0000:1234::", 8, 0x5),
        ValidationPolicy::default(),
    )
    .unwrap();
    let err = register_pool(&socket, "roadwarrior", &address)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "pool 'roadwarrior' already exists");
    daemon.await.unwrap();
}

#[tokio::test]
async fn test_register_pool_unknown_command() {
    let dir = tempfile::tempdir().unwrap();
    let socket = socket_path(&dir);
    let daemon = fake_daemon(&socket, Packet::UnknownCommand);

    let (_, address) = prepare_pool(
        &pool_config("2001:0db8:0000:1234::", 8, 0x5),
        ValidationPolicy::default(),
    )
    .unwrap();
    let err = register_pool(&socket, "roadwarrior", &address)
        .await
        .unwrap_err();
    assert!(matches!(err, ViciError::UnknownCommand(ref c) if c == "load-pool"));
    daemon.await.unwrap();
}

#[tokio::test]
async fn test_register_pool_connection_closed() {
    let dir = tempfile::tempdir().unwrap();
    let socket = socket_path(&dir);
    let listener = UnixListener::bind(&socket).expect("Failed to bind test socket");
    let daemon = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept failed");
        let len = stream.read_u32().await.expect("read length") as usize;
        let mut body = vec![0u8; len];
        stream.read_exact(&mut body).await.expect("read body");
        // drop the stream without replying
    });

    let (_, address) = prepare_pool(
        &pool_config("2001:0db8:0000:1234::", 8, 0x5),
        ValidationPolicy::default(),
    )
    .unwrap();
    let err = register_pool(&socket, "roadwarrior", &address)
        .await
        .unwrap_err();
    assert!(matches!(err, ViciError::Io(_)));
    assert!(err.to_string().starts_with("VICI socket I/O failed"));
    daemon.await.unwrap();
}

#[tokio::test]
async fn test_register_pool_no_daemon() {
    let dir = tempfile::tempdir().unwrap();
    let socket = socket_path(&dir);
    let (_, address) = prepare_pool(
        &pool_config("2001:0db8:0000:1234::", 8, 0x5),
        ValidationPolicy::default(),
    )
    .unwrap();
    let err = register_pool(&socket, "roadwarrior", &address)
        .await
        .unwrap_err();
    assert!(matches!(err, ViciError::Connect { .. }));
}

#[tokio::test]
async fn test_run_from_args() {
    let dir = tempfile::tempdir().unwrap();
    let socket = socket_path(&dir);
    let daemon = fake_daemon(
        &socket,
        Packet::Response(Message::new().key_value("success", "yes")),
    );

    let args = Args::try_parse_from([
        "dynamic-prefix-pool",
        "-n",
        "roadwarrior",
        "-p",
        "2001:0db8:0000:1234::",
        "-d",
        "56",
        "-l",
        "8",
        "-i",
        "0xff",
        "-s",
        "112",
        "--socket",
        socket.to_str().unwrap(),
    ])
    .unwrap();
    run(&args).await.expect("run should succeed");

    let request = daemon.await.unwrap();
    let Packet::Request { command, message } = request else {
        panic!("expected a request");
    };
    assert_eq!(command, "load-pool");
    let Some(dynamic_prefix_pool::vici::Value::Section(section)) = message.get("roadwarrior")
    else {
        panic!("missing pool section");
    };
    assert_eq!(
        section.get_str("addrs").as_deref(),
        Some("2001:0db8:0000:12ff::/112")
    );
}

#[tokio::test]
async fn test_run_validation_failure() {
    let args = Args::try_parse_from([
        "dynamic-prefix-pool",
        "-n",
        "roadwarrior",
        "-p",
        "2001:0db8:0000:1234::",
        "-d",
        "48",
        "--dry-run",
    ])
    .unwrap();
    let err = run(&args).await.unwrap_err();
    let err = err
        .downcast_ref::<ValidationError>()
        .expect("validation error");
    assert!(matches!(err, ValidationError::IncompleteDelegationFields(_)));
}

#[tokio::test]
async fn test_run_dry_run() {
    let args = Args::try_parse_from([
        "dynamic-prefix-pool",
        "-n",
        "roadwarrior",
        "-p",
        "2001:0db8:0000:1234::",
        "--dry-run",
        "--socket",
        "/nonexistent/charon.vici",
    ])
    .unwrap();
    run(&args).await.expect("dry run does not connect");
}
