//! Integration tests for HttpProber
//!
//! These tests use wiremock to run a local HTTP server, a couple of raw
//! tokio listeners for connection-level behaviour, and a closed
//! local port for connection failures. Nothing leaves the machine.

use catalog_link_checker::checker::{
    parse_str, validate, ErrorDescriptor, FaultKind, HttpProber, ProbeOutcome, Prober,
};
use catalog_link_checker::config::{Config, ParserConfig, ProbeConfig};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A local URL nothing is listening on
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a local port");
    let port = listener.local_addr().expect("Failed to read local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/y")
}

/// A raw server that answers every request with a keep-alive 200 and
/// counts the connections it accepts
async fn counting_keep_alive_server() -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind a local port");
    let addr = listener.local_addr().expect("Failed to read local address");
    let accepted = Arc::new(AtomicUsize::new(0));

    let counter = accepted.clone();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                // One read per request is enough for a bodiless GET
                while let Ok(n) = stream.read(&mut buf).await {
                    if n == 0 {
                        break;
                    }
                    let response = "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: keep-alive\r\n\r\n";
                    if stream.write_all(response.as_bytes()).await.is_err() {
                        break;
                    }
                }
            });
        }
    });

    (format!("http://{addr}"), accepted)
}

/// A raw server that accepts and immediately hangs up
async fn hang_up_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind a local port");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });

    format!("http://{addr}")
}

fn prober() -> HttpProber {
    HttpProber::new(&ProbeConfig::default()).expect("Failed to build prober")
}

#[tokio::test]
async fn test_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let outcome = prober().probe(&format!("{}/ok", server.uri())).await;

    assert_eq!(outcome, ProbeOutcome::Status(200));
}

#[tokio::test]
async fn test_not_found_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = prober().probe(&format!("{}/gone", server.uri())).await;

    assert_eq!(outcome, ProbeOutcome::Status(404));
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = prober().probe(&server.uri()).await;

    assert_eq!(outcome, ProbeOutcome::Status(204));
}

#[tokio::test]
async fn test_follows_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let outcome = prober().probe(&format!("{}/old", server.uri())).await;

    assert_eq!(outcome, ProbeOutcome::Status(200));
}

#[tokio::test]
async fn test_redirect_loop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&server)
        .await;

    match prober().probe(&format!("{}/loop", server.uri())).await {
        ProbeOutcome::Fault(fault) => assert_eq!(fault.kind, FaultKind::TooManyRedirects),
        other => panic!("expected a fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = ProbeConfig {
        timeout_secs: 1,
        ..ProbeConfig::default()
    };
    let prober = HttpProber::new(&config).unwrap();

    match prober.probe(&server.uri()).await {
        ProbeOutcome::Fault(fault) => {
            assert_eq!(fault.kind, FaultKind::Timeout);
            assert!(fault.message.contains("timed out"));
        }
        other => panic!("expected a fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused() {
    match prober().probe(&closed_port_url()).await {
        ProbeOutcome::Fault(fault) => {
            assert!(fault.message.to_lowercase().contains("connection refused"));
        }
        other => panic!("expected a fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_end_to_end_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dog_link = closed_port_url();
    let text = format!(
        "### Animals\n| H |\n|---|\n\
         | | [Cat API]({}/x) | Cats | No | Yes | Yes |\n\
         | | [Dog API]({}) | Dogs | No | No | No |\n\
         Back to Index\n",
        server.uri(),
        dog_link
    );
    let config = Config::default();
    let document = parse_str(&text, &ParserConfig::default());

    let failures = validate(&document, &prober(), config.probe.concurrency).await;

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].section, "Animals");
    assert_eq!(failures[0].name, "Dog API");
    assert_eq!(failures[0].link, dog_link);
    match &failures[0].error {
        ErrorDescriptor::Transport(fault) => {
            assert!(fault.to_string().to_lowercase().contains("connection refused"));
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_every_request_opens_its_own_connection() {
    let (base, accepted) = counting_keep_alive_server().await;
    let prober = prober();

    for _ in 0..3 {
        let outcome = prober.probe(&format!("{base}/ok")).await;
        assert_eq!(outcome, ProbeOutcome::Status(200));
    }

    assert_eq!(accepted.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_fault_kind_ignores_words_in_url() {
    let base = hang_up_server().await;
    let prober = prober();

    let mut kinds = Vec::new();
    for path in ["/docs", "/ssl-docs", "/dns-api", "/tls/connection-refused"] {
        match prober.probe(&format!("{base}{path}")).await {
            ProbeOutcome::Fault(fault) => kinds.push(fault.kind),
            other => panic!("expected a fault for {path}, got {other:?}"),
        }
    }

    assert_ne!(kinds[0], FaultKind::Tls);
    assert_ne!(kinds[0], FaultKind::Dns);
    assert!(kinds.iter().all(|kind| *kind == kinds[0]), "kinds differ: {kinds:?}");
}
