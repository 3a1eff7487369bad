// ProfileLookup - tests/e2e_lookup.rs
//
// End-to-end tests for the lookup pipeline.
//
// These tests exercise real HTTP over loopback: a small fixture server
// bound to 127.0.0.1 answers GraphQL POSTs, and the real reqwest transport,
// query decoding, background lookup threads, and view state are driven
// against it. No mocks at the transport seam.

use profile_lookup::app::headless;
use profile_lookup::app::lookup::LookupManager;
use profile_lookup::app::state::AppState;
use profile_lookup::core::model::{LookupOutcome, LookupStatus, ResponseOrdering};
use profile_lookup::core::query::{self, GraphQlTransport};
use profile_lookup::platform::http::HttpTransport;
use profile_lookup::util::error::{ProfileLookupError, QueryError};
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

// =============================================================================
// Fixture server
// =============================================================================

/// One request as seen by the fixture server.
#[derive(Debug, Clone)]
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Value,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn username(&self) -> &str {
        self.body["variables"]["username"].as_str().unwrap_or("")
    }
}

/// Reply chosen by a test for a captured request.
struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

impl Reply {
    fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }
}

struct FixtureServer {
    base_url: String,
    captured: mpsc::Receiver<Captured>,
}

/// Start a loopback server; each connection is handled on its own thread so
/// delayed replies do not block later requests.
fn spawn_server<F>(respond: F) -> FixtureServer
where
    F: Fn(&Captured) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let respond = Arc::new(respond);
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            let respond = Arc::clone(&respond);
            let tx = tx.clone();
            std::thread::spawn(move || handle_connection(stream, respond.as_ref(), tx));
        }
    });

    FixtureServer {
        base_url,
        captured: rx,
    }
}

fn handle_connection(
    stream: TcpStream,
    respond: &(dyn Fn(&Captured) -> Reply + Send + Sync),
    tx: mpsc::Sender<Captured>,
) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        return;
    }

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let length: usize = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).unwrap();

    let captured = Captured {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    let reply = respond(&captured);
    let _ = tx.send(captured);

    std::thread::sleep(reply.delay);

    let mut stream = stream;
    let response = format!(
        concat!(
            "HTTP/1.1 {} Fixture\r\n",
            "Content-Type: application/json\r\n",
            "Content-Length: {}\r\n",
            "Connection: close\r\n",
            "\r\n",
            "{}"
        ),
        reply.status,
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn profile_for(username: &str) -> Value {
    json!({"profile": {"userId": "1", "discordUsername": username, "credit": 5}})
}

/// Poll the manager until `count` outcomes have arrived or 10 s pass.
fn collect_outcomes(manager: &mut LookupManager, count: usize) -> Vec<LookupOutcome> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut outcomes = Vec::new();
    while outcomes.len() < count && Instant::now() < deadline {
        outcomes.extend(manager.poll_outcomes());
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(outcomes.len(), count, "timed out waiting for outcomes");
    outcomes
}

// =============================================================================
// Query function E2E
// =============================================================================

/// The request is a JSON POST to /graphql with query + variables.username.
#[test]
fn e2e_posts_query_and_variables_to_graphql_path() {
    let server = spawn_server(|c| Reply::ok(json!({"data": profile_for(c.username())})));
    let transport = HttpTransport::new(&server.base_url).unwrap();

    query::query_profile(&transport, "alice").unwrap();

    let captured = server
        .captured
        .recv_timeout(Duration::from_secs(5))
        .unwrap();
    assert_eq!(captured.request_line, "POST /graphql HTTP/1.1");
    assert!(
        captured
            .header("content-type")
            .is_some_and(|v| v.starts_with("application/json")),
        "headers: {:?}",
        captured.headers
    );
    assert!(captured.body["query"]
        .as_str()
        .unwrap()
        .contains("profile(discordUsername: $username)"));
    assert_eq!(captured.body["variables"], json!({"username": "alice"}));
}

/// The function returns the `data` member of the envelope.
#[test]
fn e2e_returns_data_member() {
    let server = spawn_server(|_| {
        Reply::ok(json!({
            "data": {"profile": {"userId": "1", "discordUsername": "alice", "credit": 5}}
        }))
    });
    let transport = HttpTransport::new(&server.base_url).unwrap();

    let data = query::query_profile(&transport, "alice").unwrap();
    assert_eq!(
        data,
        json!({"profile": {"userId": "1", "discordUsername": "alice", "credit": 5}})
    );
}

#[test]
fn e2e_non_success_status_is_status_error() {
    let server = spawn_server(|_| Reply {
        status: 503,
        body: "upstream unavailable".to_string(),
        delay: Duration::ZERO,
    });
    let transport = HttpTransport::new(&server.base_url).unwrap();

    match query::query_profile(&transport, "alice") {
        Err(QueryError::Status { status, body, url }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream unavailable");
            assert!(url.ends_with("/graphql"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[test]
fn e2e_malformed_body_is_decode_error() {
    let server = spawn_server(|_| Reply {
        status: 200,
        body: "{\"data\": ".to_string(),
        delay: Duration::ZERO,
    });
    let transport = HttpTransport::new(&server.base_url).unwrap();

    assert!(matches!(
        query::query_profile(&transport, "alice"),
        Err(QueryError::Decode { .. })
    ));
}

#[test]
fn e2e_unreachable_server_is_transport_error() {
    // Bind then drop to obtain a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let transport = HttpTransport::new(&format!("http://127.0.0.1:{port}")).unwrap();

    let err = query::query_profile(&transport, "alice").unwrap_err();
    assert!(matches!(err, QueryError::Transport { .. }), "{err:?}");
    assert_eq!(err.summary(), "Could not connect to server");
}

// =============================================================================
// View state E2E
// =============================================================================

/// Typing "bob" and letting the lookup resolve renders the data with
/// four-space indentation.
#[test]
fn e2e_lookup_renders_pretty_result() {
    let server = spawn_server(|c| Reply::ok(json!({"data": profile_for(c.username())})));
    let transport = Arc::new(HttpTransport::new(&server.base_url).unwrap());
    let mut manager = LookupManager::new(transport);
    let mut state = AppState::new(
        manager.endpoint().to_string(),
        ResponseOrdering::default(),
        false,
    );
    assert_eq!(state.result_text(), "null");

    state.username_input = "bob".to_string();
    state.request_lookup();
    let request = manager.start_lookup(state.pending_lookup.take().unwrap());
    state.note_issued(&request);

    for outcome in collect_outcomes(&mut manager, 1) {
        state.apply_outcome(outcome);
    }

    let expected = concat!(
        "{\n",
        "    \"profile\": {\n",
        "        \"userId\": \"1\",\n",
        "        \"discordUsername\": \"bob\",\n",
        "        \"credit\": 5\n",
        "    }\n",
        "}"
    );
    assert_eq!(state.result_text(), expected);
    assert_eq!(state.status, LookupStatus::Loaded);
}

/// Issue "b" then "bo" where "b" answers last; returns the final display.
fn race_b_then_bo(ordering: ResponseOrdering) -> Value {
    let server = spawn_server(|c| {
        let mut reply = Reply::ok(json!({"data": profile_for(c.username())}));
        if c.username() == "b" {
            reply.delay = Duration::from_millis(400);
        }
        reply
    });
    let transport = Arc::new(HttpTransport::new(&server.base_url).unwrap());
    let mut manager = LookupManager::new(transport);
    let mut state = AppState::new(manager.endpoint().to_string(), ordering, false);

    for username in ["b", "bo"] {
        let request = manager.start_lookup(username.to_string());
        state.note_issued(&request);
    }

    let outcomes = collect_outcomes(&mut manager, 2);
    assert_eq!(outcomes[0].username, "bo", "fixture should answer 'bo' first");
    for outcome in outcomes {
        state.apply_outcome(outcome);
    }
    state.profile_data.expect("a result should be displayed")
}

#[test]
fn e2e_last_resolved_ordering_shows_late_stale_response() {
    assert_eq!(race_b_then_bo(ResponseOrdering::LastResolved), profile_for("b"));
}

#[test]
fn e2e_latest_issued_ordering_discards_stale_response() {
    assert_eq!(race_b_then_bo(ResponseOrdering::LatestIssued), profile_for("bo"));
}

/// A failed lookup leaves the previous result on screen and records the error.
#[test]
fn e2e_failed_lookup_keeps_previous_result() {
    let server = spawn_server(|c| {
        if c.username() == "boom" {
            Reply {
                status: 500,
                body: String::new(),
                delay: Duration::ZERO,
            }
        } else {
            Reply::ok(json!({"data": profile_for(c.username())}))
        }
    });
    let transport = Arc::new(HttpTransport::new(&server.base_url).unwrap());
    let mut manager = LookupManager::new(transport);
    let mut state = AppState::new(
        manager.endpoint().to_string(),
        ResponseOrdering::default(),
        false,
    );

    let first = manager.start_lookup("bob".to_string());
    state.note_issued(&first);
    for outcome in collect_outcomes(&mut manager, 1) {
        state.apply_outcome(outcome);
    }
    let shown = state.result_text();

    let second = manager.start_lookup("boom".to_string());
    state.note_issued(&second);
    for outcome in collect_outcomes(&mut manager, 1) {
        state.apply_outcome(outcome);
    }

    assert_eq!(state.result_text(), shown);
    assert!(matches!(state.status, LookupStatus::Failed { .. }));
}

// =============================================================================
// Headless E2E
// =============================================================================

#[test]
fn e2e_headless_prints_result() {
    let server = spawn_server(|c| Reply::ok(json!({"data": profile_for(c.username())})));
    let transport = HttpTransport::new(&server.base_url).unwrap();

    let mut out = Vec::new();
    headless::run(&transport, "carol", &mut out).unwrap();
    let printed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed, profile_for("carol"));
    assert!(String::from_utf8(out).unwrap().ends_with("}\n"));
}

#[test]
fn e2e_headless_reports_graphql_errors() {
    let server = spawn_server(|_| {
        Reply::ok(json!({"data": null, "errors": [{"message": "Unknown argument"}]}))
    });
    let transport = HttpTransport::new(&server.base_url).unwrap();
    assert!(transport.endpoint().starts_with("http://127.0.0.1:"));

    let mut out = Vec::new();
    let err = headless::run(&transport, "dave", &mut out).unwrap_err();
    match err {
        ProfileLookupError::Query(QueryError::GraphQl { messages, .. }) => {
            assert_eq!(messages, vec!["Unknown argument".to_string()]);
        }
        other => panic!("expected GraphQl error, got {other:?}"),
    }
    assert!(out.is_empty());
}
