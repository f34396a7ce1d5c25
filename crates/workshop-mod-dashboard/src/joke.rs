use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Placeholder shown until the first fetch of a view resolves.
pub const LOADING_TEXT: &str = "Loading...";

/// A programming joke as served by the joke API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

impl Joke {
    /// `"<setup> - <punchline>"`
    pub fn display(&self) -> String {
        format!("{} - {}", self.setup, self.punchline)
    }
}

/// Why a fetch failed. Only ever logged; the user sees one fixed message.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed joke payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("joke payload was an empty array")]
    Empty,
    #[error("joke source failed: {0}")]
    Source(String),
}

/// What the joke area currently shows. Exactly one variant at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JokeState {
    Loading,
    Loaded(String),
    Failed(String),
}

impl JokeState {
    pub fn text(&self) -> &str {
        match self {
            JokeState::Loading => LOADING_TEXT,
            JokeState::Loaded(text) | JokeState::Failed(text) => text,
        }
    }

    /// Resolve a fetch result into the state it produces.
    pub fn from_result(result: &Result<Joke, FetchError>, failure_message: &str) -> Self {
        match result {
            Ok(joke) => JokeState::Loaded(joke.display()),
            Err(_) => JokeState::Failed(failure_message.to_string()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JokeState::Loading => "loading",
            JokeState::Loaded(_) => "loaded",
            JokeState::Failed(_) => "failed",
        }
    }
}

/// Decode an API body: a JSON array whose first element is the joke.
pub fn parse_jokes(body: &str) -> Result<Joke, FetchError> {
    let jokes: Vec<Joke> = serde_json::from_str(body)?;
    jokes.into_iter().next().ok_or(FetchError::Empty)
}

/// Anything that can produce one joke per call.
///
/// Calls block; the fetcher runs them on worker threads.
pub trait JokeSource: Send + Sync {
    fn fetch(&self) -> Result<Joke, FetchError>;
}

/// Fetches jokes with a blocking HTTP GET.
pub struct HttpJokeSource {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpJokeSource {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        // `None` disables the blocking client's default 30s timeout.
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl JokeSource for HttpJokeSource {
    fn fetch(&self) -> Result<Joke, FetchError> {
        let resp = self.client.get(&self.endpoint).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.text()?;
        parse_jokes(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    const FAILURE: &str = "Failed to load joke. Check your internet connection!";

    #[test]
    fn parses_first_joke_of_array() {
        let body = r#"[
            {"type":"programming","setup":"Why did X","punchline":"Because Y","id":16},
            {"type":"programming","setup":"ignored","punchline":"ignored","id":17}
        ]"#;
        let joke = parse_jokes(body).unwrap();
        assert_eq!(joke.display(), "Why did X - Because Y");
    }

    #[test]
    fn empty_array_is_an_error() {
        assert!(matches!(parse_jokes("[]"), Err(FetchError::Empty)));
    }

    #[test]
    fn malformed_bodies_are_decode_errors() {
        for body in [
            "not json",
            r#"{"setup":"a","punchline":"b"}"#,
            r#"[{"setup":"a"}]"#,
            r#"[{"setup":1,"punchline":"b"}]"#,
        ] {
            assert!(
                matches!(parse_jokes(body), Err(FetchError::Decode(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn success_becomes_loaded_text() {
        let result = Ok(Joke {
            setup: "Why did X".into(),
            punchline: "Because Y".into(),
        });
        let state = JokeState::from_result(&result, FAILURE);
        assert_eq!(state, JokeState::Loaded("Why did X - Because Y".into()));
        assert_eq!(state.text(), "Why did X - Because Y");
    }

    #[test]
    fn every_failure_collapses_to_fixed_message() {
        let errors = [
            FetchError::Source("connection refused".into()),
            FetchError::Status(503),
            FetchError::Empty,
        ];
        for err in errors {
            let state = JokeState::from_result(&Err(err), FAILURE);
            assert_eq!(state.text(), FAILURE);
            assert_eq!(state.label(), "failed");
        }
    }

    #[test]
    fn loading_shows_placeholder() {
        assert_eq!(JokeState::Loading.text(), "Loading...");
        assert_eq!(JokeState::Loading.label(), "loading");
    }

    #[test]
    fn error_messages_name_the_cause() {
        assert_eq!(
            FetchError::Status(404).to_string(),
            "unexpected HTTP status 404"
        );
        assert_eq!(
            FetchError::Source("dns".into()).to_string(),
            "joke source failed: dns"
        );
    }

    #[test]
    fn unreachable_endpoint_fails() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let source =
            HttpJokeSource::new("http://127.0.0.1:9/jokes", Some(Duration::from_secs(2))).unwrap();
        assert_eq!(source.endpoint(), "http://127.0.0.1:9/jokes");
        assert!(matches!(source.fetch(), Err(FetchError::Request(_))));
    }

    /// Serve a single HTTP response on a loopback port and return its URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });
        format!("http://{addr}/jokes/programming/random")
    }

    #[test]
    fn fetch_decodes_served_joke() {
        let url = serve_once(
            "200 OK",
            r#"[{"type":"programming","setup":"Why did X","punchline":"Because Y","id":1}]"#,
        );
        let source = HttpJokeSource::new(url, Some(Duration::from_secs(5))).unwrap();
        let joke = source.fetch().unwrap();
        assert_eq!(joke.display(), "Why did X - Because Y");
        assert_eq!(
            JokeState::from_result(&Ok(joke), FAILURE).text(),
            "Why did X - Because Y"
        );
    }

    #[test]
    fn fetch_reports_server_error_status() {
        let url = serve_once("500 Internal Server Error", "oops");
        let source = HttpJokeSource::new(url, Some(Duration::from_secs(5))).unwrap();
        let result = source.fetch();
        assert!(matches!(result, Err(FetchError::Status(500))), "{result:?}");
        assert_eq!(JokeState::from_result(&result, FAILURE).text(), FAILURE);
    }

    #[test]
    fn fetch_rejects_served_empty_array() {
        let url = serve_once("200 OK", "[]");
        let source = HttpJokeSource::new(url, Some(Duration::from_secs(5))).unwrap();
        assert!(matches!(source.fetch(), Err(FetchError::Empty)));
    }
}
