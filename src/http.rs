//! Blocking HTTP transport for the remote statistics API.
//!
//! The pipeline is `connect` → (`get` | `post`) → `parse`. Each step returns
//! an inspectable error; nothing here retries, inspects HTTP status codes, or
//! keeps state across calls. A `Connection` is consumed by the request that
//! sends it, so a handle can never be reused.

use log::debug;
use reqwest::Method;
use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::io::Read;
use std::time::Duration;
use url::{Url, form_urlencoded};

use crate::error::{Error, Result};

/// Appends `params` to `base` as a percent-encoded query string.
///
/// `params` is an ordered, alternating key/value list; each key and value is
/// percent-encoded independently (UTF-8, form conventions: space becomes `+`,
/// `&` becomes `%26`) and the pairs joined with `&` after a single `?`. An
/// odd-length list is rejected before anything is built.
pub fn build_url(base: &str, params: &[&str]) -> Result<String> {
    ensure_even(params)?;

    let mut query = form_urlencoded::Serializer::new(String::new());
    for pair in params.chunks_exact(2) {
        query.append_pair(pair[0], pair[1]);
    }
    Ok(format!("{}?{}", base, query.finish()))
}

/// True iff `url` parses as an absolute URL with a host.
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).map(|u| u.has_host()).unwrap_or(false)
}

/// Owns the single blocking HTTP client reused across calls.
///
/// Construct one per application and hand out `connect` handles from it; the
/// inner client pools connections and is cheap to share. The request timeout
/// is fixed at construction — this layer has no timeout policy of its own.
pub struct StatsTransport {
    client: Client,
}

impl StatsTransport {
    pub fn new() -> Result<Self> {
        Ok(StatsTransport {
            client: Client::builder().build()?,
        })
    }

    /// Like [`StatsTransport::new`] with a caller-supplied request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(StatsTransport {
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    /// Wraps an already-configured client (proxy, TLS, default headers...).
    pub fn from_client(client: Client) -> Self {
        StatsTransport { client }
    }

    /// Validates `url` and `params` and builds the final request URL.
    ///
    /// No network I/O happens here; the TCP connection is opened by the
    /// `get`/`post` call that consumes the returned handle. Malformed input
    /// of any kind fails before the handle exists.
    pub fn connect(&self, url: &str, params: &[&str]) -> Result<Connection> {
        ensure_even(params)?;
        if url.is_empty() || !is_valid_url(url) {
            return Err(Error::InvalidUrl(url.to_string()));
        }

        let full = build_url(url, params)?;
        let target = Url::parse(&full).map_err(|_| Error::InvalidUrl(full))?;
        debug!("connect {}", target);

        Ok(Connection {
            client: self.client.clone(),
            url: target,
        })
    }
}

/// One pending HTTP exchange. Consumed by `get` or `post`, so the
/// open → configure → send → read protocol is sequential by construction.
#[derive(Debug)]
pub struct Connection {
    client: Client,
    url: Url,
}

impl Connection {
    /// Final URL this handle will request.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends a GET and returns the raw response byte stream.
    ///
    /// `headers` is an ordered, alternating name/value list applied after the
    /// forced `Content-Type: application/json`; a later duplicate name
    /// overwrites an earlier one, so callers can override the content type.
    /// The HTTP status is not inspected — any response that yields a byte
    /// stream passes through; only DNS/connect/read failures are errors.
    pub fn get(self, headers: &[&str]) -> Result<Response> {
        self.send(Method::GET, None, headers)
    }

    /// Sends a POST with `payload` as the raw request body. Header and
    /// failure rules are the same as [`Connection::get`].
    pub fn post(self, payload: &str, headers: &[&str]) -> Result<Response> {
        self.send(Method::POST, Some(payload), headers)
    }

    fn send(self, method: Method, payload: Option<&str>, headers: &[&str]) -> Result<Response> {
        let header_map = build_headers(headers)?;
        debug!("{} {}", method, self.url);

        let mut request = self.client.request(method, self.url).headers(header_map);
        if let Some(body) = payload {
            request = request.body(body.to_owned());
        }
        Ok(request.send()?)
    }
}

/// Decodes a response byte stream as a JSON tree.
///
/// Scalar kinds (number, string, bool, null) survive intact and nesting is
/// arbitrary. Malformed, truncated or empty input is a [`Error::Decode`] —
/// never a partially built tree. The reader is taken by value and dropped on
/// every exit path, which closes the underlying socket.
pub fn parse<R: Read>(input: R) -> Result<Value> {
    Ok(serde_json::from_reader(input)?)
}

fn ensure_even(list: &[&str]) -> Result<()> {
    if list.len() % 2 != 0 {
        return Err(Error::OddPairList(list.len()));
    }
    Ok(())
}

fn build_headers(headers: &[&str]) -> Result<HeaderMap> {
    ensure_even(headers)?;

    let mut map = HeaderMap::new();
    map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for pair in headers.chunks_exact(2) {
        let name = HeaderName::from_bytes(pair[0].as_bytes())
            .map_err(|_| Error::InvalidHeader(pair[0].to_string()))?;
        let value = HeaderValue::from_str(pair[1])
            .map_err(|_| Error::InvalidHeader(pair[1].to_string()))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use std::net::TcpListener;

    #[test]
    fn test_build_url_percent_encodes_each_pair() {
        let url = build_url("http://x.test", &["a", "b c", "d", "e&f"]).unwrap();
        assert_eq!(url, "http://x.test?a=b+c&d=e%26f");
    }

    #[test]
    fn test_build_url_encodes_utf8() {
        let url = build_url("http://x.test", &["name", "jäger"]).unwrap();
        assert_eq!(url, "http://x.test?name=j%C3%A4ger");
    }

    #[test]
    fn test_build_url_rejects_odd_list() {
        let err = build_url("http://x.test", &["a", "b", "c"]).unwrap_err();
        assert!(matches!(err, Error::OddPairList(3)));
        assert!(err.is_validation());
    }

    #[test]
    fn test_build_url_empty_params() {
        assert_eq!(build_url("http://x.test", &[]).unwrap(), "http://x.test?");
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://api.example.com/v1"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("mailto:someone"));
    }

    #[test]
    fn test_connect_rejects_malformed_url_without_io() {
        let transport = StatsTransport::new().unwrap();
        let err = transport.connect("not a url", &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = transport.connect("", &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_connect_rejects_odd_params() {
        let transport = StatsTransport::new().unwrap();
        let err = transport.connect("http://x.test", &["lone"]).unwrap_err();
        assert!(matches!(err, Error::OddPairList(1)));
    }

    #[test]
    fn test_connect_carries_encoded_query() {
        let transport = StatsTransport::new().unwrap();
        let conn = transport
            .connect("http://x.test", &["statistics", "operatorpvp_kills:2:1:infinite"])
            .unwrap();
        assert_eq!(
            conn.url().query(),
            Some("statistics=operatorpvp_kills%3A2%3A1%3Ainfinite")
        );
    }

    #[test]
    fn test_connection_is_debug_printable() {
        // Result combinators like unwrap_err need Debug on the Ok side.
        let transport = StatsTransport::new().unwrap();
        let conn = transport.connect("http://x.test", &[]).unwrap();
        assert!(format!("{:?}", conn).contains("x.test"));
    }

    #[test]
    fn test_headers_apply_in_order_with_overwrite() {
        let map = build_headers(&["X-Session", "a", "X-Session", "b"]).unwrap();
        assert_eq!(map.get("X-Session").unwrap(), "b");
        assert_eq!(map.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_headers_can_override_content_type() {
        let map = build_headers(&["Content-Type", "text/plain"]).unwrap();
        assert_eq!(map.get(CONTENT_TYPE).unwrap(), "text/plain");
    }

    #[test]
    fn test_headers_reject_unwritable_name() {
        let err = build_headers(&["bad name", "v"]).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[test]
    fn test_parse_json_tree() {
        let tree = parse(&b"{\"wins\": 42}"[..]).unwrap();
        assert_eq!(tree, json!({"wins": 42}));
        assert_eq!(tree["wins"].as_i64(), Some(42));
    }

    #[test]
    fn test_parse_preserves_scalar_kinds() {
        let tree = parse(&br#"{"n": 1, "s": "1", "b": true, "z": null, "a": [1.5]}"#[..]).unwrap();
        assert!(tree["n"].is_i64());
        assert!(tree["s"].is_string());
        assert!(tree["b"].is_boolean());
        assert!(tree["z"].is_null());
        assert_eq!(tree["a"][0].as_f64(), Some(1.5));
    }

    #[test]
    fn test_parse_empty_stream_is_decode_error() {
        let err = parse(&b""[..]).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_parse_truncated_json_is_decode_error() {
        let err = parse(&b"{\"wins\": "[..]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    /// Serves exactly one request on a loopback socket and returns the raw
    /// request bytes it saw.
    fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (u16, std::thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let text = String::from_utf8_lossy(&request).into_owned();
            // Drain the body if the client declared one.
            if let Some(len) = content_length(&text) {
                let already = request.len() - (body_offset(&request) + 4);
                let mut remaining = len.saturating_sub(already);
                while remaining > 0 {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                    remaining -= n;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (port, handle)
    }

    fn content_length(request: &str) -> Option<usize> {
        request
            .lines()
            .find(|l| l.to_ascii_lowercase().starts_with("content-length:"))
            .and_then(|l| l.split(':').nth(1))
            .and_then(|v| v.trim().parse().ok())
    }

    fn body_offset(request: &[u8]) -> usize {
        request.windows(4).position(|w| w == b"\r\n\r\n").unwrap()
    }

    #[test]
    fn test_get_then_parse_end_to_end() -> anyhow::Result<()> {
        let (port, server) = serve_once("200 OK", "{\"wins\": 42}");
        let transport = StatsTransport::new()?;
        let conn = transport.connect(&format!("http://127.0.0.1:{}", port), &["a", "b c"])?;
        let response = conn.get(&["X-Test", "1"])?;
        let tree = parse(response)?;
        assert_eq!(tree["wins"], json!(42));

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /?a=b+c HTTP/1.1"));
        let lowered = request.to_ascii_lowercase();
        assert!(lowered.contains("content-type: application/json"));
        assert!(lowered.contains("x-test: 1"));
        Ok(())
    }

    #[test]
    fn test_post_sends_payload() -> anyhow::Result<()> {
        let (port, server) = serve_once("200 OK", "{\"ok\": true}");
        let transport = StatsTransport::new()?;
        let conn = transport.connect(&format!("http://127.0.0.1:{}", port), &[])?;
        let response = conn.post("{\"name\": \"smoke\"}", &[])?;
        assert_eq!(parse(response)?["ok"], json!(true));

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /"));
        assert!(request.ends_with("{\"name\": \"smoke\"}"));
        Ok(())
    }

    #[test]
    fn test_non_2xx_passes_through_with_body() {
        let (port, server) = serve_once("404 Not Found", "{\"error\": \"no such player\"}");
        let transport = StatsTransport::new().unwrap();
        let conn = transport
            .connect(&format!("http://127.0.0.1:{}", port), &[])
            .unwrap();
        let response = conn.get(&[]).unwrap();
        assert_eq!(response.status().as_u16(), 404);
        assert_eq!(
            parse(response).unwrap()["error"],
            json!("no such player")
        );
        server.join().unwrap();
    }

    #[test]
    fn test_refused_connection_is_transport_error() {
        // Bind then drop to get a port nothing is listening on.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = StatsTransport::new().unwrap();
        let conn = transport
            .connect(&format!("http://127.0.0.1:{}", port), &[])
            .unwrap();
        let err = conn.get(&[]).unwrap_err();
        assert!(err.is_transport());
    }
}
