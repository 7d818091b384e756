//! Fake Nominatim search endpoint for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /search` with a canned [`Reply`] and records the
//! query string of every request so tests can check what the resolver sent.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeNominatim::start(Reply::Found(48.8566, 2.3522)).await.unwrap();
//! let resolver = NominatimResolver::new(&api.geocoder_config()).unwrap();
//! ```

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use mof_core::config::GeocoderConfig;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// What `/search` answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    /// One hit; coordinates are sent as strings, as Nominatim does.
    Found(f64, f64),
    /// `[]`
    Empty,
    /// The given status with an empty body.
    Status(u16),
    /// 200 with a body that is not a JSON array.
    Malformed,
    /// One hit whose `lat` cannot be parsed.
    BadCoordinates,
}

struct ApiState {
    reply: Reply,
    requests: Vec<HashMap<String, String>>,
}

/// Handle to the running fake server.
pub struct FakeNominatim {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeNominatim {
    /// Start on a random port. Returns once the server is listening.
    pub async fn start(reply: Reply) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            reply,
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/search", get(search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Geocoder settings pointing at this server.
    pub fn geocoder_config(&self) -> GeocoderConfig {
        GeocoderConfig {
            url: format!("{}/search", self.base_url()),
            country_codes: "fr".to_string(),
            user_agent: "MOF-Guide/1.0".to_string(),
        }
    }

    pub async fn set_reply(&self, reply: Reply) {
        self.state.lock().await.reply = reply;
    }

    /// Query parameters of every request received so far.
    pub async fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().await.requests.clone()
    }
}

/// A geocoder config pointing at a port nothing listens on.
pub fn unreachable_geocoder() -> GeocoderConfig {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    GeocoderConfig {
        url: format!("http://{addr}/search"),
        country_codes: "fr".to_string(),
        user_agent: "MOF-Guide/1.0".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.requests.push(params);

    match state.reply {
        Reply::Found(lat, lon) => (
            StatusCode::OK,
            serde_json::json!([{
                "lat": lat.to_string(),
                "lon": lon.to_string(),
                "display_name": "somewhere in France"
            }])
            .to_string(),
        ),
        Reply::Empty => (StatusCode::OK, "[]".to_string()),
        Reply::Status(code) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            String::new(),
        ),
        Reply::Malformed => (StatusCode::OK, "<html>rate limited</html>".to_string()),
        Reply::BadCoordinates => (
            StatusCode::OK,
            r#"[{"lat":"north","lon":"2.35"}]"#.to_string(),
        ),
    }
}
