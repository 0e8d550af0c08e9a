#![forbid(unsafe_code)]

//! Widget configuration: dimensions, timing, limits, storage keys, fixed
//! user-facing strings and server URL resolution. Defaults match the shipped
//! widget; hosts override individual fields as needed.

use web_time::Duration;

/// Pixel dimensions and thresholds for the toggle anchor and chat panel.
#[derive(Debug, Clone)]
pub struct Dimensions {
    pub panel_width: f64,
    pub panel_height: f64,
    pub min_width: f64,
    pub min_height: f64,
    /// Maximum panel width as a fraction of viewport width.
    pub max_width_fraction: f64,
    /// Maximum panel height as a fraction of viewport height.
    pub max_height_fraction: f64,
    /// Gap kept between the anchor and the panel.
    pub gap: f64,
    /// Pointer travel (px) beyond which a press becomes a drag.
    pub drag_threshold: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            panel_width: 380.0,
            panel_height: 500.0,
            min_width: 280.0,
            min_height: 300.0,
            max_width_fraction: 0.9,
            max_height_fraction: 0.7,
            gap: 5.0,
            drag_threshold: 5.0,
        }
    }
}

/// Intervals and debounce windows.
#[derive(Debug, Clone)]
pub struct Timing {
    /// Delay between connectivity checks.
    pub reconnect_interval: Duration,
    /// Trailing debounce for viewport resize events.
    pub resize_debounce: Duration,
    /// Window after a drag release during which the synthetic click is
    /// swallowed.
    pub drag_reset_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reconnect_interval: Duration::from_millis(5000),
            resize_debounce: Duration::from_millis(50),
            drag_reset_delay: Duration::from_millis(100),
        }
    }
}

/// Bounds on the in-memory transcript and the persisted tail.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Oldest messages are dropped beyond this count.
    pub max_messages: usize,
    /// Only this many trailing messages are persisted.
    pub history_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_messages: 50,
            history_limit: 10,
        }
    }
}

/// Storage keys for persisted state.
#[derive(Debug, Clone)]
pub struct StorageKeys {
    pub history: String,
    pub open: String,
    pub session_id: String,
    pub panel_size: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            history: "ai-chat-history-paper".to_owned(),
            open: "ai-chat-open-paper".to_owned(),
            session_id: "ai-session-id-paper".to_owned(),
            panel_size: "ai-chat-size-paper".to_owned(),
        }
    }
}

/// Fixed user-facing strings for error and status surfaces.
#[derive(Debug, Clone)]
pub struct Messages {
    pub error_connection: String,
    pub error_generic: String,
    pub error_processing: String,
    pub tooltip_connected: String,
    pub tooltip_offline: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            error_connection: "I'm offline right now. Please make sure the AI server is \
                               running locally on port 8080."
                .to_owned(),
            error_generic: "Sorry, I encountered an error. Please try again later.".to_owned(),
            error_processing: "I couldn't process that request.".to_owned(),
            tooltip_connected: "Connected".to_owned(),
            tooltip_offline: "Offline - Start your local AI server".to_owned(),
        }
    }
}

/// A selectable context tag attachable to outgoing messages via @-mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextType {
    pub id: String,
    pub label_key: String,
    pub icon: String,
}

/// The built-in context catalog. One entry; hosts may extend it.
#[must_use]
pub fn default_context_types() -> Vec<ContextType> {
    vec![ContextType {
        id: "paper".to_owned(),
        label_key: "Paper Research".to_owned(),
        icon: "📄".to_owned(),
    }]
}

/// Candidate server URLs per deployment environment.
#[derive(Debug, Clone)]
pub struct ServerUrls {
    pub local: String,
    pub tunnel: String,
    pub production: String,
}

impl Default for ServerUrls {
    fn default() -> Self {
        Self {
            local: "http://localhost:8080/chat".to_owned(),
            tunnel: "https://chat-tunnel.example.com/chat".to_owned(),
            production: "https://api.example.com/chat".to_owned(),
        }
    }
}

impl ServerUrls {
    /// Pick the chat endpoint for the page's hostname: local development
    /// (including `file://` pages with an empty host) uses the local server,
    /// GitHub Pages goes through the tunnel, anything else is production.
    #[must_use]
    pub fn resolve(&self, hostname: &str) -> &str {
        if hostname.is_empty() || hostname == "localhost" || hostname == "127.0.0.1" {
            tracing::debug!(hostname, "using local chat server");
            &self.local
        } else if hostname.contains("github.io") {
            tracing::debug!(hostname, "using tunnel chat server");
            &self.tunnel
        } else {
            tracing::debug!(hostname, "using production chat server");
            &self.production
        }
    }
}

/// Path suffixes of the two server endpoints. The health URL is derived from
/// the chat URL by substituting the path.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub chat: String,
    pub health: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            chat: "/chat".to_owned(),
            health: "/health".to_owned(),
        }
    }
}

impl Endpoints {
    /// Derive the health-check URL from a chat URL.
    #[must_use]
    pub fn health_url(&self, chat_url: &str) -> String {
        chat_url.replacen(&self.chat, &self.health, 1)
    }
}

/// Complete widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub server_url: ServerUrl,
    pub endpoints: Endpoints,
    pub dimensions: Dimensions,
    pub timing: Timing,
    pub limits: Limits,
    pub keys: StorageKeys,
    pub messages: Messages,
    /// Site-owner profile sent as request context alongside the timestamp.
    pub profile: serde_json::Value,
    /// Root font size of the host page; edge margin is twice this.
    pub root_font_px: f64,
}

/// The resolved chat endpoint URL.
#[derive(Debug, Clone)]
pub struct ServerUrl(pub String);

impl Default for ServerUrl {
    fn default() -> Self {
        Self(ServerUrls::default().local)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            server_url: ServerUrl::default(),
            endpoints: Endpoints::default(),
            dimensions: Dimensions::default(),
            timing: Timing::default(),
            limits: Limits::default(),
            keys: StorageKeys::default(),
            messages: Messages::default(),
            profile: serde_json::Value::Object(serde_json::Map::new()),
            root_font_px: 16.0,
        }
    }
}

impl WidgetConfig {
    /// Configuration for a page served from `hostname`, with everything else
    /// at defaults.
    #[must_use]
    pub fn for_hostname(hostname: &str) -> Self {
        let urls = ServerUrls::default();
        Self {
            server_url: ServerUrl(urls.resolve(hostname).to_owned()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn health_url(&self) -> String {
        self.endpoints.health_url(&self.server_url.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Endpoints, ServerUrls, WidgetConfig};

    #[test]
    fn hostname_resolution() {
        let urls = ServerUrls::default();
        assert_eq!(urls.resolve("localhost"), urls.local);
        assert_eq!(urls.resolve("127.0.0.1"), urls.local);
        assert_eq!(urls.resolve(""), urls.local);
        assert_eq!(urls.resolve("someone.github.io"), urls.tunnel);
        assert_eq!(urls.resolve("example.com"), urls.production);
    }

    #[test]
    fn health_url_substitutes_path_once() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.health_url("http://localhost:8080/chat"),
            "http://localhost:8080/health"
        );
    }

    #[test]
    fn default_margin_inputs() {
        let config = WidgetConfig::default();
        assert_eq!(config.root_font_px, 16.0);
        assert_eq!(config.dimensions.gap, 5.0);
        assert_eq!(config.limits.history_limit, 10);
    }
}
