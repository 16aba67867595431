//! Application constants
//!
//! Single source of truth for paths, defaults and user-facing fallback text.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/server.toml";

/// Environment files loaded before any variable lookup
pub const ENV_PATHS: [&str; 2] = ["config/.env", ".env"];

/// Required deployment identifiers
pub const ENV_CLOUD_LOCATION: &str = "GOOGLE_CLOUD_LOCATION";
pub const ENV_CLOUD_PROJECT: &str = "GOOGLE_CLOUD_PROJECT";
pub const ENV_STORAGE_BUCKET: &str = "GOOGLE_CLOUD_STORAGE_BUCKET";

/// Credential variables read by the model client
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const DEFAULT_ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;
pub const DEFAULT_MAX_STEPS: usize = 8;

/// Emitted for a streamed event that carries no content at all
pub const NO_MESSAGE_FALLBACK: &str = "Agent produced no message.";

/// Returned to the client when a whole turn flattens to nothing
pub const EMPTY_RESPONSE_FALLBACK: &str = "Sorry, I could not generate a response.";

pub const DEFAULT_FACILITATOR_NAME: &str = "Facilitator";
pub const DEFAULT_FACILITATOR_DESCRIPTION: &str =
    "Facilitator agent that leads the meeting discussion.";

/// Placeholder replaced with the bulleted tool list
pub const TOOLS_PLACEHOLDER: &str = "{{tools}}";

pub const DEFAULT_FACILITATOR_INSTRUCTIONS: &str = r#"
You are the facilitator of a brainstorming meeting. Keep the discussion focused, summarise progress and propose the next step.

You can consult the following agents as tools:
{{tools}}

Call an agent when its perspective moves the discussion forward, then relay its contribution to the user in your own words.
"#;
