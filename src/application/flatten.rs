//! Converts streamed agent events into user-visible text.

use super::agent::{AgentError, EventStream};
use crate::constants::{EMPTY_RESPONSE_FALLBACK, NO_MESSAGE_FALLBACK};
use crate::domain::{AgentEvent, Part};
use futures::StreamExt;
use tracing::warn;

/// Render one event.
///
/// An event without content (or with an empty part list) yields the
/// no-message fallback. Otherwise text parts are emitted verbatim, tool results
/// carrying a string `result` as `name: result`, and the fragments are joined
/// with newlines. Parts matching neither contribute nothing.
pub fn flatten(event: &AgentEvent) -> String {
    let Some(content) = event.content.as_ref().filter(|c| !c.parts.is_empty()) else {
        warn!(
            event_id = event.id.as_str(),
            author = event.author.as_str(),
            "Agent event carried no message"
        );
        return NO_MESSAGE_FALLBACK.to_string();
    };

    content
        .parts
        .iter()
        .filter_map(render_part)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_part(part: &Part) -> Option<String> {
    if let Some(text) = part.text.as_deref().filter(|text| !text.is_empty()) {
        return Some(text.to_string());
    }
    let response = part.function_response.as_ref()?;
    let result = response.result_text()?;
    Some(format!("{}: {}", response.name, result))
}

/// Drain a turn, concatenating each flattened event without separators.
///
/// A turn that renders to nothing is replaced by the empty-response fallback so
/// the caller always has something to show.
pub async fn collect_response(mut events: EventStream) -> Result<String, AgentError> {
    let mut response = String::new();
    let mut count = 0usize;
    while let Some(event) = events.next().await {
        response.push_str(&flatten(&event?));
        count += 1;
    }

    if response.is_empty() {
        warn!(events = count, "Agent response was empty");
        return Ok(EMPTY_RESPONSE_FALLBACK.to_string());
    }
    Ok(response)
}
