//! Conversation content exchanged with the model backend.
//!
//! Field names follow the `generateContent` wire format so these types are
//! serialized into requests and parsed out of responses unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role),
            parts,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Part::text(text)])
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self::new(Role::Model, vec![Part::text(text)])
    }

    pub fn function_calls(&self) -> impl Iterator<Item = &FunctionCall> {
        self.parts.iter().filter_map(|part| part.function_call.as_ref())
    }

    /// Concatenated text of every text part, newline separated
    pub fn joined_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    /// Opaque signature the backend attaches to reasoning parts; echoed back verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn function_call(call: FunctionCall) -> Self {
        Self {
            function_call: Some(call),
            ..Self::default()
        }
    }

    pub fn function_response(response: FunctionResponse) -> Self {
        Self {
            function_response: Some(response),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

impl FunctionResponse {
    /// Successful tool output, stored under the `result` key
    pub fn result(name: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: json!({ "result": result.into() }),
        }
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: json!({ "error": message.into() }),
        }
    }

    pub fn result_text(&self) -> Option<&str> {
        self.response.get("result").and_then(Value::as_str)
    }
}

/// Function exposed to the model in a request's `tools` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_parts() {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [
                {"text": "Let me ask."},
                {"functionCall": {"name": "IdeaAgent", "args": {"request": "cats"}}, "thoughtSignature": "abc"}
            ]
        }))
        .expect("valid content");

        assert_eq!(content.role, Some(Role::Model));
        let calls: Vec<_> = content.function_calls().collect();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "IdeaAgent");
        assert_eq!(calls[0].args["request"], "cats");
        assert_eq!(content.parts[1].thought_signature.as_deref(), Some("abc"));
    }

    #[test]
    fn serializes_function_response_in_camel_case() {
        let content = Content::new(
            Role::User,
            vec![Part::function_response(FunctionResponse::result(
                "CriticAgent",
                "needs work",
            ))],
        );

        let value = serde_json::to_value(&content).expect("serializable");

        assert_eq!(
            value,
            json!({
                "role": "user",
                "parts": [{"functionResponse": {"name": "CriticAgent", "response": {"result": "needs work"}}}]
            })
        );
    }

    #[test]
    fn joined_text_skips_non_text_parts() {
        let content = Content::new(
            Role::Model,
            vec![
                Part::text("first"),
                Part::function_call(FunctionCall::new("IdeaAgent", json!({}))),
                Part::text("second"),
            ],
        );

        assert_eq!(content.joined_text(), "first\nsecond");
    }
}
