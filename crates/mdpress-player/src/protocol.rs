//! The conversion-trigger protocol between a controlling front end and the
//! playback side: a single `insertContent` action with a success/message
//! reply. Unknown actions are answered, not rejected at the parse layer, so
//! the reply can echo the action name back.

use serde::{Deserialize, Serialize};

use mdpress_engine::parse;

use crate::player::{Pacing, Player};
use crate::surface::EditorSurface;

/// A conversion request. `action` is an open string so that unrecognised
/// actions still deserialize and get a proper error reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Request {
    pub fn insert_content(content: impl Into<String>) -> Self {
        Self {
            action: "insertContent".to_string(),
            content: Some(content.into()),
        }
    }
}

/// Reply to a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
}

impl Response {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Handles one request: parses the Markdown synchronously, then drains the
/// blocks into `surface` in order. All failure handling is "fail the run,
/// tell the user why" — the reply carries the reason, nothing is retried.
pub fn dispatch(request: &Request, surface: &mut dyn EditorSurface, pacing: Pacing) -> Response {
    log::info!("received request: {}", request.action);
    match request.action.as_str() {
        "insertContent" => {
            let Some(content) = request.content.as_deref() else {
                return Response::err("insertContent request carried no content");
            };
            let blocks = parse(content);
            match Player::new(pacing).play(surface, &blocks) {
                Ok(_) => Response::ok("Markdown content inserted successfully"),
                Err(err) => Response::err(err.to_string()),
            }
        }
        other => Response::err(format!("Unknown action: {other}")),
    }
}
