//! Integration tests for playback ordering, the fatal no-focus path, and the
//! request/response protocol.

use mdpress_engine::{Block, BlockKind};
use mdpress_player::{
    Action, Gesture, Pacing, PlayError, Player, RegionId, Request, Response, TranscriptSurface,
    dispatch,
};
use pretty_assertions::assert_eq;

fn blocks() -> Vec<Block> {
    vec![
        Block::single(BlockKind::Header { level: 1 }, "Title".to_string()),
        Block::new(BlockKind::Text, vec!["body".to_string()]),
    ]
}

#[test]
fn blocks_play_strictly_in_order() {
    let mut surface = TranscriptSurface::new();
    let report = Player::new(Pacing::zero())
        .play(&mut surface, &blocks())
        .unwrap();

    assert_eq!(report.blocks_played, 2);
    assert_eq!(
        surface.actions(),
        &[
            Action::Gesture(RegionId(0), Gesture::SetHeading { level: 1 }),
            Action::Insert(RegionId(0), "Title".to_string()),
            Action::Advance(RegionId(0)),
            Action::Gesture(RegionId(1), Gesture::PlainParagraph),
            Action::Insert(RegionId(1), "body".to_string()),
            Action::Advance(RegionId(1)),
        ]
    );
}

#[test]
fn multi_line_blocks_insert_as_one_write() {
    let mut surface = TranscriptSurface::new();
    let quote = vec![Block::new(
        BlockKind::Quote,
        vec!["line one".to_string(), "line two".to_string()],
    )];
    Player::new(Pacing::zero())
        .play(&mut surface, &quote)
        .unwrap();

    assert_eq!(
        surface.actions()[1],
        Action::Insert(RegionId(0), "line one\nline two".to_string())
    );
}

#[test]
fn no_focused_region_is_fatal_before_anything_happens() {
    let mut surface = TranscriptSurface::unfocused();
    let err = Player::new(Pacing::zero())
        .play(&mut surface, &blocks())
        .unwrap_err();

    assert!(matches!(
        err,
        PlayError::NoFocusedRegion { played: 0, total: 2 }
    ));
    assert!(surface.actions().is_empty());
}

#[test]
fn losing_focus_mid_run_leaves_partial_output() {
    let mut surface = TranscriptSurface::new().lose_focus_after(1);
    let err = Player::new(Pacing::zero())
        .play(&mut surface, &blocks())
        .unwrap_err();

    assert!(matches!(
        err,
        PlayError::NoFocusedRegion { played: 1, total: 2 }
    ));
    // Block 0 was fully played and stays; no partial undo.
    assert_eq!(surface.actions().len(), 3);
}

#[test]
fn dispatch_insert_content_succeeds() {
    let mut surface = TranscriptSurface::new();
    let request = Request::insert_content("# Title\n\nbody");
    let response = dispatch(&request, &mut surface, Pacing::zero());

    assert_eq!(
        response,
        Response {
            success: true,
            message: "Markdown content inserted successfully".to_string()
        }
    );
    assert_eq!(surface.actions().len(), 6);
}

#[test]
fn dispatch_unknown_action_echoes_the_name() {
    let mut surface = TranscriptSurface::new();
    let request = Request {
        action: "formatDocument".to_string(),
        content: None,
    };
    let response = dispatch(&request, &mut surface, Pacing::zero());

    assert_eq!(
        response,
        Response {
            success: false,
            message: "Unknown action: formatDocument".to_string()
        }
    );
    assert!(surface.actions().is_empty());
}

#[test]
fn dispatch_surfaces_player_failure() {
    let mut surface = TranscriptSurface::unfocused();
    let request = Request::insert_content("some text");
    let response = dispatch(&request, &mut surface, Pacing::zero());

    assert!(!response.success);
    assert!(response.message.contains("no editable region has focus"));
}

#[test]
fn request_wire_format() {
    let json = r##"{"action":"insertContent","content":"# Hi"}"##;
    let request: Request = serde_json::from_str(json).unwrap();
    assert_eq!(request.action, "insertContent");
    assert_eq!(request.content.as_deref(), Some("# Hi"));

    let back = serde_json::to_string(&request).unwrap();
    assert_eq!(back, json);
}

#[test]
fn response_wire_format() {
    let response = Response {
        success: false,
        message: "Unknown action: x".to_string(),
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Unknown action: x");
}
