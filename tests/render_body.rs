use std::time::SystemTime;

use tmail::api::models::{MessageDetail, MessageSummary, Sender};
use tmail::inbox::InboxState;
use tmail::render::{self, DetailPane, body};
use tmail::session::Session;

#[test]
fn linkify_neutralizes_markup_and_anchors_urls() {
    let out = body::linkify("<script>alert('x')</script> visit https://example.com/a?b=1 now");

    assert!(out.contains("&lt;script&gt;"));
    assert!(!out.contains("<script>"));
    assert!(out.contains(
        r#"<a href="https://example.com/a?b=1" target="_blank" rel="noopener noreferrer">https://example.com/a?b=1</a>"#
    ));
}

#[test]
fn sanitize_rewrites_links_and_images() {
    let html = r#"<p><a href="https://x.test">x</a><img src="https://x.test/i.png"></p>"#;
    let out = body::sanitize_html(html);

    assert!(out.contains(r#"href="https://x.test""#));
    assert!(out.contains(r#"target="_blank""#));
    assert!(out.contains(r#"rel="noopener noreferrer""#));
    assert!(out.contains(r#"style="max-width:100%;height:auto""#));
}

#[test]
fn projection_reflects_selection_and_badge() {
    let session = Session::new("tm1@bugfoo.com", "tok", "pw", SystemTime::now()).expect("session");
    let mut state = InboxState::default();
    state.apply_poll(
        state.epoch(),
        vec![
            MessageSummary {
                id: "m1".to_string(),
                from: Some(Sender {
                    name: "Alice".to_string(),
                    address: "alice@example.com".to_string(),
                }),
                subject: Some("hello".to_string()),
                created_at: Some("2026-08-30T10:00:00Z".to_string()),
            },
            MessageSummary {
                id: "m2".to_string(),
                from: None,
                subject: None,
                created_at: None,
            },
        ],
    );
    state.select("m1");

    let model = render::project(Some(&session), &state, true, SystemTime::now());

    assert_eq!(model.message_count, Some(2));
    assert!(model.new_mail_flash);
    assert!(model.inbox[0].selected);
    assert!(!model.inbox[1].selected);
    assert_eq!(model.inbox[0].from, "Alice");
    assert_eq!(model.inbox[1].from, "Unknown");
    assert_eq!(model.inbox[1].subject, "(no subject)");
    assert_eq!(model.detail, DetailPane::Loading);
}

#[test]
fn detail_pane_prefers_sanitized_html_over_text() {
    let detail = MessageDetail {
        id: "m1".to_string(),
        from: None,
        subject: None,
        created_at: None,
        html: vec![r#"<a href="https://a.test">a</a>"#.to_string()],
        text: Some("ignored when html present".to_string()),
    };

    match render::pane_for_detail(&detail) {
        DetailPane::Html(html) => {
            assert!(html.contains(r#"rel="noopener noreferrer""#));
            assert!(!html.contains("ignored"));
        }
        other => panic!("expected html pane, got {other:?}"),
    }
}
