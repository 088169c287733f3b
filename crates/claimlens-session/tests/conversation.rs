mod common;

use std::time::Duration;

use claimlens_analyst::error::AnalystError;
use claimlens_core::models::chat::{ContentBlock, Role};
use claimlens_session::conversation::{Conversation, ConversationState, EMPTY_REPLY};

use common::{reply, ScriptedAnalyst};

const MODEL: &str = "@INS_CO.LOSS_CLAIMS.LOSS_EVIDENCE/loss_claims.yaml";

#[test]
fn blank_input_is_ignored() {
    let mut conversation = Conversation::new();
    assert!(!conversation.submit("   "));
    assert!(conversation.is_empty());
    assert_eq!(conversation.state(), ConversationState::Idle);
}

#[test]
fn second_prompt_is_ignored_while_awaiting_reply() {
    let mut conversation = Conversation::new();
    assert!(conversation.submit("first"));
    assert!(!conversation.submit("second"));
    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation.state(), ConversationState::AwaitingAnalystReply);
}

#[test]
fn reset_clears_transcript_and_bumps_epoch() {
    let mut conversation = Conversation::new();
    conversation.submit("hello");
    let before = conversation.epoch();

    conversation.reset();

    assert_eq!(conversation.len(), 0);
    assert_eq!(conversation.epoch(), before + 1);
    assert!(conversation.pending().is_none());
}

#[tokio::test]
async fn every_user_turn_gets_exactly_one_reply() {
    let analyst = ScriptedAnalyst::new()
        .then_text("first answer")
        .then_text("second answer");
    let mut conversation = Conversation::new();

    conversation.submit("first question");
    conversation.settle(&analyst, MODEL).await;
    conversation.submit("second question");
    conversation.settle(&analyst, MODEL).await;

    let roles: Vec<Role> = conversation.transcript().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Analyst, Role::User, Role::Analyst]);
    assert_eq!(conversation.transcript()[3].text(), "second answer");
    assert_eq!(analyst.call_count(), 2);
}

#[tokio::test]
async fn settle_without_pending_turn_does_not_call_analyst() {
    let analyst = ScriptedAnalyst::new();
    let mut conversation = Conversation::new();

    conversation.settle(&analyst, MODEL).await;

    assert_eq!(analyst.call_count(), 0);
    assert!(conversation.is_empty());
}

#[tokio::test]
async fn full_transcript_is_sent_with_model_reference() {
    let analyst = ScriptedAnalyst::new().then_text("a1").then_text("a2");
    let mut conversation = Conversation::new();

    conversation.submit("q1");
    conversation.settle(&analyst, MODEL).await;
    conversation.submit("q2");
    conversation.settle(&analyst, MODEL).await;

    let sent = analyst.sent.lock().unwrap();
    let (transcript, model) = &sent[1];
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].text(), "q1");
    assert_eq!(transcript[2].text(), "q2");
    assert_eq!(model, MODEL);
}

#[tokio::test]
async fn timeout_becomes_single_error_text_block() {
    let analyst = ScriptedAnalyst::new().then(Err(AnalystError::Timeout(Duration::from_secs(60))));
    let mut conversation = Conversation::new();

    conversation.submit("slow question");
    conversation.settle(&analyst, MODEL).await;

    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation.state(), ConversationState::Idle);
    let last = &conversation.transcript()[1];
    assert_eq!(last.role, Role::Analyst);
    assert_eq!(last.content.len(), 1);
    assert!(matches!(&last.content[0], ContentBlock::Text { text } if text.contains("error")));
}

#[tokio::test]
async fn api_error_renders_status_and_message() {
    let analyst = ScriptedAnalyst::new().then(Err(AnalystError::Api {
        status: 400,
        message: "semantic model not found".to_string(),
    }));
    let mut conversation = Conversation::new();

    conversation.submit("question");
    conversation.settle(&analyst, MODEL).await;

    assert_eq!(
        conversation.transcript()[1].text(),
        "API Error (Code: 400): semantic model not found"
    );
}

#[tokio::test]
async fn empty_reply_uses_fallback_text() {
    let analyst = ScriptedAnalyst::new().then(Ok(reply(Vec::new())));
    let mut conversation = Conversation::new();

    conversation.submit("question");
    conversation.settle(&analyst, MODEL).await;

    assert_eq!(conversation.transcript()[1].text(), EMPTY_REPLY);
}

#[test]
fn reply_for_previous_epoch_is_discarded() {
    let mut conversation = Conversation::new();
    conversation.submit("old question");
    let stale = conversation.pending().unwrap().epoch;

    conversation.reset();
    conversation.submit("new question");

    assert!(!conversation.complete(stale, Ok(reply(vec![ContentBlock::text("old answer")]))));
    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation.state(), ConversationState::AwaitingAnalystReply);

    let current = conversation.epoch();
    assert!(conversation.complete(current, Ok(reply(vec![ContentBlock::text("new answer")]))));
    assert_eq!(conversation.transcript()[1].text(), "new answer");
}

#[test]
fn completion_without_pending_turn_is_discarded() {
    let mut conversation = Conversation::new();
    let epoch = conversation.epoch();
    assert!(!conversation.complete(epoch, Ok(reply(vec![ContentBlock::text("orphan")]))));
    assert!(conversation.is_empty());
}
