//! End-to-end note workflows: direct attachment, the disambiguation
//! round-trip, and its timeout path.

mod common;

use std::time::Duration;

use ficnotes::chat::SELECTORS;
use ficnotes::models::ElementKind;
use ficnotes::repository::CatalogRepository;
use pretty_assertions::assert_eq;
use surrealdb::RecordId;

use common::harness::{author, BotHarness};
use common::input_helpers::{add_element, add_note, add_story};

async fn story_id(h: &BotHarness, user_id: u64, story: &str) -> RecordId {
    let user = h
        .repo
        .find_user(user_id)
        .await
        .expect("Failed to find user")
        .expect("user should exist");
    h.repo
        .find_story(&user.id, story)
        .await
        .expect("Failed to find story")
        .expect("story should exist")
        .id
}

async fn notes_on(h: &BotHarness, story: &RecordId, kind: ElementKind, name: &str) -> Vec<String> {
    let element = h
        .repo
        .find_element(story, kind, name)
        .await
        .expect("Failed to find element")
        .expect("element should exist");
    h.repo
        .list_notes(&element.id)
        .await
        .expect("Failed to list notes")
        .into_iter()
        .map(|n| n.body)
        .collect()
}

#[tokio::test]
async fn unique_element_name_skips_disambiguation() {
    let h = BotHarness::new().await;
    let lea = author(1, "lea");

    h.say(&lea, &add_story("Arc1")).await;
    h.say(&lea, &add_element("character", "Mira", "Arc1")).await;
    h.say(&lea, &add_note("limps since ch3", "Mira", "Arc1")).await;

    assert_eq!(
        h.transport.last_sent().expect("a reply").text,
        "@lea Added a note to Mira."
    );
    // No prompt: nothing was reacted to, nothing was deleted.
    assert!(h.transport.deleted_ids().is_empty());
    let story = story_id(&h, 1, "Arc1").await;
    assert_eq!(
        notes_on(&h, &story, ElementKind::Character, "Mira").await,
        vec!["limps since ch3".to_string()]
    );
}

#[tokio::test]
async fn missing_element_is_rejected_with_a_hint() {
    let h = BotHarness::new().await;
    let lea = author(1, "lea");

    h.say(&lea, &add_story("Arc1")).await;
    h.say(&lea, &add_note("text", "Ghost", "Arc1")).await;

    assert_eq!(
        h.transport.last_sent().expect("a reply").text,
        "@lea Ghost not found in Arc1. Try adding it first with \"!ficnotesbot add [kind] Ghost > Arc1\"."
    );
}

#[tokio::test]
async fn two_kind_collision_prompts_with_two_selectors() {
    let h = BotHarness::new().await;
    let lea = author(1, "lea");

    h.say(&lea, &add_story("Arc1")).await;
    h.say(&lea, &add_element("character", "Lea", "Arc1")).await;
    h.say(&lea, &add_element("object", "Lea", "Arc1")).await;

    let handle = h.say_in_background(&lea, &add_note("first line", "Lea", "Arc1"));
    let prompt = h.wait_for_message_containing("Which Lea did you mean?").await;

    assert_eq!(
        prompt.text,
        format!(
            "@lea Which Lea did you mean?\n {} - Character\n {} - Object\n",
            SELECTORS[0], SELECTORS[1]
        )
    );
    // Exactly the assigned selectors are attached, in order.
    h.wait_for_reactions(prompt.id, 2).await;
    assert_eq!(
        h.transport.reactions_on(prompt.id),
        vec![SELECTORS[0].to_string(), SELECTORS[1].to_string()]
    );

    h.transport.press(prompt.id, lea.id, SELECTORS[0]);
    handle.await.expect("handler task failed");

    assert_eq!(
        h.transport.last_sent().expect("a reply").text,
        "@lea Added a note to Lea."
    );
    assert_eq!(h.transport.deleted_ids(), vec![prompt.id]);

    // The note landed on the Character, not the Object.
    let story = story_id(&h, 1, "Arc1").await;
    assert_eq!(
        notes_on(&h, &story, ElementKind::Character, "Lea").await,
        vec!["first line".to_string()]
    );
    assert!(notes_on(&h, &story, ElementKind::Object, "Lea").await.is_empty());
}

#[tokio::test]
async fn second_selector_resolves_to_second_kind() {
    let h = BotHarness::new().await;
    let lea = author(1, "lea");

    h.say(&lea, &add_story("Arc1")).await;
    h.say(&lea, &add_element("character", "Lea", "Arc1")).await;
    h.say(&lea, &add_element("object", "Lea", "Arc1")).await;

    let handle = h.say_in_background(&lea, &add_note("a keepsake", "Lea", "Arc1"));
    let prompt = h.wait_for_message_containing("Which Lea did you mean?").await;
    h.transport.press(prompt.id, lea.id, SELECTORS[1]);
    handle.await.expect("handler task failed");

    let story = story_id(&h, 1, "Arc1").await;
    assert_eq!(
        notes_on(&h, &story, ElementKind::Object, "Lea").await,
        vec!["a keepsake".to_string()]
    );
    assert!(notes_on(&h, &story, ElementKind::Character, "Lea").await.is_empty());
}

#[tokio::test]
async fn foreign_reactions_and_unassigned_symbols_are_ignored() {
    let h = BotHarness::new().await;
    let lea = author(1, "lea");

    h.say(&lea, &add_story("Arc1")).await;
    h.say(&lea, &add_element("character", "Lea", "Arc1")).await;
    h.say(&lea, &add_element("object", "Lea", "Arc1")).await;

    let handle = h.say_in_background(&lea, &add_note("first line", "Lea", "Arc1"));
    let prompt = h.wait_for_message_containing("Which Lea did you mean?").await;

    // Another user's pick must not count.
    h.transport.press(prompt.id, 99, SELECTORS[0]);
    // Neither must a symbol that was never assigned.
    h.transport.press(prompt.id, lea.id, SELECTORS[5]);
    // The author's pick of an assigned symbol settles it.
    h.transport.press(prompt.id, lea.id, SELECTORS[1]);
    handle.await.expect("handler task failed");

    let story = story_id(&h, 1, "Arc1").await;
    assert_eq!(
        notes_on(&h, &story, ElementKind::Object, "Lea").await,
        vec!["first line".to_string()]
    );
    assert!(notes_on(&h, &story, ElementKind::Character, "Lea").await.is_empty());
}

#[tokio::test]
async fn timed_out_selection_saves_nothing() {
    let h = BotHarness::with_selection_timeout(Duration::from_millis(200)).await;
    let lea = author(1, "lea");

    h.say(&lea, &add_story("Arc1")).await;
    h.say(&lea, &add_element("character", "Lea", "Arc1")).await;
    h.say(&lea, &add_element("object", "Lea", "Arc1")).await;

    let handle = h.say_in_background(&lea, &add_note("first line", "Lea", "Arc1"));
    let prompt = h.wait_for_message_containing("Which Lea did you mean?").await;
    handle.await.expect("handler task failed");

    assert_eq!(
        h.transport.last_sent().expect("a reply").text,
        "@lea Timeout. Try again."
    );
    assert_eq!(h.transport.deleted_ids(), vec![prompt.id]);

    let story = story_id(&h, 1, "Arc1").await;
    assert!(notes_on(&h, &story, ElementKind::Character, "Lea").await.is_empty());
    assert!(notes_on(&h, &story, ElementKind::Object, "Lea").await.is_empty());
}

/// The full scripted exchange from the product walkthrough.
#[tokio::test]
async fn scripted_walkthrough() {
    let h = BotHarness::new().await;
    let lea = author(1, "lea");

    h.say(&lea, &add_story("Arc1")).await;
    assert_eq!(
        h.transport.last_sent().expect("a reply").text,
        "@lea Arc1 has been added to your stories."
    );

    h.say(&lea, &add_element("character", "Lea", "Arc1")).await;
    assert_eq!(
        h.transport.last_sent().expect("a reply").text,
        "@lea Lea has been added to Arc1."
    );

    h.say(&lea, &add_element("object", "Lea", "Arc1")).await;
    assert_eq!(
        h.transport.last_sent().expect("a reply").text,
        "@lea Lea has been added to Arc1."
    );

    let handle = h.say_in_background(&lea, &add_note("first line", "Lea", "Arc1"));
    let prompt = h.wait_for_message_containing("Which Lea did you mean?").await;
    h.transport.press(prompt.id, lea.id, SELECTORS[0]);
    handle.await.expect("handler task failed");
    assert_eq!(
        h.transport.last_sent().expect("a reply").text,
        "@lea Added a note to Lea."
    );

    h.say(&lea, &add_element("character", "Lea", "Arc1")).await;
    assert_eq!(
        h.transport.last_sent().expect("a reply").text,
        "@lea Lea is already in Arc1."
    );
}
