//! Integration tests for the weather conversation driven through the full handler chain.
//!
//! Uses a recording MockBot, a stub weather client and a temp-file SQLite store. Covers commands,
//! menu buttons, the add-address flow, one-shot lookups and every inline button.

mod common;

use std::sync::Arc;

use common::mock_bot::BotCall;
use common::stub_weather::{paris, StubWeather};
use common::{Harness, CHAT_MESSAGE_ID};
use storage::AddressStore;
use weather_bot::{ConversationState, Markup};
use weather_client::{format_message, WeatherError};

const USER: i64 = 42;
const OTHER_USER: i64 = 7;

async fn harness() -> (Harness, Arc<StubWeather>) {
    let weather = Arc::new(
        StubWeather::new()
            .with_city("Paris", paris())
            .with_error("Nowhere", WeatherError::ConnectionFailed("timed out".to_string())),
    );
    (Harness::new(weather.clone()).await, weather)
}

fn is_main_menu(markup: &Option<Markup>) -> bool {
    matches!(markup, Some(Markup::Reply(kb)) if kb.rows.len() == 2)
}

fn is_cancel_menu(markup: &Option<Markup>) -> bool {
    matches!(markup, Some(Markup::Reply(kb)) if kb.rows == vec![vec!["❌ Cancel".to_string()]])
}

/// **Test: /start greets by first name, shows the main menu and registers the user.**
#[tokio::test]
async fn test_start_greets_and_registers_user() {
    let (h, _) = harness().await;

    h.send_text(USER, "/start").await;

    let (text, markup) = h.bot.last_send().unwrap();
    assert!(text.starts_with("👋 Hello, Ann!"));
    assert!(is_main_menu(&markup));
    assert_eq!(h.store.users().count().await.unwrap(), 1);
}

/// **Test: /start@botname is recognised and resets a pending add-address flow.**
#[tokio::test]
async fn test_start_with_bot_suffix_resets_state() {
    let (h, _) = harness().await;

    h.send_text(USER, "➕ Add Address").await;
    assert_eq!(h.states.get(USER).await, ConversationState::AwaitingAddress);

    h.send_text(USER, "/start@weather_test_bot").await;

    assert_eq!(h.states.get(USER).await, ConversationState::Idle);
    assert!(h.bot.last_send().unwrap().0.starts_with("👋 Hello"));
}

/// **Test: /help and the Help button send the same help text.**
#[tokio::test]
async fn test_help_command_and_button() {
    let (h, _) = harness().await;

    h.send_text(USER, "/help").await;
    h.send_text(USER, "ℹ️ Help").await;

    let texts = h.bot.sent_texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0], texts[1]);
    assert!(texts[0].contains("<b>How to use this bot:</b>"));
}

/// **Test: Get Weather prompts with the cancel menu and enters AwaitingAddress.**
#[tokio::test]
async fn test_get_weather_button_enters_awaiting_address() {
    let (h, _) = harness().await;

    h.send_text(USER, "🌤 Get Weather").await;

    let (text, markup) = h.bot.last_send().unwrap();
    assert_eq!(text, "🌤 Enter city name to get weather:");
    assert!(is_cancel_menu(&markup));
    assert_eq!(h.states.get(USER).await, ConversationState::AwaitingAddress);
}

/// **Test: Add Address then "Paris" shows the weather, saves the address and returns to Idle.**
///
/// **Expected:** reply contains "Paris, FR", "15°C" and "Clear sky"; one address "Paris" owned by 42.
#[tokio::test]
async fn test_add_address_saves_and_returns_to_idle() {
    let (h, _) = harness().await;

    h.send_text(USER, "➕ Add Address").await;
    h.send_text(USER, "Paris").await;

    let texts = h.bot.sent_texts();
    let weather = &texts[texts.len() - 2];
    assert!(weather.contains("Paris, FR"));
    assert!(weather.contains("Temperature: <b>15°C</b>"));
    assert!(weather.contains("Feels like: <b>15°C</b>"));
    assert!(weather.contains("Clear sky"));

    let (confirm, markup) = h.bot.last_send().unwrap();
    assert_eq!(confirm, "✅ Address 'Paris' has been saved!");
    assert!(is_main_menu(&markup));

    let saved = h.store.list_addresses(USER).await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].address, "Paris");
    assert_eq!(saved[0].user_id, USER);
    assert_eq!(h.states.get(USER).await, ConversationState::Idle);
}

/// **Test: repeating the flow with "paris" reports already saved and keeps one row.**
#[tokio::test]
async fn test_add_same_address_any_case_is_not_duplicated() {
    let (h, _) = harness().await;

    h.send_text(USER, "➕ Add Address").await;
    h.send_text(USER, "Paris").await;
    h.send_text(USER, "➕ Add Address").await;
    h.send_text(USER, "paris").await;

    assert_eq!(h.bot.last_send().unwrap().0, "This address is already saved.");
    assert_eq!(h.store.list_addresses(USER).await.len(), 1);
    assert_eq!(h.states.get(USER).await, ConversationState::Idle);
}

/// **Test: a not-found city mid-flow persists nothing and returns to Idle.**
#[tokio::test]
async fn test_add_address_city_not_found() {
    let (h, weather) = harness().await;

    h.send_text(USER, "➕ Add Address").await;
    h.send_text(USER, "Zzzznotacity").await;

    let (text, markup) = h.bot.last_send().unwrap();
    assert_eq!(text, "❌ City not found. Check the spelling.");
    assert!(is_main_menu(&markup));
    assert!(h.store.list_addresses(USER).await.is_empty());
    assert_eq!(h.states.get(USER).await, ConversationState::Idle);
    assert_eq!(weather.requests(), vec!["Zzzznotacity".to_string()]);
}

/// **Test: surrounding whitespace is trimmed before lookup and save.**
#[tokio::test]
async fn test_add_address_trims_input() {
    let (h, weather) = harness().await;

    h.send_text(USER, "➕ Add Address").await;
    h.send_text(USER, "  Paris  ").await;

    assert_eq!(weather.requests(), vec!["Paris".to_string()]);
    assert_eq!(h.store.list_addresses(USER).await[0].address, "Paris");
}

/// **Test: whitespace-only text while awaiting re-prompts and stays in AwaitingAddress.**
#[tokio::test]
async fn test_blank_address_reprompts() {
    let (h, weather) = harness().await;

    h.send_text(USER, "➕ Add Address").await;
    h.send_text(USER, "   ").await;

    let (_, markup) = h.bot.last_send().unwrap();
    assert!(is_cancel_menu(&markup));
    assert_eq!(h.states.get(USER).await, ConversationState::AwaitingAddress);
    assert!(weather.requests().is_empty());
}

/// **Test: Cancel clears the flow and shows the main menu.**
#[tokio::test]
async fn test_cancel_returns_to_idle() {
    let (h, weather) = harness().await;

    h.send_text(USER, "🌤 Get Weather").await;
    h.send_text(USER, "❌ Cancel").await;

    let (text, markup) = h.bot.last_send().unwrap();
    assert_eq!(text, "Cancelled.");
    assert!(is_main_menu(&markup));
    assert_eq!(h.states.get(USER).await, ConversationState::Idle);
    assert!(weather.requests().is_empty());
}

/// **Test: free text while Idle is a one-shot lookup that is never saved.**
#[tokio::test]
async fn test_idle_free_text_is_one_shot_lookup() {
    let (h, _) = harness().await;

    h.send_text(USER, "Paris").await;

    let (text, markup) = h.bot.last_send().unwrap();
    assert!(text.contains("Paris, FR"));
    assert!(is_main_menu(&markup));
    assert!(h.store.list_addresses(USER).await.is_empty());
}

/// **Test: lookup replies are the formatted message, with API text HTML-escaped.**
///
/// Setup: stub returns a snapshot whose city and description carry `&`, `<` and `>`.
/// Action: free text while Idle.
/// Expected: reply equals `format_message` of the same result and contains no raw tags.
#[tokio::test]
async fn test_lookup_reply_is_formatted_and_escaped() {
    let mut snapshot = paris();
    snapshot.city = "Saint-Denis & <Co>".to_string();
    snapshot.description = "rain<br>".to_string();
    let weather = Arc::new(StubWeather::new().with_city("Saint-Denis", snapshot.clone()));
    let h = Harness::new(weather).await;

    h.send_text(USER, "Saint-Denis").await;

    let (text, _) = h.bot.last_send().unwrap();
    assert_eq!(text, format_message(&Ok(snapshot)));
    assert!(text.contains("<b>Saint-Denis &amp; &lt;Co&gt;, FR</b>"));
    assert!(!text.contains("<br>"));
}

/// **Test: one-shot lookup errors add the navigation hint.**
#[tokio::test]
async fn test_idle_lookup_error_adds_hint() {
    let (h, _) = harness().await;

    h.send_text(USER, "Nowhere").await;

    assert_eq!(
        h.bot.last_send().unwrap().0,
        "❌ Connection error: timed out\n\nUse buttons to navigate."
    );
}

/// **Test: bare menu names are recognised like the emoji labels.**
#[tokio::test]
async fn test_bare_menu_names_are_menu_presses() {
    let (h, weather) = harness().await;

    h.send_text(USER, "Add Address").await;

    assert_eq!(h.states.get(USER).await, ConversationState::AwaitingAddress);
    assert!(weather.requests().is_empty());
}

/// **Test: My Addresses with nothing saved shows the empty-state text.**
#[tokio::test]
async fn test_my_addresses_empty() {
    let (h, _) = harness().await;

    h.send_text(USER, "📍 My Addresses").await;

    let (text, markup) = h.bot.last_send().unwrap();
    assert!(text.starts_with("📭 You don't have any saved addresses yet."));
    assert!(is_main_menu(&markup));
}

/// **Test: My Addresses lists newest first with weather and delete buttons.**
#[tokio::test]
async fn test_my_addresses_lists_newest_first() {
    let (h, _) = harness().await;
    let paris_id = h.seed_address(USER, "Paris").await;
    let rome_id = h.seed_address(USER, "Rome").await;

    h.send_text(USER, "📍 My Addresses").await;

    let (text, markup) = h.bot.last_send().unwrap();
    assert!(text.starts_with("📍 Your saved addresses (2):"));
    let Some(Markup::Inline(grid)) = markup else {
        panic!("expected inline keyboard");
    };
    let data: Vec<_> = grid.buttons().map(|b| b.callback_data.clone()).collect();
    assert_eq!(
        data,
        vec![
            format!("weather:{}", rome_id),
            format!("delete:{}", rome_id),
            format!("weather:{}", paris_id),
            format!("delete:{}", paris_id),
        ]
    );
}

/// **Test: weather button sends the snapshot and answers silently.**
#[tokio::test]
async fn test_weather_button_sends_weather() {
    let (h, _) = harness().await;
    let id = h.seed_address(USER, "Paris").await;

    h.press(USER, &format!("weather:{}", id)).await;

    assert!(h.bot.last_send().unwrap().0.contains("Paris, FR"));
    assert_eq!(h.bot.last_answer(), Some((None, false)));
}

/// **Test: weather button for another user's address answers "not found" without a lookup.**
#[tokio::test]
async fn test_weather_button_for_foreign_address() {
    let (h, weather) = harness().await;
    let id = h.seed_address(OTHER_USER, "Paris").await;

    h.press(USER, &format!("weather:{}", id)).await;

    assert_eq!(
        h.bot.last_answer(),
        Some((Some("❌ Address not found!".to_string()), true))
    );
    assert!(h.bot.sent_texts().is_empty());
    assert!(weather.requests().is_empty());
}

/// **Test: weather button lookup failure is shown as an alert.**
#[tokio::test]
async fn test_weather_button_lookup_error() {
    let (h, _) = harness().await;
    let id = h.seed_address(USER, "Nowhere").await;

    h.press(USER, &format!("weather:{}", id)).await;

    assert_eq!(
        h.bot.last_answer(),
        Some((Some("❌ Connection error: timed out".to_string()), true))
    );
}

/// **Test: delete button edits the list into a confirmation bound to the same id.**
#[tokio::test]
async fn test_delete_button_asks_for_confirmation() {
    let (h, _) = harness().await;
    let id = h.seed_address(USER, "Paris").await;

    h.press(USER, &format!("delete:{}", id)).await;

    let calls = h.bot.calls();
    let BotCall::Edit {
        message_id,
        text,
        keyboard,
        ..
    } = &calls[0]
    else {
        panic!("expected edit, got {:?}", calls[0]);
    };
    assert_eq!(message_id, CHAT_MESSAGE_ID);
    assert!(text.contains("Are you sure"));
    let data: Vec<_> = keyboard
        .as_ref()
        .unwrap()
        .buttons()
        .map(|b| b.callback_data.clone())
        .collect();
    assert_eq!(data, vec![format!("confirm_delete:{}", id), "cancel_delete".to_string()]);
    assert_eq!(h.store.list_addresses(USER).await.len(), 1);
}

/// **Test: confirming deletes the own address.**
#[tokio::test]
async fn test_confirm_delete_own_address() {
    let (h, _) = harness().await;
    let id = h.seed_address(USER, "Paris").await;

    h.press(USER, &format!("confirm_delete:{}", id)).await;

    assert_eq!(
        h.bot.last_edit(),
        Some(("✅ Address deleted successfully!".to_string(), None))
    );
    assert_eq!(
        h.bot.last_answer(),
        Some((Some("Deleted!".to_string()), false))
    );
    assert!(h.store.list_addresses(USER).await.is_empty());
}

/// **Test: delete then confirm on someone else's address fails and leaves storage unchanged.**
#[tokio::test]
async fn test_confirm_delete_foreign_address_fails() {
    let (h, _) = harness().await;
    let id = h.seed_address(OTHER_USER, "Paris").await;

    h.press(USER, &format!("delete:{}", id)).await;
    h.press(USER, &format!("confirm_delete:{}", id)).await;

    assert_eq!(
        h.bot.last_edit(),
        Some(("❌ Failed to delete address.".to_string(), None))
    );
    assert_eq!(h.bot.last_answer(), Some((Some("Error!".to_string()), true)));
    assert_eq!(h.store.list_addresses(OTHER_USER).await.len(), 1);
}

/// **Test: cancel_delete redisplays the list.**
#[tokio::test]
async fn test_cancel_delete_redisplays_list() {
    let (h, _) = harness().await;
    let id = h.seed_address(USER, "Paris").await;

    h.press(USER, "cancel_delete").await;

    let (text, keyboard) = h.bot.last_edit().unwrap();
    assert!(text.starts_with("📍 Your saved addresses (1):"));
    let grid = keyboard.unwrap();
    assert_eq!(grid.rows[0][0].callback_data, format!("weather:{}", id));
    assert_eq!(
        h.bot.last_answer(),
        Some((Some("Cancelled".to_string()), false))
    );
}

/// **Test: cancel_delete with nothing left shows the empty-state text.**
#[tokio::test]
async fn test_cancel_delete_with_no_addresses() {
    let (h, _) = harness().await;

    h.press(USER, "cancel_delete").await;

    let (text, keyboard) = h.bot.last_edit().unwrap();
    assert!(text.starts_with("📭"));
    assert!(keyboard.is_none());
}

/// **Test: malformed callback tokens are answered silently and change nothing.**
#[tokio::test]
async fn test_malformed_callback_is_ignored() {
    let (h, _) = harness().await;
    h.seed_address(USER, "Paris").await;

    h.press(USER, "confirm_delete:abc").await;
    h.press(USER, "refresh:1").await;

    let calls = h.bot.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| matches!(
        c,
        BotCall::Answer {
            text: None,
            show_alert: false,
            ..
        }
    )));
    assert_eq!(h.store.list_addresses(USER).await.len(), 1);
}

/// **Test: non-text messages get no reply.**
#[tokio::test]
async fn test_non_text_message_is_ignored() {
    let (h, weather) = harness().await;

    h.send_text(USER, "").await;

    assert!(h.bot.calls().is_empty());
    assert!(weather.requests().is_empty());
}

/// **Test: states are per user.**
#[tokio::test]
async fn test_state_is_per_user() {
    let (h, _) = harness().await;

    h.send_text(USER, "➕ Add Address").await;
    h.send_text(OTHER_USER, "Paris").await;

    assert_eq!(h.states.get(USER).await, ConversationState::AwaitingAddress);
    assert!(h.store.list_addresses(OTHER_USER).await.is_empty());
}
