//! End-to-end webhook flow: Telegram updates in, recorded Bot API calls out.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use triage_bot::adapters::http::{app_router, WebhookAppState};
use triage_bot::adapters::{
    InMemorySelectionStore, JsonCatalogLoader, RecordingTransport, WebhookSecret,
};
use triage_bot::application::TriageDispatcher;
use triage_bot::config::CatalogConfig;
use triage_bot::domain::triage::{
    ButtonAction, Keyboard, OutboundResponse, SelectionLimits, TextFormat,
};

const CHAT_ID: i64 = 4242;
const MENU_MESSAGE_ID: i64 = 100;

struct Harness {
    _dir: TempDir,
    app: Router,
    transport: RecordingTransport,
    next_update_id: i64,
}

impl Harness {
    async fn new(with_diagnoses: bool) -> Self {
        let dir = TempDir::new().unwrap();
        let write = |name: &str, contents: &str| {
            std::fs::write(dir.path().join(name), contents).unwrap();
        };
        write(
            "symptoms.json",
            r#"{
                "боль в животе": "Гастроэнтерология",
                "кашель": "Терапия",
                "высокая температура": "Терапия",
                "головная боль": "Неврология",
                "боль в груди": "Кардиология",
                "сыпь": "Дерматология",
                "насморк": "Оториноларингология"
            }"#,
        );
        write(
            "facilities.json",
            r#"{
                "Гастроэнтерология": "Гастроцентр на Ленина, 5",
                "Терапия": "Городская поликлиника №3",
                "Неврология": "Неврологический центр"
            }"#,
        );
        write(
            "symptom_diagnosis.json",
            r#"{
                "боль в животе": ["Гастрит", "Аппендицит"],
                "кашель": ["ОРВИ", "Бронхит"],
                "высокая температура": ["ОРВИ", "Грипп"]
            }"#,
        );

        let config = CatalogConfig {
            symptoms_path: dir.path().join("symptoms.json"),
            facilities_path: dir.path().join("facilities.json"),
            diagnoses_path: with_diagnoses.then(|| dir.path().join("symptom_diagnosis.json")),
            normalization_path: None,
            strict_diagnoses: true,
        };
        let catalog = Arc::new(JsonCatalogLoader::new(&config).load().await.unwrap());

        let transport = RecordingTransport::new();
        let dispatcher = TriageDispatcher::new(
            Arc::new(InMemorySelectionStore::new()),
            catalog.clone(),
            SelectionLimits::default(),
        );
        let state = WebhookAppState::new(
            Arc::new(dispatcher),
            Arc::new(transport.clone()),
            catalog,
            WebhookSecret::default(),
        );

        Self {
            _dir: dir,
            app: app_router(state, Duration::from_secs(5)),
            transport,
            next_update_id: 1,
        }
    }

    async fn post(&mut self, body: serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/telegram/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        self.next_update_id += 1;
    }

    async fn send_text(&mut self, text: &str) {
        let body = serde_json::json!({
            "update_id": self.next_update_id,
            "message": {
                "message_id": 1,
                "chat": {"id": CHAT_ID, "type": "private"},
                "date": 0,
                "text": text
            }
        });
        self.post(body).await;
    }

    async fn press(&mut self, action: ButtonAction) {
        let body = serde_json::json!({
            "update_id": self.next_update_id,
            "callback_query": {
                "id": format!("cb-{}", self.next_update_id),
                "from": {"id": CHAT_ID, "is_bot": false, "first_name": "Пациент"},
                "message": {"message_id": MENU_MESSAGE_ID, "chat": {"id": CHAT_ID}, "date": 0},
                "chat_instance": "1",
                "data": action.encode()
            }
        });
        self.post(body).await;
    }

    /// Takes what was delivered since the last call.
    fn drain(&self) -> Vec<OutboundResponse> {
        let delivered = self.transport.delivered();
        self.transport.clear();
        delivered
    }
}

fn keyboard(response: &OutboundResponse) -> &Keyboard {
    match response {
        OutboundResponse::TextMessage {
            keyboard: Some(keyboard),
            ..
        }
        | OutboundResponse::KeyboardUpdate { keyboard, .. } => keyboard,
        other => panic!("no keyboard in {other:?}"),
    }
}

fn body(response: &OutboundResponse) -> &str {
    match response {
        OutboundResponse::TextMessage { body, .. } => body,
        other => panic!("not a text message: {other:?}"),
    }
}

#[tokio::test]
async fn free_text_with_diagnoses() {
    let mut harness = Harness::new(true).await;

    harness.send_text("у меня болит живот и кашляю").await;

    let delivered = harness.drain();
    assert_eq!(delivered.len(), 1);
    assert_eq!(
        body(&delivered[0]),
        "🧾 Возможные диагнозы:\n• Гастрит\n• Аппендицит\n• ОРВИ\n• Бронхит\n\n\
         🏥 Направления:\n🔹 *Гастроэнтерология* — Гастроцентр на Ленина, 5\n\n\
         🔹 *Терапия* — Городская поликлиника №3"
    );
}

#[tokio::test]
async fn free_text_without_diagnoses() {
    let mut harness = Harness::new(false).await;

    harness.send_text("Кашляет третий день").await;

    let delivered = harness.drain();
    assert_eq!(
        body(&delivered[0]),
        "🏥 Направления:\n🔹 *Терапия* — Городская поликлиника №3"
    );
}

#[tokio::test]
async fn unknown_facility_and_unrecognized_text() {
    let mut harness = Harness::new(true).await;

    harness.send_text("сыпь на руках").await;
    harness.send_text("добрый вечер").await;

    let delivered = harness.drain();
    assert!(body(&delivered[0]).contains("🔹 *Дерматология* — учреждение не найдено"));
    assert!(body(&delivered[1]).starts_with("Не удалось распознать симптомы"));
}

#[tokio::test]
async fn already_canonical_temperature_is_still_recognized() {
    let mut harness = Harness::new(true).await;

    harness.send_text("Высокая температура с утра").await;

    let delivered = harness.drain();
    assert_eq!(
        body(&delivered[0]),
        "🧾 Возможные диагнозы:\n• ОРВИ\n• Грипп\n\n\
         🏥 Направления:\n🔹 *Терапия* — Городская поликлиника №3"
    );
}

#[tokio::test]
async fn deselected_symptom_is_left_out_of_recommendation() {
    let mut harness = Harness::new(true).await;
    harness.send_text("/start").await;

    harness.press(ButtonAction::Toggle("боль в животе".to_string())).await;
    harness.press(ButtonAction::Toggle("кашель".to_string())).await;
    harness.press(ButtonAction::Toggle("боль в животе".to_string())).await;
    let updates = harness.drain();
    let last = updates.last().unwrap();
    assert_eq!(keyboard(last).rows[0][0].label, "❌ боль в животе");
    assert_eq!(keyboard(last).rows[1][0].label, "✅ кашель");

    harness.press(ButtonAction::Done).await;

    let result = harness.drain();
    assert_eq!(result.len(), 1);
    let text = body(&result[0]);
    assert_eq!(
        text,
        "🧾 Возможные диагнозы:\n• ОРВИ\n• Бронхит\n\n\
         🏥 Направления:\n🔹 *Терапия* — Городская поликлиника №3"
    );
    assert!(!text.contains("Гастроэнтерология"));
    assert!(!text.contains("Гастрит"));
    assert!(!text.contains("Аппендицит"));
}

#[tokio::test]
async fn menu_selection_across_pages() {
    let mut harness = Harness::new(true).await;

    harness.send_text("/start").await;
    let menu = harness.drain();
    assert_eq!(body(&menu[0]), "Выберите симптомы из списка:");
    assert_eq!(keyboard(&menu[0]).rows.len(), 6);

    harness.press(ButtonAction::Toggle("боль в животе".to_string())).await;
    let update = harness.drain();
    assert!(matches!(update[0], OutboundResponse::KeyboardUpdate { .. }));
    assert_eq!(keyboard(&update[0]).rows[0][0].label, "✅ боль в животе");
    assert!(keyboard(&update[0]).find(&ButtonAction::Done).is_some());

    harness.press(ButtonAction::NextPage).await;
    let page_two = harness.drain();
    assert_eq!(keyboard(&page_two[0]).rows[0][0].label, "❌ сыпь");

    harness.press(ButtonAction::Toggle("насморк".to_string())).await;
    harness.drain();

    harness.press(ButtonAction::Done).await;
    let result = harness.drain();
    assert!(matches!(
        result[0],
        OutboundResponse::TextMessage {
            formatting: TextFormat::Markdown,
            ..
        }
    ));
    assert_eq!(
        body(&result[0]),
        "🧾 Возможные диагнозы:\n• Гастрит\n• Аппендицит\n\n\
         🏥 Направления:\n🔹 *Гастроэнтерология* — Гастроцентр на Ленина, 5\n\n\
         🔹 *Оториноларингология* — учреждение не найдено"
    );
}

#[tokio::test]
async fn button_presses_are_acknowledged() {
    let mut harness = Harness::new(true).await;
    harness.send_text("/start").await;
    harness.press(ButtonAction::Toggle("кашель".to_string())).await;
    harness.press(ButtonAction::PrevPage).await;

    assert_eq!(
        harness.transport.acknowledged(),
        vec!["cb-2".to_string(), "cb-3".to_string()]
    );
}

#[tokio::test]
async fn selection_cap_is_silent() {
    let mut harness = Harness::new(true).await;
    harness.send_text("/start").await;

    for symptom in [
        "боль в животе",
        "кашель",
        "высокая температура",
        "головная боль",
        "боль в груди",
    ] {
        harness.press(ButtonAction::Toggle(symptom.to_string())).await;
    }
    harness.drain();

    harness.press(ButtonAction::NextPage).await;
    harness.press(ButtonAction::Toggle("сыпь".to_string())).await;

    let delivered = harness.drain();
    assert_eq!(delivered.len(), 1, "only the page change is delivered");
    assert_eq!(keyboard(&delivered[0]).rows[0][0].label, "❌ сыпь");
}

#[tokio::test]
async fn stale_buttons_after_done_ask_to_restart() {
    let mut harness = Harness::new(true).await;
    harness.send_text("/start").await;
    harness.press(ButtonAction::Toggle("кашель".to_string())).await;
    harness.press(ButtonAction::Done).await;
    harness.drain();

    harness.press(ButtonAction::Done).await;

    let delivered = harness.drain();
    assert_eq!(delivered.len(), 1);
    assert!(body(&delivered[0]).contains("/start"));
}
