//! Renders menu pages and recommendations for the chat.

use super::events::ButtonAction;
use super::recommendation::Recommendation;
use super::response::{Button, Keyboard};
use super::selection::SymptomPage;

pub const MENU_PROMPT: &str = "Выберите симптомы из списка:";
pub const UNRECOGNIZED_REPLY: &str = "Не удалось распознать симптомы. \
Опишите их другими словами или отправьте /start, чтобы выбрать из списка.";
pub const NO_ACTIVE_SESSION_REPLY: &str =
    "Этот список уже неактивен. Отправьте /start, чтобы начать заново.";

const CHECKED: &str = "✅";
const UNCHECKED: &str = "❌";
const PREV_LABEL: &str = "⬅️ Назад";
const NEXT_LABEL: &str = "➡️ Далее";
const DONE_LABEL: &str = "✅ Готово";

/// One symptom per row, then a navigation row holding whichever controls apply.
pub fn render_page(page: &SymptomPage) -> Keyboard {
    let mut rows: Vec<Vec<Button>> = page
        .items
        .iter()
        .map(|item| {
            let marker = if item.checked { CHECKED } else { UNCHECKED };
            vec![Button::new(
                format!("{} {}", marker, item.symptom),
                ButtonAction::Toggle(item.symptom.clone()),
            )]
        })
        .collect();

    let mut nav = Vec::new();
    if page.has_prev {
        nav.push(Button::new(PREV_LABEL, ButtonAction::PrevPage));
    }
    if page.has_next {
        nav.push(Button::new(NEXT_LABEL, ButtonAction::NextPage));
    }
    if page.can_complete {
        nav.push(Button::new(DONE_LABEL, ButtonAction::Done));
    }
    if !nav.is_empty() {
        rows.push(nav);
    }

    Keyboard { rows }
}

/// Markdown body listing diagnoses (when the catalog has them) and referrals.
pub fn render_recommendation(recommendation: &Recommendation) -> String {
    let mut sections = Vec::with_capacity(2);

    if recommendation.includes_diagnoses {
        let mut section = String::from("🧾 Возможные диагнозы:");
        for diagnosis in &recommendation.diagnoses {
            section.push_str("\n• ");
            section.push_str(&escape_markdown(diagnosis));
        }
        sections.push(section);
    }

    let referrals = recommendation
        .referrals
        .iter()
        .map(|r| {
            format!(
                "🔹 {} — {}",
                bold(&r.category),
                escape_markdown(r.facility_or_placeholder())
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    sections.push(format!("🏥 Направления:\n{}", referrals));

    sections.join("\n\n")
}

/// Wraps text in a legacy Markdown bold entity.
///
/// Escapes are not recognized inside an entity, so the text is emitted
/// literally and only the closing marker is removed from it.
fn bold(text: &str) -> String {
    format!("*{}*", text.replace('*', ""))
}

/// Escapes the characters legacy Telegram Markdown treats as entity markers
/// outside an entity.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
