use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};

/// Flattens markup to text: script/style content is dropped, every text node
/// is trimmed and the non-empty ones are joined with a single space.
pub fn html_to_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let document = Html::parse_document(html);
    element_text(document.root_element())
}

pub fn element_text(element: ElementRef<'_>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |el| matches!(el.name(), "script" | "style"))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }
    parts.join(" ")
}

/// Pulls the description block out of a public vacancy page, falling back to
/// the text of the whole page when no known container is present.
pub fn vacancy_description_text(page: &str) -> String {
    static QA_SELECTOR: OnceLock<Selector> = OnceLock::new();
    static DIV_SELECTOR: OnceLock<Selector> = OnceLock::new();
    let qa_selector = QA_SELECTOR
        .get_or_init(|| Selector::parse(r#"[data-qa="vacancy-description"]"#).unwrap());
    let div_selector = DIV_SELECTOR.get_or_init(|| Selector::parse("div").unwrap());

    let document = Html::parse_document(page);
    let container = document.select(qa_selector).next().or_else(|| {
        document.select(div_selector).find(|div| {
            div.value()
                .classes()
                .any(|class| class.contains("vacancy-description"))
        })
    });

    match container {
        Some(node) => element_text(node),
        None => element_text(document.root_element()),
    }
}
