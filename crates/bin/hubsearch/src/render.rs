//! Plain-text rendering of the card.

use std::fmt::Write;

use hubsearch_app::services::CardView;
use hubsearch_domain::index::IndexedEntity;
use hubsearch_domain::query::QueryStatus;
use hubsearch_domain::selection::EntitySelected;
use hubsearch_domain::session::SessionState;

const PROMPT: &str = "Type to search entities";
const NO_MATCHES: &str = "No matching entities";

/// Render the card view as lines of text.
#[must_use]
pub fn view(view: &CardView) -> String {
    let mut out = String::new();
    if let Some(title) = &view.title {
        let _ = writeln!(out, "== {title} ==");
    }
    if view.loading {
        out.push_str("(loading)\n");
        return out;
    }

    let outcome = &view.outcome;
    match (view.state, outcome.status) {
        (SessionState::Empty, _) | (_, QueryStatus::Prompt) => {
            let _ = writeln!(out, "{PROMPT}");
        }
        (_, QueryStatus::NoMatches) => {
            let _ = writeln!(out, "{NO_MATCHES}");
        }
        (_, QueryStatus::Results) if outcome.groups.is_empty() => {
            for entity in &outcome.entities {
                row(&mut out, entity, "");
            }
        }
        (_, QueryStatus::Results) => {
            for group in &outcome.groups {
                let _ = writeln!(out, "{}", group.key);
                for entity in outcome.members(group) {
                    row(&mut out, entity, "  ");
                }
            }
        }
    }

    if outcome.has_more {
        let hidden = outcome.total_matches - outcome.entities.len();
        let _ = writeln!(out, "... {hidden} more (:more)");
    }
    out
}

fn row(out: &mut String, entity: &IndexedEntity, indent: &str) {
    let [area, domain] = entity.tags();
    let _ = writeln!(
        out,
        "{indent}[{}] {}  {}  ({}; {area}, {domain})",
        entity.icon(),
        entity.display_name(),
        entity.state(),
        entity.entity_id(),
    );
}

/// The host notification as a single JSON line.
///
/// # Errors
///
/// Returns an error if the notification cannot be serialized.
pub fn selection(selected: &EntitySelected) -> Result<String, serde_json::Error> {
    let event = serde_json::json!({
        "type": EntitySelected::EVENT_NAME,
        "detail": selected,
    });
    serde_json::to_string(&event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubsearch_domain::id::EntityId;
    use hubsearch_domain::query::QueryOutcome;

    fn prompt_view() -> CardView {
        CardView {
            title: Some("Find".to_string()),
            state: SessionState::Empty,
            loading: false,
            outcome: QueryOutcome::prompt(),
        }
    }

    #[test]
    fn should_render_title_and_prompt() {
        let text = view(&prompt_view());
        assert_eq!(text, "== Find ==\nType to search entities\n");
    }

    #[test]
    fn should_render_loading_indicator() {
        let mut card = prompt_view();
        card.title = None;
        card.loading = true;
        assert_eq!(view(&card), "(loading)\n");
    }

    #[test]
    fn should_render_no_matches() {
        let mut card = prompt_view();
        card.title = None;
        card.state = SessionState::NoResults;
        card.outcome.status = QueryStatus::NoMatches;
        assert_eq!(view(&card), "No matching entities\n");
    }

    #[test]
    fn should_render_selection_as_more_info_event() {
        let selected = EntitySelected {
            entity_id: EntityId::new("light.garage"),
        };
        let line = selection(&selected).unwrap();
        assert_eq!(
            line,
            r#"{"detail":{"entityId":"light.garage"},"type":"hass-more-info"}"#
        );
    }
}
