//! Line commands read from stdin.
//!
//! Plain text is search input; lines starting with `:` are card actions.

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// New search text (debounced).
    Search(String),
    /// `:domain <domain>` toggles the domain facet.
    Domain(String),
    /// `:area <area_id>` toggles the area facet.
    Area(String),
    /// `:more` loads the next page.
    More,
    /// `:clear` drops text and facets.
    Clear,
    /// `:open <entity_id>` clicks a result.
    Open(String),
    /// `:call <service> <entity_id>` calls a service on the demo home.
    Call { service: String, entity_id: String },
    /// `:states <json>` merges a `states` document into a json snapshot.
    States(String),
    /// `:quit`
    Quit,
    /// Anything else starting with `:`.
    Unknown(String),
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let Some(action) = line.strip_prefix(':') else {
            return Self::Search(line.to_string());
        };

        if let Some(document) = action.strip_prefix("states ") {
            let document = document.trim();
            if !document.is_empty() {
                return Self::States(document.to_string());
            }
        }

        let mut words = action.split_whitespace();
        let name = words.next().unwrap_or_default();
        let first = words.next().map(str::to_string);
        let second = words.next().map(str::to_string);

        match (name, first, second) {
            ("domain", Some(domain), None) => Self::Domain(domain),
            ("area", Some(area), None) => Self::Area(area),
            ("more", None, None) => Self::More,
            ("clear", None, None) => Self::Clear,
            ("open", Some(entity_id), None) => Self::Open(entity_id),
            ("call", Some(service), Some(entity_id)) => Self::Call { service, entity_id },
            ("quit" | "q", None, None) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_plain_text_as_search() {
        assert_eq!(Command::parse("kitchen li"), Command::Search("kitchen li".to_string()));
    }

    #[test]
    fn should_keep_empty_line_as_search() {
        assert_eq!(Command::parse(""), Command::Search(String::new()));
    }

    #[test]
    fn should_parse_facet_toggles() {
        assert_eq!(Command::parse(":domain light"), Command::Domain("light".to_string()));
        assert_eq!(Command::parse(":area garage"), Command::Area("garage".to_string()));
    }

    #[test]
    fn should_parse_paging_and_clear() {
        assert_eq!(Command::parse(":more"), Command::More);
        assert_eq!(Command::parse(":clear"), Command::Clear);
        assert_eq!(Command::parse(":q"), Command::Quit);
    }

    #[test]
    fn should_parse_service_call() {
        assert_eq!(
            Command::parse(":call toggle light.garage"),
            Command::Call {
                service: "toggle".to_string(),
                entity_id: "light.garage".to_string(),
            }
        );
    }

    #[test]
    fn should_keep_whole_document_when_parsing_states() {
        assert_eq!(
            Command::parse(r#":states { "light.garage": { "state": "on" } }"#),
            Command::States(r#"{ "light.garage": { "state": "on" } }"#.to_string())
        );
        assert!(matches!(Command::parse(":states"), Command::Unknown(_)));
        assert!(matches!(Command::parse(":states   "), Command::Unknown(_)));
    }

    #[test]
    fn should_flag_unknown_or_incomplete_commands() {
        assert!(matches!(Command::parse(":open"), Command::Unknown(_)));
        assert!(matches!(Command::parse(":dance now"), Command::Unknown(_)));
        assert!(matches!(Command::parse(":more please"), Command::Unknown(_)));
    }
}
