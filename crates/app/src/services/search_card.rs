//! Search card — one card instance: a [`SearchSession`] bound to an index service.

use std::sync::Arc;

use hubsearch_domain::query::QueryOutcome;
use hubsearch_domain::selection::EntitySelected;
use hubsearch_domain::session::{SearchSession, SessionState};

use super::index_service::EntityIndexService;
use crate::ports::{LiveStateSource, RegistrySource, SelectionPublisher, UsageRepository};

/// What the card renders.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: Option<String>,
    pub state: SessionState,
    /// Input is disabled while the registry load is outstanding.
    pub loading: bool,
    pub outcome: QueryOutcome,
}

pub struct SearchCard<R, L, U, P> {
    service: Arc<EntityIndexService<R, L, U, P>>,
    session: SearchSession,
    outcome: QueryOutcome,
}

impl<R, L, U, P> SearchCard<R, L, U, P>
where
    R: RegistrySource + Sync,
    L: LiveStateSource + Sync,
    U: UsageRepository + Sync,
    P: SelectionPublisher + Sync,
{
    #[must_use]
    pub fn new(service: Arc<EntityIndexService<R, L, U, P>>) -> Self {
        Self {
            service,
            session: SearchSession::new(),
            outcome: QueryOutcome::prompt(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Record a keystroke. The query itself runs on [`Self::refresh`],
    /// once the input has settled.
    pub fn input(&mut self, text: impl Into<String>) -> u64 {
        self.session.input(text)
    }

    pub fn toggle_domain(&mut self, domain: impl Into<String>) -> u64 {
        self.session.toggle_domain(domain)
    }

    pub fn toggle_area(&mut self, area: impl Into<hubsearch_domain::id::AreaId>) -> u64 {
        self.session.toggle_area(area)
    }

    pub fn clear(&mut self) -> u64 {
        self.outcome = QueryOutcome::prompt();
        self.session.clear()
    }

    /// Grow the page by one. Returns `false` when there is nothing more to show.
    pub fn load_more(&mut self) -> bool {
        self.outcome.has_more && self.session.load_more()
    }

    /// Run the current query and settle the session with its outcome.
    pub async fn refresh(&mut self) -> CardView {
        let generation = self.session.generation();
        let config = self.service.config();
        let limit = self.session.limit(config.page_size, config.paginate);

        let outcome = self
            .service
            .search(&self.session.query(), self.session.filters(), limit)
            .await;

        if self.session.complete(generation, &outcome) {
            self.outcome = outcome;
        }
        self.view()
    }

    /// Current view without querying again.
    #[must_use]
    pub fn view(&self) -> CardView {
        CardView {
            title: self.service.config().title.clone(),
            state: self.session.state(),
            loading: self.service.is_loading(),
            outcome: self.outcome.clone(),
        }
    }

    /// Handle a click on a result row.
    pub async fn click(&self, target_id: &str) -> Option<EntitySelected> {
        self.service.select(target_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::InProcessEventBus;
    use crate::services::fakes::{FakeLive, FakeRegistry};
    use crate::usage_cache::InMemoryUsageCache;
    use hubsearch_domain::config::CardConfig;
    use hubsearch_domain::query::{Grouping, QueryStatus};

    type Card = SearchCard<FakeRegistry, FakeLive, InMemoryUsageCache, InProcessEventBus>;

    async fn card(config: CardConfig) -> Card {
        let service = EntityIndexService::new(
            config,
            FakeRegistry::home(),
            FakeLive::home(),
            InMemoryUsageCache::default(),
            InProcessEventBus::new(16),
        );
        service.load().await;
        SearchCard::new(Arc::new(service))
    }

    fn names(view: &CardView) -> Vec<&str> {
        view.outcome
            .entities
            .iter()
            .map(|e| e.display_name())
            .collect()
    }

    #[tokio::test]
    async fn should_prompt_when_nothing_typed() {
        let mut card = card(CardConfig::default()).await;

        let view = card.refresh().await;

        assert_eq!(view.state, SessionState::Empty);
        assert_eq!(view.outcome.status, QueryStatus::Prompt);
        assert!(!view.loading);
    }

    #[tokio::test]
    async fn should_show_results_for_typed_text() {
        let mut card = card(CardConfig::default()).await;

        card.input("garage");
        assert_eq!(card.view().state, SessionState::Typing);
        let view = card.refresh().await;

        assert_eq!(view.state, SessionState::Results);
        assert_eq!(names(&view), vec!["Garage Door", "Garage Light"]);
    }

    #[tokio::test]
    async fn should_report_no_results() {
        let mut card = card(CardConfig::default()).await;

        card.input("attic");
        let view = card.refresh().await;

        assert_eq!(view.state, SessionState::NoResults);
        assert!(view.outcome.entities.is_empty());
    }

    #[tokio::test]
    async fn should_browse_by_domain_facet_without_text() {
        let mut card = card(CardConfig::default()).await;

        card.toggle_domain("light");
        let view = card.refresh().await;

        assert_eq!(view.state, SessionState::Results);
        assert_eq!(names(&view), vec!["Garage Light", "Kitchen Light"]);
    }

    #[tokio::test]
    async fn should_narrow_text_search_by_area_facet() {
        let mut card = card(CardConfig::default()).await;

        card.input("light");
        card.toggle_area("kitchen");
        let view = card.refresh().await;

        assert_eq!(names(&view), vec!["Kitchen Light"]);
    }

    #[tokio::test]
    async fn should_load_more_results_page_by_page() {
        let config = CardConfig {
            page_size: 1,
            ..CardConfig::default()
        };
        let mut card = card(config).await;

        card.input("garage");
        let view = card.refresh().await;
        assert_eq!(view.outcome.entities.len(), 1);
        assert!(view.outcome.has_more);

        assert!(card.load_more());
        let view = card.refresh().await;
        assert_eq!(view.outcome.entities.len(), 2);
        assert!(!view.outcome.has_more);
        assert!(!card.load_more());
    }

    #[tokio::test]
    async fn should_group_results_when_configured() {
        let config = CardConfig {
            group_by: Grouping::Area,
            ..CardConfig::default()
        };
        let mut card = card(config).await;

        card.input("light");
        let view = card.refresh().await;

        let keys: Vec<&str> = view.outcome.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Garage", "Kitchen"]);
    }

    #[tokio::test]
    async fn should_return_to_prompt_on_clear() {
        let mut card = card(CardConfig::default()).await;
        card.input("garage");
        card.refresh().await;

        card.clear();
        let view = card.view();

        assert_eq!(view.state, SessionState::Empty);
        assert_eq!(view.outcome.status, QueryStatus::Prompt);
    }

    #[tokio::test]
    async fn should_emit_selection_on_click() {
        let mut card = card(CardConfig::default()).await;
        card.input("kitchen");
        card.refresh().await;

        let selected = card.click("light.kitchen").await.unwrap();

        assert_eq!(selected.entity_id.as_str(), "light.kitchen");
        assert!(card.click("light.attic").await.is_none());
    }
}
