//! The session store: navigation state machine plus session data.
//!
//! `SessionStore` is the only mutable aggregate. The presentation layer reads
//! it and calls its actions; every action is a synchronous read-modify-write.
//! Before a catalog is installed the store is in a pre-initial state where
//! navigation and drawing actions fail with [`SessionError::CatalogNotLoaded`].

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::Serialize;

use lr_cards::{AssetSource, Card, CardCatalog, CardRepository};

use crate::centering::{Centering, CenteringPhase, CenteringStep, ScheduledAdvance, TimerToken};
use crate::clock::{Clock, LocalClock};
use crate::config::SessionConfig;
use crate::daily::select_daily;
use crate::error::{SessionError, SessionResult};
use crate::identity::{KeyValueStore, MemoryStore, resolve_user_id};
use crate::reading::ReadingSection;
use crate::shuffle::shuffle;
use crate::state::AppState;

/// A serializable view of the session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Whether a catalog has been installed.
    pub loaded: bool,
    /// Current top-level state.
    pub current_state: AppState,
    /// The card being read, if any.
    pub selected_card: Option<Card>,
    /// Cached card of the day, if computed.
    pub daily_card: Option<Card>,
    /// Cards offered in the selection spread.
    pub spread: Vec<Card>,
    /// Centering sub-phase, while centering.
    pub centering_phase: Option<CenteringPhase>,
    /// Centering progress in `[0, 1]`.
    pub centering_progress: f64,
    /// Reading section, while viewing a card.
    pub reading_section: Option<ReadingSection>,
}

/// The navigation state machine and session data holder.
pub struct SessionStore {
    config: SessionConfig,
    state: AppState,
    catalog: Option<CardCatalog>,
    selected: Option<Card>,
    shuffled: Vec<Card>,
    daily: Option<Card>,
    centering: Centering,
    reading: ReadingSection,
    rng: StdRng,
    identity: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .field("loaded", &self.catalog.is_some())
            .field("selected", &self.selected.as_ref().map(|c| c.id().to_string()))
            .field("centering", &self.centering)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store with an in-memory identity store and the local clock.
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let centering = Centering::new(config.timings);
        Self {
            config,
            state: AppState::Welcome,
            catalog: None,
            selected: None,
            shuffled: Vec::new(),
            daily: None,
            centering,
            reading: ReadingSection::default(),
            rng,
            identity: Box::new(MemoryStore::new()),
            clock: Box::new(LocalClock),
        }
    }

    /// Use `store` to persist the user identifier.
    pub fn with_identity_store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.identity = Box::new(store);
        self
    }

    /// Use `clock` for the daily card date.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // --- Queries ---

    /// The configuration in use.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current top-level state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Whether a catalog has been installed.
    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// The installed catalog.
    pub fn catalog(&self) -> Option<&CardCatalog> {
        self.catalog.as_ref()
    }

    /// The card being read, if any.
    pub fn selected_card(&self) -> Option<&Card> {
        self.selected.as_ref()
    }

    /// The working shuffled order. Empty before a catalog is installed.
    pub fn shuffled_cards(&self) -> &[Card] {
        &self.shuffled
    }

    /// The cards offered in the selection spread.
    pub fn spread(&self) -> &[Card] {
        let n = self.config.spread_size.max(1).min(self.shuffled.len());
        &self.shuffled[..n]
    }

    /// Cached card of the day, if it has been computed this session.
    pub fn daily_card(&self) -> Option<&Card> {
        self.daily.as_ref()
    }

    /// Centering progress in `[0, 1]`.
    pub fn centering_progress(&self) -> f64 {
        self.centering.progress()
    }

    /// Centering sub-phase, while in the centering state.
    pub fn centering_phase(&self) -> Option<CenteringPhase> {
        (self.state == AppState::Centering).then_some(self.centering.phase())
    }

    /// The centering timer that should be running, if any.
    pub fn pending_timer(&self) -> Option<ScheduledAdvance> {
        if self.state == AppState::Centering {
            self.centering.pending()
        } else {
            None
        }
    }

    /// Current reading section, while a card is shown.
    pub fn reading_section(&self) -> Option<ReadingSection> {
        self.state.needs_card().then_some(self.reading)
    }

    /// A serializable view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            loaded: self.is_loaded(),
            current_state: self.state,
            selected_card: self.selected.clone(),
            daily_card: self.daily.clone(),
            spread: self.spread().to_vec(),
            centering_phase: self.centering_phase(),
            centering_progress: self.centering_progress(),
            reading_section: self.reading_section(),
        }
    }

    // --- Catalog ---

    /// Install a catalog and shuffle it. Ignored once a catalog is present.
    ///
    /// Returns whether the catalog was installed.
    pub fn install_catalog(&mut self, catalog: CardCatalog) -> bool {
        if self.catalog.is_some() {
            tracing::debug!("catalog already installed, ignoring");
            return false;
        }
        tracing::info!(cards = catalog.len(), "catalog installed");
        self.catalog = Some(catalog);
        self.reshuffle();
        true
    }

    /// Load the catalog from `source` and install it.
    ///
    /// Does nothing if a catalog is already installed. On failure the error
    /// is logged and returned, and the store stays unloaded.
    pub async fn load_catalog<S: AssetSource>(&mut self, source: &S) -> SessionResult<bool> {
        if self.is_loaded() {
            return Ok(false);
        }
        let catalog = CardRepository::load(source).await.map_err(|e| {
            tracing::error!(error = %e, "failed to load card catalog");
            SessionError::from(e)
        })?;
        Ok(self.install_catalog(catalog))
    }

    // --- Actions ---

    /// Navigate to `target`.
    ///
    /// Returns the state actually entered. Moving to `Welcome` performs a full
    /// [`reset`](Self::reset). Entering `Daily` computes (or reuses) the card
    /// of the day. Entering `Viewing` or `Daily` with no selected card falls
    /// back to `Welcome` instead.
    pub fn set_state(&mut self, target: AppState) -> SessionResult<AppState> {
        self.require_loaded()?;
        let from = self.state;

        if target == AppState::Welcome {
            self.reset();
            return Ok(AppState::Welcome);
        }
        if target == from {
            return Ok(from);
        }

        let allowed = from.can_transition_to(target);
        if !allowed && !(target.needs_card() && self.selected.is_none()) {
            return Err(SessionError::InvalidTransition { from, to: target });
        }
        if allowed && target == AppState::Daily {
            self.get_daily_card();
        }
        if target.needs_card() && self.selected.is_none() {
            tracing::warn!(%from, to = %target, "no card selected, returning to welcome");
            self.reset();
            return Ok(AppState::Welcome);
        }

        self.enter(target);
        Ok(target)
    }

    /// Reshuffle the working order.
    pub fn shuffle(&mut self) -> SessionResult<()> {
        self.require_loaded()?;
        self.reshuffle();
        Ok(())
    }

    /// Select a uniformly random card from the catalog.
    ///
    /// Returns `None` (and selects nothing) if no cards are available.
    pub fn select_random(&mut self) -> Option<Card> {
        let cards = self.catalog.as_ref()?.cards();
        if cards.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..cards.len());
        let card = cards[index].clone();
        self.select(card.clone());
        Some(card)
    }

    /// Select `card`, which must belong to the catalog.
    pub fn select_card(&mut self, card: &Card) -> SessionResult<()> {
        let catalog = self.catalog.as_ref().ok_or(SessionError::CatalogNotLoaded)?;
        if !catalog.contains(card) {
            return Err(SessionError::UnknownCard(card.id().to_string()));
        }
        self.select(card.clone());
        Ok(())
    }

    /// Select `card` from the spread and move on to reading it.
    ///
    /// Nothing is selected if the session cannot move to `Viewing`.
    pub fn pick_card(&mut self, card: &Card) -> SessionResult<AppState> {
        self.require_loaded()?;
        let from = self.state;
        if !from.can_transition_to(AppState::Viewing) {
            return Err(SessionError::InvalidTransition {
                from,
                to: AppState::Viewing,
            });
        }
        self.select_card(card)?;
        self.set_state(AppState::Viewing)
    }

    /// The card of the day.
    ///
    /// Computed once per session from today's date and the persistent user
    /// id, then cached. The card also becomes the selected card. Returns
    /// `None` if no cards are available.
    pub fn get_daily_card(&mut self) -> Option<Card> {
        let card = match self.daily.clone() {
            Some(card) => {
                tracing::debug!(id = %card.id(), "daily card from cache");
                card
            }
            None => {
                let catalog = self.catalog.as_ref()?;
                let user_id = resolve_user_id(
                    self.identity.as_mut(),
                    &self.config.user_id_key,
                    self.config.user_id_len,
                    &mut self.rng,
                );
                let today = self.clock.today();
                let index = select_daily(today, &user_id, catalog.len())?;
                let card = catalog.get(index)?.clone();
                tracing::info!(%today, index, id = %card.id(), "daily card selected");
                self.daily = Some(card.clone());
                card
            }
        };
        self.select(card.clone());
        Some(card)
    }

    /// Raise centering progress. Lower values are ignored; the result is
    /// clamped to `[0, 1]`. Returns the resulting progress.
    pub fn set_centering_progress(&mut self, value: f64) -> f64 {
        self.centering.raise_progress(value)
    }

    /// Return to `Welcome`, clear the selection and zero centering progress.
    ///
    /// The catalog, shuffled order and cached daily card are kept.
    pub fn reset(&mut self) {
        if self.state != AppState::Welcome {
            tracing::info!(from = %self.state, "session reset");
        }
        self.state = AppState::Welcome;
        self.selected = None;
        self.centering.restart();
        self.reading = ReadingSection::default();
    }

    // --- Centering ---

    /// Start guided breathing. Returns the timer to arm.
    pub fn begin_centering(&mut self) -> SessionResult<ScheduledAdvance> {
        self.require_centering()?;
        self.centering.begin()
    }

    /// Skip the rest of the breathing exercise and go to the spread.
    pub fn skip_centering(&mut self) -> SessionResult<AppState> {
        self.require_centering()?;
        self.centering.skip()?;
        self.enter(AppState::Selection);
        Ok(AppState::Selection)
    }

    /// Skip the ritual from its first prompt and go to the spread.
    pub fn already_centered(&mut self) -> SessionResult<AppState> {
        self.require_centering()?;
        self.centering.already_centered()?;
        self.enter(AppState::Selection);
        Ok(AppState::Selection)
    }

    /// Deliver an elapsed timer. Stale tokens, and timers arriving after the
    /// session left centering, change nothing. Returns the current state.
    pub fn fire_timer(&mut self, token: TimerToken) -> AppState {
        if self.state != AppState::Centering {
            tracing::debug!(state = %self.state, "timer fired outside centering, ignored");
            return self.state;
        }
        if self.centering.fire(token) == CenteringStep::Complete {
            self.enter(AppState::Selection);
        }
        self.state
    }

    // --- Reading ---

    /// Move to the next reading section. Returns the new section, or `None`
    /// when there is no card shown or the reading is already complete.
    pub fn advance_reading(&mut self) -> Option<ReadingSection> {
        if !self.state.needs_card() {
            return None;
        }
        let next = self.reading.following()?;
        self.reading = next;
        Some(next)
    }

    // --- Internals ---

    fn require_loaded(&self) -> SessionResult<()> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(SessionError::CatalogNotLoaded)
        }
    }

    fn require_centering(&self) -> SessionResult<()> {
        if self.state == AppState::Centering {
            Ok(())
        } else {
            Err(SessionError::NotCentering(self.state))
        }
    }

    fn select(&mut self, card: Card) {
        self.selected = Some(card);
        self.reading = ReadingSection::default();
    }

    fn reshuffle(&mut self) {
        if let Some(catalog) = &self.catalog {
            self.shuffled = shuffle(catalog.cards(), &mut self.rng);
            tracing::debug!(cards = self.shuffled.len(), "cards shuffled");
        }
    }

    /// Apply entry side effects and move to `to`. The caller has validated
    /// the transition.
    fn enter(&mut self, to: AppState) {
        let from = self.state;
        if from == AppState::Centering {
            self.centering.cancel();
        }
        match to {
            AppState::Centering if from == AppState::Welcome => self.centering.restart(),
            AppState::Centering => self.centering.rewind(),
            AppState::Selection if matches!(from, AppState::Welcome | AppState::Centering) => {
                self.reshuffle();
            }
            AppState::Viewing | AppState::Daily => self.reading = ReadingSection::default(),
            _ => {}
        }
        tracing::info!(%from, %to, "state transition");
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::DEFAULT_USER_ID_KEY;
    use chrono::NaiveDate;
    use lr_cards::{AssetListing, CardId, CardRepository};

    fn catalog(n: usize) -> CardCatalog {
        let paths = (0..n).map(|i| format!("/CardSet/{i}_theme_{i}.jpg")).collect();
        CardRepository::from_listing(AssetListing::new(paths))
    }

    fn oct19() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn loaded(n: usize) -> SessionStore {
        let mut store = SessionStore::new(SessionConfig::default().with_seed(42))
            .with_identity_store(MemoryStore::with_value(DEFAULT_USER_ID_KEY, "testUser"))
            .with_clock(oct19());
        assert!(store.install_catalog(catalog(n)));
        store
    }

    fn ids(cards: &[Card]) -> Vec<String> {
        let mut ids: Vec<_> = cards.iter().map(|c| c.id().to_string()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn initial_state() {
        let store = SessionStore::new(SessionConfig::default());
        assert_eq!(store.state(), AppState::Welcome);
        assert!(!store.is_loaded());
        assert!(store.selected_card().is_none());
        assert!(store.shuffled_cards().is_empty());
        assert!(store.daily_card().is_none());
        assert_eq!(store.centering_progress(), 0.0);
    }

    #[test]
    fn actions_need_a_catalog() {
        let mut store = SessionStore::new(SessionConfig::default());
        assert!(matches!(
            store.set_state(AppState::Centering),
            Err(SessionError::CatalogNotLoaded)
        ));
        assert!(matches!(store.shuffle(), Err(SessionError::CatalogNotLoaded)));
        assert!(store.select_random().is_none());
        assert!(store.get_daily_card().is_none());
        assert!(store.selected_card().is_none());
    }

    #[test]
    fn install_shuffles_and_is_idempotent() {
        let mut store = loaded(10);
        assert_eq!(store.shuffled_cards().len(), 10);
        assert_eq!(ids(store.shuffled_cards()), ids(store.catalog().unwrap().cards()));
        assert!(!store.install_catalog(catalog(3)));
        assert_eq!(store.catalog().unwrap().len(), 10);
    }

    #[test]
    fn guard_falls_back_to_welcome() {
        let mut store = loaded(3);
        assert_eq!(store.set_state(AppState::Viewing).unwrap(), AppState::Welcome);
        assert_eq!(store.state(), AppState::Welcome);
    }

    #[test]
    fn guard_applies_to_daily_with_empty_catalog() {
        let mut store = loaded(0);
        assert_eq!(store.set_state(AppState::Daily).unwrap(), AppState::Welcome);
        assert!(store.daily_card().is_none());
    }

    #[test]
    fn invalid_transition_is_rejected() {
        let mut store = loaded(3);
        store.set_state(AppState::Centering).unwrap();
        store.select_random().unwrap();
        assert!(matches!(
            store.set_state(AppState::Viewing),
            Err(SessionError::InvalidTransition {
                from: AppState::Centering,
                to: AppState::Viewing
            })
        ));
        assert_eq!(store.state(), AppState::Centering);
    }

    #[test]
    fn draw_flow() {
        let mut store = loaded(20);
        assert_eq!(store.set_state(AppState::Centering).unwrap(), AppState::Centering);
        assert_eq!(store.centering_phase(), Some(CenteringPhase::Check));
        let before = store.shuffled_cards().to_vec();
        assert_eq!(store.set_state(AppState::Selection).unwrap(), AppState::Selection);
        assert_ne!(store.shuffled_cards(), before.as_slice());
        assert_eq!(store.spread().len(), 12);

        let card = store.spread()[3].clone();
        assert_eq!(store.pick_card(&card).unwrap(), AppState::Viewing);
        assert_eq!(store.selected_card(), Some(&card));
        assert_eq!(store.reading_section(), Some(ReadingSection::Meaning));

        // Draw another: back to the spread without reshuffling.
        let order = store.shuffled_cards().to_vec();
        assert_eq!(store.set_state(AppState::Selection).unwrap(), AppState::Selection);
        assert_eq!(store.shuffled_cards(), order.as_slice());
    }

    #[test]
    fn selection_always_holds_a_permutation() {
        let mut store = loaded(15);
        for _ in 0..5 {
            store.set_state(AppState::Selection).unwrap();
            assert_eq!(ids(store.shuffled_cards()), ids(store.catalog().unwrap().cards()));
            store.reset();
        }
    }

    #[test]
    fn spread_is_limited_by_catalog() {
        let store = loaded(5);
        assert_eq!(store.spread().len(), 5);
        let empty = loaded(0);
        assert!(empty.spread().is_empty());
    }

    #[test]
    fn select_card_rejects_foreign_cards() {
        let mut store = loaded(3);
        let foreign = Card::new(CardId::parse("99").unwrap(), "elsewhere", "/x.jpg").unwrap();
        assert!(matches!(
            store.select_card(&foreign),
            Err(SessionError::UnknownCard(id)) if id == "99"
        ));
    }

    #[test]
    fn daily_card_matches_reference_and_is_cached() {
        let mut store = loaded(2);
        // "Mon Oct 19 2026testUser" hashes to -1345214685; |h| mod 2 == 1.
        let card = store.get_daily_card().unwrap();
        assert_eq!(card.id().as_str(), "1");
        assert_eq!(store.selected_card(), Some(&card));
        assert_eq!(store.get_daily_card().unwrap(), card);
        assert_eq!(store.daily_card(), Some(&card));
    }

    #[test]
    fn daily_flow_and_return_home() {
        let mut store = loaded(49);
        assert_eq!(store.set_state(AppState::Daily).unwrap(), AppState::Daily);
        let daily = store.selected_card().cloned().unwrap();
        assert_eq!(daily.id().as_str(), "45");

        assert_eq!(store.set_state(AppState::Viewing).unwrap(), AppState::Viewing);
        assert_eq!(store.selected_card(), Some(&daily));

        assert_eq!(store.set_state(AppState::Welcome).unwrap(), AppState::Welcome);
        assert!(store.selected_card().is_none());

        // Re-entering daily reuses the cached card and selects it again.
        assert_eq!(store.set_state(AppState::Daily).unwrap(), AppState::Daily);
        assert_eq!(store.selected_card(), Some(&daily));
    }

    #[test]
    fn daily_card_survives_reset() {
        let mut store = SessionStore::new(SessionConfig::default().with_seed(1)).with_clock(oct19());
        store.install_catalog(catalog(10));
        let first = store.get_daily_card().unwrap();
        store.reset();
        assert_eq!(store.get_daily_card().unwrap(), first);
    }

    #[test]
    fn daily_to_centering_keeps_progress() {
        let mut store = loaded(5);
        store.set_state(AppState::Centering).unwrap();
        store.set_centering_progress(0.4);
        store.set_state(AppState::Welcome).unwrap();
        assert_eq!(store.centering_progress(), 0.0);

        store.set_state(AppState::Daily).unwrap();
        store.set_centering_progress(0.5);
        store.set_state(AppState::Centering).unwrap();
        assert_eq!(store.centering_phase(), Some(CenteringPhase::Check));
        assert_eq!(store.centering_progress(), 0.5);
    }

    #[test]
    fn failed_pick_selects_nothing() {
        let mut store = loaded(2);
        let card = store.catalog().unwrap().cards()[0].clone();
        assert!(matches!(
            store.pick_card(&card),
            Err(SessionError::InvalidTransition {
                from: AppState::Welcome,
                to: AppState::Viewing
            })
        ));
        assert!(store.selected_card().is_none());
        assert_eq!(store.set_state(AppState::Viewing).unwrap(), AppState::Welcome);

        store.set_state(AppState::Centering).unwrap();
        assert!(store.pick_card(&card).is_err());
        assert!(store.selected_card().is_none());
        assert_eq!(store.state(), AppState::Centering);
    }

    #[test]
    fn reset_from_any_state() {
        let targets = [
            AppState::Centering,
            AppState::Selection,
            AppState::Viewing,
            AppState::Daily,
        ];
        for target in targets {
            let mut store = loaded(4);
            if target == AppState::Viewing {
                store.set_state(AppState::Selection).unwrap();
                let card = store.spread()[0].clone();
                store.pick_card(&card).unwrap();
            } else {
                store.set_state(target).unwrap();
            }
            assert_eq!(store.state(), target);
            store.set_centering_progress(0.8);
            store.select_random().unwrap();
            store.reset();
            assert_eq!(store.state(), AppState::Welcome);
            assert!(store.selected_card().is_none());
            assert_eq!(store.centering_progress(), 0.0);
            assert!(store.is_loaded());
            assert_eq!(store.shuffled_cards().len(), 4);
        }
    }

    #[test]
    fn reset_before_load_is_allowed() {
        let mut store = SessionStore::new(SessionConfig::default());
        store.reset();
        assert_eq!(store.state(), AppState::Welcome);
    }

    #[test]
    fn select_random_picks_from_catalog() {
        let mut store = loaded(2);
        let card = store.select_random().unwrap();
        assert!(store.catalog().unwrap().contains(&card));
        assert_eq!(store.selected_card(), Some(&card));
        assert!(loaded(0).select_random().is_none());
    }

    #[test]
    fn centering_timers_drive_to_selection() {
        let mut store = loaded(6);
        store.set_state(AppState::Centering).unwrap();
        let t1 = store.begin_centering().unwrap();
        assert_eq!(store.centering_progress(), 0.3);

        assert_eq!(store.fire_timer(t1.token), AppState::Centering);
        assert_eq!(store.centering_phase(), Some(CenteringPhase::Intention));
        let t2 = store.pending_timer().unwrap();
        store.fire_timer(t2.token);
        assert_eq!(store.centering_phase(), Some(CenteringPhase::Ready));
        assert_eq!(store.centering_progress(), 1.0);
        let t3 = store.pending_timer().unwrap();
        assert_eq!(store.fire_timer(t3.token), AppState::Selection);
        assert!(store.pending_timer().is_none());
    }

    #[test]
    fn stale_timer_after_skip_does_nothing() {
        let mut store = loaded(6);
        store.set_state(AppState::Centering).unwrap();
        let t1 = store.begin_centering().unwrap();
        assert_eq!(store.skip_centering().unwrap(), AppState::Selection);
        assert_eq!(store.centering_progress(), 1.0);

        let card = store.spread()[0].clone();
        store.pick_card(&card).unwrap();
        assert_eq!(store.fire_timer(t1.token), AppState::Viewing);
        assert_eq!(store.state(), AppState::Viewing);
    }

    #[test]
    fn stale_timer_after_reset_does_nothing() {
        let mut store = loaded(6);
        store.set_state(AppState::Centering).unwrap();
        let t1 = store.begin_centering().unwrap();
        store.reset();
        store.set_state(AppState::Centering).unwrap();
        assert_eq!(store.fire_timer(t1.token), AppState::Centering);
        assert_eq!(store.centering_phase(), Some(CenteringPhase::Check));
        assert_eq!(store.centering_progress(), 0.0);
    }

    #[test]
    fn centering_actions_need_centering_state() {
        let mut store = loaded(3);
        assert!(matches!(
            store.begin_centering(),
            Err(SessionError::NotCentering(AppState::Welcome))
        ));
        store.set_state(AppState::Centering).unwrap();
        assert!(matches!(
            store.skip_centering(),
            Err(SessionError::InvalidCenteringAction { .. })
        ));
        assert_eq!(store.already_centered().unwrap(), AppState::Selection);
    }

    #[test]
    fn reading_progression() {
        let mut store = loaded(3);
        assert!(store.advance_reading().is_none());
        store.set_state(AppState::Daily).unwrap();
        assert_eq!(store.advance_reading(), Some(ReadingSection::Questions));
        assert_eq!(store.advance_reading(), Some(ReadingSection::Actions));
        assert_eq!(store.advance_reading(), None);
        store.set_state(AppState::Viewing).unwrap();
        assert_eq!(store.reading_section(), Some(ReadingSection::Meaning));
    }

    #[test]
    fn snapshot_serializes() {
        let mut store = loaded(3);
        store.set_state(AppState::Centering).unwrap();
        let snap = store.snapshot();
        assert!(snap.loaded);
        assert_eq!(snap.centering_phase, Some(CenteringPhase::Check));
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["currentState"], "centering");
        assert_eq!(json["centeringPhase"], "check");
        assert_eq!(json["spread"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn load_catalog_from_source() {
        let mut store = SessionStore::new(SessionConfig::default().with_seed(5));
        let source = lr_cards::StaticAssets::new(["2_b.jpg", "1_a.jpg", "bogus.jpg"]);
        assert!(store.load_catalog(&source).await.unwrap());
        assert_eq!(store.catalog().unwrap().len(), 2);
        assert!(!store.load_catalog(&source).await.unwrap());
    }

    #[tokio::test]
    async fn load_failure_leaves_store_unloaded() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = lr_cards::DirectoryAssets::new(dir.path().join("missing"));
        let mut store = SessionStore::new(SessionConfig::default());
        assert!(matches!(
            store.load_catalog(&source).await,
            Err(SessionError::Card(_))
        ));
        assert!(!store.is_loaded());
        assert!(matches!(
            store.set_state(AppState::Centering),
            Err(SessionError::CatalogNotLoaded)
        ));
    }
}
