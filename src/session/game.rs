//! Game session implementation.

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::bonus::{BonusKind, BonusWindow};
use super::layout::BoardLayout;
use super::snapshot::SessionSnapshot;
use crate::cards::{Card, DeckProvider};
use crate::core::{CardIndex, DeckKind, Difficulty, GameRng, PairId, SessionConfig};
use crate::error::Rejection;
use crate::events::{ScoreReason, SessionEvent};
use crate::powerups::{PowerUpInventory, PowerUpKind, PowerUpState};
use crate::rules::{self, FinalScore};
use crate::schedule::{DeferredAction, DeferredQueue};

/// Result of an accepted click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First card of a pair turned up.
    Flipped,
    /// Second card completed a pair.
    Matched(PairId),
    /// Second card did not match. Both turn back after the mismatch delay.
    Mismatched,
    /// Second card completed the last pair.
    Won(FinalScore),
}

/// Builder for creating a `GameSession`.
pub struct SessionBuilder {
    config: SessionConfig,
    deck: DeckProvider,
    rng: Option<GameRng>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            config: SessionConfig::default(),
            deck: DeckProvider::new(),
            rng: None,
        }
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed for dealing. Overrides the config's seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn deck(mut self, deck: DeckProvider) -> Self {
        self.deck = deck;
        self
    }

    /// Use an existing generator instead of seeding one from the config.
    pub fn rng(mut self, rng: GameRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Build an idle session. Call `start_new_game` to deal.
    pub fn build(self) -> GameSession {
        let rng = self.rng.unwrap_or_else(|| GameRng::new(self.config.seed));
        let powerups = PowerUpInventory::new(&self.config.powerup_costs);
        GameSession {
            config: self.config,
            deck: self.deck,
            rng,
            difficulty: Difficulty::default(),
            deck_kind: DeckKind::default(),
            started: false,
            board: Vector::new(),
            face_up: SmallVec::new(),
            matched_pairs: 0,
            total_pairs: 0,
            moves: 0,
            score: 0,
            combo: 0,
            combo_timer: 0.0,
            streak: 0,
            tokens: 0,
            powerups,
            bonus: None,
            previewing: false,
            elapsed: 0.0,
            over: false,
            won: false,
            final_score: None,
            deferred: DeferredQueue::new(),
            events: Vec::new(),
            screen: None,
        }
    }
}

/// One in-memory game of memory match.
///
/// Owns the board and every counter. All mutation happens inside
/// `start_new_game`, `on_card_clicked`, `use_power_up` and `tick`; the
/// renderer reads through the accessors or `snapshot`.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: SessionConfig,
    deck: DeckProvider,
    rng: GameRng,

    difficulty: Difficulty,
    deck_kind: DeckKind,
    started: bool,

    board: Vector<Card>,
    /// Cards turned up this move. Never more than two.
    face_up: SmallVec<[CardIndex; 2]>,

    matched_pairs: u32,
    total_pairs: u32,
    moves: u32,
    score: u64,
    combo: u32,
    combo_timer: f64,
    streak: u32,
    tokens: u32,
    powerups: PowerUpInventory,
    bonus: Option<BonusWindow>,
    previewing: bool,
    elapsed: f64,
    over: bool,
    won: bool,
    final_score: Option<FinalScore>,

    deferred: DeferredQueue,
    events: Vec<SessionEvent>,
    screen: Option<(f32, f32)>,
}

impl GameSession {
    /// Build an idle session from a config.
    pub fn new(config: SessionConfig) -> Self {
        SessionBuilder::new().config(config).build()
    }

    // === Commands ===

    /// Deal a fresh board and reset every counter.
    ///
    /// Rejected, leaving the current game untouched, if the difficulty
    /// would deal no cards.
    pub fn start_new_game(&mut self, difficulty: Difficulty, deck: DeckKind) -> Result<(), Rejection> {
        let pairs = self.config.pairs_for(difficulty) as usize;
        let dealt = self.deck.deal_pairs(pairs, deck, &mut self.rng);
        if dealt.is_empty() {
            tracing::debug!(%difficulty, %deck, "start rejected: nothing to deal");
            return Err(Rejection::NoPairs(difficulty));
        }

        self.board = dealt.into_iter().map(Card::from).collect();
        self.difficulty = difficulty;
        self.deck_kind = deck;
        self.started = true;

        self.face_up.clear();
        self.matched_pairs = 0;
        self.total_pairs = (self.board.len() / 2) as u32;
        self.moves = 0;
        self.score = 0;
        self.combo = 0;
        self.combo_timer = 0.0;
        self.streak = 0;
        self.tokens = self.config.starting_tokens;
        self.powerups = PowerUpInventory::new(&self.config.powerup_costs);
        self.bonus = None;
        self.previewing = false;
        self.elapsed = 0.0;
        self.over = false;
        self.won = false;
        self.final_score = None;
        self.deferred.clear();
        self.events.clear();

        tracing::debug!(
            %difficulty,
            %deck,
            pairs = self.total_pairs,
            seed = self.rng.seed(),
            "new game dealt"
        );
        self.events.push(SessionEvent::GameStarted {
            difficulty,
            deck,
            total_pairs: self.total_pairs,
        });
        Ok(())
    }

    /// Deal again with the last difficulty and deck.
    pub fn restart(&mut self) -> Result<(), Rejection> {
        self.start_new_game(self.difficulty, self.deck_kind)
    }

    /// Handle a click on the card at `index`.
    ///
    /// Flips the card and, if it is the second of the move, resolves the
    /// pair immediately.
    pub fn on_card_clicked(&mut self, index: CardIndex) -> Result<ClickOutcome, Rejection> {
        self.accept_click(index).inspect_err(|reason| {
            tracing::debug!(%index, %reason, "click ignored");
        })?;

        self.face_up.push(index);
        self.events.push(SessionEvent::CardFlipped { index });
        tracing::debug!(%index, buffered = self.face_up.len(), "card flipped");

        if self.face_up.len() < 2 {
            return Ok(ClickOutcome::Flipped);
        }

        self.moves += 1;
        Ok(self.resolve_pair())
    }

    /// Spend tokens on a power-up and apply its effect.
    pub fn use_power_up(&mut self, kind: PowerUpKind) -> Result<PowerUpKind, Rejection> {
        let cost = self
            .ensure_in_play()
            .and_then(|()| self.powerups.activate(kind, &mut self.tokens))
            .inspect_err(|reason| {
                tracing::debug!(%kind, %reason, "power-up ignored");
            })?;
        tracing::debug!(%kind, cost, balance = self.tokens, "power-up activated");
        self.events.push(SessionEvent::PowerUpActivated { kind, cost });

        let timing = &self.config.timing;
        match kind {
            PowerUpKind::Preview => {
                let duration = timing.preview_duration;
                for i in 0..self.board.len() {
                    let flipped = self.board.get_mut(i).is_some_and(Card::flip);
                    if flipped {
                        self.events.push(SessionEvent::CardFlipped {
                            index: CardIndex::new(i),
                        });
                    }
                }
                self.previewing = true;
                self.deferred.schedule(DeferredAction::ClosePreview, duration);
            }
            PowerUpKind::TimeFreeze => {
                let duration = timing.time_freeze_duration;
                self.open_bonus(BonusKind::TimeFreeze, duration);
            }
            PowerUpKind::MatchAssist => {
                let duration = timing.match_assist_duration;
                self.open_bonus(BonusKind::MatchAssist, duration);
            }
        }

        Ok(kind)
    }

    /// Advance every timer by `delta` seconds. Call once per frame.
    pub fn tick(&mut self, delta: f64) {
        if !(delta.is_finite() && delta > 0.0) {
            return;
        }

        if self.started && !self.over && !self.is_time_frozen() {
            self.elapsed += delta;
        }

        if self.combo > 0 {
            self.combo_timer += delta;
            if self.combo_timer >= self.config.timing.combo_decay {
                tracing::debug!(combo = self.combo, "combo expired");
                self.combo = 0;
                self.combo_timer = 0.0;
                self.events.push(SessionEvent::ComboExpired);
            }
        }

        if let Some(window) = self.bonus.as_mut() {
            if window.advance(delta) {
                let kind = window.kind;
                self.bonus = None;
                tracing::debug!(?kind, "bonus window closed");
                self.events.push(SessionEvent::BonusWindowClosed { kind });
            }
        }

        for action in self.deferred.advance(delta) {
            tracing::trace!(?action, "deferred action due");
            self.apply_deferred(action);
        }
    }

    /// Record the viewport size. Only affects `board_layout`.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen = Some((width, height));
    }

    /// Lock or unlock a card while the renderer animates it.
    ///
    /// Returns `false` if `index` is not on the board.
    pub fn set_card_animating(&mut self, index: CardIndex, animating: bool) -> bool {
        match self.board.get_mut(index.raw()) {
            Some(card) => {
                card.set_animating(animating);
                true
            }
            None => false,
        }
    }

    /// Take every event pushed since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // === Resolution ===

    fn ensure_in_play(&self) -> Result<(), Rejection> {
        if !self.started {
            return Err(Rejection::NotStarted);
        }
        if self.over {
            return Err(Rejection::GameOver);
        }
        Ok(())
    }

    fn accept_click(&mut self, index: CardIndex) -> Result<(), Rejection> {
        self.ensure_in_play()?;
        if self.face_up.len() >= 2 {
            return Err(Rejection::BufferFull);
        }
        let card = self
            .board
            .get_mut(index.raw())
            .ok_or(Rejection::CardOutOfRange(index))?;
        if !card.flip() {
            return Err(Rejection::CardUnavailable(index));
        }
        Ok(())
    }

    fn resolve_pair(&mut self) -> ClickOutcome {
        let (first, second) = (self.face_up[0], self.face_up[1]);
        self.face_up.clear();

        let pair_of = |index: CardIndex| self.board.get(index.raw()).map(|c| c.pair_id);
        match (pair_of(first), pair_of(second)) {
            (Some(a), Some(b)) if a == b => self.resolve_match(a, first, second),
            _ => self.resolve_mismatch(first, second),
        }
    }

    fn resolve_match(&mut self, pair_id: PairId, first: CardIndex, second: CardIndex) -> ClickOutcome {
        // Non-short-circuiting: both cards must be marked.
        let newly_matched = self.mark_matched(first) | self.mark_matched(second);
        if !newly_matched {
            tracing::warn!(%pair_id, "pair was already matched, not counting it again");
            return ClickOutcome::Matched(pair_id);
        }

        self.matched_pairs = (self.matched_pairs + 1).min(self.total_pairs);
        self.events.push(SessionEvent::MatchFound {
            pair_id,
            first,
            second,
        });

        let scoring = &self.config.scoring;
        let delta = rules::match_score(scoring, self.elapsed, self.combo, self.streak);
        self.add_score(delta, ScoreReason::Match);
        self.tokens += 1;
        self.combo += 1;
        self.combo_timer = 0.0;
        self.streak += 1;

        tracing::debug!(
            %pair_id,
            delta,
            combo = self.combo,
            streak = self.streak,
            matched = self.matched_pairs,
            total = self.total_pairs,
            "pair matched"
        );

        if rules::streak_bonus_due(&self.config.scoring, self.streak) {
            self.add_score(self.config.scoring.streak_bonus, ScoreReason::StreakBonus);
            self.events.push(SessionEvent::StreakBonus { streak: self.streak });
            self.open_bonus(BonusKind::Streak, self.config.timing.streak_window);
        }

        if self.matched_pairs == self.total_pairs {
            return ClickOutcome::Won(self.finish_win());
        }
        ClickOutcome::Matched(pair_id)
    }

    fn resolve_mismatch(&mut self, first: CardIndex, second: CardIndex) -> ClickOutcome {
        self.combo = 0;
        self.combo_timer = 0.0;
        self.streak = 0;
        self.deferred.schedule(
            DeferredAction::Unflip(first, second),
            self.config.timing.mismatch_delay,
        );
        tracing::debug!(%first, %second, "mismatch");
        self.events.push(SessionEvent::Mismatch { first, second });
        ClickOutcome::Mismatched
    }

    fn finish_win(&mut self) -> FinalScore {
        if let Some(existing) = self.final_score {
            return existing;
        }

        let final_score = rules::final_score(
            &self.config.scoring,
            self.elapsed,
            self.moves,
            self.matched_pairs,
            self.total_pairs,
        );
        self.over = true;
        self.won = true;
        self.final_score = Some(final_score);
        self.add_score(final_score.total(), ScoreReason::Final);

        tracing::debug!(
            score = self.score,
            moves = self.moves,
            elapsed = self.elapsed,
            "game won"
        );
        self.events.push(SessionEvent::GameWon { final_score });
        final_score
    }

    fn mark_matched(&mut self, index: CardIndex) -> bool {
        self.board
            .get_mut(index.raw())
            .is_some_and(Card::set_matched)
    }

    fn add_score(&mut self, delta: u64, reason: ScoreReason) {
        self.score += delta;
        self.events.push(SessionEvent::ScoreChanged {
            delta,
            total: self.score,
            reason,
        });
    }

    fn open_bonus(&mut self, kind: BonusKind, duration: f64) {
        if let Some(previous) = self.bonus.replace(BonusWindow::new(kind, duration)) {
            self.events.push(SessionEvent::BonusWindowClosed {
                kind: previous.kind,
            });
        }
        tracing::debug!(?kind, duration, "bonus window opened");
        self.events.push(SessionEvent::BonusWindowOpened { kind, duration });
    }

    fn apply_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::Unflip(a, b) => {
                self.unflip_card(a);
                self.unflip_card(b);
            }
            DeferredAction::ClosePreview => self.close_preview(),
        }
    }

    fn unflip_card(&mut self, index: CardIndex) {
        let Some(card) = self.board.get_mut(index.raw()) else {
            return;
        };
        if card.is_matched() {
            tracing::trace!(%index, "skipping unflip of matched card");
            return;
        }
        if card.unflip() {
            self.events.push(SessionEvent::CardUnflipped { index });
        }
    }

    fn close_preview(&mut self) {
        for i in 0..self.board.len() {
            let index = CardIndex::new(i);
            if self.face_up.contains(&index) || self.deferred.has_pending_unflip(index) {
                continue;
            }
            self.unflip_card(index);
        }
        self.previewing = false;
        self.events.push(SessionEvent::PreviewEnded);
    }

    // === Queries ===

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn deck_kind(&self) -> DeckKind {
        self.deck_kind
    }

    /// Seed of the dealing RNG, for reproducing a game.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn board(&self) -> &Vector<Card> {
        &self.board
    }

    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.board.get(index.raw())
    }

    /// Cards turned up in the current move.
    pub fn face_up_buffer(&self) -> &[CardIndex] {
        &self.face_up
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn combo_timer(&self) -> f64 {
        self.combo_timer
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    pub fn powerup(&self, kind: PowerUpKind) -> Option<&PowerUpState> {
        self.powerups.get(kind)
    }

    pub fn powerups(&self) -> Vec<PowerUpState> {
        self.powerups.states()
    }

    /// Whether `use_power_up(kind)` would be accepted right now.
    pub fn can_use_power_up(&self, kind: PowerUpKind) -> bool {
        self.ensure_in_play().is_ok() && self.powerups.check(kind, self.tokens).is_ok()
    }

    pub fn bonus(&self) -> Option<&BonusWindow> {
        self.bonus.as_ref()
    }

    pub fn bonus_active(&self) -> bool {
        self.bonus.is_some()
    }

    pub fn bonus_kind(&self) -> Option<BonusKind> {
        self.bonus.map(|w| w.kind)
    }

    /// The game clock is stopped while a time-freeze window is open.
    pub fn is_time_frozen(&self) -> bool {
        self.bonus_kind() == Some(BonusKind::TimeFreeze)
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn did_win(&self) -> bool {
        self.won
    }

    pub fn final_score(&self) -> Option<FinalScore> {
        self.final_score
    }

    /// Number of deferred actions still waiting.
    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Events pushed since the last drain.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Unmatched pairs to highlight while a match-assist window is open.
    ///
    /// Empty when no match-assist window is open.
    pub fn assist_hints(&self) -> Vec<(CardIndex, CardIndex)> {
        if self.bonus_kind() != Some(BonusKind::MatchAssist) {
            return Vec::new();
        }

        let mut by_pair: FxHashMap<PairId, SmallVec<[CardIndex; 2]>> = FxHashMap::default();
        for (i, card) in self.board.iter().enumerate() {
            if !card.is_matched() {
                by_pair.entry(card.pair_id).or_default().push(CardIndex::new(i));
            }
        }

        let mut hints: Vec<_> = by_pair
            .into_values()
            .filter(|cards| cards.len() == 2)
            .map(|cards| (cards[0], cards[1]))
            .collect();
        hints.sort();
        hints
    }

    /// Grid for the current board in the last reported viewport.
    pub fn board_layout(&self) -> BoardLayout {
        let (width, height) = self.screen.unwrap_or((0.0, 0.0));
        BoardLayout::fit(self.board.len(), width, height)
    }

    /// Everything the renderer needs for one frame.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            difficulty: self.difficulty,
            deck: self.deck_kind,
            board: self.board.clone(),
            face_up: self.face_up.to_vec(),
            score: self.score,
            moves: self.moves,
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs,
            elapsed: self.elapsed,
            combo: self.combo,
            combo_timer: self.combo_timer,
            streak: self.streak,
            tokens: self.tokens,
            powerups: self.powerups.states(),
            bonus: self.bonus,
            previewing: self.previewing,
            is_over: self.over,
            did_win: self.won,
            final_score: self.final_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u64) -> GameSession {
        let mut session = SessionBuilder::new().seed(seed).build();
        session.start_new_game(Difficulty::Easy, DeckKind::Shapes).unwrap();
        session
    }

    fn twin_of(session: &GameSession, index: CardIndex) -> CardIndex {
        let pair_id = session.card(index).unwrap().pair_id;
        let twin = session
            .board()
            .iter()
            .enumerate()
            .position(|(i, c)| i != index.raw() && c.pair_id == pair_id)
            .unwrap();
        CardIndex::new(twin)
    }

    #[test]
    fn test_idle_session() {
        let mut session = SessionBuilder::new().build();
        assert!(!session.is_started());
        assert_eq!(session.on_card_clicked(CardIndex::new(0)), Err(Rejection::NotStarted));
        assert_eq!(session.use_power_up(PowerUpKind::Preview), Err(Rejection::NotStarted));

        session.tick(1.0);
        assert_eq!(session.elapsed(), 0.0);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut session = started(1);
        let first = CardIndex::new(0);
        session.on_card_clicked(first).unwrap();
        session.on_card_clicked(twin_of(&session, first)).unwrap();
        session.tick(3.0);
        assert!(session.score() > 0);

        session.start_new_game(Difficulty::Hard, DeckKind::Words).unwrap();
        assert_eq!(session.total_pairs(), 18);
        assert_eq!(session.board().len(), 36);
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.matched_pairs(), 0);
        assert_eq!(session.tokens(), 5);
        assert_eq!(session.elapsed(), 0.0);
        assert!(session.face_up_buffer().is_empty());
        assert!(session.board().iter().all(|c| !c.is_face_up()));
        assert!(session.powerups().iter().all(|p| !p.used));
        assert_eq!(session.pending_deferred(), 0);
    }

    #[test]
    fn test_matched_card_survives_stale_unflip() {
        let mut session = started(2);
        let first = CardIndex::new(0);
        let second = twin_of(&session, first);
        session.on_card_clicked(first).unwrap();
        session.on_card_clicked(second).unwrap();

        // A stale unflip aimed at cards that have since matched.
        session
            .deferred
            .schedule(DeferredAction::Unflip(first, second), 0.8);
        session.tick(1.0);

        assert!(session.card(first).unwrap().is_matched());
        assert!(session.card(second).unwrap().is_matched());
        assert_eq!(session.matched_pairs(), 1);
    }

    #[test]
    fn test_resolving_matched_pair_does_not_double_count() {
        let mut session = started(3);
        let first = CardIndex::new(0);
        let second = twin_of(&session, first);
        session.on_card_clicked(first).unwrap();
        session.on_card_clicked(second).unwrap();
        let score = session.score();

        let pair_id = session.card(first).unwrap().pair_id;
        assert_eq!(
            session.resolve_match(pair_id, first, second),
            ClickOutcome::Matched(pair_id)
        );
        assert_eq!(session.matched_pairs(), 1);
        assert_eq!(session.score(), score);
    }

    #[test]
    fn test_win_is_final_once() {
        let mut session = started(4);
        for i in 0..session.board().len() {
            let index = CardIndex::new(i);
            if session.card(index).unwrap().is_matched() {
                continue;
            }
            session.on_card_clicked(index).unwrap();
            session.on_card_clicked(twin_of(&session, index)).unwrap();
        }
        assert!(session.is_over());
        let score = session.score();
        let final_score = session.final_score().unwrap();

        assert_eq!(session.finish_win(), final_score);
        assert_eq!(session.score(), score);
    }

    #[test]
    fn test_preview_skips_pending_unflip() {
        let mut session = started(5);
        let first = CardIndex::new(0);
        let other = (1..16)
            .map(CardIndex::new)
            .find(|&i| session.card(i).unwrap().pair_id != session.card(first).unwrap().pair_id)
            .unwrap();

        session.on_card_clicked(first).unwrap();
        assert_eq!(session.on_card_clicked(other), Ok(ClickOutcome::Mismatched));
        assert!(session.deferred.has_pending_unflip(first));

        session.use_power_up(PowerUpKind::Preview).unwrap();
        assert!(session.board().iter().all(Card::is_face_up));

        // Mismatch unflip fires first; preview closes later and turns the rest down.
        session.tick(0.8);
        assert!(!session.card(first).unwrap().is_face_up());
        assert!(!session.card(other).unwrap().is_face_up());
        assert!(session.is_previewing());

        session.tick(1.5);
        assert!(!session.is_previewing());
        assert!(session.board().iter().all(|c| !c.is_face_up()));
    }
}
