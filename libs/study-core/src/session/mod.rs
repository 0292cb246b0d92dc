//! Round-based study session engine.
//!
//! A session walks a deck front to back. Every card is classified as mastered
//! or not mastered, and when the deck runs out the round is closed: if nothing
//! was missed the session is complete, otherwise the learner picks which cards
//! make up the next round.
//!
//! At every point each card handed to [`StudySession::start`] sits in exactly
//! one place: the unseen tail of the deck, the mastered pool, the
//! not-mastered pool, or the set-aside pile of cards taken out of play.

pub mod stats;
pub mod undo;

pub use undo::LastAction;

use crate::error::{SessionError, SessionResult};
use crate::types::{
    Card, CardStatus, CompletionSummary, EarlyExitMode, Outcome, Phase, Progress, RoundEnd,
    RoundMode, RoundSummary,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// State of one learner's study session.
///
/// Commands take `&mut self` and either apply fully or return an error with
/// the session untouched. Callers sharing a session across threads must
/// serialize access themselves.
#[derive(Debug, Clone)]
pub struct StudySession {
    phase: Phase,
    shuffle: bool,
    cards: Vec<Card>,
    deck: Vec<Card>,
    cursor: usize,
    mastered: Vec<Card>,
    not_mastered: Vec<Card>,
    set_aside: Vec<Card>,
    round: u32,
    last_action: Option<LastAction>,
    rng: StdRng,
}

impl Default for StudySession {
    fn default() -> Self {
        Self::new()
    }
}

impl StudySession {
    /// Create an idle session shuffling with OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create an idle session with reproducible shuffles.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            phase: Phase::Idle,
            shuffle: false,
            cards: Vec::new(),
            deck: Vec::new(),
            cursor: 0,
            mastered: Vec::new(),
            not_mastered: Vec::new(),
            set_aside: Vec::new(),
            round: 1,
            last_action: None,
            rng,
        }
    }

    /// Begin studying `cards`, optionally in random order.
    ///
    /// `shuffle_first` is remembered and also applies when the whole session
    /// is restarted with [`EarlyExitMode::RestartAll`].
    pub fn start(&mut self, cards: Vec<Card>, shuffle_first: bool) -> SessionResult<()> {
        if self.phase == Phase::Studying {
            return Err(SessionError::invalid("start a new session", self.phase));
        }
        if cards.is_empty() {
            return Err(SessionError::EmptyDeck);
        }

        let cards: Vec<Card> = cards.into_iter().map(reset_status).collect();
        self.shuffle = shuffle_first;
        self.restart_with(cards);

        tracing::debug!(
            cards = self.cards.len(),
            shuffled = shuffle_first,
            "study session started"
        );
        Ok(())
    }

    /// Card waiting to be classified.
    ///
    /// `Ok(None)` means the round boundary has been reached and the caller
    /// should close the round with [`StudySession::end_round`].
    pub fn current_card(&self) -> SessionResult<Option<&Card>> {
        self.require(Phase::Studying, "show a card")?;
        Ok(self.deck.get(self.cursor))
    }

    /// Record the learner's verdict on the current card and move on.
    pub fn classify(&mut self, outcome: Outcome) -> SessionResult<()> {
        self.require(Phase::Studying, "classify a card")?;
        let Some(card) = self.deck.get_mut(self.cursor) else {
            return Err(SessionError::invalid(
                "classify past the end of the round",
                self.phase,
            ));
        };

        card.status = outcome.status();
        let card = card.clone();
        let card_id = card.id;
        match outcome {
            Outcome::Mastered => self.mastered.push(card),
            Outcome::NotMastered => self.not_mastered.push(card),
        }
        self.last_action = Some(LastAction { card_id, outcome });
        self.cursor += 1;

        tracing::debug!(card_id, outcome = outcome.as_str(), "card classified");
        Ok(())
    }

    /// Reorder the cards not yet shown this round.
    pub fn shuffle(&mut self) -> SessionResult<()> {
        self.require(Phase::Studying, "shuffle")?;
        self.deck[self.cursor..].shuffle(&mut self.rng);
        Ok(())
    }

    /// Close the round once every card in the deck has been classified.
    pub fn end_round(&mut self) -> SessionResult<RoundEnd> {
        self.require(Phase::Studying, "end the round")?;
        if self.cursor < self.deck.len() {
            return Err(SessionError::invalid(
                "end the round before every card is classified",
                self.phase,
            ));
        }

        if self.not_mastered.is_empty() {
            self.phase = Phase::SessionComplete;
            let summary = self.completion_summary();
            tracing::debug!(
                round = self.round,
                efficiency = summary.efficiency,
                "study session complete"
            );
            Ok(RoundEnd::SessionComplete(summary))
        } else {
            self.phase = Phase::RoundComplete;
            let summary = self.round_summary_now();
            tracing::debug!(
                round = self.round,
                accuracy = summary.accuracy,
                "round complete"
            );
            Ok(RoundEnd::RoundComplete(summary))
        }
    }

    /// Start the next round from a completed one.
    pub fn start_next_round(&mut self, mode: RoundMode) -> SessionResult<()> {
        self.require(Phase::RoundComplete, "start the next round")?;
        self.requeue(mode);
        Ok(())
    }

    /// Leave the current round before it is finished.
    pub fn end_early(&mut self, mode: EarlyExitMode) -> SessionResult<()> {
        self.require(Phase::Studying, "end the round early")?;

        match mode {
            EarlyExitMode::RestartAll => {
                let cards = std::mem::take(&mut self.cards);
                self.restart_with(cards);
                tracing::debug!("study session restarted from round 1");
            }
            EarlyExitMode::StudyNotMastered => {
                if self.not_mastered.is_empty() {
                    return Err(SessionError::invalid(
                        "study not-mastered cards before any were missed",
                        self.phase,
                    ));
                }
                let unseen = self.deck.split_off(self.cursor);
                self.set_aside.extend(unseen);
                self.requeue(RoundMode::NotMasteredOnly);
            }
            EarlyExitMode::BackToInput => self.restart(),
        }
        Ok(())
    }

    /// Discard the session and return to the input stage.
    pub fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Self::with_rng(rng);
        tracing::debug!("study session reset");
    }

    /// Counts for the current round. Never mutates.
    pub fn progress(&self) -> Progress {
        let completed = self.mastered.len() + self.not_mastered.len();
        Progress {
            completed,
            total: completed + self.remaining(),
            mastered_count: self.mastered.len(),
            not_mastered_count: self.not_mastered.len(),
            round: self.round,
        }
    }

    /// Statistics of the round just closed, while the learner decides what
    /// to study next.
    pub fn round_summary(&self) -> Option<RoundSummary> {
        (self.phase == Phase::RoundComplete).then(|| self.round_summary_now())
    }

    /// Final statistics once the session is complete.
    pub fn completion(&self) -> Option<CompletionSummary> {
        (self.phase == Phase::SessionComplete).then(|| self.completion_summary())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whether `start` asked for a shuffled deck.
    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    /// Every card of the session in input order, all with status `New`.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards of the current round not yet shown.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.deck[self.cursor..]
    }

    pub fn mastered(&self) -> &[Card] {
        &self.mastered
    }

    pub fn not_mastered(&self) -> &[Card] {
        &self.not_mastered
    }

    /// Cards out of play: mastered in an earlier round and not requeued, or
    /// left unseen when the learner jumped to the not-mastered cards.
    pub fn set_aside(&self) -> &[Card] {
        &self.set_aside
    }

    fn remaining(&self) -> usize {
        self.deck.len() - self.cursor
    }

    fn require(&self, phase: Phase, operation: &'static str) -> SessionResult<()> {
        if self.phase != phase {
            return Err(SessionError::invalid(operation, self.phase));
        }
        Ok(())
    }

    fn restart_with(&mut self, cards: Vec<Card>) {
        self.mastered.clear();
        self.not_mastered.clear();
        self.set_aside.clear();
        self.deck = cards.clone();
        self.cards = cards;
        if self.shuffle {
            self.deck.shuffle(&mut self.rng);
        }
        self.cursor = 0;
        self.round = 1;
        self.last_action = None;
        self.phase = Phase::Studying;
    }

    fn requeue(&mut self, mode: RoundMode) {
        let deck = match mode {
            RoundMode::All => {
                let mut deck = std::mem::take(&mut self.mastered);
                deck.append(&mut self.not_mastered);
                deck
            }
            RoundMode::NotMasteredOnly => {
                self.set_aside.append(&mut self.mastered);
                std::mem::take(&mut self.not_mastered)
            }
        };

        self.deck = deck.into_iter().map(reset_status).collect();
        self.deck.shuffle(&mut self.rng);
        self.cursor = 0;
        self.round += 1;
        self.last_action = None;
        self.phase = Phase::Studying;

        tracing::debug!(round = self.round, cards = self.deck.len(), "round started");
    }

    fn round_summary_now(&self) -> RoundSummary {
        let mastered_count = self.mastered.len();
        let not_mastered_count = self.not_mastered.len();
        RoundSummary {
            round: self.round,
            total: mastered_count + not_mastered_count,
            mastered_count,
            not_mastered_count,
            accuracy: stats::accuracy(mastered_count, not_mastered_count),
        }
    }

    fn completion_summary(&self) -> CompletionSummary {
        let final_mastered_count = self.mastered.len();
        CompletionSummary {
            final_mastered_count,
            total_cards: self.cards.len(),
            round: self.round,
            efficiency: stats::efficiency(final_mastered_count, self.round),
        }
    }
}

fn reset_status(mut card: Card) -> Card {
    card.status = CardStatus::New;
    card
}
