//! One-level undo of the most recent classification.

use super::StudySession;
use crate::error::{SessionError, SessionResult};
use crate::types::{Card, CardStatus, Outcome, Phase};
use serde::{Deserialize, Serialize};

/// The classification that `undo` would revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastAction {
    pub card_id: usize,
    pub outcome: Outcome,
}

impl StudySession {
    /// Whether `undo` would currently succeed.
    pub fn can_undo(&self) -> bool {
        self.last_action.is_some()
    }

    pub fn last_action(&self) -> Option<LastAction> {
        self.last_action
    }

    /// Revert the last classification and show that card again.
    ///
    /// Also allowed once the round has been closed, in which case the session
    /// goes back to `Studying` on the card that ended the round.
    pub fn undo(&mut self) -> SessionResult<&Card> {
        let action = self.last_action.ok_or(SessionError::NothingToUndo)?;

        if self.phase == Phase::Idle || self.cursor == 0 {
            return Err(SessionError::NothingToUndo);
        }
        let previous = self.cursor - 1;
        if self.deck[previous].id != action.card_id {
            return Err(SessionError::NothingToUndo);
        }

        let pool = match action.outcome {
            Outcome::Mastered => &mut self.mastered,
            Outcome::NotMastered => &mut self.not_mastered,
        };
        let position = pool
            .iter()
            .rposition(|card| card.id == action.card_id)
            .ok_or(SessionError::NothingToUndo)?;

        pool.remove(position);
        self.cursor = previous;
        self.deck[previous].status = CardStatus::New;
        self.last_action = None;
        self.phase = Phase::Studying;

        tracing::debug!(
            card_id = action.card_id,
            outcome = action.outcome.as_str(),
            "undid classification"
        );
        Ok(&self.deck[previous])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::{cards, fingerprint, studying};
    use crate::types::RoundEnd;
    use pretty_assertions::assert_eq;

    #[test]
    fn classify_then_undo_restores_state() {
        for outcome in [Outcome::Mastered, Outcome::NotMastered] {
            let mut session = studying(4);
            session.classify(Outcome::NotMastered).unwrap();
            session.classify(Outcome::Mastered).unwrap();
            let before = fingerprint(&session);

            session.classify(outcome).unwrap();
            let restored = session.undo().unwrap().clone();

            assert_eq!(restored.status, CardStatus::New);
            assert_eq!(fingerprint(&session), before);
            assert!(!session.can_undo());
        }
    }

    #[test]
    fn undo_without_classification_is_rejected() {
        let mut session = studying(2);
        assert_eq!(session.undo(), Err(SessionError::NothingToUndo));

        let mut idle = StudySession::with_seed(1);
        assert_eq!(idle.undo(), Err(SessionError::NothingToUndo));
    }

    #[test]
    fn second_undo_is_rejected_and_changes_nothing() {
        let mut session = studying(3);
        session.classify(Outcome::Mastered).unwrap();
        session.classify(Outcome::NotMastered).unwrap();
        session.undo().unwrap();
        let before = fingerprint(&session);

        assert_eq!(session.undo(), Err(SessionError::NothingToUndo));
        assert_eq!(fingerprint(&session), before);
        assert_eq!(session.progress().completed, 1);
    }

    #[test]
    fn undo_after_closing_round_resumes_studying() {
        let mut session = studying(2);
        session.classify(Outcome::Mastered).unwrap();
        session.classify(Outcome::NotMastered).unwrap();
        assert!(matches!(session.end_round(), Ok(RoundEnd::RoundComplete(_))));

        let card_id = session.undo().unwrap().id;

        assert_eq!(session.phase(), Phase::Studying);
        assert_eq!(session.current_card().unwrap().map(|c| c.id), Some(card_id));
        assert!(session.not_mastered().is_empty());
        assert_eq!(session.round_summary(), None);
    }

    #[test]
    fn undo_after_session_complete_resumes_studying() {
        let mut session = studying(1);
        session.classify(Outcome::Mastered).unwrap();
        assert!(matches!(session.end_round(), Ok(RoundEnd::SessionComplete(_))));

        session.undo().unwrap();

        assert_eq!(session.phase(), Phase::Studying);
        assert!(session.mastered().is_empty());
        assert_eq!(session.completion(), None);
    }

    #[test]
    fn undo_is_cleared_by_next_round() {
        let mut session = studying(2);
        session.classify(Outcome::NotMastered).unwrap();
        session.classify(Outcome::NotMastered).unwrap();
        session.end_round().unwrap();
        session
            .start_next_round(crate::types::RoundMode::NotMasteredOnly)
            .unwrap();

        assert!(!session.can_undo());
        assert_eq!(session.undo(), Err(SessionError::NothingToUndo));
    }

    #[test]
    fn undo_survives_reshuffle_of_remaining_cards() {
        let mut session = studying(6);
        session.classify(Outcome::Mastered).unwrap();
        let classified = session.mastered()[0].id;

        session.shuffle().unwrap();
        let restored = session.undo().unwrap().id;

        assert_eq!(restored, classified);
        assert_eq!(session.progress().completed, 0);
    }

    #[test]
    fn undo_finds_card_by_id_in_pool() {
        let mut session = StudySession::with_seed(7);
        session.start(cards(3), false).unwrap();
        session.classify(Outcome::Mastered).unwrap();
        session.classify(Outcome::Mastered).unwrap();

        session.undo().unwrap();

        let ids: Vec<usize> = session.mastered().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0]);
        assert_eq!(session.current_card().unwrap().map(|c| c.id), Some(1));
    }
}
