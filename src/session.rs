// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::Fallible;
use crate::select::select_card;
use crate::sm2;
use crate::sm2::Quality;
use crate::store::FingerprintStore;
use crate::types::card::Card;
use crate::types::record::MemoryRecord;

/// A drill session: a card is always on display, waiting for a rating.
pub struct Session<S: FingerprintStore> {
    cards: Vec<Card>,
    store: S,
    /// Index into `cards` of the card on display.
    current: usize,
}

impl<S: FingerprintStore> Session<S> {
    pub fn new(cards: Vec<Card>, store: S) -> Fallible<Self> {
        let current = select_card(&cards, &store)?;
        Ok(Self {
            cards,
            store,
            current,
        })
    }

    pub fn current(&self) -> &Card {
        &self.cards[self.current]
    }

    /// Rate the current card, save its new record, and move on to the next
    /// card. If saving fails the current card stays on display.
    pub fn rate(&mut self, quality: Quality) -> Fallible<MemoryRecord> {
        let fingerprint = self.current().fingerprint();
        let prior = self.store.lookup(fingerprint)?;
        let record = sm2::update(prior.as_ref(), fingerprint, quality);
        self.store.upsert(&record)?;
        self.current = select_card(&self.cards, &self.store)?;
        Ok(record)
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::error::ErrorReport;
    use crate::sm2::INITIAL_EASINESS;
    use crate::sm2::new_easiness;
    use crate::store::memory::MemoryStore;
    use crate::types::fingerprint::Fingerprint;

    fn q(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    #[test]
    fn test_empty_deck() {
        assert!(Session::new(Vec::new(), MemoryStore::new()).is_err());
    }

    #[test]
    fn test_walks_unseen_cards_then_weakest() -> Fallible<()> {
        let cards = vec![Card::new("A", "1"), Card::new("B", "2"), Card::new("C", "3")];
        let mut session = Session::new(cards, MemoryStore::new())?;
        assert_eq!(session.current().question(), "A");
        session.rate(q(5))?;
        assert_eq!(session.current().question(), "B");
        session.rate(q(0))?;
        assert_eq!(session.current().question(), "C");
        session.rate(q(4))?;
        // B failed and is the weakest.
        assert_eq!(session.current().question(), "B");
        session.rate(q(0))?;
        // Still the weakest, so shown again straight away.
        assert_eq!(session.current().question(), "B");
        Ok(())
    }

    #[test]
    fn test_single_card_end_to_end() -> Fallible<()> {
        let cards = vec![Card::new("2+2", "4")];
        let mut session = Session::new(cards, MemoryStore::new())?;
        let first = session.rate(q(4))?;
        assert_eq!(first.repetitions, 1);
        assert_eq!(first.interval, 1);
        assert_eq!(first.easiness, new_easiness(INITIAL_EASINESS, q(4)));
        let second = session.rate(q(4))?;
        assert_eq!(second.repetitions, 2);
        assert_eq!(second.interval, 6);
        assert_eq!(second.easiness, new_easiness(first.easiness, q(4)));
        let store = session.into_store();
        assert_eq!(store.lookup(Fingerprint::of("2+2", "4"))?, Some(second));
        Ok(())
    }

    struct FailingStore;

    impl FingerprintStore for FailingStore {
        fn lookup(&self, _fingerprint: Fingerprint) -> Fallible<Option<MemoryRecord>> {
            Ok(None)
        }

        fn upsert(&mut self, _record: &MemoryRecord) -> Fallible<()> {
            Err(ErrorReport::storage_unavailable("read-only"))
        }

        fn all(&self) -> Fallible<Vec<MemoryRecord>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_storage_failure_keeps_current_card() -> Fallible<()> {
        let cards = vec![Card::new("A", "1"), Card::new("B", "2")];
        let mut session = Session::new(cards, FailingStore)?;
        let err = session.rate(q(5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
        assert_eq!(session.current().question(), "A");
        Ok(())
    }
}
