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

use std::collections::HashSet;
use std::path::Path;

use crate::config::Config;
use crate::deck::Deck;
use crate::error::Fallible;
use crate::store::FingerprintStore;
use crate::store::open_store;
use crate::types::card::Card;
use crate::types::fingerprint::Fingerprint;

pub fn list_orphans(config: &Config, file: &Path) -> Fallible<()> {
    let deck = Deck::load(file)?;
    let store = open_store(&config.data_dir, &deck.name, config.backend)?;
    for fingerprint in get_orphans(&deck.cards, &store)? {
        println!("{fingerprint}");
    }
    Ok(())
}

/// Fingerprints with a stored record but no card in the deck, in store
/// order. These are cards whose text was edited or deleted.
pub fn get_orphans<S: FingerprintStore + ?Sized>(
    cards: &[Card],
    store: &S,
) -> Fallible<Vec<Fingerprint>> {
    let deck_fingerprints: HashSet<Fingerprint> =
        cards.iter().map(|card| card.fingerprint()).collect();
    Ok(store
        .all()?
        .into_iter()
        .map(|record| record.fingerprint)
        .filter(|fingerprint| !deck_fingerprints.contains(fingerprint))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sm2::Quality;
    use crate::sm2::first_review;
    use crate::store::memory::MemoryStore;

    #[test]
    fn test_orphans() -> Fallible<()> {
        let cards = vec![Card::new("2+2", "4")];
        let edited = Card::new("2+2", "four");
        let deleted = Card::new("1+1", "2");
        let mut store = MemoryStore::new();
        let quality = Quality::new(4)?;
        store.upsert(&first_review(edited.fingerprint(), quality))?;
        store.upsert(&first_review(cards[0].fingerprint(), quality))?;
        store.upsert(&first_review(deleted.fingerprint(), quality))?;
        assert_eq!(
            get_orphans(&cards, &store)?,
            vec![edited.fingerprint(), deleted.fingerprint()]
        );
        Ok(())
    }
}
