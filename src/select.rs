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

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::FingerprintStore;
use crate::types::card::Card;
use crate::types::fingerprint::Fingerprint;

/// Pick the index of the next card to drill.
///
/// Cards that have never been rated come first, in file order. Once every
/// card has a record, the card with the lowest easiness is picked, ties
/// going to the record the store lists first. There is no notion of a card
/// being due: the weakest card is always next, even if it was just rated.
pub fn select_card<S: FingerprintStore + ?Sized>(cards: &[Card], store: &S) -> Fallible<usize> {
    if cards.is_empty() {
        return fail("no cards in deck.");
    }
    for (index, card) in cards.iter().enumerate() {
        if store.lookup(card.fingerprint())?.is_none() {
            return Ok(index);
        }
    }
    // Records for cards no longer in the deck are ignored.
    let in_deck: HashSet<Fingerprint> = cards.iter().map(|card| card.fingerprint()).collect();
    let mut weakest = None;
    for record in store.all()? {
        if !in_deck.contains(&record.fingerprint) {
            continue;
        }
        weakest = match weakest {
            Some((_, easiness)) if easiness <= record.easiness => weakest,
            _ => Some((record.fingerprint, record.easiness)),
        };
    }
    let (fingerprint, _) = weakest.ok_or_else(|| {
        ErrorReport::corrupt_record("store has no records for a fully reviewed deck")
    })?;
    cards
        .iter()
        .position(|card| card.fingerprint() == fingerprint)
        .ok_or_else(|| ErrorReport::new("selected card is not in the deck"))
}
