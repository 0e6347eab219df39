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

use serde::Serialize;

use crate::config::Config;
use crate::deck::Deck;
use crate::error::Fallible;
use crate::store::FingerprintStore;
use crate::store::open_store;
use crate::types::card::Card;
use crate::types::fingerprint::Fingerprint;

pub fn print_deck_stats(config: &Config, file: &Path) -> Fallible<()> {
    let deck = Deck::load(file)?;
    let store = open_store(&config.data_dir, &deck.name, config.backend)?;
    let stats = get_stats(&deck.cards, &store)?;
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{stats_json}");
    Ok(())
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    cards_in_deck_count: usize,
    distinct_card_count: usize,
    reviewed_count: usize,
    unseen_count: usize,
    mean_easiness: Option<f64>,
    weakest_question: Option<String>,
}

pub fn get_stats<S: FingerprintStore + ?Sized>(cards: &[Card], store: &S) -> Fallible<Stats> {
    let in_deck: HashSet<Fingerprint> = cards.iter().map(|card| card.fingerprint()).collect();
    let records: Vec<_> = store
        .all()?
        .into_iter()
        .filter(|record| in_deck.contains(&record.fingerprint))
        .collect();
    let mean_easiness = if records.is_empty() {
        None
    } else {
        Some(records.iter().map(|r| r.easiness).sum::<f64>() / records.len() as f64)
    };
    let mut weakest = None;
    for record in &records {
        weakest = match weakest {
            Some((_, easiness)) if easiness <= record.easiness => weakest,
            _ => Some((record.fingerprint, record.easiness)),
        };
    }
    let weakest_question = weakest.and_then(|(fingerprint, _)| {
        cards
            .iter()
            .find(|card| card.fingerprint() == fingerprint)
            .map(|card| card.question().to_string())
    });
    Ok(Stats {
        cards_in_deck_count: cards.len(),
        distinct_card_count: in_deck.len(),
        reviewed_count: records.len(),
        unseen_count: in_deck.len() - records.len(),
        mean_easiness,
        weakest_question,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::types::record::MemoryRecord;

    fn record(card: &Card, easiness: f64) -> MemoryRecord {
        MemoryRecord {
            fingerprint: card.fingerprint(),
            easiness,
            interval: 1,
            repetitions: 1,
        }
    }

    #[test]
    fn test_unreviewed_deck() -> Fallible<()> {
        let cards = vec![Card::new("a", "1"), Card::new("b", "2"), Card::new("a", "1")];
        let stats = get_stats(&cards, &MemoryStore::new())?;
        assert_eq!(
            stats,
            Stats {
                cards_in_deck_count: 3,
                distinct_card_count: 2,
                reviewed_count: 0,
                unseen_count: 2,
                mean_easiness: None,
                weakest_question: None,
            }
        );
        Ok(())
    }

    #[test]
    fn test_partially_reviewed_deck() -> Fallible<()> {
        let cards = vec![Card::new("a", "1"), Card::new("b", "2"), Card::new("c", "3")];
        let mut store = MemoryStore::new();
        store.upsert(&record(&cards[0], 2.5))?;
        store.upsert(&record(&cards[2], 1.5))?;
        store.upsert(&record(&Card::new("gone", "x"), 1.3))?;
        let stats = get_stats(&cards, &store)?;
        assert_eq!(stats.reviewed_count, 2);
        assert_eq!(stats.unseen_count, 1);
        assert_eq!(stats.mean_easiness, Some(2.0));
        assert_eq!(stats.weakest_question, Some("c".to_string()));
        Ok(())
    }

    #[test]
    fn test_json_field_names() -> Fallible<()> {
        let cards = vec![Card::new("a", "1")];
        let stats = get_stats(&cards, &MemoryStore::new())?;
        let json = serde_json::to_string(&stats)?;
        assert!(json.contains("\"cardsInDeckCount\":1"));
        assert!(json.contains("\"unseenCount\":1"));
        Ok(())
    }
}
