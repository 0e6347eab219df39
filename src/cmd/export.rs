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

use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::deck::Deck;
use crate::error::Fallible;
use crate::sm2::Easiness;
use crate::sm2::Interval;
use crate::store::FingerprintStore;
use crate::store::open_store;
use crate::types::card::Card;
use crate::types::fingerprint::Fingerprint;

pub fn export_deck(config: &Config, file: &Path) -> Fallible<()> {
    let deck = Deck::load(file)?;
    let store = open_store(&config.data_dir, &deck.name, config.backend)?;
    let export = get_export(&deck.cards, &store)?;
    let json = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardExport {
    fingerprint: Fingerprint,
    question: String,
    answer: String,
    record: Option<RecordExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordExport {
    easiness: Easiness,
    interval: Interval,
    repetitions: u32,
}

pub fn get_export<S: FingerprintStore + ?Sized>(
    cards: &[Card],
    store: &S,
) -> Fallible<Vec<CardExport>> {
    let mut export = Vec::with_capacity(cards.len());
    for card in cards {
        let record = store.lookup(card.fingerprint())?.map(|r| RecordExport {
            easiness: r.easiness,
            interval: r.interval,
            repetitions: r.repetitions,
        });
        export.push(CardExport {
            fingerprint: card.fingerprint(),
            question: card.question().to_string(),
            answer: card.answer().to_string(),
            record,
        });
    }
    Ok(export)
}
