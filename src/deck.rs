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

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;
use std::time::Instant;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::parser::parse_cards;
use crate::types::card::Card;
use crate::types::fingerprint::Fingerprint;

pub struct Deck {
    /// The name used for the deck's store file.
    pub name: String,
    /// The cards, in file order.
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.is_file() {
            return fail(format!("deck file {} does not exist.", path.display()));
        }
        let name = deck_name(path)?;
        let cards = {
            log::debug!("Loading deck...");
            let start = Instant::now();
            let content = read_to_string(path)?;
            let cards = parse_cards(&content);
            let end = Instant::now();
            let duration = end.duration_since(start).as_millis();
            log::debug!("Loaded {} cards in {duration}ms.", cards.len());
            cards
        };
        for (fingerprint, count) in duplicates(&cards) {
            log::warn!("Card {fingerprint} appears {count} times and will be reviewed as one.");
        }
        Ok(Self { name, cards })
    }
}

/// The file name up to its first dot: `spanish.verbs.md` is `spanish`.
pub fn deck_name(path: &Path) -> Fallible<String> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ErrorReport::new("invalid path"))?;
    let name = file_name.split('.').next().unwrap_or_default();
    if name.is_empty() {
        return fail(format!("cannot derive a deck name from {file_name:?}."));
    }
    Ok(name.to_string())
}

/// Fingerprints shared by more than one card, with their counts, in order
/// of first appearance.
pub fn duplicates(cards: &[Card]) -> Vec<(Fingerprint, usize)> {
    let mut counts: HashMap<Fingerprint, usize> = HashMap::new();
    for card in cards {
        *counts.entry(card.fingerprint()).or_default() += 1;
    }
    let mut result = Vec::new();
    for card in cards {
        if let Some(count) = counts.remove(&card.fingerprint()) {
            if count > 1 {
                result.push((card.fingerprint(), count));
            }
        }
    }
    result
}
