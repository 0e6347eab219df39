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

use crate::deck::Deck;
use crate::deck::duplicates;
use crate::error::Fallible;
use crate::error::fail;

pub fn check_deck(file: &Path) -> Fallible<()> {
    let deck = Deck::load(file)?;
    if deck.cards.is_empty() {
        return fail("no cards in deck.");
    }
    for (fingerprint, count) in duplicates(&deck.cards) {
        println!("duplicate: {fingerprint} ({count} cards)");
    }
    println!("ok");
    Ok(())
}
