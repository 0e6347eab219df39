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

use crate::types::card::Card;

enum State {
    /// Looking for the `| question | answer |` header row.
    Header,
    /// The line after the header, e.g. `|---|---|`.
    Separator,
    /// Every table row is a card, until a line that is not a row.
    Rows,
}

/// Parse the cards in the Markdown tables whose header row has `question`
/// and `answer` as its first two columns.
///
/// Text outside such tables is ignored, as are rows with an empty question
/// or answer. A line that is not a table row ends the table.
pub fn parse_cards(content: &str) -> Vec<Card> {
    let mut cards = Vec::new();
    let mut state = State::Header;
    for line in content.lines() {
        let Some((question, answer)) = split_row(line) else {
            state = State::Header;
            continue;
        };
        match state {
            State::Header => {
                if question.eq_ignore_ascii_case("question")
                    && answer.eq_ignore_ascii_case("answer")
                {
                    state = State::Separator;
                }
            }
            State::Separator => {
                state = State::Rows;
            }
            State::Rows => {
                if !question.is_empty() && !answer.is_empty() {
                    cards.push(Card::new(question, answer));
                }
            }
        }
    }
    cards
}

/// The first two cells of a table row.
fn split_row(line: &str) -> Option<(&str, &str)> {
    let mut tokens = line.split('|').map(str::trim);
    let _leading = tokens.next()?;
    let question = tokens.next()?;
    let answer = tokens.next()?;
    Some((question, answer))
}
