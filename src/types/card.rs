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

use crate::types::fingerprint::Fingerprint;

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    /// The text shown when drilling.
    question: String,
    /// The text revealed on request.
    answer: String,
    /// The cached fingerprint of the question and answer.
    fingerprint: Fingerprint,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let question = question.into().trim().to_string();
        let answer = answer.into().trim().to_string();
        let fingerprint = Fingerprint::of(&question, &answer);
        Self {
            question,
            answer,
            fingerprint,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }
}
