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

//! The SM-2 scheduling algorithm.
//!
//! Ratings use the literal SM-2 scale: 0 to 5, where 0-2 is a failed recall
//! and 3-5 a successful one. The scheduler is pure: it maps a prior record
//! and a rating to a new record and never touches the store.

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::fingerprint::Fingerprint;
use crate::types::record::MemoryRecord;

pub type Easiness = f64;

pub type Interval = u32;

/// The easiness every card starts from.
pub const INITIAL_EASINESS: Easiness = 2.5;

/// Easiness never drops below this.
pub const MIN_EASINESS: Easiness = 1.3;

/// The interval after the first pass, and after any failure.
pub const FIRST_INTERVAL: Interval = 1;

/// The interval after the second consecutive pass.
pub const SECOND_INTERVAL: Interval = 6;

/// The lowest quality that counts as a successful recall.
pub const PASS_THRESHOLD: u8 = 3;

/// The highest quality.
pub const MAX_QUALITY: u8 = 5;

/// A validated recall quality in `0..=5`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Fallible<Self> {
        if value > MAX_QUALITY {
            return Err(ErrorReport::invalid_rating(format!(
                "rating {value} is out of range, expected 0 to {MAX_QUALITY}."
            )));
        }
        Ok(Self(value))
    }

    /// Parse a rating typed by the user.
    pub fn parse(input: &str) -> Fallible<Self> {
        let input = input.trim();
        match input.parse::<u8>() {
            Ok(value) => Self::new(value),
            Err(_) => Err(ErrorReport::invalid_rating(format!(
                "{input:?} is not a rating, expected 0 to {MAX_QUALITY}."
            ))),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn passed(self) -> bool {
        self.0 >= PASS_THRESHOLD
    }
}

pub fn new_easiness(easiness: Easiness, quality: Quality) -> Easiness {
    let d = (MAX_QUALITY - quality.value()) as f64;
    let easiness = easiness + (0.1 - d * (0.08 + d * 0.02));
    easiness.max(MIN_EASINESS)
}

/// Schedule a card that has never been rated.
pub fn first_review(fingerprint: Fingerprint, quality: Quality) -> MemoryRecord {
    MemoryRecord {
        fingerprint,
        easiness: new_easiness(INITIAL_EASINESS, quality),
        interval: FIRST_INTERVAL,
        repetitions: 1,
    }
}

/// Schedule a card from its previous record.
pub fn review(prior: &MemoryRecord, quality: Quality) -> MemoryRecord {
    let easiness = new_easiness(prior.easiness, quality);
    let (interval, repetitions) = if quality.passed() {
        let repetitions = prior.repetitions.saturating_add(1);
        let interval = match repetitions {
            1 => FIRST_INTERVAL,
            2 => SECOND_INTERVAL,
            // Float-to-int `as` saturates.
            _ => (prior.interval as f64 * easiness).round() as Interval,
        };
        (interval, repetitions)
    } else {
        (FIRST_INTERVAL, 0)
    };
    MemoryRecord {
        fingerprint: prior.fingerprint,
        easiness,
        interval,
        repetitions,
    }
}

pub fn update(
    prior: Option<&MemoryRecord>,
    fingerprint: Fingerprint,
    quality: Quality,
) -> MemoryRecord {
    match prior {
        Some(prior) => review(prior, quality),
        None => first_review(fingerprint, quality),
    }
}
