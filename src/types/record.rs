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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::sm2::Easiness;
use crate::sm2::Interval;
use crate::sm2::MIN_EASINESS;
use crate::types::fingerprint::Fingerprint;

/// Review statistics for a card that has been rated at least once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryRecord {
    /// The fingerprint of the card this record belongs to.
    pub fingerprint: Fingerprint,
    /// The SM-2 easiness factor.
    pub easiness: Easiness,
    /// The current spacing, in repetition units.
    pub interval: Interval,
    /// The number of consecutive passing reviews.
    pub repetitions: u32,
}

impl MemoryRecord {
    /// Checks the invariants a stored record must satisfy before the
    /// scheduler may use it.
    pub fn validate(self) -> Fallible<Self> {
        if !self.easiness.is_finite() || self.easiness < MIN_EASINESS {
            return Err(ErrorReport::corrupt_record(format!(
                "record {} has invalid easiness {}",
                self.fingerprint, self.easiness
            )));
        }
        if self.interval == 0 {
            return Err(ErrorReport::corrupt_record(format!(
                "record {} has a zero interval",
                self.fingerprint
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn record(easiness: f64) -> MemoryRecord {
        MemoryRecord {
            fingerprint: Fingerprint::of("q", "a"),
            easiness,
            interval: 1,
            repetitions: 1,
        }
    }

    #[test]
    fn test_validate() {
        assert!(record(2.5).validate().is_ok());
        assert!(record(MIN_EASINESS).validate().is_ok());
        for bad in [1.2, f64::NAN, f64::INFINITY, -3.0] {
            let err = record(bad).validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CorruptRecord);
        }
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let stuck = MemoryRecord {
            interval: 0,
            repetitions: 4,
            ..record(2.5)
        };
        let err = stuck.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptRecord);
    }

    #[test]
    fn test_deserialize_rejects_missing_field() {
        let fp = Fingerprint::of("q", "a");
        let json = format!(r#"{{"fingerprint": "{fp}", "easiness": 2.5, "interval": 1}}"#);
        let result: Result<MemoryRecord, _> = serde_json::from_str(&json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_negative_interval() {
        let fp = Fingerprint::of("q", "a");
        let json = format!(
            r#"{{"fingerprint": "{fp}", "easiness": 2.5, "interval": -1, "repetitions": 0}}"#
        );
        let result: Result<MemoryRecord, _> = serde_json::from_str(&json);
        assert!(result.is_err());
    }
}
