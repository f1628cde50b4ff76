// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Composite face identifier
///
/// `state_id` is metadata (phase, registration, calculation); identity is
/// `(object_id, face_id, part_id)` only.
#[derive(Debug, Clone)]
pub struct Id {
    state_id: String,
    object_id: String,
    face_id: String,
    part_id: i32,
}

impl Id {
    /// Build from a raw face id; a numeric suffix after the last `_`
    /// becomes the part id.
    pub fn new(state_id: impl Into<String>, object_id: impl Into<String>, face_id_raw: &str) -> Self {
        let (face_id, part_id) = match face_id_raw.rsplit_once('_') {
            Some((face, part)) => match part.parse::<i32>() {
                Ok(part) => (face, part),
                Err(_) => (face_id_raw, 0),
            },
            None => (face_id_raw, 0),
        };
        Self::with_part(state_id, object_id, face_id, part_id)
    }

    pub fn with_part(
        state_id: impl Into<String>,
        object_id: impl Into<String>,
        face_id: impl Into<String>,
        part_id: i32,
    ) -> Self {
        Self {
            state_id: state_id.into(),
            object_id: object_id.into(),
            face_id: face_id.into(),
            part_id,
        }
    }

    pub fn state_id(&self) -> &str {
        &self.state_id
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn face_id(&self) -> &str {
        &self.face_id
    }

    pub fn part_id(&self) -> i32 {
        self.part_id
    }

    /// State in which the object was created (`created|demolished`)
    pub fn created_id(&self) -> &str {
        self.state_id
            .split_once('|')
            .map_or(self.state_id.as_str(), |(created, _)| created)
    }

    /// State in which the object was demolished, if any
    pub fn demolished_id(&self) -> Option<&str> {
        self.state_id.split_once('|').map(|(_, demolished)| demolished)
    }

    /// Face id as written: `face` or `face_part`
    pub fn raw_face_id(&self) -> String {
        if self.part_id == 0 {
            self.face_id.clone()
        } else {
            format!("{}_{}", self.face_id, self.part_id)
        }
    }

    fn key(&self) -> (&str, &str, i32) {
        (self.object_id.as_str(), self.face_id.as_str(), self.part_id)
    }
}

impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Id {}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// `state;object;face[_part]`
impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{};{}", self.state_id, self.object_id, self.face_id)?;
        if self.part_id != 0 {
            write!(f, "_{}", self.part_id)?;
        }
        Ok(())
    }
}
