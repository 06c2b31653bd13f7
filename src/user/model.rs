use std::collections::HashMap;

use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};

use super::Id;

/// Allow-listed user fields embedded into message and thread responses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MiniProfile {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar_source: String,
    #[serde(default)]
    pub avatar_uploaded: bool,
}

/// Mini-profiles keyed by user id.
#[derive(Default)]
pub struct Profiles(HashMap<Id, MiniProfile>);

impl Profiles {
    pub fn get(&self, id: &Id) -> Option<&MiniProfile> {
        self.0.get(id)
    }

    pub fn require(&self, id: &Id) -> super::Result<MiniProfile> {
        self.get(id).cloned().ok_or(super::Error::NotFound(*id))
    }
}

impl FromIterator<MiniProfile> for Profiles {
    fn from_iter<I: IntoIterator<Item = MiniProfile>>(iter: I) -> Self {
        Self(iter.into_iter().map(|p| (p.id, p)).collect())
    }
}
