// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The resources returned by the storage service.
//!
//! See <https://cloud.google.com/storage/docs/json_api/v1> for the API
//! reference. Fields missing in the JSON payload take their default values.
//! Timestamps are kept in their RFC 3339 string format.

use std::collections::HashMap;

/// The metadata for a bucket.
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BucketMetadata {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub etag: String,
    pub location: String,
    pub location_type: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub metageneration: i64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub project_number: i64,
    pub self_link: String,
    pub storage_class: String,
    pub time_created: String,
    pub updated: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub acl: Vec<BucketAccessControl>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub default_object_acl: Vec<ObjectAccessControl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versioning: Option<Versioning>,
}

impl BucketMetadata {
    pub fn set_name<V: Into<String>>(mut self, v: V) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_location<V: Into<String>>(mut self, v: V) -> Self {
        self.location = v.into();
        self
    }

    pub fn set_metageneration<V: Into<i64>>(mut self, v: V) -> Self {
        self.metageneration = v.into();
        self
    }
}

/// The versioning configuration of a bucket.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Versioning {
    pub enabled: bool,
}

/// The owner of a bucket or object.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Owner {
    pub entity: String,
    pub entity_id: String,
}

/// The project team associated with an access control entity.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ProjectTeam {
    pub project_number: String,
    pub team: String,
}

/// An access control entry for a bucket.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BucketAccessControl {
    pub id: String,
    pub kind: String,
    pub bucket: String,
    pub entity: String,
    pub entity_id: String,
    pub role: String,
    pub email: String,
    pub domain: String,
    pub etag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_team: Option<ProjectTeam>,
}

/// The metadata for an object.
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ObjectMetadata {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub bucket: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub generation: i64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub metageneration: i64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub size: u64,
    pub content_type: String,
    pub content_encoding: String,
    pub content_disposition: String,
    pub content_language: String,
    pub cache_control: String,
    pub storage_class: String,
    pub etag: String,
    pub crc32c: String,
    pub md5_hash: String,
    pub media_link: String,
    pub self_link: String,
    pub time_created: String,
    pub updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_deleted: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub acl: Vec<ObjectAccessControl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl ObjectMetadata {
    pub fn set_name<V: Into<String>>(mut self, v: V) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_bucket<V: Into<String>>(mut self, v: V) -> Self {
        self.bucket = v.into();
        self
    }

    pub fn set_generation<V: Into<i64>>(mut self, v: V) -> Self {
        self.generation = v.into();
        self
    }

    pub fn set_size<V: Into<u64>>(mut self, v: V) -> Self {
        self.size = v.into();
        self
    }
}

/// An access control entry for an object.
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ObjectAccessControl {
    pub id: String,
    pub kind: String,
    pub bucket: String,
    pub object: String,
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,
    /// The entity holding the permission, for example `user-liz@example.com`,
    /// `group-example@googlegroups.com`, `domain-example.com`,
    /// `project-team-projectId`, `allUsers` or `allAuthenticatedUsers`.
    pub entity: String,
    pub entity_id: String,
    /// The access permission for the entity, `OWNER` or `READER`.
    pub role: String,
    pub email: String,
    pub domain: String,
    pub etag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_team: Option<ProjectTeam>,
}

impl ObjectAccessControl {
    pub fn set_entity<V: Into<String>>(mut self, v: V) -> Self {
        self.entity = v.into();
        self
    }

    pub fn set_role<V: Into<String>>(mut self, v: V) -> Self {
        self.role = v.into();
        self
    }
}
