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

use crate::generic_request::{RequestParameters, format_request, generic_request};
use crate::model::ObjectAccessControl;

/// Lists the access control entries for an object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListObjectAclRequest {
    bucket_name: String,
    object_name: String,
    parameters: RequestParameters,
}

generic_request!(ListObjectAclRequest: Generation, UserProject);

impl ListObjectAclRequest {
    pub fn new<B: Into<String>, O: Into<String>>(bucket_name: B, object_name: O) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            parameters: RequestParameters::default(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }
}

impl std::fmt::Display for ListObjectAclRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "ListObjectAclRequest",
            &[
                ("bucket_name", &self.bucket_name),
                ("object_name", &self.object_name),
            ],
            &self.parameters,
        )
    }
}

/// The access control entries for an object. The service returns all of them
/// in a single response.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ListObjectAclResponse {
    pub items: Vec<ObjectAccessControl>,
}

crate::http_response::json_response!(ListObjectAclResponse);

/// Adds a new access control entry to an object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateObjectAclRequest {
    bucket_name: String,
    object_name: String,
    entity: String,
    role: String,
    parameters: RequestParameters,
}

generic_request!(CreateObjectAclRequest: Generation, UserProject);

impl CreateObjectAclRequest {
    pub fn new<B, O, E, R>(bucket_name: B, object_name: O, entity: E, role: R) -> Self
    where
        B: Into<String>,
        O: Into<String>,
        E: Into<String>,
        R: Into<String>,
    {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            entity: entity.into(),
            role: role.into(),
            parameters: RequestParameters::default(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

impl std::fmt::Display for CreateObjectAclRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "CreateObjectAclRequest",
            &[
                ("bucket_name", &self.bucket_name),
                ("object_name", &self.object_name),
                ("entity", &self.entity),
                ("role", &self.role),
            ],
            &self.parameters,
        )
    }
}

/// Identifies a single access control entry of an object.
///
/// Used to fetch and to delete the entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectAclRequest {
    bucket_name: String,
    object_name: String,
    entity: String,
    parameters: RequestParameters,
}

generic_request!(ObjectAclRequest: Generation, UserProject);

impl ObjectAclRequest {
    pub fn new<B, O, E>(bucket_name: B, object_name: O, entity: E) -> Self
    where
        B: Into<String>,
        O: Into<String>,
        E: Into<String>,
    {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            entity: entity.into(),
            parameters: RequestParameters::default(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }
}

impl std::fmt::Display for ObjectAclRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "ObjectAclRequest",
            &[
                ("bucket_name", &self.bucket_name),
                ("object_name", &self.object_name),
                ("entity", &self.entity),
            ],
            &self.parameters,
        )
    }
}

/// Replaces the role of an existing access control entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateObjectAclRequest {
    bucket_name: String,
    object_name: String,
    entity: String,
    role: String,
    parameters: RequestParameters,
}

generic_request!(UpdateObjectAclRequest: Generation, UserProject);

impl UpdateObjectAclRequest {
    pub fn new<B, O, E, R>(bucket_name: B, object_name: O, entity: E, role: R) -> Self
    where
        B: Into<String>,
        O: Into<String>,
        E: Into<String>,
        R: Into<String>,
    {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            entity: entity.into(),
            role: role.into(),
            parameters: RequestParameters::default(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

impl std::fmt::Display for UpdateObjectAclRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_request(
            f,
            "UpdateObjectAclRequest",
            &[
                ("bucket_name", &self.bucket_name),
                ("object_name", &self.object_name),
                ("entity", &self.entity),
                ("role", &self.role),
            ],
            &self.parameters,
        )
    }
}
