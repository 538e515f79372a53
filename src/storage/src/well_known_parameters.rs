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

//! Typed optional query parameters.
//!
//! Each type in this module represents one optional query parameter accepted
//! by some storage operations. A parameter created with `Default::default()`
//! has no value, and is not included in the request.
//!
//! The set of parameters accepted by each request is checked at compile time,
//! see [GenericRequest][crate::generic_request::GenericRequest].
//!
//! # Example
//! ```
//! # use storage_raw_client::well_known_parameters::*;
//! let p = MaxResults::new(10);
//! assert_eq!(p.format().as_deref(), Some("10"));
//! assert_eq!(MaxResults::name(), "maxResults");
//! assert!(MaxResults::default().format().is_none());
//! ```

/// The kind of a well-known parameter.
///
/// The declaration order is the order used to serialize the parameters in the
/// query string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum ParameterKind {
    Generation,
    IfGenerationMatch,
    IfGenerationNotMatch,
    IfMetagenerationMatch,
    IfMetagenerationNotMatch,
    ContentEncoding,
    PredefinedAcl,
    MaxResults,
    Prefix,
    Projection,
    Versions,
    UserProject,
}

impl ParameterKind {
    /// The query parameter name.
    pub fn query_key(&self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::IfGenerationMatch => "ifGenerationMatch",
            Self::IfGenerationNotMatch => "ifGenerationNotMatch",
            Self::IfMetagenerationMatch => "ifMetagenerationMatch",
            Self::IfMetagenerationNotMatch => "ifMetagenerationNotMatch",
            Self::ContentEncoding => "contentEncoding",
            Self::PredefinedAcl => "predefinedAcl",
            Self::MaxResults => "maxResults",
            Self::Prefix => "prefix",
            Self::Projection => "projection",
            Self::Versions => "versions",
            Self::UserProject => "userProject",
        }
    }
}

impl std::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.query_key())
    }
}

/// Implemented by all the typed parameters.
pub trait WellKnownParameter: Clone + std::fmt::Debug + Default + Send + Sync + 'static {
    /// The kind of parameter, which determines its query key.
    const KIND: ParameterKind;

    /// The canonical text for the value, or `None` if the parameter is absent.
    fn format(&self) -> Option<String>;

    /// The query key for this parameter.
    fn name() -> &'static str {
        Self::KIND.query_key()
    }
}

macro_rules! well_known_parameter {
    ($(#[$meta:meta])* $name:ident($t:ty)) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $name(Option<$t>);

        impl $name {
            /// Creates a parameter with the given value.
            pub fn new<V: Into<$t>>(v: V) -> Self {
                Self(Some(v.into()))
            }

            /// The value, if present.
            pub fn value(&self) -> Option<&$t> {
                self.0.as_ref()
            }

            /// Returns true if the parameter has a value.
            pub fn has_value(&self) -> bool {
                self.0.is_some()
            }
        }

        impl WellKnownParameter for $name {
            const KIND: ParameterKind = ParameterKind::$name;

            fn format(&self) -> Option<String> {
                gax::query_parameter::format(&self.0)
            }
        }
    };
}

well_known_parameter!(
    /// Selects a specific revision of an object, instead of the latest one.
    Generation(i64)
);
well_known_parameter!(
    /// Makes the operation conditional on the object's current generation
    /// matching the given value. Use `0` to require that no live object exists.
    IfGenerationMatch(i64)
);
well_known_parameter!(
    /// Makes the operation conditional on the object's current generation not
    /// matching the given value.
    IfGenerationNotMatch(i64)
);
well_known_parameter!(
    /// Makes the operation conditional on the current metageneration matching
    /// the given value.
    IfMetagenerationMatch(i64)
);
well_known_parameter!(
    /// Makes the operation conditional on the current metageneration not
    /// matching the given value.
    IfMetagenerationNotMatch(i64)
);
well_known_parameter!(
    /// Sets the `contentEncoding` metadata of uploaded objects, e.g. `gzip`.
    ContentEncoding(String)
);
well_known_parameter!(
    /// Applies a predefined set of access controls to new objects.
    PredefinedAcl(String)
);
well_known_parameter!(
    /// The maximum number of items returned in a single page.
    MaxResults(i64)
);
well_known_parameter!(
    /// Filters the results to names starting with this prefix.
    Prefix(String)
);
well_known_parameter!(
    /// Controls which properties are included in the response.
    Projection(String)
);
well_known_parameter!(
    /// If true, list all the versions of each object.
    Versions(bool)
);
well_known_parameter!(
    /// The project to be billed for this request, used with requester pays
    /// buckets.
    UserProject(String)
);

impl PredefinedAcl {
    pub fn authenticated_read() -> Self {
        Self::new("authenticatedRead")
    }
    pub fn bucket_owner_full_control() -> Self {
        Self::new("bucketOwnerFullControl")
    }
    pub fn bucket_owner_read() -> Self {
        Self::new("bucketOwnerRead")
    }
    pub fn private() -> Self {
        Self::new("private")
    }
    pub fn project_private() -> Self {
        Self::new("projectPrivate")
    }
    pub fn public_read() -> Self {
        Self::new("publicRead")
    }
}

impl Projection {
    /// Include all properties.
    pub fn full() -> Self {
        Self::new("full")
    }
    /// Omit the `owner` and `acl` properties.
    pub fn no_acl() -> Self {
        Self::new("noAcl")
    }
}
