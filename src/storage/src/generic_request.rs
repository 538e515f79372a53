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

//! The building blocks shared by all the request types.
//!
//! Every request holds its mandatory fields (bucket name, object name, etc.)
//! and a [RequestParameters] with the optional, typed query parameters. The
//! parameters a request accepts are declared with [Accepts] implementations,
//! setting any other parameter fails to compile:
//!
//! ```compile_fail
//! # use storage_raw_client::generic_request::GenericRequest;
//! # use storage_raw_client::requests::ListBucketsRequest;
//! # use storage_raw_client::well_known_parameters::Generation;
//! // ListBuckets does not accept `generation`.
//! let request = ListBucketsRequest::new("my-project").set_parameter(Generation::new(7));
//! ```

use crate::well_known_parameters::{ParameterKind, WellKnownParameter};
use std::collections::BTreeMap;

/// The optional parameters of a request.
///
/// Each kind of parameter appears at most once, setting the same kind twice
/// keeps the last value. Iteration and serialization follow the
/// [ParameterKind] order, regardless of the order in which the parameters were
/// set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestParameters {
    values: BTreeMap<ParameterKind, String>,
}

impl RequestParameters {
    /// Stores (or overwrites) the value for the parameter's kind.
    ///
    /// Setting a parameter without a value removes any previous value of the
    /// same kind.
    pub fn set<P: WellKnownParameter>(&mut self, parameter: P) {
        match parameter.format() {
            Some(v) => {
                self.values.insert(P::KIND, v);
            }
            None => {
                self.values.remove(&P::KIND);
            }
        }
    }

    /// The formatted value for a given kind, if present.
    pub fn get(&self, kind: ParameterKind) -> Option<&str> {
        self.values.get(&kind).map(String::as_str)
    }

    /// Returns true if the given kind has a value.
    pub fn has(&self, kind: ParameterKind) -> bool {
        self.values.contains_key(&kind)
    }

    /// Returns true if no parameters are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The number of parameters present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over the `(key, value)` pairs of the present parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.query_key(), v.as_str()))
    }

    /// Percent-encodes the present parameters as a query string.
    ///
    /// The result does not include a leading `?`, and it is empty if no
    /// parameters are present.
    pub fn serialize_query_string(&self) -> String {
        gax::query_parameter::encode(self.iter())
    }
}

impl std::fmt::Display for RequestParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for (k, v) in self.iter() {
            write!(f, "{sep}{k}={v}")?;
            sep = ", ";
        }
        Ok(())
    }
}

/// A marker trait, implemented by requests that accept the `P` parameter.
pub trait Accepts<P: WellKnownParameter> {}

/// The behavior shared by all requests.
pub trait GenericRequest: Sized {
    /// The parameters set in this request.
    fn parameters(&self) -> &RequestParameters;

    /// Mutable access to the parameters, prefer [set_parameter][Self::set_parameter].
    fn parameters_mut(&mut self) -> &mut RequestParameters;

    /// Stores (or overwrites) the value for `parameter`.
    ///
    /// # Example
    /// ```
    /// # use storage_raw_client::generic_request::GenericRequest;
    /// # use storage_raw_client::requests::ListBucketsRequest;
    /// # use storage_raw_client::well_known_parameters::*;
    /// let request = ListBucketsRequest::new("my-project")
    ///     .set_parameter(MaxResults::new(10));
    /// assert_eq!(request.serialize_query_string(), "maxResults=10");
    /// ```
    fn set_parameter<P>(mut self, parameter: P) -> Self
    where
        P: WellKnownParameter,
        Self: Accepts<P>,
    {
        self.parameters_mut().set(parameter);
        self
    }

    /// Stores several parameters, given as a tuple.
    ///
    /// Parameters are applied left to right, so if the same kind appears more
    /// than once the last value wins.
    ///
    /// # Example
    /// ```
    /// # use storage_raw_client::generic_request::GenericRequest;
    /// # use storage_raw_client::requests::ListObjectsRequest;
    /// # use storage_raw_client::well_known_parameters::*;
    /// let request = ListObjectsRequest::new("my-bucket")
    ///     .set_multiple_parameters((Versions::new(true), Prefix::new("a/"), MaxResults::new(5)));
    /// assert_eq!(request.serialize_query_string(), "maxResults=5&prefix=a%2F&versions=true");
    /// ```
    fn set_multiple_parameters<S>(mut self, parameters: S) -> Self
    where
        S: ParameterSet<Self>,
    {
        parameters.apply_to(self.parameters_mut());
        self
    }

    /// Percent-encodes the present parameters as a query string.
    fn serialize_query_string(&self) -> String {
        self.parameters().serialize_query_string()
    }
}

/// A group of parameters accepted by the `R` request type.
///
/// Implemented for tuples of up to eight parameters.
pub trait ParameterSet<R> {
    fn apply_to(self, parameters: &mut RequestParameters);
}

impl<R> ParameterSet<R> for () {
    fn apply_to(self, _parameters: &mut RequestParameters) {}
}

macro_rules! parameter_set_tuple {
    ($($p:ident),+) => {
        impl<R, $($p),+> ParameterSet<R> for ($($p,)+)
        where
            $($p: WellKnownParameter, R: Accepts<$p>,)+
        {
            #[allow(non_snake_case)]
            fn apply_to(self, parameters: &mut RequestParameters) {
                let ($($p,)+) = self;
                $(parameters.set($p);)+
            }
        }
    };
}

parameter_set_tuple!(P1);
parameter_set_tuple!(P1, P2);
parameter_set_tuple!(P1, P2, P3);
parameter_set_tuple!(P1, P2, P3, P4);
parameter_set_tuple!(P1, P2, P3, P4, P5);
parameter_set_tuple!(P1, P2, P3, P4, P5, P6);
parameter_set_tuple!(P1, P2, P3, P4, P5, P6, P7);
parameter_set_tuple!(P1, P2, P3, P4, P5, P6, P7, P8);

/// Formats a request as `Name={field=value, ..., key=value}`.
///
/// The mandatory fields come first, followed by the present parameters in
/// serialization order.
pub(crate) fn format_request(
    f: &mut std::fmt::Formatter<'_>,
    name: &str,
    fields: &[(&str, &dyn std::fmt::Display)],
    parameters: &RequestParameters,
) -> std::fmt::Result {
    write!(f, "{name}={{")?;
    let mut sep = "";
    for (k, v) in fields {
        write!(f, "{sep}{k}={v}")?;
        sep = ", ";
    }
    if !parameters.is_empty() {
        write!(f, "{sep}{parameters}")?;
    }
    write!(f, "}}")
}

/// Implements [GenericRequest] and the [Accepts] markers for a request type.
///
/// The request must have a `parameters: RequestParameters` field.
macro_rules! generic_request {
    ($request:ty: $($p:ident),* $(,)?) => {
        impl $crate::generic_request::GenericRequest for $request {
            fn parameters(&self) -> &$crate::generic_request::RequestParameters {
                &self.parameters
            }
            fn parameters_mut(&mut self) -> &mut $crate::generic_request::RequestParameters {
                &mut self.parameters
            }
        }
        $(impl $crate::generic_request::Accepts<$crate::well_known_parameters::$p> for $request {})*
    };
}
pub(crate) use generic_request;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::well_known_parameters::*;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Debug, Default)]
    struct TestRequest {
        name: String,
        parameters: RequestParameters,
    }

    generic_request!(TestRequest: Generation, MaxResults, Prefix, Projection, UserProject, Versions);

    impl std::fmt::Display for TestRequest {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            format_request(f, "TestRequest", &[("name", &self.name)], &self.parameters)
        }
    }

    #[test]
    fn empty() {
        let request = TestRequest::default();
        assert!(request.parameters().is_empty());
        assert_eq!(request.serialize_query_string(), "");
    }

    #[test]
    fn single() {
        let request = TestRequest::default().set_parameter(MaxResults::new(10));
        assert_eq!(request.serialize_query_string(), "maxResults=10");
        assert_eq!(request.parameters().len(), 1);
        assert_eq!(request.parameters().get(ParameterKind::MaxResults), Some("10"));
    }

    #[test]
    fn absent_values_are_omitted() {
        let request = TestRequest::default()
            .set_parameter(MaxResults::default())
            .set_parameter(Prefix::new("p"))
            .set_parameter(UserProject::default());
        assert_eq!(request.serialize_query_string(), "prefix=p");
    }

    #[test]
    fn absent_value_clears() {
        let request = TestRequest::default()
            .set_parameter(MaxResults::new(10))
            .set_parameter(MaxResults::default());
        assert!(!request.parameters().has(ParameterKind::MaxResults));
        assert_eq!(request.serialize_query_string(), "");
    }

    #[test]
    fn last_write_wins() {
        let request = TestRequest::default()
            .set_parameter(Prefix::new("a"))
            .set_parameter(Prefix::new("b"));
        assert_eq!(request.serialize_query_string(), "prefix=b");

        let request = TestRequest::default()
            .set_multiple_parameters((Prefix::new("a"), MaxResults::new(1), Prefix::new("c")));
        assert_eq!(request.serialize_query_string(), "maxResults=1&prefix=c");
    }

    #[test]
    fn stable_order() {
        let a = TestRequest::default()
            .set_parameter(UserProject::new("billing"))
            .set_parameter(Versions::new(false))
            .set_parameter(Generation::new(3))
            .set_parameter(Projection::full());
        let b = TestRequest::default()
            .set_multiple_parameters((
                Projection::full(),
                Generation::new(3),
                Versions::new(false),
                UserProject::new("billing"),
            ));
        let want = "generation=3&projection=full&versions=false&userProject=billing";
        assert_eq!(a.serialize_query_string(), want);
        assert_eq!(b.serialize_query_string(), want);
        assert_eq!(a.serialize_query_string(), a.serialize_query_string());
    }

    #[test]
    fn encoding() {
        let request = TestRequest::default().set_parameter(Prefix::new("a b&c=d/é"));
        assert_eq!(
            request.serialize_query_string(),
            "prefix=a+b%26c%3Dd%2F%C3%A9"
        );
    }

    #[test]
    fn multiple() {
        let request = TestRequest::default().set_multiple_parameters(());
        assert!(request.parameters().is_empty());
        let request = TestRequest::default().set_multiple_parameters((
            Generation::new(1),
            MaxResults::new(2),
            Prefix::new("3"),
            Projection::no_acl(),
            Versions::new(true),
            UserProject::new("6"),
            Generation::new(7),
            MaxResults::new(8),
        ));
        assert_eq!(
            request.serialize_query_string(),
            "generation=7&maxResults=8&prefix=3&projection=noAcl&versions=true&userProject=6"
        );
    }

    #[test]
    fn display() {
        let request = TestRequest {
            name: "n".to_string(),
            ..TestRequest::default()
        };
        assert_eq!(request.to_string(), "TestRequest={name=n}");
        let request = request.set_multiple_parameters((UserProject::new("u"), MaxResults::new(10)));
        assert_eq!(
            request.to_string(),
            "TestRequest={name=n, maxResults=10, userProject=u}"
        );
        assert_eq!(request.parameters().to_string(), "maxResults=10, userProject=u");
    }
}
