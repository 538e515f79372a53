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

/// Formats a value as a query parameter.
///
/// Returns `None` for values that are not set, such as `None::<i64>`. These
/// values are not included in the HTTP query.
pub fn format<T>(parameter: &T) -> Option<String>
where
    T: QueryParameter,
{
    QueryParameter::format(parameter)
}

/// Percent-encodes a sequence of `key=value` pairs using the rules for
/// `application/x-www-form-urlencoded` data, joined with `&`.
///
/// # Example
/// ```
/// # use storage_gax::query_parameter::encode;
/// let query = encode([("prefix", "a b/c"), ("maxResults", "10")]);
/// assert_eq!(query, "prefix=a+b%2Fc&maxResults=10");
/// ```
pub fn encode<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// [QueryParameter] is a trait representing types that can be used as a query
/// parameter.
pub trait QueryParameter {
    fn format(&self) -> Option<String>;
}

impl<T: QueryParameter> QueryParameter for Option<T> {
    fn format(&self) -> Option<String> {
        match &self {
            None => None,
            Some(t) => t.format(),
        }
    }
}

impl<T: crate::request_parameter::RequestParameter> QueryParameter for T {
    fn format(&self) -> Option<String> {
        Some(crate::request_parameter::RequestParameter::format(self))
    }
}
