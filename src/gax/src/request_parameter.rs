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

/// Produces the canonical text for a scalar query parameter value.
pub trait RequestParameter {
    fn format(&self) -> String;
}

impl RequestParameter for i32 {
    fn format(&self) -> String {
        format!("{self}")
    }
}
impl RequestParameter for i64 {
    fn format(&self) -> String {
        format!("{self}")
    }
}
impl RequestParameter for u32 {
    fn format(&self) -> String {
        format!("{self}")
    }
}
impl RequestParameter for u64 {
    fn format(&self) -> String {
        format!("{self}")
    }
}
impl RequestParameter for String {
    fn format(&self) -> String {
        self.clone()
    }
}
impl RequestParameter for &str {
    fn format(&self) -> String {
        self.to_string()
    }
}
impl RequestParameter for bool {
    fn format(&self) -> String {
        format!("{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_value() {
        let want = "42".to_string();
        assert_eq!(want, RequestParameter::format(&42_i32));
        assert_eq!(want, RequestParameter::format(&42_i64));
        assert_eq!(want, RequestParameter::format(&42_u32));
        assert_eq!(want, RequestParameter::format(&42_u64));
    }

    #[test]
    fn strings_and_booleans() {
        assert_eq!("abc", RequestParameter::format(&"abc".to_string()));
        assert_eq!("abc", RequestParameter::format(&"abc"));
        assert_eq!("true", RequestParameter::format(&true));
        assert_eq!("false", RequestParameter::format(&false));
    }
}
