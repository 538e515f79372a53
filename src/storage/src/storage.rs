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

//! The nodes of the raw client stack.
//!
//! [HttpClient] is the terminal node, it sends requests over HTTP. The
//! [RetryClient] and [LoggingClient] decorators wrap any other node, including
//! other decorators.

mod http_client;
mod logging_client;
mod retry_client;

pub use http_client::HttpClient;
pub use logging_client::{LoggingClient, MAX_LOGGED_RESPONSE};
pub use retry_client::RetryClient;
