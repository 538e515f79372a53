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

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber, field};
use tracing_subscriber::{Layer, layer::Context, prelude::*};

/// Represents a captured tracing event with its fields.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    /// The target of the event, typically the module path.
    pub target: String,
    /// The event level.
    pub level: Level,
    /// A map of field names to their string representations. The event
    /// message, if any, is captured as the `message` field.
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Returns the value of a field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// A `tracing::field::Visit` implementation to extract field key-value pairs
/// from events.
///
/// It converts various field types (str, debug, i64, u64, bool) into String
/// representations.
struct TestVisitor<'a>(&'a mut HashMap<String, String>);

impl<'a> field::Visit for TestVisitor<'a> {
    fn record_str(&mut self, field: &field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_i64(&mut self, field: &field::Field, value: i64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &field::Field, value: bool) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

/// The events captured by a [TestLayer].
#[derive(Clone, Debug, Default)]
pub struct CapturedEvents {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CapturedEvents {
    /// Returns a copy of all the events captured so far.
    pub fn all(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns the events captured so far with the given target.
    pub fn with_target(&self, target: &str) -> Vec<CapturedEvent> {
        self.all()
            .into_iter()
            .filter(|e| e.target == target)
            .collect()
    }

    /// Removes all captured events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn push(&self, event: CapturedEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// A tracing layer for capturing and inspecting events within tests.
///
/// The layer is installed as the thread-local default subscriber, so tests
/// running in parallel on different threads do not see each other's events.
/// Use a single-threaded runtime (the `#[tokio::test]` default) when the code
/// under test is async.
///
/// # Example
///
/// ```rust
/// use storage_test_utils::test_layer::TestLayer;
///
/// let (_guard, events) = TestLayer::initialize();
/// tracing::info!(target: "my-target", answer = 42, "hello");
/// let captured = events.with_target("my-target");
/// assert_eq!(captured.len(), 1);
/// assert_eq!(captured[0].field("answer"), Some("42"));
/// assert_eq!(captured[0].field("message"), Some("hello"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TestLayer {
    events: CapturedEvents,
}

impl TestLayer {
    /// Installs a subscriber with a new [TestLayer] as the default for the
    /// current thread.
    ///
    /// The layer captures events while the returned guard is in scope.
    pub fn initialize() -> (tracing::subscriber::DefaultGuard, CapturedEvents) {
        let layer = TestLayer::default();
        let events = layer.events.clone();
        let subscriber = tracing_subscriber::registry().with(layer);
        (tracing::subscriber::set_default(subscriber), events)
    }
}

impl<S: Subscriber> Layer<S> for TestLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut TestVisitor(&mut fields));
        let metadata = event.metadata();
        self.events.push(CapturedEvent {
            target: metadata.target().to_string(),
            level: *metadata.level(),
            fields,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn captures_fields() {
        let (_guard, events) = TestLayer::initialize();
        tracing::info!(
            target: "test-target",
            name = "value",
            count = 7_u64,
            delta = -3_i64,
            flag = true,
            debug = ?vec![1, 2],
            "message text"
        );
        tracing::warn!(target: "other-target", "ignored");

        let captured = events.with_target("test-target");
        assert_eq!(captured.len(), 1, "{captured:?}");
        let event = &captured[0];
        assert_eq!(event.level, Level::INFO);
        assert_eq!(event.field("name"), Some("value"));
        assert_eq!(event.field("count"), Some("7"));
        assert_eq!(event.field("delta"), Some("-3"));
        assert_eq!(event.field("flag"), Some("true"));
        assert_eq!(event.field("debug"), Some("[1, 2]"));
        assert_eq!(event.field("message"), Some("message text"));
        assert_eq!(events.all().len(), 2);

        events.clear();
        assert!(events.all().is_empty());
    }

    #[tokio::test]
    async fn captures_in_async() {
        let (_guard, events) = TestLayer::initialize();
        async {
            tracing::debug!(target: "async-target", "inside");
        }
        .await;
        assert_eq!(events.with_target("async-target").len(), 1);
    }

    #[test]
    fn isolated_after_guard_drop() {
        let events = {
            let (_guard, events) = TestLayer::initialize();
            tracing::info!(target: "scoped", "captured");
            events
        };
        tracing::info!(target: "scoped", "not captured");
        assert_eq!(events.with_target("scoped").len(), 1);
    }
}
