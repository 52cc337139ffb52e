//! Content-addressable calculation audit log
//!
//! Every analyzer invocation is recorded as an immutable entry keyed by a
//! canonical hash of its input, so structurally identical inputs always
//! collide and key order never matters. The log doubles as a memoization
//! surface (`find_cached_result`) and a compliance export
//! (`export_logs`). Entries are append-only; most-recent wins on lookup.
//!
//! Storage sits behind `LogStore` so an externally persisted store can be
//! swapped in without touching call sites.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Schema version stamped on every entry and on exports
pub const CALC_LOG_VERSION: &str = "1.0.0";

/// One recorded calculation, never mutated after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationLogEntry {
    /// Unique entry id, fresh per invocation even for identical inputs
    pub id: String,

    /// Calculation type tag (e.g. "household_premium", "cobra_analysis")
    pub calculation_type: String,

    /// Canonicalized input as recorded
    pub input: Value,

    /// Output as recorded
    pub output: Value,

    /// 8-hex-char content hash of the canonical input
    pub input_hash: String,

    /// Wall-clock duration of the wrapped calculation
    pub duration_ms: f64,

    /// Engine schema version at write time
    pub version: String,

    /// Optional caller-supplied metadata
    #[serde(default)]
    pub metadata: Option<Value>,

    /// Entry creation time
    pub timestamp: DateTime<Utc>,
}

/// Recursively rebuild a value with object keys sorted
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = serde_json::Map::new();
            for key in keys {
                out.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Content hash of an arbitrary input value: canonical JSON, SHA-256,
/// truncated to 8 lowercase hex characters
pub fn hash_input(value: &Value) -> String {
    let canonical = canonicalize(value).to_string();
    let digest = Sha256::digest(canonical.as_bytes());
    digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
}

/// Append-only entry storage.
///
/// Implementations only need append-safety; entries are never updated in
/// place. The in-memory store below is the default; external persistence
/// is a collaborator's concern.
pub trait LogStore: Send + Sync {
    /// Append one entry
    fn append(&self, entry: CalculationLogEntry);

    /// Snapshot of all entries in insertion order
    fn snapshot(&self) -> Vec<CalculationLogEntry>;

    /// Number of stored entries
    fn len(&self) -> usize;

    /// Whether the store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries
    fn clear(&self);
}

/// Default in-process store behind a single mutex
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<CalculationLogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CalculationLogEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogStore for MemoryStore {
    fn append(&self, entry: CalculationLogEntry) {
        self.lock().push(entry);
    }

    fn snapshot(&self) -> Vec<CalculationLogEntry> {
        self.lock().clone()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

/// Aggregate statistics over the log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogStats {
    /// Total recorded entries
    pub total_entries: usize,

    /// Entry counts per calculation type
    pub by_type: std::collections::HashMap<String, usize>,

    /// Count of distinct input hashes
    pub distinct_inputs: usize,

    /// Mean wrapped-calculation duration
    pub avg_duration_ms: f64,
}

/// Self-describing export snapshot
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogExport {
    exported_at: DateTime<Utc>,
    version: String,
    logs: Vec<CalculationLogEntry>,
}

/// Calculation audit logger
pub struct CalculationLog {
    store: Box<dyn LogStore>,
}

impl CalculationLog {
    /// Create a logger over the default in-memory store
    pub fn new() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
        }
    }

    /// Create a logger over a caller-supplied store
    pub fn with_store(store: Box<dyn LogStore>) -> Self {
        Self { store }
    }

    /// Record one calculation directly
    pub fn log(
        &self,
        calculation_type: &str,
        input: Value,
        output: Value,
        duration_ms: f64,
        metadata: Option<Value>,
    ) -> CalculationLogEntry {
        let input = canonicalize(&input);
        let entry = CalculationLogEntry {
            id: Uuid::new_v4().to_string(),
            calculation_type: calculation_type.to_string(),
            input_hash: hash_input(&input),
            input,
            output,
            duration_ms,
            version: CALC_LOG_VERSION.to_string(),
            metadata,
            timestamp: Utc::now(),
        };

        log::debug!(
            "audit {} type={} hash={} {:.3}ms",
            entry.id,
            entry.calculation_type,
            entry.input_hash,
            entry.duration_ms
        );
        self.store.append(entry.clone());
        entry
    }

    /// Run a calculation, measure it, and record it on success.
    /// A failed calculation propagates without writing an entry.
    pub fn log_calculation<T, E, F>(
        &self,
        calculation_type: &str,
        input: Value,
        f: F,
    ) -> Result<T, E>
    where
        T: Serialize,
        F: FnOnce() -> Result<T, E>,
    {
        let started = Instant::now();
        let result = f()?;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        let output = serde_json::to_value(&result).unwrap_or(Value::Null);
        self.log(calculation_type, input, output, duration_ms, None);
        Ok(result)
    }

    /// Wrap an infallible calculation, recording it like `log_calculation`
    pub fn record<T, F>(&self, calculation_type: &str, input: Value, f: F) -> T
    where
        T: Serialize,
        F: FnOnce() -> T,
    {
        let result: Result<T, std::convert::Infallible> =
            self.log_calculation(calculation_type, input, || Ok(f()));
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Async variant of `log_calculation`. Work that never completes
    /// writes no entry; completed work is measured wall-clock.
    pub async fn log_async_calculation<T, E, Fut>(
        &self,
        calculation_type: &str,
        input: Value,
        fut: Fut,
    ) -> Result<T, E>
    where
        T: Serialize,
        Fut: Future<Output = Result<T, E>>,
    {
        let started = Instant::now();
        let result = fut.await?;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        let output = serde_json::to_value(&result).unwrap_or(Value::Null);
        self.log(calculation_type, input, output, duration_ms, None);
        Ok(result)
    }

    /// Most recent recorded output for a type + input pair, if any.
    ///
    /// Pure read-only memoization lookup: it never prevents re-computation
    /// or re-logging, and divergent outputs for the same input resolve to
    /// the most recently logged one.
    pub fn find_cached_result(&self, calculation_type: &str, input: &Value) -> Option<Value> {
        let hash = hash_input(input);
        self.store
            .snapshot()
            .into_iter()
            .rev()
            .find(|e| e.calculation_type == calculation_type && e.input_hash == hash)
            .map(|e| e.output)
    }

    /// Entry by id
    pub fn get_log(&self, id: &str) -> Option<CalculationLogEntry> {
        self.store.snapshot().into_iter().find(|e| e.id == id)
    }

    /// All entries with a given input hash, in insertion order
    pub fn logs_by_hash(&self, input_hash: &str) -> Vec<CalculationLogEntry> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|e| e.input_hash == input_hash)
            .collect()
    }

    /// All entries of a given calculation type, in insertion order
    pub fn logs_by_type(&self, calculation_type: &str) -> Vec<CalculationLogEntry> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|e| e.calculation_type == calculation_type)
            .collect()
    }

    /// The N most recent entries, newest first
    pub fn recent(&self, n: usize) -> Vec<CalculationLogEntry> {
        let mut entries = self.store.snapshot();
        entries.reverse();
        entries.truncate(n);
        entries
    }

    /// Aggregate statistics over the whole log
    pub fn stats(&self) -> LogStats {
        let entries = self.store.snapshot();
        let total_entries = entries.len();

        let mut by_type = std::collections::HashMap::new();
        let mut hashes = HashSet::new();
        let mut total_duration = 0.0;
        for entry in &entries {
            *by_type.entry(entry.calculation_type.clone()).or_insert(0) += 1;
            hashes.insert(entry.input_hash.clone());
            total_duration += entry.duration_ms;
        }

        LogStats {
            total_entries,
            by_type,
            distinct_inputs: hashes.len(),
            avg_duration_ms: if total_entries == 0 {
                0.0
            } else {
                total_duration / total_entries as f64
            },
        }
    }

    /// Full-log export as a self-describing JSON snapshot
    pub fn export_logs(&self) -> String {
        let export = LogExport {
            exported_at: Utc::now(),
            version: CALC_LOG_VERSION.to_string(),
            logs: self.store.snapshot(),
        };
        serde_json::to_string_pretty(&export).unwrap_or_else(|_| "{}".to_string())
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl Default for CalculationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CalculationLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculationLog")
            .field("entries", &self.store.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hash_ignores_key_order() {
        let a = json!({"a": 1, "b": 2});
        let b = json!({"b": 2, "a": 1});

        assert_eq!(hash_input(&a), hash_input(&b));
        assert_eq!(hash_input(&a).len(), 8);
    }

    #[test]
    fn test_hash_nested_key_order() {
        let a = json!({"outer": {"x": [1, {"p": true, "q": null}], "y": "s"}});
        let b = json!({"outer": {"y": "s", "x": [1, {"q": null, "p": true}]}});

        assert_eq!(hash_input(&a), hash_input(&b));
    }

    #[test]
    fn test_hash_differs_on_leaf_change() {
        let a = json!({"a": 1, "b": 2});
        let b = json!({"a": 1, "b": 3});

        assert_ne!(hash_input(&a), hash_input(&b));
    }

    #[test]
    fn test_ids_unique_for_identical_inputs() {
        let log = CalculationLog::new();

        let e1 = log.log("t", json!({"x": 1}), json!(10), 1.0, None);
        let e2 = log.log("t", json!({"x": 1}), json!(10), 1.0, None);

        assert_ne!(e1.id, e2.id);
        assert_eq!(e1.input_hash, e2.input_hash);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_cached_result_most_recent_wins() {
        let log = CalculationLog::new();
        let input = json!({"age": 40, "state": "FL"});

        log.log("premium", input.clone(), json!(100.0), 1.0, None);
        log.log("premium", input.clone(), json!(120.0), 1.0, None);

        assert_eq!(log.find_cached_result("premium", &input), Some(json!(120.0)));
        // Different type misses
        assert_eq!(log.find_cached_result("other", &input), None);
    }

    #[test]
    fn test_log_calculation_wraps_and_records() {
        let log = CalculationLog::new();

        let result: Result<f64, String> =
            log.log_calculation("double", json!({"n": 21}), || Ok(42.0));
        assert_eq!(result.unwrap(), 42.0);
        assert_eq!(log.len(), 1);

        let entry = &log.logs_by_type("double")[0];
        assert_eq!(entry.output, json!(42.0));
        assert_eq!(entry.version, CALC_LOG_VERSION);
        assert!(entry.duration_ms >= 0.0);
    }

    #[test]
    fn test_failed_calculation_not_logged() {
        let log = CalculationLog::new();

        let result: Result<f64, String> =
            log.log_calculation("boom", json!({}), || Err("bad input".to_string()));

        assert!(result.is_err());
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_async_calculation_logged() {
        let log = CalculationLog::new();

        let result: Result<u32, String> = log
            .log_async_calculation("async_sum", json!({"a": 1, "b": 2}), async { Ok(3) })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(log.len(), 1);
        assert_eq!(log.find_cached_result("async_sum", &json!({"b": 2, "a": 1})), Some(json!(3)));
    }

    #[tokio::test]
    async fn test_async_failure_not_logged() {
        let log = CalculationLog::new();

        let result: Result<u32, String> = log
            .log_async_calculation("async_boom", json!({}), async { Err("nope".to_string()) })
            .await;

        assert!(result.is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_queries() {
        let log = CalculationLog::new();
        let e1 = log.log("a", json!({"k": 1}), json!(1), 2.0, None);
        let _e2 = log.log("b", json!({"k": 1}), json!(2), 4.0, None);
        let e3 = log.log("a", json!({"k": 2}), json!(3), 6.0, None);

        assert_eq!(log.get_log(&e1.id).map(|e| e.output), Some(json!(1)));
        assert!(log.get_log("missing").is_none());
        assert_eq!(log.logs_by_type("a").len(), 2);
        assert_eq!(log.logs_by_hash(&e1.input_hash).len(), 2);

        // Newest first
        let recent = log.recent(2);
        assert_eq!(recent[0].id, e3.id);
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_stats() {
        let log = CalculationLog::new();
        log.log("a", json!({"k": 1}), json!(1), 2.0, None);
        log.log("a", json!({"k": 1}), json!(1), 4.0, None);
        log.log("b", json!({"k": 2}), json!(2), 6.0, None);

        let stats = log.stats();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.by_type["a"], 2);
        assert_eq!(stats.by_type["b"], 1);
        assert_eq!(stats.distinct_inputs, 2);
        assert!((stats.avg_duration_ms - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_export_shape() {
        let log = CalculationLog::new();
        log.log("a", json!({"k": 1}), json!(1), 2.0, Some(json!({"source": "test"})));

        let exported: Value = serde_json::from_str(&log.export_logs()).unwrap();
        assert!(exported.get("exportedAt").is_some());
        assert_eq!(exported["version"], json!(CALC_LOG_VERSION));
        assert_eq!(exported["logs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_clear() {
        let log = CalculationLog::new();
        log.log("a", json!({}), json!(1), 1.0, None);
        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.stats().total_entries, 0);
    }
}
