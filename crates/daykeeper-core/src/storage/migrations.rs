//! Journal schema migrations.
//!
//! Numbered migrations run on the raw JSON value at load time, before
//! typed deserialization, tracked by the document's `version` field. Each
//! migration runs at most once. Documents without a version field are
//! treated as version 1 (the original flat layout).

use serde_json::Value;

use crate::document::DOCUMENT_VERSION;
use crate::error::StorageError;

struct Migration {
    version: u32,
    apply: fn(&mut Value),
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 2,
    apply: normalize_legacy_analytics,
}];

/// Upgrade a raw journal value to the current version in place.
///
/// Returns the number of migrations applied (0 if already current).
///
/// # Errors
///
/// Fails when the journal was written by a newer build than this one.
pub fn migrate(root: &mut Value) -> Result<usize, StorageError> {
    let current = root
        .get("version")
        .and_then(Value::as_u64)
        .unwrap_or(1) as u32;

    if current > DOCUMENT_VERSION {
        return Err(StorageError::FutureVersion {
            found: current,
            supported: DOCUMENT_VERSION,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > current).collect();
    for migration in &pending {
        (migration.apply)(root);
        tracing::info!(version = migration.version, "applied journal migration");
    }

    if let Some(obj) = root.as_object_mut() {
        obj.insert("version".to_string(), DOCUMENT_VERSION.into());
    }

    Ok(pending.len())
}

/// v2: the original layout used the string sentinel `"N/A"` for an unset
/// semester phase and carried a free-form `summary` blob inside analytics.
/// Both are gone: the sentinel becomes null, the blob is dropped.
fn normalize_legacy_analytics(root: &mut Value) {
    let Some(analytics) = root.get_mut("analytics").and_then(Value::as_object_mut) else {
        return;
    };
    if analytics.get("semester_phase").and_then(Value::as_str) == Some("N/A") {
        analytics.insert("semester_phase".to_string(), Value::Null);
    }
    analytics.remove("summary");
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn legacy_journal_is_upgraded() {
        let mut value: Value = serde_json::from_str(indoc! {r#"
            {
                "plan": {},
                "reports": {},
                "long_term_tasks": {},
                "analytics": {
                    "semester_phase": "N/A",
                    "summary": "week went fine",
                    "dedication_percentage": 0.7
                }
            }
        "#})
        .unwrap();

        let applied = migrate(&mut value).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(value["version"], DOCUMENT_VERSION);
        assert_eq!(value["analytics"]["semester_phase"], Value::Null);
        assert!(value["analytics"].get("summary").is_none());
    }

    #[test]
    fn explicit_phase_survives_migration() {
        let mut value: Value = serde_json::from_str(
            r#"{"analytics": {"semester_phase": "finals_period"}}"#,
        )
        .unwrap();

        migrate(&mut value).unwrap();
        assert_eq!(value["analytics"]["semester_phase"], "finals_period");
    }

    #[test]
    fn current_journal_is_left_alone() {
        let mut value: Value =
            serde_json::from_str(&format!(r#"{{"version": {DOCUMENT_VERSION}}}"#)).unwrap();
        let applied = migrate(&mut value).unwrap();
        assert_eq!(applied, 0);
    }

    #[test]
    fn future_journal_is_refused() {
        let mut value: Value = serde_json::from_str(r#"{"version": 99}"#).unwrap();
        let err = migrate(&mut value).unwrap_err();
        assert!(matches!(
            err,
            StorageError::FutureVersion { found: 99, .. }
        ));
    }

    #[test]
    fn migration_is_idempotent() {
        let mut value: Value = serde_json::from_str(
            r#"{"analytics": {"semester_phase": "N/A"}}"#,
        )
        .unwrap();

        migrate(&mut value).unwrap();
        let once = value.clone();
        migrate(&mut value).unwrap();
        assert_eq!(once, value);
    }
}
