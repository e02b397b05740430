//! Types for the watch api
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::ErrorResponse;

/// A raw event returned from a watch query
///
/// Note that a watch query returns many of these as newline separated JSON.
#[derive(Deserialize, Serialize, Clone)]
#[serde(tag = "type", content = "object", rename_all = "UPPERCASE")]
pub enum WatchEvent<K> {
    /// Resource was added
    Added(K),
    /// Resource was modified
    Modified(K),
    /// Resource was deleted
    Deleted(K),
    /// There was some kind of error
    Error(ErrorResponse),
}

impl<K> Debug for WatchEvent<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self {
            WatchEvent::Added(_) => write!(f, "Added event"),
            WatchEvent::Modified(_) => write!(f, "Modified event"),
            WatchEvent::Deleted(_) => write!(f, "Deleted event"),
            WatchEvent::Error(e) => write!(f, "Error event: {e:?}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::WatchEvent;

    #[test]
    fn deserializes_tagged_lines() {
        let line = r#"{"type":"ADDED","object":{"name":"daily-backup"}}"#;
        let ev: WatchEvent<serde_json::Value> = serde_json::from_str(line).unwrap();
        assert!(matches!(ev, WatchEvent::Added(_)));

        let line = r#"{"type":"ERROR","object":{"status":"Failure","message":"too old resource version","reason":"Gone","code":410}}"#;
        let ev: WatchEvent<serde_json::Value> = serde_json::from_str(line).unwrap();
        match ev {
            WatchEvent::Error(e) => assert_eq!(e.code, 410),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
