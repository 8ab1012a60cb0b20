use std::sync::{Arc, RwLock};

use tracing::info;

use super::Dictionary;

/// Holder of the current dictionary snapshot.
///
/// Readers take an `Arc` and keep it for the whole request, so a
/// [`replace`](DictionaryStore::replace) never changes a pass already in flight.
#[derive(Debug)]
pub struct DictionaryStore {
    current: RwLock<Arc<Dictionary>>,
}

impl DictionaryStore {
    pub fn new(dictionary: Dictionary) -> Self {
        DictionaryStore {
            current: RwLock::new(Arc::new(dictionary)),
        }
    }

    /// The snapshot new requests should use.
    pub fn snapshot(&self) -> Arc<Dictionary> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Install `dictionary` as the current snapshot and return the previous one.
    pub fn replace(&self, dictionary: Dictionary) -> Arc<Dictionary> {
        let next = Arc::new(dictionary);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        info!(
            from = guard.version().unwrap_or("-"),
            to = next.version().unwrap_or("-"),
            terms = next.len(),
            "dictionary snapshot replaced"
        );
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::builtin::builtin;
    use crate::dictionary::DictionaryEntry;
    use crate::models::RiskLevel;
    use crate::tagger::{classify, MatchPolicy};

    #[test]
    fn test_snapshot_survives_replace() {
        let store = DictionaryStore::new(builtin());
        let before = store.snapshot();

        let next = Dictionary::from_entries(
            Some("v2".to_string()),
            vec![DictionaryEntry::new("sugar", RiskLevel::Low, "")],
        )
        .unwrap();
        let previous = store.replace(next);

        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.len(), 6);
        assert_eq!(store.snapshot().version(), Some("v2"));
        assert!(store.snapshot().get("gelatin").is_none());
    }

    #[test]
    fn test_parallel_requests_share_snapshot() {
        let store = DictionaryStore::new(builtin());
        let texts = ["Gelatin, Sugar", "Whey Powder", "Water", "Carmine; Salt"];

        let levels: Vec<RiskLevel> = std::thread::scope(|scope| {
            let handles: Vec<_> = texts
                .iter()
                .map(|text| {
                    let dict = store.snapshot();
                    scope.spawn(move || classify(text, &dict, MatchPolicy::MatchedOnly).overall_level)
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(
            levels,
            vec![RiskLevel::Medium, RiskLevel::Low, RiskLevel::Unknown, RiskLevel::High]
        );
    }
}
