use std::sync::Arc;

use serde::Serialize;

use crate::core::processing::pipeline::StandardizedImage;
use crate::error::StandardizeError;
use crate::types::Lifecycle;

/// Stable identity of a queued image, unique within its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why an item ended up `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReason {
    pub kind: String,
    pub message: String,
}

impl From<&StandardizeError> for FailureReason {
    fn from(e: &StandardizeError) -> Self {
        Self {
            kind: e.kind().to_string(),
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// One source image and its processing state.
///
/// Lifecycle, result and failure are written only by the orchestrator.
#[derive(Debug, Clone)]
pub struct QueueItem {
    id: ItemId,
    name: String,
    source: Arc<[u8]>,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) result: Option<StandardizedImage>,
    pub(crate) failure: Option<FailureReason>,
}

impl QueueItem {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub(crate) fn shared_source(&self) -> Arc<[u8]> {
        Arc::clone(&self.source)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn result(&self) -> Option<&StandardizedImage> {
        self.result.as_ref()
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        self.failure.as_ref()
    }

    /// Recorded output size; present only for completed items.
    pub fn output_size(&self) -> Option<(u32, u32)> {
        match (self.lifecycle, &self.result) {
            (Lifecycle::Completed, Some(r)) => Some((r.width, r.height)),
            _ => None,
        }
    }
}

/// Ordered arena of queue items addressed by `ItemId`.
#[derive(Debug, Default)]
pub struct BatchQueue {
    items: Vec<QueueItem>,
    next_id: u64,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a source image into the batch as `Pending`.
    pub fn push(&mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(QueueItem {
            id,
            name: name.into(),
            source: bytes.into(),
            lifecycle: Lifecycle::Pending,
            result: None,
            failure: None,
        });
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<QueueItem> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: ItemId) -> Option<&QueueItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueueItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, lifecycle: Lifecycle) -> usize {
        self.items
            .iter()
            .filter(|item| item.lifecycle == lifecycle)
            .count()
    }

    pub fn has_pending(&self) -> bool {
        self.count(Lifecycle::Pending) > 0
    }

    pub fn has_completed(&self) -> bool {
        self.count(Lifecycle::Completed) > 0
    }

    pub fn completed(&self) -> impl Iterator<Item = &QueueItem> {
        self.items
            .iter()
            .filter(|item| item.lifecycle == Lifecycle::Completed)
    }

    pub(crate) fn items_mut(&mut self) -> &mut [QueueItem] {
        &mut self.items
    }
}

impl<'a> IntoIterator for &'a BatchQueue {
    type Item = &'a QueueItem;
    type IntoIter = std::slice::Iter<'a, QueueItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_and_unique() {
        let mut q = BatchQueue::new();
        let a = q.push("a.png", vec![1u8]);
        let b = q.push("b.png", vec![2u8]);
        q.remove(a);
        let c = q.push("c.png", vec![3u8]);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert_eq!(q.get(b).map(|i| i.name()), Some("b.png"));
        assert!(q.get(a).is_none());
    }

    #[test]
    fn new_items_are_pending() {
        let mut q = BatchQueue::new();
        q.push("x.jpg", vec![0u8; 4]);
        assert!(q.has_pending());
        assert!(!q.has_completed());
        let item = q.iter().next().unwrap();
        assert_eq!(item.lifecycle(), Lifecycle::Pending);
        assert!(item.output_size().is_none());
        assert_eq!(item.source(), &[0u8; 4]);
    }

    #[test]
    fn clear_empties_queue() {
        let mut q = BatchQueue::new();
        q.push("x.jpg", vec![0u8]);
        q.push("y.jpg", vec![0u8]);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.count(Lifecycle::Pending), 0);
    }

    #[test]
    fn failure_reason_from_error() {
        let reason = FailureReason::from(&StandardizeError::DecodeFailed("eof".into()));
        assert_eq!(reason.kind, "decode_failed");
        assert!(reason.message.contains("eof"));
    }
}
