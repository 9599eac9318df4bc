use tokio::sync::RwLock;

use crate::filter::FilterKind;

/// Process-wide service state shared by every connection.
///
/// The selection is deliberately not per-client: a `set_filter` from any
/// session changes the filter applied to all subsequent frames.
pub struct AppState {
    selection: RwLock<FilterKind>,
    pub jpeg_quality: u8,
}

impl AppState {
    pub fn new(initial: FilterKind, jpeg_quality: u8) -> Self {
        Self {
            selection: RwLock::new(initial),
            jpeg_quality,
        }
    }

    pub async fn selected(&self) -> FilterKind {
        *self.selection.read().await
    }

    /// Store a new selection, returning the previous one.
    pub async fn select(&self, kind: FilterKind) -> FilterKind {
        std::mem::replace(&mut *self.selection.write().await, kind)
    }
}
