//! Application state for the web layer.

use std::sync::Arc;

use crate::kakao::KakaoClient;
use crate::timetable::ScheduleStore;

/// Shared application state.
///
/// Generic over the messenger so the delivery channel can be swapped
/// without touching notification logic. The concrete Kakao client is
/// held separately for the test endpoint, which reports the API path's
/// outcome alongside the local channel's.
pub struct AppState<M> {
    /// The mutable shuttle timetable.
    pub store: ScheduleStore,

    /// Channel used to dispatch computed notifications.
    pub messenger: Arc<M>,

    /// Direct Kakao API client.
    pub kakao: Arc<KakaoClient>,
}

impl<M> AppState<M> {
    pub fn new(store: ScheduleStore, messenger: M, kakao: KakaoClient) -> Self {
        Self {
            store,
            messenger: Arc::new(messenger),
            kakao: Arc::new(kakao),
        }
    }
}

// Manual impl: `M` itself does not need to be `Clone` behind the `Arc`.
impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            messenger: Arc::clone(&self.messenger),
            kakao: Arc::clone(&self.kakao),
        }
    }
}
