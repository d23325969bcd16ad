use std::sync::Arc;

use journey_core::Journey;

use crate::{
    analytics::{Analytics, LogAnalytics},
    auth::TokenIssuer,
};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub journey: Arc<Journey>,
    pub tokens: Arc<TokenIssuer>,
    pub analytics: Arc<dyn Analytics>,
}

impl AppState {
    pub fn new(journey: Journey, tokens: TokenIssuer) -> Self {
        Self {
            journey: Arc::new(journey),
            tokens: Arc::new(tokens),
            analytics: Arc::new(LogAnalytics),
        }
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn Analytics>) -> Self {
        self.analytics = analytics;
        self
    }
}
