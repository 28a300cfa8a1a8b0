//! Cashbacc prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    analytics::{AnalyticsAction, AnalyticsSink, TracingAnalytics},
    evaluation::{Evaluation, cashback, evaluate},
    fixtures::{FixtureError, PromotionsFixture},
    identity::{IdentityError, IdentityProvider, PhoneSignIn, SignInState, User},
    metadata::{SITE, SiteMetadata},
    money::{CurrencyError, format_amount, parse_currency},
    observer::{NoopObserver, RecordingObserver, StoreObserver},
    persistence::{FileStore, KeyValueStore, MemoryStore, PersistenceError},
    promotions::{Promotion, PromotionUpdate},
    random::{RandomSource, RngSource, ScriptedRandom},
    report::{Report, ReportError},
    store::{PromotionStore, StoreOptions},
};
