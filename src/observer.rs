//! Store observer

use crate::{evaluation::Evaluation, promotions::Promotion};

/// Callbacks fired synchronously by [`PromotionStore`](crate::store::PromotionStore).
///
/// Observers see the store only after a mutation has been fully applied, so
/// every callback receives a consistent promotion list, base amount and
/// evaluation. Callbacks fire only when the store's inputs actually changed.
pub trait StoreObserver {
    /// Called after the evaluation has been recomputed.
    fn on_evaluation(&mut self, promotions: &[Promotion], base_amount: i64, evaluation: &Evaluation);
}

/// Observer that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StoreObserver for NoopObserver {
    fn on_evaluation(&mut self, _promotions: &[Promotion], _base_amount: i64, _evaluation: &Evaluation) {}
}

/// Observer that keeps every evaluation it was notified with.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    evaluations: Vec<Evaluation>,
}

impl RecordingObserver {
    /// Evaluations received so far, oldest first.
    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    /// Most recent evaluation received.
    pub fn last(&self) -> Option<&Evaluation> {
        self.evaluations.last()
    }
}

impl StoreObserver for RecordingObserver {
    fn on_evaluation(&mut self, _promotions: &[Promotion], _base_amount: i64, evaluation: &Evaluation) {
        self.evaluations.push(*evaluation);
    }
}

impl<O: StoreObserver + ?Sized> StoreObserver for &mut O {
    fn on_evaluation(&mut self, promotions: &[Promotion], base_amount: i64, evaluation: &Evaluation) {
        (**self).on_evaluation(promotions, base_amount, evaluation);
    }
}
