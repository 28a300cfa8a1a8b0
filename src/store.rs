//! Promotion store
//!
//! Owns the promotion list and base amount, persists both through a
//! [`KeyValueStore`], and keeps the best-discount [`Evaluation`] in step with
//! them.
//!
//! Promotions are addressed by position. Removing a promotion shifts every
//! later promotion down by one, so an index held from before a mutation must
//! be re-derived from [`PromotionStore::promotions`] afterwards.

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    coerce,
    evaluation::{Evaluation, evaluate},
    fixtures::PromotionsFixture,
    observer::{NoopObserver, StoreObserver},
    persistence::{KeyValueStore, keys},
    promotions::{Promotion, PromotionUpdate, generator::random_promotion},
    random::RandomSource,
};

/// Store behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Write the evaluation to [`keys::EVALUATION`] whenever it changes.
    pub cache_evaluation: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            cache_evaluation: true,
        }
    }
}

/// Promotion list and base amount with their derived evaluation.
#[derive(Debug)]
pub struct PromotionStore<P, R, O = NoopObserver> {
    persistence: P,
    random: R,
    observer: O,
    options: StoreOptions,
    promotions: Vec<Promotion>,
    base_amount: i64,
    evaluation: Evaluation,
}

impl<P, R> PromotionStore<P, R, NoopObserver>
where
    P: KeyValueStore,
    R: RandomSource,
{
    /// Open a store with default options and no observer.
    pub fn open_default(persistence: P, random: R) -> Self {
        Self::open(persistence, random, NoopObserver, StoreOptions::default())
    }
}

impl<P, R, O> PromotionStore<P, R, O>
where
    P: KeyValueStore,
    R: RandomSource,
    O: StoreObserver,
{
    /// Load the persisted state and compute its evaluation.
    ///
    /// Missing values start from their defaults; values that fail to read or
    /// decode are logged and replaced by defaults. Any cached evaluation is
    /// ignored and overwritten when it disagrees with the loaded state.
    pub fn open(persistence: P, random: R, observer: O, options: StoreOptions) -> Self {
        let base_amount = load(&persistence, keys::BASE_AMOUNT).unwrap_or(0);
        let promotions: Vec<Promotion> = load(&persistence, keys::PROMOTIONS).unwrap_or_default();
        let evaluation = evaluate(&promotions, base_amount);

        let mut store = Self {
            persistence,
            random,
            observer,
            options,
            promotions,
            base_amount,
            evaluation,
        };

        if store.options.cache_evaluation {
            let cached: Option<Evaluation> = load(&store.persistence, keys::EVALUATION);

            if cached != Some(evaluation) {
                debug!(?cached, ?evaluation, "refreshing cached evaluation");

                save(&mut store.persistence, keys::EVALUATION, &evaluation);
            }
        }

        store
    }

    /// Promotions in display order.
    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    /// Pre-discount price the promotions are compared against.
    pub fn base_amount(&self) -> i64 {
        self.base_amount
    }

    /// Best cashback for the current promotions and base amount.
    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    /// The winning promotion, if there is one.
    pub fn best_promotion(&self) -> Option<&Promotion> {
        self.evaluation.winner(&self.promotions)
    }

    /// Observer receiving recomputation callbacks.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Backing persistence port.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Set the base amount from raw text.
    ///
    /// Text without a leading integer, zero and negative values all set `0`.
    /// Returns the stored amount.
    pub fn set_base_amount(&mut self, raw: &str) -> i64 {
        self.replace_base_amount(coerce::base_amount(raw))
    }

    /// Set the base amount, coercing a negative value to `0`.
    /// Returns the stored amount.
    pub fn replace_base_amount(&mut self, amount: i64) -> i64 {
        let amount = coerce::non_negative(amount);

        if amount != self.base_amount {
            self.base_amount = amount;
            save(&mut self.persistence, keys::BASE_AMOUNT, &self.base_amount);
            self.recompute();
        }

        self.base_amount
    }

    /// Append a promotion with a generated name and random parameters.
    /// Returns its index.
    pub fn add_promotion(&mut self) -> usize {
        let promotion = random_promotion(&self.promotions, &mut self.random);

        debug!(name = %promotion.name, "adding promotion");

        let mut promotions = self.promotions.clone();
        promotions.push(promotion);

        let index = promotions.len() - 1;

        self.replace_promotions(promotions);

        index
    }

    /// Merge `update` into the promotion at `index`.
    ///
    /// An out-of-range `index` leaves the store untouched. Returns whether a
    /// promotion was found.
    pub fn update_promotion(&mut self, index: usize, update: &PromotionUpdate) -> bool {
        let Some(current) = self.promotions.get(index) else {
            debug!(index, len = self.promotions.len(), "ignoring update of missing promotion");

            return false;
        };

        let updated = current.apply(update);

        let promotions = self
            .promotions
            .iter()
            .enumerate()
            .map(|(i, promotion)| {
                if i == index {
                    updated.clone()
                } else {
                    promotion.clone()
                }
            })
            .collect();

        self.replace_promotions(promotions);

        true
    }

    /// Remove the promotion at `index`, shifting later promotions down.
    ///
    /// An out-of-range `index` leaves the store untouched.
    pub fn remove_promotion(&mut self, index: usize) -> Option<Promotion> {
        if index >= self.promotions.len() {
            debug!(index, len = self.promotions.len(), "ignoring removal of missing promotion");

            return None;
        }

        let mut promotions = self.promotions.clone();
        let removed = promotions.remove(index);

        self.replace_promotions(promotions);

        Some(removed)
    }

    /// Replace the promotion list, and the base amount when the preset has
    /// one, with the contents of `fixture`.
    pub fn import(&mut self, fixture: &PromotionsFixture) {
        let promotions = fixture.promotions();
        let base_amount = fixture
            .base_amount
            .map_or(self.base_amount, coerce::non_negative);

        let promotions_changed = promotions != self.promotions;
        let base_changed = base_amount != self.base_amount;

        if promotions_changed {
            self.promotions = promotions;
            save(&mut self.persistence, keys::PROMOTIONS, &self.promotions);
        }

        if base_changed {
            self.base_amount = base_amount;
            save(&mut self.persistence, keys::BASE_AMOUNT, &self.base_amount);
        }

        if promotions_changed || base_changed {
            self.recompute();
        }
    }

    fn replace_promotions(&mut self, promotions: Vec<Promotion>) {
        if promotions == self.promotions {
            return;
        }

        self.promotions = promotions;
        save(&mut self.persistence, keys::PROMOTIONS, &self.promotions);
        self.recompute();
    }

    fn recompute(&mut self) {
        let evaluation = evaluate(&self.promotions, self.base_amount);

        if self.options.cache_evaluation && evaluation != self.evaluation {
            save(&mut self.persistence, keys::EVALUATION, &evaluation);
        }

        self.evaluation = evaluation;

        self.observer
            .on_evaluation(&self.promotions, self.base_amount, &self.evaluation);
    }
}

/// Encode and write `value`. Failures are logged; in-memory state stands.
fn save<T: Serialize + ?Sized>(persistence: &mut impl KeyValueStore, key: &str, value: &T) {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(error) => {
            warn!(key, %error, "failed to encode state");

            return;
        }
    };

    if let Err(error) = persistence.set(key, &encoded) {
        warn!(key, %error, "failed to persist state");
    }
}

/// Read and decode `key`. Missing, unreadable and undecodable values are all
/// `None`; the latter two are logged.
fn load<T: DeserializeOwned>(persistence: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = match persistence.get(key) {
        Ok(raw) => raw?,
        Err(error) => {
            warn!(key, %error, "failed to read persisted state");

            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(key, %error, "ignoring malformed persisted state");

            None
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        observer::RecordingObserver,
        persistence::{MemoryStore, MockKeyValueStore, PersistenceError},
        random::ScriptedRandom,
    };

    use super::*;

    type TestStore = PromotionStore<MemoryStore, ScriptedRandom, RecordingObserver>;

    fn store_with(entries: &[(&str, &str)]) -> TestStore {
        PromotionStore::open(
            MemoryStore::with_entries(entries.iter().copied()),
            ScriptedRandom::new([0, 7, 3]),
            RecordingObserver::default(),
            StoreOptions::default(),
        )
    }

    fn empty_store() -> TestStore {
        store_with(&[])
    }

    fn seeded_store() -> TestStore {
        store_with(&[
            ("prediscount", "100000"),
            (
                "providers",
                r#"[{"name":"A","discountPercentage":40,"maxDiscountAmount":10000},
                    {"name":"B","discountPercentage":25,"maxDiscountAmount":12500}]"#,
            ),
        ])
    }

    fn stored<T: DeserializeOwned>(store: &TestStore, key: &str) -> Option<T> {
        store
            .persistence()
            .raw(key)
            .and_then(|raw| serde_json::from_str(raw).ok())
    }

    #[test]
    fn opens_with_defaults() {
        let store = empty_store();

        assert_eq!(store.base_amount(), 0);
        assert!(store.promotions().is_empty());
        assert_eq!(store.evaluation(), Evaluation::default());
        assert!(store.best_promotion().is_none());
        assert!(store.observer().evaluations().is_empty());
    }

    #[test]
    fn opens_persisted_state() {
        let store = seeded_store();

        assert_eq!(store.base_amount(), 100_000);
        assert_eq!(store.promotions().len(), 2);
        assert_eq!(store.evaluation().amount(), 12_500);
        assert_eq!(store.evaluation().index(), Some(1));
        assert_eq!(store.best_promotion().map(|p| p.name.as_str()), Some("B"));
    }

    #[test]
    fn opens_persisted_promotions_in_order() {
        let store = seeded_store();

        assert_eq!(
            store.promotions(),
            [Promotion::new("A", 40, 10_000), Promotion::new("B", 25, 12_500)]
        );
    }

    #[test]
    fn stale_cached_evaluation_is_overwritten() {
        let store = store_with(&[
            ("prediscount", "100000"),
            (
                "providers",
                r#"[{"name":"A","discountPercentage":40,"maxDiscountAmount":10000}]"#,
            ),
            ("discount", r#"{"amount":99999,"index":3}"#),
        ]);

        assert_eq!(store.evaluation().amount(), 10_000);
        assert_eq!(
            stored::<Evaluation>(&store, "discount"),
            Some(store.evaluation())
        );
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let store = store_with(&[("prediscount", "\"lots\""), ("providers", "{oops")]);

        assert_eq!(store.base_amount(), 0);
        assert!(store.promotions().is_empty());
    }

    #[test]
    fn set_base_amount_coerces_input() {
        let mut store = empty_store();

        assert_eq!(store.set_base_amount("150000"), 150_000);
        assert_eq!(store.set_base_amount("abc"), 0);
        assert_eq!(store.set_base_amount("-20"), 0);
        assert_eq!(store.set_base_amount("75000abc"), 75_000);
        assert_eq!(stored::<i64>(&store, "prediscount"), Some(75_000));
    }

    #[test]
    fn base_amount_change_recomputes() {
        let mut store = seeded_store();

        store.set_base_amount("20000");

        // A: 8000, B: 5000
        assert_eq!(store.evaluation().amount(), 8_000);
        assert_eq!(store.evaluation().index(), Some(0));
        assert_eq!(store.observer().last(), Some(&store.evaluation()));
        assert_eq!(
            stored::<Evaluation>(&store, "discount"),
            Some(store.evaluation())
        );
    }

    #[test]
    fn unchanged_inputs_do_not_recompute() {
        let mut store = seeded_store();

        store.set_base_amount("100000");
        store.update_promotion(0, &PromotionUpdate::default().discount_percentage(40));

        assert!(store.observer().evaluations().is_empty());
    }

    #[test]
    fn add_promotion_appends_generated_promotion() -> TestResult {
        let mut store = empty_store();

        let index = store.add_promotion();
        let promotion = store.promotions().get(index).ok_or("missing promotion")?;

        assert_eq!(index, 0);
        assert_eq!(promotion, &Promotion::new("AVA", 40, 10_000));
        assert_eq!(
            stored::<Vec<Promotion>>(&store, "providers"),
            Some(vec![Promotion::new("AVA", 40, 10_000)])
        );
        assert_eq!(store.observer().evaluations().len(), 1);

        Ok(())
    }

    #[test]
    fn add_promotion_avoids_taken_names() {
        let mut store = empty_store();

        store.add_promotion();
        store.add_promotion();

        let names: Vec<&str> = store.promotions().iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, ["AVA", "AVA0"]);
    }

    #[test]
    fn update_promotion_clamps_percentage() {
        let mut store = seeded_store();

        store.update_promotion(0, &PromotionUpdate::default().discount_percentage(150));
        assert_eq!(
            store.promotions().first().map(|p| p.discount_percentage),
            Some(100)
        );

        store.update_promotion(0, &PromotionUpdate::default().discount_percentage(-5));
        assert_eq!(
            store.promotions().first().map(|p| p.discount_percentage),
            Some(0)
        );
    }

    #[test]
    fn update_promotion_replaces_only_target() {
        let mut store = seeded_store();
        let before = store.promotions().to_vec();

        assert!(store.update_promotion(1, &PromotionUpdate::default().name("Shark-Pay")));

        assert_eq!(store.promotions().first(), before.first());
        assert_eq!(
            store.promotions().get(1).map(|p| p.name.as_str()),
            Some("Shark-Pay")
        );
    }

    #[test]
    fn update_promotion_out_of_range_is_noop() {
        let mut store = seeded_store();
        let before = store.promotions().to_vec();

        assert!(!store.update_promotion(9, &PromotionUpdate::default().name("X")));
        assert_eq!(store.promotions(), before.as_slice());
        assert!(store.observer().evaluations().is_empty());
    }

    #[test]
    fn update_promotion_moves_winner() {
        let mut store = seeded_store();

        store.update_promotion(0, &PromotionUpdate::default().max_discount_amount(40_000));

        assert_eq!(store.evaluation().amount(), 40_000);
        assert_eq!(store.evaluation().index(), Some(0));
    }

    #[test]
    fn remove_promotion_shifts_later_entries() {
        let mut store = store_with(&[(
            "providers",
            r#"[{"name":"A","discountPercentage":10,"maxDiscountAmount":1},
                {"name":"B","discountPercentage":20,"maxDiscountAmount":2},
                {"name":"C","discountPercentage":30,"maxDiscountAmount":3}]"#,
        )]);

        let removed = store.remove_promotion(0);
        let names: Vec<&str> = store.promotions().iter().map(|p| p.name.as_str()).collect();

        assert_eq!(removed.map(|p| p.name), Some("A".to_string()));
        assert_eq!(names, ["B", "C"]);
    }

    #[test]
    fn remove_promotion_out_of_range_is_noop() {
        let mut store = seeded_store();

        assert_eq!(store.remove_promotion(2), None);
        assert_eq!(store.promotions().len(), 2);
    }

    #[test]
    fn removing_winner_recomputes() {
        let mut store = seeded_store();

        store.remove_promotion(1);

        assert_eq!(store.evaluation().amount(), 10_000);
        assert_eq!(store.evaluation().index(), Some(0));
    }

    #[test]
    fn import_replaces_list_and_base() -> TestResult {
        let mut store = seeded_store();
        let fixture = PromotionsFixture::from_yaml(
            "
base_amount: 50000
promotions:
  - name: Nana
    discount_percentage: 10
    max_discount_amount: 2500
",
        )?;

        store.import(&fixture);

        assert_eq!(store.base_amount(), 50_000);
        assert_eq!(store.promotions(), [Promotion::new("Nana", 10, 2_500)]);
        assert_eq!(store.evaluation().amount(), 2_500);
        assert_eq!(store.observer().evaluations().len(), 1);

        Ok(())
    }

    #[test]
    fn cache_can_be_disabled() {
        let mut store = PromotionStore::open(
            MemoryStore::new(),
            ScriptedRandom::new([0]),
            NoopObserver,
            StoreOptions {
                cache_evaluation: false,
            },
        );

        store.set_base_amount("1000");
        store.add_promotion();

        assert_eq!(store.persistence().raw("discount"), None);
    }

    #[test]
    fn write_failures_leave_state_intact() {
        let mut persistence = MockKeyValueStore::new();

        persistence.expect_get().returning(|_| Ok(None));
        persistence
            .expect_set()
            .returning(|_, _| Err(PersistenceError::Unavailable));

        let mut store = PromotionStore::open_default(persistence, ScriptedRandom::new([1]));

        store.set_base_amount("100000");
        store.add_promotion();

        assert_eq!(store.base_amount(), 100_000);
        assert_eq!(store.promotions().len(), 1);
        assert_eq!(store.best_promotion().map(|p| p.name.as_str()), Some("IVI"));
    }

    #[test]
    fn read_failures_start_from_defaults() {
        let mut persistence = MockKeyValueStore::new();

        persistence
            .expect_get()
            .returning(|_| Err(PersistenceError::Unavailable));
        persistence.expect_set().returning(|_, _| Ok(()));

        let store = PromotionStore::open_default(persistence, ScriptedRandom::default());

        assert_eq!(store.base_amount(), 0);
        assert!(store.promotions().is_empty());
    }

    #[test]
    fn mutations_write_expected_keys() {
        let mut persistence = MockKeyValueStore::new();

        persistence.expect_get().returning(|_| Ok(None));
        persistence
            .expect_set()
            .withf(|key, value| key == "discount" && value == r#"{"amount":0,"index":-1}"#)
            .once()
            .returning(|_, _| Ok(()));
        persistence
            .expect_set()
            .withf(|key, value| key == "prediscount" && value == "5000")
            .once()
            .returning(|_, _| Ok(()));

        let mut store = PromotionStore::open_default(persistence, ScriptedRandom::default());

        // Empty list: the evaluation stays (0, -1), so only the base amount is written.
        store.set_base_amount("5000");

        assert_eq!(store.base_amount(), 5_000);
    }
}
