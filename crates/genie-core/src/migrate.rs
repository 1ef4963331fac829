//! The fetch → transform → publish orchestration.
//!
//! One migration run is strictly sequential: fetch the source space,
//! rewrite its serialized definition, publish to the target. Any phase can
//! fail; later phases then never run, and the outcome still carries
//! whatever earlier phases produced (in particular the substitution report
//! survives a publish failure).

use tracing::{info, warn};

use crate::store::{SpaceReader, SpaceWriter};
use crate::{MigrateError, RuleSet, Space, SubstitutionReport, transform};

/// How the transformed space reaches the target workspace.
///
/// Fixed by the caller before the run starts and never re-derived from
/// fetched data. The constructors validate up front, so an incomplete mode
/// is rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishMode {
    /// Create a fresh space; the target workspace allocates the id.
    Create { warehouse_id: String },
    /// Overwrite an existing space in place.
    Update { space_id: String },
}

impl PublishMode {
    /// Create mode. Fails with [`MigrateError::MissingWarehouse`] when no
    /// warehouse id is supplied, since a new space cannot run without one.
    pub fn create(warehouse_id: Option<String>) -> Result<Self, MigrateError> {
        match warehouse_id.filter(|id| !id.is_empty()) {
            Some(warehouse_id) => Ok(Self::Create { warehouse_id }),
            None => Err(MigrateError::MissingWarehouse),
        }
    }

    /// Update mode. Fails with [`MigrateError::MissingTarget`] when no
    /// target space id is supplied.
    pub fn update(space_id: Option<String>) -> Result<Self, MigrateError> {
        match space_id.filter(|id| !id.is_empty()) {
            Some(space_id) => Ok(Self::Update { space_id }),
            None => Err(MigrateError::MissingTarget),
        }
    }
}

/// Status of one phase within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    /// An earlier phase failed before this one started.
    NotRun,
    Succeeded,
    Failed,
}

/// Aggregate result of one migration run.
///
/// Returned even when the run fails, so callers can see exactly which
/// phase stopped it and everything the earlier phases produced.
#[derive(Debug)]
pub struct MigrationOutcome {
    pub fetch: PhaseStatus,
    pub transform: PhaseStatus,
    pub publish: PhaseStatus,
    /// Per-rule substitution report; present once transform has run.
    pub report: Option<SubstitutionReport>,
    /// Destination space id; present once publish has succeeded.
    pub space_id: Option<String>,
    /// The error that halted the run, if any.
    pub error: Option<MigrateError>,
}

impl MigrationOutcome {
    fn pending() -> Self {
        Self {
            fetch: PhaseStatus::NotRun,
            transform: PhaseStatus::NotRun,
            publish: PhaseStatus::NotRun,
            report: None,
            space_id: None,
            error: None,
        }
    }

    /// Whether the whole run completed.
    pub fn succeeded(&self) -> bool {
        self.publish == PhaseStatus::Succeeded && self.error.is_none()
    }
}

/// Publish a space to the target workspace according to `mode`.
///
/// Exactly one write happens: create or update, never both. On create, the
/// caller-supplied warehouse id replaces whatever the source space carried,
/// and any source space id is dropped so the target allocates a fresh one.
/// Returns the destination space id.
pub async fn publish_space<W: SpaceWriter>(
    writer: &W,
    mode: &PublishMode,
    mut space: Space,
) -> Result<String, MigrateError> {
    match mode {
        PublishMode::Create { warehouse_id } => {
            space.warehouse_id = Some(warehouse_id.clone());
            space.space_id = None;
            info!(warehouse_id = %warehouse_id, "creating new space in target workspace");
            let new_id = writer
                .create_space(&space)
                .await
                .map_err(|source| MigrateError::PublishFailed { source })?;
            info!(space_id = %new_id, "created space");
            Ok(new_id)
        }
        PublishMode::Update { space_id } => {
            info!(space_id = %space_id, "updating existing space in target workspace");
            writer
                .update_space(space_id, &space)
                .await
                .map_err(|source| MigrateError::PublishFailed { source })?;
            info!(space_id = %space_id, "updated space");
            Ok(space_id.clone())
        }
    }
}

/// Runs migrations between a source and a target workspace.
pub struct Migrator<R, W> {
    reader: R,
    writer: W,
}

impl<R: SpaceReader, W: SpaceWriter> Migrator<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Run one migration: fetch `source_space_id`, apply `rules` to its
    /// serialized definition, publish per `mode`.
    ///
    /// The transform phase always executes, even for an empty rule set, so
    /// the outcome shape is uniform. The target workspace is touched
    /// exactly once, in the publish phase, with the fully transformed
    /// definition; a failed transform never reaches the network.
    pub async fn run(
        &self,
        source_space_id: &str,
        rules: &RuleSet,
        mode: &PublishMode,
    ) -> MigrationOutcome {
        let mut outcome = MigrationOutcome::pending();

        info!(space_id = %source_space_id, "fetching space from source workspace");
        let space = match self.reader.fetch_space(source_space_id).await {
            Ok(space) => {
                info!(title = %space.display_title(), "fetched space");
                outcome.fetch = PhaseStatus::Succeeded;
                space
            }
            Err(source) => {
                outcome.fetch = PhaseStatus::Failed;
                outcome.error = Some(MigrateError::FetchFailed {
                    space_id: source_space_id.to_string(),
                    source,
                });
                return outcome;
            }
        };

        if space.has_empty_definition() {
            warn!("serialized space is empty or was not included");
        }
        let serialized = space.serialized_space.clone().unwrap_or_default();

        info!(rules = rules.len(), "applying transformation rules");
        let (transformed, report) = match transform::apply(&serialized, rules) {
            Ok(pair) => {
                outcome.transform = PhaseStatus::Succeeded;
                pair
            }
            Err(err) => {
                outcome.transform = PhaseStatus::Failed;
                outcome.error = Some(err);
                return outcome;
            }
        };
        info!(
            replacements = report.total_replacements(),
            zero_match = report.zero_match_rules().count(),
            "transformations applied"
        );
        outcome.report = Some(report);

        let mut publish = space;
        publish.serialized_space = Some(transformed);

        match publish_space(&self.writer, mode, publish).await {
            Ok(space_id) => {
                outcome.publish = PhaseStatus::Succeeded;
                outcome.space_id = Some(space_id);
            }
            Err(err) => {
                outcome.publish = PhaseStatus::Failed;
                outcome.error = Some(err);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::StoreError;

    /// Stub workspace that counts every call and can be told to fail.
    #[derive(Default)]
    struct StubStore {
        space: Option<Space>,
        fail_fetch: bool,
        fail_publish: bool,
        fetch_calls: AtomicUsize,
        create_calls: AtomicUsize,
        update_calls: AtomicUsize,
        published: Mutex<Option<Space>>,
    }

    impl StubStore {
        fn with_definition(serialized: &str) -> Self {
            Self {
                space: Some(Space {
                    space_id: Some("src-1".to_string()),
                    title: Some("Sales".to_string()),
                    serialized_space: Some(serialized.to_string()),
                    ..Space::default()
                }),
                ..Self::default()
            }
        }

        fn publish_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst) + self.update_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SpaceReader for &StubStore {
        async fn fetch_space(&self, space_id: &str) -> Result<Space, StoreError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch {
                return Err(StoreError::Transport("connection refused".to_string()));
            }
            self.space.clone().ok_or_else(|| StoreError::NotFound {
                space_id: space_id.to_string(),
            })
        }
    }

    #[async_trait]
    impl SpaceWriter for &StubStore {
        async fn create_space(&self, space: &Space) -> Result<String, StoreError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_publish {
                return Err(StoreError::Auth("token expired".to_string()));
            }
            *self.published.lock().unwrap() = Some(space.clone());
            Ok("dst-1".to_string())
        }

        async fn update_space(&self, space_id: &str, space: &Space) -> Result<(), StoreError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_publish {
                return Err(StoreError::Auth("token expired".to_string()));
            }
            let mut published = space.clone();
            published.space_id = Some(space_id.to_string());
            *self.published.lock().unwrap() = Some(published);
            Ok(())
        }
    }

    fn create_mode() -> PublishMode {
        PublishMode::create(Some("wh-9".to_string())).unwrap()
    }

    #[tokio::test]
    async fn full_run_creates_transformed_space() {
        let store = StubStore::with_definition("SELECT * FROM prod.sales");
        let rules = RuleSet::from_pairs([("prod.", "dev.")]);

        let outcome = Migrator::new(&store, &store)
            .run("src-1", &rules, &create_mode())
            .await;

        assert!(outcome.succeeded());
        assert_eq!(outcome.fetch, PhaseStatus::Succeeded);
        assert_eq!(outcome.transform, PhaseStatus::Succeeded);
        assert_eq!(outcome.publish, PhaseStatus::Succeeded);
        assert_eq!(outcome.space_id.as_deref(), Some("dst-1"));
        assert_eq!(outcome.report.unwrap().total_replacements(), 1);

        let published = store.published.lock().unwrap().clone().unwrap();
        assert_eq!(
            published.serialized_space.as_deref(),
            Some("SELECT * FROM dev.sales")
        );
        assert_eq!(published.warehouse_id.as_deref(), Some("wh-9"));
        // Create must not carry the source id; the target allocates one.
        assert_eq!(published.space_id, None);
        // Title carries over untouched.
        assert_eq!(published.title.as_deref(), Some("Sales"));
    }

    #[tokio::test]
    async fn update_mode_writes_to_the_given_target() {
        let store = StubStore::with_definition("body");
        let mode = PublishMode::update(Some("existing-7".to_string())).unwrap();

        let outcome = Migrator::new(&store, &store)
            .run("src-1", &RuleSet::default(), &mode)
            .await;

        assert!(outcome.succeeded());
        assert_eq!(outcome.space_id.as_deref(), Some("existing-7"));
        assert_eq!(store.update_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_writer_uninvoked() {
        let store = StubStore {
            fail_fetch: true,
            ..StubStore::with_definition("body")
        };

        let outcome = Migrator::new(&store, &store)
            .run("src-1", &RuleSet::default(), &create_mode())
            .await;

        assert!(!outcome.succeeded());
        assert_eq!(outcome.fetch, PhaseStatus::Failed);
        assert_eq!(outcome.transform, PhaseStatus::NotRun);
        assert_eq!(outcome.publish, PhaseStatus::NotRun);
        assert!(matches!(outcome.error, Some(MigrateError::FetchFailed { .. })));
        assert_eq!(store.publish_calls(), 0);
    }

    #[tokio::test]
    async fn publish_failure_still_returns_the_transform_report() {
        let store = StubStore {
            fail_publish: true,
            ..StubStore::with_definition("aXa")
        };
        let rules = RuleSet::from_pairs([("X", "Y")]);

        let outcome = Migrator::new(&store, &store)
            .run("src-1", &rules, &create_mode())
            .await;

        assert!(!outcome.succeeded());
        assert_eq!(outcome.transform, PhaseStatus::Succeeded);
        assert_eq!(outcome.publish, PhaseStatus::Failed);
        assert!(matches!(outcome.error, Some(MigrateError::PublishFailed { .. })));
        // The report computed before publish was attempted is preserved.
        assert_eq!(outcome.report.unwrap().total_replacements(), 1);
    }

    #[tokio::test]
    async fn invalid_rule_halts_before_publish() {
        let store = StubStore::with_definition("body");
        let rules = RuleSet::from_pairs([("", "x")]);

        let outcome = Migrator::new(&store, &store)
            .run("src-1", &rules, &create_mode())
            .await;

        assert_eq!(outcome.transform, PhaseStatus::Failed);
        assert_eq!(outcome.publish, PhaseStatus::NotRun);
        assert!(matches!(outcome.error, Some(MigrateError::InvalidRule { index: 0 })));
        assert_eq!(store.publish_calls(), 0);
    }

    #[tokio::test]
    async fn empty_rule_set_still_runs_the_transform_phase() {
        let store = StubStore::with_definition("unchanged");

        let outcome = Migrator::new(&store, &store)
            .run("src-1", &RuleSet::default(), &create_mode())
            .await;

        assert!(outcome.succeeded());
        assert_eq!(outcome.transform, PhaseStatus::Succeeded);
        let report = outcome.report.unwrap();
        assert!(report.is_empty());
        let published = store.published.lock().unwrap().clone().unwrap();
        assert_eq!(published.serialized_space.as_deref(), Some("unchanged"));
    }

    #[tokio::test]
    async fn missing_target_is_rejected_before_any_fetch() {
        let store = StubStore::with_definition("body");

        let err = PublishMode::update(None).unwrap_err();
        assert!(matches!(err, MigrateError::MissingTarget));

        let err = PublishMode::update(Some(String::new())).unwrap_err();
        assert!(matches!(err, MigrateError::MissingTarget));

        // Mode validation happens before a migrator is ever driven.
        assert_eq!(store.fetch_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.publish_calls(), 0);
    }

    #[tokio::test]
    async fn missing_warehouse_is_rejected_before_any_fetch() {
        let store = StubStore::with_definition("body");

        let err = PublishMode::create(None).unwrap_err();
        assert!(matches!(err, MigrateError::MissingWarehouse));
        assert_eq!(store.fetch_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.publish_calls(), 0);
    }

    #[tokio::test]
    async fn malformed_rules_fail_before_any_network_call() {
        let store = StubStore::with_definition("body");

        let err = RuleSet::from_json_str(r#"{"a": {"nested": true}}"#).unwrap_err();
        assert!(matches!(err, MigrateError::MalformedRuleSet(_)));

        // Rule parsing precedes orchestration; the stub saw nothing.
        assert_eq!(store.fetch_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.publish_calls(), 0);
    }

    #[tokio::test]
    async fn source_without_definition_publishes_empty_definition() {
        let store = StubStore {
            space: Some(Space {
                space_id: Some("src-1".to_string()),
                ..Space::default()
            }),
            ..StubStore::default()
        };

        let outcome = Migrator::new(&store, &store)
            .run("src-1", &RuleSet::default(), &create_mode())
            .await;

        assert!(outcome.succeeded());
        let published = store.published.lock().unwrap().clone().unwrap();
        assert_eq!(published.serialized_space.as_deref(), Some(""));
    }
}
