//! ReportEngine: the explicit context object for report requests.
//!
//! One `generate` call runs the whole flow for one (subject, report type):
//! cache read, dependency gate, calculation, interpretation, prompt
//! compilation, multi-pass generation, and a single append on success.
//! A failure or cancellation anywhere before the append leaves the store
//! untouched.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use quill_core::config::QuillConfig;
use quill_core::errors::{ConfigError, GenerationError, QuillResult};
use quill_core::models::{MetricBundle, NewReport, RawDataBundle, ReportKey, ReportRecord, ReportTypeSpec};
use quill_core::traits::{IRawDataCache, IReportStore, ITextGenerator};
use quill_generation::{compile_report_prompt, PassRequest, PassRunner, StageProgress, StageRecord};
use quill_metrics::{interpret_bundle, CalculatorRegistry};
use quill_observability::events;
use quill_observability::{calculate_span, generate_span, resolve_span};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::registry::ReportTypeRegistry;
use crate::resolver::{resolve, Resolution};

/// Engine behavior knobs lifted from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Queue concurrent `generate` calls for the same key.
    pub serialize_per_key: bool,
    pub stale_after_hours: u64,
}

impl EngineSettings {
    pub fn from_config(config: &QuillConfig) -> Self {
        Self {
            serialize_per_key: config.generation.serialize_per_key,
            stale_after_hours: config.metrics.stale_after_hours,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&QuillConfig::default())
    }
}

/// A persisted report plus how each stage went.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    pub record: ReportRecord,
    pub stages: Vec<StageRecord>,
}

pub struct ReportEngine<C, G, S> {
    cache: C,
    generator: G,
    store: S,
    report_types: ReportTypeRegistry,
    calculators: CalculatorRegistry,
    settings: EngineSettings,
    key_locks: DashMap<ReportKey, Arc<Mutex<()>>>,
}

impl<C, G, S> ReportEngine<C, G, S>
where
    C: IRawDataCache,
    G: ITextGenerator,
    S: IReportStore,
{
    /// Build both registries from `config`. Fails on a report type bound
    /// to an unknown calculator or an incomplete custom report type.
    pub fn new(cache: C, generator: G, store: S, config: &QuillConfig) -> Result<Self, ConfigError> {
        let calculators = CalculatorRegistry::builtin(&config.metrics);
        let report_types = ReportTypeRegistry::from_config(config, &calculators)?;
        Ok(Self::with_registries(
            cache,
            generator,
            store,
            report_types,
            calculators,
            EngineSettings::from_config(config),
        ))
    }

    pub fn with_registries(
        cache: C,
        generator: G,
        store: S,
        report_types: ReportTypeRegistry,
        calculators: CalculatorRegistry,
        settings: EngineSettings,
    ) -> Self {
        Self {
            cache,
            generator,
            store,
            report_types,
            calculators,
            settings,
            key_locks: DashMap::new(),
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn report_types(&self) -> &ReportTypeRegistry {
        &self.report_types
    }

    /// Whether `report_type` can run for `subject` with what is cached now.
    pub async fn check_readiness(&self, subject: &str, report_type: &str) -> QuillResult<Resolution> {
        let spec = self.report_types.get(report_type)?;
        let bundle = self.cache.get(subject).await?;
        let _span = resolve_span!(subject, report_type).entered();
        Ok(resolve(spec, &bundle.available_endpoints()))
    }

    /// Gate and calculate without generating. Interpretations are attached.
    pub async fn compute_metrics(&self, subject: &str, report_type: &str) -> QuillResult<MetricBundle> {
        let spec = self.report_types.get(report_type)?;
        let bundle = self.cache.get(subject).await?;
        self.gate(spec, &bundle)?;
        self.calculate(spec, &bundle)
    }

    /// Run one report request end to end and append the result.
    ///
    /// `progress` sees each stage before it starts. Cancelling `cancel`
    /// aborts the request with `Cancelled`; nothing is appended.
    pub async fn generate(
        &self,
        subject: &str,
        report_type: &str,
        progress: &(dyn Fn(StageProgress<'_>) + Send + Sync),
        cancel: &CancellationToken,
    ) -> QuillResult<GeneratedReport> {
        let spec = self.report_types.get(report_type)?;
        let span = generate_span!(subject, report_type, spec.pass_strategy.len());
        self.run_request(spec, subject, progress, cancel)
            .instrument(span)
            .await
    }

    async fn run_request(
        &self,
        spec: &ReportTypeSpec,
        subject: &str,
        progress: &(dyn Fn(StageProgress<'_>) + Send + Sync),
        cancel: &CancellationToken,
    ) -> QuillResult<GeneratedReport> {
        let bundle = self.cache.get(subject).await?;
        self.gate(spec, &bundle)?;
        self.warn_if_stale(&bundle);
        let metrics = self.calculate(spec, &bundle)?;
        let prompt = compile_report_prompt(&spec.prompt_template, &metrics, Utc::now())?;

        let lease = self.key_lock(subject, &spec.name);
        let _guard = match lease.as_ref().and_then(KeyLease::lock) {
            Some(lock) => tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(cancelled_at(spec, 0).into());
                }
                guard = lock.lock() => Some(guard),
            },
            None => None,
        };

        let request = PassRequest {
            subject,
            report_type: &spec.name,
            prompt: &prompt,
            strategy: &spec.pass_strategy,
        };
        let outcome = PassRunner::new(&self.generator)
            .run(request, progress, cancel)
            .await?;

        if cancel.is_cancelled() {
            return Err(cancelled_at(spec, spec.pass_strategy.len().saturating_sub(1)).into());
        }

        let stage_names = outcome.stage_names();
        let elapsed_ms = outcome.stages.iter().map(|s| s.elapsed_ms).sum::<u64>();
        let record = self
            .store
            .append(NewReport {
                subject: subject.to_string(),
                report_type: spec.name.clone(),
                content: outcome.content,
                prompt_used: prompt,
            })
            .await?;
        events::report_generated(
            subject,
            &spec.name,
            &record.id,
            record.version,
            &stage_names,
            elapsed_ms,
        );

        Ok(GeneratedReport {
            record,
            stages: outcome.stages,
        })
    }

    /// Every stored report for a key, newest first.
    pub async fn history(&self, subject: &str, report_type: &str) -> QuillResult<Vec<ReportRecord>> {
        self.store.list(subject, report_type).await
    }

    pub async fn latest(&self, subject: &str, report_type: &str) -> QuillResult<Option<ReportRecord>> {
        self.store.latest(subject, report_type).await
    }

    /// Delete one report by id. Returns whether it existed.
    pub async fn delete(&self, report_id: &str) -> QuillResult<bool> {
        let removed = self.store.delete(report_id).await?;
        if removed {
            events::report_deleted(report_id);
        }
        Ok(removed)
    }

    fn gate(&self, spec: &ReportTypeSpec, bundle: &RawDataBundle) -> QuillResult<()> {
        let _span = resolve_span!(bundle.subject, spec.name).entered();
        let resolution = resolve(spec, &bundle.available_endpoints());
        if !resolution.ready {
            events::dependencies_missing(&bundle.subject, &spec.name, &resolution.missing);
        }
        resolution.into_result(&bundle.subject, &spec.name)?;
        Ok(())
    }

    fn calculate(&self, spec: &ReportTypeSpec, bundle: &RawDataBundle) -> QuillResult<MetricBundle> {
        let _span = calculate_span!(bundle.subject, spec.calculator).entered();
        let calculator = self.calculators.get(&spec.calculator)?;
        let mut metrics = calculator.calculate(bundle, &spec.name)?;
        interpret_bundle(&mut metrics, &spec.thresholds);
        events::metrics_calculated(
            &bundle.subject,
            &spec.name,
            metrics.metrics.len(),
            metrics.available_count(),
        );
        Ok(metrics)
    }

    fn warn_if_stale(&self, bundle: &RawDataBundle) {
        let hours = self.settings.stale_after_hours;
        let Some(cutoff) = i64::try_from(hours)
            .ok()
            .and_then(chrono::Duration::try_hours)
            .and_then(|age| Utc::now().checked_sub_signed(age))
        else {
            return;
        };
        let stale = bundle.stale_endpoints(cutoff);
        if !stale.is_empty() {
            events::stale_data(&bundle.subject, &stale, hours);
        }
    }

    /// Keys with a request currently holding or waiting on their lock.
    pub fn active_keys(&self) -> usize {
        self.key_locks.len()
    }

    fn key_lock(&self, subject: &str, report_type: &str) -> Option<KeyLease<'_>> {
        if !self.settings.serialize_per_key {
            return None;
        }
        let key = ReportKey::new(subject, report_type);
        let lock = self.key_locks.entry(key.clone()).or_default().clone();
        Some(KeyLease {
            locks: &self.key_locks,
            key,
            lock: Some(lock),
        })
    }
}

/// One request's claim on a per-key lock. Dropping the last claim removes
/// the key from the map, including when the request future is dropped.
struct KeyLease<'a> {
    locks: &'a DashMap<ReportKey, Arc<Mutex<()>>>,
    key: ReportKey,
    lock: Option<Arc<Mutex<()>>>,
}

impl KeyLease<'_> {
    fn lock(&self) -> Option<&Mutex<()>> {
        self.lock.as_deref()
    }
}

impl Drop for KeyLease<'_> {
    fn drop(&mut self) {
        drop(self.lock.take());
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

fn cancelled_at(spec: &ReportTypeSpec, index: usize) -> GenerationError {
    GenerationError::Cancelled {
        stage: spec
            .pass_strategy
            .stages
            .get(index)
            .map(|s| s.name.clone())
            .unwrap_or_default(),
    }
}

impl<C, G, S> std::fmt::Debug for ReportEngine<C, G, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportEngine")
            .field("report_types", &self.report_types.names())
            .field("calculators", &self.calculators)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
