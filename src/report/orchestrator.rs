use std::panic::{AssertUnwindSafe, catch_unwind};

use super::{AggregateReport, ModuleProgress, SampleNameCleaner};
use crate::build::BuildContext;
use crate::cancel::CancelToken;
use crate::config::RunConfig;
use crate::error::{LogweaveError, Result};
use crate::module::{ExtractOutcome, ModuleRegistry, ModuleResult};
use crate::scanner::CandidateFile;

/// Run every module in the resolved run-set, in order, with fault isolation.
///
/// A module that returns an error or panics is logged and recorded as a
/// failure; the loop continues, so one broken extractor never discards the
/// results other modules already produced. Cancellation is the exception:
/// it aborts the whole run at the next module boundary.
///
/// # Errors
/// Returns `Cancelled` when the token is tripped, or a configuration error
/// from the sample-name rules. Module-level errors never escape this loop.
pub fn run_modules(
    registry: &ModuleRegistry,
    run_set: &[&'static str],
    files: &[CandidateFile],
    config: &RunConfig,
    ctx: &BuildContext,
    cancel: &CancelToken,
    progress: &ModuleProgress,
) -> Result<AggregateReport> {
    let cleaner = SampleNameCleaner::from_rules(&config.samples)?;
    let mut report = AggregateReport::new(config.run_id.clone(), config.title.clone());

    for &module_id in run_set {
        if cancel.is_cancelled() {
            return Err(LogweaveError::Cancelled);
        }

        progress.start_module(module_id);
        let span = tracing::info_span!("module", id = module_id);
        let _guard = span.enter();

        match invoke_module(registry, module_id, files) {
            Invocation::Extracted(result) => {
                if let Err(e) = stage_assets(&result, ctx) {
                    tracing::error!(module = module_id, error = %e, "asset staging failed");
                    report.record_failure(module_id);
                } else {
                    tracing::debug!(
                        module = module_id,
                        samples = result.general_stats.len(),
                        "module finished"
                    );
                    report.record(module_id, result, &cleaner);
                }
            }
            Invocation::Skipped => {
                tracing::debug!(module = module_id, "no matching files, skipping");
            }
            Invocation::Failed(diagnostic) => {
                tracing::error!(module = module_id, error = %diagnostic, "module failed");
                report.record_failure(module_id);
            }
        }

        progress.inc();
    }

    progress.finish();
    Ok(report)
}

enum Invocation {
    Extracted(ModuleResult),
    Skipped,
    Failed(String),
}

/// Invoke one module inside the isolation boundary.
///
/// `catch_unwind` contains panics from independently-authored extraction
/// code; the panic payload becomes part of the diagnostic.
fn invoke_module(
    registry: &ModuleRegistry,
    module_id: &str,
    files: &[CandidateFile],
) -> Invocation {
    let Some(module) = registry.instantiate(module_id) else {
        return Invocation::Failed(format!("module '{module_id}' is not registered"));
    };

    match catch_unwind(AssertUnwindSafe(|| module.extract(files))) {
        Ok(Ok(ExtractOutcome::Extracted(result))) => Invocation::Extracted(result),
        Ok(Ok(ExtractOutcome::NoMatchingFiles)) => Invocation::Skipped,
        Ok(Err(e)) => Invocation::Failed(error_chain(&e)),
        Err(payload) => Invocation::Failed(format!("panic: {}", panic_message(payload.as_ref()))),
    }
}

fn error_chain(err: &LogweaveError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload.downcast_ref::<&str>().map_or_else(
        || {
            payload
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| "opaque panic payload".to_string())
        },
        |s| (*s).to_string(),
    )
}

fn stage_assets(result: &ModuleResult, ctx: &BuildContext) -> Result<()> {
    let Some(assets) = &result.assets else {
        return Ok(());
    };
    for (dest_rel, src) in assets.iter() {
        ctx.stage_asset(dest_rel, src)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
