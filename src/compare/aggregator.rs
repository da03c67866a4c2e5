// Result aggregator
//
// Deterministic metrics always run. The oracle path runs next to them, bounded
// by a timeout, and any failure on it degrades the semantic section to
// "unavailable" instead of failing the comparison.

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::types::{CompareConfig, ComparisonResult, OracleFailure, TextStats, WordBreakdown};
use crate::metrics::{compute_all, MetricSet};
use crate::oracle::{build_prompt, parse_oracle_output, OracleError, OracleResponse, SemanticOracle};

/// Comparison engine with its configuration and optional oracle
///
/// Holds no per-request state; share it behind an `Arc`.
#[derive(Clone)]
pub struct Comparator {
    config: CompareConfig,
    oracle: Option<Arc<dyn SemanticOracle>>,
}

impl Comparator {
    pub fn new(config: CompareConfig, oracle: Option<Arc<dyn SemanticOracle>>) -> Self {
        Self { config, oracle }
    }

    /// Engine that only reports deterministic metrics
    pub fn without_oracle(config: CompareConfig) -> Self {
        Self::new(config, None)
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn oracle(&self) -> Option<&Arc<dyn SemanticOracle>> {
        self.oracle.as_ref()
    }

    /// Compare two texts
    pub async fn compare(&self, text_a: &str, text_b: &str) -> ComparisonResult {
        compare(text_a, text_b, &self.config, self.oracle.as_deref()).await
    }
}

/// Outcome of the oracle path for one comparison
enum SemanticOutcome {
    Answered(OracleResponse),
    Unavailable(OracleFailure),
}

/// Compare two texts with an explicit config and oracle
///
/// Never fails. With no oracle, a disabled oracle, or a failing oracle the
/// result carries full deterministic metrics and `ai_available = false`.
pub async fn compare(
    text_a: &str,
    text_b: &str,
    config: &CompareConfig,
    oracle: Option<&dyn SemanticOracle>,
) -> ComparisonResult {
    let start = Instant::now();

    // Only a provider that is actually asked gets named in the result
    let asked = oracle.filter(|_| config.enable_semantic_oracle);

    let deterministic = {
        let (owned_a, owned_b) = (text_a.to_owned(), text_b.to_owned());
        tokio::task::spawn_blocking(move || deterministic_sections(&owned_a, &owned_b))
    };
    // Oracle first: join! polls in order, so the request is in flight while
    // the metrics run on the blocking pool
    let (outcome, computed) =
        tokio::join!(semantic_analysis(text_a, text_b, config, oracle), deterministic);

    let (metrics, words, stats) = match computed {
        Ok(sections) => sections,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            tracing::warn!(error = %e, "Metric task cancelled, computing inline");
            deterministic_sections(text_a, text_b)
        }
    };

    let (analysis, ai_available, oracle_failure) = match outcome {
        SemanticOutcome::Answered(response) => (response, true, None),
        SemanticOutcome::Unavailable(failure) => (OracleResponse::unavailable(), false, Some(failure)),
    };

    tracing::info!(
        cosine = metrics.cosine_similarity.value,
        jaccard = metrics.jaccard_index.value,
        ai_available,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Comparison complete"
    );

    ComparisonResult {
        metrics,
        words,
        stats,
        semantic_analysis: analysis,
        ai_available,
        oracle_provider: asked.map(|o| o.name().to_string()),
        oracle_failure,
        compared_at: Utc::now(),
    }
}

/// Everything that does not depend on the oracle; CPU-bound on large inputs
fn deterministic_sections(text_a: &str, text_b: &str) -> (MetricSet, WordBreakdown, TextStats) {
    (
        compute_all(text_a, text_b),
        WordBreakdown::new(text_a, text_b),
        TextStats::new(text_a, text_b),
    )
}

/// Prompt, invoke, and parse; one attempt, bounded by the configured timeout
async fn semantic_analysis(
    text_a: &str,
    text_b: &str,
    config: &CompareConfig,
    oracle: Option<&dyn SemanticOracle>,
) -> SemanticOutcome {
    if !config.enable_semantic_oracle {
        return SemanticOutcome::Unavailable(OracleFailure::disabled());
    }
    let Some(oracle) = oracle else {
        return SemanticOutcome::Unavailable(OracleFailure::not_configured());
    };

    let prompt = build_prompt(text_a, text_b, config.excerpt_chars);
    let timeout = Duration::from_millis(config.oracle_timeout_ms);

    let raw = match tokio::time::timeout(timeout, oracle.invoke(&prompt)).await {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => return oracle_failed(oracle, e),
        Err(_) => {
            let e = OracleError::Timeout(format!("no reply within {} ms", config.oracle_timeout_ms));
            return oracle_failed(oracle, e);
        }
    };

    let response = parse_oracle_output(&raw);
    if !response.has_content() {
        tracing::warn!(provider = oracle.name(), "Oracle reply had nothing usable");
        return SemanticOutcome::Unavailable(OracleFailure::unparseable());
    }

    SemanticOutcome::Answered(response)
}

fn oracle_failed(oracle: &dyn SemanticOracle, e: OracleError) -> SemanticOutcome {
    tracing::warn!(
        provider = oracle.name(),
        kind = e.kind(),
        error = %e,
        "Semantic oracle unavailable, continuing with deterministic metrics"
    );
    SemanticOutcome::Unavailable(OracleFailure::from(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedOracle(&'static str);

    #[async_trait]
    impl SemanticOracle for FixedOracle {
        async fn invoke(&self, _prompt: &str) -> Result<String, OracleError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }

        fn model(&self) -> &str {
            "fixed-1"
        }
    }

    #[tokio::test]
    async fn test_no_oracle_is_degraded_not_failed() {
        let result = compare("hello world", "hello there", &CompareConfig::default(), None).await;
        assert!(!result.ai_available);
        assert_eq!(result.oracle_failure.unwrap().kind, "not_configured");
        assert!(result.metrics.jaccard_index.value > 0.0);
    }

    #[tokio::test]
    async fn test_disabled_oracle_is_not_called() {
        let config = CompareConfig {
            enable_semantic_oracle: false,
            ..CompareConfig::default()
        };
        let oracle = FixedOracle(r#"{"semantic_similarity": 0.9}"#);
        let result = compare("a", "b", &config, Some(&oracle)).await;
        assert!(!result.ai_available);
        assert!(result.oracle_provider.is_none());
        assert_eq!(result.oracle_failure.unwrap().kind, "disabled");
    }

    #[tokio::test]
    async fn test_failed_oracle_is_still_named() {
        let oracle = FixedOracle("nothing useful here");
        let result = compare("a", "b", &CompareConfig::default(), Some(&oracle)).await;
        assert!(!result.ai_available);
        assert_eq!(result.oracle_provider.as_deref(), Some("fixed"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_degraded() {
        let oracle = FixedOracle("no idea, sorry");
        let result = compare("a", "b", &CompareConfig::default(), Some(&oracle)).await;
        assert!(!result.ai_available);
        assert_eq!(result.oracle_failure.unwrap().kind, "unparseable");
    }

    #[tokio::test]
    async fn test_comparator_uses_its_oracle() {
        let comparator = Comparator::new(
            CompareConfig::default(),
            Some(Arc::new(FixedOracle(r#"{"semantic_similarity": 0.9}"#))),
        );
        let result = comparator.compare("a b", "a c").await;
        assert!(result.ai_available);
        assert_eq!(result.oracle_provider.as_deref(), Some("fixed"));
        assert_eq!(result.semantic_analysis.semantic_similarity.value(), Some(&0.9));
    }
}
