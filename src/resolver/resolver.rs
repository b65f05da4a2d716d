use super::{classify, normalize, ResolveError};
use crate::{store::TransactionLog, LookupOutcome, ValidatedLookup};
use std::sync::Arc;
use tracing::{error, info};

/// Resolves validated inquiries against an injected transaction log
///
/// Holds no per-request state; clones share the same store handle.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn TransactionLog>,
}

impl Resolver {
    pub fn new(store: Arc<dyn TransactionLog>) -> Self {
        Self { store }
    }

    /// Resolve an inquiry to exactly one coded outcome
    pub async fn resolve(&self, lookup: &ValidatedLookup) -> LookupOutcome {
        match self.try_resolve(lookup).await {
            Ok(outcome) => {
                info!(
                    "RRN {} resolved to {}",
                    lookup.reference_number,
                    outcome.code.code()
                );
                outcome
            }
            Err(e) => {
                let code = e.result_code();
                error!(
                    "Resolving RRN {} failed ({}): {}",
                    lookup.reference_number,
                    code.code(),
                    e
                );
                LookupOutcome::new(code)
            }
        }
    }

    /// Normalize, look up and classify, surfacing the underlying failure
    pub async fn try_resolve(&self, lookup: &ValidatedLookup) -> Result<LookupOutcome, ResolveError> {
        let key = normalize::lookup_key(lookup)?;
        let rows = self.store.find(&key).await?;
        classify(&rows)
    }
}
