//! Output sinks receiving bucketed features.

use crate::error::Result;
use std::collections::BTreeMap;

/// Receives each placed feature together with its bucket name.
///
/// Errors are propagated unchanged to the caller of the bucketer; use
/// [`QuadcellError::sink`](crate::QuadcellError::sink) to wrap foreign errors.
pub trait FeatureSink<F> {
    fn emit(&mut self, bucket: &str, feature: &F) -> Result<()>;
}

impl<F, Func> FeatureSink<F> for Func
where
    Func: FnMut(&str, &F) -> Result<()>,
{
    fn emit(&mut self, bucket: &str, feature: &F) -> Result<()> {
        self(bucket, feature)
    }
}

/// In-memory buckets keyed by name.
impl<F: Clone> FeatureSink<F> for BTreeMap<String, Vec<F>> {
    fn emit(&mut self, bucket: &str, feature: &F) -> Result<()> {
        self.entry(bucket.to_string())
            .or_default()
            .push(feature.clone());
        Ok(())
    }
}
