//! Serializable filter state
//!
//! A [`FilterSnapshot`] carries exactly what is needed to rebuild a filter
//! that answers every lookup the same way: size, hash count, insertion
//! counter and the raw bit buffer. Decoding is strictly typed; unknown or
//! missing fields, wrong numeric types and a buffer whose length differs from
//! the declared size all fail with [`FilterError::Serialization`].

use serde::{Deserialize, Serialize};

use crate::domain::{Filter, ScalableConfig, ScalableFilter};
use crate::error::FilterError;

/// Snapshot of a partitioned filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSnapshot {
    /// Size in bytes
    pub size: u64,
    /// Number of partitions / hash values
    pub k: u64,
    /// Feed calls since construction or last reset
    pub inserted: u64,
    /// Raw bit buffer, `size` bytes
    #[serde(with = "hex_bytes")]
    pub bits: Vec<u8>,
}

/// Snapshot of a scalable filter, sub-filters newest first
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalableSnapshot {
    pub config: ScalableConfig,
    /// False positive target of the newest sub-filter
    pub target_fpr: f64,
    pub filters: Vec<FilterSnapshot>,
}

/// Bytes as a hex string in human readable formats, raw otherwise
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(bytes))
        } else {
            bytes.serialize(serializer)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let encoded = String::deserialize(deserializer)?;
            hex::decode(encoded).map_err(serde::de::Error::custom)
        } else {
            Vec::<u8>::deserialize(deserializer)
        }
    }
}

impl From<&Filter> for FilterSnapshot {
    fn from(filter: &Filter) -> Self {
        Self {
            size: filter.size() as u64,
            k: filter.hash_count() as u64,
            inserted: filter.inserted(),
            bits: filter.as_bytes().to_vec(),
        }
    }
}

impl TryFrom<FilterSnapshot> for Filter {
    type Error = FilterError;

    fn try_from(snapshot: FilterSnapshot) -> Result<Self, Self::Error> {
        let size = usize::try_from(snapshot.size).map_err(|_| {
            FilterError::Serialization(format!("size {} does not fit in memory", snapshot.size))
        })?;
        let k = usize::try_from(snapshot.k).map_err(|_| {
            FilterError::Serialization(format!("hash count {} out of range", snapshot.k))
        })?;

        Filter::from_parts(size, k, snapshot.inserted, snapshot.bits).map_err(|err| match err {
            FilterError::Serialization(_) => err,
            other => FilterError::Serialization(format!("invalid filter parameters: {other}")),
        })
    }
}

impl From<&ScalableFilter> for ScalableSnapshot {
    fn from(filter: &ScalableFilter) -> Self {
        Self {
            config: filter.config().clone(),
            target_fpr: filter.target_fpr(),
            filters: filter.filters().map(FilterSnapshot::from).collect(),
        }
    }
}

impl TryFrom<ScalableSnapshot> for ScalableFilter {
    type Error = FilterError;

    fn try_from(snapshot: ScalableSnapshot) -> Result<Self, Self::Error> {
        let filters = snapshot
            .filters
            .into_iter()
            .map(Filter::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        ScalableFilter::from_parts(snapshot.config, snapshot.target_fpr, filters).map_err(
            |err| match err {
                FilterError::Serialization(_) => err,
                other => FilterError::Serialization(format!("invalid configuration: {other}")),
            },
        )
    }
}

impl Filter {
    /// Export the filter state
    pub fn to_snapshot(&self) -> FilterSnapshot {
        FilterSnapshot::from(self)
    }

    /// Rebuild a filter from a snapshot
    ///
    /// The rebuilt filter uses the default digest strategy.
    pub fn from_snapshot(snapshot: FilterSnapshot) -> Result<Self, FilterError> {
        Filter::try_from(snapshot)
    }
}

impl ScalableFilter {
    /// Export the whole chain
    pub fn to_snapshot(&self) -> ScalableSnapshot {
        ScalableSnapshot::from(self)
    }

    /// Rebuild a scalable filter from a snapshot, without metrics attached
    pub fn from_snapshot(snapshot: ScalableSnapshot) -> Result<Self, FilterError> {
        ScalableFilter::try_from(snapshot)
    }
}
