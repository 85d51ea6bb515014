//! JSON and binary encodings of filter snapshots
//!
//! JSON (`serde_json`) is the interchange format; the bit buffer is a hex
//! string. The binary format (`bincode`) stores the buffer as raw bytes.

use crate::codec::snapshot::{FilterSnapshot, ScalableSnapshot};
use crate::domain::{Filter, ScalableFilter};
use crate::error::FilterError;

impl Filter {
    /// Encode the filter as JSON
    pub fn to_json(&self) -> Result<Vec<u8>, FilterError> {
        Ok(serde_json::to_vec(&self.to_snapshot())?)
    }

    /// Decode a filter encoded with [`Filter::to_json`]
    pub fn from_json(raw: &[u8]) -> Result<Self, FilterError> {
        let snapshot: FilterSnapshot = serde_json::from_slice(raw)?;
        Filter::from_snapshot(snapshot)
    }

    /// Encode the filter in the compact binary format
    pub fn to_bytes(&self) -> Result<Vec<u8>, FilterError> {
        Ok(bincode::serialize(&self.to_snapshot())?)
    }

    /// Decode a filter encoded with [`Filter::to_bytes`]
    pub fn from_bytes(raw: &[u8]) -> Result<Self, FilterError> {
        let snapshot: FilterSnapshot = bincode::deserialize(raw)?;
        Filter::from_snapshot(snapshot)
    }
}

impl ScalableFilter {
    /// Encode the whole chain as JSON
    pub fn to_json(&self) -> Result<Vec<u8>, FilterError> {
        Ok(serde_json::to_vec(&self.to_snapshot())?)
    }

    /// Decode a chain encoded with [`ScalableFilter::to_json`]
    pub fn from_json(raw: &[u8]) -> Result<Self, FilterError> {
        let snapshot: ScalableSnapshot = serde_json::from_slice(raw)?;
        ScalableFilter::from_snapshot(snapshot)
    }

    /// Encode the whole chain in the compact binary format
    pub fn to_bytes(&self) -> Result<Vec<u8>, FilterError> {
        Ok(bincode::serialize(&self.to_snapshot())?)
    }

    /// Decode a chain encoded with [`ScalableFilter::to_bytes`]
    pub fn from_bytes(raw: &[u8]) -> Result<Self, FilterError> {
        let snapshot: ScalableSnapshot = bincode::deserialize(raw)?;
        ScalableFilter::from_snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const WORDS: [&str; 13] = [
        "Bloom", "Poney", "GitHub", "Pwet", "Toto", "Billy", "Jacob", "Omelette", "De",
        "Fromage", "FooBar", "Bar", "Baz",
    ];

    fn fed_filter() -> Filter {
        let mut filter = Filter::new(512, 5).unwrap();
        for word in WORDS {
            filter.feed(word);
        }
        filter
    }

    #[test]
    fn test_json_round_trip() {
        let filter = fed_filter();
        let raw = filter.to_json().unwrap();
        let restored = Filter::from_json(&raw).unwrap();

        assert_eq!(restored.as_bytes(), filter.as_bytes());
        assert_eq!(restored.inserted(), 13);
        for word in WORDS {
            assert!(restored.matches(word), "Lost {} in JSON round trip", word);
        }
    }

    #[test]
    fn test_binary_round_trip() {
        let filter = fed_filter();
        let raw = filter.to_bytes().unwrap();
        let restored = Filter::from_bytes(&raw).unwrap();

        assert_eq!(restored.as_bytes(), filter.as_bytes());
        assert_eq!(restored.hash_count(), 5);
    }

    #[test]
    fn test_binary_is_smaller_than_json() {
        let filter = fed_filter();
        assert!(filter.to_bytes().unwrap().len() < filter.to_json().unwrap().len());
    }

    #[test]
    fn test_json_rejects_malformed_input() {
        let cases: [&[u8]; 7] = [
            b"not json",
            br#"{"size":2,"k":1,"inserted":0}"#,
            br#"{"size":"2","k":1,"inserted":0,"bits":"0000"}"#,
            br#"{"size":2.5,"k":1,"inserted":0,"bits":"0000"}"#,
            br#"{"size":2,"k":1,"inserted":0,"bits":"00"}"#,
            br#"{"size":2,"k":1,"inserted":0,"bits":"zz00"}"#,
            br#"{"size":2,"k":1,"inserted":0,"bits":"0000","extra":true}"#,
        ];
        for raw in cases {
            let err = Filter::from_json(raw).unwrap_err();
            assert_eq!(
                err.kind(),
                ErrorKind::Serialization,
                "Expected serialization error for {}",
                String::from_utf8_lossy(raw)
            );
        }
    }

    #[test]
    fn test_binary_rejects_truncated_input() {
        let raw = fed_filter().to_bytes().unwrap();
        let err = Filter::from_bytes(&raw[..raw.len() - 10]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_scalable_json_round_trip() {
        let mut filter = ScalableFilter::new(0.1, 2.0, 32, 0.8).unwrap();
        for i in 0..1000 {
            filter.feed(format!("element_{}", i)).unwrap();
        }

        let restored = ScalableFilter::from_json(&filter.to_json().unwrap()).unwrap();
        assert_eq!(restored.to_snapshot(), filter.to_snapshot());

        let restored = ScalableFilter::from_bytes(&filter.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.to_snapshot(), filter.to_snapshot());
    }
}
