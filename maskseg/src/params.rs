//! Method selection and per-method parameters
//!
//! [`SegmentationParams`] is a tagged union with one variant per engine.
//! In JSON the variant is named by a `"method"` field next to the
//! engine's own fields:
//!
//! ```
//! use maskseg::{SegmentationMethod, SegmentationParams};
//!
//! let params = SegmentationParams::from_json(
//!     r#"{"method": "region_growing", "seeds": [{"x": 4, "y": 7}], "tolerance": 12}"#,
//! )
//! .unwrap();
//! assert_eq!(params.method(), SegmentationMethod::RegionGrowing);
//! ```

use crate::error::SegmentResult;
use maskseg_region::{RegionGrowingParams, WatershedOptions, WatershedParams};
use maskseg_threshold::{AdaptiveMethod, AdaptiveParams, ThresholdParams};
use serde::{Deserialize, Serialize};

/// The segmentation algorithms on offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationMethod {
    Threshold,
    Otsu,
    AdaptiveMean,
    AdaptiveGaussian,
    RegionGrowing,
    Watershed,
}

impl SegmentationMethod {
    /// Every method, in menu order.
    pub const ALL: [SegmentationMethod; 6] = [
        SegmentationMethod::Threshold,
        SegmentationMethod::Otsu,
        SegmentationMethod::AdaptiveMean,
        SegmentationMethod::AdaptiveGaussian,
        SegmentationMethod::RegionGrowing,
        SegmentationMethod::Watershed,
    ];
}

/// Method plus its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SegmentationParams {
    /// Fixed global threshold
    Threshold(ThresholdParams),
    /// Global threshold chosen by Otsu's method
    Otsu,
    /// Local mean or Gaussian threshold
    Adaptive(AdaptiveParams),
    /// Seeded region growing
    RegionGrowing(RegionGrowingParams),
    /// Marker-controlled watershed
    Watershed(WatershedParams),
}

impl SegmentationParams {
    /// The method these parameters select.
    pub fn method(&self) -> SegmentationMethod {
        match self {
            SegmentationParams::Threshold(_) => SegmentationMethod::Threshold,
            SegmentationParams::Otsu => SegmentationMethod::Otsu,
            SegmentationParams::Adaptive(p) => match p.method {
                AdaptiveMethod::Mean => SegmentationMethod::AdaptiveMean,
                AdaptiveMethod::Gaussian => SegmentationMethod::AdaptiveGaussian,
            },
            SegmentationParams::RegionGrowing(_) => SegmentationMethod::RegionGrowing,
            SegmentationParams::Watershed(_) => SegmentationMethod::Watershed,
        }
    }

    /// Parse parameters from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::InvalidParameter`](crate::SegmentError::InvalidParameter)
    /// for malformed JSON, an unknown method or mistyped fields.
    pub fn from_json(json: &str) -> SegmentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to a JSON object.
    pub fn to_json(&self) -> SegmentResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<SegmentationMethod> for SegmentationParams {
    /// Default parameters for `method`.
    ///
    /// Region growing starts without seeds; the caller must add some.
    fn from(method: SegmentationMethod) -> Self {
        match method {
            SegmentationMethod::Threshold => SegmentationParams::Threshold(ThresholdParams::default()),
            SegmentationMethod::Otsu => SegmentationParams::Otsu,
            SegmentationMethod::AdaptiveMean => {
                SegmentationParams::Adaptive(AdaptiveParams::default().with_method(AdaptiveMethod::Mean))
            }
            SegmentationMethod::AdaptiveGaussian => SegmentationParams::Adaptive(AdaptiveParams::default()),
            SegmentationMethod::RegionGrowing => {
                SegmentationParams::RegionGrowing(RegionGrowingParams::default())
            }
            SegmentationMethod::Watershed => SegmentationParams::Watershed(WatershedParams::default()),
        }
    }
}

/// Engine tuning that is not part of a method's parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    /// Watershed marker and flooding constants
    pub watershed: WatershedOptions,
}

impl SegmentOptions {
    pub fn with_watershed(mut self, watershed: WatershedOptions) -> Self {
        self.watershed = watershed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SegmentError;

    #[test]
    fn test_defaults_per_method() {
        for method in SegmentationMethod::ALL {
            assert_eq!(SegmentationParams::from(method).method(), method);
        }
    }

    #[test]
    fn test_json_variants() {
        let p = SegmentationParams::from_json(r#"{"method":"otsu"}"#).unwrap();
        assert_eq!(p, SegmentationParams::Otsu);

        let p = SegmentationParams::from_json(r#"{"method":"threshold","threshold":90,"invert":true}"#).unwrap();
        let SegmentationParams::Threshold(t) = p else {
            panic!("expected threshold params");
        };
        assert_eq!(t.threshold, 90.0);
        assert_eq!(t.max_value, 255.0);
        assert!(t.invert);

        let p = SegmentationParams::from_json(r#"{"method":"adaptive","block_size":15,"adaptive_method":"mean"}"#)
            .unwrap();
        assert_eq!(p.method(), SegmentationMethod::AdaptiveMean);

        let p = SegmentationParams::from_json(r#"{"method":"watershed","use_distance_transform":false,
            "foreground_seeds":[{"x":1,"y":2}],"background_seeds":[]}"#)
        .unwrap();
        let SegmentationParams::Watershed(w) = p else {
            panic!("expected watershed params");
        };
        assert!(!w.use_distance_transform);
        assert_eq!(w.foreground_seeds.len(), 1);
    }

    #[test]
    fn test_json_errors() {
        for bad in [
            "not json",
            r#"{"method":"graph_cut"}"#,
            r#"{"threshold":10}"#,
            r#"{"method":"threshold","threshold":"high"}"#,
        ] {
            assert!(matches!(
                SegmentationParams::from_json(bad),
                Err(SegmentError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_json_roundtrip_keeps_method() {
        let params = SegmentationParams::from(SegmentationMethod::AdaptiveMean);
        let json = params.to_json().unwrap();
        let back = SegmentationParams::from_json(&json).unwrap();
        assert_eq!(back.method(), SegmentationMethod::AdaptiveMean);
    }
}
