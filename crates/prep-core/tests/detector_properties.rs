//! Property tests for the outlier kernels

use prep_core::utils::{mean, std_dev};
use prep_core::{IqrFence, SkipReason, ZScoreDetector};
use proptest::prelude::*;

fn column() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(
        prop_oneof![
            9 => (-1.0e6..1.0e6f64).prop_map(Some),
            1 => Just(None),
        ],
        0..64,
    )
}

proptest! {
    #[test]
    fn mask_matches_definition(values in column(), threshold in 0.0..5.0f64) {
        let detector = ZScoreDetector::new(threshold).unwrap();
        match detector.score(&values) {
            Ok(scored) => {
                let mu = mean(&values).unwrap();
                let sigma = std_dev(&values).unwrap();
                prop_assert_eq!(scored.mask.len(), values.len());
                for (v, flagged) in values.iter().zip(&scored.mask) {
                    let expected = v.map_or(false, |x| ((x - mu) / sigma).abs() > threshold);
                    prop_assert_eq!(*flagged, expected);
                }
            }
            Err(SkipReason::ZeroDeviation) => {
                let present: Vec<f64> = values.iter().flatten().copied().collect();
                prop_assert!(present.windows(2).all(|w| w[0] == w[1]));
            }
            Err(SkipReason::UndefinedDeviation) => {
                prop_assert!(values.iter().flatten().count() < 2);
            }
        }
    }

    #[test]
    fn constant_columns_never_flagged(
        value in -1.0e6..1.0e6f64,
        len in 2usize..40,
        threshold in 0.0..5.0f64,
    ) {
        let values = vec![Some(value); len];
        let detector = ZScoreDetector::new(threshold).unwrap();
        prop_assert_eq!(detector.score(&values), Err(SkipReason::ZeroDeviation));
    }

    #[test]
    fn iqr_mask_and_count_partition_present_rows(values in column()) {
        if let Some(fence) = IqrFence::from_values(&values).unwrap() {
            let inside = fence.inside_mask(&values).iter().filter(|&&m| m).count();
            let present = values.iter().flatten().count();
            prop_assert_eq!(inside + fence.outlier_count(&values), present);
            prop_assert!(fence.lower <= fence.q1 && fence.q1 <= fence.q3);
            prop_assert!(fence.q3 <= fence.upper);
        } else {
            prop_assert_eq!(values.iter().flatten().count(), 0);
        }
    }
}
