//! Property tests for `git pull` output classification.

use proptest::prelude::*;

use gitdeploy::git::{is_up_to_date, UP_TO_DATE_MARKERS};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Output containing a marker anywhere means nothing changed.
    #[test]
    fn property_marker_anywhere_is_up_to_date(
        prefix in "[A-Za-z0-9 \n.]{0,30}",
        suffix in "[A-Za-z0-9 \n.]{0,30}",
        idx in 0usize..UP_TO_DATE_MARKERS.len(),
    ) {
        let output = format!("{prefix}{}{suffix}", UP_TO_DATE_MARKERS[idx]);
        prop_assert!(is_up_to_date(&output));
    }

    /// PROPERTY: Output without the phrase "Already" is always a change.
    #[test]
    fn property_output_without_marker_is_change(output in "[a-z0-9 \n.|+-]{0,60}") {
        prop_assert!(!is_up_to_date(&output));
    }
}
