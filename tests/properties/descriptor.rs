//! Property tests for descriptor parsing.

use std::path::Path;

use proptest::prelude::*;

use gitdeploy::{Descriptor, Provider};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary text returns an error or a descriptor, never panics.
    #[test]
    fn property_parse_never_panics(content in "\\PC{0,80}") {
        let _ = Descriptor::parse(Path::new("Deployfile"), &content);
    }

    /// PROPERTY: Any provider other than git is kept by name and never treated as git.
    #[test]
    fn property_non_git_provider_is_preserved(name in "[a-z]{1,10}".prop_filter("not git", |n| n != "git")) {
        let content = format!("provider = \"{name}\"\n");
        let (descriptor, warnings) = Descriptor::parse(Path::new("Deployfile"), &content).unwrap();

        prop_assert_eq!(descriptor.provider, Provider::Other(name));
        prop_assert!(warnings.is_empty());
    }
}
