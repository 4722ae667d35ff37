use super::*;
use crate::config::SingleFileRules;

const SM64_PARTS: [&str; 2] = [
    "Super Mario 64 (J) (Rev A) [Part 1].z64",
    "Super Mario 64 (J) (Rev A) [Part 2].z64",
];

const NSP_FILES: [&str; 4] = [
    "Links Awakening.nsp",
    "_.Links Awakening.nsp",
    "Kirby's Adventure.nsp",
    "_.Kirby's Adventure.nsp",
];

fn single_filter(rules: NameRules, extensions: &[&str]) -> ExclusionFilter {
    let config = ExclusionConfig {
        single: SingleFileRules {
            rules,
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        },
        ..Default::default()
    };
    ExclusionFilter::new(&config).unwrap()
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn exact_name_excludes_only_that_name() {
    let filter = single_filter(
        NameRules {
            names: names(&[SM64_PARTS[0]]),
            ..Default::default()
        },
        &[],
    );

    let kept = filter.filter(SM64_PARTS.to_vec(), FileClass::Single);
    assert_eq!(kept, vec![SM64_PARTS[1]]);
    assert!(!filter.is_excluded("Paper Mario (USA).z64", FileClass::Single));
}

#[test]
fn extension_rule_ignores_stem() {
    let filter = single_filter(NameRules::default(), &["z64"]);
    assert!(filter.filter(SM64_PARTS.to_vec(), FileClass::Single).is_empty());
    assert!(filter.is_excluded("anything.z64", FileClass::Single));
    assert!(!filter.is_excluded("Paper Mario (USA).n64", FileClass::Single));
}

#[test]
fn extension_rule_is_case_insensitive() {
    let filter = single_filter(NameRules::default(), &[".Z64"]);
    assert!(filter.is_excluded("Game.z64", FileClass::Single));
    assert!(filter.is_excluded("Game.Z64", FileClass::Single));
    assert!(!filter.is_excluded("z64", FileClass::Single));
}

#[test]
fn glob_matches_whole_name() {
    let filter = single_filter(
        NameRules {
            patterns: names(&["*.z64"]),
            ..Default::default()
        },
        &[],
    );
    assert!(filter.filter(SM64_PARTS.to_vec(), FileClass::Single).is_empty());
    assert!(!filter.is_excluded("Game.z64.bak", FileClass::Single));
    assert!(!filter.is_excluded("Game.v64", FileClass::Single));
}

#[test]
fn glob_is_case_sensitive() {
    let filter = single_filter(
        NameRules {
            patterns: names(&["*.z64"]),
            ..Default::default()
        },
        &[],
    );
    assert!(!filter.is_excluded("Game.Z64", FileClass::Single));
}

#[test]
fn glob_and_extension_agree() {
    let by_glob = single_filter(
        NameRules {
            patterns: names(&["*.z64"]),
            ..Default::default()
        },
        &[],
    );
    let by_ext = single_filter(NameRules::default(), &["z64"]);
    for name in ["a.z64", "Super Mario 64.z64", "b.n64", "z64", "c.z64.zip"] {
        assert_eq!(
            by_glob.is_excluded(name, FileClass::Single),
            by_ext.is_excluded(name, FileClass::Single),
            "disagreement on '{name}'"
        );
    }
}

#[test]
fn prefix_regex_keeps_two_of_four() {
    let filter = single_filter(
        NameRules {
            regex: names(&["_.*"]),
            ..Default::default()
        },
        &[],
    );
    let kept = filter.filter(NSP_FILES.to_vec(), FileClass::Single);
    assert_eq!(kept, vec!["Links Awakening.nsp", "Kirby's Adventure.nsp"]);
}

#[test]
fn prefix_regex_is_anchored_at_start() {
    let filter = single_filter(
        NameRules {
            regex: names(&["Beta"]),
            ..Default::default()
        },
        &[],
    );
    assert!(filter.is_excluded("Beta Build.sfc", FileClass::Single));
    assert!(!filter.is_excluded("Game (Beta).sfc", FileClass::Single));
}

#[test]
fn rules_only_apply_to_their_class() {
    let config = ExclusionConfig {
        platforms: names(&["bios"]),
        multi: NameRules {
            names: names(&["Manuals"]),
            ..Default::default()
        },
        resource: NameRules {
            patterns: names(&["*.tmp"]),
            ..Default::default()
        },
        ..Default::default()
    };
    let filter = ExclusionFilter::new(&config).unwrap();

    assert!(filter.is_excluded("bios", FileClass::Platform));
    assert!(!filter.is_excluded("bios", FileClass::Single));
    assert!(filter.is_excluded("Manuals", FileClass::Multi));
    assert!(!filter.is_excluded("Manuals", FileClass::Single));
    assert!(filter.is_excluded("small.png.tmp", FileClass::Resource));
    assert!(!filter.is_excluded("small.png.tmp", FileClass::Single));
}

#[test]
fn empty_filter_excludes_nothing() {
    let filter = ExclusionFilter::none();
    for class in [
        FileClass::Platform,
        FileClass::Single,
        FileClass::Multi,
        FileClass::Resource,
    ] {
        assert!(filter.rules(class).is_empty());
        assert!(!filter.is_excluded("_.anything.z64", class));
    }
}

#[test]
fn invalid_patterns_fail_at_build_time() {
    let bad_glob = ExclusionConfig {
        multi: NameRules {
            patterns: names(&["[unclosed"]),
            ..Default::default()
        },
        ..Default::default()
    };
    let err = ExclusionFilter::new(&bad_glob).unwrap_err();
    assert!(matches!(err, ShelfError::InvalidPattern { .. }), "got {err:?}");

    let bad_regex = ExclusionConfig {
        resource: NameRules {
            regex: names(&["(unclosed"]),
            ..Default::default()
        },
        ..Default::default()
    };
    let err = ExclusionFilter::new(&bad_regex).unwrap_err();
    assert!(matches!(err, ShelfError::InvalidPattern { .. }), "got {err:?}");
}

#[test]
fn with_rules_replaces_one_class() {
    let filter = ExclusionFilter::none().with_rules(
        FileClass::Single,
        RuleSet::new(vec![ExclusionRule::exact("gamelist.xml")]),
    );
    assert!(filter.is_excluded("gamelist.xml", FileClass::Single));
    assert!(!filter.is_excluded("gamelist.xml", FileClass::Multi));
}
