mod common;

use std::collections::HashSet;

use chargen::HierarchyPins;
use chargen::ministry::generate_ministry_roster_with_rng;
use common::{build_generator, seeded};

#[test]
fn roster_has_one_minister_per_ministry() {
    let g = build_generator();
    let mut rng = seeded(31);
    let roster = generate_ministry_roster_with_rng(&g, 9, &HierarchyPins::default(), &mut rng).unwrap();

    let ministries: Vec<&str> = roster.iter().map(|m| m.ministry.as_str()).collect();
    let expected: Vec<&str> = g.setting().ministries.iter().map(String::as_str).collect();
    assert_eq!(ministries, expected);

    for m in &roster {
        assert!(m.character.tags.contains(&m.ministry));
        assert_eq!(m.ministry_rank, "Deputy Minister");
        assert!(m.summary.starts_with("Deputy Minister of "));
        assert!(!m.summary.contains("Ministry"));
        assert!((8.0..=10.0).contains(&m.character.rank));
    }

    let names: HashSet<&str> = roster.iter().map(|m| m.character.personal_name.as_str()).collect();
    assert_eq!(names.len(), roster.len());
}

#[test]
fn roster_respects_family_pin() {
    let g = build_generator();
    let pins = HierarchyPins {
        clan: Some("Lion".into()),
        family: Some("Matsu".into()),
        ..HierarchyPins::default()
    };
    let mut rng = seeded(32);
    let roster = generate_ministry_roster_with_rng(&g, 6, &pins, &mut rng).unwrap();
    assert!(roster.iter().all(|m| m.character.hierarchy.family == "Matsu"));
    assert!(roster.iter().all(|m| m.character.full_name.starts_with("Matsu ")));
    assert!(roster.iter().all(|m| m.summary.starts_with("Deputy Provincial Minister of ")));
}
