mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chargen::roster::refresh_once;
use chargen::{GenerationRequest, Gender, RosterError, RosterRefresher};
use common::{seeded, shared_generator};

#[test]
fn threads_sharing_a_generator_get_distinct_names() {
    let (generator, registry) = shared_generator();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                let mut rng = seeded(t);
                let request = GenerationRequest::new(3).gender(Gender::Male);
                (0..10)
                    .map(|_| {
                        generator
                            .generate_with_rng("samurai", &request, &mut rng)
                            .unwrap()
                            .personal_name
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let names: Vec<String> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
    let unique: HashSet<&String> = names.iter().collect();
    assert_eq!(names.len(), 40);
    assert_eq!(unique.len(), 40);
    assert!(names.iter().all(|name| registry.contains(name)));
}

#[test]
fn refresh_keeps_names_claimed_concurrently() {
    let (generator, registry) = shared_generator();
    let mut rng = seeded(21);
    let claimed = generator
        .generate_with_rng("samurai", &GenerationRequest::new(2), &mut rng)
        .unwrap()
        .personal_name;

    let source = || -> Result<Vec<String>, RosterError> {
        Ok(vec!["Hida Kisada".to_string(), "Doji Satsume".to_string()])
    };
    assert_eq!(refresh_once(&registry, &source).unwrap(), 2);
    assert_eq!(generator.refresh_used_names(["Hida Kisada"]), 0);
    assert!(registry.contains(&claimed));
    assert!(registry.contains("Kisada"));
    assert!(registry.contains("Satsume"));
}

#[test]
fn refreshed_names_are_never_generated() {
    let (generator, registry) = shared_generator();
    let female = generator.setting().names[&Gender::Female].clone();
    let kept = female.keys().next().cloned().unwrap();
    let taken: Vec<String> = female
        .keys()
        .filter(|name| **name != kept)
        .map(|name| format!("Matsu {name}"))
        .collect();

    let refresher = RosterRefresher::spawn(
        Arc::clone(&registry),
        move || -> Result<Vec<String>, RosterError> { Ok(taken.clone()) },
        Duration::from_secs(3600),
    )
    .unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    while !female.keys().filter(|name| **name != kept).all(|name| registry.contains(name)) {
        assert!(Instant::now() < deadline, "refresh did not run");
        thread::sleep(Duration::from_millis(5));
    }
    refresher.stop();

    let mut rng = seeded(22);
    let c = generator
        .generate_with_rng("samurai", &GenerationRequest::new(1).gender(Gender::Female), &mut rng)
        .unwrap();
    assert_eq!(c.personal_name, kept);
}
