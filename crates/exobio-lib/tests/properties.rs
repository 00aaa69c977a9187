mod common;

use common::{arcus_body, BodyBuilder};
use exobio_lib::predicate::region_constraint_matches;
use exobio_lib::{
    estimate_genus, BioScanner, BodySnapshot, Catalog, EntryState, EvalEnv, FixedRegion,
    NoRegionLookup, RegionEntry, RegionLookup, StarSnapshot, SystemContext,
};

fn catalog() -> &'static Catalog {
    Catalog::builtin().expect("embedded catalog validates")
}

fn has_candidate(scanner: &mut BioScanner<'_>, body: u32, genus: &str, species: &str) -> bool {
    scanner
        .value_estimate(body, genus)
        .breakdown()
        .iter()
        .any(|candidate| candidate.species_id == species)
}

fn candidate_counts(context: &SystemContext, regions: &dyn RegionLookup, body: u32) -> Vec<usize> {
    let env = EvalEnv::new(context, regions);
    let snapshot = context.body(body).expect("body present");
    catalog()
        .genera()
        .map(|genus| estimate_genus(genus, snapshot, &env).breakdown().len())
        .collect()
}

#[test]
fn adding_telemetry_never_grows_candidate_sets() {
    let mut context = SystemContext::new();
    context.upsert_body(BodySnapshot::new(3));
    let mut previous = candidate_counts(&context, &NoRegionLookup, 3);

    let steps: Vec<Box<dyn Fn(&mut BodySnapshot)>> = vec![
        Box::new(|b| b.body_type = Some("Rocky body".to_string())),
        Box::new(|b| b.atmosphere = Some("CarbonDioxide".to_string())),
        Box::new(|b| b.gravity = Some(1.2)),
        Box::new(|b| b.temperature = Some(186.0)),
        Box::new(|b| b.volcanism = Some(String::new())),
        Box::new(|b| b.parents = vec![exobio_lib::ParentRef::Star(0)]),
        Box::new(|b| {
            b.materials = Some(["iron", "nickel", "tin"].iter().map(|m| m.to_string()).collect())
        }),
    ];

    for step in &steps {
        context.update_body(3, |body| step(body));
        let current = candidate_counts(&context, &NoRegionLookup, 3);
        for (before, after) in previous.iter().zip(&current) {
            assert!(after <= before, "{current:?} grew from {previous:?}");
        }
        previous = current;
    }

    context.upsert_star(StarSnapshot::new(0, "F").with_distance(0.0));
    let with_star = candidate_counts(&context, &NoRegionLookup, 3);
    context.set_coordinates([0.0, 0.0, 0.0]);
    let with_region = candidate_counts(&context, &FixedRegion::new(18), 3);
    for ((before, star), region) in previous.iter().zip(&with_star).zip(&with_region) {
        assert!(star <= before);
        assert!(region <= star);
    }
}

#[test]
fn value_range_is_ordered_and_zero_only_when_empty() {
    let mut scanner = BioScanner::new(catalog());
    let bodies = [
        arcus_body(1),
        BodyBuilder::new(2).body_type("Icy body").atmosphere("Neon").build(),
        BodyBuilder::new(3).gravity_g(2.5).build(),
        BodySnapshot::new(4),
    ];
    for body in bodies {
        scanner.context_mut().upsert_body(body);
    }

    let genera: Vec<String> = catalog().genera().map(|g| g.id.clone()).collect();
    for body in 1..=4 {
        for genus in &genera {
            let estimate = scanner.value_estimate(body, genus);
            assert!(estimate.min_value() <= estimate.max_value());
            assert_eq!(estimate.is_empty(), estimate.max_value() == 0, "{estimate}");
            assert_eq!(estimate.is_empty(), estimate.min_value() == 0, "{estimate}");
        }
    }
}

#[test]
fn repeated_queries_hit_the_cache() {
    let mut scanner = BioScanner::new(catalog());
    scanner.context_mut().upsert_body(arcus_body(3));

    let first = scanner.value_estimate(3, "aleoida");
    let second = scanner.value_estimate(3, "aleoida");
    assert_eq!(first, second);
    let stats = scanner.cache_stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));

    scanner.reset_cache(None);
    let recomputed = scanner.value_estimate(3, "aleoida");
    assert_eq!(first, recomputed);
    assert_eq!(scanner.cache_stats().misses, 2);
}

#[test]
fn stale_entries_stay_readable_until_recomputed() {
    let mut scanner = BioScanner::new(catalog());
    scanner.context_mut().upsert_body(arcus_body(3));
    let identified = scanner.value_estimate(3, "aleoida");

    scanner
        .context_mut()
        .update_body(3, |body| body.gravity = Some(3.5));
    assert_eq!(scanner.last_known(3, "aleoida"), Some(&identified));

    let refreshed = scanner.value_estimate(3, "aleoida");
    assert!(refreshed.is_empty());
    assert_eq!(scanner.last_known(3, "aleoida"), Some(&refreshed));
}

#[test]
fn last_known_does_not_carry_over_to_the_next_system() {
    let mut scanner = BioScanner::new(catalog());
    scanner
        .context_mut()
        .enter_system(Some("Alpha".to_string()), None);
    scanner.context_mut().upsert_body(arcus_body(3));
    assert!(!scanner.value_estimate(3, "aleoida").is_empty());

    // same body id, unrelated body
    scanner
        .context_mut()
        .enter_system(Some("Beta".to_string()), None);
    scanner
        .context_mut()
        .upsert_body(BodyBuilder::new(3).gravity_ms2(3.5).build());
    assert_eq!(scanner.last_known(3, "aleoida"), None);

    let fresh = scanner.value_estimate(3, "aleoida");
    assert!(fresh.is_empty());
    assert_eq!(scanner.cache_stats().entries, 1);
}

#[test]
fn scanner_enter_system_drops_cached_estimates() {
    let mut scanner = BioScanner::new(catalog());
    scanner.context_mut().upsert_body(arcus_body(3));
    scanner.value_estimate(3, "aleoida");
    assert_eq!(scanner.cache_stats().entries, 1);

    scanner.enter_system(Some("Beta".to_string()), Some([0.0, 0.0, 0.0]));
    assert_eq!(scanner.cache_stats().entries, 0);
    assert_eq!(scanner.context().system_name(), Some("Beta"));
    assert!(scanner.context().body(3).is_none());
}

#[test]
fn star_scan_invalidates_other_bodies() {
    let mut context = SystemContext::new();
    context.upsert_body(arcus_body(3));
    let mut cache = exobio_lib::ResultCache::new();
    cache.get_or_compute(&context, 3, "aleoida", || {
        exobio_lib::GenusEstimate::not_applicable("aleoida")
    });
    assert_eq!(cache.state(&context, 3, "aleoida"), EntryState::Fresh);

    context.upsert_star(StarSnapshot::new(0, "K"));
    assert_eq!(cache.state(&context, 3, "aleoida"), EntryState::Stale);
}

#[test]
fn species_survives_when_only_its_second_ruleset_matches() {
    let mut scanner = BioScanner::new(catalog());
    {
        let context = scanner.context_mut();
        context.set_body_count(2);
        context.upsert_body(BodyBuilder::new(1).body_type("Water world").build());
        // no volcanism: only the life-bearing ruleset can match
        context.upsert_body(
            BodyBuilder::new(2)
                .body_type("Rocky body")
                .atmosphere("CarbonDioxide")
                .gravity_g(0.3)
                .temperature(300.0)
                .volcanism("")
                .build(),
        );
    }
    assert!(has_candidate(&mut scanner, 2, "bacterium", "bacterium_tela"));

    scanner
        .context_mut()
        .update_body(1, |body| body.body_type = Some("Icy body".to_string()));
    assert!(!has_candidate(&mut scanner, 2, "bacterium", "bacterium_tela"));
}

#[test]
fn negated_region_eliminates_despite_positive_entries() {
    let entries = [
        RegionEntry::include("orion-cygnus"),
        RegionEntry::exclude("orion-cygnus-core"),
    ];
    // Inner Orion Spur is in both sets
    assert!(!region_constraint_matches(&entries, 18));
    // Galactic Centre is only in the positive set
    assert!(region_constraint_matches(&entries, 1));
}

#[test]
fn negated_region_applies_through_the_scanner() {
    let body = BodyBuilder::new(1)
        .body_type("Rocky body")
        .atmosphere("Ammonia")
        .gravity_g(0.1)
        .build();
    let flabellum = |region: u8| {
        let mut context = SystemContext::new();
        context.set_coordinates([0.0, 0.0, 0.0]);
        context.upsert_body(body.clone());
        let mut scanner =
            BioScanner::with_regions(catalog(), FixedRegion::new(region)).with_context(context);
        scanner
            .value_estimate(1, "frutexa")
            .breakdown()
            .iter()
            .any(|candidate| candidate.species_id == "frutexa_flabellum")
    };
    assert!(!flabellum(18));
    assert!(flabellum(10));
}
