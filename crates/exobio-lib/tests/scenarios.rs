mod common;

use common::{arcus_body, BodyBuilder};
use exobio_lib::{BioScanner, Catalog, Identification, StarSnapshot};

fn catalog() -> &'static Catalog {
    Catalog::builtin().expect("embedded catalog validates")
}

#[test]
fn aleoida_arcus_is_identified_uniquely() {
    let mut scanner = BioScanner::new(catalog());
    scanner.context_mut().upsert_body(arcus_body(3));

    let estimate = scanner.value_estimate(3, "Aleoida");
    match estimate.identification() {
        Identification::Unique { candidate } => {
            assert_eq!(candidate.name, "Aleoida Arcus");
            assert_eq!(candidate.value, 7_252_500);
            // parent star not scanned yet
            assert_eq!(candidate.color, None);
        }
        other => panic!("expected unique identification, got {other:?}"),
    }
    assert_eq!(estimate.min_value(), 7_252_500);
    assert_eq!(estimate.max_value(), 7_252_500);
}

#[test]
fn arcus_color_follows_parent_star() {
    let mut scanner = BioScanner::new(catalog());
    let mut body = arcus_body(3);
    body.parents = vec![exobio_lib::ParentRef::Star(0)];
    scanner.context_mut().upsert_body(body);
    scanner
        .context_mut()
        .upsert_star(StarSnapshot::new(0, "A").with_distance(0.0));

    let estimate = scanner.value_estimate(3, "aleoida");
    assert_eq!(estimate.display_name(), "Aleoida Arcus - Yellow");
}

#[test]
fn excessive_gravity_eliminates_every_aleoida() {
    let mut scanner = BioScanner::new(catalog());
    let mut body = arcus_body(3);
    body.gravity = Some(3.5);
    scanner.context_mut().upsert_body(body);

    let estimate = scanner.value_estimate(3, "aleoida");
    assert!(estimate.is_empty());
    assert_eq!(estimate.identification(), &Identification::Empty);
    assert_eq!((estimate.min_value(), estimate.max_value()), (0, 0));
}

#[test]
fn color_gated_genus_is_eliminated_by_unlisted_star_class() {
    let mut scanner = BioScanner::new(catalog());
    let body = BodyBuilder::new(7)
        .body_type("Icy body")
        .atmosphere("Neon")
        .gravity_g(0.1)
        .temperature(90.0)
        .orbits_star(0)
        .build();
    scanner.context_mut().upsert_body(body);

    // no star yet: both species pass the rulesets, color deferred
    let deferred = scanner.value_estimate(7, "Electricae");
    assert_eq!(deferred.breakdown().len(), 2);

    scanner
        .context_mut()
        .upsert_star(StarSnapshot::new(0, "M").with_distance(0.0));
    let gated = scanner.value_estimate(7, "Electricae");
    assert!(gated.is_empty());

    scanner
        .context_mut()
        .upsert_star(StarSnapshot::new(0, "A").with_distance(0.0));
    let colored = scanner.value_estimate(7, "Electricae");
    assert_eq!(colored.breakdown().len(), 2);
    assert!(colored
        .breakdown()
        .iter()
        .all(|candidate| candidate.color.as_deref() == Some("Cobalt")));
}

#[test]
fn three_survivors_form_an_ascending_range() {
    let mut scanner = BioScanner::new(catalog());
    let body = BodyBuilder::new(2)
        .body_type("Rocky body")
        .atmosphere("CarbonDioxide")
        .temperature(195.0)
        .build();
    scanner.context_mut().upsert_body(body);

    let estimate = scanner.value_estimate(2, "Stratum");
    let names: Vec<&str> = estimate
        .breakdown()
        .iter()
        .map(|candidate| candidate.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Stratum Paleas", "Stratum Frigus", "Stratum Cucumisis"]
    );
    assert_eq!(estimate.min_value(), 1_362_000);
    assert_eq!(estimate.max_value(), 16_202_800);
    assert!(matches!(
        estimate.identification(),
        Identification::Range { .. }
    ));
}

#[test]
fn unknown_genus_is_not_applicable() {
    let mut scanner = BioScanner::new(catalog());
    scanner.context_mut().upsert_body(arcus_body(3));
    let estimate = scanner.value_estimate(3, "Not A Genus");
    assert_eq!(estimate.identification(), &Identification::NotApplicable);
    assert_eq!((estimate.min_value(), estimate.max_value()), (0, 0));
}
