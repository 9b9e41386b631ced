//! Property tests for validation and resolution

use ploppable_rico::core::config::RicoConfig;
use ploppable_rico::core::types::{PlacementMode, Service, SubService};
use ploppable_rico::diagnostics::FindingKind;
use ploppable_rico::resolver::{PrefabFacts, Resolver};
use ploppable_rico::settings::RawBuilding;
use ploppable_rico::validation::{BuildingDescriptor, Validator};
use proptest::prelude::*;

fn arb_service() -> impl Strategy<Value = Service> {
    prop::sample::select(Service::ALL.to_vec())
}

fn arb_descriptor() -> impl Strategy<Value = BuildingDescriptor> {
    (arb_service(), any::<bool>(), 1u8..=5).prop_map(|(service, growable, level)| {
        let descriptor = BuildingDescriptor::new("Prop Building", service).with_growable(growable);
        let descriptor = match service {
            Service::Extractor => descriptor.with_sub_service(SubService::Forest),
            _ => descriptor,
        };
        let max = *service.level_range(descriptor.sub_service).end();
        descriptor.with_level(level.min(max))
    })
}

fn arb_facts() -> impl Strategy<Value = PrefabFacts> {
    (1u32..=8, 1u32..=8, any::<bool>()).prop_map(|(width, length, paths)| {
        let facts = PrefabFacts::new(width, length);
        if paths {
            facts.with_network_paths()
        } else {
            facts
        }
    })
}

fn unknown_service_token() -> impl Strategy<Value = String> {
    "[a-z ]{0,12}".prop_filter("must not name a service", |token| Service::parse(token).is_none())
}

proptest! {
    #[test]
    fn unknown_service_is_always_discarded(token in unknown_service_token()) {
        let config = RicoConfig::default();
        let raw = RawBuilding::named("Mystery").with_service(token.as_str());

        let validation = Validator::new(&config).validate(&raw);

        prop_assert!(validation.is_discarded());
        prop_assert!(validation.findings.iter().any(|f| f.kind == FindingKind::UnrecognizedService && f.is_fatal()));
    }

    #[test]
    fn validated_level_is_always_in_range(service in arb_service(), level in -100i64..100) {
        let config = RicoConfig::default();
        let raw = RawBuilding::named("Levelled")
            .with_service(service.as_str())
            .with_level(level);

        let validation = Validator::new(&config).validate(&raw);
        let descriptor = validation.descriptor.expect("known service with a name is kept");

        prop_assert!(service.level_range(descriptor.sub_service).contains(&descriptor.level));
    }

    #[test]
    fn oversized_prefab_is_never_growable(
        descriptor in arb_descriptor(),
        width in 5u32..=20,
        length in 1u32..=20,
    ) {
        let resolver = Resolver::new(&RicoConfig::default());
        let descriptor = descriptor.with_growable(true);
        let facts = PrefabFacts::new(width, length);

        let resolution = resolver.resolve(&descriptor, Some(&facts));
        let behavior = resolution.behavior.expect("descriptor resolves");

        prop_assert!(!behavior.growable);
        prop_assert!(!behavior.variant.is_growable());
        prop_assert_eq!(behavior.placement, PlacementMode::Manual);
        let too_large = resolution
            .findings
            .iter()
            .filter(|f| f.kind == FindingKind::TooLargeForGrowable)
            .count();
        prop_assert_eq!(too_large, 1);
    }

    #[test]
    fn network_paths_are_never_growable(
        descriptor in arb_descriptor(),
        width in 1u32..=20,
        length in 1u32..=20,
    ) {
        let resolver = Resolver::new(&RicoConfig::default());
        let descriptor = descriptor.with_growable(true);
        let facts = PrefabFacts::new(width, length).with_network_paths();

        let behavior = resolver.resolve(&descriptor, Some(&facts)).behavior.expect("descriptor resolves");

        prop_assert!(!behavior.growable);
    }

    #[test]
    fn growable_flag_matches_variant_and_placement(descriptor in arb_descriptor(), facts in arb_facts()) {
        let resolver = Resolver::new(&RicoConfig::default());

        let behavior = resolver.resolve(&descriptor, Some(&facts)).behavior.expect("descriptor resolves");

        prop_assert_eq!(behavior.variant.is_growable(), behavior.growable);
        prop_assert_eq!(behavior.placement, PlacementMode::from_growable(behavior.growable));
        prop_assert!(!behavior.growable || descriptor.growable);
    }

    #[test]
    fn resolving_the_result_again_is_stable(descriptor in arb_descriptor(), facts in arb_facts()) {
        let resolver = Resolver::new(&RicoConfig::default());

        let first = resolver.resolve(&descriptor, Some(&facts)).behavior.expect("descriptor resolves");
        let again = descriptor.clone().with_growable(first.growable);
        let second = resolver.resolve(&again, Some(&facts)).behavior.expect("descriptor resolves");

        prop_assert_eq!(first, second);
    }

    #[test]
    fn resolution_is_deterministic(descriptor in arb_descriptor(), facts in arb_facts()) {
        let resolver = Resolver::new(&RicoConfig::default());

        let first = resolver.resolve(&descriptor, Some(&facts));
        let second = resolver.resolve(&descriptor, Some(&facts));

        prop_assert_eq!(first, second);
    }
}
