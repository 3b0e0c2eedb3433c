// tests/evolution_test.rs
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trace_model::{EnumEvolution, EvolutionTable, Slot, TraceModelError, VersionTag};

fn v(text: &str) -> VersionTag {
    VersionTag::parse(text).unwrap()
}

fn random_version(rng: &mut StdRng) -> VersionTag {
    let extras: Vec<String> = (0..rng.gen_range(0..3))
        .map(|_| ["node", "1", "10", "2", "canary"][rng.gen_range(0..5)].to_string())
        .collect();
    VersionTag::with_extra(
        rng.gen_range(0..3),
        rng.gen_range(0..3),
        rng.gen_range(0..3),
        extras,
    )
}

#[test]
fn test_version_ordering_is_antisymmetric_and_transitive() {
    let mut rng = StdRng::seed_from_u64(99);
    let versions: Vec<VersionTag> = (0..200).map(|_| random_version(&mut rng)).collect();

    for a in &versions {
        assert_eq!(VersionTag::compare(a, a), 0);
        for b in &versions {
            assert_eq!(VersionTag::compare(a, b), -VersionTag::compare(b, a));
        }
    }

    let mut sorted = versions.clone();
    sorted.sort();
    assert!(sorted.windows(2).all(|pair| VersionTag::compare(&pair[0], &pair[1]) <= 0));
}

#[test]
fn test_sentinels_bound_every_version() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let version = random_version(&mut rng);
        assert_eq!(VersionTag::compare(&VersionTag::EARLIEST, &version), -1);
        assert_eq!(VersionTag::compare(&VersionTag::LATEST, &version), 1);

        let earliest_same = VersionTag {
            extra: trace_model::domain::Extra::Earliest,
            ..version.clone()
        };
        let latest_same = VersionTag {
            extra: trace_model::domain::Extra::Latest,
            ..version.clone()
        };
        assert!(earliest_same < version);
        assert!(latest_same > version);
    }
}

#[test]
fn test_map_flag_table_scenario() {
    let table = EvolutionTable::new(vec![
        ("<9.0.0", vec!["trace-maps", "trace-maps-details"]),
        (">=9.0.0", vec!["log-maps", "log-maps-details"]),
    ])
    .unwrap();

    assert_eq!(table.resolve(&v("8.5.1")).unwrap()[0], "trace-maps");
    assert_eq!(table.resolve(&v("9.1.0")).unwrap()[0], "log-maps");
    assert_eq!(table.resolve(&v("0.0.1")).unwrap()[1], "trace-maps-details");
    assert_eq!(table.scan_count(), 3);

    // Repeated lookups for one log's version stay on the cache
    for _ in 0..10 {
        table.resolve(&v("0.0.1"));
    }
    assert_eq!(table.scan_count(), 3);
}

#[test]
fn test_bailout_kind_scenario() {
    let kind = EnumEvolution::new(
        "BailoutKind",
        vec![(
            "*",
            vec![
                Slot::bare(0),
                Slot::named(1, "Eager", ["eager"]),
                Slot::named(2, "Soft", Vec::<String>::new()),
            ],
        )],
    )
    .unwrap();
    let version = v("9.4.146");

    assert_eq!(kind.decode_numeric(1, &version).unwrap(), 1);
    assert_eq!(kind.decode_name("eager", &version, false).unwrap(), 1);
    assert_eq!(kind.encode_name(1, &version).unwrap(), "Eager");

    match kind.decode_name("Eager", &version, false) {
        Err(TraceModelError::UnrecognizedValue { enum_name, input }) => {
            assert_eq!(enum_name, "BailoutKind");
            assert_eq!(input, "Eager");
        }
        other => panic!("expected UnrecognizedValue, got {:?}", other),
    }

    // Encoding is not the inverse of name decoding
    let name = kind.encode_name(2, &version).unwrap();
    assert!(kind.decode_name(&name, &version, false).is_err());
}

#[test]
fn test_every_index_decodes() {
    let slots: Vec<Slot<i64>> = (0..16).map(|value| Slot::bare(value * 3)).collect();
    let kind = EnumEvolution::new("Scaled", vec![(">=1.0.0", slots)]).unwrap();
    let version = v("1.2.3");

    for index in 0..16 {
        assert_eq!(kind.decode_numeric(index, &version).unwrap(), index * 3);
    }
    assert!(kind.decode_numeric(-1, &version).is_err());
    assert!(kind.decode_numeric(16, &version).is_err());
}
