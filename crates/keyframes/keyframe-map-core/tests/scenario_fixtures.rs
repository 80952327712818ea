use keyframe_map_core::{KeyframeMap, MapConfig, Value, ValueKind};
use keyframe_test_fixtures::{configs, scenarios};
use serde::Deserialize;
use serde_json::Value as Json;

#[derive(Debug, Deserialize)]
struct Scenario {
    config: MapConfig,
    inserts: Vec<InsertStep>,
    expect: Expect,
}

#[derive(Debug, Deserialize)]
struct InsertStep {
    position: Json,
    value: Value,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Expect {
    bounds: (i64, i64),
    positions: Vec<i64>,
    count: usize,
    reads: Vec<ReadStep>,
}

#[derive(Debug, Deserialize)]
struct ReadStep {
    position: Json,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

fn run(name: &str) {
    let scenario: Scenario = scenarios::load(name).expect("scenario fixture");
    let mut map = KeyframeMap::from_config(&scenario.config);

    for step in scenario.inserts {
        let before = map.bounds();
        match (map.insert(&step.position, step.value), step.error) {
            (Ok(_), None) => {}
            (Err(err), Some(category)) => {
                assert_eq!(err.category(), category, "{name}: insert {}", step.position);
                assert_eq!(map.bounds(), before, "{name}: failed insert moved bounds");
            }
            (res, expected) => panic!(
                "{name}: insert at {} gave {res:?}, expected error {expected:?}",
                step.position
            ),
        }
    }

    let expect = scenario.expect;
    assert_eq!(map.bounds(), expect.bounds, "{name}: bounds");
    assert_eq!(
        map.ordered_positions().collect::<Vec<_>>(),
        expect.positions,
        "{name}: positions"
    );
    assert_eq!(map.count(), expect.count, "{name}: count");

    for read in expect.reads {
        match (map.get(&read.position), read.value, read.error) {
            (Ok(got), Some(want), None) => {
                assert_eq!(got, want, "{name}: get({})", read.position)
            }
            (Err(err), None, Some(category)) => {
                assert_eq!(err.category(), category, "{name}: get({})", read.position)
            }
            (res, value, error) => panic!(
                "{name}: get({}) gave {res:?}, expected value {value:?} / error {error:?}",
                read.position
            ),
        }
    }
}

#[test]
fn all_scenarios_pass() {
    let names = scenarios::keys();
    assert!(names.len() >= 7);
    for name in names {
        run(&name);
    }
}

#[test]
fn sparse_text_scenario_fixture_is_raw_json() {
    let raw = scenarios::json("sparse-text").unwrap();
    let parsed: Json = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["config"]["valueType"], "Text");
}

#[test]
fn config_fixtures_build_maps() {
    let occlusion = MapConfig::from_json_str(&configs::json("occlusion").unwrap()).unwrap();
    let map = KeyframeMap::from_config(&occlusion);
    assert_eq!(map.value_kind(), ValueKind::Bool);
    assert_eq!(map.count(), 100);

    let truncated: MapConfig = configs::load("float-bounds").unwrap();
    assert_eq!(truncated.value_kind, ValueKind::Polygon);
    assert_eq!((truncated.start, truncated.end), (1, 4));
}
