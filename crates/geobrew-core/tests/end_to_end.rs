use geobrew_core::builder::{
    build_brewery_geo_index, build_city_geo_index, build_name_index, load_breweries, load_cities,
};
use geobrew_core::pipeline::{self, Operation, Outcome};
use geobrew_core::store::MemoryStore;
use geobrew_core::{brewery_key, search, GeoPoint, GeoStore, IndexKeys, NearestQuery, Settings};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

const CITIES: &str = "\
city,city_ascii,lat,lng,country,iso2,iso3,admin_name,capital,population,id
London,London,51.5072,-0.1275,United Kingdom,GB,GBR,London,primary,11262000,1
Paris,Paris,48.8567,2.3522,France,FR,FRA,Île-de-France,primary,11060000,2
London,London,42.9836,-81.2497,Canada,CA,CAN,Ontario,,404699,3
Berlin,Berlin,52.5200,13.4050,Germany,DE,DEU,Berlin,primary,4473101,4
";

fn breweries_csv() -> String {
    let mut out = String::from("id;breweries;city;state;code;country;phone;website;coordinates\n");
    // Twelve breweries spread west-east across southern Ontario, plus a few
    // elsewhere and a couple of unusable rows.
    for i in 0..12 {
        let lng = -81.20 - 0.15 * i as f64;
        out.push_str(&format!(
            "on{i};Ontario Brewery {i};London;ON;CA;Canada;;;42.98,{lng}\n"
        ));
    }
    out.push_str("uk1;Meantime;London;;GB;United Kingdom;;;51.4826,-0.0077\n");
    out.push_str("de1;Berliner Kindl;Berlin;;DE;Germany;;;52.4719,13.4350\n");
    out.push_str("bad1;Nowhere;;;;;;;not-a-point\n");
    out.push_str(";NoId;;;;;;;1.0,2.0\n");
    out
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

struct Fixture {
    _dir: TempDir,
    settings: Settings,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let mut settings = Settings::default();
    settings.datasets.cities = write(dir.path(), "worldcities.csv", CITIES);
    settings.datasets.breweries = write(dir.path(), "breweries.csv", &breweries_csv());
    Fixture {
        _dir: dir,
        settings,
    }
}

fn ingest_all(store: &mut MemoryStore, settings: &Settings) {
    let keys = &settings.keys;
    let paths = &settings.datasets;
    load_cities(store, &paths.cities).unwrap();
    load_breweries(store, &paths.breweries).unwrap();
    build_name_index(store, &paths.cities, &keys.city_by_name).unwrap();
    build_city_geo_index(store, &paths.cities, &keys.city_geo).unwrap();
    build_brewery_geo_index(store, &paths.breweries, &keys.brewery_geo).unwrap();
}

#[test]
fn duplicate_city_name_resolves_to_last_row() {
    let fx = fixture();
    let mut store = MemoryStore::new();
    ingest_all(&mut store, &fx.settings);

    let city = search::find_city(&mut store, &fx.settings.keys, "London").unwrap();
    assert_eq!(city.id, "3");
    assert_eq!(city.country, "Canada");
}

#[test]
fn geo_positions_match_csv_coordinates() {
    let fx = fixture();
    let mut store = MemoryStore::new();
    ingest_all(&mut store, &fx.settings);

    let expected = [
        ("1", GeoPoint::new(-0.1275, 51.5072)),
        ("2", GeoPoint::new(2.3522, 48.8567)),
        ("3", GeoPoint::new(-81.2497, 42.9836)),
        ("4", GeoPoint::new(13.4050, 52.5200)),
    ];
    for (id, point) in expected {
        let got = store
            .geo_position(&fx.settings.keys.city_geo, id)
            .unwrap()
            .unwrap();
        assert!(got.approx_eq(&point, 1e-6), "{id}: {got:?} vs {point:?}");
    }
}

#[test]
fn nearest_breweries_are_capped_ordered_and_retrievable() {
    let fx = fixture();
    let mut store = MemoryStore::new();
    ingest_all(&mut store, &fx.settings);

    let found = search::nearest_breweries(
        &mut store,
        &fx.settings.keys,
        "London",
        &NearestQuery::default(),
    )
    .unwrap();

    assert_eq!(found.len(), 10);
    assert!(found
        .windows(2)
        .all(|w| w[0].distance_km <= w[1].distance_km));
    assert!(found.iter().all(|b| b.brewery.country == "Canada"));
    for b in &found {
        assert!(!store.get_fields(&brewery_key(&b.brewery.id)).unwrap().is_empty());
    }
}

#[test]
fn rows_without_id_leave_no_trace() {
    let fx = fixture();
    let mut store = MemoryStore::new();
    ingest_all(&mut store, &fx.settings);

    let keys: &IndexKeys = &fx.settings.keys;
    assert_eq!(store.geo_len(&keys.brewery_geo), 14);
    assert_eq!(store.get_index_entry(&keys.city_by_name, "").unwrap(), None);
    assert_eq!(store.geo_position(&keys.brewery_geo, "").unwrap(), None);
    assert!(!store.contains_key("brw:"));
}

#[test]
fn pipeline_runs_everything_in_order() {
    let fx = fixture();
    let mut store = MemoryStore::new();
    let mut settings = fx.settings.clone();
    settings.city = "Paris".to_string();

    let results = pipeline::run(&mut store, &settings, &Operation::ALL);
    assert_eq!(results.len(), Operation::ALL.len());
    for (op, result) in &results {
        assert!(result.is_ok(), "{op} failed: {result:?}");
    }

    match &results[6].1 {
        Ok(Outcome::Location(loc)) => {
            assert_eq!(loc.country, "France");
            assert!(loc.geo_position.is_some());
        }
        other => panic!("unexpected city-location outcome: {other:?}"),
    }
    match &results[7].1 {
        Ok(Outcome::Breweries(list)) => {
            // Meantime (~340 km) is the only brewery within 1000 km of Paris
            // besides Berlin (~880 km).
            let ids: Vec<_> = list.iter().map(|b| b.brewery.id.as_str()).collect();
            assert_eq!(ids, ["uk1", "de1"]);
        }
        other => panic!("unexpected nearest-breweries outcome: {other:?}"),
    }
}

#[test]
fn queries_before_ingestion_report_not_found() {
    let fx = fixture();
    let mut store = MemoryStore::new();
    let results = pipeline::run(
        &mut store,
        &fx.settings,
        &[Operation::FindCity, Operation::NearestBreweries],
    );
    for (_, result) in results {
        assert!(result.unwrap_err().is_not_found());
    }
}
