use pretty_assertions::assert_eq;
use thumbnail_core::{AppTags, CategoryIndex, Item};
use thumbnail_engine::{parse_category_config, parse_items, InputError};

const SHARED_CONFIG: &str = r#"
"UserRoamingConfigStore"
{
	"Software"
	{
		"Valve"
		{
			"Steam"
			{
				"apps"
				{
					"620"
					{
						"tags"
						{
							"1"		"Puzzle"
							"0"		"Favorites"
						}
						"LastPlayed"		"1700000000"
					}
					"400"
					{
						"tags"
						{
							"0"		"Puzzle"
						}
					}
					"70"
					{
						"cloudenabled"		"1"
					}
					"not-an-app"
					{
					}
				}
			}
		}
	}
}
"#;

#[test]
fn keyvalues_config_is_parsed_with_tag_order() {
    let config = parse_category_config(SHARED_CONFIG).unwrap();

    assert_eq!(config.len(), 3);
    assert_eq!(config.get(620), Some(&AppTags::with_tags(["Favorites", "Puzzle"])));
    assert_eq!(config.get(400), Some(&AppTags::with_tags(["Puzzle"])));
    assert_eq!(config.get(70), Some(&AppTags::default()));

    let index = CategoryIndex::build(&config);
    assert_eq!(index.members("Puzzle"), &[400, 620]);
    assert_eq!(index.members("Favorites"), &[620]);
}

#[test]
fn json_config_is_accepted() {
    let json = r#"{"UserRoamingConfigStore":{"Software":{"Valve":{"Steam":{"Apps":{
        "10": {"tags": {"0": "Classics", "1": "Shooter"}},
        "20": {}
    }}}}}}"#;
    let config = parse_category_config(json).unwrap();

    assert_eq!(config.get(10), Some(&AppTags::with_tags(["Classics", "Shooter"])));
    assert_eq!(config.get(20), Some(&AppTags::default()));
}

#[test]
fn json_tag_arrays_keep_their_order() {
    let json = r#"{"UserRoamingConfigStore":{"Software":{"Valve":{"Steam":{"Apps":{
        "10": {"tags": ["RPG", "Fav"]},
        "30": {"tags": []}
    }}}}}}"#;
    let config = parse_category_config(json).unwrap();

    assert_eq!(config.get(10), Some(&AppTags::with_tags(["RPG", "Fav"])));
    assert_eq!(config.get(30), Some(&AppTags::with_tags(Vec::<String>::new())));
    assert_eq!(CategoryIndex::build(&config).members("Fav"), &[10]);
}

#[test]
fn deeply_nested_config_is_a_syntax_error() {
    let depth = 200_000;
    let text = format!("{}{}", "\"k\" {".repeat(depth), "}".repeat(depth));
    let err = parse_category_config(&text).unwrap_err();
    assert!(matches!(err, InputError::Syntax { .. }), "{err:?}");
}

#[test]
fn config_without_apps_section_is_rejected() {
    let err = parse_category_config(r#""UserRoamingConfigStore" { "Software" { } }"#).unwrap_err();
    assert!(matches!(err, InputError::MissingApps), "{err:?}");

    let err = parse_category_config("   ").unwrap_err();
    assert!(matches!(err, InputError::Empty));
}

#[test]
fn broken_config_reports_syntax_error() {
    let err = parse_category_config("\"UserRoamingConfigStore\" {\n \"Software\"").unwrap_err();
    assert!(matches!(err, InputError::Syntax { .. }), "{err:?}");
}

#[test]
fn items_accept_appid_and_extra_fields() {
    let json = r#"[
        {"appid": 620, "name": "Portal 2", "name_escaped": "Portal 2", "logo": "x"},
        {"id": 400, "name": "Portal"}
    ]"#;
    let items = parse_items(json).unwrap();
    assert_eq!(items, vec![Item::new(620, "Portal 2"), Item::new(400, "Portal")]);
}

#[test]
fn items_must_be_an_array() {
    let err = parse_items(r#"{"appid": 1, "name": "x"}"#).unwrap_err();
    assert!(matches!(err, InputError::NotAnArray));

    let err = parse_items(r#"[{"appid": "abc"}]"#).unwrap_err();
    assert!(matches!(err, InputError::Json(_)));
}
