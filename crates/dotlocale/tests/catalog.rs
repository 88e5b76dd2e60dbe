//! Integration tests for catalog loading and cross-locale validation.

use dotlocale::{
    Catalog, CatalogNode, CatalogWarning, Entry, LoadError, PluralRules, Resolver,
    TranslateOptions, validate_locale,
};

const TOPIC_JSON: &str = r#"{
  "en": {
    "js": {
      "topic": {
        "title": "Topic",
        "replies": { "one": "1 reply", "other": "%{count} replies" },
        "summary": { "one": "short", "details": "long" }
      },
      "posts": { "0": "No posts", "other": "%{count} posts" }
    }
  }
}"#;

// =========================================================================
// JSON Loading
// =========================================================================

#[test]
fn json_objects_become_branches() {
    let catalog = Catalog::from_json_str(TOPIC_JSON).unwrap();
    let root = catalog.locale("en").unwrap();
    assert!(matches!(root.walk(["js", "topic"]), Some(Entry::Branch(_))));
    assert_eq!(root.walk(["js", "topic", "title"]), Some(Entry::Leaf("Topic")));
}

#[test]
fn json_category_objects_become_variants() {
    let catalog = Catalog::from_json_str(TOPIC_JSON).unwrap();
    let root = catalog.locale("en").unwrap();
    assert_eq!(root.walk(["js", "topic", "replies"]).map(Entry::kind), Some("plural variants"));
    assert_eq!(root.walk(["js", "posts"]).map(Entry::kind), Some("plural variants"));
}

#[test]
fn json_mixed_key_objects_stay_branches() {
    let catalog = Catalog::from_json_str(TOPIC_JSON).unwrap();
    let root = catalog.locale("en").unwrap();
    assert_eq!(root.walk(["js", "topic", "summary"]).map(Entry::kind), Some("branch"));
    assert_eq!(
        root.walk(["js", "topic", "summary", "details"]),
        Some(Entry::Leaf("long"))
    );
}

#[test]
fn json_catalog_resolves() {
    let resolver = Resolver::new(Catalog::from_json_str(TOPIC_JSON).unwrap());
    assert_eq!(resolver.t("topic.replies", &TranslateOptions::with_count(4)), "4 replies");
    assert_eq!(resolver.t("posts", &TranslateOptions::with_count(0)), "No posts");
}

#[test]
fn json_parts_with_extras() {
    let json = r#"{
        "translations": { "en": { "js": { "hello": "Hello" } } },
        "extras": { "en": { "admin": { "title": "Admin" } } }
    }"#;
    let catalog = Catalog::from_json_parts(json).unwrap();
    assert!(catalog.extras("en").is_some());

    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.t("hello", &TranslateOptions::new()), "Hello");
    assert_eq!(resolver.t("admin.title", &TranslateOptions::new()), "Admin");
}

#[test]
fn json_parts_without_extras() {
    let json = r#"{ "translations": { "de": { "js": { "hello": "Hallo" } } } }"#;
    let catalog = Catalog::from_json_parts(json).unwrap();
    assert!(catalog.has_locale("de"));
    assert!(catalog.extras("de").is_none());
}

#[test]
fn json_arrays_are_rejected() {
    let err = Catalog::from_json_str(r#"{"en": {"js": {"list": ["a", "b"]}}}"#).unwrap_err();
    assert!(matches!(
        &err,
        LoadError::InvalidNode { path, kind: "array" } if path == "en.js.list"
    ));
    assert_eq!(err.position(), None);
}

#[test]
fn json_non_object_root_is_rejected() {
    let err = Catalog::from_json_str(r#"["en"]"#).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
}

#[test]
fn deserialize_single_node() {
    let node: CatalogNode = serde_json::from_str(r#"{"one": "1 item", "other": "items"}"#).unwrap();
    assert_eq!(
        node,
        CatalogNode::variants([("one", "1 item"), ("other", "items")])
    );
}

// =========================================================================
// Introspection
// =========================================================================

#[test]
fn scopes_are_sorted_paths() {
    let catalog = Catalog::from_json_str(TOPIC_JSON).unwrap();
    assert_eq!(
        catalog.scopes("en"),
        vec![
            "js.posts",
            "js.topic.replies",
            "js.topic.summary.details",
            "js.topic.summary.one",
            "js.topic.title",
        ]
    );
    assert!(catalog.scopes("fr").is_empty());
}

#[test]
fn locales_are_sorted() {
    let mut catalog = Catalog::new();
    catalog
        .insert("pl", "js.a", "a")
        .insert("de", "js.a", "a")
        .insert("en", "js.a", "a");
    assert_eq!(catalog.locales().collect::<Vec<_>>(), vec!["de", "en", "pl"]);
}

// =========================================================================
// Validation
// =========================================================================

fn drifted_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .insert("en", "js.hello", "Hello %{name}")
        .insert("en", "js.posts", CatalogNode::variants([("one", "1 post"), ("other", "%{count} posts")]))
        .insert("en", "js.bye", "Bye")
        .insert("en", "js.title", "Title");
    catalog
        .insert("pl", "js.hello", "Cześć %{user}")
        .insert(
            "pl",
            "js.posts",
            CatalogNode::variants([("one", "1 post"), ("few", "%{count} posty"), ("manny", "%{count} postów")]),
        )
        .insert("pl", "js.title", CatalogNode::variants([("one", "Tytuł"), ("other", "Tytuły")]))
        .insert("pl", "js.extra", "Extra");
    catalog
}

#[test]
fn validation_reports_drift() {
    let warnings = validate_locale(&drifted_catalog(), "en", "pl", &PluralRules::cldr());
    let report = warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(report, @r"
    'js.extra' in 'pl' does not exist in the source locale
    'js.hello' in 'pl' placeholders differ from the source; missing: name; unexpected: user
    'js.posts' in 'pl' has variant 'manny', which is not a plural category of 'pl'; did you mean: many?
    'js.title' in 'pl' is plural variants, but string in the source locale
    'js.bye' is missing from 'pl'
    ");
}

#[test]
fn validation_suggestions_are_structured() {
    let warnings = validate_locale(&drifted_catalog(), "en", "pl", &PluralRules::cldr());
    assert!(warnings.contains(&CatalogWarning::InvalidVariantKey {
        scope: "js.posts".to_string(),
        locale: "pl".to_string(),
        key: "manny".to_string(),
        suggestions: vec!["many".to_string()],
    }));
}

#[test]
fn numeral_variant_keys_are_valid() {
    let mut catalog = Catalog::new();
    catalog
        .insert("en", "js.posts", CatalogNode::variants([("one", "1 post"), ("other", "%{count} posts")]))
        .insert("de", "js.posts", CatalogNode::variants([("0", "Keine"), ("one", "1 Beitrag"), ("other", "%{count} Beiträge")]));
    assert!(validate_locale(&catalog, "en", "de", &PluralRules::cldr()).is_empty());
}

#[test]
fn categories_outside_the_language_are_invalid() {
    let mut catalog = Catalog::new();
    catalog
        .insert("en", "js.posts", CatalogNode::variants([("one", "1 post"), ("other", "%{count} posts")]))
        .insert("ja", "js.posts", CatalogNode::variants([("one", "1"), ("other", "%{count}")]));
    let warnings = validate_locale(&catalog, "en", "ja", &PluralRules::cldr());
    assert!(matches!(
        warnings.as_slice(),
        [CatalogWarning::InvalidVariantKey { key, .. }] if key == "one"
    ));
}

#[test]
fn validation_needs_both_locales() {
    let catalog = drifted_catalog();
    assert!(validate_locale(&catalog, "en", "fr", &PluralRules::cldr()).is_empty());
    assert!(validate_locale(&catalog, "fr", "pl", &PluralRules::cldr()).is_empty());
}

#[test]
fn matching_locales_validate_cleanly() {
    let catalog = Catalog::from_json_str(TOPIC_JSON).unwrap();
    assert!(validate_locale(&catalog, "en", "en", &PluralRules::cldr()).is_empty());
}
