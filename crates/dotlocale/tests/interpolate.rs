//! Integration tests for placeholder substitution.

use dotlocale::{Catalog, Resolver, TranslateOptions, Value, interpolate, params, placeholder_names};

// =========================================================================
// Syntax
// =========================================================================

#[test]
fn mustache_placeholder() {
    assert_eq!(interpolate("Hello {{name}}", &params! { "name" => "World" }), "Hello World");
}

#[test]
fn percent_placeholder() {
    assert_eq!(interpolate("Hello %{name}", &params! { "name" => "World" }), "Hello World");
}

#[test]
fn mixed_placeholders() {
    let params = params! { "a" => "x", "b" => "y" };
    assert_eq!(interpolate("{{a}} and %{b}", &params), "x and y");
}

#[test]
fn every_occurrence_is_replaced() {
    let params = params! { "a" => "x" };
    assert_eq!(interpolate("{{a}}, {{a}} and %{a}", &params), "x, x and x");
}

#[test]
fn template_without_placeholders_is_unchanged() {
    assert_eq!(interpolate("50% off {today}", &params! {}), "50% off {today}");
}

#[test]
fn placeholder_names_cover_both_styles() {
    assert_eq!(placeholder_names("{{user}} posted %{count} in {{user}}"), vec!["count", "user"]);
    assert!(placeholder_names("no placeholders").is_empty());
}

#[test]
fn unterminated_placeholder_is_literal() {
    assert_eq!(interpolate("Hello {{name", &params! { "name" => "x" }), "Hello {{name");
}

// =========================================================================
// Values
// =========================================================================

#[test]
fn numbers_are_rendered() {
    let params = params! { "n" => 42, "f" => 1.5 };
    assert_eq!(interpolate("{{n}} / {{f}}", &params), "42 / 1.5");
}

#[test]
fn substituted_text_is_not_rescanned() {
    let params = params! { "a" => "{{b}}", "b" => "nope" };
    assert_eq!(interpolate("[{{a}}]", &params), "[{{b}}]");
}

#[test]
fn replacement_text_is_literal() {
    let params = params! { "price" => "$1 $& $$" };
    assert_eq!(interpolate("Cost: %{price}", &params), "Cost: $1 $& $$");
}

#[test]
fn missing_value_keeps_delimiters() {
    assert_eq!(
        interpolate("{{a}} %{b}", &params! {}),
        "[missing {{a}} value] [missing %{b} value]"
    );
}

// =========================================================================
// Through the Resolver
// =========================================================================

#[test]
fn count_is_a_placeholder_value() {
    let resolver = Resolver::new(Catalog::new());
    let options = TranslateOptions::with_count(3);
    assert_eq!(resolver.interpolate("{{count}} items", &options), "3 items");
}

#[test]
fn explicit_count_param_wins() {
    let resolver = Resolver::new(Catalog::new());
    let options = TranslateOptions::with_count(3).with_param("count", "three");
    assert_eq!(resolver.interpolate("{{count}} items", &options), "three items");
}

#[test]
fn params_macro_converts_values() {
    let params = params! { "n" => 3u64, "s" => String::from("x") };
    assert_eq!(params["n"], Value::Number(3));
    assert_eq!(params["s"], Value::String("x".to_string()));
}
