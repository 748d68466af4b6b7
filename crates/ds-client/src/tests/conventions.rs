use crate::conventions::default_collection_name;
use crate::{Conventions, ENTITY_NAME_KEY, RUST_TYPE_KEY};

use googletest::assert_that;
use googletest::prelude::{contains_substring, eq, some};
use serde_json::Value;

struct Greeting;
struct Category;
struct Box2;

#[test]
fn given_plain_type_when_collection_name_then_pluralized_short_name() {
    let conventions = Conventions::default();

    assert_that!(conventions.collection_name::<Greeting>(), eq("Greetings"));
    assert_that!(conventions.collection_name::<Category>(), eq("Categories"));
    assert_that!(conventions.collection_name::<Box2>(), eq("Box2s"));
}

#[test]
fn given_type_names_when_default_collection_name_then_path_and_generics_stripped() {
    assert_that!(
        default_collection_name("my_app::model::Address"),
        eq("Addresses")
    );
    assert_that!(default_collection_name("a::Day"), eq("Days"));
    assert_that!(
        default_collection_name("a::Wrapper<b::Inner>"),
        eq("Wrappers")
    );
    assert_that!(default_collection_name("()"), eq("Documents"));
}

#[test]
fn given_override_when_collection_name_then_override_wins() {
    let conventions = Conventions::default().with_collection_name::<Greeting>("HelloWorlds");

    assert_that!(conventions.collection_name::<Greeting>(), eq("HelloWorlds"));
    assert_that!(conventions.collection_name::<Category>(), eq("Categories"));
}

#[test]
fn given_type_when_metadata_for_then_entity_and_rust_type_set() {
    let conventions = Conventions::default();

    let metadata = conventions.metadata_for::<Greeting>();

    assert_that!(
        metadata.get(ENTITY_NAME_KEY).and_then(Value::as_str),
        some(eq("Greetings"))
    );
    assert_that!(
        metadata.get(RUST_TYPE_KEY).and_then(Value::as_str),
        some(contains_substring("Greeting"))
    );
}
