//! Integration tests for Path rendering and message path capture.

use kova::{catalog::chars, try_validate, Config, Path, PathSegment};

#[test]
fn test_path_construction_and_display() {
    assert_eq!(Path::root().to_string(), "");
    assert_eq!(Path::root().push_field("name").to_string(), "name");
    assert_eq!(Path::root().push_index(0).to_string(), "[0]");

    let path = Path::root()
        .push_field("users")
        .push_index(0)
        .push_field("address")
        .push_field("city");
    assert_eq!(path.to_string(), "users[0].address.city");
}

#[test]
fn test_synthetic_element_locators() {
    let element = Path::from_field("list")
        .push_index(1)
        .push_marker("collection element");
    assert_eq!(element.full_name(), "list[1]<collection element>");

    let value = Path::from_field("scores")
        .push_key("alice")
        .push_marker("map value")
        .push_field("points");
    assert_eq!(value.full_name(), "scores[alice]<map value>.points");
}

#[test]
fn test_path_segments_preserved() {
    let path = Path::root().push_field("data").push_index(42).push_key("k");

    let segments: Vec<&PathSegment> = path.segments().collect();
    assert_eq!(
        segments,
        vec![
            &PathSegment::field("data"),
            &PathSegment::index(42),
            &PathSegment::key("k")
        ]
    );
}

#[test]
fn test_path_is_immutable() {
    let base = Path::root().push_field("items");

    let first = base.push_index(0);
    let second = base.push_index(1);

    assert_eq!(base.to_string(), "items");
    assert_eq!(first.to_string(), "items[0]");
    assert_eq!(second.to_string(), "items[1]");
}

#[test]
fn test_rendering_is_idempotent() {
    let path = Path::from_field("a").push_index(3).push_field("b");
    assert_eq!(path.full_name(), path.full_name());
}

#[test]
fn test_recorded_paths_survive_later_descents() {
    let messages = try_validate(&Config::new(), |cx| {
        cx.field("first", |cx| cx.check("", &chars::not_blank()))?;
        cx.field("second", |cx| {
            cx.field("deeper", |cx| cx.check("", &chars::not_blank()))
        })?;
        Ok(())
    })
    .into_result()
    .unwrap_err();

    let paths: Vec<_> = messages.iter().map(|m| m.path.full_name()).collect();
    assert_eq!(paths, vec!["first", "second.deeper"]);
}
