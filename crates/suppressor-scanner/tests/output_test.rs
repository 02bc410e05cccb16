//! Report formatter tests

use suppressor_scanner::output::{to_json, to_markdown};
use suppressor_scanner::types::{Annotation, BinaryName, Primitive, Type};
use suppressor_scanner::{Declaration, DeclarationSet, ExclusionIndex, Scanner};

fn sample_index() -> ExclusionIndex {
    let marker = Annotation::suppress_warnings(["modernizer"]);
    let mut set = DeclarationSet::new();
    let outer = set.add(Declaration::class("org.example", "Outer").annotated(marker.clone()));
    set.add(
        Declaration::method("copy")
            .enclosed_by(outer)
            .with_parameter(Type::array(Primitive::Byte.into(), 1))
            .with_parameter(Type::type_variable("T"))
            .returning(Type::reference(BinaryName::parse("java.lang.String").unwrap()))
            .annotated(marker),
    );
    Scanner::new().scan(&set).unwrap()
}

#[test]
fn test_json_report_shape() {
    let json = to_json(&sample_index()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["class_patterns"][0], r"org/example/Outer(\$.+)?");
    let method = &value["methods"][0];
    assert_eq!(method["key"], "org/example/Outer copy ([BLjava/lang/Object;)");
    assert_eq!(method["owner"], "org/example/Outer");
    assert_eq!(method["parameters"], "([BLjava/lang/Object;)");
    assert_eq!(method["return_type"], "Ljava/lang/String;");
}

#[test]
fn test_markdown_report_uses_source_notation() {
    let markdown = to_markdown(&sample_index());

    assert!(markdown.starts_with("# Modernizer Suppressions\n"));
    assert!(markdown.contains("**Total:** 2 suppressed declarations"));
    assert!(markdown.contains(r"- `org/example/Outer(\$.+)?`"));
    assert!(markdown.contains(
        "org.example.Outer#copy(byte[], java.lang.Object): java.lang.String"
    ));
}

#[test]
fn test_markdown_report_empty() {
    let markdown = to_markdown(&ExclusionIndex::default());
    assert!(markdown.contains("_No classes suppressed_"));
    assert!(markdown.contains("_No methods suppressed_"));
}
