//! End-to-end rounds: declarations in, index files out, index read back

use std::fs;
use std::path::Path;
use suppressor_core::{
    process_round, ClassOutputLayout, ExclusionSet, FixedOutputRoot, IndexError, RoundProcessor,
    SuppressorConfig,
};
use suppressor_scanner::index::{CLASSES_FILE_NAME, METHODS_FILE_NAME};
use suppressor_scanner::types::{Annotation, BinaryName, Primitive, Type};
use suppressor_scanner::{Declaration, DeclarationSet, MethodKey};
use tempfile::TempDir;

fn suppressed() -> Annotation {
    Annotation::suppress_warnings(["modernizer"])
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

fn key(line: &str) -> MethodKey {
    MethodKey::parse(line).unwrap()
}

/// `pkg.Outer` marked with a marked no-arg constructor, plus a non-static
/// `Inner` whose constructor is marked, plus an overload pair
fn sample_round() -> DeclarationSet {
    let mut set = DeclarationSet::new();
    let outer = set.add(Declaration::class("pkg", "Outer").annotated(suppressed()));
    set.add(Declaration::constructor().enclosed_by(outer).annotated(suppressed()));

    let inner = set.add(Declaration::class("pkg", "Inner").enclosed_by(outer));
    set.add(Declaration::constructor().enclosed_by(inner).annotated(suppressed()));

    let owner = set.add(Declaration::class("pkg", "Owner"));
    set.add(
        Declaration::method("m")
            .enclosed_by(owner)
            .with_parameter(Primitive::Int)
            .with_parameter(Primitive::Boolean)
            .annotated(suppressed()),
    );
    set.add(Declaration::method("m").enclosed_by(owner).with_parameter(Primitive::Int));

    let list_of_string = Type::generic(
        BinaryName::parse("java.util.List").unwrap(),
        vec![Type::reference(BinaryName::parse("java.lang.String").unwrap())],
    );
    set.add(
        Declaration::method("lists")
            .enclosed_by(owner)
            .returning(Type::array(list_of_string, 1))
            .annotated(suppressed()),
    );
    set
}

#[test]
fn test_round_writes_both_files() {
    let temp = TempDir::new().unwrap();
    let outcome = process_round(
        &sample_round(),
        &SuppressorConfig::default(),
        &FixedOutputRoot::new(temp.path()),
    )
    .unwrap();

    assert_eq!(read(temp.path(), CLASSES_FILE_NAME), "pkg/Outer(\\$.+)?\n");
    assert_eq!(
        read(temp.path(), METHODS_FILE_NAME),
        "pkg/Outer <init> ()\n\
         pkg/Outer$Inner <init> (Lpkg/Outer;)\n\
         pkg/Owner m (IZ)\n\
         pkg/Owner lists ()\n"
    );

    assert_eq!(outcome.report.files.len(), 2);
    assert_eq!(outcome.report.files[0].entries, 1);
    assert_eq!(outcome.report.files[1].entries, 4);
    assert_eq!(
        outcome.index.method_signatures[3].return_type.descriptor(),
        "[Ljava/util/List;"
    );
}

#[test]
fn test_written_index_reads_back() {
    let temp = TempDir::new().unwrap();
    process_round(
        &sample_round(),
        &SuppressorConfig::default(),
        &FixedOutputRoot::new(temp.path()),
    )
    .unwrap();

    let set = ExclusionSet::load(temp.path()).unwrap();
    assert!(set.is_class_excluded("pkg/Outer"));
    assert!(set.is_class_excluded("pkg/Outer$Inner"));
    assert!(set.is_class_excluded("pkg/Outer$1"));
    assert!(!set.is_class_excluded("pkg/Owner"));

    assert!(set.is_method_excluded(&key("pkg/Outer$Inner <init> (Lpkg/Outer;)")));
    assert!(set.is_method_excluded(&key("pkg/Owner m (IZ)")));
    assert!(!set.is_method_excluded(&key("pkg/Owner m (I)")));

    // Keys derived from call sites ignore the return type
    let call = MethodKey::from_call_site("pkg/Owner", "lists", "()[Ljava/util/List;").unwrap();
    assert!(set.is_method_excluded(&call));
}

#[test]
fn test_rounds_are_idempotent() {
    let temp = TempDir::new().unwrap();
    let resolver = FixedOutputRoot::new(temp.path());
    let config = SuppressorConfig::default();

    let first = process_round(&sample_round(), &config, &resolver).unwrap();
    let classes = fs::read(temp.path().join(CLASSES_FILE_NAME)).unwrap();
    let methods = fs::read(temp.path().join(METHODS_FILE_NAME)).unwrap();

    let second = process_round(&sample_round(), &config, &resolver).unwrap();
    assert_eq!(fs::read(temp.path().join(CLASSES_FILE_NAME)).unwrap(), classes);
    assert_eq!(fs::read(temp.path().join(METHODS_FILE_NAME)).unwrap(), methods);
    assert_eq!(first.report, second.report);
}

#[test]
fn test_empty_round_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("out");

    let mut set = DeclarationSet::new();
    set.add(Declaration::class("pkg", "Plain").annotated(Annotation::suppress_warnings(["unchecked"])));

    let outcome = process_round(&set, &SuppressorConfig::default(), &FixedOutputRoot::new(&root)).unwrap();
    assert!(outcome.index.is_empty());
    assert!(outcome.report.is_empty());
    assert!(!root.exists());
}

#[test]
fn test_empty_round_keeps_previous_files() {
    let temp = TempDir::new().unwrap();
    let resolver = FixedOutputRoot::new(temp.path());
    let config = SuppressorConfig::default();

    process_round(&sample_round(), &config, &resolver).unwrap();
    let before = read(temp.path(), METHODS_FILE_NAME);

    process_round(&DeclarationSet::new(), &config, &resolver).unwrap();
    assert_eq!(read(temp.path(), METHODS_FILE_NAME), before);
}

#[test]
fn test_later_round_replaces_files() {
    let temp = TempDir::new().unwrap();
    let resolver = FixedOutputRoot::new(temp.path());
    let config = SuppressorConfig::default();
    process_round(&sample_round(), &config, &resolver).unwrap();

    let mut set = DeclarationSet::new();
    let owner = set.add(Declaration::class("pkg", "Owner"));
    set.add(Declaration::method("run").enclosed_by(owner).annotated(suppressed()));
    process_round(&set, &config, &resolver).unwrap();

    assert_eq!(read(temp.path(), CLASSES_FILE_NAME), "");
    assert_eq!(read(temp.path(), METHODS_FILE_NAME), "pkg/Owner run ()\n");
}

#[test]
fn test_failed_round_leaves_previous_files() {
    let temp = TempDir::new().unwrap();
    let resolver = FixedOutputRoot::new(temp.path());
    let config = SuppressorConfig::default();
    process_round(&sample_round(), &config, &resolver).unwrap();
    let before = read(temp.path(), METHODS_FILE_NAME);

    let mut set = DeclarationSet::new();
    let owner = set.add(Declaration::class("pkg", "Owner"));
    set.add(Declaration::method("good").enclosed_by(owner).annotated(suppressed()));
    set.add(
        Declaration::method("bad")
            .enclosed_by(owner)
            .with_parameter(Type::Void)
            .annotated(suppressed()),
    );

    let err = process_round(&set, &config, &resolver).unwrap_err();
    assert!(matches!(err, IndexError::Scan(_)));
    assert_eq!(read(temp.path(), METHODS_FILE_NAME), before);
}

#[test]
fn test_class_output_layout_round() {
    let temp = TempDir::new().unwrap();
    let classes = temp.path().join("target").join("classes");

    let outcome = process_round(
        &sample_round(),
        &SuppressorConfig::default(),
        &ClassOutputLayout::new(&classes),
    )
    .unwrap();

    let expected = temp.path().join("target").join("modernizer").join("main");
    assert_eq!(outcome.report.root, expected);
    assert!(expected.join(CLASSES_FILE_NAME).is_file());
    assert!(!classes.exists());
}

#[test]
fn test_unresolvable_root_fails_round() {
    let err = process_round(
        &sample_round(),
        &SuppressorConfig::default(),
        &FixedOutputRoot::new(""),
    )
    .unwrap_err();
    assert!(matches!(err, IndexError::OutputRootUnresolved(_)));
}

#[test]
fn test_processor_uses_configured_marker_and_names() {
    let temp = TempDir::new().unwrap();
    let config = SuppressorConfig {
        marker_value: "legacy".to_string(),
        classes_file: "classes.lst".to_string(),
        methods_file: "methods.lst".to_string(),
        ..SuppressorConfig::default()
    };

    let mut set = DeclarationSet::new();
    set.add(Declaration::class("pkg", "Legacy").annotated(Annotation::suppress_warnings(["legacy"])));
    set.add(Declaration::class("pkg", "Modern").annotated(suppressed()));

    let processor = RoundProcessor::new(&config).unwrap();
    processor.process(&set, &FixedOutputRoot::new(temp.path())).unwrap();

    assert_eq!(read(temp.path(), "classes.lst"), "pkg/Legacy(\\$.+)?\n");
    let set = ExclusionSet::load_with_config(temp.path(), &config).unwrap();
    assert!(set.is_class_excluded("pkg/Legacy$Helper"));
    assert!(!set.is_class_excluded("pkg/Modern"));
}
