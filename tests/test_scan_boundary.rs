use class_filter::{CasePolicy, Filter, TypeHandle, TypeRecord, load_candidates, strip_class_suffix};
use std::io::Write;
use url::Url;

fn widget_records() -> Vec<TypeRecord> {
    vec![
        TypeRecord {
            name: "org.example.Widget".to_string(),
            is_abstract: false,
            is_interface: false,
            annotations: vec![],
        },
        TypeRecord {
            name: "org.example.AbstractWidget".to_string(),
            is_abstract: true,
            is_interface: false,
            annotations: vec![],
        },
        TypeRecord {
            name: "org.example.WidgetApi".to_string(),
            is_abstract: true,
            is_interface: true,
            annotations: vec!["org.example.Published".to_string()],
        },
        TypeRecord {
            name: "com.other.Helper".to_string(),
            is_abstract: false,
            is_interface: false,
            annotations: vec![],
        },
    ]
}

#[test]
fn test_filter_names_preserves_input_order() {
    let filter = Filter::prefix(CasePolicy::Sensitive, ["org.example"]).unwrap();
    let names = [
        "org.example.Widget",
        "com.other.Helper",
        "org.example.AbstractWidget",
    ];
    assert_eq!(
        filter.filter_names(names),
        vec!["org.example.Widget", "org.example.AbstractWidget"]
    );
}

#[test]
fn test_filter_locations_by_external_form() {
    let urls: Vec<Url> = [
        "file:///repo/org/example/Widget.class",
        "file:///repo/com/other/Helper.class",
    ]
    .iter()
    .map(|u| Url::parse(u).unwrap())
    .collect();

    let filter = Filter::wildcard(CasePolicy::Sensitive, "*org/example*").unwrap();
    let kept = filter.filter_locations(&urls);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].as_str(), "file:///repo/org/example/Widget.class");
}

#[test]
fn test_filter_types_combines_string_and_reflective_checks() {
    let records = widget_records();
    let filter = Filter::and(vec![
        Filter::prefix(CasePolicy::Sensitive, ["org.example"]).unwrap(),
        Filter::Abstract,
        Filter::not(Filter::Interface),
    ])
    .unwrap()
    .optimize();

    let kept = filter.filter_types(&records);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].qualified_name(), "org.example.AbstractWidget");
}

#[test]
fn test_annotation_scan() {
    let records = widget_records();
    let filter = Filter::has_annotation("org.example.Published");
    let kept = filter.filter_types(&records);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].qualified_name(), "org.example.WidgetApi");
}

#[test]
fn test_candidates_from_resource_listing() {
    // resource listings carry .class entries; names are matched after
    // stripping the extension
    let entries = ["org/example/Widget.class", "org/example/WidgetTest.class"];
    let filter = Filter::not(Filter::suffix(CasePolicy::Sensitive, ["Test"]).unwrap());
    let kept: Vec<&str> = entries
        .iter()
        .map(|e| strip_class_suffix(e))
        .filter(|e| filter.accept_name(e))
        .collect();
    assert_eq!(kept, vec!["org/example/Widget"]);
}

#[test]
fn test_load_candidates_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "org.example.Widget").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "  com.other.Helper  ").unwrap();
    file.flush().unwrap();

    let candidates = load_candidates(file.path()).expect("readable candidate file");
    assert_eq!(candidates, vec!["org.example.Widget", "com.other.Helper"]);
}

#[test]
fn test_load_candidates_missing_file_is_an_error() {
    let result = load_candidates(std::path::Path::new("/nonexistent/candidates.txt"));
    assert!(result.is_err());
}
