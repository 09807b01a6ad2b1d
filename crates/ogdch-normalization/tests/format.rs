//! Tests for resource format classification against the bundled tables.

use std::collections::BTreeSet;

use ogdch_model::Resource;
use ogdch_normalization::format::{FormatInputs, SERVICE_FORMAT};
use ogdch_normalization::{FormatRule, ResourceFormatClassifier};
use ogdch_standards::{FormatMappings, bundled_mappings};

fn mappings() -> FormatMappings {
    bundled_mappings().expect("bundled mappings")
}

type Case = (Option<&'static str>, Option<&'static str>, Option<&'static str>, &'static str);

/// (download_url, media_type, format) -> expected format
const CASES: &[Case] = &[
    (None, None, None, "SERVICE"),
    (Some("http://download.url"), None, Some("dogvideo"), ""),
    (Some("http://download.url"), None, None, ""),
    (None, None, Some("catgif"), "SERVICE"),
    (None, None, Some("xml"), "XML"),
    (Some("http://download.url"), Some("cat/gif"), Some("gif"), "gif"),
    (None, Some("html"), Some("xml"), "HTML"),
    (None, Some("text/html"), Some("xml"), "HTML"),
    (Some("http://download.url"), None, Some("application/vnd.oas..."), "ODS"),
    (
        Some("http://download.url"),
        None,
        Some("vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        "XLS",
    ),
    (Some("http://download.url"), None, Some("pc-axis file"), "PC-AXIS"),
    (
        Some("http://download.url/Download.aspx?file=pc-axis-file-001"),
        Some("pc-axis file"),
        Some("CSV"),
        "PC-AXIS",
    ),
    (Some("http://download.url"), None, Some("Application/Sparql-..."), "SPARQL"),
    (Some("http://download.url"), Some("application/sparql-query"), None, "SPARQL"),
    (Some("http://download.url"), None, Some("rq"), "SPARQL"),
    (Some("http://download.url/foo.sparqlq"), None, None, "SPARQL"),
    (Some("http://download.url"), Some("application/ld+json"), None, "JSON-LD"),
    (Some("http://download.url"), None, Some("jsonld"), "JSON-LD"),
    (Some("http://download.url"), None, Some("json_ld"), "JSON-LD"),
    (Some("http://download.url/foo"), Some("text/n3"), None, "N3"),
    (Some("http://download.url"), None, Some("n3"), "N3"),
    (Some("http://download.url/foo.n3"), None, None, "N3"),
    (Some("http://download.url"), Some("application/rdf+xml"), None, "RDF XML"),
    (Some("http://download.url"), None, Some("rdf"), "RDF XML"),
    (Some("http://download.url"), None, Some("rdf_xml"), "RDF XML"),
    (Some("http://download.url/foo.rdf"), None, None, "RDF XML"),
    (Some("http://download.url"), Some("application/n-triples"), None, "RDF N-Triples"),
    (Some("http://download.url"), None, Some("nt"), "RDF N-Triples"),
    (Some("http://download.url/foo.nt"), None, None, "RDF N-Triples"),
    (Some("http://download.url"), Some("text/turtle"), None, "RDF Turtle"),
    (Some("http://download.url"), None, Some("ttl"), "RDF Turtle"),
    (Some("http://download.url/foo.ttl"), None, None, "RDF Turtle"),
    (Some("http://download.url"), Some("turtle"), None, "RDF Turtle"),
    (Some("http://download.url"), None, Some("ESRI Shapefile"), "SHP"),
    (Some("http://download.url"), None, Some("text (.txt)"), "TXT"),
    (Some("http://download.url"), None, Some("comma ..."), "CSV"),
    (None, None, Some("SHP"), "SHP"),
    (Some("http://download.url"), Some("text/xml"), Some("html"), "XML"),
    (Some("http://download.url/cat.gif?param=1"), Some(""), Some(""), ""),
    (Some("http://download.url/cat.gif?param=1"), Some("text/xml"), Some("xml"), "XML"),
    (Some("http://download.url/file.zip?param=1"), Some(""), Some(""), "ZIP"),
    (Some("http://download.url/file.zip?param=1"), Some("text/xml"), Some("xml"), "XML"),
    (None, None, Some("esri shapefile"), "SHP"),
    (Some("http://download.url/file.asc"), None, Some("grid_ascii"), "ESRI ASCII Grid"),
    (Some("http://download.url/file.asc"), Some("text/plain"), Some("grid_ascii"), "TXT"),
    (Some("http://download.url/file"), None, Some("world"), "WORLDFILE"),
    (Some("http://download.url/file"), None, Some("wmts_srvc"), "WMTS"),
];

#[test]
fn classifies_catalog_resources() {
    let mappings = mappings();
    let classifier = ResourceFormatClassifier::new(&mappings);
    for (download_url, media_type, format, expected) in CASES {
        let result = classifier.classify(*media_type, *format, *download_url);
        assert_eq!(
            result.format, *expected,
            "url={download_url:?} media_type={media_type:?} format={format:?}"
        );
    }
}

#[test]
fn reports_matching_rule() {
    let mappings = mappings();
    let classifier = ResourceFormatClassifier::new(&mappings);
    let rule = |m, f, u| classifier.resolve_format(FormatInputs::new(m, f, u)).0;
    assert_eq!(rule(Some("text/html"), Some("xml"), None), FormatRule::MediaType);
    assert_eq!(rule(None, Some("xml"), None), FormatRule::DeclaredFormat);
    assert_eq!(rule(None, None, Some("http://x/a.csv")), FormatRule::DownloadUrl);
    assert_eq!(rule(None, Some("catgif"), None), FormatRule::Service);
}

#[test]
fn media_types_resolve_to_iana_codes() {
    let mappings = mappings();
    let classifier = ResourceFormatClassifier::new(&mappings);
    assert_eq!(classifier.resolve_media_type(None), "");
    assert_eq!(classifier.resolve_media_type(Some("")), "");
    assert_eq!(classifier.resolve_media_type(Some("html")), "text/html");
    assert_eq!(classifier.resolve_media_type(Some("text/html")), "text/html");
    assert_eq!(classifier.resolve_media_type(Some("text/xml")), "application/xml");
    assert_eq!(classifier.resolve_media_type(Some("Text/Turtle")), "text/turtle");
    assert_eq!(classifier.resolve_media_type(Some("cat/video")), "cat/video");
}

#[test]
fn service_resource_has_no_media_type() {
    let mappings = mappings();
    let result = ResourceFormatClassifier::new(&mappings).classify(None, None, None);
    assert_eq!(result.format, SERVICE_FORMAT);
    assert_eq!(result.media_type, "");
}

#[test]
fn prepare_resource_writes_back() {
    let mappings = mappings();
    let classifier = ResourceFormatClassifier::new(&mappings);
    let mut resource = Resource {
        media_type: Some("text/csv".to_string()),
        download_url: Some("http://download.url/data".to_string()),
        ..Resource::default()
    };
    classifier.prepare_resource(&mut resource);
    assert_eq!(resource.format.as_deref(), Some("CSV"));
    assert_eq!(resource.media_type.as_deref(), Some("text/csv"));
}

fn media_typed(media_types: &[&str]) -> Vec<Resource> {
    media_types
        .iter()
        .map(|m| Resource {
            media_type: Some((*m).to_string()),
            ..Resource::default()
        })
        .collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn dedup_formats_for_index() {
    let mappings = mappings();
    let classifier = ResourceFormatClassifier::new(&mappings);

    let resources = media_typed(&["rdf+xml", "png"]);
    assert_eq!(classifier.dedup_formats(&resources, true), set(&["RDF XML"]));
    assert_eq!(
        classifier.dedup_formats(&resources, false),
        set(&["RDF XML", "PNG"])
    );

    let resources = media_typed(&["rdf+xml", "rdf+xml", "png"]);
    assert_eq!(
        classifier.dedup_formats(&resources, false),
        set(&["RDF XML", "PNG"])
    );

    let resources = media_typed(&[
        "ld+json",
        "n3",
        "n-triples",
        "turtle",
        "rdf+xml",
        "sparql-query",
    ]);
    assert_eq!(
        classifier.dedup_formats(&resources, true),
        set(&["N3", "SPARQL", "JSON-LD", "RDF XML", "RDF N-Triples", "RDF Turtle"])
    );
}

#[test]
fn undetermined_format_becomes_na() {
    let mappings = mappings();
    let classifier = ResourceFormatClassifier::new(&mappings);
    let resources = vec![
        Resource {
            download_url: Some("http://download.url/cat.gif".to_string()),
            ..Resource::default()
        },
        Resource::default(),
    ];
    assert_eq!(
        classifier.dedup_formats(&resources, false),
        set(&["N/A", "SERVICE"])
    );
    assert!(classifier.dedup_formats(&resources, true).is_empty());
}
