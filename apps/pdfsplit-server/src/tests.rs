//! Tests for the pdfsplit server API
//!
//! Handlers are exercised directly as async functions; property tests cover
//! the request/response shapes and the error-to-status mapping.

use crate::api::*;
use crate::error::ServerError;
use crate::AppState;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};
use pdfsplit_core::{SplitConfig, SplitRequest};

fn test_state() -> AppState {
    AppState { timeout_ms: 30_000 }
}

/// Minimal n-page PDF for request payloads
fn test_pdf(num_pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();

    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", i + 1).into_bytes(),
                        lopdf::StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn split_request(pages: u32, config: SplitConfig) -> SplitRequest {
    SplitRequest {
        file_name: "report.pdf".into(),
        data: STANDARD.encode(test_pdf(pages)),
        config,
    }
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

mod handler_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn health_reports_service_name() {
        let Json(health) = handle_health().await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.service, "pdfsplit-server");
    }

    #[tokio::test]
    async fn inspect_reports_page_count() {
        let req = InspectApiRequest {
            data: STANDARD.encode(test_pdf(4)),
        };

        let Json(response) = handle_inspect(Json(req)).await.unwrap();
        assert!(response.success);
        assert_eq!(response.info.page_count, 4);
        assert_eq!(response.info.version, "1.7");
    }

    #[tokio::test]
    async fn inspect_rejects_bad_base64() {
        let req = InspectApiRequest {
            data: "@@not base64@@".into(),
        };

        let err = handle_inspect(Json(req)).await.unwrap_err();
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "INVALID_REQUEST"));
    }

    #[tokio::test]
    async fn inspect_rejects_garbage_bytes() {
        let req = InspectApiRequest {
            data: STANDARD.encode(b"junk"),
        };

        let err = handle_inspect(Json(req)).await.unwrap_err();
        assert_eq!(err.status_and_code().1, "CORRUPT_SOURCE");
    }

    #[tokio::test]
    async fn split_returns_named_parts() {
        let req = split_request(10, SplitConfig::PageCount { pages_per_output: 3 });

        let response = handle_split(
            State(test_state()),
            Query(SplitQuery::default()),
            Json(req),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 4);
        assert_eq!(body["page_count"], 10);
        assert_eq!(body["outputs"][0]["name"], "report_1.pdf");
        assert_eq!(body["outputs"][3]["name"], "report_4.pdf");

        // Each part decodes to a standalone PDF
        let data = body["outputs"][0]["data"].as_str().unwrap();
        let bytes = STANDARD.decode(data).unwrap();
        assert_eq!(Document::load_mem(&bytes).unwrap().get_pages().len(), 3);
    }

    #[tokio::test]
    async fn split_with_archive_returns_zip() {
        let req = split_request(4, SplitConfig::PageCount { pages_per_output: 2 });

        let response = handle_split(
            State(test_state()),
            Query(SplitQuery { archive: true }),
            Json(req),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "application/zip"
        );
        let disposition = response.headers()["content-disposition"]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("report_split.zip"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"PK"));

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes.to_vec())).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["report_1.pdf", "report_2.pdf"]);
    }

    #[tokio::test]
    async fn split_rejects_out_of_range_expression() {
        let req = split_request(
            3,
            SplitConfig::Pages {
                expression: "7".into(),
            },
        );

        let err = handle_split(
            State(test_state()),
            Query(SplitQuery::default()),
            Json(req),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.status_and_code(),
            (StatusCode::BAD_REQUEST, "PAGE_OUT_OF_RANGE")
        );
    }

    #[tokio::test]
    async fn split_rejects_zero_split_value() {
        let req = split_request(3, SplitConfig::PageCount { pages_per_output: 0 });

        let err = handle_split(
            State(test_state()),
            Query(SplitQuery::default()),
            Json(req),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_and_code().1, "INVALID_SPLIT_VALUE");
    }

    #[tokio::test]
    async fn split_rejects_corrupt_source() {
        let req = SplitRequest {
            file_name: "broken.pdf".into(),
            data: STANDARD.encode(b"these are not the bytes of a pdf"),
            config: SplitConfig::PageCount { pages_per_output: 1 },
        };

        let err = handle_split(
            State(test_state()),
            Query(SplitQuery::default()),
            Json(req),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.status_and_code(),
            (StatusCode::BAD_REQUEST, "CORRUPT_SOURCE")
        );
    }

    #[tokio::test]
    async fn batch_preserves_order_and_isolates_failures() {
        let req = BatchSplitRequest {
            files: vec![
                BatchFile {
                    file_name: "good.pdf".into(),
                    data: STANDARD.encode(test_pdf(4)),
                },
                BatchFile {
                    file_name: "bad.pdf".into(),
                    data: STANDARD.encode(b"not a pdf"),
                },
                BatchFile {
                    file_name: "also_good.pdf".into(),
                    data: STANDARD.encode(test_pdf(2)),
                },
            ],
            config: SplitConfig::PageCount { pages_per_output: 2 },
        };

        let Json(response) = handle_split_batch(State(test_state()), Json(req))
            .await
            .unwrap();

        assert!(!response.success);
        assert_eq!(response.count, 3);

        assert_eq!(response.results[0].file_name, "good.pdf");
        assert!(response.results[0].success);
        assert_eq!(response.results[0].outputs.len(), 2);
        assert_eq!(response.results[0].outputs[0].name, "good_1.pdf");

        assert_eq!(response.results[1].file_name, "bad.pdf");
        assert!(!response.results[1].success);
        assert!(response.results[1].error.is_some());
        assert!(response.results[1].outputs.is_empty());

        assert!(response.results[2].success);
        assert_eq!(response.results[2].outputs.len(), 1);
    }

    #[tokio::test]
    async fn batch_of_all_good_files_succeeds() {
        let req = BatchSplitRequest {
            files: (1..=3)
                .map(|i| BatchFile {
                    file_name: format!("file{}.pdf", i),
                    data: STANDARD.encode(test_pdf(2)),
                })
                .collect(),
            config: SplitConfig::DocumentCount { output_count: 2 },
        };

        let Json(response) = handle_split_batch(State(test_state()), Json(req))
            .await
            .unwrap();

        assert!(response.success);
        assert!(response.results.iter().all(|r| r.outputs.len() == 2));
    }
}

mod property_tests {
    use super::*;
    use pdfsplit_core::{output_stem, SplitError};
    use proptest::prelude::*;

    fn any_split_error() -> impl Strategy<Value = SplitError> {
        prop_oneof![
            "[a-z ]{1,20}".prop_map(SplitError::MalformedExpression),
            (1u32..1000, 1u32..100).prop_map(|(page, page_count)| SplitError::OutOfRange {
                page,
                page_count
            }),
            "[a-z ]{1,20}".prop_map(SplitError::InvalidSplitValue),
            "[a-z ]{1,20}".prop_map(SplitError::CorruptSource),
            "[a-z ]{1,20}".prop_map(SplitError::SerializationFailed),
        ]
    }

    fn any_config() -> impl Strategy<Value = SplitConfig> {
        prop_oneof![
            "[0-9,\\- ]{0,15}".prop_map(|expression| SplitConfig::Pages { expression }),
            (1u32..500).prop_map(|pages_per_output| SplitConfig::PageCount { pages_per_output }),
            (1u32..500).prop_map(|output_count| SplitConfig::DocumentCount { output_count }),
            (1u64..u64::MAX).prop_map(|max_bytes| SplitConfig::MaxSize { max_bytes }),
        ]
    }

    proptest! {
        /// Every configuration survives the JSON transport round trip
        #[test]
        fn config_roundtrips_through_json(config in any_config()) {
            let json = serde_json::to_string(&config).unwrap();
            let back: SplitConfig = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(config, back);
        }

        /// Validation failures map to client errors; only serialization
        /// failures are the server's fault
        #[test]
        fn error_statuses_are_stable(error in any_split_error()) {
            let server_error = ServerError::Split(error);
            let (status, code) = server_error.status_and_code();

            if code == "SERIALIZATION_FAILED" {
                prop_assert!(status.is_server_error());
            } else {
                prop_assert!(status.is_client_error());
            }
        }

        /// Output stems are never empty and never keep a ".pdf" suffix
        #[test]
        fn output_stems_are_usable(name in "[a-zA-Z0-9_]{0,12}(\\.pdf)?") {
            let stem = output_stem(&name);
            prop_assert!(!stem.is_empty());
            prop_assert!(!stem.to_lowercase().ends_with(".pdf"));
        }

        /// Positive numeric configs pass validation
        #[test]
        fn positive_configs_validate(config in any_config()) {
            // Pages-mode validation happens at resolve time, not here
            prop_assert!(config.validate().is_ok());
        }
    }
}
