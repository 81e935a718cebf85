use std::time::Duration;

use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, dictionary};

use mediscan::application::ports::{FileLoader, FileLoaderError};
use mediscan::domain::{ContentType, Document};
use mediscan::infrastructure::text_processing::PdfAdapter;

/// Builds a PDF with one page per entry, each showing the given line.
fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for line in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn document(size_bytes: usize) -> Document {
    Document::new("report.pdf".to_string(), ContentType::Pdf, size_bytes as u64)
}

#[tokio::test]
async fn given_multi_page_pdf_when_extracting_then_returns_pages_in_order() {
    let data = pdf_with_pages(&["Hemoglobin 13.5", "Platelets 250"]);
    let adapter = PdfAdapter::new();

    let text = adapter.extract_text(&data, &document(data.len())).await.unwrap();

    let first = text.find("Hemoglobin").expect("first page text");
    let second = text.find("Platelets").expect("second page text");
    assert!(first < second);
}

#[tokio::test]
async fn given_garbage_bytes_when_extracting_then_fails_extraction() {
    let data = b"definitely not a pdf".to_vec();
    let adapter = PdfAdapter::new();

    let result = adapter.extract_text(&data, &document(data.len())).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_file_over_limit_when_extracting_then_rejects_before_parsing() {
    let data = pdf_with_pages(&["Cholesterol 180"]);
    let adapter = PdfAdapter::new().with_max_file_size_bytes(16);

    let result = adapter.extract_text(&data, &document(data.len())).await;

    match result {
        Err(FileLoaderError::TooLarge {
            size_bytes,
            limit_bytes,
        }) => {
            assert_eq!(size_bytes, data.len() as u64);
            assert_eq!(limit_bytes, 16);
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[tokio::test]
async fn given_normalization_enabled_when_extracting_then_collapses_whitespace() {
    let data = pdf_with_pages(&["Blood    pressure    120/80"]);
    let adapter = PdfAdapter::new()
        .with_normalized_text(true)
        .with_timeout(Duration::from_secs(10));

    let text = adapter.extract_text(&data, &document(data.len())).await.unwrap();

    assert!(text.contains("Blood pressure 120/80"));
}
