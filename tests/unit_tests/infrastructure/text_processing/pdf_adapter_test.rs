use lopdf::content::{Content, Operation};
use lopdf::{Document as PdfDocument, Object, Stream, dictionary};

use nyaya::application::ports::{FileLoader, FileLoaderError};
use nyaya::domain::{ContentType, Document};
use nyaya::infrastructure::text_processing::PdfAdapter;

/// One page per entry; an empty entry produces a page with no text.
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = PdfDocument::with_version("1.5");
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
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
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
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
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

fn document_for(filename: &str, data: &[u8]) -> Document {
    Document::new(filename.to_string(), ContentType::Pdf, data)
}

#[tokio::test]
async fn given_valid_pdf_when_extracting_then_returns_text_per_page() {
    let data = build_pdf(&["Section 302 Punishment for murder", "Section 378 Theft"]);
    let document = document_for("ipc.pdf", &data);

    let pages = PdfAdapter::new().extract_pages(&data, &document).await.unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].number, 1);
    assert!(pages[0].text.contains("murder"));
    assert_eq!(pages[1].number, 2);
    assert!(pages[1].text.contains("Theft"));
}

#[tokio::test]
async fn given_pdf_with_blank_page_when_extracting_then_blank_page_is_skipped() {
    let data = build_pdf(&["Preamble", "", "Chapter II"]);
    let document = document_for("ipc.pdf", &data);

    let pages = PdfAdapter::new().extract_pages(&data, &document).await.unwrap();

    let numbers: Vec<u32> = pages.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 3]);
}

#[tokio::test]
async fn given_pdf_without_text_when_extracting_then_returns_no_text_found() {
    let data = build_pdf(&[""]);
    let document = document_for("scan.pdf", &data);

    let result = PdfAdapter::new().extract_pages(&data, &document).await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(name)) if name == "scan.pdf"));
}

#[tokio::test]
async fn given_corrupt_pdf_bytes_when_extracting_then_returns_extraction_failed() {
    let data = b"%PDF-1.4\nthis is not really a pdf".to_vec();
    let document = document_for("corrupt.pdf", &data);

    let result = PdfAdapter::new().extract_pages(&data, &document).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_non_pdf_bytes_when_extracting_then_returns_unsupported_content_type() {
    let data = b"plain text pretending to be a pdf".to_vec();
    let document = document_for("notes.pdf", &data);

    let result = PdfAdapter::new().extract_pages(&data, &document).await;

    assert!(matches!(result, Err(FileLoaderError::UnsupportedContentType(_))));
}
