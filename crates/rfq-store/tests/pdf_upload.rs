//! Uploading a real PDF and extracting fields from its decoded text.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pretty_assertions::assert_eq;
use rfq_core::DocumentStatus;
use rfq_store::{Database, FileStore, RfqService};

fn one_page_pdf(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let kids: Vec<Object> = vec![page_id.into()];
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}

#[tokio::test]
async fn extracts_fields_from_uploaded_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::in_memory().await.unwrap();
    let service = RfqService::new(db, FileStore::new(dir.path().join("uploads")));

    let bytes = one_page_pdf("QTY: 1 lead time 10");
    let document = service.upload("rfq.pdf", &bytes).await.unwrap();
    assert!(document.file_path.ends_with("-rfq.pdf"));

    let fields = service.extract(&document.id).await.unwrap();
    assert_eq!(fields.quantity, Some(1));
    assert_eq!(fields.delivery_days, Some(10));
    assert_eq!(fields.nsn, None);
    assert_eq!(fields.description.as_deref(), Some("QTY: 1 lead time 10"));
    assert_eq!(fields.confidence_score, 0.65);

    let detail = service.get(&document.id).await.unwrap();
    assert_eq!(detail.document.status, DocumentStatus::Extracted);
    assert_eq!(detail.extracted_data, Some(fields));
}

#[tokio::test]
async fn same_name_pdf_uploads_keep_separate_files() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::in_memory().await.unwrap();
    let service = RfqService::new(db, FileStore::new(dir.path().join("uploads")));

    let first = service
        .upload("rfq.pdf", &one_page_pdf("QTY: 3 lead time 10"))
        .await
        .unwrap();
    let second = service
        .upload("rfq.pdf", &one_page_pdf("QTY: 7 lead time 10"))
        .await
        .unwrap();
    assert_ne!(first.file_path, second.file_path);

    assert_eq!(service.extract(&first.id).await.unwrap().quantity, Some(3));
    assert_eq!(service.extract(&second.id).await.unwrap().quantity, Some(7));
}
