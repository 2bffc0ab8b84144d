//! PDF text decoding against documents built in memory.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use rfq_core::{decode_text, extract, AutoDecoder, TextDecoder};

fn build_pdf(pages: usize) -> Vec<u8> {
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

    let mut kids: Vec<Object> = Vec::new();
    for page in 0..pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("QTY: {} lead time 10", page + 1))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
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

#[test]
fn decodes_generated_pdf_text() {
    let data = build_pdf(1);
    assert!(rfq_core::pdf::is_pdf(&data));

    let text = decode_text(&data).unwrap();
    assert!(text.contains("QTY: 1 lead time 10"));

    let fields = extract(&text);
    assert_eq!(fields.quantity, Some(1));
    assert_eq!(fields.delivery_days, Some(10));
    assert_eq!(fields.nsn, None);
    assert_eq!(fields.description.as_deref(), Some("QTY: 1 lead time 10"));
    assert_eq!(fields.confidence_score, 0.65);
}

#[test]
fn auto_decoder_routes_pdf_bytes_to_pdf_decoder() {
    let data = build_pdf(2);
    let text = AutoDecoder.decode(&data).unwrap();
    assert!(text.contains("QTY: 1 lead time 10"));
    assert!(text.contains("QTY: 2 lead time 10"));

    // First quantity in reading order wins
    assert_eq!(extract(&text).quantity, Some(1));
}
