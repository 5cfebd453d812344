mod common;

use common::*;
use lopdf::{Dictionary, Document, Object, Stream};
use pdf_quadrant::*;

/// One page whose MediaBox lives on the page tree node and whose content
/// is split across two streams
fn inherited_box_pdf(media_box: [i64; 4]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let first = doc.add_object(Stream::new(Dictionary::new(), b"0 0 1 rg".to_vec()));
    let second = doc.add_object(Stream::new(Dictionary::new(), b"5 5 20 20 re f".to_vec()));

    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "Contents",
            Object::Array(vec![Object::Reference(first), Object::Reference(second)]),
        ),
    ]));

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
        (
            "MediaBox",
            Object::Array(media_box.iter().map(|&v| Object::Integer(v)).collect()),
        ),
        ("Resources", Object::Dictionary(Dictionary::new())),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    to_bytes(doc)
}

#[test]
fn test_parse_reads_declared_page_box() {
    let source = SourceDocument::parse(&pdf_bytes(&[(200.0, 300.0)])).unwrap();
    assert_eq!(source.dimensions(), (200.0, 300.0));
    assert_eq!(source.page_count(), 1);
}

#[test]
fn test_parse_inherited_media_box() {
    let source = SourceDocument::parse(&inherited_box_pdf([0, 0, 288, 432])).unwrap();
    assert_eq!(source.dimensions(), (288.0, 432.0));
}

#[test]
fn test_parse_offset_media_box() {
    let source = SourceDocument::parse(&inherited_box_pdf([50, 100, 250, 400])).unwrap();
    assert_eq!(source.dimensions(), (200.0, 300.0));
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        SourceDocument::parse(b"definitely not a pdf"),
        Err(QuadrantError::DocumentParse(_))
    ));
    assert!(matches!(
        SourceDocument::parse(&[]),
        Err(QuadrantError::DocumentParse(_))
    ));
    assert!(matches!(
        SourceDocument::parse(&pdf_bytes(&[])),
        Err(QuadrantError::EmptyDocument)
    ));
}

#[test]
fn test_extract_embeds_concatenated_content() {
    let mut output = Document::with_version("1.7");
    let page = extract(&mut output, &inherited_box_pdf([50, 100, 250, 400])).unwrap();

    assert_eq!(page.width(), 200.0);
    assert_eq!(page.height(), 300.0);
    assert_eq!(*page.page_box(), Rect::new(50.0, 100.0, 200.0, 300.0));

    let stream = output
        .get_object(page.xobject_id())
        .unwrap()
        .as_stream()
        .unwrap();
    let content = String::from_utf8(stream.content.clone()).unwrap();
    assert!(content.contains("0 0 1 rg"));
    assert!(content.contains("5 5 20 20 re f"));

    let bbox = stream.dict.get(b"BBox").unwrap().as_array().unwrap();
    assert!(matches!(bbox[0], Object::Real(v) if v == 50.0));
    assert!(matches!(bbox[3], Object::Real(v) if v == 400.0));
}

#[test]
fn test_embedding_is_document_scoped() {
    let source = SourceDocument::parse(&pdf_bytes(&[(100.0, 100.0)])).unwrap();

    let mut first = Document::with_version("1.7");
    let mut second = Document::with_version("1.7");
    let a = source.embed(&mut first).unwrap();
    let b = source.embed(&mut second).unwrap();

    // Each output gets its own copy of the page
    assert!(first.get_object(a.xobject_id()).is_ok());
    assert!(second.get_object(b.xobject_id()).is_ok());
}

#[tokio::test]
async fn test_compose_offsets_page_box_origin() {
    let request = CompositionRequest::new(PaperSize::Letter).with_slot(
        Quadrant::BottomLeft,
        SlotAssignment::new(inherited_box_pdf([50, 100, 356, 496]), "offset.pdf"),
    );
    let result = compose(&request).await.unwrap();
    let (_, content) = open_result(&result);
    let content = String::from_utf8(content).unwrap();

    // 306 x 396 source fills the 306 x 396 quadrant at scale 1, shifted by its origin
    assert!(content.contains("q 1 0 0 1 -50 -100 cm /BL Do Q"));
}
