//! Output page rendering for quadrant composition

use crate::constants::{BACKGROUND_RGB, OUTPUT_PDF_VERSION};
use crate::layout::{Placement, Rect};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Operator sequence painting an opaque white rectangle over `region`.
pub fn background_fill_command(region: &Rect) -> String {
    let (r, g, b) = BACKGROUND_RGB;
    format!(
        "q {} {} {} rg {} {} {} {} re f Q\n",
        r, g, b, region.x, region.y, region.width, region.height
    )
}

/// Operator sequence drawing a Form XObject at a placement.
///
/// `page_box` is the source page's MediaBox; its origin is shifted so the
/// box's lower-left corner lands on the placement's draw position.
pub fn placement_command(xobject_name: &str, placement: &Placement, page_box: &Rect) -> String {
    let scale = placement.scale;
    let tx = placement.draw_x - page_box.x * scale;
    let ty = placement.draw_y - page_box.y * scale;
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        scale, scale, tx, ty, xobject_name
    )
}

/// Create an empty single-sheet document and reserve its page tree ID.
pub fn new_output_document() -> (Document, ObjectId) {
    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    (output, pages_tree_id)
}

/// Add the composed page, its page tree and the catalog to `output`.
///
/// # Arguments
/// * `output` - The output document
/// * `pages_tree_id` - ID reserved by `new_output_document`
/// * `width_pt` - Page width in points
/// * `height_pt` - Page height in points
/// * `content` - The page content stream
/// * `xobjects` - XObject resources referenced by the content
pub fn finish_single_page(
    output: &mut Document,
    pages_tree_id: ObjectId,
    width_pt: f32,
    height_pt: f32,
    content: String,
    xobjects: Dictionary,
) -> ObjectId {
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let page_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_tree_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width_pt),
                Object::Real(height_pt),
            ]),
        ),
        ("Contents", Object::Reference(content_id)),
        ("Resources", Object::Dictionary(resources)),
    ]));

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    page_id
}
