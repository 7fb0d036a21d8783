#![allow(clippy::unwrap_used, clippy::panic)]

use css_core::{CornerRadii, Edges, FloatBox, FloatSide, ReferenceRect};
use css_shapes::ReferenceBox;

fn sample_float() -> FloatBox {
    FloatBox {
        position_x: 0.0,
        position_y: 0.0,
        margin: Edges::uniform(10.0),
        border: Edges::uniform(2.0),
        padding: Edges::uniform(5.0),
        width: 50.0,
        height: 40.0,
        border_radii: CornerRadii::default(),
        side: FloatSide::Left,
    }
}

fn assert_rect(rect: ReferenceRect, expected: (f32, f32, f32, f32)) {
    assert!((rect.x - expected.0).abs() < 0.001, "x: {rect:?}");
    assert!((rect.y - expected.1).abs() < 0.001, "y: {rect:?}");
    assert!((rect.width - expected.2).abs() < 0.001, "width: {rect:?}");
    assert!((rect.height - expected.3).abs() < 0.001, "height: {rect:?}");
}

#[test]
fn margin_box_spans_the_full_footprint() {
    let float_box = sample_float();
    assert_rect(
        float_box.reference_rect(ReferenceBox::MarginBox),
        (0.0, 0.0, 84.0, 74.0),
    );
    assert!((float_box.margin_width() - 84.0).abs() < 0.001);
    assert!((float_box.margin_height() - 74.0).abs() < 0.001);
}

#[test]
fn border_box_excludes_margins() {
    assert_rect(
        sample_float().reference_rect(ReferenceBox::BorderBox),
        (10.0, 10.0, 64.0, 54.0),
    );
}

#[test]
fn padding_box_excludes_borders() {
    assert_rect(
        sample_float().reference_rect(ReferenceBox::PaddingBox),
        (12.0, 12.0, 60.0, 50.0),
    );
}

#[test]
fn content_box_is_the_innermost_rectangle() {
    assert_rect(
        sample_float().reference_rect(ReferenceBox::ContentBox),
        (17.0, 17.0, 50.0, 40.0),
    );
}

#[test]
fn reference_boxes_nest() {
    let float_box = sample_float();
    let rects = [
        float_box.reference_rect(ReferenceBox::MarginBox),
        float_box.reference_rect(ReferenceBox::BorderBox),
        float_box.reference_rect(ReferenceBox::PaddingBox),
        float_box.reference_rect(ReferenceBox::ContentBox),
    ];
    for pair in rects.windows(2) {
        let (outer, inner) = (pair[0], pair[1]);
        assert!(outer.x <= inner.x);
        assert!(outer.y <= inner.y);
        assert!(outer.right() >= inner.right());
        assert!(outer.bottom() >= inner.bottom());
    }
}

#[test]
fn offset_floats_shift_every_reference_box() {
    let mut float_box = sample_float();
    float_box.position_x = 30.0;
    float_box.position_y = 20.0;
    assert_rect(
        float_box.reference_rect(ReferenceBox::ContentBox),
        (47.0, 37.0, 50.0, 40.0),
    );
}
