#![allow(clippy::unwrap_used, clippy::panic)]

use css_shapes::{
    BasicShape, FillRule, ReferenceBox, ShapeOutside, ShapeParseError, ShapeRadius,
    SpecifiedShapeOutside, parse_shape_image_threshold_value, parse_shape_margin_value,
    parse_shape_outside_value, shape_margin_or_zero, shape_outside_or_none,
};
use css_values_units::LengthPercentage;

fn parse_value(css: &str) -> ShapeOutside {
    match parse_shape_outside_value(css).unwrap() {
        SpecifiedShapeOutside::Value(value) => value,
        SpecifiedShapeOutside::Inherit => panic!("unexpected inherit for '{css}'"),
    }
}

#[test]
fn parses_none_and_box_keywords() {
    assert_eq!(parse_value("none"), ShapeOutside::None);
    assert_eq!(
        parse_value("margin-box"),
        ShapeOutside::Box(ReferenceBox::MarginBox)
    );
    assert_eq!(
        parse_value("border-box"),
        ShapeOutside::Box(ReferenceBox::BorderBox)
    );
    assert_eq!(
        parse_value("padding-box"),
        ShapeOutside::Box(ReferenceBox::PaddingBox)
    );
    assert_eq!(
        parse_value("content-box"),
        ShapeOutside::Box(ReferenceBox::ContentBox)
    );
}

#[test]
fn parses_explicit_inherit() {
    assert_eq!(
        parse_shape_outside_value("inherit").unwrap(),
        SpecifiedShapeOutside::Inherit
    );
    let parent = ShapeOutside::Box(ReferenceBox::BorderBox);
    assert_eq!(
        SpecifiedShapeOutside::Inherit.cascade(&parent),
        ShapeOutside::Box(ReferenceBox::BorderBox)
    );
}

#[test]
fn rejects_unknown_keywords() {
    assert_eq!(
        parse_shape_outside_value("blorb"),
        Err(ShapeParseError::UnexpectedToken)
    );
    assert_eq!(
        parse_shape_outside_value("margin-box extra"),
        Err(ShapeParseError::UnexpectedToken)
    );
}

#[test]
fn circle_defaults_to_closest_side_at_center() {
    let value = parse_value("circle()");
    let ShapeOutside::Shape {
        shape: BasicShape::Circle { radius, position },
        reference_box,
    } = value
    else {
        panic!("expected a circle, got {value:?}");
    };
    assert_eq!(radius, ShapeRadius::ClosestSide);
    assert_eq!(position.x, LengthPercentage::percent(50.0));
    assert_eq!(position.y, LengthPercentage::percent(50.0));
    assert_eq!(reference_box, ReferenceBox::MarginBox);
}

#[test]
fn circle_accepts_radius_and_position() {
    let value = parse_value("circle(50px at 25% 75%)");
    let ShapeOutside::Shape {
        shape: BasicShape::Circle { radius, position },
        ..
    } = value
    else {
        panic!("expected a circle");
    };
    assert_eq!(radius, ShapeRadius::Length(LengthPercentage::px(50.0)));
    assert_eq!(position.x, LengthPercentage::percent(25.0));
    assert_eq!(position.y, LengthPercentage::percent(75.0));
}

#[test]
fn circle_accepts_percentage_radius_and_keywords() {
    let value = parse_value("circle(50%)");
    let ShapeOutside::Shape {
        shape: BasicShape::Circle { radius, .. },
        ..
    } = value
    else {
        panic!("expected a circle");
    };
    assert_eq!(radius, ShapeRadius::Length(LengthPercentage::percent(50.0)));

    let value = parse_value("circle(farthest-side)");
    let ShapeOutside::Shape {
        shape: BasicShape::Circle { radius, .. },
        ..
    } = value
    else {
        panic!("expected a circle");
    };
    assert_eq!(radius, ShapeRadius::FarthestSide);
}

#[test]
fn circle_rejects_negative_radius() {
    assert_eq!(
        parse_shape_outside_value("circle(-10px)"),
        Err(ShapeParseError::UnexpectedToken)
    );
}

#[test]
fn position_keywords_canonicalize_to_percentages() {
    let cases = [
        ("circle(at left top)", 0.0, 0.0),
        ("circle(at top left)", 0.0, 0.0),
        ("circle(at bottom left)", 0.0, 100.0),
        ("circle(at right)", 100.0, 50.0),
        ("circle(at top)", 50.0, 0.0),
        ("circle(at center)", 50.0, 50.0),
        ("circle(at center bottom)", 50.0, 100.0),
        ("circle(at 40% top)", 40.0, 0.0),
    ];
    for (css, expected_x, expected_y) in cases {
        let value = parse_value(css);
        let ShapeOutside::Shape {
            shape: BasicShape::Circle { position, .. },
            ..
        } = value
        else {
            panic!("expected a circle for '{css}'");
        };
        assert_eq!(position.x, LengthPercentage::percent(expected_x), "{css}");
        assert_eq!(position.y, LengthPercentage::percent(expected_y), "{css}");
    }
}

#[test]
fn position_rejects_misordered_components() {
    // A vertical keyword cannot fill the horizontal slot of the positional
    // form.
    assert_eq!(
        parse_shape_outside_value("circle(at top 40%)"),
        Err(ShapeParseError::UnexpectedToken)
    );
    // Two keywords for the same axis.
    assert_eq!(
        parse_shape_outside_value("circle(at left right)"),
        Err(ShapeParseError::UnexpectedToken)
    );
}

#[test]
fn ellipse_defaults_and_radius_pairs() {
    let value = parse_value("ellipse()");
    let ShapeOutside::Shape {
        shape:
            BasicShape::Ellipse {
                radius_x, radius_y, ..
            },
        ..
    } = value
    else {
        panic!("expected an ellipse");
    };
    assert_eq!(radius_x, ShapeRadius::ClosestSide);
    assert_eq!(radius_y, ShapeRadius::ClosestSide);

    let value = parse_value("ellipse(20px 10% at center)");
    let ShapeOutside::Shape {
        shape:
            BasicShape::Ellipse {
                radius_x, radius_y, ..
            },
        ..
    } = value
    else {
        panic!("expected an ellipse");
    };
    assert_eq!(radius_x, ShapeRadius::Length(LengthPercentage::px(20.0)));
    assert_eq!(radius_y, ShapeRadius::Length(LengthPercentage::percent(10.0)));
}

#[test]
fn ellipse_rejects_a_single_radius() {
    assert_eq!(
        parse_shape_outside_value("ellipse(20px at center)"),
        Err(ShapeParseError::UnexpectedToken)
    );
}

#[test]
fn polygon_requires_three_points() {
    assert_eq!(
        parse_shape_outside_value("polygon(10px 10px, 20px 20px)"),
        Err(ShapeParseError::PolygonTooFewPoints)
    );
    let value = parse_value("polygon(50% 0%, 0% 100%, 100% 100%)");
    let ShapeOutside::Shape {
        shape: BasicShape::Polygon { fill_rule, points },
        ..
    } = value
    else {
        panic!("expected a polygon");
    };
    assert_eq!(fill_rule, FillRule::NonZero);
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].x, LengthPercentage::percent(50.0));
    assert_eq!(points[0].y, LengthPercentage::percent(0.0));
}

#[test]
fn polygon_accepts_a_fill_rule() {
    let value = parse_value("polygon(evenodd, 0px 0px, 10px 0px, 10px 10px)");
    let ShapeOutside::Shape {
        shape: BasicShape::Polygon { fill_rule, .. },
        ..
    } = value
    else {
        panic!("expected a polygon");
    };
    assert_eq!(fill_rule, FillRule::EvenOdd);
}

fn parse_inset(css: &str) -> css_shapes::InsetRect {
    let value = parse_value(css);
    let ShapeOutside::Shape {
        shape: BasicShape::Inset(inset),
        ..
    } = value
    else {
        panic!("expected inset for '{css}'");
    };
    inset
}

#[test]
fn inset_offsets_expand_like_the_margin_shorthand() {
    let inset = parse_inset("inset(10px)");
    assert_eq!(inset.top, LengthPercentage::px(10.0));
    assert_eq!(inset.right, LengthPercentage::px(10.0));
    assert_eq!(inset.bottom, LengthPercentage::px(10.0));
    assert_eq!(inset.left, LengthPercentage::px(10.0));

    let inset = parse_inset("inset(10px 20px)");
    assert_eq!(inset.top, LengthPercentage::px(10.0));
    assert_eq!(inset.right, LengthPercentage::px(20.0));
    assert_eq!(inset.bottom, LengthPercentage::px(10.0));
    assert_eq!(inset.left, LengthPercentage::px(20.0));

    let inset = parse_inset("inset(10px 20px 30px)");
    assert_eq!(inset.top, LengthPercentage::px(10.0));
    assert_eq!(inset.right, LengthPercentage::px(20.0));
    assert_eq!(inset.bottom, LengthPercentage::px(30.0));
    assert_eq!(inset.left, LengthPercentage::px(20.0));

    let inset = parse_inset("inset(10px 20px 30px 40px)");
    assert_eq!(inset.top, LengthPercentage::px(10.0));
    assert_eq!(inset.right, LengthPercentage::px(20.0));
    assert_eq!(inset.bottom, LengthPercentage::px(30.0));
    assert_eq!(inset.left, LengthPercentage::px(40.0));
}

#[test]
fn inset_rejects_five_offsets() {
    assert_eq!(
        parse_shape_outside_value("inset(10px 20px 30px 40px 50px)"),
        Err(ShapeParseError::InsetTooManyOffsets)
    );
}

#[test]
fn inset_round_expands_corner_radii() {
    let inset = parse_inset("inset(10px round 5px)");
    let radii = inset.border_radius.unwrap();
    assert!(radii.iter().all(|radius| *radius == LengthPercentage::px(5.0)));

    let inset = parse_inset("inset(0px round 1px 2px 3px 4px)");
    let radii = inset.border_radius.unwrap();
    assert_eq!(radii[0], LengthPercentage::px(1.0));
    assert_eq!(radii[1], LengthPercentage::px(2.0));
    assert_eq!(radii[2], LengthPercentage::px(3.0));
    assert_eq!(radii[3], LengthPercentage::px(4.0));
}

#[test]
fn reference_box_combines_with_shapes_in_either_order() {
    let value = parse_value("circle(10px) content-box");
    let ShapeOutside::Shape { reference_box, .. } = value else {
        panic!("expected a shape");
    };
    assert_eq!(reference_box, ReferenceBox::ContentBox);

    let value = parse_value("border-box circle(10px)");
    let ShapeOutside::Shape { reference_box, .. } = value else {
        panic!("expected a shape");
    };
    assert_eq!(reference_box, ReferenceBox::BorderBox);
}

#[test]
fn image_values_keep_their_url() {
    let value = parse_value("url(shape.png)");
    assert_eq!(
        value,
        ShapeOutside::Image {
            url: "shape.png".to_owned(),
            reference_box: ReferenceBox::MarginBox,
        }
    );
    let value = parse_value("url(\"textures/mask.png\")");
    let ShapeOutside::Image { url, .. } = value else {
        panic!("expected an image");
    };
    assert_eq!(url, "textures/mask.png");
}

#[test]
fn shape_margin_accepts_only_non_negative_values() {
    assert_eq!(
        parse_shape_margin_value("10px").unwrap(),
        LengthPercentage::px(10.0)
    );
    assert_eq!(
        parse_shape_margin_value("10%").unwrap(),
        LengthPercentage::percent(10.0)
    );
    assert_eq!(
        parse_shape_margin_value("-10px"),
        Err(ShapeParseError::NegativeShapeMargin)
    );
    assert_eq!(
        parse_shape_margin_value("red"),
        Err(ShapeParseError::UnexpectedToken)
    );
}

#[test]
fn shape_image_threshold_clamps_to_unit_range() {
    assert_eq!(parse_shape_image_threshold_value("0.5").unwrap(), 0.5);
    assert_eq!(parse_shape_image_threshold_value("1.5").unwrap(), 1.0);
    assert_eq!(parse_shape_image_threshold_value("-0.5").unwrap(), 0.0);
    assert_eq!(
        parse_shape_image_threshold_value("high"),
        Err(ShapeParseError::UnexpectedToken)
    );
}

#[test]
fn invalid_declarations_fall_back_with_defaults() {
    assert_eq!(
        shape_outside_or_none("polygon(1px 1px)"),
        SpecifiedShapeOutside::Value(ShapeOutside::None)
    );
    assert_eq!(shape_margin_or_zero("-4px"), LengthPercentage::px(0.0));
}
