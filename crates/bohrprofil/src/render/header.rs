//! Title block: company, address, project fields and the drawing title.

use bohrprofil_core::{
    color::Color,
    draw::{
        Drawable, LayeredOutput, LinePrimitive, Primitive, RectPrimitive, RenderLayer,
        StrokeDefinition, Text, TextAnchor, TextDefinition, TextPrimitive,
    },
    geometry::{Point, Size},
};
use log::debug;

use super::RenderContext;
use crate::model::RenderMetadata;

/// Smallest top margin that leaves room for the title block and the title.
const MIN_HEADER_MARGIN: f32 = 170.0;

const FRAME_INSET: f32 = 10.0;
const FRAME_HEIGHT: f32 = 120.0;
const TITLE_Y: f32 = 160.0;
const COMPANY_COLOR: &str = "#8b0000";
/// Offset of a field value from the table's vertical rule.
const VALUE_OFFSET: f32 = 80.0;

fn text(position: Point, content: &str, definition: TextDefinition, class: &str) -> Primitive {
    Primitive::Text(
        TextPrimitive::new(position, vec![content.to_string()], definition).with_class(class),
    )
}

pub(super) fn render_header(ctx: &RenderContext<'_>, metadata: &RenderMetadata) -> LayeredOutput {
    let mut output = LayeredOutput::new();
    let header = ctx.config().header();
    let top_margin = ctx.layout().scale().top_margin();
    if !header.enabled() {
        debug!("Title block disabled");
        return output;
    }
    if top_margin < MIN_HEADER_MARGIN {
        debug!(top_margin, required = MIN_HEADER_MARGIN; "Top margin too small for title block");
        return output;
    }

    let width = ctx.layout().canvas_width();
    let frame_bottom = FRAME_INSET + FRAME_HEIGHT;

    let frame = RectPrimitive::at(
        Point::new(FRAME_INSET, FRAME_INSET),
        Size::new(width - 2.0 * FRAME_INSET, FRAME_HEIGHT),
    )
    .with_stroke(StrokeDefinition::solid(Color::default(), 2.0))
    .with_class("header-frame");
    output.add_to_layer(RenderLayer::Frame, Primitive::Rect(frame));

    let company = metadata.get("company");
    if !company.is_empty() {
        let definition = TextDefinition::new(24)
            .with_bold(true)
            .with_color(Color::new(COMPANY_COLOR).unwrap_or_default());
        output.add_to_layer(
            RenderLayer::Text,
            text(Point::new(30.0, 50.0), company, definition, "header-company"),
        );
    }
    let address_definition = TextDefinition::new(12);
    output.merge(
        Text::new(&address_definition, metadata.get("address"))
            .render_to_layers(Point::new(30.0, 80.0)),
    );

    // Field table on the right half
    let table_x = width / 2.0;
    let rule = LinePrimitive::new(
        Point::new(table_x, FRAME_INSET),
        Point::new(table_x, frame_bottom),
    )
    .with_class("header-rule");
    output.add_to_layer(RenderLayer::Frame, Primitive::Line(rule));

    let fields = header.fields();
    if !fields.is_empty() {
        let row_height = FRAME_HEIGHT / fields.len() as f32;
        let thin = StrokeDefinition::solid(Color::default(), 0.5);
        let caption_definition = TextDefinition::new(10).with_bold(true);
        let value_definition = TextDefinition::new(12);

        for (idx, field) in fields.iter().enumerate() {
            let row_top = FRAME_INSET + idx as f32 * row_height;
            if idx > 0 {
                let line = LinePrimitive::new(
                    Point::new(table_x, row_top),
                    Point::new(width - FRAME_INSET, row_top),
                )
                .with_stroke(thin.clone())
                .with_class("header-rule");
                output.add_to_layer(RenderLayer::Frame, Primitive::Line(line));
            }

            let baseline = row_top + row_height * 2.0 / 3.0;
            output.add_to_layer(
                RenderLayer::Text,
                text(
                    Point::new(table_x + 5.0, baseline),
                    &format!("{}:", field.caption()),
                    caption_definition.clone(),
                    "header-caption",
                ),
            );
            output.add_to_layer(
                RenderLayer::Text,
                text(
                    Point::new(table_x + VALUE_OFFSET, baseline),
                    metadata.get(field.key()),
                    value_definition.clone(),
                    "header-value",
                ),
            );
        }
    }

    let title_definition = TextDefinition::new(18)
        .with_bold(true)
        .with_anchor(TextAnchor::Middle);
    output.add_to_layer(
        RenderLayer::Text,
        text(
            Point::new(width / 2.0, TITLE_Y),
            header.title(),
            title_definition,
            "title",
        ),
    );

    output
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        classify::Classifier,
        config::{AppConfig, LayoutConfig},
        model::ProfileInput,
    };

    fn render_with(config: &AppConfig, metadata: RenderMetadata) -> LayeredOutput {
        let input = ProfileInput::new().with_metadata(metadata);
        let classifier = Classifier::default();
        let ctx = RenderContext::new(&input, config, &classifier);
        render_header(&ctx, input.metadata())
    }

    fn text_with_class(output: &LayeredOutput, class: &str) -> Vec<TextPrimitive> {
        output
            .iter()
            .filter_map(|(_, primitive)| match primitive {
                Primitive::Text(text) if primitive.has_class(class) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_frame_and_title() {
        let output = render_with(&AppConfig::default(), RenderMetadata::new());
        let frame = output
            .iter()
            .find_map(|(_, primitive)| match primitive {
                Primitive::Rect(rect) if primitive.has_class("header-frame") => Some(rect.bounds()),
                _ => None,
            })
            .unwrap();
        assert_approx_eq!(f32, frame.min_x(), 10.0);
        assert_approx_eq!(f32, frame.min_y(), 10.0);
        assert_approx_eq!(f32, frame.width(), 580.0);
        assert_approx_eq!(f32, frame.height(), 120.0);

        let title = text_with_class(&output, "title");
        assert_eq!(title[0].content(), "Bohrprofil");
        assert_approx_eq!(f32, title[0].position().x(), 300.0);
        assert_approx_eq!(f32, title[0].position().y(), 160.0);
    }

    #[test]
    fn test_fields_read_metadata() {
        let metadata: RenderMetadata = [
            ("company", "Brunnenbau Muster GmbH"),
            ("project", "Brunnen 3"),
            ("date", "17.05.2024"),
        ]
        .into_iter()
        .collect();
        let output = render_with(&AppConfig::default(), metadata);

        let captions: Vec<String> = text_with_class(&output, "header-caption")
            .iter()
            .map(TextPrimitive::content)
            .collect();
        assert_eq!(
            captions,
            vec!["Projekt:", "Durchführung:", "Brunnentyp:", "Datum:"]
        );

        let values: Vec<String> = text_with_class(&output, "header-value")
            .iter()
            .map(TextPrimitive::content)
            .collect();
        assert_eq!(values, vec!["Brunnen 3", "", "", "17.05.2024"]);

        let company = text_with_class(&output, "header-company");
        assert_eq!(company[0].content(), "Brunnenbau Muster GmbH");
    }

    #[test]
    fn test_rows_split_frame_height() {
        let output = render_with(&AppConfig::default(), RenderMetadata::new());
        let values = text_with_class(&output, "header-value");
        // 4 rows of 30px, baseline at two thirds of the row
        assert_approx_eq!(f32, values[0].position().y(), 30.0);
        assert_approx_eq!(f32, values[3].position().y(), 120.0);
        assert_approx_eq!(f32, values[0].position().x(), 380.0);
    }

    #[test]
    fn test_skipped_when_margin_too_small() {
        let config = AppConfig::new(
            LayoutConfig::default().with_top_margin(40.0),
            Default::default(),
        );
        let output = render_with(&config, RenderMetadata::new());
        assert!(output.is_empty());
    }

    #[test]
    fn test_skipped_when_disabled() {
        let config: AppConfig = toml::from_str("[header]\nenabled = false\n").unwrap();
        let output = render_with(&config, RenderMetadata::new());
        assert!(output.is_empty());
    }

    #[test]
    fn test_custom_fields_and_title() {
        let config: AppConfig = toml::from_str(
            r#"
            [header]
            title = "Ausbauplan"
            fields = [{ key = "client", caption = "Auftraggeber" }]
            "#,
        )
        .unwrap();
        let metadata: RenderMetadata = [("client", "Gemeinde")].into_iter().collect();
        let output = render_with(&config, metadata);

        assert_eq!(text_with_class(&output, "title")[0].content(), "Ausbauplan");
        let values = text_with_class(&output, "header-value");
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].content(), "Gemeinde");
        assert_approx_eq!(f32, values[0].position().y(), 90.0);
    }
}
