//! Handlers for styles, style maps and their properties.

use crate::error::Result;
use crate::kml::tags;
use crate::model::{
    Color, ColorMode, Container, GeoNode, GroundOverlay, IconStyle, LabelStyle, LineStyle, LookAt,
    NodeId, Pair, PolyStyle, Style, StyleMap,
};
use crate::registry::{apply_to_parent, read_leaf, skip_element, ParseContext, TagHandler};

/// Handler for `<Style>`.
///
/// Under a document or folder the style is a shared definition; under any
/// other feature it is the feature's inline style; under a `<Pair>` it is
/// the style the pair maps to.
pub struct StyleHandler;

impl TagHandler for StyleHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let Some(parent_id) = parent.node else {
            return Ok(skip_element(ctx, &parent));
        };

        let style = GeoNode::Style(Style {
            id: ctx.attribute_opt("id"),
            ..Style::default()
        });

        if ctx.node_is::<Container>(&parent) {
            let id = ctx.add_node(style);
            if let Some(container) = ctx.node_mut::<Container>(&parent) {
                container.styles.push(id);
            }
            return Ok(Some(id));
        }
        if ctx.node_is::<Pair>(&parent) {
            let id = ctx.add_node(style);
            if let Some(pair) = ctx.node_mut::<Pair>(&parent) {
                pair.style = Some(id);
            }
            return Ok(Some(id));
        }

        let is_feature = ctx
            .document()
            .node(parent_id)
            .is_some_and(|node| node.as_feature().is_some());
        if !is_feature {
            return Ok(skip_element(ctx, &parent));
        }
        let id = ctx.add_node(style);
        if let Some(feature) = ctx
            .document_mut()
            .node_mut(parent_id)
            .and_then(GeoNode::as_feature_mut)
        {
            feature.style = Some(id);
        }
        Ok(Some(id))
    }
}

/// Handler for `<StyleMap>`.
pub struct StyleMapHandler;

impl TagHandler for StyleMapHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<Container>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let id = ctx.add_node(GeoNode::StyleMap(StyleMap {
            id: ctx.attribute_opt("id"),
            ..StyleMap::default()
        }));
        if let Some(container) = ctx.node_mut::<Container>(&parent) {
            container.styles.push(id);
        }
        Ok(Some(id))
    }
}

/// Handler for `<Pair>` of a style map.
pub struct PairHandler;

impl TagHandler for PairHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<StyleMap>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let id = ctx.add_node(GeoNode::Pair(Pair::default()));
        if let Some(style_map) = ctx.node_mut::<StyleMap>(&parent) {
            style_map.pairs.push(id);
        }
        Ok(Some(id))
    }
}

/// Handler for `<key>` of a pair.
pub struct KeyHandler;

impl TagHandler for KeyHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<Pair>, |pair, value| {
            pair.key = value.into_text();
        })
    }
}

/// Attach a sub-style node to the `<Style>` of the parent frame.
fn attach_sub_style(
    ctx: &mut ParseContext<'_>,
    node: GeoNode,
    slot: fn(&mut Style) -> &mut Option<NodeId>,
) -> Option<NodeId> {
    let parent = ctx.parent();
    if !ctx.node_is::<Style>(&parent) {
        return skip_element(ctx, &parent);
    }
    let id = ctx.add_node(node);
    if let Some(style) = ctx.node_mut::<Style>(&parent) {
        *slot(style) = Some(id);
    }
    Some(id)
}

/// Handler for `<IconStyle>`.
pub struct IconStyleHandler;

impl TagHandler for IconStyleHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_sub_style(
            ctx,
            GeoNode::IconStyle(IconStyle::default()),
            |style| &mut style.icon_style,
        ))
    }
}

/// Handler for `<LineStyle>`.
pub struct LineStyleHandler;

impl TagHandler for LineStyleHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_sub_style(
            ctx,
            GeoNode::LineStyle(LineStyle::default()),
            |style| &mut style.line_style,
        ))
    }
}

/// Handler for `<PolyStyle>`.
pub struct PolyStyleHandler;

impl TagHandler for PolyStyleHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_sub_style(
            ctx,
            GeoNode::PolyStyle(PolyStyle::default()),
            |style| &mut style.poly_style,
        ))
    }
}

/// Handler for `<LabelStyle>`.
pub struct LabelStyleHandler;

impl TagHandler for LabelStyleHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_sub_style(
            ctx,
            GeoNode::LabelStyle(LabelStyle::default()),
            |style| &mut style.label_style,
        ))
    }
}

/// Handler for `<color>` of a colour style or a ground overlay.
pub struct ColorHandler;

impl TagHandler for ColorHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let Some(id) = parent.node else {
            return Ok(skip_element(ctx, &parent));
        };
        let fits = ctx.node_is::<GroundOverlay>(&parent)
            || ctx
                .document_mut()
                .node_mut(id)
                .and_then(GeoNode::as_color_style_mut)
                .is_some();
        if !fits {
            return Ok(skip_element(ctx, &parent));
        }

        let value = read_leaf(ctx)?;
        let Some(color) = Color::from_kml(value.text()) else {
            value.warn_invalid("an aabbggrr colour");
            return Ok(None);
        };
        match ctx.document_mut().node_mut(id) {
            Some(GeoNode::GroundOverlay(overlay)) => overlay.color = Some(color),
            Some(node) => {
                if let Some(color_style) = node.as_color_style_mut() {
                    color_style.color = Some(color);
                }
            }
            None => {}
        }
        Ok(None)
    }
}

/// Handler for `<colorMode>`; unknown values mean `normal`.
pub struct ColorModeHandler;

impl TagHandler for ColorModeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::as_color_style_mut, |color_style, value| {
            color_style.color_mode = ColorMode::from_kml(value.text()).unwrap_or_else(|| {
                value.warn_invalid("a colour mode");
                ColorMode::Normal
            });
        })
    }
}

/// Handler for `<width>` of a line style.
pub struct WidthHandler;

impl TagHandler for WidthHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<LineStyle>, |style, value| {
            if let Some(width) = value.f64() {
                style.width = width;
            }
        })
    }
}

/// Handler for `<scale>` of an icon or label style.
pub struct ScaleHandler;

impl TagHandler for ScaleHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if ctx.node_is::<IconStyle>(&parent) {
            return apply_to_parent(ctx, GeoNode::get_mut::<IconStyle>, |style, value| {
                if let Some(scale) = value.f64() {
                    style.scale = scale;
                }
            });
        }
        apply_to_parent(ctx, GeoNode::get_mut::<LabelStyle>, |style, value| {
            if let Some(scale) = value.f64() {
                style.scale = scale;
            }
        })
    }
}

/// Handler for `<heading>`.
///
/// Icon headings outside 0 to 360 degrees are ignored, camera headings are
/// taken as they are.
pub struct HeadingHandler;

impl TagHandler for HeadingHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if ctx.node_is::<LookAt>(&parent) {
            return apply_to_parent(ctx, GeoNode::get_mut::<LookAt>, |look_at, value| {
                if let Some(heading) = value.f64() {
                    look_at.heading = heading;
                }
            });
        }
        apply_to_parent(ctx, GeoNode::get_mut::<IconStyle>, |style, value| {
            match value.f64() {
                Some(heading) if (0.0..=360.0).contains(&heading) => style.heading = heading,
                Some(_) => value.warn_invalid("a heading between 0 and 360"),
                None => {}
            }
        })
    }
}

/// Handler for `<fill>` of a polygon style.
pub struct FillHandler;

impl TagHandler for FillHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<PolyStyle>, |style, value| {
            if let Some(fill) = value.bool() {
                style.fill = fill;
            }
        })
    }
}

/// Handler for `<outline>` of a polygon style.
pub struct OutlineHandler;

impl TagHandler for OutlineHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<PolyStyle>, |style, value| {
            if let Some(outline) = value.bool() {
                style.outline = outline;
            }
        })
    }
}

/// Handler for `<Icon>`: passes an icon style or ground overlay through.
pub struct IconHandler;

impl TagHandler for IconHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if ctx.node_is::<IconStyle>(&parent) || ctx.node_is::<GroundOverlay>(&parent) {
            return Ok(parent.node);
        }
        Ok(skip_element(ctx, &parent))
    }
}

/// Handler for `<href>` of an `<Icon>`.
pub struct HrefHandler;

impl TagHandler for HrefHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !parent.represents(tags::ICON) {
            return Ok(skip_element(ctx, &parent));
        }
        if ctx.node_is::<IconStyle>(&parent) {
            return apply_to_parent(ctx, GeoNode::get_mut::<IconStyle>, |style, value| {
                style.icon_href = value.non_empty();
            });
        }
        apply_to_parent(ctx, GeoNode::get_mut::<GroundOverlay>, |overlay, value| {
            overlay.icon_href = value.non_empty();
        })
    }
}
