//! In-memory document model built by the tag handlers.
//!
//! A [`GeoDocument`] owns every node in an arena; nodes refer to each other
//! through [`NodeId`]s and the parse stack holds non-owning ids as well.
//! [`GeoNode`] is a closed set of variants, so a handler asking "is my
//! parent a Style?" does a variant check through [`NodeVariant`] instead of
//! a runtime downcast.

mod common;
mod feature;
mod geometry;
mod scene;
mod style;
mod view;

use std::collections::BTreeMap;

use serde::Serialize;

pub use common::{AltitudeMode, Color, ColorMode, Coordinates};
pub use feature::{Container, Feature, GroundOverlay, Placemark};
pub use geometry::{LatLonQuad, LineString, MultiGeometry, Point, Polygon, Track};
pub use scene::{SceneDocument, SceneHead, SceneLayer, SceneMap, SceneTexture};
pub use style::{
    ColorStyle, IconStyle, LabelStyle, LineStyle, Pair, PolyStyle, Style, StyleMap,
};
pub use view::{Data, LatLonAltBox, LatLonBox, LookAt, Lod, Region, TimeSpan, TimeStamp};

/// Index of a node inside its [`GeoDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Every kind of node a handler can construct.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum GeoNode {
    Document(Container),
    Folder(Container),
    Placemark(Placemark),
    GroundOverlay(GroundOverlay),
    Point(Point),
    LineString(LineString),
    LinearRing(LineString),
    Polygon(Polygon),
    MultiGeometry(MultiGeometry),
    Track(Track),
    LatLonQuad(LatLonQuad),
    Style(Style),
    IconStyle(IconStyle),
    LineStyle(LineStyle),
    PolyStyle(PolyStyle),
    LabelStyle(LabelStyle),
    StyleMap(StyleMap),
    Pair(Pair),
    LatLonBox(LatLonBox),
    LatLonAltBox(LatLonAltBox),
    Region(Region),
    Lod(Lod),
    LookAt(LookAt),
    TimeStamp(TimeStamp),
    TimeSpan(TimeSpan),
    Data(Data),
    SceneDocument(SceneDocument),
    SceneHead(SceneHead),
    SceneMap(SceneMap),
    SceneLayer(SceneLayer),
    SceneTexture(SceneTexture),
}

impl GeoNode {
    /// Variant name, as used in summaries.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Document(_) => "Document",
            Self::Folder(_) => "Folder",
            Self::Placemark(_) => "Placemark",
            Self::GroundOverlay(_) => "GroundOverlay",
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::LinearRing(_) => "LinearRing",
            Self::Polygon(_) => "Polygon",
            Self::MultiGeometry(_) => "MultiGeometry",
            Self::Track(_) => "Track",
            Self::LatLonQuad(_) => "LatLonQuad",
            Self::Style(_) => "Style",
            Self::IconStyle(_) => "IconStyle",
            Self::LineStyle(_) => "LineStyle",
            Self::PolyStyle(_) => "PolyStyle",
            Self::LabelStyle(_) => "LabelStyle",
            Self::StyleMap(_) => "StyleMap",
            Self::Pair(_) => "Pair",
            Self::LatLonBox(_) => "LatLonBox",
            Self::LatLonAltBox(_) => "LatLonAltBox",
            Self::Region(_) => "Region",
            Self::Lod(_) => "Lod",
            Self::LookAt(_) => "LookAt",
            Self::TimeStamp(_) => "TimeStamp",
            Self::TimeSpan(_) => "TimeSpan",
            Self::Data(_) => "Data",
            Self::SceneDocument(_) => "SceneDocument",
            Self::SceneHead(_) => "SceneHead",
            Self::SceneMap(_) => "SceneMap",
            Self::SceneLayer(_) => "SceneLayer",
            Self::SceneTexture(_) => "SceneTexture",
        }
    }

    /// Whether this node holds a `T`.
    #[must_use]
    pub fn is<T: NodeVariant>(&self) -> bool {
        T::from_node(self).is_some()
    }

    #[must_use]
    pub fn get<T: NodeVariant>(&self) -> Option<&T> {
        T::from_node(self)
    }

    pub fn get_mut<T: NodeVariant>(&mut self) -> Option<&mut T> {
        T::from_node_mut(self)
    }

    /// Feature properties of documents, folders, placemarks and overlays.
    #[must_use]
    pub fn as_feature(&self) -> Option<&Feature> {
        match self {
            Self::Document(container) | Self::Folder(container) => Some(&container.feature),
            Self::Placemark(placemark) => Some(&placemark.feature),
            Self::GroundOverlay(overlay) => Some(&overlay.feature),
            _ => None,
        }
    }

    pub fn as_feature_mut(&mut self) -> Option<&mut Feature> {
        match self {
            Self::Document(container) | Self::Folder(container) => Some(&mut container.feature),
            Self::Placemark(placemark) => Some(&mut placemark.feature),
            Self::GroundOverlay(overlay) => Some(&mut overlay.feature),
            _ => None,
        }
    }

    /// Colour settings of the four colour styles.
    pub fn as_color_style_mut(&mut self) -> Option<&mut ColorStyle> {
        match self {
            Self::IconStyle(style) => Some(&mut style.color_style),
            Self::LineStyle(style) => Some(&mut style.color_style),
            Self::PolyStyle(style) => Some(&mut style.color_style),
            Self::LabelStyle(style) => Some(&mut style.color_style),
            _ => None,
        }
    }
}

/// Checked typed access to the payload of a [`GeoNode`].
pub trait NodeVariant: Sized {
    fn from_node(node: &GeoNode) -> Option<&Self>;
    fn from_node_mut(node: &mut GeoNode) -> Option<&mut Self>;
}

macro_rules! node_variant {
    ($($variant:ident => $payload:ty),* $(,)?) => {
        $(
            impl NodeVariant for $payload {
                fn from_node(node: &GeoNode) -> Option<&Self> {
                    match node {
                        GeoNode::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }

                fn from_node_mut(node: &mut GeoNode) -> Option<&mut Self> {
                    match node {
                        GeoNode::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }
            }
        )*
    };
}

node_variant! {
    Placemark => Placemark,
    GroundOverlay => GroundOverlay,
    Point => Point,
    Polygon => Polygon,
    MultiGeometry => MultiGeometry,
    Track => Track,
    LatLonQuad => LatLonQuad,
    Style => Style,
    IconStyle => IconStyle,
    LineStyle => LineStyle,
    PolyStyle => PolyStyle,
    LabelStyle => LabelStyle,
    StyleMap => StyleMap,
    Pair => Pair,
    LatLonBox => LatLonBox,
    LatLonAltBox => LatLonAltBox,
    Region => Region,
    Lod => Lod,
    LookAt => LookAt,
    TimeStamp => TimeStamp,
    TimeSpan => TimeSpan,
    Data => Data,
    SceneDocument => SceneDocument,
    SceneHead => SceneHead,
    SceneMap => SceneMap,
    SceneLayer => SceneLayer,
    SceneTexture => SceneTexture,
}

// Documents and folders share a payload.
impl NodeVariant for Container {
    fn from_node(node: &GeoNode) -> Option<&Self> {
        match node {
            GeoNode::Document(container) | GeoNode::Folder(container) => Some(container),
            _ => None,
        }
    }

    fn from_node_mut(node: &mut GeoNode) -> Option<&mut Self> {
        match node {
            GeoNode::Document(container) | GeoNode::Folder(container) => Some(container),
            _ => None,
        }
    }
}

// So do line strings and linear rings.
impl NodeVariant for LineString {
    fn from_node(node: &GeoNode) -> Option<&Self> {
        match node {
            GeoNode::LineString(line) | GeoNode::LinearRing(line) => Some(line),
            _ => None,
        }
    }

    fn from_node_mut(node: &mut GeoNode) -> Option<&mut Self> {
        match node {
            GeoNode::LineString(line) | GeoNode::LinearRing(line) => Some(line),
            _ => None,
        }
    }
}

/// Arena owning every node of one parsed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoDocument {
    nodes: Vec<GeoNode>,
}

impl GeoDocument {
    /// Create a document whose root is `root`.
    #[must_use]
    pub fn new(root: GeoNode) -> Self {
        Self { nodes: vec![root] }
    }

    /// Empty KML/GPX document.
    #[must_use]
    pub fn new_data_document() -> Self {
        Self::new(GeoNode::Document(Container::default()))
    }

    /// Empty map theme.
    #[must_use]
    pub fn new_scene_document() -> Self {
        Self::new(GeoNode::SceneDocument(SceneDocument::default()))
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the document holds nothing but its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn add(&mut self, node: GeoNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&GeoNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut GeoNode> {
        self.nodes.get_mut(id.0)
    }

    #[must_use]
    pub fn is<T: NodeVariant>(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(GeoNode::is::<T>)
    }

    #[must_use]
    pub fn get<T: NodeVariant>(&self, id: NodeId) -> Option<&T> {
        self.node(id).and_then(GeoNode::get::<T>)
    }

    pub fn get_mut<T: NodeVariant>(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).and_then(GeoNode::get_mut::<T>)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &GeoNode)> {
        self.nodes.iter().enumerate().map(|(index, node)| (NodeId(index), node))
    }

    /// Child features of a document or folder.
    #[must_use]
    pub fn features(&self, container: NodeId) -> &[NodeId] {
        self.get::<Container>(container)
            .map_or(&[], |container| container.children.as_slice())
    }

    /// All placemarks reachable from the root, in document order.
    #[must_use]
    pub fn placemarks(&self) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending = vec![self.root()];
        while let Some(id) = pending.pop() {
            match self.node(id) {
                Some(GeoNode::Placemark(_)) => found.push(id),
                Some(GeoNode::Document(container) | GeoNode::Folder(container)) => {
                    pending.extend(container.children.iter().rev());
                }
                _ => {}
            }
        }
        found
    }

    /// The point geometry of a placemark, created if the placemark has
    /// none or a geometry of another kind.
    pub fn placemark_point(&mut self, placemark: NodeId) -> Option<NodeId> {
        let geometry = self.get::<Placemark>(placemark)?.geometry;
        if let Some(point) = geometry.filter(|&id| self.is::<Point>(id)) {
            return Some(point);
        }
        let point = self.add(GeoNode::Point(Point::default()));
        if let Some(placemark) = self.get_mut::<Placemark>(placemark) {
            placemark.geometry = Some(point);
        }
        Some(point)
    }

    /// Move a placemark to `coordinates`, updating its point geometry.
    pub fn set_placemark_coordinate(&mut self, placemark: NodeId, coordinates: Coordinates) {
        let Some(point) = self.placemark_point(placemark) else {
            return;
        };
        if let Some(point) = self.get_mut::<Point>(point) {
            point.coordinates = Some(coordinates);
        }
        if let Some(placemark) = self.get_mut::<Placemark>(placemark) {
            placemark.coordinate = Some(coordinates);
        }
    }

    /// Node counts per kind, root excluded.
    #[must_use]
    pub fn summary(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for (_, node) in self.iter().skip(1) {
            *counts.entry(node.kind_name()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_access() {
        let mut node = GeoNode::LinearRing(LineString::default());

        assert!(node.is::<LineString>());
        assert!(!node.is::<Point>());
        node.get_mut::<LineString>()
            .unwrap()
            .coordinates
            .push(Coordinates::new(1.0, 2.0, 0.0));
        assert_eq!(node.get::<LineString>().unwrap().coordinates.len(), 1);
        assert_eq!(node.kind_name(), "LinearRing");
    }

    #[test]
    fn test_feature_group() {
        let mut folder = GeoNode::Folder(Container::default());
        folder.as_feature_mut().unwrap().name = "Tours".to_string();

        assert_eq!(folder.as_feature().unwrap().name, "Tours");
        assert!(GeoNode::Point(Point::default()).as_feature().is_none());
        assert!(GeoNode::Style(Style::default()).as_color_style_mut().is_none());
        assert!(GeoNode::LineStyle(LineStyle::default())
            .as_color_style_mut()
            .is_some());
    }

    #[test]
    fn test_set_placemark_coordinate_creates_point() {
        let mut document = GeoDocument::new_data_document();
        let placemark = document.add(GeoNode::Placemark(Placemark::default()));

        document.set_placemark_coordinate(placemark, Coordinates::new(1.0, 2.0, 0.0));
        let point = document.get::<Placemark>(placemark).unwrap().geometry.unwrap();
        document.set_placemark_coordinate(placemark, Coordinates::new(3.0, 4.0, 0.0));

        assert_eq!(document.get::<Placemark>(placemark).unwrap().geometry, Some(point));
        assert_eq!(
            document.get::<Point>(point).unwrap().coordinates,
            Some(Coordinates::new(3.0, 4.0, 0.0))
        );
        assert_eq!(document.len(), 3);
    }

    #[test]
    fn test_placemarks_in_document_order() {
        let mut document = GeoDocument::new_data_document();
        let first = document.add(GeoNode::Placemark(Placemark::default()));
        let folder = document.add(GeoNode::Folder(Container::default()));
        let nested = document.add(GeoNode::Placemark(Placemark::default()));
        let last = document.add(GeoNode::Placemark(Placemark::default()));
        document.get_mut::<Container>(folder).unwrap().children.push(nested);
        let root = document.root();
        document
            .get_mut::<Container>(root)
            .unwrap()
            .children
            .extend([first, folder, last]);

        assert_eq!(document.placemarks(), vec![first, nested, last]);
        assert_eq!(document.features(root).len(), 3);
        assert_eq!(document.summary()["Placemark"], 3);
    }
}
