use crate::{map::Error, shared::Coordinate, style::LineStyle};

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub html: String,
    pub max_width: u32,
}

impl Popup {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            max_width: 300,
        }
    }
}

/// A Font Awesome glyph on a colored pin.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub glyph: &'static str,
    pub marker_color: &'static str,
    pub icon_color: String,
}

impl Icon {
    pub fn new(glyph: &'static str, marker_color: &'static str) -> Self {
        Self {
            glyph,
            marker_color,
            icon_color: "white".into(),
        }
    }

    pub fn with_icon_color(mut self, color: impl Into<String>) -> Self {
        self.icon_color = color.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerKind {
    Pin(Icon),
    Circle {
        radius: f64,
        color: String,
        fill_opacity: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub kind: MarkerKind,
    pub tooltip: Option<String>,
    pub popup: Option<Popup>,
}

impl Marker {
    pub fn pin(coordinate: Coordinate, icon: Icon) -> Self {
        Self {
            coordinate,
            kind: MarkerKind::Pin(icon),
            tooltip: None,
            popup: None,
        }
    }

    pub fn circle(coordinate: Coordinate, radius: f64, color: impl Into<String>) -> Self {
        Self {
            coordinate,
            kind: MarkerKind::Circle {
                radius,
                color: color.into(),
                fill_opacity: 0.7,
            },
            tooltip: None,
            popup: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Coordinate>,
    pub color: String,
    pub style: LineStyle,
    pub tooltip: Option<String>,
    pub popup: Option<Popup>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>, color: impl Into<String>, style: LineStyle) -> Self {
        Self {
            points,
            color: color.into(),
            style,
            tooltip: None,
            popup: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }
}

/// Markers that collapse into counted bubbles when zoomed out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    pub name: String,
    pub layers: Vec<Layer>,
}

impl Cluster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker(Marker),
    Polyline(Polyline),
    Cluster(Cluster),
}

impl Layer {
    fn validate(&self) -> Result<(), Error> {
        match self {
            Layer::Marker(marker) if !marker.coordinate.is_finite() => {
                Err(Error::InvalidCoordinate(marker.coordinate))
            }
            Layer::Polyline(polyline) => {
                if polyline.points.len() < 2 {
                    return Err(Error::EmptyPolyline);
                }
                match polyline.points.iter().find(|point| !point.is_finite()) {
                    Some(point) => Err(Error::InvalidCoordinate(*point)),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }
}

impl From<Marker> for Layer {
    fn from(value: Marker) -> Self {
        Layer::Marker(value)
    }
}

impl From<Polyline> for Layer {
    fn from(value: Polyline) -> Self {
        Layer::Polyline(value)
    }
}

impl From<Cluster> for Layer {
    fn from(value: Cluster) -> Self {
        Layer::Cluster(value)
    }
}

/// Something map layers can be drawn onto.
///
/// Layers are checked on the way in, so a surface never holds a marker or
/// line Leaflet cannot place.
pub trait LayerSink {
    fn layers_mut(&mut self) -> &mut Vec<Layer>;

    fn add(&mut self, layer: impl Into<Layer>) -> Result<(), Error> {
        let layer = layer.into();
        layer.validate()?;
        self.layers_mut().push(layer);
        Ok(())
    }
}

impl LayerSink for Cluster {
    fn layers_mut(&mut self) -> &mut Vec<Layer> {
        &mut self.layers
    }
}

/// Layers that can be shown or hidden together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerGroup {
    pub name: String,
    pub show: bool,
    pub layers: Vec<Layer>,
}

impl LayerGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            show: true,
            layers: Vec::new(),
        }
    }
}

impl LayerSink for LayerGroup {
    fn layers_mut(&mut self) -> &mut Vec<Layer> {
        &mut self.layers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Scale,
    Fullscreen,
    Locate,
    /// Distance measuring in kilometres, top right.
    Measure,
    /// Checkbox list of the map's layer groups.
    LayerSwitcher,
}

/// An interactive map under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSurface {
    pub center: Coordinate,
    pub zoom: u8,
    /// Fixed height in pixels, or the full viewport when `None`.
    pub height: Option<u32>,
    pub layers: Vec<Layer>,
    pub groups: Vec<LayerGroup>,
    pub controls: Vec<Control>,
    /// Raw HTML placed over the map, such as legends and warnings.
    pub overlays: Vec<String>,
    pub scripts: Vec<String>,
}

impl MapSurface {
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            height: None,
            layers: Vec::new(),
            groups: Vec::new(),
            controls: Vec::new(),
            overlays: Vec::new(),
            scripts: Vec::new(),
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn add_group(&mut self, group: LayerGroup) {
        self.groups.push(group);
    }

    pub fn add_control(&mut self, control: Control) {
        if !self.controls.contains(&control) {
            self.controls.push(control);
        }
    }

    pub fn add_overlay(&mut self, html: impl Into<String>) {
        self.overlays.push(html.into());
    }

    pub fn add_script(&mut self, script: impl Into<String>) {
        self.scripts.push(script.into());
    }

    /// Every polyline on the map, including those inside groups.
    pub fn polylines(&self) -> Vec<&Polyline> {
        fn collect<'a>(layers: &'a [Layer], out: &mut Vec<&'a Polyline>) {
            for layer in layers {
                match layer {
                    Layer::Polyline(polyline) => out.push(polyline),
                    Layer::Cluster(cluster) => collect(&cluster.layers, out),
                    Layer::Marker(_) => {}
                }
            }
        }
        let mut polylines = Vec::new();
        collect(&self.layers, &mut polylines);
        for group in &self.groups {
            collect(&group.layers, &mut polylines);
        }
        polylines
    }

    /// Every marker on the map, including clustered and grouped ones.
    pub fn markers(&self) -> Vec<&Marker> {
        fn collect<'a>(layers: &'a [Layer], out: &mut Vec<&'a Marker>) {
            for layer in layers {
                match layer {
                    Layer::Marker(marker) => out.push(marker),
                    Layer::Cluster(cluster) => collect(&cluster.layers, out),
                    Layer::Polyline(_) => {}
                }
            }
        }
        let mut markers = Vec::new();
        collect(&self.layers, &mut markers);
        for group in &self.groups {
            collect(&group.layers, &mut markers);
        }
        markers
    }
}

impl LayerSink for MapSurface {
    fn layers_mut(&mut self) -> &mut Vec<Layer> {
        &mut self.layers
    }
}
