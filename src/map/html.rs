//! Emits a map surface as a standalone Leaflet page.

use serde_json::{Value, json};

use crate::{
    map::surface::{Control, Layer, MapSurface, Marker, MarkerKind, Polyline, Popup},
    shared::Coordinate,
};

const HEAD: &str = r#"<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css"/>
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css"/>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css"/>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css"/>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet.fullscreen@3.0.2/Control.FullScreen.css"/>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet.locatecontrol@0.81.0/dist/L.Control.Locate.min.css"/>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet-measure@3.1.0/dist/leaflet-measure.css"/>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js"></script>
<script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.min.js"></script>
<script src="https://cdn.jsdelivr.net/npm/leaflet.fullscreen@3.0.2/Control.FullScreen.js"></script>
<script src="https://cdn.jsdelivr.net/npm/leaflet.locatecontrol@0.81.0/dist/L.Control.Locate.min.js"></script>
<script src="https://cdn.jsdelivr.net/npm/leaflet-measure@3.1.0/dist/leaflet-measure.js"></script>"#;

const TILE_LAYER: &str = "L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', \
     {maxZoom: 19, attribution: '&copy; OpenStreetMap contributors'}).addTo(map);";

/// A JS string literal that is also safe inside a `<script>` block.
pub(crate) fn js_string(value: &str) -> String {
    Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

fn lat_lng(coordinate: &Coordinate) -> Value {
    json!([coordinate.latitude, coordinate.longitude])
}

struct Script {
    lines: Vec<String>,
    next_var: usize,
}

impl Script {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            next_var: 0,
        }
    }

    fn var(&mut self, prefix: &str) -> String {
        self.next_var += 1;
        format!("{prefix}_{}", self.next_var)
    }

    fn line(&mut self, line: String) {
        self.lines.push(line);
    }

    fn layers(&mut self, layers: &[Layer], parent: &str) {
        for layer in layers {
            match layer {
                Layer::Marker(marker) => self.marker(marker, parent),
                Layer::Polyline(polyline) => self.polyline(polyline, parent),
                Layer::Cluster(cluster) => {
                    let var = self.var("cluster");
                    self.line(format!("var {var} = L.markerClusterGroup();"));
                    self.layers(&cluster.layers, &var);
                    self.line(format!("{var}.addTo({parent});"));
                }
            }
        }
    }

    fn marker(&mut self, marker: &Marker, parent: &str) {
        let var = self.var("marker");
        let position = lat_lng(&marker.coordinate);
        match &marker.kind {
            MarkerKind::Pin(icon) => {
                let options = json!({
                    "icon": icon.glyph,
                    "prefix": "fa",
                    "markerColor": icon.marker_color,
                    "iconColor": icon.icon_color,
                });
                self.line(format!(
                    "var {var} = L.marker({position}, {{icon: L.AwesomeMarkers.icon({options})}});"
                ));
            }
            MarkerKind::Circle {
                radius,
                color,
                fill_opacity,
            } => {
                let options = json!({
                    "radius": radius,
                    "color": color,
                    "fill": true,
                    "fillColor": color,
                    "fillOpacity": fill_opacity,
                });
                self.line(format!("var {var} = L.circleMarker({position}, {options});"));
            }
        }
        self.annotations(&var, marker.tooltip.as_deref(), marker.popup.as_ref());
        self.line(format!("{var}.addTo({parent});"));
    }

    fn polyline(&mut self, polyline: &Polyline, parent: &str) {
        let var = self.var("line");
        let points: Vec<Value> = polyline.points.iter().map(lat_lng).collect();
        let options = json!({
            "color": polyline.color,
            "weight": polyline.style.weight,
            "opacity": polyline.style.opacity,
            "dashArray": polyline.style.dash_array,
        });
        self.line(format!(
            "var {var} = L.polyline({}, {options});",
            Value::Array(points)
        ));
        self.annotations(&var, polyline.tooltip.as_deref(), polyline.popup.as_ref());
        self.line(format!("{var}.addTo({parent});"));
    }

    fn annotations(&mut self, var: &str, tooltip: Option<&str>, popup: Option<&Popup>) {
        if let Some(tooltip) = tooltip {
            self.line(format!("{var}.bindTooltip({});", js_string(tooltip)));
        }
        if let Some(popup) = popup {
            self.line(format!(
                "{var}.bindPopup({}, {{maxWidth: {}}});",
                js_string(&popup.html),
                popup.max_width
            ));
        }
    }

    fn control(&mut self, control: Control) {
        let line = match control {
            Control::Scale => "L.control.scale().addTo(map);",
            Control::Fullscreen => "L.control.fullscreen().addTo(map);",
            Control::Locate => "L.control.locate().addTo(map);",
            Control::Measure => {
                "new L.Control.Measure({position: 'topright', primaryLengthUnit: 'kilometers'}).addTo(map);"
            }
            Control::LayerSwitcher => {
                "L.control.layers(null, routeLayers, {collapsed: false}).addTo(map);"
            }
        };
        self.line(line.to_string());
    }
}

pub(crate) fn render(surface: &MapSurface) -> String {
    let center = if surface.center.is_finite() {
        surface.center
    } else {
        Coordinate::default()
    };

    let mut script = Script::new();
    script.line(format!(
        "var map = L.map('map', {{center: {}, zoom: {}}});",
        lat_lng(&center),
        surface.zoom
    ));
    script.line(TILE_LAYER.to_string());
    script.line("var routeLayers = {};".to_string());
    script.layers(&surface.layers, "map");

    for group in &surface.groups {
        let var = script.var("group");
        script.line(format!("var {var} = L.featureGroup();"));
        script.layers(&group.layers, &var);
        if group.show {
            script.line(format!("{var}.addTo(map);"));
        }
        script.line(format!("routeLayers[{}] = {var};", js_string(&group.name)));
    }

    for control in &surface.controls {
        script.control(*control);
    }
    script.line("window.routeMap = map;".to_string());
    script.line("window.routeLayers = routeLayers;".to_string());

    let height = surface
        .height
        .map(|height| format!("{height}px"))
        .unwrap_or_else(|| "100vh".to_string());

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str(HEAD);
    page.push_str(&format!(
        "\n<style>html, body {{margin: 0; padding: 0;}} #map {{width: 100%; height: {height};}}</style>\n"
    ));
    page.push_str("</head>\n<body>\n<div id=\"map\"></div>\n");
    for overlay in &surface.overlays {
        page.push_str(overlay);
        page.push('\n');
    }
    page.push_str("<script>\n");
    for line in &script.lines {
        page.push_str(line);
        page.push('\n');
    }
    for extra in &surface.scripts {
        page.push_str(extra);
        page.push('\n');
    }
    page.push_str("</script>\n</body>\n</html>\n");
    page
}

#[test]
fn js_string_escapes_script_end() {
    assert_eq!(js_string("a</script>\"b"), r#""a<\/script>\"b""#);
}
