use crate::shared::escape_html;

pub(crate) const TOGGLE_SCRIPT: &str = r#"function toggleRouteVisibility(checkbox) {
    var layer = window.routeLayers && window.routeLayers[checkbox.dataset.group];
    if (!layer || !window.routeMap) return;
    if (checkbox.checked) {
        window.routeMap.addLayer(layer);
    } else {
        window.routeMap.removeLayer(layer);
    }
}
function setAllRoutes(visible) {
    document.querySelectorAll('[id^="route-toggle-"]').forEach(function (checkbox) {
        checkbox.checked = visible;
        toggleRouteVisibility(checkbox);
    });
}"#;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub index: usize,
    /// Name of the layer group the checkbox toggles.
    pub group: String,
    pub color: String,
    pub vehicle_label: String,
    pub passengers: usize,
    pub occupancy: Option<String>,
    pub estimated_minutes: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn push(&mut self, entry: LegendEntry) {
        self.entries.push(entry);
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from(
            r#"<div id="route-map-legend" style="position: fixed; bottom: 50px; left: 10px; max-width: 250px; border: 2px solid rgba(0,0,0,0.2); z-index: 1000; font-size: 14px; background-color: white; padding: 10px; border-radius: 5px; box-shadow: 0 1px 5px rgba(0,0,0,0.4);">
<div style="text-align: center; font-weight: bold; margin-bottom: 5px;">Routes</div>
<div style="max-height: 200px; overflow-y: auto; margin-bottom: 10px;">
"#,
        );
        for entry in &self.entries {
            html.push_str(&entry.to_html());
        }
        html.push_str(
            r#"</div>
<div style="text-align: center; margin-top: 5px;">
<button onclick="setAllRoutes(true)" style="margin-right: 5px;">Show all</button>
<button onclick="setAllRoutes(false)">Hide all</button>
</div>
</div>"#,
        );
        html
    }
}

impl LegendEntry {
    fn to_html(&self) -> String {
        let occupancy = self.occupancy.as_deref().unwrap_or("N/A");
        let estimated = self
            .estimated_minutes
            .map(|minutes| format!("{minutes:.0} min"))
            .unwrap_or_else(|| "N/A".to_string());
        format!(
            r#"<div style="margin-bottom: 5px;">
<input type="checkbox" id="route-toggle-{index}" data-group="{group}" checked onchange="toggleRouteVisibility(this)" style="margin-right: 5px;">
<span style="display: inline-block; width: 30px; height: 5px; background-color: {color}; margin-right: 5px; vertical-align: middle;"></span>
<span><b>Vehicle {number}:</b> {label}</span>
<div style="margin-left: 35px; font-size: 12px;">
<span>Passengers: {passengers} | Occupancy: {occupancy}</span><br>
<span>Est. time: {estimated}</span>
</div>
</div>
"#,
            index = self.index,
            number = self.index + 1,
            group = escape_html(&self.group),
            color = escape_html(&self.color),
            label = escape_html(&self.vehicle_label),
            passengers = self.passengers,
        )
    }
}
