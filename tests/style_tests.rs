use fleetmap::style::{LINE_STYLES, PALETTE, color_for, style_for};

#[test]
fn index_color_test() {
    assert_eq!(color_for(0, None), "#3366CC");
    assert_eq!(color_for(1, None), "#DC3912");
    assert_eq!(color_for(20, None), color_for(0, None));
    assert_eq!(color_for(3, Some("")), color_for(3, None));
}

#[test]
fn route_id_color_is_stable_test() {
    let first = color_for(0, Some("route-42"));
    assert_eq!(color_for(7, Some("route-42")), first);
    assert_eq!(color_for(0, Some("route-42")), first);
    assert!(PALETTE.contains(&first));
}

#[test]
fn line_style_cycle_test() {
    assert!(!style_for(0).is_dashed());
    assert_eq!(style_for(1).dash_array, Some("10, 10"));
    assert_eq!(style_for(3).dash_array, Some("15, 10, 1, 10"));
    assert_eq!(style_for(4), LINE_STYLES[0]);
}

#[test]
fn route_id_color_value_test() {
    // Pinned so a change of hash shows up as a test failure.
    assert_eq!(color_for(0, Some("route-a")), "#329262");
}
