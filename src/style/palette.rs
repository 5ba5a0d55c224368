/// Distinct colors for telling routes apart on a shared map.
pub const PALETTE: [&str; 20] = [
    "#3366CC", "#DC3912", "#FF9900", "#109618", "#990099", "#0099C6", "#DD4477", "#66AA00",
    "#B82E2E", "#316395", "#994499", "#22AA99", "#AAAA11", "#6633CC", "#E67300", "#8B0707",
    "#329262", "#5574A6", "#FF6347", "#4B0082",
];

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Picks a route color.
///
/// A non-empty `route_id` always maps to the same color, independent of the
/// route's position in the list, so re-renders keep their colors.
pub fn color_for(index: usize, route_id: Option<&str>) -> &'static str {
    match route_id {
        Some(id) if !id.is_empty() => PALETTE[(stable_hash(id) % PALETTE.len() as u64) as usize],
        _ => PALETTE[index % PALETTE.len()],
    }
}

/// 64-bit FNV-1a. Unlike `std::hash`, the output is fixed across runs,
/// builds and platforms.
fn stable_hash(value: &str) -> u64 {
    value.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}

#[test]
fn stable_hash_known_values() {
    assert_eq!(stable_hash(""), 0xcbf2_9ce4_8422_2325);
    assert_eq!(stable_hash("a"), 0xaf63_dc4c_8601_ec8c);
}
