//! Decoder for the encoded polyline algorithm format.

use thiserror::Error;

use crate::shared::Coordinate;

pub const DEFAULT_PRECISION: u32 = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid polyline character {0:?} at byte {1}")]
    InvalidCharacter(char, usize),
    #[error("Polyline ended in the middle of a value")]
    Truncated,
    #[error("Polyline value at byte {0} overflows")]
    Overflow(usize),
}

/// Decodes an encoded polyline into `(lat, lon)` coordinates.
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<Coordinate>, self::Error> {
    let factor = 10_f64.powi(precision as i32);
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        let start = index;
        lat = lat
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or(self::Error::Overflow(start))?;
        let start = index;
        lon = lon
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or(self::Error::Overflow(start))?;
        points.push(Coordinate::new(lat as f64 / factor, lon as f64 / factor));
    }
    Ok(points)
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, self::Error> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let byte = *bytes.get(*index).ok_or(self::Error::Truncated)?;
        if !(63..=126).contains(&byte) {
            return Err(self::Error::InvalidCharacter(byte as char, *index));
        }
        if shift > 60 {
            return Err(self::Error::Overflow(*index));
        }
        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *index += 1;
        if chunk < 0x20 {
            break;
        }
    }
    // Zig-zag: the low bit carries the sign.
    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

#[test]
fn decode_reference_polyline() {
    let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", DEFAULT_PRECISION).unwrap();
    let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
    assert_eq!(points.len(), expected.len());
    for (point, (lat, lon)) in points.iter().zip(expected) {
        assert!((point.latitude - lat).abs() < 1e-9);
        assert!((point.longitude - lon).abs() < 1e-9);
    }
}

#[test]
fn decode_empty_polyline() {
    assert_eq!(decode("", DEFAULT_PRECISION).unwrap(), vec![]);
}

#[test]
fn decode_truncated_polyline() {
    assert_eq!(decode("_p~iF", DEFAULT_PRECISION), Err(Error::Truncated));
}

#[test]
fn decode_invalid_character() {
    assert_eq!(
        decode("_p~iF ps|U", DEFAULT_PRECISION),
        Err(Error::InvalidCharacter(' ', 5))
    );
}

#[test]
fn decode_overflowing_polyline() {
    // Each pair holds a 13-chunk latitude delta near 2^61; the running sum overflows.
    let encoded = format!("}}{}B?", "~".repeat(11)).repeat(5);
    assert!(matches!(
        decode(&encoded, DEFAULT_PRECISION),
        Err(Error::Overflow(_))
    ));
}
