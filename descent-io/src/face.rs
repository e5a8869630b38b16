use descent_core::color::{Rgb, aci_color};
use descent_core::geometry::{Axis, Point3};
use tracing::trace;

use crate::reader::LineCursor;
use crate::{DxfError, GROUP_ENTITY, NumericPolicy, parse_coordinate, parse_color_index};

const DEFAULT_LAYER: &str = "default";

/// 3DFACE 顶点坐标组码到（顶点序号，坐标轴）的映射。
const COORDINATE_CODES: [(&str, usize, Axis); 12] = [
    ("10", 0, Axis::X),
    ("20", 0, Axis::Y),
    ("30", 0, Axis::Z),
    ("11", 1, Axis::X),
    ("21", 1, Axis::Y),
    ("31", 1, Axis::Z),
    ("12", 2, Axis::X),
    ("22", 2, Axis::Y),
    ("32", 2, Axis::Z),
    ("13", 3, Axis::X),
    ("23", 3, Axis::Y),
    ("33", 3, Axis::Z),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaceField {
    Layer,
    Color,
    Coordinate { vertex: usize, axis: Axis },
}

fn classify(code: &str) -> Option<FaceField> {
    match code {
        "8" => Some(FaceField::Layer),
        "62" => Some(FaceField::Color),
        _ => COORDINATE_CODES
            .iter()
            .find(|(candidate, _, _)| *candidate == code)
            .map(|&(_, vertex, axis)| FaceField::Coordinate { vertex, axis }),
    }
}

/// 单个 3DFACE 的解析结果：图层、颜色与四个顶点。
#[derive(Debug, Clone, PartialEq)]
pub struct FaceRecord {
    pub layer: String,
    pub color: Rgb,
    pub points: [Point3; 4],
}

impl Default for FaceRecord {
    fn default() -> Self {
        Self {
            layer: DEFAULT_LAYER.to_string(),
            color: Rgb::WHITE,
            points: [Point3::ORIGIN; 4],
        }
    }
}

/// 从 `0`/`3DFACE` 之后开始读取，直到下一行组码为 `0` 为止（不消费该行）。
/// 组码出现顺序不限，未识别的组码连同其值一起跳过。
pub(crate) fn read_face(
    cursor: &mut LineCursor<'_>,
    policy: NumericPolicy,
) -> Result<FaceRecord, DxfError> {
    let mut face = FaceRecord::default();

    while cursor.peek_line() != Some(GROUP_ENTITY) {
        let code = cursor.next_line()?;
        let value = cursor.next_line()?;
        let line = cursor.line_number();
        match classify(code) {
            Some(FaceField::Layer) => face.layer = value.to_string(),
            Some(FaceField::Color) => {
                face.color = match parse_color_index(value, code, line, policy)? {
                    Some(index) => aci_color(index),
                    None => Rgb::WHITE,
                };
            }
            Some(FaceField::Coordinate { vertex, axis }) => {
                let coordinate = parse_coordinate(value, code, line, policy)?;
                face.points[vertex].set_axis(axis, coordinate);
            }
            None => {}
        }
    }

    trace!(layer = %face.layer, color = face.color.to_hex(), "解析 3DFACE");
    Ok(face)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_every_consumed_code() {
        assert_eq!(classify("8"), Some(FaceField::Layer));
        assert_eq!(classify("62"), Some(FaceField::Color));
        assert_eq!(
            classify("21"),
            Some(FaceField::Coordinate {
                vertex: 1,
                axis: Axis::Y
            })
        );
        assert_eq!(
            classify("33"),
            Some(FaceField::Coordinate {
                vertex: 3,
                axis: Axis::Z
            })
        );
        for ignored in ["0", "2", "5", "14", "39", "70", "100", " 10", ""] {
            assert_eq!(classify(ignored), None, "code {ignored:?}");
        }
    }

    #[test]
    fn fields_are_assigned_regardless_of_order() {
        let mut cursor = LineCursor::new("33\n9\n8\nWALLS\n10\n1.5\n62\n30\n13\n-2\n0\nENDSEC");
        let face = read_face(&mut cursor, NumericPolicy::Strict).unwrap();
        assert_eq!(face.layer, "WALLS");
        assert_eq!(face.color, Rgb::new(255, 127, 0));
        assert_eq!(face.points[0], Point3::new(1.5, 0.0, 0.0));
        assert_eq!(face.points[1], Point3::ORIGIN);
        assert_eq!(face.points[3], Point3::new(-2.0, 0.0, 9.0));
        // 结束符保留给状态机
        assert_eq!(cursor.peek_line(), Some("0"));
    }

    #[test]
    fn empty_face_keeps_defaults() {
        let mut cursor = LineCursor::new("0\nEOF");
        let face = read_face(&mut cursor, NumericPolicy::Strict).unwrap();
        assert_eq!(face, FaceRecord::default());
        assert_eq!(face.layer, "default");
    }

    #[test]
    fn unknown_codes_skip_their_value_line() {
        // 值为 "0" 的未知组码不能被误认为实体结束
        let mut cursor = LineCursor::new("70\n0\n10\n4\n0\nEOF");
        let face = read_face(&mut cursor, NumericPolicy::Strict).unwrap();
        assert_eq!(face.points[0].x(), 4.0);
    }

    #[test]
    fn truncated_face_is_out_of_input() {
        let mut cursor = LineCursor::new("10\n1\n20");
        let err = read_face(&mut cursor, NumericPolicy::Strict).unwrap_err();
        assert!(matches!(err, DxfError::OutOfInput { line: 4 }));
    }

    #[test]
    fn malformed_values_follow_policy() {
        let mut cursor = LineCursor::new("20\nabc\n0\nEOF");
        let err = read_face(&mut cursor, NumericPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            DxfError::MalformedNumeric { line: 2, ref code, ref value } if code == "20" && value == "abc"
        ));

        let mut cursor = LineCursor::new("20\nabc\n62\nred\n0\nEOF");
        let face = read_face(&mut cursor, NumericPolicy::Permissive).unwrap();
        assert!(face.points[0].y().is_nan());
        assert_eq!(face.color, Rgb::WHITE);
    }
}
