//! Static grammar check for imported `.obj` text
//!
//! Runs before any voxel is loaded, so a rejected model leaves the world
//! untouched.

use crate::core::error::Error;
use crate::core::types::Result;

use super::topology::anchor_offset;
use super::{body_lines, Model3d, ModelFormat, BLOCK_LINES, CUBE_VERTICES};

const EMPTY_OBJ: &str = "Cannot load empty .obj file!";
const COORD_NAMES: [&str; 3] = ["x", "y", "z"];

/// Outcome of [`validate`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// First problem found, with its 1-based line number in the `.obj` text
    Invalid { line: usize, msg: String },
}

impl Validation {
    pub fn is_err(&self) -> bool {
        matches!(self, Validation::Invalid { .. })
    }

    /// Human-readable problem description, empty when valid
    pub fn msg(&self) -> &str {
        match self {
            Validation::Valid => "",
            Validation::Invalid { msg, .. } => msg,
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Invalid { line, msg } => Err(Error::Validation { line, msg }),
        }
    }

    fn invalid(line: usize, msg: impl Into<String>) -> Self {
        Validation::Invalid { line, msg: msg.into() }
    }
}

/// Tokens separated by single whitespace characters; runs of whitespace
/// produce empty tokens
fn tokens(line: &str) -> Vec<&str> {
    line.split(char::is_whitespace).collect()
}

/// Six hex digits, or the bare `0` written for black by some exporters
fn is_hex_name(s: &str) -> bool {
    s == "0" || (s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Check every voxel block of `model.obj`, stopping at the first problem
pub fn validate(model: &Model3d, format: &ModelFormat) -> Validation {
    if model.obj.trim().is_empty() {
        return Validation::invalid(1, EMPTY_OBJ);
    }

    let offset = anchor_offset(format.half_extent);
    let max = format.max_coordinate();

    for block in body_lines(&model.obj).chunks(BLOCK_LINES) {
        let (first_line, _) = block[0];
        if block.len() < BLOCK_LINES {
            return Validation::invalid(
                first_line,
                format!(
                    "Incomplete voxel block: expected {BLOCK_LINES} lines, found {}",
                    block.len()
                ),
            );
        }

        let (line_no, color_line) = block[0];
        let color = tokens(color_line);
        if color.len() != 2 || color[0] != "usemtl" {
            return Validation::invalid(line_no, format!("Invalid color line {color_line}"));
        }
        if !is_hex_name(color[1]) {
            return Validation::invalid(line_no, format!("Invalid hex value {}", color[1]));
        }

        let (line_no, vertex_line) = block[1];
        let vertex = tokens(vertex_line);
        if vertex.len() != 4 || vertex.iter().any(|t| t.is_empty()) || vertex[0] != "v" {
            return Validation::invalid(line_no, format!("Line {vertex_line} has invalid format"));
        }

        for (axis, raw) in vertex[1..].iter().enumerate() {
            let Some(value) = raw.parse::<f32>().ok().filter(|v| v.is_finite()) else {
                return Validation::invalid(line_no, format!("Invalid vertex {vertex_line}"));
            };
            let center = value + offset[axis];
            if center % format.half_extent != 0.0 || center.abs() > max {
                return Validation::invalid(
                    line_no,
                    format!(
                        "Vertex {} value exceeds allowed dimensions {raw}",
                        COORD_NAMES[axis]
                    ),
                );
            }
        }

        for (i, &(line_no, line)) in block.iter().enumerate().skip(2) {
            let expected = if i <= CUBE_VERTICES { "v" } else { "f" };
            if tokens(line)[0] != expected {
                return Validation::invalid(
                    line_no,
                    format!("Expected '{expected}' line, found {line}"),
                );
            }
        }
    }

    Validation::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::model::serialize;
    use crate::voxel::{Color, Voxel, VoxelId};

    fn saved(positions: &[Vec3]) -> Model3d {
        let voxels: Vec<Voxel> = positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Voxel {
                id: VoxelId(i as u64),
                position,
                color: Color::from_hex(0xfeb74c),
            })
            .collect();
        serialize(&voxels, &ModelFormat::default())
    }

    fn check(obj: &str) -> Validation {
        validate(&Model3d::new(obj, ""), &ModelFormat::default())
    }

    #[test]
    fn test_accepts_serialized_model() {
        let model = saved(&[Vec3::splat(25.0), Vec3::new(-475.0, 75.0, 475.0)]);
        assert_eq!(validate(&model, &ModelFormat::default()), Validation::Valid);
        assert_eq!(Validation::Valid.msg(), "");
    }

    #[test]
    fn test_rejects_empty() {
        let result = check("");
        assert!(result.is_err());
        assert_eq!(result.msg(), EMPTY_OBJ);
        assert!(check("  \n\n").is_err());
    }

    #[test]
    fn test_rejects_bad_color_line() {
        let obj = saved(&[Vec3::splat(25.0)]).obj.replace("usemtl feb74c", "usemtl");
        assert_eq!(
            check(&obj),
            Validation::Invalid { line: 2, msg: "Invalid color line usemtl".into() }
        );

        let obj = saved(&[Vec3::splat(25.0)]).obj.replace("usemtl feb74c", "usemtl xyz123");
        assert_eq!(check(&obj).msg(), "Invalid hex value xyz123");
    }

    #[test]
    fn test_line_numbers_count_leading_blank_lines() {
        let obj = saved(&[Vec3::splat(25.0)]).obj.replace("usemtl feb74c", "usemtl");
        let obj = format!("\n\n{obj}");
        assert_eq!(
            check(&obj),
            Validation::Invalid { line: 4, msg: "Invalid color line usemtl".into() }
        );
    }

    #[test]
    fn test_accepts_black_shorthand() {
        let obj = saved(&[Vec3::splat(25.0)]).obj.replace("usemtl feb74c", "usemtl 0");
        assert!(!check(&obj).is_err());
    }

    #[test]
    fn test_rejects_bad_vertex_line() {
        let obj = saved(&[Vec3::splat(25.0)]).obj.replace("v 0 0 50\n", "v 0  0 50\n");
        assert_eq!(check(&obj).msg(), "Line v 0  0 50 has invalid format");

        let obj = saved(&[Vec3::splat(25.0)]).obj.replace("v 0 0 50\n", "v 0 zero 50\n");
        assert_eq!(check(&obj).msg(), "Invalid vertex v 0 zero 50");
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        // Anchor x = 2500 reconstructs a center at 2525
        let obj = saved(&[Vec3::splat(25.0)]).obj.replace("v 0 0 50\n", "v 2500 0 50\n");
        assert_eq!(check(&obj).msg(), "Vertex x value exceeds allowed dimensions 2500");

        let obj = saved(&[Vec3::splat(25.0)]).obj.replace("v 0 0 50\n", "v 0 3 50\n");
        assert_eq!(check(&obj).msg(), "Vertex y value exceeds allowed dimensions 3");
    }

    #[test]
    fn test_rejects_truncated_block() {
        let model = saved(&[Vec3::splat(25.0), Vec3::new(75.0, 25.0, 25.0)]);
        let truncated: Vec<&str> = model.obj.lines().take(1 + 15 + 3).collect();

        let result = check(&truncated.join("\n"));
        assert_eq!(result, Validation::Invalid {
            line: 17,
            msg: "Incomplete voxel block: expected 15 lines, found 3".into(),
        });
    }

    #[test]
    fn test_rejects_wrong_line_kind() {
        let obj = saved(&[Vec3::splat(25.0)]).obj.replace("f 5 6 7 8", "v 5 6 7");
        let result = check(&obj);
        assert!(matches!(result, Validation::Invalid { line: 13, .. }));

        let obj = saved(&[Vec3::splat(25.0)]).obj.replace("v 50 50 0", "f 1 2 3 4");
        assert!(matches!(check(&obj), Validation::Invalid { line: 8, .. }));
    }

    #[test]
    fn test_into_result() {
        assert!(Validation::Valid.into_result().is_ok());
        assert!(matches!(
            check("").into_result(),
            Err(Error::Validation { line: 1, .. })
        ));
    }
}
