//! Voxel collection -> `.obj`/`.mtl` text

use std::fmt::Write;

use crate::voxel::{Color, Voxel};

use super::topology::topologize;
use super::{Model3d, ModelFormat, CUBE_VERTICES, MATERIAL_LIBRARY};

/// Material names are six lowercase hex digits
const HEX_NAME_LEN: usize = 6;

/// Left-pad a hex string with zeros to six digits, cutting longer input
pub fn zero_pad_hex(hex: &str) -> String {
    if hex.len() > HEX_NAME_LEN {
        log::warn!("hex color '{hex}' cut to {HEX_NAME_LEN} digits");
        return hex.chars().take(HEX_NAME_LEN).collect();
    }
    format!("{:0>width$}", hex, width = HEX_NAME_LEN)
}

/// Material name for a color
pub fn material_name(color: Color) -> String {
    zero_pad_hex(&format!("{:x}", color.to_hex()))
}

/// Encode voxels, in iteration order, as a [`Model3d`]
pub fn serialize<'a>(voxels: impl IntoIterator<Item = &'a Voxel>, format: &ModelFormat) -> Model3d {
    let mut obj = String::new();
    let mut mtl = String::new();
    let mut materials: Vec<Color> = Vec::new();

    for (i, voxel) in voxels.into_iter().enumerate() {
        let topology = topologize(voxel, (CUBE_VERTICES * i) as u32, format.half_extent);
        let name = material_name(topology.color);

        if !materials.contains(&topology.color) {
            let Color { r, g, b } = topology.color;
            // Writing into a String cannot fail
            let _ = write!(mtl, "newmtl {name}\nKd {r} {g} {b}\n\n");
            materials.push(topology.color);
        }

        let _ = writeln!(obj, "usemtl {name}");
        for v in topology.vertices {
            let _ = writeln!(obj, "v {} {} {}", v.x, v.y, v.z);
        }
        for [a, b, c, d] in topology.faces {
            let _ = writeln!(obj, "f {a} {b} {c} {d}");
        }
    }

    if !mtl.is_empty() {
        obj.insert_str(0, &format!("{MATERIAL_LIBRARY}\n"));
    }

    log::debug!("Serialized {} materials, {} bytes of geometry", materials.len(), obj.len());
    Model3d { obj, mtl }
}
