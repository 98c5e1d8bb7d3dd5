//! Occupancy grid of editable voxels

use std::collections::HashMap;

use crate::core::error::Error;
use crate::core::types::{IVec3, Result, Vec3};
use crate::math::lattice;
use super::color::Color;
use super::voxel::{Voxel, VoxelId};

/// Voxels in insertion order, with at most one voxel per lattice cell
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    voxel_size: f32,
    /// Largest allowed center coordinate magnitude on any axis
    max_coordinate: f32,
    voxels: Vec<Voxel>,
    /// Cell -> occupant
    cells: HashMap<IVec3, VoxelId>,
    next_id: u64,
}

impl VoxelGrid {
    /// Create an empty grid with lattice pitch `voxel_size`
    pub fn new(voxel_size: f32) -> Self {
        Self {
            voxel_size,
            max_coordinate: f32::INFINITY,
            voxels: Vec::new(),
            cells: HashMap::new(),
            next_id: 1,
        }
    }

    /// Limit voxel centers to `[-max_coordinate, max_coordinate]` on every axis
    pub fn with_max_coordinate(mut self, max_coordinate: f32) -> Self {
        self.max_coordinate = max_coordinate;
        self
    }

    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    pub fn max_coordinate(&self) -> f32 {
        self.max_coordinate
    }

    /// Add a voxel centered at `position`.
    ///
    /// Fails with [`Error::OffLattice`] unless `position` is a cell center,
    /// with [`Error::OutOfBounds`] past the coordinate limit, and with
    /// [`Error::CellOccupied`] if the cell already holds a voxel.
    pub fn insert(&mut self, position: Vec3, color: Color) -> Result<VoxelId> {
        if !position.is_finite() || !lattice::is_cell_center(position, self.voxel_size) {
            return Err(Error::OffLattice(position));
        }

        let cell = lattice::cell_of(position, self.voxel_size);
        let center = lattice::cell_center(cell, self.voxel_size);
        if center.abs().max_element() > self.max_coordinate {
            return Err(Error::OutOfBounds {
                position: center,
                max: self.max_coordinate,
            });
        }

        if self.cells.contains_key(&cell) {
            return Err(Error::CellOccupied(cell));
        }

        let id = VoxelId(self.next_id);
        self.next_id += 1;

        self.voxels.push(Voxel {
            id,
            // Store the exact center so exports never carry float noise
            position: center,
            color,
        });
        self.cells.insert(cell, id);
        Ok(id)
    }

    /// Remove a voxel by id, returning it if it was present
    pub fn remove(&mut self, id: VoxelId) -> Option<Voxel> {
        let index = self.voxels.iter().position(|v| v.id == id)?;
        let voxel = self.voxels.remove(index);
        self.cells.remove(&lattice::cell_of(voxel.position, self.voxel_size));
        Some(voxel)
    }

    /// Remove whatever voxel occupies the cell containing `position`
    pub fn remove_at(&mut self, position: Vec3) -> Option<Voxel> {
        let id = self.at(position)?.id;
        self.remove(id)
    }

    pub fn get(&self, id: VoxelId) -> Option<&Voxel> {
        self.voxels.iter().find(|v| v.id == id)
    }

    /// Voxel occupying the cell containing `position`
    pub fn at(&self, position: Vec3) -> Option<&Voxel> {
        let cell = lattice::cell_of(position, self.voxel_size);
        let id = *self.cells.get(&cell)?;
        self.get(id)
    }

    /// Voxels in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Voxel> {
        self.voxels.iter()
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new(50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut grid = VoxelGrid::default();
        let id = grid.insert(Vec3::new(25.0, 25.0, 25.0), Color::WHITE).unwrap();

        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(id).unwrap().position, Vec3::new(25.0, 25.0, 25.0));
        // Any point inside the cell resolves to the occupant
        assert_eq!(grid.at(Vec3::new(10.0, 40.0, 1.0)).unwrap().id, id);
    }

    #[test]
    fn test_rejects_occupied_cell() {
        let mut grid = VoxelGrid::default();
        grid.insert(Vec3::splat(25.0), Color::WHITE).unwrap();

        let result = grid.insert(Vec3::splat(25.0), Color::BLACK);
        assert!(matches!(result, Err(Error::CellOccupied(cell)) if cell == IVec3::ZERO));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_rejects_off_lattice() {
        let mut grid = VoxelGrid::default();
        assert!(matches!(
            grid.insert(Vec3::new(0.0, 25.0, 25.0), Color::WHITE),
            Err(Error::OffLattice(_))
        ));
        assert!(matches!(
            grid.insert(Vec3::new(f32::NAN, 25.0, 25.0), Color::WHITE),
            Err(Error::OffLattice(_))
        ));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_rejects_centers_past_limit() {
        let mut grid = VoxelGrid::default().with_max_coordinate(2500.0);
        assert!(grid.insert(Vec3::new(2475.0, 25.0, -2475.0), Color::WHITE).is_ok());

        let result = grid.insert(Vec3::new(25.0, 2525.0, 25.0), Color::WHITE);
        assert!(matches!(
            result,
            Err(Error::OutOfBounds { position, max }) if position.y == 2525.0 && max == 2500.0
        ));
        assert!(matches!(
            grid.insert(Vec3::new(-2525.0, 25.0, 25.0), Color::WHITE),
            Err(Error::OutOfBounds { .. })
        ));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order_and_frees_cell() {
        let mut grid = VoxelGrid::default();
        let a = grid.insert(Vec3::new(25.0, 25.0, 25.0), Color::WHITE).unwrap();
        let b = grid.insert(Vec3::new(75.0, 25.0, 25.0), Color::BLACK).unwrap();
        let c = grid.insert(Vec3::new(125.0, 25.0, 25.0), Color::WHITE).unwrap();

        let removed = grid.remove(b).unwrap();
        assert_eq!(removed.color, Color::BLACK);
        assert!(grid.remove(b).is_none());

        let order: Vec<_> = grid.iter().map(|v| v.id).collect();
        assert_eq!(order, vec![a, c]);

        // Freed cell accepts a new voxel with a fresh id
        let d = grid.insert(Vec3::new(75.0, 25.0, 25.0), Color::WHITE).unwrap();
        assert_ne!(d, b);
    }

    #[test]
    fn test_remove_at() {
        let mut grid = VoxelGrid::default();
        grid.insert(Vec3::new(-25.0, 75.0, 25.0), Color::WHITE).unwrap();
        assert!(grid.remove_at(Vec3::new(-25.0, 25.0, 25.0)).is_none());
        assert!(grid.remove_at(Vec3::new(-25.0, 75.0, 25.0)).is_some());
        assert!(grid.is_empty());
    }
}
