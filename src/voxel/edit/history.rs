//! Linear undo history of voxel edits

use crate::core::types::Vec3;
use crate::voxel::color::Color;

/// One reversible edit
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// A voxel was placed
    Addition { position: Vec3, color: Color },
    /// A voxel was deleted
    Removal { position: Vec3, color: Color },
}

impl Step {
    pub fn position(&self) -> Vec3 {
        match self {
            Step::Addition { position, .. } | Step::Removal { position, .. } => *position,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Step::Addition { color, .. } | Step::Removal { color, .. } => *color,
        }
    }

    /// The step that undoes this one
    pub fn inverse(&self) -> Step {
        match *self {
            Step::Addition { position, color } => Step::Removal { position, color },
            Step::Removal { position, color } => Step::Addition { position, color },
        }
    }
}

/// LIFO stack of edit steps
#[derive(Clone, Debug, Default)]
pub struct EditHistory {
    steps: Vec<Step>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Take the most recent step
    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Drop every step recorded after the first `len`
    pub fn truncate(&mut self, len: usize) {
        self.steps.truncate(len);
    }

    /// Steps, oldest first
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(x: f32) -> Step {
        Step::Addition {
            position: Vec3::new(x, 25.0, 25.0),
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_push_pop_lifo() {
        let mut history = EditHistory::new();
        history.push(add(25.0));
        history.push(add(75.0));

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(add(75.0)));
        assert_eq!(history.pop(), Some(add(25.0)));
        assert!(history.pop().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_truncate() {
        let mut history = EditHistory::new();
        for x in [25.0, 75.0, 125.0] {
            history.push(add(x));
        }
        history.truncate(1);
        assert_eq!(history.steps(), &[add(25.0)]);
        assert_eq!(history.last(), Some(&add(25.0)));
    }

    #[test]
    fn test_inverse() {
        let step = add(25.0);
        let inverse = step.inverse();
        assert!(matches!(inverse, Step::Removal { .. }));
        assert_eq!(inverse.position(), step.position());
        assert_eq!(inverse.color(), step.color());
        assert_eq!(inverse.inverse(), step);
    }
}
