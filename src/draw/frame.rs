//! Retained collection of committed shapes.

use super::shape::Shape;

/// All shapes committed during the current activation, in draw order.
///
/// Acts as the overlay's source of truth for what is on the surface; removing
/// a shape from here does not touch the surface, callers detach the
/// renderable themselves.
#[derive(Debug, Clone, Default)]
pub struct ShapeCollection {
    shapes: Vec<Shape>,
}

impl ShapeCollection {
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Attempts to add a shape, enforcing a maximum shape count when `max` > 0.
    ///
    /// Returns the shape back if the limit would be exceeded.
    pub fn try_push(&mut self, shape: Shape, max: usize) -> Result<(), Shape> {
        if max == 0 || self.shapes.len() < max {
            self.shapes.push(shape);
            Ok(())
        } else {
            Err(shape)
        }
    }

    /// Removes the shape with the given id (linear lookup).
    pub fn remove(&mut self, id: &str) -> Option<Shape> {
        let index = self.shapes.iter().position(|shape| shape.id == id)?;
        Some(self.shapes.remove(index))
    }

    /// Empties the collection, returning everything it held.
    pub fn drain(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.shapes)
    }

    /// Copy of the current contents; mutating it never affects the collection.
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
