use std::ops::{Add, AddAssign};

use glam::Vec3;

use crate::{Axis, Triangle};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn extent(&self) -> Vec3 {
        self.max() - self.min()
    }

    pub fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn grow_triangle(&mut self, triangle: &Triangle) {
        self.min = self.min.min(triangle.min());
        self.max = self.max.max(triangle.max());
    }

    /// Half of the surface area; `f32::MAX` for an empty box.
    pub fn half_area(&self) -> f32 {
        if !self.is_set() {
            return f32::MAX;
        }

        let extent = self.extent();

        extent.x * (extent.y + extent.z) + extent.y * extent.z
    }

    pub fn half_point(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the axis of greatest extent, preferring X over Y over Z.
    pub fn axis(&self) -> Axis {
        let extent = self.extent();

        if extent.x >= extent.y && extent.x >= extent.z {
            Axis::X
        } else if extent.y >= extent.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    pub fn is_set(&self) -> bool {
        self.min.x != Self::default().min.x
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(Vec3::MAX, Vec3::MIN)
    }
}

impl Add<Vec3> for BoundingBox {
    type Output = Self;

    fn add(mut self, rhs: Vec3) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Vec3> for BoundingBox {
    fn add_assign(&mut self, rhs: Vec3) {
        self.grow(rhs);
    }
}

impl Add<&Triangle> for BoundingBox {
    type Output = Self;

    fn add(mut self, rhs: &Triangle) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<&Triangle> for BoundingBox {
    fn add_assign(&mut self, rhs: &Triangle) {
        self.grow_triangle(rhs);
    }
}

impl Add<Self> for BoundingBox {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Self> for BoundingBox {
    fn add_assign(&mut self, rhs: Self) {
        if rhs.is_set() {
            *self += rhs.min;
            *self += rhs.max;
        }
    }
}

impl<'a> FromIterator<&'a Triangle> for BoundingBox {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = &'a Triangle>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}
