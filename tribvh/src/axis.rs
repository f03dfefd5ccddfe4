use std::ops::{Index, IndexMut};

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Returns all axes in the order the split selector scans them.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::X, Self::Y, Self::Z].into_iter()
    }
}

impl Index<Axis> for Vec3 {
    type Output = f32;

    fn index(&self, index: Axis) -> &Self::Output {
        match index {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl IndexMut<Axis> for Vec3 {
    fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
        match index {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn indexing() {
        let mut v = vec3(1.0, 2.0, 3.0);

        assert_eq!(1.0, v[Axis::X]);
        assert_eq!(2.0, v[Axis::Y]);
        assert_eq!(3.0, v[Axis::Z]);

        v[Axis::Y] = 20.0;

        assert_eq!(vec3(1.0, 20.0, 3.0), v);
    }

    #[test]
    fn order() {
        assert_eq!(
            vec![Axis::X, Axis::Y, Axis::Z],
            Axis::all().collect::<Vec<_>>()
        );
    }
}
