use core::ops::{Add, Sub, Mul, Div, Index, IndexMut};




/**
 * A statically-sized 3-component numeric vector over a generic scalar data
 * type T, which supports arithmetic operations also supported by T. The
 * dimensionality is fixed at 3, so all axis logic is monomorphized with no
 * runtime dispatch.
 */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Vector3<T> {
    data: [T; 3]
}




/// A 3-vector of f64 world-space components
pub type Vec3 = Vector3<f64>;




/// A 3-vector of signed integer grid indexes
pub type IVec3 = Vector3<i64>;




// ============================================================================
impl<T> Vector3<T> {

    pub fn new(x: T, y: T, z: T) -> Self {
        Self { data: [x, y, z] }
    }
}

impl<T: Copy> Vector3<T> {

    /**
     * Component-wise product with another vector.
     */
    pub fn mul_cw<U, V>(self, other: Vector3<U>) -> Vector3<V>
    where
        T: Mul<U, Output = V>,
        U: Copy,
        V: Copy + Default
    {
        let mut data = [V::default(); 3];

        for (i, x) in data.iter_mut().enumerate() {
            *x = self[i].mul(other[i])
        }
        Vector3 { data }
    }

    /**
     * Component-wise quotient with another vector.
     */
    pub fn div_cw<U, V>(self, other: Vector3<U>) -> Vector3<V>
    where
        T: Div<U, Output = V>,
        U: Copy,
        V: Copy + Default
    {
        let mut data = [V::default(); 3];

        for (i, x) in data.iter_mut().enumerate() {
            *x = self[i].div(other[i])
        }
        Vector3 { data }
    }
}




// ============================================================================
impl<T, U, V> Add<Vector3<U>> for Vector3<T>
where
    T: Copy + Add<U, Output = V>,
    U: Copy,
    V: Copy + Default
{
    type Output = Vector3<V>;

    fn add(self, other: Vector3<U>) -> Self::Output {
        let mut data = [V::default(); 3];

        for (i, x) in data.iter_mut().enumerate() {
            *x = self[i].add(other[i])
        }
        Self::Output { data }
    }
}

impl<T, U, V> Sub<Vector3<U>> for Vector3<T>
where
    T: Copy + Sub<U, Output = V>,
    U: Copy,
    V: Copy + Default
{
    type Output = Vector3<V>;

    fn sub(self, other: Vector3<U>) -> Self::Output {
        let mut data = [V::default(); 3];

        for (i, x) in data.iter_mut().enumerate() {
            *x = self[i].sub(other[i])
        }
        Self::Output { data }
    }
}

impl<T, U, V> Mul<U> for Vector3<T>
where
    T: Copy + Mul<U, Output = V>,
    U: Copy,
    V: Copy + Default
{
    type Output = Vector3<V>;

    fn mul(self, other: U) -> Self::Output {
        let mut data = [V::default(); 3];

        for (i, x) in data.iter_mut().enumerate() {
            *x = self[i].mul(other)
        }
        Self::Output { data }
    }
}

impl<T, U, V> Div<U> for Vector3<T>
where
    T: Copy + Div<U, Output = V>,
    U: Copy,
    V: Copy + Default
{
    type Output = Vector3<V>;

    fn div(self, other: U) -> Self::Output {
        let mut data = [V::default(); 3];

        for (i, x) in data.iter_mut().enumerate() {
            *x = self[i].div(other)
        }
        Self::Output { data }
    }
}




// ============================================================================
impl<T> Index<usize> for Vector3<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector3<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl From<IVec3> for Vec3 {
    fn from(v: IVec3) -> Self {
        Self::new(v[0] as f64, v[1] as f64, v[2] as f64)
    }
}




// ============================================================================
impl Vec3 {

    pub fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn dot(self, other: Self) -> f64 {
        self[0] * other[0] + self[1] * other[1] + self[2] * other[2]
    }

    pub fn squared_length(self) -> f64 {
        self.dot(self)
    }

    pub fn min_component(self) -> f64 {
        self[0].min(self[1]).min(self[2])
    }
}




/**
 * A 3x3 matrix stored as three column vectors. Only the constructions
 * required by a rectilinear geometry are provided: diagonal matrixes and
 * explicit columns.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3 {
    cols: [Vec3; 3]
}




// ============================================================================
impl Matrix3 {

    pub fn diagonal(d: Vec3) -> Self {
        Self {
            cols: [
                Vec3::new(d[0], 0.0, 0.0),
                Vec3::new(0.0, d[1], 0.0),
                Vec3::new(0.0, 0.0, d[2]),
            ]
        }
    }

    pub fn from_columns(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    pub fn column(&self, j: usize) -> Vec3 {
        self.cols[j]
    }

    /**
     * Apply this matrix to a vector.
     */
    pub fn dot_vec(&self, v: Vec3) -> Vec3 {
        self.cols[0] * v[0] + self.cols[1] * v[1] + self.cols[2] * v[2]
    }
}




/**
 * A 3x2 matrix stored as two column vectors: the deformation gradient of a
 * 2D element embedded in 3D space.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3x2 {
    cols: [Vec3; 2]
}




// ============================================================================
impl Matrix3x2 {

    pub fn from_columns(c0: Vec3, c1: Vec3) -> Self {
        Self { cols: [c0, c1] }
    }

    pub fn column(&self, j: usize) -> Vec3 {
        self.cols[j]
    }

    pub fn dot_vec(&self, v: (f64, f64)) -> Vec3 {
        self.cols[0] * v.0 + self.cols[1] * v.1
    }
}
