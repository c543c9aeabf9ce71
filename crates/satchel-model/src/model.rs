// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::index::ObjectIndex;
use satchel_core::num::{to_f64, SolverNumeric};

/// Reasons a set of coefficients does not describe a valid knapsack instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// The instance has no objects.
    NoObjects,
    /// The capacity is negative, so not even the empty knapsack fits.
    NegativeCapacity,
    /// The value and volume vectors have different lengths.
    LengthMismatch { values: usize, volumes: usize },
    /// An object has a value of zero or less.
    NonPositiveValue(ObjectIndex),
    /// An object has a volume of zero or less.
    NonPositiveVolume(ObjectIndex),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoObjects => write!(f, "The model must contain at least one object"),
            Self::NegativeCapacity => write!(f, "The capacity must not be negative"),
            Self::LengthMismatch { values, volumes } => write!(
                f,
                "Got {} values but {} volumes; every object needs exactly one of each",
                values, volumes
            ),
            Self::NonPositiveValue(index) => {
                write!(f, "Object {} has a non-positive value", index.get())
            }
            Self::NonPositiveVolume(index) => {
                write!(f, "Object {} has a non-positive volume", index.get())
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// The immutable description of an unbounded knapsack instance.
///
/// - `capacity`: the right-hand side `C` of the single resource constraint.
/// - `values[i]`: the objective coefficient `v_i` of object `i`.
/// - `volumes[i]`: the resource coefficient `w_i` of object `i`.
///
/// Invariants (checked on construction):
/// - at least one object,
/// - `capacity >= 0`,
/// - `values[i] > 0` and `volumes[i] > 0` for every object.
///
/// Construction:
/// - `Model::new` from vectors, or `ModelBuilder` one object at a time.
#[derive(Clone, PartialEq, Eq)]
pub struct Model<T> {
    capacity: T,
    values: Vec<T>,  // len = num_objects
    volumes: Vec<T>, // len = num_objects
}

impl<T> Model<T>
where
    T: SolverNumeric,
{
    /// Creates a validated model.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use satchel_model::model::{Model, ModelError};
    ///
    /// let model = Model::new(14i64, vec![15, 12, 2, 8], vec![5, 3, 2, 4]).unwrap();
    /// assert_eq!(model.num_objects(), 4);
    ///
    /// let err = Model::new(-1i64, vec![1], vec![1]).unwrap_err();
    /// assert_eq!(err, ModelError::NegativeCapacity);
    /// ```
    pub fn new(capacity: T, values: Vec<T>, volumes: Vec<T>) -> Result<Self, ModelError> {
        if values.len() != volumes.len() {
            return Err(ModelError::LengthMismatch {
                values: values.len(),
                volumes: volumes.len(),
            });
        }
        if values.is_empty() {
            return Err(ModelError::NoObjects);
        }
        if capacity < T::zero() {
            return Err(ModelError::NegativeCapacity);
        }
        if let Some(i) = values.iter().position(|v| *v <= T::zero()) {
            return Err(ModelError::NonPositiveValue(ObjectIndex::new(i)));
        }
        if let Some(i) = volumes.iter().position(|w| *w <= T::zero()) {
            return Err(ModelError::NonPositiveVolume(ObjectIndex::new(i)));
        }

        Ok(Self {
            capacity,
            values,
            volumes,
        })
    }

    /// Returns the number of objects in the model.
    #[inline]
    pub fn num_objects(&self) -> usize {
        self.values.len()
    }

    /// Returns the capacity of the knapsack.
    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    /// Returns a slice of all object values.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns a slice of all object volumes.
    #[inline]
    pub fn volumes(&self) -> &[T] {
        &self.volumes
    }

    /// Returns the value of a single object.
    ///
    /// # Panics
    ///
    /// Panics if `object_index` is out of bounds.
    #[inline]
    pub fn object_value(&self, object_index: ObjectIndex) -> T {
        let index = object_index.get();
        debug_assert!(
            index < self.num_objects(),
            "called `Model::object_value` with object index out of bounds: the len is {} but the index is {}",
            self.num_objects(),
            index
        );

        self.values[index]
    }

    /// Returns the volume of a single object.
    ///
    /// # Panics
    ///
    /// Panics if `object_index` is out of bounds.
    #[inline]
    pub fn object_volume(&self, object_index: ObjectIndex) -> T {
        let index = object_index.get();
        debug_assert!(
            index < self.num_objects(),
            "called `Model::object_volume` with object index out of bounds: the len is {} but the index is {}",
            self.num_objects(),
            index
        );

        self.volumes[index]
    }

    /// Returns the value per unit of volume of a single object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use satchel_model::{index::ObjectIndex, model::Model};
    ///
    /// let model = Model::new(10i64, vec![15, 2], vec![5, 2]).unwrap();
    /// assert_eq!(model.object_density(ObjectIndex::new(0)), 3.0);
    /// assert_eq!(model.object_density(ObjectIndex::new(1)), 1.0);
    /// ```
    #[inline]
    pub fn object_density(&self, object_index: ObjectIndex) -> f64 {
        to_f64(self.object_value(object_index)) / to_f64(self.object_volume(object_index))
    }

    /// Returns `Σ values[i] * quantities[i]`, or `None` on overflow.
    ///
    /// # Panics
    ///
    /// Panics if `quantities` does not have one entry per object.
    pub fn objective_of(&self, quantities: &[T]) -> Option<T> {
        self.dot(&self.values, quantities, "objective_of")
    }

    /// Returns `Σ volumes[i] * quantities[i]`, or `None` on overflow.
    ///
    /// # Panics
    ///
    /// Panics if `quantities` does not have one entry per object.
    pub fn volume_of(&self, quantities: &[T]) -> Option<T> {
        self.dot(&self.volumes, quantities, "volume_of")
    }

    /// Returns `true` if `quantities` is a non-negative integer vector whose
    /// total volume fits into the knapsack.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use satchel_model::model::Model;
    ///
    /// let model = Model::new(14i64, vec![15, 12, 2, 8], vec![5, 3, 2, 4]).unwrap();
    /// assert!(model.is_feasible(&[1, 3, 0, 0]));
    /// assert!(!model.is_feasible(&[3, 0, 0, 0]));
    /// assert!(!model.is_feasible(&[-1, 0, 0, 0]));
    /// ```
    pub fn is_feasible(&self, quantities: &[T]) -> bool {
        if quantities.len() != self.num_objects() || quantities.iter().any(|q| *q < T::zero()) {
            return false;
        }

        matches!(self.volume_of(quantities), Some(volume) if volume <= self.capacity)
    }

    fn dot(&self, coefficients: &[T], quantities: &[T], caller: &str) -> Option<T> {
        assert_eq!(
            quantities.len(),
            self.num_objects(),
            "called `Model::{}` with {} quantities for {} objects",
            caller,
            quantities.len(),
            self.num_objects()
        );

        coefficients
            .iter()
            .zip(quantities)
            .try_fold(T::zero(), |acc, (&c, &q)| {
                acc.checked_add_val(c.checked_mul_val(q)?)
            })
    }
}

impl<T> std::fmt::Debug for Model<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("capacity", &self.capacity)
            .field("values", &self.values)
            .field("volumes", &self.volumes)
            .finish()
    }
}

impl<T> std::fmt::Display for Model<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(num_objects: {}, capacity: {})",
            self.num_objects(),
            self.capacity
        )
    }
}

/// A mutable builder for `Model`.
///
/// Every object starts with value `0` and volume `0`, which `build` rejects,
/// so each object must be given both coefficients explicitly.
///
/// # Examples
///
/// ```rust
/// # use satchel_model::{index::ObjectIndex, model::ModelBuilder};
///
/// let mut builder = ModelBuilder::<i64>::new(2, 10);
/// builder
///     .set_object_value(ObjectIndex::new(0), 6)
///     .set_object_volume(ObjectIndex::new(0), 2)
///     .set_object_value(ObjectIndex::new(1), 10)
///     .set_object_volume(ObjectIndex::new(1), 3);
/// let model = builder.build().unwrap();
/// assert_eq!(model.num_objects(), 2);
/// assert_eq!(model.capacity(), 10);
/// ```
#[derive(Clone, Debug)]
pub struct ModelBuilder<T> {
    capacity: T,
    values: Vec<T>,
    volumes: Vec<T>,
}

impl<T> ModelBuilder<T>
where
    T: SolverNumeric,
{
    /// Creates a builder for `num_objects` objects and the given capacity.
    pub fn new(num_objects: usize, capacity: T) -> Self {
        Self {
            capacity,
            values: vec![T::zero(); num_objects],
            volumes: vec![T::zero(); num_objects],
        }
    }

    /// Returns the number of objects of the model under construction.
    #[inline]
    pub fn num_objects(&self) -> usize {
        self.values.len()
    }

    /// Overrides the capacity.
    #[inline]
    pub fn set_capacity(&mut self, capacity: T) -> &mut Self {
        self.capacity = capacity;
        self
    }

    /// Sets the value of an object.
    ///
    /// # Panics
    ///
    /// Panics if `object_index` is out of bounds.
    #[inline]
    pub fn set_object_value(&mut self, object_index: ObjectIndex, value: T) -> &mut Self {
        let index = object_index.get();
        assert!(
            index < self.num_objects(),
            "called `ModelBuilder::set_object_value` with object index out of bounds: the len is {} but the index is {}",
            self.num_objects(),
            index
        );

        self.values[index] = value;
        self
    }

    /// Sets the volume of an object.
    ///
    /// # Panics
    ///
    /// Panics if `object_index` is out of bounds.
    #[inline]
    pub fn set_object_volume(&mut self, object_index: ObjectIndex, volume: T) -> &mut Self {
        let index = object_index.get();
        assert!(
            index < self.num_objects(),
            "called `ModelBuilder::set_object_volume` with object index out of bounds: the len is {} but the index is {}",
            self.num_objects(),
            index
        );

        self.volumes[index] = volume;
        self
    }

    /// Validates the collected coefficients and produces the model.
    pub fn build(self) -> Result<Model<T>, ModelError> {
        Model::new(self.capacity, self.values, self.volumes)
    }
}
