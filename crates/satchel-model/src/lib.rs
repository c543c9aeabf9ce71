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

//! # Satchel Model
//!
//! **The domain model of the unbounded knapsack problem.**
//!
//! This crate is the data interchange layer between problem definitions (files,
//! tests, callers) and the search engine in `satchel_bnb`.
//!
//! * **`index`**: `ObjectIndex`, the strongly typed index of an object in its
//!   original (input) order.
//! * **`model`**: The immutable `Model` and the mutable `ModelBuilder`.
//! * **`solution`**: Quantities per object plus the objective value.
//! * **`loading`**: A loader for the whitespace-separated text format.
//!
//! Builders and constructors validate eagerly, so the solver never sees an
//! instance with no objects, a negative capacity or non-positive coefficients.

pub mod index;
pub mod loading;
pub mod model;
pub mod solution;
