// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the error types of the shader lifecycle engine.
//!
//! Ordinary compile, link and validation failures are not errors in the Rust
//! sense: drivers report them as unsuccessful [`StepReport`]s and the program
//! records them as [`BuildIssue`]s. [`DriverError`] is reserved for a driver that
//! malfunctions, which the program treats as a fault.
//!
//! [`StepReport`]: crate::driver::StepReport

use crate::program::ShaderStage;
use crate::uniform::UniformType;
use thiserror::Error;

/// A low-level malfunction reported by a [`ShaderDriver`](crate::driver::ShaderDriver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The driver could not allocate a program or stage object.
    #[error("failed to create driver object: {0}")]
    ObjectCreation(String),
    /// A handle passed to the driver does not name a live object.
    #[error("invalid driver handle: {0}")]
    InvalidHandle(String),
    /// The graphics context is gone.
    #[error("the graphics context was lost")]
    ContextLost,
    /// Any other failure inside the driver.
    #[error("internal driver error: {0}")]
    Internal(String),
}

/// One problem encountered while building a program.
///
/// A failed attempt may carry several issues, e.g. one per stage that did not
/// compile. Only [`BuildIssue::DriverFault`] moves the program into the
/// faulted state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildIssue {
    /// A single stage failed to compile.
    #[error("{stage} failed to compile")]
    StageCompile {
        /// The stage that failed.
        stage: ShaderStage,
        /// The compiler diagnostic.
        log: String,
    },
    /// All stages compiled but the link step failed.
    #[error("program failed to link")]
    Link {
        /// The linker diagnostic.
        log: String,
    },
    /// Validation reported a problem. This never fails the attempt on its own.
    #[error("program validation reported a problem")]
    Validate {
        /// The validator diagnostic.
        log: String,
    },
    /// The driver malfunctioned, either by returning an error or by panicking.
    #[error("driver fault: {message}")]
    DriverFault {
        /// A description of the fault.
        message: String,
    },
}

impl BuildIssue {
    /// Returns `true` if this issue makes the attempt fail.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BuildIssue::Validate { .. })
    }
}

/// Misuse of the matrix column API of [`UniformValue`](crate::uniform::UniformValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UniformError {
    /// Column access on a uniform that is not a matrix.
    #[error("uniform is not a matrix")]
    NotAMatrix,
    /// The column index is past the last column.
    #[error("column {column} is out of range for a matrix with {columns} columns")]
    ColumnOutOfRange {
        /// The requested column.
        column: usize,
        /// The number of columns of the matrix.
        columns: usize,
    },
    /// The supplied vector does not have the column type of the matrix.
    #[error("expected a {expected} column, found {found}")]
    ColumnTypeMismatch {
        /// The column type of the matrix.
        expected: UniformType,
        /// The type of the supplied value.
        found: UniformType,
    },
}
