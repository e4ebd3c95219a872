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

//! Errors raised by settings parts and their field bindings.

use crate::part::PartId;
use control_room_core::HostError;
use thiserror::Error;

/// A convenience alias for part operations.
pub type PartResult<T> = Result<T, PartError>;

/// An error raised while reading, editing or applying a part's fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PartError {
    /// The part has no field with this key.
    #[error("Part '{part}' has no field '{key}'")]
    UnknownField {
        /// The part that was addressed.
        part: PartId,
        /// The unknown key.
        key: String,
    },
    /// The value is outside what the field accepts.
    #[error("Value {value} for '{key}' is outside [{min}, {max}]")]
    OutOfRange {
        /// The field key.
        key: String,
        /// The rejected value.
        value: f64,
        /// Lowest accepted value.
        min: f64,
        /// Highest accepted value.
        max: f64,
    },
    /// The input could not be read as a value of the field's kind.
    #[error("Invalid input '{input}' for '{key}'")]
    InvalidInput {
        /// The field key.
        key: String,
        /// The raw input.
        input: String,
    },
    /// The field is bound to a camera and no renderable camera is selected.
    #[error("No renderable camera is selected")]
    NoCamera,
    /// The camera is not a renderable camera of the scene.
    #[error("Unknown renderable camera '{0}'")]
    UnknownCamera(String),
    /// The choice is not one of the field's options.
    #[error("'{choice}' is not an option of '{key}'")]
    UnknownChoice {
        /// The field key.
        key: String,
        /// The rejected option.
        choice: String,
    },
    /// The field cannot be edited in the current state.
    #[error("Field '{0}' is disabled")]
    Disabled(String),
    /// The host rejected a read or write.
    #[error(transparent)]
    Host(#[from] HostError),
}
