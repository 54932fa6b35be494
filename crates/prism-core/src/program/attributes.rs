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

/// Locations of the custom vertex attributes a scene renderer feeds.
///
/// `None` means the linked program has no active attribute of that name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttribLocations {
    /// The tangent attribute.
    pub tangent: Option<u32>,
    /// The bitangent attribute.
    pub bitangent: Option<u32>,
}

impl AttribLocations {
    /// Returns `true` if neither attribute is present.
    pub fn is_empty(&self) -> bool {
        self.tangent.is_none() && self.bitangent.is_none()
    }
}
