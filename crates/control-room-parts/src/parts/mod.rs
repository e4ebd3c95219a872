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

//! The concrete settings parts, one per section of the dialog.

mod adaptive_sampling;
mod camera;
mod dof;
mod feature_overrides;
mod image_size;
mod motion_blur;
mod sampling;

pub use self::adaptive_sampling::AdaptiveSamplingPart;
pub use self::camera::{renderable_cameras, CameraPart, CAMERA_FIELD};
pub use self::dof::{DepthOfFieldPart, DEPTH_OF_FIELD, F_STOP};
pub use self::feature_overrides::{aov_counts, aovs_ignored, FeatureOverridesPart, IGNORE_AOVS};
pub use self::image_size::{
    match_aspect_ratio, AspectRatio, Format, ImageSizePart, ASPECT_RATIOS, RATIO_TOLERANCE,
};
pub use self::motion_blur::MotionBlurPart;
pub use self::sampling::SamplingPart;
