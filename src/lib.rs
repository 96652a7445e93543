//! Animated border and decorative effect engine.
//!
//! Effects are [`Component`](effects::Component)s mounted in a
//! [`Host`](host::Host). The host owns the only clock: it forwards tick
//! deltas, drains the invalidation queue and collects backend-neutral
//! [`DrawCommand`](paint::DrawCommand) lists that any canvas can replay.

pub mod animation;
pub mod effects;
pub mod geometry;
pub mod host;
pub mod jobs;
pub mod paint;
pub mod render;

// Software backend for previews and visual tests
#[cfg(feature = "raster")]
pub mod raster;

pub mod prelude {
    pub use crate::animation::{
        AnimationSpec, Parallel, ProgressDriver, ProgressValue, RepeatMode, Sequence, StepStatus,
        TimingFunction,
    };
    pub use crate::effects::{
        BorderConfig, CircleAnimation, CircleBorder, Component, CoolCircleBorder, CoolPhase,
        Flashlight, FlashlightConfig, Heart, HeartConfig, SquareAnimation, SquareBorder, Waves,
        WavesConfig, SAFE_START_ANGLE,
    };
    pub use crate::geometry::{compute_boundary, Point, Rect, ShapeBoundary, ShapeKind, Size};
    pub use crate::host::{Frame, Host, HostConfig, Layer};
    pub use crate::jobs::{ChangeFlags, ComponentId, Invalidator};
    pub use crate::paint::{Brush, ClipShape, Color, DrawCommand, Paint, StrokeCap, StrokeStyle};
    pub use crate::render::{render, render_with_track};
}
