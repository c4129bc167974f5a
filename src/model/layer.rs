use crate::animation::anim::Animatable;
use crate::foundation::core::{Color, Vec2};
use crate::model::shape::{PathGeometry, ShapeItem};
use serde::{Deserialize, Serialize};

/// One entry of a layer list. Frames are on the owning composition's timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Identifier unique within the owning layer list; `parent` refers to it.
    pub index: i64,
    /// Index of the layer whose transform this one inherits.
    #[serde(default)]
    pub parent: Option<i64>,
    /// First visible frame.
    pub in_point: f64,
    /// Frame at which the layer stops being visible.
    pub out_point: f64,
    /// Frame of the owning timeline at which local frame zero plays.
    #[serde(default)]
    pub start_time: f64,
    /// Local frames advance at `1 / time_stretch` of the owning rate.
    #[serde(default = "default_time_stretch")]
    pub time_stretch: f64,
    /// Never drawn.
    #[serde(default)]
    pub hidden: bool,
    /// Flagged as 3D; reported and rendered flat.
    #[serde(default)]
    pub is_3d: bool,
    /// How the layer composites over what lies beneath.
    #[serde(default)]
    pub blend_mode: BlendMode,
    /// Placement, on the layer's local timeline.
    #[serde(default)]
    pub transform: Transform,
    /// Masks, applied in order.
    #[serde(default)]
    pub masks: Vec<Mask>,
    /// Use the layer above as a matte of this kind.
    #[serde(default)]
    pub matte: Option<MatteType>,
    /// Effects, applied in order.
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// Kind-specific payload.
    #[serde(flatten)]
    pub kind: LayerKind,
}

fn default_time_stretch() -> f64 {
    1.0
}

/// Layer payload, tagged by `"type"`. An unknown tag is a document error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerKind {
    /// Instance of a precomp asset, clipped to `width` x `height`.
    PreComp {
        /// Id of the precomp asset.
        ref_id: String,
        /// Clip width.
        width: f64,
        /// Clip height.
        height: f64,
    },
    /// A filled rectangle at the origin.
    Solid {
        /// Fill color.
        color: Color,
        /// Rectangle width.
        width: f64,
        /// Rectangle height.
        height: f64,
    },
    /// Instance of an image asset.
    Image {
        /// Id of the image asset.
        ref_id: String,
    },
    /// Draws nothing; exists to be parented to.
    Null,
    /// Vector shapes.
    Shape {
        /// Shape items, top first.
        shapes: Vec<ShapeItem>,
    },
    /// Text; reported and not translated.
    Text {
        /// Source text.
        #[serde(default)]
        text: String,
    },
}

impl LayerKind {
    /// The `"type"` tag of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::PreComp { .. } => "pre_comp",
            Self::Solid { .. } => "solid",
            Self::Image { .. } => "image",
            Self::Null => "null",
            Self::Shape { .. } => "shape",
            Self::Text { .. } => "text",
        }
    }
}

/// Layer or shape-group transform. Opacity is a percentage; scale is a per-axis percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Point of the content placed at `position`; also the rotation and scale pivot.
    #[serde(default = "zero_vec2")]
    pub anchor: Animatable<Vec2>,
    /// Offset in the parent frame.
    #[serde(default = "zero_vec2")]
    pub position: Animatable<Vec2>,
    /// Clockwise degrees.
    #[serde(default = "zero_f64")]
    pub rotation: Animatable<f64>,
    /// Percent per axis.
    #[serde(default = "identity_scale")]
    pub scale: Animatable<Vec2>,
    /// Percent.
    #[serde(default = "full_opacity")]
    pub opacity: Animatable<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            anchor: zero_vec2(),
            position: zero_vec2(),
            rotation: zero_f64(),
            scale: identity_scale(),
            opacity: full_opacity(),
        }
    }
}

fn zero_vec2() -> Animatable<Vec2> {
    Animatable::constant(Vec2::ZERO)
}

fn zero_f64() -> Animatable<f64> {
    Animatable::constant(0.0)
}

fn identity_scale() -> Animatable<Vec2> {
    Animatable::constant(Vec2::new(100.0, 100.0))
}

fn full_opacity() -> Animatable<f64> {
    Animatable::constant(100.0)
}

/// Layer compositing mode. Everything but `Normal` is reported as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source over.
    #[default]
    Normal,
    /// Multiply.
    Multiply,
    /// Screen.
    Screen,
    /// Overlay.
    Overlay,
    /// Darken.
    Darken,
    /// Lighten.
    Lighten,
    /// Color dodge.
    ColorDodge,
    /// Color burn.
    ColorBurn,
    /// Hard light.
    HardLight,
    /// Soft light.
    SoftLight,
    /// Difference.
    Difference,
    /// Exclusion.
    Exclusion,
    /// Hue.
    Hue,
    /// Saturation.
    Saturation,
    /// Color.
    Color,
    /// Luminosity.
    Luminosity,
    /// Additive.
    Add,
    /// Hard mix.
    HardMix,
}

/// How a layer uses the layer above it as a track matte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatteType {
    /// Keep where the matte is opaque.
    Alpha,
    /// Keep where the matte is transparent.
    AlphaInverted,
    /// Keep where the matte is bright.
    Luma,
    /// Keep where the matte is dark.
    LumaInverted,
}

/// How a mask combines with the masks before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskMode {
    /// Union.
    #[default]
    Add,
    /// Cut out.
    Subtract,
    /// Intersection.
    Intersect,
    /// Maximum coverage.
    Lighten,
    /// Minimum coverage.
    Darken,
    /// Exclusive or.
    Difference,
    /// Ignored.
    None,
}

/// A layer mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mask {
    /// Combination with earlier masks.
    #[serde(default)]
    pub mode: MaskMode,
    /// Outline in layer space.
    pub path: Animatable<PathGeometry>,
    /// Percent.
    #[serde(default = "full_opacity")]
    pub opacity: Animatable<f64>,
    /// Keep the outside instead of the inside.
    #[serde(default)]
    pub inverted: bool,
}

/// A layer effect, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Gaussian blur.
    GaussianBlur {
        /// Blur radius in pixels.
        blurriness: Animatable<f64>,
    },
    /// Drop shadow.
    DropShadow {
        /// Shadow color.
        color: Animatable<Color>,
        /// Percent.
        #[serde(default = "full_opacity")]
        opacity: Animatable<f64>,
        /// Degrees.
        #[serde(default = "zero_f64")]
        direction: Animatable<f64>,
        /// Pixels.
        #[serde(default = "zero_f64")]
        distance: Animatable<f64>,
        /// Blur radius in pixels.
        #[serde(default = "zero_f64")]
        softness: Animatable<f64>,
    },
    /// Any other effect, kept by name.
    Unsupported {
        /// Effect name.
        #[serde(default)]
        name: String,
    },
}
