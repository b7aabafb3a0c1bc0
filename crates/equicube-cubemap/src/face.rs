//! The six skybox faces and their fixed build/correction metadata.

use std::fmt;
use std::str::FromStr;

use crate::{CubemapError, DirectionKind};

/// The six faces of a skybox cubemap, named the way skybox assets name them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SkyboxFace {
    /// `SkyboxBk`
    Back = 0,
    /// `SkyboxDn`
    Down = 1,
    /// `SkyboxFt`
    Front = 2,
    /// `SkyboxLf`
    Left = 3,
    /// `SkyboxRt`
    Right = 4,
    /// `SkyboxUp`
    Up = 5,
}

/// An extra quarter-turn applied after the 180° rotation and the mirror.
///
/// Angles follow the usual image-editing convention: positive is
/// counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuarterTurn {
    /// +90°.
    CounterClockwise,
    /// −90°.
    Clockwise,
}

impl QuarterTurn {
    /// Signed angle in degrees.
    #[must_use]
    pub fn degrees(self) -> i32 {
        match self {
            QuarterTurn::CounterClockwise => 90,
            QuarterTurn::Clockwise => -90,
        }
    }
}

/// Static metadata describing how one face is built and corrected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceSpec {
    /// Face identity.
    pub face: SkyboxFace,
    /// File-name prefix, e.g. `SkyboxBk`.
    pub code: &'static str,
    /// Which direction formula generates this face's view directions.
    pub direction: DirectionKind,
    /// Rotation applied last, if any.
    pub extra_rotation: Option<QuarterTurn>,
    /// Whether the face is mirrored horizontally after the 180° rotation.
    pub mirror: bool,
}

/// The six faces in emission order.
pub static FACE_SPECS: [FaceSpec; 6] = [
    FaceSpec {
        face: SkyboxFace::Back,
        code: "SkyboxBk",
        direction: DirectionKind::Back,
        extra_rotation: None,
        mirror: false,
    },
    FaceSpec {
        face: SkyboxFace::Down,
        code: "SkyboxDn",
        direction: DirectionKind::Bottom,
        extra_rotation: Some(QuarterTurn::Clockwise),
        mirror: false,
    },
    FaceSpec {
        face: SkyboxFace::Front,
        code: "SkyboxFt",
        direction: DirectionKind::Front,
        extra_rotation: None,
        mirror: false,
    },
    FaceSpec {
        face: SkyboxFace::Left,
        code: "SkyboxLf",
        direction: DirectionKind::Left,
        extra_rotation: None,
        mirror: true,
    },
    FaceSpec {
        face: SkyboxFace::Right,
        code: "SkyboxRt",
        direction: DirectionKind::Right,
        extra_rotation: None,
        mirror: true,
    },
    FaceSpec {
        face: SkyboxFace::Up,
        code: "SkyboxUp",
        direction: DirectionKind::Top,
        extra_rotation: Some(QuarterTurn::CounterClockwise),
        mirror: false,
    },
];

impl SkyboxFace {
    /// All six faces in emission order.
    pub const ALL: [SkyboxFace; 6] = [
        SkyboxFace::Back,
        SkyboxFace::Down,
        SkyboxFace::Front,
        SkyboxFace::Left,
        SkyboxFace::Right,
        SkyboxFace::Up,
    ];

    /// The fixed [`FaceSpec`] for this face.
    #[must_use]
    pub fn spec(self) -> &'static FaceSpec {
        &FACE_SPECS[self as usize]
    }

    /// File-name prefix for this face.
    #[must_use]
    pub fn code(self) -> &'static str {
        self.spec().code
    }

    /// Look up a face by its file-name prefix (`SkyboxBk`, ...).
    pub fn from_code(code: &str) -> Result<Self, CubemapError> {
        FACE_SPECS
            .iter()
            .find(|spec| spec.code == code)
            .map(|spec| spec.face)
            .ok_or_else(|| CubemapError::UnknownFace(code.to_string()))
    }

    /// File name of this face for an input whose stem is `base_name`.
    #[must_use]
    pub fn file_name(self, base_name: &str) -> String {
        format!("{}_{base_name}.png", self.code())
    }
}

impl fmt::Display for SkyboxFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SkyboxFace {
    type Err = CubemapError;

    /// Accepts either the face code (`SkyboxUp`) or the lowercase face name (`up`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "back" => Ok(SkyboxFace::Back),
            "down" => Ok(SkyboxFace::Down),
            "front" => Ok(SkyboxFace::Front),
            "left" => Ok(SkyboxFace::Left),
            "right" => Ok(SkyboxFace::Right),
            "up" => Ok(SkyboxFace::Up),
            _ => SkyboxFace::from_code(s),
        }
    }
}
