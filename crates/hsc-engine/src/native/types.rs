use std::fmt;

use winit::window::WindowId;

/// Opaque identity of one live OS drawing surface.
///
/// Supplied by the windowing layer. The identity may be recycled for an
/// unrelated surface once the previous one has been reported lost.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SurfaceId(pub u64);

impl From<WindowId> for SurfaceId {
    fn from(id: WindowId) -> Self {
        Self(u64::from(id))
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Platform pixel-format code as delivered by the windowing layer.
///
/// The named constants follow the Android `PixelFormat` / `AHardwareBuffer`
/// numbering. Codes without a constant are carried through untouched; the
/// backend decides what to do with them.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct PixelFormat(pub i32);

impl PixelFormat {
    pub const RGBA_8888: Self = Self(1);
    pub const RGBX_8888: Self = Self(2);
    pub const RGB_888: Self = Self(3);
    pub const RGB_565: Self = Self(4);
    pub const RGBA_FP16: Self = Self(0x16);
    pub const RGBA_1010102: Self = Self(0x2b);

    /// Returns the well-known name of this code, if it has one.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::RGBA_8888 => "RGBA_8888",
            Self::RGBX_8888 => "RGBX_8888",
            Self::RGB_888 => "RGB_888",
            Self::RGB_565 => "RGB_565",
            Self::RGBA_FP16 => "RGBA_FP16",
            Self::RGBA_1010102 => "RGBA_1010102",
            _ => return None,
        };
        Some(name)
    }

    /// Raw platform code.
    pub fn code(self) -> i32 {
        self.0
    }
}

impl fmt::Debug for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "PixelFormat({:#x})", self.0),
        }
    }
}

impl From<i32> for PixelFormat {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

/// Complete geometry of a surface control.
///
/// Always passed as a whole; an update never merges with the previous value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Geometry {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Self {
        Self { format, width, height }
    }
}
