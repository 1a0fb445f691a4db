use crate::native::PixelFormat;

use super::SurfaceErrorAction;

/// Texture format that best matches a platform pixel-format code.
pub(crate) fn texture_format_for(
    format: PixelFormat,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    match format {
        PixelFormat::RGBA_8888 | PixelFormat::RGBX_8888 => Some(if prefer_srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        }),
        PixelFormat::RGBA_FP16 => Some(wgpu::TextureFormat::Rgba16Float),
        PixelFormat::RGBA_1010102 => Some(wgpu::TextureFormat::Rgb10a2Unorm),
        _ => None,
    }
}

/// Picks the surface format for `requested`.
///
/// Uses the direct mapping when the surface supports it, otherwise the
/// surface's own preference (sRGB first when asked for).
pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    requested: PixelFormat,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    if let Some(f) = texture_format_for(requested, prefer_srgb).filter(|f| caps.formats.contains(f)) {
        return Some(f);
    }

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        for f in preferred {
            if caps.formats.contains(&f) {
                return Some(f);
            }
        }
    }

    Some(caps.formats[0])
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(crate) fn choose_present_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if caps.present_modes.contains(&requested) {
        requested
    } else {
        wgpu::PresentMode::Fifo
    }
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            surface.configure(device, config);
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    fn caps(formats: &[TextureFormat]) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats: formats.to_vec(),
            ..Default::default()
        }
    }

    // ── texture_format_for ────────────────────────────────────────────────

    #[test]
    fn rgba8888_follows_srgb_preference() {
        assert_eq!(
            texture_format_for(PixelFormat::RGBA_8888, true),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(
            texture_format_for(PixelFormat::RGBX_8888, false),
            Some(TextureFormat::Rgba8Unorm)
        );
    }

    #[test]
    fn wide_formats_map_directly() {
        assert_eq!(texture_format_for(PixelFormat::RGBA_FP16, true), Some(TextureFormat::Rgba16Float));
        assert_eq!(
            texture_format_for(PixelFormat::RGBA_1010102, true),
            Some(TextureFormat::Rgb10a2Unorm)
        );
    }

    #[test]
    fn unmapped_codes_have_no_direct_format() {
        assert_eq!(texture_format_for(PixelFormat::RGB_565, true), None);
        assert_eq!(texture_format_for(PixelFormat(-3), false), None);
    }

    // ── choose_surface_format ─────────────────────────────────────────────

    #[test]
    fn requested_format_wins_when_supported() {
        let c = caps(&[TextureFormat::Bgra8UnormSrgb, TextureFormat::Rgba16Float]);
        assert_eq!(
            choose_surface_format(&c, PixelFormat::RGBA_FP16, true),
            Some(TextureFormat::Rgba16Float)
        );
    }

    #[test]
    fn unsupported_request_falls_back_to_srgb() {
        let c = caps(&[TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb]);
        assert_eq!(
            choose_surface_format(&c, PixelFormat::RGBA_8888, true),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn fallback_without_srgb_takes_first() {
        let c = caps(&[TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb]);
        assert_eq!(
            choose_surface_format(&c, PixelFormat::RGB_565, false),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn no_formats_no_choice() {
        assert_eq!(choose_surface_format(&caps(&[]), PixelFormat::RGBA_8888, true), None);
    }

    // ── modes ─────────────────────────────────────────────────────────────

    #[test]
    fn present_mode_falls_back_to_fifo() {
        let mut c = caps(&[]);
        c.present_modes = vec![wgpu::PresentMode::Fifo];
        assert_eq!(choose_present_mode(&c, wgpu::PresentMode::Mailbox), wgpu::PresentMode::Fifo);

        c.present_modes.push(wgpu::PresentMode::Mailbox);
        assert_eq!(choose_present_mode(&c, wgpu::PresentMode::Mailbox), wgpu::PresentMode::Mailbox);
    }

    #[test]
    fn alpha_mode_ignores_unsupported_request() {
        let mut c = caps(&[]);
        c.alpha_modes = vec![wgpu::CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
    }
}
