//! Size resolution once slides are ready.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Explicit dimensions win; missing ones come from the first ready slide.
pub fn resolve_size(width: Option<u32>, height: Option<u32>, natural: Size) -> Size {
    Size {
        width: width.unwrap_or(natural.width),
        height: height.unwrap_or(natural.height),
    }
}

/// Shrinks `size` proportionally when the viewport is narrower than it.
pub fn fit_to_viewport(size: Size, viewport_width: u32) -> Size {
    if viewport_width == 0 || viewport_width >= size.width {
        return size;
    }
    let height = u64::from(viewport_width) * u64::from(size.height) / u64::from(size.width);
    Size {
        width: viewport_width,
        height: height as u32,
    }
}

/// Top-left corner that centers `content` inside `screen`.
pub fn centered_origin(screen: Size, content: Size) -> (f32, f32) {
    (
        (screen.width as f32 - content.width as f32) * 0.5,
        (screen.height as f32 - content.height as f32) * 0.5,
    )
}
