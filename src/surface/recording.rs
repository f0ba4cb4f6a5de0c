use super::{IndicatorAnimation, PresentationSurface};
use crate::sizing::Size;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Show(usize),
    Hide(usize),
    MountIndicator { width: u32, visible: bool },
    AnimateIndicator(IndicatorAnimation),
    Resize(Size),
}

/// Surface that only remembers what it was asked to do.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    ready: Option<Size>,
    viewport: Size,
}

impl RecordingSurface {
    pub fn new(natural: Size, viewport: Size) -> Self {
        Self {
            calls: Vec::new(),
            ready: Some(natural),
            viewport,
        }
    }

    /// Surface whose content is still loading.
    pub fn loading(viewport: Size) -> Self {
        Self {
            calls: Vec::new(),
            ready: None,
            viewport,
        }
    }

    pub fn finish_loading(&mut self, natural: Size) {
        self.ready = Some(natural);
    }

    /// Indices passed to `show_slide`, in order.
    pub fn shown(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Show(index) => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn animations(&self) -> Vec<IndicatorAnimation> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::AnimateIndicator(animation) => Some(*animation),
                _ => None,
            })
            .collect()
    }
}

impl PresentationSurface for RecordingSurface {
    fn show_slide(&mut self, index: usize) {
        self.calls.push(SurfaceCall::Show(index));
    }

    fn hide_slide(&mut self, index: usize) {
        self.calls.push(SurfaceCall::Hide(index));
    }

    fn mount_indicator(&mut self, width: u32, visible: bool) {
        self.calls.push(SurfaceCall::MountIndicator { width, visible });
    }

    fn animate_indicator(&mut self, animation: IndicatorAnimation) {
        self.calls.push(SurfaceCall::AnimateIndicator(animation));
    }

    fn report_ready(&mut self) -> Option<Size> {
        self.ready
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn resize_slides(&mut self, size: Size) {
        self.calls.push(SurfaceCall::Resize(size));
    }
}
