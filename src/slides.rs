use crate::error::{Result, SlideshowError};

/// Ordered, non-empty, immutable set of slide handles.
#[derive(Debug, Clone)]
pub struct SlideSet<T> {
    slides: Vec<T>,
}

impl<T> SlideSet<T> {
    pub fn new(slides: Vec<T>) -> Result<Self> {
        if slides.is_empty() {
            return Err(SlideshowError::NoSlides);
        }
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slides.iter()
    }
}

impl<'a, T> IntoIterator for &'a SlideSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
