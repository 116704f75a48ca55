use fracscape_core::GenerationParameters;

/// The live point-set handle together with the parameters that produced it.
///
/// Holds at most one handle; replacing it drops the previous one.
#[derive(Debug)]
pub struct ChartInstance<H> {
    current: Option<(GenerationParameters, H)>,
}

impl<H> ChartInstance<H> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Install `handle` for `params`, returning the handle it replaces.
    pub fn replace(&mut self, params: GenerationParameters, handle: H) -> Option<H> {
        self.current
            .replace((params, handle))
            .map(|(_, previous)| previous)
    }

    pub fn handle(&self) -> Option<&H> {
        self.current.as_ref().map(|(_, handle)| handle)
    }

    pub fn params(&self) -> Option<&GenerationParameters> {
        self.current.as_ref().map(|(params, _)| params)
    }

    /// True if the live handle was generated from exactly `params`.
    pub fn is_current(&self, params: &GenerationParameters) -> bool {
        self.params() == Some(params)
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

impl<H> Default for ChartInstance<H> {
    fn default() -> Self {
        Self::new()
    }
}
