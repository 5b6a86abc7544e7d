//! Core `JsonSurfer` structure and session factories

use std::io::Read;

use jsurf_engine::{
    JsonProvider, NonBlockingParser, ResumableParser, SerdeJsonProvider, SurfResult,
    SurfingConfigBuilder, SurfingConfiguration, SurfingOptions,
};

/// Entry point for streaming JsonPath queries
///
/// Cheap to clone and reusable: every call creates its own session.
#[derive(Debug, Clone)]
pub struct JsonSurfer<P: JsonProvider + Clone = SerdeJsonProvider> {
    pub(super) provider: P,
    pub(super) options: SurfingOptions,
}

impl JsonSurfer<SerdeJsonProvider> {
    /// Surfer producing `serde_json::Value`s
    #[must_use]
    pub fn new() -> Self {
        Self::with_provider(SerdeJsonProvider)
    }
}

impl Default for JsonSurfer<SerdeJsonProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: JsonProvider + Clone> JsonSurfer<P> {
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            options: SurfingOptions::default(),
        }
    }

    /// Options applied to every configuration this surfer creates
    #[must_use]
    pub fn with_options(mut self, options: SurfingOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[inline]
    pub fn options(&self) -> &SurfingOptions {
        &self.options
    }

    /// New configuration builder preloaded with this surfer's provider and options
    pub fn config_builder(&self) -> SurfingConfigBuilder<P> {
        let mut builder = SurfingConfigBuilder::new(self.provider.clone());
        builder.options(self.options.clone());
        builder
    }

    /// Run `config` over the whole document
    ///
    /// Listener pauses are resumed immediately; stop requests end the run.
    ///
    /// # Errors
    ///
    /// Returns the first fatal session error.
    pub fn surf<R: Read>(&self, json: R, config: SurfingConfiguration<P>) -> SurfResult<()> {
        let mut parser = ResumableParser::new(json, config);
        run_to_end(&mut parser)
    }

    /// Session over `json` that listeners can pause
    pub fn create_resumable_parser<R: Read>(
        &self,
        json: R,
        config: SurfingConfiguration<P>,
    ) -> ResumableParser<R, P> {
        ResumableParser::new(json, config)
    }

    /// Session fed chunk by chunk by the caller
    pub fn create_non_blocking_parser(&self, config: SurfingConfiguration<P>) -> NonBlockingParser<P> {
        NonBlockingParser::new(config)
    }
}

/// Parse, resuming through listener pauses until the session finishes
pub(super) fn run_to_end<R: Read, P: JsonProvider>(parser: &mut ResumableParser<R, P>) -> SurfResult<()> {
    parser.parse()?;
    while parser.resume()? {}
    Ok(())
}
