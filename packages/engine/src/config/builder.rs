//! Configuration builder

use std::fmt;

use super::binding::{Binding, BindingId, CaptureMode, JsonPathListener};
use super::options::SurfingOptions;
use crate::engine::ParsingContext;
use crate::error::{CompileError, SurfResult};
use crate::path::{CompiledPath, compile};
use crate::provider::{JsonProvider, SerdeJsonProvider};

/// Immutable set of bindings plus options, consumed by a session
pub struct SurfingConfiguration<P: JsonProvider = SerdeJsonProvider> {
    pub(crate) provider: P,
    pub(crate) bindings: Vec<Binding<P::Value>>,
    pub(crate) options: SurfingOptions,
}

impl<P: JsonProvider> SurfingConfiguration<P> {
    #[must_use]
    pub fn builder(provider: P) -> SurfingConfigBuilder<P> {
        SurfingConfigBuilder::new(provider)
    }

    #[inline]
    pub fn bindings(&self) -> &[Binding<P::Value>] {
        &self.bindings
    }

    #[inline]
    pub fn options(&self) -> &SurfingOptions {
        &self.options
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: JsonProvider> fmt::Debug for SurfingConfiguration<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfingConfiguration")
            .field("bindings", &self.bindings)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Collects bindings and options for a [`SurfingConfiguration`]
///
/// ```
/// use jsurf_engine::config::SurfingConfigBuilder;
/// use jsurf_engine::provider::SerdeJsonProvider;
///
/// let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
/// builder.bind("$.store.book[*].author", |author, _ctx| {
///     println!("{author}");
///     Ok(())
/// }).unwrap();
/// let titles = builder.collect_all("$..title").unwrap();
/// let config = builder.build().unwrap();
/// assert_eq!(config.bindings().len(), 2);
/// # let _ = titles;
/// ```
pub struct SurfingConfigBuilder<P: JsonProvider = SerdeJsonProvider> {
    provider: P,
    bindings: Vec<Binding<P::Value>>,
    options: SurfingOptions,
}

impl<P: JsonProvider> SurfingConfigBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            bindings: Vec::new(),
            options: SurfingOptions::default(),
        }
    }

    /// Fire `listener` for every value matching `expression`
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the expression does not compile.
    pub fn bind<F>(&mut self, expression: &str, listener: F) -> Result<BindingId, CompileError>
    where
        F: FnMut(&P::Value, &mut ParsingContext<'_>) -> anyhow::Result<()> + 'static,
    {
        let path = compile(expression)?;
        Ok(self.bind_path(path, listener))
    }

    /// Fire `listener` for every value matching an already compiled path
    pub fn bind_path<F>(&mut self, path: CompiledPath, listener: F) -> BindingId
    where
        F: FnMut(&P::Value, &mut ParsingContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.push(path, CaptureMode::FirePerMatch, Some(Box::new(listener)))
    }

    /// Register a [`JsonPathListener`] implementation
    pub fn bind_listener<L>(&mut self, path: CompiledPath, listener: L) -> BindingId
    where
        L: JsonPathListener<P::Value> + 'static,
    {
        self.push(path, CaptureMode::FirePerMatch, Some(Box::new(listener)))
    }

    /// Accumulate every value matching `expression` in the session
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the expression does not compile.
    pub fn collect_all(&mut self, expression: &str) -> Result<BindingId, CompileError> {
        let path = compile(expression)?;
        Ok(self.push(path, CaptureMode::CollectAll, None))
    }

    /// Keep only the first value matching `expression`
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the expression does not compile.
    pub fn collect_one(&mut self, expression: &str) -> Result<BindingId, CompileError> {
        let path = compile(expression)?;
        Ok(self.push(path, CaptureMode::CollectOne, None))
    }

    pub fn collect_path(&mut self, path: CompiledPath, mode: CaptureMode) -> BindingId {
        self.push(path, mode, None)
    }

    pub fn options(&mut self, options: SurfingOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn skip_overlapped_path(&mut self, enabled: bool) -> &mut Self {
        self.options.skip_overlapped_path = enabled;
        self
    }

    pub fn read_buffer_size(&mut self, size: usize) -> &mut Self {
        self.options.read_buffer_size = size;
        self
    }

    pub fn max_depth(&mut self, depth: usize) -> &mut Self {
        self.options.max_depth = Some(depth);
        self
    }

    /// Validate options and freeze the configuration
    ///
    /// # Errors
    ///
    /// Returns [`SurfError::Config`](crate::error::SurfError::Config) for invalid options.
    pub fn build(self) -> SurfResult<SurfingConfiguration<P>> {
        self.options.validate()?;
        Ok(SurfingConfiguration {
            provider: self.provider,
            bindings: self.bindings,
            options: self.options,
        })
    }

    fn push(
        &mut self,
        path: CompiledPath,
        mode: CaptureMode,
        listener: Option<Box<dyn JsonPathListener<P::Value>>>,
    ) -> BindingId {
        let id = BindingId(self.bindings.len());
        self.bindings.push(Binding {
            id,
            path,
            mode,
            listener,
        });
        id
    }
}

impl SurfingConfigBuilder<SerdeJsonProvider> {
    /// Deserialize every match into `T` before handing it to `listener`
    ///
    /// A value that does not deserialize into `T` fails the listener and
    /// therefore terminates the session.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the expression does not compile.
    pub fn bind_as<T, F>(&mut self, expression: &str, mut listener: F) -> Result<BindingId, CompileError>
    where
        T: serde::de::DeserializeOwned,
        F: FnMut(T, &mut ParsingContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.bind(expression, move |value: &serde_json::Value, context| {
            let typed = T::deserialize(value).map_err(|e| {
                anyhow::anyhow!("cannot deserialize match at {}: {e}", context.current_path())
            })?;
            listener(typed, context)
        })
    }
}
