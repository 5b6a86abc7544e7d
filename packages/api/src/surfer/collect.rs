//! Collect helpers

use std::cell::RefCell;
use std::io::Read;
use std::rc::Rc;

use jsurf_engine::{JsonProvider, ResumableParser, SerdeJsonProvider, SurfError, SurfResult};
use serde::de::DeserializeOwned;

use super::core::{JsonSurfer, run_to_end};

impl<P: JsonProvider + Clone> JsonSurfer<P> {
    /// Every value matching `path`, in document order
    ///
    /// # Errors
    ///
    /// Fails for an invalid expression or a malformed document.
    pub fn collect_all<R: Read>(&self, json: R, path: &str) -> SurfResult<Vec<P::Value>> {
        let mut builder = self.config_builder();
        let binding = builder.collect_all(path)?;
        let mut parser = ResumableParser::new(json, builder.build()?);
        run_to_end(&mut parser)?;
        Ok(parser.take_collected(binding))
    }

    /// Every value matching any of `paths`, in document order
    ///
    /// A node matched by several paths is returned once per path.
    ///
    /// # Errors
    ///
    /// Fails for an invalid expression or a malformed document.
    pub fn collect_all_paths<R: Read>(&self, json: R, paths: &[&str]) -> SurfResult<Vec<P::Value>> {
        let found: Rc<RefCell<Vec<P::Value>>> = Rc::new(RefCell::new(Vec::new()));
        let mut builder = self.config_builder();
        for path in paths {
            let sink = Rc::clone(&found);
            builder.bind(path, move |value, _context| {
                sink.borrow_mut().push(value.clone());
                Ok(())
            })?;
        }
        self.surf(json, builder.build()?)?;
        Ok(found.take())
    }

    /// First value matching `path`; parsing stops as soon as it is found
    ///
    /// # Errors
    ///
    /// Returns [`SurfError::BindingNotSatisfied`] when nothing matches, or the
    /// compile or protocol error encountered first.
    pub fn collect_one<R: Read>(&self, json: R, path: &str) -> SurfResult<P::Value> {
        let found: Rc<RefCell<Option<P::Value>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&found);
        let mut builder = self.config_builder();
        builder.bind(path, move |value, context| {
            *sink.borrow_mut() = Some(value.clone());
            context.stop();
            Ok(())
        })?;
        self.surf(json, builder.build()?)?;

        let value = found.take();
        value.ok_or_else(|| {
            tracing::debug!(target: "jsurf::surfer", path, "collect_one found no match");
            SurfError::not_satisfied(path)
        })
    }
}

impl JsonSurfer<SerdeJsonProvider> {
    /// [`collect_all`](Self::collect_all) deserializing each match into `T`
    ///
    /// # Errors
    ///
    /// Additionally returns [`SurfError::Deserialize`] for a value that does not fit `T`.
    pub fn collect_all_as<T: DeserializeOwned, R: Read>(&self, json: R, path: &str) -> SurfResult<Vec<T>> {
        self.collect_all(json, path)?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(|e| SurfError::deserialize(path, e)))
            .collect()
    }

    /// [`collect_one`](Self::collect_one) deserializing the match into `T`
    ///
    /// # Errors
    ///
    /// Additionally returns [`SurfError::Deserialize`] for a value that does not fit `T`.
    pub fn collect_one_as<T: DeserializeOwned, R: Read>(&self, json: R, path: &str) -> SurfResult<T> {
        let value = self.collect_one(json, path)?;
        serde_json::from_value(value).map_err(|e| SurfError::deserialize(path, e))
    }
}
