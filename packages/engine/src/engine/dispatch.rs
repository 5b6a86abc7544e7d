//! Delivery of ready matches to bindings

use super::context::ParsingContext;
use super::core::SurfingEngine;
use crate::config::CaptureMode;
use crate::error::{SurfError, SurfResult};
use crate::provider::JsonProvider;

/// What the session should do after a dispatch round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep consuming input
    Continue,
    /// A listener paused the session
    Paused,
    /// A listener stopped the session
    Stopped,
}

impl<P: JsonProvider> SurfingEngine<P> {
    /// Deliver queued matches in order until the queue drains or a listener
    /// pauses or stops the session
    ///
    /// Matches left in the queue by a pause are delivered by the next call.
    ///
    /// # Errors
    ///
    /// Returns [`SurfError::Listener`] when a listener fails.
    pub fn dispatch(&mut self) -> SurfResult<Flow> {
        while let Some(ready) = self.ready.pop_front() {
            let Some(binding) = self.bindings.get_mut(ready.binding) else {
                continue;
            };
            if binding.is_inert() {
                continue;
            }

            match binding.mode {
                CaptureMode::CollectAll | CaptureMode::CollectOne => {
                    binding.collected.push((*ready.value).clone());
                    self.stats.record_match();
                }
                CaptureMode::FirePerMatch => {
                    let Some(listener) = binding.listener.as_mut() else {
                        continue;
                    };
                    let mut context = ParsingContext::new(&binding.path, &ready.location, &mut self.store);
                    let outcome = listener.on_value(&ready.value, &mut context);
                    let signal = context.signal();
                    self.stats.record_match();

                    if let Err(source) = outcome {
                        let expression = binding.path.expression().to_string();
                        log::error!("listener for '{expression}' failed at {}: {source:#}", ready.location.path);
                        return Err(SurfError::listener(expression, source));
                    }

                    tracing::trace!(
                        target: "jsurf::engine",
                        binding = ready.binding,
                        location = %ready.location.path,
                        "delivered match"
                    );

                    if signal.skip_children {
                        self.begin_skip();
                    }
                    if signal.stop {
                        return Ok(Flow::Stopped);
                    }
                    if signal.pause {
                        return Ok(Flow::Paused);
                    }
                }
            }
        }
        Ok(Flow::Continue)
    }
}
