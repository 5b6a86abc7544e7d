//! Incremental value assembly from structural events

use super::JsonProvider;
use crate::lexer::JsonEvent;

#[derive(Debug)]
struct Level<V> {
    value: V,
    is_object: bool,
    pending_key: Option<String>,
}

/// Builds one container value from the events between its start and end
///
/// Created when the engine sees the opening event of a matched container;
/// every following event up to and including the matching close is pushed
/// into it.
#[derive(Debug)]
pub struct ValueAssembler<V> {
    stack: Vec<Level<V>>,
    complete: Option<V>,
}

impl<V> ValueAssembler<V> {
    /// Start assembling an object (`is_object`) or array
    pub fn begin<P>(provider: &P, is_object: bool) -> Self
    where
        P: JsonProvider<Value = V>,
    {
        let value = if is_object {
            provider.create_object()
        } else {
            provider.create_array()
        };
        Self {
            stack: vec![Level {
                value,
                is_object,
                pending_key: None,
            }],
            complete: None,
        }
    }

    /// Feed the next event
    pub fn push<P>(&mut self, provider: &P, event: &JsonEvent)
    where
        P: JsonProvider<Value = V>,
    {
        match event {
            JsonEvent::StartObject => self.stack.push(Level {
                value: provider.create_object(),
                is_object: true,
                pending_key: None,
            }),
            JsonEvent::StartArray => self.stack.push(Level {
                value: provider.create_array(),
                is_object: false,
                pending_key: None,
            }),
            JsonEvent::FieldName(name) => {
                if let Some(top) = self.stack.last_mut() {
                    top.pending_key = Some(name.clone());
                }
            }
            JsonEvent::Scalar(scalar) => {
                let value = provider.primitive(scalar.clone());
                self.attach(provider, value);
            }
            JsonEvent::EndObject | JsonEvent::EndArray => {
                if let Some(level) = self.stack.pop() {
                    self.attach(provider, level.value);
                }
            }
        }
    }

    fn attach<P>(&mut self, provider: &P, value: V)
    where
        P: JsonProvider<Value = V>,
    {
        match self.stack.last_mut() {
            Some(parent) if parent.is_object => {
                let key = parent.pending_key.take().unwrap_or_default();
                provider.put(&mut parent.value, key, value);
            }
            Some(parent) => provider.add(&mut parent.value, value),
            None => self.complete = Some(value),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete.is_some()
    }

    /// The assembled value once the closing event has been pushed
    #[inline]
    pub fn finish(self) -> Option<V> {
        self.complete
    }
}
