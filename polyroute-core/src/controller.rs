//! Controller references and the handler-registry seam.
//!
//! Routes carry an opaque `"Handler:Action"` token. The router parses it into
//! a [`ControllerRef`] and passes it through; resolving it to something
//! callable is the host's job, through a [`HandlerRegistry`].

use std::collections::HashMap;
use std::fmt;

/// A parsed `"Handler:Action"` reference.
///
/// A bare `"Handler"` (no action) is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerRef {
    handler: String,
    action: Option<String>,
}

impl ControllerRef {
    pub fn new(handler: impl Into<String>, action: Option<impl Into<String>>) -> Self {
        Self {
            handler: handler.into(),
            action: action.map(Into::into),
        }
    }

    /// Split a reference on its first `:`.
    ///
    /// ```
    /// use polyroute_core::ControllerRef;
    ///
    /// let controller = ControllerRef::parse("Blog:show");
    /// assert_eq!(controller.handler(), "Blog");
    /// assert_eq!(controller.action(), Some("show"));
    /// ```
    pub fn parse(reference: &str) -> Self {
        match reference.split_once(':') {
            Some((handler, action)) => Self {
                handler: handler.trim().to_string(),
                action: Some(action.trim().to_string()).filter(|a| !a.is_empty()),
            },
            None => Self {
                handler: reference.trim().to_string(),
                action: None,
            },
        }
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

impl fmt::Display for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            Some(action) => write!(f, "{}:{}", self.handler, action),
            None => f.write_str(&self.handler),
        }
    }
}

/// Resolves controller references to host-defined handlers.
pub trait HandlerRegistry {
    type Handler;

    fn resolve(&self, controller: &ControllerRef) -> Option<&Self::Handler>;
}

/// A `HashMap`-backed [`HandlerRegistry`].
///
/// Lookups fall back from `Handler:Action` to a bare `Handler` registration.
#[derive(Debug, Clone)]
pub struct HandlerMap<H> {
    handlers: HashMap<ControllerRef, H>,
}

impl<H> HandlerMap<H> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, reference: &str, handler: H) -> &mut Self {
        self.handlers.insert(ControllerRef::parse(reference), handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H> Default for HandlerMap<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HandlerRegistry for HandlerMap<H> {
    type Handler = H;

    fn resolve(&self, controller: &ControllerRef) -> Option<&H> {
        self.handlers.get(controller).or_else(|| {
            controller.action()?;
            self.handlers
                .get(&ControllerRef::new(controller.handler(), None::<String>))
        })
    }
}
