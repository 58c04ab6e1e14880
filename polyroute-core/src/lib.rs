//! Language-aware regex route matching and reverse URL generation.
//!
//! Routes are slash-delimited regular expressions with optional and named
//! capture groups, declared per language. A [`Router`] resolves a request to
//! a [`MatchResult`] (200, 404 or 405), or to a [`Redirect`] when the path is
//! not in its single-trailing-slash form, and regenerates canonical paths and
//! absolute URLs for any named route in any of its languages.
//!
//! The core has no I/O. It emits `tracing` events and leaves installing a
//! subscriber to the host.

pub mod config;
pub mod controller;
pub mod definition;
pub mod error;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod request;
pub mod reverse;
pub mod router;
pub mod table;

pub use config::RouterConfig;
pub use controller::{ControllerRef, HandlerMap, HandlerRegistry};
pub use definition::{RouteBuilder, RouteDefinition};
pub use error::{Error, Result};
pub use matcher::{MatchResult, MatchStatus, Matcher, Redirect, Resolution};
pub use params::{ParamKey, Parameters};
pub use pattern::{CompiledPattern, PatternGroup};
pub use request::{Origin, RequestContext};
pub use reverse::{Generated, MissingParameter, ReverseGenerator};
pub use router::Router;
pub use table::{PatternsByLanguage, RouteTable};
