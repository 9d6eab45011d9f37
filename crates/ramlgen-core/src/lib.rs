//! ramlgen Core Library
//!
//! This library turns collected API metadata (resources, actions, routes and
//! content types) into a RAML 0.8 document. Routes that only differ by the
//! optional `.{mediaTypeExtension}` suffix are folded into one resource node.

pub mod builders;
pub mod config;
pub mod error;
pub mod generator;
pub mod metadata;
pub mod parameters;
pub mod raml;
pub mod render;
pub mod report;
pub mod tree;
pub mod working_set;

pub use crate::{
    config::GeneratorConfig,
    error::{Error, Result},
    generator::RamlCollectionGenerator,
    metadata::ApiDocumentation,
    raml::RamlSpec,
    render::to_raml,
    report::{LogReporter, NullReporter, Reporter},
    working_set::WorkingSet,
};
