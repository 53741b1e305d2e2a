//! Meridian Core
//!
//! Core types and abstractions for the Meridian platform clients.
//!
//! This crate contains:
//! - Domain types: the resource shapes of the Delivery Pipeline and IAM
//!   Policy services (Pipeline, Trigger, Policy, PolicyAssignment, etc.)
//! - DTOs: request bodies for create/update operations, with client-side
//!   validation of the constraints the services enforce
//! - Composite IDs: the slash-delimited encoding used to address
//!   sub-resources through a single ID string

pub mod domain;
pub mod dto;
pub mod id;
