//! Core logic for the directory gallery.
//!
//! This module provides:
//! - [`collector`] directory selection and recursive file enumeration
//! - [`gallery`] conversion of collected files into gallery items
//! - [`layout`] justified thumbnail rows

pub mod collector;
pub mod error;
pub mod gallery;
pub mod layout;
