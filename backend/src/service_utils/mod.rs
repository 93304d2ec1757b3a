//! Clients and helpers for the services this one depends on.

pub mod emphasis;
pub mod hocr_utils;
pub mod image_info_utils;
pub mod solr_utils;
