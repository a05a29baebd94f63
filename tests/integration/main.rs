//! Integration test modules.

mod reader_pipeline_test;
