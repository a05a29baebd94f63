//! Unit test modules.

mod ifit_packet_test;
mod metrics_timing_test;
mod packet_reader_test;
mod view_model_test;
