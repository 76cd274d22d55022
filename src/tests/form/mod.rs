mod controller_tests;
mod json_view_tests;
mod list_ops_tests;
