pub mod date_filter;
